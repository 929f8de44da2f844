use super::*;

#[test]
fn role_label_capitalizes_first_letter() {
    assert_eq!(role_label("admin"), "Admin");
    assert_eq!(role_label(" user "), "User");
}

#[test]
fn role_label_defaults_for_blank_role() {
    assert_eq!(role_label(""), "Member");
}
