use super::*;
use session::ValidationError;

fn filled() -> SignupForm {
    SignupForm {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
        agree_terms: true,
    }
}

#[test]
fn mismatched_passwords_surface_inline_message() {
    let form = SignupForm { confirm_password: "other".to_owned(), ..filled() };
    let err = CredentialRequest::Register(form).into_payload().err();
    assert_eq!(err, Some(ValidationError::PasswordMismatch));
    assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
}

#[test]
fn unchecked_terms_block_submission() {
    let form = SignupForm { agree_terms: false, ..filled() };
    assert_eq!(CredentialRequest::Register(form).into_payload().err(), Some(ValidationError::TermsNotAccepted));
}

#[test]
fn complete_form_is_accepted() {
    assert!(CredentialRequest::Register(filled()).into_payload().is_ok());
}

#[test]
fn welcome_message_names_user() {
    assert_eq!(welcome_message("alice"), "Account created. Welcome to Splito, alice!");
}

#[test]
fn login_href_preserves_return_path() {
    assert_eq!(login_href(None), "/authentication/login");
    assert_eq!(login_href(Some("/dashboard")), "/authentication/login?from=%2Fdashboard");
}
