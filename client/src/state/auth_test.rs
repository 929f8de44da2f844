use super::*;

fn session() -> Session {
    Session {
        token: "t-1".to_owned(),
        user: User {
            id: "1".to_owned(),
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role: "user".to_owned(),
            bio: None,
            phone: None,
            location: None,
        },
    }
}

#[test]
fn default_state_is_pending() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.session.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn resolved_without_session_is_anonymous() {
    let state = AuthState::resolved(None);
    assert!(!state.loading);
    assert!(!state.is_authenticated());
    assert!(state.user().is_none());
}

#[test]
fn resolved_with_session_exposes_user() {
    let state = AuthState::resolved(Some(session()));
    assert!(state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(state.user().map(|u| u.username.as_str()), Some("alice"));
}
