use super::*;
use session::{Session, User};

fn signed_in() -> AuthState {
    AuthState::resolved(Some(Session {
        token: "t-1".to_owned(),
        user: User {
            id: "7".to_owned(),
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role: "user".to_owned(),
            bio: None,
            phone: None,
            location: None,
        },
    }))
}

#[test]
fn no_redirect_while_loading() {
    assert_eq!(redirect_for("/dashboard", &AuthState::pending()), None);
}

#[test]
fn anonymous_protected_path_redirects_with_return_param() {
    assert_eq!(
        redirect_for("/dashboard", &AuthState::resolved(None)),
        Some("/authentication/login?from=%2Fdashboard".to_owned())
    );
}

#[test]
fn anonymous_public_path_is_allowed() {
    assert_eq!(redirect_for("/authentication/signup", &AuthState::resolved(None)), None);
    assert_eq!(redirect_for("/", &AuthState::resolved(None)), None);
}

#[test]
fn signed_in_user_reaches_protected_and_auth_pages() {
    let state = signed_in();
    assert_eq!(redirect_for("/profile", &state), None);
    assert_eq!(redirect_for("/authentication/login", &state), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn controller_without_browser_starts_anonymous() {
    let controller = controller();
    assert_eq!(controller.load(), None);
    assert_eq!(controller.phase(), session::SessionPhase::Anonymous);
}
