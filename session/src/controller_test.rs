use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use super::*;
use crate::api::ApiReply;
use crate::credentials::{LoginCredentials, LoginForm, RegisterCredentials, SignupForm};
use crate::error::{TransportError, ValidationError};
use crate::store::{MemoryStore, TOKEN_KEY, USER_KEY};
use crate::types::User;

const OK_BODY: &str = r#"{"success":true,"message":"ok","data":{"token":"abc123","user":{"id":"1","username":"tester","email":"test@gmail.com","role":"user"}}}"#;

// =============================================================
// Stub AuthAPI
// =============================================================

/// Resolves on the second poll, so a caller can observe the in-flight state.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

struct StubApi {
    reply: Result<ApiReply, TransportError>,
    valid: Result<bool, TransportError>,
    pause: bool,
    calls: Cell<usize>,
    last_login: RefCell<Option<LoginCredentials>>,
    last_update: RefCell<Option<(String, ProfileUpdate)>>,
}

impl StubApi {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(ApiReply { status, body: body.to_owned() }),
            valid: Ok(true),
            pause: false,
            calls: Cell::new(0),
            last_login: RefCell::new(None),
            last_update: RefCell::new(None),
        }
    }

    fn failing(err: TransportError) -> Self {
        Self { reply: Err(err), ..Self::replying(200, "") }
    }

    async fn respond(&self) -> Result<ApiReply, TransportError> {
        self.calls.set(self.calls.get() + 1);
        if self.pause {
            YieldOnce(false).await;
        }
        self.reply.clone()
    }
}

impl AuthApi for StubApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<ApiReply, TransportError> {
        *self.last_login.borrow_mut() = Some(credentials.clone());
        self.respond().await
    }

    async fn register(&self, _credentials: &RegisterCredentials) -> Result<ApiReply, TransportError> {
        self.respond().await
    }

    async fn validate(&self, _token: &str) -> Result<bool, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.valid.clone()
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<ApiReply, TransportError> {
        *self.last_update.borrow_mut() = Some((token.to_owned(), update.clone()));
        self.respond().await
    }
}

fn login(email: &str, password: &str) -> CredentialRequest {
    CredentialRequest::Login(LoginForm { email: email.to_owned(), password: password.to_owned() })
}

fn sample_session(token: &str) -> Session {
    Session {
        token: token.to_owned(),
        user: User {
            id: "9".to_owned(),
            username: "earlier".to_owned(),
            email: "earlier@x.io".to_owned(),
            role: "user".to_owned(),
            bio: None,
            phone: None,
            location: None,
        },
    }
}

// =============================================================
// submit
// =============================================================

#[tokio::test]
async fn login_end_to_end_persists_and_unlocks_dashboard() {
    let store = MemoryStore::new();
    let api = StubApi::replying(200, OK_BODY);
    let controller = SessionController::new(&store, &api);

    let session = controller.submit(login("test@gmail.com", "test123")).await.unwrap();

    assert_eq!(session.token, "abc123");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc123"));
    assert_eq!(controller.load(), Some(session));
    assert_eq!(controller.guard("/dashboard"), GuardDecision::Allow);
    assert_eq!(controller.phase(), SessionPhase::Authenticated);
    assert_eq!(api.last_login.borrow().as_ref().map(|c| c.email.as_str()), Some("test@gmail.com"));
}

#[tokio::test]
async fn register_password_mismatch_never_calls_api() {
    let store = MemoryStore::new();
    let api = StubApi::replying(200, OK_BODY);
    let controller = SessionController::new(&store, &api);

    let request = CredentialRequest::Register(SignupForm {
        username: "tester".to_owned(),
        email: "test@gmail.com".to_owned(),
        password: "test123".to_owned(),
        confirm_password: "test124".to_owned(),
        agree_terms: true,
    });
    let err = controller.submit(request).await.unwrap_err();

    assert_eq!(err, SessionError::Validation(ValidationError::PasswordMismatch));
    assert_eq!(err.user_message(), "Passwords do not match");
    assert!(err.is_local());
    assert_eq!(api.calls.get(), 0);
    assert!(store.is_empty());
    assert_eq!(controller.phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn rejected_login_leaves_existing_session_untouched() {
    let store = MemoryStore::new();
    store::persist_session(&store, &sample_session("old")).unwrap();
    let before = store.snapshot();
    let api = StubApi::replying(401, r#"{"success":false,"message":"Invalid credentials"}"#);
    let controller = SessionController::new(&store, &api);
    assert!(controller.load().is_some());

    let err = controller.submit(login("test@gmail.com", "wrong")).await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(store.snapshot(), before);
    assert_eq!(controller.phase(), SessionPhase::Authenticated);
}

#[tokio::test]
async fn rejected_login_without_message_uses_fallback() {
    let store = MemoryStore::new();
    let api = StubApi::replying(500, "Internal Server Error");
    let controller = SessionController::new(&store, &api);

    let err = controller.submit(login("a@b.io", "pw")).await.unwrap_err();

    assert_eq!(err.user_message(), "Login failed. Please check your credentials.");
    assert!(store.is_empty());
    assert_eq!(controller.phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn transport_failure_is_distinct_from_bad_credentials() {
    let store = MemoryStore::new();
    let api = StubApi::failing(TransportError::Network("connection refused".to_owned()));
    let controller = SessionController::new(&store, &api);

    let err = controller.submit(login("a@b.io", "pw")).await.unwrap_err();

    assert!(matches!(err, SessionError::Transport(TransportError::Network(_))));
    assert_eq!(err.user_message(), "Could not reach the server. Please try again.");
    assert!(store.is_empty());
    assert_eq!(controller.phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn timeout_reports_timeout_message() {
    let store = MemoryStore::new();
    let api = StubApi::failing(TransportError::Timeout);
    let controller = SessionController::new(&store, &api);

    let err = controller.submit(login("a@b.io", "pw")).await.unwrap_err();

    assert_eq!(err.user_message(), "The server took too long to respond. Please try again.");
}

#[tokio::test]
async fn second_submit_while_in_flight_is_busy() {
    let store = MemoryStore::new();
    let api = StubApi { pause: true, ..StubApi::replying(200, OK_BODY) };
    let controller = SessionController::new(&store, &api);

    let mut first = std::pin::pin!(controller.submit(login("test@gmail.com", "test123")));
    let mut cx = Context::from_waker(Waker::noop());
    assert!(first.as_mut().poll(&mut cx).is_pending());
    assert_eq!(controller.phase(), SessionPhase::Authenticating);

    let second = controller.submit(login("test@gmail.com", "test123")).await;
    assert_eq!(second, Err(SessionError::Busy));
    assert_eq!(api.calls.get(), 1);

    let session = first.await.unwrap();
    assert_eq!(session.token, "abc123");
    assert_eq!(controller.phase(), SessionPhase::Authenticated);
}

// =============================================================
// load / persist / clear / guard
// =============================================================

#[tokio::test]
async fn persist_then_load_round_trips() {
    let store = MemoryStore::new();
    let controller = SessionController::new(&store, StubApi::replying(200, OK_BODY));
    let session = sample_session("tok");

    controller.persist(&session).unwrap();

    assert_eq!(controller.load(), Some(session));
}

#[tokio::test]
async fn corrupt_user_resolves_to_anonymous_and_clears() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "abc123").unwrap();
    store.set(USER_KEY, "definitely not json").unwrap();
    let controller = SessionController::new(&store, StubApi::replying(200, OK_BODY));

    assert_eq!(controller.load(), None);
    assert_eq!(controller.phase(), SessionPhase::Anonymous);
    assert!(store.get(TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
}

#[tokio::test]
async fn clear_twice_matches_clear_once() {
    let store = MemoryStore::new();
    let controller = SessionController::new(&store, StubApi::replying(200, OK_BODY));
    controller.persist(&sample_session("tok")).unwrap();

    controller.clear();
    let once = store.snapshot();
    controller.clear();

    assert_eq!(store.snapshot(), once);
    assert!(once.is_empty());
    assert_eq!(controller.phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn guard_without_session_redirects_to_login() {
    let store = MemoryStore::new();
    let controller = SessionController::new(&store, StubApi::replying(200, OK_BODY));

    match controller.guard("/dashboard") {
        GuardDecision::Redirect(location) => assert!(location.starts_with("/authentication/login")),
        GuardDecision::Allow => panic!("dashboard must not render without a session"),
    }
    assert!(controller.guard("/authentication/login").is_allowed());
}

// =============================================================
// validate
// =============================================================

#[tokio::test]
async fn validate_without_session_skips_network() {
    let api = StubApi::replying(200, OK_BODY);
    let controller = SessionController::new(MemoryStore::new(), &api);

    assert_eq!(controller.validate().await, Ok(false));
    assert_eq!(api.calls.get(), 0);
}

#[tokio::test]
async fn rejected_token_clears_session() {
    let store = MemoryStore::new();
    let api = StubApi { valid: Ok(false), ..StubApi::replying(200, OK_BODY) };
    let controller = SessionController::new(&store, &api);
    controller.persist(&sample_session("stale")).unwrap();

    assert_eq!(controller.validate().await, Ok(false));
    assert!(store.is_empty());
}

#[tokio::test]
async fn validation_transport_error_keeps_session() {
    let store = MemoryStore::new();
    let api = StubApi { valid: Err(TransportError::Timeout), ..StubApi::replying(200, OK_BODY) };
    let controller = SessionController::new(&store, &api);
    controller.persist(&sample_session("tok")).unwrap();

    assert_eq!(controller.validate().await, Err(SessionError::Transport(TransportError::Timeout)));
    assert!(controller.load().is_some());
}

// =============================================================
// profile
// =============================================================

#[tokio::test]
async fn update_profile_rewrites_user_and_keeps_token() {
    let store = MemoryStore::new();
    let api = StubApi::replying(200, r#"{"success":true,"message":"updated"}"#);
    let controller = SessionController::new(&store, &api);
    controller.persist(&sample_session("tok")).unwrap();
    let image = ProfileImage::new("image/png", 4, "data:image/png;base64,AAAA".to_owned()).unwrap();
    controller.cache_profile_image(&image).unwrap();

    let edit = ProfileUpdate { username: " renamed ".to_owned(), email: "new@x.io".to_owned(), ..ProfileUpdate::default() };
    let updated = controller.update_profile(&edit).await.unwrap();

    assert_eq!(updated.token, "tok");
    assert_eq!(updated.user.username, "renamed");
    assert_eq!(updated.user.id, "9");
    assert_eq!(controller.load(), Some(updated));
    let sent = api.last_update.borrow().clone().unwrap();
    assert_eq!(sent.0, "tok");
    assert_eq!(sent.1.profile_image.as_deref(), Some("data:image/png;base64,AAAA"));
}

#[tokio::test]
async fn failed_profile_update_keeps_cached_user() {
    let store = MemoryStore::new();
    let api = StubApi::replying(400, r#"{"success":false,"message":"Email already in use"}"#);
    let controller = SessionController::new(&store, &api);
    controller.persist(&sample_session("tok")).unwrap();

    let edit = ProfileUpdate { username: "renamed".to_owned(), email: "taken@x.io".to_owned(), ..ProfileUpdate::default() };
    let err = controller.update_profile(&edit).await.unwrap_err();

    assert_eq!(err.user_message(), "Email already in use");
    assert_eq!(controller.load(), Some(sample_session("tok")));
}

#[tokio::test]
async fn update_profile_without_session_fails_locally() {
    let api = StubApi::replying(200, r#"{"success":true}"#);
    let controller = SessionController::new(MemoryStore::new(), &api);

    let err = controller.update_profile(&ProfileUpdate::default()).await.unwrap_err();

    assert_eq!(err, SessionError::NoSession);
    assert_eq!(api.calls.get(), 0);
}

#[tokio::test]
async fn clear_drops_cached_profile_image() {
    let store = MemoryStore::new();
    let controller = SessionController::new(&store, StubApi::replying(200, OK_BODY));
    controller.persist(&sample_session("tok")).unwrap();
    let image = ProfileImage::new("image/gif", 1, "data:image/gif;base64,R0".to_owned()).unwrap();
    controller.cache_profile_image(&image).unwrap();

    controller.clear();

    assert_eq!(controller.profile_image(), None);
}
