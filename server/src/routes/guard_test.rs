use std::cell::Cell;

use axum::http::{HeaderMap, HeaderValue, header};
use session::api::ApiReply;
use session::credentials::{LoginCredentials, RegisterCredentials};
use session::store::{TOKEN_KEY, USER_KEY};
use session::{ProfileUpdate, TransportError};

use super::*;

const USER_JSON: &str = r#"{"id":"1","username":"alice","email":"alice@example.com","role":"user"}"#;

/// Validation-only AuthAPI stub.
struct StubValidator {
    answer: Result<bool, TransportError>,
    calls: Cell<u32>,
}

impl StubValidator {
    fn new(answer: Result<bool, TransportError>) -> Self {
        Self { answer, calls: Cell::new(0) }
    }
}

impl AuthApi for StubValidator {
    async fn login(&self, _: &LoginCredentials) -> Result<ApiReply, TransportError> {
        Err(TransportError::Unavailable)
    }

    async fn register(&self, _: &RegisterCredentials) -> Result<ApiReply, TransportError> {
        Err(TransportError::Unavailable)
    }

    async fn validate(&self, _token: &str) -> Result<bool, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone()
    }

    async fn update_profile(&self, _: &str, _: &ProfileUpdate) -> Result<ApiReply, TransportError> {
        Err(TransportError::Unavailable)
    }
}

fn jar_with(cookies: &[(&str, &str)]) -> CookieJar {
    let header_value = cookies
        .iter()
        .map(|(name, value)| Cookie::new(*name, *value).encoded().to_string())
        .collect::<Vec<_>>()
        .join("; ");
    let mut headers = HeaderMap::new();
    if !header_value.is_empty() {
        headers.insert(header::COOKIE, HeaderValue::from_str(&header_value).unwrap());
    }
    CookieJar::from_headers(&headers)
}

fn signed_in_jar() -> CookieJar {
    jar_with(&[(TOKEN_KEY, "abc123"), (USER_KEY, USER_JSON)])
}

async fn run(path: &str, jar: CookieJar, validator: Option<&StubValidator>) -> (CookieJar, GuardDecision) {
    decide(path, jar, CookieAttributes::default(), validator).await
}

// =============================================================
// Decisions without validation
// =============================================================

#[tokio::test]
async fn anonymous_protected_request_redirects_with_from() {
    let (_, decision) = run("/dashboard", jar_with(&[]), None).await;
    assert_eq!(decision, GuardDecision::Redirect("/authentication/login?from=%2Fdashboard".to_owned()));
}

#[tokio::test]
async fn anonymous_public_request_is_allowed() {
    for path in ["/", "/authentication", "/authentication/login", "/authentication/signup"] {
        let (_, decision) = run(path, jar_with(&[]), None).await;
        assert_eq!(decision, GuardDecision::Allow, "{path}");
    }
}

#[tokio::test]
async fn signed_in_request_reaches_protected_page() {
    let (jar, decision) = run("/profile", signed_in_jar(), None).await;
    assert_eq!(decision, GuardDecision::Allow);
    assert_eq!(jar.get(TOKEN_KEY).map(|c| c.value().to_owned()), Some("abc123".to_owned()));
}

#[tokio::test]
async fn signed_in_request_may_view_login_page() {
    let (_, decision) = run("/authentication/login", signed_in_jar(), None).await;
    assert_eq!(decision, GuardDecision::Allow);
}

#[tokio::test]
async fn corrupt_user_cookie_is_cleared_and_redirected() {
    let jar = jar_with(&[(TOKEN_KEY, "abc123"), (USER_KEY, "{not json")]);
    let (jar, decision) = run("/dashboard", jar, None).await;
    assert!(!decision.is_allowed());
    assert!(jar.get(TOKEN_KEY).is_none());
    assert!(jar.get(USER_KEY).is_none());
}

#[tokio::test]
async fn token_without_user_is_cleared_on_public_page() {
    let (jar, decision) = run("/", jar_with(&[(TOKEN_KEY, "abc123")]), None).await;
    assert_eq!(decision, GuardDecision::Allow);
    assert!(jar.get(TOKEN_KEY).is_none());
}

// =============================================================
// Token validation
// =============================================================

#[tokio::test]
async fn accepted_token_is_allowed() {
    let stub = StubValidator::new(Ok(true));
    let (_, decision) = run("/dashboard", signed_in_jar(), Some(&stub)).await;
    assert_eq!(decision, GuardDecision::Allow);
    assert_eq!(stub.calls.get(), 1);
}

#[tokio::test]
async fn rejected_token_clears_cookies_and_redirects() {
    let stub = StubValidator::new(Ok(false));
    let (jar, decision) = run("/dashboard", signed_in_jar(), Some(&stub)).await;
    assert!(!decision.is_allowed());
    assert!(jar.get(TOKEN_KEY).is_none());
    assert!(jar.get(USER_KEY).is_none());
}

#[tokio::test]
async fn validation_failure_fails_closed() {
    let stub = StubValidator::new(Err(TransportError::Timeout));
    let (jar, decision) = run("/profile", signed_in_jar(), Some(&stub)).await;
    assert_eq!(decision, GuardDecision::Redirect("/authentication/login?from=%2Fprofile".to_owned()));
    assert!(jar.get(TOKEN_KEY).is_none());
}

#[tokio::test]
async fn public_pages_skip_validation() {
    let stub = StubValidator::new(Ok(false));
    let (_, decision) = run("/authentication/login", signed_in_jar(), Some(&stub)).await;
    assert_eq!(decision, GuardDecision::Allow);
    assert_eq!(stub.calls.get(), 0);
}

// =============================================================
// JarStore
// =============================================================

#[test]
fn jar_store_round_trips_json_values() {
    let store = JarStore::new(CookieJar::new(), CookieAttributes::default());
    store.set(USER_KEY, USER_JSON).unwrap();
    assert_eq!(store.get(USER_KEY).as_deref(), Some(USER_JSON));
    let jar = store.into_jar();
    let stored = jar.get(USER_KEY).unwrap();
    assert_eq!(stored.value(), USER_JSON);
    assert_eq!(stored.max_age(), Some(CookieAttributes::default().max_age()));
    assert!(stored.encoded().to_string().starts_with("user=%7B"));
}

#[test]
fn jar_store_reads_cookies_written_by_the_browser() {
    let pairs = [(TOKEN_KEY, "abc123"), (USER_KEY, USER_JSON)]
        .iter()
        .map(|(name, value)| {
            let assignment = cookie::set_cookie(name, value, CookieAttributes::default());
            assignment.split(';').next().unwrap().to_owned()
        })
        .collect::<Vec<_>>()
        .join("; ");
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(&pairs).unwrap());

    let store = JarStore::new(CookieJar::from_headers(&headers), CookieAttributes::default());
    let session = store::load_session(&store).unwrap();
    assert_eq!(session.token, "abc123");
    assert_eq!(session.user.username, "alice");
}

#[test]
fn jar_store_ignores_profile_image() {
    let store = JarStore::new(CookieJar::new(), CookieAttributes::default());
    store.set(PROFILE_IMAGE_KEY, "data:image/png;base64,AAAA").unwrap();
    assert_eq!(store.get(PROFILE_IMAGE_KEY), None);
}

#[test]
fn is_guarded_only_for_document_methods() {
    assert!(is_guarded(&Method::GET));
    assert!(is_guarded(&Method::HEAD));
    assert!(!is_guarded(&Method::POST));
}
