use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::storage::MemoryStorage;

// =============================================================================
// FAKES
// =============================================================================

/// Storage shared between the store and a backend that tampers with it.
#[derive(Clone, Default)]
struct SharedStorage(Rc<MemoryStorage>);

impl TokenStorage for SharedStorage {
    fn read(&self) -> Option<String> {
        self.0.read()
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        self.0.write(value)
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.0.remove()
    }
}

/// What the backend does to storage while a check is in flight. `Replace`
/// and `Remove` fire on the first check only; `Churn` fires on every check.
enum DuringCheck {
    Nothing,
    Replace(SharedStorage, &'static str),
    Remove(SharedStorage),
    Churn(SharedStorage),
}

struct FakeBackend {
    info: Result<AuthInfo, ApiError>,
    verdict: Result<UserProfile, AuthError>,
    /// Verdicts for specific tokens, consulted before `verdict`.
    per_token: Vec<(&'static str, Result<UserProfile, AuthError>)>,
    during_check: DuringCheck,
    checked: RefCell<Vec<String>>,
}

impl FakeBackend {
    fn accepting() -> Self {
        Self {
            info: Ok(AuthInfo::default()),
            verdict: Ok(alice()),
            per_token: Vec::new(),
            during_check: DuringCheck::Nothing,
            checked: RefCell::new(Vec::new()),
        }
    }

    fn rejecting(err: AuthError) -> Self {
        Self {
            verdict: Err(err),
            ..Self::accepting()
        }
    }
}

impl AuthBackend for FakeBackend {
    async fn fetch_info(&self) -> Result<AuthInfo, ApiError> {
        self.info.clone()
    }

    async fn check_token(&self, token: &Token) -> Result<UserProfile, AuthError> {
        let calls = {
            let mut checked = self.checked.borrow_mut();
            checked.push(token.as_str().to_owned());
            checked.len()
        };
        match &self.during_check {
            DuringCheck::Replace(storage, value) if calls == 1 => storage.write(value).unwrap(),
            DuringCheck::Remove(storage) if calls == 1 => storage.remove().unwrap(),
            DuringCheck::Churn(storage) => storage.write(&format!("churn-{calls}")).unwrap(),
            _ => {}
        }
        self.per_token
            .iter()
            .find(|(value, _)| *value == token.as_str())
            .map_or_else(|| self.verdict.clone(), |(_, verdict)| verdict.clone())
    }
}

fn alice() -> UserProfile {
    UserProfile {
        id: "u-1".into(),
        name: "Alice".into(),
        picture: "https://img.example.com/alice.png".into(),
        provider: "google".into(),
    }
}

fn unauthorized() -> AuthError {
    AuthError::rejected(401, r#"{"error":"invalid token"}"#)
}

fn store_with(
    token: Option<&str>,
    backend: FakeBackend,
) -> SessionStore<MemoryStorage, FakeBackend> {
    let storage = token.map_or_else(MemoryStorage::new, MemoryStorage::with_value);
    SessionStore::new(storage, backend)
}

fn info_with(providers: &[&str]) -> AuthInfo {
    AuthInfo {
        providers: providers.iter().map(|p| (*p).to_owned()).collect(),
        ..AuthInfo::default()
    }
}

// =============================================================================
// TOKEN SLOT
// =============================================================================

#[test]
fn get_token_absent_is_none() {
    let store = store_with(None, FakeBackend::accepting());
    assert_eq!(store.get_token(), None);
}

#[test]
fn empty_stored_value_counts_as_absent() {
    let store = store_with(Some(""), FakeBackend::accepting());
    assert_eq!(store.get_token(), None);
}

#[test]
fn set_then_get_returns_token() {
    let store = store_with(None, FakeBackend::accepting());
    store.set_token(&Token::from("abc")).unwrap();
    assert_eq!(store.get_token(), Some(Token::from("abc")));
}

#[test]
fn set_replaces_previous_token() {
    let store = store_with(Some("old"), FakeBackend::accepting());
    store.set_token(&Token::from("new")).unwrap();
    assert_eq!(store.get_token(), Some(Token::from("new")));
}

#[test]
fn read_after_clear_is_none() {
    let store = store_with(Some("abc"), FakeBackend::accepting());
    store.clear_token().unwrap();
    assert_eq!(store.get_token(), None);
}

#[test]
fn clear_without_token_succeeds() {
    let store = store_with(None, FakeBackend::accepting());
    assert!(store.clear_token().is_ok());
    assert!(store.logout().is_ok());
}

#[test]
fn sink_delivery_persists_token() {
    let store = store_with(None, FakeBackend::accepting());
    store.accept_token(Token::from("from-popup")).unwrap();
    assert_eq!(store.get_token(), Some(Token::from("from-popup")));
}

// =============================================================================
// CHECK
// =============================================================================

#[tokio::test]
async fn check_without_token_skips_backend() {
    let store = store_with(None, FakeBackend::accepting());

    assert_eq!(store.check().await, CheckOutcome::NoToken);
    assert!(store.backend().checked.borrow().is_empty());
}

#[tokio::test]
async fn check_valid_token_authenticates() {
    let store = store_with(Some("good"), FakeBackend::accepting());

    let outcome = store.check().await;

    assert_eq!(outcome, CheckOutcome::Authenticated(alice()));
    assert_eq!(outcome.state(), AuthState::Authenticated(alice()));
    assert_eq!(*store.backend().checked.borrow(), vec!["good".to_owned()]);
    assert_eq!(store.get_token(), Some(Token::from("good")));
}

#[tokio::test]
async fn rejected_token_is_cleared() {
    let store = store_with(Some("stale"), FakeBackend::rejecting(unauthorized()));

    let outcome = store.check().await;

    assert_eq!(outcome, CheckOutcome::Rejected(unauthorized()));
    assert_eq!(outcome.state(), AuthState::Unauthenticated);
    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn network_failure_also_clears_token() {
    let store = store_with(
        Some("maybe"),
        FakeBackend::rejecting(AuthError::Network("offline".into())),
    );

    let outcome = store.check().await;

    assert!(matches!(outcome, CheckOutcome::Rejected(AuthError::Network(_))));
    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn decode_failure_clears_token() {
    let store = store_with(
        Some("tok"),
        FakeBackend::rejecting(AuthError::Decode("expected value".into())),
    );

    store.check().await;

    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn newer_token_survives_failed_validation_of_older() {
    let shared = SharedStorage::default();
    shared.write("old").unwrap();
    let mut backend = FakeBackend::accepting();
    backend.per_token.push(("old", Err(unauthorized())));
    backend.during_check = DuringCheck::Replace(shared.clone(), "new");
    let store = SessionStore::new(shared, backend);

    let outcome = store.check().await;

    assert_eq!(outcome, CheckOutcome::Authenticated(alice()));
    assert_eq!(store.get_token(), Some(Token::from("new")));
    assert_eq!(*store.backend().checked.borrow(), vec!["old".to_owned(), "new".to_owned()]);
}

#[tokio::test]
async fn replaced_token_during_successful_check() {
    let shared = SharedStorage::default();
    shared.write("old").unwrap();
    let mut backend = FakeBackend::accepting();
    backend.per_token.push(("new", Err(unauthorized())));
    backend.during_check = DuringCheck::Replace(shared.clone(), "new");
    let store = SessionStore::new(shared, backend);

    let outcome = store.check().await;

    assert_eq!(outcome, CheckOutcome::Rejected(unauthorized()));
    assert_eq!(store.get_token(), None);
    assert_eq!(*store.backend().checked.borrow(), vec!["old".to_owned(), "new".to_owned()]);
}

#[tokio::test]
async fn replaced_token_is_validated_before_authenticating() {
    let shared = SharedStorage::default();
    shared.write("old").unwrap();
    let mut backend = FakeBackend::accepting();
    backend.during_check = DuringCheck::Replace(shared.clone(), "new");
    let store = SessionStore::new(shared, backend);

    assert_eq!(store.check().await, CheckOutcome::Authenticated(alice()));
    assert_eq!(store.backend().checked.borrow().last().map(String::as_str), Some("new"));
}

#[tokio::test]
async fn churning_storage_never_authenticates() {
    let shared = SharedStorage::default();
    shared.write("first").unwrap();
    let mut backend = FakeBackend::accepting();
    backend.during_check = DuringCheck::Churn(shared.clone());
    let store = SessionStore::new(shared, backend);

    assert_eq!(store.check().await, CheckOutcome::NoToken);
    assert_eq!(store.backend().checked.borrow().len(), MAX_CHECK_ROUNDS);
}

#[tokio::test]
async fn logout_during_validation_wins() {
    let shared = SharedStorage::default();
    shared.write("tok").unwrap();
    let mut backend = FakeBackend::accepting();
    backend.during_check = DuringCheck::Remove(shared.clone());
    let store = SessionStore::new(shared, backend);

    assert_eq!(store.check().await, CheckOutcome::NoToken);
    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn validate_leaves_storage_alone() {
    let store = store_with(Some("kept"), FakeBackend::rejecting(unauthorized()));

    let result = store.validate(&Token::from("other")).await;

    assert!(result.is_err());
    assert_eq!(store.get_token(), Some(Token::from("kept")));
}

// =============================================================================
// GUARD
// =============================================================================

#[test]
fn guard_clears_token_on_unauthorized() {
    let store = store_with(Some("tok"), FakeBackend::accepting());

    let result: Result<(), ApiError> = store.guard(Err(ApiError::Unauthorized));

    assert_eq!(result, Err(ApiError::Unauthorized));
    assert_eq!(store.get_token(), None);
}

#[test]
fn guard_keeps_token_on_other_failures() {
    let store = store_with(Some("tok"), FakeBackend::accepting());
    let failure = ApiError::Status {
        status: 500,
        message: "boom".into(),
    };

    let result: Result<(), ApiError> = store.guard(Err(failure.clone()));

    assert_eq!(result, Err(failure));
    assert_eq!(store.get_token(), Some(Token::from("tok")));
}

#[test]
fn guard_passes_success_through() {
    let store = store_with(Some("tok"), FakeBackend::accepting());
    assert_eq!(store.guard(Ok(7)), Ok(7));
    assert_eq!(store.get_token(), Some(Token::from("tok")));
}

// =============================================================================
// PROXY
// =============================================================================

#[test]
fn proxy_mode_writes_placeholder() {
    let store = store_with(None, FakeBackend::accepting());

    assert!(store.ensure_proxy_token(&info_with(&["proxy"])).unwrap());
    assert_eq!(store.get_token(), Some(Token::from(PROXY_PLACEHOLDER_TOKEN)));
}

#[test]
fn proxy_mode_keeps_existing_token() {
    let store = store_with(Some("real"), FakeBackend::accepting());

    assert!(!store.ensure_proxy_token(&info_with(&["proxy"])).unwrap());
    assert_eq!(store.get_token(), Some(Token::from("real")));
}

#[test]
fn non_proxy_mode_writes_nothing() {
    let store = store_with(None, FakeBackend::accepting());

    assert!(!store.ensure_proxy_token(&info_with(&["google", "github"])).unwrap());
    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn proxy_placeholder_is_validated_like_any_token() {
    let store = store_with(None, FakeBackend::accepting());
    let info = store.backend().fetch_info().await.unwrap();
    assert!(!info.uses_proxy());

    store.ensure_proxy_token(&info_with(&["proxy"])).unwrap();
    let outcome = store.check().await;

    assert!(matches!(outcome, CheckOutcome::Authenticated(_)));
    assert_eq!(
        *store.backend().checked.borrow(),
        vec![PROXY_PLACEHOLDER_TOKEN.to_owned()]
    );
}
