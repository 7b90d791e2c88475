// ═══════════════════════════════════════════════════════════════════
// Session Tests — SessionContext state machine, SessionProvider/Handle
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use budget_client_core::errors::ClientError;
use budget_client_core::feedback::Notifier;
use budget_client_core::models::currency::Currency;
use budget_client_core::session::context::SessionContext;
use budget_client_core::session::provider::SessionProvider;
use budget_client_core::transport::traits::{ApiTransport, FileUpload};

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — scripted transport and recording notifier
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: &'static str,
    path: String,
    body: Option<Value>,
}

/// Scripted reply for one endpoint.
#[derive(Clone)]
enum Reply {
    Ok(Value),
    Api(u16, Vec<(&'static str, &'static str)>),
    Network,
}

impl Reply {
    fn to_result(&self) -> Result<Value, ClientError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Api(status, fields) => Err(ClientError::Api {
                status: *status,
                fields: fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }),
            Reply::Network => Err(ClientError::Network("connection refused".into())),
        }
    }
}

/// Transport mock: replies are scripted per "METHOD path" key and every
/// call is recorded. Queued replies pop in order; the last one sticks.
/// An unscripted request fails as a network error, so missing scripts
/// surface instead of passing silently.
#[derive(Default)]
struct MockTransport {
    replies: Mutex<HashMap<String, Vec<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn script(&self, method: &str, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(format!("{method} {path}"))
            .or_default()
            .push(reply);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, method: &str, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn take(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&format!("{method} {path}")) {
            Some(queue) if !queue.is_empty() => {
                let reply = if queue.len() > 1 {
                    queue.remove(0)
                } else {
                    queue[0].clone()
                };
                reply.to_result()
            }
            _ => Err(ClientError::Network(format!(
                "unscripted request: {method} {path}"
            ))),
        }
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get_json(
        &self,
        path: &str,
        _query: &[(String, String)],
    ) -> Result<Value, ClientError> {
        self.take("GET", path, None)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.take("POST", path, Some(body.clone()))
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.take("PUT", path, Some(body.clone()))
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.take("DELETE", path, None).map(|_| ())
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        self.take("GETB", path, None).map(|v| match v {
            Value::String(s) => s.into_bytes(),
            _ => Vec::new(),
        })
    }

    async fn post_file(
        &self,
        path: &str,
        field: &str,
        upload: FileUpload,
    ) -> Result<Value, ClientError> {
        let body = json!({
            "field": field,
            "fileName": upload.file_name,
            "contentType": upload.content_type,
            "size": upload.size(),
        });
        self.take("POSTFILE", path, Some(body))
    }
}

/// Notifier that records every toast instead of showing it.
#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<(bool, String)>>,
}

impl RecordingNotifier {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn successes(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(ok, _)| *ok)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn errors(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(ok, _)| !*ok)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.messages.lock().unwrap().push((true, message.into()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push((false, message.into()));
    }
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "name": "Ada",
        "email": "ada@example.com",
        "currency": "USD",
        "profilePhoto": null
    })
}

fn make_context() -> (Arc<MockTransport>, Arc<RecordingNotifier>, SessionContext) {
    let transport = MockTransport::new();
    let notifier = RecordingNotifier::new();
    let context = SessionContext::new(transport.clone(), notifier.clone());
    (transport, notifier, context)
}

// ═══════════════════════════════════════════════════════════════════
// Initial state & mount check
// ═══════════════════════════════════════════════════════════════════

mod mount {
    use super::*;

    #[test]
    fn starts_loading_and_signed_out() {
        let (_, _, context) = make_context();
        assert!(context.is_loading());
        assert!(context.user().is_none());
        assert!(!context.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_success_resolves_to_user() {
        let (transport, _, context) = make_context();
        transport.script("GET", "/user/profile", Reply::Ok(user_json()));

        context.initialize().await;

        assert!(!context.is_loading());
        let user = context.user().unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.currency, Currency::Usd);
    }

    #[tokio::test]
    async fn initialize_unauthenticated_resolves_signed_out() {
        let (transport, _, context) = make_context();
        transport.script(
            "GET",
            "/user/profile",
            Reply::Api(401, vec![("error", "Unauthorized")]),
        );

        context.initialize().await;

        assert!(!context.is_loading());
        assert!(context.user().is_none());
    }

    #[tokio::test]
    async fn initialize_network_failure_resolves_signed_out() {
        let (transport, _, context) = make_context();
        transport.script("GET", "/user/profile", Reply::Network);

        context.initialize().await;

        assert!(!context.is_loading());
        assert!(context.user().is_none());
    }

    #[tokio::test]
    async fn initialize_never_retries_on_its_own() {
        let (transport, _, context) = make_context();
        transport.script("GET", "/user/profile", Reply::Network);

        context.initialize().await;

        assert_eq!(transport.calls_to("GET", "/user/profile"), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Login
// ═══════════════════════════════════════════════════════════════════

mod login {
    use super::*;

    #[tokio::test]
    async fn success_sets_user_and_reports_true() {
        let (transport, notifier, context) = make_context();
        transport.script("POST", "/auth/login", Reply::Ok(user_json()));

        let ok = context.login("ada@example.com", "hunter22").await;

        assert!(ok);
        assert_eq!(context.user().unwrap().email, "ada@example.com");
        assert_eq!(notifier.successes(), vec!["Login successful!"]);
    }

    #[tokio::test]
    async fn sends_credentials_in_body() {
        let (transport, _, context) = make_context();
        transport.script("POST", "/auth/login", Reply::Ok(user_json()));

        context.login("ada@example.com", "hunter22").await;

        let calls = transport.calls();
        let body = calls[0].body.as_ref().unwrap();
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["password"], "hunter22");
    }

    #[tokio::test]
    async fn server_error_message_surfaces() {
        let (transport, notifier, context) = make_context();
        transport.script(
            "POST",
            "/auth/login",
            Reply::Api(401, vec![("error", "Invalid credentials")]),
        );

        let ok = context.login("ada@example.com", "wrong").await;

        assert!(!ok);
        assert!(context.user().is_none());
        assert_eq!(notifier.errors(), vec!["Invalid credentials"]);
    }

    #[tokio::test]
    async fn missing_server_message_uses_default() {
        let (transport, notifier, context) = make_context();
        transport.script("POST", "/auth/login", Reply::Network);

        assert!(!context.login("a@b.c", "pw").await);
        assert_eq!(notifier.errors(), vec!["Login failed"]);
    }

    #[tokio::test]
    async fn failed_login_leaves_existing_user_untouched() {
        // A re-login attempt that fails must not sign the user out.
        let (transport, _, context) = make_context();
        context.update_user(serde_json::from_value(user_json()).unwrap());
        transport.script(
            "POST",
            "/auth/login",
            Reply::Api(401, vec![("error", "Invalid credentials")]),
        );

        assert!(!context.login("ada@example.com", "typo").await);
        assert!(context.user().is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Register
// ═══════════════════════════════════════════════════════════════════

mod register {
    use super::*;

    #[tokio::test]
    async fn success_is_auto_login() {
        let (transport, notifier, context) = make_context();
        transport.script("POST", "/auth/register", Reply::Ok(user_json()));

        let ok = context
            .register("Ada", "ada@example.com", "hunter22", "hunter22")
            .await;

        assert!(ok);
        assert!(context.is_authenticated());
        assert_eq!(notifier.successes(), vec!["Registration successful!"]);
    }

    #[tokio::test]
    async fn sends_all_four_fields() {
        let (transport, _, context) = make_context();
        transport.script("POST", "/auth/register", Reply::Ok(user_json()));

        context
            .register("Ada", "ada@example.com", "hunter22", "hunter22")
            .await;

        let calls = transport.calls();
        let body = calls[0].body.as_ref().unwrap();
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["password"], "hunter22");
        assert_eq!(body["confirmPassword"], "hunter22");
    }

    #[tokio::test]
    async fn error_field_wins_over_field_errors() {
        let (transport, notifier, context) = make_context();
        transport.script(
            "POST",
            "/auth/register",
            Reply::Api(
                400,
                vec![("error", "Email already registered"), ("password", "Too short")],
            ),
        );

        assert!(!context.register("A", "a@b.c", "x", "x").await);
        assert_eq!(notifier.errors(), vec!["Email already registered"]);
    }

    #[tokio::test]
    async fn password_error_when_no_general_error() {
        let (transport, notifier, context) = make_context();
        transport.script(
            "POST",
            "/auth/register",
            Reply::Api(400, vec![("password", "Password must be 6+ characters")]),
        );

        assert!(!context.register("A", "a@b.c", "x", "x").await);
        assert_eq!(notifier.errors(), vec!["Password must be 6+ characters"]);
    }

    #[tokio::test]
    async fn email_error_as_last_field_fallback() {
        let (transport, notifier, context) = make_context();
        transport.script(
            "POST",
            "/auth/register",
            Reply::Api(400, vec![("email", "Invalid email address")]),
        );

        assert!(!context.register("A", "not-an-email", "x", "x").await);
        assert_eq!(notifier.errors(), vec!["Invalid email address"]);
    }

    #[tokio::test]
    async fn default_message_when_no_fields() {
        let (transport, notifier, context) = make_context();
        transport.script("POST", "/auth/register", Reply::Network);

        assert!(!context.register("A", "a@b.c", "x", "x").await);
        assert_eq!(notifier.errors(), vec!["Registration failed"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Logout & update_user
// ═══════════════════════════════════════════════════════════════════

mod logout {
    use super::*;

    #[tokio::test]
    async fn clears_user_on_success() {
        let (transport, notifier, context) = make_context();
        transport.script("POST", "/auth/login", Reply::Ok(user_json()));
        transport.script("POST", "/auth/logout", Reply::Ok(Value::Null));

        context.login("ada@example.com", "pw").await;
        context.logout().await;

        assert!(context.user().is_none());
        assert!(notifier
            .successes()
            .contains(&"Logged out successfully".to_string()));
    }

    #[tokio::test]
    async fn clears_user_even_when_server_call_fails() {
        let (transport, notifier, context) = make_context();
        transport.script("POST", "/auth/login", Reply::Ok(user_json()));
        transport.script("POST", "/auth/logout", Reply::Network);

        context.login("ada@example.com", "pw").await;
        context.logout().await;

        assert!(context.user().is_none());
        assert!(notifier.errors().contains(&"Logout failed".to_string()));
    }

    #[tokio::test]
    async fn logout_while_signed_out_is_harmless() {
        let (transport, _, context) = make_context();
        transport.script("POST", "/auth/logout", Reply::Ok(Value::Null));

        context.logout().await;
        assert!(context.user().is_none());
    }
}

mod update_user {
    use super::*;

    #[tokio::test]
    async fn replaces_snapshot_without_network() {
        let (transport, _, context) = make_context();

        let user = serde_json::from_value(user_json()).unwrap();
        context.update_user(user);

        assert!(context.is_authenticated());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn replacement_is_wholesale() {
        let (_, _, context) = make_context();
        context.update_user(serde_json::from_value(user_json()).unwrap());

        let mut updated: budget_client_core::models::user::User =
            serde_json::from_value(user_json()).unwrap();
        updated.currency = Currency::Eur;
        updated.name = "Ada King".into();
        context.update_user(updated);

        let user = context.user().unwrap();
        assert_eq!(user.currency, Currency::Eur);
        assert_eq!(user.name, "Ada King");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Provider / Handle lifetime
// ═══════════════════════════════════════════════════════════════════

mod provider {
    use super::*;

    #[tokio::test]
    async fn handle_reaches_the_same_context() {
        let transport = MockTransport::new();
        let notifier = RecordingNotifier::new();
        let provider = SessionProvider::new(transport.clone(), notifier);

        provider
            .context()
            .update_user(serde_json::from_value(user_json()).unwrap());

        let handle = provider.handle();
        assert!(handle.context().is_authenticated());
        assert!(handle.try_context().is_ok());
    }

    #[test]
    fn cloned_handles_stay_valid_while_provider_lives() {
        let provider =
            SessionProvider::new(MockTransport::new(), RecordingNotifier::new());
        let handle = provider.handle();
        let clone = handle.clone();
        assert!(clone.try_context().is_ok());
    }

    #[test]
    fn try_context_fails_after_provider_drop() {
        let provider =
            SessionProvider::new(MockTransport::new(), RecordingNotifier::new());
        let handle = provider.handle();
        drop(provider);

        match handle.try_context() {
            Err(ClientError::SessionScope(_)) => {}
            other => panic!("Expected SessionScope error, got {:?}", other.err()),
        }
    }

    #[test]
    #[should_panic(expected = "SessionProvider was dropped")]
    fn context_panics_after_provider_drop() {
        let provider =
            SessionProvider::new(MockTransport::new(), RecordingNotifier::new());
        let handle = provider.handle();
        drop(provider);
        let _ = handle.context();
    }
}
