use std::sync::{Arc, Weak};

use super::context::SessionContext;
use crate::errors::ClientError;
use crate::feedback::Notifier;
use crate::transport::traits::ApiTransport;

const SCOPE_ERROR: &str = "session handle used after its SessionProvider was dropped";

/// Owns the session context for the lifetime of the application mount.
///
/// Screens and the navigation shell hold [`SessionHandle`]s instead of
/// the context itself. Once the provider is dropped every handle is
/// dead, which turns "context read outside its provider" into a
/// detectable usage error instead of a silently stale session.
pub struct SessionProvider {
    context: Arc<SessionContext>,
}

impl SessionProvider {
    pub fn new(transport: Arc<dyn ApiTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            context: Arc::new(SessionContext::new(transport, notifier)),
        }
    }

    /// Direct access for the owner (the application facade).
    pub fn context(&self) -> Arc<SessionContext> {
        Arc::clone(&self.context)
    }

    /// A consumer-facing handle, valid only while this provider lives.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            context: Arc::downgrade(&self.context),
        }
    }
}

/// A consumer's reference to the session context.
#[derive(Clone)]
pub struct SessionHandle {
    context: Weak<SessionContext>,
}

impl SessionHandle {
    /// The live session context.
    ///
    /// # Panics
    ///
    /// Panics if the provider has been dropped. That is a programming
    /// error in the caller, and the one condition allowed to halt
    /// instead of degrading to a notification.
    pub fn context(&self) -> Arc<SessionContext> {
        match self.context.upgrade() {
            Some(context) => context,
            None => panic!("{SCOPE_ERROR}"),
        }
    }

    /// Non-panicking variant for callers that prefer an error value.
    pub fn try_context(&self) -> Result<Arc<SessionContext>, ClientError> {
        self.context
            .upgrade()
            .ok_or(ClientError::SessionScope(SCOPE_ERROR))
    }
}
