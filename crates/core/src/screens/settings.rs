use serde_json::json;
use std::sync::Arc;

use crate::feedback::{ConfirmPrompt, Notifier};
use crate::models::currency::Currency;
use crate::models::user::User;
use crate::session::provider::SessionHandle;
use crate::transport::traits::ApiTransport;

/// The settings screen: display currency, CSV export, account deletion.
pub struct SettingsScreen {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn ConfirmPrompt>,
    session: SessionHandle,
}

impl SettingsScreen {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn ConfirmPrompt>,
        session: SessionHandle,
    ) -> Self {
        Self {
            transport,
            notifier,
            confirm,
            session,
        }
    }

    /// Persist a new display currency and adopt the server's updated
    /// user, so every screen formats with the new symbol immediately.
    pub async fn change_currency(&mut self, currency: Currency) -> bool {
        let body = json!({ "currency": currency.code() });
        match self.transport.put_json("/user/currency", &body).await {
            Ok(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    self.session.context().update_user(user);
                    self.notifier.success("Currency updated successfully");
                    true
                }
                Err(e) => {
                    log::warn!("currency response was not a user payload: {e}");
                    self.notifier.error("Failed to update currency");
                    false
                }
            },
            Err(e) => {
                log::error!("currency update failed: {e}");
                self.notifier.error("Failed to update currency");
                false
            }
        }
    }

    /// Download all transactions as CSV. The bytes are handed back to
    /// the shell, which owns writing them wherever downloads go.
    pub async fn export_csv(&mut self) -> Option<Vec<u8>> {
        match self.transport.get_bytes("/user/export").await {
            Ok(bytes) => {
                self.notifier.success("Data exported successfully");
                Some(bytes)
            }
            Err(e) => {
                log::error!("export failed: {e}");
                self.notifier.error("Failed to export data");
                None
            }
        }
    }

    /// Guarded, irreversible account deletion. On success the normal
    /// logout flow runs afterwards, which always clears local session
    /// state whatever the logout request itself does.
    pub async fn delete_account(&mut self) -> bool {
        if !self
            .confirm
            .confirm("Are you sure you want to delete your account?")
        {
            return false;
        }

        match self.transport.delete("/user/account").await {
            Ok(()) => {
                self.notifier.success("Account deleted successfully");
                self.session.context().logout().await;
                true
            }
            Err(e) => {
                log::error!("account deletion failed: {e}");
                self.notifier.error("Failed to delete account");
                false
            }
        }
    }
}
