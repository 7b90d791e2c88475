use serde_json::json;
use std::sync::Arc;

use crate::feedback::Notifier;
use crate::models::user::User;
use crate::session::provider::SessionHandle;
use crate::transport::traits::{ApiTransport, FileUpload};

/// Upload types the client accepts before anything reaches the wire.
const ACCEPTED_PHOTO_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
/// Maximum photo size: 2 MiB.
const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;
const MIN_PASSWORD_CHARS: usize = 6;

/// Personal-information draft, seeded from the session user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
}

/// Password-change draft. Cleared only after a successful change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordDraft {
    pub old_password: String,
    pub new_password: String,
}

/// The profile screen: personal info, password change, photo upload.
/// Each successful account mutation pushes the server's updated user
/// back into the session context.
pub struct ProfileScreen {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    session: SessionHandle,
    profile: ProfileDraft,
    password: PasswordDraft,
}

impl ProfileScreen {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
        session: SessionHandle,
    ) -> Self {
        Self {
            transport,
            notifier,
            session,
            profile: ProfileDraft::default(),
            password: PasswordDraft::default(),
        }
    }

    /// Seed the profile draft from the current session user. Run after
    /// the session has resolved.
    pub fn mount(&mut self) {
        if let Some(user) = self.session.context().user() {
            self.profile = ProfileDraft {
                name: user.name,
                email: user.email,
            };
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn profile(&self) -> &ProfileDraft {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut ProfileDraft {
        &mut self.profile
    }

    pub fn password(&self) -> &PasswordDraft {
        &self.password
    }

    pub fn password_mut(&mut self) -> &mut PasswordDraft {
        &mut self.password
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Persist name/email and adopt the server's updated user.
    pub async fn update_profile(&mut self) -> bool {
        let body = json!({
            "name": self.profile.name,
            "email": self.profile.email,
        });
        match self.transport.put_json("/user/profile", &body).await {
            Ok(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    self.session.context().update_user(user);
                    self.notifier.success("Profile updated successfully");
                    true
                }
                Err(e) => {
                    log::warn!("profile response was not a user payload: {e}");
                    self.notifier.error("Failed to update profile");
                    false
                }
            },
            Err(e) => {
                self.notifier.error(&e.message("Failed to update profile"));
                false
            }
        }
    }

    /// Change the account password. Local validation first: both fields
    /// filled, new password at least 6 characters. The draft is cleared
    /// only on success so a failed attempt keeps the input.
    pub async fn change_password(&mut self) -> bool {
        if self.password.old_password.is_empty() || self.password.new_password.is_empty() {
            self.notifier.error("Please fill in all fields");
            return false;
        }
        if self.password.new_password.chars().count() < MIN_PASSWORD_CHARS {
            self.notifier.error("New password must be at least 6 characters");
            return false;
        }

        let body = json!({
            "oldPassword": self.password.old_password,
            "newPassword": self.password.new_password,
        });
        match self.transport.put_json("/user/password", &body).await {
            Ok(_) => {
                self.password = PasswordDraft::default();
                self.notifier.success("Password changed successfully");
                true
            }
            Err(e) => {
                self.notifier.error(&e.message("Failed to change password"));
                false
            }
        }
    }

    /// Upload a profile photo. Rejected locally — with a notification
    /// and no request — unless it is a JPEG/PNG of at most 2 MiB.
    pub async fn upload_photo(&mut self, file: FileUpload) -> bool {
        if !ACCEPTED_PHOTO_TYPES.contains(&file.content_type.as_str()) {
            self.notifier.error("Only JPG and PNG files are allowed");
            return false;
        }
        if file.size() > MAX_PHOTO_BYTES {
            self.notifier.error("File size must be less than 2MB");
            return false;
        }

        match self
            .transport
            .post_file("/user/profile/photo", "file", file)
            .await
        {
            Ok(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    self.session.context().update_user(user);
                    self.notifier.success("Profile photo updated successfully");
                    true
                }
                Err(e) => {
                    log::warn!("photo response was not a user payload: {e}");
                    self.notifier.error("Failed to upload photo");
                    false
                }
            },
            Err(e) => {
                self.notifier.error(&e.message("Failed to upload photo"));
                false
            }
        }
    }
}
