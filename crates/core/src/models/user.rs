use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// The authenticated account, as returned by `/user/profile` and the
/// auth endpoints. The session holds at most one of these at a time and
/// replaces it wholesale — it is never patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Preferred display currency; absent on older accounts → USD.
    #[serde(default)]
    pub currency: Currency,
    /// File name of the uploaded profile photo, if any.
    #[serde(default)]
    pub profile_photo: Option<String>,
}
