/// User-visible message channel — the toast system in the real client.
///
/// The core never renders anything; every outcome a person should see
/// is reported here as a success or error message and nowhere else.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Destructive-action guard — the confirm dialog in the real client.
/// Deletes are only issued after this returns `true`.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Notifier that writes to the `log` facade. Used by headless shells and
/// anywhere no toast channel is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("{message}");
    }

    fn error(&self, message: &str) {
        log::warn!("{message}");
    }
}
