pub mod errors;
pub mod feedback;
pub mod models;
pub mod screens;
pub mod session;
pub mod transport;

use std::sync::Arc;

use feedback::{ConfirmPrompt, Notifier};
use screens::dashboard::DashboardScreen;
use screens::profile::ProfileScreen;
use screens::resource::{ExpenseScreen, IncomeScreen};
use screens::settings::SettingsScreen;
use session::context::SessionContext;
use session::provider::{SessionHandle, SessionProvider};
use transport::traits::ApiTransport;

/// Main entry point: the budget-tracking client minus its rendering.
///
/// Construction wires every screen to one shared transport and one
/// feedback pair (notifier + confirm prompt). Control flow matches the
/// real client: [`mount`](BudgetApp::mount) resolves the session first;
/// the shell then drives each screen independently and may assume the
/// session state is settled. There is no shared cache between screens —
/// each keeps its own server snapshot and re-fetches after its own
/// mutations.
#[must_use]
pub struct BudgetApp {
    provider: SessionProvider,
    pub dashboard: DashboardScreen,
    pub incomes: IncomeScreen,
    pub expenses: ExpenseScreen,
    pub profile: ProfileScreen,
    pub settings: SettingsScreen,
}

impl BudgetApp {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        let provider = SessionProvider::new(Arc::clone(&transport), Arc::clone(&notifier));
        let dashboard = DashboardScreen::new(Arc::clone(&transport), Arc::clone(&notifier));
        let incomes = IncomeScreen::new(
            Arc::clone(&transport),
            Arc::clone(&notifier),
            Arc::clone(&confirm),
        );
        let expenses = ExpenseScreen::new(
            Arc::clone(&transport),
            Arc::clone(&notifier),
            Arc::clone(&confirm),
        );
        let profile = ProfileScreen::new(
            Arc::clone(&transport),
            Arc::clone(&notifier),
            provider.handle(),
        );
        let settings = SettingsScreen::new(transport, notifier, confirm, provider.handle());

        Self {
            provider,
            dashboard,
            incomes,
            expenses,
            profile,
            settings,
        }
    }

    /// Resolve the session exactly once (the "who am I" check). Success
    /// or failure, the session leaves its loading state and never
    /// re-checks on its own.
    pub async fn mount(&self) {
        self.provider.context().initialize().await;
    }

    /// The shared session context.
    #[must_use]
    pub fn session(&self) -> Arc<SessionContext> {
        self.provider.context()
    }

    /// A handle for consumers outside this struct, e.g. a navigation
    /// shell rendering the signed-in menu.
    #[must_use]
    pub fn session_handle(&self) -> SessionHandle {
        self.provider.handle()
    }
}
