//! Per-test setup and teardown
//!
//! One session per test: [`Harness::start_test`] initializes a session for a
//! fresh execution context and logs the run metadata; [`TestContext::finish`]
//! quits it. Teardown never fails: quit errors are logged by the registry and
//! the slot is always released, so a failing test body cannot leak a session.

use std::sync::Arc;
use tracing::{error, info};

use crate::config::Settings;
use crate::page::PageActions;
use crate::session::{ContextId, DriverRegistry, DriverSession, SessionFactory, WebDriverFactory};
use crate::Result;

/// Initialize logging once per process, honoring `RUST_LOG`
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Test entry point: settings plus the session registry
pub struct Harness {
    settings: Arc<Settings>,
    registry: Arc<DriverRegistry>,
}

impl Harness {
    /// Harness driving real WebDriver sessions per the settings
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let factory = Arc::new(WebDriverFactory::new(settings.clone()));
        Self::with_factory(settings, factory)
    }

    /// Harness with an injected session factory (tests pass the mock)
    pub fn with_factory(settings: Arc<Settings>, factory: Arc<dyn SessionFactory>) -> Self {
        init_logging();
        Self {
            settings: settings.clone(),
            registry: Arc::new(DriverRegistry::new(factory)),
        }
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn registry(&self) -> &Arc<DriverRegistry> {
        &self.registry
    }

    /// Set up one test: log the banner and initialize its session
    pub async fn start_test(&self, name: &str) -> Result<TestContext> {
        info!("========================================");
        info!(test = name, "Starting test");
        info!(environment = %self.settings.environment, "Environment");
        info!(browser = %self.settings.browser, "Browser");
        info!("========================================");

        let context = ContextId::new(name);
        let session = match self
            .registry
            .initialize(&context, self.settings.browser)
            .await
        {
            Ok(session) => session,
            Err(e) => {
                error!(test = name, error = %e, "Failed to initialize WebDriver");
                return Err(e);
            }
        };

        Ok(TestContext {
            name: name.to_string(),
            context,
            session,
            settings: self.settings.clone(),
            registry: self.registry.clone(),
        })
    }
}

/// One running test's context: its session, bound to one registry slot
pub struct TestContext {
    name: String,
    context: ContextId,
    session: Arc<dyn DriverSession>,
    settings: Arc<Settings>,
    registry: Arc<DriverRegistry>,
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl TestContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context_id(&self) -> &ContextId {
        &self.context
    }

    pub fn session(&self) -> &Arc<dyn DriverSession> {
        &self.session
    }

    /// A façade over this test's session
    pub fn actions(&self) -> PageActions {
        PageActions::new(self.session.clone(), &self.settings)
    }

    /// Tear down: quit the session and release the slot, then log completion
    pub async fn finish(self) {
        self.registry.quit(&self.context).await;
        info!(test = %self.name, "Test completed");
        info!("========================================");
    }
}
