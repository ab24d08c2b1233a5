//! Applitools demo login page

use tracing::info;

use crate::page::{Locator, PageActions};
use crate::pages::applitools::DashboardPage;
use crate::Result;

const TXT_USERNAME: Locator = Locator::id("username");
const TXT_PASSWORD: Locator = Locator::id("password");
const BTN_SIGN_IN: Locator = Locator::id("log-in");

/// Login page of the Applitools demo app
pub struct LoginPage {
    actions: PageActions,
}

impl LoginPage {
    pub fn new(actions: PageActions) -> Self {
        Self { actions }
    }

    /// Navigate to the site's base URL
    pub async fn open_site(&self) -> Result<()> {
        self.actions.open_base().await
    }

    /// Log in and hand over to the dashboard page
    pub async fn login(&self, email: &str, password: &str) -> Result<DashboardPage> {
        info!(email, "Logging in");
        self.actions.type_text(&TXT_USERNAME, email).await?;
        self.actions.type_text(&TXT_PASSWORD, password).await?;
        self.actions.click(&BTN_SIGN_IN).await?;
        Ok(DashboardPage::new(self.actions.clone()))
    }
}
