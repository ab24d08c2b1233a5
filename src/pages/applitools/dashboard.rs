//! Applitools demo dashboard page

use tracing::info;

use crate::page::{Locator, PageActions};
use crate::Result;

const ICO_USER: Locator = Locator::xpath("//div[@class='logged-user-w avatar-inline']");

/// Dashboard shown after a successful login
pub struct DashboardPage {
    actions: PageActions,
}

impl DashboardPage {
    pub fn new(actions: PageActions) -> Self {
        Self { actions }
    }

    pub async fn verify_dashboard_loaded(&self) -> Result<()> {
        info!("Verifying that the Dashboard page is loaded");
        self.actions
            .verify_visible(&ICO_USER, "User icon is not visible on the Dashboard page")
            .await
    }
}
