//! Guru99 tooltips page

use tracing::info;

use crate::page::{Locator, PageActions};
use crate::pages::GURU99_TOOLTIPS_URL;
use crate::Result;

const BTN_DOWNLOAD_NOW: Locator = Locator::id("download_now");
const IMG_EYES: Locator = Locator::xpath("//img[@src='img/eye.png']");

/// Tooltip demo page
pub struct ToolTipsPage {
    actions: PageActions,
}

impl ToolTipsPage {
    /// Navigate to the tooltips page
    pub async fn open(actions: PageActions) -> Result<Self> {
        actions.open(GURU99_TOOLTIPS_URL).await?;
        Ok(Self { actions })
    }

    pub async fn hover_download_now_button(&self) -> Result<()> {
        info!("Hovering to 'Download now' button");
        self.actions.hover(&BTN_DOWNLOAD_NOW).await
    }

    pub async fn verify_tooltip_displayed(&self) -> Result<()> {
        info!("Verifying tooltip is displayed for 'Download now' button");
        self.actions
            .verify_visible(&IMG_EYES, "Tooltip image is not visible")
            .await
    }
}
