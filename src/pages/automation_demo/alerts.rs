//! Automation Testing alerts, windows, and file transfer page

use std::time::Duration;
use tracing::{info, warn};

use crate::page::{Locator, PageActions};
use crate::pages::AUTOMATION_DEMO_ALERTS_URL;
use crate::Result;

const BTN_ALERT_WITH_OK: Locator = Locator::id("OKTab");
const BTN_ALERT_WITH_OK_CANCEL: Locator = Locator::id("CancelTab");
const TXT_MESSAGE_CANCEL_TAB: Locator = Locator::xpath("//div[@id='CancelTab']/p");
const TAB_ALERT_WITH_OK_CANCEL: Locator = Locator::xpath("//a[@href='#CancelTab']");
const TAB_ALERT_WITH_TEXTBOX: Locator = Locator::xpath("//a[@href='#Textbox']");
const BTN_NEW_TAB_WINDOW: Locator = Locator::xpath("//div[@id='Tabbed']/a");
const TXT_BROWSE_FILE: Locator = Locator::id("input-4");
const IMG_UPLOADED_FILE: Locator = Locator::xpath("(//div[@class='kv-file-content']//img)[1]");
const TXT_ENTER_TEXT_FOR_DOWNLOAD: Locator = Locator::id("textbox");
const BTN_GENERATE_FILE: Locator = Locator::id("createTxt");
const BTN_DOWNLOAD_FILE: Locator = Locator::id("link-to-download");

/// Alerts page, also hosting the window, upload, and download demos
pub struct AlertPage {
    actions: PageActions,
}

impl AlertPage {
    /// Navigate to the alerts page
    pub async fn open(actions: PageActions) -> Result<Self> {
        actions.open(AUTOMATION_DEMO_ALERTS_URL).await?;
        Ok(Self { actions })
    }

    /// The façade, for flows that span other pages of the site
    pub fn actions(&self) -> &PageActions {
        &self.actions
    }

    pub async fn accept_alert(&self) -> Result<()> {
        self.actions.accept_alert().await
    }

    pub async fn dismiss_alert(&self) -> Result<()> {
        self.actions.dismiss_alert().await
    }

    pub async fn click_alert_with_ok_button(&self) -> Result<()> {
        info!("Clicking 'Alert with OK' button");
        self.actions.click(&BTN_ALERT_WITH_OK).await
    }

    pub async fn click_alert_with_ok_cancel_button(&self) -> Result<()> {
        info!("Clicking 'Alert with OK & Cancel' button");
        self.actions.click(&BTN_ALERT_WITH_OK_CANCEL).await
    }

    pub async fn verify_alert_dismissed_message(&self, expected: &str) -> Result<()> {
        info!(expected, "Verifying alert dismissed message");
        let actual = self.actions.read_text(&TXT_MESSAGE_CANCEL_TAB).await?;
        self.actions.verify_eq(
            expected,
            actual.as_str(),
            &format!("The message '{}' displays instead of '{}'", actual, expected),
        )
    }

    pub async fn select_alert_tab(&self, tab_name: &str) -> Result<()> {
        info!(tab_name, "Selecting alert tab");
        match tab_name {
            "Alert with OK & Cancel" => self.actions.click(&TAB_ALERT_WITH_OK_CANCEL).await,
            "Alert with Textbox" => self.actions.click(&TAB_ALERT_WITH_TEXTBOX).await,
            other => {
                warn!(tab = other, "Unknown alert tab");
                Ok(())
            }
        }
    }

    /// Open the new-tab demo window and switch to it
    pub async fn click_new_tab_window_button(&self) -> Result<()> {
        info!("Clicking 'New Tab / Window' button");
        self.actions.click(&BTN_NEW_TAB_WINDOW).await?;
        self.actions.switch_to_new_window().await
    }

    pub async fn switch_back_to_original_window(&self) -> Result<()> {
        self.actions.switch_back_to_original().await
    }

    pub async fn verify_title(&self, expected: &str) -> Result<()> {
        self.actions.verify_title(expected).await
    }

    /// Upload through the hidden file input; visibility checks do not apply
    pub async fn upload_file(&self, file_path: &str) -> Result<()> {
        info!(file_path, "Uploading file");
        self.actions.type_text_no_wait(&TXT_BROWSE_FILE, file_path).await
    }

    pub async fn verify_file_uploaded(&self, expected_file_name: &str) -> Result<()> {
        info!(expected_file_name, "Verifying file uploaded");
        let actual = self
            .actions
            .read_attribute(&IMG_UPLOADED_FILE, "title")
            .await?
            .unwrap_or_default();
        self.actions.verify_eq(
            expected_file_name,
            actual.as_str(),
            &format!(
                "The uploaded file '{}' does not match expected '{}'",
                actual, expected_file_name
            ),
        )
    }

    pub async fn enter_text_for_download(&self, text: &str) -> Result<()> {
        info!("Entering text for download");
        self.actions.type_text(&TXT_ENTER_TEXT_FOR_DOWNLOAD, text).await
    }

    pub async fn click_generate_file_button(&self) -> Result<()> {
        info!("Clicking 'Generate File' button");
        self.actions.click(&BTN_GENERATE_FILE).await
    }

    pub async fn click_download_button(&self) -> Result<()> {
        info!("Clicking 'Download' button");
        self.actions.click(&BTN_DOWNLOAD_FILE).await
    }

    pub async fn wait_for_file_download(&self, file_name: &str, timeout: Duration) -> Result<()> {
        self.actions.wait_for_file_download(file_name, timeout).await?;
        Ok(())
    }

    pub async fn verify_downloaded_file_content(
        &self,
        file_name: &str,
        expected_content: &str,
    ) -> Result<()> {
        self.actions
            .verify_downloaded_file_contains(file_name, expected_content)
            .await
    }
}
