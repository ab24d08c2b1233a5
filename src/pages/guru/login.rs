//! Guru99 login page

use tracing::info;

use crate::page::{Locator, PageActions};
use crate::Result;

const TXT_EMAIL_ID: Locator = Locator::name("emailid");
const BTN_SUBMIT: Locator = Locator::name("btnLogin");
const LBL_EMAIL_MESSAGE: Locator = Locator::xpath("//td[input[@name='emailid']]/label");

/// Login page of the Guru99 demo bank
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

    pub async fn enter_email_id(&self, email: &str) -> Result<()> {
        info!(email, "Entering email ID");
        self.actions.type_text(&TXT_EMAIL_ID, email).await
    }

    pub async fn submit_email_id(&self) -> Result<()> {
        info!("Login Page: Submitting email ID");
        self.actions.click(&BTN_SUBMIT).await
    }

    pub async fn verify_login_error_message(&self, expected: &str) -> Result<()> {
        info!(expected, "Login Page: Verifying login error message");
        let actual = self.actions.read_text(&LBL_EMAIL_MESSAGE).await?;
        self.actions.verify_true(
            actual == expected,
            &format!(
                "Expected login error message: '{}', but found: '{}'",
                expected, actual
            ),
        )
    }
}
