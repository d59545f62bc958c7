// BO login page

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::bo::BoBasePage;
use std::sync::Arc;

pub const PAGE_TITLE: &str = "PrestaShop";

pub const EMAIL_INPUT: &str = "#email";
pub const PASSWORD_INPUT: &str = "#passwd";
pub const SUBMIT_LOGIN_BUTTON: &str = "#submit_login";

#[derive(Clone)]
pub struct LoginPage {
    bo: BoBasePage,
}

impl LoginPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            bo: BoBasePage::new(driver),
        }
    }

    pub fn bo(&self) -> &BoBasePage {
        &self.bo
    }

    /// Submits the employee credentials and waits for the next screen.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        tracing::debug!("Logging in to the back office as {}", email);
        let base = self.bo.base();
        base.set_value(EMAIL_INPUT, email).await?;
        base.set_value(PASSWORD_INPUT, password).await?;
        base.driver()
            .click_and_wait_for_navigation(SUBMIT_LOGIN_BUTTON)
            .await
    }
}
