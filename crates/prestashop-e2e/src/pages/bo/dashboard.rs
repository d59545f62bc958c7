// BO dashboard page

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::bo::BoBasePage;
use std::sync::Arc;
use std::time::Duration;

pub const PAGE_TITLE: &str = "Dashboard •";

pub const ONBOARDING_CLOSE_BUTTON: &str =
    ".onboarding-welcome button.onboarding-button-shut-down";

#[derive(Clone)]
pub struct DashboardPage {
    bo: BoBasePage,
}

impl DashboardPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            bo: BoBasePage::new(driver),
        }
    }

    pub fn bo(&self) -> &BoBasePage {
        &self.bo
    }

    /// Dismisses the onboarding welcome modal shown on first login, if any.
    pub async fn close_onboarding_modal(&self) -> Result<()> {
        let base = self.bo.base();
        if base
            .element_visible(ONBOARDING_CLOSE_BUTTON, Duration::from_millis(1000))
            .await?
        {
            base.driver().click(ONBOARDING_CLOSE_BUTTON).await?;
            base.element_not_visible(ONBOARDING_CLOSE_BUTTON, base.timeout())
                .await?;
        }
        Ok(())
    }
}
