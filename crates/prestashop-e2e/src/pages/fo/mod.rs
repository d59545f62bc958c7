// Front-office (storefront) pages

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::base::BasePage;
use std::sync::Arc;

pub mod home;
pub mod product;
pub mod search_results;

pub const HEADER_LOGO: &str = "#_desktop_logo";
pub const SEARCH_INPUT: &str = "#search_widget input.ui-autocomplete-input";

/// Behaviour shared by every storefront page.
#[derive(Clone)]
pub struct FoBasePage {
    base: BasePage,
}

impl FoBasePage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            base: BasePage::new(driver),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub async fn get_page_title(&self) -> Result<String> {
        self.base.get_page_title().await
    }

    /// Follows the header logo back to the home page.
    pub async fn go_to_home_page(&self) -> Result<()> {
        self.base.wait_for_visible_selector(HEADER_LOGO).await?;
        self.base
            .driver()
            .click_and_wait_for_navigation(HEADER_LOGO)
            .await
    }

    /// Types `name` in the header search box and submits it with Enter.
    pub async fn search_product(&self, name: &str) -> Result<()> {
        tracing::debug!("Searching the storefront for {}", name);
        self.base.set_value(SEARCH_INPUT, name).await?;
        self.base
            .driver()
            .press_and_wait_for_navigation(SEARCH_INPUT, "Enter")
            .await
    }
}
