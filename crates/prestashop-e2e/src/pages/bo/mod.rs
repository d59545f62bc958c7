// Back-office pages
//
// `BoBasePage` holds what every admin screen shares: the side menu, the
// success alerts and growl notifications, the Symfony debug toolbar and the
// header link to the storefront.

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::base::BasePage;
use std::sync::Arc;
use std::time::Duration;

pub mod add_product;
pub mod dashboard;
pub mod login;
pub mod payment_preferences;
pub mod product_settings;
pub mod products;

pub const SUCCESSFUL_CREATION_MESSAGE: &str = "Successful creation.";
pub const SUCCESSFUL_UPDATE_MESSAGE: &str = "Successful update.";
pub const SUCCESSFUL_DELETION_MESSAGE: &str = "Successful deletion.";

// Side menu
pub const CATALOG_PARENT_LINK: &str = "li#subtab-AdminCatalog";
pub const PRODUCTS_LINK: &str = "#subtab-AdminProducts";
pub const PAYMENT_PARENT_LINK: &str = "#subtab-AdminParentPayment";
pub const PREFERENCES_LINK: &str = "#subtab-AdminPaymentPreferences";
pub const SHOP_PARAMETERS_PARENT_LINK: &str = "#subtab-ShopParameters";
pub const PRODUCT_SETTINGS_LINK: &str = "#subtab-AdminPPreferences";

// Header
pub const HEADER_SHOP_NAME_LINK: &str = "#header_shopname";

// Alerts
pub const ALERT_SUCCESS_BLOCK: &str = "div.alert.alert-success";
pub const ALERT_SUCCESS_BLOCK_PARAGRAPH: &str = "div.alert.alert-success div.alert-text p";

// Growl notifications
pub const GROWL_MESSAGE_BLOCK: &str = "#growls .growl-message:last-of-type";
pub const GROWL_CLOSE_BUTTON: &str = "#growls .growl-close";

// Symfony debug toolbar
pub const SF_TOOLBAR_MAIN_CONTENT_DIV: &str = "div[id*='sfToolbarMainContent']";
pub const SF_CLOSE_TOOLBAR_LINK: &str = "a[id*='sfToolbarHideButton']";

/// Selector of a side menu link once it is the active entry
pub fn active_link(link: &str) -> String {
    format!("{}.link-active", link)
}

/// Selector of the Symfony toolbar while it is expanded
pub fn sf_toolbar_open() -> String {
    format!("{}[style='display: block;']", SF_TOOLBAR_MAIN_CONTENT_DIV)
}

/// Behaviour shared by every back-office screen.
#[derive(Clone)]
pub struct BoBasePage {
    base: BasePage,
}

impl BoBasePage {
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

    /// Opens `parent` in the side menu and follows its `link`, waiting for
    /// the target screen to mark the link active.
    pub async fn go_to_sub_menu(&self, parent: &str, link: &str) -> Result<()> {
        tracing::debug!("Side menu {} > {}", parent, link);
        let driver = self.base.driver();
        driver.click(parent).await?;
        self.base.wait_for_visible_selector(link).await?;
        driver.click_and_wait_for_navigation(link).await?;
        self.base.wait_for_visible_selector(&active_link(link)).await
    }

    /// Collapses the Symfony debug toolbar when it is expanded.
    pub async fn close_sf_toolbar(&self) -> Result<()> {
        if self
            .base
            .element_visible(&sf_toolbar_open(), Duration::from_millis(1000))
            .await?
        {
            self.base.driver().click(SF_CLOSE_TOOLBAR_LINK).await?;
        }
        Ok(())
    }

    /// Follows the header shop link, which opens the storefront in a new
    /// tab, and returns that tab.
    pub async fn view_my_shop(&self) -> Result<Arc<dyn PageDriver>> {
        self.base
            .driver()
            .click_for_new_tab(HEADER_SHOP_NAME_LINK)
            .await
    }

    /// Text of the success alert shown after a form submission
    pub async fn get_alert_success_block_content(&self) -> Result<String> {
        self.base.get_text_content(ALERT_SUCCESS_BLOCK, true).await
    }

    /// Text of the paragraph inside the success alert
    pub async fn get_alert_success_block_paragraph_content(&self) -> Result<String> {
        self.base
            .get_text_content(ALERT_SUCCESS_BLOCK_PARAGRAPH, true)
            .await
    }

    /// Text of the last growl notification
    pub async fn get_growl_message_content(&self) -> Result<String> {
        self.base.get_text_content(GROWL_MESSAGE_BLOCK, true).await
    }

    /// Dismisses the growl notification if one is shown.
    pub async fn close_growl_message(&self) -> Result<()> {
        if self
            .base
            .element_visible(GROWL_CLOSE_BUTTON, Duration::from_millis(1000))
            .await?
        {
            self.base.driver().click(GROWL_CLOSE_BUTTON).await?;
        }
        Ok(())
    }
}
