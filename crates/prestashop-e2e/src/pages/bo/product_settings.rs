// BO Shop parameters > Product Settings page
//
// Only the "Products stock" card is driven here: the allow-ordering-out-of-
// stock radio pair and the two availability labels shown on the storefront
// when a product is out of stock.

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::bo::BoBasePage;
use std::sync::Arc;

pub const PAGE_TITLE: &str = "Product Settings •";

pub const PRODUCTS_STOCK_FORM: &str = "#configuration_fieldset_order_by_product";
pub const LABEL_OOS_ALLOWED_BACKORDERS: &str = "#form_stock_oos_allowed_backorders_1";
pub const LABEL_OOS_DENIED_BACKORDERS: &str = "#form_stock_oos_denied_backorders_1";

/// Radio button of the allow-ordering-out-of-stock toggle
pub fn allow_ordering_oos_toggle(enable: bool) -> String {
    format!(
        "{} #form_stock_allow_ordering_oos_{}",
        PRODUCTS_STOCK_FORM,
        u8::from(enable)
    )
}

/// Save button of the products stock card
pub fn save_products_stock_form_button() -> String {
    format!("{} .card-footer button", PRODUCTS_STOCK_FORM)
}

#[derive(Clone)]
pub struct ProductSettingsPage {
    bo: BoBasePage,
}

impl ProductSettingsPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            bo: BoBasePage::new(driver),
        }
    }

    pub fn bo(&self) -> &BoBasePage {
        &self.bo
    }

    /// Allows or denies ordering products that are out of stock and returns
    /// the confirmation alert.
    pub async fn set_allow_ordering_out_of_stock_status(&self, enable: bool) -> Result<String> {
        tracing::debug!("Allow ordering out-of-stock products: {}", enable);
        self.bo
            .base()
            .driver()
            .check(&allow_ordering_oos_toggle(enable))
            .await?;
        self.save_products_stock_form().await
    }

    /// Sets the label shown for out-of-stock products that can be ordered.
    pub async fn set_label_oos_allowed_backorders(&self, label: &str) -> Result<String> {
        self.bo
            .base()
            .set_value(LABEL_OOS_ALLOWED_BACKORDERS, label)
            .await?;
        self.save_products_stock_form().await
    }

    /// Sets the label shown for out-of-stock products that cannot be ordered.
    pub async fn set_label_oos_denied_backorders(&self, label: &str) -> Result<String> {
        self.bo
            .base()
            .set_value(LABEL_OOS_DENIED_BACKORDERS, label)
            .await?;
        self.save_products_stock_form().await
    }

    async fn save_products_stock_form(&self) -> Result<String> {
        self.bo
            .base()
            .driver()
            .click_and_wait_for_navigation(&save_products_stock_form_button())
            .await?;
        self.bo.get_alert_success_block_content().await
    }
}
