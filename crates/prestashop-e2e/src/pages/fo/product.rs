// FO product page

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::fo::FoBasePage;
use std::sync::Arc;
use std::time::Duration;

pub const PRODUCT_NAME: &str = "#main h1";
pub const PRODUCT_AVAILABILITY: &str = "#product-availability";
pub const ADD_TO_CART_BUTTON: &str =
    "#add-to-cart-or-refresh button[data-button-action='add-to-cart']";

#[derive(Clone)]
pub struct ProductPage {
    fo: FoBasePage,
}

impl ProductPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            fo: FoBasePage::new(driver),
        }
    }

    pub fn fo(&self) -> &FoBasePage {
        &self.fo
    }

    pub async fn get_product_name(&self) -> Result<String> {
        self.fo.base().get_text_content(PRODUCT_NAME, true).await
    }

    /// Whether the add-to-cart button can be used: it must not show up as
    /// disabled within one second.
    pub async fn is_add_to_cart_button_enabled(&self) -> Result<bool> {
        self.fo
            .base()
            .element_not_visible(
                &format!("{}:disabled", ADD_TO_CART_BUTTON),
                Duration::from_millis(1000),
            )
            .await
    }

    /// Availability label, read without waiting since it may be blank.
    pub async fn get_product_availability_label(&self) -> Result<String> {
        self.fo
            .base()
            .get_text_content(PRODUCT_AVAILABILITY, false)
            .await
    }
}
