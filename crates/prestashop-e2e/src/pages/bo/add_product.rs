// BO Catalog > Products > New product page

use crate::data::ProductData;
use crate::driver::PageDriver;
use crate::error::{Error, Result};
use crate::pages::bo::BoBasePage;
use serde_json::json;
use std::sync::Arc;

pub const PAGE_TITLE: &str = "Product •";
pub const SETTING_UPDATED_MESSAGE: &str = "Settings updated.";

pub const PRODUCT_NAME_INPUT: &str = "#form_step1_name_1";
pub const PRODUCT_TYPE_SELECT: &str = "#form_step1_type_product";
pub const PRODUCT_REFERENCE_INPUT: &str = "#form_step6_reference";
pub const PRODUCT_QUANTITY_INPUT: &str = "#form_step1_qty_0_shortcut";
pub const PRODUCT_PRICE_TTC_INPUT: &str = "#form_step1_price_ttc_shortcut";
pub const PRODUCT_ONLINE_SWITCH: &str = ".product-footer div.switch-input";
pub const PRODUCT_ONLINE_INPUT: &str = ".product-footer div.switch-input input";
pub const SAVE_PRODUCT_BUTTON: &str = "input#submit[value='Save']";

/// Ids of the rich-text editors (TinyMCE) of the basic settings tab
pub const PRODUCT_DESCRIPTION_EDITOR_ID: &str = "form_step1_description_1";
pub const PRODUCT_SUMMARY_EDITOR_ID: &str = "form_step1_description_short_1";

/// Sets the content of a TinyMCE editor, falling back to the underlying
/// textarea when the editor is not initialised.
pub const SET_EDITOR_CONTENT_SCRIPT: &str = "(args) => { \
    const editor = window.tinyMCE ? window.tinyMCE.get(args.id) : null; \
    if (editor) { editor.setContent(args.content); return true; } \
    const area = document.getElementById(args.id); \
    if (area) { area.value = args.content; return true; } \
    return false; \
}";

#[derive(Clone)]
pub struct AddProductPage {
    bo: BoBasePage,
}

impl AddProductPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            bo: BoBasePage::new(driver),
        }
    }

    pub fn bo(&self) -> &BoBasePage {
        &self.bo
    }

    /// Fills the basic settings tab, sets the online status and saves.
    /// Returns the growl message shown after saving.
    pub async fn create_edit_basic_product(&self, product: &ProductData) -> Result<String> {
        tracing::debug!("Creating product {}", product.name);
        self.set_basic_setting(product).await?;
        self.set_product_status(product.status).await?;
        self.save_product().await
    }

    /// Fills name, type, descriptions, reference, quantity and price.
    pub async fn set_basic_setting(&self, product: &ProductData) -> Result<()> {
        let base = self.bo.base();
        base.set_value(PRODUCT_NAME_INPUT, &product.name).await?;
        self.set_editor_content(PRODUCT_DESCRIPTION_EDITOR_ID, &product.description)
            .await?;
        self.set_editor_content(PRODUCT_SUMMARY_EDITOR_ID, &product.summary)
            .await?;
        base.driver()
            .select_by_label(PRODUCT_TYPE_SELECT, &product.product_type.to_string())
            .await?;
        base.set_value(PRODUCT_REFERENCE_INPUT, &product.reference)
            .await?;
        base.set_value(PRODUCT_QUANTITY_INPUT, &product.quantity.to_string())
            .await?;
        base.set_value(PRODUCT_PRICE_TTC_INPUT, &product.price.to_string())
            .await
    }

    /// Flips the online switch when its state differs from `online`.
    pub async fn set_product_status(&self, online: bool) -> Result<()> {
        let base = self.bo.base();
        let current = base.is_checkbox_selected(PRODUCT_ONLINE_INPUT).await?;
        if current != online {
            base.driver().click(PRODUCT_ONLINE_SWITCH).await?;
        }
        Ok(())
    }

    /// Saves the product and returns the growl message, closing it.
    pub async fn save_product(&self) -> Result<String> {
        self.bo.base().driver().click(SAVE_PRODUCT_BUTTON).await?;
        let message = self.bo.get_growl_message_content().await?;
        self.bo.close_growl_message().await?;
        Ok(message)
    }

    async fn set_editor_content(&self, editor_id: &str, content: &str) -> Result<()> {
        let written = self
            .bo
            .base()
            .driver()
            .evaluate(
                SET_EDITOR_CONTENT_SCRIPT,
                json!({ "id": editor_id, "content": content }),
            )
            .await?;

        if written == serde_json::Value::Bool(true) {
            Ok(())
        } else {
            Err(Error::ElementNotFound(format!("#{}", editor_id)))
        }
    }
}
