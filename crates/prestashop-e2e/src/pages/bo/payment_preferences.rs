// BO Payment > Preferences page
//
// Restriction checkboxes are hidden inputs drawn by a sibling `<i>`: the state
// is read from the input and the click is dispatched on `{input} + i` from
// inside the page. A checkbox is only clicked when its state differs from the
// wanted one; the card is saved either way.

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::bo::BoBasePage;
use std::sync::Arc;

pub const PAGE_TITLE: &str = "Preferences •";

pub const CURRENCY_RESTRICTIONS_SAVE_BUTTON: &str =
    "#main-div div:nth-child(1) > div.card-footer button";
pub const GROUP_RESTRICTIONS_SAVE_BUTTON: &str =
    "#main-div div:nth-child(2) > div.card-footer button";

/// Euro currency checkbox of a payment module
pub fn euro_currency_restrictions_checkbox(payment_module: &str) -> String {
    format!(
        "#form_payment_module_preferences_currency_restrictions_{}_0",
        payment_module
    )
}

/// Customer group checkbox of a payment module
pub fn group_restrictions_checkbox(payment_module: &str, group: u32) -> String {
    format!(
        "#form_payment_module_preferences_group_restrictions_{}_{}",
        payment_module, group
    )
}

/// Country checkbox of a payment module
pub fn country_restrictions_checkbox(payment_module: &str, country: u32) -> String {
    format!(
        "#form_payment_module_preferences_country_restrictions_{}_{}",
        payment_module, country
    )
}

/// The styled sibling that receives clicks for a hidden checkbox
fn styled_checkbox(checkbox: &str) -> String {
    format!("{} + i", checkbox)
}

#[derive(Clone)]
pub struct PaymentPreferencesPage {
    bo: BoBasePage,
}

impl PaymentPreferencesPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            bo: BoBasePage::new(driver),
        }
    }

    pub fn bo(&self) -> &BoBasePage {
        &self.bo
    }

    /// Allows or forbids paying in euros with `payment_module`.
    pub async fn set_currency_restriction(
        &self,
        payment_module: &str,
        wanted: bool,
    ) -> Result<String> {
        let checkbox = euro_currency_restrictions_checkbox(payment_module);
        self.bo.base().wait_for_attached_selector(&checkbox).await?;
        self.toggle_and_save(&checkbox, wanted, CURRENCY_RESTRICTIONS_SAVE_BUTTON)
            .await
    }

    /// Allows or forbids customer group `group` to pay with `payment_module`.
    pub async fn set_group_restrictions(
        &self,
        group: u32,
        payment_module: &str,
        wanted: bool,
    ) -> Result<String> {
        let checkbox = group_restrictions_checkbox(payment_module, group);
        self.bo
            .base()
            .wait_for_attached_selector(&styled_checkbox(&checkbox))
            .await?;
        self.toggle_and_save(&checkbox, wanted, GROUP_RESTRICTIONS_SAVE_BUTTON)
            .await
    }

    /// Allows or forbids customers of `country` to pay with `payment_module`.
    ///
    /// The country card is submitted through the currency card's save button,
    /// which posts the whole restrictions form.
    pub async fn set_country_restriction(
        &self,
        country: u32,
        payment_module: &str,
        wanted: bool,
    ) -> Result<String> {
        let checkbox = country_restrictions_checkbox(payment_module, country);
        self.bo
            .base()
            .wait_for_attached_selector(&styled_checkbox(&checkbox))
            .await?;
        self.toggle_and_save(&checkbox, wanted, CURRENCY_RESTRICTIONS_SAVE_BUTTON)
            .await
    }

    async fn toggle_and_save(&self, checkbox: &str, wanted: bool, save: &str) -> Result<String> {
        let base = self.bo.base();
        let selected = base.is_checkbox_selected(checkbox).await?;
        if selected != wanted {
            tracing::debug!("Toggling {} to {}", checkbox, wanted);
            base.driver()
                .dispatch_click(&styled_checkbox(checkbox))
                .await?;
        }
        base.driver().click(save).await?;
        self.bo.get_alert_success_block_content().await
    }
}
