// Payment module restrictions by currency, customer group and country
//
// Disables then re-enables each restriction of the bank wire module, so the
// shop ends in the state it started from.

use crate::campaigns::close_browser_context;
use crate::campaigns::login::login_bo_steps;
use crate::pages::bo::{
    PAYMENT_PARENT_LINK, PREFERENCES_LINK, SUCCESSFUL_UPDATE_MESSAGE, payment_preferences,
};
use crate::scenario::{Scenario, Step, expect_value};
use crate::session::ShopContext;

pub const BASE_CONTEXT: &str = "functional_BO_payment_preferences_paymentRestrictions";

pub const PAYMENT_MODULE: &str = "ps_wirepayment";
/// Customer group "Customer"
pub const CUSTOMER_GROUP_ID: u32 = 3;
/// Country "France"
pub const COUNTRY_ID: u32 = 8;

/// A restriction checkbox of the preferences page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restriction {
    EuroCurrency,
    Group(u32),
    Country(u32),
}

impl Restriction {
    fn name(&self) -> String {
        match self {
            Restriction::EuroCurrency => "EuroCurrency".to_string(),
            Restriction::Group(id) => format!("Group{}", id),
            Restriction::Country(id) => format!("Country{}", id),
        }
    }

    fn label(&self) -> String {
        match self {
            Restriction::EuroCurrency => "euro currency".to_string(),
            Restriction::Group(id) => format!("customer group {}", id),
            Restriction::Country(id) => format!("country {}", id),
        }
    }
}

pub fn restrictions() -> Vec<Restriction> {
    vec![
        Restriction::EuroCurrency,
        Restriction::Group(CUSTOMER_GROUP_ID),
        Restriction::Country(COUNTRY_ID),
    ]
}

pub fn scenario() -> Scenario<ShopContext> {
    let mut scenario = Scenario::new(
        "Configure payment module restrictions",
        BASE_CONTEXT,
    );
    scenario.extend(login_bo_steps());

    scenario.push(Step::new(
        "goToPreferencesPage",
        "should go to 'Payment > Preferences' page",
        |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.pages();
                pages
                    .dashboard
                    .bo()
                    .go_to_sub_menu(PAYMENT_PARENT_LINK, PREFERENCES_LINK)
                    .await?;
                pages.payment_preferences.bo().close_sf_toolbar().await?;

                let title = pages.payment_preferences.bo().get_page_title().await?;
                expect_value(title).to_contain(payment_preferences::PAGE_TITLE)
            })
        },
    ));

    for restriction in restrictions() {
        for wanted in [false, true] {
            scenario.push(restriction_step(restriction, wanted));
        }
    }

    scenario.teardown(close_browser_context())
}

fn restriction_step(restriction: Restriction, wanted: bool) -> Step<ShopContext> {
    let action = if wanted { "enable" } else { "disable" };
    Step::new(
        format!("{}{}Restriction", action, restriction.name()),
        format!(
            "should {} the {} restriction of {}",
            action,
            restriction.label(),
            PAYMENT_MODULE
        ),
        move |ctx: &mut ShopContext| {
            Box::pin(async move {
                let preferences = &ctx.pages().payment_preferences;
                let message = match restriction {
                    Restriction::EuroCurrency => {
                        preferences
                            .set_currency_restriction(PAYMENT_MODULE, wanted)
                            .await?
                    }
                    Restriction::Group(group) => {
                        preferences
                            .set_group_restrictions(group, PAYMENT_MODULE, wanted)
                            .await?
                    }
                    Restriction::Country(country) => {
                        preferences
                            .set_country_restriction(country, PAYMENT_MODULE, wanted)
                            .await?
                    }
                };
                expect_value(message).to_contain(SUCCESSFUL_UPDATE_MESSAGE)
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_restriction_is_disabled_then_enabled() {
        let scenario = scenario();
        assert_eq!(
            scenario.step_ids(),
            vec![
                "loginBO",
                "goToPreferencesPage",
                "disableEuroCurrencyRestriction",
                "enableEuroCurrencyRestriction",
                "disableGroup3Restriction",
                "enableGroup3Restriction",
                "disableCountry8Restriction",
                "enableCountry8Restriction",
            ]
        );
    }
}
