// Integration tests for the payment restrictions campaign and page
//
// Runs against the in-memory fake shop: restriction checkboxes are toggled
// through their styled siblings and persisted by the save buttons.

mod common;

use common::fake_shop::FakeShop;
use prestashop_e2e::campaigns::{self, payment_restrictions};
use prestashop_e2e::pages::bo::payment_preferences::{
    country_restrictions_checkbox, euro_currency_restrictions_checkbox,
    group_restrictions_checkbox,
};
use prestashop_e2e::pages::bo::{PAYMENT_PARENT_LINK, PREFERENCES_LINK, SUCCESSFUL_UPDATE_MESSAGE};
use prestashop_e2e::session::ShopSession;
use prestashop_e2e::{BrowserTabs, FailureKind, FailurePolicy, StepOutcome};
use std::sync::Arc;

const MODULE: &str = payment_restrictions::PAYMENT_MODULE;

async fn run_campaign(shop: &FakeShop) -> prestashop_e2e::ScenarioReport {
    campaigns::find("payment-restrictions")
        .expect("registered campaign")
        .run(
            Arc::new(shop.browser()),
            &shop.config(),
            FailurePolicy::SkipRemaining,
        )
        .await
        .expect("campaign runs")
}

#[tokio::test]
async fn test_campaign_passes_and_restores_restrictions() {
    common::init_tracing();
    let shop = FakeShop::new();

    let report = run_campaign(&shop).await;

    let failures: Vec<_> = report.failed_steps().collect();
    assert!(report.is_success(), "failed steps: {:?}", failures);
    assert_eq!(report.summary().passed, 2 + 6 + 1);

    for checkbox in [
        euro_currency_restrictions_checkbox(MODULE),
        group_restrictions_checkbox(MODULE, payment_restrictions::CUSTOMER_GROUP_ID),
        country_restrictions_checkbox(MODULE, payment_restrictions::COUNTRY_ID),
    ] {
        assert_eq!(shop.restriction(&checkbox), Some(true), "{}", checkbox);
    }
}

#[tokio::test]
async fn test_campaign_tolerates_already_disabled_restriction() {
    common::init_tracing();
    let shop = FakeShop::new();
    let currency = euro_currency_restrictions_checkbox(MODULE);
    shop.set_restriction(&currency, false);

    let report = run_campaign(&shop).await;

    assert!(report.is_success());
    assert_eq!(shop.restriction(&currency), Some(true));
}

#[tokio::test]
async fn test_missing_country_checkbox_fails_step_and_skips_the_rest() {
    common::init_tracing();
    let shop = FakeShop::new();
    shop.remove_restriction(&country_restrictions_checkbox(
        MODULE,
        payment_restrictions::COUNTRY_ID,
    ));

    let report = run_campaign(&shop).await;

    let step = report.step("disableCountry8Restriction").expect("step reported");
    match &step.outcome {
        StepOutcome::Failed { kind, message } => {
            assert_eq!(*kind, FailureKind::Environment);
            assert!(message.contains("country_restrictions"), "message: {}", message);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(
        report.step("enableCountry8Restriction").map(|s| &s.outcome),
        Some(&StepOutcome::Skipped)
    );
    assert_eq!(
        report.step("closeBrowserContext").map(|s| &s.outcome),
        Some(&StepOutcome::Passed)
    );
}

#[tokio::test]
async fn test_page_object_toggles_only_when_state_differs() {
    common::init_tracing();
    let shop = FakeShop::new();
    let browser = shop.browser();
    let session = ShopSession::open(Arc::new(browser.clone())).await.unwrap();
    let config = shop.config();

    let pages = session.pages();
    pages.login.bo().base().go_to(&config.bo_url).await.unwrap();
    pages.login.login(&config.email, &config.password).await.unwrap();
    pages
        .dashboard
        .bo()
        .go_to_sub_menu(PAYMENT_PARENT_LINK, PREFERENCES_LINK)
        .await
        .unwrap();

    let group = group_restrictions_checkbox(MODULE, 1);
    let message = pages
        .payment_preferences
        .set_group_restrictions(1, MODULE, true)
        .await
        .unwrap();
    assert!(message.contains(SUCCESSFUL_UPDATE_MESSAGE));
    assert_eq!(shop.restriction(&group), Some(true));

    pages
        .payment_preferences
        .set_group_restrictions(1, MODULE, false)
        .await
        .unwrap();
    assert_eq!(shop.restriction(&group), Some(false));

    let tab = browser.page(0).unwrap();
    let toggles = tab
        .clicks()
        .into_iter()
        .filter(|selector| selector.ends_with(" + i"))
        .count();
    assert_eq!(toggles, 1);
}

#[tokio::test]
async fn test_campaign_fails_when_browser_is_closed() {
    common::init_tracing();
    let shop = FakeShop::new();
    let browser = shop.browser();
    browser.close().await.unwrap();

    let err = campaigns::find("payment-restrictions")
        .unwrap()
        .run(Arc::new(browser), &shop.config(), FailurePolicy::SkipRemaining)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("campaign payment-restrictions"), "{}", message);
    assert!(message.contains("opening first tab"), "{}", message);
    assert!(!err.is_assertion());
}
