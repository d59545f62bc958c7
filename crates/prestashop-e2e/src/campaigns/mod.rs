// Campaigns - the journeys the suite knows how to run
//
// Each campaign builds a `Scenario<ShopContext>`. Running one opens a
// session on a fresh browser context, runs the scenario and lets its
// teardown close the context.

use crate::config::SuiteConfig;
use crate::driver::BrowserTabs;
use crate::error::Result;
use crate::scenario::{FailurePolicy, Scenario, ScenarioReport, Step};
use crate::session::{ShopContext, ShopSession};
use std::sync::Arc;

pub mod label_out_of_stock;
pub mod login;
pub mod payment_restrictions;

/// A named, runnable scenario
#[derive(Debug, Clone, Copy)]
pub struct Campaign {
    pub name: &'static str,
    pub base_context: &'static str,
    pub description: &'static str,
    build: fn() -> Scenario<ShopContext>,
}

static CAMPAIGNS: &[Campaign] = &[
    Campaign {
        name: "label-out-of-stock",
        base_context: label_out_of_stock::BASE_CONTEXT,
        description: "Set label out-of-stock with allowed/denied backorders",
        build: label_out_of_stock::scenario,
    },
    Campaign {
        name: "payment-restrictions",
        base_context: payment_restrictions::BASE_CONTEXT,
        description: "Configure payment module restrictions by currency, group and country",
        build: payment_restrictions::scenario,
    },
];

/// Every registered campaign
pub fn catalogue() -> &'static [Campaign] {
    CAMPAIGNS
}

/// Campaign registered under `name`
pub fn find(name: &str) -> Option<&'static Campaign> {
    CAMPAIGNS.iter().find(|campaign| campaign.name == name)
}

impl Campaign {
    /// Builds a fresh scenario (new test data every call).
    pub fn scenario(&self) -> Scenario<ShopContext> {
        (self.build)()
    }

    /// Runs the campaign in the browser context `tabs`.
    ///
    /// Failing to open the first tab aborts with `Err`; step failures are
    /// reported in the returned report.
    pub async fn run(
        &self,
        tabs: Arc<dyn BrowserTabs>,
        config: &SuiteConfig,
        policy: FailurePolicy,
    ) -> Result<ScenarioReport> {
        tracing::info!("Running campaign {}", self.name);
        let session = ShopSession::open(tabs)
            .await
            .map_err(|e| e.context(format!("campaign {}", self.name)))?;
        let mut ctx = ShopContext::new(session, config.clone());
        Ok(self.scenario().run(&mut ctx, policy).await)
    }
}

/// Teardown shared by the campaigns: close the scenario's browser context
pub fn close_browser_context() -> Step<ShopContext> {
    Step::new(
        "closeBrowserContext",
        "should close the browser context",
        |ctx: &mut ShopContext| Box::pin(async move { ctx.session.close().await }),
    )
}
