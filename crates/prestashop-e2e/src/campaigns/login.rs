// Shared back-office login steps

use crate::pages::bo::dashboard;
use crate::scenario::{Step, expect_value};
use crate::session::ShopContext;

/// Identifier of the login step
pub const LOGIN_BO_STEP: &str = "loginBO";

/// Opens the back office, logs in with the configured employee and closes the
/// onboarding modal.
pub fn login_bo_steps() -> Vec<Step<ShopContext>> {
    vec![Step::new(
        LOGIN_BO_STEP,
        "should login in BO",
        |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.session.pages();
                pages.login.bo().base().go_to(&ctx.config.bo_url).await?;
                pages
                    .login
                    .login(&ctx.config.email, &ctx.config.password)
                    .await?;

                let title = pages.dashboard.bo().get_page_title().await?;
                expect_value(title).to_contain(dashboard::PAGE_TITLE)?;

                pages.dashboard.close_onboarding_modal().await
            })
        },
    )]
}
