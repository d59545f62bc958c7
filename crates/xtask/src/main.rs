//! xtask - runs the PrestaShop e2e campaigns against a live shop
//!
//! ```text
//! cargo xtask list
//! URL_FO=http://localhost/prestashop/ cargo xtask run label-out-of-stock --report report.json
//! cargo xtask run all --headed --browser firefox --continue-on-failure
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use prestashop_e2e::campaigns::{self, Campaign};
use prestashop_e2e::driver::playwright::PlaywrightBrowser;
use prestashop_e2e::{
    BrowserKind, BrowserTabs, FailurePolicy, ScenarioReport, StepOutcome, SuiteConfig,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "PrestaShop end-to-end campaigns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available campaigns
    List,

    /// Run one campaign, or `all` of them
    Run {
        /// Campaign name (see `list`) or `all`
        campaign: String,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Browser engine, overriding BROWSER
        #[arg(long)]
        browser: Option<BrowserKind>,

        /// Keep running the steps after a failure instead of skipping them
        #[arg(long)]
        continue_on_failure: bool,

        /// Write the JSON reports to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for campaign in campaigns::catalogue() {
                println!("{:<24} {}", campaign.name, campaign.description);
                println!("{:<24} {}", "", campaign.base_context);
            }
            Ok(())
        }
        Commands::Run {
            campaign,
            headed,
            browser,
            continue_on_failure,
            report,
        } => {
            let selected = select(&campaign)?;

            let mut config = SuiteConfig::from_env().context("reading configuration")?;
            if headed {
                config = config.headless(false);
            }
            if let Some(browser) = browser {
                config = config.browser(browser);
            }
            let policy = if continue_on_failure {
                FailurePolicy::Continue
            } else {
                FailurePolicy::SkipRemaining
            };

            let (reports, outcome) = run(&selected, &config, policy).await?;

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&reports)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("writing report to {}", path.display()))?;
                tracing::info!("Report written to {}", path.display());
            }
            outcome?;

            let failed = reports.iter().filter(|r| !r.is_success()).count();
            if failed > 0 {
                bail!("{} of {} campaign(s) failed", failed, reports.len());
            }
            Ok(())
        }
    }
}

fn select(name: &str) -> anyhow::Result<Vec<&'static Campaign>> {
    if name == "all" {
        return Ok(campaigns::catalogue().iter().collect());
    }
    match campaigns::find(name) {
        Some(campaign) => Ok(vec![campaign]),
        None => bail!("unknown campaign '{}' (try `xtask list`)", name),
    }
}

/// Runs `selected` in one browser, a fresh context per campaign.
///
/// Stops at the first campaign that cannot start. The reports gathered up
/// to that point are returned next to the error, and the browser is closed
/// in every case.
async fn run(
    selected: &[&'static Campaign],
    config: &SuiteConfig,
    policy: FailurePolicy,
) -> anyhow::Result<(Vec<ScenarioReport>, anyhow::Result<()>)> {
    let browser = PlaywrightBrowser::launch(config)
        .await
        .context("launching browser")?;

    let mut reports = Vec::with_capacity(selected.len());
    let mut outcome = Ok(());
    for campaign in selected {
        match run_one(&browser, campaign, config, policy).await {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => {
                outcome = Err(e);
                break;
            }
        }
    }

    if let Err(e) = browser.close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }
    Ok((reports, outcome))
}

async fn run_one(
    browser: &PlaywrightBrowser,
    campaign: &Campaign,
    config: &SuiteConfig,
    policy: FailurePolicy,
) -> anyhow::Result<ScenarioReport> {
    let context = Arc::new(
        browser
            .new_context()
            .await
            .with_context(|| format!("creating browser context for {}", campaign.name))?,
    );
    let tabs: Arc<dyn BrowserTabs> = context.clone();
    match campaign.run(tabs, config, policy).await {
        Ok(report) => Ok(report),
        Err(e) => {
            if let Err(close) = context.close().await {
                tracing::warn!("Failed to close context of {}: {}", campaign.name, close);
            }
            Err(e.into())
        }
    }
}

fn print_report(report: &ScenarioReport) {
    println!("\n{} ({})", report.title, report.base_context);
    for step in report.steps.iter().chain(report.teardown.iter()) {
        match &step.outcome {
            StepOutcome::Passed => println!("  ✓ {} ({} ms)", step.title, step.duration_ms),
            StepOutcome::Skipped => println!("  - {}", step.title),
            StepOutcome::Failed { kind, message } => {
                println!("  ✗ {} [{:?}]", step.title, kind);
                println!("      {}", message);
            }
        }
    }

    let summary = report.summary();
    println!(
        "{} passing, {} failing, {} skipped ({} ms)",
        summary.passed, summary.failed, summary.skipped, report.duration_ms
    );
}
