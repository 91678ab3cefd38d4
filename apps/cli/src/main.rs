use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, normalize_base_url, DisclosureApi, DisclosureForm, FormController,
    FrameworkSelection, HttpDisclosureClient, MetricRow,
};
use shared::domain::{Framework, Tone};
use tracing_subscriber::EnvFilter;

mod display;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "esg", version, about = "Generate ESG disclosures from the command line")]
struct Cli {
    #[arg(long, global = true, help = "Disclosure service base URL")]
    base_url: Option<String>,
    #[arg(long, global = true, help = "Client settings file (default: ./esg_client.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a disclosure form and print the generated text.
    Generate(GenerateArgs),
    /// List recently generated disclosures.
    History {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Check that the disclosure service is up.
    Health,
}

#[derive(clap::Args, Debug, Default)]
struct GenerateArgs {
    #[arg(long, help = "Start from a .toml or .json form file instead of the demo form")]
    form: Option<PathBuf>,
    #[arg(long)]
    company_name: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_enum)]
    tone: Option<ToneArg>,
    #[arg(long = "framework", value_enum, help = "Replaces the checked frameworks; repeatable")]
    frameworks: Vec<FrameworkArg>,
    #[arg(long = "metric", value_parser = parse_metric, help = "NAME=VALUE[:UNIT]; replaces the metric list; repeatable")]
    metrics: Vec<MetricRow>,
    #[arg(long)]
    initiatives: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ToneArg {
    Regulatory,
    InvestorFriendly,
}

impl From<ToneArg> for Tone {
    fn from(value: ToneArg) -> Self {
        match value {
            ToneArg::Regulatory => Tone::Regulatory,
            ToneArg::InvestorFriendly => Tone::InvestorFriendly,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FrameworkArg {
    Csrd,
    Sasb,
    Gri,
    Cdp,
}

impl From<FrameworkArg> for Framework {
    fn from(value: FrameworkArg) -> Self {
        match value {
            FrameworkArg::Csrd => Framework::Csrd,
            FrameworkArg::Sasb => Framework::Sasb,
            FrameworkArg::Gri => Framework::Gri,
            FrameworkArg::Cdp => Framework::Cdp,
        }
    }
}

fn parse_metric(raw: &str) -> Result<MetricRow, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE[:UNIT], got '{raw}'"))?;
    let (value, unit) = match rest.rsplit_once(':') {
        Some((value, unit)) => (value, unit),
        None => (rest, ""),
    };
    Ok(MetricRow::new(name.trim(), value.trim(), unit.trim()))
}

fn build_form(args: GenerateArgs) -> Result<DisclosureForm> {
    let mut form = match &args.form {
        Some(path) => DisclosureForm::from_path(path)?,
        None => DisclosureForm::default(),
    };

    if let Some(v) = args.company_name {
        form.company_name = v;
    }
    if let Some(v) = args.sector {
        form.sector = v;
    }
    if let Some(v) = args.year {
        form.year = v;
    }
    if let Some(v) = args.tone {
        form.tone = v.into();
    }
    if let Some(v) = args.initiatives {
        form.initiatives = v;
    }
    if !args.frameworks.is_empty() {
        let frameworks: Vec<Framework> = args.frameworks.into_iter().map(Into::into).collect();
        form.frameworks = FrameworkSelection::from_frameworks(&frameworks);
    }
    if !args.metrics.is_empty() {
        form.metrics = args.metrics;
    }
    Ok(form)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    let base_url = normalize_base_url(&settings.base_url)?;
    let api = HttpDisclosureClient::new(base_url);
    tracing::debug!(base_url = api.base_url(), "using disclosure service");

    match cli.command {
        Command::Generate(args) => {
            let form = build_form(args)?;
            let mut controller =
                FormController::new(form).with_history_limit(settings.history_limit);

            if let Err(err) = controller.submit(&api).await {
                tracing::debug!("submit failed: {err}");
                return Err(anyhow!(err.user_message()));
            }
            display::print_outcome(&controller, cli.json)?;
        }
        Command::History { limit } => {
            let items = api
                .history(limit.unwrap_or(settings.history_limit))
                .await
                .context("failed to fetch disclosure history")?;
            display::print_history(&items, cli.json)?;
        }
        Command::Health => {
            let health = api
                .health()
                .await
                .context("disclosure service is unreachable")?;
            display::print_health(&health, cli.json)?;
        }
    }

    Ok(())
}
