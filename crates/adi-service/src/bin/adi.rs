use std::io::{self, Write};

use adi_core::{compute_score, diagnose};
use adi_service::render::{
    catalog_json, catalog_text, diagnosis_json, diagnosis_text, score_json, score_text,
};
use adi_service::{resolve_input, AdiServer, InputPolicy, ScoreArgs, ServiceConfig};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adi", version)]
#[command(about = "ADI longevity scoring for creator brands")]
struct Cli {
    /// Out-of-range handling; overrides ADI_INPUT_POLICY
    #[arg(long, global = true)]
    policy: Option<InputPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the longevity score and verdict
    Score(MetricArgs),
    /// Score plus weakest pillar, key-person risk and open levers
    Diagnose(MetricArgs),
    /// List metrics, pillars and verdict bands
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Serve JSON-RPC tools on stdin/stdout
    Serve,
}

#[derive(Args)]
struct MetricArgs {
    /// Organic earned media, % of unpaid mentions (0-100)
    #[arg(long, allow_negative_numbers = true)]
    organic_emv: Option<f64>,
    /// Founder-authored content frequency, % (0-100)
    #[arg(long, allow_negative_numbers = true)]
    founder_content_freq: Option<f64>,
    /// Repeat purchase rate, % (0-60)
    #[arg(long, allow_negative_numbers = true)]
    repeat_purchase_rate: Option<f64>,
    /// Average review rating (1-5)
    #[arg(long, allow_negative_numbers = true)]
    review_sentiment: Option<f64>,
    /// Founder equity stake, % (0-100)
    #[arg(long, allow_negative_numbers = true)]
    founder_ownership_pct: Option<f64>,
    /// Governance strength (1-5)
    #[arg(long, allow_negative_numbers = true)]
    governance_score: Option<f64>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl MetricArgs {
    const fn score_args(&self) -> ScoreArgs {
        ScoreArgs {
            organic_emv: self.organic_emv,
            founder_content_freq: self.founder_content_freq,
            repeat_purchase_rate: self.repeat_purchase_rate,
            review_sentiment: self.review_sentiment,
            founder_ownership_pct: self.founder_ownership_pct,
            governance_score: self.governance_score,
        }
    }
}

fn main() -> io::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ServiceConfig::from_env();
    if let Some(policy) = cli.policy {
        config = config.with_input_policy(policy);
    }

    match cli.command {
        Commands::Score(args) => {
            let input = resolve_input(&args.score_args(), config.input_policy)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
            let result = compute_score(&input);
            if args.json {
                emit_json(&score_json(&input, &result))
            } else {
                emit_text(&score_text(&result))
            }
        }
        Commands::Diagnose(args) => {
            let input = resolve_input(&args.score_args(), config.input_policy)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
            let diagnosis = diagnose(&input);
            if args.json {
                emit_json(&diagnosis_json(&diagnosis))
            } else {
                emit_text(&diagnosis_text(&diagnosis))
            }
        }
        Commands::Catalog { json } => {
            if json {
                emit_json(&catalog_json())
            } else {
                emit_text(&catalog_text())
            }
        }
        Commands::Serve => AdiServer::with_config(config).serve_stdio(),
    }
}

// stdout carries command output and protocol frames, so logs go to stderr
fn init_tracing() {
    let filter = EnvFilter::try_from_env("ADI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn emit_json(value: &Value) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)
}

fn emit_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
