use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use oxxo_barcode::core::{CheckDigitBoundary, ChecksumAlgorithm, CodeBuilder, Configuration};
use oxxo_barcode::render::BarcodeOutput;
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build an OXXO payment code and render it as a Code 128 barcode.
#[derive(Debug, Parser)]
#[command(name = "oxxo-barcode", version, about)]
struct Cli {
    /// Layout configuration file.
    #[arg(short, long, default_value = "./oxxo_barcode.json")]
    config: PathBuf,

    /// Reference number to embed.
    #[arg(short, long)]
    reference: u64,

    /// Amount to embed, e.g. 34.50.
    #[arg(short, long)]
    amount: Decimal,

    /// Check digit algorithm: `mod10` or `137`.
    #[arg(long, default_value = "mod10")]
    algorithm: ChecksumAlgorithm,

    /// Fail instead of using 0 when the mod10 checksum is 10.
    #[arg(long)]
    reject_boundary: bool,

    /// Issue date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Where to write the JSON record.
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "oxxo_barcode=debug,info"
    } else {
        "oxxo_barcode=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<String, oxxo_barcode::BarcodeError> {
    let config = Configuration::from_path(&cli.config)?;
    let boundary = if cli.reject_boundary {
        CheckDigitBoundary::Reject
    } else {
        CheckDigitBoundary::Wrap
    };
    let issued_on = cli.date.unwrap_or_else(|| Local::now().date_naive());

    let code = CodeBuilder::new(&config)
        .algorithm(cli.algorithm)
        .boundary(boundary)
        .build(cli.reference, cli.amount, issued_on)?;
    tracing::info!(code = %code, expires = %code.expiry, "built payment code");

    let output = BarcodeOutput::render(&code, &config)?;
    output.write_to(&cli.output)?;
    Ok(code.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    tracing::debug!(?cli, "starting");

    match run(&cli) {
        Ok(code) => {
            println!("{code}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
