// src/main.rs
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use value_summer::config::ScanConfig;
use value_summer::document::Matcher;
use value_summer::report;
use value_summer::source::DocumentSource;
use value_summer::utils::{self, error::ServiceError, AppError};
use value_summer::{PageHandle, Policy, Scanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Command Line Interface for scanning and summing page values
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTML file to scan ("-" reads stdin)
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    input: Option<String>,

    /// Fetch the page from this URL instead of a file
    #[arg(short, long)]
    url: Option<String>,

    /// How special rows combine with normal ones
    #[arg(short, long, value_enum, env = "VALUE_SUMMER_POLICY")]
    policy: Option<Policy>,

    /// JSON scan config (markers, columns, currency format, policy)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the partial class name identifying target regions
    #[arg(long)]
    target_marker: Option<String>,

    /// Also pick up amounts written without the currency symbol
    #[arg(long)]
    allow_bare_numbers: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Args {
    fn source(&self) -> DocumentSource {
        match (&self.url, &self.input) {
            (Some(url), _) => DocumentSource::Url(url.clone()),
            (None, Some(input)) => DocumentSource::from_arg(input),
            (None, None) => DocumentSource::Stdin,
        }
    }

    fn scan_config(&self) -> Result<ScanConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };
        if let Some(policy) = self.policy {
            tracing::debug!("Policy overridden to {:?}", policy);
            config.policy = policy;
        }
        if let Some(marker) = &self.target_marker {
            config.target = Matcher::class_contains(marker.clone());
        }
        if self.allow_bare_numbers {
            config.currency.symbol_required = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting scan for args: {:?}", args);

    // 3. Build the scanner from config file + overrides
    let scanner = Scanner::new(args.scan_config()?)?;
    tracing::info!("Using {:?} policy", scanner.policy());

    // 4. Load the page and hand it to a page context
    let html = args.source().load().await?;
    let page = PageHandle::spawn(html, scanner);

    // 5. One scan round trip
    match page.scan().await {
        Ok(result) => {
            let rendered = match args.format {
                OutputFormat::Text => report::render_text(&result),
                OutputFormat::Json => report::render_json(&result)?,
            };
            println!("{}", rendered);
            Ok(())
        }
        Err(ServiceError::Scan(err)) => {
            // Expected outcome (e.g. nothing to scan): report once, exit non-zero
            tracing::debug!("Scan finished without a result: {:?}", err);
            eprintln!("{}", report::render_error(&err));
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
