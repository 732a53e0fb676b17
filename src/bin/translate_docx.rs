//! Translate a .docx document paragraph by paragraph with Azure Translator.
//!
//! Usage:
//!   translate-docx -i report.docx --to pt-br
//!
//! Environment variables (used when the matching flag is absent):
//! - AZURE_TRANSLATOR_KEY
//! - AZURE_TRANSLATOR_ENDPOINT
//! - AZURE_TRANSLATOR_REGION (optional, depends on the subscription)

use std::path::PathBuf;
use std::process::ExitCode;

use article_translator::config::{
    TranslatorConfig, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE,
};
use article_translator::{docx_translator, http, logging};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "translate-docx")]
#[command(about = "Translate a .docx document with the Azure Translator Text API", long_about = None)]
struct Args {
    /// Input .docx
    #[arg(short, long, value_name = "DOCX")]
    input: PathBuf,

    /// Target language code
    #[arg(short = 't', long = "to", default_value = DEFAULT_TARGET_LANGUAGE)]
    to: String,

    /// Source language code
    #[arg(long = "from", default_value = DEFAULT_SOURCE_LANGUAGE)]
    from: String,

    /// Translator endpoint (or AZURE_TRANSLATOR_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Subscription key (or AZURE_TRANSLATOR_KEY)
    #[arg(long)]
    key: Option<String>,

    /// Resource region (or AZURE_TRANSLATOR_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Output .docx (default: <input_stem>_<lang>.docx next to the input)
    #[arg(short, long, value_name = "DOCX")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(out) => {
            info!("Translated document saved to {}", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Translation failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<PathBuf> {
    let config = TranslatorConfig::resolve(args.endpoint, args.key, args.region, &args.from, &args.to)?;
    let client = http::build_client(config.timeout)?;

    let out = docx_translator::translate_document_file(
        &client,
        &config,
        &args.input,
        args.output.as_deref(),
    )
    .await?;

    Ok(out)
}
