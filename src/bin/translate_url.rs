//! Extract the text of a web article and translate it to Markdown with Azure OpenAI.
//!
//! Usage:
//!   translate-url -u https://example.com/article --to pt-br
//!
//! Environment variables (used when the matching flag is absent):
//! - AZURE_OPENAI_ENDPOINT
//! - AZURE_OPENAI_KEY
//! - AZURE_OPENAI_DEPLOYMENT
//! - AZURE_OPENAI_API_VERSION (defaults to 2023-05-15)
//!
//! Very long articles are sent in a single request and may exceed the
//! deployment's context window.

use std::path::PathBuf;
use std::process::ExitCode;

use article_translator::config::{ChatConfig, DEFAULT_TARGET_LANGUAGE, REQUEST_TIMEOUT};
use article_translator::{article, http, logging};
use clap::Parser;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "translate-url")]
#[command(about = "Extract a web article and translate it with Azure OpenAI", long_about = None)]
struct Args {
    /// URL of the article to translate
    #[arg(short, long)]
    url: String,

    /// Target language code
    #[arg(short = 't', long = "to", default_value = DEFAULT_TARGET_LANGUAGE)]
    to: String,

    /// Azure OpenAI endpoint (or AZURE_OPENAI_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Azure OpenAI key (or AZURE_OPENAI_KEY)
    #[arg(long)]
    key: Option<String>,

    /// Deployment name (or AZURE_OPENAI_DEPLOYMENT)
    #[arg(long)]
    deployment: Option<String>,

    /// API version (or AZURE_OPENAI_API_VERSION)
    #[arg(long)]
    api_version: Option<String>,

    /// Output Markdown file (default: <host>_<path>_<lang>.md)
    #[arg(short, long, value_name = "FILE")]
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
            println!("{}", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<PathBuf> {
    let config = ChatConfig::resolve(
        args.endpoint,
        args.key,
        args.deployment,
        args.api_version,
        &args.to,
    )?;
    // The page fetch uses the client deadline; the chat call sets its own
    let client = http::build_client(REQUEST_TIMEOUT)?;

    let out = article::translate_url(&client, &config, &args.url, args.output.as_deref()).await?;
    Ok(out)
}
