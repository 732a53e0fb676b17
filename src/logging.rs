use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

/// Directive for this crate's log level
pub fn directive(verbose: bool) -> Result<Directive, ParseError> {
    let level = if verbose { "debug" } else { "info" };
    format!("article_translator={}", level).parse()
}

/// Initialize logging to stderr; stdout stays free for program output.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive(verbose)?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
