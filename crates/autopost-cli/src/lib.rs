// ============================================================================
// autopost-cli — command-line front ends for autopost-core
// ============================================================================
// Binaries:
//   get-tistory-token              Run the browser OAuth flow, print the token
//   post-to-blog --title T --content FILE [--visibility 0|1|3]
//                                  Publish one post using env credentials
// ============================================================================

pub mod publish;
pub mod token;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "autopost_core=info,autopost_cli=info";

/// Load `.env` (if any) and install the stderr log subscriber.
pub fn init() {
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }
}

/// Parse arguments, exiting 1 on usage errors (0 for --help/--version).
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
