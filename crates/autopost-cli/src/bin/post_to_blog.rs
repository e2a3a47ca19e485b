use std::process::ExitCode;

use autopost_cli::publish::{run_publish, PublishArgs};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args: PublishArgs = autopost_cli::parse_args();
    autopost_cli::init();

    match run_publish(args, |key| std::env::var(key).ok()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Publish failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
