use std::process::ExitCode;

use autopost_cli::token::{run_token, TokenArgs};
use autopost_core::AuthError;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args: TokenArgs = autopost_cli::parse_args();
    autopost_cli::init();

    match run_token(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e.downcast_ref::<AuthError>(), Some(AuthError::Cancelled)) {
                eprintln!("\nInterrupted by user.");
            } else {
                error!("Token acquisition failed: {:#}", e);
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
