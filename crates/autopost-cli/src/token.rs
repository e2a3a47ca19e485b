use std::time::Duration;

use anyhow::Result;
use autopost_core::config::{
    http_timeout_from_lookup, DEFAULT_CALLBACK_PORT, ENV_ACCESS_TOKEN, ENV_CLIENT_ID,
    ENV_CLIENT_SECRET,
};
use autopost_core::{AccessToken, CallbackServer, OAuthConfig, TokenAcquirer};
use clap::Parser;
use dialoguer::{Input, Password};
use tracing::{info, warn};

/// Obtain a Tistory access token through the browser
#[derive(Debug, Parser)]
#[command(
    name = "get-tistory-token",
    version,
    about = "Obtain a Tistory access token through the browser"
)]
pub struct TokenArgs {
    /// Local port for the OAuth redirect (must match the app's registered callback)
    #[arg(long, default_value_t = DEFAULT_CALLBACK_PORT)]
    pub port: u16,

    /// Stop waiting for the browser after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the authorization URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}

/// Prompt for credentials, run one authorization round trip, print the token.
pub async fn run_token(args: TokenArgs) -> Result<AccessToken> {
    println!("{}", "=".repeat(60));
    println!("Tistory Access Token Helper");
    println!("{}\n", "=".repeat(60));

    let (client_id, client_secret) = read_credentials()?;
    let config = OAuthConfig::new(client_id, client_secret)?
        .with_callback_port(args.port)
        .with_http_timeout(http_timeout_from_lookup(|key| std::env::var(key).ok()));
    let acquirer =
        TokenAcquirer::new(config)?.with_callback_timeout(args.timeout.map(Duration::from_secs));

    println!("Steps:");
    println!("  1. A browser window opens on the Tistory authorization page");
    println!("  2. Log in to Tistory and approve the app");
    println!("  3. The access token is shown here and in the browser\n");

    Input::<String>::new()
        .with_prompt("Press Enter when ready")
        .allow_empty(true)
        .interact_text()?;

    let server = CallbackServer::bind(args.port)?;
    let auth_url = acquirer.authorization_url();

    if args.no_browser {
        println!("\nOpen this URL in your browser:\n{}", auth_url);
    } else {
        println!("\nOpening browser...");
        if let Err(e) = open::that(&auth_url) {
            warn!("Failed to open browser: {}", e);
            println!("Could not open a browser. Open this URL manually:\n{}", auth_url);
        }
    }

    println!("Waiting for authorization (Ctrl-C to abort)...\n");
    let token = acquirer.acquire(&server, interrupted()).await?;
    info!("Access token acquired");

    println!("{}", "=".repeat(60));
    println!("ACCESS TOKEN ISSUED");
    println!("{}", "=".repeat(60));
    println!("\n{}\n", token);
    println!("{}", "=".repeat(60));
    println!("Store this token as a repository secret named {}", ENV_ACCESS_TOKEN);
    println!("{}\n", "=".repeat(60));

    Ok(token)
}

/// Environment first, interactive prompt otherwise. Blank answers are
/// rejected later by `OAuthConfig::new`.
fn read_credentials() -> Result<(String, String)> {
    let client_id = match std::env::var(ENV_CLIENT_ID) {
        Ok(id) if !id.trim().is_empty() => id,
        _ => Input::<String>::new()
            .with_prompt("Client ID")
            .allow_empty(true)
            .interact_text()?,
    };

    let client_secret = match std::env::var(ENV_CLIENT_SECRET) {
        Ok(secret) if !secret.trim().is_empty() => secret,
        _ => Password::new()
            .with_prompt("Secret Key")
            .allow_empty_password(true)
            .interact()?,
    };

    Ok((client_id, client_secret))
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = TokenArgs::try_parse_from(["get-tistory-token"]).unwrap();
        assert_eq!(args.port, 5000);
        assert_eq!(args.timeout, None);
        assert!(!args.no_browser);
    }

    #[test]
    fn test_overrides() {
        let args = TokenArgs::try_parse_from([
            "get-tistory-token",
            "--port",
            "8080",
            "--timeout",
            "120",
            "--no-browser",
        ])
        .unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.timeout, Some(120));
        assert!(args.no_browser);
    }
}
