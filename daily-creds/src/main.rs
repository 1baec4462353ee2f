//! daily-creds - One-time credential lookups for Dailycast
//!
//! These commands help obtain the values daily-post needs: the Facebook Page
//! access token and page id, a long-lived Facebook user token, and the
//! LinkedIn member id.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libdailycast::config::Config;
use libdailycast::credentials::{
    redact, GraphClient, LinkedInIdentity, PageAccount, REQUIRED_PAGE_PERMISSIONS,
};
use libdailycast::error::PlatformError;
use libdailycast::logging::LoggingConfig;
use secrecy::SecretString;
use tracing::error;

/// Characters of a token shown in listings
const TOKEN_PREVIEW_CHARS: usize = 50;

#[derive(Parser)]
#[command(name = "daily-creds")]
#[command(version)]
#[command(about = "Look up the platform credentials Dailycast needs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the Facebook Pages FACEBOOK_ACCESS_TOKEN can manage, with their page tokens
    FacebookPages {
        /// Highlight this page and print its ready-to-use token line
        #[arg(long)]
        page_id: Option<String>,
    },

    /// Exchange FACEBOOK_ACCESS_TOKEN for a long-lived user token, then list pages
    FacebookExchange {
        /// Facebook App ID (defaults to FACEBOOK_APP_ID)
        #[arg(long)]
        app_id: Option<String>,

        /// Read the app secret from stdin (for automation/agents)
        #[arg(long)]
        stdin: bool,

        /// Highlight this page and print its ready-to-use token line
        #[arg(long)]
        page_id: Option<String>,
    },

    /// Show the LinkedIn member id for LINKEDIN_ACCESS_TOKEN
    LinkedinWhoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env(cli.verbose).init();

    if let Err(e) = run_command(cli.command).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_command(command: Commands) -> Result<()> {
    let config = Config::load()?;

    match command {
        Commands::FacebookPages { page_id } => {
            facebook_pages(&config, page_id.as_deref()).await
        }
        Commands::FacebookExchange {
            app_id,
            stdin,
            page_id,
        } => facebook_exchange(&config, app_id, stdin, page_id.as_deref()).await,
        Commands::LinkedinWhoami => linkedin_whoami(&config).await,
    }
}

/// List pages for the configured user token
async fn facebook_pages(config: &Config, page_id: Option<&str>) -> Result<()> {
    let token = config
        .facebook
        .access_token
        .as_ref()
        .context("FACEBOOK_ACCESS_TOKEN not found in environment or .env")?;

    let graph = GraphClient::new(config.http_client(), &config.facebook.base_url);
    let target = page_id.or(config.facebook.page_id.as_deref());

    println!("Fetching your Facebook Pages...\n");
    list_pages(&graph, token, target).await
}

async fn facebook_exchange(
    config: &Config,
    app_id: Option<String>,
    use_stdin: bool,
    page_id: Option<&str>,
) -> Result<()> {
    let short_lived = config
        .facebook
        .access_token
        .as_ref()
        .context("FACEBOOK_ACCESS_TOKEN not found in environment or .env")?;

    let app_id = app_id
        .or_else(|| config.facebook.app_id.clone())
        .context("Facebook App ID required. Pass --app-id or set FACEBOOK_APP_ID")?;

    let app_secret = read_app_secret(use_stdin)?;

    let graph = GraphClient::new(config.http_client(), &config.facebook.base_url);

    println!("Exchanging for a long-lived user token...");
    let long_lived = graph
        .exchange_long_lived_token(&app_id, &app_secret, short_lived)
        .await
        .map_err(with_token_hints)?;

    println!("✓ Long-lived user token obtained");
    if let Some(seconds) = long_lived.expires_in {
        println!("  Expires in: {} days", seconds / 86_400);
    }
    println!("  Token: {}\n", redact(&long_lived.access_token, TOKEN_PREVIEW_CHARS));

    let user_token = SecretString::from(long_lived.access_token);
    let target = page_id.or(config.facebook.page_id.as_deref());
    list_pages(&graph, &user_token, target).await
}

fn read_app_secret(use_stdin: bool) -> Result<SecretString> {
    let value = if use_stdin {
        use std::io::{self, Read};
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer.trim().to_string()
    } else {
        rpassword::prompt_password("Facebook App Secret: ")?
    };

    if value.is_empty() {
        anyhow::bail!("App secret cannot be empty");
    }

    Ok(SecretString::from(value))
}

async fn list_pages(
    graph: &GraphClient,
    user_token: &SecretString,
    target: Option<&str>,
) -> Result<()> {
    let pages = graph.list_pages(user_token).await.map_err(with_token_hints)?;

    if pages.is_empty() {
        println!("No pages found. Make sure:");
        println!("  1. You are an admin of the page");
        println!(
            "  2. Your token has these permissions: {}",
            REQUIRED_PAGE_PERMISSIONS.join(", ")
        );
        return Ok(());
    }

    println!("Found {} page(s):\n", pages.len());
    for page in &pages {
        print_page(page, target);
    }

    if let Some(target) = target {
        match pages.iter().find(|p| p.id == target) {
            Some(page) => {
                println!("Use this in your environment or .env:");
                println!("FACEBOOK_ACCESS_TOKEN={}", page.access_token);
            }
            None => println!("Page {} is not among the pages this token manages", target),
        }
    }

    Ok(())
}

fn print_page(page: &PageAccount, target: Option<&str>) {
    let marker = if target == Some(page.id.as_str()) {
        " <- your page"
    } else {
        ""
    };

    println!("Page: {}{}", page.name, marker);
    println!("  ID: {}", page.id);
    println!(
        "  Access Token: {}",
        redact(&page.access_token, TOKEN_PREVIEW_CHARS)
    );
    if let Some(category) = &page.category {
        println!("  Category: {}", category);
    }
    println!();
}

async fn linkedin_whoami(config: &Config) -> Result<()> {
    let token = config
        .linkedin
        .access_token
        .as_ref()
        .context("LINKEDIN_ACCESS_TOKEN not found in environment or .env")?;

    let identity = LinkedInIdentity::new(config.http_client(), &config.linkedin.base_url);
    let info = identity.user_info(token).await.map_err(|e| {
        anyhow::anyhow!(
            "{}. The token needs the 'openid' and 'profile' scopes.",
            e
        )
    })?;

    if let Some(name) = &info.name {
        println!("Name: {}", name);
    }
    if let Some(email) = &info.email {
        println!("Email: {}", email);
    }
    println!("Person ID: {}", info.sub);
    println!("\nUse this in your environment or .env:");
    println!("LINKEDIN_PERSON_ID={}", info.sub);

    Ok(())
}

/// Attach remediation steps to Graph API token errors
fn with_token_hints(e: PlatformError) -> anyhow::Error {
    match e {
        PlatformError::Authentication(message) => anyhow::anyhow!(
            "Facebook rejected the token: {}\n\
             Fix:\n  \
             1. Open https://developers.facebook.com/tools/explorer/\n  \
             2. Select your app and click 'Generate Access Token'\n  \
             3. Grant: {}\n  \
             4. Copy the token into FACEBOOK_ACCESS_TOKEN",
            message,
            REQUIRED_PAGE_PERMISSIONS.join(", ")
        ),
        other => anyhow::Error::new(other),
    }
}
