//! daily-post - Generate today's post and publish it

use chrono::Local;
use clap::Parser;
use libdailycast::generator::OpenAiGenerator;
use libdailycast::logging::{LogFormat, LoggingConfig};
use libdailycast::prompts;
use libdailycast::runner::create_platforms;
use libdailycast::types::PublishOutcome;
use libdailycast::{Config, DailycastError, Destination, Result, RunReport, Runner};
use tracing::info;

const SEPARATOR_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "daily-post")]
#[command(version)]
#[command(about = "Generate a post with a language model and publish it")]
#[command(long_about = "\
daily-post - Generate a post with a language model and publish it

DESCRIPTION:
    daily-post fills a built-in prompt template with today's date, asks an
    OpenAI-compatible chat completions endpoint for the text, prints it,
    and publishes it to the selected destinations one after another.

    A destination without credentials is skipped. A failure at one
    destination does not stop the next one.

USAGE:
    # Tech news to Twitter and LinkedIn
    daily-post both

    # Hindi news to the Facebook page (the template's default)
    daily-post --prompt hindi-news

    # Generate and print only
    daily-post --prompt motivational --dry-run

DESTINATIONS:
    twitter, linkedin, facebook
    both  - twitter and linkedin
    all   - twitter, linkedin and facebook

CONFIGURATION:
    Secrets are read from the environment or a .env file:
    OPENAI_API_KEY, TWITTER_API_KEY, TWITTER_API_SECRET,
    TWITTER_ACCESS_TOKEN, TWITTER_ACCESS_SECRET, LINKEDIN_ACCESS_TOKEN,
    LINKEDIN_PERSON_ID, FACEBOOK_ACCESS_TOKEN, FACEBOOK_PAGE_ID

    Optional settings file: ~/.config/dailycast/config.toml
    (override with DAILYCAST_CONFIG)

EXIT CODES:
    0 - Run completed (individual destinations may have failed)
    1 - Configuration or generation error
    2 - Invalid command line
    3 - Unknown prompt template
")]
struct Cli {
    /// Where to publish (twitter, linkedin, facebook, both, all)
    #[arg(value_name = "DESTINATION")]
    destination: Option<Destination>,

    /// Prompt template to use
    #[arg(short, long, default_value = "tech-news")]
    prompt: String,

    /// Generate and print the content without publishing
    #[arg(long)]
    dry_run: bool,

    /// List the built-in prompt templates and exit
    #[arg(long)]
    list_prompts: bool,

    /// Log format (text, json, pretty)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env(cli.verbose);
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    logging.init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.list_prompts {
        list_prompts();
        return Ok(());
    }

    let template = prompts::find(&cli.prompt)?;
    let destination = cli.destination.unwrap_or(template.default_destination);

    let config = Config::load()?;
    let http_client = config.http_client();
    let generator = OpenAiGenerator::from_config(&config.openai, http_client.clone())?;
    let today = Local::now().date_naive();

    if cli.dry_run {
        let runner = Runner::new(Box::new(generator), Vec::new());
        let content = runner.preview(template, today).await?;
        print_content(&content);
        return Ok(());
    }

    let platforms = create_platforms(&config, &http_client, &destination.targets());
    let runner = Runner::new(Box::new(generator), platforms);

    info!(
        "Running '{}' for {} ({})",
        template.name,
        destination,
        template.format_date(today)
    );

    let report = runner.run_with(template, today, print_content).await;
    if let Some(e) = report.generation_error {
        return Err(DailycastError::Generation(e));
    }

    print_summary(&report);
    println!("\nRun completed.");

    Ok(())
}

fn list_prompts() {
    for template in prompts::BUILTIN {
        println!(
            "{:<22}{} (default: {})",
            template.name, template.description, template.default_destination
        );
    }
}

fn print_content(content: &str) {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    println!("\nGenerated Content:");
    println!("{}", separator);
    println!("{}", content);
    println!("{}\n", separator);
}

fn print_summary(report: &RunReport) {
    println!("Results:");
    for result in &report.results {
        let name = result.target.display_name();
        match &result.outcome {
            PublishOutcome::Posted { remote_id: Some(id) } => {
                println!("  ✓ {}: posted ({})", name, id)
            }
            PublishOutcome::Posted { remote_id: None } => println!("  ✓ {}: posted", name),
            PublishOutcome::Skipped { reason } => println!("  - {}: skipped ({})", name, reason),
            PublishOutcome::Failed { detail } => println!("  ✗ {}: failed ({})", name, detail),
        }
    }
}
