// src/main.rs
use clap::Parser;
use mia_win_notifier::{self, *};
use tokio::runtime::Runtime;

/// Main entry point for the notifier
///
/// # Returns
/// - `Ok(())` on successful execution
/// - `Err(NotifierError)` if any operation fails
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Delegates to appropriate subcommand handler
/// 3. Propagates any errors upward
fn main() -> Result<(), NotifierError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Check(opts) => check(opts),
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Runs one win check
///
/// # Operations
/// 1. Initializes logging
/// 2. Resolves the trigger event from `--event` or `--prod`
/// 3. Loads configuration and opens the win state file
/// 4. Runs the check against the live stats API and Discord
fn check(opts: cli::CheckOptions) -> Result<(), NotifierError> {
    if opts.verbose {
        utils::init_verbose_logging();
    } else {
        utils::init_logging();
    }

    let event = match opts.event.as_deref() {
        Some(payload) => TriggerEvent::parse(payload)?,
        None => TriggerEvent { prod: opts.prod },
    };

    let config = config::load(&opts.config)?;
    let settings = Settings::from_provider(&config)?;
    let mut state = FileWinState::new(&opts.state);
    let source = StatsApiClient::new(&settings.stats_api_url)?;
    let notifier = DiscordWebhook::new();

    let rt = Runtime::new()?;
    let outcome = rt
        .block_on(run(event, &settings, &mut state, &source, &notifier))
        .inspect_err(|e| log::error!("run failed: {}", e))?;

    match outcome {
        RunOutcome::NothingNew { newest_win } => {
            log::info!("nothing to announce (newest win {})", newest_win)
        }
        RunOutcome::Announced { report, prod } => {
            log::info!("announced block {} (prod: {})", report.height, prod)
        }
    }

    Ok(())
}

/// Generates configuration template file
///
/// # Arguments
/// * `opts` - Configuration generation options
fn generate_config(opts: cli::ConfigOptions) -> Result<(), NotifierError> {
    std::fs::write(opts.output, config::generate_template())?;
    Ok(())
}
