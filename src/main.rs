//! Framecast - ASCII game multiplexer for chat bots
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use framecast::chat::{ChatOutbound, ConsoleOutbound, SESSION_LIMIT_NOTICE};
use framecast::cli::{Cli, Commands, ConfigAction, ConfigArgs, RunArgs};
use framecast::config::{Config, ConfigManager};
use framecast::engine::{DemoEngine, SnapshotStore};
use framecast::error::{FramecastError, FramecastResult};
use framecast::session::manager::{EngineFactory, SessionManager};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> FramecastResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("framecast=warn"),
        1 => EnvFilter::new("framecast=info"),
        _ => EnvFilter::new("framecast=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let config = config_manager.load().await?;
    config
        .validate()
        .map_err(|reason| FramecastError::ConfigInvalid {
            path: config_manager.path().to_path_buf(),
            reason,
        })?;

    match cli.command {
        Commands::Run(args) => run_driver(args, &config).await,
        Commands::Config(args) => config_command(args, &config_manager, &config).await,
    }
}

/// The driving loop: tick the manager at a fixed cadence until
/// cancelled or the tick budget runs out
async fn run_driver(args: RunArgs, config: &Config) -> FramecastResult<()> {
    ConfigManager::ensure_state_dirs().await?;

    let outbound: Arc<dyn ChatOutbound> = Arc::new(ConsoleOutbound::new());
    let factory: EngineFactory = Box::new(|| Box::new(DemoEngine::new()));
    let mut manager = SessionManager::new(config, factory, outbound);

    let origin = tokio::time::Instant::now();
    for index in 0..args.demo_users {
        let user = format!("demo-user-{index}");
        match manager
            .create_session(&user, origin.elapsed().as_secs_f64())
            .await
        {
            Ok(_) => {}
            Err(e @ FramecastError::SessionLimit { .. }) => {
                warn!(user = %user, "{SESSION_LIMIT_NOTICE}");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        sessions = manager.session_count(),
        cadence = config.pacing.update_rate,
        "Driver started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs_f64(config.pacing.update_rate));
    let mut ticks = 0u64;
    loop {
        // The tick future (pacing sleeps included) must stay
        // interruptible by Ctrl-C, so it lives inside the select.
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "Signal handler failed, shutting down");
                }
                info!("Shutdown requested");
                break;
            }
            _ = async {
                interval.tick().await;
                let now = origin.elapsed().as_secs_f64();
                manager.update_all(now, config.pacing.update_rate).await;
            } => {
                ticks += 1;
                if args.ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
        }
    }

    // Persist final state before teardown so a later session can resume
    let save_dir = config
        .session
        .save_dir
        .clone()
        .unwrap_or_else(ConfigManager::saves_dir);
    let store = SnapshotStore::new(save_dir);
    for user in manager.users() {
        if let Some(session) = manager.get_session(&user) {
            match session.save_state().await {
                Ok(state) => {
                    if let Err(e) = store.save(&state).await {
                        warn!(user = %user, error = %e, "Snapshot save failed");
                    }
                }
                Err(e) => warn!(user = %user, error = %e, "State capture failed"),
            }
        }
    }

    manager.shutdown().await;
    info!(ticks, "Driver stopped");
    Ok(())
}

async fn config_command(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
) -> FramecastResult<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", manager.path().display());
            Ok(())
        }
        ConfigAction::Init { force } => {
            if manager.path().exists() && !force {
                return Err(FramecastError::Internal(format!(
                    "config already exists at {} (use --force to overwrite)",
                    manager.path().display()
                )));
            }
            manager.save(&Config::default()).await?;
            println!("Wrote default config to {}", manager.path().display());
            Ok(())
        }
    }
}
