//! keyecho binary - composition root.
//!
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML
//! 3. Initialize logging (stderr, so stdout stays a clean transcript)
//! 4. Run the requested command

mod cli;
mod replay;
mod script;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use keyecho_core::config::KeyechoConfig;
use keyecho_core::error::Result;
use keyecho_describer::DescriberOptions;

use cli::{CliArgs, Command};
use replay::{describe_diff, replay, ReplaySettings};

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_replay(
    config: &KeyechoConfig,
    script_path: &Path,
    settings: ReplaySettings,
) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(script_path)?;
    let entries = script::parse_script(&content)?;
    tracing::info!(
        path = %script_path.display(),
        entries = entries.len(),
        echo = %settings.echo,
        max_short_phrase_len = config.echo.max_short_phrase_len,
        "Replaying script"
    );
    Ok(replay(&entries, &settings))
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = if config_file.exists() {
        KeyechoConfig::load_or_default(&config_file)
    } else {
        KeyechoConfig::default()
    };

    init_logging(&args.resolve_log_level(&config.general.log_level));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    let lines = match args.command {
        Command::Replay {
            ref script,
            echo,
            multiline,
            password,
        } => {
            let settings = ReplaySettings {
                echo: echo.unwrap_or(config.echo.typing_echo),
                multiline,
                options: DescriberOptions {
                    password,
                    ..DescriberOptions::from_config(&config)
                },
            };
            run_replay(&config, script, settings)
        }
        Command::Diff { ref old, ref new } => Ok(describe_diff(old, new)),
    };

    match lines {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "keyecho failed");
            ExitCode::FAILURE
        }
    }
}
