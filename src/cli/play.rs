//! Play command implementation.

use super::output::format_game_text;
use super::{CliError, OutputFormat, load_config, seed_or_clock};
use std::fs;
use std::path::PathBuf;
use tigerzone::simulate::run_game;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the game fails.
pub(crate) fn execute(
    seed: Option<u64>,
    config: Option<PathBuf>,
    tiger_rate: Option<f64>,
    crocodile_rate: Option<f64>,
    format: OutputFormat,
    save: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut config = load_config(config.as_deref())?;
    if let Some(rate) = tiger_rate {
        config.tiger_rate = rate;
    }
    if let Some(rate) = crocodile_rate {
        config.crocodile_rate = rate;
    }
    let seed = seed_or_clock(seed);

    let result = run_game(seed, &config)?;

    if let Some(save_path) = save {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(&save_path, json).map_err(|e| {
            CliError::new(format!("Failed to save {}: {e}", save_path.display()))
        })?;
    }

    match format {
        OutputFormat::Text => print!("{}", format_game_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
