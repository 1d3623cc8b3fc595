//! Tiles command implementation.

use super::output::{JsonCatalogEntry, format_catalog_text};
use super::{CliError, OutputFormat};
use tigerzone::game::catalog;

/// Execute the tiles command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn execute(format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => print!("{}", format_catalog_text(catalog::catalog())),
        OutputFormat::Json => {
            let entries: Vec<_> = catalog::catalog()
                .iter()
                .map(JsonCatalogEntry::from_entry)
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
