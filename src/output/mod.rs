//! Output formatting for network summaries.
//!
//! This module handles formatting and outputting calculation results:
//! - [`summary`] - collected values of one network
//! - [`terminal`] - terminal output with colors

mod summary;
mod terminal;

pub use summary::NetworkSummary;
pub use terminal::{format_field, summary_lines};

use crate::config::OutputFormat;
use std::error::Error;

/// Print a summary to stdout in the requested format.
pub fn print_summary(summary: &NetworkSummary, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => {
            for line in summary_lines(summary) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| format!("Error serializing summary: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}
