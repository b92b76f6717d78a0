//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use super::NetworkSummary;
use colored::Colorize;
use itertools::Itertools;

/// Width of the label column.
const LABEL_WIDTH: usize = 12;

/// Quote `value` and right-align it to `width` columns.
///
/// Values longer than `width` are returned quoted but unpadded.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Quote every host and pad them all to the widest one.
fn host_column(hosts: &[String]) -> impl Iterator<Item = String> + '_ {
    let width = hosts.iter().map(|h| h.len() + 2).max().unwrap_or(0);
    hosts.iter().map(move |h| format_field(h, width))
}

fn label_line(label: &str, value: impl ToString) -> String {
    format!(
        "{label} {value}",
        label = format!("{label:<LABEL_WIDTH$}").bold().cyan(),
        value = value.to_string()
    )
}

/// Render a summary as labelled lines for the terminal.
pub fn summary_lines(summary: &NetworkSummary) -> Vec<String> {
    let mut lines = vec![
        label_line("CIDR:", summary.cidr.green()),
        label_line("Version:", summary.version),
        label_line("Netmask:", &summary.netmask),
        label_line("Network:", &summary.network),
        label_line("Broadcast:", &summary.broadcast),
        label_line("First host:", &summary.first_host),
        label_line(
            "Last host:",
            summary.last_host.as_deref().unwrap_or("none"),
        ),
        label_line("Size:", summary.size),
    ];

    if !summary.hosts.is_empty() {
        let mut hosts = host_column(&summary.hosts).join(", ");
        if summary.hosts_truncated {
            hosts.push_str(&format!(", {}", "...".yellow()));
        }
        lines.push(label_line("Hosts:", hosts));
    }

    lines
}
