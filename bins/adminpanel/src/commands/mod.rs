//! CLI command implementations

pub mod list;
pub mod raw;
pub mod summary;
pub mod write;

use adminpanel_api_client::Envelope;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section header
pub fn header(title: &str) {
    println!();
    println!("  {}", title.blue().bold());
    println!("  {}", "─".repeat(60).dimmed());
}

/// Status line for an envelope, colored by class
pub fn status_line(envelope: &Envelope) -> String {
    let status = envelope.status.to_string();
    if envelope.is_success() {
        status.green().to_string()
    } else if envelope.status.is_client_error() {
        status.yellow().to_string()
    } else {
        status.red().to_string()
    }
}

/// Print status and body of a response
pub fn print_envelope(envelope: &Envelope, with_headers: bool) -> Result<()> {
    println!("{} {}", "Status:".bold(), status_line(envelope));

    if with_headers {
        println!("{}", "Headers:".bold());
        for (name, value) in &envelope.headers {
            println!("  {}: {}", name.as_str().dimmed(), value.to_str().unwrap_or("<binary>"));
        }
    }

    if !envelope.body.is_null() {
        println!("{}", "Body:".bold());
        print_json(&envelope.body)?;
    }

    Ok(())
}
