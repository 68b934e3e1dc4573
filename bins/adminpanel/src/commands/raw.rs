//! Raw GET - print the full response envelope

use super::{print_envelope, print_json};
use crate::OutputFormat;
use adminpanel_api_client::AdminClient;
use anyhow::Result;
use serde_json::json;

/// Run raw command
pub async fn run(client: &AdminClient, path: &str, format: OutputFormat) -> Result<()> {
    let envelope = client.get_origin(path).await?;

    match format {
        OutputFormat::Json => {
            let headers: serde_json::Map<String, serde_json::Value> = envelope
                .headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        json!(value.to_str().unwrap_or_default()),
                    )
                })
                .collect();

            print_json(&json!({
                "status": envelope.status.as_u16(),
                "headers": headers,
                "body": envelope.body,
            }))
        }
        OutputFormat::Text => print_envelope(&envelope, true),
    }
}
