//! Create/update/delete commands

use super::{print_envelope, print_json};
use crate::OutputFormat;
use adminpanel_api_client::endpoints::products::FILE_FIELD;
use adminpanel_api_client::{AdminClient, RequestBody};
use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Parse a `key=value` form field argument
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty field name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("Invalid JSON body: {raw}"))
}

/// Build a multipart form from text fields and files on disk
fn build_form(fields: Vec<(String, String)>, files: &[PathBuf]) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in fields {
        form = form.text(key, value);
    }
    for path in files {
        form = form.part(FILE_FIELD, file_part(path)?);
    }
    Ok(form)
}

fn file_part(path: &Path) -> Result<Part> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(Part::bytes(bytes).file_name(name))
}

/// Run create command
pub async fn create(
    client: &AdminClient,
    path: &str,
    json: Option<&str>,
    files: &[PathBuf],
    fields: Vec<(String, String)>,
    format: OutputFormat,
) -> Result<()> {
    let body: RequestBody = match json {
        Some(raw) => parse_json(raw)?.into(),
        None if !files.is_empty() || !fields.is_empty() => build_form(fields, files)?.into(),
        None => bail!("Nothing to send: pass --json, or --file/--field for a multipart upload"),
    };

    let multipart = body.is_multipart();
    let created: Value = client.post(path, body).await?;
    report("Created", path, multipart, &created, format)
}

/// Run update command
pub async fn update(client: &AdminClient, path: &str, raw: &str, format: OutputFormat) -> Result<()> {
    let body = parse_json(raw)?;
    let updated: Value = client.update(path, &body).await?;
    report("Updated", path, false, &updated, format)
}

/// Run delete command
pub async fn delete(client: &AdminClient, path: &str, format: OutputFormat) -> Result<()> {
    let envelope = client.delete(path).await?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "status": envelope.status.as_u16(),
            "body": envelope.body,
        })),
        OutputFormat::Text => print_envelope(&envelope, false),
    }
}

fn report(verb: &str, path: &str, multipart: bool, body: &Value, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(body);
    }

    let via = if multipart { " (multipart)" } else { "" };
    println!("{} {} {}{}", "✓".green(), verb, path.bold(), via.dimmed());
    print_json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("product_name=Air Max").unwrap(),
            ("product_name".to_string(), "Air Max".to_string())
        );
        assert_eq!(parse_field("note=a=b").unwrap().1, "a=b");
        assert!(parse_field("no-separator").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_parse_json_error_mentions_body() {
        let err = parse_json("{not json").unwrap_err();
        assert!(format!("{err:#}").contains("Invalid JSON body"));
    }

    #[test]
    fn test_build_form_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("shoe.png");
        std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

        let form = build_form(vec![("brand_id".into(), "1".into())], &[image]);
        assert!(form.is_ok());

        let missing = build_form(Vec::new(), &[dir.path().join("missing.png")]);
        let err = missing.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read"));
    }
}
