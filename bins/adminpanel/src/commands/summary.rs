//! Summary command - refresh every collection and report counts

use super::{header, print_json};
use crate::OutputFormat;
use adminpanel_api_client::{AdminClient, Brand, Category, Product};
use adminpanel_telemetry::Timer;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// JSON output for summary
#[derive(Debug, Serialize)]
struct JsonSummary {
    brands: usize,
    categories: usize,
    products: usize,
    products_per_brand: BTreeMap<String, usize>,
    products_per_category: BTreeMap<String, usize>,
    elapsed_ms: u128,
}

/// Run summary command
pub async fn run(client: &AdminClient, format: OutputFormat) -> Result<()> {
    let (brand_api, category_api, product_api) =
        (client.brands(), client.categories(), client.products());

    let timer = Timer::start("summary");
    let (brands, categories, products) = tokio::try_join!(
        brand_api.refresh(),
        category_api.refresh(),
        product_api.refresh(),
    )?;
    let elapsed = timer.stop();

    if !(brands.accepted && categories.accepted && products.accepted) {
        debug!("A concurrent fetch superseded part of this summary");
    }

    let per_brand = count_by(&products, |p| p.brand_id, |id| brand_name(&brands, id));
    let per_category = count_by(&products, |p| p.category_id, |id| {
        category_name(&categories, id)
    });

    if format == OutputFormat::Json {
        return print_json(&JsonSummary {
            brands: brands.len(),
            categories: categories.len(),
            products: products.len(),
            products_per_brand: per_brand,
            products_per_category: per_category,
            elapsed_ms: elapsed.as_millis(),
        });
    }

    header("Catalog Summary");
    println!("  {:<14} {}", "Brands:", brands.len().to_string().bold());
    println!("  {:<14} {}", "Categories:", categories.len().to_string().bold());
    println!("  {:<14} {}", "Products:", products.len().to_string().bold());

    header("Products per brand");
    for (name, count) in &per_brand {
        println!("  {name:<28} {count}");
    }

    header("Products per category");
    for (name, count) in &per_category {
        println!("  {name:<28} {count}");
    }

    println!();
    println!("  {}", format!("Fetched in {}ms", elapsed.as_millis()).dimmed());
    Ok(())
}

/// Count products by a foreign key, labelled by `name_of`
fn count_by(
    products: &[Product],
    key: impl Fn(&Product) -> i64,
    name_of: impl Fn(i64) -> String,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        *counts.entry(name_of(key(product))).or_insert(0) += 1;
    }
    counts
}

fn brand_name(brands: &[Brand], id: i64) -> String {
    brands
        .iter()
        .find(|b| b.id == id)
        .map_or_else(|| format!("#{id} (unknown)"), |b| b.name.clone())
}

fn category_name(categories: &[Category], id: i64) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or_else(|| format!("#{id} (unknown)"), |c| c.name.clone())
}
