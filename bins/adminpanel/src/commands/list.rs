//! List command - fetch one collection into the store and print it

use super::{header, print_json};
use crate::OutputFormat;
use adminpanel_api_client::{AdminClient, Brand, Category, EntityKind, Product};
use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::debug;

/// Run list command
pub async fn run(client: &AdminClient, kind: EntityKind, format: OutputFormat) -> Result<()> {
    let accepted = client.fetch_into_store(kind).await?;
    debug!(kind = %kind, accepted, "Fetched collection");

    let store = client.store();
    match (kind, format) {
        (EntityKind::Brand, OutputFormat::Json) => print_json(&*store.brand_list()),
        (EntityKind::Category, OutputFormat::Json) => print_json(&*store.category_list()),
        (EntityKind::Product, OutputFormat::Json) => print_json(&*store.product_list()),
        (EntityKind::Brand, OutputFormat::Text) => {
            print_brands(&store.brand_list());
            Ok(())
        }
        (EntityKind::Category, OutputFormat::Text) => {
            print_categories(&store.category_list());
            Ok(())
        }
        (EntityKind::Product, OutputFormat::Text) => {
            print_products(&store.product_list());
            Ok(())
        }
    }
}

fn print_brands(brands: &[Brand]) {
    header(&format!("Brands ({})", brands.len()));
    println!("  {:<8} {}", "ID".dimmed(), "Name".dimmed());
    for brand in brands {
        println!("  {:<8} {}", brand.id, brand.name);
    }
    println!();
}

fn print_categories(categories: &[Category]) {
    header(&format!("Categories ({})", categories.len()));
    println!("  {:<8} {}", "ID".dimmed(), "Name".dimmed());
    for category in categories {
        println!("  {:<8} {}", category.id, category.name);
    }
    println!();
}

fn print_products(products: &[Product]) {
    header(&format!("Products ({})", products.len()));
    println!(
        "  {:<6} {:<28} {:<6} {:<6} {:<8} {:<5} {:>6} {}",
        "ID".dimmed(),
        "Name".dimmed(),
        "Brand".dimmed(),
        "Cat".dimmed(),
        "Sex".dimmed(),
        "Kids".dimmed(),
        "Sold".dimmed(),
        "Files".dimmed()
    );
    for product in products {
        let kids = if product.is_kids { "yes" } else { "no" };
        println!(
            "  {:<6} {:<28} {:<6} {:<6} {:<8} {:<5} {:>6} {}",
            product.id,
            truncate(&product.name, 28),
            product.brand_id,
            product.category_id,
            product.sex,
            kids,
            product.sales_quantity,
            product.file_paths.len()
        );
    }
    println!();
}

/// Cut `s` to at most `max` characters, marking the cut with `…`
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Air Max", 28), "Air Max");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("운동화운동화", 3).chars().count(), 3);
    }
}
