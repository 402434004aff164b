// ui/console/renderer.rs

use crate::catalog::{PageControl, page_window};
use crate::model::Product;
use crate::ui::{PageMeta, Severity};
use crate::utils::truncate;

pub fn render_page(products: &[Product], meta: &PageMeta) {
    println!();
    println!(
        "📱 Smartphone deals — page {}/{} · {} products · sort: {}",
        meta.page,
        meta.total_pages,
        meta.total_products,
        meta.sort_by.as_str()
    );
    println!();
    for product in products {
        render_card(product);
    }
    println!("Pages: {}", pagination_line(meta.page, meta.total_pages));
}

fn render_card(product: &Product) {
    let brand = product
        .brand
        .as_deref()
        .map(|b| format!(" · {b}"))
        .unwrap_or_default();
    println!("  {}{}", truncate(&product.name, 48), brand);

    let mut price_line = format!("    💰 {}", product.current_price);
    if let Some(original) = &product.original_price {
        price_line.push_str(&format!("  (was {original})"));
    }
    if let Some(discount) = &product.discount {
        price_line.push_str(&format!("  {discount} off"));
    }
    println!("{price_line}");

    if !product.specs.is_empty() {
        println!("    🔧 {}", product.specs.join(" | "));
    }
    println!(
        "    🏬 {} retailers · id: {}",
        product.retailer_count, product.id
    );
    println!();
}

pub fn render_empty(reason: Option<&str>) {
    match reason {
        Some(reason) => println!("📭 No deals available ({reason}). Type /refresh to retry."),
        None => println!("📭 No deals available right now. Type /refresh to retry."),
    }
}

pub fn render_toast(title: &str, message: &str, severity: Severity) {
    let icon = match severity {
        Severity::Info => "ℹ️",
        Severity::Success => "✅",
        Severity::Warning => "⚠️",
        Severity::Error => "❌",
    };
    println!("{icon} {title}: {message}");
}

/// Control row with the current page bracketed, e.g. `1 … 4 [5] 6 … 12`.
pub fn pagination_line(current: usize, total_pages: usize) -> String {
    page_window(current, total_pages)
        .iter()
        .map(|control| match control {
            PageControl::Page(p) if *p == current => format!("[{p}]"),
            PageControl::Page(p) => p.to_string(),
            PageControl::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_line_brackets_the_current_page() {
        assert_eq!(pagination_line(5, 12), "1 … 3 4 [5] 6 7 … 12");
        assert_eq!(pagination_line(1, 3), "[1] 2 3");
    }
}
