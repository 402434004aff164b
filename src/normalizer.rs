use crate::model::{PriceValue, Product, RawProduct};
use crate::utils::to_kebab_case;
use serde_json::Value;

// Accepted source spellings per canonical field, first present wins.
const ID_FIELDS: &[&str] = &["id", "productId", "product_id"];
const NAME_FIELDS: &[&str] = &["name", "model", "title"];
const BRAND_FIELDS: &[&str] = &["brand", "manufacturer"];
const CURRENT_PRICE_FIELDS: &[&str] = &["currentPrice", "price", "current_price"];
const ORIGINAL_PRICE_FIELDS: &[&str] = &["originalPrice", "oldPrice", "original_price"];
const DISCOUNT_FIELDS: &[&str] = &["discount"];
const IMAGE_FIELDS: &[&str] = &["imageUrl", "image", "image_url", "img"];
const RETAILER_FIELDS: &[&str] = &["retailerCount", "retailer_count", "retailers"];

pub fn normalize_all(raw: &[RawProduct]) -> Vec<Product> {
    raw.iter().filter_map(normalize).collect()
}

/// Maps one raw record into the canonical shape. Returns `None` for non-object
/// records and for records without any name-like field; the caller drops those.
/// A record with a name but no identifier field gets a slug id derived from
/// the name, so every surviving product has a usable id.
pub fn normalize(raw: &RawProduct) -> Option<Product> {
    if !raw.is_object() {
        return None;
    }

    let name_field = first_present(raw, NAME_FIELDS)?;
    let name = value_to_string(name_field)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Smartphone".to_string());

    let id = coalesce_string(raw, ID_FIELDS).unwrap_or_else(|| to_kebab_case(&name));

    let mut specs = Vec::new();
    for keys in [&["storage"][..], &["ram"][..], &["display", "screen"][..]] {
        if let Some(spec) = coalesce_string(raw, keys) {
            specs.push(spec);
        }
    }

    Some(Product {
        id,
        name,
        brand: coalesce_string(raw, BRAND_FIELDS),
        current_price: coalesce_price(raw, CURRENT_PRICE_FIELDS)
            .unwrap_or_else(|| PriceValue::Text("N/A".to_string())),
        original_price: coalesce_price(raw, ORIGINAL_PRICE_FIELDS),
        discount: coalesce_string(raw, DISCOUNT_FIELDS),
        image_url: coalesce_string(raw, IMAGE_FIELDS),
        specs,
        retailer_count: coalesce_count(raw, RETAILER_FIELDS).unwrap_or(2),
    })
}

/// First field that is present with a non-null value.
fn first_present<'a>(raw: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    fields.iter().find_map(|field| match raw.get(*field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coalesce_string(raw: &Value, fields: &[&str]) -> Option<String> {
    first_present(raw, fields).and_then(value_to_string)
}

/// Numeric-looking values become amounts, anything else stays a display string.
fn coalesce_price(raw: &Value, fields: &[&str]) -> Option<PriceValue> {
    let value = first_present(raw, fields)?;
    match value {
        Value::Number(n) => n.as_f64().map(PriceValue::Amount),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => Some(PriceValue::Amount(amount)),
            _ => Some(PriceValue::Text(s.clone())),
        },
        _ => None,
    }
}

fn coalesce_count(raw: &Value, fields: &[&str]) -> Option<u32> {
    let value = first_present(raw, fields)?;
    match value {
        Value::Number(n) => n.as_u64().map(|v| v as u32),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
