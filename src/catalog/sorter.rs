use crate::model::Product;

/// Sort criteria accepted from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Default ordering; sorts identically to `PriceAsc`.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    BrandAsc,
    BrandDesc,
}

impl SortKey {
    /// Parses the wire string. Unknown values fall back to relevance.
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "brand-asc" => SortKey::BrandAsc,
            "brand-desc" => SortKey::BrandDesc,
            _ => SortKey::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::BrandAsc => "brand-asc",
            SortKey::BrandDesc => "brand-desc",
        }
    }
}

/// Returns a sorted copy; the input is left untouched. The underlying sort is
/// stable, so equal keys keep their fetched relative order.
pub fn sort(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Relevance | SortKey::PriceAsc => {
            sorted.sort_by(|a, b| price_of(a).total_cmp(&price_of(b)));
        }
        SortKey::PriceDesc => {
            sorted.sort_by(|a, b| price_of(b).total_cmp(&price_of(a)));
        }
        SortKey::BrandAsc => {
            sorted.sort_by(|a, b| brand_of(a).cmp(&brand_of(b)));
        }
        SortKey::BrandDesc => {
            sorted.sort_by(|a, b| brand_of(b).cmp(&brand_of(a)));
        }
    }
    sorted
}

// Non-numeric prices order as 0, missing brands as the empty string.
fn price_of(product: &Product) -> f64 {
    product.current_price.or_zero()
}

fn brand_of(product: &Product) -> String {
    product.brand.as_deref().unwrap_or("").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceValue;

    fn product(id: &str, price: Option<f64>, brand: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Phone {id}"),
            brand: brand.map(str::to_string),
            current_price: price
                .map(PriceValue::Amount)
                .unwrap_or_else(|| PriceValue::Text("N/A".to_string())),
            original_price: None,
            discount: None,
            image_url: None,
            specs: Vec::new(),
            retailer_count: 2,
        }
    }

    #[test]
    fn output_is_a_permutation_of_the_input() {
        let input = vec![
            product("a", Some(300.0), Some("Acme")),
            product("b", None, None),
            product("c", Some(100.0), Some("Zeta")),
        ];
        for key in [
            SortKey::Relevance,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::BrandAsc,
            SortKey::BrandDesc,
        ] {
            let sorted = sort(&input, key);
            assert_eq!(sorted.len(), input.len());
            for p in &input {
                assert!(sorted.iter().any(|s| s.id == p.id));
            }
        }
        // input untouched
        assert_eq!(input[0].id, "a");
    }

    #[test]
    fn price_desc_reverses_price_asc_for_unique_prices() {
        let input = vec![
            product("a", Some(500.0), None),
            product("b", Some(100.0), None),
            product("c", Some(300.0), None),
        ];
        let asc = sort(&input, SortKey::PriceAsc);
        let mut desc = sort(&asc, SortKey::PriceDesc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn missing_price_sorts_as_zero() {
        let input = vec![product("a", Some(50.0), None), product("b", None, None)];
        let sorted = sort(&input, SortKey::PriceAsc);
        assert_eq!(sorted[0].id, "b");
    }

    #[test]
    fn brand_sort_is_case_insensitive_with_missing_as_empty() {
        let input = vec![
            product("a", None, Some("zeta")),
            product("b", None, Some("Acme")),
            product("c", None, None),
        ];
        let sorted = sort(&input, SortKey::BrandAsc);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn equal_keys_keep_fetched_order() {
        let input = vec![
            product("first", Some(200.0), None),
            product("second", Some(200.0), None),
            product("third", Some(200.0), None),
        ];
        let sorted = sort(&input, SortKey::PriceAsc);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn relevance_matches_price_asc() {
        let input = vec![
            product("a", Some(900.0), None),
            product("b", Some(100.0), None),
        ];
        assert_eq!(sort(&input, SortKey::Relevance), sort(&input, SortKey::PriceAsc));
    }

    #[test]
    fn unknown_wire_string_parses_as_relevance() {
        assert_eq!(SortKey::parse("price-desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("rating"), SortKey::Relevance);
        assert_eq!(SortKey::parse(""), SortKey::Relevance);
    }
}
