// Utility functions

/// Converts free text to a kebab-case slug. Used as a fallback product id for
/// records that carry a name but no identifier field.
pub fn to_kebab_case(text: &str) -> String {
    text.to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "-")
        .trim_matches('-')
        .to_string()
}

/// Truncates to at most `max` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_slugs() {
        assert_eq!(to_kebab_case("Galaxy S24 Ultra"), "galaxy-s24-ultra");
        assert_eq!(to_kebab_case("  Pixel 8a  "), "pixel-8a");
        assert_eq!(to_kebab_case("iPhone 15 (Pro)"), "iphone-15--pro");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer name here", 8), "a longe…");
    }
}
