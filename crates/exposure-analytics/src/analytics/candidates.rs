//! Brand candidate extraction for the suggestion buttons.
//!
//! This deliberately re-parses the raw text with a simpler rule set than
//! the dashboard parser: a plain comma split and the exact header name
//! `brand_name` only. It exists solely to prime the UI's suggestion
//! buttons, so when the simplified parse fails the result is an empty
//! list, never an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Maximum number of brand suggestions returned.
pub const MAX_BRAND_SUGGESTIONS: usize = 15;

/// Entities that show up as detected "brands" in broadcast exports but are
/// not commercial sponsors: cricket organizations, countries, tournaments,
/// player names, and generic product taglines. Not exhaustive and not
/// user-configurable.
static EXCLUDED_BRANDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "icc",
        "bcci",
        "5g",
        "india",
        "australia",
        "world cup",
        "asia cup",
        "virat",
        "babar",
    ]
});

/// Returns true when a brand's lower-cased form is in the fixed exclusion
/// set and should never be offered as a candidate.
pub fn is_excluded_brand(brand: &str) -> bool {
    let lowered = brand.to_lowercase();
    EXCLUDED_BRANDS.iter().any(|excluded| *excluded == lowered)
}

/// Extracts up to [`MAX_BRAND_SUGGESTIONS`] distinct brand names from raw
/// CSV text, sorted by frequency descending (ties keep first-encountered
/// order), with excluded entities filtered out.
pub fn suggest_brands(raw_text: &str) -> Vec<String> {
    let mut lines = raw_text.trim().lines();

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let Some(brand_index) = header.split(',').position(|cell| cell.trim() == "brand_name") else {
        return Vec::new();
    };

    // Count occurrences while preserving first-seen order for tie-breaks.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() <= brand_index {
            continue;
        }
        let brand = fields[brand_index].trim();
        if brand.is_empty() {
            continue;
        }
        counts
            .entry(brand.to_string())
            .and_modify(|c| *c += 1)
            .or_insert_with(|| {
                order.push(brand.to_string());
                1
            });
    }

    let mut ranked: Vec<(String, u64)> = order
        .into_iter()
        .filter(|brand| !is_excluded_brand(brand))
        .map(|brand| {
            let count = counts[&brand];
            (brand, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(MAX_BRAND_SUGGESTIONS);
    ranked.into_iter().map(|(brand, _)| brand).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_excluded_brand_check_is_case_insensitive() {
        assert!(is_excluded_brand("ICC"));
        assert!(is_excluded_brand("icc"));
        assert!(is_excluded_brand("World Cup"));
        assert!(!is_excluded_brand("Pepsi"));
    }

    #[test]
    fn test_suggestions_sorted_by_frequency() {
        let csv = "brand_name,c_li,ad_category\n\
            Pepsi,0.1,Jersey\n\
            Dream11,0.1,Jersey\n\
            Dream11,0.1,Jersey\n\
            Dream11,0.1,Jersey\n\
            Pepsi,0.1,Jersey\n";
        assert_eq!(suggest_brands(csv), vec!["Dream11", "Pepsi"]);
    }

    #[test]
    fn test_icc_never_suggested_regardless_of_frequency() {
        let mut csv = String::from("brand_name,c_li,ad_category\n");
        for _ in 0..100 {
            csv.push_str("ICC,0.1,Graphic\n");
        }
        csv.push_str("Pepsi,0.1,Jersey\n");
        assert_eq!(suggest_brands(&csv), vec!["Pepsi"]);
    }

    #[test]
    fn test_suggestions_capped_at_fifteen() {
        let mut csv = String::from("brand_name,c_li,ad_category\n");
        for i in 0..40 {
            csv.push_str(&format!("Brand{i},0.1,Jersey\n"));
        }
        assert_eq!(suggest_brands(&csv).len(), MAX_BRAND_SUGGESTIONS);
    }

    #[test]
    fn test_exact_header_name_required() {
        // The simplified extractor does not do alias or case folding.
        let csv = "Brand_Name,c_li,ad_category\nPepsi,0.1,Jersey\n";
        assert!(suggest_brands(csv).is_empty());
    }

    #[test]
    fn test_empty_input_yields_no_suggestions() {
        assert!(suggest_brands("").is_empty());
        assert!(suggest_brands("brand_name,c_li\n").is_empty());
    }

    #[test]
    fn test_short_rows_ignored() {
        let csv = "x,brand_name\nonly_one_field\n1,Pepsi\n";
        assert_eq!(suggest_brands(csv), vec!["Pepsi"]);
    }
}
