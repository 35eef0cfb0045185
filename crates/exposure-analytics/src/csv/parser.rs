//! Parser and normalizer for per-frame brand exposure CSVs.
//!
//! # Contract
//!
//! Given raw UTF-8 text, produce an [`ExposureDataset`] or fail with
//! [`AnalyticsError::MissingColumns`] naming every required logical column
//! that could not be resolved. Individual malformed rows are dropped
//! silently (debug-logged); they never abort the parse.
//!
//! # Header resolution
//!
//! Header cells are lower-cased and quote-stripped, then each logical
//! column is looked up against an ordered alias list; the first alias that
//! matches wins. Resolution happens once per dataset and the resulting
//! [`ColumnLayout`] is reused for every row.

use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::types::{ColumnLayout, ExposureDataset, ExposureRecord};

/// Accepted aliases for each logical column, in priority order.
const BRAND_ALIASES: &[&str] = &["brand_name"];
const COVERAGE_ALIASES: &[&str] = &["c_li"];
const CATEGORY_ALIASES: &[&str] = &["ad_category", "ad_categories"];

/// Optional columns feed the best-frame prompt context; absence is fine.
const DETAIL_ALIASES: &[&str] = &["ad_details", "ad_detail"];
const DESCRIPTION_ALIASES: &[&str] = &["general description", "description"];
const FRAME_ALIASES: &[&str] = &["frame_no", "frame_number"];

/// Splits one CSV line into fields without breaking inside quoted spans.
///
/// A comma is honored as a field boundary only when it is followed by an
/// even number of `"` characters through the end of the line. This matches
/// the behavior of the lookahead split the broadcast exports were designed
/// against and keeps `"Jersey, front"` as a single field.
pub fn split_line(line: &str) -> Vec<String> {
    let mut quotes_remaining = line.chars().filter(|&c| c == '"').count();
    let mut fields = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        match ch {
            '"' => {
                quotes_remaining -= 1;
                current.push(ch);
            }
            ',' if quotes_remaining % 2 == 0 => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Strips every quote character and surrounding whitespace from a cell.
fn clean_cell(cell: &str) -> String {
    cell.replace('"', "").trim().to_string()
}

/// Finds the index of the first header matching any of `aliases`.
///
/// `headers` must already be normalized (lower-cased, quote-stripped).
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        if let Some(index) = headers.iter().position(|h| h == alias) {
            return Some(index);
        }
    }
    None
}

/// Resolves the column layout from the header row, or reports every
/// required column that is missing.
fn resolve_layout(header_cells: &[String]) -> Result<ColumnLayout> {
    let normalized: Vec<String> = header_cells
        .iter()
        .map(|h| clean_cell(h).to_lowercase())
        .collect();

    let brand = find_column(&normalized, BRAND_ALIASES);
    let coverage = find_column(&normalized, COVERAGE_ALIASES);
    let category = find_column(&normalized, CATEGORY_ALIASES);

    if brand.is_none() || coverage.is_none() || category.is_none() {
        let mut missing = Vec::new();
        if brand.is_none() {
            missing.push("brand_name".to_string());
        }
        if coverage.is_none() {
            missing.push("c_li".to_string());
        }
        if category.is_none() {
            missing.push("ad_category".to_string());
        }
        return Err(AnalyticsError::MissingColumns(missing));
    }

    Ok(ColumnLayout {
        brand: brand.unwrap_or_default(),
        coverage: coverage.unwrap_or_default(),
        category: category.unwrap_or_default(),
        detail: find_column(&normalized, DETAIL_ALIASES),
        description: find_column(&normalized, DESCRIPTION_ALIASES),
        frame: find_column(&normalized, FRAME_ALIASES),
    })
}

/// Fetches an optional cell, returning `None` for absent or empty values.
fn optional_cell(fields: &[String], index: Option<usize>) -> Option<String> {
    let value = clean_cell(fields.get(index?)?);
    if value.is_empty() { None } else { Some(value) }
}

/// Extracts one record from a data row, or `None` if the row is unusable.
///
/// A row is included only when its brand and category are non-empty and
/// its coverage parses as a finite number.
fn extract_record(fields: &[String], layout: &ColumnLayout) -> Option<ExposureRecord> {
    if fields.len() <= layout.required_max() {
        return None;
    }

    let brand = clean_cell(&fields[layout.brand]);
    let category = clean_cell(&fields[layout.category]);
    let coverage: f64 = clean_cell(&fields[layout.coverage]).parse().ok()?;

    if brand.is_empty() || category.is_empty() || !coverage.is_finite() {
        return None;
    }

    Some(ExposureRecord {
        brand,
        coverage,
        category,
        detail: optional_cell(fields, layout.detail),
        description: optional_cell(fields, layout.description),
        frame_number: optional_cell(fields, layout.frame).and_then(|v| v.parse().ok()),
    })
}

/// Parses raw CSV text into an [`ExposureDataset`].
///
/// # Errors
///
/// - [`AnalyticsError::EmptyOrHeaderOnly`] when fewer than two lines remain
///   after trimming (no header plus at least one data row).
/// - [`AnalyticsError::MissingColumns`] when a required logical column has
///   no matching header alias.
pub fn parse_dataset(text: &str) -> Result<ExposureDataset> {
    // `lines()` tolerates both \n and \r\n conventions.
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.len() < 2 {
        return Err(AnalyticsError::EmptyOrHeaderOnly);
    }

    let header_cells = split_line(lines[0]);
    let layout = resolve_layout(&header_cells)?;

    let mut records = Vec::with_capacity(lines.len() - 1);
    let mut skipped_rows = 0usize;

    for (line_number, line) in lines.iter().enumerate().skip(1) {
        let fields = split_line(line);
        match extract_record(&fields, &layout) {
            Some(record) => records.push(record),
            None => {
                skipped_rows += 1;
                debug!(line = line_number + 1, "skipping unusable CSV row");
            }
        }
    }

    Ok(ExposureDataset {
        records,
        layout,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASIC_CSV: &str = "brand_name,c_li,ad_category\n\
        Pepsi,0.10,Jersey\n\
        Pepsi,0.20,Boundary\n\
        Dream11,0.05,Jersey\n";

    // -------------------------------------------------------------------------
    // split_line tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_split_line_plain() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_line_preserves_quoted_comma() {
        assert_eq!(
            split_line(r#"Pepsi,"Jersey, front",0.1"#),
            vec!["Pepsi", r#""Jersey, front""#, "0.1"]
        );
    }

    #[test]
    fn test_split_line_trailing_empty_field() {
        assert_eq!(split_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_line_multiple_quoted_fields() {
        assert_eq!(
            split_line(r#""a,b","c,d",e"#),
            vec![r#""a,b""#, r#""c,d""#, "e"]
        );
    }

    // -------------------------------------------------------------------------
    // Header resolution tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_header_resolution_case_insensitive() {
        let csv = "Brand_Name,C_LI,Ad_Category\nPepsi,0.1,Jersey\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].brand, "Pepsi");
    }

    #[test]
    fn test_header_resolution_category_alias() {
        let csv = "brand_name,c_li,ad_categories\nPepsi,0.1,Jersey\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.records[0].category, "Jersey");
    }

    #[test]
    fn test_header_resolution_any_column_order() {
        let csv = "ad_category,brand_name,c_li\nJersey,Pepsi,0.25\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.records[0].brand, "Pepsi");
        assert_eq!(dataset.records[0].coverage, 0.25);
        assert_eq!(dataset.records[0].category, "Jersey");
    }

    #[test]
    fn test_header_resolution_quoted_headers() {
        let csv = "\"brand_name\",\"c_li\",\"ad_category\"\nPepsi,0.1,Jersey\n";
        assert!(parse_dataset(csv).is_ok());
    }

    #[test]
    fn test_missing_coverage_column_names_c_li() {
        let csv = "brand_name,ad_category\nPepsi,Jersey\n";
        let error = parse_dataset(csv).unwrap_err();
        match error {
            AnalyticsError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["c_li".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_all_columns_missing_lists_all_three() {
        let csv = "foo,bar\n1,2\n";
        let error = parse_dataset(csv).unwrap_err();
        match error {
            AnalyticsError::MissingColumns(missing) => {
                assert_eq!(missing.len(), 3);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    // -------------------------------------------------------------------------
    // Row extraction tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_basic_dataset() {
        let dataset = parse_dataset(BASIC_CSV).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.skipped_rows, 0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv = "brand_name,c_li,ad_category\r\nPepsi,0.1,Jersey\r\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].category, "Jersey");
    }

    #[test]
    fn test_non_numeric_coverage_row_dropped_without_abort() {
        let csv = "brand_name,c_li,ad_category\n\
            Pepsi,not_a_number,Jersey\n\
            Dream11,0.3,Boundary\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].brand, "Dream11");
        assert_eq!(dataset.skipped_rows, 1);
    }

    #[test]
    fn test_nan_coverage_row_dropped() {
        let csv = "brand_name,c_li,ad_category\nPepsi,NaN,Jersey\n";
        let dataset = parse_dataset(csv).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.skipped_rows, 1);
    }

    #[test]
    fn test_empty_brand_row_dropped() {
        let csv = "brand_name,c_li,ad_category\n,0.1,Jersey\nPepsi,0.2,Jersey\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_short_row_skipped() {
        let csv = "brand_name,c_li,ad_category\nPepsi,0.1\nPepsi,0.2,Jersey\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.skipped_rows, 1);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            parse_dataset(""),
            Err(AnalyticsError::EmptyOrHeaderOnly)
        ));
        assert!(matches!(
            parse_dataset("brand_name,c_li,ad_category\n"),
            Err(AnalyticsError::EmptyOrHeaderOnly)
        ));
    }

    #[test]
    fn test_quoted_cells_are_stripped_and_trimmed() {
        let csv = "brand_name,c_li,ad_category\n\" Pepsi \",\"0.1\",\"Jersey\"\n";
        let dataset = parse_dataset(csv).unwrap();
        assert_eq!(dataset.records[0].brand, "Pepsi");
        assert_eq!(dataset.records[0].coverage, 0.1);
    }

    #[test]
    fn test_optional_columns_extracted() {
        let csv = "brand_name,c_li,ad_category,Ad_details,General Description,frame_no\n\
            Pepsi,0.1,Jersey,Front of shirt,A boundary is hit,120\n";
        let dataset = parse_dataset(csv).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.detail.as_deref(), Some("Front of shirt"));
        assert_eq!(record.description.as_deref(), Some("A boundary is hit"));
        assert_eq!(record.frame_number, Some(120));
    }

    #[test]
    fn test_optional_columns_absent() {
        let dataset = parse_dataset(BASIC_CSV).unwrap();
        let record = &dataset.records[0];
        assert!(record.detail.is_none());
        assert!(record.description.is_none());
        assert!(record.frame_number.is_none());
    }
}
