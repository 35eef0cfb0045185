//! Frequency and coverage-sum aggregation for dashboard charts.
//!
//! # Contract
//!
//! Given an [`ExposureDataset`], produce four ranked lists: brands by
//! frequency (top 10), brands by coverage sum (top 10), categories by
//! frequency (all), categories by coverage sum (all).
//!
//! Ties on the sort value keep first-encountered insertion order: the
//! accumulator preserves the order keys first appear in the data, and the
//! descending sort is stable.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Aggregate, DashboardData, ExposureDataset};

/// Brand rankings are truncated to this many entries; category rankings
/// are kept whole for the pie charts.
const TOP_BRANDS: usize = 10;

/// Accumulates frequency and coverage sums per key, preserving the order
/// in which keys are first seen.
#[derive(Default)]
struct Accumulator {
    entries: Vec<Aggregate>,
    index: HashMap<String, usize>,
}

impl Accumulator {
    fn add(&mut self, key: &str, coverage: f64) {
        match self.index.get(key) {
            Some(&i) => {
                self.entries[i].frequency += 1;
                self.entries[i].coverage_sum += coverage;
            }
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(Aggregate {
                    name: key.to_string(),
                    frequency: 1,
                    coverage_sum: coverage,
                });
            }
        }
    }
}

/// Stable descending sort by frequency, optionally truncated.
fn rank_by_frequency(entries: &[Aggregate], limit: Option<usize>) -> Vec<Aggregate> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Stable descending sort by coverage sum, optionally truncated.
///
/// Coverage sums are finite by construction (the parser rejects
/// non-finite values), so incomparable pairs are treated as equal.
fn rank_by_coverage(entries: &[Aggregate], limit: Option<usize>) -> Vec<Aggregate> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| {
        b.coverage_sum
            .partial_cmp(&a.coverage_sum)
            .unwrap_or(Ordering::Equal)
    });
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Computes the four ranked lists backing the dashboard.
///
/// Pure and deterministic: recomputed from the same dataset it always
/// yields identical output. An empty dataset yields empty lists.
pub fn aggregate(dataset: &ExposureDataset) -> DashboardData {
    let mut brands = Accumulator::default();
    let mut categories = Accumulator::default();

    for record in &dataset.records {
        brands.add(&record.brand, record.coverage);
        categories.add(&record.category, record.coverage);
    }

    DashboardData {
        top_brands_by_frequency: rank_by_frequency(&brands.entries, Some(TOP_BRANDS)),
        top_brands_by_coverage: rank_by_coverage(&brands.entries, Some(TOP_BRANDS)),
        categories_by_frequency: rank_by_frequency(&categories.entries, None),
        categories_by_coverage: rank_by_coverage(&categories.entries, None),
        record_count: dataset.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_dataset;
    use pretty_assertions::assert_eq;

    fn dataset_from(csv: &str) -> ExposureDataset {
        parse_dataset(csv).unwrap()
    }

    #[test]
    fn test_brand_frequency_and_coverage_sum() {
        let dataset = dataset_from(
            "brand_name,c_li,ad_category\n\
             Pepsi,0.10,Jersey\n\
             Pepsi,0.20,Boundary\n",
        );
        let data = aggregate(&dataset);

        assert_eq!(data.top_brands_by_frequency.len(), 1);
        let pepsi = &data.top_brands_by_frequency[0];
        assert_eq!(pepsi.name, "Pepsi");
        assert_eq!(pepsi.frequency, 2);
        assert!((pepsi.coverage_sum - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_category_lists_are_unbounded() {
        let mut csv = String::from("brand_name,c_li,ad_category\n");
        for i in 0..25 {
            csv.push_str(&format!("Brand{i},0.1,Category{i}\n"));
        }
        let data = aggregate(&dataset_from(&csv));

        assert_eq!(data.top_brands_by_frequency.len(), 10);
        assert_eq!(data.top_brands_by_coverage.len(), 10);
        assert_eq!(data.categories_by_frequency.len(), 25);
        assert_eq!(data.categories_by_coverage.len(), 25);
    }

    #[test]
    fn test_ranking_is_descending() {
        let dataset = dataset_from(
            "brand_name,c_li,ad_category\n\
             A,0.1,Jersey\n\
             B,0.5,Jersey\n\
             B,0.5,Jersey\n\
             C,0.3,Signage\n",
        );
        let data = aggregate(&dataset);

        assert_eq!(data.top_brands_by_frequency[0].name, "B");
        assert_eq!(data.top_brands_by_coverage[0].name, "B");
        assert_eq!(data.top_brands_by_coverage[1].name, "C");
        assert_eq!(data.top_brands_by_coverage[2].name, "A");
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let dataset = dataset_from(
            "brand_name,c_li,ad_category\n\
             Zeta,0.1,Jersey\n\
             Alpha,0.1,Jersey\n\
             Mid,0.2,Jersey\n",
        );
        let data = aggregate(&dataset);

        // Zeta and Alpha tie on frequency; Zeta appeared first.
        assert_eq!(data.top_brands_by_frequency[0].frequency, 1);
        let tied: Vec<&str> = data
            .top_brands_by_frequency
            .iter()
            .filter(|a| a.frequency == 1)
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(tied, vec!["Zeta", "Alpha", "Mid"]);

        // By coverage, Mid leads and the 0.1 tie keeps Zeta before Alpha.
        assert_eq!(data.top_brands_by_coverage[0].name, "Mid");
        assert_eq!(data.top_brands_by_coverage[1].name, "Zeta");
        assert_eq!(data.top_brands_by_coverage[2].name, "Alpha");
    }

    #[test]
    fn test_permuting_rows_yields_same_sums() {
        let forward = aggregate(&dataset_from(
            "brand_name,c_li,ad_category\n\
             A,0.125,Jersey\n\
             A,0.25,Jersey\n\
             A,0.0625,Signage\n",
        ));
        let reversed = aggregate(&dataset_from(
            "brand_name,c_li,ad_category\n\
             A,0.0625,Signage\n\
             A,0.25,Jersey\n\
             A,0.125,Jersey\n",
        ));

        let a = forward.top_brands_by_coverage[0].coverage_sum;
        let b = reversed.top_brands_by_coverage[0].coverage_sum;
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let dataset = dataset_from(
            "brand_name,c_li,ad_category\n\
             Pepsi,0.1,Jersey\n\
             Dream11,0.2,Signage\n",
        );
        let first = aggregate(&dataset);
        let second = aggregate(&dataset);
        assert_eq!(first.top_brands_by_frequency, second.top_brands_by_frequency);
        assert_eq!(first.categories_by_coverage, second.categories_by_coverage);
    }

    #[test]
    fn test_record_count() {
        let dataset = dataset_from(
            "brand_name,c_li,ad_category\n\
             Pepsi,0.1,Jersey\n\
             Pepsi,bad,Jersey\n",
        );
        let data = aggregate(&dataset);
        assert_eq!(data.record_count, 1);
    }
}
