//! Chart series derivation from run statistics
//!
//! Transforms the accumulated frequency tables into sorted label/value
//! series ready for presentation. Pure and stateless: series are rebuilt
//! from a [`RunStats`] on each call and never mutated in place.

use crate::normalize::{self, SortKey};
use crate::stats::{FrequencyTable, RunStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder label rendered when a table has no entries, so the
/// presentation layer never needs an empty-state branch
const NO_DATA: &str = "No Data";

/// Parallel label/value sequences for one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    fn placeholder() -> Self {
        Self {
            labels: vec![NO_DATA.to_string()],
            values: vec![0],
        }
    }

    fn from_pairs(pairs: Vec<(String, u64)>) -> Self {
        if pairs.is_empty() {
            return Self::placeholder();
        }
        let (labels, values) = pairs.into_iter().unzip();
        Self { labels, values }
    }
}

/// Build every named chart series from one run's statistics
pub fn build_series(stats: &RunStats) -> BTreeMap<String, ChartSeries> {
    let mut series = BTreeMap::new();
    series.insert("camera".to_string(), camera_series(stats));
    series.insert("focal".to_string(), focal_series(stats));
    series.insert("focal35".to_string(), integer_sorted(&stats.focal35));
    series.insert("iso".to_string(), integer_sorted(&stats.iso));
    series.insert("fnumber".to_string(), fnumber_series(&stats.fnumber));
    series.insert("shutter".to_string(), shutter_series(&stats.exposure_time));
    series.insert("aperture".to_string(), aperture_series(&stats.aperture));
    series.insert(
        "exposure_program".to_string(),
        table_order(&stats.exposure_program),
    );
    series.insert("lens_model".to_string(), table_order(&stats.lens_model));
    series.insert("make".to_string(), table_order(&stats.make));
    series.insert("orientation".to_string(), table_order(&stats.orientation));
    series.insert("date".to_string(), table_order(&stats.date));
    series.insert("hour".to_string(), table_order(&stats.hour));
    series
}

/// One label per camera; value sums that camera's focal-length table
fn camera_series(stats: &RunStats) -> ChartSeries {
    let pairs = stats
        .camera
        .iter()
        .map(|(camera, focal)| (camera.clone(), focal.values().sum()))
        .collect();
    ChartSeries::from_pairs(pairs)
}

/// Focal-length counts summed across cameras, numeric keys first
fn focal_series(stats: &RunStats) -> ChartSeries {
    let mut merged = FrequencyTable::new();
    for focal in stats.camera.values() {
        for (key, count) in focal {
            *merged.entry(key.clone()).or_insert(0) += count;
        }
    }
    sorted_by_key(&merged, |label| SortKey::from_raw(label))
}

/// Integer-key policy for ISO and 35mm-equivalent focal length tables:
/// labels are rewritten to the truncated integer where parsable
fn integer_sorted(table: &FrequencyTable) -> ChartSeries {
    let items = table.iter().map(|(label, &count)| {
        match normalize::integer_key(label) {
            Some(key) => (SortKey::Number(key as f64), key.to_string(), count),
            None => (SortKey::Text(label.clone()), label.clone(), count),
        }
    });
    sorted_items(items.collect())
}

/// F-numbers keyed and relabeled at one decimal place; rounded labels are
/// not merged, each raw entry keeps its own bar
fn fnumber_series(table: &FrequencyTable) -> ChartSeries {
    let items = table.iter().map(|(label, &count)| {
        match normalize::fnumber_key(label) {
            Some(key) => (SortKey::Number(key), normalize::format_number(key), count),
            None => (SortKey::Text(label.clone()), label.clone(), count),
        }
    });
    sorted_items(items.collect())
}

/// Shutter speeds ordered by real exposure duration, raw labels retained;
/// unparsable entries sort to the end
fn shutter_series(table: &FrequencyTable) -> ChartSeries {
    let mut items: Vec<(f64, String, u64)> = table
        .iter()
        .map(|(label, &count)| (normalize::shutter_duration(label), label.clone(), count))
        .collect();
    items.sort_by(|a, b| a.0.total_cmp(&b.0));
    ChartSeries::from_pairs(items.into_iter().map(|(_, label, count)| (label, count)).collect())
}

/// Raw f-numbers bucketed onto the full-stop scale and merged
fn aperture_series(table: &FrequencyTable) -> ChartSeries {
    let mut bins = FrequencyTable::new();
    for (raw, count) in table {
        *bins.entry(normalize::round_aperture(raw)).or_insert(0) += count;
    }
    sorted_by_key(&bins, |label| SortKey::from_raw(label))
}

/// Series in table iteration order (lexicographic; chronological for the
/// date and hour tables by construction of their keys)
fn table_order(table: &FrequencyTable) -> ChartSeries {
    ChartSeries::from_pairs(
        table
            .iter()
            .map(|(label, &count)| (label.clone(), count))
            .collect(),
    )
}

fn sorted_by_key<F>(table: &FrequencyTable, key_fn: F) -> ChartSeries
where
    F: Fn(&str) -> SortKey,
{
    let items = table
        .iter()
        .map(|(label, &count)| (key_fn(label), label.clone(), count))
        .collect();
    sorted_items(items)
}

fn sorted_items(mut items: Vec<(SortKey, String, u64)>) -> ChartSeries {
    items.sort_by(|a, b| a.0.cmp(&b.0));
    ChartSeries::from_pairs(items.into_iter().map(|(_, label, count)| (label, count)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries
            .iter()
            .map(|(label, count)| (label.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_empty_stats_yield_placeholders() {
        let series = build_series(&RunStats::new());
        for chart in series.values() {
            assert_eq!(chart.labels, vec!["No Data".to_string()]);
            assert_eq!(chart.values, vec![0]);
        }
    }

    #[test]
    fn test_camera_series_sums_focal_tables() {
        let mut stats = RunStats::new();
        stats
            .camera
            .insert("X100V".into(), table(&[("23", 3), ("35", 1)]));
        stats.camera.insert("A7 IV".into(), table(&[("50", 2)]));

        let chart = camera_series(&stats);
        assert_eq!(chart.labels, vec!["A7 IV", "X100V"]);
        assert_eq!(chart.values, vec![2, 4]);
    }

    #[test]
    fn test_focal_series_merges_and_sorts_numerically() {
        let mut stats = RunStats::new();
        stats
            .camera
            .insert("X100V".into(), table(&[("23", 3), ("110", 1)]));
        stats
            .camera
            .insert("A7 IV".into(), table(&[("23", 2), ("0", 1)]));

        let chart = focal_series(&stats);
        assert_eq!(chart.labels, vec!["0", "23", "110"]);
        assert_eq!(chart.values, vec![1, 5, 1]);
    }

    #[test]
    fn test_integer_sorted_rewrites_labels() {
        let chart = integer_sorted(&table(&[("200.0", 2), ("1600", 1), ("Unknown", 3)]));
        assert_eq!(chart.labels, vec!["200", "1600", "Unknown"]);
        assert_eq!(chart.values, vec![2, 1, 3]);
    }

    #[test]
    fn test_shutter_series_orders_by_duration() {
        let chart = shutter_series(&table(&[
            ("1/30", 2),
            ("1/250", 1),
            ("2", 1),
            ("Unknown", 1),
        ]));
        assert_eq!(chart.labels, vec!["1/250", "1/30", "2", "Unknown"]);
        assert_eq!(chart.values, vec![1, 2, 1, 1]);
    }

    #[test]
    fn test_aperture_series_buckets_full_stops() {
        let chart = aperture_series(&table(&[
            ("4.5", 1),
            ("3.8", 2),
            ("2.9", 1),
            ("garbled", 1),
        ]));
        assert_eq!(chart.labels, vec!["2.8", "4.0", "Unknown"]);
        assert_eq!(chart.values, vec![1, 3, 1]);
    }

    #[test]
    fn test_fnumber_series_relabels_at_one_decimal() {
        let chart = fnumber_series(&table(&[("2.83", 2), ("11", 1), ("Unknown", 1)]));
        assert_eq!(chart.labels, vec!["2.8", "11", "Unknown"]);
        assert_eq!(chart.values, vec![2, 1, 1]);
    }
}
