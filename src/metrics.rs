//! Metrics Section Model
//!
//! Builds the per-feature metric tables from the metrics definition and the
//! process snapshot, and reads target inputs back for saving.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ActualValues, MetricsDefinition, ProcessView};

/// One metric row of a feature table
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub slug: String,
    pub name: String,
    pub actual: Option<ActualValues>,
    pub target_average: Option<f64>,
    pub target_total: Option<f64>,
    pub fulfillment: Option<bool>,
}

/// A collapsible feature block
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSection {
    pub key: String,
    pub title: String,
    pub component_count: u32,
    pub fulfillment: Option<bool>,
    pub rows: Vec<MetricRow>,
}

/// None when no metric is rated, false if any metric fails, true otherwise
pub fn feature_fulfillment<I>(metrics: I) -> Option<bool>
where
    I: IntoIterator<Item = Option<bool>>,
{
    let rated: Vec<bool> = metrics.into_iter().flatten().collect();
    if rated.is_empty() {
        None
    } else {
        Some(!rated.contains(&false))
    }
}

/// Build all feature sections in definition order.
///
/// `process` is only consulted when an existing process was loaded.
pub fn build_sections(definition: &MetricsDefinition, process: Option<&ProcessView>) -> Vec<FeatureSection> {
    definition
        .features
        .iter()
        .enumerate()
        .map(|(index, (key, feature))| {
            let mut component_count = 0;
            let rows: Vec<MetricRow> = feature
                .metrics
                .iter()
                .map(|(slug, metric)| {
                    let values = process.and_then(|p| p.actual_target_metrics.get(slug));
                    // The count is the same for every metric of a feature; last one wins
                    component_count = values.and_then(|v| v.count_component).unwrap_or(0);
                    let target = values.and_then(|v| v.target.as_ref());
                    MetricRow {
                        slug: slug.to_string(),
                        name: metric.name.clone(),
                        actual: values.and_then(|v| v.actual.clone()),
                        target_average: target.and_then(|t| t.average),
                        target_total: target.and_then(|t| t.total),
                        fulfillment: values.and_then(|v| v.fulfillment),
                    }
                })
                .collect();

            FeatureSection {
                key: key.to_string(),
                title: format!("Feature {}: {} (Components: {})", index + 1, feature.name, component_count),
                component_count,
                fulfillment: feature_fulfillment(rows.iter().map(|r| r.fulfillment)),
                rows,
            }
        })
        .collect()
}

/// Parsed content of a target-average input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetInput {
    Empty,
    Value(i64),
    /// Non-numeric text, dropped from the request
    Discarded,
}

/// Trimmed input must parse as a whole; `"0"` is a valid target
pub fn parse_target_input(raw: &str) -> TargetInput {
    let raw = raw.trim();
    if raw.is_empty() {
        return TargetInput::Empty;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => TargetInput::Value(value.trunc() as i64),
        _ => TargetInput::Discarded,
    }
}

/// Target metrics for the save request, plus the slugs whose input was discarded
pub fn collect_targets<'a, I>(inputs: I) -> (BTreeMap<String, i64>, Vec<String>)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut targets = BTreeMap::new();
    let mut discarded = Vec::new();
    for (slug, raw) in inputs {
        match parse_target_input(raw) {
            TargetInput::Empty => {}
            TargetInput::Value(value) => {
                targets.insert(slug.to_string(), value);
            }
            TargetInput::Discarded => discarded.push(slug.to_string()),
        }
    }
    (targets, discarded)
}

/// Target-average inputs prefilled from the loaded process
pub fn initial_target_inputs(process: Option<&ProcessView>) -> HashMap<String, String> {
    process
        .map(|p| {
            p.actual_target_metrics
                .iter()
                .filter_map(|(slug, values)| {
                    let average = values.target.as_ref()?.average?;
                    Some((slug.clone(), average.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// CSS class of the small fulfillment circle
pub fn fulfillment_class(fulfillment: Option<bool>) -> &'static str {
    match fulfillment {
        Some(true) => "small-circle fulfilled",
        Some(false) => "small-circle unfulfilled",
        None => "small-circle unrated",
    }
}
