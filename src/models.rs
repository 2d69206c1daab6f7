//! Frontend Models
//!
//! Data structures matching backend payloads.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Sort key and identifier of a component row within a process
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(pub f64);

impl Weight {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display already prints 2.0 as "2"
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Weight(value)
    }
}

/// A component placed in a process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    pub weight: Weight,
    #[serde(default)]
    pub uid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
}

// ========================
// Metrics definition (static content)
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub metrics: OrderedMap<MetricDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricsDefinition {
    #[serde(default)]
    pub features: OrderedMap<Feature>,
    #[serde(default)]
    pub categories: HashMap<String, Category>,
}

impl MetricsDefinition {
    /// Display name of a category, falling back to its key
    pub fn category_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.categories
            .get(key)
            .map(|c| c.name.as_str())
            .unwrap_or(key)
    }
}

// ========================
// Process snapshot
// ========================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActualValues {
    pub average: Option<f64>,
    pub standard_deviation: Option<f64>,
    pub total: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TargetValues {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActualTargetMetric {
    #[serde(default)]
    pub count_component: Option<u32>,
    #[serde(default)]
    pub actual: Option<ActualValues>,
    #[serde(default)]
    pub target: Option<TargetValues>,
    #[serde(default)]
    pub fulfillment: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessDetails {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "seq_or_map_values")]
    pub components: Vec<ComponentRow>,
}

/// Response of `/process/view`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessView {
    pub success: bool,
    #[serde(default)]
    pub process: ProcessDetails,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<i64>,
    #[serde(default)]
    pub actual_target_metrics: HashMap<String, ActualTargetMetric>,
}

// ========================
// Component overview
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentOption {
    pub uid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComponentOverview {
    #[serde(default, deserialize_with = "seq_or_map_values")]
    pub components: Vec<ComponentOption>,
}

/// Generic `{success: bool}` answer of the mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub process_uid: Option<String>,
}

// ========================
// Serde helpers
// ========================

/// JSON object that keeps its key order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Accept either `[a, b]` or `{"0": a, "1": b}`
fn seq_or_map_values<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct ValuesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for ValuesVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an array or an object of entries")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(value) = seq.next_element()? {
                values.push(value);
            }
            Ok(values)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, value)) = map.next_entry::<de::IgnoredAny, T>()? {
                values.push(value);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(ValuesVisitor(PhantomData))
}

/// Score arrives as a number or a numeric string; keep the integer part
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScoreVisitor;

    impl<'de> Visitor<'de> for ScoreVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(i64::try_from(v).ok())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.is_finite().then(|| v.trunc() as i64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            Ok(v.parse::<i64>()
                .ok()
                .or_else(|| v.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScoreVisitor)
}
