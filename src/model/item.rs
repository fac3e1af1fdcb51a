// File: ./src/model/item.rs
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Marker substituted for every numeric token of a stat line.
pub const PLACEHOLDER: &str = "#";

/// One stat line reduced to a comparable template and its threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedStat {
    pub template: String,
    #[serde(serialize_with = "serialize_magnitude")]
    pub magnitude: Option<f64>,
}

impl ParsedStat {
    pub fn new(template: impl Into<String>, magnitude: Option<f64>) -> Self {
        Self {
            template: template.into(),
            magnitude,
        }
    }
}

/// Several stat lines collapsed into one generalized template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyEntry {
    pub template: String,
    #[serde(serialize_with = "serialize_magnitude")]
    pub magnitude: Option<f64>,
    pub count: usize,
}

impl FamilyEntry {
    pub fn new(template: impl Into<String>, magnitude: Option<f64>) -> Self {
        Self {
            template: template.into(),
            magnitude,
            count: 1,
        }
    }

    /// Folds one more contributing line into this entry.
    ///
    /// The smaller magnitude wins. A missing magnitude never lowers a present
    /// one and is replaced by the first present one it meets.
    pub fn absorb(&mut self, magnitude: Option<f64>) {
        self.count += 1;
        self.magnitude = min_magnitude(self.magnitude, magnitude);
    }

    /// Folds an entry built elsewhere for the same template.
    pub fn merge(&mut self, other: &FamilyEntry) {
        self.count += other.count;
        self.magnitude = min_magnitude(self.magnitude, other.magnitude);
    }
}

fn min_magnitude(current: Option<f64>, new: Option<f64>) -> Option<f64> {
    match (current, new) {
        (Some(current), Some(new)) if new < current => Some(new),
        (Some(current), _) => Some(current),
        (None, new) => new,
    }
}

/// Generalized template -> entry, in first-seen order.
pub type FamilyGroup = IndexMap<String, FamilyEntry>;

/// Everything extracted from one paste, ready to be turned into events.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    pub stats: Vec<ParsedStat>,
    pub attributes: FamilyGroup,
    pub resistances: FamilyGroup,
    pub item_class: Option<String>,
}

impl FilterSet {
    pub fn new(stats: Vec<ParsedStat>, item_class: Option<String>) -> Self {
        Self {
            stats,
            item_class,
            ..Default::default()
        }
    }

    /// Number of filters this set will produce (class excluded).
    pub fn filter_count(&self) -> usize {
        self.stats.len() + self.attributes.len() + self.resistances.len()
    }
}

/// Whether a magnitude carries no fractional part.
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Integral magnitudes go out as JSON integers (`12`, not `12.0`).
pub fn serialize_magnitude<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if is_integral(*v) && v.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*v as i64)
        }
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}
