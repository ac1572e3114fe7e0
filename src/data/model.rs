use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Category – the classifier's verdict for a finding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Mandatory,
    Optional,
    Syntax,
}

impl Category {
    /// Display order used by the filter combo box and the breakdown chart.
    pub const ALL: [Category; 3] = [Category::Mandatory, Category::Optional, Category::Syntax];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mandatory => "Mandatory",
            Category::Optional => "Optional",
            Category::Syntax => "Syntax",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority – numeric level or free-text label, kept as the backend sent it
// ---------------------------------------------------------------------------

/// ATC exports carry either a numeric priority (`1`..`5`) or a label
/// (`"Very High"`). The wire form is preserved so exports echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Priority {
    Level(i64),
    Label(String),
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Label(String::new())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Level(level) => write!(f, "{level}"),
            Priority::Label(label) => f.write_str(label),
        }
    }
}

impl Priority {
    /// Case-insensitive comparison against a filter option.
    pub fn matches(&self, option: &str) -> bool {
        self.to_string().to_lowercase() == option.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// ClassifiedRecord – one ATC finding as returned by the classifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(rename = "Priority", default, deserialize_with = "priority_cell")]
    pub priority: Priority,
    #[serde(rename = "Check Title", default, deserialize_with = "text_cell")]
    pub check_title: String,
    #[serde(rename = "Check Message", default, deserialize_with = "text_cell")]
    pub check_message: String,
    #[serde(rename = "Object Name", default, deserialize_with = "text_cell")]
    pub object_name: String,
    #[serde(rename = "Object Type", default, deserialize_with = "text_cell")]
    pub object_type: String,
    #[serde(rename = "Package", default, deserialize_with = "text_cell")]
    pub package: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Confidence", deserialize_with = "confidence_cell")]
    pub confidence: f64,
    /// Columns the classifier passed through that the table does not show.
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl ClassifiedRecord {
    /// Lower-cased text searched by the keyword filter.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.check_title, self.check_message, self.object_name, self.object_type, self.package
        )
        .to_lowercase()
    }
}

/// Spreadsheet cells come through pandas, so empty cells arrive as `null`
/// and numeric-looking names as numbers.
fn text_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s,
        JsonValue::Number(n) => number_text(&n),
        other => other.to_string(),
    })
}

/// Integral floats (`1.0`) are what pandas emits for a numeric column with
/// gaps; render them without the fraction, the way the browser did.
fn integral(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn number_text(n: &serde_json::Number) -> String {
    match integral(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}

/// `null` counts as absent for the summary counters.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn priority_cell<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Priority::default(),
        JsonValue::Number(n) => match integral(&n) {
            Some(level) => Priority::Level(level),
            None => Priority::Label(n.to_string()),
        },
        JsonValue::String(s) => Priority::Label(s),
        other => Priority::Label(other.to_string()),
    })
}

fn confidence_cell<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("confidence out of range")),
        JsonValue::String(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("confidence '{s}' is not a number"))),
        other => Err(D::Error::custom(format!("confidence {other} is not a number"))),
    }
}

// ---------------------------------------------------------------------------
// ClassificationResult – the complete response of one run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub records: Vec<ClassifiedRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    /// Keyed by category name as sent by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_category: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_confidence: f64,
}

impl ClassificationResult {
    /// Count for one category; absent keys count as zero.
    pub fn category_count(&self, category: Category) -> u64 {
        self.by_category
            .get(category.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reject values the UI cannot render meaningfully.
    pub fn validate(&self) -> Result<(), String> {
        if !self.avg_confidence.is_finite() {
            return Err(format!("average confidence {} is not finite", self.avg_confidence));
        }
        for (i, record) in self.records.iter().enumerate() {
            if !record.confidence.is_finite() || !(0.0..=100.0).contains(&record.confidence) {
                return Err(format!(
                    "record {i}: confidence {} outside [0, 100]",
                    record.confidence
                ));
            }
        }
        Ok(())
    }
}
