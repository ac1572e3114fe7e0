use super::model::{Category, ClassificationResult};

/// Read-only projection of a result into the analytics cards.
///
/// Every number comes from the backend; nothing is recomputed here apart
/// from the bar heights.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: u64,
    pub counts: [(Category, u64); 3],
    pub avg_confidence: f64,
}

impl Summary {
    /// `None` when there are no records to summarise.
    pub fn from_result(result: &ClassificationResult) -> Option<Self> {
        if result.is_empty() {
            return None;
        }
        Some(Self {
            total: result.total,
            counts: Category::ALL.map(|c| (c, result.category_count(c))),
            avg_confidence: result.avg_confidence,
        })
    }

    /// Bar height in percent of the largest category.
    pub fn bar_height_percent(&self, count: u64) -> f64 {
        let max = self.counts.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
        count as f64 / max as f64 * 100.0
    }

    pub fn avg_confidence_label(&self) -> String {
        format!("{}%", self.avg_confidence)
    }
}
