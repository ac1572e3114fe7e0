use std::ops::Range;

use super::model::{Category, ClassifiedRecord};

// ---------------------------------------------------------------------------
// Filter options offered by the results toolbar
// ---------------------------------------------------------------------------

pub const PRIORITY_OPTIONS: [&str; 10] = [
    "1", "2", "3", "4", "5", "Very High", "High", "Medium", "Low", "Very Low",
];

pub const CONFIDENCE_THRESHOLDS: [u8; 5] = [50, 60, 70, 80, 90];

pub const PAGE_SIZES: [usize; 3] = [10, 25, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// FilterState – predicates plus the current page window
// ---------------------------------------------------------------------------

/// Client-side view state for the results table.
///
/// `None` stands for "All" on every criterion. Any criterion change moves
/// the view back to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    category: Option<Category>,
    priority: Option<String>,
    min_confidence: Option<u8>,
    keyword: String,
    page: usize,
    page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            priority: None,
            min_confidence: None,
            keyword: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    pub fn min_confidence(&self) -> Option<u8> {
        self.min_confidence
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_priority(&mut self, priority: Option<String>) {
        self.priority = priority;
        self.page = 1;
    }

    pub fn set_min_confidence(&mut self, threshold: Option<u8>) {
        self.min_confidence = threshold;
        self.page = 1;
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
        self.page = 1;
    }

    /// Zero is ignored so page arithmetic never divides by zero.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self.page = 1;
    }

    /// Jump to `page`, clamped to `[1, page_count]`.
    pub fn set_page(&mut self, page: usize, filtered_len: usize) {
        self.page = page.clamp(1, self.page_count(filtered_len));
    }

    pub fn next_page(&mut self, filtered_len: usize) {
        self.set_page(self.page.saturating_add(1), filtered_len);
    }

    pub fn prev_page(&mut self, filtered_len: usize) {
        self.set_page(self.page.saturating_sub(1), filtered_len);
    }

    /// Whether a record passes every active criterion.
    pub fn matches(&self, record: &ClassifiedRecord) -> bool {
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if !record.priority.matches(priority) {
                return false;
            }
        }
        if let Some(threshold) = self.min_confidence {
            if record.confidence < f64::from(threshold) {
                return false;
            }
        }
        if !self.keyword.is_empty() {
            let needle = self.keyword.to_lowercase();
            if !record.search_text().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Number of pages for `filtered_len` rows; never less than one.
    pub fn page_count(&self, filtered_len: usize) -> usize {
        filtered_len.div_ceil(self.page_size).max(1)
    }

    /// Index range into the filtered list covered by the current page.
    pub fn page_window(&self, filtered_len: usize) -> Range<usize> {
        let page = self.page.clamp(1, self.page_count(filtered_len));
        let start = ((page - 1) * self.page_size).min(filtered_len);
        let end = (page * self.page_size).min(filtered_len);
        start..end
    }

    /// Footer label, e.g. `"11 - 20 of 25"`.
    pub fn range_label(&self, filtered_len: usize) -> String {
        let window = self.page_window(filtered_len);
        format!("{} - {} of {}", window.start + 1, window.end, filtered_len)
    }
}

/// Return indices of records that pass the filter, in backend order.
pub fn filtered_indices(records: &[ClassifiedRecord], filter: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(i, _)| i)
        .collect()
}
