//! Tag filter rows

use serde::{Deserialize, Serialize};

/// One editable tag filter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            enabled: true,
            key: None,
            values: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl TagFilter {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: Some(key.into()),
            values,
            ..Default::default()
        }
    }

    /// Replace the values from comma separated text, e.g. `"dev, prod"`
    pub fn set_values_from_str(&mut self, text: &str) {
        self.values = text.split(',').map(|value| value.trim().to_string()).collect();
    }

    pub fn values_display(&self) -> String {
        self.values.join(", ")
    }

    /// A row without a key or without values filters nothing
    pub fn is_empty(&self) -> bool {
        self.key.as_deref().map_or(true, str::is_empty) || self.values.is_empty()
    }

    /// The row in tagging API form, when it is enabled and non-empty
    pub fn to_api(&self) -> Option<ApiTagFilter> {
        if !self.enabled || self.is_empty() {
            return None;
        }
        Some(ApiTagFilter {
            key: self.key.clone()?,
            values: self.values.clone(),
        })
    }
}

/// Tag filter as sent to the resource groups tagging API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiTagFilter {
    pub key: String,
    pub values: Vec<String>,
}

/// Ordered collection of tag filter rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagFilterSet {
    rows: Vec<TagFilter>,
}

impl TagFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank row and return it for editing
    pub fn add_row(&mut self) -> &mut TagFilter {
        self.rows.push(TagFilter::default());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn push(&mut self, filter: TagFilter) {
        self.rows.push(filter);
    }

    pub fn remove(&mut self, index: usize) -> Option<TagFilter> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn rows(&self) -> &[TagFilter] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut TagFilter> {
        self.rows.get_mut(index)
    }

    /// Enabled, non-empty rows in tagging API form, in row order
    pub fn active(&self) -> Vec<ApiTagFilter> {
        self.rows.iter().filter_map(TagFilter::to_api).collect()
    }
}

impl From<Vec<TagFilter>> for TagFilterSet {
    fn from(rows: Vec<TagFilter>) -> Self {
        Self { rows }
    }
}
