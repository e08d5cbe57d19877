// Column model: candidate output fields of a block
// Author: Gabriel Demetrios Lafis

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::{FieldPath, PathCollector};
use super::BlockNode;

/// Notice shown when detection has no document to work with
pub const NO_DETECTION_SOURCE: &str =
    "No sample or preview response available. Add sample JSON or manual fields.";

/// A candidate column and whether it is selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnItem {
    pub name: String,
    pub selected: bool,
}

impl ColumnItem {
    /// Create a selected column
    pub fn new(name: &str) -> Self {
        ColumnItem {
            name: name.to_string(),
            selected: true,
        }
    }
}

/// Where detected fields came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Sample,
    Preview,
    None,
}

/// Result of column detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub fields: Vec<FieldPath>,
    pub source: DetectionSource,
}

impl Detection {
    /// User-facing notice, if detection found nothing to read
    pub fn notice(&self) -> Option<&'static str> {
        match self.source {
            DetectionSource::None => Some(NO_DETECTION_SOURCE),
            _ => None,
        }
    }
}

/// Ordered list of selectable column names
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnModel {
    items: Vec<ColumnItem>,
}

impl ColumnModel {
    /// Create an empty column list
    pub fn new() -> Self {
        ColumnModel { items: Vec::new() }
    }

    /// Detect field paths for a block.
    ///
    /// The sample response text wins when it parses as a JSON object or
    /// array; otherwise (blank, malformed, `null` or a bare scalar) the
    /// cached preview response is used. With neither, the result is empty and
    /// carries a notice.
    pub fn detect(block: &BlockNode, collector: &PathCollector) -> Detection {
        let sample = block.extraction.sample_response.trim();
        let parsed = if sample.is_empty() {
            None
        } else {
            match serde_json::from_str::<JsonValue>(sample) {
                Ok(value) if value.is_object() || value.is_array() => Some(value),
                Ok(_) => {
                    debug!("Sample response for {} has no fields, trying the preview", block.id());
                    None
                }
                Err(err) => {
                    debug!("Ignoring malformed sample response for {}: {}", block.id(), err);
                    None
                }
            }
        };

        let (document, source) = match (&parsed, &block.preview_response) {
            (Some(value), _) => (value, DetectionSource::Sample),
            (None, Some(value)) => (value, DetectionSource::Preview),
            (None, None) => {
                warn!("{}", NO_DETECTION_SOURCE);
                return Detection {
                    fields: Vec::new(),
                    source: DetectionSource::None,
                };
            }
        };

        let fields = collector.collect_sorted(document);
        debug!("Detected {} fields for {} from {:?}", fields.len(), block.id(), source);

        Detection { fields, source }
    }

    /// Replace the list with one selected item per field
    pub fn render(&mut self, fields: &[FieldPath]) {
        self.items = fields.iter().map(|f| ColumnItem::new(f)).collect();
    }

    /// Select every item
    pub fn select_all(&mut self) {
        for item in &mut self.items {
            item.selected = true;
        }
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Add a column by hand. Empty and already listed names are ignored.
    pub fn add_manual(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.items.push(ColumnItem::new(name));
        true
    }

    /// Set the selected flag of a column, returning false if it is not listed
    pub fn set_selected(&mut self, name: &str, selected: bool) -> bool {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => {
                item.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Flip the selected flag of a column
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => {
                item.selected = !item.selected;
                true
            }
            None => false,
        }
    }

    /// Whether a column with exactly this name is listed
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Names of the selected columns, in list order
    pub fn selected(&self) -> Vec<String> {
        self.items.iter()
            .filter(|item| item.selected)
            .map(|item| item.name.clone())
            .collect()
    }

    /// Get all items
    pub fn items(&self) -> &[ColumnItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
