// Mapping rows generated from selected columns
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

/// Hint shown in the type cell of generated rows
pub const TYPE_PLACEHOLDER: &str = "STRING / INT / DATE";

/// One source-field to output-column translation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingRow {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub transform: String,
    /// Placeholder for the type cell; kept in form state, never exported
    #[serde(rename = "typeHint", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
}

impl MappingRow {
    /// Create a mapping row
    pub fn new(source: &str, target: &str, type_: &str, transform: &str) -> Self {
        MappingRow {
            source: source.to_string(),
            target: target.to_string(),
            type_: type_.to_string(),
            transform: transform.to_string(),
            type_hint: None,
        }
    }

    /// Create an empty row carrying the type placeholder
    pub fn blank() -> Self {
        MappingRow {
            type_hint: Some(TYPE_PLACEHOLDER.to_string()),
            ..Default::default()
        }
    }
}

/// Derives mapping rows from column selections
pub struct MappingGenerator;

impl MappingGenerator {
    /// Generate one row per selected column, in selection order.
    ///
    /// Targets replace every `.` of the source with `_`. An empty selection
    /// yields a single blank row so there is always something to edit.
    pub fn generate(selected: &[String]) -> Vec<MappingRow> {
        if selected.is_empty() {
            return vec![MappingRow::blank()];
        }

        selected.iter()
            .map(|field| MappingRow {
                source: field.clone(),
                target: Self::target_name(field),
                ..MappingRow::blank()
            })
            .collect()
    }

    /// Default output column name for a field path
    pub fn target_name(field: &str) -> String {
        field.replace('.', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_selection() {
        let rows = MappingGenerator::generate(&["user.id".to_string(), "user.name".to_string()]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source, "user.id");
        assert_eq!(rows[0].target, "user_id");
        assert_eq!(rows[1].source, "user.name");
        assert_eq!(rows[1].target, "user_name");
        assert!(rows.iter().all(|r| r.type_.is_empty() && r.transform.is_empty()));
    }

    #[test]
    fn test_generate_empty_selection() {
        let rows = MappingGenerator::generate(&[]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!(row.source.is_empty() && row.target.is_empty());
        assert!(row.type_.is_empty() && row.transform.is_empty());
        assert_eq!(row.type_hint.as_deref(), Some(TYPE_PLACEHOLDER));
    }

    #[test]
    fn test_hint_survives_form_serialization() {
        let text = serde_json::to_string(&MappingRow::blank()).unwrap();
        assert!(text.contains("typeHint"));

        let row: MappingRow = serde_json::from_str(&text).unwrap();
        assert_eq!(row, MappingRow::blank());

        let plain = serde_json::to_value(MappingRow::new("id", "id", "", "")).unwrap();
        assert!(plain.get("typeHint").is_none());
    }

    #[test]
    fn test_target_replaces_every_dot() {
        assert_eq!(MappingGenerator::target_name("a.b.c"), "a_b_c");
        assert_eq!(MappingGenerator::target_name("plain"), "plain");
    }
}
