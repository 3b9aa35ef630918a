//! CSV export scopes.
//!
//! # Responsibility
//! - Read exported CSV files into per-block row scopes, in file order.
//! - Normalize export headers before the shared scope normalization.
//!
//! # Invariants
//! - A block key names exactly one object type, optionally with a trailing
//!   `Snapshot` qualifier.
//! - Header markers (`*`) never reach entity attributes.
//! - A header that already names an attribute is never shortened.

use crate::model::object_type::ObjectType;
use crate::scope::headers::attr_for_header;
use crate::scope::{Scope, ScopeValue};
use std::path::Path;

const SNAPSHOT_SUFFIX: &str = "Snapshot";
const OBJECT_TYPE_ROW_MARKER: &str = "Object type";
const REQUIRED_HEADER_MARKER: char = '*';

/// Rows of one export block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvBlock {
    /// Block name as exported, e.g. `"Program"` or `"Control Snapshot"`.
    pub key: String,
    pub rows: Vec<Scope>,
}

/// Export blocks in the order they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvScopes {
    blocks: Vec<CsvBlock>,
}

impl CsvScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rows of block `key`. A new key is appended after the
    /// existing blocks; a known key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, rows: Vec<Scope>) {
        *self.rows_mut(key.into()) = rows;
    }

    fn rows_mut(&mut self, key: String) -> &mut Vec<Scope> {
        let index = match self.blocks.iter().position(|block| block.key == key) {
            Some(index) => index,
            None => {
                self.blocks.push(CsvBlock { key, rows: Vec::new() });
                self.blocks.len() - 1
            }
        };
        &mut self.blocks[index].rows
    }

    pub fn first(&self) -> Option<&CsvBlock> {
        self.blocks.first()
    }

    pub fn get(&self, key: &str) -> Option<&[Scope]> {
        self.blocks
            .iter()
            .find(|block| block.key == key)
            .map(|block| block.rows.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CsvBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Resolves the object type name declared by an export block key.
///
/// `"Control Snapshot"` -> `"Control"`, `"Technology Environment"` ->
/// `"TechnologyEnvironment"`.
pub fn csv_block_object_type(block_key: &str) -> String {
    let trimmed = block_key.trim();
    let without_suffix = trimmed.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(trimmed);
    without_suffix.replace(' ', "")
}

/// Normalized rows of the first export block, or `None` when the first
/// block declares another object type.
pub fn first_block_scopes(obj_type: ObjectType, csv_scopes: &CsvScopes) -> Option<Vec<Scope>> {
    csv_scopes
        .first()
        .filter(|block| csv_block_object_type(&block.key) == obj_type.name())
        .map(|block| normalize_csv_scopes(obj_type, &block.rows))
}

/// Title-cases a header the way the export page renders it.
fn normal_form(header: &str) -> String {
    header
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn names_attr(header: &str) -> bool {
    attr_for_header(&header.to_uppercase()).is_some()
}

/// Maps one export header onto the header the scope normalization expects.
///
/// `Control Owners` and `Assessment Type` name attributes as they are and
/// stay whole; `Program Title` loses its type prefix.
fn csv_header(raw: &str, type_prefixes: &[String]) -> String {
    let unmarked = raw.replace(REQUIRED_HEADER_MARKER, "");
    let unmarked = unmarked.trim();
    let titled = normal_form(unmarked);
    if names_attr(&titled) {
        return titled;
    }
    if names_attr(unmarked) {
        return unmarked.to_string();
    }
    type_prefixes
        .iter()
        .find_map(|prefix| titled.strip_prefix(prefix.as_str()))
        .map(str::to_string)
        .unwrap_or(titled)
}

/// Normalizes export row headers for one object type.
///
/// - `*` markers are removed and headers are title-cased.
/// - A leading `"<Type> "` prefix is stripped (`"Program Title"` -> `"Title"`)
///   unless the whole header already names an attribute.
/// - Control rows get `REVIEW_STATUS_DISPLAY_NAME` copied from `Review Status`.
pub fn normalize_csv_scopes(obj_type: ObjectType, rows: &[Scope]) -> Vec<Scope> {
    let descriptor = obj_type.descriptor();
    let prefixes = [
        format!("{} ", normal_form(descriptor.name)),
        format!("{} ", normal_form(&split_camel_case(descriptor.name))),
    ];

    rows.iter()
        .map(|row| {
            let mut scope: Scope = row
                .iter()
                .map(|(key, value)| (csv_header(key, &prefixes), value.clone()))
                .collect();
            if obj_type == ObjectType::Control {
                if let Some(review_status) = scope.get("Review Status").cloned() {
                    scope.insert("REVIEW_STATUS_DISPLAY_NAME".to_string(), review_status);
                }
            }
            scope
        })
        .collect()
}

fn split_camel_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for (index, c) in value.chars().enumerate() {
        if index > 0 && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Reads an exported CSV file into block scopes.
///
/// Layout: an `Object type` row opens each block, the next row holds the
/// block key in its first cell followed by column headers, then data rows
/// with an empty first cell. Blank rows separate blocks.
pub fn read_export_csv(path: impl AsRef<Path>) -> Result<CsvScopes, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut blocks = CsvScopes::new();
    let mut current: Option<(String, Vec<String>)> = None;
    let mut expect_header = false;

    for record in reader.records() {
        let record = record?;
        let cells: Vec<&str> = record.iter().collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            current = None;
            expect_header = false;
            continue;
        }
        let first = cells.first().map(|cell| cell.trim()).unwrap_or_default();

        if first.eq_ignore_ascii_case(OBJECT_TYPE_ROW_MARKER) {
            current = None;
            expect_header = true;
            continue;
        }
        if expect_header || current.is_none() {
            let headers = cells.iter().skip(1).map(|cell| cell.trim().to_string()).collect();
            blocks.rows_mut(first.to_string());
            current = Some((first.to_string(), headers));
            expect_header = false;
            continue;
        }

        if let Some((block_key, headers)) = &current {
            let scope: Scope = headers
                .iter()
                .zip(cells.iter().skip(1))
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.clone(), ScopeValue::Text((*cell).to_string())))
                .collect();
            blocks.rows_mut(block_key.clone()).push(scope);
        }
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::{csv_block_object_type, csv_header, normal_form, normalize_csv_scopes, CsvScopes};
    use crate::model::object_type::ObjectType;
    use crate::scope::{scope_from_pairs, ScopeValue};

    #[test]
    fn block_key_drops_snapshot_suffix_and_spaces() {
        assert_eq!(csv_block_object_type("Control Snapshot"), "Control");
        assert_eq!(
            csv_block_object_type("Technology Environment"),
            "TechnologyEnvironment"
        );
        assert_eq!(csv_block_object_type("Program"), "Program");
    }

    #[test]
    fn normal_form_title_cases_words() {
        assert_eq!(normal_form("review_status"), "Review Status");
        assert_eq!(normal_form("TITLE"), "Title");
    }

    #[test]
    fn type_prefix_and_markers_are_stripped() {
        let rows = vec![scope_from_pairs([
            ("Program Title", "Acme Corp"),
            ("Code*", "P-001"),
        ])];
        let normalized = normalize_csv_scopes(ObjectType::Program, &rows);
        assert_eq!(
            normalized[0].get("Title"),
            Some(&ScopeValue::Text("Acme Corp".to_string()))
        );
        assert_eq!(
            normalized[0].get("Code"),
            Some(&ScopeValue::Text("P-001".to_string()))
        );
    }

    #[test]
    fn multi_word_type_prefix_is_stripped() {
        let rows = vec![scope_from_pairs([("Org Group Title", "Ops")])];
        let normalized = normalize_csv_scopes(ObjectType::OrgGroup, &rows);
        assert!(normalized[0].contains_key("Title"));
    }

    #[test]
    fn control_review_status_is_copied_to_display_name() {
        let rows = vec![scope_from_pairs([("Review Status", "Unreviewed")])];
        let normalized = normalize_csv_scopes(ObjectType::Control, &rows);
        assert_eq!(
            normalized[0].get("REVIEW_STATUS_DISPLAY_NAME"),
            Some(&ScopeValue::Text("Unreviewed".to_string()))
        );
    }

    #[test]
    fn attribute_headers_are_not_shortened() {
        let prefixes = ["Control ".to_string()];
        assert_eq!(csv_header("Control Owners*", &prefixes), "Control Owners");
        assert_eq!(csv_header("control title", &prefixes), "Title");
        assert_eq!(csv_header("REVIEW_STATUS_DISPLAY_NAME", &prefixes), "REVIEW_STATUS_DISPLAY_NAME");
        assert_eq!(csv_header("Control Effectiveness", &prefixes), "Effectiveness");
    }

    #[test]
    fn reinserted_block_keeps_its_position() {
        let mut blocks = CsvScopes::new();
        blocks.insert("Program", Vec::new());
        blocks.insert("Control", Vec::new());
        blocks.insert("Program", vec![scope_from_pairs([("Title", "P")])]);

        assert_eq!(blocks.keys().collect::<Vec<_>>(), ["Program", "Control"]);
        assert_eq!(blocks.first().map(|block| block.rows.len()), Some(1));
    }
}
