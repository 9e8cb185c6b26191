//! Flattened table structures for roster grids.
//!
//! Every roster call site (location, student, KTo1 variants) produces the
//! same shape: a column schema plus a list of rows whose field keys are
//! identical across the table, even when the source entities reported a
//! ragged set of domains. The rectangular guarantee is what the frontend
//! grid renderer depends on.

use serde::Serialize;
use std::collections::BTreeMap;

/// A single cell value. Untagged so rows serialize to flat JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Count(i64),
    Percent(f64),
    Text(String),
}

/// A column header. Scalar columns carry one field; domain columns carry a
/// field family (one per performance level) and render as grouped headers.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TableColumn {
    Scalar {
        title: String,
        title_full: String,
        multi: u8,
        field: String,
    },
    /// Location-roster domain group: count and percent field per level.
    LocationDomain {
        title: String,
        title_full: String,
        multi: u8,
        fields_num: Vec<String>,
        fields_per: Vec<String>,
    },
    /// Student-roster domain group: a single score field.
    StudentDomain {
        title: String,
        title_full: String,
        multi: u8,
        fields: Vec<String>,
    },
}

impl TableColumn {
    pub fn scalar(title: impl Into<String>, title_full: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Scalar {
            title: title.into(),
            title_full: title_full.into(),
            multi: 0,
            field: field.into(),
        }
    }

    pub fn location_domain(
        title: impl Into<String>,
        title_full: impl Into<String>,
        fields_num: Vec<String>,
        fields_per: Vec<String>,
    ) -> Self {
        Self::LocationDomain {
            title: title.into(),
            title_full: title_full.into(),
            multi: 1,
            fields_num,
            fields_per,
        }
    }

    pub fn student_domain(
        title: impl Into<String>,
        title_full: impl Into<String>,
        fields: Vec<String>,
    ) -> Self {
        Self::StudentDomain {
            title: title.into(),
            title_full: title_full.into(),
            multi: 1,
            fields,
        }
    }
}

/// One roster row. Fixed identity/score fields plus the flattened domain
/// cells keyed by the canonical field names from the column schema.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub node_name: String,
    pub node_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub node_type: String,
    pub link: String,
    #[serde(rename = "SS")]
    pub ss: f64,
    #[serde(rename = "NPR")]
    pub npr: f64,
    #[serde(flatten)]
    pub cells: BTreeMap<String, CellValue>,
}

/// A complete flattened roster table.
#[derive(Debug, Clone, Serialize)]
pub struct TableModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub roster_type: String,
    pub roster_level: String,
    pub columns: Vec<TableColumn>,
    pub values: Vec<TableRow>,
}

/// Explicit "no data" indicator, rendered by the frontend as-is.
#[derive(Debug, Clone, Serialize)]
pub struct NoData {
    pub nodata: bool,
}

/// Outcome of a report operation: either data or the no-data indicator.
/// No-data is not an error — upstream returning null or an empty entity
/// list is an expected state.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportResult<T> {
    NoData(NoData),
    Data(T),
}

impl<T> ReportResult<T> {
    pub fn no_data() -> Self {
        Self::NoData(NoData { nodata: true })
    }

    pub fn data(value: T) -> Self {
        Self::Data(value)
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            Self::Data(value) => Some(value),
            Self::NoData(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_serializes_to_the_sentinel_object() {
        let result: ReportResult<TableModel> = ReportResult::no_data();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "nodata": true }));
    }

    #[test]
    fn test_row_cells_flatten_into_the_row_object() {
        let mut cells = BTreeMap::new();
        cells.insert("DOM_7_num_1".to_string(), CellValue::Count(4));
        cells.insert("DOM_7_per_1".to_string(), CellValue::Percent(25.0));
        let row = TableRow {
            node_name: "Lincoln Elementary".into(),
            node_id: 42,
            external_id: None,
            node_type: "building".into(),
            link: "#".into(),
            ss: 210.0,
            npr: 55.0,
            cells,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["DOM_7_num_1"], 4);
        assert_eq!(json["SS"], 210.0);
        assert!(json.get("external_id").is_none());
    }
}
