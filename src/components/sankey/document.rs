//! Extracts the athletics table from the published finance document.

use serde_json::Value;

use super::types::Row;
use crate::error::GraphError;

/// Key of the athletics table within the finance document.
pub const DATASET_KEY: &str = "athletics";

/// Parses `json` as an object and deserializes the array stored under `key`.
pub fn rows_from_document(json: &str, key: &str) -> Result<Vec<Row>, GraphError> {
	let mut document: Value = serde_json::from_str(json)?;
	let table = document
		.get_mut(key)
		.map(Value::take)
		.ok_or_else(|| GraphError::MissingDataset(key.to_string()))?;
	Ok(serde_json::from_value(table)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sankey::types::Category;

	#[test]
	fn test_rows_from_document() {
		let json = r#"{
			"athletics": [
				{ "name": "Ticket Sales", "Football": 12, "Total": 12 },
				{ "name": "Student Fees", "Other sports": 3.5, "Total": 3.5 }
			],
			"academics": []
		}"#;
		let rows = rows_from_document(json, DATASET_KEY).unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].name, "Ticket Sales");
		assert_eq!(rows[1].amount(Category::OtherSports), 3.5);
	}

	#[test]
	fn test_non_numeric_total_keeps_table() {
		let json = r#"{
			"athletics": [
				{ "name": "Ticket Sales", "Football": 12, "Total": "n/a" },
				{ "name": "Student Fees", "Football": 4, "Total": 4 }
			]
		}"#;
		let rows = rows_from_document(json, DATASET_KEY).unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].total(), 0.0);
		assert_eq!(rows[0].amount(Category::Football), 12.0);
		assert_eq!(rows[1].total(), 4.0);
	}

	#[test]
	fn test_missing_dataset() {
		let err = rows_from_document(r#"{ "academics": [] }"#, DATASET_KEY).unwrap_err();
		assert!(matches!(err, GraphError::MissingDataset(key) if key == "athletics"));
	}

	#[test]
	fn test_invalid_json() {
		let err = rows_from_document("{ not json", DATASET_KEY).unwrap_err();
		assert!(matches!(err, GraphError::Json(_)));
	}

	#[test]
	fn test_table_not_an_array() {
		let err = rows_from_document(r#"{ "athletics": 5 }"#, DATASET_KEY).unwrap_err();
		assert!(matches!(err, GraphError::Json(_)));
	}
}
