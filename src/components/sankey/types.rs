//! Data structures for the flow graph: input rows and the node/link output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A sport or program column in the athletics table.
///
/// The same enum drives row lookups, anchor node identity and coloring, so the
/// category list exists in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
	Football,
	MensBasketball,
	WomensBasketball,
	OtherSports,
	NonProgramSpecific,
}

impl Category {
	/// All categories in anchor stacking order (top to bottom).
	pub const ALL: [Category; 5] = [
		Category::Football,
		Category::MensBasketball,
		Category::WomensBasketball,
		Category::OtherSports,
		Category::NonProgramSpecific,
	];

	/// Column key used in the input table, also the display title.
	pub fn label(self) -> &'static str {
		match self {
			Category::Football => "Football",
			Category::MensBasketball => "Men's Basketball",
			Category::WomensBasketball => "Women's Basketball",
			Category::OtherSports => "Other sports",
			Category::NonProgramSpecific => "Non-Program Specific",
		}
	}

	/// Identifier suffix for anchor node names.
	pub fn slug(self) -> &'static str {
		match self {
			Category::Football => "football",
			Category::MensBasketball => "mens-basketball",
			Category::WomensBasketball => "womens-basketball",
			Category::OtherSports => "other-sports",
			Category::NonProgramSpecific => "non-program-specific",
		}
	}

	/// Looks up a category by its exact column key.
	pub fn from_label(label: &str) -> Option<Category> {
		Category::ALL.into_iter().find(|c| c.label() == label)
	}
}

/// One line item of the input table.
///
/// Category amounts are kept as raw JSON values so that unexpected columns can
/// be reported rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Row {
	/// Line item label, e.g. "Ticket Sales".
	pub name: String,
	#[serde(rename = "Total", default, skip_serializing_if = "Option::is_none")]
	pub total: Option<Value>,
	#[serde(flatten)]
	pub fields: BTreeMap<String, Value>,
}

impl Row {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_total(mut self, total: f64) -> Self {
		self.total = Some(Value::from(total));
		self
	}

	pub fn with_amount(mut self, category: Category, amount: f64) -> Self {
		self.fields
			.insert(category.label().to_string(), Value::from(amount));
		self
	}

	/// Row total; a missing or non-numeric total counts as zero.
	pub fn total(&self) -> f64 {
		self.total.as_ref().and_then(Value::as_f64).unwrap_or(0.0)
	}

	/// Amount for a category; missing or non-numeric fields count as zero.
	pub fn amount(&self, category: Category) -> f64 {
		self.fields
			.get(category.label())
			.and_then(Value::as_f64)
			.unwrap_or(0.0)
	}

	/// Column keys that match no known category.
	pub fn unknown_fields(&self) -> Vec<&str> {
		self.fields
			.keys()
			.map(String::as_str)
			.filter(|k| Category::from_label(k).is_none())
			.collect()
	}
}

/// Which side of the aggregator a line item sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
	Revenue,
	Expense,
}

/// A row tagged with its flow direction.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
	pub flow: Flow,
	pub row: Row,
}

impl LineItem {
	pub fn revenue(row: Row) -> Self {
		Self {
			flow: Flow::Revenue,
			row,
		}
	}

	pub fn expense(row: Row) -> Self {
		Self {
			flow: Flow::Expense,
			row,
		}
	}
}

/// Node column, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeGroup {
	Source,
	Revenue,
	Aggregate,
	Expense,
	Target,
}

impl NodeGroup {
	pub const COLUMNS: usize = 5;

	pub fn column(self) -> usize {
		match self {
			NodeGroup::Source => 0,
			NodeGroup::Revenue => 1,
			NodeGroup::Aggregate => 2,
			NodeGroup::Expense => 3,
			NodeGroup::Target => 4,
		}
	}
}

/// A vertex in the flow graph.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Node {
	/// Unique identifier. Used to reference nodes in links.
	pub name: String,
	/// Display label.
	pub title: String,
	pub group: NodeGroup,
	/// Set for anchor nodes only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<Category>,
}

/// A directed, weighted edge between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Link {
	/// Source node name.
	pub source: String,
	/// Target node name.
	pub target: String,
	/// Flow amount, always strictly positive.
	pub value: f64,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SankeyData {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl SankeyData {
	pub fn node(&self, name: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_category_label_roundtrip() {
		for category in Category::ALL {
			assert_eq!(Category::from_label(category.label()), Some(category));
		}
		assert_eq!(Category::from_label("football"), None);
	}

	#[test]
	fn test_row_deserialize() {
		let row: Row = serde_json::from_value(json!({
			"name": "Ticket Sales",
			"Football": 1500.0,
			"Men's Basketball": 250,
			"Total": 1750
		}))
		.unwrap();

		assert_eq!(row.name, "Ticket Sales");
		assert_eq!(row.total(), 1750.0);
		assert_eq!(row.amount(Category::Football), 1500.0);
		assert_eq!(row.amount(Category::MensBasketball), 250.0);
		assert_eq!(row.amount(Category::OtherSports), 0.0);
		assert!(row.unknown_fields().is_empty());
	}

	#[test]
	fn test_row_missing_total_is_zero() {
		let row: Row = serde_json::from_value(json!({ "name": "Other" })).unwrap();
		assert_eq!(row.total, None);
		assert_eq!(row.total(), 0.0);
	}

	#[test]
	fn test_row_non_numeric_total_is_zero() {
		let row: Row = serde_json::from_value(json!({
			"name": "Contributions",
			"Football": 12,
			"Total": "n/a"
		}))
		.unwrap();
		assert_eq!(row.total(), 0.0);
		assert_eq!(row.amount(Category::Football), 12.0);
		assert!(row.unknown_fields().is_empty());
	}

	#[test]
	fn test_category_serializes_as_slug() {
		for category in Category::ALL {
			assert_eq!(serde_json::to_value(category).unwrap(), json!(category.slug()));
		}
	}

	#[test]
	fn test_row_non_numeric_amount_is_zero() {
		let row: Row = serde_json::from_value(json!({
			"name": "Media Rights",
			"Football": "n/a",
			"Total": 0
		}))
		.unwrap();
		assert_eq!(row.amount(Category::Football), 0.0);
	}

	#[test]
	fn test_row_unknown_fields() {
		let row: Row = serde_json::from_value(json!({
			"name": "Recruiting",
			"football": 10,
			"Mens Basketball": 5,
			"Football": 3,
			"Total": 18
		}))
		.unwrap();
		assert_eq!(row.unknown_fields(), vec!["Mens Basketball", "football"]);
	}

	#[test]
	fn test_node_serialize_shape() {
		let node = Node {
			name: "source-mens-basketball".into(),
			title: "Men's Basketball".into(),
			group: NodeGroup::Source,
			category: Some(Category::MensBasketball),
		};
		assert_eq!(
			serde_json::to_value(&node).unwrap(),
			json!({
				"name": "source-mens-basketball",
				"title": "Men's Basketball",
				"group": "source",
				"category": "mens-basketball"
			})
		);
	}
}
