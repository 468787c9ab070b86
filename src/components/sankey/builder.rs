//! Turns athletics table rows into the five-column flow graph.
//!
//! Columns, left to right: source category anchors, revenue items, the
//! aggregator, expense items, target category anchors. Links are emitted in four
//! passes (anchor to revenue, revenue to aggregator, aggregator to expense,
//! expense to anchor), each iterating rows in input order and categories in
//! [`Category::ALL`] order. Only strictly positive amounts produce links.

use std::collections::HashSet;

use log::{debug, warn};

use super::naming::{
	AGGREGATE_NAME, AGGREGATE_TITLE, item_name, source_anchor_name, target_anchor_name,
};
use super::types::{Category, Flow, LineItem, Link, Node, NodeGroup, Row, SankeyData};
use crate::error::GraphError;

/// Number of leading rows in the athletics table that are revenue rows.
pub const REVENUE_ROW_COUNT: usize = 11;

/// Tags rows by position: the first [`REVENUE_ROW_COUNT`] are revenue, the rest
/// expense.
pub fn partition_rows(rows: Vec<Row>) -> Result<Vec<LineItem>, GraphError> {
	if rows.len() < REVENUE_ROW_COUNT {
		return Err(GraphError::TooFewRows {
			expected: REVENUE_ROW_COUNT,
			found: rows.len(),
		});
	}

	Ok(rows
		.into_iter()
		.enumerate()
		.map(|(i, row)| {
			if i < REVENUE_ROW_COUNT {
				LineItem::revenue(row)
			} else {
				LineItem::expense(row)
			}
		})
		.collect())
}

/// Builds the graph from a positionally ordered table.
pub fn build_from_rows(rows: Vec<Row>) -> Result<SankeyData, GraphError> {
	build(&partition_rows(rows)?)
}

/// Builds the graph from tagged line items.
///
/// Item order within each flow is preserved; revenue and expense items may be
/// interleaved in `items`.
pub fn build(items: &[LineItem]) -> Result<SankeyData, GraphError> {
	let revenue: Vec<&Row> = rows_of(items, Flow::Revenue);
	let expense: Vec<&Row> = rows_of(items, Flow::Expense);

	for item in items {
		let unknown = item.row.unknown_fields();
		if !unknown.is_empty() {
			warn!(
				"athletics-sankey: row {:?} has unknown category columns {:?}",
				item.row.name, unknown
			);
		}
	}

	let mut nodes = NodeSet::with_capacity(2 * Category::ALL.len() + items.len() + 1);

	for category in Category::ALL {
		nodes.insert(anchor_node(source_anchor_name(category), NodeGroup::Source, category))?;
	}
	let revenue_names = nodes.insert_items(Flow::Revenue, &revenue)?;
	nodes.insert(Node {
		name: AGGREGATE_NAME.to_string(),
		title: AGGREGATE_TITLE.to_string(),
		group: NodeGroup::Aggregate,
		category: None,
	})?;
	let expense_names = nodes.insert_items(Flow::Expense, &expense)?;
	for category in Category::ALL {
		nodes.insert(anchor_node(target_anchor_name(category), NodeGroup::Target, category))?;
	}

	let mut links = Vec::new();

	for (row, name) in revenue.iter().zip(&revenue_names) {
		for category in Category::ALL {
			push_link(&mut links, source_anchor_name(category), name, row.amount(category));
		}
	}
	for (row, name) in revenue.iter().zip(&revenue_names) {
		push_link(&mut links, name.clone(), AGGREGATE_NAME, row.total());
	}
	for (row, name) in expense.iter().zip(&expense_names) {
		push_link(&mut links, AGGREGATE_NAME.to_string(), name, row.total());
	}
	for (row, name) in expense.iter().zip(&expense_names) {
		for category in Category::ALL {
			push_link(&mut links, name.clone(), &target_anchor_name(category), row.amount(category));
		}
	}

	let data = SankeyData {
		nodes: nodes.into_nodes(),
		links,
	};
	debug!(
		"athletics-sankey: built {} nodes, {} links from {} revenue and {} expense rows",
		data.nodes.len(),
		data.links.len(),
		revenue.len(),
		expense.len()
	);
	Ok(data)
}

fn rows_of(items: &[LineItem], flow: Flow) -> Vec<&Row> {
	items
		.iter()
		.filter(|item| item.flow == flow)
		.map(|item| &item.row)
		.collect()
}

fn anchor_node(name: String, group: NodeGroup, category: Category) -> Node {
	Node {
		name,
		title: category.label().to_string(),
		group,
		category: Some(category),
	}
}

fn push_link(links: &mut Vec<Link>, source: String, target: &str, value: f64) {
	if value > 0.0 {
		links.push(Link {
			source,
			target: target.to_string(),
			value,
		});
	}
}

/// Ordered node list that refuses duplicate names.
struct NodeSet {
	nodes: Vec<Node>,
	seen: HashSet<String>,
}

impl NodeSet {
	fn with_capacity(capacity: usize) -> Self {
		Self {
			nodes: Vec::with_capacity(capacity),
			seen: HashSet::with_capacity(capacity),
		}
	}

	fn insert(&mut self, node: Node) -> Result<(), GraphError> {
		if !self.seen.insert(node.name.clone()) {
			return Err(GraphError::DuplicateNode(node.name));
		}
		self.nodes.push(node);
		Ok(())
	}

	fn insert_items(&mut self, flow: Flow, rows: &[&Row]) -> Result<Vec<String>, GraphError> {
		let group = match flow {
			Flow::Revenue => NodeGroup::Revenue,
			Flow::Expense => NodeGroup::Expense,
		};
		let mut names = Vec::with_capacity(rows.len());
		for row in rows {
			let name = item_name(flow, &row.name);
			self.insert(Node {
				name: name.clone(),
				title: row.name.clone(),
				group,
				category: None,
			})?;
			names.push(name);
		}
		Ok(names)
	}

	fn into_nodes(self) -> Vec<Node> {
		self.nodes
	}
}
