//! Node identity derived from labels.
//!
//! Every group has its own prefix, so names can only collide inside a group.
//! The builder rejects such collisions instead of merging rows.

use super::types::{Category, Flow};

/// Fixed name of the aggregator node.
pub const AGGREGATE_NAME: &str = "athletics";
/// Display title of the aggregator node.
pub const AGGREGATE_TITLE: &str = "Athletics";

/// Lowercases a label and collapses whitespace runs into single hyphens.
pub fn slugify(label: &str) -> String {
	label
		.split_whitespace()
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("-")
}

pub fn source_anchor_name(category: Category) -> String {
	format!("source-{}", category.slug())
}

pub fn target_anchor_name(category: Category) -> String {
	format!("target-{}", category.slug())
}

/// Name for a revenue or expense line item node.
pub fn item_name(flow: Flow, label: &str) -> String {
	let prefix = match flow {
		Flow::Revenue => "revenue",
		Flow::Expense => "expense",
	};
	format!("{prefix}-{}", slugify(label))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_slugify() {
		assert_eq!(slugify("Ticket Sales"), "ticket-sales");
		assert_eq!(slugify("  Direct   Institutional\tSupport "), "direct-institutional-support");
		assert_eq!(
			slugify("Royalties, Licensing, Advertisement"),
			"royalties,-licensing,-advertisement"
		);
		assert_eq!(slugify(""), "");
	}

	#[test]
	fn test_items_normalized_the_same_on_both_sides() {
		assert_eq!(item_name(Flow::Revenue, "Other Revenue"), "revenue-other-revenue");
		assert_eq!(item_name(Flow::Expense, "Team Travel"), "expense-team-travel");
	}

	#[test]
	fn test_anchor_names() {
		assert_eq!(source_anchor_name(Category::Football), "source-football");
		assert_eq!(
			target_anchor_name(Category::NonProgramSpecific),
			"target-non-program-specific"
		);
	}

	#[test]
	fn test_names_unique_across_groups() {
		let mut names = HashSet::new();
		for category in Category::ALL {
			assert!(names.insert(source_anchor_name(category)));
			assert!(names.insert(target_anchor_name(category)));
		}
		assert!(names.insert(AGGREGATE_NAME.to_string()));
		assert!(names.insert(item_name(Flow::Revenue, "Football")));
		assert!(names.insert(item_name(Flow::Expense, "Football")));
	}
}
