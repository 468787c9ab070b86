//! Sankey geometry: node rectangles and link bands.
//!
//! Nodes sit in fixed columns given by their [`NodeGroup`]. A node's height is
//! proportional to its throughput (the larger of inflow and outflow), with one
//! vertical scale shared by all columns so that equal amounts have equal
//! heights everywhere. Within a column nodes keep their input order and the
//! column is centered vertically. Link bands are stacked along each node edge
//! in link order.
//!
//! Link paths are cubic Béziers with horizontal tangents at both ends, control
//! points at the horizontal midpoint.

use std::collections::HashMap;

use log::warn;

use super::types::{Category, NodeGroup, SankeyData};

/// Outer spacing around the diagram.
#[derive(Clone, Debug)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

/// Layout tuning.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Node rectangle width in pixels.
	pub node_width: f64,
	/// Vertical gap between nodes in the same column.
	pub node_padding: f64,
	pub margin: Margin,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: 15.0,
			node_padding: 10.0,
			margin: Margin {
				top: 40.0,
				right: 160.0,
				bottom: 20.0,
				left: 160.0,
			},
		}
	}
}

/// A positioned node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeLayout {
	pub name: String,
	pub title: String,
	pub group: NodeGroup,
	pub category: Option<Category>,
	/// Throughput: max(inflow, outflow).
	pub value: f64,
	pub x0: f64,
	pub x1: f64,
	pub y0: f64,
	pub y1: f64,
}

impl NodeLayout {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
	}
}

/// A positioned link band. `y0`/`y1` are the band centers at source and target.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkLayout {
	/// Index into [`SankeyLayout::nodes`].
	pub source: usize,
	/// Index into [`SankeyLayout::nodes`].
	pub target: usize,
	pub value: f64,
	pub width: f64,
	pub y0: f64,
	pub y1: f64,
}

/// Computed geometry for a whole diagram.
#[derive(Clone, Debug, Default)]
pub struct SankeyLayout {
	pub nodes: Vec<NodeLayout>,
	pub links: Vec<LinkLayout>,
	pub width: f64,
	pub height: f64,
	/// Pixels per unit of value.
	pub scale: f64,
}

impl SankeyLayout {
	pub fn compute(data: &SankeyData, width: f64, height: f64, config: &LayoutConfig) -> Self {
		let m = &config.margin;
		let inner_w = (width - m.left - m.right).max(0.0);
		let inner_h = (height - m.top - m.bottom).max(0.0);

		let index: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.name.as_str(), i))
			.collect();

		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			match (index.get(link.source.as_str()), index.get(link.target.as_str())) {
				(Some(&source), Some(&target)) => links.push(LinkLayout {
					source,
					target,
					value: link.value,
					width: 0.0,
					y0: 0.0,
					y1: 0.0,
				}),
				_ => warn!(
					"athletics-sankey: skipping link {} -> {} with unknown endpoint",
					link.source, link.target
				),
			}
		}

		let mut inflow = vec![0.0; data.nodes.len()];
		let mut outflow = vec![0.0; data.nodes.len()];
		for link in &links {
			outflow[link.source] += link.value;
			inflow[link.target] += link.value;
		}

		let column_step = (inner_w - config.node_width).max(0.0) / (NodeGroup::COLUMNS - 1) as f64;
		let mut nodes: Vec<NodeLayout> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| {
				let x0 = m.left + column_step * n.group.column() as f64;
				NodeLayout {
					name: n.name.clone(),
					title: n.title.clone(),
					group: n.group,
					category: n.category,
					value: f64::max(inflow[i], outflow[i]),
					x0,
					x1: x0 + config.node_width,
					y0: 0.0,
					y1: 0.0,
				}
			})
			.collect();

		let mut columns: Vec<Vec<usize>> = vec![Vec::new(); NodeGroup::COLUMNS];
		for (i, node) in nodes.iter().enumerate() {
			columns[node.group.column()].push(i);
		}

		let scale = columns
			.iter()
			.filter(|col| !col.is_empty())
			.filter_map(|col| {
				let total: f64 = col.iter().map(|&i| nodes[i].value).sum();
				let room = inner_h - config.node_padding * (col.len() - 1) as f64;
				(total > 0.0).then(|| (room / total).max(0.0))
			})
			.fold(f64::INFINITY, f64::min);
		let scale = if scale.is_finite() { scale } else { 0.0 };

		for col in &columns {
			if col.is_empty() {
				continue;
			}
			let used: f64 = col.iter().map(|&i| nodes[i].value * scale).sum::<f64>()
				+ config.node_padding * (col.len() - 1) as f64;
			let mut y = m.top + ((inner_h - used) / 2.0).max(0.0);
			for &i in col {
				let node = &mut nodes[i];
				node.y0 = y;
				node.y1 = y + node.value * scale;
				y = node.y1 + config.node_padding;
			}
		}

		let mut out_offset: Vec<f64> = nodes.iter().map(|n| n.y0).collect();
		let mut in_offset = out_offset.clone();
		for link in &mut links {
			link.width = link.value * scale;
			link.y0 = out_offset[link.source] + link.width / 2.0;
			out_offset[link.source] += link.width;
			link.y1 = in_offset[link.target] + link.width / 2.0;
			in_offset[link.target] += link.width;
		}

		Self {
			nodes,
			links,
			width,
			height,
			scale,
		}
	}

	pub fn node_index(&self, name: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.name == name)
	}

	/// Topmost node under a point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes.iter().rposition(|n| n.contains(x, y))
	}

	/// Band center of a link at horizontal position `x`, if `x` lies within its span.
	pub fn link_center_y(&self, link: &LinkLayout, x: f64) -> Option<f64> {
		let x_start = self.nodes[link.source].x1;
		let x_end = self.nodes[link.target].x0;
		if x < x_start || x > x_end || x_end <= x_start {
			return None;
		}

		// x(t) normalized to [0, 1] is t^3 - 1.5t^2 + 1.5t, monotone on [0, 1].
		let target = (x - x_start) / (x_end - x_start);
		let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
		for _ in 0..32 {
			let t = (lo + hi) / 2.0;
			if t * t * t - 1.5 * t * t + 1.5 * t < target {
				lo = t;
			} else {
				hi = t;
			}
		}
		let t = (lo + hi) / 2.0;
		let ease = t * t * (3.0 - 2.0 * t);
		Some(link.y0 + (link.y1 - link.y0) * ease)
	}

	/// Last-drawn link whose band covers a point.
	pub fn link_at(&self, x: f64, y: f64) -> Option<usize> {
		self.links.iter().rposition(|link| {
			self.link_center_y(link, x)
				.is_some_and(|cy| (y - cy).abs() <= (link.width / 2.0).max(1.0))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sankey::builder::build;
	use crate::components::sankey::types::{Category, LineItem, Row};

	fn config() -> LayoutConfig {
		LayoutConfig {
			node_width: 10.0,
			node_padding: 10.0,
			margin: Margin {
				top: 0.0,
				right: 0.0,
				bottom: 0.0,
				left: 0.0,
			},
		}
	}

	fn sample() -> SankeyData {
		build(&[
			LineItem::revenue(
				Row::new("Ticket Sales")
					.with_total(300.0)
					.with_amount(Category::Football, 200.0)
					.with_amount(Category::MensBasketball, 100.0),
			),
			LineItem::revenue(
				Row::new("Student Fees")
					.with_total(100.0)
					.with_amount(Category::OtherSports, 100.0),
			),
			LineItem::expense(
				Row::new("Team Travel")
					.with_total(400.0)
					.with_amount(Category::Football, 400.0),
			),
		])
		.unwrap()
	}

	#[test]
	fn test_columns_and_values() {
		let layout = SankeyLayout::compute(&sample(), 410.0, 500.0, &config());

		let agg = &layout.nodes[layout.node_index("athletics").unwrap()];
		assert_eq!(agg.value, 400.0);
		assert_eq!(agg.x0, 200.0);
		assert_eq!(agg.x1, 210.0);

		let source = &layout.nodes[layout.node_index("source-football").unwrap()];
		assert_eq!(source.x0, 0.0);
		let target = &layout.nodes[layout.node_index("target-football").unwrap()];
		assert_eq!(target.x1, 410.0);
		assert_eq!(target.value, 400.0);
	}

	#[test]
	fn test_shared_scale_fits_tightest_column() {
		let layout = SankeyLayout::compute(&sample(), 410.0, 500.0, &config());
		// Source and target columns each hold 5 nodes: (500 - 40) / 400.
		assert!((layout.scale - 1.15).abs() < 1e-9);

		for node in &layout.nodes {
			assert!(node.y0 >= 0.0 && node.y1 <= 500.0 + 1e-9);
			assert!((node.y1 - node.y0 - node.value * layout.scale).abs() < 1e-9);
		}
	}

	#[test]
	fn test_column_order_preserved() {
		let layout = SankeyLayout::compute(&sample(), 410.0, 500.0, &config());
		let sources: Vec<&NodeLayout> = layout
			.nodes
			.iter()
			.filter(|n| n.group == NodeGroup::Source)
			.collect();
		for pair in sources.windows(2) {
			assert!(pair[0].y1 <= pair[1].y0);
		}
	}

	#[test]
	fn test_link_bands_stack_along_node() {
		let layout = SankeyLayout::compute(&sample(), 410.0, 500.0, &config());
		let agg = layout.node_index("athletics").unwrap();
		let incoming: Vec<&LinkLayout> = layout.links.iter().filter(|l| l.target == agg).collect();
		assert_eq!(incoming.len(), 2);

		let node = &layout.nodes[agg];
		assert!((incoming[0].y1 - incoming[0].width / 2.0 - node.y0).abs() < 1e-9);
		assert!(
			(incoming[1].y1 - incoming[1].width / 2.0 - (node.y0 + incoming[0].width)).abs() < 1e-9
		);
		let total: f64 = incoming.iter().map(|l| l.width).sum();
		assert!((total - (node.y1 - node.y0)).abs() < 1e-9);
	}

	#[test]
	fn test_unknown_link_endpoint_skipped() {
		let mut data = sample();
		let before = data.links.len();
		data.links.push(crate::components::sankey::types::Link {
			source: "nowhere".into(),
			target: "athletics".into(),
			value: 5.0,
		});
		let layout = SankeyLayout::compute(&data, 410.0, 500.0, &config());
		assert_eq!(layout.links.len(), before);
	}

	#[test]
	fn test_empty_graph() {
		let layout = SankeyLayout::compute(&SankeyData::default(), 400.0, 300.0, &config());
		assert!(layout.nodes.is_empty());
		assert_eq!(layout.scale, 0.0);
	}

	#[test]
	fn test_degenerate_size_does_not_go_negative() {
		let layout = SankeyLayout::compute(&sample(), 10.0, 10.0, &LayoutConfig::default());
		assert!(layout.scale >= 0.0);
		for link in &layout.links {
			assert!(link.width >= 0.0);
		}
	}

	#[test]
	fn test_link_center_and_hit_testing() {
		let layout = SankeyLayout::compute(&sample(), 410.0, 500.0, &config());
		let idx = layout
			.links
			.iter()
			.position(|l| layout.nodes[l.target].name == "athletics")
			.unwrap();
		let link = &layout.links[idx];
		let x_start = layout.nodes[link.source].x1;
		let x_end = layout.nodes[link.target].x0;

		let start = layout.link_center_y(link, x_start).unwrap();
		let mid = layout.link_center_y(link, (x_start + x_end) / 2.0).unwrap();
		let end = layout.link_center_y(link, x_end).unwrap();
		assert!((start - link.y0).abs() < 1e-6);
		assert!((mid - (link.y0 + link.y1) / 2.0).abs() < 1e-6);
		assert!((end - link.y1).abs() < 1e-6);
		assert_eq!(layout.link_center_y(link, x_start - 1.0), None);

		assert_eq!(layout.link_at((x_start + x_end) / 2.0, mid), Some(idx));
		assert_eq!(layout.link_at(x_start + 1.0, -100.0), None);
	}

	#[test]
	fn test_node_at() {
		let layout = SankeyLayout::compute(&sample(), 410.0, 500.0, &config());
		let agg = layout.node_index("athletics").unwrap();
		let node = &layout.nodes[agg];
		assert!(node.contains(node.x0 + 1.0, node.y0 + 1.0));
		assert_eq!(layout.node_at(node.x0 + 1.0, (node.y0 + node.y1) / 2.0), Some(agg));
		assert_eq!(layout.node_at(100.0, -5.0), None);
	}
}
