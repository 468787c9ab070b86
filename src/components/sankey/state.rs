//! Diagram state: computed layout plus hover tracking.
//!
//! Hover highlighting fades in and out with exponential smoothing, the same
//! way for nodes and links. While fading out the previous target stays
//! highlighted so the dimming does not jump.

use super::format::format_amount;
use super::layout::{LayoutConfig, SankeyLayout};
use super::types::SankeyData;

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(usize),
	Link(usize),
}

/// Smoothed hover highlight.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Target under the pointer right now.
	target: Option<HoverTarget>,
	/// Target being drawn; lags `target` while fading out.
	shown: Option<HoverTarget>,
	intensity: f64,
}

impl HighlightState {
	pub fn set_target(&mut self, target: Option<HoverTarget>) {
		self.target = target;
		if target.is_some() {
			self.shown = target;
		}
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 10.0;
		const FADE_OUT_SPEED: f64 = 6.0;

		if self.target.is_some() {
			self.intensity += (1.0 - self.intensity) * (1.0 - (-FADE_IN_SPEED * dt).exp());
		} else {
			self.intensity *= (-FADE_OUT_SPEED * dt).exp();
			if self.intensity < 0.005 {
				self.intensity = 0.0;
				self.shown = None;
			}
		}
	}

	pub fn target(&self) -> Option<HoverTarget> {
		self.target
	}

	pub fn shown(&self) -> Option<HoverTarget> {
		self.shown
	}

	pub fn intensity(&self) -> f64 {
		self.intensity
	}
}

/// Everything the renderer needs for one frame.
pub struct SankeyState {
	pub data: SankeyData,
	pub config: LayoutConfig,
	pub layout: SankeyLayout,
	pub highlight: HighlightState,
	/// Pointer position in canvas pixels.
	pub pointer: Option<(f64, f64)>,
}

impl SankeyState {
	pub fn new(data: SankeyData, width: f64, height: f64, config: LayoutConfig) -> Self {
		let layout = SankeyLayout::compute(&data, width, height, &config);
		Self {
			data,
			config,
			layout,
			highlight: HighlightState::default(),
			pointer: None,
		}
	}

	pub fn width(&self) -> f64 {
		self.layout.width
	}

	pub fn height(&self) -> f64 {
		self.layout.height
	}

	/// Nodes take precedence over the link bands they overlap.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
		let target = self
			.layout
			.node_at(x, y)
			.map(HoverTarget::Node)
			.or_else(|| self.layout.link_at(x, y).map(HoverTarget::Link));
		self.highlight.set_target(target);
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
		self.highlight.set_target(None);
	}

	pub fn tick(&mut self, dt: f64) {
		self.highlight.tick(dt);
	}

	/// Recomputes the layout for a new canvas size. Node and link indices are
	/// unchanged, so hover state carries over.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.layout = SankeyLayout::compute(&self.data, width, height, &self.config);
	}

	/// Replaces the graph, keeping the current canvas size. Indices from the
	/// old layout are meaningless afterwards, so hover state is dropped.
	pub fn set_data(&mut self, data: SankeyData) {
		self.layout = SankeyLayout::compute(&data, self.width(), self.height(), &self.config);
		self.data = data;
		self.highlight = HighlightState::default();
		self.pointer = None;
	}

	pub fn is_node_highlighted(&self, node: usize) -> bool {
		match self.highlight.shown() {
			Some(HoverTarget::Node(n)) => {
				n == node
					|| self.layout.links.iter().any(|l| {
						(l.source == n && l.target == node) || (l.target == n && l.source == node)
					})
			}
			Some(HoverTarget::Link(i)) => self
				.layout
				.links
				.get(i)
				.is_some_and(|l| l.source == node || l.target == node),
			None => false,
		}
	}

	pub fn is_link_highlighted(&self, link: usize) -> bool {
		match self.highlight.shown() {
			Some(HoverTarget::Node(n)) => self
				.layout
				.links
				.get(link)
				.is_some_and(|l| l.source == n || l.target == n),
			Some(HoverTarget::Link(i)) => i == link,
			None => false,
		}
	}

	/// Hover text for the target under the pointer.
	pub fn tooltip_lines(&self) -> Option<Vec<String>> {
		match self.highlight.target()? {
			HoverTarget::Node(i) => {
				let node = self.layout.nodes.get(i)?;
				Some(vec![node.title.clone(), format_amount(node.value)])
			}
			HoverTarget::Link(i) => {
				let link = self.layout.links.get(i)?;
				let source = &self.layout.nodes[link.source];
				let target = &self.layout.nodes[link.target];
				Some(vec![
					format!("{} → {}", source.title, target.title),
					format_amount(link.value),
				])
			}
		}
	}
}
