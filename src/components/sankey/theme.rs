//! Visual theming for the Sankey diagram.
//!
//! Colors are keyed by [`Category`] for anchor nodes and by [`NodeGroup`] for
//! everything else, so coloring never depends on parsing node names.

use super::types::{Category, NodeGroup};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill colors.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// One color per entry of [`Category::ALL`], same order.
	pub categories: [Color; 5],
	pub revenue: Color,
	pub aggregate: Color,
	pub expense: Color,
}

impl NodePalette {
	/// Categorical palette in the familiar ten-color order.
	pub fn categorical() -> Self {
		Self {
			categories: [
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
			],
			revenue: Color::rgb(120, 170, 130),
			aggregate: Color::rgb(140, 140, 150),
			expense: Color::rgb(190, 130, 120),
		}
	}

	/// Muted palette for dark backgrounds.
	pub fn slate() -> Self {
		Self {
			categories: [
				Color::rgb(94, 129, 172),
				Color::rgb(196, 146, 96),
				Color::rgb(110, 160, 130),
				Color::rgb(180, 110, 115),
				Color::rgb(150, 130, 180),
			],
			revenue: Color::rgb(119, 158, 165),
			aggregate: Color::rgb(143, 163, 180),
			expense: Color::rgb(175, 125, 105),
		}
	}

	pub fn category(&self, category: Category) -> Color {
		let i = Category::ALL
			.iter()
			.position(|c| *c == category)
			.unwrap_or(0);
		self.categories[i]
	}

	/// Fill for a node; anchors take their category color.
	pub fn node(&self, group: NodeGroup, category: Option<Category>) -> Color {
		match (group, category) {
			(_, Some(category)) => self.category(category),
			(NodeGroup::Revenue, None) => self.revenue,
			(NodeGroup::Expense, None) => self.expense,
			_ => self.aggregate,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use a vertical gradient
	pub use_gradient: bool,
}

/// Link band style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Band opacity with nothing hovered
	pub opacity: f64,
	/// Opacity of bands attached to the hover target
	pub highlight_opacity: f64,
	/// Opacity of all other bands while something is hovered
	pub dim_opacity: f64,
	/// Blend from source color to target color along the band
	pub use_gradient: bool,
}

/// Node and label style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border darkening relative to the fill
	pub border_darken: f64,
	/// Opacity of nodes not related to the hover target
	pub dim_opacity: f64,
	pub label_font: String,
	pub label_color: Color,
	/// Gap between node edge and label
	pub label_offset: f64,
}

/// Hover tooltip style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	pub background: Color,
	pub border: Color,
	pub text: Color,
	pub font: String,
	pub line_height: f64,
	pub padding: f64,
	/// Offset from the pointer
	pub offset: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub link: LinkStyle,
	pub node: NodeStyle,
	pub tooltip: TooltipStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Light theme matching a printed report (default)
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
			},
			link: LinkStyle {
				opacity: 0.35,
				highlight_opacity: 0.6,
				dim_opacity: 0.12,
				use_gradient: true,
			},
			node: NodeStyle {
				border_width: 1.0,
				border_darken: 0.3,
				dim_opacity: 0.4,
				label_font: "11px sans-serif".to_string(),
				label_color: Color::rgb(34, 34, 34),
				label_offset: 6.0,
			},
			tooltip: TooltipStyle {
				background: Color::rgba(255, 255, 255, 0.95),
				border: Color::rgba(0, 0, 0, 0.25),
				text: Color::rgb(34, 34, 34),
				font: "12px sans-serif".to_string(),
				line_height: 16.0,
				padding: 6.0,
				offset: 12.0,
			},
			palette: NodePalette::categorical(),
		}
	}

	/// Dark theme with muted colors
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
			},
			link: LinkStyle {
				opacity: 0.3,
				highlight_opacity: 0.55,
				dim_opacity: 0.08,
				use_gradient: true,
			},
			node: NodeStyle {
				border_width: 0.0,
				border_darken: 0.0,
				dim_opacity: 0.35,
				label_font: "11px sans-serif".to_string(),
				label_color: Color::rgba(255, 255, 255, 0.85),
				label_offset: 6.0,
			},
			tooltip: TooltipStyle {
				background: Color::rgba(30, 35, 42, 0.95),
				border: Color::rgba(255, 255, 255, 0.2),
				text: Color::rgb(230, 230, 235),
				font: "12px sans-serif".to_string(),
				line_height: 16.0,
				padding: 6.0,
				offset: 12.0,
			},
			palette: NodePalette::slate(),
		}
	}

	/// Looks up a theme by name, as given in the host page's `data-theme`.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"paper" | "light" => Some(Self::paper()),
			"midnight" | "dark" => Some(Self::midnight()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::paper()
	}
}
