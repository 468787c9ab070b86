//! Canvas rendering for the Sankey diagram.
//!
//! Drawing order: background, link bands, node rectangles with labels, then
//! the hover tooltip in screen space on top of everything.

use web_sys::CanvasRenderingContext2d;

use super::layout::{LinkLayout, NodeLayout};
use super::state::SankeyState;
use super::theme::Theme;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete diagram to the canvas.
pub fn render(state: &SankeyState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(state, ctx, theme);
	draw_links(state, ctx, theme);
	draw_nodes(state, ctx, theme);
	draw_tooltip(state, ctx, theme);
}

fn draw_background(state: &SankeyState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (state.width(), state.height());
	if theme.background.use_gradient {
		let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
		let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
		let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_links(state: &SankeyState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let t = smooth_step(state.highlight.intensity());
	let style = &theme.link;

	for (i, link) in state.layout.links.iter().enumerate() {
		let alpha = if t <= 0.001 {
			style.opacity
		} else if state.is_link_highlighted(i) {
			style.opacity + (style.highlight_opacity - style.opacity) * t
		} else {
			style.opacity + (style.dim_opacity - style.opacity) * t
		};

		let source = &state.layout.nodes[link.source];
		let target = &state.layout.nodes[link.target];
		draw_link(ctx, theme, source, target, link, alpha);
	}

	ctx.set_global_alpha(1.0);
}

fn draw_link(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	source: &NodeLayout,
	target: &NodeLayout,
	link: &LinkLayout,
	alpha: f64,
) {
	let (x0, x1) = (source.x1, target.x0);
	let xm = (x0 + x1) / 2.0;
	let source_color = theme.palette.node(source.group, source.category);
	let target_color = theme.palette.node(target.group, target.category);

	if theme.link.use_gradient {
		let gradient = ctx.create_linear_gradient(x0, 0.0, x1, 0.0);
		let _ = gradient.add_color_stop(0.0, &source_color.to_css());
		let _ = gradient.add_color_stop(1.0, &target_color.to_css());

		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
	} else {
		ctx.set_stroke_style_str(&source_color.to_css());
	}

	ctx.set_global_alpha(alpha);
	ctx.set_line_width(link.width.max(1.0));
	ctx.begin_path();
	ctx.move_to(x0, link.y0);
	ctx.bezier_curve_to(xm, link.y0, xm, link.y1, x1, link.y1);
	ctx.stroke();
}

fn draw_nodes(state: &SankeyState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let t = smooth_step(state.highlight.intensity());
	let style = &theme.node;
	let mid_x = state.width() / 2.0;

	ctx.set_font(&style.label_font);
	ctx.set_text_baseline("middle");

	for (i, node) in state.layout.nodes.iter().enumerate() {
		let alpha = if t > 0.001 && !state.is_node_highlighted(i) {
			1.0 - (1.0 - style.dim_opacity) * t
		} else {
			1.0
		};
		ctx.set_global_alpha(alpha);

		let color = theme.palette.node(node.group, node.category);
		let height = node.y1 - node.y0;
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill_rect(node.x0, node.y0, node.x1 - node.x0, height);

		if style.border_width > 0.0 {
			ctx.set_stroke_style_str(&color.darken(style.border_darken).to_css());
			ctx.set_line_width(style.border_width);
			ctx.stroke_rect(node.x0, node.y0, node.x1 - node.x0, height);
		}

		ctx.set_fill_style_str(&style.label_color.to_css());
		let y = (node.y0 + node.y1) / 2.0;
		if node.x0 < mid_x {
			ctx.set_text_align("start");
			let _ = ctx.fill_text(&node.title, node.x1 + style.label_offset, y);
		} else {
			ctx.set_text_align("end");
			let _ = ctx.fill_text(&node.title, node.x0 - style.label_offset, y);
		}
	}

	ctx.set_global_alpha(1.0);
}

fn draw_tooltip(state: &SankeyState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (Some((px, py)), Some(lines)) = (state.pointer, state.tooltip_lines()) else {
		return;
	};
	let style = &theme.tooltip;

	ctx.set_font(&style.font);
	ctx.set_text_align("start");
	ctx.set_text_baseline("top");

	let text_width = lines
		.iter()
		.filter_map(|line| ctx.measure_text(line).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let box_w = text_width + style.padding * 2.0;
	let box_h = style.line_height * lines.len() as f64 + style.padding * 2.0;

	// Flip to the other side of the pointer near the right/bottom edges.
	let mut x = px + style.offset;
	if x + box_w > state.width() {
		x = (px - style.offset - box_w).max(0.0);
	}
	let mut y = py + style.offset;
	if y + box_h > state.height() {
		y = (py - style.offset - box_h).max(0.0);
	}

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(x, y, box_w, box_h);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, box_w, box_h);

	ctx.set_fill_style_str(&style.text.to_css());
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(
			line,
			x + style.padding,
			y + style.padding + style.line_height * i as f64,
		);
	}
}
