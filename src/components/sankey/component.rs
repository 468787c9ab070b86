//! Leptos component wrapping the Sankey canvas.
//!
//! The component creates an HTML canvas element and wires up pointer handlers
//! for hover inspection. An animation loop runs via `requestAnimationFrame`,
//! advancing the highlight fade and redrawing each frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::layout::LayoutConfig;
use super::render;
use super::state::SankeyState;
use super::theme::Theme;
use super::types::SankeyData;

/// Longest frame step fed to the highlight animation, in seconds.
const MAX_FRAME_DT: f64 = 0.1;

/// Bundles diagram state with the theme it is drawn in.
struct RenderContext {
	state: SankeyState,
	theme: Theme,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders a Sankey diagram on a canvas element.
///
/// Pass graph data via the reactive `data` signal. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// viewport and relayout automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
#[component]
pub fn SankeyCanvas(
	#[prop(into)] data: Signal<SankeyData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(default = LayoutConfig::default())] layout: LayoutConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<RenderContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	// Canvas setup, listeners and the frame loop are registered once; later
	// data changes go through the effect below.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("athletics-sankey: canvas 2d context unavailable");
				return;
			}
		};

		*context_init.borrow_mut() = Some(RenderContext {
			state: SankeyState::new(data.get_untracked(), w, h, layout.clone()),
			theme: theme.clone(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let last_frame = Rc::new(Cell::new(js_sys::Date::now()));
		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame.replace(now)) / 1000.0).clamp(0.0, MAX_FRAME_DT);
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt);
				render::render(&c.state, &ctx, &c.theme);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_data = context.clone();
	Effect::new(move |_| {
		let next = data.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			c.state.set_data(next);
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.set_pointer(x, y);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.clear_pointer();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="sankey-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: default;"
		/>
	}
}
