//! athletics-sankey: Sankey diagram of university athletics finances.
//!
//! This crate turns the athletics revenue/expense table into a weighted flow
//! graph and renders it as an interactive Sankey diagram in the browser.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::sankey::{
	Category, DATASET_KEY, Flow, LayoutConfig, LineItem, Link, Node, NodeGroup, REVENUE_ROW_COUNT,
	Row, SankeyCanvas, SankeyData, SankeyLayout, Theme, build, build_from_rows, partition_rows,
	rows_from_document,
};
pub use error::GraphError;

/// Id of the script element carrying the finance document.
const DATA_ELEMENT_ID: &str = "finance-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("athletics-sankey: logging initialized");
}

/// Settings read from the data element's attributes.
struct PageConfig {
	dataset: String,
	theme: Theme,
}

fn data_element() -> Option<HtmlScriptElement> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(DATA_ELEMENT_ID)?;
	element.dyn_into().ok()
}

fn page_config(script: &HtmlScriptElement) -> PageConfig {
	let dataset = script
		.get_attribute("data-dataset")
		.unwrap_or_else(|| DATASET_KEY.to_string());
	let theme = match script.get_attribute("data-theme") {
		Some(name) => Theme::by_name(&name).unwrap_or_else(|| {
			warn!("athletics-sankey: unknown theme {name:?}, using default");
			Theme::default()
		}),
		None => Theme::default(),
	};
	PageConfig { dataset, theme }
}

/// Load the finance document from a script element with id="finance-data"
/// and build the flow graph from its athletics table.
fn load_graph_data(script: &HtmlScriptElement, dataset: &str) -> Option<SankeyData> {
	let json_text = script.text().ok()?;

	match rows_from_document(&json_text, dataset).and_then(build_from_rows) {
		Ok(data) => {
			info!(
				"athletics-sankey: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			error!("athletics-sankey: failed to build graph: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the finance table from the DOM and renders the Sankey diagram.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let (graph_data, theme) = match data_element() {
		Some(script) => {
			let config = page_config(&script);
			(load_graph_data(&script, &config.dataset), config.theme)
		}
		None => {
			warn!("athletics-sankey: no #{} element found", DATA_ELEMENT_ID);
			(None, Theme::default())
		}
	};
	let graph_data = graph_data.unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Athletics Finances" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<SankeyCanvas data=graph_signal fullscreen=true theme=theme />
			<div class="graph-overlay">
				<h1>"Athletics Revenue and Expenses"</h1>
				<p class="subtitle">"Hover a node or flow to see its amount."</p>
			</div>
		</div>
	}
}
