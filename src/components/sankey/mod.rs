//! Sankey diagram of athletics revenue and expense flows.
//!
//! Table rows become a five-column flow graph:
//! - Category anchors on the left feed revenue line items
//! - Revenue items all flow into a single aggregator node
//! - The aggregator feeds expense line items
//! - Expense items drain into category anchors on the right
//!
//! [`build_from_rows`] and [`build`] are pure and usable without a browser;
//! [`SankeyCanvas`] lays the graph out and draws it with hover inspection.
//!
//! # Example
//!
//! ```ignore
//! use athletics_sankey::{SankeyCanvas, build_from_rows, rows_from_document, DATASET_KEY};
//!
//! let rows = rows_from_document(json, DATASET_KEY)?;
//! let data = build_from_rows(rows)?;
//!
//! view! { <SankeyCanvas data=data.into() fullscreen=true /> }
//! ```

pub mod builder;
mod component;
pub mod document;
pub mod format;
pub mod layout;
pub mod naming;
mod render;
mod state;
pub mod theme;
mod types;

pub use builder::{REVENUE_ROW_COUNT, build, build_from_rows, partition_rows};
pub use component::SankeyCanvas;
pub use document::{DATASET_KEY, rows_from_document};
pub use layout::{LayoutConfig, SankeyLayout};
pub use theme::Theme;
pub use types::{Category, Flow, LineItem, Link, Node, NodeGroup, Row, SankeyData};
