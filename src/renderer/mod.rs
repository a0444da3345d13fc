//! SVG preview renderer for layout documents
//!
//! Produces a canvas-sized SVG with `eb-`-prefixed CSS classes. Tables are
//! embedded as XHTML inside `<foreignObject>`.

pub mod config;
pub mod svg;
pub mod table;

pub use config::SvgConfig;
pub use svg::{render_layout, render_svg};
pub use table::{CellView, HeaderCell, TableView};
