pub mod config;
pub mod constants;
pub mod descriptor;
pub mod impose;
pub mod layout;
pub mod pages;
pub mod render;
mod source;
mod stats;
mod types;

pub use config::{LayoutConfig, LayoutConfigBuilder};
pub use descriptor::parse_descriptor;
pub use impose::{
    ImposedSheet, Imposition, ImpositionSink, PlacementCommand, booklet_file, impose, impose_into,
    load_multiple_pdfs, load_pdf, nup_file, save_pdf, validate_document, validate_file,
};
pub use pages::resolve_page_selection;
pub use render::{ImageSources, PdfSources, PdfWriter};
pub use source::PageSource;
pub use stats::calculate_statistics;
pub use types::*;
