//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages and images
//! - Writing imposed sheets into an output document
//! - Background, border and guide content ops
//! - Deep copying PDF objects

mod marks;
mod sources;
mod writer;
mod xobject;

pub use sources::{CopyCache, ImageSources, PdfSources, PlacedXObject, RenderSource};
pub use writer::PdfWriter;
pub use xobject::{
    copy_object_deep, create_image_xobject, create_page_xobject, get_page_dimensions, page_box,
    visible_box,
};
