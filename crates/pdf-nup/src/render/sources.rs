//! Renderable source collections
//!
//! `PdfSources` concatenates the pages of one or more lopdf documents;
//! `ImageSources` holds decoded rasters (one pixel = one point).

use std::collections::HashMap;
use std::path::Path;

use image::RgbImage;
use log::debug;
use lopdf::{Document, ObjectId};

use crate::source::PageSource;
use crate::types::{ImposeError, Result};

use super::xobject::{create_image_xobject, create_page_xobject, get_page_dimensions, visible_box};

/// An XObject in the output document and how to map it onto a content rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedXObject {
    pub id: ObjectId,
    /// Image XObjects occupy the unit square; forms use their own units
    pub unit_square: bool,
    /// Lower-left corner of the form's BBox
    pub origin: (f32, f32),
}

/// Object copy caches, one per source document
#[derive(Debug, Default)]
pub struct CopyCache {
    per_document: HashMap<usize, HashMap<ObjectId, ObjectId>>,
}

impl CopyCache {
    fn for_document(&mut self, document: usize) -> &mut HashMap<ObjectId, ObjectId> {
        self.per_document.entry(document).or_default()
    }
}

fn missing_source(index: usize) -> ImposeError {
    ImposeError::invalid_range(&(index + 1).to_string(), "no such source page")
}

/// A source collection that can emit its items into an output document
pub trait RenderSource: PageSource {
    /// Add the item at `index` to `output` as an XObject
    fn xobject(
        &self,
        output: &mut Document,
        index: usize,
        cache: &mut CopyCache,
    ) -> Result<PlacedXObject>;
}

// =============================================================================
// PDF Pages
// =============================================================================

/// Pages of one or more PDF documents, in document then page order
#[derive(Debug, Clone)]
pub struct PdfSources {
    documents: Vec<Document>,
    /// (document index, page id) per source page
    pages: Vec<(usize, ObjectId)>,
    dimensions: Vec<(f32, f32)>,
}

impl PdfSources {
    pub fn new(documents: Vec<Document>) -> Self {
        let mut pages = Vec::new();
        let mut dimensions = Vec::new();
        for (doc_index, doc) in documents.iter().enumerate() {
            for page_id in doc.get_pages().into_values() {
                pages.push((doc_index, page_id));
                dimensions.push(get_page_dimensions(doc, page_id));
            }
        }
        debug!(
            "Collected {} pages from {} documents",
            pages.len(),
            documents.len()
        );
        Self {
            documents,
            pages,
            dimensions,
        }
    }

    pub fn from_document(document: Document) -> Self {
        Self::new(vec![document])
    }
}

impl PageSource for PdfSources {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_dimensions(&self, index: usize) -> (f32, f32) {
        self.dimensions.as_slice().page_dimensions(index)
    }
}

impl RenderSource for PdfSources {
    fn xobject(
        &self,
        output: &mut Document,
        index: usize,
        cache: &mut CopyCache,
    ) -> Result<PlacedXObject> {
        let (doc_index, page_id) = *self
            .pages
            .get(index)
            .ok_or_else(|| missing_source(index))?;
        let source = &self.documents[doc_index];

        let id = create_page_xobject(output, source, page_id, cache.for_document(doc_index))?;
        let [x0, y0, _, _] = visible_box(source, page_id);

        Ok(PlacedXObject {
            id,
            unit_square: false,
            origin: (x0, y0),
        })
    }
}

// =============================================================================
// Images
// =============================================================================

/// Decoded raster images
#[derive(Debug, Clone, Default)]
pub struct ImageSources {
    images: Vec<RgbImage>,
}

impl ImageSources {
    pub fn new(images: Vec<RgbImage>) -> Self {
        Self { images }
    }

    /// Decode image files (PNG or JPEG)
    pub fn open(paths: &[impl AsRef<Path>]) -> Result<Self> {
        let images = paths
            .iter()
            .map(|path| {
                let image = image::open(path.as_ref())?.to_rgb8();
                debug!(
                    "Decoded {} ({}x{})",
                    path.as_ref().display(),
                    image.width(),
                    image.height()
                );
                Ok(image)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { images })
    }
}

impl PageSource for ImageSources {
    fn page_count(&self) -> usize {
        self.images.len()
    }

    fn page_dimensions(&self, index: usize) -> (f32, f32) {
        match self.images.get(index) {
            Some(image) => (image.width() as f32, image.height() as f32),
            None => crate::constants::DEFAULT_PAGE_DIMENSIONS,
        }
    }
}

impl RenderSource for ImageSources {
    fn xobject(
        &self,
        output: &mut Document,
        index: usize,
        _cache: &mut CopyCache,
    ) -> Result<PlacedXObject> {
        let image = self
            .images
            .get(index)
            .ok_or_else(|| missing_source(index))?;

        Ok(PlacedXObject {
            id: create_image_xobject(output, image),
            unit_square: true,
            origin: (0.0, 0.0),
        })
    }
}
