//! lopdf-backed imposition sink

use std::collections::HashMap;

use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::impose::{ImposedSheet, ImpositionSink, PlacementCommand};
use crate::layout::Rect;
use crate::types::Result;

use super::marks::{border_ops, fill_rect, guide_ops};
use super::sources::{CopyCache, PlacedXObject, RenderSource};

/// Builds an output PDF, one page per imposed sheet side
pub struct PdfWriter<'a, R: RenderSource + ?Sized> {
    sources: &'a R,
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    /// XObject per source index; each source is embedded once
    xobjects: HashMap<usize, PlacedXObject>,
    cache: CopyCache,
}

impl<'a, R: RenderSource + ?Sized> PdfWriter<'a, R> {
    pub fn new(sources: &'a R) -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Self {
            sources,
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            xobjects: HashMap::new(),
            cache: CopyCache::default(),
        }
    }

    /// Pages written so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Finish the page tree and catalog and hand over the document
    pub fn finish(mut self) -> Document {
        finalize_document(&mut self.output, self.pages_tree_id, self.page_refs);
        self.output
    }

    fn xobject_for(&mut self, source: usize) -> Result<PlacedXObject> {
        if let Some(placed) = self.xobjects.get(&source) {
            return Ok(*placed);
        }
        let placed = self
            .sources
            .xobject(&mut self.output, source, &mut self.cache)?;
        self.xobjects.insert(source, placed);
        Ok(placed)
    }
}

impl<R: RenderSource + ?Sized> ImpositionSink for PdfWriter<'_, R> {
    fn write_sheet(&mut self, sheet: &ImposedSheet) -> Result<()> {
        let sheet_rect = Rect::new(0.0, 0.0, sheet.width, sheet.height);

        let mut content_ops = Vec::new();
        let mut xobjects = Dictionary::new();
        let mut borders = Vec::new();

        if let Some(background) = sheet.background {
            content_ops.push(fill_rect(background, &sheet_rect));
        }

        for command in &sheet.commands {
            match command {
                PlacementCommand::Place {
                    source,
                    tile_rect,
                    content_rect,
                    scale,
                    border,
                    ..
                } => {
                    let placed = self.xobject_for(*source)?;
                    let name = format!("X{}", source);
                    xobjects.set(name.as_bytes(), Object::Reference(placed.id));
                    content_ops.push(placement_command(&name, &placed, content_rect, *scale));
                    if *border {
                        borders.push(*tile_rect);
                    }
                }
                PlacementCommand::Blank {
                    rect, fill, border, ..
                } => {
                    if let Some(fill) = fill {
                        content_ops.push(fill_rect(*fill, rect));
                    }
                    if *border {
                        borders.push(*rect);
                    }
                }
            }
        }

        content_ops.push(border_ops(&borders));
        content_ops.push(guide_ops(&sheet.guides));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content = content_ops.join("");
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(sheet.width),
                Object::Real(sheet.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));

        debug!(
            "Wrote sheet {} ({:?}) with {} tiles",
            sheet.index,
            sheet.side,
            sheet.commands.len()
        );
        Ok(())
    }
}

/// `cm` + `Do` placing an XObject into `rect`
fn placement_command(name: &str, placed: &PlacedXObject, rect: &Rect, scale: f32) -> String {
    if placed.unit_square {
        format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            rect.width, rect.height, rect.x, rect.y, name
        )
    } else {
        let (origin_x, origin_y) = placed.origin;
        format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            scale,
            scale,
            rect.x - origin_x * scale,
            rect.y - origin_y * scale,
            name
        )
    }
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_placement_offsets_origin() {
        let placed = PlacedXObject {
            id: (1, 0),
            unit_square: false,
            origin: (10.0, 20.0),
        };
        let ops = placement_command("X0", &placed, &Rect::new(100.0, 200.0, 50.0, 50.0), 0.5);
        assert_eq!(ops, "q 0.5 0 0 0.5 95 190 cm /X0 Do Q\n");
    }

    #[test]
    fn test_image_placement_scales_unit_square() {
        let placed = PlacedXObject {
            id: (1, 0),
            unit_square: true,
            origin: (0.0, 0.0),
        };
        let ops = placement_command("X3", &placed, &Rect::new(10.0, 20.0, 300.0, 150.0), 1.5);
        assert_eq!(ops, "q 300 0 0 150 10 20 cm /X3 Do Q\n");
    }
}
