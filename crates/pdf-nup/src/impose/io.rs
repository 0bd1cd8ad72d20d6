//! Document I/O and structural validation

use crate::render::page_box;
use crate::types::*;
use lopdf::{Document, Object};
use log::debug;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Load multiple PDF documents
pub async fn load_multiple_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        documents.push(load_pdf(path).await?);
    }
    Ok(documents)
}

/// Save the imposed document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ImposeError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

// =============================================================================
// Validation
// =============================================================================

/// Check the structure of a PDF file; returns its page count
pub async fn validate_file(path: impl AsRef<Path>) -> Result<usize> {
    let doc = load_pdf(path).await?;
    validate_document(&doc)
}

/// Check catalog, page tree, page count and every page's MediaBox.
///
/// Returns the number of pages on success.
pub fn validate_document(doc: &Document) -> Result<usize> {
    let catalog = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id))
        .map_err(|_| ImposeError::Validation("missing document catalog".to_string()))?;

    let pages_root = catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id))
        .map_err(|_| ImposeError::Validation("catalog has no page tree".to_string()))?;

    let declared = pages_root
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|_| ImposeError::Validation("page tree has no Count".to_string()))?;

    let pages = doc.get_pages();
    if declared < 0 || declared as usize != pages.len() {
        return Err(ImposeError::Validation(format!(
            "page tree declares {} pages but {} were found",
            declared,
            pages.len()
        )));
    }

    for (number, &page_id) in &pages {
        let media_box = page_box(doc, page_id, b"MediaBox").ok_or_else(|| {
            ImposeError::Validation(format!("page {} has no MediaBox", number))
        })?;
        let width = media_box[2] - media_box[0];
        let height = media_box[3] - media_box[1];
        if !(width > 0.0 && height > 0.0) {
            return Err(ImposeError::Validation(format!(
                "page {} has an empty MediaBox ({} x {})",
                number, width, height
            )));
        }
    }

    // Resources are optional but must be a dictionary when present
    for (number, &page_id) in &pages {
        if let Ok(resources) = doc.get_dictionary(page_id).and_then(|d| d.get(b"Resources")) {
            let is_dict = match resources {
                Object::Dictionary(_) => true,
                Object::Reference(id) => doc.get_dictionary(*id).is_ok(),
                _ => false,
            };
            if !is_dict {
                return Err(ImposeError::Validation(format!(
                    "page {} has malformed Resources",
                    number
                )));
            }
        }
    }

    Ok(pages.len())
}
