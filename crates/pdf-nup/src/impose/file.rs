//! File-level entry points: read inputs, impose, write the output PDF

use std::path::{Path, PathBuf};

use log::info;
use lopdf::Document;

use super::io::{load_multiple_pdfs, save_pdf};
use super::impose_into;
use crate::config::LayoutConfig;
use crate::render::{ImageSources, PdfSources, PdfWriter, RenderSource};
use crate::types::*;

/// Tile `inputs` N-up into `output`
///
/// Inputs are PDF files, or image files when the configuration was built for
/// images. Multiple inputs are concatenated in order before selection.
pub async fn nup_file(
    inputs: &[impl AsRef<Path>],
    output: impl AsRef<Path>,
    config: &LayoutConfig,
    selection: &[impl AsRef<str>],
) -> Result<ImpositionStatistics> {
    impose_file(ImposeMode::NUp, inputs, output.as_ref(), config, selection).await
}

/// Arrange `inputs` as a saddle-stitch booklet into `output`
pub async fn booklet_file(
    inputs: &[impl AsRef<Path>],
    output: impl AsRef<Path>,
    config: &LayoutConfig,
    selection: &[impl AsRef<str>],
) -> Result<ImpositionStatistics> {
    impose_file(ImposeMode::Booklet, inputs, output.as_ref(), config, selection).await
}

async fn impose_file(
    mode: ImposeMode,
    inputs: &[impl AsRef<Path>],
    output: &Path,
    config: &LayoutConfig,
    selection: &[impl AsRef<str>],
) -> Result<ImpositionStatistics> {
    if config.mode() != mode {
        return Err(ImposeError::Config(format!(
            "{} entry point called with a {} configuration",
            mode,
            config.mode()
        )));
    }
    if inputs.is_empty() {
        return Err(ImposeError::EmptySourceCollection);
    }

    info!(
        "{} {} input(s) -> {} [{}]",
        mode,
        inputs.len(),
        output.display(),
        config
    );

    let config = config.clone();
    let selection: Vec<String> = selection.iter().map(|s| s.as_ref().to_string()).collect();

    let (document, stats) = if config.is_image() {
        let paths: Vec<PathBuf> = inputs.iter().map(|p| p.as_ref().to_owned()).collect();
        tokio::task::spawn_blocking(move || {
            let sources = ImageSources::open(&paths)?;
            render(&sources, &config, &selection)
        })
        .await??
    } else {
        let documents = load_multiple_pdfs(inputs).await?;
        tokio::task::spawn_blocking(move || {
            let sources = PdfSources::new(documents);
            render(&sources, &config, &selection)
        })
        .await??
    };

    save_pdf(document, output).await?;
    info!(
        "Wrote {} pages ({} sheets, {} blanks) to {}",
        stats.output_pages,
        stats.output_sheets,
        stats.blank_pages_added,
        output.display()
    );
    Ok(stats)
}

fn render<R: RenderSource>(
    sources: &R,
    config: &LayoutConfig,
    selection: &[String],
) -> Result<(Document, ImpositionStatistics)> {
    let mut writer = PdfWriter::new(sources);
    let stats = impose_into(sources, config, selection, &mut writer)?;
    Ok((writer.finish(), stats))
}
