//! Page imposition - arranging pages onto sheets
//!
//! This module orchestrates the imposition process:
//! 1. Resolve the page selection against the sources
//! 2. Compute the grid (fails before any output is produced)
//! 3. Sequence logical pages onto sheet sides
//! 4. Yield per-sheet placement commands for a sink to render

mod file;
mod io;

pub use file::{booklet_file, nup_file};
pub use io::{load_multiple_pdfs, load_pdf, save_pdf, validate_document, validate_file};

use log::debug;

use crate::config::LayoutConfig;
use crate::layout::{
    Alignment, GridLayout, GuideLine, Rect, Sheet, SheetSide, booklet_sequence, nup_sequence,
    place_content,
};
use crate::pages::resolve_page_selection;
use crate::source::PageSource;
use crate::types::*;

/// What to draw in one tile
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementCommand {
    /// Draw source content fitted into the tile
    Place {
        tile: usize,
        /// Index into the source collection
        source: usize,
        tile_rect: Rect,
        /// Fitted content area, aspect ratio preserved
        content_rect: Rect,
        scale: f32,
        border: bool,
    },
    /// Leave the tile empty (padding)
    Blank {
        tile: usize,
        rect: Rect,
        fill: Option<Rgb>,
        border: bool,
    },
}

impl PlacementCommand {
    pub fn tile(&self) -> usize {
        match self {
            PlacementCommand::Place { tile, .. } | PlacementCommand::Blank { tile, .. } => *tile,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, PlacementCommand::Blank { .. })
    }
}

/// One printed sheet side, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct ImposedSheet {
    /// Output page index (0-based)
    pub index: usize,
    pub side: SheetSide,
    pub width: f32,
    pub height: f32,
    pub background: Option<Rgb>,
    /// One command per tile
    pub commands: Vec<PlacementCommand>,
    pub guides: Vec<GuideLine>,
}

/// Consumer of imposed sheets
pub trait ImpositionSink {
    /// Render one sheet side; called in output order
    fn write_sheet(&mut self, sheet: &ImposedSheet) -> Result<()>;
}

/// A computed imposition; sheets are built on demand
#[derive(Debug, Clone)]
pub struct Imposition {
    mode: ImposeMode,
    background: Option<Rgb>,
    grid: GridLayout,
    sheets: Vec<Sheet>,
    selection: Vec<usize>,
    /// Source index for each logical page
    logical: Vec<usize>,
    /// Intrinsic size of each logical page
    dimensions: Vec<(f32, f32)>,
}

impl Imposition {
    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Selected source indices, ascending
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Number of sheet sides
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheet sides in output order
    pub fn sheets(&self) -> impl Iterator<Item = ImposedSheet> + '_ {
        self.sheets.iter().map(|sheet| self.build_sheet(sheet))
    }

    pub fn statistics(&self) -> ImpositionStatistics {
        let output_pages = self.sheets.len();
        let output_sheets = match self.mode {
            ImposeMode::NUp => output_pages,
            ImposeMode::Booklet => output_pages.div_ceil(2),
        };
        ImpositionStatistics {
            source_pages: self.selection.len(),
            output_pages,
            output_sheets,
            blank_pages_added: self.sheets.iter().map(Sheet::blank_count).sum(),
        }
    }

    fn build_sheet(&self, sheet: &Sheet) -> ImposedSheet {
        let commands = sheet
            .entries
            .iter()
            .filter_map(|entry| {
                let tile = self.grid.tiles.get(entry.tile)?;
                let command = match entry.source {
                    Some(logical) => {
                        let alignment = match self.mode {
                            ImposeMode::NUp => Alignment::Center,
                            ImposeMode::Booklet => Alignment::toward_spine(tile.pos),
                        };
                        let (content_rect, scale) =
                            place_content(&tile.rect, self.dimensions[logical], alignment);
                        PlacementCommand::Place {
                            tile: tile.index,
                            source: self.logical[logical],
                            tile_rect: tile.rect,
                            content_rect,
                            scale,
                            border: tile.border,
                        }
                    }
                    None => PlacementCommand::Blank {
                        tile: tile.index,
                        rect: tile.rect,
                        fill: self.background,
                        border: tile.border,
                    },
                };
                Some(command)
            })
            .collect();

        ImposedSheet {
            index: sheet.index,
            side: sheet.side,
            width: self.grid.sheet_width_pt,
            height: self.grid.sheet_height_pt,
            background: self.background,
            commands,
            guides: self.grid.guides.clone(),
        }
    }
}

/// Compute the imposition of `sources` under `config`.
///
/// `selection` holds page selectors (`"1-4"`, `"even"`, ...); an empty slice
/// selects every source.
pub fn impose<S, T>(sources: &S, config: &LayoutConfig, selection: &[T]) -> Result<Imposition>
where
    S: PageSource + ?Sized,
    T: AsRef<str>,
{
    let count = sources.page_count();
    if count == 0 {
        return Err(ImposeError::EmptySourceCollection);
    }
    let selected = resolve_page_selection(selection, count)?;

    let grid = GridLayout::for_config(config)?;
    let n = config.n();

    // A lone image fills every tile of a single sheet
    let logical = if config.is_image() && config.mode() == ImposeMode::NUp && selected.len() == 1
    {
        vec![selected[0]; n]
    } else {
        selected.clone()
    };

    let sheets = match config.mode() {
        ImposeMode::NUp => nup_sequence(logical.len(), n),
        ImposeMode::Booklet => booklet_sequence(logical.len(), n, grid.spreads_per_row()),
    };
    debug!(
        "Imposing {} of {} sources as {} {} onto {} sides",
        selected.len(),
        count,
        n,
        config.mode(),
        sheets.len()
    );

    let dimensions = logical
        .iter()
        .map(|&index| sources.page_dimensions(index))
        .collect();

    Ok(Imposition {
        mode: config.mode(),
        background: config.background(),
        grid,
        sheets,
        selection: selected,
        logical,
        dimensions,
    })
}

/// Impose and stream every sheet into `sink`
pub fn impose_into<S, T, K>(
    sources: &S,
    config: &LayoutConfig,
    selection: &[T],
    sink: &mut K,
) -> Result<ImpositionStatistics>
where
    S: PageSource + ?Sized,
    T: AsRef<str>,
    K: ImpositionSink + ?Sized,
{
    let imposition = impose(sources, config, selection)?;

    let mut emitted = 0;
    for sheet in imposition.sheets() {
        emitted += sheet.commands.len();
        sink.write_sheet(&sheet)?;
    }
    debug_assert_eq!(emitted, imposition.len() * config.n());

    Ok(imposition.statistics())
}
