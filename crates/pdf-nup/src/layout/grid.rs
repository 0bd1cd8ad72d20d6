//! Grid layout calculation
//!
//! This module picks the rows × columns factorisation for a tile count and
//! computes cell rectangles, fill order and guide segments on a sheet.

use log::debug;

use crate::config::LayoutConfig;
use crate::types::{ImposeError, ImposeMode, Margins, Result, TileOrder};

use super::{GridLayout, GridPosition, GuideLine, Rect, Tile};

/// Presentation options for a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridStyle {
    /// Fill order of the tiles
    pub order: TileOrder,
    /// Stroke each tile outline
    pub border: bool,
    /// Emit dashed guides at inner boundaries
    pub guides: bool,
    /// Only allow an even column count (booklet spreads)
    pub paired: bool,
}

// =============================================================================
// Grid Creation
// =============================================================================

/// Choose (cols, rows) with cols × rows = n whose shape best matches the sheet.
///
/// The score is `|ln(cols/rows) - ln(width/height)|`. Ties go to more columns
/// on landscape sheets and to more rows otherwise. With `paired` only even
/// column counts qualify. Returns `None` when no factorisation qualifies.
pub fn choose_grid(n: usize, width: f32, height: f32, paired: bool) -> Option<(usize, usize)> {
    const TIE_EPS: f32 = 1e-6;

    let sheet_ratio = (width / height).ln();
    let landscape = width > height;

    let mut best: Option<(usize, usize, f32)> = None;
    for rows in (1..=n).filter(|rows| n % rows == 0) {
        let cols = n / rows;
        if paired && cols % 2 != 0 {
            continue;
        }
        let score = ((cols as f32 / rows as f32).ln() - sheet_ratio).abs();

        let better = match best {
            None => true,
            Some((best_cols, _, best_score)) => {
                if (score - best_score).abs() <= TIE_EPS {
                    if landscape { cols > best_cols } else { cols < best_cols }
                } else {
                    score < best_score
                }
            }
        };
        if better {
            best = Some((cols, rows, score));
        }
    }

    best.map(|(cols, rows, _)| (cols, rows))
}

/// Compute the grid for `n` tiles on a sheet of `sheet` (width, height) points.
pub fn compute_grid(
    sheet: (f32, f32),
    n: usize,
    margins: &Margins,
    style: GridStyle,
) -> Result<GridLayout> {
    let (sheet_width, sheet_height) = sheet;
    let mode = if style.paired {
        ImposeMode::Booklet
    } else {
        ImposeMode::NUp
    };

    let (cols, rows) = choose_grid(n, sheet_width, sheet_height, style.paired)
        .ok_or(ImposeError::UnsupportedTileCount { n, mode })?;

    let usable_width = sheet_width - margins.left - margins.right;
    let usable_height = sheet_height - margins.top - margins.bottom;
    let cell_width_pt = usable_width / cols as f32;
    let cell_height_pt = usable_height / rows as f32;

    if !(cell_width_pt > 0.0 && cell_height_pt > 0.0) {
        return Err(ImposeError::LayoutTooSmall {
            cell_width: cell_width_pt,
            cell_height: cell_height_pt,
        });
    }

    let mut grid = GridLayout {
        cols,
        rows,
        cell_width_pt,
        cell_height_pt,
        sheet_width_pt: sheet_width,
        sheet_height_pt: sheet_height,
        origin: (margins.left, margins.bottom),
        tiles: Vec::with_capacity(n),
        guides: Vec::new(),
    };

    let tiles: Vec<Tile> = fill_order(cols, rows, style.order)
        .into_iter()
        .enumerate()
        .map(|(index, pos)| Tile {
            index,
            pos,
            rect: cell_bounds(&grid, pos, grid.origin),
            border: style.border,
        })
        .collect();
    grid.tiles = tiles;

    if style.guides {
        grid.guides = guide_lines(&grid);
    }

    debug!(
        "Grid for {} tiles on {:.1}x{:.1}pt: {} cols x {} rows, cell {:.1}x{:.1}pt",
        n, sheet_width, sheet_height, cols, rows, cell_width_pt, cell_height_pt
    );

    Ok(grid)
}

impl GridLayout {
    /// Grid for a validated configuration
    pub fn for_config(config: &LayoutConfig) -> Result<GridLayout> {
        let style = GridStyle {
            order: config.order(),
            border: config.border(),
            guides: config.guides(),
            paired: config.mode() == ImposeMode::Booklet,
        };
        compute_grid(config.sheet_size(), config.n(), &config.margins(), style)
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Grid positions in fill order
fn fill_order(cols: usize, rows: usize, order: TileOrder) -> Vec<GridPosition> {
    let mut positions = Vec::with_capacity(cols * rows);
    match order {
        TileOrder::RightDown => {
            for row in 0..rows {
                positions.extend((0..cols).map(|col| GridPosition::new(row, col)));
            }
        }
        TileOrder::LeftDown => {
            for row in 0..rows {
                positions.extend((0..cols).rev().map(|col| GridPosition::new(row, col)));
            }
        }
        TileOrder::DownRight => {
            for col in 0..cols {
                positions.extend((0..rows).map(|row| GridPosition::new(row, col)));
            }
        }
        TileOrder::DownLeft => {
            for col in (0..cols).rev() {
                positions.extend((0..rows).map(|row| GridPosition::new(row, col)));
            }
        }
    }
    positions
}

/// Calculate the bounds of a cell at the given grid position.
///
/// # Arguments
/// * `grid` - The grid layout
/// * `pos` - Grid position (row, col)
/// * `origin` - Bottom-left corner of the area inside the margins
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition, origin: (f32, f32)) -> Rect {
    let (origin_x, origin_y) = origin;

    // Row 0 is at the top, so we need to invert the y calculation
    let cell_x = origin_x + pos.col as f32 * grid.cell_width_pt;
    let cell_y = origin_y + (grid.rows - pos.row - 1) as f32 * grid.cell_height_pt;

    Rect::new(cell_x, cell_y, grid.cell_width_pt, grid.cell_height_pt)
}

/// Dashed segments across the whole sheet at every inner boundary
fn guide_lines(grid: &GridLayout) -> Vec<GuideLine> {
    let (origin_x, origin_y) = grid.origin;

    let vertical = (1..grid.cols).map(|col| {
        let x = origin_x + col as f32 * grid.cell_width_pt;
        GuideLine {
            from: (x, 0.0),
            to: (x, grid.sheet_height_pt),
        }
    });
    let horizontal = (1..grid.rows).map(|row| {
        let y = origin_y + row as f32 * grid.cell_height_pt;
        GuideLine {
            from: (0.0, y),
            to: (grid.sheet_width_pt, y),
        }
    });

    vertical.chain(horizontal).collect()
}

// =============================================================================
// Tests
// =============================================================================
