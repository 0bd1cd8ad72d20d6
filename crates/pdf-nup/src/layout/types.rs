//! Layout data types for imposition
//!
//! These types sit between the pure calculations (grid, sequence) and the
//! driver that turns them into placement commands.

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether `other` lies inside this rectangle (with a small tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 0.01;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

/// One cell of the grid, in fill order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Position in fill order (0..n)
    pub index: usize,
    pub pos: GridPosition,
    pub rect: Rect,
    /// Stroke the tile outline
    pub border: bool,
}

/// Dashed cut/fold guide spanning the whole sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

impl GuideLine {
    pub fn is_vertical(&self) -> bool {
        self.from.0 == self.to.0
    }
}

/// Geometry shared by every sheet side of an imposition
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Number of columns in the page grid
    pub cols: usize,
    /// Number of rows in the page grid
    pub rows: usize,
    /// Width of each cell in points
    pub cell_width_pt: f32,
    /// Height of each cell in points
    pub cell_height_pt: f32,
    /// Sheet dimensions in points
    pub sheet_width_pt: f32,
    pub sheet_height_pt: f32,
    /// Bottom-left corner of the area inside the margins
    pub origin: (f32, f32),
    /// Tiles in fill order
    pub tiles: Vec<Tile>,
    /// Guide segments, empty unless guides are enabled
    pub guides: Vec<GuideLine>,
}

impl GridLayout {
    /// Reading spreads per row in booklet mode
    pub fn spreads_per_row(&self) -> usize {
        self.cols / 2
    }
}

/// A tile paired with what goes into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementEntry {
    /// Tile index in fill order
    pub tile: usize,
    /// Source index (None = blank)
    pub source: Option<usize>,
}

/// Logical content of one printed sheet side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Output page index (0-based)
    pub index: usize,
    pub side: SheetSide,
    /// Exactly one entry per tile
    pub entries: Vec<PlacementEntry>,
}

impl Sheet {
    /// Sources in tile order (None = blank)
    pub fn sources(&self) -> Vec<Option<usize>> {
        let mut sources = vec![None; self.entries.len()];
        for entry in &self.entries {
            if let Some(slot) = sources.get_mut(entry.tile) {
                *slot = entry.source;
            }
        }
        sources
    }

    pub fn blank_count(&self) -> usize {
        self.entries.iter().filter(|e| e.source.is_none()).count()
    }
}
