//! Shared constants for page imposition
//!
//! This module centralizes magic numbers and constants used throughout
//! the imposition process.

use crate::types::PaperSize;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Defaults
// =============================================================================

/// Paper used when neither the caller nor the descriptor names one
pub const DEFAULT_PAPER: PaperSize = PaperSize::A4;

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Tile Counts
// =============================================================================

/// Tiles per sheet side accepted for N-up
pub const SUPPORTED_TILE_COUNTS: [usize; 7] = [2, 4, 6, 8, 9, 12, 16];

/// Pages sharing one spread in booklet mode
pub const PAGES_PER_SPREAD: usize = 2;

// =============================================================================
// Marks
// =============================================================================

/// Line width for tile borders (points)
pub const BORDER_LINE_WIDTH: f32 = 0.5;

/// Line width for fold/cut guides (points)
pub const GUIDE_LINE_WIDTH: f32 = 0.5;

/// Dash pattern for guides: 6pt dash, 3pt gap
pub const GUIDE_DASH_PATTERN: &str = "[6 3] 0 d";
