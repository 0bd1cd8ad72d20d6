//! Content placement within tiles
//!
//! Source content is scaled to fit its tile while preserving aspect ratio.
//! N-up content is centred; booklet content is pushed toward the spine of its
//! spread so facing pages meet at the fold.

use super::{GridPosition, Rect};

/// Horizontal alignment of content inside its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Center,
    /// Spine on the right: push content right
    TowardRight,
    /// Spine on the left: push content left
    TowardLeft,
}

impl Alignment {
    /// Alignment toward the fold of a two-page spread
    pub fn toward_spine(pos: GridPosition) -> Self {
        if pos.col % 2 == 0 {
            Alignment::TowardRight
        } else {
            Alignment::TowardLeft
        }
    }
}

/// Scale factor fitting the source inside the target without cropping.
pub fn fit_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    if !(src_width > 0.0 && src_height > 0.0) {
        return 1.0;
    }
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}

/// Fitted content rectangle and scale for a source of `source` (width, height)
pub fn place_content(tile: &Rect, source: (f32, f32), alignment: Alignment) -> (Rect, f32) {
    let (src_width, src_height) = source;
    let scale = fit_scale(src_width, src_height, tile.width, tile.height);

    let scaled_width = src_width * scale;
    let scaled_height = src_height * scale;

    let x = match alignment {
        Alignment::TowardRight => tile.right() - scaled_width,
        Alignment::TowardLeft => tile.x,
        Alignment::Center => tile.x + (tile.width - scaled_width) / 2.0,
    };
    let y = tile.y + (tile.height - scaled_height) / 2.0;

    (Rect::new(x, y, scaled_width, scaled_height), scale)
}
