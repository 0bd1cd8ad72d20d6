//! Content stream operations for sheet decorations
//!
//! Background fills, tile borders and dashed cut guides.

use crate::constants::{BORDER_LINE_WIDTH, GUIDE_DASH_PATTERN, GUIDE_LINE_WIDTH};
use crate::layout::{GuideLine, Rect};
use crate::types::Rgb;

/// Fill `rect` with a solid colour
pub fn fill_rect(color: Rgb, rect: &Rect) -> String {
    let (r, g, b) = color.components();
    format!(
        "q {} {} {} rg {} {} {} {} re f Q\n",
        r, g, b, rect.x, rect.y, rect.width, rect.height
    )
}

/// Stroke the outline of each rectangle
pub fn border_ops(rects: &[Rect]) -> String {
    if rects.is_empty() {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", BORDER_LINE_WIDTH));
    for rect in rects {
        ops.push_str(&format!(
            "{} {} {} {} re S\n",
            rect.x, rect.y, rect.width, rect.height
        ));
    }
    ops.push_str("Q\n");
    ops
}

/// Dashed guide segments
pub fn guide_ops(guides: &[GuideLine]) -> String {
    if guides.is_empty() {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", GUIDE_LINE_WIDTH));
    ops.push_str(GUIDE_DASH_PATTERN);
    ops.push('\n');
    for guide in guides {
        ops.push_str(&format!(
            "{} {} m {} {} l S\n",
            guide.from.0, guide.from.1, guide.to.0, guide.to.1
        ));
    }
    ops.push_str("Q\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_uses_unit_components() {
        let ops = fill_rect(Rgb::new(255, 0, 0), &Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!(ops.contains("1 0 0 rg"));
        assert!(ops.contains("0 0 10 20 re f"));
    }

    #[test]
    fn test_guides_are_dashed() {
        let ops = guide_ops(&[GuideLine {
            from: (300.0, 0.0),
            to: (300.0, 800.0),
        }]);
        assert!(ops.contains("[6 3] 0 d"));
        assert!(ops.contains("300 0 m 300 800 l S"));
    }

    #[test]
    fn test_nothing_to_draw() {
        assert!(border_ops(&[]).is_empty());
        assert!(guide_ops(&[]).is_empty());
    }
}
