//! Page sequencing
//!
//! Decides which logical page lands in which tile of which sheet side.
//! Logical pages are 0-based positions in the selected page list; `None`
//! marks a padding blank.
//!
//! ## Booklet ordering
//!
//! Pages are padded to a whole number of sides, then paired from the outside
//! in: page k meets page `padded - 1 - k` across the spine. For 16 pages at
//! 2-up the spreads are (16,1), (2,15), (14,3), ..., (8,9), alternating
//! between fronts and backs of consecutive sheets.

use log::debug;

use crate::constants::PAGES_PER_SPREAD;

use super::{PlacementEntry, Sheet, SheetSide};

// =============================================================================
// Padding
// =============================================================================

/// Logical slot count after padding `total` booklet pages
///
/// Booklets pad to whole sheets (`2n` slots: a front and a back) so the
/// innermost sheet is printed on both sides.
pub fn padded_count(total: usize, n: usize) -> usize {
    let unit = PAGES_PER_SPREAD * n;
    if unit == 0 {
        return 0;
    }
    total.div_ceil(unit) * unit
}

// =============================================================================
// N-up
// =============================================================================

/// Chunk pages in order, `n` per sheet side; the last side is padded with blanks
pub fn nup_sequence(total: usize, n: usize) -> Vec<Sheet> {
    let sheet_count = if n == 0 { 0 } else { total.div_ceil(n) };

    (0..sheet_count)
        .map(|index| Sheet {
            index,
            side: SheetSide::Front,
            entries: (0..n)
                .map(|tile| {
                    let logical = index * n + tile;
                    PlacementEntry {
                        tile,
                        source: (logical < total).then_some(logical),
                    }
                })
                .collect(),
        })
        .collect()
}

// =============================================================================
// Booklet
// =============================================================================

/// Pages of reading spread `k` as (left, right), 0-based
fn spread_pages(k: usize, padded: usize) -> (usize, usize) {
    let low = k;
    let high = padded - 1 - k;
    if k % 2 == 0 { (high, low) } else { (low, high) }
}

/// Mirror a spread position horizontally within its row (long-edge duplex)
fn mirror_position(position: usize, spreads_per_row: usize) -> usize {
    let row = position / spreads_per_row;
    let col = position % spreads_per_row;
    row * spreads_per_row + (spreads_per_row - 1 - col)
}

/// Arrange `total` pages for saddle-stitch binding, `n` tiles per side.
///
/// Each side holds `n / 2` spread positions laid out `spreads_per_row` to a
/// row; spread position p covers tiles 2p and 2p+1. Sheet j's front carries
/// even spreads `2(jR + p)` and its back the odd spreads `2(jR + p') + 1`,
/// where R = n/2 and p' is p mirrored within its row so each spread backs
/// onto its neighbour after a long-edge flip.
pub fn booklet_sequence(total: usize, n: usize, spreads_per_row: usize) -> Vec<Sheet> {
    let spreads_per_side = n / PAGES_PER_SPREAD;
    if total == 0 || spreads_per_side == 0 {
        return Vec::new();
    }
    let spreads_per_row = spreads_per_row.clamp(1, spreads_per_side);
    debug_assert_eq!(spreads_per_side % spreads_per_row, 0);

    let padded = padded_count(total, n);
    let side_count = padded / n;

    debug!(
        "Booklet of {} pages padded to {} over {} sides ({} spreads per side)",
        total, padded, side_count, spreads_per_side
    );

    (0..side_count)
        .map(|index| {
            let sheet = index / 2;
            let side = if index % 2 == 0 {
                SheetSide::Front
            } else {
                SheetSide::Back
            };

            let mut entries = Vec::with_capacity(n);
            for position in 0..spreads_per_side {
                let spread = match side {
                    SheetSide::Front => 2 * (sheet * spreads_per_side + position),
                    SheetSide::Back => {
                        2 * (sheet * spreads_per_side
                            + mirror_position(position, spreads_per_row))
                            + 1
                    }
                };

                let (left, right) = spread_pages(spread, padded);
                for (offset, page) in [left, right].into_iter().enumerate() {
                    entries.push(PlacementEntry {
                        tile: PAGES_PER_SPREAD * position + offset,
                        source: (page < total).then_some(page),
                    });
                }
            }

            Sheet {
                index,
                side,
                entries,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1-based page numbers per side, 0 for blanks
    fn page_numbers(sheets: &[Sheet]) -> Vec<Vec<usize>> {
        sheets
            .iter()
            .map(|s| s.sources().iter().map(|p| p.map_or(0, |i| i + 1)).collect())
            .collect()
    }

    /// Page numbers in the order a reader meets them once every sheet is
    /// folded, cut into leaves and the leaves nested, outermost first
    fn folded_reading_order(sheets: &[Sheet], n: usize, spreads_per_row: usize) -> Vec<usize> {
        let spreads_per_side = n / PAGES_PER_SPREAD;
        let page_on = |sheet: &Sheet, tile: usize| {
            sheet
                .entries
                .iter()
                .find(|e| e.tile == tile)
                .and_then(|e| e.source)
                .map_or(0, |i| i + 1)
        };

        let mut leaves = Vec::new();
        for pair in sheets.chunks(2) {
            let (front, back) = (&pair[0], &pair[1]);
            for position in 0..spreads_per_side {
                let mirrored = mirror_position(position, spreads_per_row);
                leaves.push([
                    page_on(front, 2 * position),
                    page_on(front, 2 * position + 1),
                    page_on(back, 2 * mirrored),
                    page_on(back, 2 * mirrored + 1),
                ]);
            }
        }

        // Right half of each front then left half of each back going in,
        // right half of each back then left half of each front coming out
        let inward = leaves.iter().flat_map(|[_, fr, bl, _]| [*fr, *bl]);
        let outward = leaves.iter().rev().flat_map(|[fl, _, _, br]| [*br, *fl]);
        inward.chain(outward).collect()
    }

    #[test]
    fn test_padded_count() {
        assert_eq!(padded_count(16, 2), 16);
        assert_eq!(padded_count(14, 2), 16);
        assert_eq!(padded_count(6, 2), 8);
        assert_eq!(padded_count(14, 4), 16);
        assert_eq!(padded_count(21, 4), 24);
        assert_eq!(padded_count(9, 4), 16);
        assert_eq!(padded_count(0, 4), 0);
    }

    #[test]
    fn test_nup_sequence_chunks_in_order() {
        let sheets = nup_sequence(10, 4);
        assert_eq!(sheets.len(), 3);
        assert_eq!(
            page_numbers(&sheets),
            vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 0, 0]]
        );
        assert!(sheets.iter().all(|s| s.side == SheetSide::Front));
    }

    #[test]
    fn test_nup_sequence_preserves_order() {
        for n in [2, 4, 6, 8, 9, 12, 16] {
            for total in 1..40 {
                let sheets = nup_sequence(total, n);
                assert_eq!(sheets.len(), total.div_ceil(n));
                let placed: Vec<usize> = sheets
                    .iter()
                    .flat_map(|s| s.entries.iter().filter_map(|e| e.source))
                    .collect();
                assert_eq!(placed, (0..total).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_booklet_reads_in_order_when_folded() {
        for (total, n, per_row) in [
            (14, 2, 1),
            (6, 2, 1),
            (16, 2, 1),
            (9, 4, 1),
            (21, 4, 1),
            (8, 4, 1),
            (9, 6, 1),
            (16, 8, 2),
            (30, 8, 2),
            (40, 12, 2),
            (50, 16, 2),
        ] {
            let sheets = booklet_sequence(total, n, per_row);
            assert_eq!(sheets.len() % 2, 0, "{} pages at {}-up", total, n);
            assert!(sheets.iter().all(|s| s.entries.len() == n));

            let padded = padded_count(total, n);
            let mut expected: Vec<usize> = (1..=total).collect();
            expected.resize(padded, 0);
            assert_eq!(
                folded_reading_order(&sheets, n, per_row),
                expected,
                "{} pages at {}-up",
                total,
                n
            );
        }
    }

    #[test]
    fn test_booklet_blanks_take_highest_pages() {
        for (total, n) in [(21, 4), (14, 2), (9, 6), (13, 8)] {
            let padded = padded_count(total, n);
            let sheets = booklet_sequence(total, n, 1);
            assert_eq!(sheets.len() * n, padded);

            // A blank's spread partner is always a real page from the front
            for sheet in &sheets {
                for pair in sheet.entries.chunks(2) {
                    if pair.iter().any(|e| e.source.is_none()) {
                        let partner = pair.iter().find_map(|e| e.source);
                        assert!(partner.is_some_and(|p| p < padded - total));
                    }
                }
            }
        }
    }

    #[test]
    fn test_booklet_16_pages_2up() {
        let sheets = booklet_sequence(16, 2, 1);
        assert_eq!(
            page_numbers(&sheets),
            vec![
                vec![16, 1],
                vec![2, 15],
                vec![14, 3],
                vec![4, 13],
                vec![12, 5],
                vec![6, 11],
                vec![10, 7],
                vec![8, 9],
            ]
        );
        assert_eq!(sheets[0].side, SheetSide::Front);
        assert_eq!(sheets[1].side, SheetSide::Back);
    }

    #[test]
    fn test_booklet_8_pages_4up() {
        let sheets = booklet_sequence(8, 4, 1);
        assert_eq!(
            page_numbers(&sheets),
            vec![vec![8, 1, 6, 3], vec![2, 7, 4, 5]]
        );
    }

    #[test]
    fn test_booklet_back_mirrors_spreads_in_row() {
        // 4 spreads per side laid out 2 per row
        let sheets = booklet_sequence(16, 8, 2);
        assert_eq!(
            page_numbers(&sheets),
            vec![
                vec![16, 1, 14, 3, 12, 5, 10, 7],
                vec![4, 13, 2, 15, 8, 9, 6, 11],
            ]
        );
    }

    #[test]
    fn test_booklet_6_pages_fills_both_sides() {
        let sheets = booklet_sequence(6, 2, 1);
        assert_eq!(
            page_numbers(&sheets),
            vec![vec![0, 1], vec![2, 0], vec![6, 3], vec![4, 5]]
        );
        assert_eq!(sheets[3].side, SheetSide::Back);
    }

    #[test]
    fn test_booklet_padding_trails() {
        let sheets = booklet_sequence(14, 2, 1);
        assert_eq!(sheets.len(), 8);
        // Pages 15 and 16 are blanks and pair with pages 1 and 2
        assert_eq!(page_numbers(&sheets)[0], vec![0, 1]);
        assert_eq!(page_numbers(&sheets)[1], vec![2, 0]);

        let blanks: usize = sheets.iter().map(Sheet::blank_count).sum();
        assert_eq!(blanks, 2);
    }

    #[test]
    fn test_booklet_every_page_once() {
        for (total, n, per_row) in [(21, 4, 1), (24, 4, 1), (30, 8, 2), (9, 6, 1), (50, 16, 2)] {
            let sheets = booklet_sequence(total, n, per_row);
            let mut seen: Vec<usize> = sheets
                .iter()
                .flat_map(|s| s.entries.iter().filter_map(|e| e.source))
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..total).collect::<Vec<_>>());
            assert!(sheets.iter().all(|s| s.entries.len() == n));
        }
    }
}
