//! Layout calculation modules for imposition
//!
//! This module handles the pure calculations of an imposition:
//! - Grid layout (factorisation, cell rectangles, guides)
//! - Page sequencing (which logical page goes in which tile)
//! - Content placement (fit scaling, spine alignment)

mod grid;
mod placement;
mod sequence;
mod types;

pub use grid::*;
pub use placement::*;
pub use sequence::*;
pub use types::*;
