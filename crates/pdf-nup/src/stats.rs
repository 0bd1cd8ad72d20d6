use crate::config::LayoutConfig;
use crate::layout::padded_count;
use crate::types::*;

/// Calculate statistics for imposing `selected_pages` pages under `config`
///
/// Matches what the driver produces without touching any source.
pub fn calculate_statistics(
    selected_pages: usize,
    config: &LayoutConfig,
) -> Result<ImpositionStatistics> {
    if selected_pages == 0 {
        return Err(ImposeError::EmptySourceCollection);
    }

    match config.mode() {
        ImposeMode::NUp => Ok(calculate_nup_stats(selected_pages, config)),
        ImposeMode::Booklet => Ok(calculate_booklet_stats(selected_pages, config)),
    }
}

fn calculate_nup_stats(selected_pages: usize, config: &LayoutConfig) -> ImpositionStatistics {
    let n = config.n();

    // A single image is repeated across one full sheet
    if config.is_image() && selected_pages == 1 {
        return ImpositionStatistics {
            source_pages: 1,
            output_pages: 1,
            output_sheets: 1,
            blank_pages_added: 0,
        };
    }

    let output_pages = selected_pages.div_ceil(n);
    ImpositionStatistics {
        source_pages: selected_pages,
        output_pages,
        output_sheets: output_pages,
        blank_pages_added: output_pages * n - selected_pages,
    }
}

fn calculate_booklet_stats(selected_pages: usize, config: &LayoutConfig) -> ImpositionStatistics {
    let padded = padded_count(selected_pages, config.n());
    let output_pages = padded / config.n();

    ImpositionStatistics {
        source_pages: selected_pages,
        output_pages,
        // Front and back share a physical sheet
        output_sheets: output_pages.div_ceil(2),
        blank_pages_added: padded - selected_pages,
    }
}
