use crate::constants::{DEFAULT_PAPER, SUPPORTED_TILE_COUNTS};
use crate::descriptor::parse_descriptor;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validated imposition layout
///
/// Built once (from a descriptor string, the builder or a JSON file) and then
/// shared read-only by the grid calculator, the sequencer and the driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LayoutConfigBuilder"))]
pub struct LayoutConfig {
    mode: ImposeMode,
    images: bool,
    n: usize,
    paper: PaperSize,
    orientation: Orientation,
    margins: Margins,
    border: bool,
    guides: bool,
    background: Option<Rgb>,
    order: TileOrder,
}

impl LayoutConfig {
    pub fn builder(mode: ImposeMode, n: usize) -> LayoutConfigBuilder {
        LayoutConfigBuilder::new(mode, n)
    }

    /// N-up configuration for PDF input
    pub fn pdf_nup(n: usize, descriptor: &str) -> Result<Self> {
        parse_descriptor(descriptor, n, ImposeMode::NUp, false)
    }

    /// N-up configuration for image input
    pub fn image_nup(n: usize, descriptor: &str) -> Result<Self> {
        parse_descriptor(descriptor, n, ImposeMode::NUp, true)
    }

    /// Booklet configuration for PDF input
    pub fn pdf_booklet(n: usize, descriptor: &str) -> Result<Self> {
        parse_descriptor(descriptor, n, ImposeMode::Booklet, false)
    }

    /// Booklet configuration for image input
    pub fn image_booklet(n: usize, descriptor: &str) -> Result<Self> {
        parse_descriptor(descriptor, n, ImposeMode::Booklet, true)
    }

    pub fn mode(&self) -> ImposeMode {
        self.mode
    }

    /// Whether sources are raster images rather than PDF pages
    pub fn is_image(&self) -> bool {
        self.images
    }

    /// Tiles per sheet side
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn border(&self) -> bool {
        self.border
    }

    pub fn guides(&self) -> bool {
        self.guides
    }

    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    pub fn order(&self) -> TileOrder {
        self.order
    }

    /// Output sheet dimensions in points, orientation applied
    pub fn sheet_size(&self) -> (f32, f32) {
        self.paper.dimensions_with_orientation(self.orientation)
    }

    /// Reopen this configuration for modification
    pub fn to_builder(&self) -> LayoutConfigBuilder {
        LayoutConfigBuilder {
            mode: self.mode,
            images: self.images,
            n: self.n,
            paper: self.paper,
            orientation: Some(self.orientation),
            margins: self.margins,
            border: self.border,
            guides: self.guides,
            background: self.background,
            order: self.order,
        }
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Unvalidated layout settings; `build` checks every invariant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct LayoutConfigBuilder {
    mode: ImposeMode,
    #[cfg_attr(feature = "serde", serde(default))]
    images: bool,
    n: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_paper"))]
    paper: PaperSize,
    #[cfg_attr(feature = "serde", serde(default))]
    orientation: Option<Orientation>,
    #[cfg_attr(feature = "serde", serde(default))]
    margins: Margins,
    #[cfg_attr(feature = "serde", serde(default))]
    border: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    guides: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    background: Option<Rgb>,
    #[cfg_attr(feature = "serde", serde(default))]
    order: TileOrder,
}

#[cfg(feature = "serde")]
fn default_paper() -> PaperSize {
    DEFAULT_PAPER
}

impl LayoutConfigBuilder {
    pub fn new(mode: ImposeMode, n: usize) -> Self {
        Self {
            mode,
            images: false,
            n,
            paper: DEFAULT_PAPER,
            orientation: None,
            margins: Margins::default(),
            border: false,
            guides: false,
            background: None,
            order: TileOrder::default(),
        }
    }

    pub fn images(mut self, images: bool) -> Self {
        self.images = images;
        self
    }

    /// Set the paper; clears any orientation override
    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self.orientation = None;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn margin(self, margin: f32) -> Self {
        self.margins(Margins::uniform(margin))
    }

    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn guides(mut self, guides: bool) -> Self {
        self.guides = guides;
        self
    }

    pub fn background(mut self, background: Option<Rgb>) -> Self {
        self.background = background;
        self
    }

    pub fn order(mut self, order: TileOrder) -> Self {
        self.order = order;
        self
    }

    /// Validate and freeze the configuration
    pub fn build(self) -> Result<LayoutConfig> {
        let tile_count_ok = SUPPORTED_TILE_COUNTS.contains(&self.n)
            && (self.mode == ImposeMode::NUp || self.n % 2 == 0);
        if !tile_count_ok {
            return Err(ImposeError::UnsupportedTileCount {
                n: self.n,
                mode: self.mode,
            });
        }

        let (width, height) = self.paper.dimensions_pt();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ImposeError::Config(format!(
                "Paper dimensions must be positive, got {} x {}",
                width, height
            )));
        }

        if !self.margins.is_valid() {
            return Err(ImposeError::Config(
                "Margins must be non-negative numbers".to_string(),
            ));
        }

        if self.mode == ImposeMode::Booklet && self.order != TileOrder::RightDown {
            return Err(ImposeError::Config(format!(
                "Tile order {:?} applies to N-up only",
                self.order.code()
            )));
        }

        Ok(LayoutConfig {
            mode: self.mode,
            images: self.images,
            n: self.n,
            paper: self.paper,
            orientation: self
                .orientation
                .unwrap_or_else(|| self.paper.natural_orientation()),
            margins: self.margins,
            border: self.border,
            guides: self.guides,
            background: self.background,
            order: self.order,
        })
    }
}

impl TryFrom<LayoutConfigBuilder> for LayoutConfig {
    type Error = ImposeError;

    fn try_from(builder: LayoutConfigBuilder) -> Result<Self> {
        builder.build()
    }
}
