use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Unrecognized option: {0:?}")]
    UnrecognizedOption(String),
    #[error("Invalid value {value:?} for option {key:?}")]
    InvalidOptionValue { key: String, value: String },
    #[error("Unsupported tile count {n} for {mode}")]
    UnsupportedTileCount { n: usize, mode: ImposeMode },
    #[error("Layout too small: margins leave {cell_width:.2} x {cell_height:.2} pt per tile")]
    LayoutTooSmall { cell_width: f32, cell_height: f32 },
    #[error("No pages or images to impose")]
    EmptySourceCollection,
    #[error("Invalid page range {range:?}: {reason}")]
    InvalidPageRange { range: String, reason: String },
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ImposeError {
    pub(crate) fn invalid_value(key: &str, value: &str) -> Self {
        ImposeError::InvalidOptionValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_range(range: &str, reason: impl Into<String>) -> Self {
        ImposeError::InvalidPageRange {
            range: range.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Imposition flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImposeMode {
    /// N pages tiled onto each sheet in reading order
    #[default]
    NUp,
    /// Pages reordered for saddle-stitch binding
    Booklet,
}

impl fmt::Display for ImposeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImposeMode::NUp => f.write_str("N-up"),
            ImposeMode::Booklet => f.write_str("booklet"),
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl Orientation {
    /// Descriptor suffix (`P` or `L`)
    pub fn suffix(self) -> char {
        match self {
            Orientation::Portrait => 'P',
            Orientation::Landscape => 'L',
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    A6,
    Letter,
    Legal,
    Ledger,
    Tabloid,
    /// Explicit dimensions in points
    Custom { width_pt: f32, height_pt: f32 },
}

impl PaperSize {
    /// Named presets, in lookup order
    pub const PRESETS: [PaperSize; 8] = [
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::A6,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Ledger,
        PaperSize::Tabloid,
    ];

    /// Get natural dimensions in millimetres (Ledger is the only landscape preset)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::A6 => (105.0, 148.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Ledger => (431.8, 279.4),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (
                crate::constants::pt_to_mm(width_pt),
                crate::constants::pt_to_mm(height_pt),
            ),
        }
    }

    /// Get natural dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
            named => {
                let (w, h) = named.dimensions_mm();
                (
                    crate::constants::mm_to_pt(w),
                    crate::constants::mm_to_pt(h),
                )
            }
        }
    }

    /// Orientation the paper has without any override
    pub fn natural_orientation(self) -> Orientation {
        let (w, h) = self.dimensions_pt();
        if w > h {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Get dimensions in points with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_pt();
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }

    /// Preset name as used in descriptors, `None` for custom sizes
    pub fn name(self) -> Option<&'static str> {
        match self {
            PaperSize::A3 => Some("A3"),
            PaperSize::A4 => Some("A4"),
            PaperSize::A5 => Some("A5"),
            PaperSize::A6 => Some("A6"),
            PaperSize::Letter => Some("Letter"),
            PaperSize::Legal => Some("Legal"),
            PaperSize::Ledger => Some("Ledger"),
            PaperSize::Tabloid => Some("Tabloid"),
            PaperSize::Custom { .. } => None,
        }
    }

    /// Case-insensitive preset lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }
}

/// Sheet margins in points, subtracted from the sheet before tiling
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin: f32) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    fn values(&self) -> [f32; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.values().iter().all(|m| m.is_finite() && *m >= 0.0)
    }
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Components scaled to 0.0..=1.0 for PDF colour operators
    pub fn components(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Order in which N-up tiles are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileOrder {
    /// Left to right, then top to bottom
    #[default]
    RightDown,
    /// Top to bottom, then left to right
    DownRight,
    /// Right to left, then top to bottom
    LeftDown,
    /// Top to bottom, then right to left
    DownLeft,
}

impl TileOrder {
    pub fn code(self) -> &'static str {
        match self {
            TileOrder::RightDown => "rd",
            TileOrder::DownRight => "dr",
            TileOrder::LeftDown => "ld",
            TileOrder::DownLeft => "dl",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "rd" => Some(TileOrder::RightDown),
            "dr" => Some(TileOrder::DownRight),
            "ld" => Some(TileOrder::LeftDown),
            "dl" => Some(TileOrder::DownLeft),
            _ => None,
        }
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionStatistics {
    /// Number of selected source pages or images
    pub source_pages: usize,
    /// Output page count (sheet sides)
    pub output_pages: usize,
    /// Physical sheets needed (booklet sides are printed duplex)
    pub output_sheets: usize,
    /// Number of blank tiles added for padding
    pub blank_pages_added: usize,
}
