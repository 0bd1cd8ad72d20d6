//! Layout descriptor parsing
//!
//! A descriptor is a comma-separated list of `key:value` clauses, for example
//! `"p:A4P, border:off, g:on, ma:25, bgcol:#beded9"`. Parsing fills a
//! [`LayoutConfigBuilder`]; the builder enforces the remaining invariants.

use std::fmt;

use log::debug;

use crate::config::{LayoutConfig, LayoutConfigBuilder};
use crate::types::*;

/// Parse a descriptor for the given tile count and mode, starting from defaults
pub fn parse_descriptor(
    descriptor: &str,
    n: usize,
    mode: ImposeMode,
    is_image: bool,
) -> Result<LayoutConfig> {
    LayoutConfig::builder(mode, n)
        .images(is_image)
        .apply_descriptor(descriptor)?
        .build()
}

impl LayoutConfigBuilder {
    /// Apply every clause of a descriptor on top of the current settings
    pub fn apply_descriptor(mut self, descriptor: &str) -> Result<Self> {
        for clause in descriptor.split(',') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }

            let (raw_key, value) = match clause.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (clause, ""),
            };

            let key = OptionKey::lookup(raw_key)
                .ok_or_else(|| ImposeError::UnrecognizedOption(raw_key.to_string()))?;
            if value.is_empty() {
                return Err(ImposeError::invalid_value(raw_key, value));
            }

            self = key.apply(self, raw_key, value)?;
        }
        debug!("Applied descriptor {:?}", descriptor);
        Ok(self)
    }
}

// =============================================================================
// Option Keys
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKey {
    Paper,
    Border,
    Guides,
    Margin,
    Background,
    Order,
}

impl OptionKey {
    fn lookup(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "p" | "f" | "papersize" | "formsize" => Some(OptionKey::Paper),
            "border" => Some(OptionKey::Border),
            "g" | "guides" => Some(OptionKey::Guides),
            "ma" | "m" | "margin" => Some(OptionKey::Margin),
            "bgcol" | "backgroundcolor" => Some(OptionKey::Background),
            "o" | "order" => Some(OptionKey::Order),
            _ => None,
        }
    }

    fn apply(self, builder: LayoutConfigBuilder, key: &str, value: &str) -> Result<LayoutConfigBuilder> {
        let invalid = || ImposeError::invalid_value(key, value);
        let builder = match self {
            OptionKey::Paper => {
                let (paper, orientation) = parse_paper(value).ok_or_else(invalid)?;
                let builder = builder.paper(paper);
                match orientation {
                    Some(orientation) => builder.orientation(orientation),
                    None => builder,
                }
            }
            OptionKey::Border => builder.border(parse_bool(value).ok_or_else(invalid)?),
            OptionKey::Guides => builder.guides(parse_bool(value).ok_or_else(invalid)?),
            OptionKey::Margin => builder.margins(parse_margins(value).ok_or_else(invalid)?),
            OptionKey::Background => {
                builder.background(Some(Rgb::from_hex(value).ok_or_else(invalid)?))
            }
            OptionKey::Order => builder.order(TileOrder::from_code(value).ok_or_else(invalid)?),
        };
        Ok(builder)
    }
}

// =============================================================================
// Value Parsers
// =============================================================================

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" => Some(true),
        "off" | "false" => Some(false),
        _ => None,
    }
}

/// One, two or four numbers in CSS order
fn parse_margins(value: &str) -> Option<Margins> {
    let values = value
        .split_whitespace()
        .map(|v| v.parse::<f32>().ok().filter(|m| m.is_finite() && *m >= 0.0))
        .collect::<Option<Vec<_>>>()?;

    match values[..] {
        [all] => Some(Margins::uniform(all)),
        [vertical, horizontal] => Some(Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }),
        [top, right, bottom, left] => Some(Margins {
            top,
            right,
            bottom,
            left,
        }),
        _ => None,
    }
}

/// Preset name or `WxH` in points, optionally suffixed with `P` or `L`
fn parse_paper(value: &str) -> Option<(PaperSize, Option<Orientation>)> {
    if let Some(paper) = parse_paper_name(value) {
        return Some((paper, None));
    }

    let mut chars = value.chars();
    let orientation = match chars.next_back()? {
        'P' | 'p' => Orientation::Portrait,
        'L' | 'l' => Orientation::Landscape,
        _ => return None,
    };
    parse_paper_name(chars.as_str()).map(|paper| (paper, Some(orientation)))
}

fn parse_paper_name(value: &str) -> Option<PaperSize> {
    if let Some(paper) = PaperSize::from_name(value) {
        return Some(paper);
    }

    let (width, height) = value.split_once(['x', 'X'])?;
    let width = width.trim().parse::<f32>().ok()?;
    let height = height.trim().parse::<f32>().ok()?;
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0).then_some(
        PaperSize::Custom {
            width_pt: width,
            height_pt: height,
        },
    )
}

// =============================================================================
// Serialization
// =============================================================================

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

impl fmt::Display for LayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = self.orientation().suffix();
        match self.paper() {
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => write!(f, "p:{}x{}{}", width_pt, height_pt, suffix)?,
            named => write!(f, "p:{}{}", named.name().unwrap_or_default(), suffix)?,
        }

        write!(f, ", border:{}, g:{}", on_off(self.border()), on_off(self.guides()))?;

        let m = self.margins();
        if m.is_uniform() {
            write!(f, ", ma:{}", m.top)?;
        } else {
            write!(f, ", ma:{} {} {} {}", m.top, m.right, m.bottom, m.left)?;
        }

        if let Some(background) = self.background() {
            write!(f, ", bgcol:{}", background)?;
        }
        if self.order() != TileOrder::default() {
            write!(f, ", o:{}", self.order().code())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_margins_css_order() {
        assert_eq!(parse_margins("10"), Some(Margins::uniform(10.0)));

        let two = parse_margins("10 20").unwrap();
        assert_eq!((two.top, two.right, two.bottom, two.left), (10.0, 20.0, 10.0, 20.0));

        let four = parse_margins("1 2 3 4").unwrap();
        assert_eq!((four.top, four.right, four.bottom, four.left), (1.0, 2.0, 3.0, 4.0));

        assert_eq!(parse_margins("1 2 3"), None);
        assert_eq!(parse_margins("-5"), None);
        assert_eq!(parse_margins("ten"), None);
    }

    #[test]
    fn test_parse_paper_suffixes() {
        assert_eq!(parse_paper("A4"), Some((PaperSize::A4, None)));
        assert_eq!(
            parse_paper("a5l"),
            Some((PaperSize::A5, Some(Orientation::Landscape)))
        );
        // Full name wins over suffix stripping
        assert_eq!(parse_paper("Legal"), Some((PaperSize::Legal, None)));
        assert_eq!(
            parse_paper("LedgerP"),
            Some((PaperSize::Ledger, Some(Orientation::Portrait)))
        );
        assert_eq!(parse_paper("B5"), None);
        assert_eq!(parse_paper(""), None);
    }

    #[test]
    fn test_parse_custom_paper() {
        assert_eq!(
            parse_paper("500x700"),
            Some((
                PaperSize::Custom {
                    width_pt: 500.0,
                    height_pt: 700.0
                },
                None
            ))
        );
        assert_eq!(parse_paper("0x700"), None);
    }

    #[test]
    fn test_parse_bool_values() {
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
