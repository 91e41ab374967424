//! Structured construction attributes.
//!
//! [`StyleAttributes`] is the loosely typed form of a ring's configuration, as
//! it arrives from a theme or settings file. Keys are camelCase and every key
//! is optional. [`StyleAttributes::to_options`] validates colours and text
//! styles and turns the set keys into [`RingOption`]s.
//!
//! ```rust
//! use bubbletea_progress_ring::attrs::StyleAttributes;
//! use bubbletea_progress_ring::ring;
//!
//! let attrs = StyleAttributes {
//!     progress: Some(80),
//!     arc_color: Some("#3742fa".to_string()),
//!     ..StyleAttributes::default()
//! };
//! let ring = ring::new(&attrs.to_options()?);
//! assert_eq!(ring.progress(), 80);
//! assert_eq!(ring.text_color(), "#3742fa");
//! # Ok::<(), bubbletea_progress_ring::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::geometry::Padding;
use crate::paint::Typeface;
use crate::ring::{
    with_arc_color, with_arc_stroke_width, with_cycle_duration, with_padding, with_progress,
    with_text_color, with_text_size, with_track_color, with_track_stroke_width, with_typeface,
    RingOption,
};
use serde::Deserialize;
use std::time::Duration;

/// Ring configuration as read from structured data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleAttributes {
    /// Target percentage.
    pub progress: Option<i32>,
    /// Background track colour.
    pub track_color: Option<String>,
    /// Progress arc colour, and label colour when `text_color` is unset.
    pub arc_color: Option<String>,
    /// Label colour.
    pub text_color: Option<String>,
    /// Background track stroke width.
    pub track_stroke_width: Option<f32>,
    /// Progress arc stroke width.
    pub arc_stroke_width: Option<f32>,
    /// Label size before density scaling.
    pub text_size: Option<i32>,
    /// Label font family.
    pub typeface: Option<String>,
    /// Label style: `normal`, `bold`, `italic` or `bold|italic`. Without a
    /// `typeface` it applies to the default monospace family.
    pub text_style: Option<String>,
    /// Padding applied to every side.
    pub padding: Option<i32>,
    /// Animation cycle length in milliseconds.
    pub cycle_duration_ms: Option<u64>,
}

impl StyleAttributes {
    /// Validates the attributes and converts the set ones into options.
    ///
    /// The text colour option comes after the arc colour so an explicit label
    /// colour always wins.
    pub fn to_options(&self) -> Result<Vec<RingOption>> {
        let mut opts = Vec::new();

        if let Some(progress) = self.progress {
            opts.push(with_progress(progress));
        }
        if let Some(color) = &self.track_color {
            opts.push(with_track_color(checked_color("trackColor", color)?));
        }
        if let Some(color) = &self.arc_color {
            opts.push(with_arc_color(checked_color("arcColor", color)?));
        }
        if let Some(color) = &self.text_color {
            opts.push(with_text_color(checked_color("textColor", color)?));
        }
        if let Some(width) = self.track_stroke_width {
            opts.push(with_track_stroke_width(width));
        }
        if let Some(width) = self.arc_stroke_width {
            opts.push(with_arc_stroke_width(width));
        }
        if let Some(size) = self.text_size {
            opts.push(with_text_size(size));
        }
        if self.typeface.is_some() || self.text_style.is_some() {
            let family = self.typeface.as_deref().unwrap_or(DEFAULT_FAMILY);
            let style = self.text_style.as_deref().unwrap_or("normal");
            opts.push(with_typeface(styled_typeface(family, style)?));
        }
        if let Some(padding) = self.padding {
            opts.push(with_padding(Padding::uniform(padding)));
        }
        if let Some(ms) = self.cycle_duration_ms {
            opts.push(with_cycle_duration(Duration::from_millis(ms)));
        }

        Ok(opts)
    }
}

const DEFAULT_FAMILY: &str = "monospace";

fn styled_typeface(family: &str, style: &str) -> Result<Typeface> {
    let face = Typeface::new(family);
    let mut bold = false;
    let mut italic = false;
    for flag in style.split('|').map(str::trim) {
        match flag {
            "normal" => {}
            "bold" => bold = true,
            "italic" => italic = true,
            _ => return Err(Error::InvalidTextStyle(style.to_string())),
        }
    }
    Ok(match (bold, italic) {
        (true, true) => face.bold().italic(),
        (true, false) => face.bold(),
        (false, true) => face.italic(),
        (false, false) => face,
    })
}

fn checked_color(attribute: &'static str, value: &str) -> Result<String> {
    if is_valid_color(value) {
        Ok(value.to_string())
    } else {
        Err(Error::InvalidColor {
            attribute,
            value: value.to_string(),
        })
    }
}

/// True for `#RGB`, `#RRGGBB`, `#AARRGGBB` and ANSI indexes `0`..=`255`.
pub fn is_valid_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) && value.parse::<u8>().is_ok()
}
