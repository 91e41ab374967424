//! Paint descriptions handed to a [`Canvas`](crate::canvas::Canvas).
//!
//! A [`Paint`] says how something is drawn (colour, stroke, text size and
//! typeface). It carries no drawing logic of its own.

/// Fill or stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    /// Fill the interior of shapes.
    #[default]
    Fill,
    /// Outline shapes with the stroke width.
    Stroke,
}

/// Shape of stroke ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    /// Ends flush with the path end.
    #[default]
    Butt,
    /// Semicircular ends.
    Round,
    /// Square ends extending half the stroke width.
    Square,
}

/// Shape of stroke corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeJoin {
    /// Sharp corners.
    #[default]
    Miter,
    /// Rounded corners.
    Round,
    /// Cut-off corners.
    Bevel,
}

/// Horizontal anchoring of text relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// The position marks the start of the text.
    #[default]
    Left,
    /// The position marks the middle of the text.
    Center,
    /// The position marks the end of the text.
    Right,
}

/// A font selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typeface {
    /// Font family name.
    pub family: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
}

impl Typeface {
    /// Regular weight, upright face of `family`.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            bold: false,
            italic: false,
        }
    }

    /// Returns the bold variant.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Returns the italic variant.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Vertical font metrics relative to the baseline. Ascent is negative (above
/// the baseline) and descent positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of descending glyphs.
    pub descent: f32,
}

impl FontMetrics {
    /// Typical Latin proportions for a font of `text_size`.
    pub fn approximate(text_size: f32) -> Self {
        Self {
            ascent: -0.8 * text_size,
            descent: 0.2 * text_size,
        }
    }

    /// Offset from the baseline to the visual centre of the glyphs.
    pub fn center_offset(&self) -> f32 {
        (self.ascent + self.descent) / 2.0
    }
}

/// How a shape or text run is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Colour (hex code or ANSI index, as accepted by lipgloss).
    pub color: String,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Stroke width in layout units.
    pub stroke_width: f32,
    /// Stroke end shape.
    pub stroke_cap: StrokeCap,
    /// Stroke corner shape.
    pub stroke_join: StrokeJoin,
    /// Antialias edges.
    pub anti_alias: bool,
    /// Text size in device units.
    pub text_size: f32,
    /// Text anchoring.
    pub text_align: TextAlign,
    /// Font used for text, `None` for the surface default.
    pub typeface: Option<Typeface>,
    /// Character used by cell based surfaces when they rasterise a stroke.
    pub glyph: char,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            anti_alias: false,
            text_size: 12.0,
            text_align: TextAlign::Left,
            typeface: None,
            glyph: '█',
        }
    }
}

impl Paint {
    /// An antialiased, round capped and joined stroke.
    pub fn round_stroke(color: impl Into<String>, width: f32, glyph: char) -> Self {
        Self {
            color: color.into(),
            style: PaintStyle::Stroke,
            stroke_width: width,
            stroke_cap: StrokeCap::Round,
            stroke_join: StrokeJoin::Round,
            anti_alias: true,
            glyph,
            ..Self::default()
        }
    }

    /// An antialiased paint for centred text.
    pub fn centered_text(color: impl Into<String>, text_size: f32) -> Self {
        Self {
            color: color.into(),
            anti_alias: true,
            text_size,
            text_align: TextAlign::Center,
            ..Self::default()
        }
    }
}
