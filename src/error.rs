//! Error types for building a progress ring from structured configuration.
//!
//! Drawing, measuring and animating a ring never fail. The only fallible path is
//! turning loosely-typed attributes (for example a JSON theme file) into
//! [`RingOption`](crate::ring::RingOption)s, where colour and text style strings
//! are checked.

use thiserror::Error;

/// Errors produced while validating ring attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A colour attribute was not a hex code (`#RGB`, `#RRGGBB`, `#AARRGGBB`)
    /// or an ANSI palette index between 0 and 255.
    #[error("invalid color for `{attribute}`: {value:?}")]
    InvalidColor {
        /// Name of the attribute that carried the colour.
        attribute: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A text style was not `normal`, `bold`, `italic` or `bold|italic`.
    #[error("invalid text style: {0:?}")]
    InvalidTextStyle(String),
}

/// Result alias used by the fallible configuration helpers.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_display() {
        let err = Error::InvalidColor {
            attribute: "trackColor",
            value: "#12".to_string(),
        };
        assert_eq!(err.to_string(), "invalid color for `trackColor`: \"#12\"");
    }

    #[test]
    fn test_invalid_text_style_display() {
        let err = Error::InvalidTextStyle("oblique".to_string());
        assert_eq!(err.to_string(), "invalid text style: \"oblique\"");
    }
}
