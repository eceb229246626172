//! Color tokens: the single-color syntaxes a value may contain
//!
//! Supports the following formats:
//! - Hex: `#RRGGBB`
//! - Functional: `rgb(r, g, b)`, `rgba(r, g, b, a)`
//!
//! Function names are matched case-insensitively because the case of a
//! token's text is reused to flag the selected gradient stop.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error type for color token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string is neither `#...` nor a known color function
    #[error("color must start with '#' or a color function")]
    MissingHash,
    /// Invalid length (must be 6 hex chars after #)
    #[error("invalid color length {0}, expected 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Unsupported color function
    #[error("unknown color function '{0}'")]
    UnknownFunction(String),
    /// Functional notation without a closing parenthesis
    #[error("missing ')' in '{0}'")]
    Unterminated(String),
    /// Wrong number of function arguments
    #[error("'{function}' expects {expected} arguments, got {got}")]
    ArgumentCount { function: String, expected: usize, got: usize },
    /// A component is not a number of the expected shape
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// A component is outside its allowed range
    #[error("{component} {value} is out of range {min}..={max}")]
    OutOfRange { component: &'static str, value: String, min: u32, max: u32 },
}

/// Canonical RGBA quadruple: byte channels and a unit alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Whether the `#rrggbb` form contains a letter
    fn hex_has_letter(&self) -> bool {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b).chars().any(|c| c.is_ascii_alphabetic())
    }
}

/// The external syntax a token was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSyntax {
    Hex,
    Rgb,
    Rgba,
}

/// A color written in one of the supported syntaxes.
///
/// Equality compares the canonical RGBA only, so `#ff0000` equals
/// `rgb(255, 0, 0)`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorToken {
    pub syntax: TokenSyntax,
    pub rgba: Rgba,
}

impl PartialEq for ColorToken {
    fn eq(&self, other: &Self) -> bool {
        self.rgba == other.rgba
    }
}

impl ColorToken {
    pub fn new(syntax: TokenSyntax, rgba: Rgba) -> Self {
        Self { syntax, rgba }
    }

    /// Token in `rgba(...)` syntax, which channel edits produce.
    pub fn from_rgba(rgba: Rgba) -> Self {
        Self { syntax: TokenSyntax::Rgba, rgba }
    }

    /// Parse a color token.
    ///
    /// ```
    /// use huepick::color::{ColorToken, Rgba};
    ///
    /// let red = ColorToken::parse("#FF0000").unwrap();
    /// assert_eq!(red.rgba, Rgba::opaque(255, 0, 0));
    ///
    /// let half = ColorToken::parse("rgba(0, 0, 255, 0.5)").unwrap();
    /// assert_eq!(half.rgba, Rgba::new(0, 0, 255, 0.5));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ColorError` if the text is outside the token grammar or a
    /// component is out of range. Components are never clamped.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if s.starts_with('#') {
            return parse_hex_color(s).map(|rgba| Self::new(TokenSyntax::Hex, rgba));
        }

        let (name, args) = split_function(s)?;
        match name.as_str() {
            "rgb" => {
                let [r, g, b] = expect_args::<3>(&name, &args)?;
                Ok(Self::new(
                    TokenSyntax::Rgb,
                    Rgba::opaque(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?),
                ))
            }
            "rgba" => {
                let [r, g, b, a] = expect_args::<4>(&name, &args)?;
                Ok(Self::new(
                    TokenSyntax::Rgba,
                    Rgba::new(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?, parse_alpha(a)?),
                ))
            }
            _ => Err(ColorError::UnknownFunction(name)),
        }
    }

    /// Lower-case canonical text for this token.
    pub fn render(&self) -> String {
        let Rgba { r, g, b, a } = self.rgba;
        match self.syntax {
            TokenSyntax::Hex => format!("#{:02x}{:02x}{:02x}", r, g, b),
            TokenSyntax::Rgb => format!("rgb({}, {}, {})", r, g, b),
            // Shortest text that parses back to the same alpha.
            TokenSyntax::Rgba => format!("rgba({}, {}, {}, {})", r, g, b, a),
        }
    }

    /// Text whose letter case can carry a selection flag.
    ///
    /// A hex token made only of decimal digits has no case, so it is
    /// rewritten in functional syntax.
    pub fn render_caseable(&self) -> String {
        if self.syntax == TokenSyntax::Hex && !self.rgba.hex_has_letter() {
            let Rgba { r, g, b, .. } = self.rgba;
            return format!("rgb({}, {}, {})", r, g, b);
        }
        self.render()
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Parse a `#RRGGBB` string
fn parse_hex_color(s: &str) -> Result<Rgba, ColorError> {
    let hex = &s[1..];

    // Validate all characters are hex
    for c in hex.chars() {
        if !c.is_ascii_hexdigit() {
            return Err(ColorError::InvalidHex(c));
        }
    }

    if hex.len() != 6 {
        return Err(ColorError::InvalidLength(hex.len()));
    }

    let r = parse_hex_pair(&hex[0..2])?;
    let g = parse_hex_pair(&hex[2..4])?;
    let b = parse_hex_pair(&hex[4..6])?;
    Ok(Rgba::opaque(r, g, b))
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut value = 0u8;
    for c in s.chars() {
        let digit = c.to_digit(16).ok_or(ColorError::InvalidHex(c))? as u8;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Split `name(a, b, c)` into a lower-cased name and trimmed arguments.
pub(crate) fn split_function(s: &str) -> Result<(String, Vec<&str>), ColorError> {
    let open = s.find('(').ok_or(ColorError::MissingHash)?;
    if !s.ends_with(')') {
        return Err(ColorError::Unterminated(s.to_string()));
    }
    let name = s[..open].trim().to_ascii_lowercase();
    let body = &s[open + 1..s.len() - 1];
    let args = body.split(',').map(str::trim).collect();
    Ok((name, args))
}

pub(crate) fn expect_args<'a, const N: usize>(
    function: &str,
    args: &[&'a str],
) -> Result<[&'a str; N], ColorError> {
    <[&str; N]>::try_from(args).map_err(|_| ColorError::ArgumentCount {
        function: function.to_string(),
        expected: N,
        got: args.len(),
    })
}

/// Parse an integer byte channel; fractions and overflow are errors.
fn parse_channel(s: &str) -> Result<u8, ColorError> {
    let value: i64 = s.parse().map_err(|_| ColorError::InvalidNumber(s.to_string()))?;
    u8::try_from(value).map_err(|_| ColorError::OutOfRange {
        component: "channel",
        value: s.to_string(),
        min: 0,
        max: 255,
    })
}

/// Parse a unit alpha in `[0, 1]`.
fn parse_alpha(s: &str) -> Result<f64, ColorError> {
    let value: f64 = s.parse().map_err(|_| ColorError::InvalidNumber(s.to_string()))?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ColorError::OutOfRange { component: "alpha", value: s.to_string(), min: 0, max: 1 });
    }
    Ok(value)
}
