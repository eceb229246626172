//! Value parsing: text to [`ColorValue`]
//!
//! Grammar:
//! ```text
//! value    = gradient / token
//! gradient = "linear-gradient(" [angle ","] stops ")"
//!          / "radial-gradient(" ["circle,"] stops ")"
//! stops    = stop *("," stop)
//! stop     = token [SP number "%"]
//! ```
//! A stop's token text in upper case marks the stop as selected.

use crate::color::{ColorError, ColorToken};
use crate::math::{clamp_position, is_upper_token};
use crate::value::{ColorValue, Gradient, GradientKind, Stop, TooFewStops};
use thiserror::Error;

/// Error type for value parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input string was empty
    #[error("empty value")]
    Empty,
    /// Gradient wrapper without any stops
    #[error("gradient has no color stops")]
    NoStops,
    /// Fewer stops than a gradient needs
    #[error(transparent)]
    TooFewStops(#[from] TooFewStops),
    /// Leading linear angle is not `<0..=360>deg`
    #[error("invalid gradient angle '{0}'")]
    InvalidAngle(String),
    /// Stop position is not a number
    #[error("invalid stop position '{0}'")]
    InvalidPosition(String),
    /// Unbalanced parentheses
    #[error("unterminated '(' in '{0}'")]
    Unterminated(String),
    /// A stop's color token is invalid
    #[error("invalid color in stop '{stop}': {error}")]
    InvalidStop { stop: String, error: ColorError },
    /// A solid value is not a valid color token
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorError),
}

/// Parse a solid color or gradient.
///
/// # Examples
///
/// ```
/// use huepick::parser::parse_value;
/// use huepick::value::{ColorValue, GradientKind};
///
/// let value = parse_value("linear-gradient(90deg, #FF0000 0%, #00ff00 100%)").unwrap();
/// let gradient = value.as_gradient().unwrap();
/// assert_eq!(gradient.kind(), GradientKind::Linear { angle: Some(90) });
/// assert_eq!(gradient.selected_index(), 0);
///
/// assert!(!parse_value("#00ff00").unwrap().is_gradient());
/// ```
///
/// # Errors
///
/// Returns `ParseError` when the text is empty, a gradient has no (or too
/// few) stops, or any color token is invalid. Nothing is returned partially.
pub fn parse_value(text: &str) -> Result<ColorValue, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let lower = text.to_ascii_lowercase();
    for (prefix, radial) in [("linear-gradient(", false), ("radial-gradient(", true)] {
        if lower.starts_with(prefix) {
            if !text.ends_with(')') {
                return Err(ParseError::Unterminated(text.to_string()));
            }
            let body = &text[prefix.len()..text.len() - 1];
            return parse_gradient(body, radial).map(ColorValue::Gradient);
        }
    }

    Ok(ColorValue::Solid { color: ColorToken::parse(text)? })
}

fn parse_gradient(body: &str, radial: bool) -> Result<Gradient, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::NoStops);
    }
    let mut parts = split_top_level(body)?;

    let kind = if radial {
        if parts.first().is_some_and(|p| p.eq_ignore_ascii_case("circle")) {
            parts.remove(0);
        }
        GradientKind::Radial
    } else {
        let angle = match parts.first() {
            Some(first) if first.to_ascii_lowercase().ends_with("deg") => {
                let angle = parse_angle(first)?;
                parts.remove(0);
                Some(angle)
            }
            _ => None,
        };
        GradientKind::Linear { angle }
    };

    if parts.is_empty() {
        return Err(ParseError::NoStops);
    }

    let stops = parts.into_iter().map(parse_stop).collect::<Result<Vec<_>, _>>()?;
    Ok(Gradient::new(kind, stops)?)
}

fn parse_angle(s: &str) -> Result<u16, ParseError> {
    let digits = &s[..s.len() - 3];
    match digits.trim().parse::<u16>() {
        Ok(angle) if angle <= 360 => Ok(angle),
        _ => Err(ParseError::InvalidAngle(s.to_string())),
    }
}

/// Parse `<token> <n>%`; a stop without a `%` suffix sits at 0.
fn parse_stop(s: &str) -> Result<Stop, ParseError> {
    let (color_text, position) = match s.rsplit_once(char::is_whitespace) {
        Some((color, pos)) if pos.ends_with('%') => {
            let number = &pos[..pos.len() - 1];
            let value: f64 =
                number.parse().map_err(|_| ParseError::InvalidPosition(pos.to_string()))?;
            if !value.is_finite() {
                return Err(ParseError::InvalidPosition(pos.to_string()));
            }
            (color.trim(), clamp_position(value.round() as i64))
        }
        // A bare number is a position missing its `%`.
        Some((color, pos)) if pos.parse::<f64>().is_ok() => (color.trim(), 0),
        _ => (s, 0),
    };

    let color = ColorToken::parse(color_text)
        .map_err(|error| ParseError::InvalidStop { stop: s.to_string(), error })?;
    Ok(Stop::new(color, position).selected(is_upper_token(color_text)))
}

/// Split on commas outside parentheses, trimming each part.
pub fn split_top_level(s: &str) -> Result<Vec<&str>, ParseError> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return Err(ParseError::Unterminated(s.to_string()));
        }
    }

    if depth != 0 {
        return Err(ParseError::Unterminated(s.to_string()));
    }
    parts.push(s[start..].trim());
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgba, TokenSyntax};

    // ========== Solid tests ==========

    #[test]
    fn test_parse_solid_hex() {
        let value = parse_value("#ff0000").unwrap();
        assert_eq!(value.active_color().rgba, Rgba::opaque(255, 0, 0));
        assert!(!value.is_gradient());
    }

    #[test]
    fn test_parse_solid_rgba() {
        let value = parse_value("rgba(175, 51, 242, 1)").unwrap();
        assert_eq!(value.active_color().syntax, TokenSyntax::Rgba);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_value(""), Err(ParseError::Empty));
        assert_eq!(parse_value("  "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_invalid_solid() {
        assert_eq!(
            parse_value("#12345"),
            Err(ParseError::InvalidColor(ColorError::InvalidLength(5)))
        );
    }

    // ========== Gradient tests ==========

    #[test]
    fn test_parse_linear_gradient() {
        let value = parse_value("linear-gradient(90deg, #FF0000 0%, #00ff00 100%)").unwrap();
        let g = value.as_gradient().unwrap();
        assert_eq!(g.kind(), GradientKind::Linear { angle: Some(90) });
        assert_eq!(g.len(), 2);
        assert_eq!(g.stops()[0].position, 0);
        assert!(g.stops()[0].selected);
        assert_eq!(g.stops()[1].position, 100);
        assert!(!g.stops()[1].selected);
    }

    #[test]
    fn test_parse_radial_gradient() {
        let value =
            parse_value("radial-gradient(circle, rgba(96,93,93,1) 0%, rgba(255,255,255,1) 100%)")
                .unwrap();
        let g = value.as_gradient().unwrap();
        assert_eq!(g.kind(), GradientKind::Radial);
        assert_eq!(g.stops()[1].color.rgba, Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn test_parse_radial_without_shape() {
        let value = parse_value("radial-gradient(#ff0000 0%, #0000ff 100%)").unwrap();
        assert_eq!(value.as_gradient().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_linear_without_angle() {
        let value = parse_value("linear-gradient(#ff0000 0%, #0000ff 100%)").unwrap();
        assert_eq!(value.as_gradient().unwrap().kind(), GradientKind::Linear { angle: None });
    }

    #[test]
    fn test_selection_from_upper_case() {
        let value = parse_value(
            "linear-gradient(45deg, #ff0000 0%, RGBA(0, 0, 0, 1) 40%, #0000ff 100%)",
        )
        .unwrap();
        assert_eq!(value.as_gradient().unwrap().selected_index(), 1);
    }

    #[test]
    fn test_no_upper_case_selects_first() {
        let value = parse_value("linear-gradient(45deg, #ff0000 0%, #0000ff 100%)").unwrap();
        assert_eq!(value.as_gradient().unwrap().selected_index(), 0);
    }

    #[test]
    fn test_stop_without_percent_sits_at_zero() {
        let value = parse_value("linear-gradient(45deg, #ff0000, #0000ff 100%)").unwrap();
        assert_eq!(value.as_gradient().unwrap().stops()[0].position, 0);
    }

    #[test]
    fn test_bare_number_position_sits_at_zero() {
        let value = parse_value("linear-gradient(90deg, #ff0000 50, #0000ff 100%)").unwrap();
        let g = value.as_gradient().unwrap();
        assert_eq!(g.stops()[0].position, 0);
        assert_eq!(g.stops()[0].color.rgba, Rgba::opaque(255, 0, 0));

        let value = parse_value("linear-gradient(rgba(1, 2, 3, 0.5) 30, #0000ff 100%)").unwrap();
        let g = value.as_gradient().unwrap();
        assert_eq!(g.stops()[0].position, 0);
        assert_eq!(g.stops()[0].color.rgba, Rgba::new(1, 2, 3, 0.5));
    }

    #[test]
    fn test_stop_position_is_clamped() {
        let value = parse_value("linear-gradient(45deg, #ff0000 -10%, #0000ff 150%)").unwrap();
        let g = value.as_gradient().unwrap();
        assert_eq!(g.stops()[0].position, 0);
        assert_eq!(g.stops()[1].position, 100);
    }

    #[test]
    fn test_gradient_without_stops() {
        assert_eq!(parse_value("linear-gradient()"), Err(ParseError::NoStops));
        assert_eq!(parse_value("linear-gradient(90deg)"), Err(ParseError::NoStops));
        assert_eq!(parse_value("radial-gradient(circle)"), Err(ParseError::NoStops));
    }

    #[test]
    fn test_gradient_with_one_stop() {
        assert_eq!(
            parse_value("linear-gradient(90deg, #ff0000 0%)"),
            Err(ParseError::TooFewStops(TooFewStops(1)))
        );
    }

    #[test]
    fn test_gradient_with_invalid_stop_color() {
        let err = parse_value("linear-gradient(90deg, #ff0000 0%, rgb(300, 0, 0) 100%)").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStop { .. }));
    }

    #[test]
    fn test_invalid_angle() {
        assert_eq!(
            parse_value("linear-gradient(400deg, #ff0000 0%, #0000ff 100%)"),
            Err(ParseError::InvalidAngle("400deg".to_string()))
        );
    }

    #[test]
    fn test_unterminated_gradient() {
        assert!(matches!(
            parse_value("linear-gradient(90deg, #ff0000 0%, #0000ff 100%"),
            Err(ParseError::Unterminated(_))
        ));
    }

    // ========== Splitting tests ==========

    #[test]
    fn test_split_top_level_respects_parentheses() {
        let parts = split_top_level("90deg, rgba(1, 2, 3, 1) 0%, #fff 100%").unwrap();
        assert_eq!(parts, vec!["90deg", "rgba(1, 2, 3, 1) 0%", "#fff 100%"]);
    }

    #[test]
    fn test_split_top_level_unbalanced() {
        assert!(split_top_level("rgba(1, 2").is_err());
        assert!(split_top_level("a), b").is_err());
    }
}
