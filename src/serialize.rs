//! Canonical text output for [`ColorValue`]
//!
//! The inverse of [`crate::parser::parse_value`]: stops are written in
//! ascending position order and the selected stop's token is upper-cased.

use crate::math::apply_case;
use crate::value::{ColorValue, Gradient, GradientKind, Stop};
use std::fmt;

/// Serialize a value to canonical text.
///
/// ```
/// use huepick::parser::parse_value;
/// use huepick::serialize::serialize;
///
/// let text = "linear-gradient(90deg, #00ff00 100%, #FF0000 0%)";
/// assert_eq!(
///     serialize(&parse_value(text).unwrap()),
///     "linear-gradient(90deg, #FF0000 0%, #00ff00 100%)"
/// );
/// ```
pub fn serialize(value: &ColorValue) -> String {
    match value {
        ColorValue::Solid { color } => color.render(),
        ColorValue::Gradient(gradient) => serialize_gradient(gradient),
    }
}

pub fn serialize_gradient(gradient: &Gradient) -> String {
    let mut parts = Vec::with_capacity(gradient.len() + 1);
    match gradient.kind() {
        GradientKind::Linear { angle: Some(angle) } => parts.push(format!("{}deg", angle)),
        GradientKind::Linear { angle: None } => {}
        GradientKind::Radial => parts.push("circle".to_string()),
    }
    parts.extend(gradient.sorted_stops().iter().map(serialize_stop));
    format!("{}({})", gradient.kind().function_name(), parts.join(", "))
}

/// `<token> <position>%`, upper-case iff selected
pub fn serialize_stop(stop: &Stop) -> String {
    let text = if stop.selected { stop.color.render_caseable() } else { stop.color.render() };
    format!("{} {}%", apply_case(&text, stop.selected), stop.position)
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_gradient(self))
    }
}
