//! Structured color values: solids and gradients with ordered stops

use crate::color::ColorToken;
use serde::Serialize;
use thiserror::Error;

/// Minimum number of stops a gradient may have
pub const MIN_STOPS: usize = 2;

/// Angle used by renderers when a linear gradient leaves it unspecified
/// (CSS `to bottom`)
pub const UNSPECIFIED_ANGLE: u16 = 180;

/// Gradient construction failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a gradient needs at least 2 stops, got {0}")]
pub struct TooFewStops(pub usize);

/// Gradient shape, with the angle carried only by linear gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GradientKind {
    Linear {
        #[serde(skip_serializing_if = "Option::is_none")]
        angle: Option<u16>,
    },
    Radial,
}

impl GradientKind {
    /// CSS function name, e.g. `linear-gradient`
    pub fn function_name(&self) -> &'static str {
        match self {
            GradientKind::Linear { .. } => "linear-gradient",
            GradientKind::Radial => "radial-gradient",
        }
    }

    pub fn angle(&self) -> Option<u16> {
        match self {
            GradientKind::Linear { angle } => *angle,
            GradientKind::Radial => None,
        }
    }
}

/// A color stop inside a gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stop {
    pub color: ColorToken,
    /// Percent along the gradient line, `0..=100`
    pub position: u8,
    pub selected: bool,
}

impl Stop {
    pub fn new(color: ColorToken, position: u8) -> Self {
        Self { color, position: position.min(100), selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// A gradient with at least two stops, exactly one of them selected.
///
/// Equality ignores the internal stop order and compares stops in
/// serialization order.
#[derive(Debug, Clone, Serialize)]
pub struct Gradient {
    kind: GradientKind,
    stops: Vec<Stop>,
}

impl PartialEq for Gradient {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.sorted_stops() == other.sorted_stops()
    }
}

impl Gradient {
    /// Build a gradient, normalizing selection: the first selected stop
    /// stays selected, or the first stop if none is.
    pub fn new(kind: GradientKind, mut stops: Vec<Stop>) -> Result<Self, TooFewStops> {
        if stops.len() < MIN_STOPS {
            return Err(TooFewStops(stops.len()));
        }
        let chosen = stops.iter().position(|s| s.selected).unwrap_or(0);
        for (i, stop) in stops.iter_mut().enumerate() {
            stop.selected = i == chosen;
        }
        Ok(Self { kind, stops })
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn with_kind(mut self, kind: GradientKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.stops.iter().position(|s| s.selected).unwrap_or(0)
    }

    pub fn selected_stop(&self) -> &Stop {
        &self.stops[self.selected_index()]
    }

    /// Angle a renderer should use, substituting [`UNSPECIFIED_ANGLE`]
    pub fn effective_angle(&self) -> Option<u16> {
        match self.kind {
            GradientKind::Linear { angle } => Some(angle.unwrap_or(UNSPECIFIED_ANGLE)),
            GradientKind::Radial => None,
        }
    }

    /// Stops in serialization order: ascending position, stable.
    pub fn sorted_stops(&self) -> Vec<Stop> {
        let mut sorted = self.stops.clone();
        sorted.sort_by_key(|s| s.position);
        sorted
    }
}

/// A parsed color value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ColorValue {
    Solid { color: ColorToken },
    Gradient(Gradient),
}

impl ColorValue {
    pub fn is_gradient(&self) -> bool {
        matches!(self, ColorValue::Gradient(_))
    }

    /// The color channel edits apply to: the solid itself or the selected stop.
    pub fn active_color(&self) -> ColorToken {
        match self {
            ColorValue::Solid { color } => *color,
            ColorValue::Gradient(gradient) => gradient.selected_stop().color,
        }
    }

    pub fn as_gradient(&self) -> Option<&Gradient> {
        match self {
            ColorValue::Gradient(gradient) => Some(gradient),
            ColorValue::Solid { .. } => None,
        }
    }
}
