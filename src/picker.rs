//! Picker session: the operations a color picker UI invokes
//!
//! A session owns the latest value text, the host's change callback, the
//! recent-color history and the collected diagnostics. Each operation parses
//! the current text, transforms it, serializes the result, stores it and
//! calls the callback exactly once. A failed operation changes nothing and
//! does not call the callback.
//!
//! # Example
//!
//! ```
//! use huepick::picker::PickerSession;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let mut picker = PickerSession::new("#ff0000", move |v: &str| sink.borrow_mut().push(v.to_string()));
//!
//! assert_eq!(picker.value_to_hsl().unwrap(), "hsl(0, 100%, 50%)");
//! picker.set_g(255.0).unwrap();
//! assert_eq!(seen.borrow().as_slice(), ["rgba(255, 255, 0, 1)"]);
//! ```

use crate::color::{ColorError, ColorToken, Rgba};
use crate::config::{DefaultsConfig, PickerConfig};
use crate::convert::{self, edit_hsl, edit_hsv, Hsl, HslChannel, HsvChannel};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::math::{clamp_input, round_to, to_channel};
use crate::parser::{parse_value, ParseError};
use crate::recent::RecentColors;
use crate::serialize::serialize;
use crate::stops::{self, StopError};
use crate::value::{ColorValue, Gradient, GradientKind};
use std::fmt;
use thiserror::Error;

/// Host callback receiving every accepted new value
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Error type for picker operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    /// The current or supplied value does not parse
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An edit produced an invalid color
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorError),
    /// Delete requested on a gradient with only two stops
    #[error("a gradient must have at least two stops ({len} present)")]
    MinStopsViolation { len: usize },
    /// Stop index does not exist
    #[error("stop index {index} is out of range for {len} stops")]
    OutOfRange { index: usize, len: usize },
}

impl From<StopError> for PickerError {
    fn from(e: StopError) -> Self {
        match e {
            StopError::OutOfRange { index, len } => PickerError::OutOfRange { index, len },
            StopError::MinStopsViolation { len } => PickerError::MinStopsViolation { len },
        }
    }
}

/// One picker instance
pub struct PickerSession {
    value: String,
    on_change: ChangeCallback,
    recent: RecentColors,
    diagnostics: Diagnostics,
    defaults: DefaultsConfig,
}

impl fmt::Debug for PickerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerSession")
            .field("value", &self.value)
            .field("recent", &self.recent)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl PickerSession {
    /// Start a session with the built-in defaults.
    pub fn new(value: impl Into<String>, on_change: impl FnMut(&str) + 'static) -> Self {
        Self::with_config(value, on_change, &PickerConfig::default())
    }

    /// Start a session using the defaults from `config`.
    ///
    /// An unparseable starting value is reported as a diagnostic; every
    /// operation then fails with [`PickerError::Parse`] until
    /// [`set_value`](Self::set_value) supplies a valid one.
    pub fn with_config(
        value: impl Into<String>,
        on_change: impl FnMut(&str) + 'static,
        config: &PickerConfig,
    ) -> Self {
        let mut session = Self {
            value: value.into(),
            on_change: Box::new(on_change),
            recent: RecentColors::with_capacity(config.defaults.history_size),
            diagnostics: Diagnostics::new(),
            defaults: config.defaults.clone(),
        };
        match parse_value(&session.value) {
            Ok(parsed) => session.remember(&parsed),
            Err(e) => session.diagnostics.report(
                DiagnosticKind::InvalidInput,
                format!("a valid value must be passed to the picker: {}", e),
            ),
        }
        session
    }

    /// Current value text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value from the host side. Does not invoke the callback.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), PickerError> {
        let value = value.into();
        let parsed = parse_value(&value)?;
        self.value = value;
        self.remember(&parsed);
        Ok(())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    // ========== internals ==========

    fn current(&self) -> Result<ColorValue, PickerError> {
        Ok(parse_value(&self.value)?)
    }

    fn remember(&mut self, value: &ColorValue) {
        self.recent.record(&value.active_color().render());
    }

    fn commit(&mut self, value: &ColorValue) -> String {
        let text = serialize(value);
        tracing::debug!(value = %text, "picker value changed");
        self.value = text.clone();
        (self.on_change)(&text);
        self.remember(value);
        text
    }

    /// Apply a channel edit to the active color, solid or selected stop.
    fn edit_active<F>(&mut self, edit: F) -> Result<String, PickerError>
    where
        F: FnOnce(Rgba) -> Result<Rgba, ColorError>,
    {
        let current = self.current()?;
        let rgba = match edit(current.active_color().rgba) {
            Ok(rgba) => rgba,
            Err(e) => {
                self.diagnostics.report(
                    DiagnosticKind::InvalidColor,
                    format!("the new color was invalid ({}); pass whole values between 0 and 100", e),
                );
                return Err(e.into());
            }
        };

        let token = ColorToken::from_rgba(rgba);
        let next = match current {
            ColorValue::Solid { .. } => ColorValue::Solid { color: token },
            ColorValue::Gradient(g) => ColorValue::Gradient(stops::recolor_selected(&g, token)?),
        };
        Ok(self.commit(&next))
    }

    /// The current gradient, or `None` with an advisory when the value is solid.
    fn gradient_for(&mut self, operation: &str) -> Result<Option<Gradient>, PickerError> {
        match self.current()? {
            ColorValue::Gradient(g) => Ok(Some(g)),
            ColorValue::Solid { .. } => {
                self.diagnostics.report(
                    DiagnosticKind::NotGradient,
                    format!("{} is only relevant when the picker is in gradient mode", operation),
                );
                Ok(None)
            }
        }
    }

    fn commit_gradient(&mut self, gradient: Gradient) -> String {
        self.commit(&ColorValue::Gradient(gradient))
    }

    // ========== channel edits ==========

    pub fn set_r(&mut self, r: f64) -> Result<String, PickerError> {
        let r = to_channel(clamp_input(r, 0.0, 255.0));
        self.edit_active(|rgba| Ok(Rgba { r, ..rgba }))
    }

    pub fn set_g(&mut self, g: f64) -> Result<String, PickerError> {
        let g = to_channel(clamp_input(g, 0.0, 255.0));
        self.edit_active(|rgba| Ok(Rgba { g, ..rgba }))
    }

    pub fn set_b(&mut self, b: f64) -> Result<String, PickerError> {
        let b = to_channel(clamp_input(b, 0.0, 255.0));
        self.edit_active(|rgba| Ok(Rgba { b, ..rgba }))
    }

    /// Set opacity as a percentage, clamped to `0..=100`.
    pub fn set_a(&mut self, percent: f64) -> Result<String, PickerError> {
        let a = round_to(clamp_input(percent, 0.0, 100.0) / 100.0, 2);
        self.edit_active(|rgba| Ok(Rgba { a, ..rgba }))
    }

    pub fn set_hue(&mut self, hue: f64) -> Result<String, PickerError> {
        self.edit_active(|rgba| edit_hsl(rgba, HslChannel::Hue, hue))
    }

    pub fn set_saturation(&mut self, saturation: f64) -> Result<String, PickerError> {
        self.edit_active(|rgba| edit_hsl(rgba, HslChannel::Saturation, saturation))
    }

    pub fn set_lightness(&mut self, lightness: f64) -> Result<String, PickerError> {
        self.edit_active(|rgba| edit_hsl(rgba, HslChannel::Lightness, lightness))
    }

    /// Set the HSV value (brightness) component.
    pub fn set_brightness(&mut self, value: f64) -> Result<String, PickerError> {
        self.edit_active(|rgba| edit_hsv(rgba, HsvChannel::Value, value))
    }

    // ========== kind and mode ==========

    /// Switch a gradient to linear, keeping its stops.
    pub fn set_linear(&mut self) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("set_linear")? else {
            return Ok(self.value.clone());
        };
        let angle = g.kind().angle().unwrap_or(self.defaults.angle);
        Ok(self.commit_gradient(g.with_kind(GradientKind::Linear { angle: Some(angle) })))
    }

    /// Switch a gradient to radial, keeping its stops.
    pub fn set_radial(&mut self) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("set_radial")? else {
            return Ok(self.value.clone());
        };
        Ok(self.commit_gradient(g.with_kind(GradientKind::Radial)))
    }

    /// Set the linear angle, clamped to `0..=360`. A radial gradient
    /// becomes linear, with an advisory.
    pub fn set_degrees(&mut self, degrees: f64) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("set_degrees")? else {
            return Ok(self.value.clone());
        };
        if g.kind() == GradientKind::Radial {
            self.diagnostics.report(
                DiagnosticKind::KindMismatch,
                "updating degrees on a radial gradient changes its type to linear",
            );
        }
        let angle = clamp_input(degrees, 0.0, 360.0).round() as u16;
        Ok(self.commit_gradient(g.with_kind(GradientKind::Linear { angle: Some(angle) })))
    }

    /// Switch to a solid color, the configured default when none is given.
    pub fn set_solid(&mut self, color: Option<&str>) -> Result<String, PickerError> {
        let text = match color {
            Some(text) => text.to_string(),
            None => {
                self.diagnostics.report(
                    DiagnosticKind::DefaultApplied,
                    format!("no starting color given, using {}", self.defaults.color),
                );
                self.defaults.color.clone()
            }
        };
        let next = match parse_value(&text)? {
            solid @ ColorValue::Solid { .. } => solid,
            gradient @ ColorValue::Gradient(_) => {
                self.diagnostics.report(
                    DiagnosticKind::KindMismatch,
                    "set_solid received a gradient, using its selected color",
                );
                ColorValue::Solid { color: gradient.active_color() }
            }
        };
        Ok(self.commit(&next))
    }

    /// Switch to a gradient, the configured default when none is given.
    ///
    /// A solid argument recolors the default gradient's selected stop.
    pub fn set_gradient(&mut self, gradient: Option<&str>) -> Result<String, PickerError> {
        let text = match gradient {
            Some(text) => text.to_string(),
            None => {
                self.diagnostics.report(
                    DiagnosticKind::DefaultApplied,
                    format!("no starting gradient given, using {}", self.defaults.gradient),
                );
                self.defaults.gradient.clone()
            }
        };
        let next = match parse_value(&text)? {
            gradient @ ColorValue::Gradient(_) => gradient,
            ColorValue::Solid { color } => {
                self.diagnostics.report(
                    DiagnosticKind::KindMismatch,
                    "set_gradient received a solid color, seeding the default gradient with it",
                );
                match parse_value(&self.defaults.gradient)? {
                    ColorValue::Gradient(g) => ColorValue::Gradient(stops::recolor_selected(&g, color)?),
                    solid => solid,
                }
            }
        };
        Ok(self.commit(&next))
    }

    // ========== stops ==========

    /// Select the stop at `index`.
    pub fn set_selected_point(&mut self, index: usize) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("set_selected_point")? else {
            return Ok(self.value.clone());
        };
        let next = stops::select(&g, index)?;
        Ok(self.commit_gradient(next))
    }

    /// Add a stop in the selected stop's color and select it.
    pub fn add_point(&mut self, position: Option<i64>) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("add_point")? else {
            return Ok(self.value.clone());
        };
        let position = match position {
            Some(p) => p,
            None => {
                self.diagnostics.report(
                    DiagnosticKind::DefaultApplied,
                    format!(
                        "no stop position given for the new color point, defaulted to {}",
                        self.defaults.stop_position
                    ),
                );
                i64::from(self.defaults.stop_position)
            }
        };
        let color = g.selected_stop().color;
        let next = stops::add_stop(&g, position, color)?;
        Ok(self.commit_gradient(next))
    }

    /// Delete the stop at `index`, the selected stop when none is given.
    pub fn delete_point(&mut self, index: Option<usize>) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("delete_point")? else {
            return Ok(self.value.clone());
        };
        if g.len() <= crate::value::MIN_STOPS {
            self.diagnostics.report(
                DiagnosticKind::MinStops,
                "a gradient must have at least two colors, disable the delete control when necessary",
            );
            return Err(PickerError::MinStopsViolation { len: g.len() });
        }
        let index = match index {
            Some(i) => i,
            None => {
                self.diagnostics.report(
                    DiagnosticKind::DefaultApplied,
                    "no stop index given for deletion, defaulted to the selected stop",
                );
                g.selected_index()
            }
        };
        let next = stops::delete_stop(&g, index)?;
        Ok(self.commit_gradient(next))
    }

    /// Move the selected stop to `position`, clamped to `0..=100`.
    pub fn set_point_left(&mut self, position: i64) -> Result<String, PickerError> {
        let Some(g) = self.gradient_for("set_point_left")? else {
            return Ok(self.value.clone());
        };
        let next = stops::move_stop(&g, g.selected_index(), position)?;
        Ok(self.commit_gradient(next))
    }

    // ========== accessors ==========

    pub fn value_to_hsl(&self) -> Result<String, PickerError> {
        Ok(convert::hsl_string(self.rgba_arr()?))
    }

    pub fn value_to_hsv(&self) -> Result<String, PickerError> {
        Ok(convert::hsv_string(self.rgba_arr()?))
    }

    pub fn value_to_hex(&self) -> Result<String, PickerError> {
        Ok(convert::to_hex(self.rgba_arr()?))
    }

    pub fn value_to_cmyk(&self) -> Result<String, PickerError> {
        Ok(convert::cmyk_string(self.rgba_arr()?))
    }

    /// RGBA of the active color
    pub fn rgba_arr(&self) -> Result<Rgba, PickerError> {
        Ok(self.current()?.active_color().rgba)
    }

    /// HSL of the active color
    pub fn hsl_arr(&self) -> Result<Hsl, PickerError> {
        Ok(convert::rgb_to_hsl(self.rgba_arr()?))
    }

    pub fn is_gradient(&self) -> Result<bool, PickerError> {
        Ok(self.current()?.is_gradient())
    }

    /// Index of the selected stop; `None` for a solid
    pub fn selected_point(&self) -> Result<Option<usize>, PickerError> {
        Ok(self.current()?.as_gradient().map(Gradient::selected_index))
    }

    /// `linear-gradient` or `radial-gradient`; `None` for a solid
    pub fn gradient_type(&self) -> Result<Option<&'static str>, PickerError> {
        Ok(self.current()?.as_gradient().map(|g| g.kind().function_name()))
    }

    /// Linear angle; `None` for solids, radial gradients and unspecified angles
    pub fn degrees(&self) -> Result<Option<u16>, PickerError> {
        Ok(self.current()?.as_gradient().and_then(|g| g.kind().angle()))
    }

    /// Position of the selected stop; `None` for a solid
    pub fn current_left(&self) -> Result<Option<u8>, PickerError> {
        Ok(self.current()?.as_gradient().map(|g| g.selected_stop().position))
    }

    /// Recently committed colors, most recent first
    pub fn previous_colors(&self) -> Vec<String> {
        self.recent.history()
    }

    /// Structured view of the current value
    pub fn gradient_object(&self) -> Result<ColorValue, PickerError> {
        self.current()
    }
}
