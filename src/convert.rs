//! Color space conversions between RGB, HSL, HSV, Hex and CMYK
//!
//! All conversions are pure. Hue is in degrees `[0, 360]`, saturation,
//! lightness and value are percentages `[0, 100]`, CMYK components are unit
//! fractions. String output uses the same rounding as common web color
//! libraries: whole degrees and whole percents, alpha to two decimals.

use crate::color::{expect_args, split_function, ColorError, ColorToken, Rgba};
use crate::math::{format_number, round_to, to_channel};
use serde::Serialize;

/// Hue/saturation/lightness triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Build a validated triple. Components outside their range are an
    /// error, never clamped.
    pub fn new(h: f64, s: f64, l: f64) -> Result<Self, ColorError> {
        check_range("hue", h, 360)?;
        check_range("saturation", s, 100)?;
        check_range("lightness", l, 100)?;
        Ok(Self { h, s, l })
    }
}

/// Hue/saturation/value triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Result<Self, ColorError> {
        check_range("hue", h, 360)?;
        check_range("saturation", s, 100)?;
        check_range("value", v, 100)?;
        Ok(Self { h, s, v })
    }
}

/// Cyan/magenta/yellow/key quadruple, unit fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

/// A single HSL component to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HslChannel {
    Hue,
    Saturation,
    Lightness,
}

/// A single HSV component to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvChannel {
    Hue,
    Saturation,
    Value,
}

fn check_range(component: &'static str, value: f64, max: u32) -> Result<(), ColorError> {
    if !value.is_finite() || value < 0.0 || value > f64::from(max) {
        return Err(ColorError::OutOfRange { component, value: format_number(value), min: 0, max });
    }
    Ok(())
}

/// Percent inputs from a user must be whole numbers.
fn check_percent(component: &'static str, value: f64) -> Result<(), ColorError> {
    check_range(component, value, 100)?;
    if value.fract() != 0.0 {
        return Err(ColorError::InvalidNumber(format_number(value)));
    }
    Ok(())
}

/// Resolve any supported color text to RGBA.
///
/// Accepts color tokens and `hsl()`/`hsla()` text.
pub fn to_rgba(text: &str) -> Result<Rgba, ColorError> {
    match ColorToken::parse(text) {
        Ok(token) => Ok(token.rgba),
        Err(token_err) => match parse_hsl(text) {
            Ok((hsl, alpha)) => Ok(hsl_to_rgb(hsl, alpha)),
            Err(ColorError::UnknownFunction(_)) | Err(ColorError::MissingHash) => Err(token_err),
            Err(e) => Err(e),
        },
    }
}

/// Whether `text` is a color this crate accepts, with in-range components.
///
/// ```
/// use huepick::convert::is_valid;
///
/// assert!(is_valid("#00ff00"));
/// assert!(is_valid("hsl(120, 100%, 50%)"));
/// assert!(!is_valid("hsl(120, 100%, 150%)"));
/// assert!(!is_valid("not a color"));
/// ```
pub fn is_valid(text: &str) -> bool {
    to_rgba(text).is_ok()
}

/// Parse `hsl(h, s%, l%)` or `hsla(h, s%, l%, a)`.
pub fn parse_hsl(text: &str) -> Result<(Hsl, f64), ColorError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ColorError::Empty);
    }
    let (name, args) = split_function(text)?;
    let (h, s, l, a) = match name.as_str() {
        "hsl" => {
            let [h, s, l] = expect_args::<3>(&name, &args)?;
            (h, s, l, None)
        }
        "hsla" => {
            let [h, s, l, a] = expect_args::<4>(&name, &args)?;
            (h, s, l, Some(a))
        }
        _ => return Err(ColorError::UnknownFunction(name)),
    };

    let hsl = Hsl::new(
        parse_number(h.trim_end_matches("deg"))?,
        parse_number(s.trim_end_matches('%'))?,
        parse_number(l.trim_end_matches('%'))?,
    )?;
    let alpha = match a {
        Some(a) => {
            let alpha = parse_number(a)?;
            check_range("alpha", alpha, 1)?;
            alpha
        }
        None => 1.0,
    };
    Ok((hsl, alpha))
}

fn parse_number(s: &str) -> Result<f64, ColorError> {
    s.trim().parse().map_err(|_| ColorError::InvalidNumber(s.to_string()))
}

/// Normalized channels plus max/min, shared by the HSL and HSV derivations.
fn unit_channels(rgba: Rgba) -> (f64, f64, f64, f64, f64) {
    let r = f64::from(rgba.r) / 255.0;
    let g = f64::from(rgba.g) / 255.0;
    let b = f64::from(rgba.b) / 255.0;
    (r, g, b, r.max(g).max(b), r.min(g).min(b))
}

/// Hue as a unit fraction; 0 for achromatic colors.
fn unit_hue(r: f64, g: f64, b: f64, max: f64, min: f64) -> f64 {
    let d = max - min;
    if d == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h / 6.0
}

pub fn rgb_to_hsl(rgba: Rgba) -> Hsl {
    let (r, g, b, max, min) = unit_channels(rgba);
    let l = (max + min) / 2.0;
    let d = max - min;
    let s = if d == 0.0 {
        0.0
    } else if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    Hsl { h: unit_hue(r, g, b, max, min) * 360.0, s: s * 100.0, l: l * 100.0 }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

pub fn hsl_to_rgb(hsl: Hsl, alpha: f64) -> Rgba {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        let v = to_channel(l * 255.0);
        return Rgba::new(v, v, v, alpha);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgba::new(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0),
        to_channel(hue_to_rgb(p, q, h) * 255.0),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0),
        alpha,
    )
}

pub fn rgb_to_hsv(rgba: Rgba) -> Hsv {
    let (r, g, b, max, min) = unit_channels(rgba);
    let s = if max == 0.0 { 0.0 } else { (max - min) / max };
    Hsv { h: unit_hue(r, g, b, max, min) * 360.0, s: s * 100.0, v: max * 100.0 }
}

pub fn hsv_to_rgb(hsv: Hsv, alpha: f64) -> Rgba {
    let h = (hsv.h / 360.0) * 6.0;
    let s = hsv.s / 100.0;
    let v = hsv.v / 100.0;

    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgba::new(to_channel(r * 255.0), to_channel(g * 255.0), to_channel(b * 255.0), alpha)
}

/// `#rrggbb`; alpha is not carried.
pub fn to_hex(rgba: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

pub fn to_cmyk(rgba: Rgba) -> Cmyk {
    let r = f64::from(rgba.r) / 255.0;
    let g = f64::from(rgba.g) / 255.0;
    let b = f64::from(rgba.b) / 255.0;
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk { c: 0.0, m: 0.0, y: 0.0, k: 1.0 };
    }
    Cmyk { c: (1.0 - r - k) / (1.0 - k), m: (1.0 - g - k) / (1.0 - k), y: (1.0 - b - k) / (1.0 - k), k }
}

/// Replace one HSL component and re-derive RGB, holding the other two
/// components of the same space fixed.
///
/// Hue must lie in `[0, 360]`; saturation and lightness must be whole
/// percents in `[0, 100]`.
pub fn edit_hsl(rgba: Rgba, channel: HslChannel, value: f64) -> Result<Rgba, ColorError> {
    let current = rgb_to_hsl(rgba);
    let edited = match channel {
        HslChannel::Hue => {
            check_range("hue", value, 360)?;
            Hsl { h: value, ..current }
        }
        HslChannel::Saturation => {
            check_percent("saturation", value)?;
            Hsl { s: value, ..current }
        }
        HslChannel::Lightness => {
            check_percent("lightness", value)?;
            Hsl { l: value, ..current }
        }
    };
    Ok(hsl_to_rgb(edited, rgba.a))
}

/// HSV counterpart of [`edit_hsl`].
pub fn edit_hsv(rgba: Rgba, channel: HsvChannel, value: f64) -> Result<Rgba, ColorError> {
    let current = rgb_to_hsv(rgba);
    let edited = match channel {
        HsvChannel::Hue => {
            check_range("hue", value, 360)?;
            Hsv { h: value, ..current }
        }
        HsvChannel::Saturation => {
            check_percent("saturation", value)?;
            Hsv { s: value, ..current }
        }
        HsvChannel::Value => {
            check_percent("value", value)?;
            Hsv { v: value, ..current }
        }
    };
    Ok(hsv_to_rgb(edited, rgba.a))
}

fn format_alpha(a: f64) -> String {
    format_number(round_to(a, 2))
}

/// `hsl(h, s%, l%)`, or `hsla(...)` when translucent.
///
/// ```
/// use huepick::color::Rgba;
/// use huepick::convert::hsl_string;
///
/// assert_eq!(hsl_string(Rgba::opaque(255, 0, 0)), "hsl(0, 100%, 50%)");
/// ```
pub fn hsl_string(rgba: Rgba) -> String {
    let hsl = rgb_to_hsl(rgba);
    let (h, s, l) = (hsl.h.round(), hsl.s.round(), hsl.l.round());
    if rgba.a >= 1.0 {
        format!("hsl({}, {}%, {}%)", h, s, l)
    } else {
        format!("hsla({}, {}%, {}%, {})", h, s, l, format_alpha(rgba.a))
    }
}

/// `hsv(h, s%, v%)`, or `hsva(...)` when translucent.
pub fn hsv_string(rgba: Rgba) -> String {
    let hsv = rgb_to_hsv(rgba);
    let (h, s, v) = (hsv.h.round(), hsv.s.round(), hsv.v.round());
    if rgba.a >= 1.0 {
        format!("hsv({}, {}%, {}%)", h, s, v)
    } else {
        format!("hsva({}, {}%, {}%, {})", h, s, v, format_alpha(rgba.a))
    }
}

/// `cmyk(c, m, y, k)` with unit fractions rounded to two decimals.
pub fn cmyk_string(rgba: Rgba) -> String {
    let Cmyk { c, m, y, k } = to_cmyk(rgba);
    format!(
        "cmyk({}, {}, {}, {})",
        format_number(round_to(c, 2)),
        format_number(round_to(m, 2)),
        format_number(round_to(y, 2)),
        format_number(round_to(k, 2))
    )
}

/// `rgba(r, g, b, a)` text.
pub fn rgba_string(rgba: Rgba) -> String {
    ColorToken::from_rgba(rgba).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== HSL tests ==========

    #[test]
    fn test_rgb_to_hsl_primaries() {
        assert_eq!(rgb_to_hsl(Rgba::opaque(255, 0, 0)), Hsl { h: 0.0, s: 100.0, l: 50.0 });
        let green = rgb_to_hsl(Rgba::opaque(0, 255, 0));
        assert_eq!(green.h, 120.0);
        let blue = rgb_to_hsl(Rgba::opaque(0, 0, 255));
        assert_eq!(blue.h, 240.0);
    }

    #[test]
    fn test_rgb_to_hsl_achromatic() {
        let grey = rgb_to_hsl(Rgba::opaque(128, 128, 128));
        assert_eq!(grey.h, 0.0);
        assert_eq!(grey.s, 0.0);
        assert!((grey.l - 50.196).abs() < 0.01);
    }

    #[test]
    fn test_hsl_to_rgb() {
        let hsl = Hsl::new(120.0, 100.0, 50.0).unwrap();
        assert_eq!(hsl_to_rgb(hsl, 1.0), Rgba::opaque(0, 255, 0));
        let hsl = Hsl::new(0.0, 0.0, 100.0).unwrap();
        assert_eq!(hsl_to_rgb(hsl, 0.5), Rgba::new(255, 255, 255, 0.5));
    }

    #[test]
    fn test_hue_360_wraps_to_red() {
        let hsl = Hsl::new(360.0, 100.0, 50.0).unwrap();
        assert_eq!(hsl_to_rgb(hsl, 1.0), Rgba::opaque(255, 0, 0));
    }

    #[test]
    fn test_hsl_new_rejects_out_of_range() {
        assert!(Hsl::new(361.0, 50.0, 50.0).is_err());
        assert!(Hsl::new(0.0, 101.0, 50.0).is_err());
        assert!(Hsl::new(0.0, 50.0, -1.0).is_err());
        assert!(Hsl::new(f64::NAN, 50.0, 50.0).is_err());
    }

    // ========== HSV tests ==========

    #[test]
    fn test_rgb_to_hsv() {
        assert_eq!(rgb_to_hsv(Rgba::opaque(255, 0, 0)), Hsv { h: 0.0, s: 100.0, v: 100.0 });
        assert_eq!(rgb_to_hsv(Rgba::opaque(0, 0, 0)), Hsv { h: 0.0, s: 0.0, v: 0.0 });
    }

    #[test]
    fn test_hsv_to_rgb() {
        let hsv = Hsv::new(240.0, 100.0, 100.0).unwrap();
        assert_eq!(hsv_to_rgb(hsv, 1.0), Rgba::opaque(0, 0, 255));
        let hsv = Hsv::new(60.0, 100.0, 100.0).unwrap();
        assert_eq!(hsv_to_rgb(hsv, 1.0), Rgba::opaque(255, 255, 0));
    }

    // ========== Hex and CMYK tests ==========

    #[test]
    fn test_hex_round_trip() {
        for rgba in [Rgba::opaque(0, 0, 0), Rgba::opaque(18, 52, 86), Rgba::opaque(255, 254, 1)] {
            assert_eq!(to_rgba(&to_hex(rgba)).unwrap(), rgba);
        }
    }

    #[test]
    fn test_cmyk_red() {
        assert_eq!(to_cmyk(Rgba::opaque(255, 0, 0)), Cmyk { c: 0.0, m: 1.0, y: 1.0, k: 0.0 });
    }

    #[test]
    fn test_cmyk_black_avoids_division_by_zero() {
        assert_eq!(to_cmyk(Rgba::opaque(0, 0, 0)), Cmyk { c: 0.0, m: 0.0, y: 0.0, k: 1.0 });
    }

    #[test]
    fn test_cmyk_string() {
        assert_eq!(cmyk_string(Rgba::opaque(255, 0, 0)), "cmyk(0, 1, 1, 0)");
        assert_eq!(cmyk_string(Rgba::opaque(0, 0, 0)), "cmyk(0, 0, 0, 1)");
        assert_eq!(cmyk_string(Rgba::opaque(128, 64, 0)), "cmyk(0, 0.5, 1, 0.5)");
    }

    // ========== String format tests ==========

    #[test]
    fn test_hsl_string() {
        assert_eq!(hsl_string(Rgba::opaque(255, 0, 0)), "hsl(0, 100%, 50%)");
        assert_eq!(hsl_string(Rgba::new(255, 0, 0, 0.5)), "hsla(0, 100%, 50%, 0.5)");
    }

    #[test]
    fn test_hsv_string() {
        assert_eq!(hsv_string(Rgba::opaque(255, 0, 0)), "hsv(0, 100%, 100%)");
        assert_eq!(hsv_string(Rgba::new(0, 0, 0, 0.25)), "hsva(0, 0%, 0%, 0.25)");
    }

    // ========== Channel edit tests ==========

    #[test]
    fn test_edit_hue_keeps_saturation_and_lightness() {
        let red = Rgba::opaque(255, 0, 0);
        assert_eq!(edit_hsl(red, HslChannel::Hue, 120.0).unwrap(), Rgba::opaque(0, 255, 0));
    }

    #[test]
    fn test_edit_lightness() {
        let red = Rgba::opaque(255, 0, 0);
        assert_eq!(edit_hsl(red, HslChannel::Lightness, 100.0).unwrap(), Rgba::opaque(255, 255, 255));
        assert_eq!(edit_hsl(red, HslChannel::Lightness, 0.0).unwrap(), Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn test_edit_lightness_out_of_range_is_invalid() {
        let red = Rgba::opaque(255, 0, 0);
        assert!(matches!(
            edit_hsl(red, HslChannel::Lightness, 150.0),
            Err(ColorError::OutOfRange { component: "lightness", .. })
        ));
    }

    #[test]
    fn test_edit_lightness_fraction_is_invalid() {
        let red = Rgba::opaque(255, 0, 0);
        assert!(matches!(
            edit_hsl(red, HslChannel::Lightness, 0.5),
            Err(ColorError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_edit_preserves_alpha() {
        let red = Rgba::new(255, 0, 0, 0.3);
        assert_eq!(edit_hsl(red, HslChannel::Saturation, 0.0).unwrap().a, 0.3);
    }

    #[test]
    fn test_edit_hsv_value() {
        let red = Rgba::opaque(255, 0, 0);
        assert_eq!(edit_hsv(red, HsvChannel::Value, 50.0).unwrap(), Rgba::opaque(128, 0, 0));
        assert!(edit_hsv(red, HsvChannel::Value, 101.0).is_err());
    }

    // ========== Validity tests ==========

    #[test]
    fn test_parse_hsl_text() {
        let (hsl, alpha) = parse_hsl("hsla(200, 50%, 40%, 0.5)").unwrap();
        assert_eq!(hsl, Hsl { h: 200.0, s: 50.0, l: 40.0 });
        assert_eq!(alpha, 0.5);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("#abcdef"));
        assert!(is_valid("rgba(1, 2, 3, 0.4)"));
        assert!(is_valid("hsl(0, 0%, 0%)"));
        assert!(!is_valid("rgb(300, 0, 0)"));
        assert!(!is_valid("hsla(0, 0%, 0%, 2)"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_to_rgba_keeps_token_error() {
        assert_eq!(to_rgba("#12"), Err(ColorError::InvalidLength(2)));
        assert_eq!(to_rgba("blue"), Err(ColorError::MissingHash));
    }
}
