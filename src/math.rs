//! Numeric helpers and the letter-case flag used for stop selection

/// Clamp a user-supplied number into `[min, max]`.
///
/// NaN falls back to `min`, matching how an empty numeric input field behaves.
pub fn clamp_input(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round and clamp into a byte channel.
pub fn to_channel(value: f64) -> u8 {
    clamp_input(value.round(), 0.0, 255.0) as u8
}

/// Clamp an integer stop position into `0..=100`.
pub fn clamp_position(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Whether a color token's text marks its stop as selected.
///
/// True iff the text has at least one ASCII letter and none of them are
/// lower-case. Digits and punctuation carry no case.
///
/// ```
/// use huepick::math::is_upper_token;
///
/// assert!(is_upper_token("#FF0000"));
/// assert!(is_upper_token("RGBA(0, 0, 0, 1)"));
/// assert!(!is_upper_token("#ff0000"));
/// assert!(!is_upper_token("#000000"));
/// ```
pub fn is_upper_token(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_ascii_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_ascii_uppercase())
}

/// Render token text in the case that encodes `selected`.
pub fn apply_case(text: &str, upper: bool) -> String {
    if upper {
        text.to_ascii_uppercase()
    } else {
        text.to_ascii_lowercase()
    }
}

/// Format a float without a trailing `.0` (`1.0` -> `1`, `0.5` -> `0.5`).
pub fn format_number(value: f64) -> String {
    let rounded = round_to(value, 4);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
