//! Structural edits to a gradient's stop list
//!
//! Every edit takes the current gradient by reference and returns a new one,
//! so a failed edit leaves the caller's value untouched. All results keep
//! exactly one stop selected.

use crate::color::ColorToken;
use crate::math::clamp_position;
use crate::value::{Gradient, Stop, TooFewStops, MIN_STOPS};
use thiserror::Error;

/// Error type for stop edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopError {
    /// Stop index does not exist
    #[error("stop index {index} is out of range for {len} stops")]
    OutOfRange { index: usize, len: usize },
    /// Deleting would leave fewer than two stops
    #[error("a gradient must have at least two stops ({len} present)")]
    MinStopsViolation { len: usize },
}

fn check_index(gradient: &Gradient, index: usize) -> Result<(), StopError> {
    if index >= gradient.len() {
        return Err(StopError::OutOfRange { index, len: gradient.len() });
    }
    Ok(())
}

fn rebuild(gradient: &Gradient, stops: Vec<Stop>) -> Result<Gradient, StopError> {
    Gradient::new(gradient.kind(), stops).map_err(|TooFewStops(len)| StopError::MinStopsViolation { len })
}

/// Mark the stop at `index` selected and every other stop deselected.
pub fn select(gradient: &Gradient, index: usize) -> Result<Gradient, StopError> {
    check_index(gradient, index)?;
    let stops =
        gradient.stops().iter().enumerate().map(|(i, s)| s.selected(i == index)).collect();
    rebuild(gradient, stops)
}

/// Append a stop at `position` (clamped to `0..=100`) and select it.
pub fn add_stop(gradient: &Gradient, position: i64, color: ColorToken) -> Result<Gradient, StopError> {
    let mut stops: Vec<Stop> = gradient.stops().iter().map(|s| s.selected(false)).collect();
    stops.push(Stop::new(color, clamp_position(position)).selected(true));
    rebuild(gradient, stops)
}

/// Remove the stop at `index`.
///
/// If the removed stop was selected, the first remaining stop becomes
/// selected.
pub fn delete_stop(gradient: &Gradient, index: usize) -> Result<Gradient, StopError> {
    if gradient.len() <= MIN_STOPS {
        return Err(StopError::MinStopsViolation { len: gradient.len() });
    }
    check_index(gradient, index)?;
    let stops = gradient
        .stops()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| *s)
        .collect();
    rebuild(gradient, stops)
}

/// Move the stop at `index` to `position`, clamped to `0..=100`.
pub fn move_stop(gradient: &Gradient, index: usize, position: i64) -> Result<Gradient, StopError> {
    check_index(gradient, index)?;
    let position = clamp_position(position);
    let stops = gradient
        .stops()
        .iter()
        .enumerate()
        .map(|(i, s)| if i == index { Stop { position, ..*s } } else { *s })
        .collect();
    rebuild(gradient, stops)
}

/// Replace the selected stop's color, keeping its position and flag.
pub fn recolor_selected(gradient: &Gradient, color: ColorToken) -> Result<Gradient, StopError> {
    let stops =
        gradient.stops().iter().map(|s| if s.selected { Stop { color, ..*s } } else { *s }).collect();
    rebuild(gradient, stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgba, TokenSyntax};
    use crate::parser::parse_value;
    use crate::serialize::serialize_gradient;

    fn gradient(text: &str) -> Gradient {
        parse_value(text).unwrap().as_gradient().unwrap().clone()
    }

    fn two_stops() -> Gradient {
        gradient("linear-gradient(90deg, #FF0000 0%, #00ff00 100%)")
    }

    fn three_stops() -> Gradient {
        gradient("linear-gradient(90deg, #ff0000 0%, #0000FF 50%, #00ff00 100%)")
    }

    fn selected_count(g: &Gradient) -> usize {
        g.stops().iter().filter(|s| s.selected).count()
    }

    // ========== rebuild ==========

    #[test]
    fn test_rebuild_reports_short_stop_list() {
        let g = two_stops();
        let one = vec![g.stops()[0]];
        assert_eq!(rebuild(&g, one), Err(StopError::MinStopsViolation { len: 1 }));
    }

    // ========== select ==========

    #[test]
    fn test_select() {
        let g = select(&two_stops(), 1).unwrap();
        assert_eq!(g.selected_index(), 1);
        assert_eq!(selected_count(&g), 1);
        assert_eq!(serialize_gradient(&g), "linear-gradient(90deg, #ff0000 0%, #00FF00 100%)");
    }

    #[test]
    fn test_select_out_of_range() {
        assert_eq!(select(&two_stops(), 2), Err(StopError::OutOfRange { index: 2, len: 2 }));
    }

    // ========== add_stop ==========

    #[test]
    fn test_add_stop_selects_new_stop() {
        let red = two_stops().selected_stop().color;
        let g = add_stop(&two_stops(), 50, red).unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.selected_index(), 2);
        assert_eq!(selected_count(&g), 1);
        assert_eq!(
            serialize_gradient(&g),
            "linear-gradient(90deg, #ff0000 0%, #FF0000 50%, #00ff00 100%)"
        );
    }

    #[test]
    fn test_add_stop_clamps_position() {
        let color = ColorToken::new(TokenSyntax::Hex, Rgba::opaque(0, 0, 255));
        let g = add_stop(&two_stops(), 250, color).unwrap();
        assert_eq!(g.selected_stop().position, 100);
    }

    // ========== delete_stop ==========

    #[test]
    fn test_delete_refuses_two_stops() {
        assert_eq!(delete_stop(&two_stops(), 0), Err(StopError::MinStopsViolation { len: 2 }));
    }

    #[test]
    fn test_delete_selected_moves_selection_to_first() {
        let g = delete_stop(&three_stops(), 1).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.selected_index(), 0);
        assert_eq!(serialize_gradient(&g), "linear-gradient(90deg, #FF0000 0%, #00ff00 100%)");
    }

    #[test]
    fn test_delete_unselected_keeps_selection() {
        let g = delete_stop(&three_stops(), 2).unwrap();
        assert_eq!(g.selected_stop().color.rgba, Rgba::opaque(0, 0, 255));
    }

    #[test]
    fn test_delete_out_of_range() {
        assert_eq!(delete_stop(&three_stops(), 3), Err(StopError::OutOfRange { index: 3, len: 3 }));
    }

    // ========== move_stop ==========

    #[test]
    fn test_move_stop_clamps() {
        assert_eq!(move_stop(&two_stops(), 0, 150).unwrap().stops()[0].position, 100);
        assert_eq!(move_stop(&two_stops(), 1, -10).unwrap().stops()[1].position, 0);
    }

    #[test]
    fn test_move_stop_reorders_on_output() {
        let g = move_stop(&two_stops(), 0, 100).unwrap();
        let g = move_stop(&g, 1, 20).unwrap();
        assert_eq!(serialize_gradient(&g), "linear-gradient(90deg, #00ff00 20%, #FF0000 100%)");
    }

    #[test]
    fn test_move_stop_leaves_others() {
        let g = move_stop(&three_stops(), 1, 70).unwrap();
        assert_eq!(g.stops()[0].position, 0);
        assert_eq!(g.stops()[2].position, 100);
        assert!(g.stops()[1].selected);
    }

    #[test]
    fn test_move_stop_out_of_range() {
        assert!(move_stop(&two_stops(), 5, 10).is_err());
    }

    // ========== recolor_selected ==========

    #[test]
    fn test_recolor_selected() {
        let slate = ColorToken::from_rgba(Rgba::opaque(10, 20, 30));
        let g = recolor_selected(&three_stops(), slate).unwrap();
        assert_eq!(g.stops()[1].color, slate);
        assert_eq!(g.stops()[1].position, 50);
        assert!(g.stops()[1].selected);
        assert_eq!(g.stops()[0].color.rgba, Rgba::opaque(255, 0, 0));
    }
}
