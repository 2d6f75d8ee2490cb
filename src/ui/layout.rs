//! Estimated window geometry, used to hit-test pointer presses against the
//! autocomplete without querying the widget tree.

use iced::{Point, Rectangle, Size};

use crate::autocomplete::Dropdown;

/// Outer padding of the window content
pub const PADDING: f32 = 12.0;
/// Spacing between heading, picker and summary
pub const SPACING: f32 = 12.0;
/// Heading text line (size 20 plus leading)
pub const HEADING_HEIGHT: f32 = 28.0;
/// Search input (padding 10*2 + text)
pub const INPUT_HEIGHT: f32 = 40.0;
/// Gap between the input and the dropdown
pub const DROPDOWN_GAP: f32 = 4.0;
/// Suggestion row (padding + thumbnail)
pub const ROW_HEIGHT_ESTIMATE: f32 = 62.0;
pub const NO_RESULTS_HEIGHT: f32 = 40.0;
/// Dropdown scrolls past this height
pub const MAX_DROPDOWN_HEIGHT: f32 = 240.0;

pub const THUMB_WIDTH: f32 = 36.0;
pub const THUMB_HEIGHT: f32 = 50.0;

/// Height of the scrollable suggestion area for `rows` entries
pub fn dropdown_height(rows: usize) -> f32 {
    (rows as f32 * ROW_HEIGHT_ESTIMATE).min(MAX_DROPDOWN_HEIGHT)
}

/// Bounds of the input plus whatever the dropdown currently shows
pub fn picker_bounds(window: Size, dropdown: &Dropdown<'_>) -> Rectangle {
    let dropdown_extent = match dropdown {
        Dropdown::Hidden => 0.0,
        Dropdown::NoResults => DROPDOWN_GAP + NO_RESULTS_HEIGHT,
        Dropdown::Suggestions { candidates, .. } => {
            DROPDOWN_GAP + dropdown_height(candidates.len())
        }
    };

    Rectangle::new(
        Point::new(PADDING, PADDING + HEADING_HEIGHT + SPACING),
        Size::new(
            (window.width - 2.0 * PADDING).max(0.0),
            INPUT_HEIGHT + dropdown_extent,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Candidate, ColorIdentity};

    fn window() -> Size {
        Size::new(520.0, 480.0)
    }

    #[test]
    fn hidden_dropdown_covers_input_only() {
        let bounds = picker_bounds(window(), &Dropdown::Hidden);
        let input_y = PADDING + HEADING_HEIGHT + SPACING + INPUT_HEIGHT / 2.0;

        assert!(bounds.contains(Point::new(100.0, input_y)));
        assert!(!bounds.contains(Point::new(100.0, input_y + INPUT_HEIGHT)));
        assert!(!bounds.contains(Point::new(2.0, input_y)));
    }

    #[test]
    fn open_dropdown_extends_bounds() {
        let candidates: Vec<Candidate> = (0..3)
            .map(|i| Candidate {
                id: i.to_string(),
                name: format!("Legend {i}"),
                color_identity: ColorIdentity::default(),
                images: None,
            })
            .collect();
        let dropdown = Dropdown::Suggestions {
            candidates: &candidates,
            selected: None,
        };
        let bounds = picker_bounds(window(), &dropdown);
        let below_input = PADDING + HEADING_HEIGHT + SPACING + INPUT_HEIGHT + 100.0;

        assert!(bounds.contains(Point::new(100.0, below_input)));
    }

    #[test]
    fn dropdown_height_is_capped() {
        assert_eq!(dropdown_height(2), 2.0 * ROW_HEIGHT_ESTIMATE);
        assert_eq!(dropdown_height(10), MAX_DROPDOWN_HEIGHT);
    }
}
