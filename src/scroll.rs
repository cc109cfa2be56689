/*
 * Pure scroll-range arithmetic for containers and the owner-drawn scrollbar.
 *
 * All positions are in content coordinates: a child at visual top `y` while
 * the container is scrolled by `position` sits at content top `y + position`.
 */
use crate::metrics::WHEEL_DELTA;
use crate::types::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub min: i32,
    pub max: i32,
    pub page: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    /// Absolute content position requested by dragging the thumb.
    ThumbTrack(i32),
    Top,
    Bottom,
}

impl ScrollState {
    pub fn new(max: i32, page: i32) -> Self {
        Self {
            min: 0,
            max: max.max(0),
            page: page.max(0),
            position: 0,
        }
    }

    /* Content that already fits needs no scrollbar. */
    pub fn needs_scrollbar(&self) -> bool {
        self.page < self.max
    }

    pub fn max_position(&self) -> i32 {
        (self.max - self.page).max(self.min)
    }

    pub fn clamp_position(&self, position: i32) -> i32 {
        position.clamp(self.min, self.max_position())
    }

    /* New range, keeping the current position as far as the range allows. */
    pub fn with_range(self, max: i32, page: i32) -> Self {
        let mut next = ScrollState {
            max: max.max(self.min),
            page: page.max(0),
            ..self
        };
        next.position = next.clamp_position(self.position);
        next
    }

    /* Position the action asks for, already clamped. */
    pub fn position_for(&self, action: ScrollAction, step: i32) -> i32 {
        let wanted = match action {
            ScrollAction::LineUp => self.position - step,
            ScrollAction::LineDown => self.position + step,
            ScrollAction::PageUp => self.position - self.page.max(1),
            ScrollAction::PageDown => self.position + self.page.max(1),
            ScrollAction::ThumbTrack(pos) => pos,
            ScrollAction::Top => self.min,
            ScrollAction::Bottom => self.max_position(),
        };
        self.clamp_position(wanted)
    }
}

/*
 * Bottom edge of the content: the lowest child's bottom in content coordinates
 * plus padding. Without children the content is just the padding.
 */
pub fn content_extent<I>(child_rects: I, position: i32, bottom_padding: i32) -> i32
where
    I: IntoIterator<Item = Rect>,
{
    child_rects
        .into_iter()
        .map(|r| r.bottom() + position)
        .max()
        .unwrap_or(0)
        .max(0)
        + bottom_padding
}

/*
 * Change of scroll position for a wheel rotation. A positive delta (wheel
 * pushed away from the user) moves the view towards the top.
 */
pub fn wheel_scroll_amount(delta: i32, step: i32) -> i32 {
    let amount = -(i64::from(delta) * i64::from(step) / i64::from(WHEEL_DELTA));
    amount.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbGeometry {
    pub top: i32,
    pub height: i32,
}

impl ThumbGeometry {
    pub fn contains(&self, y: i32) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/*
 * Thumb placement inside a track of `track_length` pixels. `None` when the
 * content fits, in which case there is nothing to drag.
 */
pub fn thumb_geometry(track_length: i32, state: &ScrollState, min_thumb: i32) -> Option<ThumbGeometry> {
    if !state.needs_scrollbar() || track_length <= 0 || state.max <= 0 {
        return None;
    }
    let proportional = (i64::from(track_length) * i64::from(state.page) / i64::from(state.max)) as i32;
    let height = proportional.max(min_thumb).min(track_length);
    let travel = track_length - height;
    let range = state.max_position() - state.min;
    let top = if range <= 0 || travel <= 0 {
        0
    } else {
        (i64::from(travel) * i64::from(state.position - state.min) / i64::from(range)) as i32
    };
    Some(ThumbGeometry { top, height })
}

/* Inverse of `thumb_geometry`: content position for a dragged thumb top. */
pub fn position_for_thumb_top(
    track_length: i32,
    thumb_height: i32,
    state: &ScrollState,
    thumb_top: i32,
) -> i32 {
    let travel = track_length - thumb_height;
    if travel <= 0 {
        return state.min;
    }
    let range = i64::from(state.max_position() - state.min);
    let top = i64::from(thumb_top.clamp(0, travel));
    let position = state.min as i64 + (top * range + i64::from(travel) / 2) / i64::from(travel);
    state.clamp_position(position as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_forward_scrolls_towards_top() {
        assert_eq!(wheel_scroll_amount(120, 50), -50);
        assert_eq!(wheel_scroll_amount(-240, 50), 100);
        assert_eq!(wheel_scroll_amount(0, 50), 0);
    }

    #[test]
    fn extent_uses_content_coordinates() {
        // Two children seen while scrolled down by 40.
        let rects = [Rect::new(0, -40, 100, 30), Rect::new(0, 100, 100, 50)];
        assert_eq!(content_extent(rects, 40, 10), 200);
    }

    #[test]
    fn extent_without_children_is_the_padding() {
        assert_eq!(content_extent(std::iter::empty(), 0, 10), 10);
    }

    #[test]
    fn scrollbar_hidden_when_page_covers_content() {
        assert!(!ScrollState::new(100, 100).needs_scrollbar());
        assert!(!ScrollState::new(80, 100).needs_scrollbar());
        assert!(ScrollState::new(101, 100).needs_scrollbar());
    }

    #[test]
    fn shrinking_range_clamps_position() {
        let state = ScrollState {
            position: 150,
            ..ScrollState::new(260, 100)
        };
        let shrunk = state.with_range(160, 100);
        assert_eq!(shrunk.position, 60);
        let fits = shrunk.with_range(90, 100);
        assert_eq!(fits.position, 0);
    }

    #[test]
    fn actions_are_clamped() {
        let state = ScrollState {
            position: 30,
            ..ScrollState::new(300, 100)
        };
        assert_eq!(state.position_for(ScrollAction::LineUp, 50), 0);
        assert_eq!(state.position_for(ScrollAction::LineDown, 50), 80);
        assert_eq!(state.position_for(ScrollAction::PageDown, 50), 130);
        assert_eq!(state.position_for(ScrollAction::Bottom, 50), 200);
        assert_eq!(state.position_for(ScrollAction::ThumbTrack(999), 50), 200);
        assert_eq!(state.position_for(ScrollAction::Top, 50), 0);
    }

    #[test]
    fn thumb_tracks_position() {
        let mut state = ScrollState::new(400, 100);
        let at_top = thumb_geometry(200, &state, 10).unwrap();
        assert_eq!(at_top, ThumbGeometry { top: 0, height: 50 });

        state.position = state.max_position();
        let at_bottom = thumb_geometry(200, &state, 10).unwrap();
        assert_eq!(at_bottom.top, 150);

        assert_eq!(position_for_thumb_top(200, 50, &state, 150), 300);
        assert_eq!(position_for_thumb_top(200, 50, &state, 75), 150);
        assert_eq!(position_for_thumb_top(200, 50, &state, -20), 0);
    }

    #[test]
    fn no_thumb_when_content_fits() {
        assert!(thumb_geometry(200, &ScrollState::new(50, 100), 10).is_none());
    }
}
