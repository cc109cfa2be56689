/*
 * Geometry and timing constants the control layer consumes. A single `Metrics`
 * value lives in the `UiContext`; containers may override the scroll step and
 * the bottom padding per instance.
 */

/// Notches reported by one detent of a standard mouse wheel.
pub const WHEEL_DELTA: i32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub border_width: i32,
    pub caption_height: i32,
    pub scrollbar_width: i32,
    pub min_thumb_height: i32,
    /// Pixels scrolled per wheel detent and per line step.
    pub scroll_step: i32,
    /// Blank space kept below the lowest child of a container.
    pub bottom_padding: i32,
    pub frame_interval_ms: u32,
    pub max_frame_ticks: u32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            border_width: 1,
            caption_height: 32,
            scrollbar_width: 12,
            min_thumb_height: 24,
            scroll_step: 50,
            bottom_padding: 10,
            frame_interval_ms: 16,
            max_frame_ticks: 60,
        }
    }
}
