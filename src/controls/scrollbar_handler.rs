/*
 * Owner-drawn vertical scrollbar. It shares the scroll state of the container
 * it serves and never scrolls anything itself: thumb drags, track clicks and
 * wheel input are turned into follow-up messages addressed to the
 * container's client window, which run once this handler has returned.
 */
use std::cell::Cell;
use std::rc::Rc;

use crate::animation::{AnimationState, VisualState};
use crate::context::UiContext;
use crate::controls::{SubclassConfig, create_control};
use crate::dispatch::Outcome;
use crate::error::Result;
use crate::native::{FrameLayer, FrameRequest, Glyph, NativeMessage, PaintSurface};
use crate::scroll::{
    ScrollAction, ScrollState, ThumbGeometry, position_for_thumb_top, thumb_geometry,
};
use crate::styling_primitives::{ColorRole, FontRole};
use crate::subclass::{ControlBehavior, ControlContext, ControlVisuals};
use crate::types::{ClickPolicy, ControlKind, NativeHandle, Rect, WindowConfig};
use crate::window::Window;

#[derive(Debug, Clone)]
pub struct ScrollbarConfig {
    pub state: Rc<Cell<ScrollState>>,
    /// Window that receives the resulting scroll requests.
    pub target: NativeHandle,
}

pub(crate) struct ScrollbarBehavior {
    state: Rc<Cell<ScrollState>>,
    target: NativeHandle,
    // Offset of the pointer from the thumb top while dragging.
    drag_anchor: Option<i32>,
    animation: AnimationState,
    visuals: ControlVisuals,
}

impl ScrollbarBehavior {
    pub fn new(ui: &UiContext, config: ScrollbarConfig) -> Result<Self> {
        Ok(Self {
            state: config.state,
            target: config.target,
            drag_anchor: None,
            animation: AnimationState::new(ui.metrics().max_frame_ticks),
            visuals: ControlVisuals::new(ui, FontRole::Default, None)?,
        })
    }

    fn track(&self, cx: &ControlContext<'_>) -> Result<(i32, i32)> {
        cx.api().client_size(cx.handle)
    }

    fn thumb(&self, cx: &ControlContext<'_>) -> Result<Option<ThumbGeometry>> {
        let (_, height) = self.track(cx)?;
        Ok(thumb_geometry(
            height,
            &self.state.get(),
            cx.ui.metrics().min_thumb_height,
        ))
    }

    fn layer(&self, state: VisualState) -> FrameLayer {
        let thumb = match state {
            VisualState::Idle => ColorRole::ScrollThumb,
            VisualState::Hovering => ColorRole::ScrollThumbHover,
            VisualState::Pressed => ColorRole::ScrollThumbPressed,
        };
        FrameLayer {
            background: self.visuals.brush(ColorRole::ScrollTrack),
            border: None,
            accent: self.visuals.brush(thumb),
            text_color: self.visuals.color(ColorRole::ButtonText),
            image: None,
        }
    }

    fn scroll_to(&self, position: i32) -> Outcome {
        if position == self.state.get().position {
            return Outcome::consumed();
        }
        Outcome::consumed().then(
            self.target,
            NativeMessage::VerticalScroll(ScrollAction::ThumbTrack(position)),
        )
    }
}

impl ControlBehavior for ScrollbarBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::VerticalScrollbar
    }

    fn animation(&self) -> Option<&AnimationState> {
        Some(&self.animation)
    }

    fn animation_mut(&mut self) -> Option<&mut AnimationState> {
        Some(&mut self.animation)
    }

    fn visuals_mut(&mut self) -> &mut ControlVisuals {
        &mut self.visuals
    }

    fn handle_input(&mut self, cx: &ControlContext<'_>, message: &NativeMessage) -> Result<Outcome> {
        match message {
            NativeMessage::PointerMove(p) => {
                let effects = self.animation.pointer_move();
                cx.apply_effects(&effects)?;
                let Some(anchor) = self.drag_anchor else {
                    return Ok(Outcome::consumed());
                };
                let (_, track) = self.track(cx)?;
                let Some(thumb) = self.thumb(cx)? else {
                    return Ok(Outcome::consumed());
                };
                let position =
                    position_for_thumb_top(track, thumb.height, &self.state.get(), p.y - anchor);
                Ok(self.scroll_to(position))
            }
            NativeMessage::PointerLeave => {
                let effects = self.animation.pointer_leave();
                cx.apply_effects(&effects)?;
                Ok(Outcome::consumed())
            }
            NativeMessage::PrimaryDown(p) => {
                let Some(thumb) = self.thumb(cx)? else {
                    return Ok(Outcome::consumed());
                };
                if thumb.contains(p.y) {
                    log::trace!("ScrollbarHandler: drag start at {}", p.y);
                    self.drag_anchor = Some(p.y - thumb.top);
                    let effects = self.animation.primary_down(ClickPolicy::Never);
                    cx.apply_effects(&effects)?;
                    return Ok(Outcome::consumed());
                }
                let action = if p.y < thumb.top {
                    ScrollAction::PageUp
                } else {
                    ScrollAction::PageDown
                };
                Ok(Outcome::consumed().then(self.target, NativeMessage::VerticalScroll(action)))
            }
            NativeMessage::PrimaryUp(p) => {
                self.drag_anchor = None;
                let effects = self.animation.primary_up(ClickPolicy::Never, cx.is_inside(*p));
                cx.apply_effects(&effects)?;
                Ok(Outcome::consumed())
            }
            NativeMessage::CaptureLost => {
                self.drag_anchor = None;
                let effects = self.animation.capture_lost();
                cx.apply_effects(&effects)?;
                Ok(Outcome::consumed())
            }
            NativeMessage::Wheel { delta } => {
                Ok(Outcome::consumed().then(self.target, NativeMessage::Wheel { delta: *delta }))
            }
            NativeMessage::VerticalScroll(action) => {
                Ok(Outcome::consumed().then(self.target, NativeMessage::VerticalScroll(*action)))
            }
            _ => Ok(Outcome::forward()),
        }
    }

    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        let (width, _) = self.track(cx)?;
        let glyph = match self.thumb(cx)? {
            Some(thumb) => Glyph::Thumb(Rect::new(0, thumb.top, width, thumb.height)),
            None => Glyph::None,
        };
        let plan = self.animation.plan_frame(self.kind().transition_duration_ms());
        let request = FrameRequest {
            kind: self.kind(),
            surface: PaintSurface::Client,
            plan,
            from: self.layer(plan.from),
            to: self.layer(plan.to),
            font: None,
            glyph,
            border_width: cx.ui.metrics().border_width,
            selected_layer: None,
        };
        cx.api().paint_frame(cx.handle, &request)?;
        self.animation.commit_frame();
        Ok(())
    }
}

pub fn create_scrollbar(
    ctx: &UiContext,
    config: &WindowConfig,
    scrollbar: ScrollbarConfig,
) -> Result<Window> {
    log::debug!(
        "ScrollbarHandler: create_scrollbar ID {} for {:?}",
        config.id.raw(),
        scrollbar.target
    );
    create_control(ctx, config, SubclassConfig::VerticalScrollbar(scrollbar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessApi;
    use crate::metrics::Metrics;
    use crate::styling_primitives::Theme;
    use crate::types::{ControlId, Point};

    fn scrollbar_over(
        ctx: &UiContext,
        parent: NativeHandle,
        state: ScrollState,
    ) -> (Window, Rc<Cell<ScrollState>>) {
        let shared = Rc::new(Cell::new(state));
        let window = create_scrollbar(
            ctx,
            &WindowConfig::new(parent, ControlId::new(99), Rect::new(188, 0, 12, 200)),
            ScrollbarConfig {
                state: Rc::clone(&shared),
                target: NativeHandle(0xDEAD),
            },
        )
        .unwrap();
        (window, shared)
    }

    #[test]
    fn paint_places_the_thumb_from_shared_state() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(200, 200);
        let (bar, shared) = scrollbar_over(&ctx, top, ScrollState::new(400, 200));

        ctx.dispatch(bar.handle(), NativeMessage::Paint);
        shared.set(ScrollState {
            position: 200,
            ..shared.get()
        });
        ctx.dispatch(bar.handle(), NativeMessage::Paint);

        let frames = headless.frames_for(bar.handle());
        assert_eq!(frames[0].glyph, Glyph::Thumb(Rect::new(0, 0, 12, 100)));
        assert_eq!(frames[1].glyph, Glyph::Thumb(Rect::new(0, 100, 12, 100)));
    }

    #[test]
    fn fitting_content_paints_no_thumb() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(200, 200);
        let (bar, _) = scrollbar_over(&ctx, top, ScrollState::new(100, 200));

        ctx.dispatch(bar.handle(), NativeMessage::Paint);

        assert_eq!(headless.frames_for(bar.handle())[0].glyph, Glyph::None);
    }

    #[test]
    fn thumb_drag_captures_and_releases() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(200, 200);
        let (bar, _) = scrollbar_over(&ctx, top, ScrollState::new(400, 200));
        let h = bar.handle();

        ctx.dispatch(h, NativeMessage::PrimaryDown(Point::new(5, 10)));
        assert_eq!(headless.captured(), Some(h));

        ctx.dispatch(h, NativeMessage::PrimaryUp(Point::new(5, 60)));
        assert_eq!(headless.captured(), None);
        assert!(headless.notifications().is_empty());
    }
}
