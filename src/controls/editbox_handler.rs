/*
 * Edit fields keep their native content painting and input handling. The
 * subclass only animates the one-pixel frame: it brightens on hover and
 * takes the active color while the field has keyboard focus. The frame is
 * drawn after the native paint so it covers the system edge.
 */
use crate::animation::{AnimationState, VisualState};
use crate::context::UiContext;
use crate::controls::{SubclassConfig, create_control, drive_hover};
use crate::dispatch::Outcome;
use crate::error::Result;
use crate::native::{FrameLayer, FrameRequest, Glyph, NativeMessage, PaintSurface};
use crate::styling_primitives::{ColorRole, FontDescription, FontRole};
use crate::subclass::{ControlBehavior, ControlContext, ControlVisuals};
use crate::types::{ControlKind, WindowConfig};
use crate::window::Window;

#[derive(Debug, Clone, Default)]
pub struct EditboxConfig {
    pub font: Option<FontDescription>,
}

pub(crate) struct EditboxBehavior {
    focused: bool,
    animation: AnimationState,
    visuals: ControlVisuals,
}

impl EditboxBehavior {
    pub fn new(ui: &UiContext, config: EditboxConfig) -> Result<Self> {
        Ok(Self {
            focused: false,
            animation: AnimationState::new(ui.metrics().max_frame_ticks),
            visuals: ControlVisuals::new(ui, FontRole::Default, config.font.as_ref())?,
        })
    }

    fn layer(&self, state: VisualState) -> FrameLayer {
        let border = match (self.focused, state) {
            (true, _) => ColorRole::BorderActive,
            (false, VisualState::Idle) => ColorRole::BorderStandard,
            (false, _) => ColorRole::BorderHover,
        };
        // The background only fills what the border leaves of the native edge.
        FrameLayer {
            background: self.visuals.brush(ColorRole::WindowBackground),
            border: self.visuals.brush(border),
            accent: None,
            text_color: self.visuals.color(ColorRole::ButtonText),
            image: None,
        }
    }
}

impl ControlBehavior for EditboxBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::Editbox
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
            NativeMessage::FocusChanged(focused) => {
                self.focused = *focused;
                cx.api().invalidate(cx.handle);
            }
            _ => drive_hover(cx, &mut self.animation, message)?,
        }
        Ok(Outcome::forward())
    }

    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        let plan = self.animation.plan_frame(self.kind().transition_duration_ms());
        let request = FrameRequest {
            kind: self.kind(),
            surface: PaintSurface::Border,
            plan,
            from: self.layer(plan.from),
            to: self.layer(plan.to),
            font: self.visuals.font(),
            glyph: Glyph::None,
            border_width: cx.ui.metrics().border_width,
            selected_layer: None,
        };
        cx.api().paint_frame(cx.handle, &request)?;
        self.animation.commit_frame();
        Ok(())
    }
}

pub fn create_editbox(ctx: &UiContext, config: &WindowConfig, editbox: EditboxConfig) -> Result<Window> {
    log::debug!("EditboxHandler: create_editbox ID {}", config.id.raw());
    create_control(ctx, config, SubclassConfig::Editbox(editbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessApi;
    use crate::metrics::Metrics;
    use crate::native::Disposition;
    use crate::styling_primitives::Theme;
    use crate::types::{ControlId, Point, Rect};

    #[test]
    fn input_is_forwarded_and_border_painted_after_native_paint() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(300, 100);
        let edit = create_editbox(
            &ctx,
            &WindowConfig::new(top, ControlId::new(4), Rect::new(10, 10, 200, 22)),
            EditboxConfig::default(),
        )
        .unwrap();
        let h = edit.handle();

        assert_eq!(
            ctx.dispatch(h, NativeMessage::PrimaryDown(Point::new(4, 4))),
            Disposition::Forward
        );
        assert_eq!(
            ctx.dispatch(h, NativeMessage::PointerMove(Point::new(4, 4))),
            Disposition::Forward
        );
        assert_eq!(
            ctx.dispatch(h, NativeMessage::Paint),
            Disposition::ForwardThenOverlay
        );
        assert!(headless.frames_for(h).is_empty());

        ctx.dispatch(h, NativeMessage::PaintOverlay);

        let frames = headless.frames_for(h);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].surface, PaintSurface::Border);
        assert_eq!(frames[0].plan.duration_ms, 250);
        assert!(headless.notifications().is_empty());
    }

    #[test]
    fn focus_switches_the_border_to_active() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(300, 100);
        let edit = create_editbox(
            &ctx,
            &WindowConfig::new(top, ControlId::new(4), Rect::new(10, 10, 200, 22)),
            EditboxConfig::default(),
        )
        .unwrap();
        let h = edit.handle();

        ctx.dispatch(h, NativeMessage::FocusChanged(true));
        ctx.dispatch(h, NativeMessage::PaintOverlay);

        let frame = headless.frames_for(h).pop().unwrap();
        assert_eq!(frame.to.border, ctx.theme().brush(ColorRole::BorderActive));
    }

    #[test]
    fn border_width_follows_the_metrics() {
        let metrics = Metrics {
            border_width: 2,
            ..Metrics::default()
        };
        let (ctx, headless) = HeadlessApi::context(Theme::light(), metrics).unwrap();
        let top = headless.create_top_level(300, 100);
        let edit = create_editbox(
            &ctx,
            &WindowConfig::new(top, ControlId::new(4), Rect::new(10, 10, 200, 22)),
            EditboxConfig::default(),
        )
        .unwrap();

        ctx.dispatch(edit.handle(), NativeMessage::PaintOverlay);

        let frame = headless.frames_for(edit.handle()).pop().unwrap();
        assert_eq!(frame.border_width, 2);
        assert_eq!(frame.to.background, ctx.theme().brush(ColorRole::WindowBackground));
    }
}
