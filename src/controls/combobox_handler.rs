/*
 * Drop-down lists. The native combobox keeps the list, keyboard handling and
 * pointer capture; the closed field is owner-drawn with the current text and
 * a drop arrow, and its background fades on hover.
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
pub struct ComboboxConfig {
    pub font: Option<FontDescription>,
}

pub(crate) struct ComboboxBehavior {
    animation: AnimationState,
    visuals: ControlVisuals,
}

impl ComboboxBehavior {
    pub fn new(ui: &UiContext, config: ComboboxConfig) -> Result<Self> {
        Ok(Self {
            animation: AnimationState::new(ui.metrics().max_frame_ticks),
            visuals: ControlVisuals::new(ui, FontRole::Default, config.font.as_ref())?,
        })
    }

    fn layer(&self, state: VisualState) -> FrameLayer {
        let (background, border) = match state {
            VisualState::Idle => (ColorRole::ComboBackground, ColorRole::BorderStandard),
            VisualState::Hovering | VisualState::Pressed => {
                (ColorRole::ComboHover, ColorRole::BorderHover)
            }
        };
        FrameLayer {
            background: self.visuals.brush(background),
            border: self.visuals.brush(border),
            accent: None,
            text_color: self.visuals.color(ColorRole::ComboText),
            image: None,
        }
    }
}

impl ControlBehavior for ComboboxBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::DropDownCombobox
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
        drive_hover(cx, &mut self.animation, message)?;
        Ok(Outcome::forward())
    }

    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        let plan = self.animation.plan_frame(self.kind().transition_duration_ms());
        let request = FrameRequest {
            kind: self.kind(),
            surface: PaintSurface::Client,
            plan,
            from: self.layer(plan.from),
            to: self.layer(plan.to),
            font: self.visuals.font(),
            glyph: Glyph::DropArrow,
            border_width: cx.ui.metrics().border_width,
            selected_layer: None,
        };
        cx.api().paint_frame(cx.handle, &request)?;
        self.animation.commit_frame();
        Ok(())
    }
}

pub fn create_combobox(ctx: &UiContext, config: &WindowConfig, combobox: ComboboxConfig) -> Result<Window> {
    log::debug!("ComboboxHandler: create_combobox ID {}", config.id.raw());
    create_control(ctx, config, SubclassConfig::DropDownCombobox(combobox))
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
    fn clicks_reach_the_native_list_while_hover_animates() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(300, 100);
        let combo = create_combobox(
            &ctx,
            &WindowConfig::new(top, ControlId::new(8), Rect::new(0, 0, 150, 24)),
            ComboboxConfig::default(),
        )
        .unwrap();
        let h = combo.handle();

        ctx.dispatch(h, NativeMessage::PointerMove(Point::new(5, 5)));
        let down = ctx.dispatch(h, NativeMessage::PrimaryDown(Point::new(5, 5)));
        let paint = ctx.dispatch(h, NativeMessage::Paint);

        assert_eq!(down, Disposition::Forward);
        assert_eq!(paint, Disposition::Consumed);
        assert_eq!(headless.captured(), None);
        let frame = headless.frames_for(h).pop().unwrap();
        assert_eq!(frame.glyph, Glyph::DropArrow);
        assert_eq!(frame.plan.to, VisualState::Hovering);
        assert_eq!(frame.plan.duration_ms, 200);
    }
}
