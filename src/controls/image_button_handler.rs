/*
 * Buttons drawn entirely from caller-supplied images, one per visual state.
 * The images are borrowed: the caller keeps them alive as long as the
 * button exists. Like caption buttons they report the click on press.
 */
use crate::animation::{AnimationState, VisualState};
use crate::context::UiContext;
use crate::controls::{SubclassConfig, create_control, drive_push_pointer};
use crate::dispatch::Outcome;
use crate::error::Result;
use crate::native::{FrameLayer, FrameRequest, Glyph, ImageRef, NativeMessage, PaintSurface};
use crate::styling_primitives::{ColorRole, FontRole};
use crate::subclass::{ControlBehavior, ControlContext, ControlVisuals};
use crate::types::{ClickPolicy, ControlKind, WindowConfig};
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateImages {
    pub idle: ImageRef,
    pub hovering: ImageRef,
    pub pressed: ImageRef,
}

impl StateImages {
    pub fn uniform(image: ImageRef) -> Self {
        Self {
            idle: image,
            hovering: image,
            pressed: image,
        }
    }

    pub fn for_state(&self, state: VisualState) -> ImageRef {
        match state {
            VisualState::Idle => self.idle,
            VisualState::Hovering => self.hovering,
            VisualState::Pressed => self.pressed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageButtonConfig {
    pub images: StateImages,
}

pub(crate) struct ImageButtonBehavior {
    images: StateImages,
    animation: AnimationState,
    visuals: ControlVisuals,
}

impl ImageButtonBehavior {
    pub fn new(ui: &UiContext, config: ImageButtonConfig) -> Result<Self> {
        Ok(Self {
            images: config.images,
            animation: AnimationState::new(ui.metrics().max_frame_ticks),
            visuals: ControlVisuals::new(ui, FontRole::Default, None)?,
        })
    }

    fn layer(&self, state: VisualState) -> FrameLayer {
        let background = match state {
            VisualState::Idle => ColorRole::WindowBackground,
            VisualState::Hovering => ColorRole::CaptionHover,
            VisualState::Pressed => ColorRole::CaptionPressed,
        };
        FrameLayer {
            background: self.visuals.brush(background),
            border: None,
            accent: None,
            text_color: self.visuals.color(ColorRole::ButtonText),
            image: Some(self.images.for_state(state)),
        }
    }
}

impl ControlBehavior for ImageButtonBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::ImageButton
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
        match drive_push_pointer(cx, &mut self.animation, ClickPolicy::OnPress, message)? {
            Some(_) => Ok(Outcome::consumed()),
            None => Ok(Outcome::forward()),
        }
    }

    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        let plan = self.animation.plan_frame(self.kind().transition_duration_ms());
        let request = FrameRequest {
            kind: self.kind(),
            surface: PaintSurface::Client,
            plan,
            from: self.layer(plan.from),
            to: self.layer(plan.to),
            font: None,
            glyph: Glyph::None,
            border_width: cx.ui.metrics().border_width,
            selected_layer: None,
        };
        cx.api().paint_frame(cx.handle, &request)?;
        self.animation.commit_frame();
        Ok(())
    }
}

pub fn create_image_button(
    ctx: &UiContext,
    config: &WindowConfig,
    images: StateImages,
) -> Result<Window> {
    log::debug!("ImageButtonHandler: create_image_button ID {}", config.id.raw());
    create_control(
        ctx,
        config,
        SubclassConfig::ImageButton(ImageButtonConfig { images }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessApi;
    use crate::metrics::Metrics;
    use crate::styling_primitives::Theme;
    use crate::types::{ControlId, Point, Rect};

    #[test]
    fn press_notifies_and_paints_the_pressed_image() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(300, 40);
        let images = StateImages {
            idle: ImageRef(1),
            hovering: ImageRef(2),
            pressed: ImageRef(3),
        };
        let button = create_image_button(
            &ctx,
            &WindowConfig::new(top, ControlId::new(2), Rect::new(260, 0, 40, 32)),
            images,
        )
        .unwrap();
        let h = button.handle();

        ctx.dispatch(h, NativeMessage::PointerMove(Point::new(5, 5)));
        ctx.dispatch(h, NativeMessage::PrimaryDown(Point::new(5, 5)));
        ctx.dispatch(h, NativeMessage::Paint);

        assert_eq!(headless.notifications(), vec![(h, ControlId::new(2))]);
        let frame = &headless.frames_for(h)[0];
        assert_eq!(frame.from.image, Some(ImageRef(1)));
        assert_eq!(frame.to.image, Some(ImageRef(3)));
        assert_eq!(frame.plan.duration_ms, 200);
    }
}
