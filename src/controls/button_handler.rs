/*
 * Owner-drawn push buttons. Standard buttons report a click on release
 * inside the button; caption-bar buttons (minimize, close and the like) react
 * as soon as they are pressed, matching how window captions behave.
 */
use crate::animation::{AnimationState, VisualState};
use crate::context::UiContext;
use crate::controls::{SubclassConfig, create_control, drive_push_pointer};
use crate::dispatch::Outcome;
use crate::error::Result;
use crate::native::{FrameLayer, FrameRequest, Glyph, NativeMessage, PaintSurface};
use crate::styling_primitives::{ColorRole, FontDescription, FontRole};
use crate::subclass::{ControlBehavior, ControlContext, ControlVisuals};
use crate::types::{ClickPolicy, ControlKind, WindowConfig};
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    #[default]
    Standard,
    Caption,
}

impl ButtonStyle {
    pub fn click_policy(self) -> ClickPolicy {
        match self {
            ButtonStyle::Standard => ClickPolicy::OnRelease,
            ButtonStyle::Caption => ClickPolicy::OnPress,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ButtonConfig {
    pub style: ButtonStyle,
    pub font: Option<FontDescription>,
}

pub(crate) struct ButtonBehavior {
    style: ButtonStyle,
    animation: AnimationState,
    visuals: ControlVisuals,
}

impl ButtonBehavior {
    pub fn new(ui: &UiContext, config: ButtonConfig) -> Result<Self> {
        let font_role = match config.style {
            ButtonStyle::Standard => FontRole::Default,
            ButtonStyle::Caption => FontRole::Caption,
        };
        Ok(Self {
            style: config.style,
            animation: AnimationState::new(ui.metrics().max_frame_ticks),
            visuals: ControlVisuals::new(ui, font_role, config.font.as_ref())?,
        })
    }

    fn layer(&self, state: VisualState) -> FrameLayer {
        let (background, border) = match (self.style, state) {
            (ButtonStyle::Standard, VisualState::Idle) => {
                (ColorRole::ButtonBackground, Some(ColorRole::BorderStandard))
            }
            (ButtonStyle::Standard, VisualState::Hovering) => {
                (ColorRole::ButtonHover, Some(ColorRole::BorderHover))
            }
            (ButtonStyle::Standard, VisualState::Pressed) => {
                (ColorRole::ButtonPressed, Some(ColorRole::BorderActive))
            }
            (ButtonStyle::Caption, VisualState::Idle) => (ColorRole::WindowBackground, None),
            (ButtonStyle::Caption, VisualState::Hovering) => (ColorRole::CaptionHover, None),
            (ButtonStyle::Caption, VisualState::Pressed) => (ColorRole::CaptionPressed, None),
        };
        FrameLayer {
            background: self.visuals.brush(background),
            border: border.and_then(|role| self.visuals.brush(role)),
            accent: None,
            text_color: self.visuals.color(ColorRole::ButtonText),
            image: None,
        }
    }
}

impl ControlBehavior for ButtonBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::StandardButton
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
        match drive_push_pointer(cx, &mut self.animation, self.style.click_policy(), message)? {
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

/*
 * Creates an owner-drawn push button. The window text is the caption. A
 * caption-bar button given no height takes the height of the caption bar.
 */
pub fn create_button(ctx: &UiContext, config: &WindowConfig, button: ButtonConfig) -> Result<Window> {
    log::debug!(
        "ButtonHandler: create_button ID {} '{}' ({:?})",
        config.id.raw(),
        config.text,
        button.style
    );
    if button.style == ButtonStyle::Caption && config.bounds.height == 0 {
        let mut sized = config.clone();
        sized.bounds.height = ctx.metrics().caption_height;
        return create_control(ctx, &sized, SubclassConfig::StandardButton(button));
    }
    create_control(ctx, config, SubclassConfig::StandardButton(button))
}
