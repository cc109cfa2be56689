/*
 * Static labels painted with the theme's text color and font. They have no
 * interactive states, so every frame is static.
 */
use crate::animation::{AnimationState, FramePlan, VisualState};
use crate::context::UiContext;
use crate::controls::{SubclassConfig, create_control};
use crate::dispatch::Outcome;
use crate::error::Result;
use crate::native::{FrameLayer, FrameRequest, Glyph, NativeMessage, PaintSurface};
use crate::styling_primitives::{ColorRole, FontDescription, FontRole};
use crate::subclass::{ControlBehavior, ControlContext, ControlVisuals};
use crate::types::{ControlKind, WindowConfig};
use crate::window::Window;

#[derive(Debug, Clone)]
pub struct TextConfig {
    pub color: ColorRole,
    pub font_role: FontRole,
    pub font: Option<FontDescription>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            color: ColorRole::StaticText,
            font_role: FontRole::Default,
            font: None,
        }
    }
}

pub(crate) struct TextBehavior {
    color: ColorRole,
    visuals: ControlVisuals,
}

impl TextBehavior {
    pub fn new(ui: &UiContext, config: TextConfig) -> Result<Self> {
        Ok(Self {
            color: config.color,
            visuals: ControlVisuals::new(ui, config.font_role, config.font.as_ref())?,
        })
    }
}

impl ControlBehavior for TextBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::StandardText
    }

    fn animation(&self) -> Option<&AnimationState> {
        None
    }

    fn animation_mut(&mut self) -> Option<&mut AnimationState> {
        None
    }

    fn visuals_mut(&mut self) -> &mut ControlVisuals {
        &mut self.visuals
    }

    fn handle_input(&mut self, _cx: &ControlContext<'_>, _message: &NativeMessage) -> Result<Outcome> {
        Ok(Outcome::forward())
    }

    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        let layer = FrameLayer {
            background: self.visuals.brush(ColorRole::WindowBackground),
            border: None,
            accent: None,
            text_color: self.visuals.color(self.color),
            image: None,
        };
        let request = FrameRequest {
            kind: self.kind(),
            surface: PaintSurface::Client,
            plan: FramePlan {
                from: VisualState::Idle,
                to: VisualState::Idle,
                duration_ms: 0,
            },
            from: layer,
            to: layer,
            font: self.visuals.font(),
            glyph: Glyph::None,
            border_width: cx.ui.metrics().border_width,
            selected_layer: None,
        };
        cx.api().paint_frame(cx.handle, &request)
    }
}

pub fn create_text(ctx: &UiContext, config: &WindowConfig, text: TextConfig) -> Result<Window> {
    log::debug!("TextHandler: create_text ID {} '{}'", config.id.raw(), config.text);
    create_control(ctx, config, SubclassConfig::StandardText(text))
}
