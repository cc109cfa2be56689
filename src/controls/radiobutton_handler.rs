/*
 * Owner-drawn radio buttons. Every member of a group shares one
 * `RadioGroup`; a click selects the member and redraws the one it replaced.
 * The selection is painted as a persistent layer under the hover and press
 * visuals.
 */
use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{AnimationState, VisualState};
use crate::context::UiContext;
use crate::controls::{SubclassConfig, create_control, drive_push_pointer};
use crate::dispatch::Outcome;
use crate::error::Result;
use crate::native::{FrameLayer, FrameRequest, Glyph, NativeMessage, PaintSurface};
use crate::radio_group::RadioGroup;
use crate::styling_primitives::{ColorRole, FontDescription, FontRole};
use crate::subclass::{ControlBehavior, ControlContext, ControlVisuals};
use crate::types::{ClickPolicy, ControlKind, NativeHandle, WindowConfig};
use crate::window::Window;

#[derive(Debug, Clone)]
pub struct RadioButtonConfig {
    pub group: Rc<RefCell<RadioGroup>>,
    pub font: Option<FontDescription>,
}

pub(crate) struct RadioButtonBehavior {
    group: Rc<RefCell<RadioGroup>>,
    animation: AnimationState,
    visuals: ControlVisuals,
}

impl RadioButtonBehavior {
    pub fn new(ui: &UiContext, config: RadioButtonConfig) -> Result<Self> {
        Ok(Self {
            group: config.group,
            animation: AnimationState::new(ui.metrics().max_frame_ticks),
            visuals: ControlVisuals::new(ui, FontRole::Default, config.font.as_ref())?,
        })
    }

    fn layer(&self, state: VisualState) -> FrameLayer {
        let background = match state {
            VisualState::Idle => ColorRole::WindowBackground,
            VisualState::Hovering => ColorRole::RadioHover,
            VisualState::Pressed => ColorRole::ButtonPressed,
        };
        FrameLayer {
            background: self.visuals.brush(background),
            border: self.visuals.brush(ColorRole::BorderStandard),
            accent: None,
            text_color: self.visuals.color(ColorRole::RadioText),
            image: None,
        }
    }

    fn select(&self, cx: &ControlContext<'_>) -> Result<()> {
        let change = self.group.borrow_mut().select(cx.handle)?;
        if let Some(previous) = change.deselected() {
            log::debug!("RadioButtonHandler: {previous:?} deselected by {:?}", cx.handle);
            cx.api().invalidate(previous);
        }
        cx.api().invalidate(cx.handle);
        Ok(())
    }
}

impl ControlBehavior for RadioButtonBehavior {
    fn kind(&self) -> ControlKind {
        ControlKind::RadioButton
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

    fn attached(&mut self, handle: NativeHandle) -> Result<()> {
        self.group.borrow_mut().add_radio_button(handle)
    }

    fn handle_input(&mut self, cx: &ControlContext<'_>, message: &NativeMessage) -> Result<Outcome> {
        match drive_push_pointer(cx, &mut self.animation, ClickPolicy::OnRelease, message)? {
            Some(true) => {
                self.select(cx)?;
                Ok(Outcome::consumed())
            }
            Some(false) => Ok(Outcome::consumed()),
            None => Ok(Outcome::forward()),
        }
    }

    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        let selected = self.group.borrow().is_selected(cx.handle);
        let plan = self.animation.plan_frame(self.kind().transition_duration_ms());
        let request = FrameRequest {
            kind: self.kind(),
            surface: PaintSurface::Client,
            plan,
            from: self.layer(plan.from),
            to: self.layer(plan.to),
            font: self.visuals.font(),
            glyph: Glyph::RadioMark { selected },
            border_width: cx.ui.metrics().border_width,
            selected_layer: if selected {
                self.visuals.brush(ColorRole::RadioSelected)
            } else {
                None
            },
        };
        cx.api().paint_frame(cx.handle, &request)?;
        self.animation.commit_frame();
        Ok(())
    }

    fn release(&mut self, handle: NativeHandle) {
        match self.group.try_borrow_mut() {
            Ok(mut group) => {
                // Already gone if creation failed before joining or on a second release.
                if let Err(e) = group.remove_radio_button(handle) {
                    log::trace!("RadioButtonHandler: release of {handle:?}: {e}");
                }
            }
            Err(_) => log::warn!("RadioButtonHandler: group busy while releasing {handle:?}"),
        }
        self.visuals.release();
    }
}

pub fn create_radio_button(
    ctx: &UiContext,
    config: &WindowConfig,
    group: &Rc<RefCell<RadioGroup>>,
) -> Result<Window> {
    log::debug!(
        "RadioButtonHandler: create_radio_button ID {} '{}'",
        config.id.raw(),
        config.text
    );
    create_control(
        ctx,
        config,
        SubclassConfig::RadioButton(RadioButtonConfig {
            group: Rc::clone(group),
            font: None,
        }),
    )
}
