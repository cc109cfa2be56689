/*
 * Control kinds and their creation factories. Each `*_handler` module owns
 * one kind's visuals and input handling; this module holds the closed set of
 * subclass configurations and the generic factory every kind goes through.
 */
pub mod button_handler;
pub mod combobox_handler;
pub mod editbox_handler;
pub mod image_button_handler;
pub(crate) mod paint_router;
pub mod radiobutton_handler;
pub mod scrollbar_handler;
pub mod text_handler;

use std::rc::Rc;

use crate::animation::{AnimationEffect, AnimationState};
use crate::context::UiContext;
use crate::dispatch::MessageTarget;
use crate::error::Result;
use crate::native::NativeMessage;
use crate::subclass::{ControlBehavior, ControlContext, SubclassObject};
use crate::types::{ClickPolicy, ControlKind, WindowConfig};
use crate::window::{Window, WindowHandle, create_params, validate_config};

pub use button_handler::{ButtonConfig, ButtonStyle};
pub use combobox_handler::ComboboxConfig;
pub use editbox_handler::EditboxConfig;
pub use image_button_handler::{ImageButtonConfig, StateImages};
pub use radiobutton_handler::RadioButtonConfig;
pub use scrollbar_handler::ScrollbarConfig;
pub use text_handler::TextConfig;

pub enum SubclassConfig {
    StandardButton(ButtonConfig),
    ImageButton(ImageButtonConfig),
    RadioButton(RadioButtonConfig),
    Editbox(EditboxConfig),
    DropDownCombobox(ComboboxConfig),
    VerticalScrollbar(ScrollbarConfig),
    StandardText(TextConfig),
}

impl SubclassConfig {
    pub fn kind(&self) -> ControlKind {
        match self {
            SubclassConfig::StandardButton(_) => ControlKind::StandardButton,
            SubclassConfig::ImageButton(_) => ControlKind::ImageButton,
            SubclassConfig::RadioButton(_) => ControlKind::RadioButton,
            SubclassConfig::Editbox(_) => ControlKind::Editbox,
            SubclassConfig::DropDownCombobox(_) => ControlKind::DropDownCombobox,
            SubclassConfig::VerticalScrollbar(_) => ControlKind::VerticalScrollbar,
            SubclassConfig::StandardText(_) => ControlKind::StandardText,
        }
    }

    fn into_behavior(self, ui: &UiContext) -> Result<Box<dyn ControlBehavior>> {
        Ok(match self {
            SubclassConfig::StandardButton(c) => Box::new(button_handler::ButtonBehavior::new(ui, c)?),
            SubclassConfig::ImageButton(c) => {
                Box::new(image_button_handler::ImageButtonBehavior::new(ui, c)?)
            }
            SubclassConfig::RadioButton(c) => {
                Box::new(radiobutton_handler::RadioButtonBehavior::new(ui, c)?)
            }
            SubclassConfig::Editbox(c) => Box::new(editbox_handler::EditboxBehavior::new(ui, c)?),
            SubclassConfig::DropDownCombobox(c) => {
                Box::new(combobox_handler::ComboboxBehavior::new(ui, c)?)
            }
            SubclassConfig::VerticalScrollbar(c) => {
                Box::new(scrollbar_handler::ScrollbarBehavior::new(ui, c)?)
            }
            SubclassConfig::StandardText(c) => Box::new(text_handler::TextBehavior::new(ui, c)?),
        })
    }
}

/*
 * Creates the native control, attaches its subclass object and registers it.
 * Per-instance resources are created before the native window, so a resource
 * failure leaves nothing behind. Any later failure drops the half-built
 * `Window`, which destroys the native control again.
 */
pub fn create_control(ctx: &UiContext, config: &WindowConfig, subclass: SubclassConfig) -> Result<Window> {
    validate_config(config)?;
    let kind = subclass.kind();
    log::debug!(
        "Controls: creating {kind:?} ID {} under {:?}",
        config.id.raw(),
        config.parent
    );

    let mut behavior = subclass.into_behavior(ctx)?;
    let handle = WindowHandle::create(ctx.api(), &create_params(config, kind.native_class()))?;
    let raw = handle.raw();
    behavior.attached(raw)?;

    let object = SubclassObject::new(raw, config.id, behavior);
    let window = Window::new(handle, config.id, Some(Rc::clone(&object)));
    ctx.api().attach_subclass(raw)?;
    let target: Rc<dyn MessageTarget> = object;
    ctx.register(raw, &target)?;

    log::debug!("Controls: {kind:?} ID {} is {raw:?}", config.id.raw());
    Ok(window)
}

/*
 * Pointer handling shared by the push-style kinds. Returns `None` for
 * messages that are not pointer input, otherwise whether the input produced
 * a click.
 */
pub(crate) fn drive_push_pointer(
    cx: &ControlContext<'_>,
    animation: &mut AnimationState,
    policy: ClickPolicy,
    message: &NativeMessage,
) -> Result<Option<bool>> {
    let effects = match message {
        // With the pointer captured, moves keep arriving from outside the control.
        NativeMessage::PointerMove(p) if animation.is_pressed() && !cx.is_inside(*p) => {
            animation.pointer_leave()
        }
        NativeMessage::PointerMove(_) => animation.pointer_move(),
        NativeMessage::PointerLeave => animation.pointer_leave(),
        NativeMessage::PrimaryDown(_) => animation.primary_down(policy),
        NativeMessage::PrimaryUp(p) => animation.primary_up(policy, cx.is_inside(*p)),
        NativeMessage::CaptureLost => animation.capture_lost(),
        _ => return Ok(None),
    };
    let clicked = effects.contains(&AnimationEffect::NotifyOwner);
    cx.apply_effects(&effects)?;
    Ok(Some(clicked))
}

/*
 * Hover tracking for kinds whose input belongs to the native control. The
 * native control keeps capture and clicks; only enter and leave animate.
 */
pub(crate) fn drive_hover(
    cx: &ControlContext<'_>,
    animation: &mut AnimationState,
    message: &NativeMessage,
) -> Result<()> {
    let effects = match message {
        NativeMessage::PointerMove(_) => animation.pointer_move(),
        NativeMessage::PointerLeave => animation.pointer_leave(),
        _ => return Ok(()),
    };
    cx.apply_effects(&effects)
}
