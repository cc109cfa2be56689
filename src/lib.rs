/*
 * Public entry point for the glazeui crate: owner-drawn, animated native
 * controls and a scrollable container on top of window subclassing.
 *
 * Everything above the platform seam (`native::NativeApi`) is portable and
 * runs against the in-memory `headless` substrate on any target, so the
 * control state machines, the registry and the container arithmetic can be
 * built and tested without a desktop. The Win32 binding is compiled only on
 * Windows.
 */
pub mod animation;
pub mod container;
pub(crate) mod context;
pub mod controls;
pub(crate) mod dispatch;
pub mod error;
pub mod headless;
pub mod metrics;
pub mod native;
pub mod radio_group;
pub mod registry;
pub mod resources;
pub mod scroll;
pub mod styling_primitives;
pub(crate) mod subclass;
pub mod types;
pub mod window;
#[cfg(target_os = "windows")]
pub mod win32;

pub use animation::{AnimationState, VisualState};
pub use container::{Container, ContainerConfig};
pub use context::UiContext;
pub use controls::button_handler::create_button;
pub use controls::combobox_handler::create_combobox;
pub use controls::editbox_handler::create_editbox;
pub use controls::image_button_handler::create_image_button;
pub use controls::radiobutton_handler::create_radio_button;
pub use controls::scrollbar_handler::create_scrollbar;
pub use controls::text_handler::create_text;
pub use controls::{
    ButtonConfig, ButtonStyle, ComboboxConfig, EditboxConfig, ImageButtonConfig,
    RadioButtonConfig, ScrollbarConfig, StateImages, SubclassConfig, TextConfig, create_control,
};
pub use error::{PlatformError, Result as PlatformResult};
pub use metrics::Metrics;
pub use native::{Disposition, NativeApi, NativeMessage};
pub use radio_group::{RadioGroup, SelectionChange};
pub use resources::ThemeResources;
pub use scroll::{ScrollAction, ScrollState};
pub use styling_primitives::{Color, ColorRole, FontDescription, FontRole, FontWeight, Theme};
pub use subclass::SubclassObject;
pub use types::{ControlId, ControlKind, NativeHandle, Point, Rect, WindowConfig};
pub use window::{Window, WindowHandle, create_plain_window};
#[cfg(target_os = "windows")]
pub use win32::Win32Api;
