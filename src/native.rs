/*
 * The platform seam. Every call the control layer makes into the windowing
 * system goes through `NativeApi`, and every event the windowing system
 * delivers comes back as a `NativeMessage` through `UiContext::dispatch`.
 * `win32::Win32Api` implements the trait on Windows; `headless::HeadlessApi`
 * implements it in memory for tests and other targets.
 */
use std::rc::Weak;

use crate::animation::FramePlan;
use crate::context::UiContext;
use crate::error::Result;
use crate::scroll::ScrollAction;
use crate::styling_primitives::{Color, FontDescription};
use crate::types::{ControlId, ControlKind, NativeClass, NativeHandle, Point, Rect};

/// Timer identifier used for animation frames on every subclassed control.
pub const ANIMATION_TIMER_ID: usize = 0x6C5A;

/// Identity of a native drawing resource (brush or font).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Brush,
    Font,
}

/// A borrowed native image. The caller keeps it alive for as long as the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    pub class: NativeClass,
    pub parent: NativeHandle,
    pub bounds: Rect,
    pub id: ControlId,
    pub text: String,
    pub visible: bool,
    pub tab_stop: bool,
    pub clip_children: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMove {
    pub handle: NativeHandle,
    pub bounds: Rect,
}

/*
 * Events the binding translates from native messages. Anything not listed
 * here is never dispatched and goes straight to the default handler.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMessage {
    PointerMove(Point),
    PointerLeave,
    PrimaryDown(Point),
    PrimaryUp(Point),
    CaptureLost,
    Wheel { delta: i32 },
    Timer(usize),
    EraseBackground,
    Paint,
    /// Delivered after the native control painted, for controls that draw on top of it.
    PaintOverlay,
    FocusChanged(bool),
    VerticalScroll(ScrollAction),
    /// Command, draw-item or control-color message raised by a child.
    ChildNotification,
    /// Last message a native window ever receives.
    FinalDestroy,
}

/// What the binding does with a message after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    Forward,
    /// Let the native control paint, then deliver `PaintOverlay`.
    ForwardThenOverlay,
    ForwardToParent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintSurface {
    Client,
    /// The frame around a natively painted control.
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    None,
    DropArrow,
    RadioMark { selected: bool },
    Thumb(Rect),
}

/// Everything one visual state contributes to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameLayer {
    pub background: Option<ResourceId>,
    pub border: Option<ResourceId>,
    pub accent: Option<ResourceId>,
    pub text_color: Color,
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRequest {
    pub kind: ControlKind,
    pub surface: PaintSurface,
    pub plan: FramePlan,
    pub from: FrameLayer,
    pub to: FrameLayer,
    pub font: Option<ResourceId>,
    pub glyph: Glyph,
    /// Thickness of the border drawn with the layer's border brush.
    pub border_width: i32,
    /// Persistent layer drawn under the hover/press visuals (radio selection).
    pub selected_layer: Option<ResourceId>,
}

pub trait NativeApi {
    /* Wires native callbacks to the context. Called once by `UiContext::new`. */
    fn install_dispatcher(&self, context: Weak<UiContext>);

    fn create_window(&self, params: &CreateParams) -> Result<NativeHandle>;
    fn destroy_window(&self, handle: NativeHandle) -> Result<()>;
    fn is_window(&self, handle: NativeHandle) -> bool;
    fn parent_of(&self, handle: NativeHandle) -> Option<NativeHandle>;
    /* Bounds relative to the parent's client area. */
    fn window_rect(&self, handle: NativeHandle) -> Result<Rect>;
    fn client_size(&self, handle: NativeHandle) -> Result<(i32, i32)>;

    /* Moves every window in one atomic batch. */
    fn apply_positions(&self, moves: &[WindowMove]) -> Result<()>;
    /* Blit-scrolls the client area by `dy`, moving child windows along. */
    fn scroll_children(&self, handle: NativeHandle, dy: i32) -> Result<()>;
    fn set_visible(&self, handle: NativeHandle, visible: bool) -> Result<()>;
    fn invalidate(&self, handle: NativeHandle);

    fn set_timer(&self, handle: NativeHandle, timer_id: usize, interval_ms: u32) -> Result<()>;
    fn kill_timer(&self, handle: NativeHandle, timer_id: usize);
    fn track_pointer_leave(&self, handle: NativeHandle) -> Result<()>;
    fn set_capture(&self, handle: NativeHandle);
    fn release_capture(&self);
    /* Posts a click command for `id` to the window's logical owner. */
    fn notify_owner(&self, handle: NativeHandle, id: ControlId) -> Result<()>;

    fn attach_subclass(&self, handle: NativeHandle) -> Result<()>;
    fn detach_subclass(&self, handle: NativeHandle);

    fn create_brush(&self, color: Color) -> Result<ResourceId>;
    fn create_font(&self, font: &FontDescription) -> Result<ResourceId>;
    fn release_resource(&self, id: ResourceId, kind: ResourceKind) -> Result<()>;

    fn paint_frame(&self, handle: NativeHandle, request: &FrameRequest) -> Result<()>;
}
