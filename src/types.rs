/*
 * Platform-agnostic identifiers and geometry shared by every module. These types
 * carry no Win32 details so the state machines and the scroll engine can be
 * compiled and tested on any target.
 */

/// Opaque identity of one native window. Zero is the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NativeHandle(pub usize);

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn raw(self) -> usize {
        self.0
    }
}

/// Logical identifier of a control, unique within its parent or container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(i32);

impl ControlId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle expressed as origin plus size, in the coordinate space of the
/// parent's client area unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn offset_y(self, dy: i32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

/// The closed set of control kinds that can carry a subclass object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    StandardButton,
    ImageButton,
    RadioButton,
    Editbox,
    DropDownCombobox,
    VerticalScrollbar,
    StandardText,
}

impl ControlKind {
    /// Length of the cross-fade between two visual states.
    pub const fn transition_duration_ms(self) -> u32 {
        match self {
            ControlKind::StandardButton | ControlKind::RadioButton => 150,
            ControlKind::ImageButton | ControlKind::DropDownCombobox => 200,
            ControlKind::Editbox => 250,
            ControlKind::VerticalScrollbar => 100,
            ControlKind::StandardText => 0,
        }
    }

    /// The platform control class the kind is subclassed from.
    pub const fn native_class(self) -> NativeClass {
        match self {
            ControlKind::StandardButton | ControlKind::ImageButton | ControlKind::RadioButton => {
                NativeClass::Button
            }
            ControlKind::Editbox => NativeClass::Edit,
            ControlKind::DropDownCombobox => NativeClass::ComboBox,
            ControlKind::VerticalScrollbar | ControlKind::StandardText => NativeClass::Static,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeClass {
    Button,
    Edit,
    ComboBox,
    Static,
}

/// When a control tells its owner it was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Caption-bar style: the owner hears about the click as soon as the button goes down.
    OnPress,
    /// Standard buttons: the click fires on release, and only if the pointer is still inside.
    OnRelease,
    /// The control never produces click commands.
    Never,
}

/*
 * Creation parameters shared by every factory. Per-kind visuals travel
 * separately in a `SubclassConfig`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub parent: NativeHandle,
    pub bounds: Rect,
    pub id: ControlId,
    pub text: String,
    pub visible: bool,
    pub tab_stop: bool,
}

impl WindowConfig {
    pub fn new(parent: NativeHandle, id: ControlId, bounds: Rect) -> Self {
        Self {
            parent,
            bounds,
            id,
            text: String::new(),
            visible: true,
            tab_stop: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_tab_stop(mut self, tab_stop: bool) -> Self {
        self.tab_stop = tab_stop;
        self
    }
}
