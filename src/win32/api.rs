use std::cell::RefCell;
use std::ffi::c_void;
use std::rc::{Rc, Weak};

use windows::Win32::{
    Foundation::{COLORREF, GetLastError, HINSTANCE, HWND, LPARAM, POINT, RECT, WPARAM},
    Graphics::Gdi::*,
    System::LibraryLoader::GetModuleHandleW,
    System::WindowsProgramming::MulDiv,
    UI::Controls::{BufferedPaintInit, BufferedPaintUnInit},
    UI::Input::KeyboardAndMouse::{
        ReleaseCapture, SetCapture, TME_LEAVE, TRACKMOUSEEVENT, TrackMouseEvent,
    },
    UI::Shell::{RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::*,
};
use windows::core::{HSTRING, PCWSTR, w};

use super::frame_painter;
use super::window_common::{SUBCLASS_ID, control_subclass_proc};
use crate::context::UiContext;
use crate::error::{PlatformError, Result};
use crate::native::{CreateParams, FrameRequest, NativeApi, ResourceId, ResourceKind, WindowMove};
use crate::styling_primitives::{Color, FontDescription, FontWeight};
use crate::types::{ControlId, NativeClass, NativeHandle, Rect};

const WC_BUTTON: PCWSTR = w!("BUTTON");
const WC_EDIT: PCWSTR = w!("EDIT");
const WC_COMBOBOX: PCWSTR = w!("COMBOBOX");
const WC_STATIC: PCWSTR = w!("STATIC");

const CBS_DROPDOWNLIST: u32 = 0x0003;
const SS_NOTIFY: u32 = 0x0100;
const BN_CLICKED: usize = 0;

const DEFAULT_FONT_NAME: &str = "Segoe UI";
const DEFAULT_FONT_POINTS: i32 = 9;

thread_local! {
    static DISPATCHER: RefCell<Weak<UiContext>> = RefCell::new(Weak::new());
}

/* The context that receives messages on this thread, if it is still alive. */
pub(crate) fn current_dispatcher() -> Option<Rc<UiContext>> {
    DISPATCHER.with(|d| d.borrow().upgrade())
}

pub(crate) fn hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

pub(crate) fn native(hwnd: HWND) -> NativeHandle {
    NativeHandle(hwnd.0 as usize)
}

/* Win32 expects colors in BGR order. */
pub(crate) fn color_to_colorref(color: Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

fn require_window(handle: NativeHandle) -> Result<HWND> {
    let h = hwnd(handle);
    if handle.is_null() || !unsafe { IsWindow(Some(h)) }.as_bool() {
        return Err(PlatformError::InvalidHandle(format!("{handle:?} is not a window")));
    }
    Ok(h)
}

fn class_and_style(params: &CreateParams) -> (PCWSTR, WINDOW_STYLE) {
    let mut style = WS_CHILD;
    if params.visible {
        style |= WS_VISIBLE;
    }
    if params.tab_stop {
        style |= WS_TABSTOP;
    }
    if params.clip_children {
        style |= WS_CLIPCHILDREN;
    }
    match params.class {
        NativeClass::Button => (WC_BUTTON, style | WINDOW_STYLE(BS_PUSHBUTTON as u32)),
        NativeClass::Edit => (
            WC_EDIT,
            style | WS_BORDER | WINDOW_STYLE(ES_AUTOHSCROLL as u32),
        ),
        NativeClass::ComboBox => (
            WC_COMBOBOX,
            style | WS_VSCROLL | WINDOW_STYLE(CBS_DROPDOWNLIST),
        ),
        NativeClass::Static => (WC_STATIC, style | WINDOW_STYLE(SS_NOTIFY)),
    }
}

/*
 * Native implementation of the platform seam. Construct one per UI thread,
 * hand it to `UiContext::new`, and run the usual message loop.
 */
pub struct Win32Api {
    h_instance: HINSTANCE,
}

impl Win32Api {
    pub fn new() -> Result<Self> {
        let module = unsafe { GetModuleHandleW(None) }?;
        unsafe { BufferedPaintInit() }?;
        log::debug!("[Win32] binding initialized for module {module:?}");
        Ok(Self {
            h_instance: HINSTANCE(module.0),
        })
    }

    fn logical_font_height(points: i32) -> i32 {
        let hdc_screen = unsafe { GetDC(None) };
        if hdc_screen.is_invalid() {
            return -points;
        }
        let height = -unsafe { MulDiv(points, GetDeviceCaps(Some(hdc_screen), LOGPIXELSY), 72) };
        unsafe { ReleaseDC(None, hdc_screen) };
        height
    }

    /* Falls back to one `MoveWindow` per window when a batch cannot be started. */
    fn move_individually(moves: &[WindowMove]) -> Result<()> {
        for m in moves {
            let b = m.bounds;
            unsafe { MoveWindow(hwnd(m.handle), b.x, b.y, b.width.max(0), b.height.max(0), true) }?;
        }
        Ok(())
    }
}

impl Drop for Win32Api {
    fn drop(&mut self) {
        if let Err(e) = unsafe { BufferedPaintUnInit() } {
            log::warn!("[Win32] BufferedPaintUnInit failed: {e}");
        }
    }
}

impl NativeApi for Win32Api {
    fn install_dispatcher(&self, context: Weak<UiContext>) {
        DISPATCHER.with(|d| *d.borrow_mut() = context);
    }

    fn create_window(&self, params: &CreateParams) -> Result<NativeHandle> {
        let parent = require_window(params.parent)?;
        let (class, style) = class_and_style(params);
        let b = params.bounds;
        let created = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                class,
                &HSTRING::from(params.text.as_str()),
                style,
                b.x,
                b.y,
                b.width,
                b.height,
                Some(parent),
                Some(HMENU(params.id.raw() as *mut _)),
                Some(self.h_instance),
                None,
            )
        };
        match created {
            Ok(h) => Ok(native(h)),
            Err(e) => Err(PlatformError::resource(
                "CreateWindowExW",
                format!("{:?} ID {}: {e}", params.class, params.id.raw()),
            )),
        }
    }

    fn destroy_window(&self, handle: NativeHandle) -> Result<()> {
        let h = require_window(handle)?;
        unsafe { DestroyWindow(h) }?;
        Ok(())
    }

    fn is_window(&self, handle: NativeHandle) -> bool {
        !handle.is_null() && unsafe { IsWindow(Some(hwnd(handle))) }.as_bool()
    }

    fn parent_of(&self, handle: NativeHandle) -> Option<NativeHandle> {
        unsafe { GetParent(hwnd(handle)) }
            .ok()
            .filter(|p| !p.is_invalid())
            .map(native)
    }

    fn window_rect(&self, handle: NativeHandle) -> Result<Rect> {
        let h = require_window(handle)?;
        let mut rect = RECT::default();
        unsafe { GetWindowRect(h, &mut rect) }?;
        let mut corners = [
            POINT {
                x: rect.left,
                y: rect.top,
            },
            POINT {
                x: rect.right,
                y: rect.bottom,
            },
        ];
        if let Some(parent) = self.parent_of(handle) {
            unsafe { MapWindowPoints(None, Some(hwnd(parent)), &mut corners) };
        }
        Ok(Rect::new(
            corners[0].x,
            corners[0].y,
            corners[1].x - corners[0].x,
            corners[1].y - corners[0].y,
        ))
    }

    fn client_size(&self, handle: NativeHandle) -> Result<(i32, i32)> {
        let h = require_window(handle)?;
        let mut rect = RECT::default();
        unsafe { GetClientRect(h, &mut rect) }?;
        Ok((rect.right - rect.left, rect.bottom - rect.top))
    }

    fn apply_positions(&self, moves: &[WindowMove]) -> Result<()> {
        for m in moves {
            require_window(m.handle)?;
        }
        if moves.is_empty() {
            return Ok(());
        }
        let mut hdwp = match unsafe { BeginDeferWindowPos(moves.len() as i32) } {
            Ok(hdwp) if !hdwp.is_invalid() => hdwp,
            _ => {
                log::warn!(
                    "[Win32] BeginDeferWindowPos failed; fallback to MoveWindow (moves={})",
                    moves.len()
                );
                return Self::move_individually(moves);
            }
        };
        for m in moves {
            let b = m.bounds;
            match unsafe {
                DeferWindowPos(
                    hdwp,
                    hwnd(m.handle),
                    None,
                    b.x,
                    b.y,
                    b.width.max(0),
                    b.height.max(0),
                    SWP_NOZORDER | SWP_NOACTIVATE,
                )
            } {
                Ok(next) if !next.is_invalid() => hdwp = next,
                _ => {
                    // A failed DeferWindowPos frees the whole batch.
                    log::warn!("[Win32] DeferWindowPos failed for {:?}; fallback to MoveWindow", m.handle);
                    return Self::move_individually(moves);
                }
            }
        }
        unsafe { EndDeferWindowPos(hdwp) }?;
        log::trace!("[Win32] deferred batch applied, moved={}", moves.len());
        Ok(())
    }

    fn scroll_children(&self, handle: NativeHandle, dy: i32) -> Result<()> {
        let h = require_window(handle)?;
        let result = unsafe {
            ScrollWindowEx(
                h,
                0,
                dy,
                None,
                None,
                None,
                None,
                SW_SCROLLCHILDREN | SW_INVALIDATE | SW_ERASE,
            )
        };
        if result == 0 {
            return Err(PlatformError::OperationFailed(format!(
                "ScrollWindowEx on {handle:?} failed: {:?}",
                unsafe { GetLastError() }
            )));
        }
        Ok(())
    }

    fn set_visible(&self, handle: NativeHandle, visible: bool) -> Result<()> {
        let h = require_window(handle)?;
        let command = if visible { SW_SHOW } else { SW_HIDE };
        // The return value is the previous visibility, not an error.
        let _ = unsafe { ShowWindow(h, command) };
        Ok(())
    }

    fn invalidate(&self, handle: NativeHandle) {
        let _ = unsafe { InvalidateRect(Some(hwnd(handle)), None, false) };
    }

    fn set_timer(&self, handle: NativeHandle, timer_id: usize, interval_ms: u32) -> Result<()> {
        let h = require_window(handle)?;
        if unsafe { SetTimer(Some(h), timer_id, interval_ms, None) } == 0 {
            return Err(PlatformError::OperationFailed(format!(
                "SetTimer on {handle:?} failed: {:?}",
                unsafe { GetLastError() }
            )));
        }
        Ok(())
    }

    fn kill_timer(&self, handle: NativeHandle, timer_id: usize) {
        let _ = unsafe { KillTimer(Some(hwnd(handle)), timer_id) };
    }

    fn track_pointer_leave(&self, handle: NativeHandle) -> Result<()> {
        let mut tme = TRACKMOUSEEVENT {
            cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_LEAVE,
            hwndTrack: require_window(handle)?,
            dwHoverTime: 0,
        };
        unsafe { TrackMouseEvent(&mut tme) }?;
        Ok(())
    }

    fn set_capture(&self, handle: NativeHandle) {
        unsafe { SetCapture(hwnd(handle)) };
    }

    fn release_capture(&self) {
        let _ = unsafe { ReleaseCapture() };
    }

    fn notify_owner(&self, handle: NativeHandle, id: ControlId) -> Result<()> {
        let h = require_window(handle)?;
        let parent = unsafe { GetParent(h) }?;
        let wparam = (BN_CLICKED << 16) | (id.raw() as u16 as usize);
        unsafe {
            PostMessageW(
                Some(parent),
                WM_COMMAND,
                WPARAM(wparam),
                LPARAM(h.0 as isize),
            )
        }?;
        Ok(())
    }

    fn attach_subclass(&self, handle: NativeHandle) -> Result<()> {
        let h = require_window(handle)?;
        if !unsafe { SetWindowSubclass(h, Some(control_subclass_proc), SUBCLASS_ID, 0) }.as_bool() {
            return Err(PlatformError::OperationFailed(format!(
                "SetWindowSubclass on {handle:?} failed"
            )));
        }
        Ok(())
    }

    fn detach_subclass(&self, handle: NativeHandle) {
        let _ = unsafe { RemoveWindowSubclass(hwnd(handle), Some(control_subclass_proc), SUBCLASS_ID) };
    }

    fn create_brush(&self, color: Color) -> Result<ResourceId> {
        let brush = unsafe { CreateSolidBrush(color_to_colorref(color)) };
        if brush.is_invalid() {
            return Err(PlatformError::resource(
                "CreateSolidBrush",
                format!("{color:?}: {:?}", unsafe { GetLastError() }),
            ));
        }
        Ok(ResourceId(brush.0 as usize))
    }

    fn create_font(&self, font: &FontDescription) -> Result<ResourceId> {
        let name = HSTRING::from(font.name.as_deref().unwrap_or(DEFAULT_FONT_NAME));
        let height = Self::logical_font_height(font.size.unwrap_or(DEFAULT_FONT_POINTS));
        let weight = match font.weight.unwrap_or_default() {
            FontWeight::Normal => FW_NORMAL.0 as i32,
            FontWeight::Bold => FW_BOLD.0 as i32,
        };
        let h_font = unsafe {
            CreateFontW(
                height,
                0,
                0,
                0,
                weight,
                0,
                0,
                0,
                DEFAULT_CHARSET,
                OUT_DEFAULT_PRECIS,
                CLIP_DEFAULT_PRECIS,
                DEFAULT_QUALITY,
                FF_DONTCARE.0 as u32,
                &name,
            )
        };
        if h_font.is_invalid() {
            return Err(PlatformError::resource(
                "CreateFontW",
                format!("{font:?}: {:?}", unsafe { GetLastError() }),
            ));
        }
        Ok(ResourceId(h_font.0 as usize))
    }

    fn release_resource(&self, id: ResourceId, kind: ResourceKind) -> Result<()> {
        if !unsafe { DeleteObject(HGDIOBJ(id.0 as *mut c_void)) }.as_bool() {
            return Err(PlatformError::OperationFailed(format!(
                "DeleteObject for {kind:?} {id:?} failed"
            )));
        }
        Ok(())
    }

    fn paint_frame(&self, handle: NativeHandle, request: &FrameRequest) -> Result<()> {
        frame_painter::paint_frame(require_window(handle)?, request)
    }
}
