/*
 * The subclass procedure shared by every subclassed window, and the
 * translation of raw window messages into `NativeMessage`s.
 *
 * Translation is a pure function of the message triple so it can be tested
 * without windows. The procedure looks the context up through the
 * thread-local dispatcher, dispatches, and carries out the returned
 * `Disposition`. Messages that do not translate never reach the context.
 */
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::ValidateRect,
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass},
    UI::WindowsAndMessaging::*,
};

use super::api::{current_dispatcher, native};
use crate::native::{Disposition, NativeMessage};
use crate::scroll::ScrollAction;
use crate::types::Point;

// WM_MOUSELEAVE is not exported by windows-rs, define it manually
const WM_MOUSELEAVE: u32 = 0x02A3;

/// Identifier of our subclass in the comctl32 subclass chain.
pub(crate) const SUBCLASS_ID: usize = 0x474C_415A;

#[inline]
fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

#[inline]
fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/* Client coordinates are signed; multi-monitor setups produce negative ones. */
fn point_from_lparam(lparam: LPARAM) -> Point {
    let raw = lparam.0 as usize;
    Point::new(loword(raw) as i16 as i32, hiword(raw) as i16 as i32)
}

/*
 * Messages a container client passes on to its own parent so children
 * behave as if they sat directly in the application window.
 */
fn is_parent_notification(msg: u32) -> bool {
    matches!(
        msg,
        WM_COMMAND
            | WM_NOTIFY
            | WM_PARENTNOTIFY
            | WM_DRAWITEM
            | WM_MEASUREITEM
            | WM_DELETEITEM
            | WM_COMPAREITEM
            | WM_CTLCOLORBTN
            | WM_CTLCOLOREDIT
            | WM_CTLCOLORSTATIC
            | WM_CTLCOLORLISTBOX
            | WM_CTLCOLORSCROLLBAR
            | WM_CTLCOLORDLG
            | WM_HSCROLL
    )
}

fn scroll_action(wparam: WPARAM) -> Option<ScrollAction> {
    let position = hiword(wparam.0) as i32;
    Some(match loword(wparam.0) as i32 {
        x if x == SB_LINEUP.0 => ScrollAction::LineUp,
        x if x == SB_LINEDOWN.0 => ScrollAction::LineDown,
        x if x == SB_PAGEUP.0 => ScrollAction::PageUp,
        x if x == SB_PAGEDOWN.0 => ScrollAction::PageDown,
        x if x == SB_THUMBTRACK.0 || x == SB_THUMBPOSITION.0 => ScrollAction::ThumbTrack(position),
        x if x == SB_TOP.0 => ScrollAction::Top,
        x if x == SB_BOTTOM.0 => ScrollAction::Bottom,
        _ => return None,
    })
}

pub(crate) fn translate_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<NativeMessage> {
    let message = match msg {
        WM_MOUSEMOVE => NativeMessage::PointerMove(point_from_lparam(lparam)),
        WM_MOUSELEAVE => NativeMessage::PointerLeave,
        WM_LBUTTONDOWN | WM_LBUTTONDBLCLK => NativeMessage::PrimaryDown(point_from_lparam(lparam)),
        WM_LBUTTONUP => NativeMessage::PrimaryUp(point_from_lparam(lparam)),
        WM_CAPTURECHANGED => NativeMessage::CaptureLost,
        WM_MOUSEWHEEL => NativeMessage::Wheel {
            delta: hiword(wparam.0) as i16 as i32,
        },
        WM_TIMER => NativeMessage::Timer(wparam.0),
        WM_ERASEBKGND => NativeMessage::EraseBackground,
        WM_PAINT => NativeMessage::Paint,
        WM_SETFOCUS => NativeMessage::FocusChanged(true),
        WM_KILLFOCUS => NativeMessage::FocusChanged(false),
        // A scrollbar control child identifies itself in lParam; our own requests do not.
        WM_VSCROLL if lparam.0 != 0 => NativeMessage::ChildNotification,
        WM_VSCROLL => NativeMessage::VerticalScroll(scroll_action(wparam)?),
        m if is_parent_notification(m) => NativeMessage::ChildNotification,
        _ => return None,
    };
    Some(message)
}

/* Result for a message the context consumed. */
fn consumed_result(hwnd: HWND, msg: u32) -> LRESULT {
    match msg {
        // Non-zero tells the system the background is taken care of.
        WM_ERASEBKGND => LRESULT(1),
        WM_PAINT => {
            // Owner-drawn paints validate through BeginPaint; make sure nothing keeps repainting.
            let _ = unsafe { ValidateRect(Some(hwnd), None) };
            LRESULT(0)
        }
        _ => LRESULT(0),
    }
}

pub(crate) unsafe extern "system" fn control_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    _ref_data: usize,
) -> LRESULT {
    unsafe {
        if msg == WM_NCDESTROY {
            let _ = RemoveWindowSubclass(hwnd, Some(control_subclass_proc), SUBCLASS_ID);
            if let Some(ctx) = current_dispatcher() {
                ctx.dispatch(native(hwnd), NativeMessage::FinalDestroy);
            }
            return DefSubclassProc(hwnd, msg, wparam, lparam);
        }

        // The native frame is always drawn first; the overlay goes on top of it.
        if msg == WM_NCPAINT {
            let result = DefSubclassProc(hwnd, msg, wparam, lparam);
            if let Some(ctx) = current_dispatcher() {
                ctx.dispatch(native(hwnd), NativeMessage::PaintOverlay);
            }
            return result;
        }

        let Some(message) = translate_message(msg, wparam, lparam) else {
            return DefSubclassProc(hwnd, msg, wparam, lparam);
        };
        let Some(ctx) = current_dispatcher() else {
            return DefSubclassProc(hwnd, msg, wparam, lparam);
        };

        match ctx.dispatch(native(hwnd), message) {
            Disposition::Consumed => consumed_result(hwnd, msg),
            Disposition::Forward => DefSubclassProc(hwnd, msg, wparam, lparam),
            Disposition::ForwardThenOverlay => {
                let result = DefSubclassProc(hwnd, msg, wparam, lparam);
                ctx.dispatch(native(hwnd), NativeMessage::PaintOverlay);
                result
            }
            Disposition::ForwardToParent => match GetParent(hwnd) {
                Ok(parent) if !parent.is_invalid() => {
                    SendMessageW(parent, msg, Some(wparam), Some(lparam))
                }
                _ => DefSubclassProc(hwnd, msg, wparam, lparam),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lparam_xy(x: i16, y: i16) -> LPARAM {
        LPARAM(((y as u16 as isize) << 16) | x as u16 as isize)
    }

    #[test]
    fn pointer_coordinates_are_signed() {
        assert_eq!(
            translate_message(WM_MOUSEMOVE, WPARAM(0), lparam_xy(-4, 17)),
            Some(NativeMessage::PointerMove(Point::new(-4, 17)))
        );
        assert_eq!(
            translate_message(WM_LBUTTONDBLCLK, WPARAM(0), lparam_xy(2, 3)),
            Some(NativeMessage::PrimaryDown(Point::new(2, 3)))
        );
    }

    #[test]
    fn wheel_delta_is_the_signed_high_word() {
        let backwards = WPARAM(((-120i16 as u16 as usize) << 16) | 0x0008);
        assert_eq!(
            translate_message(WM_MOUSEWHEEL, backwards, LPARAM(0)),
            Some(NativeMessage::Wheel { delta: -120 })
        );
    }

    #[test]
    fn own_vertical_scroll_is_an_action_but_child_scrollbars_are_notifications() {
        let track = WPARAM((40 << 16) | SB_THUMBTRACK.0 as usize);
        assert_eq!(
            translate_message(WM_VSCROLL, track, LPARAM(0)),
            Some(NativeMessage::VerticalScroll(ScrollAction::ThumbTrack(40)))
        );
        assert_eq!(
            translate_message(WM_VSCROLL, track, LPARAM(0x1234)),
            Some(NativeMessage::ChildNotification)
        );
        assert_eq!(
            translate_message(WM_VSCROLL, WPARAM(SB_ENDSCROLL.0 as usize), LPARAM(0)),
            None
        );
    }

    #[test]
    fn parent_notification_set_is_complete_for_containers() {
        for msg in [
            WM_COMMAND,
            WM_NOTIFY,
            WM_DRAWITEM,
            WM_CTLCOLORSTATIC,
            WM_CTLCOLOREDIT,
            WM_HSCROLL,
        ] {
            assert_eq!(
                translate_message(msg, WPARAM(0), LPARAM(0)),
                Some(NativeMessage::ChildNotification)
            );
        }
    }

    #[test]
    fn unrelated_messages_are_not_dispatched() {
        assert_eq!(translate_message(WM_SETCURSOR, WPARAM(0), LPARAM(0)), None);
        assert_eq!(translate_message(WM_NCPAINT, WPARAM(0), LPARAM(0)), None);
    }
}
