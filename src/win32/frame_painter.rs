/*
 * GDI rendering of a `FrameRequest`.
 *
 * Client frames are painted inside BeginPaint/EndPaint. A transition is
 * handed to the buffered-paint animation engine with the "from" layer and
 * the "to" layer drawn into the two buffers it provides; while that
 * animation runs, repaints are served by `BufferedPaintRenderAnimation`.
 * Border frames go on top of the native frame through the window DC, the
 * same way the system sunken edge is covered.
 */
use std::ffi::c_void;

use windows::Win32::{
    Foundation::{HWND, POINT, RECT},
    Graphics::Gdi::*,
    UI::Controls::{
        BP_ANIMATIONPARAMS, BPAS_LINEAR, BPBF_COMPATIBLEBITMAP, BeginBufferedAnimation,
        BufferedPaintRenderAnimation, EndBufferedAnimation,
    },
    UI::WindowsAndMessaging::{
        DI_NORMAL, DrawIconEx, GetClientRect, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
        HICON,
    },
};

use super::api::color_to_colorref;
use crate::error::{PlatformError, Result};
use crate::native::{FrameLayer, FrameRequest, Glyph, PaintSurface, ResourceId};
use crate::types::ControlKind;

const TEXT_PADDING: i32 = 6;
const RADIO_MARK_SIZE: i32 = 12;
const DROP_ARROW_WIDTH: i32 = 8;
const ACCENT_HEIGHT: i32 = 2;
/// Width of the sunken edge the system draws around edit controls.
const NATIVE_EDGE: i32 = 2;

fn brush(id: ResourceId) -> HBRUSH {
    HBRUSH(id.0 as *mut c_void)
}

/* Concentric one-pixel rings from `rect` inwards. */
fn frame_rings(hdc: HDC, rect: &RECT, rings: std::ops::Range<i32>, fill: HBRUSH) {
    for inset in rings {
        let ring = RECT {
            left: rect.left + inset,
            top: rect.top + inset,
            right: rect.right - inset,
            bottom: rect.bottom - inset,
        };
        if ring.right - ring.left <= 0 || ring.bottom - ring.top <= 0 {
            return;
        }
        unsafe { FrameRect(hdc, &ring, fill) };
    }
}

fn window_text(hwnd: HWND) -> Vec<u16> {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return Vec::new();
    }
    let mut buffer = vec![0u16; len as usize + 1];
    let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) };
    buffer.truncate(copied.max(0) as usize);
    buffer
}

pub(crate) fn paint_frame(hwnd: HWND, request: &FrameRequest) -> Result<()> {
    match request.surface {
        PaintSurface::Client => paint_client(hwnd, request),
        PaintSurface::Border => paint_border(hwnd, request),
    }
}

fn paint_client(hwnd: HWND, request: &FrameRequest) -> Result<()> {
    let mut ps = PAINTSTRUCT::default();
    let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
    if hdc.is_invalid() {
        return Err(PlatformError::OperationFailed(format!(
            "BeginPaint on {hwnd:?} returned no device context"
        )));
    }
    let mut client = RECT::default();
    let _ = unsafe { GetClientRect(hwnd, &mut client) };
    let mut text = window_text(hwnd);
    let result = render(hwnd, hdc, &client, request, &mut text);
    let _ = unsafe { EndPaint(hwnd, &ps) };
    result
}

fn render(hwnd: HWND, hdc: HDC, rect: &RECT, request: &FrameRequest, text: &mut [u16]) -> Result<()> {
    // A running buffered animation repaints itself.
    if unsafe { BufferedPaintRenderAnimation(hwnd, hdc) }.as_bool() {
        return Ok(());
    }
    if request.plan.is_static() {
        draw_layer(hdc, rect, request, &request.to, text);
        return Ok(());
    }

    let params = BP_ANIMATIONPARAMS {
        cbSize: std::mem::size_of::<BP_ANIMATIONPARAMS>() as u32,
        dwFlags: 0,
        style: BPAS_LINEAR,
        dwDuration: request.plan.duration_ms,
    };
    let mut hdc_from = HDC::default();
    let mut hdc_to = HDC::default();
    let animation = unsafe {
        BeginBufferedAnimation(
            hwnd,
            hdc,
            rect,
            BPBF_COMPATIBLEBITMAP,
            None,
            &params,
            &mut hdc_from,
            &mut hdc_to,
        )
    };
    if animation.is_invalid() {
        log::trace!("[Win32] buffered animation unavailable for {hwnd:?}; painting target state");
        draw_layer(hdc, rect, request, &request.to, text);
        return Ok(());
    }
    if !hdc_from.is_invalid() {
        draw_layer(hdc_from, rect, request, &request.from, text);
    }
    if !hdc_to.is_invalid() {
        draw_layer(hdc_to, rect, request, &request.to, text);
    }
    unsafe { EndBufferedAnimation(animation, true) }?;
    Ok(())
}

fn draw_layer(hdc: HDC, rect: &RECT, request: &FrameRequest, layer: &FrameLayer, text: &mut [u16]) {
    if let Some(background) = layer.background {
        unsafe { FillRect(hdc, rect, brush(background)) };
    }

    let mut text_rect = *rect;
    match request.glyph {
        Glyph::None => {}
        Glyph::DropArrow => {
            draw_drop_arrow(hdc, rect, layer);
            text_rect.right -= DROP_ARROW_WIDTH + 2 * TEXT_PADDING;
        }
        Glyph::RadioMark { selected } => {
            draw_radio_mark(hdc, rect, request, layer, selected);
            text_rect.left += RADIO_MARK_SIZE + TEXT_PADDING;
        }
        Glyph::Thumb(thumb) => {
            if let Some(accent) = layer.accent {
                let thumb_rect = RECT {
                    left: rect.left + thumb.x,
                    top: rect.top + thumb.y,
                    right: rect.left + thumb.right(),
                    bottom: rect.top + thumb.bottom(),
                };
                unsafe { FillRect(hdc, &thumb_rect, brush(accent)) };
            }
        }
    }

    if let Some(image) = layer.image {
        draw_image(hdc, rect, HICON(image.0 as *mut c_void));
    }
    if !matches!(request.glyph, Glyph::Thumb(_))
        && let Some(accent) = layer.accent
    {
        let accent_rect = RECT {
            top: rect.bottom - ACCENT_HEIGHT,
            ..*rect
        };
        unsafe { FillRect(hdc, &accent_rect, brush(accent)) };
    }
    if let Some(border) = layer.border {
        frame_rings(hdc, rect, 0..request.border_width.max(1), brush(border));
    }
    if !text.is_empty() && layer.image.is_none() {
        draw_text(hdc, &mut text_rect, request, layer, text);
    }
}

fn draw_text(hdc: HDC, rect: &mut RECT, request: &FrameRequest, layer: &FrameLayer, text: &mut [u16]) {
    let alignment = match request.kind {
        ControlKind::StandardButton | ControlKind::ImageButton => DT_CENTER,
        _ => {
            rect.left += TEXT_PADDING;
            DT_LEFT
        }
    };
    unsafe {
        let old_font = request
            .font
            .map(|font| SelectObject(hdc, HGDIOBJ(font.0 as *mut c_void)));
        SetBkMode(hdc, TRANSPARENT);
        SetTextColor(hdc, color_to_colorref(layer.text_color));
        DrawTextW(
            hdc,
            text,
            rect,
            alignment | DT_VCENTER | DT_SINGLELINE | DT_END_ELLIPSIS | DT_NOPREFIX,
        );
        if let Some(old) = old_font {
            SelectObject(hdc, old);
        }
    }
}

fn draw_radio_mark(hdc: HDC, rect: &RECT, request: &FrameRequest, layer: &FrameLayer, selected: bool) {
    let top = rect.top + (rect.bottom - rect.top - RADIO_MARK_SIZE) / 2;
    let mark = RECT {
        left: rect.left + 2,
        top,
        right: rect.left + 2 + RADIO_MARK_SIZE,
        bottom: top + RADIO_MARK_SIZE,
    };
    let fill = if selected {
        request.selected_layer.or(layer.accent)
    } else {
        layer.background
    };
    unsafe {
        let old_pen = SelectObject(hdc, GetStockObject(NULL_PEN));
        if let Some(outline) = layer.border.or(layer.accent) {
            let old_brush = SelectObject(hdc, HGDIOBJ(outline.0 as *mut c_void));
            let _ = Ellipse(hdc, mark.left, mark.top, mark.right, mark.bottom);
            SelectObject(hdc, old_brush);
        }
        if let Some(fill) = fill {
            let old_brush = SelectObject(hdc, HGDIOBJ(fill.0 as *mut c_void));
            let inset = if selected { 3 } else { 1 };
            let _ = Ellipse(
                hdc,
                mark.left + inset,
                mark.top + inset,
                mark.right - inset,
                mark.bottom - inset,
            );
            SelectObject(hdc, old_brush);
        }
        SelectObject(hdc, old_pen);
    }
}

fn draw_drop_arrow(hdc: HDC, rect: &RECT, layer: &FrameLayer) {
    let center_x = rect.right - TEXT_PADDING - DROP_ARROW_WIDTH / 2;
    let center_y = (rect.top + rect.bottom) / 2;
    let half = DROP_ARROW_WIDTH / 2;
    let points = [
        POINT {
            x: center_x - half,
            y: center_y - half / 2,
        },
        POINT {
            x: center_x + half,
            y: center_y - half / 2,
        },
        POINT {
            x: center_x,
            y: center_y + half / 2,
        },
    ];
    unsafe {
        let arrow = CreateSolidBrush(color_to_colorref(layer.text_color));
        if arrow.is_invalid() {
            return;
        }
        let old_pen = SelectObject(hdc, GetStockObject(NULL_PEN));
        let old_brush = SelectObject(hdc, arrow.into());
        let _ = Polygon(hdc, &points);
        SelectObject(hdc, old_brush);
        SelectObject(hdc, old_pen);
        let _ = DeleteObject(arrow.into());
    }
}

fn draw_image(hdc: HDC, rect: &RECT, icon: HICON) {
    let width = rect.right - rect.left;
    let height = rect.bottom - rect.top;
    let side = width.min(height);
    if side <= 0 {
        return;
    }
    let x = rect.left + (width - side) / 2;
    let y = rect.top + (height - side) / 2;
    if let Err(e) = unsafe { DrawIconEx(hdc, x, y, icon, side, side, 0, None, DI_NORMAL) } {
        log::warn!("[Win32] DrawIconEx failed: {e}");
    }
}

/*
 * Covers the native two-pixel edge: the outer `border_width` rings take the
 * layer's border brush, whatever is left of the edge takes its background.
 * Drawn with the target layer only; the non-client area has no animation
 * buffer.
 */
fn paint_border(hwnd: HWND, request: &FrameRequest) -> Result<()> {
    let Some(border) = request.to.border else {
        return Ok(());
    };
    unsafe {
        let hdc = GetWindowDC(Some(hwnd));
        if hdc.is_invalid() {
            return Err(PlatformError::OperationFailed(format!(
                "GetWindowDC on {hwnd:?} failed"
            )));
        }
        let mut wr = RECT::default();
        if GetWindowRect(hwnd, &mut wr).is_ok() {
            let outer = RECT {
                left: 0,
                top: 0,
                right: wr.right - wr.left,
                bottom: wr.bottom - wr.top,
            };
            let width = request.border_width.max(1);
            frame_rings(hdc, &outer, 0..width, brush(border));
            if let Some(background) = request.to.background {
                frame_rings(hdc, &outer, width..NATIVE_EDGE, brush(background));
            }
        }
        let _ = ReleaseDC(Some(hwnd), hdc);
    }
    Ok(())
}
