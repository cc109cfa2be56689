use crate::native::NativeMessage;
use crate::types::ControlKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaintRoute {
    /// The control draws its whole client area.
    OwnerDrawn,
    /// Native paint first, then an overlay pass.
    NativeThenOverlay,
    /// The overlay pass that follows a native paint.
    Overlay,
    /// Swallow the message; the owner-drawn paint covers it.
    Suppress,
    Native,
}

pub(crate) fn resolve_paint_route(kind: ControlKind, message: &NativeMessage) -> PaintRoute {
    let native_content = kind == ControlKind::Editbox;
    match (native_content, message) {
        (false, NativeMessage::Paint) => PaintRoute::OwnerDrawn,
        (false, NativeMessage::EraseBackground) => PaintRoute::Suppress,
        // Non-client repaints arrive as overlays for every kind; owner-drawn kinds have no frame.
        (false, NativeMessage::PaintOverlay) => PaintRoute::Native,
        (true, NativeMessage::Paint) => PaintRoute::NativeThenOverlay,
        (true, NativeMessage::PaintOverlay) => PaintRoute::Overlay,
        _ => PaintRoute::Native,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editbox_paints_natively_then_overlays_border() {
        assert_eq!(
            resolve_paint_route(ControlKind::Editbox, &NativeMessage::Paint),
            PaintRoute::NativeThenOverlay
        );
        assert_eq!(
            resolve_paint_route(ControlKind::Editbox, &NativeMessage::PaintOverlay),
            PaintRoute::Overlay
        );
        assert_eq!(
            resolve_paint_route(ControlKind::Editbox, &NativeMessage::EraseBackground),
            PaintRoute::Native
        );
    }

    #[test]
    fn owner_drawn_kinds_suppress_background_erase() {
        for kind in [
            ControlKind::StandardButton,
            ControlKind::RadioButton,
            ControlKind::VerticalScrollbar,
            ControlKind::StandardText,
        ] {
            assert_eq!(resolve_paint_route(kind, &NativeMessage::Paint), PaintRoute::OwnerDrawn);
            assert_eq!(
                resolve_paint_route(kind, &NativeMessage::EraseBackground),
                PaintRoute::Suppress
            );
        }
    }
}
