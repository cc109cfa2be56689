/*
 * Win32 binding for the platform seam. `Win32Api` turns every `NativeApi`
 * call into the corresponding user32/gdi32/comctl32 call; the subclass
 * procedure in `window_common` translates native messages back into
 * `NativeMessage`s and routes them through the installed `UiContext`.
 *
 * All windows, timers and resources are thread-affine, so the binding keeps
 * its dispatcher in a thread-local and must only be used from the UI thread.
 */
mod api;
mod frame_painter;
mod window_common;

pub use api::Win32Api;
