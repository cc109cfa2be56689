/*
 * Ownership wrappers for native windows.
 *
 * `WindowHandle` owns exactly one native window and destroys it on drop,
 * unless the platform already did. `Window` pairs a handle with the optional
 * subclass object that gives the control its behavior; dropping a `Window`
 * shuts the subclass object down (timers, per-instance resources) before the
 * native window goes away.
 */
use std::rc::Rc;

use crate::context::UiContext;
use crate::dispatch::MessageTarget;
use crate::error::{PlatformError, Result};
use crate::native::{CreateParams, NativeApi};
use crate::styling_primitives::FontDescription;
use crate::subclass::SubclassObject;
use crate::types::{ControlId, ControlKind, NativeClass, NativeHandle, Rect, WindowConfig};

pub struct WindowHandle {
    api: Rc<dyn NativeApi>,
    handle: NativeHandle,
}

impl WindowHandle {
    pub(crate) fn create(api: &Rc<dyn NativeApi>, params: &CreateParams) -> Result<Self> {
        let handle = api.create_window(params).inspect_err(|e| {
            log::error!(
                "[Window] creating {:?} (ID {}) failed: {e}",
                params.class,
                params.id.raw()
            );
        })?;
        if handle.is_null() {
            return Err(PlatformError::resource(
                "create_window",
                "platform returned a null handle",
            ));
        }
        Ok(Self {
            api: Rc::clone(api),
            handle,
        })
    }

    pub fn raw(&self) -> NativeHandle {
        self.handle
    }

    pub fn is_alive(&self) -> bool {
        self.api.is_window(self.handle)
    }
}

impl std::fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WindowHandle").field(&self.handle).finish()
    }
}

impl Drop for WindowHandle {
    fn drop(&mut self) {
        if !self.api.is_window(self.handle) {
            log::trace!("[Window] {:?} already destroyed by the platform", self.handle);
            return;
        }
        if let Err(e) = self.api.destroy_window(self.handle) {
            log::error!("[Window] destroying {:?} failed: {e}", self.handle);
            debug_assert!(false, "native window destruction failed: {e}");
        }
    }
}

pub struct Window {
    subclass: Option<Rc<SubclassObject>>,
    handle: WindowHandle,
    id: ControlId,
}

impl Window {
    pub(crate) fn new(handle: WindowHandle, id: ControlId, subclass: Option<Rc<SubclassObject>>) -> Self {
        Self {
            subclass,
            handle,
            id,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle.raw()
    }

    pub fn kind(&self) -> Option<ControlKind> {
        self.subclass.as_ref().map(|s| s.kind())
    }

    pub fn subclass(&self) -> Option<&Rc<SubclassObject>> {
        self.subclass.as_ref()
    }

    pub fn is_alive(&self) -> bool {
        self.handle.is_alive()
    }

    /* Re-reads configuration from the context and forces a full redraw. */
    pub fn refresh(&self, ctx: &UiContext) -> Result<()> {
        match &self.subclass {
            Some(subclass) => subclass.refresh(ctx),
            None => {
                ctx.api().invalidate(self.handle());
                Ok(())
            }
        }
    }

    /*
     * Replaces this control's font override. A failed font creation returns
     * `ResourceCreation` and leaves the current font in use.
     */
    pub fn set_font(&self, ctx: &UiContext, font: Option<FontDescription>) -> Result<()> {
        match &self.subclass {
            Some(subclass) => subclass.set_font_override(ctx, font),
            None => Err(PlatformError::Precondition(format!(
                "window {} has no subclass to carry a font",
                self.id.raw()
            ))),
        }
    }

    /* Bounds relative to the parent's client area. */
    pub fn bounds(&self, ctx: &UiContext) -> Result<Rect> {
        ctx.api().window_rect(self.handle())
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("kind", &self.kind())
            .finish()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Some(subclass) = self.subclass.take() {
            let api = &self.handle.api;
            subclass.shutdown(api.as_ref());
            if api.is_window(self.handle.raw()) {
                api.detach_subclass(self.handle.raw());
            }
        }
    }
}

pub(crate) fn validate_config(config: &WindowConfig) -> Result<()> {
    if config.parent.is_null() {
        return Err(PlatformError::Precondition(format!(
            "control {} has no parent window",
            config.id.raw()
        )));
    }
    if config.bounds.width < 0 || config.bounds.height < 0 {
        return Err(PlatformError::Precondition(format!(
            "control {} has negative size {}x{}",
            config.id.raw(),
            config.bounds.width,
            config.bounds.height
        )));
    }
    Ok(())
}

pub(crate) fn create_params(config: &WindowConfig, class: NativeClass) -> CreateParams {
    CreateParams {
        class,
        parent: config.parent,
        bounds: config.bounds,
        id: config.id,
        text: config.text.clone(),
        visible: config.visible,
        tab_stop: config.tab_stop,
        clip_children: false,
    }
}

/*
 * A window with no behavior of its own (separators, backgrounds). It is not
 * registered and receives no dispatched messages.
 */
pub fn create_plain_window(ctx: &UiContext, config: &WindowConfig, class: NativeClass) -> Result<Window> {
    validate_config(config)?;
    let handle = WindowHandle::create(ctx.api(), &create_params(config, class))?;
    log::debug!("[Window] plain {class:?} {} created as {:?}", config.id.raw(), handle.raw());
    Ok(Window::new(handle, config.id, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessApi;
    use crate::metrics::Metrics;
    use crate::styling_primitives::Theme;

    #[test]
    fn dropping_a_plain_window_destroys_it_once() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(200, 200);
        let window = create_plain_window(
            &ctx,
            &WindowConfig::new(top, ControlId::new(1), Rect::new(0, 0, 10, 10)),
            NativeClass::Static,
        )
        .unwrap();
        let handle = window.handle();

        drop(window);

        assert!(!headless.is_window(handle));
        assert_eq!(headless.destroy_count(handle), 1);
    }

    #[test]
    fn handle_destroyed_by_the_platform_is_not_destroyed_again() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(200, 200);
        let window = create_plain_window(
            &ctx,
            &WindowConfig::new(top, ControlId::new(1), Rect::new(0, 0, 10, 10)),
            NativeClass::Static,
        )
        .unwrap();
        let handle = window.handle();

        headless.destroy_window(top).unwrap();
        assert!(!window.is_alive());
        drop(window);

        assert_eq!(headless.destroy_count(handle), 1);
    }

    #[test]
    fn missing_parent_is_a_precondition_failure() {
        let (ctx, _headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let err = create_plain_window(
            &ctx,
            &WindowConfig::new(NativeHandle::NULL, ControlId::new(1), Rect::default()),
            NativeClass::Static,
        )
        .unwrap_err();
        assert!(err.is_precondition());
    }
}
