/*
 * Per-control behavior objects and the plumbing every control kind shares.
 *
 * A `SubclassObject` is what the registry points at for a subclassed control.
 * It wraps one `ControlBehavior` (the kind-specific part, implemented under
 * `controls/`) in a `RefCell`; a message that arrives while the behavior is
 * already borrowed is a synchronous nested delivery and is handed back to the
 * native default handler instead of panicking.
 */
use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{AnimationEffect, AnimationState, VisualState};
use crate::context::UiContext;
use crate::controls::paint_router::{PaintRoute, resolve_paint_route};
use crate::dispatch::{MessageTarget, Outcome};
use crate::error::{PlatformError, Result};
use crate::native::{ANIMATION_TIMER_ID, Disposition, NativeApi, NativeMessage, ResourceId};
use crate::resources::{OwnedResource, ThemeResources};
use crate::styling_primitives::{Color, ColorRole, FontDescription, FontRole};
use crate::types::{ControlId, ControlKind, NativeHandle, Point};

/// Borrowed view of the context for one control while it handles a message.
pub(crate) struct ControlContext<'a> {
    pub ui: &'a UiContext,
    pub handle: NativeHandle,
    pub id: ControlId,
}

impl ControlContext<'_> {
    pub fn api(&self) -> &dyn NativeApi {
        self.ui.api().as_ref()
    }

    /* Hit test against the control's own client area. */
    pub fn is_inside(&self, point: Point) -> bool {
        match self.api().client_size(self.handle) {
            Ok((w, h)) => point.x >= 0 && point.y >= 0 && point.x < w && point.y < h,
            Err(e) => {
                log::warn!("Subclass: client size of {:?} unavailable: {e}", self.handle);
                false
            }
        }
    }

    /*
     * Performs the platform side of state machine effects. Timer and tracking
     * failures only degrade the animation, so they are logged and skipped.
     */
    pub fn apply_effects(&self, effects: &[AnimationEffect]) -> Result<()> {
        let api = self.api();
        let metrics = self.ui.metrics();
        for effect in effects {
            match effect {
                AnimationEffect::TrackPointerLeave => {
                    if let Err(e) = api.track_pointer_leave(self.handle) {
                        log::warn!("Subclass: leave tracking for {:?} failed: {e}", self.handle);
                    }
                }
                AnimationEffect::StartFrameTimer => {
                    if let Err(e) =
                        api.set_timer(self.handle, ANIMATION_TIMER_ID, metrics.frame_interval_ms)
                    {
                        log::warn!("Subclass: frame timer for {:?} failed: {e}", self.handle);
                    }
                }
                AnimationEffect::StopFrameTimer => api.kill_timer(self.handle, ANIMATION_TIMER_ID),
                AnimationEffect::Invalidate => api.invalidate(self.handle),
                AnimationEffect::CapturePointer => api.set_capture(self.handle),
                AnimationEffect::ReleasePointer => api.release_capture(),
                AnimationEffect::NotifyOwner => {
                    log::debug!("Subclass: click on control {} ({:?})", self.id.raw(), self.handle);
                    api.notify_owner(self.handle, self.id)?;
                }
            }
        }
        Ok(())
    }
}

/*
 * The kind-specific half of a subclassed control. Timers, paint routing and
 * reentrancy are handled by `SubclassObject`; implementors only see the
 * messages that concern them.
 */
pub(crate) trait ControlBehavior {
    fn kind(&self) -> ControlKind;

    fn animation(&self) -> Option<&AnimationState>;

    fn animation_mut(&mut self) -> Option<&mut AnimationState>;

    fn handle_input(&mut self, cx: &ControlContext<'_>, message: &NativeMessage) -> Result<Outcome>;

    /* Owner-drawn paint of the whole client area, or the overlay for native-painted kinds. */
    fn paint(&mut self, cx: &ControlContext<'_>) -> Result<()>;

    fn visuals_mut(&mut self) -> &mut ControlVisuals;

    /* The native control now exists. */
    fn attached(&mut self, _handle: NativeHandle) -> Result<()> {
        Ok(())
    }

    /* Re-fetch theme resources and per-instance overrides. */
    fn refresh(&mut self, cx: &ControlContext<'_>) -> Result<()> {
        self.visuals_mut().refresh(cx.ui)
    }

    /* Drop per-instance native resources and group memberships. */
    fn release(&mut self, _handle: NativeHandle) {
        self.visuals_mut().release();
    }
}

pub struct SubclassObject {
    handle: NativeHandle,
    id: ControlId,
    kind: ControlKind,
    behavior: RefCell<Box<dyn ControlBehavior>>,
}

impl SubclassObject {
    pub(crate) fn new(handle: NativeHandle, id: ControlId, behavior: Box<dyn ControlBehavior>) -> Rc<Self> {
        Rc::new(Self {
            handle,
            id,
            kind: behavior.kind(),
            behavior: RefCell::new(behavior),
        })
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    pub fn visual_state(&self) -> Option<VisualState> {
        self.animation_snapshot().map(|a| a.committed())
    }

    pub fn animation_snapshot(&self) -> Option<AnimationState> {
        self.behavior.try_borrow().ok()?.animation().cloned()
    }

    /*
     * Stops the frame timer and releases per-instance resources. Runs before
     * the native window is destroyed, and again harmlessly if the platform
     * destroys the window first.
     */
    pub(crate) fn shutdown(&self, api: &dyn NativeApi) {
        let Ok(mut behavior) = self.behavior.try_borrow_mut() else {
            log::warn!("Subclass: {:?} busy during shutdown, resources kept", self.handle);
            return;
        };
        if let Some(animation) = behavior.animation_mut() {
            for effect in animation.reset() {
                match effect {
                    AnimationEffect::StopFrameTimer => api.kill_timer(self.handle, ANIMATION_TIMER_ID),
                    AnimationEffect::ReleasePointer => api.release_capture(),
                    _ => {}
                }
            }
        }
        api.kill_timer(self.handle, ANIMATION_TIMER_ID);
        behavior.release(self.handle);
    }

    fn route(
        &self,
        behavior: &mut dyn ControlBehavior,
        cx: &ControlContext<'_>,
        message: &NativeMessage,
    ) -> Result<Outcome> {
        match message {
            NativeMessage::Timer(ANIMATION_TIMER_ID) => {
                let effects = match behavior.animation_mut() {
                    Some(animation) => animation.frame_tick(),
                    None => vec![AnimationEffect::StopFrameTimer],
                };
                log::trace!("Subclass: frame tick on {:?}", cx.handle);
                cx.apply_effects(&effects)?;
                Ok(Outcome::consumed())
            }
            NativeMessage::Paint | NativeMessage::PaintOverlay | NativeMessage::EraseBackground => {
                match resolve_paint_route(behavior.kind(), message) {
                    PaintRoute::OwnerDrawn | PaintRoute::Overlay => {
                        behavior.paint(cx)?;
                        Ok(Outcome::consumed())
                    }
                    PaintRoute::NativeThenOverlay => {
                        Ok(Outcome::with(Disposition::ForwardThenOverlay))
                    }
                    PaintRoute::Suppress => Ok(Outcome::consumed()),
                    PaintRoute::Native => Ok(Outcome::forward()),
                }
            }
            _ => behavior.handle_input(cx, message),
        }
    }
}

impl MessageTarget for SubclassObject {
    fn handle_message(
        &self,
        ctx: &UiContext,
        handle: NativeHandle,
        message: &NativeMessage,
    ) -> Result<Outcome> {
        let Ok(mut behavior) = self.behavior.try_borrow_mut() else {
            log::trace!("Subclass: nested {message:?} on {handle:?} forwarded");
            return Ok(Outcome::forward());
        };
        let cx = ControlContext {
            ui: ctx,
            handle,
            id: self.id,
        };
        self.route(&mut **behavior, &cx, message)
    }

    fn refresh(&self, ctx: &UiContext) -> Result<()> {
        let cx = ControlContext {
            ui: ctx,
            handle: self.handle,
            id: self.id,
        };
        let mut behavior = self.behavior.try_borrow_mut().map_err(|_| {
            PlatformError::OperationFailed(format!(
                "{:?} is handling a message and cannot refresh",
                self.handle
            ))
        })?;
        behavior.refresh(&cx)?;
        ctx.api().invalidate(self.handle);
        Ok(())
    }

    fn teardown(&self, ctx: &UiContext, _handle: NativeHandle) {
        self.shutdown(ctx.api().as_ref());
    }
}

/*
 * Theme-derived visuals every control kind carries: the shared theme
 * resources it currently paints with, plus an optional per-instance font
 * override that this control alone owns.
 */
pub(crate) struct ControlVisuals {
    theme: Rc<ThemeResources>,
    font_role: FontRole,
    font_override: Option<(FontDescription, OwnedResource)>,
}

impl ControlVisuals {
    pub fn new(ui: &UiContext, font_role: FontRole, font_override: Option<&FontDescription>) -> Result<Self> {
        let theme = ui.theme();
        let font_override = match font_override {
            Some(desc) => {
                let merged = theme.theme().font(font_role).merged_with(desc);
                let font = OwnedResource::font(ui.api(), &merged)?;
                Some((desc.clone(), font))
            }
            None => None,
        };
        Ok(Self {
            theme,
            font_role,
            font_override,
        })
    }

    pub fn brush(&self, role: ColorRole) -> Option<ResourceId> {
        self.theme.brush(role)
    }

    pub fn color(&self, role: ColorRole) -> Color {
        self.theme.color(role)
    }

    pub fn font(&self) -> Option<ResourceId> {
        match &self.font_override {
            Some((_, font)) => Some(font.id()),
            None => self.theme.font(self.font_role),
        }
    }

    /*
     * Swaps in the context's current theme. A font override is rebuilt
     * against the new theme font; the old one is only dropped once the new
     * one exists.
     */
    pub fn refresh(&mut self, ui: &UiContext) -> Result<()> {
        let theme = ui.theme();
        if let Some(desc) = self.font_override.as_ref().map(|(d, _)| d.clone()) {
            let merged = theme.theme().font(self.font_role).merged_with(&desc);
            let font = OwnedResource::font(ui.api(), &merged)?;
            self.font_override = Some((desc, font));
        }
        self.theme = theme;
        Ok(())
    }

    /* Replaces the font override. On failure the previous font stays live. */
    pub fn set_font_override(&mut self, ui: &UiContext, desc: Option<FontDescription>) -> Result<()> {
        self.font_override = match desc {
            Some(desc) => {
                let merged = self.theme.theme().font(self.font_role).merged_with(&desc);
                let font = OwnedResource::font(ui.api(), &merged)?;
                Some((desc, font))
            }
            None => None,
        };
        Ok(())
    }

    pub fn release(&mut self) {
        self.font_override = None;
    }
}

impl SubclassObject {
    pub(crate) fn set_font_override(&self, ctx: &UiContext, desc: Option<FontDescription>) -> Result<()> {
        let mut behavior = self.behavior.try_borrow_mut().map_err(|_| {
            PlatformError::OperationFailed(format!(
                "{:?} is handling a message and cannot be reconfigured",
                self.handle
            ))
        })?;
        behavior.visuals_mut().set_font_override(ctx, desc)?;
        ctx.api().invalidate(self.handle);
        Ok(())
    }
}
