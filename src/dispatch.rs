/*
 * Single entry point for native events. The platform binding translates a
 * native message and calls `UiContext::dispatch`; the registry resolves the
 * owner, the owner handles the message, and any follow-up work it requested
 * runs after the owner's own state has been released.
 */
use crate::context::UiContext;
use crate::error::Result;
use crate::native::{Disposition, NativeMessage};
use crate::types::NativeHandle;

pub(crate) trait MessageTarget {
    fn handle_message(
        &self,
        ctx: &UiContext,
        handle: NativeHandle,
        message: &NativeMessage,
    ) -> Result<Outcome>;

    /* Re-read configuration from the context and redraw. */
    fn refresh(&self, ctx: &UiContext) -> Result<()>;

    /* The native window died while this target was still alive. */
    fn teardown(&self, ctx: &UiContext, handle: NativeHandle);
}

/// A message to deliver once the current handler has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FollowUp {
    pub handle: NativeHandle,
    pub message: NativeMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub disposition: Disposition,
    pub follow_ups: Vec<FollowUp>,
}

impl Outcome {
    pub fn consumed() -> Self {
        Self::with(Disposition::Consumed)
    }

    pub fn forward() -> Self {
        Self::with(Disposition::Forward)
    }

    pub fn with(disposition: Disposition) -> Self {
        Self {
            disposition,
            follow_ups: Vec::new(),
        }
    }

    pub fn then(mut self, handle: NativeHandle, message: NativeMessage) -> Self {
        self.follow_ups.push(FollowUp { handle, message });
        self
    }
}

impl UiContext {
    pub fn dispatch(&self, handle: NativeHandle, message: NativeMessage) -> Disposition {
        if message == NativeMessage::FinalDestroy {
            self.handle_final_destroy(handle);
            return Disposition::Forward;
        }

        let target = self.registry.borrow().lookup(handle);
        let Some(target) = target else {
            return Disposition::Forward;
        };

        let outcome = match target.handle_message(self, handle, &message) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("[Dispatch] {message:?} on {handle:?} failed: {e}");
                Outcome::forward()
            }
        };
        drop(target);

        for follow_up in outcome.follow_ups {
            log::trace!("[Dispatch] follow-up {:?} -> {:?}", follow_up.message, follow_up.handle);
            self.dispatch(follow_up.handle, follow_up.message);
        }
        outcome.disposition
    }

    /*
     * Unregisters the handle. A target that is still alive at this point
     * means its owner never dropped it before the platform destroyed the
     * window: log the leak and stop anything that would keep firing.
     */
    fn handle_final_destroy(&self, handle: NativeHandle) {
        let removed = self.registry.borrow_mut().unregister(handle);
        let Some(weak) = removed else {
            return;
        };
        if let Some(target) = weak.upgrade() {
            log::warn!(
                "[Dispatch] {handle:?} destroyed by the platform while its control object is alive"
            );
            target.teardown(self, handle);
        }
    }
}
