/*
 * The explicit context every component receives. It is built once at startup
 * and owns the platform seam, the handle registry, the current theme
 * resources and the metrics. Nothing in the crate reaches for a global: the
 * only link from native callbacks back to this object is installed through
 * `NativeApi::install_dispatcher`.
 */
use std::cell::RefCell;
use std::rc::Rc;

use crate::dispatch::MessageTarget;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::native::NativeApi;
use crate::registry::ControlRegistry;
use crate::resources::ThemeResources;
use crate::styling_primitives::Theme;
use crate::types::NativeHandle;

pub struct UiContext {
    api: Rc<dyn NativeApi>,
    pub(crate) registry: RefCell<ControlRegistry<dyn MessageTarget>>,
    theme: RefCell<Rc<ThemeResources>>,
    metrics: Metrics,
}

impl UiContext {
    pub fn new(api: Rc<dyn NativeApi>, theme: Theme, metrics: Metrics) -> Result<Rc<UiContext>> {
        let resources = ThemeResources::create(&api, theme)?;
        let ctx = Rc::new(UiContext {
            api,
            registry: RefCell::new(ControlRegistry::new()),
            theme: RefCell::new(Rc::new(resources)),
            metrics,
        });
        ctx.api.install_dispatcher(Rc::downgrade(&ctx));
        log::debug!("[UiContext] created");
        Ok(ctx)
    }

    pub fn api(&self) -> &Rc<dyn NativeApi> {
        &self.api
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /* Current theme resources. Controls keep the `Rc` until their next refresh. */
    pub fn theme(&self) -> Rc<ThemeResources> {
        Rc::clone(&self.theme.borrow())
    }

    pub fn is_registered(&self, handle: NativeHandle) -> bool {
        self.registry.borrow().contains(handle)
    }

    pub fn registered_count(&self) -> usize {
        self.registry.borrow().len()
    }

    pub(crate) fn register(&self, handle: NativeHandle, target: &Rc<dyn MessageTarget>) -> Result<()> {
        self.registry.borrow_mut().register(handle, target)
    }

    /*
     * Switches every live control to a new theme. All new resources are
     * created before anything changes; on failure the old theme stays in
     * place untouched. On success each registered target is refreshed before
     * returning, so the next paint of any control already uses the new theme.
     */
    pub fn apply_theme(&self, theme: Theme) -> Result<()> {
        let resources = ThemeResources::create(&self.api, theme)?;
        *self.theme.borrow_mut() = Rc::new(resources);

        let targets = self.registry.borrow().live_targets();
        log::debug!("[UiContext] theme switched, refreshing {} targets", targets.len());
        for (handle, target) in targets {
            if let Err(e) = target.refresh(self) {
                log::warn!("[UiContext] refresh of {handle:?} after theme switch failed: {e}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{FailPoint, HeadlessApi};
    use crate::styling_primitives::{Color, ColorRole};

    #[test]
    fn failed_theme_switch_keeps_the_old_theme() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let before = ctx.theme().brush(ColorRole::ButtonBackground);
        let live_before = headless.live_resource_count();
        headless.fail_on(FailPoint::CreateBrush, 3);

        let result = ctx.apply_theme(Theme::light());

        assert!(result.is_err());
        assert_eq!(ctx.theme().brush(ColorRole::ButtonBackground), before);
        assert_eq!(headless.live_resource_count(), live_before);
    }

    #[test]
    fn theme_switch_releases_old_resources() {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let live_before = headless.live_resource_count();
        let red = Color::rgb(200, 0, 0);

        ctx.apply_theme(Theme::dark().with_color(ColorRole::ButtonHover, red))
            .unwrap();

        assert_eq!(ctx.theme().color(ColorRole::ButtonHover), red);
        // ButtonHover had a color shared with ComboHover; now it has its own brush.
        assert_eq!(headless.live_resource_count(), live_before + 1);
    }
}
