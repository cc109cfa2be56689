/*
 * Ownership of native drawing resources. Every brush and font is held by
 * exactly one `OwnedResource`, which releases it on drop. Theme resources are
 * shared read-only through `Rc`, so a control painting with an old theme keeps
 * its brushes alive until it has been refreshed.
 */
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::native::{NativeApi, ResourceId, ResourceKind};
use crate::styling_primitives::{Color, ColorRole, FontDescription, FontRole, Theme};

pub struct OwnedResource {
    api: Rc<dyn NativeApi>,
    id: ResourceId,
    kind: ResourceKind,
}

impl OwnedResource {
    pub(crate) fn brush(api: &Rc<dyn NativeApi>, color: Color) -> Result<Self> {
        let id = api.create_brush(color).inspect_err(|e| {
            log::error!("[Resources] brush for {color:?} failed: {e}");
        })?;
        Ok(Self {
            api: Rc::clone(api),
            id,
            kind: ResourceKind::Brush,
        })
    }

    pub(crate) fn font(api: &Rc<dyn NativeApi>, font: &FontDescription) -> Result<Self> {
        let id = api.create_font(font).inspect_err(|e| {
            log::error!("[Resources] font {font:?} failed: {e}");
        })?;
        Ok(Self {
            api: Rc::clone(api),
            id,
            kind: ResourceKind::Font,
        })
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl std::fmt::Debug for OwnedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedResource")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for OwnedResource {
    fn drop(&mut self) {
        if let Err(e) = self.api.release_resource(self.id, self.kind) {
            log::error!("[Resources] failed to release {:?} {:?}: {e}", self.kind, self.id);
            debug_assert!(false, "native resource release failed: {e}");
        }
    }
}

/*
 * Brushes and fonts for one theme. One brush exists per distinct color, so
 * roles sharing a color share the native object.
 */
pub struct ThemeResources {
    theme: Theme,
    brushes: HashMap<ColorRole, Rc<OwnedResource>>,
    fonts: HashMap<FontRole, Rc<OwnedResource>>,
}

impl ThemeResources {
    /*
     * All or nothing: if any allocation fails, everything created so far is
     * dropped (and released) before the error is returned.
     */
    pub(crate) fn create(api: &Rc<dyn NativeApi>, theme: Theme) -> Result<Self> {
        let mut by_color: HashMap<Color, Rc<OwnedResource>> = HashMap::new();
        let mut brushes = HashMap::new();
        for role in ColorRole::ALL {
            let color = theme.color(role);
            let brush = match by_color.get(&color) {
                Some(existing) => Rc::clone(existing),
                None => {
                    let created = Rc::new(OwnedResource::brush(api, color)?);
                    by_color.insert(color, Rc::clone(&created));
                    created
                }
            };
            brushes.insert(role, brush);
        }

        let mut fonts = HashMap::new();
        for role in FontRole::ALL {
            let font = OwnedResource::font(api, &theme.font(role))?;
            fonts.insert(role, Rc::new(font));
        }

        log::debug!(
            "[Resources] theme resources ready: {} brushes, {} fonts",
            by_color.len(),
            fonts.len()
        );
        Ok(Self {
            theme,
            brushes,
            fonts,
        })
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn color(&self, role: ColorRole) -> Color {
        self.theme.color(role)
    }

    pub fn brush(&self, role: ColorRole) -> Option<ResourceId> {
        self.brushes.get(&role).map(|b| b.id())
    }

    pub fn font(&self, role: FontRole) -> Option<ResourceId> {
        self.fonts.get(&role).map(|f| f.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{FailPoint, HeadlessApi};

    fn api() -> (Rc<HeadlessApi>, Rc<dyn NativeApi>) {
        let headless = Rc::new(HeadlessApi::new());
        let api: Rc<dyn NativeApi> = headless.clone();
        (headless, api)
    }

    #[test]
    fn owned_resource_is_released_on_drop() {
        let (headless, api) = api();
        let brush = OwnedResource::brush(&api, Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(headless.live_resource_count(), 1);

        drop(brush);

        assert_eq!(headless.live_resource_count(), 0);
    }

    #[test]
    fn roles_with_equal_colors_share_one_brush() {
        let (headless, api) = api();
        let theme = Theme::dark()
            .with_color(ColorRole::ButtonHover, Color::rgb(9, 9, 9))
            .with_color(ColorRole::ComboHover, Color::rgb(9, 9, 9));

        let resources = ThemeResources::create(&api, theme).unwrap();

        assert_eq!(
            resources.brush(ColorRole::ButtonHover),
            resources.brush(ColorRole::ComboHover)
        );
        drop(resources);
        assert_eq!(headless.live_resource_count(), 0);
    }

    #[test]
    fn failed_theme_creation_leaves_nothing_behind() {
        let (headless, api) = api();
        headless.fail_on(FailPoint::CreateFont, 1);

        let result = ThemeResources::create(&api, Theme::dark());

        assert!(matches!(
            result,
            Err(crate::error::PlatformError::ResourceCreation { .. })
        ));
        assert_eq!(headless.live_resource_count(), 0);
    }
}
