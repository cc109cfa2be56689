/*
 * Scrollable container: a client window holding uniquely identified child
 * windows, with an optional owner-drawn vertical scrollbar beside it.
 *
 * The container keeps the scroll state in content coordinates. Scrolling
 * moves the children (by blitting the client area or by one atomic batch of
 * child moves) and never changes their content position. The client window
 * is registered like a control so wheel input and scrollbar requests reach
 * the container through the dispatcher, and it hands child notifications on
 * to its own parent so children behave as if they sat directly in the
 * application window.
 */
use std::cell::{Cell, RefCell, RefMut};
use std::rc::Rc;

use crate::context::UiContext;
use crate::controls::scrollbar_handler::{ScrollbarConfig, create_scrollbar};
use crate::dispatch::{MessageTarget, Outcome};
use crate::error::{PlatformError, Result};
use crate::native::{CreateParams, Disposition, NativeApi, NativeMessage, WindowMove};
use crate::scroll::{ScrollAction, ScrollState, content_extent, wheel_scroll_amount};
use crate::types::{ControlId, NativeClass, NativeHandle, Rect, WindowConfig};
use crate::window::{Window, WindowHandle};

const SCROLLBAR_CONTROL_ID: ControlId = ControlId::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    pub parent: NativeHandle,
    pub id: ControlId,
    pub bounds: Rect,
    pub with_scrollbar: bool,
    pub hide_scrollbar_always: bool,
    pub auto_update: bool,
    /// Overrides `Metrics::scroll_step` for this container.
    pub scroll_step: Option<i32>,
    /// Overrides `Metrics::bottom_padding` for this container.
    pub bottom_padding: Option<i32>,
    /// Scroll by moving children in a batch instead of blitting the client area.
    pub use_alternate_scroll: bool,
}

impl ContainerConfig {
    pub fn new(parent: NativeHandle, id: ControlId, bounds: Rect) -> Self {
        Self {
            parent,
            id,
            bounds,
            with_scrollbar: true,
            hide_scrollbar_always: false,
            auto_update: true,
            scroll_step: None,
            bottom_padding: None,
            use_alternate_scroll: false,
        }
    }
}

struct ContainerState {
    children: Vec<(ControlId, Window)>,
    scrollbar: Option<Window>,
    client: WindowHandle,
    scroll: Rc<Cell<ScrollState>>,
    bounds: Rect,
    hide_scrollbar_always: bool,
    auto_update: bool,
    step: i32,
    padding: i32,
    alternate_scroll: bool,
}

impl ContainerState {
    fn client(&self) -> NativeHandle {
        self.client.raw()
    }

    fn maximum(&self, api: &dyn NativeApi) -> Result<i32> {
        let position = self.scroll.get().position;
        let mut rects = Vec::with_capacity(self.children.len());
        for (_, child) in &self.children {
            rects.push(api.window_rect(child.handle())?);
        }
        Ok(content_extent(rects, position, self.padding))
    }

    /* Moves every child so that the scroll position grows by `delta`. */
    fn move_children(&self, api: &dyn NativeApi, delta: i32, use_alternate: bool) -> Result<()> {
        if use_alternate {
            let mut moves = Vec::with_capacity(self.children.len());
            for (_, child) in &self.children {
                let rect = api.window_rect(child.handle())?;
                moves.push(WindowMove {
                    handle: child.handle(),
                    bounds: rect.offset_y(-delta),
                });
            }
            api.apply_positions(&moves)
        } else {
            api.scroll_children(self.client(), -delta)
        }
    }

    /*
     * Recomputes maximum and page from the children and the client height,
     * then moves to `desired` (or keeps the current position) clamped into
     * the new range.
     */
    fn recompute_range(&self, api: &dyn NativeApi, desired: Option<i32>) -> Result<ScrollState> {
        let current = self.scroll.get();
        let maximum = self.maximum(api)?;
        let mut next = current.with_range(maximum, self.bounds.height);
        if let Some(desired) = desired {
            next.position = next.clamp_position(desired);
        }
        let delta = next.position - current.position;
        if delta != 0 {
            log::debug!("[Container] range change moves position by {delta}");
            self.move_children(api, delta, true)?;
        }
        self.scroll.set(next);
        self.sync_scrollbar(api, &next)?;
        Ok(next)
    }

    fn sync_scrollbar(&self, api: &dyn NativeApi, state: &ScrollState) -> Result<()> {
        if let Some(scrollbar) = &self.scrollbar {
            let visible = !self.hide_scrollbar_always && state.needs_scrollbar();
            api.set_visible(scrollbar.handle(), visible)?;
            api.invalidate(scrollbar.handle());
        }
        Ok(())
    }

    fn scroll_by(&self, api: &dyn NativeApi, amount: i32, use_alternate: bool) -> Result<i32> {
        let current = self.scroll.get();
        let target = current.clamp_position(current.position.saturating_add(amount));
        let delta = target - current.position;
        if delta == 0 {
            return Ok(0);
        }
        self.move_children(api, delta, use_alternate)?;
        self.scroll.set(ScrollState {
            position: target,
            ..current
        });
        if let Some(scrollbar) = &self.scrollbar {
            api.invalidate(scrollbar.handle());
        }
        log::trace!("[Container] scrolled by {delta} to {target}");
        Ok(delta)
    }
}

pub(crate) struct ContainerCell {
    state: RefCell<ContainerState>,
}

impl ContainerCell {
    fn state(&self) -> Result<RefMut<'_, ContainerState>> {
        self.state.try_borrow_mut().map_err(|_| {
            PlatformError::OperationFailed("container is busy handling another call".to_string())
        })
    }

    fn handle_wheel(&self, ctx: &UiContext, delta: i32) -> Result<i32> {
        let st = self.state()?;
        let amount = wheel_scroll_amount(delta, st.step);
        st.scroll_by(ctx.api().as_ref(), amount, st.alternate_scroll)
    }

    fn handle_scroll_action(&self, ctx: &UiContext, action: ScrollAction) -> Result<i32> {
        let st = self.state()?;
        let current = st.scroll.get();
        let amount = current.position_for(action, st.step) - current.position;
        st.scroll_by(ctx.api().as_ref(), amount, st.alternate_scroll)
    }
}

impl MessageTarget for ContainerCell {
    fn handle_message(
        &self,
        ctx: &UiContext,
        _handle: NativeHandle,
        message: &NativeMessage,
    ) -> Result<Outcome> {
        match message {
            NativeMessage::Wheel { delta } => {
                self.handle_wheel(ctx, *delta)?;
                Ok(Outcome::consumed())
            }
            NativeMessage::VerticalScroll(action) => {
                self.handle_scroll_action(ctx, *action)?;
                Ok(Outcome::consumed())
            }
            NativeMessage::ChildNotification => Ok(Outcome::with(Disposition::ForwardToParent)),
            _ => Ok(Outcome::forward()),
        }
    }

    fn refresh(&self, ctx: &UiContext) -> Result<()> {
        let st = self.state()?;
        ctx.api().invalidate(st.client());
        Ok(())
    }

    fn teardown(&self, _ctx: &UiContext, handle: NativeHandle) {
        log::warn!("[Container] client {handle:?} destroyed while the container is alive");
    }
}

/*
 * A container starts out uncreated; every operation before `create` fails
 * with a precondition error.
 */
#[derive(Default)]
pub struct Container {
    cell: Option<Rc<ContainerCell>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_created(&self) -> bool {
        self.cell.is_some()
    }

    fn cell(&self) -> Result<&Rc<ContainerCell>> {
        self.cell.as_ref().ok_or_else(|| {
            PlatformError::Precondition("container has not been created".to_string())
        })
    }

    pub fn create(&mut self, ctx: &UiContext, config: &ContainerConfig) -> Result<()> {
        if self.cell.is_some() {
            return Err(PlatformError::Precondition(format!(
                "container {} already created",
                config.id.raw()
            )));
        }
        if config.parent.is_null() {
            return Err(PlatformError::Precondition(format!(
                "container {} has no parent window",
                config.id.raw()
            )));
        }
        let metrics = ctx.metrics();
        let step = config.scroll_step.unwrap_or(metrics.scroll_step);
        let padding = config.bottom_padding.unwrap_or(metrics.bottom_padding);
        if step <= 0 || padding < 0 {
            return Err(PlatformError::Precondition(format!(
                "container {}: scroll step {step} and padding {padding} are invalid",
                config.id.raw()
            )));
        }

        let client = WindowHandle::create(
            ctx.api(),
            &CreateParams {
                class: NativeClass::Static,
                parent: config.parent,
                bounds: config.bounds,
                id: config.id,
                text: String::new(),
                visible: true,
                tab_stop: false,
                clip_children: true,
            },
        )?;
        let client_handle = client.raw();
        let scroll = Rc::new(Cell::new(ScrollState::new(padding, config.bounds.height)));

        let scrollbar = if config.with_scrollbar {
            let sb_config = WindowConfig::new(config.parent, SCROLLBAR_CONTROL_ID, Rect::default()).hidden();
            Some(create_scrollbar(
                ctx,
                &sb_config,
                ScrollbarConfig {
                    state: Rc::clone(&scroll),
                    target: client_handle,
                },
            )?)
        } else {
            None
        };

        let cell = Rc::new(ContainerCell {
            state: RefCell::new(ContainerState {
                children: Vec::new(),
                scrollbar,
                client,
                scroll,
                bounds: config.bounds,
                hide_scrollbar_always: config.hide_scrollbar_always,
                auto_update: config.auto_update,
                step,
                padding,
                alternate_scroll: config.use_alternate_scroll,
            }),
        });
        ctx.api().attach_subclass(client_handle)?;
        let target: Rc<dyn MessageTarget> = cell.clone();
        ctx.register(client_handle, &target)?;
        self.cell = Some(cell);

        let b = config.bounds;
        self.update_container_dimensions(
            ctx,
            b.x,
            b.y,
            b.width,
            b.height,
            config.hide_scrollbar_always,
            false,
        )?;
        log::debug!(
            "[Container] {} created with client {client_handle:?}",
            config.id.raw()
        );
        Ok(())
    }

    /* Handle children must be created under. */
    pub fn client(&self) -> Result<NativeHandle> {
        Ok(self.cell()?.state()?.client())
    }

    pub fn scrollbar(&self) -> Result<Option<NativeHandle>> {
        Ok(self.cell()?.state()?.scrollbar.as_ref().map(Window::handle))
    }

    pub fn scroll_state(&self) -> Result<ScrollState> {
        Ok(self.cell()?.state()?.scroll.get())
    }

    /*
     * Places the client window and the scrollbar in one batch and recomputes
     * the scroll range. Calling it again with the same arguments changes
     * nothing.
     */
    #[allow(clippy::too_many_arguments)]
    pub fn update_container_dimensions(
        &self,
        ctx: &UiContext,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        hide_scrollbar_always: bool,
        reset_scroll_position: bool,
    ) -> Result<ScrollState> {
        if width < 0 || height < 0 {
            return Err(PlatformError::Precondition(format!(
                "container size {width}x{height} is negative"
            )));
        }
        let mut st = self.cell()?.state()?;
        let api = ctx.api().as_ref();
        st.bounds = Rect::new(x, y, width, height);
        st.hide_scrollbar_always = hide_scrollbar_always;

        let bar_width = if st.scrollbar.is_some() && !hide_scrollbar_always {
            ctx.metrics().scrollbar_width.min(width)
        } else {
            0
        };
        let client_rect = Rect::new(x, y, width - bar_width, height);
        let mut moves = vec![WindowMove {
            handle: st.client(),
            bounds: client_rect,
        }];
        if let Some(scrollbar) = &st.scrollbar {
            moves.push(WindowMove {
                handle: scrollbar.handle(),
                bounds: Rect::new(client_rect.right(), y, bar_width, height),
            });
        }
        api.apply_positions(&moves)?;

        let desired = reset_scroll_position.then_some(0);
        st.recompute_range(api, desired)
    }

    /*
     * Takes ownership of a child created under `client()`. Fails on a
     * duplicate ID, and with an invariant violation if the child is not a
     * direct descendant of the client window.
     */
    pub fn add_window(&self, ctx: &UiContext, child: Window) -> Result<()> {
        let mut st = self.cell()?.state()?;
        let api = ctx.api().as_ref();
        let id = child.id();
        if st.children.iter().any(|(existing, _)| *existing == id) {
            return Err(PlatformError::Precondition(format!(
                "child ID {} already exists in the container",
                id.raw()
            )));
        }
        let parent = api.parent_of(child.handle());
        if parent != Some(st.client()) {
            log::error!(
                "[Container] child {} has parent {parent:?}, expected client {:?}",
                id.raw(),
                st.client()
            );
            return Err(PlatformError::InvariantViolation(format!(
                "child {} is not owned by the container client",
                id.raw()
            )));
        }

        let position = st.scroll.get().position;
        let handle = child.handle();
        st.children.push((id, child));
        if st.auto_update {
            if position != 0 {
                let rect = api.window_rect(handle)?;
                api.apply_positions(&[WindowMove {
                    handle,
                    bounds: rect.offset_y(-position),
                }])?;
            }
            st.recompute_range(api, None)?;
        }
        log::debug!("[Container] added child {}", id.raw());
        Ok(())
    }

    /* Removes and destroys the child; the position is clamped into the new range. */
    pub fn remove_window(&self, ctx: &UiContext, id: ControlId) -> Result<()> {
        let removed = {
            let mut st = self.cell()?.state()?;
            let Some(index) = st.children.iter().position(|(existing, _)| *existing == id) else {
                return Err(PlatformError::Precondition(format!(
                    "child ID {} does not exist in the container",
                    id.raw()
                )));
            };
            let (_, window) = st.children.remove(index);
            if st.auto_update {
                st.recompute_range(ctx.api().as_ref(), None)?;
            }
            window
        };
        log::debug!("[Container] removed child {}", id.raw());
        drop(removed);
        Ok(())
    }

    pub fn find_window(&self, id: ControlId) -> Result<Option<NativeHandle>> {
        self.with_window(id, Window::handle)
    }

    pub fn with_window<R>(&self, id: ControlId, f: impl FnOnce(&Window) -> R) -> Result<Option<R>> {
        let st = self.cell()?.state()?;
        Ok(st
            .children
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, window)| f(window)))
    }

    /* Child IDs in insertion order. */
    pub fn child_ids(&self) -> Result<Vec<ControlId>> {
        let st = self.cell()?.state()?;
        Ok(st.children.iter().map(|(id, _)| *id).collect())
    }

    pub fn get_maximum_vertical_scrolling_position(&self, ctx: &UiContext) -> Result<i32> {
        self.cell()?.state()?.maximum(ctx.api().as_ref())
    }

    /*
     * Changes the scroll position by `amount` (children move by `-amount`),
     * clamped to the range. Returns the change actually applied.
     */
    pub fn scroll_container(&self, ctx: &UiContext, amount: i32, use_alternate_method: bool) -> Result<i32> {
        self.cell()?
            .state()?
            .scroll_by(ctx.api().as_ref(), amount, use_alternate_method)
    }

    pub fn handle_wheel(&self, ctx: &UiContext, delta: i32) -> Result<i32> {
        self.cell()?.handle_wheel(ctx, delta)
    }

    pub fn handle_scroll_action(&self, ctx: &UiContext, action: ScrollAction) -> Result<i32> {
        self.cell()?.handle_scroll_action(ctx, action)
    }

    pub fn set_auto_update(&self, enabled: bool) -> Result<()> {
        self.cell()?.state()?.auto_update = enabled;
        Ok(())
    }

    pub fn recalculate_scroll_range(&self, ctx: &UiContext) -> Result<ScrollState> {
        self.cell()?.state()?.recompute_range(ctx.api().as_ref(), None)
    }

    /* Refreshes every child and the scrollbar, then redraws the client. */
    pub fn refresh(&self, ctx: &UiContext) -> Result<()> {
        let st = self.cell()?.state()?;
        for (_, child) in &st.children {
            child.refresh(ctx)?;
        }
        if let Some(scrollbar) = &st.scrollbar {
            scrollbar.refresh(ctx)?;
        }
        ctx.api().invalidate(st.client());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessApi;
    use crate::metrics::Metrics;
    use crate::styling_primitives::Theme;
    use crate::window::create_plain_window;

    struct Fixture {
        ctx: Rc<UiContext>,
        headless: Rc<HeadlessApi>,
        container: Container,
    }

    fn fixture() -> Fixture {
        let (ctx, headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        let top = headless.create_top_level(400, 300);
        let mut container = Container::new();
        container
            .create(
                &ctx,
                &ContainerConfig::new(top, ControlId::new(500), Rect::new(0, 0, 200, 100)),
            )
            .unwrap();
        Fixture {
            ctx,
            headless,
            container,
        }
    }

    fn add_child(f: &Fixture, id: i32, y: i32) -> NativeHandle {
        let client = f.container.client().unwrap();
        let child = create_plain_window(
            &f.ctx,
            &WindowConfig::new(client, ControlId::new(id), Rect::new(0, y, 150, 50)),
            NativeClass::Static,
        )
        .unwrap();
        let handle = child.handle();
        f.container.add_window(&f.ctx, child).unwrap();
        handle
    }

    #[test]
    fn operations_before_create_are_precondition_failures() {
        let container = Container::new();
        let (ctx, _headless) = HeadlessApi::context(Theme::dark(), Metrics::default()).unwrap();
        assert!(container.child_ids().unwrap_err().is_precondition());
        assert!(
            container
                .get_maximum_vertical_scrolling_position(&ctx)
                .unwrap_err()
                .is_precondition()
        );
        assert!(container.scroll_container(&ctx, 10, false).unwrap_err().is_precondition());
    }

    #[test]
    fn empty_container_maximum_is_the_padding() {
        let f = fixture();
        assert_eq!(f.container.get_maximum_vertical_scrolling_position(&f.ctx).unwrap(), 10);
        let bar = f.container.scrollbar().unwrap().unwrap();
        assert!(!f.headless.window(bar).unwrap().visible);
    }

    #[test]
    fn maximum_follows_children_and_removal() {
        let f = fixture();
        let mut maxima = Vec::new();
        for (id, y) in [(1, 0), (2, 100), (3, 200)] {
            add_child(&f, id, y);
            maxima.push(f.container.get_maximum_vertical_scrolling_position(&f.ctx).unwrap());
        }
        assert_eq!(maxima, vec![60, 160, 260]);

        f.container.remove_window(&f.ctx, ControlId::new(3)).unwrap();

        assert_eq!(f.container.get_maximum_vertical_scrolling_position(&f.ctx).unwrap(), 160);
        assert_eq!(f.container.scroll_state().unwrap().max, 160);
    }

    #[test]
    fn scrollbar_shows_only_when_content_overflows() {
        let f = fixture();
        let bar = f.container.scrollbar().unwrap().unwrap();
        add_child(&f, 1, 0);
        assert!(!f.headless.window(bar).unwrap().visible);

        add_child(&f, 2, 100);

        assert!(f.headless.window(bar).unwrap().visible);
        assert_eq!(
            f.headless.window(bar).unwrap().bounds,
            Rect::new(188, 0, 12, 100)
        );
    }

    #[test]
    fn add_then_remove_restores_the_key_set() {
        let f = fixture();
        add_child(&f, 1, 0);
        add_child(&f, 2, 60);
        let before = f.container.child_ids().unwrap();

        let handle = add_child(&f, 7, 120);
        f.container.remove_window(&f.ctx, ControlId::new(7)).unwrap();

        assert_eq!(f.container.child_ids().unwrap(), before);
        assert!(!f.headless.is_window(handle));
    }

    #[test]
    fn duplicate_and_missing_ids_are_rejected() {
        let f = fixture();
        add_child(&f, 1, 0);
        let client = f.container.client().unwrap();
        let dup = create_plain_window(
            &f.ctx,
            &WindowConfig::new(client, ControlId::new(1), Rect::new(0, 0, 10, 10)),
            NativeClass::Static,
        )
        .unwrap();

        assert!(f.container.add_window(&f.ctx, dup).unwrap_err().is_precondition());
        assert!(
            f.container
                .remove_window(&f.ctx, ControlId::new(42))
                .unwrap_err()
                .is_precondition()
        );
    }

    #[test]
    fn child_of_another_window_is_an_invariant_violation() {
        let f = fixture();
        let stranger_parent = f.headless.create_top_level(50, 50);
        let stranger = create_plain_window(
            &f.ctx,
            &WindowConfig::new(stranger_parent, ControlId::new(9), Rect::new(0, 0, 10, 10)),
            NativeClass::Static,
        )
        .unwrap();

        let err = f.container.add_window(&f.ctx, stranger).unwrap_err();

        assert!(matches!(err, PlatformError::InvariantViolation(_)));
        assert!(f.container.child_ids().unwrap().is_empty());
    }

    #[test]
    fn wheel_through_the_dispatcher_scrolls_by_the_step() {
        let f = fixture();
        let first = add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);
        let client = f.container.client().unwrap();

        f.ctx.dispatch(client, NativeMessage::Wheel { delta: -240 });
        assert_eq!(f.container.scroll_state().unwrap().position, 100);
        assert_eq!(f.headless.window_rect(first).unwrap().y, -100);

        f.ctx.dispatch(client, NativeMessage::Wheel { delta: 120 });
        assert_eq!(f.container.scroll_state().unwrap().position, 50);
        assert_eq!(f.headless.window_rect(first).unwrap().y, -50);
        assert_eq!(f.headless.blits(), vec![(client, -100), (client, 50)]);
    }

    #[test]
    fn scroll_is_clamped_to_the_range() {
        let f = fixture();
        add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);

        let applied = f.container.scroll_container(&f.ctx, 1000, true).unwrap();

        assert_eq!(applied, 160);
        assert_eq!(f.container.scroll_container(&f.ctx, 5, true).unwrap(), 0);
        assert!(f.headless.blits().is_empty());
    }

    #[test]
    fn removing_while_scrolled_brings_content_back_into_view() {
        let f = fixture();
        let first = add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);
        f.container.scroll_container(&f.ctx, 160, false).unwrap();

        f.container.remove_window(&f.ctx, ControlId::new(3)).unwrap();

        assert_eq!(f.container.scroll_state().unwrap().position, 60);
        assert_eq!(f.headless.window_rect(first).unwrap().y, -60);
    }

    #[test]
    fn child_added_while_scrolled_is_reanchored() {
        let f = fixture();
        add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);
        f.container.scroll_container(&f.ctx, 100, false).unwrap();

        let late = add_child(&f, 4, 250);

        assert_eq!(f.headless.window_rect(late).unwrap().y, 150);
        assert_eq!(f.container.get_maximum_vertical_scrolling_position(&f.ctx).unwrap(), 310);
    }

    #[test]
    fn dimension_update_is_idempotent() {
        let f = fixture();
        let first = add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);
        f.container.scroll_container(&f.ctx, 40, false).unwrap();

        let once = f
            .container
            .update_container_dimensions(&f.ctx, 0, 0, 220, 120, false, false)
            .unwrap();
        let rect_once = f.headless.window_rect(first).unwrap();
        let twice = f
            .container
            .update_container_dimensions(&f.ctx, 0, 0, 220, 120, false, false)
            .unwrap();

        assert_eq!(once, twice);
        assert_eq!(f.headless.window_rect(first).unwrap(), rect_once);
        assert_eq!(once.position, 40);
    }

    #[test]
    fn reset_scrolls_back_to_top_and_hide_widens_the_client() {
        let f = fixture();
        let first = add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);
        f.container.scroll_container(&f.ctx, 100, false).unwrap();

        let state = f
            .container
            .update_container_dimensions(&f.ctx, 0, 0, 200, 100, true, true)
            .unwrap();

        assert_eq!(state.position, 0);
        assert_eq!(f.headless.window_rect(first).unwrap().y, 0);
        let client = f.container.client().unwrap();
        assert_eq!(f.headless.window_rect(client).unwrap().width, 200);
        let bar = f.container.scrollbar().unwrap().unwrap();
        assert!(!f.headless.window(bar).unwrap().visible);
    }

    #[test]
    fn scrollbar_page_click_scrolls_the_container() {
        let f = fixture();
        add_child(&f, 1, 0);
        add_child(&f, 2, 100);
        add_child(&f, 3, 200);
        let bar = f.container.scrollbar().unwrap().unwrap();

        // Thumb covers the top of the 100px track; click below it.
        f.ctx.dispatch(bar, NativeMessage::PrimaryDown(crate::types::Point::new(5, 90)));

        assert_eq!(f.container.scroll_state().unwrap().position, 100);
    }

    #[test]
    fn child_notifications_go_to_the_parent() {
        let f = fixture();
        let client = f.container.client().unwrap();
        assert_eq!(
            f.ctx.dispatch(client, NativeMessage::ChildNotification),
            Disposition::ForwardToParent
        );
    }

    #[test]
    fn dropping_the_container_destroys_everything() {
        let f = fixture();
        let child = add_child(&f, 1, 0);
        let client = f.container.client().unwrap();
        let bar = f.container.scrollbar().unwrap().unwrap();
        let Fixture {
            ctx,
            headless,
            container,
        } = f;

        drop(container);

        for handle in [child, client, bar] {
            assert!(!headless.is_window(handle));
            assert!(!ctx.is_registered(handle));
        }
    }
}
