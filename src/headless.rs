/*
 * In-memory implementation of the platform seam. It keeps a window tree with
 * parent links and bounds, records every side effect the control layer asks
 * for (timers, invalidations, frames, commands, batches), and can be told to
 * fail specific native calls. Destroying a window delivers `FinalDestroy` for
 * the window and all its descendants, children first, the way the native
 * substrate does.
 */
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::context::UiContext;
use crate::error::{PlatformError, Result};
use crate::metrics::Metrics;
use crate::native::{
    CreateParams, FrameRequest, NativeApi, NativeMessage, ResourceId, ResourceKind, WindowMove,
};
use crate::styling_primitives::{Color, FontDescription, Theme};
use crate::types::{ControlId, NativeClass, NativeHandle, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    CreateWindow,
    CreateBrush,
    CreateFont,
    SetTimer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessWindow {
    pub class: NativeClass,
    pub parent: NativeHandle,
    pub bounds: Rect,
    pub id: ControlId,
    pub text: String,
    pub visible: bool,
    pub subclassed: bool,
}

#[derive(Default)]
struct HeadlessState {
    next_handle: usize,
    next_resource: usize,
    windows: BTreeMap<NativeHandle, HeadlessWindow>,
    timers: HashSet<(NativeHandle, usize)>,
    tracking: HashSet<NativeHandle>,
    captured: Option<NativeHandle>,
    invalidations: HashMap<NativeHandle, usize>,
    notifications: Vec<(NativeHandle, ControlId)>,
    resources: HashMap<ResourceId, ResourceKind>,
    frames: Vec<(NativeHandle, FrameRequest)>,
    batches: usize,
    blits: Vec<(NativeHandle, i32)>,
    destroyed: Vec<NativeHandle>,
    // Remaining successful calls before the fail point triggers.
    failures: HashMap<FailPoint, usize>,
}

impl HeadlessState {
    fn should_fail(&mut self, point: FailPoint) -> bool {
        match self.failures.get_mut(&point) {
            Some(0) => {
                self.failures.remove(&point);
                true
            }
            Some(remaining) => {
                *remaining -= 1;
                false
            }
            None => false,
        }
    }

    fn window(&self, handle: NativeHandle) -> Result<&HeadlessWindow> {
        self.windows
            .get(&handle)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("{handle:?} is not a window")))
    }

    /* Post-order: descendants before the window itself. */
    fn subtree(&self, root: NativeHandle, out: &mut Vec<NativeHandle>) {
        let children: Vec<NativeHandle> = self
            .windows
            .iter()
            .filter(|(_, w)| w.parent == root)
            .map(|(h, _)| *h)
            .collect();
        for child in children {
            self.subtree(child, out);
        }
        out.push(root);
    }
}

pub struct HeadlessApi {
    state: RefCell<HeadlessState>,
    dispatcher: RefCell<Weak<UiContext>>,
}

impl Default for HeadlessApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessApi {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(HeadlessState {
                next_handle: 0x100,
                next_resource: 1,
                ..Default::default()
            }),
            dispatcher: RefCell::new(Weak::new()),
        }
    }

    /* A context over a fresh headless substrate, plus the substrate for inspection. */
    pub fn context(theme: Theme, metrics: Metrics) -> Result<(Rc<UiContext>, Rc<HeadlessApi>)> {
        let headless = Rc::new(HeadlessApi::new());
        let api: Rc<dyn NativeApi> = headless.clone();
        let ctx = UiContext::new(api, theme, metrics)?;
        Ok((ctx, headless))
    }

    /* A top-level window to parent controls to. Never subclassed. */
    pub fn create_top_level(&self, width: i32, height: i32) -> NativeHandle {
        let mut st = self.state.borrow_mut();
        let handle = NativeHandle(st.next_handle);
        st.next_handle += 1;
        st.windows.insert(
            handle,
            HeadlessWindow {
                class: NativeClass::Static,
                parent: NativeHandle::NULL,
                bounds: Rect::new(0, 0, width, height),
                id: ControlId::new(0),
                text: String::new(),
                visible: true,
                subclassed: false,
            },
        );
        handle
    }

    /* Make the `after`-th next call at `point` fail (0 = the very next call). */
    pub fn fail_on(&self, point: FailPoint, after: usize) {
        self.state.borrow_mut().failures.insert(point, after);
    }

    pub fn window(&self, handle: NativeHandle) -> Option<HeadlessWindow> {
        self.state.borrow().windows.get(&handle).cloned()
    }

    pub fn children_of(&self, parent: NativeHandle) -> Vec<NativeHandle> {
        self.state
            .borrow()
            .windows
            .iter()
            .filter(|(_, w)| w.parent == parent)
            .map(|(h, _)| *h)
            .collect()
    }

    pub fn timer_active(&self, handle: NativeHandle, timer_id: usize) -> bool {
        self.state.borrow().timers.contains(&(handle, timer_id))
    }

    pub fn is_tracking_leave(&self, handle: NativeHandle) -> bool {
        self.state.borrow().tracking.contains(&handle)
    }

    pub fn captured(&self) -> Option<NativeHandle> {
        self.state.borrow().captured
    }

    pub fn invalidation_count(&self, handle: NativeHandle) -> usize {
        self.state
            .borrow()
            .invalidations
            .get(&handle)
            .copied()
            .unwrap_or(0)
    }

    pub fn notifications(&self) -> Vec<(NativeHandle, ControlId)> {
        self.state.borrow().notifications.clone()
    }

    pub fn frames_for(&self, handle: NativeHandle) -> Vec<FrameRequest> {
        self.state
            .borrow()
            .frames
            .iter()
            .filter(|(h, _)| *h == handle)
            .map(|(_, f)| f.clone())
            .collect()
    }

    pub fn live_resource_count(&self) -> usize {
        self.state.borrow().resources.len()
    }

    pub fn batch_count(&self) -> usize {
        self.state.borrow().batches
    }

    pub fn blits(&self) -> Vec<(NativeHandle, i32)> {
        self.state.borrow().blits.clone()
    }

    pub fn destroy_count(&self, handle: NativeHandle) -> usize {
        self.state
            .borrow()
            .destroyed
            .iter()
            .filter(|h| **h == handle)
            .count()
    }

    fn deliver(&self, handles: &[NativeHandle], message: NativeMessage) {
        let ctx = self.dispatcher.borrow().upgrade();
        if let Some(ctx) = ctx {
            for handle in handles {
                ctx.dispatch(*handle, message);
            }
        }
    }
}

impl NativeApi for HeadlessApi {
    fn install_dispatcher(&self, context: Weak<UiContext>) {
        *self.dispatcher.borrow_mut() = context;
    }

    fn create_window(&self, params: &CreateParams) -> Result<NativeHandle> {
        let mut st = self.state.borrow_mut();
        if st.should_fail(FailPoint::CreateWindow) {
            return Err(PlatformError::resource("create_window", "injected failure"));
        }
        if !params.parent.is_null() && !st.windows.contains_key(&params.parent) {
            return Err(PlatformError::InvalidHandle(format!(
                "parent {:?} does not exist",
                params.parent
            )));
        }
        let handle = NativeHandle(st.next_handle);
        st.next_handle += 1;
        st.windows.insert(
            handle,
            HeadlessWindow {
                class: params.class,
                parent: params.parent,
                bounds: params.bounds,
                id: params.id,
                text: params.text.clone(),
                visible: params.visible,
                subclassed: false,
            },
        );
        Ok(handle)
    }

    fn destroy_window(&self, handle: NativeHandle) -> Result<()> {
        let doomed = {
            let mut st = self.state.borrow_mut();
            st.window(handle)?;
            let mut doomed = Vec::new();
            st.subtree(handle, &mut doomed);
            for h in &doomed {
                st.windows.remove(h);
                st.timers.retain(|(owner, _)| owner != h);
                st.tracking.remove(h);
                if st.captured == Some(*h) {
                    st.captured = None;
                }
                st.destroyed.push(*h);
            }
            doomed
        };
        self.deliver(&doomed, NativeMessage::FinalDestroy);
        Ok(())
    }

    fn is_window(&self, handle: NativeHandle) -> bool {
        self.state.borrow().windows.contains_key(&handle)
    }

    fn parent_of(&self, handle: NativeHandle) -> Option<NativeHandle> {
        self.state
            .borrow()
            .windows
            .get(&handle)
            .map(|w| w.parent)
            .filter(|p| !p.is_null())
    }

    fn window_rect(&self, handle: NativeHandle) -> Result<Rect> {
        Ok(self.state.borrow().window(handle)?.bounds)
    }

    fn client_size(&self, handle: NativeHandle) -> Result<(i32, i32)> {
        let bounds = self.state.borrow().window(handle)?.bounds;
        Ok((bounds.width, bounds.height))
    }

    fn apply_positions(&self, moves: &[WindowMove]) -> Result<()> {
        let mut st = self.state.borrow_mut();
        // Validate first so a bad handle moves nothing.
        for m in moves {
            st.window(m.handle)?;
        }
        for m in moves {
            if let Some(w) = st.windows.get_mut(&m.handle) {
                w.bounds = m.bounds;
            }
        }
        st.batches += 1;
        Ok(())
    }

    fn scroll_children(&self, handle: NativeHandle, dy: i32) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.window(handle)?;
        for w in st.windows.values_mut().filter(|w| w.parent == handle) {
            w.bounds = w.bounds.offset_y(dy);
        }
        st.blits.push((handle, dy));
        *st.invalidations.entry(handle).or_default() += 1;
        Ok(())
    }

    fn set_visible(&self, handle: NativeHandle, visible: bool) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.window(handle)?;
        if let Some(w) = st.windows.get_mut(&handle) {
            w.visible = visible;
        }
        Ok(())
    }

    fn invalidate(&self, handle: NativeHandle) {
        let mut st = self.state.borrow_mut();
        if st.windows.contains_key(&handle) {
            *st.invalidations.entry(handle).or_default() += 1;
        }
    }

    fn set_timer(&self, handle: NativeHandle, timer_id: usize, _interval_ms: u32) -> Result<()> {
        let mut st = self.state.borrow_mut();
        if st.should_fail(FailPoint::SetTimer) {
            return Err(PlatformError::OperationFailed("SetTimer failed".to_string()));
        }
        st.window(handle)?;
        st.timers.insert((handle, timer_id));
        Ok(())
    }

    fn kill_timer(&self, handle: NativeHandle, timer_id: usize) {
        self.state.borrow_mut().timers.remove(&(handle, timer_id));
    }

    fn track_pointer_leave(&self, handle: NativeHandle) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.window(handle)?;
        st.tracking.insert(handle);
        Ok(())
    }

    fn set_capture(&self, handle: NativeHandle) {
        self.state.borrow_mut().captured = Some(handle);
    }

    fn release_capture(&self) {
        self.state.borrow_mut().captured = None;
    }

    fn notify_owner(&self, handle: NativeHandle, id: ControlId) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.window(handle)?;
        st.notifications.push((handle, id));
        Ok(())
    }

    fn attach_subclass(&self, handle: NativeHandle) -> Result<()> {
        let mut st = self.state.borrow_mut();
        match st.windows.get_mut(&handle) {
            Some(w) if w.subclassed => Err(PlatformError::InvariantViolation(format!(
                "{handle:?} is already subclassed"
            ))),
            Some(w) => {
                w.subclassed = true;
                Ok(())
            }
            None => Err(PlatformError::InvalidHandle(format!("{handle:?} is not a window"))),
        }
    }

    fn detach_subclass(&self, handle: NativeHandle) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&handle) {
            w.subclassed = false;
        }
    }

    fn create_brush(&self, _color: Color) -> Result<ResourceId> {
        let mut st = self.state.borrow_mut();
        if st.should_fail(FailPoint::CreateBrush) {
            return Err(PlatformError::resource("create_brush", "injected failure"));
        }
        let id = ResourceId(st.next_resource);
        st.next_resource += 1;
        st.resources.insert(id, ResourceKind::Brush);
        Ok(id)
    }

    fn create_font(&self, _font: &FontDescription) -> Result<ResourceId> {
        let mut st = self.state.borrow_mut();
        if st.should_fail(FailPoint::CreateFont) {
            return Err(PlatformError::resource("create_font", "injected failure"));
        }
        let id = ResourceId(st.next_resource);
        st.next_resource += 1;
        st.resources.insert(id, ResourceKind::Font);
        Ok(id)
    }

    fn release_resource(&self, id: ResourceId, kind: ResourceKind) -> Result<()> {
        match self.state.borrow_mut().resources.remove(&id) {
            Some(k) if k == kind => Ok(()),
            Some(k) => Err(PlatformError::InvariantViolation(format!(
                "{id:?} released as {kind:?} but was {k:?}"
            ))),
            None => Err(PlatformError::InvalidHandle(format!("{id:?} is not live"))),
        }
    }

    fn paint_frame(&self, handle: NativeHandle, request: &FrameRequest) -> Result<()> {
        let mut st = self.state.borrow_mut();
        st.window(handle)?;
        st.frames.push((handle, request.clone()));
        Ok(())
    }
}
