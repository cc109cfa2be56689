/*
 * Mutual exclusion across radio buttons. A group is shared by every member's
 * subclass object through `Rc<RefCell<RadioGroup>>`; the group only tracks
 * identities and never owns a window. Having no selection is valid until the
 * first click.
 */
use crate::error::{PlatformError, Result};
use crate::types::NativeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<NativeHandle>,
    pub current: NativeHandle,
}

impl SelectionChange {
    /* The member whose selected layer has to be redrawn as cleared, if any. */
    pub fn deselected(&self) -> Option<NativeHandle> {
        self.previous.filter(|prev| *prev != self.current)
    }
}

#[derive(Debug, Default)]
pub struct RadioGroup {
    members: Vec<NativeHandle>,
    selected: Option<NativeHandle>,
}

impl RadioGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_radio_button(&mut self, handle: NativeHandle) -> Result<()> {
        if self.members.contains(&handle) {
            return Err(PlatformError::Precondition(format!(
                "radio button {handle:?} is already in the group"
            )));
        }
        self.members.push(handle);
        Ok(())
    }

    pub fn remove_radio_button(&mut self, handle: NativeHandle) -> Result<()> {
        let Some(index) = self.members.iter().position(|m| *m == handle) else {
            return Err(PlatformError::Precondition(format!(
                "radio button {handle:?} is not in the group"
            )));
        };
        self.members.remove(index);
        if self.selected == Some(handle) {
            self.selected = None;
        }
        Ok(())
    }

    pub fn select(&mut self, handle: NativeHandle) -> Result<SelectionChange> {
        if !self.members.contains(&handle) {
            return Err(PlatformError::Precondition(format!(
                "cannot select {handle:?}: not a member of this group"
            )));
        }
        let previous = self.selected.replace(handle);
        Ok(SelectionChange {
            previous,
            current: handle,
        })
    }

    pub fn selected(&self) -> Option<NativeHandle> {
        self.selected
    }

    pub fn is_selected(&self, handle: NativeHandle) -> bool {
        self.selected == Some(handle)
    }

    pub fn members(&self) -> &[NativeHandle] {
        &self.members
    }
}
