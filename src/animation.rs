/*
 * Hover/press state machine shared by every animated control.
 *
 * The machine is pure: each input returns the list of effects the caller must
 * perform against the platform (track the pointer, start or stop the frame
 * timer, invalidate, capture, notify the owner). Painting reads a `FramePlan`
 * describing the transition from the committed state to the target state and
 * commits the target afterwards, so a frame is only ever drawn between two of
 * the three stable states.
 */
use crate::types::ClickPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    #[default]
    Idle,
    Hovering,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEffect {
    TrackPointerLeave,
    StartFrameTimer,
    StopFrameTimer,
    Invalidate,
    CapturePointer,
    ReleasePointer,
    NotifyOwner,
}

/// What the next paint has to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub from: VisualState,
    pub to: VisualState,
    pub duration_ms: u32,
}

impl FramePlan {
    pub fn is_static(&self) -> bool {
        self.duration_ms == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationState {
    committed: VisualState,
    target: VisualState,
    elapsed_ticks: u32,
    max_ticks: u32,
    pointer_inside: bool,
    button_pressed: bool,
    timer_running: bool,
    tracking_leave: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        AnimationState::new(60)
    }
}

impl AnimationState {
    pub fn new(max_ticks: u32) -> Self {
        Self {
            committed: VisualState::Idle,
            target: VisualState::Idle,
            elapsed_ticks: 0,
            max_ticks: max_ticks.max(1),
            pointer_inside: false,
            button_pressed: false,
            timer_running: false,
            tracking_leave: false,
        }
    }

    pub fn committed(&self) -> VisualState {
        self.committed
    }

    pub fn target(&self) -> VisualState {
        self.target
    }

    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn is_pressed(&self) -> bool {
        self.button_pressed
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn is_tracking_leave(&self) -> bool {
        self.tracking_leave
    }

    /*
     * Any pointer move. Only the first move after the pointer was outside
     * counts as an enter; later moves are no-ops.
     */
    pub fn pointer_move(&mut self) -> Vec<AnimationEffect> {
        if self.pointer_inside {
            return Vec::new();
        }
        self.pointer_inside = true;
        let mut effects = Vec::new();
        self.arm_leave_tracking(&mut effects);
        let next = if self.button_pressed {
            VisualState::Pressed
        } else {
            VisualState::Hovering
        };
        self.retarget(next, &mut effects);
        effects
    }

    /*
     * The platform cancels leave tracking after delivering the notification,
     * so the next enter must re-arm it. A leave while pressed keeps the
     * pressed flag: the release decides what happens.
     */
    pub fn pointer_leave(&mut self) -> Vec<AnimationEffect> {
        self.tracking_leave = false;
        if !self.pointer_inside {
            return Vec::new();
        }
        self.pointer_inside = false;
        let mut effects = Vec::new();
        self.retarget(VisualState::Idle, &mut effects);
        effects
    }

    /*
     * A press can arrive without any move first (window shown under a still
     * cursor), so it counts as an enter as well.
     */
    pub fn primary_down(&mut self, policy: ClickPolicy) -> Vec<AnimationEffect> {
        let mut effects = vec![AnimationEffect::CapturePointer];
        self.arm_leave_tracking(&mut effects);
        self.pointer_inside = true;
        self.button_pressed = true;
        self.retarget(VisualState::Pressed, &mut effects);
        if policy == ClickPolicy::OnPress {
            effects.push(AnimationEffect::NotifyOwner);
        }
        effects
    }

    /*
     * `inside` is the hit test of the release point against the control.
     * A release without a preceding press (capture stolen, press elsewhere)
     * is ignored.
     */
    pub fn primary_up(&mut self, policy: ClickPolicy, inside: bool) -> Vec<AnimationEffect> {
        if !self.button_pressed {
            return Vec::new();
        }
        self.button_pressed = false;
        self.pointer_inside = inside;
        let mut effects = vec![AnimationEffect::ReleasePointer];
        if inside {
            self.arm_leave_tracking(&mut effects);
        }
        let next = if inside {
            VisualState::Hovering
        } else {
            VisualState::Idle
        };
        self.retarget(next, &mut effects);
        if inside && policy == ClickPolicy::OnRelease {
            effects.push(AnimationEffect::NotifyOwner);
        }
        effects
    }

    /* Capture taken away by the platform: abandon the press without a click. */
    pub fn capture_lost(&mut self) -> Vec<AnimationEffect> {
        if !self.button_pressed {
            return Vec::new();
        }
        self.button_pressed = false;
        let next = if self.pointer_inside {
            VisualState::Hovering
        } else {
            VisualState::Idle
        };
        let mut effects = Vec::new();
        self.retarget(next, &mut effects);
        effects
    }

    pub fn frame_tick(&mut self) -> Vec<AnimationEffect> {
        if !self.timer_running {
            // Stray tick from a timer we already consider stopped.
            return vec![AnimationEffect::StopFrameTimer];
        }
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        let mut effects = vec![AnimationEffect::Invalidate];
        if self.elapsed_ticks >= self.max_ticks {
            self.timer_running = false;
            effects.push(AnimationEffect::StopFrameTimer);
        }
        effects
    }

    pub fn plan_frame(&self, duration_ms: u32) -> FramePlan {
        FramePlan {
            from: self.committed,
            to: self.target,
            duration_ms: if self.committed == self.target {
                0
            } else {
                duration_ms
            },
        }
    }

    /* Called once the frame described by `plan_frame` has been issued. */
    pub fn commit_frame(&mut self) {
        self.committed = self.target;
    }

    /* Teardown: forget everything, stopping the timer if it runs. */
    pub fn reset(&mut self) -> Vec<AnimationEffect> {
        let mut effects = Vec::new();
        if self.timer_running {
            effects.push(AnimationEffect::StopFrameTimer);
        }
        if self.button_pressed {
            effects.push(AnimationEffect::ReleasePointer);
        }
        *self = AnimationState::new(self.max_ticks);
        effects
    }

    /* The platform only reports a leave after tracking was requested. */
    fn arm_leave_tracking(&mut self, effects: &mut Vec<AnimationEffect>) {
        if !self.tracking_leave {
            self.tracking_leave = true;
            effects.push(AnimationEffect::TrackPointerLeave);
        }
    }

    fn retarget(&mut self, next: VisualState, effects: &mut Vec<AnimationEffect>) {
        if next == self.target {
            return;
        }
        self.target = next;
        self.elapsed_ticks = 0;
        effects.push(AnimationEffect::Invalidate);
        if next == VisualState::Idle {
            if self.timer_running {
                self.timer_running = false;
                effects.push(AnimationEffect::StopFrameTimer);
            }
        } else if !self.timer_running {
            self.timer_running = true;
            effects.push(AnimationEffect::StartFrameTimer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnimationEffect::*;
    use super::*;

    #[test]
    fn first_move_enters_and_later_moves_do_nothing() {
        let mut state = AnimationState::default();

        let effects = state.pointer_move();
        assert_eq!(effects, vec![TrackPointerLeave, Invalidate, StartFrameTimer]);
        assert_eq!(state.target(), VisualState::Hovering);
        assert_eq!(state.committed(), VisualState::Idle);

        assert!(state.pointer_move().is_empty());
    }

    #[test]
    fn leave_stops_the_timer_and_targets_idle() {
        let mut state = AnimationState::default();
        state.pointer_move();

        let effects = state.pointer_leave();

        assert_eq!(effects, vec![Invalidate, StopFrameTimer]);
        assert_eq!(state.target(), VisualState::Idle);
        assert!(!state.is_timer_running());
    }

    #[test]
    fn on_release_policy_notifies_only_when_released_inside() {
        let mut state = AnimationState::default();
        state.pointer_move();
        let down = state.primary_down(ClickPolicy::OnRelease);
        assert!(!down.contains(&NotifyOwner));
        assert!(down.contains(&CapturePointer));

        let up = state.primary_up(ClickPolicy::OnRelease, true);
        assert!(up.contains(&NotifyOwner));
        assert!(up.contains(&ReleasePointer));
        assert_eq!(state.target(), VisualState::Hovering);

        state.primary_down(ClickPolicy::OnRelease);
        let up = state.primary_up(ClickPolicy::OnRelease, false);
        assert!(!up.contains(&NotifyOwner));
        assert_eq!(state.target(), VisualState::Idle);
    }

    #[test]
    fn on_press_policy_notifies_on_down() {
        let mut state = AnimationState::default();
        let down = state.primary_down(ClickPolicy::OnPress);
        assert!(down.contains(&NotifyOwner));
        let up = state.primary_up(ClickPolicy::OnPress, true);
        assert!(!up.contains(&NotifyOwner));
    }

    #[test]
    fn leave_while_pressed_keeps_the_press() {
        let mut state = AnimationState::default();
        state.pointer_move();
        state.primary_down(ClickPolicy::OnRelease);

        state.pointer_leave();
        assert_eq!(state.target(), VisualState::Idle);
        assert!(state.is_pressed());

        state.pointer_move();
        assert_eq!(state.target(), VisualState::Pressed);
    }

    #[test]
    fn press_without_prior_move_arms_leave_tracking() {
        let mut state = AnimationState::default();

        let down = state.primary_down(ClickPolicy::OnRelease);
        assert_eq!(down, vec![CapturePointer, TrackPointerLeave, Invalidate, StartFrameTimer]);
        state.primary_up(ClickPolicy::OnRelease, true);
        assert_eq!(state.target(), VisualState::Hovering);
        assert!(state.is_tracking_leave());

        state.pointer_leave();
        assert_eq!(state.target(), VisualState::Idle);
    }

    #[test]
    fn release_inside_after_leave_rearms_tracking() {
        let mut state = AnimationState::default();
        state.pointer_move();
        state.primary_down(ClickPolicy::OnRelease);
        state.pointer_leave();
        assert!(!state.is_tracking_leave());

        let up = state.primary_up(ClickPolicy::OnRelease, true);

        assert!(up.contains(&TrackPointerLeave));
        assert!(state.is_tracking_leave());
    }

    #[test]
    fn timer_stops_after_max_ticks() {
        let mut state = AnimationState::new(3);
        state.pointer_move();
        assert!(state.is_timer_running());

        assert_eq!(state.frame_tick(), vec![Invalidate]);
        assert_eq!(state.frame_tick(), vec![Invalidate]);
        assert_eq!(state.frame_tick(), vec![Invalidate, StopFrameTimer]);
        assert!(!state.is_timer_running());
        assert_eq!(state.frame_tick(), vec![StopFrameTimer]);
    }

    #[test]
    fn plan_has_zero_duration_when_settled() {
        let mut state = AnimationState::default();
        assert_eq!(
            state.plan_frame(150),
            FramePlan {
                from: VisualState::Idle,
                to: VisualState::Idle,
                duration_ms: 0
            }
        );

        state.pointer_move();
        let plan = state.plan_frame(150);
        assert_eq!(plan.from, VisualState::Idle);
        assert_eq!(plan.to, VisualState::Hovering);
        assert_eq!(plan.duration_ms, 150);

        state.commit_frame();
        assert_eq!(state.committed(), VisualState::Hovering);
        assert!(state.plan_frame(150).is_static());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = AnimationState::default();
        assert!(
            state
                .primary_up(ClickPolicy::OnRelease, true)
                .is_empty()
        );
    }

    #[test]
    fn reset_stops_timer_and_releases_capture() {
        let mut state = AnimationState::default();
        state.primary_down(ClickPolicy::OnRelease);
        let effects = state.reset();
        assert_eq!(effects, vec![StopFrameTimer, ReleasePointer]);
        assert_eq!(state, AnimationState::default());
    }
}
