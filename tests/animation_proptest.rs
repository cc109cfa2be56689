//! Property-based tests for the hover/press state machine.
//! Arbitrary pointer sequences must keep the machine consistent with the
//! effects it asks the platform to perform.

use glazeui::animation::{AnimationEffect, AnimationState, VisualState};
use glazeui::types::ClickPolicy;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Input {
    Move,
    Leave,
    Down,
    UpInside,
    UpOutside,
    CaptureLost,
    Tick,
    Paint,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        Just(Input::Move),
        Just(Input::Leave),
        Just(Input::Down),
        Just(Input::UpInside),
        Just(Input::UpOutside),
        Just(Input::CaptureLost),
        Just(Input::Tick),
        Just(Input::Paint),
    ]
}

fn policy() -> impl Strategy<Value = ClickPolicy> {
    prop_oneof![
        Just(ClickPolicy::OnPress),
        Just(ClickPolicy::OnRelease),
        Just(ClickPolicy::Never),
    ]
}

proptest! {
    /// Committed state is always one of the three stable states, and every
    /// platform request the machine emitted matches its own view.
    #[test]
    fn effects_track_the_machine(policy in policy(), inputs in prop::collection::vec(input(), 0..80)) {
        let mut anim = AnimationState::new(60);
        let mut platform_timer = false;
        let mut captured = false;
        let mut tracking = false;

        for step in inputs {
            let effects = match step {
                Input::Move => anim.pointer_move(),
                Input::Leave => anim.pointer_leave(),
                Input::Down => anim.primary_down(policy),
                Input::UpInside => anim.primary_up(policy, true),
                Input::UpOutside => anim.primary_up(policy, false),
                Input::CaptureLost => anim.capture_lost(),
                Input::Tick => anim.frame_tick(),
                Input::Paint => {
                    let plan = anim.plan_frame(150);
                    prop_assert_eq!(plan.is_static(), plan.from == plan.to);
                    anim.commit_frame();
                    prop_assert!(anim.plan_frame(150).is_static());
                    Vec::new()
                }
            };
            for effect in &effects {
                match effect {
                    AnimationEffect::StartFrameTimer => platform_timer = true,
                    AnimationEffect::StopFrameTimer => platform_timer = false,
                    AnimationEffect::CapturePointer => captured = true,
                    AnimationEffect::ReleasePointer => captured = false,
                    AnimationEffect::TrackPointerLeave => tracking = true,
                    _ => {}
                }
            }
            match step {
                // The platform already took the capture away.
                Input::CaptureLost => captured = false,
                // Delivering the leave ends the platform's tracking request.
                Input::Leave => tracking = false,
                _ => {}
            }
            prop_assert!(matches!(
                anim.committed(),
                VisualState::Idle | VisualState::Hovering | VisualState::Pressed
            ));
            prop_assert_eq!(platform_timer, anim.is_timer_running());
            prop_assert!(anim.elapsed_ticks() <= 60);
            prop_assert_eq!(captured, anim.is_pressed());
            prop_assert_eq!(tracking, anim.is_tracking_leave());
            // Hovering or pressed without a pending leave would never settle back to idle.
            prop_assert!(!anim.is_pointer_inside() || anim.is_tracking_leave());
        }
    }

    /// A press/release pair notifies the owner exactly once for the clicking
    /// policies, and never for `Never`.
    #[test]
    fn one_click_per_press(policy in policy(), inside in any::<bool>()) {
        let mut anim = AnimationState::new(60);
        let mut notifications = 0;
        for effects in [
            anim.pointer_move(),
            anim.primary_down(policy),
            anim.primary_up(policy, inside),
        ] {
            notifications += effects.iter().filter(|e| **e == AnimationEffect::NotifyOwner).count();
        }
        let expected = match policy {
            ClickPolicy::OnPress => 1,
            ClickPolicy::OnRelease => usize::from(inside),
            ClickPolicy::Never => 0,
        };
        prop_assert_eq!(notifications, expected);
    }

    /// Reset always lands in a fresh idle machine.
    #[test]
    fn reset_forgets_everything(inputs in prop::collection::vec(input(), 0..40)) {
        let mut anim = AnimationState::new(60);
        for step in inputs {
            match step {
                Input::Move => { anim.pointer_move(); }
                Input::Down => { anim.primary_down(ClickPolicy::OnRelease); }
                Input::Leave => { anim.pointer_leave(); }
                _ => { anim.frame_tick(); }
            }
        }
        anim.reset();
        prop_assert_eq!(anim.committed(), VisualState::Idle);
        prop_assert_eq!(anim.target(), VisualState::Idle);
        prop_assert!(!anim.is_timer_running());
        prop_assert!(!anim.is_pressed());
    }
}
