//! Per-contact state machine.
//!
//! One [`TouchState`] exists per live (or recently finished) contact.
//! Every frame the registry feeds it the sample for its identity, and
//! the state re-derives its classification from the accumulated timing
//! and distance metrics. Classification is a tagged value recomputed as
//! pure data transformation; the externally forced override always wins
//! over the automatic rules.

use crate::config::Thresholds;
use crate::types::{Point, SwipeDirection, TouchAction, TouchPhase, TouchSample};
use crate::units::UnitConverter;

/// Outcome of one per-frame update, reported back to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TouchFate {
    Retained,
    /// Finished for longer than the tap timeout; remove this state so a
    /// later contact on the same identity starts a fresh gesture.
    Expired,
}

#[derive(Clone, Copy, Debug)]
pub struct TouchState {
    id: u32,
    tap_count: u32,
    start_pos: Point,
    current_pos: Point,
    swipe_start_pos: Point,
    has_moved: bool,
    current_press_time: f32,
    total_press_time: f32,
    distance_traveled: f32,
    magnitude: f32,
    speed: f32,
    velocity: Point,
    phase: TouchPhase,
    action: TouchAction,
    override_action: Option<TouchAction>,
    swipe_direction: Option<SwipeDirection>,
    finished_for: f32,
}

impl TouchState {
    pub(crate) fn new(sample: &TouchSample) -> Self {
        Self {
            id: sample.id,
            tap_count: 0,
            start_pos: sample.position,
            current_pos: sample.position,
            swipe_start_pos: sample.position,
            has_moved: false,
            current_press_time: 0.0,
            total_press_time: 0.0,
            distance_traveled: 0.0,
            magnitude: 0.0,
            speed: 0.0,
            velocity: Point::default(),
            phase: sample.phase,
            action: TouchAction::Down,
            override_action: None,
            swipe_direction: None,
            finished_for: 0.0,
        }
    }

    /// One frame of this contact. `sample` is the frame's sample for
    /// this identity, or `None` once the host stops reporting a finished
    /// contact; sample-derived values then hold their last observed
    /// state while the timers keep running.
    pub(crate) fn update(
        &mut self,
        sample: Option<&TouchSample>,
        frame_dt: f32,
        thresholds: &Thresholds,
        converter: &UnitConverter,
    ) -> TouchFate {
        if let Some(sample) = sample {
            self.phase = sample.phase;
            if sample.phase == TouchPhase::Began {
                self.add_tap(sample.position);
            }
            self.current_pos = sample.position;
            self.magnitude = sample.delta.length();
            self.velocity = sample.delta;
            self.speed = if sample.delta_time > 0.0 {
                converter.to_units(self.magnitude) / sample.delta_time
            } else {
                0.0
            };
        }

        if self.start_pos.distance_to(self.current_pos) > thresholds.drag_threshold_px {
            self.has_moved = true;
            self.distance_traveled +=
                self.magnitude / thresholds.drag_threshold_px.max(f32::EPSILON);
        }

        if self.phase.is_finished() {
            self.finished_for += frame_dt;
            if self.finished_for > thresholds.tap_timeout {
                return TouchFate::Expired;
            }
        } else {
            self.total_press_time += frame_dt;
            self.current_press_time += frame_dt;
        }

        match self.override_action {
            Some(action) => self.action = action,
            None => self.classify(thresholds),
        }
        TouchFate::Retained
    }

    /// A new tap on a still-tracked identity: successive quick taps are
    /// counted on one state instead of destroying it between presses.
    fn add_tap(&mut self, position: Point) {
        self.tap_count += 1;
        self.finished_for = 0.0;
        self.current_press_time = 0.0;
        self.distance_traveled = 0.0;
        self.start_pos = position;
        self.swipe_start_pos = position;
        self.override_action = None;
        self.has_moved = false;
    }

    fn classify(&mut self, thresholds: &Thresholds) {
        if self.has_moved {
            if self.speed > thresholds.swipe_threshold {
                self.action = TouchAction::Swipe;
                self.swipe_direction = self.swipe_direction_from_origin();
            } else {
                // Too slow for a swipe this frame: re-base the swipe
                // origin so direction reflects the latest fast segment.
                self.swipe_start_pos = self.current_pos;
            }
            if self.action != TouchAction::Swipe {
                self.action = TouchAction::Drag;
            }
        } else {
            if self.phase.is_finished()
                && self.current_press_time < thresholds.long_press_time
            {
                self.action = TouchAction::Tap;
            }
            // Evaluated after the tap rule: crossing the long-press
            // threshold takes precedence when both fire in one frame.
            if self.current_press_time > thresholds.long_press_time {
                self.action = TouchAction::LongPress;
            }
        }
    }

    fn swipe_direction_from_origin(&self) -> Option<SwipeDirection> {
        let delta = self.current_pos - self.swipe_start_pos;
        let abs_x = delta.x.abs();
        let abs_y = delta.y.abs();
        if abs_x > abs_y {
            Some(if delta.x < 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            })
        } else if abs_y > abs_x {
            Some(if delta.y > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            })
        } else {
            // Equal-magnitude axes: no dominant direction.
            None
        }
    }

    /// Force the classification until [`clear_override_action`] is
    /// called; applied on the next frame and suppresses the automatic
    /// rules entirely.
    ///
    /// [`clear_override_action`]: TouchState::clear_override_action
    pub(crate) fn set_override_action(&mut self, action: TouchAction) {
        self.override_action = Some(action);
    }

    pub(crate) fn clear_override_action(&mut self) {
        self.override_action = None;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Taps accumulated within successive timeout windows.
    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn start_pos(&self) -> Point {
        self.start_pos
    }

    pub fn current_pos(&self) -> Point {
        self.current_pos
    }

    /// True once the contact has traveled past the drag threshold;
    /// sticky until the next tap reset.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Press time of the current tap, seconds.
    pub fn current_press_time(&self) -> f32 {
        self.current_press_time
    }

    /// Press time summed over every tap of this contact, seconds.
    pub fn total_press_time(&self) -> f32 {
        self.total_press_time
    }

    /// Accumulated travel in multiples of the drag threshold.
    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    /// Length of the latest per-frame delta, device pixels.
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Instantaneous speed in configured units per second.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Raw per-frame displacement, device pixels.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    pub fn action(&self) -> TouchAction {
        self.action
    }

    pub fn override_action(&self) -> Option<TouchAction> {
        self.override_action
    }

    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        self.swipe_direction
    }
}
