//! Two-contact pinch aggregate.
//!
//! Derived every frame from the post-update contact set: active only
//! while exactly two contacts are tracked, neither classifies as a
//! swipe, and both have been pressed longer than the activation delay
//! (so an initial two-finger tap is not misread as a pinch). Distance
//! and ratio compare the pair's current span against the span between
//! their start positions and are symmetric in the pair order.

use log::debug;
use statig::blocking::IntoStateMachineExt as _;
use statig::prelude::*;

use crate::touch::TouchState;
use crate::types::{Point, TouchAction};

/// Lifecycle of the pinch signal, reported alongside the metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
}

/// Raycast origin reported while no pinch is active: far enough off
/// surface that a spatial query against it is a guaranteed miss.
pub const INACTIVE_PINCH_ORIGIN: Point = Point {
    x: -1.0e6,
    y: -1.0e6,
};

/// Pair measurements taken from the two qualifying contacts this frame.
#[derive(Clone, Copy, Debug)]
struct PairMetrics {
    distance: f32,
    ratio: f32,
    midpoint: Point,
}

impl PairMetrics {
    fn measure(first: &TouchState, second: &TouchState) -> Self {
        let start_span = first.start_pos().distance_to(second.start_pos());
        let current_span = first.current_pos().distance_to(second.current_pos());
        Self {
            distance: current_span - start_span,
            // A degenerate zero start span reports the neutral ratio
            // instead of dividing by it.
            ratio: if start_span > f32::EPSILON {
                current_span / start_span
            } else {
                1.0
            },
            midpoint: first.current_pos().midpoint(second.current_pos()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum PinchEvent {
    Frame(Option<PairMetrics>),
}

pub struct Pinch {
    machine: statig::blocking::StateMachine<PinchHsm>,
}

impl Pinch {
    pub(crate) fn new(drag_threshold_px: f32) -> Self {
        Self {
            machine: PinchHsm::new(drag_threshold_px).state_machine(),
        }
    }

    /// Recompute the pinch signal from the post-update contact set.
    pub(crate) fn update(&mut self, touches: &[TouchState], pinch_delay: f32) {
        let pair = match touches {
            [first, second]
                if first.action() != TouchAction::Swipe
                    && second.action() != TouchAction::Swipe
                    && first.total_press_time() > pinch_delay
                    && second.total_press_time() > pinch_delay =>
            {
                Some(PairMetrics::measure(first, second))
            }
            _ => None,
        };
        self.machine.handle(&PinchEvent::Frame(pair));
    }

    pub fn active(&self) -> bool {
        self.machine.inner().phase != PinchPhase::Ended
    }

    pub fn phase(&self) -> PinchPhase {
        self.machine.inner().phase
    }

    /// Current span minus the span between the pair's start positions,
    /// device pixels. Positive while spreading, negative while
    /// pinching in, zero while inactive.
    pub fn distance(&self) -> f32 {
        self.machine.inner().distance
    }

    /// Current span divided by the start span. 1.0 is neutral.
    pub fn ratio(&self) -> f32 {
        self.machine.inner().ratio
    }

    /// Change of [`distance`](Pinch::distance) since the previous frame.
    pub fn delta_distance(&self) -> f32 {
        let inner = self.machine.inner();
        inner.distance - inner.last_distance
    }

    /// Change of [`ratio`](Pinch::ratio) since the previous frame.
    pub fn delta_ratio(&self) -> f32 {
        let inner = self.machine.inner();
        inner.ratio - inner.last_ratio
    }

    /// Midpoint of the two contacts while active, otherwise
    /// [`INACTIVE_PINCH_ORIGIN`].
    pub fn raycast_origin(&self) -> Point {
        if self.active() {
            self.machine.inner().midpoint
        } else {
            INACTIVE_PINCH_ORIGIN
        }
    }
}

struct PinchHsm {
    drag_threshold_px: f32,
    phase: PinchPhase,
    distance: f32,
    ratio: f32,
    last_distance: f32,
    last_ratio: f32,
    midpoint: Point,
}

impl PinchHsm {
    fn new(drag_threshold_px: f32) -> Self {
        Self {
            drag_threshold_px,
            phase: PinchPhase::Ended,
            distance: 0.0,
            ratio: 1.0,
            last_distance: 0.0,
            last_ratio: 1.0,
            midpoint: INACTIVE_PINCH_ORIGIN,
        }
    }

    /// Frame step distinguishing a moving pinch from a held one, judged
    /// before the metrics roll over.
    fn step_exceeds_drag(&self, metrics: PairMetrics) -> bool {
        (metrics.distance - self.distance).abs() > self.drag_threshold_px
    }

    fn apply_frame(&mut self, metrics: PairMetrics, phase: PinchPhase) {
        self.last_distance = self.distance;
        self.last_ratio = self.ratio;
        self.distance = metrics.distance;
        self.ratio = metrics.ratio;
        self.midpoint = metrics.midpoint;
        self.phase = phase;
    }

    fn deactivate(&mut self) {
        self.distance = 0.0;
        self.ratio = 1.0;
        self.last_distance = 0.0;
        self.last_ratio = 1.0;
        self.midpoint = INACTIVE_PINCH_ORIGIN;
        self.phase = PinchPhase::Ended;
    }
}

#[state_machine(initial = "State::ended()")]
impl PinchHsm {
    #[state]
    fn ended(&mut self, event: &PinchEvent) -> Outcome<State> {
        match event {
            PinchEvent::Frame(Some(metrics)) => {
                self.apply_frame(*metrics, PinchPhase::Began);
                debug!("pinch began");
                Transition(State::began())
            }
            PinchEvent::Frame(None) => {
                self.deactivate();
                Handled
            }
        }
    }

    #[state]
    fn began(&mut self, event: &PinchEvent) -> Outcome<State> {
        match event {
            PinchEvent::Frame(Some(metrics)) => {
                if self.step_exceeds_drag(*metrics) {
                    self.apply_frame(*metrics, PinchPhase::Moved);
                    Transition(State::moved())
                } else {
                    self.apply_frame(*metrics, PinchPhase::Stationary);
                    Transition(State::stationary())
                }
            }
            PinchEvent::Frame(None) => {
                self.deactivate();
                debug!("pinch ended");
                Transition(State::ended())
            }
        }
    }

    #[state]
    fn moved(&mut self, event: &PinchEvent) -> Outcome<State> {
        match event {
            PinchEvent::Frame(Some(metrics)) => {
                if self.step_exceeds_drag(*metrics) {
                    self.apply_frame(*metrics, PinchPhase::Moved);
                    Handled
                } else {
                    self.apply_frame(*metrics, PinchPhase::Stationary);
                    Transition(State::stationary())
                }
            }
            PinchEvent::Frame(None) => {
                self.deactivate();
                debug!("pinch ended");
                Transition(State::ended())
            }
        }
    }

    #[state]
    fn stationary(&mut self, event: &PinchEvent) -> Outcome<State> {
        match event {
            PinchEvent::Frame(Some(metrics)) => {
                if self.step_exceeds_drag(*metrics) {
                    self.apply_frame(*metrics, PinchPhase::Moved);
                    Transition(State::moved())
                } else {
                    self.apply_frame(*metrics, PinchPhase::Stationary);
                    Handled
                }
            }
            PinchEvent::Frame(None) => {
                self.deactivate();
                debug!("pinch ended");
                Transition(State::ended())
            }
        }
    }
}
