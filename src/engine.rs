//! Per-frame orchestration.
//!
//! [`GestureEngine`] is the single entry point a host calls once per
//! logical frame. The registry pass (creation plus per-contact
//! classification) runs to completion before the two-contact
//! aggregates recompute, so aggregates only ever observe post-update
//! states. Exclusive ownership of all cross-frame state keeps the
//! whole step single-writer; a concurrent host must call `update` from
//! one place per frame.

use crate::config::{GestureConfig, Thresholds};
use crate::pinch::Pinch;
use crate::registry::TouchRegistry;
use crate::touch::TouchState;
use crate::types::{SwipeDirection, TouchAction, TouchSample};
use crate::units::UnitConverter;

pub struct GestureEngine {
    converter: UnitConverter,
    thresholds: Thresholds,
    registry: TouchRegistry,
    pinch: Pinch,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureEngine {
    /// Thresholds expressed in measure units convert to pixels here,
    /// once; the per-frame path only compares resolved values.
    pub fn new(config: GestureConfig) -> Self {
        let converter = UnitConverter::new(config.unit, config.screen_dpi);
        let thresholds = Thresholds::resolve(&config, &converter);
        Self {
            converter,
            thresholds,
            registry: TouchRegistry::new(),
            pinch: Pinch::new(thresholds.drag_threshold_px),
        }
    }

    /// Run one frame. `samples` holds this frame's contact samples;
    /// `frame_dt` is the frame's elapsed time in seconds, which also
    /// advances timers of finished contacts the host no longer reports.
    pub fn update(&mut self, samples: &[TouchSample], frame_dt: f32) {
        self.registry
            .update(samples, frame_dt, &self.thresholds, &self.converter);
        self.pinch
            .update(self.registry.touches(), self.thresholds.pinch_delay);
    }

    /// Tracked contacts in ascending-identity order.
    pub fn touches(&self) -> &[TouchState] {
        self.registry.touches()
    }

    pub fn touch(&self, id: u32) -> Option<&TouchState> {
        self.registry.touch(id)
    }

    pub fn pinch(&self) -> &Pinch {
        &self.pinch
    }

    pub fn double_swipe_direction(&self) -> Option<SwipeDirection> {
        self.registry.double_swipe_direction()
    }

    /// Pin a contact to a forced classification ("grapple"): automatic
    /// classification is suppressed from the next frame until cleared.
    /// Returns false when the identity is not tracked.
    pub fn set_override_action(&mut self, id: u32, action: TouchAction) -> bool {
        self.registry.set_override_action(id, action)
    }

    pub fn clear_override_action(&mut self, id: u32) -> bool {
        self.registry.clear_override_action(id)
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, TouchPhase};
    use crate::units::UnitKind;

    fn pixel_config() -> GestureConfig {
        GestureConfig {
            drag_threshold: 10.0,
            swipe_threshold: 2_000.0,
            unit: UnitKind::Pixel,
            ..GestureConfig::default()
        }
    }

    fn sample(id: u32, phase: TouchPhase, pos: (f32, f32), delta: (f32, f32)) -> TouchSample {
        TouchSample {
            id,
            phase,
            position: Point::new(pos.0, pos.1),
            delta: Point::new(delta.0, delta.1),
            delta_time: 0.02,
        }
    }

    #[test]
    fn aggregates_read_post_update_state() {
        let mut engine = GestureEngine::new(pixel_config());
        engine.update(
            &[
                sample(0, TouchPhase::Began, (100.0, 100.0), (0.0, 0.0)),
                sample(1, TouchPhase::Began, (200.0, 100.0), (0.0, 0.0)),
            ],
            0.02,
        );
        // Hold both past the pinch delay; the pinch activates in the
        // same update call that advanced the press times past it.
        for _ in 0..12 {
            engine.update(
                &[
                    sample(0, TouchPhase::Stationary, (100.0, 100.0), (0.0, 0.0)),
                    sample(1, TouchPhase::Stationary, (200.0, 100.0), (0.0, 0.0)),
                ],
                0.02,
            );
        }
        assert!(engine.pinch().active());
        assert_eq!(engine.touches().len(), 2);
    }

    #[test]
    fn expired_contacts_are_gone_before_aggregates_run() {
        let mut engine = GestureEngine::new(pixel_config());
        engine.update(&[sample(0, TouchPhase::Began, (0.0, 0.0), (0.0, 0.0))], 0.02);
        engine.update(&[sample(0, TouchPhase::Ended, (0.0, 0.0), (0.0, 0.0))], 0.02);
        // Coast past the tap timeout with no samples at all.
        for _ in 0..8 {
            engine.update(&[], 0.02);
        }
        assert!(engine.touches().is_empty());
        assert!(engine.touch(0).is_none());
        assert!(!engine.pinch().active());
    }

    #[test]
    fn override_round_trip_through_the_engine() {
        let mut engine = GestureEngine::new(pixel_config());
        engine.update(&[sample(0, TouchPhase::Began, (0.0, 0.0), (0.0, 0.0))], 0.02);
        assert!(engine.set_override_action(0, TouchAction::Drag));
        engine.update(
            &[sample(0, TouchPhase::Moved, (80.0, 0.0), (80.0, 0.0))],
            0.02,
        );
        assert_eq!(engine.touch(0).map(|t| t.action()), Some(TouchAction::Drag));

        assert!(engine.clear_override_action(0));
        engine.update(
            &[sample(0, TouchPhase::Moved, (160.0, 0.0), (80.0, 0.0))],
            0.02,
        );
        assert_eq!(engine.touch(0).map(|t| t.action()), Some(TouchAction::Swipe));

        assert!(!engine.set_override_action(7, TouchAction::Drag));
    }
}
