use log::warn;

use crate::units::{UnitConverter, UnitKind};

/// User-facing tunables. Distances and speeds are expressed in `unit`,
/// times in seconds.
#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    /// Time allowed between taps before a finished contact is dropped.
    pub tap_timeout: f32,
    /// Press time past which a stationary contact becomes a long press.
    pub long_press_time: f32,
    /// Distance a contact may travel from its start before the drag
    /// action begins.
    pub drag_threshold: f32,
    /// Speed (units/second) past which a moving contact classifies as a
    /// swipe instead of a drag.
    pub swipe_threshold: f32,
    /// Time both contacts must be held before a pinch activates.
    pub pinch_delay: f32,
    pub unit: UnitKind,
    /// Device density. 0.0 means unknown and selects the fallback.
    pub screen_dpi: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout: 0.15,
            long_press_time: 0.5,
            drag_threshold: 0.5,
            swipe_threshold: 50.0,
            pinch_delay: 0.2,
            unit: UnitKind::Centimeter,
            screen_dpi: 0.0,
        }
    }
}

/// Thresholds resolved once at engine construction. The drag threshold
/// converts to pixels here and is reused every frame; the swipe
/// threshold stays in units/second because speed is compared in
/// units/second.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Thresholds {
    pub tap_timeout: f32,
    pub long_press_time: f32,
    pub drag_threshold_px: f32,
    pub swipe_threshold: f32,
    pub pinch_delay: f32,
}

impl Thresholds {
    pub fn resolve(config: &GestureConfig, converter: &UnitConverter) -> Self {
        Self {
            tap_timeout: sanitize("tap_timeout", config.tap_timeout),
            long_press_time: sanitize("long_press_time", config.long_press_time),
            drag_threshold_px: converter
                .to_pixels(sanitize("drag_threshold", config.drag_threshold)),
            swipe_threshold: sanitize("swipe_threshold", config.swipe_threshold),
            pinch_delay: sanitize("pinch_delay", config.pinch_delay),
        }
    }
}

fn sanitize(name: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{name} = {value} is unusable; clamping to 0");
        0.0
    }
}
