//! Conversion between device pixels and the configured measure unit.
//!
//! Centimeter is the reference unit: the converter derives
//! pixels-per-centimeter from the device density and the other units
//! from that. Conversion factors are computed once and reused; the
//! functions are pure.

const INCHES_TO_CENTIMETERS: f32 = 2.54;

/// Density assumed when the host reports no usable DPI. 160 is the
/// Android mdpi baseline, the most common fallback for unknown panels.
pub const FALLBACK_DPI: f32 = 160.0;

/// Measure unit for thresholds and derived speeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Pixel,
    Millimeter,
    Centimeter,
    Inch,
}

#[derive(Clone, Copy, Debug)]
pub struct UnitConverter {
    pixels_per_unit: f32,
}

impl UnitConverter {
    /// A `screen_dpi` that is zero, negative or non-finite selects
    /// [`FALLBACK_DPI`] instead of propagating a division by zero.
    pub fn new(unit: UnitKind, screen_dpi: f32) -> Self {
        let dpi = if screen_dpi.is_finite() && screen_dpi > 0.0 {
            screen_dpi
        } else {
            FALLBACK_DPI
        };
        let pixels_per_cm = dpi / INCHES_TO_CENTIMETERS;
        let pixels_per_unit = match unit {
            UnitKind::Centimeter => pixels_per_cm,
            UnitKind::Millimeter => pixels_per_cm / 10.0,
            UnitKind::Inch => pixels_per_cm * INCHES_TO_CENTIMETERS,
            UnitKind::Pixel => 1.0,
        };
        Self { pixels_per_unit }
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    pub fn to_pixels(&self, units: f32) -> f32 {
        units * self.pixels_per_unit
    }

    pub fn to_units(&self, pixels: f32) -> f32 {
        pixels / self.pixels_per_unit
    }
}
