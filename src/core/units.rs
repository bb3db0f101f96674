//! Unit conversion between gameplay tuning and Bevy world space.
//!
//! Character tuning (speeds, arm lengths, offsets) is authored in
//! centimeters; the Bevy world and Rapier work in meters.

/// Centimeters in one world unit.
pub const CENTIMETERS_PER_METER: f32 = 100.0;

/// Convert a centimeter value to world units.
#[inline]
pub fn to_meters(centimeters: f32) -> f32 {
    centimeters / CENTIMETERS_PER_METER
}
