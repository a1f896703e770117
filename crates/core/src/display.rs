//! Display sinks for the operator panel
//!
//! One call per quantity, fire-and-forget. Nothing a sink does feeds back
//! into control decisions.

use crate::protocol::Slope;

/// Indicator panel fed by the tasks after each interpreted response
pub trait DisplaySink {
    fn show_speed(&mut self, speed: f32);
    fn show_slope(&mut self, slope: Slope);
    fn show_gas(&mut self, on: bool);
    fn show_brake(&mut self, on: bool);
    fn show_mixer(&mut self, on: bool);
    /// `dark` as derived from the light sensor
    fn show_light(&mut self, dark: bool);
    fn show_lamps(&mut self, on: bool);
    fn show_stop(&mut self, stopped: bool);
    fn show_distance(&mut self, distance: u32);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn show_speed(&mut self, speed: f32) {
        (**self).show_speed(speed)
    }
    fn show_slope(&mut self, slope: Slope) {
        (**self).show_slope(slope)
    }
    fn show_gas(&mut self, on: bool) {
        (**self).show_gas(on)
    }
    fn show_brake(&mut self, on: bool) {
        (**self).show_brake(on)
    }
    fn show_mixer(&mut self, on: bool) {
        (**self).show_mixer(on)
    }
    fn show_light(&mut self, dark: bool) {
        (**self).show_light(dark)
    }
    fn show_lamps(&mut self, on: bool) {
        (**self).show_lamps(on)
    }
    fn show_stop(&mut self, stopped: bool) {
        (**self).show_stop(stopped)
    }
    fn show_distance(&mut self, distance: u32) {
        (**self).show_distance(distance)
    }
}
