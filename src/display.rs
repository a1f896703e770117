//! Console display sinks

use rail_ctrl_core::display::DisplaySink;
use rail_ctrl_core::log_info;
use rail_ctrl_core::protocol::Slope;

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

/// Panel that writes every indicator update through the log backend
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn show_speed(&mut self, speed: f32) {
        log_info!("speed: {}", speed);
    }

    fn show_slope(&mut self, slope: Slope) {
        let name = match slope {
            Slope::Down => "down",
            Slope::Flat => "flat",
            Slope::Up => "up",
        };
        log_info!("slope: {} ({})", name, slope.direction());
    }

    fn show_gas(&mut self, on: bool) {
        log_info!("gas: {}", on_off(on));
    }

    fn show_brake(&mut self, on: bool) {
        log_info!("brake: {}", on_off(on));
    }

    fn show_mixer(&mut self, on: bool) {
        log_info!("mixer: {}", on_off(on));
    }

    fn show_light(&mut self, dark: bool) {
        log_info!("light sensor: {}", if dark { "dark" } else { "light" });
    }

    fn show_lamps(&mut self, on: bool) {
        log_info!("lamps: {}", on_off(on));
    }

    fn show_stop(&mut self, stopped: bool) {
        log_info!("movement: {}", if stopped { "stopped" } else { "go" });
    }

    fn show_distance(&mut self, distance: u32) {
        log_info!("distance: {}", distance);
    }
}
