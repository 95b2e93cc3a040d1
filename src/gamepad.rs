//! Gamepad support through gilrs.
//!
//! Connection and axis events are collected when polled and read back by the game
//! on the next frame. The left stick moves, the right stick aims and fires.

use gilrs::{Axis, Event, EventType, Gilrs};
use glam::Vec2;
use log::{info, warn};

/// Pads reported in the status line
pub const MAX_PADS: usize = 4;
const STICK_DEADZONE: f32 = 0.15;

pub struct GamepadHub {
    /// `None` when the platform has no usable gamepad backend
    gilrs: Option<Gilrs>,
    connected: [bool; MAX_PADS],
    main_stick: Option<Vec2>,
    second_stick: Option<Vec2>,
    activity: bool,
}

impl GamepadHub {
    pub fn new() -> Self {
        match Gilrs::new() {
            Ok(gilrs) => {
                let mut hub = Self::with_backend(Some(gilrs));
                let ids: Vec<usize> = hub
                    .gilrs
                    .iter()
                    .flat_map(|g| g.gamepads().map(|(id, _)| usize::from(id)))
                    .collect();
                for id in ids {
                    hub.set_connected(id, true);
                }
                info!("Gamepad support ready: {}", hub.status_text());
                hub
            }
            Err(err) => {
                warn!("Gamepads unavailable: {err}");
                Self::disabled()
            }
        }
    }

    /// Hub without a backend; never reports any pad
    pub fn disabled() -> Self {
        Self::with_backend(None)
    }

    fn with_backend(gilrs: Option<Gilrs>) -> Self {
        Self {
            gilrs,
            connected: [false; MAX_PADS],
            main_stick: None,
            second_stick: None,
            activity: false,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.gilrs.is_some()
    }

    /// Drains pending gamepad events
    pub fn poll(&mut self) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            let index = usize::from(id);
            match event {
                EventType::Connected => {
                    info!("Pad {} connected", index + 1);
                    if let Some(slot) = self.connected.get_mut(index) {
                        *slot = true;
                    }
                }
                EventType::Disconnected => {
                    info!("Pad {} disconnected", index + 1);
                    if let Some(slot) = self.connected.get_mut(index) {
                        *slot = false;
                    }
                }
                EventType::ButtonPressed(..) => {
                    self.activity = true;
                }
                EventType::AxisChanged(..) => {
                    self.activity = true;
                    let pad = gilrs.gamepad(id);
                    self.main_stick = Some(stick_from_axes(
                        pad.value(Axis::LeftStickX),
                        pad.value(Axis::LeftStickY),
                    ));
                    self.second_stick = Some(stick_from_axes(
                        pad.value(Axis::RightStickX),
                        pad.value(Axis::RightStickY),
                    ));
                }
                _ => {}
            }
        }
    }

    fn set_connected(&mut self, index: usize, connected: bool) {
        if let Some(slot) = self.connected.get_mut(index) {
            *slot = connected;
        }
    }

    /// Whether a button or stick moved since the last call
    pub fn take_activity(&mut self) -> bool {
        std::mem::take(&mut self.activity)
    }

    pub fn main_stick(&self) -> Option<Vec2> {
        self.main_stick
    }

    pub fn second_stick(&self) -> Option<Vec2> {
        self.second_stick
    }

    pub fn status_text(&self) -> String {
        status_text(&self.connected)
    }
}

impl Default for GamepadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// "Pad 1 connected.  Pad 3 connected." for every connected slot
pub fn status_text(connected: &[bool; MAX_PADS]) -> String {
    connected
        .iter()
        .enumerate()
        .filter(|(_, connected)| **connected)
        .map(|(i, _)| format!("Pad {} connected.", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Converts raw axes (y up) to a screen-space stick (y down) with a radial deadzone
pub fn stick_from_axes(x: f32, y: f32) -> Vec2 {
    let stick = Vec2::new(x, -y);
    if stick.length() < STICK_DEADZONE {
        Vec2::ZERO
    } else {
        stick.clamp_length_max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(&[false; MAX_PADS]), "");
        assert_eq!(
            status_text(&[true, false, true, false]),
            "Pad 1 connected.  Pad 3 connected."
        );
    }

    #[test]
    fn test_stick_deadzone() {
        assert_eq!(stick_from_axes(0.1, -0.05), Vec2::ZERO);
        assert_eq!(stick_from_axes(0.5, 0.0), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_stick_y_points_down_screen() {
        let stick = stick_from_axes(0.0, 1.0);
        assert_eq!(stick, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_stick_clamped_to_unit() {
        let stick = stick_from_axes(1.0, 1.0);
        assert!((stick.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_disabled_hub() {
        let mut hub = GamepadHub::disabled();
        hub.poll();
        assert!(!hub.is_supported());
        assert!(!hub.take_activity());
        assert_eq!(hub.main_stick(), None);
        assert_eq!(hub.second_stick(), None);
        assert_eq!(hub.status_text(), "");
    }

    #[test]
    fn test_connection_slots() {
        let mut hub = GamepadHub::disabled();
        hub.set_connected(1, true);
        // Pads past the fourth are not reported
        hub.set_connected(7, true);
        assert_eq!(hub.status_text(), "Pad 2 connected.");
        hub.set_connected(1, false);
        assert_eq!(hub.status_text(), "");
    }
}
