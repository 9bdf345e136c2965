//! Gamepad input via gilrs, mapped onto the same logical actions as the keyboard

use gilrs::{Axis, Button, EventType, Gilrs};
use tinder_runtime::{Action, InputSource, InputState};

/// Left stick deflection that counts as a held direction
const STICK_THRESHOLD: f32 = 0.35;

/// Logical action for a gamepad button
pub fn action_for_button(button: Button) -> Option<Action> {
    match button {
        Button::DPadLeft => Some(Action::MoveLeft),
        Button::DPadRight => Some(Action::MoveRight),
        Button::South => Some(Action::Jump),
        Button::DPadUp => Some(Action::LaneUp),
        Button::DPadDown => Some(Action::LaneDown),
        Button::Start => Some(Action::Start),
        Button::Select | Button::North => Some(Action::Restart),
        _ => None,
    }
}

/// Held (left, right) from a horizontal stick value
pub fn stick_direction(value: f32) -> (bool, bool) {
    (value <= -STICK_THRESHOLD, value >= STICK_THRESHOLD)
}

pub struct GamepadInput {
    gilrs: Option<Gilrs>,
    stick: (bool, bool),
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new()
    }
}

impl GamepadInput {
    pub fn new() -> Self {
        let gilrs = Gilrs::new()
            .map_err(|e| tracing::warn!("gamepad support unavailable: {e}"))
            .ok();
        if let Some(gilrs) = &gilrs {
            for (_, pad) in gilrs.gamepads() {
                tracing::info!("gamepad connected: {}", pad.name());
            }
        }
        Self {
            gilrs,
            stick: (false, false),
        }
    }

    /// Drain pending gamepad events into `input`. Returns the actions newly pressed.
    pub fn poll(&mut self, input: &mut InputState) -> Vec<Action> {
        let mut pressed = Vec::new();
        let Some(gilrs) = &mut self.gilrs else {
            return pressed;
        };
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(action) = action_for_button(button) {
                        input.press(InputSource::Gamepad, action);
                        pressed.push(action);
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(action) = action_for_button(button) {
                        input.release(InputSource::Gamepad, action);
                    }
                }
                EventType::AxisChanged(Axis::LeftStickX, value, _) => {
                    let stick = stick_direction(value);
                    apply_stick(input, self.stick, stick);
                    self.stick = stick;
                }
                EventType::Connected => tracing::info!("gamepad connected"),
                EventType::Disconnected => {
                    tracing::info!("gamepad disconnected");
                    for action in Action::ALL {
                        input.release(InputSource::Gamepad, action);
                    }
                    self.stick = (false, false);
                }
                _ => {}
            }
        }
        pressed
    }
}

fn apply_stick(input: &mut InputState, old: (bool, bool), new: (bool, bool)) {
    for (was, is, action) in [
        (old.0, new.0, Action::MoveLeft),
        (old.1, new.1, Action::MoveRight),
    ] {
        match (was, is) {
            (false, true) => input.press(InputSource::Gamepad, action),
            (true, false) => input.release(InputSource::Gamepad, action),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(action_for_button(Button::South), Some(Action::Jump));
        assert_eq!(action_for_button(Button::DPadDown), Some(Action::LaneDown));
        assert_eq!(action_for_button(Button::Start), Some(Action::Start));
        assert_eq!(action_for_button(Button::LeftTrigger), None);
    }

    #[test]
    fn test_stick_threshold() {
        assert_eq!(stick_direction(0.0), (false, false));
        assert_eq!(stick_direction(0.2), (false, false));
        assert_eq!(stick_direction(0.9), (false, true));
        assert_eq!(stick_direction(-0.5), (true, false));
    }

    #[test]
    fn test_stick_presses_and_releases() {
        let mut input = InputState::new();
        apply_stick(&mut input, (false, false), (false, true));
        input.begin_frame();
        assert!(input.is_action_just_pressed(Action::MoveRight));

        apply_stick(&mut input, (false, true), (false, false));
        input.begin_frame();
        assert!(!input.is_action_pressed(Action::MoveRight));
    }
}
