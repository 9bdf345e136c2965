//! Input state management
//!
//! Raw key/touch/gamepad events are recorded as they arrive and folded into
//! one [`ActionState`] per logical action at the start of each frame, so a
//! frame never sees input change underneath it.

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Logical game actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    LaneUp,
    LaneDown,
    Start,
    Restart,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::LaneUp,
        Action::LaneDown,
        Action::Start,
        Action::Restart,
    ];
}

/// Per-frame state of one action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Released,
    JustPressed,
    Held,
    JustReleased,
}

impl ActionState {
    /// Pressed this frame or earlier and not yet released
    pub fn is_down(self) -> bool {
        matches!(self, ActionState::JustPressed | ActionState::Held)
    }
}

/// Non-keyboard sources that press actions directly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    Touch,
    Gamepad,
}

/// Tracks raw input and the derived per-action state machine
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Actions held by touch buttons or gamepads
    virtual_down: HashSet<(InputSource, Action)>,
    /// Action map: action -> list of key bindings
    action_map: HashMap<Action, Vec<KeyCode>>,
    /// Actions that went from up to down since the last frame
    pressed_edges: HashSet<Action>,
    /// Actions that went from down to up since the last frame
    released_edges: HashSet<Action>,
    /// Frame-stable states computed by `begin_frame`
    states: HashMap<Action, ActionState>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            virtual_down: HashSet::new(),
            action_map: Self::default_action_map(),
            pressed_edges: HashSet::new(),
            released_edges: HashSet::new(),
            states: HashMap::new(),
        }
    }

    fn default_action_map() -> HashMap<Action, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(Action::MoveLeft, vec![KeyCode::ArrowLeft, KeyCode::KeyA]);
        map.insert(Action::MoveRight, vec![KeyCode::ArrowRight, KeyCode::KeyD]);
        map.insert(
            Action::Jump,
            vec![KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW],
        );
        // Lane keys overlap the jump keys; each game reads only the actions it uses
        map.insert(Action::LaneUp, vec![KeyCode::ArrowUp, KeyCode::KeyW]);
        map.insert(Action::LaneDown, vec![KeyCode::ArrowDown, KeyCode::KeyS]);
        map.insert(Action::Start, vec![KeyCode::Enter, KeyCode::NumpadEnter]);
        map.insert(Action::Restart, vec![KeyCode::KeyR]);
        map
    }

    /// Bind an action to one or more keys, replacing its previous bindings
    pub fn bind_action(&mut self, action: Action, keys: Vec<KeyCode>) {
        self.record(|input| {
            input.action_map.insert(action, keys);
        });
    }

    /// Actions bound to a key, in `Action::ALL` order
    pub fn actions_for_key(&self, key: KeyCode) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| {
                self.action_map
                    .get(action)
                    .is_some_and(|keys| keys.contains(&key))
            })
            .collect()
    }

    /// Whether any action uses this key
    pub fn is_bound(&self, key: KeyCode) -> bool {
        !self.actions_for_key(key).is_empty()
    }

    /// Process a key press event. Auto-repeat presses are ignored.
    pub fn process_key_down(&mut self, key: KeyCode) {
        if self.keys_down.contains(&key) {
            return;
        }
        self.record(|input| {
            input.keys_down.insert(key);
        });
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.record(|input| {
            input.keys_down.remove(&key);
        });
    }

    /// Press an action from a touch button or gamepad
    pub fn press(&mut self, source: InputSource, action: Action) {
        self.record(|input| {
            input.virtual_down.insert((source, action));
        });
    }

    /// Release an action held by a touch button or gamepad
    pub fn release(&mut self, source: InputSource, action: Action) {
        self.record(|input| {
            input.virtual_down.remove(&(source, action));
        });
    }

    /// Drop every held key and button (focus loss, round reset)
    pub fn release_all(&mut self) {
        self.record(|input| {
            input.keys_down.clear();
            input.virtual_down.clear();
        });
    }

    /// Forget pending edges. Actions still physically down read as `Held`,
    /// everything else as `Released`, so only a fresh press is one-shot.
    pub fn clear_edges(&mut self) {
        self.pressed_edges.clear();
        self.released_edges.clear();
        for action in Action::ALL {
            let state = if self.raw_down(action) {
                ActionState::Held
            } else {
                ActionState::Released
            };
            self.states.insert(action, state);
        }
    }

    /// Fold raw edges into per-action states. Call once at the start of each frame.
    pub fn begin_frame(&mut self) {
        for action in Action::ALL {
            let pressed = self.pressed_edges.contains(&action);
            let released = self.released_edges.contains(&action);
            let down = self.raw_down(action);

            let state = match (pressed, released, down) {
                (true, _, _) => ActionState::JustPressed,
                (false, true, false) => ActionState::JustReleased,
                (false, _, true) => ActionState::Held,
                (false, false, false) => ActionState::Released,
            };
            self.states.insert(action, state);
        }
        self.pressed_edges.clear();
        self.released_edges.clear();
    }

    // --- Query methods ---

    /// State of an action as of the last `begin_frame`
    pub fn state(&self, action: Action) -> ActionState {
        self.states.get(&action).copied().unwrap_or_default()
    }

    /// Is an action held this frame?
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.state(action).is_down()
    }

    /// Was an action pressed since the previous frame?
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.state(action) == ActionState::JustPressed
    }

    /// Is a key currently held down? (raw, not frame-stable)
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn raw_down(&self, action: Action) -> bool {
        let key_match = self
            .action_map
            .get(&action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false);
        key_match
            || self
                .virtual_down
                .iter()
                .any(|(_, held)| *held == action)
    }

    /// Apply a raw change and record action-level edges it caused
    fn record(&mut self, change: impl FnOnce(&mut Self)) {
        let before: Vec<bool> = Action::ALL.iter().map(|a| self.raw_down(*a)).collect();
        change(self);
        for (action, was_down) in Action::ALL.iter().zip(before) {
            let is_down = self.raw_down(*action);
            if is_down && !was_down {
                self.pressed_edges.insert(*action);
            } else if was_down && !is_down {
                self.released_edges.insert(*action);
            }
        }
    }
}
