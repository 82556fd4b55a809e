/// State of a single lane key with session-time timestamps (seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyState {
    /// Whether the key is currently held down.
    pub pressed: bool,
    /// Session time when the key was last pressed.
    pub press_time: f64,
    /// Session time when the key was last released.
    pub release_time: f64,
}

impl KeyState {
    /// Create a new key state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key-down. Returns false for a repeat while already held.
    pub fn on_press(&mut self, time: f64) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        self.press_time = time;
        true
    }

    /// Register a key-up. Returns how long the key was held, or None if it was not down.
    pub fn on_release(&mut self, time: f64) -> Option<f64> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        self.release_time = time;
        Some((time - self.press_time).max(0.0))
    }
}
