//! Input mapping
//!
//! Keyboard, pointer and touch all funnel into the same jump intent; the
//! restart control has its own. The driver samples intents once per tick.

/// A raw input event, as delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Key down, identified by its `KeyboardEvent.code`
    Key(String),
    PointerDown,
    TouchStart,
    RestartButton,
}

/// What the player wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Jump, or start a run when idle
    Jump,
    Restart,
}

/// Key codes that trigger a jump
pub const JUMP_KEYS: &[&str] = &["Space", "ArrowUp", "KeyW"];
/// Key code that restarts
pub const RESTART_KEY: &str = "KeyR";

/// Map a raw event to an intent. Unbound keys map to nothing.
pub fn intent_for(input: &RawInput) -> Option<Intent> {
    match input {
        RawInput::Key(code) if JUMP_KEYS.contains(&code.as_str()) => Some(Intent::Jump),
        RawInput::Key(code) if code == RESTART_KEY => Some(Intent::Restart),
        RawInput::Key(_) => None,
        RawInput::PointerDown | RawInput::TouchStart => Some(Intent::Jump),
        RawInput::RestartButton => Some(Intent::Restart),
    }
}

/// Whether the platform should suppress the key's default action (page scroll)
pub fn is_bound_key(code: &str) -> bool {
    JUMP_KEYS.contains(&code) || code == RESTART_KEY
}
