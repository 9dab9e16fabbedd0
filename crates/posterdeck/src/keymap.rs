use serde::{Deserialize, Serialize};

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    JumpTo(usize),
}

/// A key-release event, named the way `KeyboardEvent.key` names keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeymapKind {
    /// Left/right arrows only
    Arrows,
    /// Arrows plus backtick and digit jumps
    #[default]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    kind: KeymapKind,
    ignore_ctrl: bool,
}

impl Keymap {
    pub fn new(kind: KeymapKind, ignore_ctrl: bool) -> Self {
        Self { kind, ignore_ctrl }
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<Command> {
        if self.ignore_ctrl && event.ctrl {
            return None;
        }

        let command = match event.key.as_str() {
            "ArrowRight" => Some(Command::Advance),
            "ArrowLeft" => Some(Command::Retreat),
            key if self.kind == KeymapKind::Full => jump_target(key).map(Command::JumpTo),
            _ => None,
        };
        tracing::debug!(key = %event.key, ctrl = event.ctrl, ?command, "resolved key");
        command
    }
}

/// Backtick goes to the base view, `1`-`9` to their number, `0` to ten.
fn jump_target(key: &str) -> Option<usize> {
    match key {
        "`" => Some(0),
        "0" => Some(10),
        _ => {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            c.to_digit(10).map(|d| d as usize)
        }
    }
}
