use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn with_meta(key: &str) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }

    pub fn has_platform_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    FocusSearch,
    Dismiss,
    Ignored,
}

pub fn classify(key: &KeyPress) -> KeyCommand {
    if key.has_platform_modifier() && key.key.eq_ignore_ascii_case("k") {
        return KeyCommand::FocusSearch;
    }
    if key.key == "Escape" {
        return KeyCommand::Dismiss;
    }
    KeyCommand::Ignored
}

pub fn is_submit_key(key: &KeyPress) -> bool {
    key.key == "Enter" && !key.shift && !key.ctrl && !key.meta && !key.alt
}
