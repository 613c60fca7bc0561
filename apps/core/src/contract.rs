use serde::{Deserialize, Serialize};

use crate::controller::ClickTarget;
use crate::keyboard::KeyPress;
use crate::model::{ClipboardTicket, Millis, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum PageEvent {
    Init,
    Input {
        value: String,
    },
    Submit,
    QueryKey(KeyPress),
    KeyDown(KeyPress),
    Click(ClickTarget),
    LinkFocus {
        card: NodeId,
        focused: bool,
    },
    Tick {
        now: Millis,
    },
    Copy {
        text: String,
    },
    ClipboardSettled {
        ticket: ClipboardTicket,
        #[serde(default)]
        error: Option<String>,
    },
    ShowFeatureInfo {
        title: String,
        body: String,
    },
    RuntimeError {
        #[serde(default)]
        message: Option<String>,
    },
    UnhandledRejection {
        reason: String,
    },
}
