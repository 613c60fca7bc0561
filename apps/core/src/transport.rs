use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use crate::clipboard::ClipboardError;
use crate::contract::PageEvent;
use crate::controller::{Dispatch, PageController};
use crate::dom::Page;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidEvent,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { dispatch: Dispatch },
    Err { error: ErrorResponse },
}

pub fn handle_event<P: Page>(controller: &mut PageController<P>, event: PageEvent) -> Dispatch {
    match event {
        PageEvent::Init => controller.init(),
        PageEvent::Input { value } => controller.on_input(&value),
        PageEvent::Submit => controller.on_submit(),
        PageEvent::QueryKey(key) => controller.on_query_key(&key),
        PageEvent::KeyDown(key) => controller.on_key_down(&key),
        PageEvent::Click(target) => controller.on_click(target),
        PageEvent::LinkFocus { card, focused } => controller.on_link_focus(card, focused),
        PageEvent::Tick { now } => controller.advance_to(now),
        PageEvent::Copy { text } => controller.copy(&text),
        PageEvent::ClipboardSettled { ticket, error } => {
            let result = match error {
                Some(message) => Err(ClipboardError::Rejected(message)),
                None => Ok(()),
            };
            controller.clipboard_settled(ticket, result)
        }
        PageEvent::ShowFeatureInfo { title, body } => controller.show_feature_info(&title, &body),
        PageEvent::RuntimeError { message } => controller.report_runtime_error(message.as_deref()),
        PageEvent::UnhandledRejection { reason } => controller.report_unhandled_rejection(&reason),
    }
}

pub fn decode_event(payload: &str) -> Result<PageEvent, ErrorResponse> {
    serde_json::from_str::<PageEvent>(payload).map_err(|error| {
        let code = match error.classify() {
            Category::Data => ErrorCode::InvalidEvent,
            Category::Syntax | Category::Eof | Category::Io => ErrorCode::InvalidJson,
        };
        ErrorResponse {
            code,
            message: error.to_string(),
        }
    })
}

pub fn handle_json<P: Page>(controller: &mut PageController<P>, payload: &str) -> String {
    let response = match decode_event(payload) {
        Ok(event) => TransportResponse::Ok {
            dispatch: handle_event(controller, event),
        },
        Err(error) => {
            tracing::warn!(code = ?error.code, message = %error.message, "rejected host event");
            TransportResponse::Err { error }
        }
    };

    encode_response(&response)
}

pub fn encode_response(response: &TransportResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|error| {
        format!(
            r#"{{"status":"err","error":{{"code":"internal","message":{}}}}}"#,
            serde_json::Value::String(error.to_string())
        )
    })
}
