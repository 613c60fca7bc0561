use std::collections::HashMap;

use crate::collab::ClipboardHost;
use crate::dom::Page;
use crate::model::ClipboardTicket;

pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy to clipboard";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
    #[error("copy command failed")]
    CopyCommandFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyProgress {
    Settled(CopyOutcome),
    Pending(ClipboardTicket),
}

#[derive(Debug, Default)]
pub struct ClipboardBridge {
    next_ticket: u64,
    pending: HashMap<ClipboardTicket, String>,
}

impl ClipboardBridge {
    pub fn copy(
        &mut self,
        clipboard: &mut dyn ClipboardHost,
        page: &mut dyn Page,
        text: &str,
    ) -> CopyProgress {
        if !clipboard.is_secure_context() {
            return CopyProgress::Settled(fallback_outcome(page, text));
        }

        self.next_ticket += 1;
        let ticket = ClipboardTicket(self.next_ticket);
        match clipboard.begin_write(ticket, text) {
            Ok(()) => {
                self.pending.insert(ticket, text.to_string());
                CopyProgress::Pending(ticket)
            }
            Err(error) => {
                tracing::warn!(%error, "secure clipboard unavailable; using fallback");
                CopyProgress::Settled(fallback_outcome(page, text))
            }
        }
    }

    /// Resolves a pending asynchronous write. Unknown or already settled
    /// tickets yield `None`.
    pub fn settle(
        &mut self,
        page: &mut dyn Page,
        ticket: ClipboardTicket,
        result: Result<(), ClipboardError>,
    ) -> Option<CopyOutcome> {
        let text = self.pending.remove(&ticket)?;
        match result {
            Ok(()) => Some(CopyOutcome::Copied),
            Err(error) => {
                tracing::warn!(%error, ticket = ticket.0, "async clipboard write failed; using fallback");
                Some(fallback_outcome(page, &text))
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn fallback_outcome(page: &mut dyn Page, text: &str) -> CopyOutcome {
    match fallback_copy(page, text) {
        Ok(()) => CopyOutcome::Copied,
        Err(error) => {
            tracing::error!(%error, "fallback copy failed");
            CopyOutcome::Failed
        }
    }
}

fn fallback_copy(page: &mut dyn Page, text: &str) -> Result<(), ClipboardError> {
    let scratch = page.mount_scratch_input(text);
    page.select_node_text(scratch);
    let copied = page.exec_copy();
    page.unmount(scratch);

    if copied {
        Ok(())
    } else {
        Err(ClipboardError::CopyCommandFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClipboardBridge, ClipboardError, CopyOutcome, CopyProgress};
    use crate::collab::RecordingClipboard;
    use crate::dom::MemoryPage;

    #[test]
    fn insecure_context_uses_fallback_and_cleans_up() {
        let mut bridge = ClipboardBridge::default();
        let mut clipboard = RecordingClipboard::insecure();
        let mut page = MemoryPage::default();

        let progress = bridge.copy(&mut clipboard, &mut page, "hello");

        assert_eq!(progress, CopyProgress::Settled(CopyOutcome::Copied));
        assert_eq!(page.copied_text(), Some("hello"));
        assert!(page.scratch_input().is_none());
        assert!(clipboard.writes().is_empty());
    }

    #[test]
    fn unsupported_copy_command_fails_without_leaking_scratch_input() {
        let mut bridge = ClipboardBridge::default();
        let mut clipboard = RecordingClipboard::insecure();
        let mut page = MemoryPage::default().with_copy_command(false);

        let progress = bridge.copy(&mut clipboard, &mut page, "hello");

        assert_eq!(progress, CopyProgress::Settled(CopyOutcome::Failed));
        assert!(page.scratch_input().is_none());
    }

    #[test]
    fn failed_async_write_falls_back_once() {
        let mut bridge = ClipboardBridge::default();
        let mut clipboard = RecordingClipboard::secure();
        let mut page = MemoryPage::default();

        let CopyProgress::Pending(ticket) = bridge.copy(&mut clipboard, &mut page, "notes") else {
            panic!("expected pending write");
        };
        let outcome = bridge.settle(
            &mut page,
            ticket,
            Err(ClipboardError::Rejected("denied".into())),
        );
        assert_eq!(outcome, Some(CopyOutcome::Copied));
        assert_eq!(page.copied_text(), Some("notes"));
        assert_eq!(bridge.settle(&mut page, ticket, Ok(())), None);
    }
}
