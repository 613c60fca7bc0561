mod helpers;

use helpers::Harness;
use medsearch_core::clipboard::{ClipboardError, COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE};
use medsearch_core::collab::RecordingClipboard;
use medsearch_core::controller::ClickTarget;
use medsearch_core::dom::MemoryPage;

fn messages(harness: &Harness) -> Vec<String> {
    harness
        .page()
        .alerts()
        .iter()
        .map(|alert| alert.view.message.clone())
        .collect()
}

#[test]
fn fallback_copy_shows_one_success_alert() {
    let mut harness = Harness::new();

    harness.controller.copy("hello");

    assert_eq!(messages(&harness), vec![COPY_SUCCESS_MESSAGE.to_string()]);
    assert_eq!(harness.page().copied_text(), Some("hello"));
    assert!(harness.page().scratch_input().is_none());
}

#[test]
fn unsupported_copy_command_shows_one_failure_alert() {
    let mut harness = Harness::with_page(MemoryPage::default().with_copy_command(false));

    harness.controller.copy("hello");

    assert_eq!(messages(&harness), vec![COPY_FAILURE_MESSAGE.to_string()]);
    assert_eq!(harness.alert_classes(), vec!["alert-danger".to_string()]);
    assert!(harness.page().scratch_input().is_none());
}

#[test]
fn secure_copy_alerts_once_when_write_settles() {
    let mut harness = Harness::with(MemoryPage::default(), RecordingClipboard::secure());

    harness.controller.copy("hello");
    assert!(harness.page().alerts().is_empty());
    assert_eq!(harness.controller.pending_copies(), 1);

    let (ticket, text) = harness.clipboard.writes()[0].clone();
    assert_eq!(text, "hello");
    harness.controller.clipboard_settled(ticket, Ok(()));
    harness.controller.clipboard_settled(ticket, Ok(()));

    assert_eq!(messages(&harness), vec![COPY_SUCCESS_MESSAGE.to_string()]);
    assert_eq!(harness.controller.pending_copies(), 0);
    assert_eq!(harness.page().copied_text(), None);
}

#[test]
fn failed_secure_write_and_failed_fallback_alert_once() {
    let page = MemoryPage::default().with_copy_command(false);
    let mut harness = Harness::with(page, RecordingClipboard::secure());

    harness.controller.copy("hello");
    let (ticket, _) = harness.clipboard.writes()[0].clone();
    harness
        .controller
        .clipboard_settled(ticket, Err(ClipboardError::Rejected("NotAllowedError".into())));

    assert_eq!(messages(&harness), vec![COPY_FAILURE_MESSAGE.to_string()]);
    assert!(harness.page().scratch_input().is_none());
}

#[test]
fn rejected_secure_write_falls_back_immediately() {
    let mut harness = Harness::with(MemoryPage::default(), RecordingClipboard::rejecting());

    harness.controller.copy("hello");

    assert_eq!(messages(&harness), vec![COPY_SUCCESS_MESSAGE.to_string()]);
    assert_eq!(harness.page().copied_text(), Some("hello"));
    assert_eq!(harness.controller.pending_copies(), 0);
}

#[test]
fn copy_control_copies_its_block_text() {
    let page = MemoryPage::default().with_copyable("  AI summary: statins reduce events.  ");
    let mut harness = Harness::with_page(page);
    harness.controller.init();
    let node = harness.page().copyable()[0].node;

    harness.controller.on_click(ClickTarget::CopyControl(node));

    assert_eq!(harness.page().copied_text(), Some("AI summary: statins reduce events."));
    assert_eq!(harness.page().alerts().len(), 1);
}
