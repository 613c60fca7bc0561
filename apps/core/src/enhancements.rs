use crate::collab::ModalHost;
use crate::dom::{CardStyle, Page};
use crate::model::{Millis, NodeId};
use crate::timer::{TimerPurpose, TimerWheel};

pub const FEATURE_MODAL_LABEL_ID: &str = "featureModalLabel";
pub const FEATURE_MODAL_TEXT_ID: &str = "featureModalText";

pub fn install_copy_controls(page: &mut dyn Page) -> usize {
    let mut inserted = 0;
    for block in page.copyable_blocks() {
        if page.has_copy_control(block.node) {
            continue;
        }
        page.insert_copy_control(block.node);
        inserted += 1;
    }
    inserted
}

pub fn copyable_text(page: &dyn Page, node: NodeId) -> Option<String> {
    page.copyable_blocks()
        .into_iter()
        .find(|block| block.node == node)
        .map(|block| block.text.trim().to_string())
}

pub fn schedule_card_reveal(page: &mut dyn Page, timers: &mut TimerWheel, stagger_ms: Millis) -> usize {
    let cards = page.result_cards();
    let hidden = CardStyle::hidden();
    for (index, card) in cards.iter().enumerate() {
        page.set_card_style(*card, &hidden);
        timers.arm(stagger_ms.saturating_mul(index as Millis), TimerPurpose::CardReveal(*card));
    }
    cards.len()
}

pub fn reveal_card(page: &mut dyn Page, card: NodeId) {
    page.set_card_style(card, &CardStyle::revealed());
}

pub fn show_feature_info(
    page: &mut dyn Page,
    modals: &mut dyn ModalHost,
    modal_id: &str,
    title: &str,
    body: &str,
) -> bool {
    let has_label = page.set_text_by_id(FEATURE_MODAL_LABEL_ID, title);
    let has_text = page.set_text_by_id(FEATURE_MODAL_TEXT_ID, body);
    if !has_label || !has_text {
        tracing::warn!(modal_id, "feature modal content elements missing");
        return false;
    }
    modals.show(modal_id);
    true
}
