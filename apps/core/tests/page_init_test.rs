mod helpers;

use helpers::Harness;
use medsearch_core::accessibility::FOCUS_OUTLINE;
use medsearch_core::collab::RecordingClipboard;
use medsearch_core::config::Config;
use medsearch_core::dom::{CardStyle, MemoryPage, Page};
use medsearch_core::enhancements::{FEATURE_MODAL_LABEL_ID, FEATURE_MODAL_TEXT_ID};
use medsearch_core::runtime::demo_page;

#[test]
fn init_applies_every_page_enhancement_once() {
    let mut harness = Harness::with_page(demo_page());

    harness.controller.init();
    harness.controller.init();

    let page = harness.page();
    assert_eq!(page.body()[0], "a.skip-link[href=#main-content] Skip to main content");
    assert_eq!(page.main().unwrap().id.as_deref(), Some("main-content"));
    assert!(page
        .quick_search()
        .iter()
        .all(|control| control.aria_label == Some(format!("Search for {}", control.text))));
    assert!(page.copyable().iter().all(|block| block.copy_control));
    assert_eq!(harness.tooltips.calls(), 1);
    assert_eq!(harness.icons.calls(), 1);
}

#[test]
fn result_cards_reveal_one_after_another() {
    let mut harness = Harness::with_page(MemoryPage::default().with_result_cards(3));
    harness.controller.init();

    harness.wait(150);
    let styles: Vec<Option<CardStyle>> = harness
        .page()
        .cards()
        .iter()
        .map(|card| card.style.clone())
        .collect();
    assert_eq!(
        styles,
        vec![
            Some(CardStyle::revealed()),
            Some(CardStyle::revealed()),
            Some(CardStyle::hidden()),
        ]
    );

    harness.wait(50);
    assert!(harness
        .page()
        .cards()
        .iter()
        .all(|card| card.style == Some(CardStyle::revealed())));
}

#[test]
fn slowest_allowed_stagger_reveals_last_card_in_order() {
    let config = Config {
        card_stagger_ms: 2_000,
        ..Config::default()
    };
    let mut harness = Harness::with_config(
        &config,
        MemoryPage::default().with_result_cards(3),
        RecordingClipboard::insecure(),
    );
    let dispatch = harness.controller.init();
    assert_eq!(dispatch.next_deadline, Some(0));

    harness.wait(3_999);
    assert_eq!(harness.page().cards()[2].style, Some(CardStyle::hidden()));
    harness.wait(1);
    assert_eq!(harness.page().cards()[2].style, Some(CardStyle::revealed()));
}

#[test]
fn link_focus_toggles_card_outline() {
    let mut harness = Harness::with_page(MemoryPage::default().with_result_cards(2));
    let card = harness.page().cards()[1].node;

    harness.controller.on_link_focus(card, true);
    assert_eq!(harness.page().cards()[1].outline.as_deref(), Some(FOCUS_OUTLINE));
    assert_eq!(harness.page().cards()[0].outline, None);

    harness.controller.on_link_focus(card, false);
    assert_eq!(harness.page().cards()[1].outline, None);
}

#[test]
fn feature_info_fills_and_shows_modal() {
    let mut harness = Harness::with_page(demo_page());

    harness
        .controller
        .show_feature_info("Credibility notes", "How sources are assessed.");

    assert_eq!(harness.page().text_by_id(FEATURE_MODAL_LABEL_ID), Some("Credibility notes"));
    assert_eq!(
        harness.page().text_by_id(FEATURE_MODAL_TEXT_ID),
        Some("How sources are assessed.")
    );
    assert_eq!(harness.modals.shown(), vec!["featureModal".to_string()]);
}

#[test]
fn feature_info_without_modal_content_does_not_show() {
    let mut harness = Harness::new();

    harness.controller.show_feature_info("Title", "Body");

    assert!(harness.modals.shown().is_empty());
}

#[test]
fn page_without_main_region_gets_no_skip_link() {
    let mut harness = Harness::new();

    harness.controller.init();

    assert!(!harness.page().has_skip_link());
}
