mod helpers;

use helpers::Harness;
use medsearch_core::keyboard::KeyPress;

#[test]
fn mod_k_focuses_and_selects_query_from_anywhere() {
    for key in [KeyPress::with_ctrl("k"), KeyPress::with_meta("k")] {
        let mut harness = Harness::new();
        harness.set_query("kidney disease");
        harness.controller.page_mut().blur_query();

        let dispatch = harness.controller.on_key_down(&key);

        assert!(dispatch.prevent_default);
        assert!(harness.page().is_query_focused());
        assert!(harness.page().is_query_selected());
        assert_eq!(harness.page().query(), "kidney disease");
    }
}

#[test]
fn escape_removes_panel_and_hides_open_modal() {
    let mut harness = Harness::new();
    harness.modals.open("featureModal");
    harness.type_query("cancer");
    harness.wait(300);

    let dispatch = harness.controller.on_key_down(&KeyPress::plain("Escape"));

    assert!(!dispatch.prevent_default);
    assert!(harness.page().suggestions().is_none());
    assert_eq!(harness.modals.hidden(), vec!["featureModal".to_string()]);
}

#[test]
fn escape_leaves_closed_modal_alone() {
    let mut harness = Harness::new();

    harness.controller.on_key_down(&KeyPress::plain("Escape"));

    assert!(harness.modals.hidden().is_empty());
}

#[test]
fn unbound_keys_keep_default_behavior() {
    let mut harness = Harness::new();

    let dispatch = harness.controller.on_key_down(&KeyPress::plain("k"));

    assert!(!dispatch.prevent_default);
    assert!(!harness.page().is_query_focused());
}
