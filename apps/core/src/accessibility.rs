use crate::dom::Page;
use crate::model::NodeId;

pub const FOCUS_OUTLINE: &str = "2px solid var(--bs-primary)";

pub fn label_quick_search(page: &mut dyn Page) -> usize {
    let controls = page.quick_search_controls();
    for control in &controls {
        let label = format!("Search for {}", control.text.trim());
        page.set_aria_label(control.node, &label);
    }
    controls.len()
}

pub fn set_card_focus(page: &mut dyn Page, card: NodeId, focused: bool) {
    let outline = if focused { Some(FOCUS_OUTLINE) } else { None };
    page.set_outline(card, outline);
}

pub fn insert_skip_link(page: &mut dyn Page, default_target: &str) -> Option<String> {
    if page.has_skip_link() {
        return None;
    }
    let Some(main) = page.main_region() else {
        tracing::debug!("no primary content region; skip link not inserted");
        return None;
    };

    let target = match main.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => {
            page.set_element_id(main.node, default_target);
            default_target.to_string()
        }
    };
    page.prepend_skip_link(&target);
    Some(target)
}
