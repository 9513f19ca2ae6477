//! HTML for selector groups.
//!
//! Two flavors, both adapted to carry the group's selection key so a client
//! script can mirror a reader's choice across groups:
//!
//! - interactive: ARIA `tablist` buttons and `tabpanel`s, inactive panels `hidden`;
//! - static: radio inputs with CSS `:checked` switching, no script required.
//!
//! Element ids use the document-local group number and the panel's position;
//! panel ids appear only in `data-panel-id` attributes.

use std::fmt::Write;

use crate::{SelectorGroup, escape_html};

/// Render the opening HTML of a group up to (not including) its first panel.
pub(crate) fn render_group_open(
    group_num: usize,
    group: &SelectorGroup,
    active: usize,
    static_mode: bool,
) -> String {
    let mut output = String::with_capacity(512);
    let key_attr = group
        .key
        .as_deref()
        .map(|key| format!(r#" data-group-key="{}""#, escape_html(key)))
        .unwrap_or_default();

    if static_mode {
        let _ = write!(
            output,
            r#"<div class="tabs tabs--static" id="tabs-{group_num}"{key_attr}>"#
        );
        for (idx, panel) in group.panels.iter().enumerate() {
            let checked = if idx == active { " checked" } else { "" };
            let _ = write!(
                output,
                r#"<input type="radio" name="tabs-{group_num}" id="tab-{group_num}-{idx}" data-panel-id="{}"{checked} />"#,
                escape_html(&panel.id)
            );
        }
        output.push_str(r#"<div class="tabs-buttons">"#);
        for (idx, panel) in group.panels.iter().enumerate() {
            let _ = write!(
                output,
                r#"<label for="tab-{group_num}-{idx}">{}</label>"#,
                escape_html(&panel.label)
            );
        }
        output.push_str("</div>");
        return output;
    }

    let _ = write!(
        output,
        r#"<div class="tabs" id="tabs-{group_num}"{key_attr}>"#
    );
    output.push_str(r#"<div class="tabs-buttons" role="tablist">"#);
    for (idx, panel) in group.panels.iter().enumerate() {
        let selected = idx == active;
        let _ = write!(
            output,
            r#"<button role="tab" id="tab-{group_num}-{idx}" aria-controls="panel-{group_num}-{idx}" aria-selected="{selected}" tabindex="{}" data-panel-id="{}">{}</button>"#,
            if selected { "0" } else { "-1" },
            escape_html(&panel.id),
            escape_html(&panel.label)
        );
    }
    output.push_str("</div>");

    output
}

/// Render the opening HTML for one panel.
pub(crate) fn render_panel_open(
    group_num: usize,
    idx: usize,
    panel_id: &str,
    is_active: bool,
    static_mode: bool,
) -> String {
    if static_mode {
        return format!(
            r#"<div class="tabs-panel" data-panel-id="{}">"#,
            escape_html(panel_id)
        );
    }

    let hidden = if is_active { "" } else { " hidden" };
    format!(
        r#"<div role="tabpanel" id="panel-{group_num}-{idx}" aria-labelledby="tab-{group_num}-{idx}" data-panel-id="{}"{hidden}>"#,
        escape_html(panel_id)
    )
}
