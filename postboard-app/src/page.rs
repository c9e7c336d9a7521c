//! Page skeleton and select menu population

use postboard_core::dom::{Document, LabeledElement, NodeId, build_labeled_element};
use postboard_core::error::DomResult;
use postboard_core::types::{DEFAULT_TEXT_CLASS, PageLayout, SELECT_MENU_ID, User};

/// Label of the empty first option.
pub const SELECT_PROMPT: &str = "Select an Employee";

/// Build the page skeleton under the document root.
///
/// ```html
/// <header><select id="selectMenu"><option value="">Select an Employee</option></select></header>
/// <main><p class="default-text">{placeholder_text}</p></main>
/// ```
pub fn mount_page(doc: &mut Document, placeholder_text: &str) -> DomResult<PageLayout> {
    let root = doc.root();

    let header = doc.create_element("header");
    let select_menu = doc.create_element("select");
    doc.set_attr(select_menu, "id", SELECT_MENU_ID)?;
    let prompt = build_labeled_element(doc, &LabeledElement::new("option").with_text(SELECT_PROMPT));
    doc.set_attr(prompt, "value", "")?;
    doc.append_child(select_menu, prompt)?;
    doc.append_child(header, select_menu)?;

    let main = doc.create_element("main");
    let default_text = build_labeled_element(
        doc,
        &LabeledElement::paragraph(placeholder_text).with_class(DEFAULT_TEXT_CLASS),
    );
    doc.append_child(main, default_text)?;

    doc.append(root, &[header, main])?;
    Ok(PageLayout {
        select_menu,
        main,
        default_text,
    })
}

/// One detached `<option value="{id}">{name}</option>` per user.
pub fn create_select_options(doc: &mut Document, users: Option<&[User]>) -> Option<Vec<NodeId>> {
    let users = users?;
    let mut options = Vec::with_capacity(users.len());
    for user in users {
        let option = build_labeled_element(doc, &LabeledElement::new("option").with_text(&user.name));
        match doc.set_attr(option, "value", &user.id.to_string()) {
            Ok(()) => options.push(option),
            Err(e) => log::error!("Failed to build option for user {}: {e}", user.id),
        }
    }
    Some(options)
}

/// Append one option per user to the select control. Returns the control.
pub fn populate_select_menu(
    doc: &mut Document,
    layout: &PageLayout,
    users: Option<&[User]>,
) -> Option<NodeId> {
    let options = create_select_options(doc, users)?;
    if let Err(e) = doc.append(layout.select_menu, &options) {
        log::error!("Failed to populate the select menu: {e}");
        return None;
    }
    log::debug!("Select menu populated with {} user(s)", options.len());
    Some(layout.select_menu)
}
