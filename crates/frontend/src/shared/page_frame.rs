//! PageFrame — standard root wrapper for every routed page.
//!
//! Sets two metadata attributes on the root element:
//!   - `id`                 — `"{entity}--{category}"`, e.g. `"a001_sector--list"`
//!   - `data-page-category` — one of the PAGE_CAT_* constants

use leptos::prelude::*;

/// List of records with search and dialogs
pub const PAGE_CAT_LIST: &str = "list";

/// Calendar or report over one aggregate
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Login, account settings
pub const PAGE_CAT_SYSTEM: &str = "system";

/// `{entity}--{category}`
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{entity}--{category}")
}

#[component]
pub fn PageFrame(
    #[prop(into)] page_id: String,
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let base_class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
