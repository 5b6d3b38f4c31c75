pub mod sidebar;
pub mod top_header;

use leptos::prelude::*;

use crate::system::auth::activity::ActivityTracker;
use sidebar::Sidebar;
use top_header::TopHeader;

/// Application shell for the logged-in area.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +---------+--------------------+
/// | Sidebar |      content       |
/// +---------+--------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let sidebar_open = RwSignal::new(true);

    view! {
        <div class="app-layout">
            <ActivityTracker />
            <TopHeader sidebar_open=sidebar_open />
            <div class="app-body">
                <aside class="app-sidebar" class:app-sidebar--collapsed=move || !sidebar_open.get()>
                    <Sidebar />
                </aside>
                <main class="app-main">
                    {children()}
                </main>
            </div>
        </div>
    }
}
