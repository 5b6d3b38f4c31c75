use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_session;
use crate::shared::config::LOGIN_ROUTE;

/// Renders `children` only with a valid session, otherwise redirects to the
/// login page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_session();
    auth.revalidate();

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <Redirect path=LOGIN_ROUTE /> }
        >
            {children()}
        </Show>
    }
}
