use leptos::prelude::*;
use thaw::ConfigProvider;

use crate::routes::AppRoutes;
use crate::shared::notify::{Notifier, ToastHost};
use crate::shared::query_cache::QueryCache;
use crate::system::auth::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    // List versions shared by every page; mutations bump them.
    provide_context(QueryCache::new());
    provide_context(Notifier::new());

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppRoutes />
            </AuthProvider>
            <ToastHost />
        </ConfigProvider>
    }
}
