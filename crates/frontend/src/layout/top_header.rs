use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::system::auth::use_session;

#[component]
pub fn TopHeader(sidebar_open: RwSignal<bool>) -> impl IntoView {
    let auth = use_session();

    let logout = move |_| {
        log::info!("User signed out");
        auth.sign_out();
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| sidebar_open.update(|open| *open = !*open)
                    title=move || if sidebar_open.get() { "Ocultar menu" } else { "Mostrar menu" }
                >
                    {icon("grid")}
                </button>
                <span class="top-header__title">"Gestão de Atendimentos"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth.user.get().map(|u| u.display_name()).unwrap_or_default()}
                    </span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Sair">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
