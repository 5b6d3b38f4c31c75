use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::shared::config::HOME_ROUTE;
use crate::system::auth::{api, use_session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (login, set_login) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let auth = use_session();
    auth.revalidate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let login_val = login.get().trim().to_string();
        let password_val = password.get();
        if login_val.is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Informe login e senha".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(login_val, password_val).await {
                Ok(response) => {
                    set_is_loading.set(false);
                    auth.sign_in(&response);
                }
                Err(e) => {
                    log::warn!("Login failed: {e}");
                    set_error_message.set(Some(e.to_string()));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        // a valid session goes straight to the app
        {move || auth.is_authenticated().then(|| view! { <Redirect path=HOME_ROUTE /> })}
        <div class="login-container">
            <div class="login-box">
                <h1>"Gestão de Atendimentos"</h1>
                <h2>"Acesso ao sistema"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="login">"Login"</label>
                        <input
                            type="text"
                            id="login"
                            autocomplete="username"
                            prop:value=move || login.get()
                            on:input=move |ev| set_login.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Senha"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
