use contracts::shared::api_error::ApiError;
use contracts::system::auth::{validate_password_change, ChangeLoginRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::crud::form::text_input;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::{page_id, PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::{api, use_session};

fn bound_input(signal: RwSignal<String>, kind: &'static str) -> impl IntoView {
    text_input(
        Signal::derive(move || signal.get()),
        move |value: String| signal.set(value),
        kind,
    )
}

/// Password and login changes for the signed-in user.
#[component]
pub fn AccountPage() -> impl IntoView {
    let auth = use_session();
    let notifier = use_notifier();

    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let password_error = RwSignal::new(None::<String>);
    let saving_password = RwSignal::new(false);

    let new_login = RwSignal::new(String::new());
    let login_password = RwSignal::new(String::new());
    let login_error = RwSignal::new(None::<String>);
    let saving_login = RwSignal::new(false);

    let submit_password = move || {
        let request = match validate_password_change(
            &current_password.get_untracked(),
            &new_password.get_untracked(),
            &confirmation.get_untracked(),
        ) {
            Ok(request) => request,
            Err(message) => {
                password_error.set(Some(message));
                return;
            }
        };
        password_error.set(None);
        saving_password.set(true);
        spawn_local(async move {
            match api::change_password(&request).await {
                Ok(()) => {
                    notifier.success("Senha alterada com sucesso");
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirmation.set(String::new());
                }
                Err(ApiError::Unauthorized) => {}
                Err(e) => {
                    log::error!("Password change failed: {e}");
                    password_error.set(Some(e.to_string()));
                }
            }
            saving_password.set(false);
        });
    };

    let submit_login = move || {
        let login = new_login.get_untracked().trim().to_string();
        let password = login_password.get_untracked();
        if login.is_empty() || password.is_empty() {
            login_error.set(Some("Informe o novo login e a senha atual".to_string()));
            return;
        }
        login_error.set(None);
        saving_login.set(true);
        let request = ChangeLoginRequest {
            new_login: login.clone(),
            password,
        };
        spawn_local(async move {
            match api::change_login(&request).await {
                Ok(()) => {
                    notifier.success("Login alterado com sucesso");
                    auth.user.update(|u| {
                        if let Some(user) = u {
                            user.login = Some(login);
                        }
                    });
                    new_login.set(String::new());
                    login_password.set(String::new());
                }
                Err(ApiError::Unauthorized) => {}
                Err(e) => {
                    log::error!("Login change failed: {e}");
                    login_error.set(Some(e.to_string()));
                }
            }
            saving_login.set(false);
        });
    };

    view! {
        <PageFrame page_id=page_id("account", PAGE_CAT_SYSTEM) category=PAGE_CAT_SYSTEM>
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Minha conta"</h1>
                </div>
            </div>
            <p class="account__user">
                {move || auth.user.get().map(|u| u.display_name()).unwrap_or_default()}
            </p>

            <section class="account__section">
                <h2>"Alterar senha"</h2>
                <div class="form">
                    <div class="form__group">
                        <label class="form__label">"Senha atual"</label>
                        {bound_input(current_password, "password")}
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Nova senha"</label>
                        {bound_input(new_password, "password")}
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Confirmar nova senha"</label>
                        {bound_input(confirmation, "password")}
                    </div>
                    {move || password_error.get().map(|e| view! { <span class="form__error">{e}</span> })}
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=saving_password
                        on_click=move |_| submit_password()
                    >
                        "Alterar senha"
                    </Button>
                </div>
            </section>

            <section class="account__section">
                <h2>"Alterar login"</h2>
                <div class="form">
                    <div class="form__group">
                        <label class="form__label">"Novo login"</label>
                        {bound_input(new_login, "text")}
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Senha atual"</label>
                        {bound_input(login_password, "password")}
                    </div>
                    {move || login_error.get().map(|e| view! { <span class="form__error">{e}</span> })}
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=saving_login
                        on_click=move |_| submit_login()
                    >
                        "Alterar login"
                    </Button>
                </div>
            </section>
        </PageFrame>
    }
}
