//! Postal code (CEP) lookup and the address block shared by client and
//! employee forms.

use contracts::shared::address::{is_complete_cep, Address, CepLookupResponse};
use contracts::shared::api_error::ApiError;
use contracts::shared::documents::only_digits;
use contracts::shared::masks::mask_cep;
use contracts::shared::validation::FieldErrors;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::join_url;
use crate::shared::config::cep_lookup_url;
use crate::shared::crud::form::{text_input, FormField};
use crate::shared::masked_input::MaskedInput;

pub fn lookup_url(base: &str, cep: &str) -> String {
    join_url(base, &format!("{}/json/", only_digits(cep)))
}

/// `Ok(None)` when the service does not know the code.
pub async fn lookup_cep(cep: &str) -> Result<Option<CepLookupResponse>, ApiError> {
    let url = lookup_url(cep_lookup_url(), cep);
    log::debug!("GET {url}");
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if response.status() == 400 || response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(
            response.status(),
            &response.status_text(),
            &body,
        ));
    }
    let found: CepLookupResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok((!found.is_not_found()).then_some(found))
}

/// Form fields for an [`Address`] living inside a larger form.
#[component]
pub fn AddressFields<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    get: fn(&F) -> &Address,
    get_mut: fn(&mut F) -> &mut Address,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    let lookup_message = RwSignal::new(None::<String>);
    let looking_up = RwSignal::new(false);
    // an address loaded for editing is not looked up again
    let last_looked_up = StoredValue::new(only_digits(&form.with_untracked(|f| get(f).cep.clone())));

    let cep = Signal::derive(move || form.with(|f| get(f).cep.clone()));

    Effect::new(move |_| {
        let digits = only_digits(&cep.get());
        if !is_complete_cep(&digits) || last_looked_up.get_value() == digits {
            return;
        }
        last_looked_up.set_value(digits.clone());
        looking_up.set(true);
        lookup_message.set(None);
        spawn_local(async move {
            match lookup_cep(&digits).await {
                Ok(Some(found)) => form.update(|f| found.apply_to(get_mut(f))),
                Ok(None) => lookup_message.set(Some("CEP não encontrado".to_string())),
                Err(e) => {
                    log::warn!("CEP lookup failed: {e}");
                    lookup_message.set(Some("Não foi possível consultar o CEP".to_string()));
                }
            }
            looking_up.set(false);
        });
    });

    let field = move |set: fn(&mut Address, String)| {
        move |value: String| form.update(|f| set(get_mut(f), value))
    };

    view! {
        <div class="form__row">
            <FormField label="CEP" field="cep" errors=errors>
                <MaskedInput
                    value=cep
                    on_change=Callback::new(field(|a, v| a.cep = v))
                    mask=mask_cep
                    placeholder="00000-000"
                />
                <Show when=move || looking_up.get()>
                    <span class="form__hint">"Consultando CEP..."</span>
                </Show>
                {move || lookup_message.get().map(|m| view! { <span class="form__hint form__hint--warning">{m}</span> })}
            </FormField>
            <FormField label="Logradouro" field="logradouro" errors=errors>
                {text_input(
                    Signal::derive(move || form.with(|f| get(f).street.clone())),
                    field(|a, v| a.street = v),
                    "text",
                )}
            </FormField>
            <FormField label="Número" field="numero" errors=errors>
                {text_input(
                    Signal::derive(move || form.with(|f| get(f).number.clone())),
                    field(|a, v| a.number = v),
                    "text",
                )}
            </FormField>
        </div>
        <div class="form__row">
            <FormField label="Complemento" field="complemento" errors=errors>
                {text_input(
                    Signal::derive(move || form.with(|f| get(f).complement.clone().unwrap_or_default())),
                    field(|a, v| a.complement = if v.trim().is_empty() { None } else { Some(v) }),
                    "text",
                )}
            </FormField>
            <FormField label="Bairro" field="bairro" errors=errors>
                {text_input(
                    Signal::derive(move || form.with(|f| get(f).neighborhood.clone())),
                    field(|a, v| a.neighborhood = v),
                    "text",
                )}
            </FormField>
        </div>
        <div class="form__row">
            <FormField label="Cidade" field="cidade" errors=errors>
                {text_input(
                    Signal::derive(move || form.with(|f| get(f).city.clone())),
                    field(|a, v| a.city = v),
                    "text",
                )}
            </FormField>
            <FormField label="UF" field="estado" errors=errors>
                {text_input(
                    Signal::derive(move || form.with(|f| get(f).state.clone())),
                    field(|a, v| a.state = v.to_uppercase().chars().take(2).collect()),
                    "text",
                )}
            </FormField>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_url() {
        assert_eq!(
            lookup_url("https://viacep.com.br/ws", "01310-100"),
            "https://viacep.com.br/ws/01310100/json/"
        );
        assert_eq!(
            lookup_url("https://viacep.com.br/ws/", "01310100"),
            "https://viacep.com.br/ws/01310100/json/"
        );
    }
}
