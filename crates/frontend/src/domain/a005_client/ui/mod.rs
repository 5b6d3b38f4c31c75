use contracts::domain::a005_client::aggregate::{Client, ClientForm, PersonType};
use contracts::shared::address::Address;
use contracts::shared::masks::{mask_cnpj, mask_cpf, mask_phone, mask_rg, mask_state_registration};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::address_lookup::AddressFields;
use crate::shared::crud::form::{form_masked, form_text, FormField};
use crate::shared::crud::{crud_page, or_dash, EntityUi};
use crate::shared::date_utils::format_optional_date;

fn address(form: &ClientForm) -> &Address {
    &form.address
}

fn address_mut(form: &mut ClientForm) -> &mut Address {
    &mut form.address
}

pub(crate) fn full_address(address: &Address) -> String {
    let mut parts = vec![];
    if !address.street.trim().is_empty() {
        let mut street = address.street.trim().to_string();
        if !address.number.trim().is_empty() {
            street.push_str(", ");
            street.push_str(address.number.trim());
        }
        parts.push(street);
    }
    if let Some(complement) = address.complement.as_deref().filter(|c| !c.trim().is_empty()) {
        parts.push(complement.trim().to_string());
    }
    if !address.neighborhood.trim().is_empty() {
        parts.push(address.neighborhood.trim().to_string());
    }
    match (address.city.trim(), address.state.trim()) {
        ("", _) => {}
        (city, "") => parts.push(city.to_string()),
        (city, state) => parts.push(format!("{city}/{state}")),
    }
    parts.join(" - ")
}

impl EntityUi for Client {
    fn icon() -> &'static str {
        "customers"
    }

    fn columns() -> Vec<&'static str> {
        vec!["Nome", "Tipo", "Documento", "Telefone", "E-mail", "Cidade"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.person_type.label().to_string(),
            self.formatted_document(),
            or_dash(self.phone.as_deref().map(mask_phone).as_deref()),
            or_dash(self.email.as_deref()),
            or_dash(Some(&self.address.city)),
        ]
    }

    fn card_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            (self.person_type.document_label(), self.formatted_document()),
            ("Telefone", or_dash(self.phone.as_deref().map(mask_phone).as_deref())),
            ("E-mail", or_dash(self.email.as_deref())),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Nome", self.name.clone()),
            ("Tipo de pessoa", self.person_type.label().to_string()),
            (self.person_type.document_label(), self.formatted_document()),
        ];
        match self.person_type {
            PersonType::Individual => {
                rows.push(("RG", or_dash(self.rg.as_deref().map(mask_rg).as_deref())))
            }
            PersonType::Company => rows.push((
                "Inscrição estadual",
                or_dash(self.state_registration.as_deref().map(mask_state_registration).as_deref()),
            )),
        }
        rows.extend([
            (
                self.person_type.reference_date_label(),
                format_optional_date(self.reference_date()),
            ),
            ("E-mail", or_dash(self.email.as_deref())),
            ("Telefone", or_dash(self.phone.as_deref().map(mask_phone).as_deref())),
            ("Endereço", or_dash(Some(&full_address(&self.address)))),
        ]);
        rows
    }

    fn form_fields(form: RwSignal<ClientForm>, errors: RwSignal<FieldErrors>) -> AnyView {
        let kind = Memo::new(move |_| form.with(|f| f.person_type));

        let set_kind = move |code: String| {
            let kind = PersonType::from_code(&code);
            form.update(|f| {
                f.person_type = kind;
                f.document = kind.mask_document(&f.document);
            });
        };

        view! {
            <div class="form__row">
                <FormField label="Tipo de pessoa" field="tipoPessoa" errors=errors required=true>
                    <select
                        class="form__select"
                        prop:value=move || kind.get().as_code()
                        on:change=move |ev| set_kind(event_target_value(&ev))
                    >
                        {[PersonType::Individual, PersonType::Company]
                            .into_iter()
                            .map(|k| view! { <option value=k.as_code()>{k.label()}</option> })
                            .collect_view()}
                    </select>
                </FormField>
                <FormField label="Nome" field="nome" errors=errors required=true>
                    {form_text(form, |f| f.name.clone(), |f, v| f.name = v, "text")}
                </FormField>
            </div>
            {move || match kind.get() {
                PersonType::Individual => view! {
                    <div class="form__row">
                        <FormField label="CPF" field="documento" errors=errors required=true>
                            {form_masked(form, |f| f.document.clone(), |f, v| f.document = v, mask_cpf, "000.000.000-00")}
                        </FormField>
                        <FormField label="RG" field="rg" errors=errors>
                            {form_masked(form, |f| f.rg.clone(), |f, v| f.rg = v, mask_rg, "00.000.000-0")}
                        </FormField>
                        <FormField label="Data de nascimento" field="dataReferencia" errors=errors required=true>
                            {form_text(form, |f| f.reference_date.clone(), |f, v| f.reference_date = v, "date")}
                        </FormField>
                    </div>
                }
                .into_any(),
                PersonType::Company => view! {
                    <div class="form__row">
                        <FormField label="CNPJ" field="documento" errors=errors required=true>
                            {form_masked(form, |f| f.document.clone(), |f, v| f.document = v, mask_cnpj, "00.000.000/0000-00")}
                        </FormField>
                        <FormField label="Inscrição estadual" field="inscricaoEstadual" errors=errors>
                            {form_masked(
                                form,
                                |f| f.state_registration.clone(),
                                |f, v| f.state_registration = v,
                                mask_state_registration,
                                "000.000.000.000",
                            )}
                        </FormField>
                        <FormField label="Data de fundação" field="dataReferencia" errors=errors required=true>
                            {form_text(form, |f| f.reference_date.clone(), |f, v| f.reference_date = v, "date")}
                        </FormField>
                    </div>
                }
                .into_any(),
            }}
            <div class="form__row">
                <FormField label="E-mail" field="email" errors=errors>
                    {form_text(form, |f| f.email.clone(), |f, v| f.email = v, "email")}
                </FormField>
                <FormField label="Telefone" field="telefone" errors=errors>
                    {form_masked(form, |f| f.phone.clone(), |f, v| f.phone = v, mask_phone, "(00) 00000-0000")}
                </FormField>
            </div>
            <AddressFields form=form get=address get_mut=address_mut errors=errors />
        }
        .into_any()
    }
}

#[component]
pub fn ClientsPage() -> impl IntoView {
    crud_page::<Client>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let address = Address {
            cep: "01310100".into(),
            street: "Av. Paulista".into(),
            number: "1000".into(),
            complement: Some("Sala 5".into()),
            neighborhood: "Bela Vista".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
        };
        assert_eq!(
            full_address(&address),
            "Av. Paulista, 1000 - Sala 5 - Bela Vista - São Paulo/SP"
        );
        assert_eq!(full_address(&Address::default()), "");
    }
}
