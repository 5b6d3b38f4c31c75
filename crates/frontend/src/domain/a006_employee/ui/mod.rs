use contracts::domain::a001_sector::aggregate::Sector;
use contracts::domain::a002_position::aggregate::Position;
use contracts::domain::a006_employee::aggregate::{Employee, EmployeeForm};
use contracts::domain::common::EntityRef;
use contracts::shared::address::Address;
use contracts::shared::masks::{mask_cpf, mask_phone};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::domain::a005_client::ui::full_address;
use crate::shared::address_lookup::AddressFields;
use crate::shared::crud::form::{active_options, form_masked, form_select, form_text, FormField};
use crate::shared::crud::{crud_page, or_dash, EntityUi};
use crate::shared::date_utils::format_optional_date;

fn address(form: &EmployeeForm) -> &Address {
    &form.address
}

fn address_mut(form: &mut EmployeeForm) -> &mut Address {
    &mut form.address
}

fn ref_name(r: &Option<EntityRef>) -> String {
    or_dash(r.as_ref().map(|r| r.name.as_str()))
}

impl EntityUi for Employee {
    fn icon() -> &'static str {
        "users"
    }

    fn columns() -> Vec<&'static str> {
        vec!["Nome", "CPF", "Setor", "Cargo", "Telefone", "Admissão"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            mask_cpf(&self.cpf),
            ref_name(&self.sector),
            ref_name(&self.position),
            or_dash(self.phone.as_deref().map(mask_phone).as_deref()),
            format_optional_date(self.admission_date),
        ]
    }

    fn card_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Setor", ref_name(&self.sector)),
            ("Cargo", ref_name(&self.position)),
            ("Telefone", or_dash(self.phone.as_deref().map(mask_phone).as_deref())),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nome", self.name.clone()),
            ("CPF", mask_cpf(&self.cpf)),
            ("Data de nascimento", format_optional_date(self.birth_date)),
            ("Data de admissão", format_optional_date(self.admission_date)),
            ("Setor", ref_name(&self.sector)),
            ("Cargo", ref_name(&self.position)),
            (
                "Responsável pelo setor",
                if self.is_sector_responsible { "Sim" } else { "Não" }.to_string(),
            ),
            ("E-mail", or_dash(self.email.as_deref())),
            ("Telefone", or_dash(self.phone.as_deref().map(mask_phone).as_deref())),
            ("Endereço", or_dash(Some(&full_address(&self.address)))),
        ]
    }

    fn form_fields(form: RwSignal<EmployeeForm>, errors: RwSignal<FieldErrors>) -> AnyView {
        let sectors = active_options::<Sector>();
        let positions = active_options::<Position>();

        view! {
            <div class="form__row">
                <FormField label="Nome completo" field="nome" errors=errors required=true>
                    {form_text(form, |f| f.name.clone(), |f, v| f.name = v, "text")}
                </FormField>
                <FormField label="CPF" field="cpf" errors=errors required=true>
                    {form_masked(form, |f| f.cpf.clone(), |f, v| f.cpf = v, mask_cpf, "000.000.000-00")}
                </FormField>
            </div>
            <div class="form__row">
                <FormField label="Data de nascimento" field="dataNascimento" errors=errors required=true>
                    {form_text(form, |f| f.birth_date.clone(), |f, v| f.birth_date = v, "date")}
                </FormField>
                <FormField label="Data de admissão" field="dataAdmissao" errors=errors required=true>
                    {form_text(form, |f| f.admission_date.clone(), |f, v| f.admission_date = v, "date")}
                </FormField>
            </div>
            <div class="form__row">
                <FormField label="Setor" field="setor" errors=errors required=true>
                    {form_select(form, sectors, |f| f.sector_id, |f, id| f.sector_id = id)}
                </FormField>
                <FormField label="Cargo" field="cargo" errors=errors required=true>
                    {form_select(form, positions, |f| f.position_id, |f, id| f.position_id = id)}
                </FormField>
            </div>
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
pub fn EmployeesPage() -> impl IntoView {
    crud_page::<Employee>()
}
