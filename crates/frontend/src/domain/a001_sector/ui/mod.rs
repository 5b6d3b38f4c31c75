use contracts::domain::a001_sector::aggregate::{Sector, SectorForm};
use contracts::domain::a006_employee::aggregate::Employee;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::crud::form::{active_options, form_select, form_text, form_textarea, FormField};
use crate::shared::crud::{crud_page, or_dash, EntityUi};

impl EntityUi for Sector {
    fn icon() -> &'static str {
        "building"
    }

    fn columns() -> Vec<&'static str> {
        vec!["Nome", "Responsável", "Descrição"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(self.responsible.as_ref().map(|r| r.name.as_str())),
            or_dash(self.description.as_deref()),
        ]
    }

    fn card_lines(&self) -> Vec<(&'static str, String)> {
        vec![(
            "Responsável",
            or_dash(self.responsible.as_ref().map(|r| r.name.as_str())),
        )]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nome", self.name.clone()),
            ("Descrição", or_dash(self.description.as_deref())),
            (
                "Responsável",
                or_dash(self.responsible.as_ref().map(|r| r.name.as_str())),
            ),
            (
                "Colaboradores ativos",
                if self.has_active_employees { "Sim" } else { "Não" }.to_string(),
            ),
        ]
    }

    fn form_fields(form: RwSignal<SectorForm>, errors: RwSignal<FieldErrors>) -> AnyView {
        let employees = active_options::<Employee>();
        view! {
            <FormField label="Nome" field="nome" errors=errors required=true>
                {form_text(form, |f| f.name.clone(), |f, v| f.name = v, "text")}
            </FormField>
            <FormField label="Responsável" field="responsavel" errors=errors required=true>
                {form_select(form, employees, |f| f.responsible_id, |f, id| f.responsible_id = id)}
            </FormField>
            <FormField label="Descrição" field="descricao" errors=errors>
                {form_textarea(form, |f| f.description.clone(), |f, v| f.description = v)}
            </FormField>
        }
        .into_any()
    }
}

#[component]
pub fn SectorsPage() -> impl IntoView {
    crud_page::<Sector>()
}
