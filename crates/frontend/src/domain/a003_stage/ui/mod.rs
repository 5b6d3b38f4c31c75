use contracts::domain::a003_stage::aggregate::{Stage, StageForm};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::crud::form::{form_text, form_textarea, FormField};
use crate::shared::crud::{crud_page, or_dash, EntityUi};

impl EntityUi for Stage {
    fn icon() -> &'static str {
        "layers"
    }

    fn columns() -> Vec<&'static str> {
        vec!["Nome", "Descrição"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), or_dash(self.description.as_deref())]
    }

    fn card_lines(&self) -> Vec<(&'static str, String)> {
        vec![("Descrição", or_dash(self.description.as_deref()))]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nome", self.name.clone()),
            ("Descrição", or_dash(self.description.as_deref())),
            (
                "Tarefas ativas",
                if self.has_active_tasks { "Sim" } else { "Não" }.to_string(),
            ),
        ]
    }

    fn form_fields(form: RwSignal<StageForm>, errors: RwSignal<FieldErrors>) -> AnyView {
        view! {
            <FormField label="Nome" field="nome" errors=errors required=true>
                {form_text(form, |f| f.name.clone(), |f, v| f.name = v, "text")}
            </FormField>
            <FormField label="Descrição" field="descricao" errors=errors>
                {form_textarea(form, |f| f.description.clone(), |f, v| f.description = v)}
            </FormField>
        }
        .into_any()
    }
}

#[component]
pub fn StagesPage() -> impl IntoView {
    crud_page::<Stage>()
}
