use contracts::domain::a004_priority::aggregate::{is_hex_color, Priority, PriorityForm, DEFAULT_COLOR};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::crud::form::{form_text, form_textarea, FormField};
use crate::shared::crud::{crud_page, or_dash, EntityUi};

impl EntityUi for Priority {
    fn icon() -> &'static str {
        "flag"
    }

    fn columns() -> Vec<&'static str> {
        vec!["Nome", "Cor", "Descrição"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.color.clone(),
            or_dash(self.description.as_deref()),
        ]
    }

    fn card_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Cor", self.color.clone()),
            ("Descrição", or_dash(self.description.as_deref())),
        ]
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nome", self.name.clone()),
            ("Cor", self.color.clone()),
            ("Descrição", or_dash(self.description.as_deref())),
        ]
    }

    fn accent_color(&self) -> Option<String> {
        is_hex_color(&self.color).then(|| self.color.clone())
    }

    fn form_fields(form: RwSignal<PriorityForm>, errors: RwSignal<FieldErrors>) -> AnyView {
        if form.with_untracked(|f| f.color.trim().is_empty()) {
            form.update(|f| f.color = DEFAULT_COLOR.to_string());
        }
        view! {
            <FormField label="Nome" field="nome" errors=errors required=true>
                {form_text(form, |f| f.name.clone(), |f, v| f.name = v, "text")}
            </FormField>
            <FormField label="Cor" field="cor" errors=errors required=true>
                <div class="form__color">
                    {form_text(form, |f| f.color.clone(), |f, v| f.color = v, "color")}
                    <span class="form__color-value">{move || form.with(|f| f.color.clone())}</span>
                </div>
            </FormField>
            <FormField label="Descrição" field="descricao" errors=errors>
                {form_textarea(form, |f| f.description.clone(), |f, v| f.description = v)}
            </FormField>
        }
        .into_any()
    }
}

#[component]
pub fn PrioritiesPage() -> impl IntoView {
    crud_page::<Priority>()
}
