use serde::{Deserialize, Serialize};

use crate::domain::common::{CrudEntity, Reactivatable, RecordId, Resource, ValidationContext};
use crate::shared::validation::{is_name_taken, optional_text, require, FieldErrors};

/// Etapa (task workflow stage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "possuiTarefasAtivas", default)]
    pub has_active_tasks: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageForm {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagePayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

impl Resource for Stage {
    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "etapas"
    }

    fn element_name() -> &'static str {
        "Etapa"
    }

    fn list_name() -> &'static str {
        "Etapas"
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl CrudEntity for Stage {
    type Form = StageForm;
    type Payload = StagePayload;

    fn to_form(&self) -> StageForm {
        StageForm {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn validate(
        form: &StageForm,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<StagePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "nome", &form.name, "Nome é obrigatório");
        if is_name_taken(&form.name, ctx.sibling_names()) {
            errors.add("nome", "Já existe uma etapa com este nome");
        }

        errors.into_result(|| StagePayload {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
        })
    }

    fn deactivation_blocker(&self) -> Option<&'static str> {
        self.has_active_tasks
            .then_some("Existem tarefas ativas nesta etapa. Conclua ou mova as tarefas antes de inativá-la.")
    }
}

impl Reactivatable for Stage {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duplicate_name() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let existing = vec![Stage {
            id: 9,
            name: "Em andamento".into(),
            description: None,
            active: true,
            has_active_tasks: true,
        }];
        let form = StageForm {
            name: "EM ANDAMENTO".into(),
            description: String::new(),
        };
        let errors =
            Stage::validate(&form, &ValidationContext::new(None, &existing, today)).unwrap_err();
        assert!(errors.contains("nome"));
        assert!(existing[0].deactivation_blocker().is_some());
    }
}
