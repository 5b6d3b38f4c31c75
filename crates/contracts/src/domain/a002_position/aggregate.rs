use serde::{Deserialize, Serialize};

use crate::domain::common::{CrudEntity, Reactivatable, RecordId, Resource, ValidationContext};
use crate::shared::validation::{is_name_taken, optional_text, require, FieldErrors};

/// Cargo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "possuiColaboradoresAtivos", default)]
    pub has_active_employees: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionForm {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

impl Resource for Position {
    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "cargos"
    }

    fn element_name() -> &'static str {
        "Cargo"
    }

    fn list_name() -> &'static str {
        "Cargos"
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

impl CrudEntity for Position {
    type Form = PositionForm;
    type Payload = PositionPayload;

    fn to_form(&self) -> PositionForm {
        PositionForm {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn validate(
        form: &PositionForm,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<PositionPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "nome", &form.name, "Nome é obrigatório");
        if is_name_taken(&form.name, ctx.sibling_names()) {
            errors.add("nome", "Já existe um cargo com este nome");
        }

        errors.into_result(|| PositionPayload {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
        })
    }

    fn deactivation_blocker(&self) -> Option<&'static str> {
        self.has_active_employees
            .then_some("Este cargo está atribuído a colaboradores ativos e não pode ser inativado.")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.name,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

impl Reactivatable for Position {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_blank_name_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let errors = Position::validate(
            &PositionForm::default(),
            &ValidationContext::new(None, &[], today),
        )
        .unwrap_err();
        assert_eq!(errors.get("nome"), Some("Nome é obrigatório"));
    }

    #[test]
    fn test_deserialize_without_flags() {
        let p: Position =
            serde_json::from_str(r#"{"id":2,"nome":"Analista","ativo":true}"#).unwrap();
        assert!(!p.has_active_employees);
        assert!(p.deactivation_blocker().is_none());
    }
}
