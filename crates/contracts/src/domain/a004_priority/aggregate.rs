use serde::{Deserialize, Serialize};

use crate::domain::common::{CrudEntity, Reactivatable, RecordId, Resource, ValidationContext};
use crate::shared::validation::{is_blank, is_name_taken, optional_text, require, FieldErrors};

pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Prioridade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "possuiTarefasAtivas", default)]
    pub has_active_tasks: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriorityForm {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "cor")]
    pub color: String,
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.trim().strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

impl Resource for Priority {
    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "prioridades"
    }

    fn element_name() -> &'static str {
        "Prioridade"
    }

    fn list_name() -> &'static str {
        "Prioridades"
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

impl CrudEntity for Priority {
    type Form = PriorityForm;
    type Payload = PriorityPayload;

    fn to_form(&self) -> PriorityForm {
        PriorityForm {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            color: self.color.clone(),
        }
    }

    fn validate(
        form: &PriorityForm,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<PriorityPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "nome", &form.name, "Nome é obrigatório");
        if is_name_taken(&form.name, ctx.sibling_names()) {
            errors.add("nome", "Já existe uma prioridade com este nome");
        }
        if is_blank(&form.color) {
            errors.add("cor", "Cor é obrigatória");
        } else if !is_hex_color(&form.color) {
            errors.add("cor", "Cor inválida");
        }

        errors.into_result(|| PriorityPayload {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            color: form.color.trim().to_lowercase(),
        })
    }

    fn deactivation_blocker(&self) -> Option<&'static str> {
        self.has_active_tasks
            .then_some("Existem tarefas ativas com esta prioridade. Altere-as antes de inativá-la.")
    }
}

impl Reactivatable for Priority {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_color_required() {
        let form = PriorityForm {
            name: "Alta".into(),
            description: String::new(),
            color: String::new(),
        };
        let errors =
            Priority::validate(&form, &ValidationContext::new(None, &[], today())).unwrap_err();
        assert_eq!(errors.get("cor"), Some("Cor é obrigatória"));

        let form = PriorityForm {
            color: "#ff0000".into(),
            ..form
        };
        let payload = Priority::validate(&form, &ValidationContext::new(None, &[], today())).unwrap();
        assert_eq!(payload.color, "#ff0000");
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#FFF"));
        assert!(is_hex_color("#a1b2c3"));
        assert!(!is_hex_color("ff0000"));
        assert!(!is_hex_color("#ff00"));
        assert!(!is_hex_color("#gg0000"));
    }
}
