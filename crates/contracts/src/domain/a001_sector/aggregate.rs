use serde::{Deserialize, Serialize};

use crate::domain::common::{
    CrudEntity, EntityRef, Reactivatable, RecordId, Resource, ValidationContext,
};
use crate::shared::validation::{is_name_taken, optional_text, require, FieldErrors};

/// Setor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "responsavel", default)]
    pub responsible: Option<EntityRef>,
    #[serde(rename = "ativo")]
    pub active: bool,
    /// Set by the backend; a sector with active employees cannot be deactivated
    #[serde(rename = "possuiColaboradoresAtivos", default)]
    pub has_active_employees: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorForm {
    pub name: String,
    pub description: String,
    pub responsible_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "responsavelId")]
    pub responsible_id: RecordId,
}

impl Resource for Sector {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "setores"
    }

    fn element_name() -> &'static str {
        "Setor"
    }

    fn list_name() -> &'static str {
        "Setores"
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

impl CrudEntity for Sector {
    type Form = SectorForm;
    type Payload = SectorPayload;

    fn to_form(&self) -> SectorForm {
        SectorForm {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            responsible_id: self.responsible.as_ref().map(|r| r.id),
        }
    }

    fn validate(
        form: &SectorForm,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<SectorPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "nome", &form.name, "Nome é obrigatório");
        if is_name_taken(&form.name, ctx.sibling_names()) {
            errors.add("nome", "Já existe um setor com este nome");
        }
        if form.responsible_id.is_none() {
            errors.add("responsavel", "Selecione o responsável pelo setor");
        }

        errors.into_result(|| SectorPayload {
            name: form.name.trim().to_string(),
            description: optional_text(&form.description),
            responsible_id: form.responsible_id.unwrap_or_default(),
        })
    }

    fn deactivation_blocker(&self) -> Option<&'static str> {
        self.has_active_employees
            .then_some("Este setor possui colaboradores ativos e não pode ser inativado.")
    }

    fn search_text(&self) -> String {
        let responsible = self
            .responsible
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or_default();
        format!(
            "{} {} {}",
            self.name,
            self.description.as_deref().unwrap_or_default(),
            responsible
        )
    }
}

impl Reactivatable for Sector {}
