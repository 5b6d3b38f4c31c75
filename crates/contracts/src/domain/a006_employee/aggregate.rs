use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a005_client::aggregate::{masked_address, normalized_address, validate_contact};
use crate::domain::common::{
    CrudEntity, EntityRef, Reactivatable, RecordId, Resource, ValidationContext,
};
use crate::shared::address::Address;
use crate::shared::documents::{only_digits, validate_cpf};
use crate::shared::masks::{mask_cpf, mask_phone};
use crate::shared::validation::{
    age_on, has_full_name, is_blank, is_name_taken, optional_text, past_date, require, FieldErrors,
};

pub const MINIMUM_AGE: u32 = 18;

/// Colaborador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: Address,
    #[serde(rename = "dataNascimento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "dataAdmissao", default)]
    pub admission_date: Option<NaiveDate>,
    #[serde(rename = "setor", default)]
    pub sector: Option<EntityRef>,
    #[serde(rename = "cargo", default)]
    pub position: Option<EntityRef>,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "responsavelSetor", default)]
    pub is_sector_responsible: bool,
    #[serde(rename = "possuiTarefasAtivas", default)]
    pub has_active_tasks: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeForm {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub birth_date: String,
    pub admission_date: String,
    pub sector_id: Option<RecordId>,
    pub position_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: Address,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "dataAdmissao")]
    pub admission_date: NaiveDate,
    #[serde(rename = "setorId")]
    pub sector_id: RecordId,
    #[serde(rename = "cargoId")]
    pub position_id: RecordId,
}

impl Resource for Employee {
    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "colaboradores"
    }

    fn element_name() -> &'static str {
        "Colaborador"
    }

    fn list_name() -> &'static str {
        "Colaboradores"
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

impl CrudEntity for Employee {
    type Form = EmployeeForm;
    type Payload = EmployeePayload;

    fn to_form(&self) -> EmployeeForm {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        EmployeeForm {
            name: self.name.clone(),
            cpf: mask_cpf(&self.cpf),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.as_deref().map(mask_phone).unwrap_or_default(),
            address: masked_address(&self.address),
            birth_date: date(self.birth_date),
            admission_date: date(self.admission_date),
            sector_id: self.sector.as_ref().map(|s| s.id),
            position_id: self.position.as_ref().map(|p| p.id),
        }
    }

    fn validate(
        form: &EmployeeForm,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<EmployeePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        require(&mut errors, "nome", &form.name, "Nome é obrigatório");
        if !is_blank(&form.name) && !has_full_name(&form.name) {
            errors.add("nome", "Informe o nome completo");
        }
        if is_name_taken(&form.name, ctx.sibling_names()) {
            errors.add("nome", "Já existe um colaborador com este nome");
        }

        let cpf = only_digits(&form.cpf);
        if cpf.is_empty() {
            errors.add("cpf", "CPF é obrigatório");
        } else if !validate_cpf(&cpf) {
            errors.add("cpf", "CPF inválido");
        } else if ctx
            .existing
            .iter()
            .any(|e| Some(e.id) != ctx.editing_id && only_digits(&e.cpf) == cpf)
        {
            errors.add("cpf", "Já existe um colaborador com este CPF");
        }

        let birth_date = past_date(
            &mut errors,
            "dataNascimento",
            &form.birth_date,
            ctx.today,
            "Data de nascimento",
        );
        if let Some(birth) = birth_date {
            if age_on(birth, ctx.today) < MINIMUM_AGE {
                errors.add(
                    "dataNascimento",
                    format!("O colaborador deve ter pelo menos {MINIMUM_AGE} anos"),
                );
            }
        }

        let admission_date = past_date(
            &mut errors,
            "dataAdmissao",
            &form.admission_date,
            ctx.today,
            "Data de admissão",
        );
        if let (Some(birth), Some(admission)) = (birth_date, admission_date) {
            if admission <= birth {
                errors.add(
                    "dataAdmissao",
                    "Data de admissão deve ser posterior ao nascimento",
                );
            }
        }

        if form.sector_id.is_none() {
            errors.add("setor", "Selecione o setor");
        }
        if form.position_id.is_none() {
            errors.add("cargo", "Selecione o cargo");
        }

        validate_contact(&mut errors, &form.email, &form.phone, &form.address);

        match (birth_date, admission_date, form.sector_id, form.position_id) {
            (Some(birth_date), Some(admission_date), Some(sector_id), Some(position_id))
                if errors.is_empty() =>
            {
                Ok(EmployeePayload {
                    name: form.name.trim().to_string(),
                    cpf,
                    email: optional_text(&form.email),
                    phone: optional_text(&only_digits(&form.phone)),
                    address: normalized_address(&form.address),
                    birth_date,
                    admission_date,
                    sector_id,
                    position_id,
                })
            }
            _ => Err(errors),
        }
    }

    fn deactivation_blocker(&self) -> Option<&'static str> {
        if self.is_sector_responsible {
            Some("Este colaborador é responsável por um setor. Defina outro responsável antes de inativá-lo.")
        } else if self.has_active_tasks {
            Some("Este colaborador possui tarefas ativas e não pode ser inativado.")
        } else {
            None
        }
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            mask_cpf(&self.cpf),
            self.sector.as_ref().map(|s| s.name.as_str()).unwrap_or_default(),
            self.position.as_ref().map(|p| p.name.as_str()).unwrap_or_default()
        )
    }
}

impl Reactivatable for Employee {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Months};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn form_born(birth: NaiveDate) -> EmployeeForm {
        EmployeeForm {
            name: "João Pereira".into(),
            cpf: "529.982.247-25".into(),
            birth_date: birth.format("%Y-%m-%d").to_string(),
            admission_date: "2024-01-02".into(),
            sector_id: Some(1),
            position_id: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_underage_rejected() {
        let birth = today().checked_sub_months(Months::new(12 * 17)).unwrap();
        let errors = Employee::validate(&form_born(birth), &ValidationContext::new(None, &[], today()))
            .unwrap_err();
        assert_eq!(
            errors.get("dataNascimento"),
            Some("O colaborador deve ter pelo menos 18 anos")
        );
    }

    #[test]
    fn test_adult_accepted() {
        let birth = today()
            .checked_sub_months(Months::new(12 * 18))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .unwrap();
        let payload = Employee::validate(&form_born(birth), &ValidationContext::new(None, &[], today()))
            .unwrap();
        assert_eq!(payload.cpf, "52998224725");
        assert_eq!(payload.sector_id, 1);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["cargoId"], 2);
        assert_eq!(json["dataAdmissao"], "2024-01-02");
    }

    #[test]
    fn test_missing_selections_and_future_admission() {
        let mut form = form_born(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        form.sector_id = None;
        form.position_id = None;
        form.admission_date = "2024-07-01".into();
        let errors = Employee::validate(&form, &ValidationContext::new(None, &[], today())).unwrap_err();
        assert!(errors.contains("setor"));
        assert!(errors.contains("cargo"));
        assert_eq!(
            errors.get("dataAdmissao"),
            Some("Data de admissão não pode ser futura")
        );
    }

    #[test]
    fn test_duplicate_name_excluding_self() {
        let existing: Employee = serde_json::from_value(serde_json::json!({
            "id": 4, "nome": "joão pereira", "cpf": "11144477735", "ativo": false
        }))
        .unwrap();
        let existing = vec![existing];
        let form = form_born(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        let errors = Employee::validate(&form, &ValidationContext::new(None, &existing, today())).unwrap_err();
        assert_eq!(errors.get("nome"), Some("Já existe um colaborador com este nome"));
        assert!(!errors.contains("cpf"));
        assert!(Employee::validate(&form, &ValidationContext::new(Some(4), &existing, today())).is_ok());
    }

    #[test]
    fn test_deactivation_blockers() {
        let mut employee: Employee = serde_json::from_value(serde_json::json!({
            "id": 3, "nome": "João Pereira", "cpf": "52998224725", "ativo": true,
            "setor": {"id": 1, "nome": "Financeiro"}
        }))
        .unwrap();
        assert!(employee.deactivation_blocker().is_none());
        employee.has_active_tasks = true;
        assert!(employee.deactivation_blocker().is_some());
        assert!(employee.search_text().contains("Financeiro"));
    }
}
