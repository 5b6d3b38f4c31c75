use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::common::{EntityRef, RecordId, Resource};
use crate::shared::validation::{is_blank, optional_text, parse_datetime_local, FieldErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    #[serde(rename = "AGENDADO")]
    Scheduled,
    #[serde(rename = "REALIZADO")]
    Done,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendado",
            AppointmentStatus::Done => "Realizado",
        }
    }
}

/// Atendimento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "cliente")]
    pub client: EntityRef,
    #[serde(rename = "registradoPor")]
    pub registered_by: EntityRef,
    #[serde(rename = "dataInicio")]
    pub start: NaiveDateTime,
    #[serde(rename = "dataFim", default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "colaboradores", default)]
    pub employees: Vec<EntityRef>,
    /// Lead times in minutes
    #[serde(rename = "lembretes", default)]
    pub reminders: Vec<u32>,
}

/// User-triggered operations on an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentAction {
    Edit,
    MarkDone,
    UnmarkDone,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Atendimento inativo")]
    Inactive,
    #[error("Atendimentos realizados não podem ser editados")]
    DoneIsReadOnly,
    #[error("Atendimentos realizados não podem ser excluídos")]
    DoneCannotBeDeleted,
    #[error("O atendimento já está realizado")]
    AlreadyDone,
    #[error("O atendimento ainda não foi realizado")]
    NotDone,
}

impl Appointment {
    /// Interval end; an appointment without end is a point event at its start.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end.unwrap_or(self.start)
    }

    pub fn is_done(&self) -> bool {
        self.status == AppointmentStatus::Done
    }

    /// Whether `action` is allowed in the current state.
    ///
    /// States are {Scheduled, Done} x {Active, Inactive}; only active records
    /// accept actions. Done records accept nothing but the reverse transition.
    pub fn check(&self, action: AppointmentAction) -> Result<(), LifecycleError> {
        if !self.active {
            return Err(LifecycleError::Inactive);
        }
        match (action, self.status) {
            (AppointmentAction::Edit, AppointmentStatus::Done) => Err(LifecycleError::DoneIsReadOnly),
            (AppointmentAction::Delete, AppointmentStatus::Done) => {
                Err(LifecycleError::DoneCannotBeDeleted)
            }
            (AppointmentAction::MarkDone, AppointmentStatus::Done) => Err(LifecycleError::AlreadyDone),
            (AppointmentAction::UnmarkDone, AppointmentStatus::Scheduled) => {
                Err(LifecycleError::NotDone)
            }
            _ => Ok(()),
        }
    }

    pub fn can(&self, action: AppointmentAction) -> bool {
        self.check(action).is_ok()
    }

    /// Prefills the edit form.
    pub fn to_form(&self) -> AppointmentForm {
        AppointmentForm {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            client_id: Some(self.client.id),
            registered_by_id: Some(self.registered_by.id),
            start: format_datetime_local(self.start),
            end: self.end.map(format_datetime_local).unwrap_or_default(),
            employee_ids: self.employees.iter().map(|e| e.id).collect(),
            reminders: self.reminders.clone(),
        }
    }
}

/// `<input type="datetime-local">` value
pub fn format_datetime_local(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

impl Resource for Appointment {
    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "atendimentos"
    }

    fn element_name() -> &'static str {
        "Atendimento"
    }

    fn list_name() -> &'static str {
        "Atendimentos"
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentForm {
    pub title: String,
    pub description: String,
    pub client_id: Option<RecordId>,
    pub registered_by_id: Option<RecordId>,
    /// `YYYY-MM-DDTHH:MM`
    pub start: String,
    /// Optional, same format as `start`
    pub end: String,
    pub employee_ids: Vec<RecordId>,
    pub reminders: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentPayload {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "clienteId")]
    pub client_id: RecordId,
    #[serde(rename = "registradoPorId")]
    pub registered_by_id: RecordId,
    #[serde(rename = "dataInicio")]
    pub start: NaiveDateTime,
    #[serde(rename = "dataFim")]
    pub end: Option<NaiveDateTime>,
    #[serde(rename = "colaboradoresIds")]
    pub employee_ids: Vec<RecordId>,
    #[serde(rename = "lembretes")]
    pub reminders: Vec<u32>,
}

impl AppointmentForm {
    pub fn toggle_employee(&mut self, id: RecordId) {
        if let Some(pos) = self.employee_ids.iter().position(|e| *e == id) {
            self.employee_ids.remove(pos);
        } else {
            self.employee_ids.push(id);
        }
    }

    pub fn toggle_reminder(&mut self, minutes: u32) {
        if let Some(pos) = self.reminders.iter().position(|m| *m == minutes) {
            self.reminders.remove(pos);
        } else {
            self.reminders.push(minutes);
            self.reminders.sort_unstable();
        }
    }

    /// Client-side checks run before anything is sent.
    pub fn validate(&self) -> Result<AppointmentPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        if is_blank(&self.title) {
            errors.add("titulo", "Título é obrigatório");
        }
        if self.client_id.is_none() {
            errors.add("cliente", "Selecione o cliente");
        }
        if self.registered_by_id.is_none() {
            errors.add("registradoPor", "Selecione quem registrou o atendimento");
        }

        let start = if is_blank(&self.start) {
            errors.add("dataInicio", "Data e hora de início são obrigatórias");
            None
        } else {
            let parsed = parse_datetime_local(&self.start);
            if parsed.is_none() {
                errors.add("dataInicio", "Data e hora de início inválidas");
            }
            parsed
        };

        let end = if is_blank(&self.end) {
            None
        } else {
            let parsed = parse_datetime_local(&self.end);
            match (start, parsed) {
                (_, None) => errors.add("dataFim", "Data e hora de término inválidas"),
                (Some(start), Some(end)) if end <= start => {
                    errors.add("dataFim", "O término deve ser posterior ao início")
                }
                _ => {}
            }
            parsed
        };

        if self.employee_ids.is_empty() {
            errors.add("colaboradores", "Selecione ao menos um colaborador");
        }

        match (self.client_id, self.registered_by_id, start) {
            (Some(client_id), Some(registered_by_id), Some(start)) if errors.is_empty() => {
                let mut reminders = self.reminders.clone();
                reminders.sort_unstable();
                reminders.dedup();
                Ok(AppointmentPayload {
                    title: self.title.trim().to_string(),
                    description: optional_text(&self.description),
                    client_id,
                    registered_by_id,
                    start,
                    end,
                    employee_ids: self.employee_ids.clone(),
                    reminders,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AppointmentForm {
        AppointmentForm {
            title: "Visita técnica".into(),
            description: String::new(),
            client_id: Some(10),
            registered_by_id: Some(3),
            start: "2024-06-10T09:00".into(),
            end: "2024-06-10T10:00".into(),
            employee_ids: vec![3],
            reminders: vec![60, 15, 60],
        }
    }

    fn appointment(status: AppointmentStatus, active: bool) -> Appointment {
        Appointment {
            id: 1,
            title: "Visita".into(),
            description: None,
            client: EntityRef::new(10, "Padaria Central"),
            registered_by: EntityRef::new(3, "Ana Souza"),
            start: parse_datetime_local("2024-06-10T09:00").unwrap(),
            end: None,
            status,
            active,
            employees: vec![EntityRef::new(3, "Ana Souza")],
            reminders: vec![],
        }
    }

    #[test]
    fn test_valid_form_yields_iso_payload() {
        let payload = valid_form().validate().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dataInicio"], "2024-06-10T09:00:00");
        assert_eq!(json["dataFim"], "2024-06-10T10:00:00");
        assert_eq!(json["colaboradoresIds"], serde_json::json!([3]));
        assert_eq!(json["lembretes"], serde_json::json!([15, 60]));
        assert_eq!(json["descricao"], serde_json::Value::Null);
    }

    #[test]
    fn test_end_must_be_strictly_after_start() {
        let mut form = valid_form();
        form.end = form.start.clone();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("dataFim"),
            Some("O término deve ser posterior ao início")
        );

        form.end = "2024-06-10T09:01".into();
        assert!(form.validate().is_ok());

        form.end = String::new();
        assert_eq!(form.validate().unwrap().end, None);
    }

    #[test]
    fn test_required_fields() {
        let errors = AppointmentForm::default().validate().unwrap_err();
        for field in ["titulo", "cliente", "registradoPor", "dataInicio", "colaboradores"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("dataFim"));
    }

    #[test]
    fn test_lifecycle_rules() {
        use AppointmentAction::*;

        let scheduled = appointment(AppointmentStatus::Scheduled, true);
        assert!(scheduled.can(Edit));
        assert!(scheduled.can(MarkDone));
        assert!(scheduled.can(Delete));
        assert_eq!(scheduled.check(UnmarkDone), Err(LifecycleError::NotDone));

        let done = appointment(AppointmentStatus::Done, true);
        assert_eq!(done.check(Edit), Err(LifecycleError::DoneIsReadOnly));
        assert_eq!(done.check(Delete), Err(LifecycleError::DoneCannotBeDeleted));
        assert_eq!(done.check(MarkDone), Err(LifecycleError::AlreadyDone));
        assert!(done.can(UnmarkDone));

        let inactive = appointment(AppointmentStatus::Scheduled, false);
        assert_eq!(inactive.check(Edit), Err(LifecycleError::Inactive));
    }

    #[test]
    fn test_deserialize_backend_record() {
        let body = r#"{
            "id": 4, "titulo": "Reunião", "cliente": {"id": 1, "nome": "ACME"},
            "registradoPor": {"id": 2, "nome": "Ana"}, "dataInicio": "2024-06-10T14:30:00",
            "status": "REALIZADO", "ativo": true, "lembretes": [1440]
        }"#;
        let a: Appointment = serde_json::from_str(body).unwrap();
        assert!(a.is_done());
        assert_eq!(a.end, None);
        assert_eq!(a.effective_end(), a.start);
        assert_eq!(a.to_form().start, "2024-06-10T14:30");
    }

    #[test]
    fn test_toggles() {
        let mut form = AppointmentForm::default();
        form.toggle_employee(1);
        form.toggle_employee(2);
        form.toggle_employee(1);
        assert_eq!(form.employee_ids, vec![2]);
        form.toggle_reminder(60);
        form.toggle_reminder(15);
        assert_eq!(form.reminders, vec![15, 60]);
    }
}
