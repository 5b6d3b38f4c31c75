//! Appointment dialog - ViewModel
//!
//! Which dialog is open, the edit form and the lifecycle actions.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use contracts::domain::a007_appointment::aggregate::{
    format_datetime_local, Appointment, AppointmentAction, AppointmentForm,
};
use contracts::domain::common::{RecordId, Resource};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use super::super::model;
use crate::shared::crud::Mutation;
use crate::shared::date_utils::now_local;
use crate::shared::notify::{use_notifier, Notifier};
use crate::system::auth::use_session;

pub const DEFAULT_DURATION_MINUTES: i64 = 60;
const FIRST_SLOT_HOUR: u32 = 9;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogMode {
    #[default]
    Closed,
    Create(NaiveDateTime),
    View(Appointment),
    Edit(Appointment),
}

impl DialogMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogMode::Closed)
    }

    pub fn is_form(&self) -> bool {
        matches!(self, DialogMode::Create(_) | DialogMode::Edit(_))
    }

    pub fn appointment(&self) -> Option<&Appointment> {
        match self {
            DialogMode::View(a) | DialogMode::Edit(a) => Some(a),
            _ => None,
        }
    }

    pub fn title(&self) -> String {
        match self {
            DialogMode::Closed => String::new(),
            DialogMode::Create(_) => "Novo atendimento".to_string(),
            DialogMode::View(a) => a.title.clone(),
            DialogMode::Edit(_) => "Editar atendimento".to_string(),
        }
    }
}

/// First slot offered when creating on `day`: the next full hour today,
/// 09:00 on any other day.
pub fn default_start(day: NaiveDate, now: NaiveDateTime) -> NaiveDateTime {
    if day == now.date() {
        let hour = now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now);
        hour + Duration::hours(1)
    } else {
        day.and_time(NaiveTime::from_hms_opt(FIRST_SLOT_HOUR, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

/// Empty form starting at `start`, registered by the logged-in employee.
pub fn new_form(start: NaiveDateTime, registered_by: Option<RecordId>) -> AppointmentForm {
    AppointmentForm {
        start: format_datetime_local(start),
        end: format_datetime_local(start + Duration::minutes(DEFAULT_DURATION_MINUTES)),
        registered_by_id: registered_by,
        employee_ids: registered_by.into_iter().collect(),
        ..Default::default()
    }
}

#[derive(Clone, Copy)]
pub struct AppointmentDetailsVm {
    pub mode: RwSignal<DialogMode>,
    pub form: RwSignal<AppointmentForm>,
    pub errors: RwSignal<FieldErrors>,
    pub confirm_delete: RwSignal<bool>,
    pub mutation: Mutation,
    notifier: Notifier,
    current_employee: Signal<Option<RecordId>>,
}

impl AppointmentDetailsVm {
    pub fn new(mode: RwSignal<DialogMode>) -> Self {
        let auth = use_session();
        Self {
            mode,
            form: RwSignal::new(AppointmentForm::default()),
            errors: RwSignal::new(FieldErrors::new()),
            confirm_delete: RwSignal::new(false),
            mutation: Mutation::new(Appointment::collection_name()),
            notifier: use_notifier(),
            current_employee: Signal::derive(move || {
                auth.user.with(|u| u.as_ref().and_then(|u| u.employee_id))
            }),
        }
    }

    fn reset(&self, form: AppointmentForm) {
        self.form.set(form);
        self.errors.set(FieldErrors::new());
        self.confirm_delete.set(false);
    }

    pub fn open_create(&self, day: NaiveDate) {
        let start = default_start(day, now_local());
        self.reset(new_form(start, self.current_employee.get_untracked()));
        self.mode.set(DialogMode::Create(start));
    }

    pub fn open_view(&self, appointment: Appointment) {
        self.confirm_delete.set(false);
        self.mode.set(DialogMode::View(appointment));
    }

    pub fn edit(&self) {
        let Some(appointment) = self.allowed(AppointmentAction::Edit) else {
            return;
        };
        self.reset(appointment.to_form());
        self.mode.set(DialogMode::Edit(appointment));
    }

    pub fn close(&self) {
        self.confirm_delete.set(false);
        self.mode.set(DialogMode::Closed);
    }

    /// The open appointment, if `action` is allowed on it; otherwise reports why.
    fn allowed(&self, action: AppointmentAction) -> Option<Appointment> {
        let appointment = self.mode.with_untracked(|m| m.appointment().cloned())?;
        match appointment.check(action) {
            Ok(()) => Some(appointment),
            Err(e) => {
                self.notifier.error(e.to_string());
                None
            }
        }
    }

    pub fn save(&self) {
        let payload = match self.form.with_untracked(AppointmentForm::validate) {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors.set(errors);
                return;
            }
        };
        self.errors.set(FieldErrors::new());

        let editing = match self.mode.get_untracked() {
            DialogMode::Edit(_) => match self.allowed(AppointmentAction::Edit) {
                Some(appointment) => Some(appointment.id),
                None => return,
            },
            _ => None,
        };
        let success = if editing.is_some() {
            "Atendimento atualizado com sucesso"
        } else {
            "Atendimento agendado com sucesso"
        };
        let mode = self.mode;
        self.mutation.run(
            "save",
            success.to_string(),
            async move {
                match editing {
                    Some(id) => model::update(id, &payload).await,
                    None => model::create(&payload).await,
                }
            },
            move || mode.set(DialogMode::Closed),
        );
    }

    pub fn mark_done(&self) {
        let Some(appointment) = self.allowed(AppointmentAction::MarkDone) else {
            return;
        };
        let mode = self.mode;
        self.mutation.run(
            "mark_done",
            "Atendimento marcado como realizado".to_string(),
            async move { model::mark_done(appointment.id).await },
            move || mode.set(DialogMode::Closed),
        );
    }

    pub fn unmark_done(&self) {
        let Some(appointment) = self.allowed(AppointmentAction::UnmarkDone) else {
            return;
        };
        let mode = self.mode;
        self.mutation.run(
            "unmark_done",
            "Atendimento voltou para agendado".to_string(),
            async move { model::unmark_done(appointment.id).await },
            move || mode.set(DialogMode::Closed),
        );
    }

    pub fn delete(&self) {
        let Some(appointment) = self.allowed(AppointmentAction::Delete) else {
            return;
        };
        let mode = self.mode;
        let confirm = self.confirm_delete;
        self.mutation.run(
            "delete",
            "Atendimento excluído".to_string(),
            async move { model::delete(appointment.id).await },
            move || {
                confirm.set(false);
                mode.set(DialogMode::Closed);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_default_start() {
        let now = dt("2024-06-12 14:37");
        assert_eq!(default_start(now.date(), now), dt("2024-06-12 15:00"));
        let other = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(default_start(other, now), dt("2024-06-14 09:00"));
    }

    #[test]
    fn test_new_form() {
        let form = new_form(dt("2024-06-12 15:00"), Some(7));
        assert_eq!(form.start, "2024-06-12T15:00");
        assert_eq!(form.end, "2024-06-12T16:00");
        assert_eq!(form.registered_by_id, Some(7));
        assert_eq!(form.employee_ids, vec![7]);

        let form = new_form(dt("2024-06-12 15:00"), None);
        assert!(form.employee_ids.is_empty());
    }

    #[test]
    fn test_dialog_mode() {
        assert!(!DialogMode::Closed.is_open());
        let create = DialogMode::Create(dt("2024-06-12 15:00"));
        assert!(create.is_open());
        assert!(create.is_form());
        assert!(create.appointment().is_none());
        assert_eq!(create.title(), "Novo atendimento");
    }
}
