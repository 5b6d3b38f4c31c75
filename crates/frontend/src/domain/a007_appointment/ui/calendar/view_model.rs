use chrono::NaiveDate;
use contracts::domain::a007_appointment::aggregate::Appointment;
use contracts::domain::a007_appointment::schedule::{
    bucket_by_day, summarize, DayBucket, StatusSummary, WeekWindow,
};
use contracts::domain::common::Resource;
use leptos::prelude::*;

use super::super::details::{AppointmentDetailsVm, DialogMode};
use super::super::model;
use crate::shared::date_utils::{format_time, today};
use crate::shared::query_cache::ListQuery;

/// Time range shown on a card in the column of `day`. Multi-day
/// appointments show where they continue.
pub fn time_label(appointment: &Appointment, day: NaiveDate) -> String {
    let Some(end) = appointment.end else {
        return format_time(appointment.start);
    };
    let from = if appointment.start.date() == day {
        format_time(appointment.start)
    } else {
        "...".to_string()
    };
    let to = if end.date() == day {
        format_time(end)
    } else {
        "...".to_string()
    };
    format!("{from} - {to}")
}

#[derive(Clone, Copy)]
pub struct CalendarVm {
    pub week: RwSignal<WeekWindow>,
    pub appointments: ListQuery<Appointment>,
    pub details: AppointmentDetailsVm,
}

impl CalendarVm {
    pub fn new() -> Self {
        let week = RwSignal::new(WeekWindow::containing(today()));
        let appointments = ListQuery::watch(Appointment::collection_name(), move || {
            let window = week.get();
            async move { model::list_week(window).await }
        });
        Self {
            week,
            appointments,
            details: AppointmentDetailsVm::new(RwSignal::new(DialogMode::Closed)),
        }
    }

    pub fn previous(&self) {
        self.week.update(|w| *w = w.previous());
    }

    pub fn next(&self) {
        self.week.update(|w| *w = w.next());
    }

    pub fn current(&self) {
        self.week.set(WeekWindow::containing(today()));
    }

    pub fn is_current(&self) -> bool {
        self.week.with(|w| w.contains_date(today()))
    }

    pub fn buckets(&self) -> Vec<DayBucket> {
        let window = self.week.get();
        self.appointments
            .items
            .with(|items| bucket_by_day(&window, items))
    }

    pub fn summary(&self) -> StatusSummary {
        self.appointments.items.with(|items| summarize(items))
    }

    pub fn create_on(&self, day: NaiveDate) {
        self.details.open_create(day);
    }

    pub fn open(&self, appointment: Appointment) {
        self.details.open_view(appointment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::domain::a007_appointment::aggregate::AppointmentStatus;
    use contracts::domain::common::EntityRef;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn appointment(start: &str, end: Option<&str>) -> Appointment {
        Appointment {
            id: 1,
            title: "Reunião".into(),
            description: None,
            client: EntityRef::new(1, "Cliente"),
            registered_by: EntityRef::new(2, "Ana"),
            start: at(start),
            end: end.map(at),
            status: AppointmentStatus::Scheduled,
            active: true,
            employees: vec![],
            reminders: vec![],
        }
    }

    #[test]
    fn test_time_label_same_day() {
        let a = appointment("2024-06-12 14:00", Some("2024-06-12 15:30"));
        assert_eq!(time_label(&a, a.start.date()), "14:00 - 15:30");
    }

    #[test]
    fn test_time_label_without_end() {
        let a = appointment("2024-06-12 14:00", None);
        assert_eq!(time_label(&a, a.start.date()), "14:00");
    }

    #[test]
    fn test_time_label_spanning_days() {
        let a = appointment("2024-06-12 22:00", Some("2024-06-14 02:00"));
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        assert_eq!(time_label(&a, d(12)), "22:00 - ...");
        assert_eq!(time_label(&a, d(13)), "... - ...");
        assert_eq!(time_label(&a, d(14)), "... - 02:00");
    }
}
