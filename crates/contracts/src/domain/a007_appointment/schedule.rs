//! Weekly calendar arithmetic: the visible 7-day window and the assignment of
//! appointments to its days.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::aggregate::{Appointment, AppointmentStatus};

pub const DAYS_IN_WEEK: u64 = 7;

const WEEKDAY_SHORT: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| day_start(date))
}

/// Monday 00:00:00.000 of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDateTime {
    let back = u64::from(date.weekday().num_days_from_monday());
    day_start(date - Days::new(back))
}

/// Sunday 23:59:59.999 of the week starting at `start`.
pub fn end_of_week(start: NaiveDateTime) -> NaiveDateTime {
    day_end(start.date() + Days::new(DAYS_IN_WEEK - 1))
}

/// One calendar day as an inclusive interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayRange {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            start: day_start(date),
            end: day_end(date),
        }
    }

    /// "Seg 10/06"
    pub fn label(&self) -> String {
        let idx = self.date.weekday().num_days_from_monday() as usize;
        format!("{} {}", WEEKDAY_SHORT[idx], self.date.format("%d/%m"))
    }
}

/// The visible week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekWindow {
    pub fn containing(date: NaiveDate) -> Self {
        let start = start_of_week(date);
        Self {
            start,
            end: end_of_week(start),
        }
    }

    /// Same weekday shifted by `weeks` (negative goes back).
    pub fn shifted(&self, weeks: i64) -> Self {
        let days = weeks.unsigned_abs() * DAYS_IN_WEEK;
        let anchor = self.start.date();
        let anchor = if weeks < 0 {
            anchor - Days::new(days)
        } else {
            anchor + Days::new(days)
        };
        Self::containing(anchor)
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    pub fn days(&self) -> Vec<DayRange> {
        (0..DAYS_IN_WEEK)
            .map(|i| DayRange::new(self.start.date() + Days::new(i)))
            .collect()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    /// "10/06/2024 – 16/06/2024"
    pub fn label(&self) -> String {
        format!(
            "{} – {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

/// Inclusive overlap of `[start, end-or-start]` with the day.
pub fn overlaps_day(appointment: &Appointment, day: &DayRange) -> bool {
    appointment.start <= day.end && appointment.effective_end() >= day.start
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub day: DayRange,
    pub appointments: Vec<Appointment>,
}

/// Assigns active appointments to every day of the window they overlap,
/// ordered by start time within each day.
pub fn bucket_by_day(window: &WeekWindow, appointments: &[Appointment]) -> Vec<DayBucket> {
    window
        .days()
        .into_iter()
        .map(|day| {
            let mut items: Vec<Appointment> = appointments
                .iter()
                .filter(|a| a.active && overlaps_day(a, &day))
                .cloned()
                .collect();
            items.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
            DayBucket {
                day,
                appointments: items,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub scheduled: usize,
    pub done: usize,
}

/// Badge counts over active appointments.
pub fn summarize(appointments: &[Appointment]) -> StatusSummary {
    appointments
        .iter()
        .filter(|a| a.active)
        .fold(StatusSummary::default(), |mut acc, a| {
            match a.status {
                AppointmentStatus::Scheduled => acc.scheduled += 1,
                AppointmentStatus::Done => acc.done += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::EntityRef;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        date.and_hms_opt(h, min, 0).unwrap()
    }

    fn appointment(
        id: i64,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        active: bool,
    ) -> Appointment {
        Appointment {
            id,
            title: format!("A{id}"),
            description: None,
            client: EntityRef::new(1, "Cliente"),
            registered_by: EntityRef::new(1, "Ana"),
            start,
            end,
            status: AppointmentStatus::Scheduled,
            active,
            employees: vec![],
            reminders: vec![],
        }
    }

    #[test]
    fn test_start_of_week_is_monday_midnight_for_every_day() {
        let mut d = date(2023, 12, 20);
        for _ in 0..400 {
            let start = start_of_week(d);
            let end = end_of_week(start);
            assert_eq!(start.weekday(), Weekday::Mon);
            assert_eq!(start.time(), NaiveTime::MIN);
            assert_eq!(end.weekday(), Weekday::Sun);
            assert_eq!(end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
            let noon = at(d, 12, 0);
            assert!(start <= noon && noon <= end);
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        assert_eq!(start_of_week(date(2024, 6, 16)).date(), date(2024, 6, 10));
        assert_eq!(start_of_week(date(2024, 6, 10)).date(), date(2024, 6, 10));
    }

    #[test]
    fn test_navigation() {
        let week = WeekWindow::containing(date(2024, 6, 12));
        assert_eq!(week.previous().start.date(), date(2024, 6, 3));
        assert_eq!(week.next().start.date(), date(2024, 6, 17));
        assert_eq!(week.shifted(-52).next().shifted(51), week);
        assert_eq!(week.label(), "10/06/2024 – 16/06/2024");
        assert_eq!(week.days()[0].label(), "Seg 10/06");
        assert_eq!(week.days()[6].label(), "Dom 16/06");
    }

    #[test]
    fn test_bucketing_matches_overlap_rule() {
        let week = WeekWindow::containing(date(2024, 6, 10));
        let items = vec![
            // point event on Tuesday
            appointment(1, at(date(2024, 6, 11), 15, 0), None, true),
            // spans Wed 22:00 -> Fri 01:00
            appointment(2, at(date(2024, 6, 12), 22, 0), Some(at(date(2024, 6, 14), 1, 0)), true),
            // earlier on Tuesday, must sort first
            appointment(3, at(date(2024, 6, 11), 8, 0), Some(at(date(2024, 6, 11), 9, 0)), true),
            // inactive is never shown
            appointment(4, at(date(2024, 6, 11), 10, 0), None, false),
            // started last week, ends Monday 00:00 exactly
            appointment(5, at(date(2024, 6, 7), 10, 0), Some(at(date(2024, 6, 10), 0, 0)), true),
            // next week
            appointment(6, at(date(2024, 6, 17), 0, 0), None, true),
        ];

        let buckets = bucket_by_day(&week, &items);
        let ids: Vec<Vec<i64>> = buckets
            .iter()
            .map(|b| b.appointments.iter().map(|a| a.id).collect())
            .collect();
        assert_eq!(
            ids,
            vec![vec![5], vec![3, 1], vec![2], vec![2], vec![2], vec![], vec![]]
        );

        for bucket in &buckets {
            for a in items.iter().filter(|a| a.active) {
                let expected =
                    a.start <= bucket.day.end && a.end.unwrap_or(a.start) >= bucket.day.start;
                let present = bucket.appointments.iter().any(|x| x.id == a.id);
                assert_eq!(expected, present, "appointment {} on {}", a.id, bucket.day.date);
            }
        }
    }

    #[test]
    fn test_summary_counts_active_only() {
        let mut done = appointment(1, at(date(2024, 6, 11), 8, 0), None, true);
        done.status = AppointmentStatus::Done;
        let mut done_inactive = done.clone();
        done_inactive.active = false;
        let items = vec![
            done,
            done_inactive,
            appointment(2, at(date(2024, 6, 11), 9, 0), None, true),
            appointment(3, at(date(2024, 6, 11), 9, 0), None, true),
        ];
        assert_eq!(summarize(&items), StatusSummary { scheduled: 2, done: 1 });
    }
}
