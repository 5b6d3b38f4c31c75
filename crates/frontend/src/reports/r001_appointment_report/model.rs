use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate, NaiveTime};
use contracts::domain::a007_appointment::aggregate::{Appointment, AppointmentStatus};
use contracts::domain::common::RecordId;

use crate::domain::a007_appointment::ui::model::WeekQuery;
use crate::shared::date_utils::{format_naive_date, format_naive_datetime, to_input_date};
use crate::shared::export::CsvReport;
use crate::shared::list_utils::{sort_list, Sortable};

pub const REPORT_TITLE: &str = "Relatório de Atendimentos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportColumn {
    Title,
    Client,
    RegisteredBy,
    Start,
    End,
    Status,
    Employees,
    Active,
}

impl ReportColumn {
    pub const ALL: [ReportColumn; 8] = [
        ReportColumn::Title,
        ReportColumn::Client,
        ReportColumn::RegisteredBy,
        ReportColumn::Start,
        ReportColumn::End,
        ReportColumn::Status,
        ReportColumn::Employees,
        ReportColumn::Active,
    ];

    /// Sort key
    pub fn key(&self) -> &'static str {
        match self {
            ReportColumn::Title => "titulo",
            ReportColumn::Client => "cliente",
            ReportColumn::RegisteredBy => "registradoPor",
            ReportColumn::Start => "dataInicio",
            ReportColumn::End => "dataFim",
            ReportColumn::Status => "status",
            ReportColumn::Employees => "colaboradores",
            ReportColumn::Active => "ativo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportColumn::Title => "Título",
            ReportColumn::Client => "Cliente",
            ReportColumn::RegisteredBy => "Registrado por",
            ReportColumn::Start => "Início",
            ReportColumn::End => "Fim",
            ReportColumn::Status => "Status",
            ReportColumn::Employees => "Colaboradores",
            ReportColumn::Active => "Situação",
        }
    }

    pub fn value(&self, a: &Appointment) -> String {
        match self {
            ReportColumn::Title => a.title.clone(),
            ReportColumn::Client => a.client.name.clone(),
            ReportColumn::RegisteredBy => a.registered_by.name.clone(),
            ReportColumn::Start => format_naive_datetime(a.start),
            ReportColumn::End => a.end.map(format_naive_datetime).unwrap_or_default(),
            ReportColumn::Status => a.status.label().to_string(),
            ReportColumn::Employees => employee_names(a),
            ReportColumn::Active => (if a.active { "Ativo" } else { "Inativo" }).to_string(),
        }
    }
}

fn employee_names(a: &Appointment) -> String {
    a.employees
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Sortable for Appointment {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "titulo" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "cliente" => self
                .client
                .name
                .to_lowercase()
                .cmp(&other.client.name.to_lowercase()),
            "registradoPor" => self
                .registered_by
                .name
                .to_lowercase()
                .cmp(&other.registered_by.name.to_lowercase()),
            "dataFim" => self.effective_end().cmp(&other.effective_end()),
            "status" => self.status.label().cmp(other.status.label()),
            "colaboradores" => employee_names(self)
                .to_lowercase()
                .cmp(&employee_names(other).to_lowercase()),
            "ativo" => self.active.cmp(&other.active),
            _ => self.start.cmp(&other.start),
        }
        .then(self.id.cmp(&other.id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Scheduled,
    Done,
}

impl StatusFilter {
    pub fn code(&self) -> &'static str {
        match self {
            StatusFilter::All => "",
            StatusFilter::Scheduled => "AGENDADO",
            StatusFilter::Done => "REALIZADO",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "AGENDADO" => StatusFilter::Scheduled,
            "REALIZADO" => StatusFilter::Done,
            _ => StatusFilter::All,
        }
    }

    fn accepts(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Scheduled => status == AppointmentStatus::Scheduled,
            StatusFilter::Done => status == AppointmentStatus::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveFilter {
    #[default]
    Active,
    Inactive,
    All,
}

impl ActiveFilter {
    pub fn code(&self) -> &'static str {
        match self {
            ActiveFilter::Active => "ativos",
            ActiveFilter::Inactive => "inativos",
            ActiveFilter::All => "todos",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "inativos" => ActiveFilter::Inactive,
            "todos" => ActiveFilter::All,
            _ => ActiveFilter::Active,
        }
    }

    fn accepts(&self, active: bool) -> bool {
        match self {
            ActiveFilter::Active => active,
            ActiveFilter::Inactive => !active,
            ActiveFilter::All => true,
        }
    }
}

/// Filter bar state; dates are `<input type="date">` values.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilters {
    pub from: String,
    pub to: String,
    pub status: StatusFilter,
    pub client_id: Option<RecordId>,
    pub active: ActiveFilter,
}

impl ReportFilters {
    /// Current month up to its last day
    pub fn for_month_of(today: NaiveDate) -> Self {
        let first = today.with_day(1).unwrap_or(today);
        let next_month = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
        Self {
            from: to_input_date(first),
            to: to_input_date(last),
            status: StatusFilter::default(),
            client_id: None,
            active: ActiveFilter::default(),
        }
    }

    pub fn period(&self) -> Result<(NaiveDate, NaiveDate), String> {
        let parse = |s: &str| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok();
        let (Some(from), Some(to)) = (parse(&self.from), parse(&self.to)) else {
            return Err("Informe o período".to_string());
        };
        if from > to {
            return Err("A data inicial deve ser anterior à data final".to_string());
        }
        Ok((from, to))
    }

    /// Range sent to the list endpoint
    pub fn query(&self) -> Result<WeekQuery, String> {
        let (from, to) = self.period()?;
        let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Ok(WeekQuery::new(from.and_time(NaiveTime::MIN), to.and_time(end)))
    }

    pub fn matches(&self, a: &Appointment) -> bool {
        self.status.accepts(a.status)
            && self.active.accepts(a.active)
            && self.client_id.map_or(true, |id| a.client.id == id)
    }

    /// (label, value) of every filter that narrows the result
    pub fn summary(&self, client_name: Option<&str>) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok((from, to)) = self.period() {
            out.push((
                "Período".to_string(),
                format!("{} a {}", format_naive_date(from), format_naive_date(to)),
            ));
        }
        match self.status {
            StatusFilter::All => {}
            StatusFilter::Scheduled => out.push(("Status".into(), "Agendado".into())),
            StatusFilter::Done => out.push(("Status".into(), "Realizado".into())),
        }
        if let Some(name) = client_name.filter(|_| self.client_id.is_some()) {
            out.push(("Cliente".to_string(), name.to_string()));
        }
        match self.active {
            ActiveFilter::Active => out.push(("Situação".into(), "Ativos".into())),
            ActiveFilter::Inactive => out.push(("Situação".into(), "Inativos".into())),
            ActiveFilter::All => {}
        }
        out
    }
}

/// Sort and column selection
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub columns: Vec<ReportColumn>,
    pub sort_field: String,
    pub sort_ascending: bool,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            columns: vec![
                ReportColumn::Title,
                ReportColumn::Client,
                ReportColumn::Start,
                ReportColumn::End,
                ReportColumn::Status,
            ],
            sort_field: ReportColumn::Start.key().to_string(),
            sort_ascending: true,
        }
    }
}

impl ReportLayout {
    pub fn is_selected(&self, column: ReportColumn) -> bool {
        self.columns.contains(&column)
    }

    /// Adds or removes `column`, keeping the canonical order and at least
    /// one column.
    pub fn toggle_column(&mut self, column: ReportColumn) {
        if self.is_selected(column) {
            if self.columns.len() > 1 {
                self.columns.retain(|c| *c != column);
            }
        } else {
            self.columns.push(column);
            self.columns
                .sort_by_key(|c| ReportColumn::ALL.iter().position(|x| x == c));
        }
    }

    pub fn toggle_sort(&mut self, column: ReportColumn) {
        if self.sort_field == column.key() {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = column.key().to_string();
            self.sort_ascending = true;
        }
    }
}

/// Filtered and sorted rows
pub fn apply(items: &[Appointment], filters: &ReportFilters, layout: &ReportLayout) -> Vec<Appointment> {
    let mut rows: Vec<Appointment> = items.iter().filter(|a| filters.matches(a)).cloned().collect();
    sort_list(&mut rows, &layout.sort_field, layout.sort_ascending);
    rows
}

pub fn build_csv(
    rows: &[Appointment],
    layout: &ReportLayout,
    filters: Vec<(String, String)>,
    generated_at: String,
    footer: Option<&str>,
) -> CsvReport {
    CsvReport {
        title: REPORT_TITLE.to_string(),
        generated_at,
        filters,
        headers: layout.columns.iter().map(|c| c.label().to_string()).collect(),
        rows: rows
            .iter()
            .map(|a| layout.columns.iter().map(|c| c.value(a)).collect())
            .collect(),
        footer: footer.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::domain::common::EntityRef;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn appointment(id: RecordId, title: &str, client: (RecordId, &str), start: &str) -> Appointment {
        Appointment {
            id,
            title: title.into(),
            description: None,
            client: EntityRef::new(client.0, client.1),
            registered_by: EntityRef::new(9, "Ana Reis"),
            start: at(start),
            end: None,
            status: AppointmentStatus::Scheduled,
            active: true,
            employees: vec![EntityRef::new(9, "Ana Reis")],
            reminders: vec![],
        }
    }

    fn items() -> Vec<Appointment> {
        let mut done = appointment(2, "Instalação", (1, "ACME"), "2024-06-03 09:00");
        done.status = AppointmentStatus::Done;
        let mut inactive = appointment(3, "Cancelado", (2, "Beta"), "2024-06-04 09:00");
        inactive.active = false;
        vec![
            appointment(1, "visita", (2, "Beta"), "2024-06-10 14:00"),
            done,
            inactive,
        ]
    }

    fn filters() -> ReportFilters {
        ReportFilters::for_month_of(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_month_defaults() {
        let f = filters();
        assert_eq!(f.from, "2024-06-01");
        assert_eq!(f.to, "2024-06-30");
        let dec = ReportFilters::for_month_of(NaiveDate::from_ymd_opt(2024, 12, 5).unwrap());
        assert_eq!(dec.to, "2024-12-31");

        let query = f.query().unwrap();
        assert_eq!(query.start, "2024-06-01T00:00:00");
        assert_eq!(query.end, "2024-06-30T23:59:59");
    }

    #[test]
    fn test_period_errors() {
        let mut f = filters();
        f.from = "2024-07-01".into();
        assert!(f.period().is_err());
        f.from = String::new();
        assert_eq!(f.period().unwrap_err(), "Informe o período");
    }

    #[test]
    fn test_apply_filters_and_sort() {
        let layout = ReportLayout::default();
        let rows = apply(&items(), &filters(), &layout);
        assert_eq!(rows.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1]);

        let mut f = filters();
        f.status = StatusFilter::Done;
        assert_eq!(apply(&items(), &f, &layout).len(), 1);

        let mut f = filters();
        f.active = ActiveFilter::All;
        f.client_id = Some(2);
        let rows = apply(&items(), &f, &layout);
        assert_eq!(rows.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive() {
        let mut layout = ReportLayout::default();
        layout.toggle_sort(ReportColumn::Title);
        let rows = apply(&items(), &filters(), &layout);
        assert_eq!(rows[0].title, "Instalação");
        layout.toggle_sort(ReportColumn::Title);
        assert!(!layout.sort_ascending);
        let rows = apply(&items(), &filters(), &layout);
        assert_eq!(rows[0].title, "visita");
    }

    #[test]
    fn test_toggle_column_keeps_order_and_one_column() {
        let mut layout = ReportLayout::default();
        layout.toggle_column(ReportColumn::RegisteredBy);
        assert_eq!(layout.columns[2], ReportColumn::RegisteredBy);

        let mut layout = ReportLayout {
            columns: vec![ReportColumn::Title],
            ..Default::default()
        };
        layout.toggle_column(ReportColumn::Title);
        assert_eq!(layout.columns, vec![ReportColumn::Title]);
    }

    #[test]
    fn test_summary() {
        let mut f = filters();
        f.status = StatusFilter::Scheduled;
        f.client_id = Some(2);
        let summary = f.summary(Some("Beta"));
        assert_eq!(
            summary,
            vec![
                ("Período".to_string(), "01/06/2024 a 30/06/2024".to_string()),
                ("Status".to_string(), "Agendado".to_string()),
                ("Cliente".to_string(), "Beta".to_string()),
                ("Situação".to_string(), "Ativos".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_csv() {
        let layout = ReportLayout {
            columns: vec![ReportColumn::Title, ReportColumn::Employees, ReportColumn::Active],
            ..Default::default()
        };
        let rows = apply(&items(), &filters(), &layout);
        let report = build_csv(&rows, &layout, vec![], "15/06/2024 10:00".into(), Some("ACME"));
        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.headers, vec!["Título", "Colaboradores", "Situação"]);
        assert_eq!(report.rows[0], vec!["Instalação", "Ana Reis", "Ativo"]);
        assert_eq!(report.footer.as_deref(), Some("ACME"));
    }
}
