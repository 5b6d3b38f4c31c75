//! Appointment API calls.

use chrono::NaiveDateTime;
use contracts::domain::a007_appointment::aggregate::{Appointment, AppointmentPayload};
use contracts::domain::a007_appointment::schedule::WeekWindow;
use contracts::domain::common::RecordId;
use contracts::shared::api_error::ApiError;
use serde::Serialize;

use crate::shared::crud_api::{self, action_path, collection_path, command, get_json, item_path, write_json};
use crate::shared::http::Method;

const QUERY_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// `?dataInicio=..&dataFim=..` on the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekQuery {
    #[serde(rename = "dataInicio")]
    pub start: String,
    #[serde(rename = "dataFim")]
    pub end: String,
}

impl WeekQuery {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: start.format(QUERY_DATETIME).to_string(),
            end: end.format(QUERY_DATETIME).to_string(),
        }
    }

    pub fn for_window(window: &WeekWindow) -> Self {
        Self::new(window.start, window.end)
    }
}

pub fn range_path(query: &WeekQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(format!("{}?{}", collection_path::<Appointment>(), qs))
}

/// Appointments overlapping `window`
pub async fn list_week(window: WeekWindow) -> Result<Vec<Appointment>, ApiError> {
    list_range(&WeekQuery::for_window(&window)).await
}

pub async fn list_range(query: &WeekQuery) -> Result<Vec<Appointment>, ApiError> {
    Ok(get_json::<Vec<Appointment>>(&range_path(query)?)
        .await?
        .unwrap_or_default())
}

pub async fn create(payload: &AppointmentPayload) -> Result<(), ApiError> {
    write_json::<_, serde_json::Value>(Method::Post, &collection_path::<Appointment>(), payload)
        .await
        .map(drop)
}

pub async fn update(id: RecordId, payload: &AppointmentPayload) -> Result<(), ApiError> {
    write_json::<_, serde_json::Value>(Method::Put, &item_path::<Appointment>(id), payload)
        .await
        .map(drop)
}

/// `PUT /atendimentos/{id}/realizar`
pub async fn mark_done(id: RecordId) -> Result<(), ApiError> {
    command(Method::Put, &action_path::<Appointment>(id, "realizar")).await
}

/// `PUT /atendimentos/{id}/agendar`
pub async fn unmark_done(id: RecordId) -> Result<(), ApiError> {
    command(Method::Put, &action_path::<Appointment>(id, "agendar")).await
}

pub async fn delete(id: RecordId) -> Result<(), ApiError> {
    crud_api::deactivate::<Appointment>(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn test_week_query() {
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        let query = WeekQuery::for_window(&window);
        assert_eq!(query.start, "2024-06-10T00:00:00");
        assert_eq!(query.end, "2024-06-16T23:59:59");

        let path = range_path(&query).unwrap();
        let (base, qs) = path.split_once('?').unwrap();
        assert_eq!(base, "/atendimentos");
        let params: HashMap<String, String> = serde_qs::from_str(qs).unwrap();
        assert_eq!(params["dataInicio"], "2024-06-10T00:00:00");
        assert_eq!(params["dataFim"], "2024-06-16T23:59:59");
    }
}
