//! REST verbs mapped onto resource operations.
//!
//! `/{collection}` GET list, POST create; `/{collection}/{id}` GET, PUT update,
//! DELETE soft-delete; `/{collection}/{id}/reativar` PUT.

use contracts::domain::common::{CrudEntity, Reactivatable, RecordId, Resource};
use contracts::shared::api_error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::http::{send, send_json, Method};

pub fn collection_path<E: Resource>() -> String {
    format!("/{}", E::collection_name())
}

pub fn item_path<E: Resource>(id: RecordId) -> String {
    format!("/{}/{}", E::collection_name(), id)
}

pub fn action_path<E: Resource>(id: RecordId, action: &str) -> String {
    format!("/{}/{}/{}", E::collection_name(), id, action)
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<Option<T>, ApiError> {
    send(Method::Get, path, None).await?.into_json()
}

pub async fn write_json<B: Serialize, T: DeserializeOwned>(
    method: Method,
    path: &str,
    payload: &B,
) -> Result<Option<T>, ApiError> {
    send_json(method, path, payload).await?.into_json()
}

/// Sends a body-less request and discards whatever comes back.
pub async fn command(method: Method, path: &str) -> Result<(), ApiError> {
    send(method, path, None)
        .await?
        .into_json::<serde_json::Value>()
        .map(|_| ())
}

pub async fn list<E: Resource>() -> Result<Vec<E>, ApiError> {
    Ok(get_json::<Vec<E>>(&collection_path::<E>())
        .await?
        .unwrap_or_default())
}

pub async fn get_by_id<E: Resource>(id: RecordId) -> Result<Option<E>, ApiError> {
    get_json(&item_path::<E>(id)).await
}

pub async fn create<E: CrudEntity>(payload: &E::Payload) -> Result<Option<E>, ApiError> {
    write_json(Method::Post, &collection_path::<E>(), payload).await
}

pub async fn update<E: CrudEntity>(id: RecordId, payload: &E::Payload) -> Result<Option<E>, ApiError> {
    write_json(Method::Put, &item_path::<E>(id), payload).await
}

pub async fn deactivate<E: Resource>(id: RecordId) -> Result<(), ApiError> {
    command(Method::Delete, &item_path::<E>(id)).await
}

pub async fn reactivate<E: Reactivatable>(id: RecordId) -> Result<(), ApiError> {
    command(Method::Put, &action_path::<E>(id, "reativar")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_sector::aggregate::Sector;
    use contracts::domain::a007_appointment::aggregate::Appointment;

    #[test]
    fn test_paths() {
        assert_eq!(collection_path::<Sector>(), "/setores");
        assert_eq!(item_path::<Sector>(4), "/setores/4");
        assert_eq!(action_path::<Sector>(4, "reativar"), "/setores/4/reativar");
        assert_eq!(action_path::<Appointment>(9, "realizar"), "/atendimentos/9/realizar");
    }
}
