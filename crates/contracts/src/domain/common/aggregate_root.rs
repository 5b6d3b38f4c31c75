use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RecordId;
use crate::shared::validation::FieldErrors;

/// A record exposed by the REST backend under `/{collection_name}`.
///
/// Covers identity, soft-delete state and the UI names; everything the generic
/// API layer needs to map verbs onto paths.
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Index of the record in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// REST collection (e.g. "setores")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Setor")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Setores")
    fn list_name() -> &'static str;

    fn id(&self) -> RecordId;

    /// Display name of the record
    fn name(&self) -> &str;

    fn is_active(&self) -> bool;
}

/// Records that can be created and edited through a form.
pub trait CrudEntity: Resource {
    /// Form state as edited by the user (masked strings, optional selections)
    type Form: Clone + Default + Send + Sync + 'static;

    /// Body sent on POST / PUT
    type Payload: Serialize + Clone + Send + Sync + 'static;

    /// Prefills the form from an existing record
    fn to_form(&self) -> Self::Form;

    /// Validates the form and maps it onto the payload.
    fn validate(
        form: &Self::Form,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<Self::Payload, FieldErrors>;

    /// Why this record cannot be deactivated right now, if anything blocks it.
    ///
    /// Driven by dependency flags sent by the backend, never computed locally.
    fn deactivation_blocker(&self) -> Option<&'static str> {
        None
    }

    /// Text matched by the list search box
    fn search_text(&self) -> String {
        self.name().to_string()
    }
}

/// Marker for records exposing `PUT /{collection}/{id}/reativar`.
pub trait Reactivatable: CrudEntity {}

/// What a validator may look at besides the form itself.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a, E> {
    /// Id of the record being edited; `None` when creating
    pub editing_id: Option<RecordId>,
    /// Every known sibling, active and inactive
    pub existing: &'a [E],
    pub today: NaiveDate,
}

impl<'a, E: Resource> ValidationContext<'a, E> {
    pub fn new(editing_id: Option<RecordId>, existing: &'a [E], today: NaiveDate) -> Self {
        Self {
            editing_id,
            existing,
            today,
        }
    }

    /// Names of all siblings except the record being edited
    pub fn sibling_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let editing_id = self.editing_id;
        self.existing
            .iter()
            .filter(move |e| Some(e.id()) != editing_id)
            .map(|e| e.name())
    }
}
