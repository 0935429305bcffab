//! The `Resource` trait binds a record type to its REST collection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type exposed by the ERP API as a REST collection.
///
/// `GET PATH` lists, `POST PATH` creates, `PUT PATH/{id}` updates and
/// `DELETE PATH/{id}` deletes (unless [`Resource::DELETABLE`] is false).
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Payload for `POST`.
    type Create: Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Payload for `PUT`.
    type Update: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Collection path, e.g. `/Color`.
    const PATH: &'static str;
    /// Singular display name, e.g. `color`.
    const NAME: &'static str;
    /// Plural display name, e.g. `colors`.
    const PLURAL: &'static str;
    /// Whether the API offers `DELETE PATH/{id}`.
    const DELETABLE: bool = true;

    /// Server-assigned identifier.
    fn id(&self) -> &str;

    /// Human-readable label used in lookups and confirmations.
    fn label(&self) -> String;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }

    /// Target of `PUT`; the item path unless the collection updates in place.
    fn update_path(id: &str) -> String {
        Self::item_path(id)
    }
}

/// Update payload: the create fields plus the record id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithId<C> {
    pub id: String,
    #[serde(flatten)]
    pub body: C,
}

impl<C> WithId<C> {
    pub fn new(id: impl Into<String>, body: C) -> Self {
        Self { id: id.into(), body }
    }
}
