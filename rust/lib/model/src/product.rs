use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    /// Catalog code.
    #[serde(default)]
    pub cod: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Sold as a set (e.g. top + bottom).
    #[serde(default)]
    pub is_set: bool,
    pub material_id: String,
    #[serde(default)]
    pub variations_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub cod: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_set: bool,
    pub material_id: String,
}

impl Resource for Product {
    type Create = NewProduct;
    type Update = WithId<NewProduct>;

    const PATH: &'static str = "/Product";
    const NAME: &'static str = "product";
    const PLURAL: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
