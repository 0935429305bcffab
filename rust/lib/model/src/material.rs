use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Supplier name. The API spells it `supplie`.
    #[serde(default)]
    pub supplie: Option<String>,
    /// Units per package.
    #[serde(default)]
    pub inside: i64,
    pub mesh_type_id: String,
    pub color_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    pub name: Option<String>,
    pub supplie: Option<String>,
    pub inside: i64,
    pub mesh_type_id: String,
    pub color_id: String,
}

impl Resource for Material {
    type Create = NewMaterial;
    type Update = WithId<NewMaterial>;

    const PATH: &'static str = "/Material";
    const NAME: &'static str = "material";
    const PLURAL: &'static str = "materials";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.supplie.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}
