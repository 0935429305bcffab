use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

/// Mesh (knit) type, referenced by sizes and materials as `meshTypeId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub composition: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMesh {
    pub name: String,
    #[serde(default)]
    pub composition: String,
}

impl Resource for Mesh {
    type Create = NewMesh;
    type Update = WithId<NewMesh>;

    const PATH: &'static str = "/Mesh";
    const NAME: &'static str = "mesh";
    const PLURAL: &'static str = "meshes";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
