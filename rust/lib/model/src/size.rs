use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub length: f64,
    pub mesh_type_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Size {
    /// `width x height x length`.
    pub fn dimensions(&self) -> String {
        format!("{} x {} x {}", self.width, self.height, self.length)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSize {
    pub name: String,
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub mesh_type_id: String,
}

impl Resource for Size {
    type Create = NewSize;
    type Update = WithId<NewSize>;

    const PATH: &'static str = "/Size";
    const NAME: &'static str = "size";
    const PLURAL: &'static str = "sizes";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
