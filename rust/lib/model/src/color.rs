use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColor {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Resource for Color {
    type Create = NewColor;
    type Update = WithId<NewColor>;

    const PATH: &'static str = "/Color";
    const NAME: &'static str = "color";
    const PLURAL: &'static str = "colors";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
