use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

/// A stock entry of a material: meters and weight received, total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInput {
    pub id: String,
    #[serde(default)]
    pub meters: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub total_price: f64,
    pub material_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterialInput {
    pub meters: f64,
    pub weight: f64,
    pub total_price: f64,
    pub material_id: String,
}

impl Resource for MaterialInput {
    type Create = NewMaterialInput;
    type Update = WithId<NewMaterialInput>;

    const PATH: &'static str = "/MaterialInput";
    const NAME: &'static str = "material input";
    const PLURAL: &'static str = "material inputs";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} m / {} kg", self.meters, self.weight)
    }
}
