use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

/// Target audience of a variation. Wire format is an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Gender {
    Male,
    Female,
    Unisex,
    Kids,
    Unknown(i64),
}

impl From<i64> for Gender {
    fn from(v: i64) -> Self {
        match v {
            1 => Gender::Male,
            2 => Gender::Female,
            3 => Gender::Unisex,
            4 => Gender::Kids,
            other => Gender::Unknown(other),
        }
    }
}

impl From<Gender> for i64 {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::Unisex => 3,
            Gender::Kids => 4,
            Gender::Unknown(v) => v,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
            Gender::Unisex => f.write_str("unisex"),
            Gender::Kids => f.write_str("kids"),
            Gender::Unknown(_) => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_cap: bool,
    #[serde(default)]
    pub is_pocket: bool,
    #[serde(default)]
    pub with_rib: bool,
    pub gender: Gender,
    #[serde(default)]
    pub enable: bool,
    pub product_id: String,
    pub size_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ProductVariation {
    /// Short list of finishing features, e.g. `cap, rib`.
    pub fn features(&self) -> String {
        let mut out = Vec::new();
        if self.is_cap {
            out.push("cap");
        }
        if self.is_pocket {
            out.push("pocket");
        }
        if self.with_rib {
            out.push("rib");
        }
        if out.is_empty() {
            "-".to_string()
        } else {
            out.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductVariation {
    pub name: String,
    #[serde(default)]
    pub is_cap: bool,
    #[serde(default)]
    pub is_pocket: bool,
    #[serde(default)]
    pub with_rib: bool,
    pub gender: Gender,
    #[serde(default = "enabled")]
    pub enable: bool,
    pub product_id: String,
    pub size_id: String,
}

fn enabled() -> bool {
    true
}

impl Resource for ProductVariation {
    type Create = NewProductVariation;
    type Update = WithId<NewProductVariation>;

    const PATH: &'static str = "/ProductVariation";
    const NAME: &'static str = "product variation";
    const PLURAL: &'static str = "product variations";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
