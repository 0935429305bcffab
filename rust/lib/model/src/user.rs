use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Manager,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::User => f.write_str("user"),
            Role::Manager => f.write_str("manager"),
            Role::Unknown => f.write_str("unknown"),
        }
    }
}

/// An operator account. The API exposes no separate id: the user name is
/// the identifier, and there is no `DELETE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_name: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub user_name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Resource for User {
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;

    const PATH: &'static str = "/User";
    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";
    const DELETABLE: bool = false;

    fn id(&self) -> &str {
        self.user_name.as_deref().unwrap_or("")
    }

    fn label(&self) -> String {
        self.id().to_string()
    }

    /// `PUT /User`: the user name travels in the body.
    fn update_path(_id: &str) -> String {
        Self::PATH.to_string()
    }
}
