//! Models that represent the acting user and directory entries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema, Default)]
/// Roles issued by the identity provider.
pub enum Role {
    /// Creates requests and works on the ones assigned to them.
    #[default]
    Employee,
    /// Decides on pending requests.
    Manager,
}

impl Role {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Parses a role name, tolerating the legacy casings some clients still send.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "employee" | "Employee" | "EMPLOYEE" => Some(Role::Employee),
            "manager" | "Manager" | "MANAGER" => Some(Role::Manager),
            _ => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Role::parse(&s)
            .ok_or_else(|| serde::de::Error::unknown_variant(&s, &["employee", "manager"]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Authenticated caller of a lifecycle operation.
///
/// Built per call from verified identity claims; the lifecycle engine trusts it as-is.
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn employee(id: UserId) -> Self {
        Self {
            id,
            role: Role::Employee,
        }
    }

    pub fn manager(id: UserId) -> Self {
        Self {
            id,
            role: Role::Manager,
        }
    }

    pub fn is_employee(&self) -> bool {
        matches!(self.role, Role::Employee)
    }

    pub fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
/// Assignable employee as listed by the directory.
pub struct Employee {
    pub id: UserId,
    pub username: String,
}

impl Employee {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
