//! Roles and capabilities
//!
//! The backend is the real authority on authorization; this table only
//! gates what the UI offers. Capabilities are computed once per role
//! instead of re-deriving role-string comparisons in every view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Admin,
    Head,
    #[default]
    User,
}

/// UI-level permissions for one role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_assign: bool,
    pub can_approve: bool,
}

impl Role {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Director | Role::Admin => Capabilities {
                can_edit: true,
                can_delete: true,
                can_assign: true,
                can_approve: true,
            },
            Role::Head => Capabilities {
                can_edit: true,
                can_delete: false,
                can_assign: true,
                can_approve: false,
            },
            Role::User => Capabilities::default(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Admin => "admin",
            Role::Head => "head",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "director" => Ok(Role::Director),
            "admin" => Ok(Role::Admin),
            "head" => Ok(Role::Head),
            "user" => Ok(Role::User),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Account approval state; a pending or rejected account cannot use
/// any other part of the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
