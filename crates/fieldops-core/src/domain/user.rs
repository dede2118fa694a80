//! User entity

use serde::{Deserialize, Serialize};

use crate::filter::Searchable;
use crate::role::{ApprovalStatus, Capabilities, Role};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: ApprovalStatus,
}

impl User {
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }
}

impl Searchable for User {
    fn haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }

    fn status_label(&self) -> &str {
        self.status.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_underscore_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u-1","name":"Sam","role":"head","status":"approved"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.role, Role::Head);
        assert!(user.is_approved());
    }

    #[test]
    fn serializes_with_canonical_id() {
        let user = User {
            id: "u-2".into(),
            name: "Lee".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "u-2");
        assert!(json.get("_id").is_none());
    }
}
