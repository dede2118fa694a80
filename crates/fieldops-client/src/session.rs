//! Session context
//!
//! `{token, user}` established at login and passed explicitly to every API
//! call. Keeping this a plain value (rather than an ambient singleton)
//! lets tests inject a fake token and role.

use fieldops_core::{Capabilities, Role, User};

#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn capabilities(&self) -> Capabilities {
        self.user.role.capabilities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_follow_the_user_role() {
        let user = User {
            id: "u-1".into(),
            name: "Sam".into(),
            role: Role::Head,
            ..Default::default()
        };
        let session = Session::new("tok", user);
        assert!(session.capabilities().can_assign);
        assert!(!session.capabilities().can_delete);
    }
}
