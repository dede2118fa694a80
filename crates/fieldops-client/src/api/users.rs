//! User endpoints
//!
//! Users are the one entity with hard deletes; everything else cancels by
//! status transition.

use fieldops_core::{ApprovalStatus, User};

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

impl ApiClient {
    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>, ClientError> {
        self.get_json(session, "/users").await
    }

    /// Users eligible for assignment: approved accounts only.
    pub async fn list_approved_users(&self, session: &Session) -> Result<Vec<User>, ClientError> {
        let users = self.list_users(session).await?;
        Ok(users
            .into_iter()
            .filter(|u| u.status == ApprovalStatus::Approved)
            .collect())
    }

    pub async fn get_user(&self, session: &Session, id: &str) -> Result<User, ClientError> {
        self.get_json(session, &format!("/users/{id}")).await
    }

    pub async fn update_user(&self, session: &Session, user: &User) -> Result<User, ClientError> {
        self.put_json(session, &format!("/users/{}", user.id), user)
            .await
    }

    pub async fn delete_user(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete(session, &format!("/users/{id}")).await
    }
}
