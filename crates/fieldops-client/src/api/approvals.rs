//! Account approval endpoints

use fieldops_core::{ApprovalStatus, User};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

/// One pending signup awaiting a director/admin decision.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub requested_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: ApprovalStatus,
}

impl ApiClient {
    pub async fn pending_requests(
        &self,
        session: &Session,
    ) -> Result<Vec<PendingRequest>, ClientError> {
        self.get_json(session, "/pending/requests").await
    }

    /// Approve or reject a pending request. `kind` is the backend's
    /// resource type segment (currently always `users`).
    pub async fn set_approval(
        &self,
        session: &Session,
        kind: &str,
        id: &str,
        status: ApprovalStatus,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .put_json(session, &format!("/api/{kind}/{id}"), &StatusUpdate { status })
            .await?;
        Ok(())
    }
}
