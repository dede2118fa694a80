//! Complaint endpoints

use fieldops_core::Complaint;

use super::AssignWorkers;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

impl ApiClient {
    pub async fn list_complaints(&self, session: &Session) -> Result<Vec<Complaint>, ClientError> {
        self.get_json(session, "/complaints").await
    }

    pub async fn get_complaint(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Complaint, ClientError> {
        self.get_json(session, &format!("/complaints/{id}")).await
    }

    pub async fn create_complaint(
        &self,
        session: &Session,
        draft: &Complaint,
    ) -> Result<Complaint, ClientError> {
        draft.validate()?;
        self.post_json(session, "/complaints", draft).await
    }

    pub async fn update_complaint(
        &self,
        session: &Session,
        complaint: &Complaint,
    ) -> Result<Complaint, ClientError> {
        complaint.validate()?;
        self.put_json(session, &format!("/complaints/{}", complaint.id), complaint)
            .await
    }

    pub async fn delete_complaint(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete(session, &format!("/complaints/{id}")).await
    }

    pub async fn assign_complaint_workers(
        &self,
        session: &Session,
        id: &str,
        worker_ids: &[String],
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .post_json(
                session,
                &format!("/complaints/{id}/assign-workers"),
                &AssignWorkers { worker_ids },
            )
            .await?;
        Ok(())
    }
}
