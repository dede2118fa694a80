//! Project endpoints

use fieldops_core::Project;

use super::AssignWorkers;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

impl ApiClient {
    pub async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, ClientError> {
        self.get_json(session, "/projects").await
    }

    pub async fn get_project(&self, session: &Session, id: &str) -> Result<Project, ClientError> {
        self.get_json(session, &format!("/projects/{id}")).await
    }

    pub async fn create_project(
        &self,
        session: &Session,
        draft: &Project,
    ) -> Result<Project, ClientError> {
        draft.validate()?;
        self.post_json(session, "/projects", draft).await
    }

    pub async fn update_project(
        &self,
        session: &Session,
        project: &Project,
    ) -> Result<Project, ClientError> {
        project.validate()?;
        self.put_json(session, &format!("/projects/{}", project.id), project)
            .await
    }

    pub async fn delete_project(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete(session, &format!("/projects/{id}")).await
    }

    /// Replace the project's assigned worker set wholesale.
    pub async fn assign_project_workers(
        &self,
        session: &Session,
        id: &str,
        worker_ids: &[String],
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .post_json(
                session,
                &format!("/projects/{id}/assign-workers"),
                &AssignWorkers { worker_ids },
            )
            .await?;
        Ok(())
    }
}
