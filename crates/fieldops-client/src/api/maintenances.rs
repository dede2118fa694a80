//! Maintenance contract endpoints

use fieldops_core::Maintenance;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

impl ApiClient {
    pub async fn list_maintenances(
        &self,
        session: &Session,
    ) -> Result<Vec<Maintenance>, ClientError> {
        self.get_json(session, "/maintenances").await
    }

    pub async fn get_maintenance(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Maintenance, ClientError> {
        self.get_json(session, &format!("/maintenances/{id}")).await
    }

    pub async fn create_maintenance(
        &self,
        session: &Session,
        draft: &Maintenance,
    ) -> Result<Maintenance, ClientError> {
        draft.validate()?;
        self.post_json(session, "/maintenances", draft).await
    }

    pub async fn update_maintenance(
        &self,
        session: &Session,
        contract: &Maintenance,
    ) -> Result<Maintenance, ClientError> {
        contract.validate()?;
        self.put_json(session, &format!("/maintenances/{}", contract.id), contract)
            .await
    }

    pub async fn delete_maintenance(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete(session, &format!("/maintenances/{id}")).await
    }
}
