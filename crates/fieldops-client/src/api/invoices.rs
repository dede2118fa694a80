//! Invoice endpoints

use fieldops_core::Invoice;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

impl ApiClient {
    pub async fn list_invoices(&self, session: &Session) -> Result<Vec<Invoice>, ClientError> {
        self.get_json(session, "/invoices").await
    }

    pub async fn get_invoice(&self, session: &Session, id: &str) -> Result<Invoice, ClientError> {
        self.get_json(session, &format!("/invoices/{id}")).await
    }

    pub async fn create_invoice(
        &self,
        session: &Session,
        draft: &Invoice,
    ) -> Result<Invoice, ClientError> {
        draft.validate()?;
        self.post_json(session, "/invoices", draft).await
    }

    pub async fn update_invoice(
        &self,
        session: &Session,
        invoice: &Invoice,
    ) -> Result<Invoice, ClientError> {
        invoice.validate()?;
        self.put_json(session, &format!("/invoices/{}", invoice.id), invoice)
            .await
    }

    pub async fn delete_invoice(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.delete(session, &format!("/invoices/{id}")).await
    }
}
