use customers::{CustomerClient, CustomerDraft};
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::action::Action;

/// Reicht alle Backend-Aufrufe an eigene Tasks weiter, damit die
/// Zeichenschleife nie auf das Netz wartet. Jedes Ergebnis kommt als Action
/// zurück in die zentrale Schleife.
#[derive(Clone)]
pub struct Backend {
    client: CustomerClient,
    tx: UnboundedSender<Action>,
}

impl Backend {
    pub fn new(client: CustomerClient, tx: UnboundedSender<Action>) -> Self {
        Self { client, tx }
    }

    pub fn load(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match client.list().await {
                Ok(customers) => Action::CustomersLoaded(customers),
                Err(err) => {
                    error!("loading customers from {} failed: {err}", client.base_url());
                    Action::LoadFailed
                }
            };
            let _ = tx.send(action);
        });
    }

    pub fn create(&self, draft: CustomerDraft) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match client.create(&draft).await {
                Ok(()) => Action::CreateSucceeded,
                Err(err) => {
                    error!("creating customer failed: {err}");
                    Action::CreateFailed
                }
            };
            let _ = tx.send(action);
        });
    }

    pub fn update(&self, id: i64, draft: CustomerDraft) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match client.update(id, &draft).await {
                Ok(()) => Action::UpdateSucceeded,
                Err(err) => {
                    error!("updating customer {id} failed: {err}");
                    Action::UpdateFailed
                }
            };
            let _ = tx.send(action);
        });
    }

    pub fn delete(&self, id: i64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match client.delete(id).await {
                Ok(()) => Action::DeleteSucceeded,
                Err(err) => {
                    error!("deleting customer {id} failed: {err}");
                    Action::DeleteFailed
                }
            };
            let _ = tx.send(action);
        });
    }
}
