use std::sync::Arc;

use tracing::instrument;

use crate::domain::common::entities::CoreError;
use crate::domain::history::entities::{FavoriteStatus, ScanHistoryItem};
use crate::domain::session::entities::Identity;
use crate::domain::session::ports::AccountGateway;

/// History page controller: list and clear the remote scan history, plus
/// the favorites toggle. Saving happens inside the analysis workflow as a
/// best-effort side operation, not here.
pub struct HistoryService<AC> {
    account: Arc<AC>,
}

impl<AC: AccountGateway> HistoryService<AC> {
    pub fn new(account: Arc<AC>) -> Self {
        Self { account }
    }

    pub async fn list(&self, identity: &Identity) -> Result<Vec<ScanHistoryItem>, CoreError> {
        self.account.list_history(identity).await
    }

    /// Clears the remote history. Callers render the empty state once this
    /// returns; there is no local copy to reconcile.
    #[instrument(skip(self, identity), fields(uid = %identity.uid))]
    pub async fn clear(&self, identity: &Identity) -> Result<(), CoreError> {
        self.account.clear_history(identity).await
    }

    pub async fn add_favorite(
        &self,
        identity: &Identity,
        product_name: &str,
    ) -> Result<FavoriteStatus, CoreError> {
        self.account.add_favorite(identity, product_name).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::Sequence;

    use super::*;
    use crate::domain::session::ports::MockAccountGateway;

    fn identity() -> Identity {
        Identity::new("uid-1", "token-1")
    }

    #[tokio::test]
    async fn clear_forwards_to_the_backend_and_leaves_nothing_to_list() {
        let mut account = MockAccountGateway::new();
        account
            .expect_clear_history()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        account
            .expect_list_history()
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));

        let service = HistoryService::new(Arc::new(account));
        service.clear(&identity()).await.unwrap();
        assert!(service.list(&identity()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favoriting_twice_reports_the_existing_entry() {
        let mut account = MockAccountGateway::new();
        let mut seq = Sequence::new();
        account
            .expect_add_favorite()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Box::pin(async { Ok(FavoriteStatus::Added) }));
        account
            .expect_add_favorite()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Box::pin(async { Ok(FavoriteStatus::Exists) }));

        let service = HistoryService::new(Arc::new(account));
        let first = service.add_favorite(&identity(), "Example Cream").await.unwrap();
        let second = service.add_favorite(&identity(), "Example Cream").await.unwrap();
        assert_eq!(first, FavoriteStatus::Added);
        assert_eq!(second, FavoriteStatus::Exists);
    }

    #[tokio::test]
    async fn backend_failure_surfaces_from_clear() {
        let mut account = MockAccountGateway::new();
        account
            .expect_clear_history()
            .returning(|_| Box::pin(async { Err(CoreError::Connectivity("refused".into())) }));

        let service = HistoryService::new(Arc::new(account));
        let err = service.clear(&identity()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
