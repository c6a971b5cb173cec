use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::common::entities::CoreError;
use crate::domain::ingredient::entities::IngredientExplanation;
use crate::domain::ingredient::ports::IngredientInfoGateway;
use crate::domain::storage::ports::{self, KeyValueStore};

const CACHE_PREFIX: &str = "scanwise_ingredient:";
const CACHE_VERSION: u32 = 1;

/// Read-through explanation lookup over a session-scoped cache.
///
/// Keys use the raw ingredient name, case-sensitive, so "Glycerin" and
/// "glycerin" are distinct entries. The cache only dies with the session
/// (or a version bump), never by TTL.
pub struct ExplanationService<G, S> {
    gateway: Arc<G>,
    cache: Arc<S>,
}

impl<G, S> ExplanationService<G, S>
where
    G: IngredientInfoGateway,
    S: KeyValueStore,
{
    pub fn new(gateway: Arc<G>, cache: Arc<S>) -> Self {
        Self { gateway, cache }
    }

    #[instrument(skip(self))]
    pub async fn explain(&self, name: &str) -> Result<IngredientExplanation, CoreError> {
        let key = format!("{CACHE_PREFIX}{name}");

        if let Some(cached) =
            ports::get_versioned::<_, IngredientExplanation>(&*self.cache, &key, CACHE_VERSION)?
        {
            debug!("explanation served from cache");
            return Ok(cached);
        }

        let explanation = self.gateway.explain(name).await?;

        if let Err(err) =
            ports::put_versioned(&*self.cache, &key, CACHE_VERSION, None, &explanation)
        {
            warn!("failed to cache explanation: {err}");
        }
        Ok(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGateway {
        calls: AtomicUsize,
    }

    impl IngredientInfoGateway for CountingGateway {
        async fn explain(&self, name: &str) -> Result<IngredientExplanation, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(IngredientExplanation {
                description: format!("About {name}."),
                ..IngredientExplanation::default()
            })
        }
    }

    fn service() -> ExplanationService<CountingGateway, MemoryStore> {
        ExplanationService::new(
            Arc::new(CountingGateway {
                calls: AtomicUsize::new(0),
            }),
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn second_lookup_is_a_cache_hit() {
        let svc = service();
        let first = svc.explain("Glycerin").await.unwrap();
        let second = svc.explain("Glycerin").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(svc.gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_keys_are_case_sensitive() {
        let svc = service();
        svc.explain("Glycerin").await.unwrap();
        svc.explain("glycerin").await.unwrap();

        assert_eq!(svc.gateway.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gateway_failure_is_not_cached() {
        struct Flaky {
            calls: AtomicUsize,
        }
        impl IngredientInfoGateway for Flaky {
            async fn explain(&self, _name: &str) -> Result<IngredientExplanation, CoreError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(CoreError::Connectivity("offline".into()));
                }
                Ok(IngredientExplanation::default())
            }
        }

        let svc = ExplanationService::new(
            Arc::new(Flaky {
                calls: AtomicUsize::new(0),
            }),
            Arc::new(MemoryStore::new()),
        );
        assert!(svc.explain("Parfum").await.is_err());
        assert!(svc.explain("Parfum").await.is_ok());
        assert_eq!(svc.gateway.calls.load(Ordering::SeqCst), 2);
    }
}
