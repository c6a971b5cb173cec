use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::common::entities::CoreError;
use crate::domain::session::entities::{Identity, Theme, UserProfile};
use crate::domain::session::ports::AccountGateway;
use crate::domain::storage::ports::{KeyValueStore, get_versioned, put_versioned};

const THEME_KEY: &str = "scanwise_theme_preference";
const THEME_VERSION: u32 = 1;

/// Application-wide session context: identity, theme, and the read-through
/// cached profile. Created at startup, torn down at logout. Passed
/// explicitly to whatever needs it rather than living in a global.
pub struct SessionService<AC, S> {
    account: Arc<AC>,
    local: Arc<S>,
    identity: Option<Identity>,
    profile: Option<UserProfile>,
    theme: Theme,
}

impl<AC, S> SessionService<AC, S>
where
    AC: AccountGateway,
    S: KeyValueStore,
{
    /// Builds the context and rehydrates the persisted theme preference.
    /// A corrupt or missing theme entry falls back to the default.
    pub fn new(account: Arc<AC>, local: Arc<S>) -> Self {
        let theme = match get_versioned::<S, Theme>(&local, THEME_KEY, THEME_VERSION) {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("failed to read theme preference: {err}");
                Theme::default()
            }
        };

        Self {
            account,
            local,
            identity: None,
            profile: None,
            theme,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Attaches an identity and eagerly warms the profile cache. Profile
    /// fetch failure is not fatal to login; the cache just stays cold.
    #[instrument(skip(self, identity), fields(uid = %identity.uid))]
    pub async fn login(&mut self, identity: Identity) {
        self.identity = Some(identity);
        if let Err(err) = self.refresh_profile().await {
            warn!("profile fetch after login failed: {err}");
        }
    }

    /// Drops identity and cached profile. The theme preference survives
    /// logout, matching the original local-storage behavior.
    pub fn logout(&mut self) {
        info!("session torn down");
        self.identity = None;
        self.profile = None;
    }

    /// Re-reads the profile from the backend into the cache. Call after
    /// any mutating action (profile save, skin scan).
    pub async fn refresh_profile(&mut self) -> Result<&UserProfile, CoreError> {
        let identity = self.identity.as_ref().ok_or(CoreError::NotFound)?;
        let profile = self.account.get_profile(identity).await?;
        Ok(self.profile.insert(profile))
    }

    /// Writes the profile to the backend, then refreshes the cache so
    /// readers never observe a stale copy after a save.
    #[instrument(skip(self, profile))]
    pub async fn save_profile(&mut self, profile: &UserProfile) -> Result<(), CoreError> {
        let identity = self.identity.as_ref().ok_or(CoreError::NotFound)?;
        self.account.save_profile(identity, profile).await?;
        self.refresh_profile().await?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(err) = put_versioned(&*self.local, THEME_KEY, THEME_VERSION, None, &theme) {
            warn!("failed to persist theme preference: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::entities::{FavoriteStatus, ScanHistoryItem};
    use crate::infrastructure::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeAccount {
        profile_calls: AtomicUsize,
    }

    impl FakeAccount {
        fn new() -> Self {
            Self {
                profile_calls: AtomicUsize::new(0),
            }
        }
    }

    impl AccountGateway for FakeAccount {
        async fn get_profile(&self, _identity: &Identity) -> Result<UserProfile, CoreError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            Ok(UserProfile {
                skin_type: Some("Oily".into()),
                ..UserProfile::default()
            })
        }

        async fn save_profile(
            &self,
            _identity: &Identity,
            _profile: &UserProfile,
        ) -> Result<(), CoreError> {
            Ok(())
        }

        async fn save_history(
            &self,
            _identity: &Identity,
            _item: &ScanHistoryItem,
        ) -> Result<(), CoreError> {
            Ok(())
        }

        async fn list_history(
            &self,
            _identity: &Identity,
        ) -> Result<Vec<ScanHistoryItem>, CoreError> {
            Ok(Vec::new())
        }

        async fn clear_history(&self, _identity: &Identity) -> Result<(), CoreError> {
            Ok(())
        }

        async fn add_favorite(
            &self,
            _identity: &Identity,
            _product_name: &str,
        ) -> Result<FavoriteStatus, CoreError> {
            Ok(FavoriteStatus::Added)
        }
    }

    #[tokio::test]
    async fn login_warms_profile_cache_and_logout_clears_it() {
        let account = Arc::new(FakeAccount::new());
        let store = Arc::new(MemoryStore::new());
        let mut session = SessionService::new(account.clone(), store);

        session.login(Identity::new("u1", "tok")).await;
        assert_eq!(
            session.profile().and_then(|p| p.skin_type.clone()),
            Some("Oily".to_string())
        );
        assert_eq!(account.profile_calls.load(Ordering::SeqCst), 1);

        session.logout();
        assert!(session.profile().is_none());
        assert!(session.identity().is_none());
    }

    #[tokio::test]
    async fn save_profile_refreshes_cache() {
        let account = Arc::new(FakeAccount::new());
        let store = Arc::new(MemoryStore::new());
        let mut session = SessionService::new(account.clone(), store);
        session.login(Identity::new("u1", "tok")).await;

        session.save_profile(&UserProfile::default()).await.unwrap();
        // one fetch on login, one after the save
        assert_eq!(account.profile_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn theme_survives_a_new_session_on_the_same_store() {
        let account = Arc::new(FakeAccount::new());
        let store = Arc::new(MemoryStore::new());

        let mut session = SessionService::new(account.clone(), store.clone());
        session.set_theme(Theme::Dark);
        drop(session);

        let session = SessionService::new(account, store);
        assert_eq!(session.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn refresh_without_identity_is_an_error() {
        let account = Arc::new(FakeAccount::new());
        let store = Arc::new(MemoryStore::new());
        let mut session = SessionService::new(account, store);
        assert!(session.refresh_profile().await.is_err());
    }
}
