use std::future::Future;

use crate::domain::common::entities::CoreError;
use crate::domain::history::entities::{FavoriteStatus, ScanHistoryItem};
use crate::domain::session::entities::{Identity, UserProfile};

/// Gateway for everything bearer-token authenticated: profile, scan
/// history, favorites.
#[cfg_attr(test, mockall::automock)]
pub trait AccountGateway: Send + Sync {
    fn get_profile(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;

    fn save_profile(
        &self,
        identity: &Identity,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn save_history(
        &self,
        identity: &Identity,
        item: &ScanHistoryItem,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_history(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<Vec<ScanHistoryItem>, CoreError>> + Send;

    fn clear_history(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn add_favorite(
        &self,
        identity: &Identity,
        product_name: &str,
    ) -> impl Future<Output = Result<FavoriteStatus, CoreError>> + Send;
}
