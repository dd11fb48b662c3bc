use super::platform_fees_model::{FeeProfile, FeeProfileFilter, NewFeeProfile, OwnerScope};
use crate::errors::Result;
use async_trait::async_trait;

/// Document-store contract for fee profiles.
///
/// Implementations must enforce uniqueness of `(platform_name, owner_scope)`
/// and report violations as `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait FeeProfileRepositoryTrait: Send + Sync {
    fn find_one(&self, filter: &FeeProfileFilter) -> Result<Option<FeeProfile>>;
    fn find_many(&self, filter: &FeeProfileFilter) -> Result<Vec<FeeProfile>>;
    fn count(&self, filter: &FeeProfileFilter) -> Result<i64>;
    /// Stores a new profile under `owner_scope`, assigning its id and timestamps.
    /// `is_custom` is derived from the scope.
    async fn insert(&self, owner_scope: OwnerScope, profile: NewFeeProfile) -> Result<FeeProfile>;
    /// Deletes the profile only if it belongs to `owner_scope`. Returns rows removed.
    async fn delete_one(&self, id: &str, owner_scope: &OwnerScope) -> Result<usize>;
}

/// Registry of fee profiles, enforcing ownership and well-known protections.
#[async_trait]
pub trait FeeProfileServiceTrait: Send + Sync {
    /// The user's own profile for `platform_name`, falling back to the system default.
    fn resolve(&self, user_id: &str, platform_name: &str) -> Result<FeeProfile>;
    fn list_mine(&self, user_id: &str) -> Result<Vec<FeeProfile>>;
    fn list_well_known(&self) -> Result<Vec<FeeProfile>>;
    /// A profile by id, if it is owned by `user_id` or is system-scoped.
    fn get(&self, user_id: &str, profile_id: &str) -> Result<FeeProfile>;
    async fn create(&self, user_id: &str, profile: NewFeeProfile) -> Result<FeeProfile>;
    async fn delete(&self, user_id: &str, profile_id: &str) -> Result<()>;
    /// Inserts the well-known catalog if it is missing. Never fails the caller.
    async fn ensure_well_known_seeded(&self) -> Result<()>;
}
