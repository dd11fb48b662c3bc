use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::platform_fees_constants::{well_known_platforms, WELL_KNOWN_DELETE_FORBIDDEN};
use super::platform_fees_model::{FeeProfile, FeeProfileFilter, NewFeeProfile, OwnerScope};
use super::platform_fees_traits::{FeeProfileRepositoryTrait, FeeProfileServiceTrait};
use super::PlatformFeeError;
use crate::errors::{Error, Result, ValidationError};

/// Source of truth for fee profiles.
///
/// Holds no state of its own beyond the repository handle, so concurrent
/// calls never contend on a lock here; uniqueness is left to storage.
pub struct PlatformFeeRegistry {
    repository: Arc<dyn FeeProfileRepositoryTrait>,
}

impl PlatformFeeRegistry {
    pub fn new(repository: Arc<dyn FeeProfileRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn require_user(user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "user id is required".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FeeProfileServiceTrait for PlatformFeeRegistry {
    fn resolve(&self, user_id: &str, platform_name: &str) -> Result<FeeProfile> {
        Self::require_user(user_id)?;

        let own = FeeProfileFilter::new()
            .with_platform_name(platform_name)
            .with_owner(OwnerScope::user(user_id));
        if let Some(profile) = self.repository.find_one(&own)? {
            return Ok(profile);
        }

        let shared = FeeProfileFilter::well_known().with_platform_name(platform_name);
        self.repository
            .find_one(&shared)?
            .ok_or_else(|| PlatformFeeError::NotFound(platform_name.to_string()).into())
    }

    fn list_mine(&self, user_id: &str) -> Result<Vec<FeeProfile>> {
        Self::require_user(user_id)?;
        self.repository
            .find_many(&FeeProfileFilter::new().with_owner(OwnerScope::user(user_id)))
    }

    fn list_well_known(&self) -> Result<Vec<FeeProfile>> {
        self.repository.find_many(&FeeProfileFilter::well_known())
    }

    fn get(&self, user_id: &str, profile_id: &str) -> Result<FeeProfile> {
        Self::require_user(user_id)?;
        match self
            .repository
            .find_one(&FeeProfileFilter::new().with_id(profile_id))?
        {
            Some(profile)
                if profile.owner_scope.is_system() || profile.owner_scope.is_owned_by(user_id) =>
            {
                Ok(profile)
            }
            _ => Err(PlatformFeeError::NotFound(profile_id.to_string()).into()),
        }
    }

    async fn create(&self, user_id: &str, profile: NewFeeProfile) -> Result<FeeProfile> {
        Self::require_user(user_id)?;
        profile.validate()?;

        let profile = NewFeeProfile {
            platform_name: profile.platform_name.trim().to_string(),
            ..profile
        };
        let platform_name = profile.platform_name.clone();

        match self
            .repository
            .insert(OwnerScope::user(user_id), profile)
            .await
        {
            Ok(created) => {
                debug!(
                    "Created custom platform settings '{}' ({}) for user {}",
                    created.platform_name, created.id, user_id
                );
                Ok(created)
            }
            Err(e) if e.is_unique_violation() => Err(PlatformFeeError::invalid(
                "platformName",
                format!("'{}' already exists", platform_name),
            )
            .into()),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, user_id: &str, profile_id: &str) -> Result<()> {
        Self::require_user(user_id)?;

        let profile = self
            .repository
            .find_one(&FeeProfileFilter::new().with_id(profile_id))?
            .ok_or_else(|| PlatformFeeError::NotFound(profile_id.to_string()))?;

        if profile.is_well_known() {
            warn!(
                "User {} attempted to delete well-known platform settings '{}' ({})",
                user_id, profile.platform_name, profile.id
            );
            return Err(PlatformFeeError::Forbidden(WELL_KNOWN_DELETE_FORBIDDEN.to_string()).into());
        }

        // Someone else's profile is reported as missing so its existence does not leak.
        if !profile.owner_scope.is_owned_by(user_id) {
            return Err(PlatformFeeError::NotFound(profile_id.to_string()).into());
        }

        let removed = self
            .repository
            .delete_one(profile_id, &OwnerScope::user(user_id))
            .await?;
        if removed == 0 {
            return Err(PlatformFeeError::NotFound(profile_id.to_string()).into());
        }
        Ok(())
    }

    async fn ensure_well_known_seeded(&self) -> Result<()> {
        let catalog = well_known_platforms();

        let existing = match self.repository.count(&FeeProfileFilter::well_known()) {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to count well-known platform settings: {}", e);
                return Ok(());
            }
        };
        if existing >= catalog.len() as i64 {
            debug!("Well-known platform settings already seeded ({})", existing);
            return Ok(());
        }

        let mut inserted = 0usize;
        for entry in catalog {
            let name = entry.platform_name.clone();
            match self.repository.insert(OwnerScope::System, entry).await {
                Ok(_) => inserted += 1,
                Err(e) if e.is_unique_violation() => {
                    debug!("Well-known platform '{}' already present, skipping", name);
                }
                Err(e) => {
                    error!("Failed to seed well-known platform '{}': {}", name, e);
                }
            }
        }

        if inserted > 0 {
            info!("Seeded {} well-known platform settings", inserted);
        }
        Ok(())
    }
}
