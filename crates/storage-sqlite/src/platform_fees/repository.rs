use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use payoutfolio_core::errors::{Error, Result};
use payoutfolio_core::platform_fees::{
    FeeProfile, FeeProfileFilter, FeeProfileRepositoryTrait, NewFeeProfile, OwnerScope,
};

use super::model::{encode_owner_scope, PlatformFeeSettingDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::platform_fee_settings;

pub struct PlatformFeeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlatformFeeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PlatformFeeRepository { pool, writer }
    }

    fn filtered(filter: &FeeProfileFilter) -> platform_fee_settings::BoxedQuery<'static, Sqlite> {
        let mut query = platform_fee_settings::table.into_boxed();
        if let Some(id) = &filter.id {
            query = query.filter(platform_fee_settings::id.eq(id.clone()));
        }
        if let Some(name) = &filter.platform_name {
            query = query.filter(platform_fee_settings::platform_name.eq(name.clone()));
        }
        if let Some(scope) = &filter.owner_scope {
            query = query.filter(platform_fee_settings::owner_scope.eq(encode_owner_scope(scope)));
        }
        if let Some(is_custom) = filter.is_custom {
            query = query.filter(platform_fee_settings::is_custom.eq(is_custom));
        }
        query
    }

    fn to_domain(rows: Vec<PlatformFeeSettingDB>) -> Result<Vec<FeeProfile>> {
        rows.into_iter()
            .map(|row| FeeProfile::try_from(row).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl FeeProfileRepositoryTrait for PlatformFeeRepository {
    fn find_one(&self, filter: &FeeProfileFilter) -> Result<Option<FeeProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let row = Self::filtered(filter)
            .order(platform_fee_settings::platform_name.asc())
            .first::<PlatformFeeSettingDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| FeeProfile::try_from(r).map_err(Error::from))
            .transpose()
    }

    fn find_many(&self, filter: &FeeProfileFilter) -> Result<Vec<FeeProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::filtered(filter)
            .order(platform_fee_settings::platform_name.asc())
            .load::<PlatformFeeSettingDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn count(&self, filter: &FeeProfileFilter) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Self::filtered(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    async fn insert(&self, owner_scope: OwnerScope, profile: NewFeeProfile) -> Result<FeeProfile> {
        let record = PlatformFeeSettingDB::new_record(
            Uuid::new_v4().to_string(),
            &owner_scope,
            profile,
            Utc::now().naive_utc(),
        );

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FeeProfile> {
                diesel::insert_into(platform_fee_settings::table)
                    .values(&record)
                    .execute(conn)
                    .into_core()?;
                Ok(FeeProfile::try_from(record)?)
            })
            .await
    }

    async fn delete_one(&self, id: &str, owner_scope: &OwnerScope) -> Result<usize> {
        let id = id.to_string();
        let scope = encode_owner_scope(owner_scope);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    platform_fee_settings::table
                        .filter(platform_fee_settings::id.eq(id))
                        .filter(platform_fee_settings::owner_scope.eq(scope)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
