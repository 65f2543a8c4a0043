//! `PostgreSQL` repository implementation for monitored sites.

use super::{
    models::{NewSiteRow, SiteRow},
    schema::sites,
};
use crate::site::{
    domain::{
        MonitoredSite, NewSite, PersistedSiteData, SiteId, SiteStatus, SiteUrl, StatusUpdate,
    },
    ports::{BatchCommit, SitePage, SiteRepository, SiteRepositoryError, SiteRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

/// `PostgreSQL` connection pool type used by the site repository.
pub type SitePgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the `sites` table and its unique URL index.
pub const CREATE_SITES_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_sites/up.sql");

/// `PostgreSQL`-backed site repository.
///
/// Every operation checks a connection out of the pool inside a blocking
/// task and returns it when the task finishes, whichever way it exits.
#[derive(Debug, Clone)]
pub struct PostgresSiteRepository {
    pool: SitePgPool,
}

impl PostgresSiteRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SitePgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool of at most `max_size` connections to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connection.
    pub fn connect(database_url: &str, max_size: u32) -> SiteRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(SiteRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SitePgPool {
        &self.pool
    }

    /// Creates the `sites` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> SiteRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_SITES_SQL)
                .map_err(SiteRepositoryError::persistence)
        })
        .await?;
        info!("sites schema is in place");
        Ok(())
    }

    async fn run_blocking<F, T>(&self, f: F) -> SiteRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SiteRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SiteRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SiteRepositoryError::persistence)?
    }
}

#[async_trait]
impl SiteRepository for PostgresSiteRepository {
    async fn create(&self, new_site: &NewSite) -> SiteRepositoryResult<MonitoredSite> {
        let url = new_site.url().clone();
        let new_row = NewSiteRow {
            url: new_site.url().as_str().to_owned(),
            description: new_site.description().map(str::to_owned),
            status: SiteStatus::Unchecked.to_storage(),
            created_at: new_site.created_at(),
            updated_at: new_site.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(sites::table)
                .values(&new_row)
                .returning(SiteRow::as_returning())
                .get_result::<SiteRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SiteRepositoryError::DuplicateUrl(url.clone())
                    }
                    _ => SiteRepositoryError::persistence(err),
                })?;
            row_to_site(row)
        })
        .await
    }

    async fn find_by_id(&self, id: SiteId) -> SiteRepositoryResult<Option<MonitoredSite>> {
        self.run_blocking(move |connection| {
            let row = sites::table
                .find(id.into_inner())
                .select(SiteRow::as_select())
                .first::<SiteRow>(connection)
                .optional()
                .map_err(SiteRepositoryError::persistence)?;
            row.map(row_to_site).transpose()
        })
        .await
    }

    async fn list(&self, page: SitePage) -> SiteRepositoryResult<Vec<MonitoredSite>> {
        self.run_blocking(move |connection| {
            let rows = sites::table
                .order(sites::id.asc())
                .offset(i64::from(page.offset))
                .limit(i64::from(page.limit))
                .select(SiteRow::as_select())
                .load::<SiteRow>(connection)
                .map_err(SiteRepositoryError::persistence)?;
            rows.into_iter().map(row_to_site).collect()
        })
        .await
    }

    async fn list_all(&self) -> SiteRepositoryResult<Vec<MonitoredSite>> {
        self.run_blocking(move |connection| {
            let rows = sites::table
                .order(sites::id.asc())
                .select(SiteRow::as_select())
                .load::<SiteRow>(connection)
                .map_err(SiteRepositoryError::persistence)?;
            rows.into_iter().map(row_to_site).collect()
        })
        .await
    }

    async fn update_status(
        &self,
        id: SiteId,
        status: SiteStatus,
        checked_at: DateTime<Utc>,
    ) -> SiteRepositoryResult<MonitoredSite> {
        self.run_blocking(move |connection| {
            let row = update_row(connection, StatusUpdate::new(id, status, checked_at))
                .map_err(SiteRepositoryError::persistence)?
                .ok_or(SiteRepositoryError::NotFound(id))?;
            row_to_site(row)
        })
        .await
    }

    async fn apply_status_batch(
        &self,
        updates: &[StatusUpdate],
    ) -> SiteRepositoryResult<BatchCommit> {
        let pending = updates.to_vec();
        self.run_blocking(move |connection| {
            let rows = connection
                .transaction::<_, DieselError, _>(|tx_conn| {
                    pending
                        .iter()
                        .map(|update| {
                            update_row(tx_conn, *update).map(|row| (update.id, row))
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .map_err(SiteRepositoryError::persistence)?;

            let mut commit = BatchCommit::default();
            for (id, row) in rows {
                match row {
                    Some(found) => commit.applied.push(row_to_site(found)?),
                    None => commit.missing.push(id),
                }
            }
            Ok(commit)
        })
        .await
    }
}

/// Writes one status update, returning `None` when the row is gone.
///
/// `updated_at` is clamped to `created_at`, matching
/// [`MonitoredSite::record_check`].
fn update_row(
    connection: &mut PgConnection,
    update: StatusUpdate,
) -> Result<Option<SiteRow>, DieselError> {
    let Some(created_at) = sites::table
        .find(update.id.into_inner())
        .select(sites::created_at)
        .first::<DateTime<Utc>>(connection)
        .optional()?
    else {
        return Ok(None);
    };

    diesel::update(sites::table.find(update.id.into_inner()))
        .set((
            sites::status.eq(update.status.to_storage()),
            sites::updated_at.eq(update.checked_at.max(created_at)),
        ))
        .returning(SiteRow::as_returning())
        .get_result::<SiteRow>(connection)
        .optional()
}

fn row_to_site(row: SiteRow) -> SiteRepositoryResult<MonitoredSite> {
    let SiteRow {
        id,
        url,
        description,
        status,
        created_at,
        updated_at,
    } = row;

    let parsed_url = SiteUrl::new(url).map_err(SiteRepositoryError::invalid_persisted_data)?;
    let parsed_status =
        SiteStatus::from_storage(status).map_err(SiteRepositoryError::invalid_persisted_data)?;

    Ok(MonitoredSite::from_persisted(PersistedSiteData {
        id: SiteId::new(id),
        url: parsed_url,
        description,
        status: parsed_status,
        created_at,
        updated_at,
    }))
}
