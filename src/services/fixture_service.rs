use sqlx::PgPool;

use crate::db::fixtures;
use crate::db::helpers::require_affected;
use crate::models::fixture::{Fixture, FixtureImport, FixtureQuery};
use crate::scoring::Gameweek;
use crate::services::error::ServiceError;
use crate::utils::validation::{validate_teams, validate_venue};

pub struct FixtureService {
    pool: PgPool,
}

impl FixtureService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &FixtureQuery) -> Result<Vec<Fixture>, ServiceError> {
        let gameweek = query.gameweek.map(Gameweek::new).transpose()?;
        let team = query.team.as_deref().map(str::trim).filter(|team| !team.is_empty());
        Ok(fixtures::list_fixtures(&self.pool, gameweek.map(|gw| i32::from(gw.number())), team).await?)
    }

    /// Bulk insert-or-update. Every entry is validated before anything is written,
    /// and the whole import lands in one transaction.
    #[tracing::instrument(name = "Import fixtures", skip(self, imports), fields(count = imports.len()))]
    pub async fn import(&self, imports: &[FixtureImport]) -> Result<Vec<Fixture>, ServiceError> {
        if imports.is_empty() {
            return Err(ServiceError::BadRequest("No fixtures to import".into()));
        }
        for entry in imports {
            Gameweek::new(entry.gameweek)?;
            validate_teams(&entry.home_team, &entry.away_team)?;
            validate_venue(entry.venue.as_deref())?;
        }

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(imports.len());
        for entry in imports {
            let fixture = fixtures::upsert_fixture(&mut tx, entry).await?;
            if entry.id.is_some() {
                fixtures::realign_gameweek(&mut tx, &fixture).await?;
            }
            saved.push(fixture);
        }
        if imports.iter().any(|entry| entry.id.is_some()) {
            fixtures::sync_fixture_sequence(&mut tx).await?;
        }
        tx.commit().await?;

        tracing::info!("Imported {} fixtures", saved.len());
        Ok(saved)
    }

    /// Predictions and results for the fixture go with it.
    #[tracing::instrument(name = "Delete fixture", skip(self))]
    pub async fn delete(&self, fixture_id: i32) -> Result<(), ServiceError> {
        require_affected(fixtures::delete_fixture(&self.pool, fixture_id).await?, "Fixture not found")
    }
}
