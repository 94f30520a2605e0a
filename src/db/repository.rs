use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};

use crate::state::AppState;

/// Format of the JSON body stored in `state_snapshot`.
pub const SNAPSHOT_VERSION: i64 = 1;

// ─── Snapshot repo ───────────────────────────────────────────────────────────

pub struct SnapshotRepo;

impl SnapshotRepo {
    /// The saved state, or `None` if nothing has been saved yet.
    pub fn load(conn: &Connection) -> Result<Option<AppState>> {
        let row = conn
            .query_row(
                "SELECT version, body FROM state_snapshot WHERE id = 1",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((version, body)) => {
                if version > SNAPSHOT_VERSION {
                    return Err(anyhow!(
                        "Snapshot version {} is newer than this build understands ({})",
                        version,
                        SNAPSHOT_VERSION
                    ));
                }
                if version < SNAPSHOT_VERSION {
                    warn!("loading snapshot version {} with defaults for new fields", version);
                }
                let state = serde_json::from_str(&body).context("Parsing saved state")?;
                Ok(Some(state))
            }
        }
    }

    pub fn load_or_default(conn: &Connection) -> Result<AppState> {
        Ok(Self::load(conn)?.unwrap_or_default())
    }

    pub fn save(conn: &Connection, state: &AppState) -> Result<()> {
        let body = serde_json::to_string(state).context("Serializing state")?;
        conn.execute(
            "INSERT INTO state_snapshot (id, version, body, saved_at)
             VALUES (1, ?1, ?2, datetime('now'))
             ON CONFLICT(id) DO UPDATE SET version = ?1, body = ?2, saved_at = datetime('now')",
            params![SNAPSHOT_VERSION, body],
        )?;
        info!(
            "saved state: {} missed records, {} plans, {} progress entries",
            state.missed.records().len(),
            state.plans.len(),
            state.progress.entries().len()
        );
        Ok(())
    }

    pub fn saved_at(conn: &Connection) -> Result<Option<String>> {
        conn.query_row(
            "SELECT saved_at FROM state_snapshot WHERE id = 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{MakeupStrategy, NotificationStrategy, PrayerType, TimeUnit};
    use crate::state::{Command, Store};
    use chrono::{NaiveDate, Utc};

    fn open_temp() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("qada.db")).unwrap();
        run_migrations(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn empty_database_loads_default_state() {
        let (_dir, conn) = open_temp();
        assert!(SnapshotRepo::load(&conn).unwrap().is_none());
        assert_eq!(SnapshotRepo::load_or_default(&conn).unwrap(), AppState::default());
        assert!(SnapshotRepo::saved_at(&conn).unwrap().is_none());
    }

    #[test]
    fn saved_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qada.db");
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let mut store = Store::default();
        for command in [
            Command::AddMissed {
                prayer: PrayerType::Fajr,
                amount: 1,
                unit: TimeUnit::Weeks,
            },
            Command::CreatePlan {
                name: "Winter".into(),
                prayers: vec![PrayerType::Fajr],
                makeup_strategy: MakeupStrategy::WithCurrentPrayer,
                notification_strategy: NotificationStrategy::SpecificTimeDaily,
            },
            Command::MakeUp {
                prayer: PrayerType::Fajr,
                count: 2,
            },
        ] {
            store.dispatch_at(command, today, Utc::now()).unwrap();
        }

        {
            let conn = Connection::open(&path).unwrap();
            run_migrations(&conn).unwrap();
            SnapshotRepo::save(&conn, store.state()).unwrap();
            // saving twice keeps a single row
            SnapshotRepo::save(&conn, store.state()).unwrap();
        }

        let conn = Connection::open(&path).unwrap();
        run_migrations(&conn).unwrap();
        let loaded = SnapshotRepo::load(&conn).unwrap().unwrap();
        assert_eq!(&loaded, store.state());
        assert!(SnapshotRepo::saved_at(&conn).unwrap().is_some());
        assert_eq!(loaded.missed.count(PrayerType::Fajr), 5);
        assert!(loaded.plans.active_plan().is_some());

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM state_snapshot", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn newer_snapshot_versions_are_refused() {
        let (_dir, conn) = open_temp();
        conn.execute(
            "INSERT INTO state_snapshot (id, version, body) VALUES (1, ?1, '{}')",
            params![SNAPSHOT_VERSION + 1],
        )
        .unwrap();
        assert!(SnapshotRepo::load(&conn).is_err());
    }

    #[test]
    fn meta_values_upsert() {
        let (_dir, conn) = open_temp();
        assert!(MetaRepo::get(&conn, "last_range").unwrap().is_none());
        MetaRepo::set(&conn, "last_range", "weekly").unwrap();
        MetaRepo::set(&conn, "last_range", "monthly").unwrap();
        assert_eq!(
            MetaRepo::get(&conn, "last_range").unwrap().as_deref(),
            Some("monthly")
        );
    }
}
