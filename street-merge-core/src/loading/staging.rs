//! Temporary sqlite staging for nodes and ways.
//!
//! The PBF is streamed into a uniquely-named temp database; the merge
//! pipeline then reads ways back joined to their node coordinates. The
//! file is removed on every exit path, including failure, because the
//! temp path guard deletes it on drop.

use rusqlite::Connection;
use tempfile::TempPath;

use crate::Error;

const SCHEMA: &str = "
CREATE TABLE nodes (
    id   INTEGER PRIMARY KEY,
    lon  REAL NOT NULL,
    lat  REAL NOT NULL
);
CREATE TABLE ways (
    id     INTEGER PRIMARY KEY,
    name   TEXT NOT NULL,
    oneway TEXT
);
CREATE TABLE way_nodes (
    way  INTEGER NOT NULL,
    num  INTEGER NOT NULL,
    node INTEGER NOT NULL
);
CREATE INDEX way_nodes_way ON way_nodes (way);
";

/// One staged way with its node coordinates pre-joined into a
/// `lon#lat,lon#lat,…` string. `points` is `None` when none of the way's
/// nodes made it into the extract.
#[derive(Debug, Clone)]
pub struct StagedWay {
    pub way_id: u64,
    pub points: Option<String>,
    pub name: String,
    pub oneway: Option<String>,
}

/// Write-once staging store backed by a temp file.
pub struct StagingStore {
    conn: Connection,
    _temp: TempPath,
}

impl StagingStore {
    /// Creates the staging database under a fresh `pbf_*.temp.db` path.
    pub fn create() -> Result<Self, Error> {
        let temp = tempfile::Builder::new()
            .prefix("pbf_")
            .suffix(".temp.db")
            .tempfile()?
            .into_temp_path();

        let conn = Connection::open(&temp)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self { conn, _temp: temp })
    }

    pub(crate) fn begin(&self) -> Result<(), Error> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    pub(crate) fn commit(&self) -> Result<(), Error> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    pub(crate) fn insert_way(
        &self,
        id: i64,
        name: &str,
        oneway: Option<&str>,
    ) -> Result<(), Error> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT OR REPLACE INTO ways (id, name, oneway) VALUES (?1, ?2, ?3)")?;
        stmt.execute(rusqlite::params![id, name, oneway])?;
        Ok(())
    }

    pub(crate) fn insert_way_node(&self, way: i64, num: usize, node: i64) -> Result<(), Error> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO way_nodes (way, num, node) VALUES (?1, ?2, ?3)")?;
        stmt.execute(rusqlite::params![way, num as i64, node])?;
        Ok(())
    }

    pub(crate) fn insert_node(&self, id: i64, lon: f64, lat: f64) -> Result<(), Error> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT OR REPLACE INTO nodes (id, lon, lat) VALUES (?1, ?2, ?3)")?;
        stmt.execute(rusqlite::params![id, lon, lat])?;
        Ok(())
    }

    /// Visits every staged way in ascending id order.
    pub fn for_each_way<F>(&self, mut visit: F) -> Result<(), Error>
    where
        F: FnMut(StagedWay),
    {
        let mut stmt = self.conn.prepare(
            "SELECT
                ways.id,
                (
                    SELECT GROUP_CONCAT((nodes.lon || '#' || nodes.lat) ORDER BY way_nodes.num ASC)
                    FROM way_nodes
                    JOIN nodes ON way_nodes.node = nodes.id
                    WHERE way = ways.id
                ) AS points,
                ways.name,
                ways.oneway
             FROM ways
             ORDER BY ways.id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(StagedWay {
                way_id: row.get::<_, i64>(0)? as u64,
                points: row.get(1)?,
                name: row.get(2)?,
                oneway: row.get(3)?,
            })
        })?;

        for row in rows {
            visit(row?);
        }
        Ok(())
    }
}
