//! Storage layer
//!
//! Persists the cable inventory and runs the label lifecycle hooks around
//! every save. Cables are stored as a rowid, an authoritative `label`
//! column, and a JSON document holding the rest of the graph.

pub mod database;

pub use database::{Database, DbPool, DbStats};

use rusqlite::{params, OptionalExtension};
use std::path::Path;

use crate::error::{LabelError, Result};
use crate::hooks::{self, LabelWriter};
use crate::model::{Cable, CableId};
use crate::render::LabelRenderer;

/// Cable store over a SQLite database
pub struct CableStore {
    database: Database,
}

impl CableStore {
    /// Open (or create) the store at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        Ok(Self {
            database: Database::new(db_path)?,
        })
    }

    /// Save pipeline: pre-write hook, row write, post-write hook.
    ///
    /// On insert the store assigns `cable.pk` from the new rowid before the
    /// post-write hook runs, so templates that reference the identifier
    /// render correctly.
    pub fn save(&self, cable: &mut Cable, renderer: &LabelRenderer) -> Result<()> {
        hooks::pre_write(cable, renderer)?;

        let created = match cable.pk {
            Some(id) => {
                self.update_row(id, cable)?;
                false
            }
            None => {
                cable.pk = Some(self.insert_row(cable)?);
                true
            }
        };

        hooks::post_write(cable, created, renderer, self)?;

        tracing::debug!(id = ?cable.pk, created, "saved cable");
        Ok(())
    }

    /// Insert a cable without running the label hooks.
    ///
    /// Models records written before this tool was installed; `generate`
    /// exists to label these after the fact.
    pub fn insert_raw(&self, cable: &mut Cable) -> Result<()> {
        cable.pk = Some(self.insert_row(cable)?);
        Ok(())
    }

    /// Fetch a single cable
    pub fn get(&self, id: CableId) -> Result<Cable> {
        let conn = self.database.get_conn()?;
        let row = conn
            .query_row(
                "SELECT label, doc FROM cables WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((label, doc)) => row_to_cable(id, label, &doc),
            None => Err(LabelError::CableNotFound { id }),
        }
    }

    /// All cables, in identifier order
    pub fn all(&self) -> Result<Vec<Cable>> {
        self.select("SELECT id, label, doc FROM cables ORDER BY id")
    }

    /// Cables with no label yet, in identifier order
    pub fn unlabeled(&self) -> Result<Vec<Cable>> {
        self.select("SELECT id, label, doc FROM cables WHERE label = '' ORDER BY id")
    }

    /// Delete a cable
    pub fn delete(&self, id: CableId) -> Result<()> {
        let conn = self.database.get_conn()?;
        let rows = conn.execute("DELETE FROM cables WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(LabelError::CableNotFound { id });
        }
        Ok(())
    }

    /// Label every cable that is missing one.
    ///
    /// Returns the (id, label) pairs that were written. Aborts on the first
    /// rendering failure with an error naming the offending cable; rows
    /// updated before the failure stay committed.
    pub fn relabel_missing(&self, renderer: &LabelRenderer) -> Result<Vec<(CableId, String)>> {
        let mut updated = Vec::new();

        for mut cable in self.unlabeled()? {
            let display = cable.to_string();
            cable.label = renderer.render(&cable).map_err(|e| LabelError::Generate {
                cable: display.clone(),
                source: Box::new(e),
            })?;
            self.save(&mut cable, renderer)
                .map_err(|e| LabelError::Generate {
                    cable: display,
                    source: Box::new(e),
                })?;

            let id = cable.pk.ok_or(LabelError::MissingIdentifier)?;
            updated.push((id, cable.label.clone()));
        }

        Ok(updated)
    }

    /// Store statistics
    pub fn stats(&self) -> Result<DbStats> {
        self.database.stats()
    }

    fn select(&self, sql: &str) -> Result<Vec<Cable>> {
        let conn = self.database.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, CableId>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut cables = Vec::new();
        for row in rows {
            let (id, label, doc) = row?;
            cables.push(row_to_cable(id, label, &doc)?);
        }
        Ok(cables)
    }

    fn insert_row(&self, cable: &Cable) -> Result<CableId> {
        let conn = self.database.get_conn()?;
        let doc = encode_doc(cable)?;
        conn.execute(
            "INSERT INTO cables (label, doc, created_at) VALUES (?1, ?2, ?3)",
            params![cable.label, doc, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_row(&self, id: CableId, cable: &Cable) -> Result<()> {
        let conn = self.database.get_conn()?;
        let doc = encode_doc(cable)?;
        let rows = conn.execute(
            "UPDATE cables SET label = ?1, doc = ?2 WHERE id = ?3",
            params![cable.label, doc, id],
        )?;
        if rows == 0 {
            return Err(LabelError::CableNotFound { id });
        }
        Ok(())
    }
}

impl LabelWriter for CableStore {
    fn write_label(&self, id: CableId, label: &str) -> Result<()> {
        let conn = self.database.get_conn()?;
        // Single-column update on purpose: must not re-enter the save
        // pipeline or touch concurrent changes to other fields.
        let rows = conn.execute(
            "UPDATE cables SET label = ?1 WHERE id = ?2",
            params![label, id],
        )?;
        if rows == 0 {
            return Err(LabelError::CableNotFound { id });
        }
        tracing::debug!(id, label, "wrote label");
        Ok(())
    }
}

fn encode_doc(cable: &Cable) -> Result<String> {
    serde_json::to_string(cable).map_err(|e| LabelError::Json {
        source: e,
        context: "Failed to encode cable document".to_string(),
    })
}

fn row_to_cable(id: CableId, label: String, doc: &str) -> Result<Cable> {
    let mut cable: Cable = serde_json::from_str(doc).map_err(|e| LabelError::Json {
        source: e,
        context: format!("Failed to decode cable {}", id),
    })?;
    // The id and label columns are authoritative; narrow label writes do not
    // rewrite the document.
    cable.pk = Some(id);
    cable.label = label;
    Ok(cable)
}
