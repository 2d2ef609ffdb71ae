//! SQLite-backed record store
//!
//! One table, `element_data`, with an auto-incrementing integer key and one
//! nullable column per entry of the field table. The store owns a single
//! connection; callers share it as `Arc<RecordStore>`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::{ToSqlOutput, Type, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};

use crate::schema::{EmissionFields, EmissionRecord, FieldDef, FieldKind, FieldPatch, FieldValue, FIELDS};

use super::errors::{StoreError, StoreResult};

/// Table holding emission-factor records
pub const TABLE_NAME: &str = "element_data";

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            FieldValue::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
            FieldValue::Float(f) => Ok(ToSqlOutput::from(*f)),
        }
    }
}

/// Persistent store of emission records
pub struct RecordStore {
    conn: Mutex<Connection>,
}

impl RecordStore {
    /// Open (or create) a database file and ensure the table exists
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(&create_table_sql())?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// All records, by ascending id
    pub fn list_all(&self) -> StoreResult<Vec<EmissionRecord>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM {} ORDER BY id", select_list(), TABLE_NAME);
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], record_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    /// Fetch one record
    pub fn get_by_id(&self, id: i64) -> StoreResult<EmissionRecord> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", select_list(), TABLE_NAME);
        let mut stmt = conn.prepare_cached(&sql)?;
        let record = stmt.query_row(params![id], record_from_row).optional()?;
        record.ok_or(StoreError::NotFound(id))
    }

    /// Insert a new record and return its identifier
    pub fn create(&self, fields: &EmissionFields) -> StoreResult<i64> {
        let conn = self.lock()?;
        insert(&conn, fields)
    }

    /// Apply a partial update.
    ///
    /// Fields named in the patch are overwritten (a `None` clears the
    /// column); all other columns keep their stored values.
    pub fn update(&self, id: i64, patch: &FieldPatch) -> StoreResult<()> {
        let conn = self.lock()?;

        if patch.is_empty() {
            return if exists(&conn, id)? {
                Ok(())
            } else {
                Err(StoreError::NotFound(id))
            };
        }

        let assignments: Vec<String> = patch
            .iter()
            .enumerate()
            .map(|(i, (def, _))| format!("{} = ?{}", def.name, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            TABLE_NAME,
            assignments.join(", "),
            patch.len() + 1
        );

        let values: Vec<Option<&FieldValue>> = patch.iter().map(|(_, value)| value).collect();
        let mut bound: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
        bound.push(&id);

        let changed = conn.execute(&sql, bound.as_slice())?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Remove a record permanently
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let conn = self.lock()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", TABLE_NAME);
        let changed = conn.execute(&sql, params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Insert many records in one transaction.
    ///
    /// Either every record is committed or, on the first failure, none is.
    pub fn insert_batch(&self, rows: &[EmissionFields]) -> StoreResult<Vec<i64>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(rows.len());
        for fields in rows {
            ids.push(insert(&tx, fields)?);
        }
        tx.commit()?;
        Ok(ids)
    }

    /// Number of stored records
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {}", TABLE_NAME);
        let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn create_table_sql() -> String {
    let columns: Vec<String> = FIELDS
        .iter()
        .map(|def| format!("{} {}", def.name, def.kind.sql_type()))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {});",
        TABLE_NAME,
        columns.join(", ")
    )
}

fn column_list() -> String {
    FIELDS.iter().map(|def| def.name).collect::<Vec<_>>().join(", ")
}

fn select_list() -> String {
    format!("id, {}", column_list())
}

fn insert(conn: &Connection, fields: &EmissionFields) -> StoreResult<i64> {
    let placeholders: Vec<String> = (1..=FIELDS.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE_NAME,
        column_list(),
        placeholders.join(", ")
    );
    conn.prepare_cached(&sql)?
        .execute(params_from_iter(fields.values()))?;
    Ok(conn.last_insert_rowid())
}

fn exists(conn: &Connection, id: i64) -> StoreResult<bool> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", TABLE_NAME);
    let found = conn
        .query_row(&sql, params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<EmissionRecord> {
    let id: i64 = row.get(0)?;
    let mut fields = EmissionFields::default();
    for (i, def) in FIELDS.iter().enumerate() {
        let value = read_value(def, i + 1, row.get_ref(i + 1)?)?;
        assign_column(&mut fields, def, i + 1, value)?;
    }
    Ok(EmissionRecord { id, fields })
}

fn assign_column(
    fields: &mut EmissionFields,
    def: &FieldDef,
    idx: usize,
    value: Option<FieldValue>,
) -> rusqlite::Result<()> {
    let sql_type = match def.kind {
        FieldKind::Text => Type::Text,
        FieldKind::Float => Type::Real,
    };
    fields
        .set(def.name, value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, sql_type, Box::new(e)))
}

/// Decode a column under SQLite's dynamic typing: integers stored in a REAL
/// column widen to float, numbers stored in a TEXT column render as text.
fn read_value(def: &FieldDef, idx: usize, raw: ValueRef<'_>) -> rusqlite::Result<Option<FieldValue>> {
    let value = match (def.kind, raw) {
        (_, ValueRef::Null) => None,
        (FieldKind::Float, ValueRef::Real(f)) => Some(FieldValue::Float(f)),
        (FieldKind::Float, ValueRef::Integer(i)) => Some(FieldValue::Float(i as f64)),
        (FieldKind::Text, ValueRef::Text(bytes)) => {
            let text = std::str::from_utf8(bytes).map_err(rusqlite::Error::Utf8Error)?;
            Some(FieldValue::Text(text.to_string()))
        }
        (FieldKind::Text, ValueRef::Integer(i)) => Some(FieldValue::Text(i.to_string())),
        (FieldKind::Text, ValueRef::Real(f)) => Some(FieldValue::Text(f.to_string())),
        (_, other) => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                def.name.to_string(),
                other.data_type(),
            ))
        }
    };
    Ok(value)
}
