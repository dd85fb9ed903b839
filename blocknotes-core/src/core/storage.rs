use crate::{BlocknotesError, Result};
use rusqlite::Connection;
use std::path::Path;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Opens an existing database, rejecting files without a `notes` table.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = 'notes'",
            [],
            |row| row.get(0),
        )?;

        if table_count != 1 {
            return Err(BlocknotesError::InvalidDatabase(
                "Not a valid Blocknotes database".to_string(),
            ));
        }

        Ok(Self { conn })
    }

    /// A private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn table_names(storage: &Storage) -> Vec<String> {
        storage
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_create_storage() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::create(temp.path()).unwrap();

        assert!(table_names(&storage).contains(&"notes".to_string()));
    }

    #[test]
    fn test_create_is_idempotent() {
        let temp = NamedTempFile::new().unwrap();
        Storage::create(temp.path()).unwrap();
        Storage::create(temp.path()).unwrap();
    }

    #[test]
    fn test_open_existing_storage() {
        let temp = NamedTempFile::new().unwrap();

        // Create database first
        Storage::create(temp.path()).unwrap();

        let storage = Storage::open(temp.path()).unwrap();
        assert!(table_names(&storage).contains(&"notes".to_string()));
    }

    #[test]
    fn test_open_database_without_notes_table() {
        let temp = NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(temp.path()).unwrap();
            conn.execute("CREATE TABLE other (id INTEGER PRIMARY KEY)", []).unwrap();
        }

        let result = Storage::open(temp.path());
        assert!(matches!(result, Err(BlocknotesError::InvalidDatabase(_))));
    }

    #[test]
    fn test_open_invalid_database() {
        let temp = NamedTempFile::new().unwrap();

        // Create file that is not a SQLite database
        std::fs::write(temp.path(), "not a database").unwrap();

        let result = Storage::open(temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_in_memory_has_schema() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(table_names(&storage).contains(&"notes".to_string()));
    }
}
