use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS words (
            location TEXT PRIMARY KEY,
            surah_number INTEGER NOT NULL,
            verse TEXT NOT NULL,
            position INTEGER NOT NULL,
            translation TEXT,
            transliteration TEXT NOT NULL DEFAULT '',
            root_arabic TEXT,
            root_latin TEXT,
            grammar TEXT,
            image_url TEXT
        );

        -- Indexes
        CREATE INDEX IF NOT EXISTS idx_words_surah ON words(surah_number);
        CREATE INDEX IF NOT EXISTS idx_words_root_arabic ON words(root_arabic);
        CREATE INDEX IF NOT EXISTS idx_words_root_latin ON words(root_latin);
        CREATE INDEX IF NOT EXISTS idx_words_verse ON words(surah_number, verse);
        "#,
    )?;

    // Corpora exported before glyph images and grammar tags were tracked
    // lack these columns; they are no-ops for new databases.
    add_column_if_missing(conn, "words", "grammar", "TEXT")?;
    add_column_if_missing(conn, "words", "image_url", "TEXT")?;

    Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    conn
        .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
        .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    column_def: &str,
) -> Result<()> {
    if !column_exists(conn, table, column) {
        conn.execute(
            &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
            [],
        )?;
    }
    Ok(())
}
