//! Word CRUD and corpus query operations

use rusqlite::{params, params_from_iter, Connection, Result, Row};

use crate::domain::{Verse, Word};

const WORD_COLUMNS: &str = "location, surah_number, verse, translation, transliteration, \
                            root_arabic, root_latin, grammar, image_url";

fn sql_count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

pub fn insert_word(conn: &Connection, word: &Word) -> Result<()> {
    let position = word.parsed_location().map(|l| l.position).unwrap_or(0);
    conn.execute(
        r#"
    INSERT OR REPLACE INTO words (location, surah_number, verse, position, translation, transliteration,
                                  root_arabic, root_latin, grammar, image_url)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    "#,
        params![
            word.location,
            word.surah_number,
            word.verse.to_string(),
            position,
            word.translation,
            word.transliteration,
            word.root_arabic,
            word.root_latin,
            word.grammar,
            word.image_url,
        ],
    )?;
    Ok(())
}

/// Insert words in a single transaction, replacing rows with the same location
pub fn insert_words(conn: &Connection, words: &[Word]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for word in words {
        insert_word(&tx, word)?;
    }
    tx.commit()?;
    Ok(words.len())
}

pub fn count_words(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))
}

pub fn get_word_by_location(conn: &Connection, location: &str) -> Result<Option<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE location = ?1",
        WORD_COLUMNS
    ))?;

    let mut rows = stmt.query(params![location])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_word(row)?))
    } else {
        Ok(None)
    }
}

/// All words of a verse in reading order
pub fn get_words_by_verse(conn: &Connection, surah_number: u16, verse: &str) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE surah_number = ?1 AND verse = ?2 ORDER BY position ASC",
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(params![surah_number, verse], |row| row_to_word(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_words_by_root(conn: &Connection, root_arabic: &str, limit: usize) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE root_arabic = ?1 ORDER BY RANDOM() LIMIT ?2",
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(params![root_arabic, sql_count(limit)], |row| row_to_word(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_words_by_surah(conn: &Connection, surah_number: u16, limit: usize) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE surah_number = ?1 ORDER BY RANDOM() LIMIT ?2",
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(params![surah_number, sql_count(limit)], |row| row_to_word(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// Words whose translation length (in characters) lies in `min_len..=max_len`
pub fn get_words_by_translation_length(
    conn: &Connection,
    min_len: usize,
    max_len: usize,
    limit: usize,
) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {} FROM words
    WHERE translation IS NOT NULL AND LENGTH(translation) BETWEEN ?1 AND ?2
    ORDER BY RANDOM() LIMIT ?3
    "#,
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(
            params![sql_count(min_len), sql_count(max_len), sql_count(limit)],
            |row| row_to_word(row),
        )?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// Words whose transliteration length (in characters) lies in `min_len..=max_len`
pub fn get_words_by_transliteration_length(
    conn: &Connection,
    min_len: usize,
    max_len: usize,
    limit: usize,
) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {} FROM words
    WHERE LENGTH(transliteration) BETWEEN ?1 AND ?2
    ORDER BY RANDOM() LIMIT ?3
    "#,
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(
            params![sql_count(min_len), sql_count(max_len), sql_count(limit)],
            |row| row_to_word(row),
        )?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_random_words(conn: &Connection, limit: usize) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words ORDER BY RANDOM() LIMIT ?1",
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(params![sql_count(limit)], |row| row_to_word(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_words_excluding_surah(
    conn: &Connection,
    surah_number: u16,
    limit: usize,
) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE surah_number != ?1 ORDER BY RANDOM() LIMIT ?2",
        WORD_COLUMNS
    ))?;
    let words = stmt
        .query_map(params![surah_number, sql_count(limit)], |row| row_to_word(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// Words whose translation is one of `allowlist` (compared lowercase)
pub fn get_words_with_translations(
    conn: &Connection,
    allowlist: &[&str],
    limit: usize,
) -> Result<Vec<Word>> {
    if allowlist.is_empty() {
        return Ok(vec![]);
    }

    let placeholders = vec!["?"; allowlist.len()].join(", ");
    let query = format!(
        r#"
    SELECT {} FROM words
    WHERE LOWER(TRIM(translation)) IN ({})
    ORDER BY RANDOM() LIMIT {}
    "#,
        WORD_COLUMNS,
        placeholders,
        sql_count(limit)
    );
    let mut stmt = conn.prepare(&query)?;
    let words = stmt
        .query_map(params_from_iter(allowlist.iter()), |row| row_to_word(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn row_to_word(row: &Row) -> Result<Word> {
    let verse: String = row.get(2)?;
    Ok(Word {
        location: row.get(0)?,
        surah_number: row.get(1)?,
        verse: Verse::from_stored(&verse),
        translation: row.get(3)?,
        transliteration: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        root_arabic: row.get(5)?,
        root_latin: row.get(6)?,
        grammar: row.get(7)?,
        image_url: row.get(8)?,
    })
}
