use std::str::FromStr;

use boardkit_domain::{Board, BoardId, BoardImage, ImageCategory, ImageName, ImageQuery};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

pub fn insert_board(conn: &Connection, board: &Board) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO boards (board_id, board_name) VALUES (?1, ?2)",
        params![board.id.as_str(), board.name],
    )?;
    Ok(())
}

pub fn find_board(conn: &Connection, board_id: &str) -> Result<Option<Board>> {
    conn.query_row(
        "SELECT board_id, board_name FROM boards WHERE board_id = ?1",
        params![board_id],
        board_from_row,
    )
    .optional()
}

pub fn list_boards(conn: &Connection) -> Result<Vec<Board>> {
    let mut stmt = conn.prepare("SELECT board_id, board_name FROM boards ORDER BY board_id")?;
    let rows = stmt.query_map([], board_from_row)?;
    rows.collect()
}

/// Matching images in insertion order, oldest first. The keyword is matched
/// in Rust through [`ImageQuery::matches_keyword`], not in SQL.
pub fn list_images(conn: &Connection, query: &ImageQuery) -> Result<Vec<BoardImage>> {
    let mut stmt = conn.prepare(
        "SELECT image_name, board_id, category, starred, created_at, metadata_json
         FROM images
         WHERE image_name IS NOT NULL
           AND board_id = ?1
           AND category = ?2
           AND (?3 = 0 OR starred = 1)
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            query.board_id.as_str(),
            query.category.as_str(),
            query.starred_only,
        ],
        image_from_row,
    )?;

    let mut images = Vec::new();
    for image in rows {
        let image = image?;
        if query.matches_keyword(image.metadata_json.as_deref()) {
            images.push(image);
        }
    }
    Ok(images)
}

pub fn find_metadata(conn: &Connection, image_name: &str) -> Result<Option<Option<String>>> {
    conn.query_row(
        "SELECT metadata_json FROM images WHERE image_name = ?1",
        params![image_name],
        |row| row.get(0),
    )
    .optional()
}

pub fn image_exists(conn: &Connection, image_name: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM images WHERE image_name = ?1)",
        params![image_name],
        |row| row.get(0),
    )
}

pub fn set_starred(conn: &Connection, image_name: &str, starred: bool) -> Result<usize> {
    conn.execute(
        "UPDATE images SET starred = ?1 WHERE image_name = ?2",
        params![starred, image_name],
    )
}

fn board_from_row(row: &Row<'_>) -> Result<Board> {
    let id: String = row.get(0)?;
    Ok(Board {
        id: BoardId::new(id).map_err(|error| conversion_error(0, error))?,
        name: row.get(1)?,
    })
}

fn image_from_row(row: &Row<'_>) -> Result<BoardImage> {
    let name: String = row.get(0)?;
    let board_id: String = row.get(1)?;
    let category: String = row.get(2)?;
    Ok(BoardImage {
        name: ImageName::new(name).map_err(|error| conversion_error(0, error))?,
        board_id: BoardId::new(board_id).map_err(|error| conversion_error(1, error))?,
        category: ImageCategory::from_str(&category)
            .map_err(|error| conversion_error(2, error))?,
        starred: row.get(3)?,
        created_at: row.get(4)?,
        metadata_json: row.get(5)?,
    })
}

fn conversion_error(column: usize, error: boardkit_domain::DomainError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}
