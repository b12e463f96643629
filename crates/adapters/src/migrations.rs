pub const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS boards (
        board_id TEXT PRIMARY KEY NOT NULL,
        board_name TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        image_name TEXT UNIQUE,
        board_id TEXT NOT NULL REFERENCES boards(board_id),
        category TEXT NOT NULL DEFAULT 'images',
        starred INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        metadata_json TEXT
    );",
    "CREATE INDEX IF NOT EXISTS idx_images_board_category
        ON images (board_id, category, id);",
];
