//! Migration v1: tabs and their rows

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS tabs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sheet_rows (
    tab_id INTEGER NOT NULL REFERENCES tabs(id) ON DELETE CASCADE,
    row_index INTEGER NOT NULL,
    cells TEXT NOT NULL,
    PRIMARY KEY (tab_id, row_index)
);
";
