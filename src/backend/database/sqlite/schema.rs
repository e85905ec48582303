use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Museum tables, in dependency order
const TABLES: &[(&str, &str)] = &[
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS "employees" (
            "Staff_ID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "Name" TEXT NOT NULL,
            "Email" TEXT NOT NULL UNIQUE,
            "Role" TEXT NOT NULL DEFAULT 'staff',
            "Password_Hash" TEXT NOT NULL
        )
        "#,
    ),
    (
        "artworks",
        r#"
        CREATE TABLE IF NOT EXISTS "artworks" (
            "Artwork_ID" INTEGER PRIMARY KEY,
            "Title" TEXT NOT NULL,
            "Artist_Name" TEXT NOT NULL,
            "Year_Created" INTEGER NOT NULL,
            "Medium" TEXT NOT NULL,
            "Year_Acquired" INTEGER NOT NULL,
            "Provenance" TEXT,
            "Location" TEXT NOT NULL,
            "ArtCollection_Type" TEXT NOT NULL
        )
        "#,
    ),
    (
        "exhibitions",
        r#"
        CREATE TABLE IF NOT EXISTS "exhibitions" (
            "Exhibition_ID" INTEGER PRIMARY KEY,
            "Name" TEXT NOT NULL,
            "Start_Date" DATE NOT NULL,
            "End_Date" DATE NOT NULL,
            "Budget" REAL NOT NULL,
            "Location" TEXT NOT NULL,
            "Num_Tickets_Sold" INTEGER NOT NULL DEFAULT 0,
            "Themes" TEXT,
            "Num_Of_Artworks" INTEGER NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "special_exhibitions",
        r#"
        CREATE TABLE IF NOT EXISTS "special_exhibitions" (
            "Special_Exhibition_ID" INTEGER PRIMARY KEY,
            "Name" TEXT NOT NULL,
            "Start_Date" DATE NOT NULL,
            "End_Date" DATE NOT NULL,
            "Budget" REAL NOT NULL,
            "Location" TEXT NOT NULL
        )
        "#,
    ),
    (
        "exhibitions_artworks",
        r#"
        CREATE TABLE IF NOT EXISTS "exhibitions_artworks" (
            "Link_ID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "Exhibition_ID" INTEGER NOT NULL,
            "Artwork_ID" INTEGER NOT NULL,
            UNIQUE ("Exhibition_ID", "Artwork_ID"),
            FOREIGN KEY ("Exhibition_ID") REFERENCES "exhibitions" ("Exhibition_ID") ON DELETE CASCADE,
            FOREIGN KEY ("Artwork_ID") REFERENCES "artworks" ("Artwork_ID") ON DELETE CASCADE
        )
        "#,
    ),
    (
        "exhibition_staff",
        r#"
        CREATE TABLE IF NOT EXISTS "exhibition_staff" (
            "Link_ID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "Exhibition_ID" INTEGER NOT NULL,
            "Staff_ID" INTEGER NOT NULL,
            UNIQUE ("Exhibition_ID", "Staff_ID"),
            FOREIGN KEY ("Exhibition_ID") REFERENCES "exhibitions" ("Exhibition_ID") ON DELETE CASCADE,
            FOREIGN KEY ("Staff_ID") REFERENCES "employees" ("Staff_ID") ON DELETE CASCADE
        )
        "#,
    ),
    (
        "special_exhibition_staff",
        r#"
        CREATE TABLE IF NOT EXISTS "special_exhibition_staff" (
            "Link_ID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "Special_Exhibition_ID" INTEGER NOT NULL,
            "Staff_ID" INTEGER NOT NULL,
            UNIQUE ("Special_Exhibition_ID", "Staff_ID"),
            FOREIGN KEY ("Special_Exhibition_ID") REFERENCES "special_exhibitions" ("Special_Exhibition_ID") ON DELETE CASCADE,
            FOREIGN KEY ("Staff_ID") REFERENCES "employees" ("Staff_ID") ON DELETE CASCADE
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    r#"CREATE INDEX IF NOT EXISTS idx_employees_email ON "employees" (LOWER("Email"))"#,
    r#"CREATE INDEX IF NOT EXISTS idx_exhibitions_artworks_artwork ON "exhibitions_artworks" ("Artwork_ID")"#,
    r#"CREATE INDEX IF NOT EXISTS idx_exhibition_staff_staff ON "exhibition_staff" ("Staff_ID")"#,
    r#"CREATE INDEX IF NOT EXISTS idx_special_exhibition_staff_staff ON "special_exhibition_staff" ("Staff_ID")"#,
];

/// Create the museum tables and indexes for SQLite
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    for (table, sql) in TABLES {
        sqlx::query(sql).execute(pool).await.map_err(|e| {
            AppError::database(format!("Failed to create {} table", table), e)
        })?;
    }

    for sql in INDEXES {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::database("Failed to create index", e))?;
    }

    Ok(())
}
