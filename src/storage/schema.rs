//! Relational schema and seed data
//!
//! Three tables: `books`, `categories` and the `book_categories` join table.
//! Creation is idempotent and seeding never touches existing category rows.

use crate::catalog::types::{Category, CategoryId};

/// DDL applied when a SQLite store is opened
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 255),
    year INTEGER NOT NULL CHECK (year BETWEEN 1 AND 9999),
    version INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(name) <= 255)
);

-- Book-Category join table (many-to-many)
CREATE TABLE IF NOT EXISTS book_categories (
    book_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,

    PRIMARY KEY (book_id, category_id),
    FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE,
    FOREIGN KEY (category_id) REFERENCES categories(id)
);

CREATE INDEX IF NOT EXISTS book_categories_category
ON book_categories (category_id);
"#;

/// Categories inserted once at initialization
pub const SEED_CATEGORIES: [(CategoryId, &str); 5] = [
    (1, "Ficção"),
    (2, "Drama"),
    (3, "Romance"),
    (4, "Terror"),
    (5, "Fantasia"),
];

/// Seed categories as model values
pub fn seed_categories() -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .map(|(id, name)| Category::new(*id, *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_one_through_five() {
        let ids: Vec<CategoryId> = seed_categories().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_seed_names() {
        let seeds = seed_categories();
        assert_eq!(seeds[0].name, "Ficção");
        assert_eq!(seeds[4].name, "Fantasia");
    }
}
