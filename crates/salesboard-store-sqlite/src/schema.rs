//! SQL schema for the salesboard SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `sale_date` is always the canonical ISO 8601 calendar date, so lexical
/// comparison and range scans over it are correct.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS sales (
    transaction_id      TEXT PRIMARY KEY,
    sale_date           TEXT NOT NULL,              -- ISO 8601 (YYYY-MM-DD)
    customer_id         TEXT NOT NULL DEFAULT '',
    customer_name       TEXT NOT NULL DEFAULT '',
    phone_number        TEXT NOT NULL DEFAULT '',
    gender              TEXT NOT NULL DEFAULT '',
    age                 INTEGER NOT NULL DEFAULT 0,
    customer_region     TEXT NOT NULL DEFAULT '',
    customer_type       TEXT NOT NULL DEFAULT '',
    product_id          TEXT NOT NULL DEFAULT '',
    product_name        TEXT NOT NULL DEFAULT '',
    brand               TEXT NOT NULL DEFAULT '',
    product_category    TEXT NOT NULL DEFAULT '',
    tags                TEXT NOT NULL DEFAULT '',   -- comma-separated free text
    quantity            INTEGER NOT NULL DEFAULT 0,
    price_per_unit      REAL NOT NULL DEFAULT 0,
    discount_percentage REAL NOT NULL DEFAULT 0,
    total_amount        REAL NOT NULL DEFAULT 0,
    final_amount        REAL NOT NULL DEFAULT 0,
    payment_method      TEXT NOT NULL DEFAULT '',
    order_status        TEXT NOT NULL DEFAULT '',
    delivery_type       TEXT NOT NULL DEFAULT '',
    store_id            TEXT NOT NULL DEFAULT '',
    store_location      TEXT NOT NULL DEFAULT '',
    salesperson_id      TEXT NOT NULL DEFAULT '',
    employee_name       TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS sales_date_idx     ON sales(sale_date);
CREATE INDEX IF NOT EXISTS sales_region_idx   ON sales(customer_region);
CREATE INDEX IF NOT EXISTS sales_gender_idx   ON sales(gender);
CREATE INDEX IF NOT EXISTS sales_age_idx      ON sales(age);
CREATE INDEX IF NOT EXISTS sales_category_idx ON sales(product_category);
CREATE INDEX IF NOT EXISTS sales_payment_idx  ON sales(payment_method);
CREATE INDEX IF NOT EXISTS sales_name_idx     ON sales(customer_name);

PRAGMA user_version = 1;
";
