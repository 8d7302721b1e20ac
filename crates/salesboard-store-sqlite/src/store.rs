//! [`SqliteStore`] — the SQLite implementation of [`SaleStore`].

use std::path::Path;

use rusqlite::{functions::FunctionFlags, types::Value};
use salesboard_core::{
  filter::{self, Predicate},
  query::SortKey,
  sale::Sale,
  store::{FacetField, SaleStore},
};

use crate::{
  Error, Result,
  encode::{RawSale, SALE_COLUMN_COUNT, SALE_COLUMNS},
  schema::SCHEMA,
  sql::{facet_column, order_by, where_clause},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A sale store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  async fn init(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        register_tag_word_match(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Bulk-load records in a single transaction. This is the only write
  /// path; it backs the `--import` seeding mode and the test fixtures.
  pub async fn insert_sales(&self, sales: Vec<Sale>) -> Result<usize> {
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let marks = vec!["?"; SALE_COLUMN_COUNT].join(", ");
          let mut stmt = tx
            .prepare(&format!("INSERT INTO sales ({SALE_COLUMNS}) VALUES ({marks})"))?;
          for sale in &sales {
            stmt.execute(rusqlite::params![
              sale.transaction_id,
              sale.date.to_string(),
              sale.customer_id,
              sale.customer_name,
              sale.phone_number,
              sale.gender,
              sale.age,
              sale.customer_region,
              sale.customer_type,
              sale.product_id,
              sale.product_name,
              sale.brand,
              sale.product_category,
              sale.tags,
              sale.quantity,
              sale.price_per_unit,
              sale.discount_percentage,
              sale.total_amount,
              sale.final_amount,
              sale.payment_method,
              sale.order_status,
              sale.delivery_type,
              sale.store_id,
              sale.store_location,
              sale.salesperson_id,
              sale.employee_name,
            ])?;
          }
        }
        tx.commit()?;
        Ok(sales.len())
      })
      .await?;
    Ok(inserted)
  }
}

/// Register `tag_word_match(tags, tag)`, backed by the core whole-word
/// matcher, so tag predicates evaluate inside SQLite with the exact same
/// semantics as the in-process function.
fn register_tag_word_match(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "tag_word_match",
    2,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let haystack: String = ctx.get(0)?;
      let needle: String = ctx.get(1)?;
      Ok(filter::tag_word_match(&haystack, &needle))
    },
  )
}

// ─── SaleStore impl ──────────────────────────────────────────────────────────

impl SaleStore for SqliteStore {
  type Error = Error;

  async fn count(&self, predicate: &Predicate) -> Result<u64> {
    let (where_sql, params) = where_clause(predicate);
    let total: i64 = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM sales{where_sql}");
        let mut stmt = conn.prepare(&sql)?;
        Ok(stmt.query_row(rusqlite::params_from_iter(params), |row| row.get(0))?)
      })
      .await?;
    Ok(total as u64)
  }

  async fn find(
    &self,
    predicate: &Predicate,
    sort: SortKey,
    skip: u64,
    limit: u64,
  ) -> Result<Vec<Sale>> {
    let (where_sql, mut params) = where_clause(predicate);
    // Clamp instead of casting: a u64 past i64::MAX would go negative,
    // which SQLite reads as "no limit".
    params.push(Value::from(i64::try_from(limit).unwrap_or(i64::MAX)));
    params.push(Value::from(i64::try_from(skip).unwrap_or(i64::MAX)));

    let raws: Vec<RawSale> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {SALE_COLUMNS} FROM sales{where_sql} \
           ORDER BY {} LIMIT ? OFFSET ?",
          order_by(sort),
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawSale::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSale::into_sale).collect()
  }

  async fn distinct(&self, field: FacetField) -> Result<Vec<String>> {
    let column = facet_column(field);
    let values = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT DISTINCT {column} FROM sales WHERE {column} != '' ORDER BY {column}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(values)
  }

  async fn tag_fields(&self) -> Result<Vec<String>> {
    let values = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT tags FROM sales WHERE tags != ''")?;
        let rows = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(values)
  }
}
