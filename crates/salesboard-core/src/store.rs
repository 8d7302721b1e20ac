//! The `SaleStore` trait and facet-field enumeration.
//!
//! The trait is implemented by storage backends (e.g.
//! `salesboard-store-sqlite`). The api crate depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{filter::Predicate, query::SortKey, sale::Sale};

/// A stored field the dashboard offers as a multi-select facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetField {
  Region,
  Gender,
  Category,
  PaymentMethod,
}

/// Abstraction over a sale-record store backend.
///
/// The read path issues no writes; bulk loading is a backend concern.
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`). Concurrent reads
/// must be safe.
pub trait SaleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Number of records matching `predicate`.
  fn count<'a>(
    &'a self,
    predicate: &'a Predicate,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Fetch one page of matching records in `sort` order, skipping `skip`
  /// records and returning at most `limit`.
  ///
  /// Ordering must be stable across repeated identical calls — ties are
  /// broken by natural storage order — so a count + fetch pair over the
  /// same predicate paginates without duplicates or omissions.
  fn find<'a>(
    &'a self,
    predicate: &'a Predicate,
    sort: SortKey,
    skip: u64,
    limit: u64,
  ) -> impl Future<Output = Result<Vec<Sale>, Self::Error>> + Send + 'a;

  /// Distinct non-empty values of `field`, sorted.
  fn distinct(
    &self,
    field: FacetField,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// The raw tag field of every record that has one (projected scan).
  /// Tokenising and deduplicating the result is the caller's job.
  fn tag_fields(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
