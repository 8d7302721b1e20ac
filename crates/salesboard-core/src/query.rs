//! Sort-key resolution, pagination math, and page-local statistics.
//!
//! Pure helpers shared by the query service; nothing here touches storage.

use serde::Serialize;

use crate::sale::Sale;

/// Page size used when the client sends none (or nonsense).
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// The fixed sort-key enumeration. Anything the client sends outside this
/// set falls back to [`SortKey::DateDesc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
  DateAsc,
  #[default]
  DateDesc,
  NameAsc,
  NameDesc,
  QuantityAsc,
  QuantityDesc,
}

impl SortKey {
  /// Resolve a client-supplied sort key, falling back to `date-desc` for
  /// anything unrecognised.
  pub fn resolve(raw: Option<&str>) -> Self {
    match raw {
      Some("date-asc") => Self::DateAsc,
      Some("date-desc") => Self::DateDesc,
      Some("name-asc") => Self::NameAsc,
      Some("name-desc") => Self::NameDesc,
      Some("quantity-asc") => Self::QuantityAsc,
      Some("quantity-desc") => Self::QuantityDesc,
      _ => Self::DateDesc,
    }
  }
}

// ─── Page bounds ─────────────────────────────────────────────────────────────

/// Floor the 1-based page number at 1.
pub fn normalize_page(page: Option<u64>) -> u64 {
  page.map_or(1, |p| p.max(1))
}

/// Fall back to [`DEFAULT_PAGE_SIZE`] for absent or nonsensical sizes.
///
/// A bad `limit` is deliberately not an error: the original dashboard
/// treated it as "use the default" and clients rely on that.
pub fn normalize_limit(limit: Option<u64>) -> u64 {
  match limit {
    Some(l) if l >= 1 => l,
    _ => DEFAULT_PAGE_SIZE,
  }
}

// ─── Pagination metadata ─────────────────────────────────────────────────────

/// Pagination metadata for one result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub total:         u64,
  pub page:          u64,
  pub pages:         u64,
  pub has_next_page: bool,
  pub has_prev_page: bool,
}

impl Pagination {
  /// `pages = ceil(total / limit)`; `hasNextPage` iff `page < pages`;
  /// `hasPrevPage` iff `page > 1`. `limit` must already be normalised
  /// (>= 1).
  pub fn compute(total: u64, page: u64, limit: u64) -> Self {
    let pages = total.div_ceil(limit);
    Self {
      total,
      page,
      pages,
      has_next_page: page < pages,
      has_prev_page: page > 1,
    }
  }
}

// ─── Page statistics ─────────────────────────────────────────────────────────

/// Aggregates over the current page only, never the full filtered set.
///
/// The dashboard shows "this page's totals" by design; computing global
/// totals would need a second full scan per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
  pub total_quantity: i64,
  pub total_amount:   f64,
  pub total_discount: f64,
}

impl PageStats {
  /// Sum quantity, pre-discount amount, and discount
  /// (`totalAmount − finalAmount`) over `records`.
  pub fn for_page(records: &[Sale]) -> Self {
    let mut stats = Self::default();
    for sale in records {
      stats.total_quantity += sale.quantity;
      stats.total_amount += sale.total_amount;
      stats.total_discount += sale.total_amount - sale.final_amount;
    }
    stats
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_key_resolution() {
    assert_eq!(SortKey::resolve(Some("date-asc")), SortKey::DateAsc);
    assert_eq!(SortKey::resolve(Some("name-desc")), SortKey::NameDesc);
    assert_eq!(SortKey::resolve(Some("quantity-desc")), SortKey::QuantityDesc);
  }

  #[test]
  fn unrecognised_sort_key_falls_back_to_date_desc() {
    assert_eq!(SortKey::resolve(Some("bogus")), SortKey::DateDesc);
    assert_eq!(SortKey::resolve(None), SortKey::DateDesc);
    assert_eq!(SortKey::resolve(Some("")), SortKey::DateDesc);
  }

  #[test]
  fn page_floors_at_one() {
    assert_eq!(normalize_page(None), 1);
    assert_eq!(normalize_page(Some(0)), 1);
    assert_eq!(normalize_page(Some(7)), 7);
  }

  #[test]
  fn limit_falls_back_to_default() {
    assert_eq!(normalize_limit(None), DEFAULT_PAGE_SIZE);
    assert_eq!(normalize_limit(Some(0)), DEFAULT_PAGE_SIZE);
    assert_eq!(normalize_limit(Some(25)), 25);
  }

  #[test]
  fn pagination_ceiling_and_flags() {
    let p = Pagination::compute(21, 1, 10);
    assert_eq!(p.pages, 3);
    assert!(p.has_next_page);
    assert!(!p.has_prev_page);

    let p = Pagination::compute(21, 3, 10);
    assert!(!p.has_next_page);
    assert!(p.has_prev_page);

    let p = Pagination::compute(20, 2, 10);
    assert_eq!(p.pages, 2);
    assert!(!p.has_next_page);
  }

  #[test]
  fn pagination_with_no_matches() {
    let p = Pagination::compute(0, 1, 10);
    assert_eq!(p.pages, 0);
    assert!(!p.has_next_page);
    assert!(!p.has_prev_page);
  }

  #[test]
  fn stats_cover_only_the_given_page() {
    let page = vec![
      Sale {
        quantity: 2,
        total_amount: 100.0,
        final_amount: 90.0,
        ..Sale::default()
      },
      Sale {
        quantity: 1,
        total_amount: 50.0,
        final_amount: 50.0,
        ..Sale::default()
      },
    ];
    let stats = PageStats::for_page(&page);
    assert_eq!(stats.total_quantity, 3);
    assert_eq!(stats.total_amount, 150.0);
    assert_eq!(stats.total_discount, 10.0);
  }

  #[test]
  fn stats_on_empty_page_are_zero() {
    assert_eq!(PageStats::for_page(&[]), PageStats::default());
  }
}
