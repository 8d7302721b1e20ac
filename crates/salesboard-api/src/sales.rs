//! Handler and query orchestration for `GET /sales`.
//!
//! One request runs: predicate construction → search overlay → sort-key
//! resolution → concurrent count + page fetch → page-local statistics →
//! response assembly.

use axum::{
  Json,
  extract::{Query, State},
};
use salesboard_core::{
  Error as CoreError,
  filter::{FilterSelection, build_predicate},
  query::{PageStats, Pagination, SortKey, normalize_limit, normalize_page},
  sale::Sale,
  store::SaleStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Raw query parameters for `GET /sales`.
///
/// `page` and `limit` stay strings so non-numeric input falls back to the
/// defaults instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
  pub search:  Option<String>,
  /// JSON-encoded [`FilterSelection`].
  pub filters: Option<String>,
  pub sort:    Option<String>,
  pub page:    Option<String>,
  pub limit:   Option<String>,
}

/// The `GET /sales` response envelope.
#[derive(Debug, Serialize)]
pub struct SalesPage {
  pub success:    bool,
  pub data:       Vec<Sale>,
  pub stats:      PageStats,
  pub pagination: Pagination,
}

/// `GET /sales?search=&filters=<JSON>&sort=&page=&limit=`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<SalesPage>, ApiError>
where
  S: SaleStore + Clone + Send + Sync + 'static,
{
  let page = list_sales(state.store.as_ref(), &params).await?;
  Ok(Json(page))
}

/// Run one dashboard listing query against `store`.
pub async fn list_sales<S>(store: &S, params: &ListParams) -> Result<SalesPage, ApiError>
where
  S: SaleStore,
{
  let filters = match params.filters.as_deref() {
    None | Some("") => FilterSelection::default(),
    Some(raw) => FilterSelection::from_json(raw).map_err(bad_request)?,
  };

  let mut predicate = build_predicate(&filters).map_err(bad_request)?;
  if let Some(term) = params.search.as_deref() {
    predicate = predicate.with_search(term);
  }

  let sort = SortKey::resolve(params.sort.as_deref());
  let page = normalize_page(parse_number(params.page.as_deref()));
  let limit = normalize_limit(parse_number(params.limit.as_deref()));
  // Saturate: page and limit are client-controlled, and a page count near
  // u64::MAX must land past the end of the data, not wrap around.
  let skip = page.saturating_sub(1).saturating_mul(limit);

  // The count must see the same predicate as the fetch; the two reads
  // are otherwise independent, so issue them concurrently.
  let (total, records) = tokio::try_join!(
    async { store.count(&predicate).await.map_err(ApiError::store) },
    async {
      store
        .find(&predicate, sort, skip, limit)
        .await
        .map_err(ApiError::store)
    },
  )?;

  let stats = PageStats::for_page(&records);
  Ok(SalesPage {
    success: true,
    data: records,
    stats,
    pagination: Pagination::compute(total, page, limit),
  })
}

fn parse_number(raw: Option<&str>) -> Option<u64> {
  raw.and_then(|s| s.trim().parse().ok())
}

fn bad_request(err: CoreError) -> ApiError {
  ApiError::BadRequest(err.to_string())
}
