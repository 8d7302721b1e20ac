//! `GET /filter-options` and its TTL cache.
//!
//! A read-through cache over five storage reads: four distinct-value
//! scans plus a flattening pass over every record's comma-separated tag
//! field. Invalidation is purely time-based — the read path has no writes
//! that could make an entry stale early.

use std::{collections::BTreeSet, time::Duration};

use axum::{Json, extract::State};
use salesboard_core::{
  filter::split_tags,
  store::{FacetField, SaleStore},
};
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, time::Instant};

use crate::{AppState, error::ApiError};

/// Default time-to-live for the cached payload.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// The `GET /filter-options` payload: distinct non-empty values a client
/// can multi-select from, each list sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
  pub regions:         Vec<String>,
  pub genders:         Vec<String>,
  pub categories:      Vec<String>,
  pub payment_methods: Vec<String>,
  pub tags:            Vec<String>,
}

struct CacheSlot {
  payload:     FilterOptions,
  computed_at: Instant,
}

/// Process-wide read-through cache with time-based invalidation.
///
/// Constructed once at startup and shared by handle, instead of hiding a
/// module-level singleton. The slot lock is held across recomputation, so
/// concurrent callers that observe an expired entry queue behind a single
/// in-flight refresh instead of duplicating it.
pub struct FilterOptionsCache {
  ttl:  Duration,
  slot: Mutex<Option<CacheSlot>>,
}

impl FilterOptionsCache {
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      slot: Mutex::new(None),
    }
  }

  /// Return the cached payload while it is younger than the TTL,
  /// touching no storage; otherwise recompute from `store`, replace the
  /// slot, and reset its timestamp. A failed recompute propagates — the
  /// stale entry is not served as a fallback.
  pub async fn get_or_refresh<S>(&self, store: &S) -> Result<FilterOptions, ApiError>
  where
    S: SaleStore,
  {
    let mut slot = self.slot.lock().await;
    if let Some(entry) = slot.as_ref()
      && entry.computed_at.elapsed() < self.ttl
    {
      return Ok(entry.payload.clone());
    }

    let payload = compute_options(store).await?;
    *slot = Some(CacheSlot {
      payload: payload.clone(),
      computed_at: Instant::now(),
    });
    Ok(payload)
  }
}

/// The five storage reads behind a cache miss. Tags are tokenised,
/// deduplicated, and sorted into one flat option list because the stored
/// field is unstructured text, not a per-record list.
async fn compute_options<S: SaleStore>(store: &S) -> Result<FilterOptions, ApiError> {
  let regions = store
    .distinct(FacetField::Region)
    .await
    .map_err(ApiError::options)?;
  let genders = store
    .distinct(FacetField::Gender)
    .await
    .map_err(ApiError::options)?;
  let categories = store
    .distinct(FacetField::Category)
    .await
    .map_err(ApiError::options)?;
  let payment_methods = store
    .distinct(FacetField::PaymentMethod)
    .await
    .map_err(ApiError::options)?;

  let mut tags = BTreeSet::new();
  for field in store.tag_fields().await.map_err(ApiError::options)? {
    tags.extend(split_tags(&field).map(str::to_owned));
  }

  Ok(FilterOptions {
    regions,
    genders,
    categories,
    payment_methods,
    tags: tags.into_iter().collect(),
  })
}

/// `GET /filter-options`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<FilterOptions>, ApiError>
where
  S: SaleStore + Clone + Send + Sync + 'static,
{
  let payload = state
    .filter_options
    .get_or_refresh(state.store.as_ref())
    .await?;
  Ok(Json(payload))
}
