//! The sale transaction record.
//!
//! One flat, denormalised row per transaction. Records are bulk-loaded
//! externally and never mutated by this system; the core only reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single sale transaction.
///
/// Wire names are camelCase for compatibility with the dashboard client.
/// Missing fields deserialise to their defaults, so a record with no
/// `finalAmount` contributes zero to the statistics rather than failing
/// the whole import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sale {
  pub transaction_id:      String,
  /// Calendar date of the transaction. Timezone-less by design; stored
  /// and serialised as ISO 8601 `YYYY-MM-DD`.
  pub date:                NaiveDate,
  pub customer_id:         String,
  pub customer_name:       String,
  pub phone_number:        String,
  pub gender:              String,
  pub age:                 u32,
  pub customer_region:     String,
  pub customer_type:       String,
  pub product_id:          String,
  pub product_name:        String,
  pub brand:               String,
  pub product_category:    String,
  /// Comma-separated free text, not a structured list.
  pub tags:                String,
  pub quantity:            i64,
  pub price_per_unit:      f64,
  pub discount_percentage: f64,
  pub total_amount:        f64,
  pub final_amount:        f64,
  pub payment_method:      String,
  pub order_status:        String,
  pub delivery_type:       String,
  pub store_id:            String,
  pub store_location:      String,
  pub salesperson_id:      String,
  pub employee_name:       String,
}
