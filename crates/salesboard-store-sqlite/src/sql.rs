//! Translation of core [`Predicate`]s into SQL fragments.
//!
//! The WHERE clause is built dynamically, one conjunct per clause, with
//! positional `?` parameters; callers bind them with
//! [`rusqlite::params_from_iter`].

use rusqlite::types::Value;
use salesboard_core::{
  filter::{Clause, Predicate},
  query::SortKey,
  store::FacetField,
};

/// Column backing each facet field.
pub fn facet_column(field: FacetField) -> &'static str {
  match field {
    FacetField::Region => "customer_region",
    FacetField::Gender => "gender",
    FacetField::Category => "product_category",
    FacetField::PaymentMethod => "payment_method",
  }
}

/// `ORDER BY` fragment for a sort key.
///
/// The rowid tie-break keeps pagination stable: records with equal sort
/// values always come back in insertion order, so a count + fetch pair
/// sees the same sequence.
pub fn order_by(sort: SortKey) -> &'static str {
  match sort {
    SortKey::DateAsc => "sale_date ASC, rowid ASC",
    SortKey::DateDesc => "sale_date DESC, rowid ASC",
    SortKey::NameAsc => "customer_name ASC, rowid ASC",
    SortKey::NameDesc => "customer_name DESC, rowid ASC",
    SortKey::QuantityAsc => "quantity ASC, rowid ASC",
    SortKey::QuantityDesc => "quantity DESC, rowid ASC",
  }
}

/// Turn a user-supplied term into a `LIKE` pattern with its wildcards
/// escaped (used with `ESCAPE '\'`).
fn like_pattern(term: &str) -> String {
  let escaped = term
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{escaped}%")
}

/// Build a ` WHERE ...` fragment (or an empty string) plus its positional
/// parameters for `predicate`.
pub fn where_clause(predicate: &Predicate) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = Vec::new();
  let mut params: Vec<Value> = Vec::new();

  for clause in &predicate.clauses {
    match clause {
      Clause::OneOf(field, values) => {
        let marks = vec!["?"; values.len()].join(", ");
        conds.push(format!("{} IN ({marks})", facet_column(*field)));
        params.extend(values.iter().cloned().map(Value::from));
      }
      Clause::AnyTagWord(tags) => {
        let alts = vec!["tag_word_match(tags, ?)"; tags.len()].join(" OR ");
        conds.push(format!("({alts})"));
        params.extend(tags.iter().cloned().map(Value::from));
      }
      Clause::AgeBetween(min, max) => {
        conds.push("age BETWEEN ? AND ?".to_owned());
        params.push(Value::from(i64::from(*min)));
        params.push(Value::from(i64::from(*max)));
      }
      Clause::DateBetween(start, end) => {
        conds.push("sale_date BETWEEN ? AND ?".to_owned());
        params.push(Value::from(start.to_string()));
        params.push(Value::from(end.to_string()));
      }
      Clause::Search(term) => {
        conds.push(
          "(customer_name LIKE ? ESCAPE '\\' OR phone_number LIKE ? ESCAPE '\\')"
            .to_owned(),
        );
        let pattern = like_pattern(term);
        params.push(Value::from(pattern.clone()));
        params.push(Value::from(pattern));
      }
    }
  }

  let fragment = if conds.is_empty() {
    String::new()
  } else {
    format!(" WHERE {}", conds.join(" AND "))
  };
  (fragment, params)
}

#[cfg(test)]
mod tests {
  use super::*;
  use salesboard_core::filter::{build_predicate, FilterSelection};

  #[test]
  fn empty_predicate_has_no_where_clause() {
    let (fragment, params) = where_clause(&Predicate::default());
    assert_eq!(fragment, "");
    assert!(params.is_empty());
  }

  #[test]
  fn clauses_are_and_joined_with_matching_params() {
    let filters = FilterSelection {
      region: vec!["North".into(), "East".into()],
      tags: vec!["summer".into()],
      age_range: Some("18-25".into()),
      ..FilterSelection::default()
    };
    let predicate = build_predicate(&filters).unwrap().with_search("neha");

    let (fragment, params) = where_clause(&predicate);
    assert_eq!(
      fragment,
      " WHERE customer_region IN (?, ?) AND (tag_word_match(tags, ?)) \
       AND age BETWEEN ? AND ? \
       AND (customer_name LIKE ? ESCAPE '\\' OR phone_number LIKE ? ESCAPE '\\')"
    );
    assert_eq!(params.len(), 7);
  }

  #[test]
  fn like_wildcards_are_escaped() {
    assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    assert_eq!(like_pattern("plain"), "%plain%");
  }
}
