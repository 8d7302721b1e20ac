//! The filter-predicate builder.
//!
//! Turns the client's raw filter selection into a store-agnostic
//! [`Predicate`] — a conjunction of clauses a backend can translate into
//! its own query form. Backends execute predicates; this module never
//! touches storage.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{Error, Result, date::parse_flexible_date, store::FacetField};

// ─── Client selection ────────────────────────────────────────────────────────

/// The `filters` query parameter, decoded from JSON.
///
/// Every field is optional and unknown keys are ignored. Validation of
/// range strings happens in [`build_predicate`], not at deserialisation
/// time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
  pub region:         Vec<String>,
  pub gender:         Vec<String>,
  pub category:       Vec<String>,
  pub payment_method: Vec<String>,
  pub tags:           Vec<String>,
  /// `"MIN-MAX"`, both bounds inclusive.
  pub age_range:      Option<String>,
  /// Exactly two boundary dates, inclusive on both ends.
  pub date_range:     Vec<String>,
}

impl FilterSelection {
  /// Decode the raw `filters=<JSON>` query parameter.
  pub fn from_json(raw: &str) -> Result<Self> {
    Ok(serde_json::from_str(raw)?)
  }
}

// ─── Predicate ───────────────────────────────────────────────────────────────

/// One conjunct of a [`Predicate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
  /// The facet field's value must equal one of the given strings.
  OneOf(FacetField, Vec<String>),
  /// The tag field must contain at least one of the given tags as a
  /// case-insensitive whole word (OR semantics).
  AnyTagWord(Vec<String>),
  /// `min <= age <= max`, inclusive on both ends.
  AgeBetween(u32, u32),
  /// `start <= date <= end`, inclusive on both ends.
  DateBetween(NaiveDate, NaiveDate),
  /// Customer name OR phone number contains the term as a
  /// case-insensitive substring.
  Search(String),
}

/// A storage-agnostic conjunction of [`Clause`]s.
///
/// An empty predicate matches every record — absent filters are
/// unconstrained, not "must be empty".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
  pub clauses: Vec<Clause>,
}

impl Predicate {
  pub fn is_empty(&self) -> bool {
    self.clauses.is_empty()
  }

  /// AND a free-text search overlay into the predicate. Blank terms are
  /// ignored.
  pub fn with_search(mut self, term: &str) -> Self {
    let term = term.trim();
    if !term.is_empty() {
      self.clauses.push(Clause::Search(term.to_owned()));
    }
    self
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build the conjunction of constraints described by `filters`.
///
/// Each non-empty list field contributes an "is one of" clause; absent or
/// empty fields contribute nothing. Malformed `ageRange`/`dateRange`
/// values are validation errors, never silently dropped into an
/// unconstrained predicate.
pub fn build_predicate(filters: &FilterSelection) -> Result<Predicate> {
  let mut clauses = Vec::new();

  for (field, values) in [
    (FacetField::Region, &filters.region),
    (FacetField::Gender, &filters.gender),
    (FacetField::Category, &filters.category),
    (FacetField::PaymentMethod, &filters.payment_method),
  ] {
    if !values.is_empty() {
      clauses.push(Clause::OneOf(field, values.clone()));
    }
  }

  if !filters.tags.is_empty() {
    clauses.push(Clause::AnyTagWord(filters.tags.clone()));
  }

  // An empty string means "cleared" in the dashboard UI, same as absent.
  if let Some(range) = filters.age_range.as_deref().map(str::trim)
    && !range.is_empty()
  {
    clauses.push(parse_age_range(range)?);
  }

  if !filters.date_range.is_empty() {
    let [start, end] = filters.date_range.as_slice() else {
      return Err(Error::InvalidDateRange(filters.date_range.len()));
    };
    clauses.push(Clause::DateBetween(
      parse_flexible_date(start)?,
      parse_flexible_date(end)?,
    ));
  }

  Ok(Predicate { clauses })
}

fn parse_age_range(raw: &str) -> Result<Clause> {
  let Some((min, max)) = raw.split_once('-') else {
    return Err(Error::InvalidAgeRange(raw.to_owned()));
  };
  let parse = |side: &str| {
    side
      .trim()
      .parse::<u32>()
      .map_err(|_| Error::InvalidAgeRange(raw.to_owned()))
  };
  Ok(Clause::AgeBetween(parse(min)?, parse(max)?))
}

// ─── Tag field helpers ───────────────────────────────────────────────────────

/// Split a comma-separated tag field into trimmed, non-empty tokens.
pub fn split_tags(field: &str) -> impl Iterator<Item = &str> {
  field.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Whole-word, case-insensitive tag match.
///
/// `needle` matches when it occurs in `haystack` with a non-alphanumeric
/// character (or the string edge) on both sides, so "art" never matches
/// inside "cart". Tags are unstructured text at write time; this is the
/// membership test both the in-process matcher and the SQL function use.
pub fn tag_word_match(haystack: &str, needle: &str) -> bool {
  let needle = needle.trim();
  if needle.is_empty() {
    return false;
  }
  let hay = haystack.to_lowercase();
  let nee = needle.to_lowercase();

  let mut from = 0;
  while let Some(pos) = hay[from..].find(&nee) {
    let start = from + pos;
    let end = start + nee.len();
    let left_ok = hay[..start]
      .chars()
      .next_back()
      .is_none_or(|c| !c.is_alphanumeric());
    let right_ok = hay[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
    if left_ok && right_ok {
      return true;
    }
    // Advance one character, not one byte.
    from = start
      + hay[start..]
        .chars()
        .next()
        .map_or(1, char::len_utf8);
  }
  false
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_selection_is_unconstrained() {
    let predicate = build_predicate(&FilterSelection::default()).unwrap();
    assert!(predicate.is_empty());
  }

  #[test]
  fn empty_lists_contribute_no_clause() {
    let filters = FilterSelection {
      region: vec![],
      gender: vec![],
      ..FilterSelection::default()
    };
    assert!(build_predicate(&filters).unwrap().is_empty());
  }

  #[test]
  fn list_fields_become_one_of_clauses() {
    let filters = FilterSelection {
      region: vec!["North".into(), "South".into()],
      payment_method: vec!["UPI".into()],
      ..FilterSelection::default()
    };
    let predicate = build_predicate(&filters).unwrap();
    assert_eq!(predicate.clauses.len(), 2);
    assert_eq!(
      predicate.clauses[0],
      Clause::OneOf(FacetField::Region, vec!["North".into(), "South".into()])
    );
    assert_eq!(
      predicate.clauses[1],
      Clause::OneOf(FacetField::PaymentMethod, vec!["UPI".into()])
    );
  }

  #[test]
  fn age_range_parses_inclusive_bounds() {
    let filters = FilterSelection {
      age_range: Some("18-25".into()),
      ..FilterSelection::default()
    };
    let predicate = build_predicate(&filters).unwrap();
    assert_eq!(predicate.clauses, vec![Clause::AgeBetween(18, 25)]);
  }

  #[test]
  fn age_range_tolerates_inner_whitespace() {
    let filters = FilterSelection {
      age_range: Some(" 18 - 25 ".into()),
      ..FilterSelection::default()
    };
    let predicate = build_predicate(&filters).unwrap();
    assert_eq!(predicate.clauses, vec![Clause::AgeBetween(18, 25)]);
  }

  #[test]
  fn blank_age_range_is_absent() {
    let filters = FilterSelection {
      age_range: Some("   ".into()),
      ..FilterSelection::default()
    };
    assert!(build_predicate(&filters).unwrap().is_empty());
  }

  #[test]
  fn malformed_age_range_is_a_validation_error() {
    for raw in ["abc-30", "18", "18-", "-25", "18-25-30"] {
      let filters = FilterSelection {
        age_range: Some(raw.into()),
        ..FilterSelection::default()
      };
      assert!(
        matches!(build_predicate(&filters), Err(Error::InvalidAgeRange(_))),
        "expected {raw:?} to be rejected"
      );
    }
  }

  #[test]
  fn date_range_accepts_iso_and_legacy_forms() {
    let filters = FilterSelection {
      date_range: vec!["2024-01-01".into(), "31-12-2024".into()],
      ..FilterSelection::default()
    };
    let predicate = build_predicate(&filters).unwrap();
    assert_eq!(
      predicate.clauses,
      vec![Clause::DateBetween(
        "2024-01-01".parse().unwrap(),
        "2024-12-31".parse().unwrap(),
      )]
    );
  }

  #[test]
  fn date_range_must_have_two_boundaries() {
    let filters = FilterSelection {
      date_range: vec!["2024-01-01".into()],
      ..FilterSelection::default()
    };
    assert!(matches!(
      build_predicate(&filters),
      Err(Error::InvalidDateRange(1))
    ));
  }

  #[test]
  fn unparseable_date_boundary_is_rejected() {
    let filters = FilterSelection {
      date_range: vec!["2024-01-01".into(), "soon".into()],
      ..FilterSelection::default()
    };
    assert!(matches!(
      build_predicate(&filters),
      Err(Error::InvalidDate(_))
    ));
  }

  #[test]
  fn unknown_keys_are_ignored() {
    let filters =
      FilterSelection::from_json(r#"{"region":["East"],"futureKnob":true}"#).unwrap();
    assert_eq!(filters.region, vec!["East"]);
  }

  #[test]
  fn malformed_json_is_rejected() {
    assert!(matches!(
      FilterSelection::from_json("{not json"),
      Err(Error::FilterPayload(_))
    ));
  }

  #[test]
  fn search_overlay_is_appended() {
    let predicate = Predicate::default().with_search("  98765 ");
    assert_eq!(predicate.clauses, vec![Clause::Search("98765".into())]);
    assert!(Predicate::default().with_search("   ").is_empty());
  }

  #[test]
  fn tag_word_match_respects_word_boundaries() {
    assert!(tag_word_match("summer sale, new-arrival", "sale"));
    assert!(!tag_word_match("wholesale, cart", "sale"));
    assert!(!tag_word_match("cart", "art"));
    assert!(tag_word_match("new-arrival", "arrival"));
  }

  #[test]
  fn tag_word_match_is_case_insensitive() {
    assert!(tag_word_match("Summer Sale", "SALE"));
    assert!(tag_word_match("CLEARANCE,festive", "clearance"));
  }

  #[test]
  fn tag_word_match_retries_partial_hits() {
    // First occurrence is embedded, second stands alone.
    assert!(tag_word_match("wholesale sale", "sale"));
  }

  #[test]
  fn blank_needle_never_matches() {
    assert!(!tag_word_match("summer", ""));
    assert!(!tag_word_match("summer", "  "));
  }

  #[test]
  fn split_tags_trims_and_drops_empties() {
    let tokens: Vec<&str> = split_tags(" summer ,, sale ,").collect();
    assert_eq!(tokens, vec!["summer", "sale"]);
  }
}
