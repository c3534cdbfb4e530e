//! Record filter: keep records where any selected field contains the query.
//!
//! Matching lowercases both sides and nothing else. The query is not trimmed,
//! so `"ann "` and `"ann"` are different searches.

use brew_core::error::{BrewError, BrewResult};
use serde::Deserialize;
use std::str::FromStr;
use tracing::trace;

/// A record with a fixed set of text fields that can be searched.
pub trait Searchable {
    type Field: Copy + 'static;

    /// Text of `field`, or `None` when the record has no value for it.
    fn field_text(&self, field: Self::Field) -> Option<&str>;

    /// Fields searched when the caller does not choose any.
    fn default_fields() -> &'static [Self::Field];
}

/// Whether any of `fields` contains `query_lower`, which must already be lowercased.
pub fn matches_query<T: Searchable>(record: &T, query_lower: &str, fields: &[T::Field]) -> bool {
    fields.iter().any(|&field| {
        record
            .field_text(field)
            .map_or(false, |text| text.to_lowercase().contains(query_lower))
    })
}

/// Subsequence of `records` matching `query` on any of `fields`, in input order.
/// An empty query returns every record.
pub fn filter_records<T>(records: &[T], query: &str, fields: &[T::Field]) -> Vec<T>
where
    T: Searchable + Clone,
{
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    let kept: Vec<T> = records
        .iter()
        .filter(|record| matches_query(*record, &needle, fields))
        .cloned()
        .collect();
    trace!(query, total = records.len(), kept = kept.len(), "Records filtered");
    kept
}

/// Parse a comma-separated field list such as `name,email`.
pub fn parse_fields<F>(list: &str) -> BrewResult<Vec<F>>
where
    F: FromStr<Err = BrewError>,
{
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(F::from_str)
        .collect()
}

/// `?q=..&fields=..` query parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub fields: Option<String>,
}

impl SearchParams {
    /// Apply the search to `records`, falling back to the record type's default fields.
    pub fn apply<T>(&self, records: Vec<T>) -> BrewResult<Vec<T>>
    where
        T: Searchable + Clone,
        T::Field: FromStr<Err = BrewError>,
    {
        let query = match self.q.as_deref() {
            None | Some("") => return Ok(records),
            Some(q) => q,
        };
        let fields = match self.fields.as_deref() {
            Some(list) => parse_fields::<T::Field>(list)?,
            None => T::default_fields().to_vec(),
        };
        Ok(filter_records(&records, query, &fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        tag: Option<&'static str>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum RowField {
        Name,
        Tag,
    }

    impl FromStr for RowField {
        type Err = BrewError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "name" => Ok(RowField::Name),
                "tag" => Ok(RowField::Tag),
                other => Err(BrewError::InvalidArgument(other.to_string())),
            }
        }
    }

    impl Searchable for Row {
        type Field = RowField;

        fn field_text(&self, field: RowField) -> Option<&str> {
            match field {
                RowField::Name => Some(self.name),
                RowField::Tag => self.tag,
            }
        }

        fn default_fields() -> &'static [RowField] {
            &[RowField::Name]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Sarah Johnson", tag: Some("regular") },
            Row { name: "Michael Chen", tag: None },
            Row { name: "Sara Lee", tag: Some("VIP") },
        ]
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let kept = filter_records(&rows(), "SARAH", &[RowField::Name]);
        assert_eq!(kept, vec![rows()[0].clone()]);
    }

    #[test]
    fn test_empty_query_is_identity() {
        assert_eq!(filter_records(&rows(), "", &[RowField::Name]), rows());
        assert_eq!(filter_records(&rows(), "", &[]), rows());
    }

    #[test]
    fn test_order_preserved() {
        let kept = filter_records(&rows(), "sara", &[RowField::Name]);
        let names: Vec<&str> = kept.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Sarah Johnson", "Sara Lee"]);
    }

    #[test]
    fn test_any_field_matches() {
        let kept = filter_records(&rows(), "vip", &[RowField::Name, RowField::Tag]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Sara Lee");
        // Tag not selected: no match.
        assert!(filter_records(&rows(), "vip", &[RowField::Name]).is_empty());
    }

    #[test]
    fn test_query_not_trimmed() {
        assert!(filter_records(&rows(), " chen ", &[RowField::Name]).is_empty());
        assert_eq!(filter_records(&rows(), " chen", &[RowField::Name]).len(), 1);
    }

    #[test]
    fn test_parse_fields() {
        let fields: Vec<RowField> = parse_fields("name, tag").unwrap();
        assert_eq!(fields, vec![RowField::Name, RowField::Tag]);
        assert!(parse_fields::<RowField>("name,colour").is_err());
    }

    #[test]
    fn test_params_default_fields() {
        let params = SearchParams { q: Some("regular".into()), fields: None };
        assert!(params.apply(rows()).unwrap().is_empty());

        let params = SearchParams { q: Some("regular".into()), fields: Some("tag".into()) };
        assert_eq!(params.apply(rows()).unwrap().len(), 1);

        let params = SearchParams::default();
        assert_eq!(params.apply(rows()).unwrap().len(), 3);
    }
}
