//! Query builder: list-request parameters to a filter predicate.
//!
//! The builder is deliberately forgiving. Filters are added only when the
//! corresponding parameter is present, non-empty, and not the sentinel
//! `"all"`; malformed values (an unparseable `date`, an unknown parameter
//! name) are dropped rather than rejected. Building a filter never fails.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::schema::ResourceSchema;

/// A single predicate in a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Case-insensitive substring match over one or more fields (ORed).
    Contains {
        /// Fields the term is matched against.
        fields: Vec<String>,
        /// The search term.
        term: String,
    },

    /// Exact match on one field.
    Eq {
        /// The field to compare.
        field: String,
        /// The expected value.
        value: String,
    },

    /// Case-insensitive exact match on one field.
    EqFold {
        /// The field to compare.
        field: String,
        /// The expected value.
        value: String,
    },

    /// Half-open range `[start, end)` on an ISO-8601 date or datetime field.
    ///
    /// Bounds are compared lexicographically, which is correct for ISO-8601
    /// strings sharing a prefix format (`YYYY-MM-DD...`).
    Range {
        /// The field to compare.
        field: String,
        /// Inclusive lower bound.
        start: String,
        /// Exclusive upper bound.
        end: String,
    },
}

/// A conjunction of conditions, consumed by the backend's find/count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

/// Sentinel filter value meaning "do not filter".
const ALL_SENTINEL: &str = "all";

/// Parameters handled by pagination, not filtering.
const RESERVED_PARAMS: &[&str] = &["page", "limit"];

impl Filter {
    /// Creates an empty filter matching every document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the conditions in this filter.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns true if this filter matches every document.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Adds an exact-match condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a case-insensitive exact-match condition.
    pub fn eq_fold(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::EqFold {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a substring-search condition over the given fields.
    pub fn contains(mut self, fields: &[&str], term: impl Into<String>) -> Self {
        self.conditions.push(Condition::Contains {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            term: term.into(),
        });
        self
    }

    /// Adds a half-open day range on `field` covering the given date.
    pub fn on_day(mut self, field: impl Into<String>, day: NaiveDate) -> Self {
        let next = day.succ_opt().unwrap_or(day);
        self.conditions.push(Condition::Range {
            field: field.into(),
            start: day.format("%Y-%m-%d").to_string(),
            end: next.format("%Y-%m-%d").to_string(),
        });
        self
    }

    /// Builds a filter from request query parameters, per the schema.
    ///
    /// Recognized inputs:
    /// - `search`: substring match across the schema's search fields
    /// - `date`: `YYYY-MM-DD`, expanded to a day range on the date field
    /// - any name in `filter_params` (snake_case aliases accepted): exact match
    ///
    /// Everything else (pagination parameters, unknown names, empty values,
    /// the `"all"` sentinel, malformed dates) is ignored.
    pub fn from_params(schema: &ResourceSchema, params: &HashMap<String, String>) -> Self {
        let mut filter = Filter::empty();

        for (name, value) in params {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let name = schema.canonical_field(name.as_str());
            if RESERVED_PARAMS.contains(&name) {
                continue;
            }

            if name == "search" {
                if !schema.search_fields.is_empty() {
                    filter = filter.contains(schema.search_fields, value);
                }
            } else if name == "date" {
                if let (Some(field), Ok(day)) = (
                    schema.date_field,
                    NaiveDate::parse_from_str(value, "%Y-%m-%d"),
                ) {
                    filter = filter.on_day(field, day);
                }
            } else if schema.filter_params.contains(&name)
                && !value.eq_ignore_ascii_case(ALL_SENTINEL)
            {
                filter = filter.eq(name, value);
            }
        }

        filter
    }
}
