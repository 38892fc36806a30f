//! Renders filters into SQL over the `documents` table.
//!
//! Document fields are addressed with `json_extract(data, '$.field')`.
//! Every user-supplied value is bound as a parameter; field names come from
//! the static schema registry and are sanitized before being spliced into
//! the JSON path.

use crate::query::{Condition, Filter};

/// A WHERE-clause fragment with bound parameters.
///
/// Placeholders are numbered `?N` starting from the index passed to
/// [`render_filter`], so the fragment can be appended to a query that
/// already binds earlier parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL clause, without a leading `AND`.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<String>,
}

impl SqlFragment {
    fn empty() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Returns true if this fragment has no conditions.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Builds the JSON path expression for a document field.
///
/// Field names originate from the schema registry and are restricted to
/// alphanumerics; anything else is stripped so a path can never break out
/// of its quoting.
pub fn json_field(field: &str) -> String {
    let clean: String = field
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("json_extract(data, '$.{}')", clean)
}

/// Escapes LIKE wildcards in a search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Renders a filter to a WHERE fragment.
///
/// `start_index` is the number of the first placeholder to use (1-based,
/// counting placeholders already present in the outer query).
pub fn render_filter(filter: &Filter, start_index: usize) -> SqlFragment {
    let mut fragment = SqlFragment::empty();
    let mut clauses: Vec<String> = Vec::new();
    let mut next = start_index;

    for condition in filter.conditions() {
        match condition {
            Condition::Contains { fields, term } => {
                let escaped = format!("%{}%", escape_like(&term.to_lowercase()));
                let alternatives: Vec<String> = fields
                    .iter()
                    .map(|field| {
                        let clause = format!(
                            "LOWER(CAST(COALESCE({}, '') AS TEXT)) LIKE ?{} ESCAPE '\\'",
                            json_field(field),
                            next
                        );
                        fragment.params.push(escaped.clone());
                        next += 1;
                        clause
                    })
                    .collect();
                clauses.push(format!("({})", alternatives.join(" OR ")));
            }
            Condition::Eq { field, value } => {
                clauses.push(format!(
                    "CAST({} AS TEXT) = ?{}",
                    json_field(field),
                    next
                ));
                fragment.params.push(value.clone());
                next += 1;
            }
            Condition::EqFold { field, value } => {
                clauses.push(format!(
                    "LOWER(CAST({} AS TEXT)) = LOWER(?{})",
                    json_field(field),
                    next
                ));
                fragment.params.push(value.clone());
                next += 1;
            }
            Condition::Range { field, start, end } => {
                let path = json_field(field);
                clauses.push(format!(
                    "(CAST({} AS TEXT) >= ?{} AND CAST({} AS TEXT) < ?{})",
                    path,
                    next,
                    path,
                    next + 1
                ));
                fragment.params.push(start.clone());
                fragment.params.push(end.clone());
                next += 2;
            }
        }
    }

    fragment.sql = clauses.join(" AND ");
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Filter;

    #[test]
    fn test_empty_filter_renders_empty() {
        let fragment = render_filter(&Filter::empty(), 2);
        assert!(fragment.is_empty());
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_eq_condition() {
        let filter = Filter::empty().eq("status", "scheduled");
        let fragment = render_filter(&filter, 2);
        assert_eq!(
            fragment.sql,
            "CAST(json_extract(data, '$.status') AS TEXT) = ?2"
        );
        assert_eq!(fragment.params, vec!["scheduled"]);
    }

    #[test]
    fn test_contains_ors_across_fields() {
        let filter = Filter::empty().contains(&["firstName", "lastName"], "Smi");
        let fragment = render_filter(&filter, 2);
        assert!(fragment.sql.contains(" OR "));
        assert_eq!(fragment.params, vec!["%smi%", "%smi%"]);
        assert!(fragment.sql.contains("?2"));
        assert!(fragment.sql.contains("?3"));
    }

    #[test]
    fn test_range_uses_two_params() {
        let filter = Filter::empty().on_day("date", "2026-03-15".parse().unwrap());
        let fragment = render_filter(&filter, 2);
        assert_eq!(fragment.params, vec!["2026-03-15", "2026-03-16"]);
        assert!(fragment.sql.contains(">= ?2"));
        assert!(fragment.sql.contains("< ?3"));
    }

    #[test]
    fn test_conditions_joined_with_and() {
        let filter = Filter::empty().eq("status", "open").eq("category", "care");
        let fragment = render_filter(&filter, 1);
        assert!(fragment.sql.contains(" AND "));
        assert_eq!(fragment.params.len(), 2);
    }

    #[test]
    fn test_like_wildcards_escaped() {
        let filter = Filter::empty().contains(&["name"], "100%");
        let fragment = render_filter(&filter, 1);
        assert_eq!(fragment.params, vec!["%100\\%%"]);
    }

    #[test]
    fn test_json_field_sanitizes() {
        assert_eq!(
            json_field("first'Name"),
            "json_extract(data, '$.firstName')"
        );
    }
}
