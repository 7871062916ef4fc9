use super::PredicateRenderer;
use crate::predicate::CaseFolding;

/// SQLite renderer: numbered `?1, ?2, ...` placeholders.
///
/// SQLite's built-in `upper()` only maps ASCII letters, so LIKE patterns are folded the same
/// way: `lk_` stays case-insensitive for ASCII and matches other letters in their written case.
pub struct SqliteRenderer;

impl SqliteRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqliteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PredicateRenderer for SqliteRenderer {
    fn get_param_placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }

    fn case_folding(&self) -> CaseFolding {
        CaseFolding::Ascii
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterValue, TypedFilter};
    use crate::parser::FilterKind;
    use crate::predicate::AttributePath;

    #[test]
    fn test_numbered_placeholders() {
        let mut filter = TypedFilter::new(
            "updateDate",
            Some("2018-01-01 00:00:00bt2019-01-01 00:00:00|null".to_string()),
            FilterKind::Date,
        );
        filter.extract().unwrap();
        let predicate = filter
            .to_predicate(&AttributePath::new("updateDate", "update_date", None))
            .unwrap();
        let (sql, params) = SqliteRenderer::new().to_where_clause(&predicate);
        assert_eq!(
            sql,
            "(\"update_date\" BETWEEN ?1 AND ?2 OR \"update_date\" IS NULL)"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_like_pattern_folds_ascii_only() {
        let mut filter = TypedFilter::new("name", Some("lk_été*".to_string()), FilterKind::Text);
        filter.extract().unwrap();
        let predicate = filter.to_predicate(&AttributePath::field("name", None)).unwrap();
        let (sql, params) = SqliteRenderer::new().to_where_clause(&predicate);
        assert_eq!(sql, "UPPER(\"name\") LIKE ?1");
        assert_eq!(params, vec![FilterValue::Text("éTé%".to_string())]);
    }
}
