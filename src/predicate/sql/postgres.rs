use super::PredicateRenderer;

/// PostgreSQL renderer: `$1, $2, ...` placeholders.
pub struct PostgresRenderer;

impl PostgresRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PostgresRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PredicateRenderer for PostgresRenderer {
    fn get_param_placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterValue, TypedFilter};
    use crate::parser::FilterKind;
    use crate::predicate::{AttributeContext, AttributePath, Predicate};

    fn field_predicate(name: &str, raw: &str, kind: FilterKind) -> Predicate {
        let mut filter = TypedFilter::new(name, Some(raw.to_string()), kind);
        filter.extract().unwrap();
        filter.to_predicate(&AttributePath::field(name, None)).unwrap()
    }

    #[test]
    fn test_like_and_not_null() {
        let predicate = Predicate::all_of(vec![
            field_predicate("key", "lk_abc*", FilterKind::Text),
            field_predicate("value", "not_null", FilterKind::Text),
        ]);
        let (sql, params) = PostgresRenderer::new().to_where_clause(&predicate);
        assert_eq!(sql, "(UPPER(\"key\") LIKE $1 AND \"value\" IS NOT NULL)");
        assert_eq!(params, vec![FilterValue::Text("ABC%".to_string())]);
    }

    #[test]
    fn test_negated_values_use_negated_operators() {
        let predicate = field_predicate(
            "insertDate",
            "not_gt2019-01-01 00:00:00|not_2018-01-01 00:00:00bt2019-01-01 00:00:00|not_lt2017-01-01 00:00:00",
            FilterKind::Date,
        );
        let (sql, params) = PostgresRenderer::new().to_where_clause(&predicate);
        assert_eq!(
            sql,
            "(\"insertDate\" <= $1 OR \"insertDate\" NOT BETWEEN $2 AND $3 OR \"insertDate\" >= $4)"
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_in_list_and_qualifier() {
        let mut filter = TypedFilter::new("size", Some("1|2".to_string()), FilterKind::Number);
        filter.extract().unwrap();
        let context = AttributeContext::new("c");
        let predicate = filter
            .to_predicate(&AttributePath::new("size", "size", Some(&context)))
            .unwrap();
        let (sql, params) = PostgresRenderer::new().to_where_clause(&predicate);
        assert_eq!(sql, "\"c\".\"size\" IN ($1, $2)");
        assert_eq!(params, vec![FilterValue::Integer(1), FilterValue::Integer(2)]);
    }

    #[test]
    fn test_mixed_equalities() {
        let predicate = field_predicate("login", "admin|not_guest", FilterKind::Token);
        let (sql, _) = PostgresRenderer::new().to_where_clause(&predicate);
        assert_eq!(sql, "(\"login\" = $1 OR \"login\" != $2)");
    }
}
