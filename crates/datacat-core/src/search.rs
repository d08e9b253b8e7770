//! Ranked free-text search over the merged catalog metadata.
//!
//! One weighted document is built per visible table, fresh on every call:
//! table name and native comment carry the highest weight, the annotation's
//! long description the next, column names and column comments the lowest
//! used tier. Parsing, stemming and ranking are delegated to the store's
//! text-search engine, so the single configured language profile applies to
//! documents and queries alike. Nothing is precomputed or cached.

use sqlx::{PgPool, Row};

use crate::error::Result;
use crate::introspect::{RESERVED_SCHEMAS, TABLE_COLUMNS_CTE, VISIBLE_TABLES_CTE};
use crate::types::SearchResult;

/// Default text-search language profile.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Default tier weights, ordered lowest tier first (D, C, B, A).
pub const DEFAULT_TIER_WEIGHTS: [f32; 4] = [0.2, 0.5, 0.7, 1.0];

/// Maximum number of results returned per query. No pagination.
pub const RESULT_LIMIT: i64 = 20;

/// Search configuration: language profile and tier weights.
///
/// The weight vector follows the store convention of lowest tier first. Tier
/// A covers table identity (name and comment), tier B the long description,
/// tier C column names and comments; tier D is reserved and unused by
/// default. A profile mismatched to the stored text degrades recall silently
/// rather than erroring.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Natural-language profile applied to documents and queries.
    pub language: String,
    /// Weights for the four importance tiers, ordered D, C, B, A.
    pub tier_weights: [f32; 4],
}

impl SearchConfig {
    /// Create a configuration for the given language profile.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            tier_weights: DEFAULT_TIER_WEIGHTS,
        }
    }

    /// Set the tier weights (ordered D, C, B, A).
    pub fn with_tier_weights(mut self, weights: [f32; 4]) -> Self {
        self.tier_weights = weights;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// Rank every visible table against a web-search query.
///
/// The query uses the web search grammar: space-separated terms are ANDed,
/// quoted substrings are exact phrases, a leading minus excludes a term, and
/// `or`/`OR` alternates. Returns at most [`RESULT_LIMIT`] results, best
/// first, ties broken by ascending `(schema, table)`. A query the grammar
/// cannot use (blank, or nothing but stopwords) yields an empty result set,
/// not an error.
pub async fn search(db: &PgPool, config: &SearchConfig, query: &str) -> Result<Vec<SearchResult>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "WITH tables AS ({VISIBLE_TABLES_CTE}),
              columns AS ({TABLE_COLUMNS_CTE})
         SELECT table_schema, table_name, table_comment,
                ts_rank($1::real[], vector, query) AS rank
         FROM (SELECT *,
                      setweight(to_tsvector($2::regconfig, table_name), 'A') ||
                      setweight(to_tsvector($2::regconfig, table_comment), 'A') ||
                      setweight(to_tsvector($2::regconfig, description_long), 'B') ||
                      setweight(to_tsvector($2::regconfig, column_names), 'C') ||
                      setweight(to_tsvector($2::regconfig, column_comments), 'C') AS vector
               FROM (SELECT tables.table_schema,
                            tables.table_name,
                            coalesce(obj_description(
                                         to_regclass(quote_ident(tables.table_schema) || '.' ||
                                                     quote_ident(tables.table_name)),
                                         'pg_class'), '')              AS table_comment,
                            coalesce(cat.description_long, '')         AS description_long,
                            coalesce(string_agg(column_name, ' '), '') AS column_names,
                            coalesce(string_agg(column_comment, ' '), '') AS column_comments
                     FROM tables
                              LEFT JOIN public.datacat cat
                                        ON tables.table_schema = cat.table_schema
                                            AND tables.table_name = cat.table_name
                              CROSS JOIN LATERAL (
                                  SELECT column_name,
                                         col_description(
                                             to_regclass(quote_ident(columns.table_schema) || '.' ||
                                                         quote_ident(columns.table_name)),
                                             ordinal_position) AS column_comment
                                  FROM columns
                                  WHERE columns.table_schema = tables.table_schema
                                    AND columns.table_name = tables.table_name
                                  ) AS columns
                     WHERE tables.table_schema <> ALL($4)
                     GROUP BY tables.table_schema, tables.table_name, description_long
                    ) AS table_documents
              ) AS table_vectors,
              websearch_to_tsquery($2::regconfig, $3) AS query
         WHERE vector @@ query
         ORDER BY rank DESC, table_schema, table_name
         LIMIT {RESULT_LIMIT}"
    );
    let rows = sqlx::query(&sql)
        .bind(&config.tier_weights[..])
        .bind(&config.language)
        .bind(query)
        .bind(&RESERVED_SCHEMAS[..])
        .fetch_all(db)
        .await?;

    let results: Vec<SearchResult> = rows
        .iter()
        .map(|row| {
            let comment: String = row.get("table_comment");
            SearchResult {
                schema: row.get("table_schema"),
                table: row.get("table_name"),
                comment: (!comment.is_empty()).then_some(comment),
                rank: row.get("rank"),
            }
        })
        .collect();
    tracing::debug!(results = results.len(), "search complete");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert_eq!(config.tier_weights, DEFAULT_TIER_WEIGHTS);
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::new("french").with_tier_weights([0.2, 0.5, 0.7, 1.3]);
        assert_eq!(config.language, "french");
        assert_eq!(config.tier_weights, [0.2, 0.5, 0.7, 1.3]);
    }

    #[tokio::test]
    async fn test_blank_query_short_circuits() {
        // A lazy pool never dials, so a blank query must not reach the store.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        let config = SearchConfig::default();

        let results = search(&pool, &config, "").await.unwrap();
        assert!(results.is_empty());

        let results = search(&pool, &config, "   \t ").await.unwrap();
        assert!(results.is_empty());
    }
}
