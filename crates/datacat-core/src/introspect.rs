//! Catalog introspection over `pg_catalog`.
//!
//! All accessors are read-only projections recomputed on every call. Unknown
//! or inaccessible objects read as empty values, never as errors; the only
//! failure mode is the store call itself, which propagates unretried.
//!
//! Visibility is delegated to the store: a relation is browsable when it is
//! persistent, of a queryable kind (table, view, materialized view, foreign
//! table, partitioned table) and the connected role holds `SELECT` on it.
//! Reserved namespaces are excluded outright.

use sqlx::{PgPool, Row};

use crate::error::Result;
use crate::types::{ColumnEntry, SchemaEntry, TableEntry, TableSummary};

/// Namespaces never exposed to browsing, search or audits.
pub const RESERVED_SCHEMAS: [&str; 3] = ["information_schema", "pg_catalog", "topology"];

/// CTE selecting every persistent, queryable relation visible to the caller.
///
/// Shared by every query that scopes work to browsable tables. Reserved
/// namespaces are filtered at the call site so the exclusion list stays a
/// bound parameter.
pub(crate) const VISIBLE_TABLES_CTE: &str = "\
    SELECT nspname AS table_schema, relname AS table_name
    FROM pg_catalog.pg_class
             INNER JOIN pg_catalog.pg_namespace ON pg_class.relnamespace = pg_namespace.oid
    WHERE relpersistence = 'p'
      AND relkind IN ('r', 'v', 'm', 'f', 'p')
      AND has_table_privilege(pg_class.oid, 'select')";

/// CTE selecting the real columns of every queryable relation.
///
/// `attnum >= 1` keeps ordinary columns and drops system attributes; dropped
/// columns fall out of the `pg_type` join.
pub(crate) const TABLE_COLUMNS_CTE: &str = "\
    SELECT pg_namespace.nspname AS table_schema,
           pg_class.relname     AS table_name,
           attname              AS column_name,
           pg_type.typname      AS data_type,
           attnum               AS ordinal_position
    FROM pg_catalog.pg_attribute
             INNER JOIN pg_catalog.pg_class ON pg_attribute.attrelid = pg_class.oid
             INNER JOIN pg_catalog.pg_namespace ON pg_class.relnamespace = pg_namespace.oid
             INNER JOIN pg_catalog.pg_type ON pg_attribute.atttypid = pg_type.oid
    WHERE pg_class.relkind IN ('r', 'v', 'm', 'f', 'p')
      AND attnum >= 1";

/// List every visible schema with its tables, both ordered lexicographically.
///
/// A schema appears only if it owns at least one visible table. Schema and
/// table descriptions come from the native comment mechanism.
pub async fn list_schemas(db: &PgPool) -> Result<Vec<SchemaEntry>> {
    let sql = format!(
        "WITH tables AS ({VISIBLE_TABLES_CTE})
         SELECT table_schema AS schema_name,
                obj_description(to_regnamespace(quote_ident(table_schema)), 'pg_namespace')
                    AS schema_description,
                array_agg(table_name::text ORDER BY table_name) AS table_names,
                array_agg(obj_description(
                              to_regclass(quote_ident(table_schema) || '.' || quote_ident(table_name)),
                              'pg_class') ORDER BY table_name) AS table_comments
         FROM tables
         WHERE table_schema <> ALL($1)
         GROUP BY table_schema
         ORDER BY table_schema"
    );
    let rows = sqlx::query(&sql)
        .bind(&RESERVED_SCHEMAS[..])
        .fetch_all(db)
        .await?;

    let mut schemas = Vec::with_capacity(rows.len());
    for row in rows {
        let names: Vec<String> = row.get("table_names");
        let comments: Vec<Option<String>> = row.get("table_comments");
        let tables = names
            .into_iter()
            .zip(comments)
            .map(|(name, comment)| TableSummary { name, comment })
            .collect();
        schemas.push(SchemaEntry {
            name: row.get("schema_name"),
            description: row.get("schema_description"),
            tables,
        });
    }
    Ok(schemas)
}

/// List the columns of a table, ordered by ordinal position.
///
/// An unknown or inaccessible `(schema, table)` pair yields an empty list.
pub async fn list_columns(db: &PgPool, schema: &str, table: &str) -> Result<Vec<ColumnEntry>> {
    let sql = format!(
        "WITH columns AS ({TABLE_COLUMNS_CTE})
         SELECT column_name,
                data_type,
                ordinal_position,
                col_description(to_regclass(quote_ident($1) || '.' || quote_ident($2)),
                                ordinal_position) AS description
         FROM columns
         WHERE table_schema = $1
           AND table_name = $2
         ORDER BY ordinal_position"
    );
    let rows = sqlx::query(&sql)
        .bind(schema)
        .bind(table)
        .fetch_all(db)
        .await?;

    Ok(rows
        .iter()
        .map(|row| ColumnEntry {
            name: row.get("column_name"),
            data_type: row.get("data_type"),
            ordinal_position: row.get("ordinal_position"),
            comment: row.get("description"),
        })
        .collect())
}

/// Fetch a table's native comment.
///
/// An unknown table yields an entry with no comment.
pub async fn read_table_info(db: &PgPool, schema: &str, table: &str) -> Result<TableEntry> {
    let row = sqlx::query(
        "SELECT obj_description(to_regclass(quote_ident($1) || '.' || quote_ident($2)),
                                'pg_class') AS description",
    )
    .bind(schema)
    .bind(table)
    .fetch_one(db)
    .await?;

    Ok(TableEntry {
        schema: schema.to_string(),
        name: table.to_string(),
        comment: row.get("description"),
    })
}
