use rusqlite::{Params, Row, Statement};

/// Maps one result row onto a model by column name.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    fn query_all<P: Params>(stmt: &mut Statement<'_>, params: P) -> rusqlite::Result<Vec<Self>> {
        stmt.query_map(params, |row| Self::from_row(row))?.collect()
    }
}
