//! Table and column names for migrations, read from the SeaORM entities so
//! that the DDL and the models cannot drift apart.

use model::entities::prelude::*;
use sea_orm::entity::prelude::*;
use sea_orm::Iden;

/// Identifiers of an entity usable in `sea_query` statements.
pub trait EntityIden: EntityTrait {
    /// Table name without schema; the schema comes from the connection's search path.
    fn table() -> TableIden {
        TableIden(Self::default().table_name().to_string())
    }

    /// Column name as it is spelled in the database.
    fn column<C: ColumnTrait + Iden>(column: C) -> ColumnIden {
        let mut s = String::new();
        column.unquoted(&mut s);
        ColumnIden(s)
    }
}

impl EntityIden for UserUser {}
impl EntityIden for PosClient {}
impl EntityIden for UserUserGroups {}

/// Owned table name.
#[derive(Debug, Clone)]
pub struct TableIden(String);

impl Iden for TableIden {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = s.write_str(&self.0);
    }
}

/// Owned column name.
#[derive(Debug, Clone)]
pub struct ColumnIden(String);

impl Iden for ColumnIden {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = s.write_str(&self.0);
    }
}
