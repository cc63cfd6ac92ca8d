use super::Field;

use indexmap::IndexMap;

/// SQL statements derived from a schema. Identifiers are backtick-quoted and
/// every value is a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub select: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
    pub create_table: String,
}

/// Renders `n` comma-separated `?` placeholders.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn quote(ident: &str) -> String {
    format!("`{ident}`")
}

impl Templates {
    pub(super) fn new(
        table_name: &str,
        fields: &[String],
        primary_key: &str,
        mapping: &IndexMap<String, Field>,
    ) -> Self {
        let table = quote(table_name);
        let pk = quote(primary_key);

        let all = fields
            .iter()
            .map(String::as_str)
            .chain(Some(primary_key))
            .map(quote)
            .collect::<Vec<_>>();

        let select = format!("select {} from {table}", all.join(", "));

        let insert = format!(
            "insert into {table} ({}) values ({})",
            all.join(", "),
            placeholders(all.len())
        );

        let assignments = fields
            .iter()
            .map(|name| format!("{} = ?", quote(name)))
            .collect::<Vec<_>>();
        let update = format!(
            "update {table} set {} where {pk} = ?",
            assignments.join(", ")
        );

        let delete = format!("delete from {table} where {pk} = ?");

        let mut columns = fields
            .iter()
            .map(String::as_str)
            .chain(Some(primary_key))
            .map(|name| format!("{} {}", quote(name), mapping[name].column_type))
            .collect::<Vec<_>>();
        columns.push(format!("primary key ({pk})"));
        let create_table = format!(
            "create table if not exists {table} ({})",
            columns.join(", ")
        );

        Self {
            select,
            insert,
            update,
            delete,
            create_table,
        }
    }
}
