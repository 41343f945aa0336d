use std::fmt;

use serde::Serialize;

/// Root of a parsed SELECT statement.
///
/// Optional clauses that did not appear in the statement are `None`, never
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectQuery {
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_sources: Option<Vec<Source>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joins: Option<Vec<Join>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_clauses: Option<Vec<Clause>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub having_clauses: Option<Vec<Clause>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_columns: Option<Vec<Sort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub alias: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Column {
            name: name.into(),
            alias,
        }
    }
}

/// A table, qualified table name or parenthesized sub-query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub table: String,
    pub alias: Option<String>,
}

impl Source {
    pub fn new(table: impl Into<String>, alias: Option<String>) -> Self {
        Source {
            table: table.into(),
            alias,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinType {
    #[serde(rename = "INNER JOIN")]
    Inner,
    #[serde(rename = "LEFT JOIN")]
    Left,
    #[serde(rename = "RIGHT JOIN")]
    Right,
    #[serde(rename = "FULL JOIN")]
    Full,
}

impl JoinType {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    #[serde(rename = "type")]
    pub join_type: JoinType,
    pub source: Source,
    pub conditions: Vec<Clause>,
}

/// One predicate fragment of a WHERE, HAVING or ON list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub condition: String,
    /// `AND`/`OR` as written before this fragment; `None` for the first.
    pub operator: Option<String>,
}

impl Clause {
    pub fn new(condition: impl Into<String>, operator: Option<String>) -> Self {
        Clause {
            condition: condition.into(),
            operator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub expression: String,
    pub desc: bool,
}

impl Sort {
    pub fn new(expression: impl Into<String>, desc: bool) -> Self {
        Sort {
            expression: expression.into(),
            desc,
        }
    }
}

/// Collects clause parser output while a statement is segmented.
#[derive(Debug, Default)]
pub struct SelectQueryBuilder {
    columns: Option<Vec<Column>>,
    from_sources: Option<Vec<Source>>,
    joins: Option<Vec<Join>>,
    where_clauses: Option<Vec<Clause>>,
    group_by_columns: Option<Vec<String>>,
    having_clauses: Option<Vec<Clause>>,
    sort_columns: Option<Vec<Sort>>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl SelectQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&mut self, columns: Vec<Column>) {
        self.columns = Some(columns);
    }

    pub fn from_sources(&mut self, sources: Vec<Source>) {
        self.from_sources = Some(sources);
    }

    pub fn push_join(&mut self, join: Join) {
        self.joins.get_or_insert_with(Vec::new).push(join);
    }

    pub fn where_clauses(&mut self, clauses: Vec<Clause>) {
        self.where_clauses = Some(clauses);
    }

    pub fn group_by_columns(&mut self, columns: Vec<String>) {
        self.group_by_columns = Some(columns);
    }

    pub fn having_clauses(&mut self, clauses: Vec<Clause>) {
        self.having_clauses = Some(clauses);
    }

    pub fn sort_columns(&mut self, sorts: Vec<Sort>) {
        self.sort_columns = Some(sorts);
    }

    pub fn limit(&mut self, limit: Option<i64>) {
        self.limit = limit;
    }

    pub fn offset(&mut self, offset: Option<i64>) {
        self.offset = offset;
    }

    /// Returns `None` when no column was ever selected.
    pub fn build(self) -> Option<SelectQuery> {
        let columns = self.columns.filter(|c| !c.is_empty())?;
        Some(SelectQuery {
            columns,
            from_sources: self.from_sources,
            joins: self.joins,
            where_clauses: self.where_clauses,
            group_by_columns: self.group_by_columns,
            having_clauses: self.having_clauses,
            sort_columns: self.sort_columns,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SelectQuery {
        let mut builder = SelectQueryBuilder::new();
        builder.columns(vec![Column::new("*", None)]);
        builder.from_sources(vec![Source::new("author", Some("a".into()))]);
        builder.push_join(Join {
            join_type: JoinType::Left,
            source: Source::new("book", None),
            conditions: vec![Clause::new("a.id = book.author_id", None)],
        });
        builder.limit(Some(5));
        builder.build().unwrap()
    }

    #[test]
    fn test_builder_requires_columns() {
        assert!(SelectQueryBuilder::new().build().is_none());

        let mut builder = SelectQueryBuilder::new();
        builder.columns(Vec::new());
        assert!(builder.build().is_none());
    }

    #[test]
    fn test_builder_appends_joins() {
        let mut builder = SelectQueryBuilder::new();
        builder.columns(vec![Column::new("a", None)]);
        for table in ["b", "c"] {
            builder.push_join(Join {
                join_type: JoinType::Inner,
                source: Source::new(table, None),
                conditions: Vec::new(),
            });
        }
        let query = builder.build().unwrap();
        assert_eq!(query.joins.map(|j| j.len()), Some(2));
        assert!(query.where_clauses.is_none());
    }

    #[test]
    fn test_json_rendering_omits_absent_clauses() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["columns"][0]["name"], "*");
        assert!(value["columns"][0]["alias"].is_null());
        assert_eq!(value["fromSources"][0]["alias"], "a");
        assert_eq!(value["joins"][0]["type"], "LEFT JOIN");
        assert_eq!(value["limit"], 5);
        assert!(value.get("whereClauses").is_none());
        assert!(value.get("offset").is_none());
    }

    #[test]
    fn test_display_is_pretty_json() {
        let rendered = sample().to_string();
        assert!(rendered.starts_with("{\n"));
        assert!(rendered.contains("\"fromSources\""));
        assert!(rendered.contains("\"LEFT JOIN\""));
    }

    #[test]
    fn test_join_type_display() {
        assert_eq!(JoinType::Full.to_string(), "FULL JOIN");
        assert_eq!(JoinType::Inner.as_str(), "INNER JOIN");
    }
}
