use selectast::{parse, Clause, Column, JoinType, Keyword, ParseError, Sort, Source};

#[test]
fn test_column_count_and_order() {
    let query = parse("SELECT c, a AS first, b \"second\", max(d) FROM t").unwrap();
    let names: Vec<&str> = query.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b", "max(d)"]);
    assert_eq!(query.columns[1].alias.as_deref(), Some("first"));
    assert_eq!(query.columns[2].alias.as_deref(), Some("\"second\""));
}

#[test]
fn test_optional_clauses_are_absent() {
    let query = parse("SELECT 1").unwrap();
    assert_eq!(query.columns, vec![Column::new("1", None)]);
    assert!(query.from_sources.is_none());
    assert!(query.joins.is_none());
    assert!(query.where_clauses.is_none());
    assert!(query.group_by_columns.is_none());
    assert!(query.having_clauses.is_none());
    assert!(query.sort_columns.is_none());
    assert!(query.limit.is_none());
    assert!(query.offset.is_none());
}

#[test]
fn test_multiline_statement() {
    let sql = "SELECT author.name, count(book.id), sum(book.cost)\n\
               FROM author\n\
               LEFT JOIN book ON (author.id = book.author_id)\n\
               WHERE book.cost >= 100\n\
               GROUP BY author.name\n\
               HAVING COUNT(*) > 1 AND SUM(book.cost) > 500\n\
               ORDER BY author.name DESC, book.id, book.cost ASC\n\
               LIMIT 10\n\
               OFFSET 2;";
    let query = parse(sql).unwrap();

    assert_eq!(query.columns.len(), 3);
    assert_eq!(query.from_sources, Some(vec![Source::new("author", None)]));
    let joins = query.joins.unwrap();
    assert_eq!(joins[0].join_type, JoinType::Left);
    assert_eq!(joins[0].source, Source::new("book", None));
    assert_eq!(
        joins[0].conditions,
        vec![Clause::new("(author.id = book.author_id)", None)]
    );
    assert_eq!(
        query.where_clauses,
        Some(vec![Clause::new("book.cost >= 100", None)])
    );
    assert_eq!(query.group_by_columns, Some(vec!["author.name".to_string()]));
    assert_eq!(
        query.having_clauses,
        Some(vec![
            Clause::new("COUNT(*) > 1", None),
            Clause::new("SUM(book.cost) > 500", Some("AND".to_string())),
        ])
    );
    assert_eq!(
        query.sort_columns,
        Some(vec![
            Sort::new("author.name", true),
            Sort::new("book.id", false),
            Sort::new("book.cost", false),
        ])
    );
    assert_eq!(query.limit, Some(10));
    assert_eq!(query.offset, Some(2));
}

#[test]
fn test_in_list_stays_one_clause() {
    let query =
        parse("SELECT * FROM book WHERE id IN (1, 2, 3) OR title = 'War and Peace'").unwrap();
    assert_eq!(
        query.where_clauses,
        Some(vec![
            Clause::new("id IN (1, 2, 3)", None),
            Clause::new("title = 'War and Peace'", Some("OR".to_string())),
        ])
    );
}

#[test]
fn test_errors_name_the_clause() {
    let cases = [
        ("SELECT a FROM t ORDER BY", "Error in ORDER clause: expression is empty"),
        ("SELECT a FROM t OFFSET x", "Error in OFFSET clause: x is not a valid integer"),
        ("SELECT a FROM t.* ", "Error in FROM clause: t.*"),
        ("SELECT a FROM t WHERE a = 1 AND", "Error in WHERE clause: empty condition in a = 1 AND"),
    ];
    for (sql, message) in cases {
        assert_eq!(parse(sql).unwrap_err().to_string(), message, "{sql}");
    }
}

#[test]
fn test_first_error_aborts() {
    assert_eq!(
        parse("SELECT a b c FROM t LIMIT x"),
        Err(ParseError::MalformedColumn("a b c".to_string()))
    );
    assert_eq!(
        parse("SELECT a FROM t GROUP BY a,,b"),
        Err(ParseError::EmptyListItem {
            clause: Keyword::Group,
            text: "a, , b".to_string()
        })
    );
}

#[test]
fn test_unbalanced_parentheses() {
    assert!(matches!(
        parse("SELECT count(a FROM t"),
        Err(ParseError::UnbalancedParentheses(_))
    ));
}

#[test]
fn test_unterminated_quote() {
    for sql in [
        "SELECT a FROM t WHERE x = 'abc AND b = 2 ORDER BY a",
        "SELECT a FROM t WHERE it's = 1 AND b = 2",
        "SELECT a FROM t WHERE x IN ('a, b) AND y = 1",
    ] {
        assert!(
            matches!(parse(sql), Err(ParseError::UnterminatedQuote(_))),
            "{sql}"
        );
    }
}

#[test]
fn test_bare_sort_direction() {
    assert_eq!(
        parse("SELECT a FROM t ORDER BY a, DESC"),
        Err(ParseError::EmptyListItem {
            clause: Keyword::Order,
            text: "a, DESC".to_string()
        })
    );
}

#[test]
fn test_parse_from_many_threads() {
    let statements = [
        "SELECT * FROM a",
        "SELECT x, y FROM b WHERE x > 1 AND y < 2",
        "SELECT z FROM c ORDER BY z DESC LIMIT 5",
    ];
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sql = statements[i % statements.len()];
                scope.spawn(move || parse(sql))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let query = handle.join().unwrap().unwrap();
            assert_eq!(query, parse(statements[i % statements.len()]).unwrap());
        }
    });
}
