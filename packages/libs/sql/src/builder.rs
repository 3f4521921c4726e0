//! DML 문장 빌더
//!
//! select/insert/update/delete 파라미터를 `{sql, params}` 문장으로
//! 컴파일합니다. WHERE 문법은 재귀적이며, JOIN의 ON 절과 서브쿼리에서도
//! 동일한 컴파일러가 그대로 재사용됩니다.
//!
//! 토큰/표현식 variant 매칭은 exhaustive합니다. 자리에 맞지 않는
//! 토큰(예: 컬럼 문맥 없는 스칼라 `not()`)은 조용히 넘어가지 않고
//! `MisplacedToken` 에러로 전파됩니다.

use serde_json::Value;
use tracing::debug;

use qk_core::expr::{Expr, FieldCond};
use qk_core::token::{Comparison, FuncArg, FuncCall, NotTarget, Token};
use qk_core::{Error, Result};

use crate::params::{
    ColumnQuery, DeleteParams, DuplicateKey, InsertParams, SelectColumn, SelectParams, SetValue,
    UpdateParams,
};
use crate::writer::{Dialect, SqlWriter, Statement};

// ─────────────────────────────────────────────────────────────────────────────
// Token Compiler
// ─────────────────────────────────────────────────────────────────────────────

/// 값/식별자 자리의 토큰을 렌더링합니다.
///
/// 비교/부정 토큰은 컬럼 문맥이 있어야만 의미가 있으므로 이 자리에
/// 오면 에러입니다.
fn write_token(w: &mut SqlWriter, token: &Token) -> Result<()> {
    match token {
        Token::Identifier(name) => {
            w.ident(name);
        }
        Token::Literal(value) => {
            w.bind(value.clone());
        }
        Token::Raw { sql, params } => {
            w.raw(sql, params);
        }
        Token::Func(func) => write_func(w, func)?,
        Token::Math(op) => {
            w.push(op.symbol());
        }
        Token::Logical(op) => {
            w.push(op.keyword());
        }
        Token::Comparison(_) | Token::Not(_) => {
            return Err(Error::MisplacedToken { kind: token.kind() });
        }
    }
    Ok(())
}

fn write_func(w: &mut SqlWriter, func: &FuncCall) -> Result<()> {
    // 일부 엔진은 CURRENT_TIMESTAMP에 괄호를 허용하지 않습니다.
    if func.is_bare_keyword() {
        w.push(&func.name);
        return Ok(());
    }
    w.push(&func.name);
    w.open_group();
    w.join(&func.args, ", ", |w, arg| {
        match arg {
            FuncArg::Column(name) => {
                w.ident(name);
            }
            FuncArg::Value(value) => {
                w.bind(value.clone());
            }
        }
        Ok(())
    })?;
    w.close_group();
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Where Compiler
// ─────────────────────────────────────────────────────────────────────────────

fn write_where_element(w: &mut SqlWriter, expr: &Expr) -> Result<()> {
    match expr {
        Expr::Value(value) => {
            w.bind(value.clone());
            Ok(())
        }
        Expr::Token(Token::Not(target)) => write_standalone_not(w, target),
        // 시퀀스 안의 bare 비교 토큰은 연산자 태그 그대로 렌더링됩니다
        // (앞 원소가 좌변을 만듭니다: `[ident("name"), like("%x%")]`)
        Expr::Token(Token::Comparison(cmp)) => write_comparison(w, cmp, false),
        Expr::Token(token) => write_token(w, token),
        Expr::Map(map) => {
            if map.is_empty() {
                return Ok(());
            }
            w.open_group();
            let pairs: Vec<(&String, &FieldCond)> = map.iter().collect();
            w.join(&pairs, " AND ", |w, (column, cond)| {
                write_field_cond(w, column, cond)
            })?;
            w.close_group();
            Ok(())
        }
        Expr::Seq(items) => {
            if expr.is_noop() {
                return Ok(());
            }
            let live: Vec<&Expr> = items.iter().filter(|e| !e.is_noop()).collect();
            w.open_group();
            w.join(&live, " ", |w, e| write_where_element(w, e))?;
            w.close_group();
            Ok(())
        }
    }
}

/// 매핑의 한 쌍 (`column → cond`)을 렌더링합니다.
fn write_field_cond(w: &mut SqlWriter, column: &str, cond: &FieldCond) -> Result<()> {
    match cond {
        FieldCond::Value(Value::Null) => {
            w.ident(column).push(" IS NULL");
            Ok(())
        }
        FieldCond::Value(value) => {
            w.ident(column).push(" = ").bind(value.clone());
            Ok(())
        }
        FieldCond::Comparison(cmp) => {
            w.ident(column).push(" ");
            write_comparison(w, cmp, false)
        }
        FieldCond::Not(target) => write_negated_field(w, column, target),
    }
}

/// 연산자 태그 기준 비교 렌더링 (`LIKE ?`, `IN (?, ?)`, ...)
///
/// 좌변은 호출자가 이미 만든 상태입니다. 리스트형 조건(`IN`/`BETWEEN`)은
/// 텍스트 좌→우 순서 그대로 파라미터를 바인딩합니다.
fn write_comparison(w: &mut SqlWriter, cmp: &Comparison, negated: bool) -> Result<()> {
    match cmp {
        Comparison::In(values) => {
            w.push(if negated { "NOT IN " } else { "IN " });
            w.open_group();
            w.join(values, ", ", |w, value| {
                w.bind(value.clone());
                Ok(())
            })?;
            w.close_group();
        }
        Comparison::Between(low, high) => {
            w.push("BETWEEN ")
                .bind(low.clone())
                .push(" AND ")
                .bind(high.clone());
        }
        Comparison::Like(pattern) => {
            w.push(if negated { "NOT LIKE " } else { "LIKE " })
                .bind(pattern.clone());
        }
        Comparison::Eq(value)
        | Comparison::Ne(value)
        | Comparison::Lt(value)
        | Comparison::Lte(value)
        | Comparison::Gt(value)
        | Comparison::Gte(value) => {
            w.push(cmp.operator()).push(" ").bind(value.clone());
        }
    }
    Ok(())
}

/// `column → not(...)` 렌더링
///
/// - 스칼라: `column != ?` (null은 `column IS NOT NULL`)
/// - 비교: rewrite 테이블에 있는 연산자만 부정 가능 (`NOT LIKE`/`NOT IN`)
/// - 중첩 표현식: 컬럼 키를 버리고 `!(...)`를 렌더링합니다
fn write_negated_field(w: &mut SqlWriter, column: &str, target: &NotTarget) -> Result<()> {
    match target {
        NotTarget::Value(Value::Null) => {
            w.ident(column).push(" IS NOT NULL");
            Ok(())
        }
        NotTarget::Value(value) => {
            w.ident(column).push(" != ").bind(value.clone());
            Ok(())
        }
        NotTarget::Comparison(cmp) => {
            if cmp.negated_operator().is_none() {
                return Err(Error::UnsupportedNegation {
                    operator: cmp.operator(),
                });
            }
            w.ident(column).push(" ");
            write_comparison(w, cmp, true)
        }
        NotTarget::Expr(expr) => write_not_expr(w, expr),
    }
}

/// 컬럼 문맥 없는 `not(...)`. 중첩 표현식만 허용됩니다.
fn write_standalone_not(w: &mut SqlWriter, target: &NotTarget) -> Result<()> {
    match target {
        NotTarget::Expr(expr) => write_not_expr(w, expr),
        NotTarget::Value(_) | NotTarget::Comparison(_) => {
            Err(Error::MisplacedToken { kind: "not" })
        }
    }
}

fn write_not_expr(w: &mut SqlWriter, expr: &Expr) -> Result<()> {
    w.push("!");
    match expr {
        // 매핑/시퀀스는 스스로 괄호를 만듭니다
        Expr::Map(_) | Expr::Seq(_) if !expr.is_noop() => write_where_element(w, expr),
        _ => {
            w.open_group();
            write_where_element(w, expr)?;
            w.close_group();
            Ok(())
        }
    }
}

/// `WHERE` 키워드를 포함한 절 전체.
///
/// 조건이 없거나 no-op이면 키워드 자체가 생략됩니다.
fn write_where_clause(w: &mut SqlWriter, condition: &Option<Expr>) -> Result<()> {
    if let Some(expr) = condition {
        if !expr.is_noop() {
            w.push(" WHERE ");
            write_where_element(w, expr)?;
        }
    }
    Ok(())
}

fn write_joins(w: &mut SqlWriter, joins: &[crate::params::Join]) -> Result<()> {
    for join in joins {
        w.push(" ").push(join.kind.keyword()).push(" JOIN ");
        w.ident(&join.table);
        if let Some(alias) = &join.alias {
            w.push(" AS ").ident(alias);
        }
        if let Some(on) = &join.on {
            if !on.is_noop() {
                w.push(" ON ");
                write_where_element(w, on)?;
            }
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Select
// ─────────────────────────────────────────────────────────────────────────────

/// SELECT 문 빌더
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectBuilder {
    dialect: Dialect,
}

impl SelectBuilder {
    /// 새 빌더
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// SELECT 문 컴파일
    pub fn build(&self, params: &SelectParams) -> Result<Statement> {
        debug!(table = %params.table, "building select statement");

        let mut w = SqlWriter::new(self.dialect);
        w.push("SELECT ");
        if params.distinct {
            w.push("DISTINCT ");
        }
        if params.columns.is_empty() {
            w.push("*");
        } else {
            w.join(&params.columns, ", ", write_select_column)?;
        }
        w.push(" FROM ").ident(&params.table);
        if let Some(alias) = &params.alias {
            w.push(" AS ").ident(alias);
        }
        write_joins(&mut w, &params.joins)?;
        write_where_clause(&mut w, &params.r#where)?;
        if !params.order_by.is_empty() {
            w.push(" ORDER BY ");
            w.join(&params.order_by, ", ", |w, order| {
                w.ident(&order.column).push(" ").push(order.order.keyword());
                Ok(())
            })?;
        }
        if let Some(limit) = params.limit {
            w.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = params.offset {
            w.push(&format!(" OFFSET {offset}"));
        }
        Ok(w.finish())
    }
}

fn write_select_column(w: &mut SqlWriter, column: &SelectColumn) -> Result<()> {
    match column {
        SelectColumn::Name(name) => {
            w.ident(name);
        }
        SelectColumn::Aliased { column, alias } => {
            w.ident(column).push(" AS ").ident(alias);
        }
        SelectColumn::Query { query, alias } => {
            match query {
                ColumnQuery::Func(func) => write_func(w, func)?,
                ColumnQuery::Select(inner) => {
                    // 서브쿼리는 같은 방언으로 독립 컴파일한 뒤
                    // raw 조각으로 붙입니다. 파라미터 정렬은 raw가
                    // 보존합니다.
                    let stmt = SelectBuilder::new(w.dialect()).build(inner)?;
                    w.open_group();
                    w.raw(&stmt.sql, &stmt.params);
                    w.close_group();
                }
            }
            if let Some(alias) = alias {
                w.push(" AS ").ident(alias);
            }
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Insert
// ─────────────────────────────────────────────────────────────────────────────

/// INSERT 문 빌더
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertBuilder {
    dialect: Dialect,
}

impl InsertBuilder {
    /// 새 빌더
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// INSERT 문 컴파일
    ///
    /// 컬럼 목록은 모든 레코드 키의 합집합(첫 등장 순서)이며, 어떤
    /// 레코드에 없는 컬럼은 `NULL`로 바인딩됩니다.
    pub fn build(&self, params: &InsertParams) -> Result<Statement> {
        debug!(table = %params.table, records = params.records.len(), "building insert statement");

        let mut columns: Vec<&str> = Vec::new();
        for record in &params.records {
            for key in record.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
        if columns.is_empty() {
            return Err(Error::EmptyInsert);
        }

        let mut w = SqlWriter::new(self.dialect);
        w.push("INSERT INTO ").ident(&params.table).push(" ");
        w.open_group();
        w.join(&columns, ", ", |w, column| {
            w.ident(column);
            Ok(())
        })?;
        w.close_group();
        w.push(" VALUES ");
        w.join(&params.records, ", ", |w, record| {
            w.open_group();
            w.join(&columns, ", ", |w, column| {
                w.bind(record.get(*column).cloned().unwrap_or(Value::Null));
                Ok(())
            })?;
            w.close_group();
            Ok(())
        })?;

        match &params.on_duplicate {
            DuplicateKey::Error => {}
            // 기본키를 자기 자신에 대입하는 no-op 갱신으로 중복 키
            // 에러를 억제합니다
            DuplicateKey::Ignore { pk } => {
                w.push(" ON DUPLICATE KEY UPDATE ");
                w.ident(pk).push(" = ").ident(pk);
            }
            DuplicateKey::Update(assignments) => {
                w.push(" ON DUPLICATE KEY UPDATE ");
                let pairs: Vec<(&String, &Value)> = assignments.iter().collect();
                w.join(&pairs, ", ", |w, (column, value)| {
                    w.ident(column).push(" = ").bind((*value).clone());
                    Ok(())
                })?;
            }
        }
        Ok(w.finish())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Update
// ─────────────────────────────────────────────────────────────────────────────

/// UPDATE 문 빌더
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateBuilder {
    dialect: Dialect,
}

impl UpdateBuilder {
    /// 새 빌더
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// UPDATE 문 컴파일
    pub fn build(&self, params: &UpdateParams) -> Result<Statement> {
        debug!(table = %params.table, "building update statement");

        let mut w = SqlWriter::new(self.dialect);
        w.push("UPDATE ").ident(&params.table);
        write_joins(&mut w, &params.joins)?;
        w.push(" SET ");
        let pairs: Vec<(&String, &SetValue)> = params.set.iter().collect();
        w.join(&pairs, ", ", |w, (column, value)| {
            w.ident(column).push(" = ");
            match value {
                SetValue::Value(v) => {
                    w.bind(v.clone());
                    Ok(())
                }
                SetValue::Token(token) => write_token(w, token),
            }
        })?;
        write_where_clause(&mut w, &params.r#where)?;
        Ok(w.finish())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────────────────

/// DELETE 문 빌더
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteBuilder {
    dialect: Dialect,
}

impl DeleteBuilder {
    /// 새 빌더
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// DELETE 문 컴파일
    pub fn build(&self, params: &DeleteParams) -> Result<Statement> {
        debug!(table = %params.table, "building delete statement");

        let mut w = SqlWriter::new(self.dialect);
        w.push("DELETE FROM ").ident(&params.table);
        write_joins(&mut w, &params.joins)?;
        write_where_clause(&mut w, &params.r#where)?;
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Join, OrderBy};
    use indexmap::IndexMap;
    use qk_core::token::{
        between, eq, gt, ident, in_array, like, not, raw, LogicalOp, MathOp,
    };
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_select_star_without_where() {
        let stmt = SelectBuilder::default()
            .build(&SelectParams::new("user"))
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM \"user\"");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_select_with_between_where() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("id", between(18, 100))])),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"user\" WHERE (\"id\" BETWEEN ? AND ?)"
        );
        assert_eq!(stmt.params, vec![json!(18), json!(100)]);
    }

    #[test]
    fn test_empty_where_map_suppresses_keyword() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map(Vec::<(String, FieldCond)>::new())),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert!(!stmt.sql.contains("WHERE"));
    }

    #[test]
    fn test_map_pairs_joined_with_and() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([
                ("fname", FieldCond::from("Bob")),
                ("active", FieldCond::from(true)),
            ])),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"user\" WHERE (\"fname\" = ? AND \"active\" = ?)"
        );
        assert_eq!(stmt.params, vec![json!("Bob"), json!(true)]);
    }

    #[test]
    fn test_null_compiles_to_is_null() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("deleted_at", Value::Null)])),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert!(stmt.sql.ends_with("WHERE (\"deleted_at\" IS NULL)"));
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_not_null_compiles_to_is_not_null() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("deleted_at", not(Value::Null))])),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert!(stmt.sql.ends_with("WHERE (\"deleted_at\" IS NOT NULL)"));
    }

    #[test]
    fn test_negation_forms() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([
                ("age", FieldCond::from(not(5))),
                ("name", not(like("%bot%")).into()),
                ("status", not(in_array(["a", "b"])).into()),
            ])),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert!(stmt.sql.contains("\"age\" != ?"));
        assert!(stmt.sql.contains("\"name\" NOT LIKE ?"));
        assert!(stmt.sql.contains("\"status\" NOT IN (?, ?)"));
        assert_eq!(
            stmt.params,
            vec![json!(5), json!("%bot%"), json!("a"), json!("b")]
        );
    }

    #[test]
    fn test_unsupported_negation_is_error() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("age", not(gt(5)))])),
            ..Default::default()
        };
        let err = SelectBuilder::default().build(&params).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_NEGATION");
    }

    #[test]
    fn test_bare_comparison_after_identifier_in_seq() {
        let cond = Expr::seq([
            Expr::Token(ident("name")),
            Expr::Token(Token::Comparison(like("%x%"))),
        ]);
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(cond),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM \"user\" WHERE (\"name\" LIKE ?)");
        assert_eq!(stmt.params, vec![json!("%x%")]);
    }

    #[test]
    fn test_standalone_not_scalar_is_misplaced() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::Token(Token::Not(Box::new(not(5))))),
            ..Default::default()
        };
        let err = SelectBuilder::default().build(&params).unwrap_err();
        assert_eq!(err.code(), "MISPLACED_TOKEN");
    }

    #[test]
    fn test_negated_nested_expr_drops_column_key() {
        // 컬럼 키는 버려지고 bare `!(...)`가 렌더링됩니다
        let inner = Expr::map([("a", 1), ("b", 2)]);
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("ignored", not(inner))])),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"user\" WHERE (!(\"a\" = ? AND \"b\" = ?))"
        );
    }

    #[test]
    fn test_seq_with_sentinels_and_nesting() {
        let cond = Expr::seq([
            Expr::map([("age", between(18, 100))]),
            Expr::and(),
            Expr::seq([
                Expr::map([("role", FieldCond::from("admin"))]),
                Expr::or(),
                Expr::map([("role", FieldCond::from("owner"))]),
            ]),
        ]);
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(cond),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"user\" WHERE ((\"age\" BETWEEN ? AND ?) AND ((\"role\" = ?) OR (\"role\" = ?)))"
        );
        assert_eq!(
            stmt.params,
            vec![json!(18), json!(100), json!("admin"), json!("owner")]
        );
        // 괄호 균형
        let opens = stmt.sql.matches('(').count();
        let closes = stmt.sql.matches(')').count();
        assert_eq!(opens, closes);
    }

    #[test]
    fn test_noop_seq_elements_are_skipped() {
        let cond = Expr::seq([
            Expr::map(Vec::<(String, FieldCond)>::new()),
            Expr::map([("id", 1)]),
        ]);
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(cond),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM \"user\" WHERE ((\"id\" = ?))");
    }

    #[test]
    fn test_raw_fragment_in_where() {
        let cond = Expr::seq([Expr::Token(raw("ST_DISTANCE(lat, lng) < ?", vec![json!(5)]))]);
        let params = SelectParams {
            table: "place".to_string(),
            r#where: Some(cond),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"place\" WHERE (ST_DISTANCE(lat, lng) < ?)"
        );
        assert_eq!(stmt.params, vec![json!(5)]);
    }

    #[test]
    fn test_math_chain_in_seq() {
        let cond = Expr::seq([
            Expr::Token(ident("price")),
            Expr::Token(Token::Math(MathOp::Mul)),
            Expr::Value(json!(1.1)),
        ]);
        let params = SelectParams {
            table: "item".to_string(),
            r#where: Some(cond),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM \"item\" WHERE (\"price\" * ?)");
        assert_eq!(stmt.params, vec![json!(1.1)]);
    }

    #[test]
    fn test_select_columns_and_aliases() {
        let params = SelectParams {
            table: "user".to_string(),
            columns: vec![
                "id".into(),
                SelectColumn::Aliased {
                    column: "fname".to_string(),
                    alias: "first".to_string(),
                },
                SelectColumn::Query {
                    query: ColumnQuery::Func(FuncCall::new(
                        "COUNT",
                        vec![FuncArg::Column("id".to_string())],
                    )),
                    alias: Some("total".to_string()),
                },
            ],
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT \"id\", \"fname\" AS \"first\", COUNT(\"id\") AS \"total\" FROM \"user\""
        );
    }

    #[test]
    fn test_select_subquery_column() {
        let inner = SelectParams {
            table: "post".to_string(),
            columns: vec![SelectColumn::Query {
                query: ColumnQuery::Func(FuncCall::new(
                    "COUNT",
                    vec![FuncArg::Column("id".to_string())],
                )),
                alias: None,
            }],
            r#where: Some(Expr::map([("author_id", eq(7))])),
            ..Default::default()
        };
        let params = SelectParams {
            table: "user".to_string(),
            columns: vec![
                "id".into(),
                SelectColumn::Query {
                    query: ColumnQuery::Select(Box::new(inner)),
                    alias: Some("post_count".to_string()),
                },
            ],
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT \"id\", (SELECT COUNT(\"id\") FROM \"post\" WHERE (\"author_id\" = ?)) AS \"post_count\" FROM \"user\""
        );
        assert_eq!(stmt.params, vec![json!(7)]);
    }

    #[test]
    fn test_join_reuses_where_grammar() {
        let params = SelectParams {
            table: "user".to_string(),
            joins: vec![Join::left(
                "profile",
                Expr::map([("profile.user_id", not(Value::Null))]),
            )
            .alias("p")],
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"user\" LEFT JOIN \"profile\" AS \"p\" ON (\"profile\".\"user_id\" IS NOT NULL)"
        );
    }

    #[test]
    fn test_order_limit_offset() {
        let params = SelectParams {
            table: "user".to_string(),
            order_by: vec![OrderBy::desc("created_at"), OrderBy::asc("id")],
            limit: Some(20),
            offset: Some(40),
            distinct: true,
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT DISTINCT * FROM \"user\" ORDER BY \"created_at\" DESC, \"id\" ASC LIMIT 20 OFFSET 40"
        );
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_insert_union_of_keys_fills_null() {
        let params = InsertParams::new(
            "user",
            vec![
                record(&[("id", json!(1)), ("fname", json!("Bob"))]),
                record(&[("id", json!(2))]),
            ],
        );
        let stmt = InsertBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"user\" (\"id\", \"fname\") VALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            stmt.params,
            vec![json!(1), json!("Bob"), json!(2), Value::Null]
        );
    }

    #[test]
    fn test_insert_empty_records_is_error() {
        let err = InsertBuilder::default()
            .build(&InsertParams::new("user", vec![]))
            .unwrap_err();
        assert_eq!(err.code(), "EMPTY_INSERT");
    }

    #[test]
    fn test_insert_if_not_exists_noop_update() {
        let params = InsertParams::new("user", vec![record(&[("id", json!(1))])])
            .if_not_exists("id");
        let stmt = InsertBuilder::default().build(&params).unwrap();
        assert!(stmt
            .sql
            .ends_with(" ON DUPLICATE KEY UPDATE \"id\" = \"id\""));
        assert_eq!(stmt.params, vec![json!(1)]);
    }

    #[test]
    fn test_insert_on_duplicate_key_update() {
        let mut assignments = IndexMap::new();
        assignments.insert("fname".to_string(), json!("Bob"));
        let params = InsertParams::new("user", vec![record(&[("id", json!(1))])])
            .on_duplicate_key_update(assignments);
        let stmt = InsertBuilder::default().build(&params).unwrap();
        assert!(stmt.sql.ends_with(" ON DUPLICATE KEY UPDATE \"fname\" = ?"));
        assert_eq!(stmt.params, vec![json!(1), json!("Bob")]);
    }

    #[test]
    fn test_update_with_token_assignment() {
        let mut set = IndexMap::new();
        set.insert("fname".to_string(), SetValue::from(json!("Bob")));
        set.insert(
            "updated_at".to_string(),
            SetValue::Token(Token::Func(FuncCall::current_timestamp())),
        );
        let params = UpdateParams {
            table: "user".to_string(),
            set,
            r#where: Some(Expr::map([("id", eq(1))])),
            ..Default::default()
        };
        let stmt = UpdateBuilder::default().build(&params).unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE \"user\" SET \"fname\" = ?, \"updated_at\" = CURRENT_TIMESTAMP WHERE (\"id\" = ?)"
        );
        assert_eq!(stmt.params, vec![json!("Bob"), json!(1)]);
    }

    #[test]
    fn test_delete_with_where() {
        let params = DeleteParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("id", eq(1))])),
            ..Default::default()
        };
        let stmt = DeleteBuilder::default().build(&params).unwrap();
        assert_eq!(stmt.sql, "DELETE FROM \"user\" WHERE (\"id\" = ?)");
        assert_eq!(stmt.params, vec![json!(1)]);
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let cond = Expr::seq([
            Expr::map([("a", FieldCond::from(1)), ("b", in_array([1, 2, 3]).into())]),
            Expr::Token(Token::Logical(LogicalOp::Or)),
            Expr::map([("c", between(4, 5))]),
        ]);
        let params = SelectParams {
            table: "t".to_string(),
            r#where: Some(cond),
            ..Default::default()
        };
        let stmt = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(stmt.sql.matches('?').count(), stmt.params.len());
    }

    #[test]
    fn test_compile_is_deterministic() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([
                ("b", FieldCond::from(2)),
                ("a", FieldCond::from(1)),
            ])),
            ..Default::default()
        };
        let first = SelectBuilder::default().build(&params).unwrap();
        let second = SelectBuilder::default().build(&params).unwrap();
        assert_eq!(first, second);
        // 선언 순서 유지: b가 a보다 먼저
        assert!(stmt_index(&first.sql, "\"b\"") < stmt_index(&first.sql, "\"a\""));
    }

    fn stmt_index(sql: &str, needle: &str) -> usize {
        sql.find(needle).unwrap()
    }

    #[test]
    fn test_mysql_dialect_backticks() {
        let params = SelectParams {
            table: "user".to_string(),
            r#where: Some(Expr::map([("id", eq(1))])),
            ..Default::default()
        };
        let stmt = SelectBuilder::new(Dialect::mysql()).build(&params).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM `user` WHERE (`id` = ?)");
    }
}
