//! 토큰 모델
//!
//! 표현식 문법의 최소 단위입니다. 각 토큰은 정확히 하나의 variant로
//! 태그되며, 컴파일러는 구조 추측 없이 태그 매칭으로만 분기합니다.
//! `eq`/`like`/`between` 등의 팩토리 함수가 유일한 생성 경로입니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 표현식 토큰
///
/// 식별자, 리터럴, 비교, 논리 연산, 산술 연산, raw SQL 조각,
/// 함수 호출을 하나의 태그드 유니온으로 표현합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// 컬럼/테이블 식별자 (`a.b`는 세그먼트별로 인용됨)
    Identifier(String),

    /// 리터럴 값 (플레이스홀더로 바인딩됨)
    Literal(Value),

    /// raw SQL 조각과 그에 대응하는 파라미터
    Raw { sql: String, params: Vec<Value> },

    /// 비교 조건 (`=`, `LIKE`, `IN`, `BETWEEN` 등)
    Comparison(Comparison),

    /// 논리 접속사 (AND/OR)
    Logical(LogicalOp),

    /// 부정. 값, 조건, 중첩 표현식을 감쌀 수 있습니다.
    Not(Box<NotTarget>),

    /// 산술 연산자
    Math(MathOp),

    /// 함수 호출
    Func(FuncCall),
}

impl Token {
    /// 비교 토큰 여부 (O(1) 태그 검사)
    pub fn is_comparison(&self) -> bool {
        matches!(self, Token::Comparison(_))
    }

    /// 논리 토큰 여부
    pub fn is_logical(&self) -> bool {
        matches!(self, Token::Logical(_) | Token::Not(_))
    }

    /// 함수 토큰 여부
    pub fn is_function(&self) -> bool {
        matches!(self, Token::Func(_))
    }

    /// raw 토큰 여부
    pub fn is_raw(&self) -> bool {
        matches!(self, Token::Raw { .. })
    }

    /// variant 이름 (에러 메시지용)
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Identifier(_) => "identifier",
            Token::Literal(_) => "literal",
            Token::Raw { .. } => "raw",
            Token::Comparison(_) => "comparison",
            Token::Logical(_) => "logical",
            Token::Not(_) => "not",
            Token::Math(_) => "math",
            Token::Func(_) => "function",
        }
    }
}

/// 비교 조건
///
/// `Between`은 SQL의 3항 연산자이므로 두 경계를 하나의 payload에
/// 담습니다 (두 개의 비교를 체이닝하지 않습니다).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Comparison {
    Eq(Value),
    Ne(Value),
    Like(Value),
    Lt(Value),
    Lte(Value),
    Gt(Value),
    Gte(Value),
    In(Vec<Value>),
    Between(Value, Value),
}

impl Comparison {
    /// SQL 연산자 키워드
    pub fn operator(&self) -> &'static str {
        match self {
            Comparison::Eq(_) => "=",
            Comparison::Ne(_) => "!=",
            Comparison::Like(_) => "LIKE",
            Comparison::Lt(_) => "<",
            Comparison::Lte(_) => "<=",
            Comparison::Gt(_) => ">",
            Comparison::Gte(_) => ">=",
            Comparison::In(_) => "IN",
            Comparison::Between(_, _) => "BETWEEN",
        }
    }

    /// 부정 연산자 rewrite 테이블
    ///
    /// `LIKE` → `NOT LIKE`, `IN` → `NOT IN`. 그 외의 조건을 `not()`으로
    /// 감싸는 것은 사용 오류입니다 (`None` 반환).
    pub fn negated_operator(&self) -> Option<&'static str> {
        match self {
            Comparison::Like(_) => Some("NOT LIKE"),
            Comparison::In(_) => Some("NOT IN"),
            _ => None,
        }
    }
}

/// 논리 접속사
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// SQL 키워드
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// 산술 연산자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl MathOp {
    /// SQL 기호
    pub fn symbol(&self) -> &'static str {
        match self {
            MathOp::Add => "+",
            MathOp::Sub => "-",
            MathOp::Mul => "*",
            MathOp::Div => "/",
            MathOp::Mod => "%",
        }
    }
}

/// 함수 호출 토큰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncCall {
    /// 함수 이름 (렌더링 시 그대로 사용)
    pub name: String,

    /// 인자 목록
    #[serde(default)]
    pub args: Vec<FuncArg>,

    /// 반환 타입 힌트 (상위 레이어의 타입 매핑용)
    #[serde(default)]
    pub returns: FuncReturn,
}

/// 함수 인자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FuncArg {
    /// 컬럼 참조 (인용되어 렌더링)
    Column(String),

    /// 값 (플레이스홀더로 바인딩)
    Value(Value),
}

/// 함수 반환 타입 힌트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuncReturn {
    #[default]
    Unknown,
    Bool,
    Int,
    Float,
    Text,
    Timestamp,
}

impl FuncCall {
    /// 새 함수 호출 토큰
    pub fn new(name: impl Into<String>, args: Vec<FuncArg>) -> Self {
        Self {
            name: name.into(),
            args,
            returns: FuncReturn::Unknown,
        }
    }

    /// 현재 시각 함수
    ///
    /// DEFAULT 위치에서는 괄호 없이 렌더링됩니다 (일부 엔진은
    /// `DEFAULT (CURRENT_TIMESTAMP)`를 거부합니다).
    pub fn current_timestamp() -> Self {
        Self {
            name: "CURRENT_TIMESTAMP".to_string(),
            args: Vec::new(),
            returns: FuncReturn::Timestamp,
        }
    }

    /// 괄호 없이 bare 키워드로 렌더링되는 함수인지
    pub fn is_bare_keyword(&self) -> bool {
        self.args.is_empty() && self.name.eq_ignore_ascii_case("CURRENT_TIMESTAMP")
    }
}

/// `not()`이 감쌀 수 있는 대상
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotTarget {
    /// 스칼라 값 → `!=` 로 렌더링
    Value(Value),

    /// 비교 조건 → rewrite 테이블 적용 (`NOT LIKE`/`NOT IN`)
    Comparison(Comparison),

    /// 중첩 표현식 → `!(...)` 로 렌더링
    Expr(crate::expr::Expr),
}

// ─────────────────────────────────────────────────────────────────────────────
// Factory Functions
// ─────────────────────────────────────────────────────────────────────────────

/// `=`
pub fn eq(value: impl Into<Value>) -> Comparison {
    Comparison::Eq(value.into())
}

/// `!=`
pub fn ne(value: impl Into<Value>) -> Comparison {
    Comparison::Ne(value.into())
}

/// `LIKE`
pub fn like(pattern: impl Into<Value>) -> Comparison {
    Comparison::Like(pattern.into())
}

/// `<`
pub fn lt(value: impl Into<Value>) -> Comparison {
    Comparison::Lt(value.into())
}

/// `<=`
pub fn lte(value: impl Into<Value>) -> Comparison {
    Comparison::Lte(value.into())
}

/// `>`
pub fn gt(value: impl Into<Value>) -> Comparison {
    Comparison::Gt(value.into())
}

/// `>=`
pub fn gte(value: impl Into<Value>) -> Comparison {
    Comparison::Gte(value.into())
}

/// `IN (...)`
pub fn in_array<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Comparison {
    Comparison::In(values.into_iter().map(Into::into).collect())
}

/// `BETWEEN low AND high`
pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Comparison {
    Comparison::Between(low.into(), high.into())
}

/// 부정
///
/// 스칼라는 `!=`, `like`/`in_array` 조건은 키워드 부정,
/// 중첩 표현식은 `!(...)` 로 컴파일됩니다.
pub fn not(target: impl Into<NotTarget>) -> NotTarget {
    target.into()
}

/// raw SQL 조각
pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Token {
    Token::Raw {
        sql: sql.into(),
        params,
    }
}

/// 식별자 토큰
pub fn ident(name: impl Into<String>) -> Token {
    Token::Identifier(name.into())
}

impl From<Comparison> for NotTarget {
    fn from(c: Comparison) -> Self {
        NotTarget::Comparison(c)
    }
}

impl From<Value> for NotTarget {
    fn from(v: Value) -> Self {
        NotTarget::Value(v)
    }
}

impl From<crate::expr::Expr> for NotTarget {
    fn from(e: crate::expr::Expr) -> Self {
        NotTarget::Expr(e)
    }
}

macro_rules! not_target_from_scalar {
    ($($ty:ty),*) => {
        $(impl From<$ty> for NotTarget {
            fn from(v: $ty) -> Self {
                NotTarget::Value(Value::from(v))
            }
        })*
    };
}

not_target_from_scalar!(&str, String, bool, i32, i64, u32, u64, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_guards() {
        assert!(Token::Comparison(eq(1)).is_comparison());
        assert!(Token::Logical(LogicalOp::And).is_logical());
        assert!(Token::Not(Box::new(not(5))).is_logical());
        assert!(Token::Func(FuncCall::current_timestamp()).is_function());
        assert!(raw("1 = 1", vec![]).is_raw());
        assert!(!ident("id").is_comparison());
    }

    #[test]
    fn test_between_single_payload() {
        let cmp = between(18, 100);
        assert_eq!(cmp, Comparison::Between(json!(18), json!(100)));
        assert_eq!(cmp.operator(), "BETWEEN");
    }

    #[test]
    fn test_negation_rewrite_table() {
        assert_eq!(like("%a%").negated_operator(), Some("NOT LIKE"));
        assert_eq!(in_array([1, 2]).negated_operator(), Some("NOT IN"));
        assert_eq!(eq(1).negated_operator(), None);
        assert_eq!(between(1, 2).negated_operator(), None);
        assert_eq!(gte(1).negated_operator(), None);
    }

    #[test]
    fn test_not_factory_targets() {
        assert_eq!(not(5), NotTarget::Value(json!(5)));
        assert_eq!(
            not(like("%x%")),
            NotTarget::Comparison(Comparison::Like(json!("%x%")))
        );
    }

    #[test]
    fn test_current_timestamp_bare() {
        assert!(FuncCall::current_timestamp().is_bare_keyword());
        assert!(!FuncCall::new("NOW", vec![]).is_bare_keyword());
        assert!(!FuncCall::new(
            "CURRENT_TIMESTAMP",
            vec![FuncArg::Value(json!(6))]
        )
        .is_bare_keyword());
    }
}
