//! 표현식 문법
//!
//! WHERE 절과 조건 표현식의 재귀 문법입니다. 원래는 런타임 shape로
//! 판별되는 단일 비정형 타입이지만, 여기서는 명시적 태그드 유니온으로
//! 표현하고 컴파일러가 exhaustive 매칭으로 분기합니다.
//!
//! # 예시
//!
//! ```
//! use qk_core::expr::Expr;
//! use qk_core::token::{between, not, like};
//!
//! // ("age" BETWEEN ? AND ?) AND ("name" NOT LIKE ?)
//! let cond = Expr::seq([
//!     Expr::map([("age", between(18, 100))]),
//!     Expr::and(),
//!     Expr::map([("name", not(like("%bot%")))]),
//! ]);
//! assert!(!cond.is_noop());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::token::{Comparison, LogicalOp, NotTarget, Token};

/// 조건 표현식
///
/// - `Map`: 컬럼 → 조건 매핑. 각 쌍은 암묵적으로 AND 결합됩니다.
/// - `Seq`: 하위 표현식과 `and()`/`or()` 센티널이 교대로 나열된 그룹.
///   `Math` 토큰과 교대로 나열되면 산술 체인이 됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// 리터럴 값 (플레이스홀더로 바인딩)
    Value(Value),

    /// 단일 토큰
    Token(Token),

    /// 컬럼 → 조건 매핑 (선언 순서 유지)
    Map(IndexMap<String, FieldCond>),

    /// 그룹 (괄호로 묶여 렌더링)
    Seq(Vec<Expr>),
}

/// 매핑 값 자리에 올 수 있는 조건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldCond {
    /// 값. `null`은 `IS NULL`, 그 외는 `= ?` 로 컴파일됩니다.
    Value(Value),

    /// 비교 조건
    Comparison(Comparison),

    /// 부정 조건
    Not(NotTarget),
}

impl Expr {
    /// 컬럼 → 조건 매핑 그룹
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FieldCond>,
    {
        Expr::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// 하위 표현식 시퀀스 그룹
    pub fn seq(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Seq(items.into_iter().collect())
    }

    /// `AND` 센티널
    pub fn and() -> Self {
        Expr::Token(Token::Logical(LogicalOp::And))
    }

    /// `OR` 센티널
    pub fn or() -> Self {
        Expr::Token(Token::Logical(LogicalOp::Or))
    }

    /// 컴파일 시 아무것도 출력하지 않는 표현식인지
    ///
    /// 빈 매핑/시퀀스는 no-op이며, 상위에서 `WHERE` 키워드 자체가
    /// 생략됩니다. 호출자는 "조건 없음"을 `Expr::map([])`으로 전달해도
    /// 됩니다.
    pub fn is_noop(&self) -> bool {
        match self {
            Expr::Map(map) => map.is_empty(),
            Expr::Seq(items) => items.iter().all(Expr::is_noop),
            _ => false,
        }
    }
}

impl From<Token> for Expr {
    fn from(t: Token) -> Self {
        Expr::Token(t)
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Value(v)
    }
}

impl From<Comparison> for FieldCond {
    fn from(c: Comparison) -> Self {
        FieldCond::Comparison(c)
    }
}

impl From<NotTarget> for FieldCond {
    fn from(t: NotTarget) -> Self {
        FieldCond::Not(t)
    }
}

impl From<Value> for FieldCond {
    fn from(v: Value) -> Self {
        FieldCond::Value(v)
    }
}

macro_rules! field_cond_from_scalar {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FieldCond {
            fn from(v: $ty) -> Self {
                FieldCond::Value(Value::from(v))
            }
        })*
    };
}

field_cond_from_scalar!(&str, String, bool, i32, i64, u32, u64, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{between, not};
    use serde_json::json;

    #[test]
    fn test_empty_map_is_noop() {
        let empty: Expr = Expr::map(Vec::<(String, FieldCond)>::new());
        assert!(empty.is_noop());
        assert!(Expr::seq([]).is_noop());
        assert!(!Expr::map([("id", 1)]).is_noop());
    }

    #[test]
    fn test_nested_noop_seq() {
        let expr = Expr::seq([Expr::map(Vec::<(String, FieldCond)>::new())]);
        assert!(expr.is_noop());
    }

    #[test]
    fn test_map_preserves_declaration_order() {
        let expr = Expr::map([("b", 1), ("a", 2), ("c", 3)]);
        let Expr::Map(map) = expr else { unreachable!() };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_field_cond_conversions() {
        assert_eq!(FieldCond::from("x"), FieldCond::Value(json!("x")));
        assert_eq!(
            FieldCond::from(between(1, 2)),
            FieldCond::Comparison(between(1, 2))
        );
        assert!(matches!(FieldCond::from(not(5)), FieldCond::Not(_)));
        assert_eq!(FieldCond::from(Value::Null), FieldCond::Value(Value::Null));
    }

    #[test]
    fn test_serde_round_trip() {
        let expr = Expr::seq([
            Expr::map([("age", FieldCond::from(between(18, 100)))]),
            Expr::and(),
            Expr::map([("active", FieldCond::from(true))]),
        ]);
        let json = serde_json::to_string(&expr).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(expr, back);
    }
}
