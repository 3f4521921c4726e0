//! 트리거 정의
//!
//! 컬럼에 붙은 트리거 팩토리는 CREATE TABLE 컴파일 시
//! `{table, column, primary_key_column}` 컨텍스트로 호출되어
//! 별도의 체이닝 문장이 됩니다.

use serde::{Deserialize, Serialize};

/// 트리거 팩토리 호출 컨텍스트
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerContext<'a> {
    /// 트리거가 속한 테이블
    pub table: &'a str,

    /// 트리거를 선언한 컬럼
    pub column: &'a str,

    /// 테이블의 첫 번째 기본키 컬럼 (없을 수 있음)
    pub primary_key_column: Option<&'a str>,
}

/// 트리거 팩토리
///
/// 컬럼 정의에 붙으며, 테이블 컴파일 시점에 호출됩니다.
pub type TriggerFactory = fn(&TriggerContext) -> TriggerDef;

/// 트리거 실행 시점
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerTiming {
    Before,
    After,
}

impl TriggerTiming {
    /// SQL 키워드
    pub fn keyword(&self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::After => "AFTER",
        }
    }
}

/// 트리거 대상 이벤트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

impl TriggerEvent {
    /// SQL 키워드
    pub fn keyword(&self) -> &'static str {
        match self {
            TriggerEvent::Insert => "INSERT",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
        }
    }
}

/// 트리거 정의
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDef {
    /// 트리거 이름
    pub name: String,

    /// 실행 시점
    pub timing: TriggerTiming,

    /// 대상 이벤트
    pub event: TriggerEvent,

    /// 대상 테이블
    pub table: String,

    /// 트리거 본문 (raw SQL, FOR EACH ROW 뒤에 그대로 붙음)
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(TriggerTiming::Before.keyword(), "BEFORE");
        assert_eq!(TriggerEvent::Update.keyword(), "UPDATE");
    }

    #[test]
    fn test_factory_receives_context() {
        fn touch_factory(ctx: &TriggerContext) -> TriggerDef {
            TriggerDef {
                name: format!("trg_{}_{}", ctx.table, ctx.column),
                timing: TriggerTiming::Before,
                event: TriggerEvent::Update,
                table: ctx.table.to_string(),
                body: format!("SET NEW.{} = CURRENT_TIMESTAMP", ctx.column),
            }
        }

        let factory: TriggerFactory = touch_factory;
        let ctx = TriggerContext {
            table: "user",
            column: "updated_at",
            primary_key_column: Some("id"),
        };
        let def = factory(&ctx);
        assert_eq!(def.name, "trg_user_updated_at");
        assert_eq!(def.table, "user");
    }
}
