//! 논리적 컬럼 타입 정의
//!
//! Querykit은 DB 엔진에 독립적인 논리적 타입을 사용합니다.
//! 길이/정밀도는 타입이 아니라 컬럼 정의 쪽에 붙습니다.

use serde::{Deserialize, Serialize};

/// 논리적 컬럼 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// 32비트 정수
    Int,

    /// 64비트 정수
    Bigint,

    /// 64비트 부동소수점
    Float,

    /// 고정 소수점 (금융용, precision/scale 필요)
    Decimal,

    /// 불리언
    Boolean,

    /// 가변 길이 문자열 (length 필요)
    Varchar,

    /// 긴 문자열
    Text,

    /// JSON
    Json,

    /// 타임스탬프
    Timestamp,

    /// 날짜
    Date,

    /// 바이트 배열
    Bytes,
}

impl ColumnKind {
    /// SQL 타입 키워드
    pub fn keyword(&self) -> &'static str {
        match self {
            ColumnKind::Int => "INT",
            ColumnKind::Bigint => "BIGINT",
            ColumnKind::Float => "DOUBLE",
            ColumnKind::Decimal => "DECIMAL",
            ColumnKind::Boolean => "BOOLEAN",
            ColumnKind::Varchar => "VARCHAR",
            ColumnKind::Text => "TEXT",
            ColumnKind::Json => "JSON",
            ColumnKind::Timestamp => "TIMESTAMP",
            ColumnKind::Date => "DATE",
            ColumnKind::Bytes => "BLOB",
        }
    }

    /// 숫자 계열 타입인지
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnKind::Int | ColumnKind::Bigint | ColumnKind::Float | ColumnKind::Decimal
        )
    }

    /// 문자열 계열 타입인지
    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnKind::Varchar | ColumnKind::Text)
    }
}
