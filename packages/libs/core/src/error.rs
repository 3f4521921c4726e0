//! 공통 에러 타입
//!
//! Querykit 전체에서 사용되는 에러 타입을 정의합니다.
//! 모든 에러는 컴파일 시점(구성 시점)에 동기적으로 발생하며,
//! 입력을 고치지 않는 한 재시도해도 의미가 없습니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Querykit 공통 에러
#[derive(Debug, Clone, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Schema Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("column '{column}': length and precision/scale are mutually exclusive")]
    ConflictingSize { column: String },

    #[error("column '{column}': default value is not compatible with type '{type_name}'")]
    InvalidDefault { column: String, type_name: String },

    #[error("changeColumn does not support an inline foreign key (column '{column}')")]
    ChangeColumnReference { column: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Expression Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("not() cannot negate the '{operator}' operator")]
    UnsupportedNegation { operator: &'static str },

    #[error("token '{kind}' is not valid in this position")]
    MisplacedToken { kind: &'static str },

    // ─────────────────────────────────────────────────────────────────────────────
    // Statement Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("insert requires at least one record")]
    EmptyInsert,
}

impl Error {
    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::ConflictingSize { .. } => "CONFLICTING_SIZE",
            Error::InvalidDefault { .. } => "INVALID_DEFAULT",
            Error::ChangeColumnReference { .. } => "CHANGE_COLUMN_REFERENCE",
            Error::UnsupportedNegation { .. } => "UNSUPPORTED_NEGATION",
            Error::MisplacedToken { .. } => "MISPLACED_TOKEN",
            Error::EmptyInsert => "EMPTY_INSERT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::ConflictingSize {
            column: "price".to_string(),
        };
        assert_eq!(err.code(), "CONFLICTING_SIZE");
        assert!(err.to_string().contains("price"));

        let err = Error::UnsupportedNegation { operator: "BETWEEN" };
        assert_eq!(err.code(), "UNSUPPORTED_NEGATION");
        assert!(err.to_string().contains("BETWEEN"));
    }
}
