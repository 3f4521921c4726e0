//! 인덱스 정의

use serde::{Deserialize, Serialize};

/// 인덱스 정의
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDef {
    /// 인덱스 이름 (생략 시 `idx_<table>_<col1>_<col2>...` 자동 생성)
    #[serde(default)]
    pub name: Option<String>,

    /// 대상 테이블
    pub table: String,

    /// 대상 컬럼들
    pub columns: Vec<String>,

    /// 유니크 인덱스 여부
    #[serde(default)]
    pub unique: bool,
}

impl IndexDef {
    /// 새 인덱스 정의
    pub fn new<C: Into<String>>(
        table: impl Into<String>,
        columns: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            name: None,
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    /// 유니크 인덱스
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// 인덱스 이름 (자동 생성 규칙 포함)
    pub fn index_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("idx_{}_{}", self.table, self.columns.join("_")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_name() {
        let idx = IndexDef::new("user", ["email", "status"]);
        assert_eq!(idx.index_name(), "idx_user_email_status");
    }

    #[test]
    fn test_explicit_name_wins() {
        let idx = IndexDef {
            name: Some("custom_idx".to_string()),
            ..IndexDef::new("user", ["email"])
        };
        assert_eq!(idx.index_name(), "custom_idx");
    }
}
