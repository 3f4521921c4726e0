//! 테이블 정의
//!
//! CREATE TABLE 컴파일의 입력이 되는 테이블 메타데이터입니다.
//! 컬럼에 인라인 선언된 외래키는 컴파일 전에 테이블 제약 목록으로
//! hoisting됩니다.

use serde::{Deserialize, Serialize};

use super::column::{ColumnDef, ReferentialAction};

/// 테이블 정의
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    /// 테이블 이름
    pub name: String,

    /// 컬럼 목록 (선언 순서가 출력 순서)
    pub columns: Vec<ColumnDef>,

    /// 명시적 외래키 목록
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// CREATE TABLE IF NOT EXISTS
    #[serde(default)]
    pub if_not_exists: bool,
}

impl TableDef {
    /// 새 테이블 정의
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
            foreign_keys: Vec::new(),
            if_not_exists: false,
        }
    }

    /// IF NOT EXISTS 플래그
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// 명시적 외래키 추가
    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// 기본키 컬럼 이름들 (선언 순서 유지)
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// 명시적 외래키 + 인라인 참조를 hoisting한 전체 외래키 목록
    ///
    /// 명시적 선언이 먼저, 인라인 선언이 컬럼 순서대로 뒤에 옵니다.
    pub fn collected_foreign_keys(&self) -> Vec<ForeignKey> {
        let mut fks = self.foreign_keys.clone();
        for col in &self.columns {
            if let Some(ref reference) = col.references {
                fks.push(ForeignKey {
                    name: None,
                    columns: vec![col.name.clone()],
                    ref_table: reference.table.clone(),
                    ref_columns: vec![reference.column_name().to_string()],
                    on_delete: reference.on_delete,
                    on_update: reference.on_update,
                });
            }
        }
        fks
    }
}

/// 테이블 수준 외래키 제약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// 제약 이름 (생략 시 `fk_<table>_<col1>_<col2>...` 자동 생성)
    #[serde(default)]
    pub name: Option<String>,

    /// 소스 컬럼들
    pub columns: Vec<String>,

    /// 참조 대상 테이블
    pub ref_table: String,

    /// 참조 대상 컬럼들
    pub ref_columns: Vec<String>,

    /// 삭제 시 동작
    #[serde(default)]
    pub on_delete: ReferentialAction,

    /// 갱신 시 동작
    #[serde(default)]
    pub on_update: ReferentialAction,
}

impl ForeignKey {
    /// 단일 컬럼 외래키
    pub fn new(
        column: impl Into<String>,
        ref_table: impl Into<String>,
        ref_column: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            columns: vec![column.into()],
            ref_table: ref_table.into(),
            ref_columns: vec![ref_column.into()],
            on_delete: ReferentialAction::default(),
            on_update: ReferentialAction::default(),
        }
    }

    /// 제약 이름 (자동 생성 규칙 포함)
    pub fn constraint_name(&self, table: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("fk_{}_{}", table, self.columns.join("_")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column::Reference;
    use crate::schema::types::ColumnKind;

    #[test]
    fn test_primary_key_declaration_order() {
        let table = TableDef::new(
            "member",
            vec![
                ColumnDef::new("tenant_id", ColumnKind::Int).primary_key(),
                ColumnDef::new("name", ColumnKind::Varchar).length(100),
                ColumnDef::new("user_id", ColumnKind::Int).primary_key(),
            ],
        );
        assert_eq!(table.primary_key_columns(), vec!["tenant_id", "user_id"]);
    }

    #[test]
    fn test_inline_reference_hoisting() {
        let table = TableDef::new(
            "post",
            vec![
                ColumnDef::new("id", ColumnKind::Int).primary_key(),
                ColumnDef::new("author_id", ColumnKind::Int)
                    .references(Reference::to("user")),
            ],
        )
        .foreign_key(ForeignKey::new("group_id", "group", "id"));

        let fks = table.collected_foreign_keys();
        assert_eq!(fks.len(), 2);
        // 명시적 선언이 먼저, hoisting된 인라인 선언이 뒤에
        assert_eq!(fks[0].columns, vec!["group_id"]);
        assert_eq!(fks[1].columns, vec!["author_id"]);
        assert_eq!(fks[1].ref_table, "user");
        assert_eq!(fks[1].ref_columns, vec!["id"]);
    }

    #[test]
    fn test_constraint_name_auto_generation() {
        let fk = ForeignKey {
            name: None,
            columns: vec!["a".to_string(), "b".to_string()],
            ref_table: "other".to_string(),
            ref_columns: vec!["x".to_string(), "y".to_string()],
            on_delete: ReferentialAction::default(),
            on_update: ReferentialAction::default(),
        };
        assert_eq!(fk.constraint_name("t"), "fk_t_a_b");

        let named = ForeignKey {
            name: Some("fk_custom".to_string()),
            ..fk
        };
        assert_eq!(named.constraint_name("t"), "fk_custom");
    }
}
