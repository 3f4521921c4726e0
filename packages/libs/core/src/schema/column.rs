//! 컬럼 정의
//!
//! 테이블의 컬럼 메타데이터를 정의합니다. 잘못된 조합(길이와 정밀도
//! 동시 지정 등)은 컴파일 직전 `validate()`에서 즉시 에러가 되며,
//! 조용히 보정되지 않습니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trigger::TriggerFactory;
use super::types::ColumnKind;
use crate::error::{Error, Result};
use crate::token::FuncCall;

/// 컬럼 정의
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// 컬럼 이름
    pub name: String,

    /// 컬럼 타입
    pub kind: ColumnKind,

    /// 길이 (VARCHAR 등)
    #[serde(default)]
    pub length: Option<u32>,

    /// 정밀도/스케일 (DECIMAL 등). `length`와 동시 지정 불가.
    #[serde(default)]
    pub precision: Option<(u32, u32)>,

    /// 기본값
    #[serde(default)]
    pub default: Option<DefaultValue>,

    /// NOT NULL 여부
    #[serde(default)]
    pub required: bool,

    /// 유니크 제약
    #[serde(default)]
    pub unique: bool,

    /// 기본키 여부 (복합 PK는 선언 순서대로 수집됨)
    #[serde(default)]
    pub primary_key: bool,

    /// 자동 증가
    #[serde(default)]
    pub auto_increment: bool,

    /// 인라인 외래키 참조 (테이블 제약으로 hoisting됨)
    #[serde(default)]
    pub references: Option<Reference>,

    /// 트리거 팩토리 (컬럼당 하나, CREATE TABLE 뒤에 체이닝됨)
    #[serde(skip)]
    pub trigger: Option<TriggerFactory>,
}

impl ColumnDef {
    /// 새 컬럼 정의
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            length: None,
            precision: None,
            default: None,
            required: false,
            unique: false,
            primary_key: false,
            auto_increment: false,
            references: None,
            trigger: None,
        }
    }

    /// 길이 지정
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// 정밀도/스케일 지정
    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some((precision, scale));
        self
    }

    /// 기본값 지정
    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// NOT NULL
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 유니크 제약
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// 기본키
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// 자동 증가
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// 외래키 참조
    pub fn references(mut self, reference: Reference) -> Self {
        self.references = Some(reference);
        self
    }

    /// 트리거 팩토리
    pub fn trigger(mut self, factory: TriggerFactory) -> Self {
        self.trigger = Some(factory);
        self
    }

    /// 컬럼 정의 검증
    ///
    /// - 길이와 정밀도는 동시에 지정할 수 없습니다.
    /// - 기본값은 선언된 타입과 호환되어야 합니다.
    pub fn validate(&self) -> Result<()> {
        if self.length.is_some() && self.precision.is_some() {
            return Err(Error::ConflictingSize {
                column: self.name.clone(),
            });
        }

        if let Some(ref default) = self.default {
            if !default.compatible_with(self.kind) {
                return Err(Error::InvalidDefault {
                    column: self.name.clone(),
                    type_name: self.kind.keyword().to_string(),
                });
            }
        }

        Ok(())
    }
}

/// 컬럼 기본값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// `DEFAULT NULL`
    Null,

    /// `DEFAULT TRUE` / `DEFAULT FALSE`
    Bool(bool),

    /// 리터럴 그대로 (숫자는 bare, 문자열은 인용)
    Value(Value),

    /// 함수 호출. 현재 시각 함수는 괄호 없이, 그 외는 괄호로 감싸서
    /// 렌더링됩니다.
    Func(FuncCall),

    /// raw SQL 표현식 (괄호로 감싸서 렌더링)
    Raw(String),
}

impl DefaultValue {
    /// 선언된 컬럼 타입과 호환되는지 (간단한 모양 검사)
    pub fn compatible_with(&self, kind: ColumnKind) -> bool {
        match self {
            DefaultValue::Null => true,
            DefaultValue::Bool(_) => kind == ColumnKind::Boolean,
            DefaultValue::Value(Value::Bool(_)) => kind == ColumnKind::Boolean,
            DefaultValue::Value(Value::Number(_)) => !matches!(
                kind,
                ColumnKind::Boolean | ColumnKind::Bytes | ColumnKind::Json
            ),
            DefaultValue::Value(Value::String(_)) => !kind.is_numeric() && kind != ColumnKind::Boolean,
            DefaultValue::Value(_) => kind == ColumnKind::Json,
            DefaultValue::Func(_) | DefaultValue::Raw(_) => true,
        }
    }
}

/// 외래키 참조 정의
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// 참조 대상 테이블
    pub table: String,

    /// 참조 대상 컬럼 (생략 시 `id`)
    #[serde(default)]
    pub column: Option<String>,

    /// 참조 대상 삭제 시 동작
    #[serde(default, rename = "onDelete")]
    pub on_delete: ReferentialAction,

    /// 참조 대상 갱신 시 동작
    #[serde(default, rename = "onUpdate")]
    pub on_update: ReferentialAction,
}

impl Reference {
    /// 테이블의 PK(`id`)를 참조
    pub fn to(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: None,
            on_delete: ReferentialAction::default(),
            on_update: ReferentialAction::default(),
        }
    }

    /// 특정 컬럼을 참조
    pub fn to_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: Some(column.into()),
            on_delete: ReferentialAction::default(),
            on_update: ReferentialAction::default(),
        }
    }

    /// 참조 대상 컬럼 이름 (기본 `id`)
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or("id")
    }
}

/// 참조 무결성 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    /// 참조 위반 시 거부 (기본값)
    #[default]
    Restrict,

    /// 아무 동작 없음 (DB가 나중에 체크)
    NoAction,

    /// 함께 삭제/갱신
    Cascade,

    /// NULL로 설정
    SetNull,

    /// 기본값으로 설정
    SetDefault,
}

impl ReferentialAction {
    /// SQL 키워드로 변환
    pub fn keyword(&self) -> &'static str {
        match self {
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}
