//! DML 문장 기술(description) 타입
//!
//! select/insert/update/delete 컴파일러의 입력입니다. 모든 매핑은
//! 선언 순서를 유지하는 `IndexMap`이며, 동일한 입력은 항상 바이트
//! 단위로 동일한 출력을 냅니다.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use qk_core::expr::Expr;
use qk_core::token::{FuncCall, Token};

/// SELECT 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectParams {
    /// 대상 테이블
    pub table: String,

    /// 테이블 별칭
    #[serde(default)]
    pub alias: Option<String>,

    /// SELECT할 컬럼 목록 (비어 있으면 `*`)
    #[serde(default)]
    pub columns: Vec<SelectColumn>,

    /// JOIN 절
    #[serde(default)]
    pub joins: Vec<Join>,

    /// WHERE 조건 (빈 매핑은 no-op)
    #[serde(default)]
    pub r#where: Option<Expr>,

    /// 정렬
    #[serde(default)]
    pub order_by: Vec<OrderBy>,

    /// 제한
    #[serde(default)]
    pub limit: Option<u64>,

    /// 오프셋
    #[serde(default)]
    pub offset: Option<u64>,

    /// SELECT DISTINCT
    #[serde(default)]
    pub distinct: bool,
}

impl SelectParams {
    /// 새 SELECT 파라미터
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }
}

/// SELECT 컬럼 지정
///
/// 셋 중 하나의 명시적 variant입니다. 키 존재 여부로 shape를 추측하는
/// 일은 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectColumn {
    /// 컬럼 이름 그대로
    Name(String),

    /// 별칭 붙은 컬럼
    Aliased { column: String, alias: String },

    /// 함수 호출 또는 상관 서브쿼리
    Query {
        query: ColumnQuery,
        #[serde(default)]
        alias: Option<String>,
    },
}

impl From<&str> for SelectColumn {
    fn from(name: &str) -> Self {
        SelectColumn::Name(name.to_string())
    }
}

impl From<String> for SelectColumn {
    fn from(name: String) -> Self {
        SelectColumn::Name(name)
    }
}

/// SELECT 컬럼 자리의 쿼리 표현식
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnQuery {
    /// 함수 호출 (인라인 렌더링)
    Func(FuncCall),

    /// 상관 서브쿼리 (괄호로 감싸서 렌더링)
    Select(Box<SelectParams>),
}

/// JOIN 절
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    /// JOIN 종류
    pub kind: JoinKind,

    /// 대상 테이블
    pub table: String,

    /// 테이블 별칭
    #[serde(default)]
    pub alias: Option<String>,

    /// ON 조건 (WHERE 컴파일러를 그대로 재사용)
    #[serde(default)]
    pub on: Option<Expr>,
}

impl Join {
    /// INNER JOIN
    pub fn inner(table: impl Into<String>, on: Expr) -> Self {
        Self {
            kind: JoinKind::Inner,
            table: table.into(),
            alias: None,
            on: Some(on),
        }
    }

    /// LEFT JOIN
    pub fn left(table: impl Into<String>, on: Expr) -> Self {
        Self {
            kind: JoinKind::Left,
            table: table.into(),
            alias: None,
            on: Some(on),
        }
    }

    /// 별칭 지정
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// JOIN 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    /// SQL 키워드
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
            JoinKind::Cross => "CROSS",
        }
    }
}

/// 정렬 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL 키워드
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 정렬 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    /// 정렬 컬럼
    pub column: String,

    /// 정렬 방향
    pub order: SortOrder,
}

impl OrderBy {
    /// 오름차순
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: SortOrder::Asc,
        }
    }

    /// 내림차순
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: SortOrder::Desc,
        }
    }
}

/// INSERT 파라미터
///
/// 레코드들의 키 집합이 서로 달라도 됩니다. 컬럼 목록은 모든 레코드
/// 키의 합집합(첫 등장 순서)이고, 빠진 키는 `NULL`로 채워집니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertParams {
    /// 대상 테이블
    pub table: String,

    /// 삽입할 레코드들 (컬럼 → 값, 선언 순서 유지)
    pub records: Vec<IndexMap<String, Value>>,

    /// 중복 키 처리
    #[serde(default)]
    pub on_duplicate: DuplicateKey,
}

impl InsertParams {
    /// 새 INSERT 파라미터
    pub fn new(table: impl Into<String>, records: Vec<IndexMap<String, Value>>) -> Self {
        Self {
            table: table.into(),
            records,
            on_duplicate: DuplicateKey::Error,
        }
    }

    /// 중복 키 무시 (`ON DUPLICATE KEY UPDATE pk = pk` no-op 갱신)
    pub fn if_not_exists(mut self, pk: impl Into<String>) -> Self {
        self.on_duplicate = DuplicateKey::Ignore { pk: pk.into() };
        self
    }

    /// 중복 키 시 명시적 갱신
    pub fn on_duplicate_key_update(mut self, assignments: IndexMap<String, Value>) -> Self {
        self.on_duplicate = DuplicateKey::Update(assignments);
        self
    }
}

/// 중복 키 처리 방식
///
/// 하나의 필드이므로 `if_not_exists`와 `on_duplicate_key_update`는
/// 상호 배타적이며, 나중에 지정한 쪽이 이깁니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum DuplicateKey {
    /// 중복 키 에러를 그대로 전파 (기본값)
    #[default]
    Error,

    /// 중복 키 에러 억제 (no-op 갱신)
    Ignore { pk: String },

    /// 명시적 컬럼 갱신
    Update(IndexMap<String, Value>),
}

/// UPDATE 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateParams {
    /// 대상 테이블
    pub table: String,

    /// SET 할당 (컬럼 → 값/토큰, 선언 순서 유지)
    pub set: IndexMap<String, SetValue>,

    /// JOIN 절
    #[serde(default)]
    pub joins: Vec<Join>,

    /// WHERE 조건
    #[serde(default)]
    pub r#where: Option<Expr>,
}

/// SET 할당 값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetValue {
    /// 값 (플레이스홀더로 바인딩)
    Value(Value),

    /// 토큰 (식별자/함수/raw 등 그대로 렌더링)
    Token(Token),
}

impl From<Value> for SetValue {
    fn from(v: Value) -> Self {
        SetValue::Value(v)
    }
}

impl From<Token> for SetValue {
    fn from(t: Token) -> Self {
        SetValue::Token(t)
    }
}

/// DELETE 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteParams {
    /// 대상 테이블
    pub table: String,

    /// JOIN 절
    #[serde(default)]
    pub joins: Vec<Join>,

    /// WHERE 조건
    #[serde(default)]
    pub r#where: Option<Expr>,
}
