//! 사용자/권한 정의
//!
//! GRANT는 방언 의존성이 커서 불안정(unstable)한 표면입니다.
//! 단수로 들어온 권한/대상/피부여자는 렌더링 전에 1원소 리스트로
//! 정규화됩니다.

use serde::{Deserialize, Serialize};

/// 사용자 정의
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDef {
    /// 사용자 이름
    pub name: String,

    /// 비밀번호 (파라미터로 바인딩됨, 텍스트에 노출되지 않음)
    #[serde(default)]
    pub password: Option<String>,
}

impl UserDef {
    /// 새 사용자 정의
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: None,
        }
    }

    /// 비밀번호 지정
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// 하나 또는 여러 개
///
/// JSON에서 `"select"` 와 `["select", "insert"]` 를 모두 허용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// 1원소 리스트로 정규화
    pub fn normalized(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(s) => vec![s.as_str()],
            OneOrMany::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(s: &str) -> Self {
        OneOrMany::One(s.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(items: Vec<String>) -> Self {
        OneOrMany::Many(items)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(items: Vec<&str>) -> Self {
        OneOrMany::Many(items.into_iter().map(String::from).collect())
    }
}

/// GRANT 정의
///
/// 주의: 방언 제한적인 표면입니다. 대상(`on`)은 `db.*` 같은 패턴을
/// 허용하기 위해 인용하지 않고 그대로 렌더링합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantDef {
    /// 권한 목록 (SELECT, INSERT 등)
    pub privileges: OneOrMany,

    /// 대상 (테이블, `db.*` 등)
    pub on: OneOrMany,

    /// 피부여자
    pub to: OneOrMany,
}
