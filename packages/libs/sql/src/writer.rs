//! SQL 텍스트 writer
//!
//! 텍스트와 바인딩 파라미터를 함께 누적하는 단일 사용(single-use)
//! 버퍼입니다. `push`와 `bind`의 상대 순서가 곧 플레이스홀더와
//! 파라미터의 정렬이므로, 컴파일러는 두 프리미티브를 절대 재배열하지
//! 않습니다. 구분자는 append 후 잘라내는 방식이 아니라 `join`으로
//! 함수적으로 삽입됩니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use qk_core::Result;

/// SQL 방언 설정
///
/// 식별자 인용 문자와 플레이스홀더 마커만 재정의할 수 있습니다.
/// 그 이상의 방언 분기는 이 레이어의 범위가 아닙니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// 식별자 인용 문자
    pub enclosure: char,

    /// 플레이스홀더 마커
    pub placeholder: &'static str,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            enclosure: '"',
            placeholder: "?",
        }
    }
}

impl Dialect {
    /// MySQL 스타일 (백틱 인용)
    pub fn mysql() -> Self {
        Self {
            enclosure: '`',
            placeholder: "?",
        }
    }
}

/// 컴파일 결과
///
/// `sql`의 플레이스홀더 개수는 항상 `params.len()`과 같으며,
/// i번째 플레이스홀더는 `params[i]`에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// SQL 텍스트 (트리밍됨)
    pub sql: String,

    /// 바인딩 파라미터 (좌→우 순서)
    pub params: Vec<Value>,
}

/// SQL 텍스트/파라미터 누적 버퍼
#[derive(Debug)]
pub struct SqlWriter {
    dialect: Dialect,
    sql: String,
    params: Vec<Value>,
}

impl SqlWriter {
    /// 새 writer (문장당 하나, 재사용 금지)
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// 방언 설정
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// raw 텍스트 추가
    pub fn push(&mut self, text: &str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    /// 플레이스홀더 추가 + 파라미터 바인딩
    ///
    /// 텍스트에 마커가 찍히는 순간 파라미터가 push되므로 정렬이
    /// 깨질 수 없습니다.
    pub fn bind(&mut self, value: Value) -> &mut Self {
        self.sql.push_str(self.dialect.placeholder);
        self.params.push(value);
        self
    }

    /// 그룹 열기. `close_group`과 항상 쌍으로 호출됩니다.
    pub fn open_group(&mut self) -> &mut Self {
        self.sql.push('(');
        self
    }

    /// 그룹 닫기
    pub fn close_group(&mut self) -> &mut Self {
        self.sql.push(')');
        self
    }

    /// 식별자 인용
    ///
    /// `.`으로 분리된 세그먼트를 각각 인용합니다
    /// (`table.column` → `"table"."column"`). `*` 세그먼트는
    /// 인용하지 않습니다.
    pub fn ident(&mut self, name: &str) -> &mut Self {
        let quoted = self.quoted(name);
        self.sql.push_str(&quoted);
        self
    }

    /// 인용된 식별자 문자열
    pub fn quoted(&self, name: &str) -> String {
        let e = self.dialect.enclosure;
        name.split('.')
            .map(|segment| {
                if segment == "*" {
                    segment.to_string()
                } else {
                    let escaped: String = segment
                        .chars()
                        .flat_map(|c| {
                            if c == e {
                                vec![e, e]
                            } else {
                                vec![c]
                            }
                        })
                        .collect();
                    format!("{e}{escaped}{e}")
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// 이미 렌더링된 SQL 조각과 그 파라미터를 그대로 추가
    pub fn raw(&mut self, sql: &str, params: &[Value]) -> &mut Self {
        self.sql.push_str(sql);
        self.params.extend(params.iter().cloned());
        self
    }

    /// 구분자 join
    ///
    /// 구분자는 원소 사이에만 삽입됩니다. 뒤에 붙은 구분자를 잘라내는
    /// 프리미티브는 의도적으로 존재하지 않습니다.
    pub fn join<T>(
        &mut self,
        items: &[T],
        separator: &str,
        mut f: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            f(self, item)?;
        }
        Ok(())
    }

    /// 컴파일 완료. writer를 소비하고 트리밍된 결과를 반환합니다.
    pub fn finish(self) -> Statement {
        Statement {
            sql: self.sql.trim().to_string(),
            params: self.params,
        }
    }
}
