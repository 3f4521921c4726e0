//! 스키마 기술(description) 타입
//!
//! DDL 컴파일러의 입력이 되는 테이블/컬럼/제약/트리거/권한 정의입니다.
//! 모두 컴파일 호출마다 생성되고 버려지는 일시적 데이터이며,
//! 컴파일러에 넘겨진 뒤에는 변경되지 않습니다.

mod column;
mod grant;
mod index;
mod table;
mod trigger;
mod types;

pub use column::{ColumnDef, DefaultValue, Reference, ReferentialAction};
pub use grant::{GrantDef, OneOrMany, UserDef};
pub use index::IndexDef;
pub use table::{ForeignKey, TableDef};
pub use trigger::{TriggerContext, TriggerDef, TriggerEvent, TriggerFactory, TriggerTiming};
pub use types::ColumnKind;
