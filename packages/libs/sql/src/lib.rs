//! qk-sql: Querykit SQL 컴파일러
//!
//! 구조화된 DDL/DML 기술(description)을 `{sql, params}` 문장으로
//! 컴파일합니다. 컴파일은 순수 문자열 조립이며, DB 연결/실행/트랜잭션은
//! 이 크레이트의 범위 밖입니다.
//!
//! # 핵심 불변식
//!
//! - 플레이스홀더와 파라미터는 항상 좌→우 순서로 정렬됩니다.
//! - 모든 값은 플레이스홀더로 바인딩되며 텍스트에 삽입되지 않습니다
//!   (DDL DEFAULT 절 제외).
//! - 동일한 입력은 항상 동일한 출력을 냅니다.
//!
//! # 예시
//!
//! ```
//! use qk_core::expr::Expr;
//! use qk_core::token::between;
//! use qk_sql::{SelectBuilder, SelectParams};
//!
//! let params = SelectParams {
//!     table: "user".to_string(),
//!     r#where: Some(Expr::map([("age", between(18, 100))])),
//!     ..Default::default()
//! };
//! let stmt = SelectBuilder::default().build(&params).unwrap();
//! assert_eq!(stmt.sql, "SELECT * FROM \"user\" WHERE (\"age\" BETWEEN ? AND ?)");
//! ```

pub mod builder;
pub mod ddl;
pub mod params;
pub mod writer;

pub use builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use ddl::DdlGenerator;
pub use params::{
    ColumnQuery, DeleteParams, DuplicateKey, InsertParams, Join, JoinKind, OrderBy,
    SelectColumn, SelectParams, SetValue, SortOrder, UpdateParams,
};
pub use writer::{Dialect, SqlWriter, Statement};
