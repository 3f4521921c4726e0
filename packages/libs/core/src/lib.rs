//! qk-core: Querykit 공통 타입
//!
//! SQL 컴파일러의 입력이 되는 순수 데이터 타입들을 정의합니다.
//!
//! # 모듈 구조
//!
//! - `token`: 표현식 토큰 모델 (비교/논리/산술/함수/raw)
//! - `expr`: 재귀 조건 표현식 문법
//! - `schema`: 테이블/컬럼/제약/트리거/권한 정의
//! - `error`: 공통 에러 타입

pub mod error;
pub mod expr;
pub mod schema;
pub mod token;

pub use error::{Error, Result};
