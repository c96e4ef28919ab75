//! Domain layer
//! 리조트 카탈로그, 리뷰 프롬프트 정책, URL 세션 규칙을 I/O 없이 표현한다.

pub mod policy;
pub mod resort;
pub mod review;
pub mod session;
