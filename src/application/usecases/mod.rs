//! 유스케이스 모음.

pub mod generate_review;
pub mod inspect_config;
pub mod resolve_session;
