//! 인프라 계층(설정 파일/카탈로그 출처/HTTP provider) 구현.

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod providers;
