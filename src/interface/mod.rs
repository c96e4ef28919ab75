//! Interface layer
//! CLI와 HTTP 진입점.

pub mod cli;
pub mod http;
