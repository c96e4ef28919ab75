//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod catalog_loader;
mod config_repository;
mod gateway_factory;

pub use catalog_loader::ConfiguredCatalogLoader;
pub use config_repository::JsonConfigRepository;
pub use gateway_factory::GatewayFactoryAdapter;
