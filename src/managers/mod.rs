pub mod contract_manager;
pub mod market_manager;
pub mod metadata_manager;
pub mod notification_manager;
