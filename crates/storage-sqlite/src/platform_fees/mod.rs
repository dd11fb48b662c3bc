//! SQLite storage implementation for platform fee profiles.

mod model;
mod repository;

pub use model::PlatformFeeSettingDB;
pub use repository::PlatformFeeRepository;
