//! Infrastructure layer - Storage, provider and service implementations

pub mod cache;
pub mod locale;
pub mod logging;
pub mod services;
pub mod storage;
pub mod translation;
