//! Translation provider implementations

mod http_client;
mod libre_translate;

pub use http_client::{HttpClient, HttpClientTrait};
pub use libre_translate::LibreTranslateGateway;
