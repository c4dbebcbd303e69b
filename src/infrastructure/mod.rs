pub mod config;
pub mod http_client;
pub mod input;
pub mod logging;
pub mod output;
