pub mod config;
pub mod dispatch;
pub mod error;
pub mod parsers;
pub mod relay;
pub mod response;
pub mod server;
pub mod tools;
