pub mod config;
pub mod framing;
pub mod input;
pub mod protocol;
pub mod render;
pub mod server;

pub use config::{ConfigError, InputPolicy, ServiceConfig};
pub use input::{resolve_input, ScoreArgs};
pub use server::AdiServer;
