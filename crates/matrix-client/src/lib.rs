//! Matrix client-server API client for bots.

mod client;
mod error;
mod markdown;
mod receiver;
mod types;

pub use client::MatrixClient;
pub use error::MatrixError;
pub use markdown::render_html;
pub use receiver::MessageReceiver;
pub use types::*;
