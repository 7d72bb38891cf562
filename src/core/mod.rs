pub mod bridge;
pub mod media;
pub mod media_server;
