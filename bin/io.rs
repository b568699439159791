use async_trait::async_trait;
use std::io;

mod pipe;

pub use pipe::*;

/// Trait for types that communicate line by line.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Io {
    /// Receive a line.
    async fn recv(&mut self) -> io::Result<String>;

    /// Send a line.
    async fn send(&mut self, msg: &str) -> io::Result<()>;

    /// Flush the internal buffers.
    async fn flush(&mut self) -> io::Result<()>;
}
