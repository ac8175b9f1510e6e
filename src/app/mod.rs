// Application layer: the interactive command interface on top of the core.

pub mod command;
pub mod render;
pub mod session;

pub use command::Command;
pub use session::{Reply, Session};
