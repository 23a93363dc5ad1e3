//! oneshot のドメイン型

pub mod command;

pub use command::OneshotCommand;
