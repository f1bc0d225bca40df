//! Interactive supermarket stock shell.

pub mod command;
pub mod render;
pub mod shell;

pub use command::{InvalidChoice, ShellCommand};
pub use shell::{ShellError, run};
