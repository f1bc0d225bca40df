use core::str::FromStr;

use thiserror::Error;

/// Menu choice decoded from one input line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Restock,
    Sell,
    Exit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid choice '{0}'")]
pub struct InvalidChoice(pub String);

impl FromStr for ShellCommand {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(ShellCommand::Restock),
            "2" => Ok(ShellCommand::Sell),
            "3" => Ok(ShellCommand::Exit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}
