//! Command definitions
//!
//! Represents requests from a user interface.

use std::fmt;

use crate::error::{Result, WardenError};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Add,
    Get,
    Update,
    Delete,
    List,
    Generate,
}

impl CommandType {
    /// Usage line shown when arguments are wrong
    pub fn usage(&self) -> &'static str {
        match self {
            CommandType::Add => "add <service> <username> <secret>",
            CommandType::Get => "get <service>",
            CommandType::Update => "update <service> <username> <secret>",
            CommandType::Delete => "delete <service>",
            CommandType::List => "list",
            CommandType::Generate => "generate [length]",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::Add => "add",
            CommandType::Get => "get",
            CommandType::Update => "update",
            CommandType::Delete => "delete",
            CommandType::List => "list",
            CommandType::Generate => "generate",
        };
        f.write_str(name)
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a new credential
    Add {
        service: String,
        username: String,
        secret: String,
    },

    /// Show a credential
    Get { service: String },

    /// Replace an existing credential
    Update {
        service: String,
        username: String,
        secret: String,
    },

    /// Remove a credential
    Delete { service: String },

    /// List stored services
    List,

    /// Generate a random secret (nothing is stored)
    Generate { length: Option<usize> },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Add { .. } => CommandType::Add,
            Command::Get { .. } => CommandType::Get,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::List => CommandType::List,
            Command::Generate { .. } => CommandType::Generate,
        }
    }

    /// Parse one shell line
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("add", [service, username, secret]) => Command::Add {
                service: service.to_string(),
                username: username.to_string(),
                secret: secret.to_string(),
            },
            ("get", [service]) => Command::Get {
                service: service.to_string(),
            },
            ("update", [service, username, secret]) => Command::Update {
                service: service.to_string(),
                username: username.to_string(),
                secret: secret.to_string(),
            },
            ("delete", [service]) => Command::Delete {
                service: service.to_string(),
            },
            ("list", []) => Command::List,
            ("generate", []) => Command::Generate { length: None },
            ("generate", [length]) => {
                let length = length.parse().map_err(|_| {
                    WardenError::InvalidInput(format!("invalid length: {}", length))
                })?;
                Command::Generate {
                    length: Some(length),
                }
            }
            (name, _) => {
                let kind = match name {
                    "add" => CommandType::Add,
                    "get" => CommandType::Get,
                    "update" => CommandType::Update,
                    "delete" => CommandType::Delete,
                    "list" => CommandType::List,
                    "generate" => CommandType::Generate,
                    other => {
                        return Err(WardenError::InvalidInput(format!(
                            "unknown command: {}",
                            other
                        )))
                    }
                };
                return Err(WardenError::InvalidInput(format!("usage: {}", kind.usage())));
            }
        };

        Ok(Some(command))
    }
}
