//! Reply definitions
//!
//! Results of executed commands, rendered for a terminal.

use std::fmt;

use crate::record::Record;

/// The outcome of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A credential was stored
    Added { service: String },

    /// The credential that was asked for
    Entry(Record),

    /// A credential was replaced
    Updated { service: String },

    /// A credential was removed
    Deleted { service: String },

    /// Stored service names
    Services(Vec<String>),

    /// A freshly generated secret
    Generated(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Added { service } => write!(f, "Password added for service: {}", service),
            Reply::Entry(record) => {
                writeln!(f, "Service: {}", record.service)?;
                writeln!(f, "Username: {}", record.username)?;
                write!(f, "Password: {}", record.secret)
            }
            Reply::Updated { service } => write!(f, "Password updated for service: {}", service),
            Reply::Deleted { service } => write!(f, "Deleted password for service: {}", service),
            Reply::Services(services) if services.is_empty() => {
                write!(f, "No stored services found")
            }
            Reply::Services(services) => {
                write!(f, "Stored services:")?;
                for service in services {
                    write!(f, "\n- {}", service)?;
                }
                Ok(())
            }
            Reply::Generated(secret) => write!(f, "Generated password: {}", secret),
        }
    }
}
