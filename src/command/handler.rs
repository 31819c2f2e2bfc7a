//! Command Handler
//!
//! Validates command arguments and routes them to the engine.

use crate::engine::Engine;
use crate::error::Result;
use crate::record::Record;
use crate::util::{
    generate_secret, validate_secret, validate_service, validate_username, DEFAULT_SECRET_LENGTH,
};

use super::{Command, Reply};

/// Executes commands against one engine
///
/// Owns no storage state of its own.
pub struct CommandHandler {
    engine: Engine,
}

impl CommandHandler {
    /// Create a handler over an open engine
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Execute a command
    ///
    /// Arguments are validated before the engine is called, so an invalid
    /// command never touches disk.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        tracing::trace!("Executing {}", command.command_type());

        match command {
            Command::Add {
                service,
                username,
                secret,
            } => {
                let record = Self::validated_record(service, username, secret)?;
                self.engine.create(&record.service, &record)?;
                Ok(Reply::Added {
                    service: record.service,
                })
            }
            Command::Get { service } => {
                validate_service(&service)?;
                let record = self.engine.read(&service)?;
                Ok(Reply::Entry(record))
            }
            Command::Update {
                service,
                username,
                secret,
            } => {
                let record = Self::validated_record(service, username, secret)?;
                self.engine.update(&record.service, &record)?;
                Ok(Reply::Updated {
                    service: record.service,
                })
            }
            Command::Delete { service } => {
                validate_service(&service)?;
                self.engine.delete(&service)?;
                Ok(Reply::Deleted { service })
            }
            Command::List => Ok(Reply::Services(self.engine.list())),
            Command::Generate { length } => {
                let secret = generate_secret(length.unwrap_or(DEFAULT_SECRET_LENGTH))?;
                Ok(Reply::Generated(secret))
            }
        }
    }

    /// Get the underlying engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Take the engine back
    pub fn into_engine(self) -> Engine {
        self.engine
    }

    fn validated_record(service: String, username: String, secret: String) -> Result<Record> {
        validate_service(&service)?;
        validate_username(&username)?;
        validate_secret(&secret)?;
        Ok(Record::new(service, username, secret))
    }
}
