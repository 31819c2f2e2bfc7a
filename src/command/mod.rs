//! Command Module
//!
//! Dispatch layer between a user interface and the engine.
//!
//! ## Shell Syntax
//! ```text
//! add <service> <username> <secret>
//! get <service>
//! update <service> <username> <secret>
//! delete <service>
//! list
//! generate [length]
//! ```
//!
//! Arguments are whitespace-separated, so none of them may contain spaces
//! when typed at the shell. The one-shot CLI passes arguments through
//! untouched.
//!
//! A record is keyed by its service name.

mod handler;
mod request;
mod response;

pub use handler::CommandHandler;
pub use request::{Command, CommandType};
pub use response::Reply;
