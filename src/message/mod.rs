//! The IRC message: tags, prefix, command and parameters.

mod parse;
mod serialize;
pub mod tags;
mod types;

pub use self::parse::{parse_command, parse_params};
pub use self::tags::{parse_tags, Tags};
pub use self::types::Message;
