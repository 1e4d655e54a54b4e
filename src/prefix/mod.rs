//! IRC message prefix (source) types.

mod parse;
mod serialize;
mod types;

pub use self::parse::parse_prefix;
pub use self::types::Prefix;
