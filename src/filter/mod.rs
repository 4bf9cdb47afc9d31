pub mod matcher;

pub use matcher::{find_outputs, wildcard_match};
