//! CLI subcommands. Each renders to a `String` so the binary decides where it goes.
pub mod check;
pub mod find;
pub mod init;
pub mod label;
pub mod show;
