//! Configuration layer: validated store, file I/O and default locations.
pub mod io;
pub mod path;
pub mod store;

pub use io::{load_config, read_raw, write_config, ConfigFormat};
pub use path::config_path;
pub use store::Config;
