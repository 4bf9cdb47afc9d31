use crate::config::Config;
use crate::error::IndexError;

pub fn render_label(cfg: &Config, index: i64) -> Result<String, IndexError> {
    cfg.output_label(index).map(|l| format!("{l}\n"))
}
