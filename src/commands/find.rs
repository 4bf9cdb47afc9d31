use prettytable::{row, Table};

use crate::config::Config;
use crate::filter::find_outputs;

pub fn render_find(cfg: &Config, pattern: &str) -> String {
    let hits = find_outputs(cfg.outputs(), pattern);
    if hits.is_empty() {
        return "No outputs match your pattern.\n".to_string();
    }
    let mut table = Table::new();
    table.add_row(row!["#", "Output"]);
    for (index, label) in hits {
        table.add_row(row![index.to_string(), label]);
    }
    table.to_string()
}
