use prettytable::{row, Table};
use serde::Serialize;

use crate::config::Config;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowView<'a> {
    url: String,
    address: &'a str,
    port: u16,
    path: &'a str,
    network_timeout_ms: u64,
    poll_interval_ms: u64,
    may_overlap: bool,
    outputs: Vec<OutputView<'a>>,
}

#[derive(Serialize)]
struct OutputView<'a> {
    index: usize,
    label: &'a str,
}

pub fn render_json(cfg: &Config) -> serde_json::Result<String> {
    let ep = cfg.endpoint();
    let timing = cfg.timing();
    let view = ShowView {
        url: ep.url(),
        address: ep.address(),
        port: ep.port(),
        path: ep.path(),
        network_timeout_ms: timing.network_timeout_ms(),
        poll_interval_ms: timing.poll_interval_ms(),
        may_overlap: timing.may_overlap(),
        outputs: cfg.outputs().iter().map(|(index, label)| OutputView { index, label }).collect(),
    };
    serde_json::to_string_pretty(&view)
}

pub fn render_table(cfg: &Config) -> String {
    let ep = cfg.endpoint();
    let timing = cfg.timing();

    let mut settings = Table::new();
    settings.add_row(row!["Setting", "Value"]);
    settings.add_row(row!["Address", ep.address()]);
    settings.add_row(row!["Port", ep.port().to_string()]);
    settings.add_row(row!["Path", ep.path()]);
    settings.add_row(row!["URL", ep.url()]);
    settings.add_row(row!["Network timeout", format!("{} ms", timing.network_timeout_ms())]);
    settings.add_row(row!["Poll interval", format!("{} ms", timing.poll_interval_ms())]);

    let mut outputs = Table::new();
    outputs.add_row(row!["#", "Output"]);
    for (index, label) in cfg.outputs().iter() {
        outputs.add_row(row![index.to_string(), label]);
    }

    format!("{settings}{outputs}")
}
