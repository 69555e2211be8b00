mod app;
mod controller;
mod ui;

use std::env;
use std::fs::File;

use artworks_lib::ArticClient;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;

/// Log level from `ARTWORKS_LOG`, defaulting to `info`.
fn log_level() -> LevelFilter {
    match env::var("ARTWORKS_LOG").ok().as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

#[tokio::main]
async fn main() {
    let log_file = File::create("artworks-tui.log").expect("Failed to create log file");
    WriteLogger::init(log_level(), Config::default(), log_file)
        .expect("Failed to initialize logger");

    let client = match env::var("ARTIC_API_URL") {
        Ok(url) => ArticClient::builder().base_url(url).build(),
        Err(_) => ArticClient::new(),
    };
    log::info!("starting against {}", client.base_url());

    let mut terminal = ratatui::init();
    let result = App::new(client).run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}
