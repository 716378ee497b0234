//! webeq-report - print a session's curves, markers and export text
//!
//! Usage: `webeq-report [--config <path>] [--submit]`
//!
//! With `--submit` the export is written to the file store, allocating a
//! user id on first use and saving it back to the config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use webeq_core::config::{default_config_path, load_config, save_config, EditorConfig};
use webeq_core::curve::ResponseCurve;
use webeq_core::editor::{format_freq, EditorMessage};
use webeq_core::export::submit_export;
use webeq_core::services::{ensure_user_id, FileStore, StoreClient, StoreService};
use webeq_core::{EqSession, ViewMode};

fn print_curve(title: &str, curve: &ResponseCurve) {
    println!("== {} ==", title);
    if let (Some(min), Some(max)) = (curve.min_db(), curve.max_db()) {
        println!("  points: {}  min: {:.2} dB  max: {:.2} dB", curve.points.len(), min, max);
    }
    if let Some(at_1k) = curve.gain_near(1000.0) {
        println!("  at 1kHz: {:.2} dB", at_1k);
    }
}

fn print_usage() {
    println!("Usage: webeq-report [--config <path>] [--submit]");
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }
    let submit = args.iter().any(|arg| arg == "--submit");
    let config_path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut config: EditorConfig = load_config(&config_path);
    let mut session = EqSession::from_config(&config);

    print_curve("PEQ", session.curve());
    println!("  markers:");
    for marker in &session.curve().markers {
        let (x, y) = marker.pixel(&session.geometry());
        println!(
            "    {} {:<10} {:>8}  {:+6.2} dB  ({:.1}, {:.1})",
            marker.label(),
            marker.filter_type.to_string(),
            session
                .bank()
                .node(marker.id)
                .map(|n| format_freq(n.freq()))
                .unwrap_or_default(),
            marker.gain_db,
            x,
            y
        );
    }
    println!("  filters:");
    for summary in session.node_summaries() {
        println!("    {}", summary);
    }

    session.update(EditorMessage::SwitchView(ViewMode::GeqView));
    print_curve("GEQ", session.curve());
    session.update(EditorMessage::SwitchView(ViewMode::PeqView));

    let text = session.export_text_now();
    println!("== Export ==");
    print!("{}", text);

    if !submit {
        return Ok(());
    }

    let store = FileStore::open(config.resolved_store_dir())?;
    let mut handle = StoreService::spawn(store)?;
    let client = StoreClient::new(&handle);
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let result = runtime.block_on(async {
        let user_id = ensure_user_id(&client, config.user_id.as_deref()).await?;
        submit_export(&client, Some(user_id.as_str()), &text).await?;
        Ok::<_, webeq_core::error::StoreError>(user_id)
    });

    session.record_export_result(result.is_ok());
    client.shutdown()?;
    handle.join();

    let user_id = result.context("Export submission failed")?;
    if config.user_id.as_deref() != Some(user_id.as_str()) {
        config.user_id = Some(user_id.clone());
        save_config(&config, &config_path)?;
    }
    println!("Export saved for user {}", user_id);
    Ok(())
}
