//! CLI entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `grc_core` linkage.
//! - Normalize an exported CSV file into entities printed as JSON.
//!
//! Usage: `grc_cli [<export.csv> <ObjectType>]`. Logging is enabled when
//! `GRC_LOG_DIR` is set.

use grc_core::scope::csv_export::{first_block_scopes, read_export_csv};
use grc_core::{create_list_objs, ObjectType};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var("GRC_LOG_DIR") {
        if let Err(err) = grc_core::init_logging(grc_core::default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("grc_core ping={}", grc_core::ping());
            println!("grc_core version={}", grc_core::core_version());
            ExitCode::SUCCESS
        }
        [csv_path, type_name] => match print_csv_objs(csv_path, type_name) {
            Ok(()) => ExitCode::SUCCESS,
            Err(message) => {
                log::error!("event=cli_csv module=cli status=error error={message}");
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: grc_cli [<export.csv> <ObjectType>]");
            ExitCode::from(2)
        }
    }
}

fn print_csv_objs(csv_path: &str, type_name: &str) -> Result<(), String> {
    let obj_type = ObjectType::from_name(type_name).map_err(|err| err.to_string())?;
    let csv_scopes = read_export_csv(csv_path).map_err(|err| format!("{csv_path}: {err}"))?;
    let scopes = first_block_scopes(obj_type, &csv_scopes).ok_or_else(|| {
        format!("first block of {csv_path} does not hold `{}` objects", obj_type.name())
    })?;

    let objs = create_list_objs(obj_type, &scopes).map_err(|err| err.to_string())?;
    log::info!(
        "event=cli_csv module=cli status=ok type={} count={}",
        obj_type.name(),
        objs.len()
    );
    let json = serde_json::to_string_pretty(&objs).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}
