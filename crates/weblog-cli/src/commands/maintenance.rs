//! `maintenance` subcommand handlers.
//!
//! Admin-only on the site; here anyone with shell access to the data
//! directory already has full control, so there is no extra gate.

use crate::cli::MaintenanceCommands;
use crate::context::AppContext;

pub fn dispatch(ctx: &AppContext, command: MaintenanceCommands) -> anyhow::Result<()> {
    match command {
        MaintenanceCommands::Optimize { json } => handle_optimize(ctx, json),
        MaintenanceCommands::Report { json } => handle_report(ctx, json),
    }
}

fn handle_optimize(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let report = ctx.store().optimize()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !ctx.quiet() {
        println!(
            "posts: kept {}, dropped {}",
            report.posts.kept, report.posts.dropped
        );
        println!(
            "gallery: kept {}, dropped {}",
            report.gallery.kept, report.gallery.dropped
        );
        println!(
            "contact_messages: kept {}, dropped {}",
            report.contact_messages.kept, report.contact_messages.dropped
        );
        if report.total_dropped() == 0 {
            println!("Nothing to remove; data files are clean.");
        } else {
            println!("Removed {} invalid line(s).", report.total_dropped());
        }
    }
    Ok(())
}

fn handle_report(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let report = ctx.store().report()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !ctx.quiet() {
        println!("Storage backend: text files");
        println!("Data directory: {}", ctx.store().data_dir().display());
        println!("Users: {}", report.users);
        println!("Posts: {}", report.posts);
        println!("Gallery items: {}", report.gallery_items);
        println!("Contact messages: {}", report.contact_messages);
        println!("Disk space used: {}", format_bytes(report.data_bytes));
    }
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
