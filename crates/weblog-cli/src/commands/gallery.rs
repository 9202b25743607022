//! `gallery` subcommand handlers.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use weblog_core::model::NewGalleryItem;

use crate::cli::GalleryCommands;
use crate::context::AppContext;

pub fn dispatch(ctx: &AppContext, command: GalleryCommands) -> anyhow::Result<()> {
    match command {
        GalleryCommands::Add { filename, by } => handle_add(ctx, &filename, by.as_deref()),
        GalleryCommands::List(args) => handle_list(ctx, args.limit, args.offset, args.json),
    }
}

fn handle_add(ctx: &AppContext, filename: &str, by: Option<&str>) -> anyhow::Result<()> {
    let mut new_item = NewGalleryItem::new(filename);
    if let Some(name) = by {
        new_item = new_item.with_uploader(name);
    }
    let item = ctx.store().gallery().add(new_item)?;

    if !ctx.quiet() {
        println!("Recorded {} (by {})", item.filename, item.uploaded_by);
    }
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    limit: Option<usize>,
    offset: usize,
    json: bool,
) -> anyhow::Result<()> {
    let items = ctx.store().gallery().list(ctx.page(limit, offset))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        if !ctx.quiet() {
            println!("No images in the gallery.");
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["FILENAME", "UPLOADED BY", "DATE"]);
    for item in &items {
        table.add_row(vec![
            item.filename.clone(),
            item.uploaded_by.clone(),
            item.upload_date.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
