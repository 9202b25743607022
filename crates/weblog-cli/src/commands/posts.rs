//! `post` subcommand handlers.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use weblog_core::model::NewPost;

use crate::cli::{PostAddArgs, PostCommands};
use crate::context::AppContext;

pub fn dispatch(ctx: &AppContext, command: PostCommands) -> anyhow::Result<()> {
    match command {
        PostCommands::Add(args) => handle_add(ctx, &args),
        PostCommands::List(args) => handle_list(ctx, args.limit, args.offset, args.json),
        PostCommands::Show { id, json } => handle_show(ctx, &id, json),
    }
}

fn handle_add(ctx: &AppContext, args: &PostAddArgs) -> anyhow::Result<()> {
    let author = ctx
        .store()
        .users()
        .find_by_alias(&args.author)?
        .ok_or_else(|| anyhow::anyhow!("User \"{}\" not found", args.author))?;

    let mut new_post = NewPost::new(&args.title, &args.content);
    if let Some(ref image) = args.image {
        new_post = new_post.with_image(image);
    }
    let post = ctx.store().posts().create(new_post, &author)?;

    if !ctx.quiet() {
        println!("Added post {}", post.id);
    }
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    limit: Option<usize>,
    offset: usize,
    json: bool,
) -> anyhow::Result<()> {
    let posts = ctx.store().posts().list(ctx.page(limit, offset))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        if !ctx.quiet() {
            println!("No posts found.");
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "CREATED", "AUTHOR", "TITLE"]);
    for post in &posts {
        table.add_row(vec![
            short_id(&post.id),
            post.created_at.clone(),
            post.author_name(),
            post.title.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str, json: bool) -> anyhow::Result<()> {
    let post = ctx
        .store()
        .posts()
        .find_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("Post not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    if !ctx.quiet() {
        println!("ID: {}", post.id);
        println!("Title: {}", post.title);
        println!("Author: {}", post.author_name());
        println!("Created: {}", post.created_at);
        if let Some(ref image) = post.image_path {
            println!("Image: {}", image);
        }
        println!();
    }
    println!("{}", post.content);
    Ok(())
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
