//! `contact` subcommand handlers.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use weblog_core::model::NewContactMessage;

use crate::cli::ContactCommands;
use crate::context::AppContext;

pub fn dispatch(ctx: &AppContext, command: ContactCommands) -> anyhow::Result<()> {
    match command {
        ContactCommands::Add {
            name,
            email,
            message,
        } => handle_add(ctx, &name, &email, &message),
        ContactCommands::List(args) => handle_list(ctx, args.limit, args.offset, args.json),
    }
}

fn handle_add(ctx: &AppContext, name: &str, email: &str, message: &str) -> anyhow::Result<()> {
    ctx.store()
        .contact()
        .add(NewContactMessage::new(name, email, message))?;

    if !ctx.quiet() {
        println!("Message recorded.");
    }
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    limit: Option<usize>,
    offset: usize,
    json: bool,
) -> anyhow::Result<()> {
    let messages = ctx.store().contact().list(ctx.page(limit, offset))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        if !ctx.quiet() {
            println!("No contact messages.");
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["DATE", "NAME", "EMAIL", "MESSAGE"]);
    for message in &messages {
        table.add_row(vec![
            message.date.clone(),
            message.name.clone(),
            message.email.clone(),
            preview(&message.message, 60),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn preview(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let cut: String = message.chars().take(max_chars).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_messages() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly ten", 11), "exactly ten");
        assert_eq!(preview("a".repeat(20).as_str(), 5), "aaaaa...");
    }
}
