//! `user list` handler.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::context::AppContext;

pub fn handle_list(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let users = ctx.store().users().all()?;

    if json {
        // Password hashes stay out of the output
        let values: Vec<serde_json::Value> = users
            .iter()
            .map(|user| {
                serde_json::json!({
                    "id": user.id,
                    "alias": user.alias,
                    "firstname": user.firstname,
                    "lastname": user.lastname,
                    "email": user.email,
                    "created_at": user.created_at,
                    "is_admin": user.is_admin,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if users.is_empty() {
        if !ctx.quiet() {
            println!("No users registered.");
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ALIAS", "NAME", "EMAIL", "CREATED", "ADMIN"]);
    for user in &users {
        table.add_row(vec![
            user.alias.clone(),
            format!("{} {}", user.firstname, user.lastname),
            user.email.clone(),
            user.created_at.clone(),
            if user.is_admin { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
