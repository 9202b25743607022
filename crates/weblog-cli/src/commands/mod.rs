//! Command handlers, one module per subcommand group.

pub mod auth;
pub mod contact;
pub mod gallery;
pub mod init;
pub mod maintenance;
pub mod posts;
pub mod users;

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, Commands, UserCommands};
use crate::context::AppContext;

pub fn dispatch(ctx: &AppContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init { dir } => init::handle_init(ctx, dir.as_deref()),
        Commands::Register(args) => auth::handle_register(ctx, &args),
        Commands::Login(args) => auth::handle_login(ctx, &args),
        Commands::User(UserCommands::List { json }) => users::handle_list(ctx, json),
        Commands::Post(command) => posts::dispatch(ctx, command),
        Commands::Gallery(command) => gallery::dispatch(ctx, command),
        Commands::Contact(command) => contact::dispatch(ctx, command),
        Commands::Maintenance(command) => maintenance::dispatch(ctx, command),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "weblog", &mut std::io::stdout());
            Ok(())
        }
    }
}
