use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use weblog_core::VERSION;

/// Weblog - operator interface for the file-backed weblog store
#[derive(Parser)]
#[command(name = "weblog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the data directory holding the entity files
    #[arg(short, long, global = true, env = "WEBLOG_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Config file override
    #[arg(long, global = true, env = "WEBLOG_CONFIG")]
    pub config: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and create the data directory
    Init {
        /// Directory for the entity files
        #[arg(value_name = "DIR")]
        dir: Option<String>,
    },

    /// Register a new user
    Register(RegisterArgs),

    /// Log in as a user and show the resulting session
    Login(LoginArgs),

    /// User operations
    #[command(subcommand)]
    User(UserCommands),

    /// Post operations
    #[command(subcommand)]
    Post(PostCommands),

    /// Gallery operations
    #[command(subcommand)]
    Gallery(GalleryCommands),

    /// Contact message operations
    #[command(subcommand)]
    Contact(ContactCommands),

    /// Admin maintenance operations
    #[command(subcommand)]
    Maintenance(MaintenanceCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// First name
    #[arg(long)]
    pub firstname: String,

    /// Last name
    #[arg(long)]
    pub lastname: String,

    /// Login alias (unique, case-insensitive)
    #[arg(long)]
    pub alias: String,

    /// Email address (unique, case-insensitive)
    #[arg(long)]
    pub email: String,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Alias to log in as
    #[arg(value_name = "ALIAS")]
    pub alias: String,

    /// Mint a remember-me token and print it
    #[arg(long)]
    pub remember: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List registered users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// Add a new post
    Add(PostAddArgs),

    /// List posts, newest first
    List(ListArgs),

    /// Show a specific post by ID
    Show {
        /// Post ID
        #[arg(value_name = "ID")]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for `post add`
#[derive(Args)]
pub struct PostAddArgs {
    /// Post title
    #[arg(long)]
    pub title: String,

    /// Post body
    #[arg(long)]
    pub content: String,

    /// Alias of the authoring user
    #[arg(long)]
    pub author: String,

    /// Relative path of an already-uploaded image
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand)]
pub enum GalleryCommands {
    /// Record an already-uploaded image
    Add {
        /// Relative path of the stored image
        #[arg(long)]
        filename: String,

        /// Uploader display name (defaults to "anonymous")
        #[arg(long)]
        by: Option<String>,
    },

    /// List gallery items, newest first
    List(ListArgs),
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Record a contact form message
    Add {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// List contact messages, newest first
    List(ListArgs),
}

#[derive(Subcommand)]
pub enum MaintenanceCommands {
    /// Rewrite the content data files, dropping lines that no longer parse
    Optimize {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show entity counts and disk usage
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Shared paging arguments for the list commands
#[derive(Args)]
pub struct ListArgs {
    /// Limit number of results (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of newest records to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
