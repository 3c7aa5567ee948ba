use clap::{Parser, Subcommand};

/// Returns the version string, including the git hash for dev builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version = get_version())]
#[command(about = "Manage users on a remote REST service from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the user service (overrides ROSTER_URL and the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List users (the default command)
    #[command(alias = "ls")]
    List {
        /// Free-text search across name, username, email and company
        #[arg(short, long)]
        search: Option<String>,

        /// Only users whose name contains this
        #[arg(long)]
        name: Option<String>,

        /// Only users whose username contains this
        #[arg(long)]
        username: Option<String>,

        /// Only users whose email contains this
        #[arg(long)]
        email: Option<String>,

        /// Only users whose company name contains this
        #[arg(long)]
        company: Option<String>,

        /// Sort field: name, username, email or company
        #[arg(long, default_value = "name")]
        sort: String,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Users per page
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show one or more users in full
    #[command(alias = "v")]
    Show {
        /// Ids of the users
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },

    /// Create a new user
    #[command(alias = "n")]
    Create {
        /// Full name
        #[arg(long)]
        name: String,

        /// Username
        #[arg(long)]
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Website URL (optional)
        #[arg(long, default_value = "")]
        website: String,

        /// Company name
        #[arg(long)]
        company: String,
    },

    /// Edit an existing user; omitted fields keep their current values
    #[command(alias = "e")]
    Edit {
        /// Id of the user
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        website: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },

    /// Delete one or more users
    #[command(alias = "rm")]
    Delete {
        /// Ids of the users
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
