//! Command-line interface definition for Reliefdesk
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive shell plus one-shot commands for session
//! management, view rendering, CSV export and record CRUD.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reliefdesk - disaster-relief coordination client
///
/// Browse help requests, volunteers and emergency contacts, and manage
/// rescue operations and relief supplies once logged in as admin.
#[derive(Parser, Debug, Clone)]
#[command(name = "reliefdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL (e.g. http://localhost:8081/api/v1)
    #[arg(long, env = "RELIEFDESK_API_URL")]
    pub api_url: Option<String>,

    /// Persist the session in this file instead of the configured backend
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Keep the session in memory only for this run
    #[arg(long, conflicts_with = "session_file")]
    pub ephemeral: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Search and filter flags shared by list-oriented commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Case-insensitive text search across the view's text columns
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact-match field filter, repeatable (e.g. --filter status=pending)
    #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,
}

/// Available commands for Reliefdesk
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive navigation shell
    Shell {
        /// Route to open first
        #[arg(default_value = "/")]
        path: String,
    },

    /// Log in as administrator
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "RELIEFDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Render a single view and exit
    Open {
        /// Route path (e.g. /help-requests)
        path: String,

        #[command(flatten)]
        list: ListArgs,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Export a list view to CSV
    Export {
        /// Route path of the list view
        path: String,

        #[command(flatten)]
        list: ListArgs,

        /// Output file (defaults to <resource>-<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one record
    Get {
        /// Route path of the resource
        path: String,
        /// Record id
        id: u64,
    },

    /// Create a record from a JSON body
    Create {
        /// Route path of the resource
        path: String,
        /// JSON object with the record fields
        #[arg(short, long)]
        data: String,
    },

    /// Update a record from a JSON body
    Update {
        /// Route path of the resource
        path: String,
        /// Record id
        id: u64,
        /// JSON object with the fields to store
        #[arg(short, long)]
        data: String,
    },

    /// Delete a record
    Delete {
        /// Route path of the resource
        path: String,
        /// Record id
        id: u64,
    },

    /// Check backend connectivity
    Health,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            api_url: None,
            session_file: None,
            ephemeral: false,
            no_color: false,
            command: Commands::Whoami,
        }
    }
}
