use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasklist::init::HOME_ENV;
use tasklist::model::Category;

#[derive(Parser, Debug)]
#[command(name = "tl", bin_name = "tl", version)]
#[command(about = "Task lists from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = HOME_ENV, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every list with its tasks (default)
    #[command(alias = "ls")]
    Lists,

    /// Show every task, soonest due first
    Agenda,

    /// Create a list
    AddList {
        name: String,

        #[arg(short, long, default_value = "personal", value_parser = parse_category)]
        category: Category,
    },

    /// Rename a list or change its category
    RenameList {
        /// List position or id
        list: String,

        name: String,

        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
    },

    /// Delete lists and all of their tasks
    RmList {
        #[arg(required = true, num_args = 1..)]
        lists: Vec<String>,
    },

    /// Add a task to a list
    Add {
        /// List position or id
        list: String,

        title: String,

        #[arg(short, long, default_value = "")]
        details: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, conflicts_with = "in_days")]
        due: Option<NaiveDate>,

        /// Due this many days from now
        #[arg(long)]
        in_days: Option<i64>,

        /// Defaults to the list's category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Change fields of a task
    Edit {
        /// Task position (2.1) or id
        task: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        details: Option<String>,

        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,

        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Move the task to another list
        #[arg(long)]
        list: Option<String>,
    },

    /// Mark a task completed, or pending again
    Toggle { task: String },

    /// Delete tasks
    Rm {
        #[arg(required = true, num_args = 1..)]
        tasks: Vec<String>,
    },

    /// Show one task in full
    Show { task: String },

    /// Get or set configuration values
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
