use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adminboard", bin_name = "adminboard", version)]
#[command(about = "Admin dashboard for a mock social forum", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Seed for the mock data (overrides the config file)
    #[arg(long, global = true, help_heading = "Options")]
    pub seed: Option<u64>,

    /// Config file to load on top of the user config
    #[arg(short, long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value_t = OutputMode::Text,
        help_heading = "Options"
    )]
    pub output: OutputMode,

    /// Verbose logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List threads
    Threads(ListArgs),
    /// List users
    Users(ListArgs),
    /// Show the dashboard summary
    Dashboard,
    /// Show the settings form
    Settings,
    /// Interactive session reading one command per line (default)
    Shell,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive substring search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact match on the filter field (device for threads, role for users)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort key
    #[arg(long)]
    pub sort: Option<String>,

    /// Page number, clamped to the available pages
    #[arg(short, long)]
    pub page: Option<usize>,
}

/// One line of an interactive session.
#[derive(Parser, Debug)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SidebarArg {
    Toggle,
    Close,
    Collapse,
    Search,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToggleArg {
    Notifications,
    Maintenance,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Go to a view: /, /threads, /users, /settings
    Goto { path: String },
    /// Mobile overlay, desktop collapse and mobile search box
    Sidebar {
        #[arg(value_enum)]
        action: SidebarArg,
    },
    /// Type into the header search box
    HeaderSearch {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// Search the current list (no term clears the search)
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// Exact filter on the current list
    Filter {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Remove the exact filter
    ClearFilter,
    /// Sort the current list
    Sort { key: String },
    /// Next page
    Next,
    /// Previous page
    Prev,
    /// Jump to a page
    Page { number: usize },
    /// Render the current view
    Show,
    /// Open the add form for the current list
    Add,
    /// Set a field on the add form
    Set {
        field: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Validate and save the add form
    Submit,
    /// Close the add form without saving
    Cancel,
    /// Change one field of a record in the current list
    Update {
        id: u64,
        field: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Remove a record from the current list
    Remove { id: u64 },
    /// Rename the site
    SiteName {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Flip a settings switch
    Toggle {
        #[arg(value_enum)]
        which: ToggleArg,
    },
    /// Save the settings (mock)
    Save,
    /// List session commands
    Help,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

impl SessionLine {
    /// Parses a raw input line. Multi-word values are taken as the rest of
    /// the line exactly as typed, so quoting is never needed and inner
    /// spacing survives.
    pub fn parse_line(line: &str) -> Result<SessionCommand, clap::Error> {
        let command = SessionLine::try_parse_from(line.split_whitespace())?.command;
        Ok(match command {
            SessionCommand::HeaderSearch { .. } => SessionCommand::HeaderSearch {
                term: raw_value(line, 1),
            },
            SessionCommand::Search { .. } => SessionCommand::Search {
                term: raw_value(line, 1),
            },
            SessionCommand::Filter { .. } => SessionCommand::Filter {
                value: raw_value(line, 1),
            },
            SessionCommand::SiteName { .. } => SessionCommand::SiteName {
                value: raw_value(line, 1),
            },
            SessionCommand::Set { field, .. } => SessionCommand::Set {
                field,
                value: raw_value(line, 2),
            },
            SessionCommand::Update { id, field, .. } => SessionCommand::Update {
                id,
                field,
                value: raw_value(line, 3),
            },
            other => other,
        })
    }
}

/// The text after the first `skip` words and one separator, untouched.
fn rest_of_line(line: &str, skip: usize) -> &str {
    let mut rest = line;
    for _ in 0..skip {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

fn raw_value(line: &str, skip: usize) -> Vec<String> {
    match rest_of_line(line, skip) {
        "" => Vec::new(),
        rest => vec![rest.to_string()],
    }
}

/// Session command listing, built from the clap definitions.
pub fn session_help() -> String {
    let cmd = SessionLine::command();
    let mut output = String::from("Session commands:\n");
    for sc in cmd.get_subcommands().filter(|sc| !sc.is_hide_set()) {
        let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
        output.push_str(&format!("  {:<14} {}\n", sc.get_name(), about));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_values_are_kept_whole() {
        assert_eq!(
            SessionLine::parse_line("search Thread #1").unwrap(),
            SessionCommand::Search {
                term: vec!["Thread #1".into()]
            }
        );
        assert_eq!(
            SessionLine::parse_line("update 3 title A new title").unwrap(),
            SessionCommand::Update {
                id: 3,
                field: "title".into(),
                value: vec!["A new title".into()]
            }
        );
    }

    #[test]
    fn values_keep_their_spacing() {
        assert_eq!(
            SessionLine::parse_line("search  two  spaces ").unwrap(),
            SessionCommand::Search {
                term: vec![" two  spaces ".into()]
            }
        );
        assert_eq!(
            SessionLine::parse_line("  set   name Mary   Ann").unwrap(),
            SessionCommand::Set {
                field: "name".into(),
                value: vec!["Mary   Ann".into()]
            }
        );
        assert_eq!(
            SessionLine::parse_line("update 4 role\tmoderator").unwrap(),
            SessionCommand::Update {
                id: 4,
                field: "role".into(),
                value: vec!["moderator".into()]
            }
        );
    }

    #[test]
    fn empty_values_are_allowed() {
        assert_eq!(
            SessionLine::parse_line("set name").unwrap(),
            SessionCommand::Set {
                field: "name".into(),
                value: vec![]
            }
        );
        assert_eq!(
            SessionLine::parse_line("search").unwrap(),
            SessionCommand::Search { term: vec![] }
        );
    }

    #[test]
    fn kebab_case_names_and_value_enums() {
        assert_eq!(
            SessionLine::parse_line("clear-filter").unwrap(),
            SessionCommand::ClearFilter
        );
        assert_eq!(
            SessionLine::parse_line("sidebar collapse").unwrap(),
            SessionCommand::Sidebar {
                action: SidebarArg::Collapse
            }
        );
        assert_eq!(
            SessionLine::parse_line("toggle maintenance").unwrap(),
            SessionCommand::Toggle {
                which: ToggleArg::Maintenance
            }
        );
        assert_eq!(SessionLine::parse_line("exit").unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn bad_lines_are_rejected() {
        assert!(SessionLine::parse_line("frobnicate").is_err());
        assert!(SessionLine::parse_line("page two").is_err());
        assert!(SessionLine::parse_line("sidebar explode").is_err());
    }

    #[test]
    fn global_flags_parse() {
        let cli = Cli::try_parse_from([
            "adminboard",
            "threads",
            "--search",
            "Thread #1",
            "--page",
            "2",
            "--output",
            "json",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputMode::Json);
        assert_eq!(cli.seed, Some(7));
        match cli.command {
            Some(Commands::Threads(args)) => {
                assert_eq!(args.search.as_deref(), Some("Thread #1"));
                assert_eq!(args.page, Some(2));
            }
            other => panic!("Expected threads, got {:?}", other),
        }
    }

    #[test]
    fn help_lists_every_session_command() {
        let help = session_help();
        assert!(help.contains("clear-filter"));
        assert!(help.contains("site-name"));
        assert!(help.contains("quit"));
    }

    #[test]
    fn clap_definitions_are_consistent() {
        Cli::command().debug_assert();
        SessionLine::command().debug_assert();
    }
}
