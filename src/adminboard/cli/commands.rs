//! # CLI Layer
//!
//! The only place in the crate that touches the terminal: it parses
//! arguments, builds the [`AdminApi`], prints rendered results and decides
//! exit codes.
//!
//! ## Modes
//!
//! - **One-shot** (`threads`, `users`, `dashboard`, `settings`): apply the
//!   flags to a fresh session, print the final view, exit.
//! - **Session** (`shell`, the default): read one command per line from
//!   stdin until `quit` or end of input. A prompt is shown only when stdin is
//!   a terminal, so scripts can be piped in.
//!
//! ## Errors
//!
//! Startup failures (bad flags, bad config) end the process with `Error:` on
//! stderr and exit code 1. Inside a session nothing is fatal: failed
//! commands are reported as error messages and the next line is read.

use super::render::Renderer;
use super::setup::{
    session_help, Cli, Commands, ListArgs, OutputMode, SessionCommand, SessionLine, SidebarArg,
    ToggleArg,
};
use adminboard::api::AdminApi;
use adminboard::commands::navigate::SidebarAction;
use adminboard::commands::settings::Toggle;
use adminboard::commands::{CmdMessage, CmdResult};
use adminboard::config::AdminConfig;
use adminboard::error::{AdminError, Result};
use adminboard::model::{Thread, User};
use adminboard::store::memory::InMemoryStore;
use chrono::Utc;
use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ADMINBOARD_LOG";

type SessionApi = AdminApi<InMemoryStore<Thread>, InMemoryStore<User>>;

struct AppContext {
    api: SessionApi,
    output: OutputMode,
    renderer: Renderer,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Threads(args)) => handle_list(&mut ctx, "/threads", args),
        Some(Commands::Users(args)) => handle_list(&mut ctx, "/users", args),
        Some(Commands::Dashboard) => handle_view(&mut ctx, "/"),
        Some(Commands::Settings) => handle_view(&mut ctx, "/settings"),
        Some(Commands::Shell) | None => handle_session(&mut ctx),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = AdminConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    debug!(seed = config.seed, "starting session");

    let renderer = Renderer::new().map_err(template_error)?;
    Ok(AppContext {
        api: AdminApi::from_config(&config, Utc::now()),
        output: cli.output,
        renderer,
    })
}

fn template_error(e: minijinja::Error) -> AdminError {
    AdminError::Api(format!("template error: {}", e))
}

fn print_result(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    let text = match ctx.output {
        OutputMode::Json => format!("{}\n", serde_json::to_string_pretty(result)?),
        OutputMode::Text => ctx.renderer.render_result(result).map_err(template_error)?,
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn handle_view(ctx: &mut AppContext, path: &str) -> Result<()> {
    let result = ctx.api.goto(path)?;
    print_result(ctx, &result)
}

fn handle_list(ctx: &mut AppContext, path: &str, args: ListArgs) -> Result<()> {
    let frame = ctx.api.goto(path)?;
    let mut result = CmdResult::default();
    if let Some(term) = &args.search {
        result = ctx.api.search(term)?;
    }
    if let Some(value) = &args.filter {
        result = ctx.api.filter(value)?;
    }
    if let Some(key) = &args.sort {
        result = ctx.api.sort(key)?;
    }
    if let Some(page) = args.page {
        result = ctx.api.go_to_page(page)?;
    }
    print_result(ctx, &frame.absorb(result))
}

fn handle_session(ctx: &mut AppContext) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let opening = ctx.api.show()?;
    print_result(ctx, &opening)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            let mut stdout = io::stdout().lock();
            write!(stdout, "adminboard:{}> ", ctx.api.route().path())?;
            stdout.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = match SessionLine::parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                eprint!("{}", e.render());
                continue;
            }
        };
        debug!(?command, "session command");

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(session_help().as_bytes())?;
                stdout.flush()?;
            }
            other => {
                let result = dispatch(&mut ctx.api, other).unwrap_or_else(|e| {
                    CmdResult::default().with_message(CmdMessage::error(e.to_string()))
                });
                print_result(ctx, &result)?;
            }
        }
    }
    Ok(())
}

/// Runs one session command against the API.
fn dispatch(api: &mut SessionApi, command: SessionCommand) -> Result<CmdResult> {
    match command {
        SessionCommand::Goto { path } => api.goto(&path),
        SessionCommand::Sidebar { action } => api.sidebar(match action {
            SidebarArg::Toggle => SidebarAction::Toggle,
            SidebarArg::Close => SidebarAction::Close,
            SidebarArg::Collapse => SidebarAction::Collapse,
            SidebarArg::Search => SidebarAction::MobileSearch,
        }),
        SessionCommand::HeaderSearch { term } => api.header_search(&term.join(" ")),
        SessionCommand::Search { term } => api.search(&term.join(" ")),
        SessionCommand::Filter { value } => api.filter(&value.join(" ")),
        SessionCommand::ClearFilter => api.clear_filter(),
        SessionCommand::Sort { key } => api.sort(&key),
        SessionCommand::Next => api.next_page(),
        SessionCommand::Prev => api.prev_page(),
        SessionCommand::Page { number } => api.go_to_page(number),
        SessionCommand::Show => api.show(),
        SessionCommand::Add => api.open_add(),
        SessionCommand::Set { field, value } => api.edit_add(&field, &value.join(" ")),
        SessionCommand::Submit => api.submit_add(),
        SessionCommand::Cancel => api.cancel_add(),
        SessionCommand::Update { id, field, value } => api.update(id, &field, &value.join(" ")),
        SessionCommand::Remove { id } => api.remove(id),
        SessionCommand::SiteName { value } => api.set_site_name(&value.join(" ")),
        SessionCommand::Toggle { which } => api.toggle(match which {
            ToggleArg::Notifications => Toggle::Notifications,
            ToggleArg::Maintenance => Toggle::Maintenance,
        }),
        SessionCommand::Save => api.save_settings(),
        SessionCommand::Help | SessionCommand::Quit => Ok(CmdResult::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminboard::commands::Listing;
    use adminboard::shell::Route;

    fn api() -> SessionApi {
        AdminApi::from_config(&AdminConfig::default(), Utc::now())
    }

    fn run_line(api: &mut SessionApi, line: &str) -> Result<CmdResult> {
        let command = SessionLine::parse_line(line).expect("line should parse");
        dispatch(api, command)
    }

    #[test]
    fn goto_dispatches_to_navigation() {
        let mut api = api();
        let result = run_line(&mut api, "goto /users").unwrap();
        assert_eq!(result.route, Some(Route::Users));
        assert_eq!(api.route(), Route::Users);
    }

    #[test]
    fn multi_word_search_is_joined() {
        let mut api = api();
        run_line(&mut api, "goto /threads").unwrap();
        let result = run_line(&mut api, "search Thread #1").unwrap();
        match result.listing.unwrap() {
            Listing::Threads { search, page, .. } => {
                assert_eq!(search, "Thread #1");
                assert_eq!(page.total_items, 11);
            }
            other => panic!("Expected threads, got {:?}", other),
        }
    }

    #[test]
    fn search_keeps_inner_spacing() {
        let mut api = api();
        run_line(&mut api, "goto /threads").unwrap();
        let result = run_line(&mut api, "search Thread  #1").unwrap();
        match result.listing.unwrap() {
            Listing::Threads { search, page, .. } => {
                assert_eq!(search, "Thread  #1");
                assert_eq!(page.total_items, 0);
            }
            other => panic!("Expected threads, got {:?}", other),
        }
    }

    #[test]
    fn set_passes_field_and_value() {
        let mut api = api();
        run_line(&mut api, "goto /users").unwrap();
        run_line(&mut api, "add").unwrap();
        let result = run_line(&mut api, "set name Mary Ann").unwrap();
        let form = result.form.unwrap();
        assert_eq!(form.fields[0], ("name", "Mary Ann".to_string()));
    }

    #[test]
    fn toggles_map_to_settings() {
        let mut api = api();
        run_line(&mut api, "toggle maintenance").unwrap();
        assert!(api.settings().maintenance_mode);
        run_line(&mut api, "site-name Night Owls").unwrap();
        assert_eq!(api.settings().site_name, "Night Owls");
    }

    #[test]
    fn sidebar_search_opens_the_mobile_box() {
        let mut api = api();
        let result = run_line(&mut api, "sidebar search").unwrap();
        assert!(result.shell.unwrap().mobile_search_open);
    }

    #[test]
    fn list_commands_off_a_list_are_errors() {
        let mut api = api();
        assert!(run_line(&mut api, "next").is_err());
    }
}
