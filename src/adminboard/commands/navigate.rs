use crate::commands::{CmdMessage, CmdResult, ShellStatus};
use crate::shell::{Navigation, Shell};
use std::time::Instant;

pub fn status(shell: &Shell, now: Instant) -> ShellStatus {
    ShellStatus {
        title: shell.title(),
        brand: shell.brand(),
        sidebar_open: shell.sidebar_open(),
        collapsed: shell.collapsed(),
        mobile_search_open: shell.mobile_search_open(),
        search_query: shell.search_query().to_string(),
        loading: shell.is_loading(now),
        links: shell.nav_links(),
    }
}

/// Moves the shell to `path`. The caller renders the new view's body.
pub fn goto(shell: &mut Shell, path: &str, now: Instant) -> CmdResult {
    let nav = shell.navigate(path, now);
    let mut result = CmdResult {
        route: Some(nav.route()),
        ..Default::default()
    }
    .with_shell(status(shell, now));
    if let Navigation::Redirected(route) = nav {
        result.add_message(CmdMessage::warning(format!(
            "No page at {}, showing {}",
            path.trim(),
            route
        )));
    }
    result
}

pub enum SidebarAction {
    Toggle,
    Close,
    Collapse,
    MobileSearch,
}

pub fn sidebar(shell: &mut Shell, action: SidebarAction, now: Instant) -> CmdResult {
    match action {
        SidebarAction::Toggle => shell.toggle_sidebar(),
        SidebarAction::Close => shell.close_sidebar(),
        SidebarAction::Collapse => shell.toggle_collapse(),
        SidebarAction::MobileSearch => shell.toggle_mobile_search(),
    }
    CmdResult::default().with_shell(status(shell, now))
}

/// Updates the header search box. It only holds the text; list filtering is
/// driven by each view's own search.
pub fn header_search(shell: &mut Shell, term: &str, now: Instant) -> CmdResult {
    shell.set_search_query(term);
    CmdResult::default().with_shell(status(shell, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::shell::Route;
    use std::time::Duration;

    #[test]
    fn goto_reports_route_and_title() {
        let mut shell = Shell::new(Duration::ZERO);
        let now = Instant::now();
        let result = goto(&mut shell, "/threads", now);
        assert_eq!(result.route, Some(Route::Threads));
        let status = result.shell.unwrap();
        assert_eq!(status.title, "Threads");
        assert!(!status.loading);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn unknown_path_warns_and_lands_on_dashboard() {
        let mut shell = Shell::new(Duration::ZERO);
        let result = goto(&mut shell, "/reports", Instant::now());
        assert_eq!(result.route, Some(Route::Dashboard));
        assert!(matches!(result.messages[0].level, MessageLevel::Warning));
    }

    #[test]
    fn first_visit_is_loading() {
        let mut shell = Shell::new(Duration::from_millis(300));
        let now = Instant::now();
        let result = goto(&mut shell, "/users", now);
        assert!(result.shell.unwrap().loading);
    }

    #[test]
    fn sidebar_actions() {
        let mut shell = Shell::new(Duration::ZERO);
        let now = Instant::now();
        assert!(sidebar(&mut shell, SidebarAction::Toggle, now).shell.unwrap().sidebar_open);
        assert!(!sidebar(&mut shell, SidebarAction::Close, now).shell.unwrap().sidebar_open);
        let collapsed = sidebar(&mut shell, SidebarAction::Collapse, now).shell.unwrap();
        assert!(collapsed.collapsed);
        assert_eq!(collapsed.brand, "AP");
        assert!(sidebar(&mut shell, SidebarAction::MobileSearch, now).shell.unwrap().mobile_search_open);
    }

    #[test]
    fn header_search_keeps_the_text() {
        let mut shell = Shell::new(Duration::ZERO);
        let result = header_search(&mut shell, "alice", Instant::now());
        assert_eq!(result.shell.unwrap().search_query, "alice");
    }
}
