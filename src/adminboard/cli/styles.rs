//! Styles for the adminboard CLI.
//!
//! Templates only use semantic style names (`id`, `time`, `error`, ...) through
//! the `style` filter. This file maps each name onto a `console::Style`. When
//! color is off the filter passes text through untouched; an unknown name is
//! flagged with `(!?)` either way so template typos show up in tests.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static ADMIN_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("brand", Style::new().bold().cyan())
        .add("title", Style::new().bold())
        .add("heading", Style::new().bold().underlined())
        .add("nav", Style::new().dim())
        .add("nav_active", Style::new().bold().cyan())
        .add("id", Style::new().yellow())
        .add("cell", Style::new())
        .add("count", Style::new().cyan())
        .add("muted", Style::new().dim())
        .add("time", Style::new().color256(246).italic())
        .add("label", Style::new().bold())
        .add("bar", Style::new().green())
        .add("on", Style::new().green())
        .add("off", Style::new().dim())
        .add("info", Style::new().dim())
        .add("success", Style::new().green())
        .add("warning", Style::new().yellow())
        .add("error", Style::new().red().bold())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_passes_text_through() {
        assert_eq!(ADMIN_THEME.apply("error", "boom", false), "boom");
    }

    #[test]
    fn unknown_styles_are_flagged() {
        assert_eq!(ADMIN_THEME.apply("eror", "boom", false), "(!?) boom");
    }

    #[test]
    fn color_mode_wraps_in_ansi() {
        let styled = ADMIN_THEME.apply("success", "ok", true);
        assert!(styled.contains("ok"));
        assert_ne!(styled, "ok");
    }
}
