//! Console command interpreter
//!
//! Holds the input line, the bounded history and the bounded scrollback.
//! Commands never fail; anything the user gets wrong is answered with an
//! error line.

use std::collections::VecDeque;

use bevy::prelude::*;
use chrono::{DateTime, Local};

use crate::camera::NavigationTarget;
use crate::catalog::{Catalog, OVERVIEW_ID};

pub const HISTORY_LIMIT: usize = 50;
pub const OUTPUT_LIMIT: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// The submitted command itself
    Echo,
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl OutputLine {
    pub fn render(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    System,
    Credits,
    Planets,
    Navigate(Option<String>),
    Info(Option<String>),
    Unknown(String),
}

impl Command {
    /// Parse a command line; `None` when the line is blank
    pub fn parse(line: &str) -> Option<Self> {
        let lowered = line.trim().to_lowercase();
        let mut words = lowered.split_whitespace();
        let verb = words.next()?;
        let argument = words.next().map(str::to_string);

        let command = match verb {
            "help" | "ayuda" => Command::Help,
            "clear" | "limpiar" => Command::Clear,
            "system" | "sistema" => Command::System,
            "credits" | "creditos" | "créditos" => Command::Credits,
            "planets" | "planetas" => Command::Planets,
            "navigate" | "navegar" | "ir" => Command::Navigate(argument),
            "info" => Command::Info(argument),
            _ => Command::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

#[derive(Resource, Debug, Default)]
pub struct Console {
    input: String,
    history: VecDeque<String>,
    /// Position in `history` while browsing; `None` when editing a fresh line
    cursor: Option<usize>,
    output: VecDeque<OutputLine>,
    minimized: bool,
}

impl Console {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn output(&self) -> impl DoubleEndedIterator<Item = &OutputLine> + ExactSizeIterator {
        self.output.iter()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn push_str(&mut self, text: &str) {
        self.input.extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = None;
    }

    pub fn print(&mut self, text: impl Into<String>) {
        self.push_line(LineKind::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push_line(LineKind::Error, text.into());
    }

    fn push_line(&mut self, kind: LineKind, text: String) {
        if self.output.len() == OUTPUT_LIMIT {
            self.output.pop_front();
        }
        self.output.push_back(OutputLine {
            kind,
            text,
            timestamp: Local::now(),
        });
    }

    /// Load the previous history entry into the input line
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.cursor {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.input = self.history[index].clone();
    }

    /// Move towards the newest entry; past it the input line is emptied
    pub fn history_next(&mut self) {
        let Some(i) = self.cursor else {
            return;
        };
        if i + 1 < self.history.len() {
            self.cursor = Some(i + 1);
            self.input = self.history[i + 1].clone();
        } else {
            self.cursor = None;
            self.input.clear();
        }
    }

    /// Run the current input line and reset it
    pub fn submit(&mut self, catalog: &Catalog) -> Option<NavigationTarget> {
        let line = std::mem::take(&mut self.input);
        self.cursor = None;
        self.execute(&line, catalog)
    }

    /// Run one command line. Returns the navigation it asks for, if any.
    pub fn execute(&mut self, line: &str, catalog: &Catalog) -> Option<NavigationTarget> {
        let line = line.trim();
        let command = Command::parse(line)?;

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(line.to_string());
        self.push_line(LineKind::Echo, format!("> {line}"));
        debug!("Console command: {command:?}");

        match command {
            Command::Help => {
                self.help(catalog);
                None
            }
            Command::Clear => {
                self.output.clear();
                None
            }
            Command::System => {
                self.print(format!("Solar Explorer v{}", env!("CARGO_PKG_VERSION")));
                self.print("Modules loaded: catalog, texture, scene, camera, animation, console, ui, loading");
                None
            }
            Command::Credits => {
                self.print("Solar Explorer, built with Bevy");
                self.print("Surfaces are generated procedurally at every launch");
                None
            }
            Command::Planets => {
                self.print(format!("Bodies: {}", body_list(catalog)));
                None
            }
            Command::Navigate(None) => {
                self.error("Usage: navigate <body> (e.g. navigate earth)");
                None
            }
            Command::Navigate(Some(key)) => self.navigate(&key, catalog),
            Command::Info(None) => {
                self.error("Usage: info <body>");
                None
            }
            Command::Info(Some(key)) => {
                self.info(&key, catalog);
                None
            }
            Command::Unknown(text) => {
                self.error(format!("Unknown command: \"{text}\""));
                self.print("Type \"help\" to list the available commands");
                None
            }
        }
    }

    fn navigate(&mut self, key: &str, catalog: &Catalog) -> Option<NavigationTarget> {
        if key == OVERVIEW_ID {
            self.print("Returning to the system overview...");
            return Some(NavigationTarget::Overview);
        }
        match catalog.resolve(key) {
            Some(planet) => {
                self.print(format!("Navigating to {}...", planet.name));
                Some(NavigationTarget::Body(planet.id.to_string()))
            }
            None => {
                self.error(format!("Unknown body: \"{key}\""));
                self.print(format!("Available bodies: {}", body_list(catalog)));
                None
            }
        }
    }

    fn info(&mut self, key: &str, catalog: &Catalog) {
        let Some(planet) = catalog.resolve(key) else {
            self.error(format!("Unknown body: \"{key}\""));
            return;
        };
        self.print(format!("{} ({})", planet.name, planet.category.label()));
        self.print(format!(
            "Size {} units, orbit {} units, speed {} rad/frame",
            planet.size, planet.distance, planet.angular_speed
        ));
        self.print(planet.description);
    }

    fn help(&mut self, catalog: &Catalog) {
        self.print("Available commands:");
        self.print("- help/ayuda: show this help");
        self.print("- clear/limpiar: clear the console");
        self.print("- system/sistema: show version and loaded modules");
        self.print("- credits/creditos: show the credits");
        self.print("- planets/planetas: list the bodies");
        self.print("- info <body>: describe a body");
        self.print("- navigate/navegar/ir <body>: fly to a body (e.g. navigate earth)");
        self.print(format!("Bodies: {}", body_list(catalog)));
    }
}

fn body_list(catalog: &Catalog) -> String {
    catalog.iter().map(|p| p.id).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(console: &Console) -> Vec<String> {
        console.output().map(|line| line.text.clone()).collect()
    }

    #[test]
    fn test_navigate_then_typo() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();

        let target = console.execute("navigate earth", &catalog);
        assert_eq!(target, Some(NavigationTarget::Body("earth".into())));

        let target = console.execute("navigate marz", &catalog);
        assert_eq!(target, None);

        let lines: Vec<_> = console.output().collect();
        assert_eq!(lines[0].kind, LineKind::Echo);
        assert_eq!(lines[0].text, "> navigate earth");
        assert_eq!(lines[1].text, "Navigating to Earth...");
        assert_eq!(lines[2].text, "> navigate marz");
        assert_eq!(lines[3].kind, LineKind::Error);
        assert!(lines[3].text.contains("marz"));
        assert!(lines[4].text.contains("mars"));
        assert_eq!(console.history().count(), 2);
    }

    #[test]
    fn test_aliases_and_case() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        assert_eq!(
            console.execute("ir tierra", &catalog),
            Some(NavigationTarget::Body("earth".into()))
        );
        assert_eq!(
            console.execute("NAVEGAR Marte", &catalog),
            Some(NavigationTarget::Body("mars".into()))
        );
        assert_eq!(
            console.execute("navigate solar-system", &catalog),
            Some(NavigationTarget::Overview)
        );
    }

    #[test]
    fn test_system_only_prints() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        assert_eq!(console.execute("sistema", &catalog), None);
        assert_eq!(console.execute("system", &catalog), None);
        let lines = texts(&console);
        assert!(lines[1].starts_with("Solar Explorer v"));
        assert!(lines[2].starts_with("Modules loaded"));
        assert!(!lines.iter().any(|line| line.contains("overview")));
    }

    #[test]
    fn test_missing_argument_prints_usage() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        assert_eq!(console.execute("navigate", &catalog), None);
        let last = console.output().last().cloned().expect("usage line");
        assert_eq!(last.kind, LineKind::Error);
        assert!(last.text.starts_with("Usage"));
    }

    #[test]
    fn test_unknown_command_and_blank_line() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        assert_eq!(console.execute("   ", &catalog), None);
        assert_eq!(console.output().len(), 0);
        assert_eq!(console.history().count(), 0);

        console.execute("warp 9", &catalog);
        let lines = texts(&console);
        assert_eq!(lines[1], "Unknown command: \"warp 9\"");
    }

    #[test]
    fn test_clear_empties_scrollback() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        console.execute("help", &catalog);
        assert!(console.output().len() > 1);
        console.execute("limpiar", &catalog);
        assert_eq!(console.output().len(), 0);
        assert_eq!(console.history().collect::<Vec<_>>(), vec!["help", "limpiar"]);
    }

    #[test]
    fn test_info_describes_body() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        console.execute("info saturno", &catalog);
        let lines = texts(&console);
        assert!(lines[1].starts_with("Saturn ("));
        assert!(lines[2].contains("120"));
    }

    #[test]
    fn test_history_is_bounded() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        for i in 0..60 {
            console.execute(&format!("cmd{i}"), &catalog);
        }
        let history: Vec<_> = console.history().collect();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], "cmd10");
        assert_eq!(history[HISTORY_LIMIT - 1], "cmd59");
    }

    #[test]
    fn test_output_is_bounded() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        for _ in 0..40 {
            console.execute("help", &catalog);
        }
        assert_eq!(console.output().len(), OUTPUT_LIMIT);
        let expected = format!("Bodies: {}", body_list(&catalog));
        assert_eq!(console.output().last().map(|l| l.text.as_str()), Some(expected.as_str()));
    }

    #[test]
    fn test_history_cursor_walk() {
        let catalog = Catalog::solar_system();
        let mut console = Console::default();
        for line in ["help", "planets", "navigate mars"] {
            console.push_str(line);
            console.submit(&catalog);
        }
        assert_eq!(console.input(), "");

        console.history_prev();
        assert_eq!(console.input(), "navigate mars");
        console.history_prev();
        console.history_prev();
        assert_eq!(console.input(), "help");
        // Stays on the oldest entry
        console.history_prev();
        assert_eq!(console.input(), "help");

        console.history_next();
        assert_eq!(console.input(), "planets");
        console.history_next();
        console.history_next();
        assert_eq!(console.input(), "");
        // Nothing to move to once back on a fresh line
        console.history_next();
        assert_eq!(console.input(), "");

        // Submitting resets the cursor
        console.history_prev();
        assert_eq!(
            console.submit(&catalog),
            Some(NavigationTarget::Body("mars".into()))
        );
        console.history_prev();
        assert_eq!(console.input(), "navigate mars");
    }

    #[test]
    fn test_editing_input() {
        let mut console = Console::default();
        console.push_str("ir\u{8} marte");
        assert_eq!(console.input(), "ir marte");
        console.backspace();
        assert_eq!(console.input(), "ir mart");
        console.clear_input();
        assert_eq!(console.input(), "");
    }

    #[test]
    fn test_render_has_timestamp() {
        let mut console = Console::default();
        console.print("hello");
        let rendered = console.output().last().map(OutputLine::render).unwrap_or_default();
        assert!(rendered.starts_with('['));
        assert!(rendered.ends_with("] hello"));
    }
}
