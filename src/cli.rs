//! Interactive prompt and one-shot mode.
//!
//! Every line typed at the prompt is one input event: bare text replaces the
//! symptom field (and refreshes suggestions), slash commands do the rest.
//! A running search is polled next to stdin, so the prompt stays live and a
//! new `/find` or `/reset` takes effect immediately.

use std::io::{self, Write};

use colored::Colorize;
use finder_client::{DoctorFinderService, HealthService};
use search_flow::{
    Completion, LocationSource, PendingStage, SearchController, SearchState, Surface,
};
use symptom_suggest::{Autosuggest, HideReason};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::terminal::TerminalSurface;
use crate::theme::ThemeStore;

pub const HELP: &str = "\
Type symptoms separated by commas, spaces or \"and\"; suggestions follow the last term.

  /symptoms <text>  replace the symptom text (same as typing it bare)
  /pick <n>         accept suggestion n
  /dismiss          hide the suggestion list
  /city <name>      set the city
  /find             search for doctors
  /reset            clear the form and results
  /theme            toggle dark/light colors
  /ping             check that the doctor service is reachable
  /help             show this help
  /quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Symptoms(String),
    Pick(usize),
    Dismiss,
    City(String),
    Find,
    Reset,
    Theme,
    Ping,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parses one prompt line. Suggestion numbers are 1-based.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return if line.trim().is_empty() {
            Command::Empty
        } else {
            Command::Symptoms(line.to_string())
        };
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim_start()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "symptoms" | "s" => Command::Symptoms(arg.to_string()),
        "pick" | "p" => match arg.trim().parse::<usize>() {
            Ok(n) if n > 0 => Command::Pick(n),
            _ => Command::Invalid("usage: /pick <number>".into()),
        },
        "dismiss" | "d" => Command::Dismiss,
        "city" | "c" => Command::City(arg.trim().to_string()),
        "find" | "f" => Command::Find,
        "reset" => Command::Reset,
        "theme" => Command::Theme,
        "ping" => Command::Ping,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command: /{other}")),
    }
}

/// What woke the prompt loop.
enum Wake {
    Line(Option<String>),
    Stage(Completion),
}

/// Resolves with the stage's completion, or never when nothing is running.
async fn next_stage(pending: &mut Option<PendingStage>) -> Completion {
    match pending {
        Some(stage) => stage.await,
        None => std::future::pending().await,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The search form plus everything it talks to.
pub struct Session<'v> {
    suggest: Autosuggest<'v>,
    city: String,
    controller: SearchController<TerminalSurface<io::Stdout>>,
    locator: LocationSource,
    finder: DoctorFinderService,
    health: HealthService,
    themes: ThemeStore,
    pending: Option<PendingStage>,
}

impl<'v> Session<'v> {
    pub fn new(
        suggest: Autosuggest<'v>,
        controller: SearchController<TerminalSurface<io::Stdout>>,
        locator: LocationSource,
        finder: DoctorFinderService,
        health: HealthService,
        themes: ThemeStore,
    ) -> Self {
        Self {
            suggest,
            city: String::new(),
            controller,
            locator,
            finder,
            health,
            themes,
            pending: None,
        }
    }

    /// Runs a single search and leaves.
    pub async fn run_once(&mut self, city: &str, symptoms: &str) -> &SearchState {
        self.suggest.on_input(symptoms);
        self.city = city.to_string();
        self.find();
        self.drain().await;
        self.controller.state()
    }

    /// Reads commands from stdin until `/quit` or end of input.
    pub async fn run_interactive(&mut self) -> anyhow::Result<()> {
        println!("{}", "Doctor Locator".bold());
        println!("{}", "Type /help for commands.".dimmed());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.print_prompt()?;
        loop {
            let wake = tokio::select! {
                line = lines.next_line() => Wake::Line(line?),
                done = next_stage(&mut self.pending) => Wake::Stage(done),
            };
            match wake {
                Wake::Line(None) => {
                    // Piped input may end right after `/find`.
                    self.drain().await;
                    break;
                }
                Wake::Line(Some(line)) => {
                    if self.handle(parse_command(&line)).await? == Flow::Quit {
                        break;
                    }
                }
                Wake::Stage(done) => {
                    self.step(done);
                    if self.pending.is_some() {
                        continue;
                    }
                }
            }
            self.print_prompt()?;
        }
        Ok(())
    }

    pub async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        debug!(?command, "prompt command");
        match command {
            Command::Symptoms(text) => {
                self.suggest.on_input(&text);
                self.print_suggestions();
            }
            Command::Pick(n) => match self.suggest.choose(n - 1) {
                Some(text) => {
                    println!("  symptoms: {}", text.bold());
                    self.print_suggestions();
                }
                None => println!("  {}", "no such suggestion".dimmed()),
            },
            Command::Dismiss => self.suggest.dismiss(),
            Command::City(city) => self.city = city,
            Command::Find => self.find(),
            Command::Reset => {
                self.suggest.on_input("");
                self.city.clear();
                self.pending = None;
                self.controller.reset();
            }
            Command::Theme => {
                let theme = self.themes.toggle(self.controller.surface().theme());
                self.controller.surface_mut().set_theme(theme);
                println!("  theme: {}", theme.as_str());
                let items = self.controller.items();
                self.controller.surface_mut().show(&items);
            }
            Command::Ping => {
                let status = self.health.check().await;
                let line = format!("{} ({} ms)", status.message, status.latency_ms);
                if status.ok {
                    println!("  {} {}", "●".green(), line);
                } else {
                    println!("  {} {}", "●".red(), line);
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Invalid(message) => println!("  {}", message.yellow()),
        }
        Ok(Flow::Continue)
    }

    /// Starts an attempt. A stage still running for an older attempt is dropped.
    fn find(&mut self) {
        self.suggest.dismiss();
        let symptoms = self.suggest.text().to_string();
        self.pending = self.controller.begin(&symptoms, &self.city, &self.locator);
    }

    fn step(&mut self, done: Completion) {
        self.pending = self.controller.advance(done, &self.finder);
    }

    /// Drives the current attempt to its end.
    async fn drain(&mut self) {
        while let Some(stage) = self.pending.as_mut() {
            let done = stage.await;
            self.step(done);
        }
    }

    fn print_suggestions(&self) {
        let visible = self.suggest.visible();
        if visible.is_empty() {
            if self.suggest.hide_reason() == Some(HideReason::NoMatch) {
                println!("  {}", "no matching symptoms".dimmed());
            }
            return;
        }
        for (i, item) in visible.iter().enumerate() {
            println!("  {} {}", format!("[{}]", i + 1).dimmed(), item);
        }
    }

    fn print_prompt(&mut self) -> io::Result<()> {
        let surface = self.controller.surface_mut();
        let label = surface.submit_label();
        let out = surface.writer();
        write!(
            out,
            "\n{} symptoms: \"{}\"  city: \"{}\"\n> ",
            format!("[{label}]").cyan(),
            self.suggest.text(),
            self.city
        )?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_edits_symptoms_verbatim() {
        assert_eq!(
            parse_command("fever, cou\n"),
            Command::Symptoms("fever, cou".into())
        );
        assert_eq!(parse_command("fever, "), Command::Symptoms("fever, ".into()));
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_command("/city  New Delhi "), Command::City("New Delhi".into()));
        assert_eq!(parse_command("/pick 2"), Command::Pick(2));
        assert_eq!(parse_command("/FIND"), Command::Find);
        assert_eq!(parse_command("/q"), Command::Quit);
        assert_eq!(
            parse_command("/symptoms headache and"),
            Command::Symptoms("headache and".into())
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(parse_command("/pick 0"), Command::Invalid(_)));
        assert!(matches!(parse_command("/pick x"), Command::Invalid(_)));
        assert!(matches!(parse_command("/teleport"), Command::Invalid(_)));
    }
}
