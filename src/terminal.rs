//! Terminal rendition of the search form's presentation surface.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use search_flow::{DoctorCard, ResultItem, SearchState, Surface};
use tracing::warn;

use crate::theme::Theme;

pub const SUBMIT_LABEL: &str = "Find Doctors";
pub const SUBMIT_BUSY_LABEL: &str = "Searching...";

/// Prints results to `out` and shows an `indicatif` spinner while busy.
pub struct TerminalSurface<W: Write> {
    out: W,
    theme: Theme,
    spinner_enabled: bool,
    spinner: Option<ProgressBar>,
    submit_enabled: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(theme: Theme) -> Self {
        use std::io::IsTerminal;
        let spinner_enabled = io::stdout().is_terminal();
        Self::new(io::stdout(), theme, spinner_enabled)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, theme: Theme, spinner_enabled: bool) -> Self {
        Self {
            out,
            theme,
            spinner_enabled,
            spinner: None,
            submit_enabled: true,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submit_enabled {
            SUBMIT_LABEL
        } else {
            SUBMIT_BUSY_LABEL
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn start_spinner(&mut self) {
        if !self.spinner_enabled || self.spinner.is_some() {
            return;
        }
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("-\\|/ ");
        pb.set_style(style);
        pb.set_message(SUBMIT_BUSY_LABEL);
        pb.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(pb);
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn write_items(&mut self, items: &[ResultItem]) -> io::Result<()> {
        let palette = self.theme.palette();
        writeln!(self.out)?;
        for item in items {
            match item {
                ResultItem::Specialization(name) => {
                    writeln!(
                        self.out,
                        "  {} {}",
                        "Recommended specialist:".color(palette.muted),
                        name.color(palette.badge).bold()
                    )?;
                }
                ResultItem::DoctorCard(card) => self.write_card(card)?,
                ResultItem::Info(message) => {
                    writeln!(self.out, "  {}", message.color(palette.info))?;
                }
                ResultItem::Error(message) => {
                    writeln!(self.out, "  {} {}", "✖".color(palette.error), message.color(palette.error))?;
                }
            }
        }
        self.out.flush()
    }

    fn write_card(&mut self, card: &DoctorCard) -> io::Result<()> {
        let palette = self.theme.palette();
        writeln!(
            self.out,
            "\n  {}. {}",
            card.rank,
            card.name.color(palette.accent).bold()
        )?;
        writeln!(self.out, "     {}", card.hospital)?;
        writeln!(self.out, "     📍 {} away", card.distance_label())?;
        writeln!(self.out, "     📞 {}", card.phone)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            self.start_spinner();
        } else {
            self.stop_spinner();
        }
    }

    fn show(&mut self, items: &[ResultItem]) {
        if items.is_empty() {
            return;
        }
        if let Err(e) = self.write_items(items) {
            warn!(error = %e, "failed to write results");
        }
    }

    fn state_changed(&mut self, state: &SearchState) {
        if let Some(pb) = &self.spinner {
            match state {
                SearchState::AwaitingLocation => pb.set_message("Locating you..."),
                SearchState::Searching => pb.set_message(SUBMIT_BUSY_LABEL),
                _ => {}
            }
        }
    }
}
