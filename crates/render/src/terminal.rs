use crate::{
    chart::{Cell, Chart},
    export::export_svg,
    meter::Meter,
    Renderer,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use memtrack_core::{RenderSnapshot, Result};
use memtrack_theme::{Color, Theme};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Width of the progress bar in cells.
const METER_WIDTH: usize = 48;
/// Rows in the plot area.
const CHART_HEIGHT: usize = 11;

/// Puts the terminal into raw mode on the alternate screen and restores it
/// on drop, including when unwinding.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Full-screen text UI: header, usage label, progress bar, line chart,
/// key hints and the threshold alert banner.
pub struct TerminalRenderer<W: Write> {
    out:    W,
    theme:  Theme,
    last:   Option<RenderSnapshot>,
    paused: bool,
    /// Shown until the value drops back under the threshold.
    alert:  Option<String>,
    status: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            last: None,
            paused: false,
            alert: None,
            status: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// The alert banner currently on screen, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    fn draw(&mut self) -> Result<()> {
        let palette = self.theme.palette().clone();
        let bg = term(palette.background);

        queue!(
            self.out,
            SetBackgroundColor(bg),
            Clear(ClearType::All),
            MoveTo(2, 1),
            SetForegroundColor(term(palette.title)),
            SetAttribute(Attribute::Bold),
            Print("Kernel Memory Tracker"),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(bg),
        )?;

        let Some(snapshot) = self.last.as_ref() else {
            queue!(
                self.out,
                MoveTo(2, 3),
                SetForegroundColor(term(palette.foreground)),
                Print("Waiting for the first sample…"),
            )?;
            self.draw_footer(6)?;
            return Ok(self.out.flush()?);
        };

        // ── Label + bar ───────────────────────────────────────────────────────
        let meter = Meter::new(snapshot.bar_value, METER_WIDTH);
        queue!(
            self.out,
            MoveTo(2, 3),
            SetForegroundColor(term(palette.foreground)),
            Print(&snapshot.label_text),
            MoveTo(2, 5),
            SetForegroundColor(term(palette.accent)),
            Print("█".repeat(meter.filled())),
            SetForegroundColor(term(palette.trough)),
            Print("█".repeat(meter.empty())),
            SetForegroundColor(term(palette.foreground)),
            Print(format!(" {:>6.2}%", snapshot.bar_value)),
        )?;

        // ── Chart ─────────────────────────────────────────────────────────────
        let chart = Chart::new(snapshot.capacity, CHART_HEIGHT);
        let top: u16 = 9;
        queue!(
            self.out,
            MoveTo(2, top - 2),
            SetForegroundColor(term(palette.title)),
            Print(format!("Memory Usage (Last {} samples)", snapshot.capacity)),
        )?;

        let plot_bg = term(palette.plot_background);
        for (row, cells) in chart.plot(&snapshot.series).into_iter().enumerate() {
            let label = chart
                .axis_label(row)
                .map(|v| format!("{v:>3} ┤"))
                .unwrap_or_else(|| "    │".to_string());
            queue!(
                self.out,
                MoveTo(2, top + row as u16),
                SetBackgroundColor(bg),
                SetForegroundColor(term(palette.axis)),
                Print(label),
                SetBackgroundColor(plot_bg),
            )?;
            for cell in cells {
                let color = match cell {
                    Cell::Point | Cell::Line => palette.accent,
                    Cell::Grid | Cell::Empty => palette.grid,
                };
                queue!(self.out, SetForegroundColor(term(color)), Print(cell.glyph()))?;
            }
        }
        let axis_row = top + CHART_HEIGHT as u16;
        queue!(
            self.out,
            SetBackgroundColor(bg),
            MoveTo(2, axis_row),
            SetForegroundColor(term(palette.axis)),
            Print(format!("    └{}", "─".repeat(snapshot.capacity))),
        )?;

        self.draw_footer(axis_row + 2)?;
        Ok(self.out.flush()?)
    }

    fn draw_footer(&mut self, row: u16) -> Result<()> {
        let palette = self.theme.palette();
        let pause = if self.paused { "Resume" } else { "Pause" };

        queue!(
            self.out,
            MoveTo(2, row),
            SetForegroundColor(term(palette.title)),
            Print(format!("[p] {pause}   [s] Save Graph   [t] Toggle Theme   [q] Quit")),
        )?;

        if let Some(status) = &self.status {
            queue!(
                self.out,
                MoveTo(2, row + 1),
                SetForegroundColor(term(palette.foreground)),
                Print(status),
            )?;
        }

        if let Some(alert) = &self.alert {
            queue!(
                self.out,
                MoveTo(2, row + 3),
                SetForegroundColor(term(palette.accent)),
                SetAttribute(Attribute::Bold),
                Print(format!("⚠ {alert}")),
                SetAttribute(Attribute::Reset),
            )?;
        }

        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        if snapshot.alert_fired {
            self.alert = Some(format!(
                "Threshold Alert: memory usage crossed {}%! Current: {:.2}%",
                snapshot.threshold, snapshot.bar_value
            ));
        } else if !snapshot.above_threshold() {
            self.alert = None;
        }

        self.last = Some(snapshot.clone());
        self.draw()
    }

    fn apply_theme(&mut self, theme: &Theme) -> Result<()> {
        self.theme = theme.clone();
        self.draw()
    }

    fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.paused = paused;
        self.draw()
    }

    fn export_graph(&self, target: &Path) -> Result<PathBuf> {
        let (series, capacity) = match &self.last {
            Some(s) => (s.series.as_slice(), s.capacity),
            None => (&[][..], 30),
        };
        export_svg(series, capacity, self.theme.palette(), target)
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.status = Some(message.to_owned());
        self.draw()
    }
}

fn term(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}
