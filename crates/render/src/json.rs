use crate::{export::export_svg, Renderer};
use memtrack_core::{RenderSnapshot, Result, TrackerError};
use memtrack_theme::Theme;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Headless renderer: one JSON object per snapshot, newline separated.
pub struct JsonRenderer<W: Write> {
    out:   W,
    theme: Theme,
    last:  Option<RenderSnapshot>,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)
            .map_err(|e| TrackerError::Render(format!("cannot encode snapshot: {e}")))?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.last = Some(snapshot.clone());
        Ok(())
    }

    fn apply_theme(&mut self, theme: &Theme) -> Result<()> {
        self.theme = theme.clone();
        Ok(())
    }

    fn set_paused(&mut self, _paused: bool) -> Result<()> {
        Ok(())
    }

    fn export_graph(&self, target: &Path) -> Result<PathBuf> {
        let (series, capacity) = match &self.last {
            Some(s) => (s.series.as_slice(), s.capacity),
            None => (&[][..], 30),
        };
        export_svg(series, capacity, self.theme.palette(), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memtrack_core::Reading;

    fn snapshot(tick: u64, percent: f64) -> RenderSnapshot {
        RenderSnapshot {
            tick,
            label_text: format!("{percent}"),
            bar_value: percent,
            series: vec![percent],
            alert_fired: false,
            reading: Reading::new(percent as u64, 100),
            threshold: 45.0,
            capacity: 30,
        }
    }

    #[test]
    fn writes_one_object_per_line() {
        let mut renderer = JsonRenderer::new(Vec::new(), Theme::default());
        renderer.render(&snapshot(1, 10.0)).unwrap();
        renderer.render(&snapshot(2, 20.0)).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let decoded: RenderSnapshot = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(decoded, snapshot(2, 20.0));
    }

    #[test]
    fn json_fields_are_named() {
        let mut renderer = JsonRenderer::new(Vec::new(), Theme::default());
        renderer.render(&snapshot(7, 50.0)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&renderer.into_inner()).unwrap();
        assert_eq!(value["tick"], 7);
        assert_eq!(value["bar_value"], 50.0);
        assert_eq!(value["alert_fired"], false);
        assert_eq!(value["reading"]["total"], 100);
    }
}
