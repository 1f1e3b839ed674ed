//! Text rendering of palette callbacks.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use crate::catalog::CategoryId;
use crate::palette::{Notice, PaletteView};
use crate::state::{NavTab, SearchSurface};

/// What: [`PaletteView`] printing one line per callback.
///
/// Details:
/// - Category ids are printed with their names when known.
/// - Write failures are logged and otherwise ignored; the palette keeps running.
pub struct ConsoleView<W: Write> {
    /// Output sink.
    out: W,
    /// Display names per category id.
    names: HashMap<CategoryId, String>,
}

impl<W: Write> ConsoleView<W> {
    /// View printing bare category ids.
    pub fn new(out: W) -> Self {
        Self {
            out,
            names: HashMap::new(),
        }
    }

    /// View printing `names` next to category ids.
    pub const fn with_names(out: W, names: HashMap<CategoryId, String>) -> Self {
        Self { out, names }
    }

    /// Output sink.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Print an arbitrary line (used by the session for command feedback).
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{args}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write palette output");
        }
    }

    /// `name(id)` or just `id`.
    fn label(&self, id: CategoryId) -> String {
        self.names
            .get(&id)
            .map_or_else(|| id.to_string(), |name| format!("{name}({id})"))
    }
}

impl<W: Write> PaletteView for ConsoleView<W> {
    fn render_tabs(&mut self, tabs: &[NavTab], current: NavTab) {
        let rendered: Vec<String> = tabs
            .iter()
            .map(|tab| {
                let label = match tab {
                    NavTab::Search => "search".to_string(),
                    NavTab::Category(id) => self.label(*id),
                };
                if *tab == current {
                    format!("[{label}]")
                } else {
                    label
                }
            })
            .collect();
        self.line(format_args!("tabs: {}", rendered.join(" ")));
    }

    fn render_page(&mut self, category: CategoryId, page: usize, keys: &[String], animate: bool) {
        let label = self.label(category);
        let suffix = if animate { " (animated)" } else { "" };
        self.line(format_args!(
            "page {label} #{page}{suffix}: {}",
            keys.join(" ")
        ));
    }

    fn render_page_indicator(&mut self, page_count: usize, page: usize, fraction: f32) {
        self.line(format_args!(
            "indicator: {page}/{page_count} +{fraction:.2}"
        ));
    }

    fn show_search(&mut self, surface: SearchSurface<'_>) {
        match surface {
            SearchSurface::DownloadOffer => self.line(format_args!(
                "search: no emoji dictionary for this locale; type `download` to fetch one"
            )),
            SearchSurface::Results([]) => self.line(format_args!("results: (none)")),
            SearchSurface::Results(keys) => {
                self.line(format_args!("results: {}", keys.join(" ")));
            }
        }
    }

    fn commit_emoji(&mut self, key: &str) {
        self.line(format_args!("commit: {key}"));
    }

    fn notify(&mut self, notice: Notice) {
        self.line(format_args!("notice: {notice}"));
    }
}
