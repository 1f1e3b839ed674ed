//! Command-line front end: wires settings, the catalog, the dictionary cache and
//! persisted recents into an [`EmojiPalette`] printing to the terminal.

use std::collections::HashMap;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::args::{Args, Command, apply_overrides};
use crate::catalog::{Catalog, CategoryId};
use crate::config::{self, Settings};
use crate::dictionary::{DictionaryLifecycle, FsDictionaryStore, InstallOutcome};
use crate::palette::EmojiPalette;
use crate::state::{CategoryModel, RecentsStore};

/// Persistence of recent emoji.
mod persist;
/// Interactive line-driven session.
mod session;
/// Text rendering of palette callbacks.
mod view;

pub use persist::{load_recents, maybe_flush_recents};
pub use session::{SessionCommand, parse_command, run_session};
pub use view::ConsoleView;

/// Front-end result type.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Palette printing to stdout.
type ConsolePalette = EmojiPalette<ConsoleView<Stdout>>;

/// What: Build a palette from settings and persisted state.
///
/// Inputs:
/// - `settings`: Effective settings (file plus flags).
/// - `catalog`: Emoji key sets.
/// - `dicts_dir`: Dictionary cache root.
/// - `recents`: Persisted most-recent-first keys.
/// - `out`: Output sink of the console view.
pub fn build_palette<W: std::io::Write>(
    settings: &Settings,
    catalog: Catalog,
    dicts_dir: &Path,
    recents: Vec<String>,
    out: W,
) -> EmojiPalette<ConsoleView<W>> {
    let mut names: HashMap<CategoryId, String> = catalog
        .categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();
    names.insert(CategoryId::RECENTS, "recents".to_string());

    let mut store = RecentsStore::new(settings.recents_capacity());
    store.restore(recents);
    let model = CategoryModel::new(catalog, store, settings.category_options());
    let lifecycle = Arc::new(DictionaryLifecycle::new(Arc::new(FsDictionaryStore::new(
        dicts_dir,
    ))));
    EmojiPalette::new(
        model,
        lifecycle,
        ConsoleView::with_names(out, names),
        settings.palette_options(),
    )
}

/// Print matches of `query` with their descriptions.
fn print_search(palette: &mut ConsolePalette, query: &str) {
    if let Err(e) = palette.lifecycle().require_ready() {
        palette
            .view_mut()
            .line(format_args!("{e}; run `emoji-palette download` first"));
        return;
    }
    let results: Vec<(String, String)> = palette
        .search(query)
        .into_iter()
        .map(|key| {
            let description = palette.describe(&key).unwrap_or_default();
            (key, description)
        })
        .collect();
    for (key, description) in results {
        palette
            .view_mut()
            .line(format_args!("{key}\t{description}"));
    }
}

/// Install a local dictionary file for the palette's locale.
async fn install_file(palette: &mut ConsolePalette, file: &Path) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| format!("read {}: {e}", file.display()))?;
    let locale = palette.locale().to_string();
    match palette.lifecycle().install_from_download(&bytes, &locale)? {
        InstallOutcome::Installed { path } => {
            palette
                .view_mut()
                .line(format_args!("installed {} for {locale}", path.display()));
        }
        InstallOutcome::Discarded { active } => {
            tracing::warn!(?active, "install discarded for inactive locale");
        }
    }
    Ok(())
}

/// Download the dictionary for the palette's locale and wait for the install.
async fn download(palette: &mut ConsolePalette) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    if !palette.request_dictionary_download(&tx) {
        return;
    }
    if let Some(outcome) = rx.recv().await {
        palette.on_download_complete(outcome);
    }
}

/// What: Run one command end to end.
///
/// Inputs:
/// - `args`: Parsed command line; no subcommand means an interactive session.
///
/// Output:
/// - `Ok(())` on completion; `Err` for unreadable catalogs, unreadable install files, failed
///   installs or a broken stdin.
///
/// Details:
/// - Settings come from `settings.conf` with command-line overrides applied on top.
/// - Recents are persisted whenever they change and once more on exit.
pub async fn run(args: Args) -> Result<()> {
    let mut settings = config::settings();
    apply_overrides(&args, &mut settings);
    if let Some(Command::Download { url: Some(url) }) = &args.command {
        settings.dictionary_url = Some(url.clone());
    }
    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let dicts_dir: PathBuf = args.dict_dir.clone().unwrap_or_else(config::dicts_dir);
    let recents_path = config::recents_path();
    tracing::info!(
        locale = %settings.locale,
        dicts = %dicts_dir.display(),
        categories = catalog.categories.len(),
        "emoji-palette starting"
    );

    let mut palette = build_palette(
        &settings,
        catalog,
        &dicts_dir,
        load_recents(&recents_path),
        std::io::stdout(),
    );
    let command = args.command.unwrap_or(Command::Session);
    if command != Command::Session {
        palette.on_locale_changed(&settings.locale);
    }
    match command {
        Command::Search { query } => print_search(&mut palette, &query),
        Command::Describe { key } => {
            let text = palette.describe(&key).unwrap_or_else(|| "(no description)".into());
            palette.view_mut().line(format_args!("{key}\t{text}"));
        }
        Command::Categories => {
            let rows: Vec<String> = palette
                .model()
                .shown_categories()
                .iter()
                .map(|c| format!("{}\t{}\t{} pages", c.id, c.name, c.page_count))
                .collect();
            for row in rows {
                palette.view_mut().line(format_args!("{row}"));
            }
        }
        Command::Recents => {
            let keys = palette.model().recents().keys();
            for key in keys {
                palette.view_mut().line(format_args!("{key}"));
            }
        }
        Command::Install { file } => install_file(&mut palette, &file).await?,
        Command::Download { .. } => download(&mut palette).await,
        Command::Session => {
            palette.start(&settings.locale);
            palette
                .view_mut()
                .line(format_args!("type `help` for commands, `quit` to exit"));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_session(&mut palette, stdin, &recents_path).await?;
        }
    }
    maybe_flush_recents(&mut palette, &recents_path);
    tracing::info!("emoji-palette finished");
    Ok(())
}
