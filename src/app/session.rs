//! Line-driven interactive session.
//!
//! Each input line is one palette event; download completions arrive on a
//! channel and are handled on the same loop, so the palette is only ever
//! touched from this task.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;

use crate::catalog::CategoryId;
use crate::dictionary::DownloadOutcome;
use crate::palette::EmojiPalette;
use crate::state::{NavTab, ScrollReport};

use super::Result;
use super::persist::maybe_flush_recents;
use super::view::ConsoleView;

/// Help text printed by `help`.
const HELP: &str = "\
commands:
  tab <id|search>          click a tab
  swipe <position>         pager settled on a tab position
  scroll <offset> <extent> <range> <first_full> <first_partial> [category]
  leave <id>               a category page list left the screen
  pick <emoji>             pick an emoji from the page
  query <text>             search text changed
  choose <emoji>           pick a search result
  close                    leave search mode
  locale <locale>          switch input locale
  download                 download the dictionary for the locale
  clear-cache              close the dictionary
  incognito <on|off>       stop or resume recording recents
  hide | show              visibility changes
  quit";

/// One parsed session line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Blank line.
    Nothing,
    /// Print the command list.
    Help,
    /// Tab click.
    Tab(NavTab),
    /// Pager page selected.
    Swipe(usize),
    /// Scroll report; `category` defaults to the current one.
    Scroll {
        /// Scroll offset.
        offset: u32,
        /// Visible extent.
        extent: u32,
        /// Total range.
        range: u32,
        /// First fully visible position.
        first_full: i64,
        /// First partially visible position.
        first_partial: i64,
        /// Reporting category.
        category: Option<CategoryId>,
    },
    /// Category page list detached.
    Leave(CategoryId),
    /// Emoji picked from a page.
    Pick(String),
    /// Search text changed.
    Query(String),
    /// Search result picked.
    Choose(String),
    /// Leave search mode.
    Close,
    /// Input locale changed.
    Locale(String),
    /// Start a dictionary download.
    Download,
    /// Close the dictionary.
    ClearCache,
    /// Toggle incognito mode.
    Incognito(bool),
    /// Palette hidden.
    Hide,
    /// Palette shown again.
    Show,
    /// End the session.
    Quit,
}

/// Parse a numeric argument.
fn num<T: std::str::FromStr>(word: Option<&str>, what: &str) -> std::result::Result<T, String> {
    word.ok_or_else(|| format!("missing {what}"))?
        .parse()
        .map_err(|_| format!("invalid {what}"))
}

/// Parse a category id argument.
fn category(word: Option<&str>) -> std::result::Result<CategoryId, String> {
    num::<u32>(word, "category id").map(CategoryId)
}

/// What: Parse one session line.
///
/// Output:
/// - The command, or a message describing why the line was rejected.
///
/// Details:
/// - `query` takes the rest of the line verbatim (one separating space removed) so leading and
///   trailing spaces reach the search.
///
/// # Errors
/// - Unknown commands and missing or malformed arguments.
pub fn parse_command(line: &str) -> std::result::Result<SessionCommand, String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim_start();
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let mut args = rest.split_whitespace();
    let cmd = match word.trim_end() {
        "" => SessionCommand::Nothing,
        "help" | "?" => SessionCommand::Help,
        "tab" => match args.next() {
            Some("search") => SessionCommand::Tab(NavTab::Search),
            other => SessionCommand::Tab(NavTab::Category(category(other)?)),
        },
        "swipe" => SessionCommand::Swipe(num(args.next(), "position")?),
        "scroll" => SessionCommand::Scroll {
            offset: num(args.next(), "offset")?,
            extent: num(args.next(), "extent")?,
            range: num(args.next(), "range")?,
            first_full: num(args.next(), "first fully visible position")?,
            first_partial: num(args.next(), "first partially visible position")?,
            category: args.next().map(|w| category(Some(w))).transpose()?,
        },
        "leave" => SessionCommand::Leave(category(args.next())?),
        "pick" => SessionCommand::Pick(args.next().ok_or("missing emoji")?.to_string()),
        "choose" => SessionCommand::Choose(args.next().ok_or("missing emoji")?.to_string()),
        "query" => SessionCommand::Query(rest.to_string()),
        "close" => SessionCommand::Close,
        "locale" => SessionCommand::Locale(args.next().ok_or("missing locale")?.to_string()),
        "download" => SessionCommand::Download,
        "clear-cache" => SessionCommand::ClearCache,
        "incognito" => match args.next() {
            Some("on") => SessionCommand::Incognito(true),
            Some("off") => SessionCommand::Incognito(false),
            _ => return Err("expected `incognito on` or `incognito off`".to_string()),
        },
        "hide" => SessionCommand::Hide,
        "show" => SessionCommand::Show,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command `{other}` (try `help`)")),
    };
    Ok(cmd)
}

/// What: Apply one command to the palette.
///
/// Output:
/// - `true` when a download was started.
fn apply<W: Write>(
    palette: &mut EmojiPalette<ConsoleView<W>>,
    cmd: SessionCommand,
    tx: &mpsc::UnboundedSender<DownloadOutcome>,
) -> bool {
    match cmd {
        SessionCommand::Nothing | SessionCommand::Quit => {}
        SessionCommand::Help => palette.view_mut().line(format_args!("{HELP}")),
        SessionCommand::Tab(tab) => palette.on_tab_clicked(tab),
        SessionCommand::Swipe(position) => palette.on_page_selected(position),
        SessionCommand::Scroll {
            offset,
            extent,
            range,
            first_full,
            first_partial,
            category,
        } => {
            let report = ScrollReport {
                category: category.unwrap_or_else(|| palette.model().current_category_id()),
                offset,
                extent,
                range,
                first_fully_visible: first_full,
                first_partially_visible: first_partial,
            };
            palette.on_scrolled(&report);
        }
        SessionCommand::Leave(id) => palette.on_category_detached(id),
        SessionCommand::Pick(key) => palette.on_emoji_selected(&key),
        SessionCommand::Query(text) => palette.on_query_changed(&text),
        SessionCommand::Choose(key) => palette.on_search_result_chosen(&key),
        SessionCommand::Close => palette.exit_search(),
        SessionCommand::Locale(locale) => palette.on_locale_changed(&locale),
        SessionCommand::Download => return palette.request_dictionary_download(tx),
        SessionCommand::ClearCache => palette.clear_cache(),
        SessionCommand::Incognito(on) => palette.set_incognito(on),
        SessionCommand::Hide => palette.hide(),
        SessionCommand::Show => {
            let locale = palette.locale().to_string();
            palette.start(&locale);
        }
    }
    false
}

/// What: Run the session until `quit` or end of input.
///
/// Inputs:
/// - `palette`: Started palette printing to a console view.
/// - `input`: Line source (stdin in the binary).
/// - `recents_path`: Where changed recents are persisted after every event.
///
/// Details:
/// - After end of input the loop keeps waiting for downloads already in flight.
/// - On exit the palette is stopped and recents are flushed one last time.
///
/// # Errors
/// - Reading from `input` fails.
pub async fn run_session<W, R>(
    palette: &mut EmojiPalette<ConsoleView<W>>,
    input: R,
    recents_path: &Path,
) -> Result<()>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<DownloadOutcome>();
    let mut lines = input.lines();
    let mut input_done = false;
    let mut in_flight = 0_usize;
    loop {
        if input_done && in_flight == 0 {
            break;
        }
        select! {
            line = lines.next_line(), if !input_done => {
                match line? {
                    Some(line) => match parse_command(&line) {
                        Ok(SessionCommand::Quit) => break,
                        Ok(cmd) => {
                            tracing::trace!(?cmd, "session command");
                            if apply(palette, cmd, &tx) {
                                in_flight += 1;
                            }
                        }
                        Err(msg) => palette.view_mut().line(format_args!("error: {msg}")),
                    },
                    None => {
                        tracing::debug!(in_flight, "session input closed");
                        input_done = true;
                    }
                }
            }
            Some(outcome) = rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                palette.on_download_complete(outcome);
            }
        }
        maybe_flush_recents(palette, recents_path);
    }
    palette.stop();
    maybe_flush_recents(palette, recents_path);
    Ok(())
}
