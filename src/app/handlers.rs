//! Action handler methods for superfile.
//!
//! This module implements the [AppState] methods that turn an [Action] into engine
//! transitions and the modal screens around them: the options, sort and search menus,
//! the search prompt and the pagers for file content, hex dumps, properties and
//! statistics.
//!
//! Modal screens read raw [Key]s from the same decoder as the browser.

use crate::app::input::{Key, KeyDecoder};
use crate::app::keymap::Action;
use crate::app::nav::{Effect, NavAction, Selection};
use crate::app::state::{AppState, ExitReason, KeypressResult};
use crate::config::Config;
use crate::core::find::{SearchOptions, search};
use crate::core::fm::SortKey;
use crate::core::hexdump::{HexOptions, hex_dump};
use crate::core::meta::FileReport;
use crate::core::preview::FileView;
use crate::core::stats::{self, StatsOptions};
use crate::errors::DecodeError;
use crate::ui::render::body_len;
use crate::ui::{BrowserView, Presenter, Screen, StatusMessage};

use std::io;
use std::path::Path;

const OPTIONS: [&str; 5] = ["Statistics", "Hex view", "Properties", "Favorites", "Back"];

/// One read from the decoder, already sorted into what the caller must do.
pub(crate) enum KeyRead {
    Key(Key),
    /// Nothing to act on; redraw and read again.
    Skip,
    Exit(ExitReason),
}

pub(crate) fn next_key(decoder: &mut dyn KeyDecoder) -> KeyRead {
    match decoder.read_key() {
        Ok(Key::Interrupt) => KeyRead::Exit(ExitReason::Interrupted),
        Ok(Key::Resize) => KeyRead::Skip,
        Ok(key) => KeyRead::Key(key),
        Err(DecodeError::Closed) => KeyRead::Exit(ExitReason::InputClosed),
        Err(DecodeError::Io(e)) => {
            tracing::warn!(error = %e, "failed to read key");
            KeyRead::Skip
        }
    }
}

/// Outcome of a menu or prompt.
pub(crate) enum Choice<T> {
    Picked(T),
    Cancelled,
    Exit(ExitReason),
}

/// Unwraps a [Choice], returning from the handler when nothing was picked.
macro_rules! picked {
    ($choice:expr) => {
        match $choice {
            Choice::Picked(value) => value,
            Choice::Cancelled => return Ok(KeypressResult::Continue),
            Choice::Exit(reason) => return Ok(KeypressResult::Exit(reason)),
        }
    };
}

/// AppState action handlers
impl AppState {
    pub(super) fn handle_action(
        &mut self,
        action: Action,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        tracing::debug!(?action, "handling action");
        let nav_action = match action {
            Action::Up => NavAction::Up,
            Action::Down => NavAction::Down,
            Action::Left => NavAction::PrevPage,
            Action::Right => NavAction::NextPage,
            Action::Enter => NavAction::Open,
            Action::ToggleHidden => NavAction::ToggleHidden,
            Action::Refresh => NavAction::Refresh,
            Action::Favorite => NavAction::ToggleFavorite,
            Action::Quit => NavAction::Quit,
            Action::Sort => return self.handle_sort(decoder, presenter),
            Action::Search => return self.handle_search(decoder, presenter),
            Action::Tab => return self.handle_options(decoder, presenter),
        };
        self.perform(nav_action, decoder, presenter)
    }

    /// Applies `action` and carries out the effect the engine left over.
    fn perform(
        &mut self,
        action: NavAction,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        match self.apply(action) {
            Effect::Quit => Ok(KeypressResult::Exit(ExitReason::Quit)),
            Effect::ViewFile(path) => self.show_file(&path, decoder, presenter),
            _ => Ok(KeypressResult::Continue),
        }
    }

    fn handle_sort(
        &mut self,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        let listing = self.session.listing();
        let options: Vec<String> = SortKey::ALL
            .iter()
            .map(|key| {
                let label = key.as_str();
                if *key == listing.sort_key {
                    format!("{} {}", label, listing.direction_arrow())
                } else {
                    label.to_string()
                }
            })
            .collect();
        let current = SortKey::ALL
            .iter()
            .position(|key| *key == listing.sort_key)
            .unwrap_or(0);

        let idx = picked!(choose(
            decoder,
            presenter,
            "Sort by",
            &options,
            current,
            self.browser_view()
        )?);
        self.perform(NavAction::Sort(SortKey::ALL[idx]), decoder, presenter)
    }

    fn handle_search(
        &mut self,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        let query = picked!(prompt(decoder, presenter, "Search", self.browser_view())?);
        let query = query.trim();
        if query.is_empty() {
            return Ok(KeypressResult::Continue);
        }

        let options = SearchOptions {
            max_results: self.config.general().max_search_results(),
            show_hidden: self.session.listing().show_hidden,
        };
        let hits = search(self.nav.current_dir(), query, &options);
        tracing::debug!(query, hits = hits.len(), "search finished");

        if hits.is_empty() {
            self.set_status(StatusMessage::info(format!("No results for '{}'", query)));
            return Ok(KeypressResult::Continue);
        }

        let title = if hits.len() >= options.max_results {
            format!("Results for '{}' (first {})", query, options.max_results)
        } else {
            format!("Results for '{}'", query)
        };
        let labels: Vec<String> = hits.iter().map(|hit| hit.label()).collect();
        let idx = picked!(choose(
            decoder,
            presenter,
            &title,
            &labels,
            0,
            self.browser_view()
        )?);

        let target = hits[idx].path().to_path_buf();
        self.perform(NavAction::SearchJump(target), decoder, presenter)
    }

    fn handle_options(
        &mut self,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        let options: Vec<String> = OPTIONS.iter().map(|o| o.to_string()).collect();
        let idx = picked!(choose(
            decoder,
            presenter,
            "Options",
            &options,
            0,
            self.browser_view()
        )?);

        let selected_file = self
            .nav
            .selected_entry()
            .filter(|e| !e.is_dir())
            .map(|e| e.path().to_path_buf());

        match OPTIONS[idx] {
            "Statistics" => match self.nav.selection() {
                Selection::Entry(entry) if entry.is_dir() => {
                    let dir = entry.path().to_path_buf();
                    self.show_stats(&dir, decoder, presenter)
                }
                Selection::Entry(entry) => {
                    let file = entry.path().to_path_buf();
                    self.show_properties(&file, decoder, presenter)
                }
                Selection::Parent | Selection::Nothing => {
                    let dir = self.nav.current_dir().to_path_buf();
                    self.show_stats(&dir, decoder, presenter)
                }
            },
            "Hex view" => match selected_file {
                Some(file) => self.show_hex(&file, decoder, presenter),
                None => {
                    self.set_status(StatusMessage::info("Hex view needs a file"));
                    Ok(KeypressResult::Continue)
                }
            },
            "Properties" => match self.nav.selection() {
                Selection::Entry(entry) if entry.is_dir() => {
                    let dir = entry.path().to_path_buf();
                    self.show_stats(&dir, decoder, presenter)
                }
                Selection::Entry(entry) => {
                    let file = entry.path().to_path_buf();
                    self.show_properties(&file, decoder, presenter)
                }
                Selection::Parent | Selection::Nothing => {
                    self.set_status(StatusMessage::info("Properties need a file"));
                    Ok(KeypressResult::Continue)
                }
            },
            "Favorites" => self.handle_favorites(decoder, presenter),
            _ => Ok(KeypressResult::Continue),
        }
    }

    fn handle_favorites(
        &mut self,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        if self.session.favorites().is_empty() {
            self.set_status(StatusMessage::info("No favorites yet"));
            return Ok(KeypressResult::Continue);
        }

        let paths = self.session.favorites().paths().to_vec();
        let labels: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        let idx = picked!(choose(
            decoder,
            presenter,
            "Favorites",
            &labels,
            0,
            self.browser_view()
        )?);
        self.perform(NavAction::SearchJump(paths[idx].clone()), decoder, presenter)
    }

    fn show_file(
        &mut self,
        path: &Path,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        Ok(view_file(
            &self.config,
            path,
            self.nav.page_size(),
            decoder,
            presenter,
        )?
        .map_or(KeypressResult::Continue, KeypressResult::Exit))
    }

    fn show_hex(
        &mut self,
        path: &Path,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        let dump = match hex_dump(path, HexOptions::default()) {
            Ok(dump) => dump,
            Err(e) => {
                self.set_status(StatusMessage::error(format!(
                    "Unable to read {}: {}",
                    path.display(),
                    e
                )));
                return Ok(KeypressResult::Continue);
            }
        };
        let exit = page(
            decoder,
            presenter,
            &self.config,
            self.nav.page_size(),
            |scroll| Screen::Hex {
                path,
                dump: &dump,
                scroll,
            },
        )?;
        Ok(exit.map_or(KeypressResult::Continue, KeypressResult::Exit))
    }

    fn show_properties(
        &mut self,
        path: &Path,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        let report = match FileReport::collect(path) {
            Ok(report) => report,
            Err(e) => {
                self.set_status(StatusMessage::error(e.to_string()));
                return Ok(KeypressResult::Continue);
            }
        };
        let exit = page(
            decoder,
            presenter,
            &self.config,
            self.nav.page_size(),
            |scroll| Screen::Properties {
                report: &report,
                scroll,
            },
        )?;
        Ok(exit.map_or(KeypressResult::Continue, KeypressResult::Exit))
    }

    fn show_stats(
        &mut self,
        root: &Path,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<KeypressResult> {
        let options = StatsOptions {
            show_hidden: self.session.listing().show_hidden,
            ..StatsOptions::default()
        };
        let stats = stats::collect(root, &options);
        let exit = page(
            decoder,
            presenter,
            &self.config,
            self.nav.page_size(),
            |scroll| Screen::Stats {
                root,
                stats: &stats,
                scroll,
            },
        )?;
        Ok(exit.map_or(KeypressResult::Continue, KeypressResult::Exit))
    }
}

/// Shows a single file until a key other than the scroll keys is pressed.
/// Returns the exit reason when the session should end instead.
pub fn view_file(
    config: &Config,
    path: &Path,
    step: usize,
    decoder: &mut dyn KeyDecoder,
    presenter: &mut dyn Presenter,
) -> io::Result<Option<ExitReason>> {
    let view = FileView::load(path, config.general().preview_lines());
    page(decoder, presenter, config, step, |scroll| Screen::File {
        view: &view,
        scroll,
    })
}

/// Scrollable detail screen. Up/Down move one line, Left/Right move `step` lines and
/// any other key closes it.
pub(crate) fn page<'s>(
    decoder: &mut dyn KeyDecoder,
    presenter: &mut dyn Presenter,
    config: &Config,
    step: usize,
    screen_at: impl Fn(usize) -> Screen<'s>,
) -> io::Result<Option<ExitReason>> {
    let max = body_len(&screen_at(0), config).saturating_sub(1);
    let mut scroll = 0;
    loop {
        presenter.present(&screen_at(scroll))?;
        match next_key(decoder) {
            KeyRead::Skip => {}
            KeyRead::Exit(reason) => return Ok(Some(reason)),
            KeyRead::Key(Key::Up) => scroll = scroll.saturating_sub(1),
            KeyRead::Key(Key::Down) => scroll = (scroll + 1).min(max),
            KeyRead::Key(Key::Left) => scroll = scroll.saturating_sub(step),
            KeyRead::Key(Key::Right) => scroll = (scroll + step).min(max),
            KeyRead::Key(_) => return Ok(None),
        }
    }
}

/// Choice list. Up/Down move, Enter or Right picks, digits 1-9 pick directly and
/// Esc, Left or Backspace cancel.
pub(crate) fn choose(
    decoder: &mut dyn KeyDecoder,
    presenter: &mut dyn Presenter,
    title: &str,
    options: &[String],
    initial: usize,
    backdrop: BrowserView<'_>,
) -> io::Result<Choice<usize>> {
    if options.is_empty() {
        return Ok(Choice::Cancelled);
    }
    let last = options.len() - 1;
    let mut selected = initial.min(last);
    loop {
        presenter.present(&Screen::Menu {
            title,
            options,
            selected,
            backdrop,
        })?;
        match next_key(decoder) {
            KeyRead::Skip => {}
            KeyRead::Exit(reason) => return Ok(Choice::Exit(reason)),
            KeyRead::Key(Key::Up) => selected = selected.saturating_sub(1),
            KeyRead::Key(Key::Down) => selected = (selected + 1).min(last),
            KeyRead::Key(Key::Enter | Key::Right) => return Ok(Choice::Picked(selected)),
            KeyRead::Key(Key::Esc | Key::Left | Key::Backspace) => return Ok(Choice::Cancelled),
            KeyRead::Key(Key::Char(c)) => {
                if let Some(n) = c.to_digit(10)
                    && n >= 1
                    && (n as usize) <= options.len()
                {
                    return Ok(Choice::Picked(n as usize - 1));
                }
            }
            KeyRead::Key(_) => {}
        }
    }
}

/// Single-line text input. Enter confirms, Esc cancels.
pub(crate) fn prompt(
    decoder: &mut dyn KeyDecoder,
    presenter: &mut dyn Presenter,
    title: &str,
    backdrop: BrowserView<'_>,
) -> io::Result<Choice<String>> {
    let mut input = String::new();
    loop {
        presenter.present(&Screen::Prompt {
            title,
            input: &input,
            backdrop,
        })?;
        match next_key(decoder) {
            KeyRead::Skip => {}
            KeyRead::Exit(reason) => return Ok(Choice::Exit(reason)),
            KeyRead::Key(Key::Enter) => return Ok(Choice::Picked(input)),
            KeyRead::Key(Key::Esc) => return Ok(Choice::Cancelled),
            KeyRead::Key(Key::Backspace) => {
                input.pop();
            }
            KeyRead::Key(Key::Char(c)) => input.push(c),
            KeyRead::Key(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::{ByteDecoder, Grammar};
    use crate::app::nav::NavState;
    use crate::core::fm::ListingConfig;
    use std::io::Cursor;

    struct Count(usize);

    impl Presenter for Count {
        fn present(&mut self, _screen: &Screen<'_>) -> io::Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    fn decoder(bytes: &[u8]) -> ByteDecoder<Cursor<Vec<u8>>> {
        ByteDecoder::new(Cursor::new(bytes.to_vec()), Grammar::Ansi)
    }

    #[test]
    fn prompt_edits_and_confirms() -> Result<(), Box<dyn std::error::Error>> {
        let nav = NavState::empty("/".into(), 20);
        let listing = ListingConfig::default();
        let backdrop = BrowserView {
            nav: &nav,
            listing: &listing,
            favorite: false,
            status: None,
        };
        let mut keys = decoder(b"abx\x7fc\r");
        let mut count = Count(0);
        match prompt(&mut keys, &mut count, "Search", backdrop)? {
            Choice::Picked(text) => assert_eq!(text, "abc"),
            _ => panic!("expected input"),
        }
        assert_eq!(count.0, 6);

        let mut keys = decoder(b"ab\x1b\x1b");
        assert!(matches!(
            prompt(&mut keys, &mut count, "Search", backdrop)?,
            Choice::Cancelled
        ));
        Ok(())
    }

    #[test]
    fn menu_clamps_and_picks() -> Result<(), Box<dyn std::error::Error>> {
        let nav = NavState::empty("/".into(), 20);
        let listing = ListingConfig::default();
        let backdrop = BrowserView {
            nav: &nav,
            listing: &listing,
            favorite: false,
            status: None,
        };
        let options: Vec<String> = ["one", "two", "three"].iter().map(|s| s.to_string()).collect();
        let mut count = Count(0);

        let mut keys = decoder(b"\x1b[B\x1b[B\x1b[B\x1b[B\r");
        assert!(matches!(
            choose(&mut keys, &mut count, "t", &options, 0, backdrop)?,
            Choice::Picked(2)
        ));

        let mut keys = decoder(b"2");
        assert!(matches!(
            choose(&mut keys, &mut count, "t", &options, 0, backdrop)?,
            Choice::Picked(1)
        ));

        let mut keys = decoder(b"\x03");
        assert!(matches!(
            choose(&mut keys, &mut count, "t", &options, 0, backdrop)?,
            Choice::Exit(ExitReason::Interrupted)
        ));
        Ok(())
    }

    #[test]
    fn pager_scroll_is_bounded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lines.txt");
        let text: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        std::fs::write(&path, text)?;
        let config = Config::default();
        let view = FileView::load(&path, 100);

        let mut last_scroll = 0;
        struct Track<'a>(&'a mut usize);
        impl Presenter for Track<'_> {
            fn present(&mut self, screen: &Screen<'_>) -> io::Result<()> {
                if let Screen::File { scroll, .. } = screen {
                    *self.0 = *scroll;
                }
                Ok(())
            }
        }

        let mut keys = decoder(b"\x1b[C\x1b[C\x1b[C\x1b[B");
        let exit = page(&mut keys, &mut Track(&mut last_scroll), &config, 20, |scroll| {
            Screen::File {
                view: &view,
                scroll,
            }
        })?;
        assert_eq!(exit, Some(ExitReason::InputClosed));
        assert_eq!(last_scroll, 29);
        Ok(())
    }
}
