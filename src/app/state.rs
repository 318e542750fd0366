//! Application state and main controller module for superfile.
//!
//! [AppState] owns everything that lives for the whole session:
//! - the configuration and the keymap built from it
//! - the current [NavState] and the [Session] (listing options and favorites)
//! - the [Lister] used for every re-list
//! - the one-line status message
//!
//! [AppState::run] is the interaction loop: present the browser, read one key, map it
//! to an action, run the transition and any screen it asks for.

use crate::app::handlers::{KeyRead, next_key};
use crate::app::input::KeyDecoder;
use crate::app::keymap::Keymap;
use crate::app::nav::{self, Effect, NavAction, NavState, Session};
use crate::config::Config;
use crate::core::fm::{FsLister, Lister, ListingConfig};
use crate::ui::{BrowserView, Presenter, Screen, StatusMessage};
use crate::utils::shorten_home_path;

use std::io;
use std::path::Path;

/// Why the interaction loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    /// Ctrl+C.
    Interrupted,
    /// The key source reached its end.
    InputClosed,
}

/// Result of handling one action.
pub(crate) enum KeypressResult {
    Continue,
    Exit(ExitReason),
}

pub struct AppState {
    pub(super) config: Config,
    pub(super) keymap: Keymap,
    pub(super) nav: NavState,
    pub(super) session: Session,
    pub(super) lister: Box<dyn Lister>,
    pub(super) status: Option<StatusMessage>,
}

impl AppState {
    /// Opens `dir` on the filesystem.
    pub fn from_dir(config: Config, listing: ListingConfig, dir: &Path) -> Self {
        Self::with_lister(config, listing, dir, Box::new(FsLister))
    }

    pub fn with_lister(
        config: Config,
        listing: ListingConfig,
        dir: &Path,
        lister: Box<dyn Lister>,
    ) -> Self {
        let session = Session::new(listing);
        let keymap = Keymap::from_config(&config);
        let page_size = config.general().page_size();
        let start = nav::enter(dir, &session, lister.as_ref(), page_size);

        let mut app = AppState {
            config,
            keymap,
            nav: start.state,
            session,
            lister,
            status: None,
        };
        app.note_effect(start.effect);
        app
    }

    // Getters

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub(crate) fn browser_view(&self) -> BrowserView<'_> {
        BrowserView {
            nav: &self.nav,
            listing: self.session.listing(),
            favorite: self.session.favorites().contains(self.nav.current_dir()),
            status: self.status.as_ref(),
        }
    }

    pub(crate) fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Runs one engine transition and keeps the resulting state.
    ///
    /// Effects that only produce a status message are consumed here; the rest are
    /// returned for the caller to carry out.
    pub fn apply(&mut self, action: NavAction) -> Effect {
        let next = nav::transition(&self.nav, action, &mut self.session, self.lister.as_ref());
        if next.state.current_dir() != self.nav.current_dir() {
            tracing::debug!(dir = %next.state.current_dir().display(), "changed directory");
        }
        self.nav = next.state;
        self.note_effect(next.effect)
    }

    fn note_effect(&mut self, effect: Effect) -> Effect {
        match effect {
            Effect::ListingFailed(err) => {
                tracing::warn!(error = %err, "listing failed");
                self.set_status(StatusMessage::error(err.to_string()));
                Effect::None
            }
            Effect::FavoriteAdded(path) => {
                self.set_status(StatusMessage::info(format!(
                    "Added to favorites: {}",
                    shorten_home_path(&path)
                )));
                Effect::None
            }
            Effect::FavoriteRemoved(path) => {
                self.set_status(StatusMessage::info(format!(
                    "Removed from favorites: {}",
                    shorten_home_path(&path)
                )));
                Effect::None
            }
            other => other,
        }
    }

    /// Main interaction loop. Returns once the user quits, presses Ctrl+C or the key
    /// source closes.
    pub fn run(
        &mut self,
        decoder: &mut dyn KeyDecoder,
        presenter: &mut dyn Presenter,
    ) -> io::Result<ExitReason> {
        loop {
            presenter.present(&Screen::Browser(self.browser_view()))?;

            let key = match next_key(decoder) {
                KeyRead::Key(key) => key,
                KeyRead::Skip => continue,
                KeyRead::Exit(reason) => return Ok(reason),
            };

            let Some(action) = self.keymap.lookup(key) else {
                tracing::trace!(?key, "unbound key");
                continue;
            };

            self.status = None;
            if let KeypressResult::Exit(reason) = self.handle_action(action, decoder, presenter)? {
                tracing::info!(?reason, "leaving interaction loop");
                return Ok(reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::{ByteDecoder, Grammar};
    use crate::app::nav::Selection;
    use crate::core::fm::SortKey;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    /// Remembers the title of every presented screen.
    #[derive(Default)]
    struct Recorder {
        screens: Vec<String>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, screen: &Screen<'_>) -> io::Result<()> {
            let name = match screen {
                Screen::Browser(view) => format!("browser:{}", view.nav.selected()),
                Screen::File { .. } => "file".to_string(),
                Screen::Hex { .. } => "hex".to_string(),
                Screen::Properties { .. } => "properties".to_string(),
                Screen::Stats { .. } => "stats".to_string(),
                Screen::Menu { title, .. } => format!("menu:{}", title),
                Screen::Prompt { title, input, .. } => format!("prompt:{}:{}", title, input),
            };
            self.screens.push(name);
            Ok(())
        }
    }

    fn run_keys(app: &mut AppState, bytes: &[u8]) -> Result<(ExitReason, Recorder), io::Error> {
        let mut decoder = ByteDecoder::new(Cursor::new(bytes.to_vec()), Grammar::Ansi);
        let mut recorder = Recorder::default();
        let reason = app.run(&mut decoder, &mut recorder)?;
        Ok((reason, recorder))
    }

    fn sample_dir() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("docs"))?;
        fs::write(dir.path().join("docs/guide.md"), "# guide")?;
        fs::write(dir.path().join("a.txt"), "alpha")?;
        fs::write(dir.path().join("b.txt"), "beta")?;
        Ok(dir)
    }

    #[test]
    fn quit_key_ends_the_loop() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());
        let (reason, recorder) = run_keys(&mut app, b"q")?;
        assert_eq!(reason, ExitReason::Quit);
        assert_eq!(recorder.screens, vec!["browser:0"]);
        Ok(())
    }

    #[test]
    fn ctrl_c_interrupts_and_eof_closes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());
        assert_eq!(run_keys(&mut app, b"j\x03")?.0, ExitReason::Interrupted);
        assert_eq!(run_keys(&mut app, b"j")?.0, ExitReason::InputClosed);
        Ok(())
    }

    #[test]
    fn arrows_move_the_cursor() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());
        let (_, recorder) = run_keys(&mut app, b"\x1b[B\x1b[Bk\x1b[A\x1b[Aq")?;
        assert_eq!(
            recorder.screens,
            vec![
                "browser:0",
                "browser:1",
                "browser:2",
                "browser:1",
                "browser:0",
                "browser:-1"
            ]
        );
        Ok(())
    }

    #[test]
    fn enter_opens_directories_and_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());

        // "docs" sorts first; open it, then open guide.md and leave the viewer
        let (reason, recorder) = run_keys(&mut app, b"\r\rxq")?;
        assert_eq!(reason, ExitReason::Quit);
        assert_eq!(app.nav().current_dir(), dir.path().join("docs"));
        assert!(recorder.screens.contains(&"file".to_string()));
        Ok(())
    }

    #[test]
    fn sort_menu_flips_direction() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());

        // open the sort menu and pick the highlighted (current) key
        let (_, recorder) = run_keys(&mut app, b"s\rq")?;
        assert!(recorder.screens.contains(&"menu:Sort by".to_string()));
        assert_eq!(app.session().listing().sort_key, SortKey::Name);
        assert!(app.session().listing().reverse);
        Ok(())
    }

    #[test]
    fn search_jumps_to_the_chosen_hit() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());

        let (_, recorder) = run_keys(&mut app, b"/guide\r\rq")?;
        assert!(recorder.screens.contains(&"prompt:Search:guide".to_string()));
        assert_eq!(app.nav().current_dir(), dir.path().join("docs"));
        match app.nav().selection() {
            Selection::Entry(entry) => assert_eq!(entry.name_str(), "guide.md"),
            other => panic!("unexpected selection {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn search_without_hits_sets_status() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());
        run_keys(&mut app, b"/zzz\r")?;
        let status = app.status().map(|s| s.text().to_string()).unwrap_or_default();
        assert!(status.contains("zzz"), "{}", status);
        Ok(())
    }

    #[test]
    fn favorite_toggle_reports_status() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());
        run_keys(&mut app, b"f")?;
        assert!(app.session().favorites().contains(dir.path()));
        assert!(app.status().is_some_and(|s| s.text().starts_with("Added")));

        run_keys(&mut app, b"f")?;
        assert!(app.session().favorites().is_empty());
        Ok(())
    }

    #[test]
    fn options_menu_opens_statistics() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());

        // cursor on "docs", Tab, first option, leave the pager
        let (_, recorder) = run_keys(&mut app, b"\t\rxq")?;
        assert!(recorder.screens.contains(&"menu:Options".to_string()));
        assert!(recorder.screens.contains(&"stats".to_string()));
        Ok(())
    }

    #[test]
    fn properties_on_a_directory_show_its_statistics() -> Result<(), Box<dyn std::error::Error>> {
        let dir = sample_dir()?;
        let mut app = AppState::from_dir(Config::default(), ListingConfig::default(), dir.path());

        // cursor on "docs", third option
        let (_, recorder) = run_keys(&mut app, b"\t3xq")?;
        assert!(recorder.screens.contains(&"stats".to_string()));
        assert!(!recorder.screens.contains(&"properties".to_string()));
        assert!(app.status().is_none());

        // "a.txt" is a file
        let (_, recorder) = run_keys(&mut app, b"j\t3xq")?;
        assert!(recorder.screens.contains(&"properties".to_string()));
        Ok(())
    }

    #[test]
    fn missing_start_dir_shows_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let gone = dir.path().join("gone");
        let app = AppState::from_dir(Config::default(), ListingConfig::default(), &gone);
        assert!(app.nav().is_empty());
        assert!(app.status().is_some_and(|s| s.is_error()));
        Ok(())
    }
}
