//! Terminal UI for superfile.
//!
//! The interaction loop describes what to show as a [Screen] and hands it to a
//! [Presenter]. [TerminalPresenter] draws screens with ratatui; tests use their own
//! presenters to record what would have been shown.
//!
//! - [render]: the per-screen drawing functions.
//! - [widgets]: popups and shared blocks.

pub mod render;
pub mod widgets;

use crate::app::nav::NavState;
use crate::config::Config;
use crate::core::fm::ListingConfig;
use crate::core::hexdump::HexDump;
use crate::core::meta::FileReport;
use crate::core::preview::FileView;
use crate::core::stats::DirStats;

use ratatui::Terminal;
use ratatui::backend::Backend;

use std::io;
use std::path::Path;

/// One-line message shown in the status bar until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: true,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

/// Everything the browser page needs, borrowed from the interaction loop.
#[derive(Debug, Clone, Copy)]
pub struct BrowserView<'a> {
    pub nav: &'a NavState,
    pub listing: &'a ListingConfig,
    /// The current directory is a favorite.
    pub favorite: bool,
    pub status: Option<&'a StatusMessage>,
}

#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    Browser(BrowserView<'a>),
    File {
        view: &'a FileView,
        scroll: usize,
    },
    Hex {
        path: &'a Path,
        dump: &'a HexDump,
        scroll: usize,
    },
    Properties {
        report: &'a FileReport,
        scroll: usize,
    },
    Stats {
        root: &'a Path,
        stats: &'a DirStats,
        scroll: usize,
    },
    /// Choice list drawn as a popup over the browser.
    Menu {
        title: &'a str,
        options: &'a [String],
        selected: usize,
        backdrop: BrowserView<'a>,
    },
    /// Single-line text input drawn as a popup over the browser.
    Prompt {
        title: &'a str,
        input: &'a str,
        backdrop: BrowserView<'a>,
    },
}

/// Sink for screens. Called once per key read.
pub trait Presenter {
    fn present(&mut self, screen: &Screen<'_>) -> io::Result<()>;
}

/// Draws screens to a ratatui terminal.
pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    config: Config,
}

impl<B: Backend> TerminalPresenter<B> {
    pub fn new(terminal: Terminal<B>, config: Config) -> Self {
        TerminalPresenter { terminal, config }
    }

    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }
}

impl<B: Backend> Presenter for TerminalPresenter<B> {
    fn present(&mut self, screen: &Screen<'_>) -> io::Result<()> {
        let config = &self.config;
        self.terminal
            .draw(|frame| render::render(frame, screen, config))
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(())
    }
}
