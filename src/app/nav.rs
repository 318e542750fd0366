//! Navigation and pagination engine.
//!
//! [NavState] is an immutable snapshot of what the browser shows: the directory, its
//! entries and the cursor. [transition] maps a state and a [NavAction] to the next
//! state plus an [Effect] for the interaction loop to carry out. The only I/O it
//! performs goes through the injected [Lister].
//!
//! Cursor addressing: `selected == -1` is the parent row (absent at the filesystem
//! root), `0..len` are entries. In display slots the parent row is slot 0 and entry
//! `i` is slot `i + 1`, which is what the page formula is based on.

use crate::core::fm::{Entry, Lister, ListingConfig, PathKind, SortKey};
use crate::errors::ListingError;

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: usize = 20;
/// The parent row takes slot 0, so a page must hold at least one entry besides it.
pub const MIN_PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    current_dir: PathBuf,
    entries: Arc<[Entry]>,
    selected: isize,
    page_size: usize,
}

/// What the cursor currently points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Parent,
    Entry(&'a Entry),
    /// Empty listing without a parent row.
    Nothing,
}

impl NavState {
    pub fn new(current_dir: PathBuf, entries: Vec<Entry>, page_size: usize) -> Self {
        Self::at(current_dir, entries.into(), 0, page_size)
    }

    /// Empty listing at `current_dir`.
    pub fn empty(current_dir: PathBuf, page_size: usize) -> Self {
        Self::new(current_dir, Vec::new(), page_size)
    }

    fn at(current_dir: PathBuf, entries: Arc<[Entry]>, selected: isize, page_size: usize) -> Self {
        let mut state = NavState {
            current_dir,
            entries,
            selected: 0,
            page_size: page_size.max(MIN_PAGE_SIZE),
        };
        state.selected = state.clamp_selection(selected);
        state
    }

    fn with_selected(&self, selected: isize) -> Self {
        NavState {
            current_dir: self.current_dir.clone(),
            entries: Arc::clone(&self.entries),
            selected: self.clamp_selection(selected),
            page_size: self.page_size,
        }
    }

    fn clamp_selection(&self, selected: isize) -> isize {
        if self.entries.is_empty() {
            return 0;
        }
        selected.clamp(self.parent_floor(), self.len() as isize - 1)
    }

    // Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn selected(&self) -> isize {
        self.selected
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The filesystem root has no parent row.
    #[inline]
    pub fn has_parent_row(&self) -> bool {
        self.current_dir.parent().is_some()
    }

    /// Lowest reachable cursor value.
    #[inline]
    pub fn parent_floor(&self) -> isize {
        if self.has_parent_row() { -1 } else { 0 }
    }

    pub fn total_pages(&self) -> usize {
        self.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.page_of(self.selected)
    }

    fn page_of(&self, selected: isize) -> usize {
        let slot = (selected + 1).max(0) as usize;
        (slot / self.page_size).min(self.total_pages() - 1)
    }

    pub fn selection(&self) -> Selection<'_> {
        if self.selected == -1 && self.has_parent_row() {
            return Selection::Parent;
        }
        usize::try_from(self.selected)
            .ok()
            .and_then(|i| self.entries.get(i))
            .map_or(Selection::Nothing, Selection::Entry)
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        match self.selection() {
            Selection::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    /// Cursor values drawn on the current page, `-1` being the parent row.
    ///
    /// The last page extends to the end of the listing so the cursor is always visible.
    pub fn visible_rows(&self) -> Range<isize> {
        let page = self.current_page();
        let size = self.page_size as isize;
        let start = (page as isize * size - 1).max(self.parent_floor());
        let end = if page + 1 == self.total_pages() {
            self.len() as isize
        } else {
            (page as isize + 1) * size - 1
        };
        start..end.max(start)
    }
}

/// Ordered set of favorite directories, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    paths: Vec<PathBuf>,
}

impl Favorites {
    /// Adds `path` or removes it when present. Returns `true` when it was added.
    pub fn toggle(&mut self, path: &Path) -> bool {
        if let Some(pos) = self.paths.iter().position(|p| p == path) {
            self.paths.remove(pos);
            false
        } else {
            self.paths.push(path.to_path_buf());
            true
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// State that outlives a single directory: listing options and favorites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    listing: ListingConfig,
    favorites: Favorites,
}

impl Session {
    pub fn new(listing: ListingConfig) -> Self {
        Session {
            listing,
            favorites: Favorites::default(),
        }
    }

    #[inline]
    pub fn listing(&self) -> &ListingConfig {
        &self.listing
    }

    #[inline]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    Up,
    Down,
    PrevPage,
    NextPage,
    Open,
    ToggleHidden,
    Sort(SortKey),
    SearchJump(PathBuf),
    ToggleFavorite,
    Refresh,
    Quit,
}

/// Side effect requested by a transition.
#[derive(Debug)]
pub enum Effect {
    None,
    ViewFile(PathBuf),
    ListingFailed(ListingError),
    FavoriteAdded(PathBuf),
    FavoriteRemoved(PathBuf),
    Quit,
}

#[derive(Debug)]
pub struct Transition {
    pub state: NavState,
    pub effect: Effect,
}

impl Transition {
    fn stay(state: NavState) -> Self {
        Transition {
            state,
            effect: Effect::None,
        }
    }
}

/// Where the cursor lands after a re-list.
enum Focus<'a> {
    Top,
    Path(&'a Path),
}

/// Lists `path` and builds the initial state for it. On failure the state is an
/// empty listing at `path` and the error is carried in the effect.
pub fn enter<L: Lister + ?Sized>(
    path: &Path,
    session: &Session,
    lister: &L,
    page_size: usize,
) -> Transition {
    match lister.list(path, session.listing()) {
        Ok(entries) => Transition::stay(NavState::new(path.to_path_buf(), entries, page_size)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "initial listing failed");
            Transition {
                state: NavState::empty(path.to_path_buf(), page_size),
                effect: Effect::ListingFailed(err),
            }
        }
    }
}

pub fn transition<L: Lister + ?Sized>(
    state: &NavState,
    action: NavAction,
    session: &mut Session,
    lister: &L,
) -> Transition {
    tracing::trace!(?action, selected = state.selected, "transition");
    match action {
        NavAction::Up => {
            if state.is_empty() {
                return Transition::stay(state.clone());
            }
            Transition::stay(state.with_selected(state.selected - 1))
        }
        NavAction::Down => {
            if state.is_empty() {
                return Transition::stay(state.clone());
            }
            Transition::stay(state.with_selected(state.selected + 1))
        }
        NavAction::PrevPage => {
            let page = state.current_page().saturating_sub(1);
            let target = (page * state.page_size) as isize;
            Transition::stay(state.with_selected(target.max(state.parent_floor())))
        }
        NavAction::NextPage => {
            let page = state.current_page();
            if page + 1 >= state.total_pages() {
                return Transition::stay(state.clone());
            }
            Transition::stay(state.with_selected(((page + 1) * state.page_size) as isize))
        }
        NavAction::Open => open(state, session, lister),
        NavAction::ToggleHidden => {
            session.listing.toggle_hidden();
            relist(state.current_dir(), state, session, lister, Focus::Top)
        }
        NavAction::Sort(key) => {
            session.listing.select_sort(key);
            relist(state.current_dir(), state, session, lister, Focus::Top)
        }
        NavAction::SearchJump(path) => search_jump(state, &path, session, lister),
        NavAction::ToggleFavorite => {
            let dir = state.current_dir().to_path_buf();
            let effect = if session.favorites.toggle(&dir) {
                Effect::FavoriteAdded(dir)
            } else {
                Effect::FavoriteRemoved(dir)
            };
            Transition {
                state: state.clone(),
                effect,
            }
        }
        NavAction::Refresh => relist(state.current_dir(), state, session, lister, Focus::Top),
        NavAction::Quit => Transition {
            state: state.clone(),
            effect: Effect::Quit,
        },
    }
}

fn open<L: Lister + ?Sized>(state: &NavState, session: &Session, lister: &L) -> Transition {
    match state.selection() {
        Selection::Entry(entry) if entry.is_dir() => {
            relist(entry.path(), state, session, lister, Focus::Top)
        }
        Selection::Entry(entry) => Transition {
            state: state.clone(),
            effect: Effect::ViewFile(entry.path().to_path_buf()),
        },
        // An empty listing behaves like the parent row so the user is never stuck.
        Selection::Parent | Selection::Nothing => match state.current_dir().parent() {
            Some(parent) => relist(parent, state, session, lister, Focus::Top),
            None => Transition::stay(state.clone()),
        },
    }
}

fn search_jump<L: Lister + ?Sized>(
    state: &NavState,
    path: &Path,
    session: &Session,
    lister: &L,
) -> Transition {
    let target = if path.is_relative() {
        state.current_dir().join(path)
    } else {
        path.to_path_buf()
    };

    match lister.probe(&target) {
        PathKind::Directory => relist(&target, state, session, lister, Focus::Top),
        PathKind::File => match target.parent() {
            Some(parent) => relist(parent, state, session, lister, Focus::Path(&target)),
            None => Transition::stay(state.clone()),
        },
        PathKind::Missing => Transition {
            state: state.clone(),
            effect: Effect::ListingFailed(ListingError::NotFound(target)),
        },
    }
}

/// Re-lists `target` and places the cursor. On failure falls back to the current
/// directory, or to an empty listing there when that fails as well.
fn relist<L: Lister + ?Sized>(
    target: &Path,
    state: &NavState,
    session: &Session,
    lister: &L,
    focus: Focus<'_>,
) -> Transition {
    let config = session.listing();
    match lister.list(target, config) {
        Ok(entries) => {
            let selected = match focus {
                Focus::Top => 0,
                Focus::Path(p) => entries.iter().position(|e| e.path() == p).unwrap_or(0) as isize,
            };
            Transition::stay(NavState::at(
                target.to_path_buf(),
                entries.into(),
                selected,
                state.page_size,
            ))
        }
        Err(err) => {
            tracing::warn!(target = %target.display(), error = %err, "listing failed");
            let known_good = state.current_dir();
            let entries = if target != known_good {
                lister.list(known_good, config).unwrap_or_else(|fallback_err| {
                    tracing::warn!(error = %fallback_err, "fallback listing failed");
                    Vec::new()
                })
            } else {
                Vec::new()
            };
            Transition {
                state: NavState::at(known_good.to_path_buf(), entries.into(), 0, state.page_size),
                effect: Effect::ListingFailed(err),
            }
        }
    }
}
