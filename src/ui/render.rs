//! UI renderer implementation.
//!
//! [render] is the single entry point used by the presenter. The browser page is a
//! header, the listing table of the current page, a status bar and the help line.
//! The detail screens (file view, hex dump, properties, statistics) share one
//! layout: a fixed header and a scrollable body.
//!
//! This module stays pure rendering: it reads a [Screen] and the config and produces
//! widgets.

use crate::config::Config;
use crate::core::fm::{Entry, SortKey};
use crate::core::formatter::{
    format_file_time, format_listing_size, format_short_time, format_size,
    sanitize_to_exact_width,
};
use crate::core::hexdump::HexDump;
use crate::core::icons::{DIR_ICON, PARENT_ICON};
use crate::core::meta::FileReport;
use crate::core::preview::{FileBody, FileView};
use crate::core::stats::DirStats;
use crate::ui::widgets::{self, status_style, themed_block};
use crate::ui::{BrowserView, Screen};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use std::path::Path;

pub const HELP_LINE: &str = "[↑↓]: Navigate • [←→]: Change page • [Enter]: Open • [Tab]: Options • \
     [/]: Search • [h]: Hidden files • [s]: Sort • [f]: Favorites • [q]: Quit";

const PAGER_HINT: &str = "[↑↓]: Scroll • [←→]: Page • any other key: Back";
const TOP_EXTENSIONS: usize = 5;

pub fn render(frame: &mut Frame, screen: &Screen<'_>, config: &Config) {
    match screen {
        Screen::Browser(view) => draw_browser(frame, view, config),
        Screen::Menu {
            title,
            options,
            selected,
            backdrop,
        } => {
            draw_browser(frame, backdrop, config);
            widgets::draw_menu(frame, title, options, *selected, config);
        }
        Screen::Prompt {
            title,
            input,
            backdrop,
        } => {
            draw_browser(frame, backdrop, config);
            widgets::draw_prompt(frame, title, input, config);
        }
        _ => {
            let width = frame.area().width.saturating_sub(2) as usize;
            if let Some(doc) = document(screen, config, width) {
                draw_document(frame, doc, scroll_of(screen), config);
            }
        }
    }
}

/// Number of scrollable lines on a detail screen, 0 for the other screens.
pub fn body_len(screen: &Screen<'_>, config: &Config) -> usize {
    document(screen, config, 0).map_or(0, |doc| doc.body.len())
}

fn scroll_of(screen: &Screen<'_>) -> usize {
    match screen {
        Screen::File { scroll, .. }
        | Screen::Hex { scroll, .. }
        | Screen::Properties { scroll, .. }
        | Screen::Stats { scroll, .. } => *scroll,
        _ => 0,
    }
}

// Browser

fn draw_browser(frame: &mut Frame, view: &BrowserView<'_>, config: &Config) {
    let help = config.display().help_line();
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(u16::from(help)),
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], view, config);
    draw_listing(frame, chunks[1], view, config);
    draw_status_bar(frame, chunks[2], view, config);
    if help {
        frame.render_widget(
            Paragraph::new(Line::styled(HELP_LINE, config.theme().muted_style())),
            chunks[3],
        );
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &BrowserView<'_>, config: &Config) {
    let theme = config.theme();
    let nav = view.nav;
    let counter = format!(
        " {} items (page {}/{}) ",
        nav.len(),
        nav.current_page() + 1,
        nav.total_pages()
    );

    let block = themed_block(Line::styled(" superfile ", theme.accent_style()), config)
        .title_bottom(Line::styled(counter, theme.muted_style()).alignment(Alignment::Right));
    let path = Line::styled(
        format!("{} {}", DIR_ICON, nav.current_dir().display()),
        theme.path_style().add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Paragraph::new(path).block(block), area);
}

/// Which optional columns the table shows. The column the listing is sorted by is
/// left out since the order already carries it.
struct Columns {
    icons: bool,
    kind: bool,
    size: bool,
    modified: bool,
}

impl Columns {
    fn new(sort_key: SortKey, config: &Config) -> Self {
        let display = config.display();
        Columns {
            icons: display.icons(),
            kind: sort_key != SortKey::Type,
            size: display.show_size() && sort_key != SortKey::Size,
            modified: display.show_modified() && sort_key != SortKey::Date,
        }
    }

    fn widths(&self, marker_width: u16) -> Vec<Constraint> {
        let mut widths = vec![Constraint::Length(marker_width)];
        if self.icons {
            widths.push(Constraint::Length(2));
        }
        widths.push(Constraint::Fill(1));
        if self.kind {
            widths.push(Constraint::Length(9));
        }
        if self.size {
            widths.push(Constraint::Length(12));
        }
        if self.modified {
            widths.push(Constraint::Length(16));
        }
        widths
    }

    fn row<'a>(
        &self,
        marker: &'a str,
        icon: &'a str,
        name: String,
        kind: &'a str,
        size: String,
        modified: String,
    ) -> Vec<Cell<'a>> {
        let mut cells = vec![Cell::from(marker)];
        if self.icons {
            cells.push(Cell::from(icon));
        }
        cells.push(Cell::from(name));
        if self.kind {
            cells.push(Cell::from(kind));
        }
        if self.size {
            cells.push(Cell::from(Line::from(size).alignment(Alignment::Right)));
        }
        if self.modified {
            cells.push(Cell::from(modified));
        }
        cells
    }
}

fn draw_listing(frame: &mut Frame, area: Rect, view: &BrowserView<'_>, config: &Config) {
    let theme = config.theme();
    let nav = view.nav;
    let columns = Columns::new(view.listing.sort_key, config);
    let icon = theme.selection_icon();
    let marker_width = unicode_width::UnicodeWidthStr::width(icon).max(1) as u16;

    let header = Row::new(columns.row(
        "",
        "",
        "Name".to_string(),
        "Type",
        "Size".to_string(),
        "Modified".to_string(),
    ))
    .style(theme.accent_style().add_modifier(Modifier::BOLD));

    let mut rows: Vec<Row> = Vec::with_capacity(nav.page_size() + 1);
    let mut selected_row = None;
    for slot in nav.visible_rows() {
        let selected = slot == nav.selected();
        if selected {
            selected_row = Some(rows.len());
        }
        let marker = if selected { icon } else { "" };

        let row = if slot < 0 {
            Row::new(columns.row(
                marker,
                PARENT_ICON,
                "..".to_string(),
                "Parent",
                String::new(),
                String::new(),
            ))
            .style(theme.muted_style())
        } else {
            let Some(entry) = nav.entries().get(slot as usize) else {
                continue;
            };
            entry_row(&columns, marker, entry, config)
        };
        rows.push(if selected {
            row.style(theme.selection_style())
        } else {
            row
        });
    }

    if nav.is_empty() {
        rows.push(Row::new(columns.row(
            "",
            "",
            "(empty directory)".to_string(),
            "",
            String::new(),
            String::new(),
        ))
        .style(theme.muted_style()));
    }

    let table = Table::new(rows, columns.widths(marker_width))
        .header(header)
        .column_spacing(1)
        .block(themed_block("", config));

    // pages taller than the area scroll with the cursor
    let mut state = TableState::default();
    state.select(selected_row);
    frame.render_stateful_widget(table, area, &mut state);
}

fn entry_row<'a>(columns: &Columns, marker: &'a str, entry: &'a Entry, config: &Config) -> Row<'a> {
    let theme = config.theme();
    let (kind, style, modified) = match entry.attributes() {
        Some(attrs) => ("File", theme.entry_style(), format_short_time(attrs.modified())),
        None => ("Directory", theme.directory_style(), String::new()),
    };
    let size = format_listing_size(entry.attributes().map(|a| a.size()), entry.children());
    Row::new(columns.row(
        marker,
        entry.icon(),
        entry.name_str().into_owned(),
        kind,
        size,
        modified,
    ))
    .style(style)
}

fn draw_status_bar(frame: &mut Frame, area: Rect, view: &BrowserView<'_>, config: &Config) {
    let theme = config.theme();
    let nav = view.nav;
    let listing = view.listing;
    let sep = Span::styled(" • ", theme.muted_style());

    let mut spans = vec![
        Span::styled(
            format!(
                "Sort: {} {}",
                capitalize(listing.sort_key.as_str()),
                listing.direction_arrow()
            ),
            theme.accent_style(),
        ),
        sep.clone(),
        Span::styled(
            format!("Hidden: {}", if listing.show_hidden { "Yes" } else { "No" }),
            theme.accent_style(),
        ),
        sep.clone(),
        Span::styled(
            format!("Page {}/{}", nav.current_page() + 1, nav.total_pages()),
            theme.accent_style(),
        ),
    ];
    if view.favorite {
        spans.push(sep);
        spans.push(Span::styled("★ Favorite", theme.path_style()));
    }

    let block = themed_block("", config).style(theme.status_line_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if let Some(status) = view.status {
        let message = Line::styled(status.text().to_string(), status_style(status.is_error(), config));
        frame.render_widget(Paragraph::new(message).alignment(Alignment::Right), inner);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Detail screens

/// A detail screen: fixed header lines over a scrollable body.
struct Document {
    title: String,
    header: Vec<Line<'static>>,
    body: Vec<Line<'static>>,
}

fn document(screen: &Screen<'_>, config: &Config, width: usize) -> Option<Document> {
    match screen {
        Screen::File { view, .. } => Some(file_document(view, config, width)),
        Screen::Hex { path, dump, .. } => Some(hex_document(path, dump, config)),
        Screen::Properties { report, .. } => Some(properties_document(report, config)),
        Screen::Stats { root, stats, .. } => Some(stats_document(root, stats, config)),
        _ => None,
    }
}

fn draw_document(frame: &mut Frame, doc: Document, scroll: usize, config: &Config) {
    let theme = config.theme();
    let chunks = Layout::vertical([
        Constraint::Length(doc.header.len() as u16 + 2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let total = doc.body.len();
    let scroll = scroll.min(total.saturating_sub(1));

    let title = Line::styled(format!(" {} ", doc.title), theme.accent_style());
    frame.render_widget(
        Paragraph::new(doc.header).block(themed_block(title, config)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(doc.body)
            .block(themed_block("", config))
            .scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        chunks[1],
    );

    let hint = Line::from(vec![
        Span::styled(PAGER_HINT, theme.muted_style()),
        Span::styled(
            format!("   {}/{}", (scroll + 1).min(total.max(1)), total.max(1)),
            theme.accent_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(hint), chunks[2]);
}

fn label_value(label: &str, value: String, config: &Config) -> Line<'static> {
    let theme = config.theme();
    Line::from(vec![
        Span::styled(format!("{:<18}", label), theme.path_style()),
        Span::styled(value, theme.entry_style()),
    ])
}

fn title_lines(icon: &str, path: &Path, config: &Config) -> Vec<Line<'static>> {
    let theme = config.theme();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let parent = path.parent().map(shorten_home_path).unwrap_or_default();
    vec![
        Line::styled(
            format!("{} {}", icon, name),
            theme.accent_style().add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("  {}", parent), theme.muted_style()),
    ]
}

fn file_document(view: &FileView, config: &Config, width: usize) -> Document {
    let theme = config.theme();
    let attrs = view.attributes();

    let mut header = title_lines(attrs.icon(), view.path(), config);
    header.push(Line::from(vec![
        Span::styled("Size: ", theme.path_style()),
        Span::styled(format_size(attrs.size()), theme.entry_style()),
        Span::styled("   Type: ", theme.path_style()),
        Span::styled(attrs.mime().to_string(), theme.entry_style()),
    ]));
    header.push(Line::from(vec![
        Span::styled("Modified: ", theme.path_style()),
        Span::styled(format_file_time(Some(attrs.modified())), theme.entry_style()),
        Span::styled("   MD5: ", theme.path_style()),
        Span::styled(format!("{}...", view.short_md5()), theme.entry_style()),
    ]));

    let body = match view.body() {
        FileBody::Text { lines, truncated } => {
            let gutter = lines.len().to_string().len();
            let text_width = width.saturating_sub(gutter + 3);
            let mut out: Vec<Line<'static>> = lines
                .iter()
                .enumerate()
                .map(|(idx, line)| {
                    Line::from(vec![
                        Span::styled(format!("{:>gutter$} │ ", idx + 1), theme.muted_style()),
                        Span::styled(
                            sanitize_to_exact_width(line, text_width),
                            theme.entry_style(),
                        ),
                    ])
                })
                .collect();
            if *truncated {
                out.push(Line::styled(
                    format!("… preview limited to the first {} lines", lines.len()),
                    theme.muted_style(),
                ));
            }
            out
        }
        FileBody::Hex(dump) => {
            let mut out = vec![Line::styled(
                format!("Not a text file ({}), showing a hex dump.", attrs.mime()),
                theme.muted_style(),
            )];
            out.extend(hex_lines(dump, config));
            out
        }
        FileBody::Image => vec![Line::styled(
            "Images cannot be displayed in the terminal.",
            theme.muted_style(),
        )],
        FileBody::Empty => vec![Line::styled("(empty file)", theme.muted_style())],
        FileBody::Unreadable(reason) => vec![Line::styled(
            format!("Unable to read file: {}", reason),
            theme.error_style(),
        )],
    };

    Document {
        title: "File".to_string(),
        header,
        body,
    }
}

fn hex_lines(dump: &HexDump, config: &Config) -> Vec<Line<'static>> {
    let theme = config.theme();
    let mut lines: Vec<Line<'static>> = dump
        .rows
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(row.offset_label(), theme.path_style()),
                Span::raw("  "),
                Span::styled(row.hex.clone(), theme.entry_style()),
                Span::raw("  "),
                Span::styled(row.ascii.clone(), theme.directory_style()),
            ])
        })
        .collect();
    if dump.truncated {
        let shown: usize = dump.rows.iter().map(|r| r.ascii.chars().count()).sum();
        lines.push(Line::styled(
            format!(
                "Showing the first {} of {}.",
                format_size(shown as u64),
                format_size(dump.total_size)
            ),
            theme.muted_style(),
        ));
    }
    lines
}

fn hex_document(path: &Path, dump: &HexDump, config: &Config) -> Document {
    let mut header = title_lines("🔢", path, config);
    header.push(label_value("Size:", format_size(dump.total_size), config));
    Document {
        title: "Hex view".to_string(),
        header,
        body: hex_lines(dump, config),
    }
}

fn properties_document(report: &FileReport, config: &Config) -> Document {
    let attrs = report.attributes();
    let header = title_lines(attrs.icon(), report.path(), config);

    let permissions = match report.mode() {
        Some(mode) => format!("{} ({})", report.permissions(), mode),
        None => report.permissions().to_string(),
    };
    let mut body = vec![
        label_value("Size:", format_size(attrs.size()), config),
        label_value("MIME type:", attrs.mime().to_string(), config),
        label_value("Created:", format_file_time(report.created()), config),
        label_value("Modified:", format_file_time(Some(attrs.modified())), config),
        label_value("Accessed:", format_file_time(report.accessed()), config),
        label_value("Permissions:", permissions, config),
        label_value(
            "Executable:",
            if report.executable() { "Yes" } else { "No" }.to_string(),
            config,
        ),
    ];
    if report.digests().is_empty() {
        body.push(Line::styled(
            "Hashes skipped: file larger than 100 MiB",
            config.theme().muted_style(),
        ));
    }
    for (algo, digest) in report.digests() {
        body.push(label_value(&format!("{}:", algo.label()), digest.clone(), config));
    }

    Document {
        title: "Properties".to_string(),
        header,
        body,
    }
}

fn stats_document(root: &Path, stats: &DirStats, config: &Config) -> Document {
    let theme = config.theme();
    let header = title_lines("📊", root, config);

    let average = if stats.total_files > 0 {
        format_size(stats.average_file_size())
    } else {
        "N/A".to_string()
    };
    let mut body = vec![
        label_value("Files:", stats.total_files.to_string(), config),
        label_value("Directories:", stats.total_dirs.to_string(), config),
        label_value("Total size:", format_size(stats.total_size), config),
        label_value("Average size:", average, config),
        Line::raw(""),
        Line::styled("Top extensions", theme.accent_style().add_modifier(Modifier::BOLD)),
    ];

    for (ext, ext_stats) in stats.top_extensions(TOP_EXTENSIONS) {
        let name = if ext.is_empty() { "(no extension)" } else { ext };
        body.push(Line::from(vec![
            Span::styled(format!("  {:<16}", name), theme.path_style()),
            Span::styled(
                format!("{} files, {}", ext_stats.count, format_size(ext_stats.size)),
                theme.entry_style(),
            ),
        ]));
    }

    body.push(Line::raw(""));
    body.push(Line::styled(
        "Largest files",
        theme.accent_style().add_modifier(Modifier::BOLD),
    ));
    for (path, size) in &stats.largest {
        let rel = path.strip_prefix(root).unwrap_or(path);
        let name = rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = rel.parent().map(|p| p.display().to_string()).unwrap_or_default();
        body.push(Line::from(vec![
            Span::styled(format!("  {:>10}  ", format_size(*size)), theme.path_style()),
            Span::styled(name, theme.entry_style()),
            Span::styled(
                if dir.is_empty() {
                    String::new()
                } else {
                    format!("  {}", dir)
                },
                theme.muted_style(),
            ),
        ]));
    }

    if stats.truncated {
        body.push(Line::raw(""));
        body.push(Line::styled(
            "Analysis stopped early at the file limit.",
            theme.error_style(),
        ));
    }

    Document {
        title: "Directory statistics".to_string(),
        header,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::nav::NavState;
    use crate::core::fm::{FsLister, Lister, ListingConfig};
    use crate::ui::StatusMessage;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::tempdir;

    fn screen_text(screen: &Screen<'_>, config: &Config) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(120, 32))?;
        terminal.draw(|f| render(f, screen, config))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer.content().iter().map(|c| c.symbol()).collect())
    }

    #[test]
    fn browser_shows_entries_status_and_help() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("src"))?;
        fs::write(dir.path().join("notes.txt"), "hello")?;

        let listing = ListingConfig::default();
        let entries = FsLister.list(dir.path(), &listing)?;
        let nav = NavState::new(dir.path().to_path_buf(), entries, 20);
        let status = StatusMessage::info("Added to favorites");
        let config = Config::default();

        let text = screen_text(
            &Screen::Browser(BrowserView {
                nav: &nav,
                listing: &listing,
                favorite: true,
                status: Some(&status),
            }),
            &config,
        )?;

        assert!(text.contains("notes.txt"));
        assert!(text.contains("src"));
        assert!(text.contains("Sort: Name ↓"));
        assert!(text.contains("Hidden: No"));
        assert!(text.contains("Page 1/1"));
        assert!(text.contains("Added to favorites"));
        assert!(text.contains("[Enter]: Open"));
        Ok(())
    }

    #[test]
    fn menu_draws_over_browser() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let listing = ListingConfig::default();
        let nav = NavState::empty(dir.path().to_path_buf(), 20);
        let options = vec!["Statistics".to_string(), "Back".to_string()];
        let config = Config::default();
        let backdrop = BrowserView {
            nav: &nav,
            listing: &listing,
            favorite: false,
            status: None,
        };

        let text = screen_text(
            &Screen::Menu {
                title: "Options",
                options: &options,
                selected: 1,
                backdrop,
            },
            &config,
        )?;
        assert!(text.contains("Options"));
        assert!(text.contains("Statistics"));
        assert!(text.contains("(empty directory)"));
        Ok(())
    }

    #[test]
    fn file_view_numbers_lines() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("poem.txt");
        fs::write(&path, "first\nsecond\n")?;
        let view = FileView::load(&path, 100);
        let config = Config::default();
        let screen = Screen::File {
            view: &view,
            scroll: 0,
        };

        assert_eq!(body_len(&screen, &config), 2);
        let text = screen_text(&screen, &config)?;
        assert!(text.contains("poem.txt"));
        assert!(text.contains("1 │ first"));
        assert!(text.contains("2 │ second"));
        Ok(())
    }

    #[test]
    fn stats_lists_extensions() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.rs"), "fn main() {}")?;
        fs::write(dir.path().join("README"), "x")?;
        let stats = crate::core::stats::collect(dir.path(), &Default::default());
        let config = Config::default();

        let text = screen_text(
            &Screen::Stats {
                root: dir.path(),
                stats: &stats,
                scroll: 0,
            },
            &config,
        )?;
        assert!(text.contains(".rs"));
        assert!(text.contains("(no extension)"));
        assert!(text.contains("Files:"));
        Ok(())
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize(""), "");
    }
}
