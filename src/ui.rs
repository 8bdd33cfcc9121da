use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use daily_compare::markdown::{Preview, PreviewLine};
use daily_compare::open::{EditorOpener, NoteOpener};
use daily_compare::panel::{ComparisonPanel, PanelContent, SectionBody};
use daily_compare::request::ComparisonRequest;
use daily_compare::vault::FsVault;
use daily_compare::PreviewRenderer;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

// ============================================================================
// STYLES
// ============================================================================
// Defined once with the module; nothing is re-registered per panel open.

fn title_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn section_header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn selected_border_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
}

fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC)
}

fn key_style() -> Style {
    Style::default().fg(Color::Yellow)
}

// ============================================================================
// APP STATE
// ============================================================================

/// One panel instance per process run. Refresh replaces the rendered
/// content in place; it never stacks a second copy.
pub struct App {
    panel: ComparisonPanel<FsVault, PreviewRenderer>,
    opener: EditorOpener,
    request: ComparisonRequest,
    pub content: PanelContent,
    /// Index of the selected year section
    pub selected: usize,
    /// Preview scroll offset of the selected section
    pub scroll: u16,
    /// One-line feedback after an open/refresh action
    pub status: Option<String>,
}

impl App {
    pub fn new(vault: FsVault, request: ComparisonRequest) -> Self {
        let opener = EditorOpener::from_env(&vault);
        let panel = ComparisonPanel::new(vault, PreviewRenderer);
        let content = panel.render(&request);

        App {
            panel,
            opener,
            request,
            content,
            selected: 0,
            scroll: 0,
            status: None,
        }
    }

    /// Re-render the panel from scratch; same inputs give the same
    /// content as a fresh instance would show.
    pub fn refresh(&mut self) {
        self.content = self.panel.render(&self.request);
        if self.selected >= self.content.sections.len() {
            self.selected = self.content.sections.len().saturating_sub(1);
        }
        self.scroll = 0;
        self.status = Some("Refreshed".to_string());
    }

    pub fn next_section(&mut self) {
        let len = self.content.sections.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected >= len - 1 { 0 } else { self.selected + 1 };
        self.scroll = 0;
    }

    pub fn previous_section(&mut self) {
        let len = self.content.sections.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// The file handle the Open action is bound to: the one captured in
    /// the selected section at render time
    fn selected_file(&self) -> Option<daily_compare::NoteFile> {
        self.content
            .sections
            .get(self.selected)
            .and_then(|s| s.file())
            .cloned()
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_section(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_section(),
                KeyCode::Char('J') | KeyCode::PageDown => app.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => app.scroll_up(),
                KeyCode::Char('r') => app.refresh(),
                KeyCode::Enter | KeyCode::Char('o') => open_selected(terminal, app)?,
                _ => {}
            }
        }
    }
}

/// Open the selected section's captured note in the user's editor,
/// suspending the TUI while the editor owns the terminal.
fn open_selected<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let Some(file) = app.selected_file() else {
        app.status = Some("No note to open for this year".to_string());
        return Ok(());
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let result = app.opener.open(&file);

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    app.status = match result {
        Ok(()) => Some(format!("Opened {}", file.path)),
        Err(err) => Some(format!("Open failed: {err:#}")),
    };
    Ok(())
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Panel title
            Constraint::Min(0),    // Year sections
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_title(f, chunks[0], app);
    render_sections(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let title = Paragraph::new(Line::from(Span::styled(
        app.content.title.clone(),
        title_style(),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(border_style()));

    f.render_widget(title, area);
}

fn render_sections(f: &mut Frame, area: Rect, app: &App) {
    let count = app.content.sections.len();
    if count == 0 {
        return;
    }

    // One equal-height chunk per configured year, in request order
    let constraints: Vec<Constraint> =
        (0..count).map(|_| Constraint::Ratio(1, count as u32)).collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for i in 0..count {
        render_year_section(f, chunks[i], app, i, i == app.selected);
    }
}

fn render_year_section(f: &mut Frame, area: Rect, app: &App, index: usize, selected: bool) {
    let section = &app.content.sections[index];

    let header = match section.file() {
        Some(file) => format!(" {}  [{}] ", section.date_label, file.path),
        None => format!(" {} ", section.date_label),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if selected { selected_border_style() } else { border_style() })
        .title(Span::styled(header, section_header_style()));

    let body = match &section.body {
        SectionBody::Preview { preview, .. } => {
            let scroll = if selected { app.scroll } else { 0 };
            Paragraph::new(preview_lines(preview)).scroll((scroll, 0))
        }
        SectionBody::Missing => {
            Paragraph::new(Line::from(Span::styled(
                daily_compare::NO_NOTE_TEXT,
                placeholder_style(),
            )))
        }
        SectionBody::ReadError(message) => {
            Paragraph::new(Line::from(Span::styled(message.clone(), error_style())))
        }
    };

    f.render_widget(body.block(block), area);
}

/// Map the host-neutral preview lines onto styled ratatui lines
fn preview_lines(preview: &Preview) -> Vec<Line<'_>> {
    preview
        .lines
        .iter()
        .map(|line| match line {
            PreviewLine::Heading { level, text } => {
                let style = if *level <= 2 {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Line::from(Span::styled(text.clone(), style))
            }
            PreviewLine::ListItem { depth, text } => Line::from(vec![
                Span::raw(" ".repeat(*depth as usize * 2)),
                Span::styled("• ", Style::default().fg(Color::Yellow)),
                Span::raw(text.clone()),
            ]),
            PreviewLine::Quote(text) => Line::from(vec![
                Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                Span::styled(text.clone(), Style::default().add_modifier(Modifier::ITALIC)),
            ]),
            PreviewLine::Code(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::Green),
            )),
            PreviewLine::Rule => Line::from(Span::styled(
                "─".repeat(30),
                Style::default().fg(Color::DarkGray),
            )),
            PreviewLine::Text(text) => Line::from(Span::raw(text.clone())),
            PreviewLine::Blank => Line::from(""),
        })
        .collect()
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" Year: {}/{} ", app.selected + 1, app.content.sections.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("| "),
        Span::styled("↑/↓", key_style()),
        Span::raw(" Year | "),
        Span::styled("J/K", key_style()),
        Span::raw(" Scroll | "),
        Span::styled("Enter", key_style()),
        Span::raw(" Open | "),
        Span::styled("r", key_style()),
        Span::raw(" Refresh | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    if let Some(status) = &app.status {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    let status_bar = Paragraph::new(Line::from(spans)).block(
        Block::default().borders(Borders::ALL).border_style(border_style()),
    );

    f.render_widget(status_bar, area);
}
