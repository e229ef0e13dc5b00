use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;

use aifm_core::{
    FileEntry, FileKind, LogLevel, NamingPurpose, RuntimeAction, SpeechError, UserAction,
    ViewEffect, ViewOverlay, ViewState, CONTEXT_MENU_ITEMS,
};
use aifm_exec::{ListeningSession, Session, SpeechEvent, SpeechRecognizer};

const CRUMB_SEPARATOR: &str = " > ";

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste,
            crossterm::cursor::Show
        );
    }
}

pub fn run(
    mut session: Session,
    recognizer: Box<dyn SpeechRecognizer>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut session, recognizer.as_ref()).map_err(|e| e.into())
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    muted: Color,
    border: Color,
    warning: Color,
    danger: Color,
    panel_bg: Color,
    selected_bg: Color,
}

const PALETTE: UiPalette = UiPalette {
    accent: Color::Cyan,
    muted: Color::DarkGray,
    border: Color::Gray,
    warning: Color::Yellow,
    danger: Color::Red,
    panel_bg: Color::Black,
    selected_bg: Color::Rgb(40, 60, 90),
};

fn kind_style(kind: FileKind) -> Style {
    let color = match kind {
        FileKind::Folder => Color::Blue,
        FileKind::Drive => Color::Cyan,
        FileKind::Pdf => Color::Red,
        FileKind::Text => Color::White,
        FileKind::Image => Color::Magenta,
        FileKind::Video => Color::Yellow,
        FileKind::Audio => Color::Green,
        FileKind::File => Color::Gray,
    };
    let style = Style::default().fg(color);
    if kind.is_container() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn kind_icon(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Folder => "[dir]",
        FileKind::Drive => "[drv]",
        FileKind::Pdf => "[pdf]",
        FileKind::Text => "[txt]",
        FileKind::Image => "[img]",
        FileKind::Video => "[vid]",
        FileKind::Audio => "[aud]",
        FileKind::File => "[---]",
    }
}

/// Screen regions shared by rendering and mouse hit-testing.
struct Areas {
    header: Rect,
    listing: Rect,
    prompt: Rect,
    footer: Rect,
}

fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumbs
            Constraint::Min(3),    // Listing
            Constraint::Length(3), // Prompt
            Constraint::Length(1), // Status
        ])
        .split(area);
    Areas {
        header: chunks[0],
        listing: chunks[1],
        prompt: chunks[2],
        footer: chunks[3],
    }
}

/// Root first, then one segment per ancestor of the working directory.
fn crumbs(state: &ViewState) -> Vec<(String, String)> {
    let root_label = match state.mode {
        aifm_core::StoreMode::Virtual => "Home",
        aifm_core::StoreMode::Remote => "This PC",
    };
    let mut crumbs = vec![(root_label.to_string(), String::new())];
    crumbs.extend(state.path_style.breadcrumbs(&state.cwd));
    crumbs
}

fn crumb_at(state: &ViewState, header: Rect, column: u16, row: u16) -> Option<String> {
    if row != header.y + 1 {
        return None;
    }
    let mut x = header.x + 1;
    for (idx, (label, path)) in crumbs(state).into_iter().enumerate() {
        if idx > 0 {
            x += CRUMB_SEPARATOR.chars().count() as u16;
        }
        let width = label.chars().count() as u16;
        if column >= x && column < x + width {
            return Some(path);
        }
        x += width;
    }
    None
}

/// Listing row under the pointer, accounting for the border and scrolling.
fn entry_index_at(
    listing: Rect,
    offset: usize,
    entries: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    if column <= listing.x
        || column >= listing.x + listing.width.saturating_sub(1)
        || row <= listing.y
        || row >= listing.y + listing.height.saturating_sub(1)
    {
        return None;
    }
    let idx = offset + usize::from(row - listing.y - 1);
    (idx < entries).then_some(idx)
}

/// Scroll offset that keeps the selection visible, the same way `List`
/// computes it when rendering from a fresh `ListState`.
fn list_offset(selected: usize, visible_rows: u16) -> usize {
    let rows = usize::from(visible_rows.max(1));
    selected.saturating_sub(rows - 1)
}

enum KeyHandlerResult {
    Continue(Vec<ViewEffect>),
    Exit,
}

fn handle_overlay_keys(key: event::KeyEvent, session: &mut Session) -> KeyHandlerResult {
    let overlay = &session.state().interaction.overlay;
    let in_menu = matches!(overlay, ViewOverlay::ContextMenu { .. });
    let naming = matches!(overlay, ViewOverlay::Naming(_));
    let effects = if in_menu {
        match key.code {
            KeyCode::Esc => session.user(UserAction::CloseOverlay),
            KeyCode::Up | KeyCode::Char('k') => session.user(UserAction::ContextMenuMoveUp),
            KeyCode::Down | KeyCode::Char('j') => session.user(UserAction::ContextMenuMoveDown),
            KeyCode::Enter => session.user(UserAction::ContextMenuSubmit),
            _ => Vec::new(),
        }
    } else if naming {
        match key.code {
            KeyCode::Esc => session.user(UserAction::CloseOverlay),
            KeyCode::Enter => session.user(UserAction::NamingSubmit),
            KeyCode::Backspace => session.user(UserAction::NamingBackspace),
            KeyCode::Char(c) => session.user(UserAction::NamingInput(c)),
            _ => Vec::new(),
        }
    } else {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                session.user(UserAction::CloseOverlay)
            }
            _ => Vec::new(),
        }
    };
    KeyHandlerResult::Continue(effects)
}

fn handle_prompt_keys(key: event::KeyEvent, session: &mut Session) -> KeyHandlerResult {
    let effects = match key.code {
        KeyCode::Esc | KeyCode::Tab => session.user(UserAction::FocusPrompt(false)),
        KeyCode::Enter => {
            if session.state().interaction.prompt.trim().is_empty() {
                session.user(UserAction::OpenSelected)
            } else {
                session.user(UserAction::PromptSubmit)
            }
        }
        KeyCode::Backspace => {
            if session.state().interaction.prompt.is_empty() {
                session.user(UserAction::NavigateUp)
            } else {
                session.user(UserAction::PromptBackspace)
            }
        }
        KeyCode::Up => session.user(UserAction::SelectionUp),
        KeyCode::Down => session.user(UserAction::SelectionDown),
        KeyCode::F(5) => session.user(UserAction::Refresh),
        KeyCode::Char(c) => session.user(UserAction::PromptInput(c)),
        _ => Vec::new(),
    };
    KeyHandlerResult::Continue(effects)
}

fn handle_browse_keys(
    key: event::KeyEvent,
    session: &mut Session,
    listing: Rect,
) -> KeyHandlerResult {
    let effects = match key.code {
        KeyCode::Char('q') => return KeyHandlerResult::Exit,
        KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('/') => {
            session.user(UserAction::FocusPrompt(true))
        }
        KeyCode::Up | KeyCode::Char('k') => session.user(UserAction::SelectionUp),
        KeyCode::Down | KeyCode::Char('j') => session.user(UserAction::SelectionDown),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            session.user(UserAction::OpenSelected)
        }
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            session.user(UserAction::NavigateUp)
        }
        KeyCode::Char('m') | KeyCode::Menu => {
            let state = session.state();
            let offset = list_offset(state.interaction.selected, listing.height.saturating_sub(2));
            let row = listing.y + 1 + (state.interaction.selected - offset) as u16;
            session.user(UserAction::OpenContextMenu {
                x: listing.x + 4,
                y: row,
            })
        }
        KeyCode::Char('n') => session.user(UserAction::StartCreateFolder),
        KeyCode::Char('p') => session.user(UserAction::Paste),
        KeyCode::Char('v') => session.user(UserAction::ToggleListening),
        KeyCode::Char('b') => session.user(UserAction::ShowRecycleBin),
        KeyCode::Char('r') | KeyCode::F(5) => session.user(UserAction::Refresh),
        _ => Vec::new(),
    };
    KeyHandlerResult::Continue(effects)
}

fn handle_key_event<B: Backend>(
    key: event::KeyEvent,
    session: &mut Session,
    terminal: &mut Terminal<B>,
) -> io::Result<KeyHandlerResult> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(KeyHandlerResult::Exit);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('v') {
        return Ok(KeyHandlerResult::Continue(
            session.user(UserAction::ToggleListening),
        ));
    }

    if session.state().interaction.overlay != ViewOverlay::None {
        return Ok(handle_overlay_keys(key, session));
    }
    if session.state().interaction.prompt_focused {
        return Ok(handle_prompt_keys(key, session));
    }
    let size = terminal.size()?;
    let areas = layout(Rect::new(0, 0, size.width, size.height));
    Ok(handle_browse_keys(key, session, areas.listing))
}

fn handle_mouse_event<B: Backend>(
    mouse: event::MouseEvent,
    session: &mut Session,
    terminal: &mut Terminal<B>,
) -> io::Result<Vec<ViewEffect>> {
    let size = terminal.size()?;
    let areas = layout(Rect::new(0, 0, size.width, size.height));
    let state = session.state();
    let offset = list_offset(
        state.interaction.selected,
        areas.listing.height.saturating_sub(2),
    );
    let hit = entry_index_at(
        areas.listing,
        offset,
        state.listing.len(),
        mouse.column,
        mouse.row,
    );

    if state.interaction.overlay != ViewOverlay::None {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if !matches!(state.interaction.overlay, ViewOverlay::Naming(_)) {
                return Ok(session.user(UserAction::CloseOverlay));
            }
        }
        return Ok(Vec::new());
    }

    let effects = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(path) = crumb_at(state, areas.header, mouse.column, mouse.row) {
                session.user(UserAction::NavigateTo { path })
            } else if let Some(idx) = hit {
                if idx == state.interaction.selected {
                    session.user(UserAction::OpenSelected)
                } else {
                    let mut effects = session.user(UserAction::FocusPrompt(false));
                    effects.extend(session.user(UserAction::Select(idx)));
                    effects
                }
            } else if mouse.row >= areas.prompt.y
                && mouse.row < areas.prompt.y + areas.prompt.height
            {
                session.user(UserAction::FocusPrompt(true))
            } else {
                Vec::new()
            }
        }
        MouseEventKind::Down(MouseButton::Right) => match hit {
            Some(idx) => {
                let name = state.listing[idx].name.clone();
                session.user(UserAction::ContextMenuFor {
                    name,
                    x: mouse.column,
                    y: mouse.row,
                })
            }
            None => Vec::new(),
        },
        MouseEventKind::Moved => {
            let name = hit.map(|idx| state.listing[idx].name.clone());
            session.user(UserAction::Hover(name))
        }
        MouseEventKind::ScrollUp => session.user(UserAction::SelectionUp),
        MouseEventKind::ScrollDown => session.user(UserAction::SelectionDown),
        _ => Vec::new(),
    };
    Ok(effects)
}

fn speech_failed(err: SpeechError) -> RuntimeAction {
    RuntimeAction::SpeechFailed {
        unsupported: matches!(err, SpeechError::Unsupported(_)),
        message: err.to_string(),
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    recognizer: &dyn SpeechRecognizer,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<SpeechEvent>();
    let mut listening: Option<ListeningSession> = None;
    let mut pending: Vec<ViewEffect> = Vec::new();

    loop {
        while let Ok(event) = rx.try_recv() {
            listening = None;
            let action = match event {
                SpeechEvent::Transcript(text) => RuntimeAction::SpeechTranscript(text),
                SpeechEvent::Failed(err) => speech_failed(err),
            };
            pending.extend(session.runtime(action));
        }

        for effect in std::mem::take(&mut pending) {
            match effect {
                ViewEffect::CopyToClipboard(text) => {
                    let copied = arboard::Clipboard::new()
                        .and_then(|mut clipboard| clipboard.set_text(text));
                    match copied {
                        Ok(()) => tracing::debug!("path copied to system clipboard"),
                        Err(err) => tracing::warn!(error = %err, "system clipboard unavailable"),
                    }
                }
                ViewEffect::StartListening => match recognizer.start(tx.clone()) {
                    Ok(capture) => listening = Some(capture),
                    Err(err) => pending.extend(session.runtime(speech_failed(err))),
                },
                ViewEffect::StopListening => {
                    if let Some(capture) = listening.take() {
                        capture.stop();
                    }
                }
                _ => {}
            }
        }

        terminal.draw(|f| ui(f, session.state()))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => match handle_key_event(key, session, terminal)? {
                    KeyHandlerResult::Continue(effects) => pending.extend(effects),
                    KeyHandlerResult::Exit => {
                        if let Some(capture) = listening.take() {
                            capture.stop();
                        }
                        return Ok(());
                    }
                },
                Event::Mouse(mouse) => {
                    pending.extend(handle_mouse_event(mouse, session, terminal)?)
                }
                Event::Paste(text) => {
                    if session.state().interaction.prompt_focused {
                        pending.extend(session.user(UserAction::PromptPaste(text)));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut ratatui::Frame, state: &ViewState) {
    let palette = PALETTE;
    let areas = layout(f.area());

    // Breadcrumbs
    let mut crumb_spans = Vec::new();
    for (idx, (label, _)) in crumbs(state).into_iter().enumerate() {
        if idx > 0 {
            crumb_spans.push(Span::styled(CRUMB_SEPARATOR, Style::default().fg(palette.muted)));
        }
        crumb_spans.push(Span::styled(label, Style::default().fg(palette.accent)));
    }
    let clipboard = match &state.clipboard {
        Some(item) => format!(" | {}: {}", item.operation.label(), item.entry.name),
        None => String::new(),
    };
    let header = Paragraph::new(Line::from(crumb_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!("aifm | {}{clipboard}", state.mode.label())),
    );
    f.render_widget(header, areas.header);

    // Listing
    let name_width = usize::from(areas.listing.width.saturating_sub(24)).max(8);
    let items: Vec<ListItem> = state
        .listing
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", kind_icon(entry.kind)), kind_style(entry.kind)),
                Span::styled(
                    format!("{:<name_width$}", entry.name),
                    kind_style(entry.kind),
                ),
                Span::styled(
                    format!(" {:>14}", entry.size),
                    Style::default().fg(palette.muted),
                ),
            ]))
        })
        .collect();
    let title = if state.listing.is_empty() {
        format!("{} (empty)", state.cwd_label())
    } else {
        format!("{} ({} items)", state.cwd_label(), state.listing.len())
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if state.interaction.prompt_focused {
                    palette.border
                } else {
                    palette.accent
                }))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(palette.selected_bg)
                .add_modifier(Modifier::BOLD),
        );
    let mut list_state = ListState::default();
    if !state.listing.is_empty() {
        list_state.select(Some(state.interaction.selected));
    }
    f.render_stateful_widget(list, areas.listing, &mut list_state);

    // Prompt
    let mut prompt_title = String::from("Command");
    if state.interaction.listening {
        prompt_title.push_str(" [listening]");
    }
    let cursor = if state.interaction.prompt_focused { "_" } else { "" };
    let prompt = Paragraph::new(format!("> {}{cursor}", state.interaction.prompt)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if state.interaction.prompt_focused {
                palette.accent
            } else {
                palette.border
            }))
            .title(prompt_title),
    );
    f.render_widget(prompt, areas.prompt);

    // Status: hover details, then the newest log entry, then key hints.
    let footer = if let Some(entry) = state
        .interaction
        .hovered
        .as_deref()
        .and_then(|name| state.entry_named(name))
    {
        Line::from(Span::styled(
            format!(
                "{} | {} | {} | {}",
                entry.name,
                entry.kind.label(),
                entry.size,
                state.entry_path(entry)
            ),
            Style::default().fg(palette.accent),
        ))
    } else if let Some(log) = state.logs.last() {
        let color = match log.level {
            LogLevel::Error => palette.danger,
            LogLevel::Warn => palette.warning,
            _ => palette.muted,
        };
        Line::from(Span::styled(
            format!("[{}] {}: {}", log.level.label(), log.source.label(), log.message),
            Style::default().fg(color),
        ))
    } else {
        Line::from(Span::styled(
            "Tab focus | Enter open | Bksp up | m menu | n folder | p paste | v voice | b bin | q quit",
            Style::default().fg(palette.muted),
        ))
    };
    f.render_widget(Paragraph::new(footer), areas.footer);

    render_overlay(f, state, palette);
}

fn render_overlay(f: &mut ratatui::Frame, state: &ViewState, palette: UiPalette) {
    match &state.interaction.overlay {
        ViewOverlay::None => {}
        ViewOverlay::ContextMenu {
            x,
            y,
            entry,
            selected,
        } => {
            let screen = f.area();
            let width = 18.min(screen.width);
            let height = (CONTEXT_MENU_ITEMS.len() as u16 + 2).min(screen.height);
            let area = Rect::new(
                (*x).min(screen.width.saturating_sub(width)),
                (*y).min(screen.height.saturating_sub(height)),
                width,
                height,
            );
            let items: Vec<ListItem> = CONTEXT_MENU_ITEMS
                .iter()
                .map(|item| ListItem::new(item.label))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(entry.name.as_str())
                        .style(Style::default().bg(palette.panel_bg))
                        .border_style(Style::default().fg(palette.border)),
                )
                .highlight_style(Style::default().bg(palette.selected_bg).fg(palette.accent));
            let mut menu_state = ListState::default();
            menu_state.select(Some(*selected));
            f.render_widget(Clear, area);
            f.render_stateful_widget(list, area, &mut menu_state);
        }
        ViewOverlay::Naming(draft) => {
            let title = match (draft.purpose, draft.original.as_deref()) {
                (NamingPurpose::Rename, Some(original)) => format!("Rename {original}"),
                (NamingPurpose::Rename, None) => "Rename".to_string(),
                (NamingPurpose::CreateFolder, _) => "New folder".to_string(),
            };
            let area = centered_rect(50, 20, f.area());
            f.render_widget(Clear, area);
            let text = Paragraph::new(vec![
                Line::from(format!("{}_", draft.text)),
                Line::from(""),
                Line::from(Span::styled(
                    "[Enter] Confirm  [Esc] Cancel",
                    Style::default().fg(palette.muted),
                )),
            ])
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .style(Style::default().bg(palette.panel_bg).fg(Color::White))
                    .border_style(Style::default().fg(palette.accent)),
            );
            f.render_widget(text, area);
        }
        ViewOverlay::Preview { entry } => {
            let area = centered_rect(60, 40, f.area());
            f.render_widget(Clear, area);
            f.render_widget(preview(state, entry, palette), area);
        }
        ViewOverlay::RecycleBin { entries } => {
            let area = centered_rect(70, 60, f.area());
            f.render_widget(Clear, area);
            let items: Vec<ListItem> = if entries.is_empty() {
                vec![ListItem::new("Recycle bin is empty")]
            } else {
                entries
                    .iter()
                    .map(|entry| {
                        ListItem::new(Line::from(vec![
                            Span::styled(
                                format!("{} ", kind_icon(entry.kind)),
                                kind_style(entry.kind),
                            ),
                            Span::raw(entry.name.clone()),
                            Span::styled(
                                format!("  {}", entry.parent_path),
                                Style::default().fg(palette.muted),
                            ),
                        ]))
                    })
                    .collect()
            };
            let list = List::new(items).block(
                Block::default()
                    .title("Recycle Bin")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(palette.panel_bg))
                    .border_style(Style::default().fg(palette.border)),
            );
            f.render_widget(list, area);
        }
        ViewOverlay::Alert { message } => {
            let area = centered_rect(60, 20, f.area());
            f.render_widget(Clear, area);
            let text = Paragraph::new(vec![
                Line::from(message.to_string()),
                Line::from(""),
                Line::from(Span::styled("[Enter] OK", Style::default().fg(palette.muted))),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Notice")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(palette.panel_bg).fg(Color::White))
                    .border_style(Style::default().fg(palette.warning)),
            );
            f.render_widget(text, area);
        }
    }
}

fn preview<'a>(state: &ViewState, entry: &'a FileEntry, palette: UiPalette) -> Paragraph<'a> {
    let mut lines = vec![
        Line::from(Span::styled(
            entry.name.as_str(),
            kind_style(entry.kind).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Type: {}", entry.kind.label())),
        Line::from(format!("Size: {}", entry.size)),
        Line::from(format!("Path: {}", state.entry_path(entry))),
        Line::from(""),
    ];
    if !entry.kind.is_previewable() {
        lines.push(Line::from(Span::styled(
            "No preview available for this file type",
            Style::default().fg(palette.muted),
        )));
    }
    Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Preview")
            .borders(Borders::ALL)
            .style(Style::default().bg(palette.panel_bg).fg(Color::White))
            .border_style(Style::default().fg(palette.border)),
    )
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
