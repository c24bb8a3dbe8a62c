// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use prodcat_app::{
    AppCommand, AppEvent, AppMode, AppState, JoinedProduct, ProductId, Selection, Sex, SortColumn,
};
use prodcat_catalog::Catalog;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const EMPTY_RESULT_MESSAGE: &str = "No products matching selected criteria";

const APP_TITLE: &str = "Product Categories";
const SEARCH_PLACEHOLDER: &str = "Search";
const ALL_LABEL: &str = "All";
const HALF_PAGE_ROWS: isize = 10;

pub trait AppRuntime {
    fn load_catalog(&mut self) -> Result<Catalog>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub status_timeout: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            status_timeout: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Quit,
    App(AppCommand),
    SelectUserSlot(usize),
    MoveRow(isize),
    JumpFirstRow,
    JumpLastRow,
    MoveChip(isize),
    ActivateChip,
    ToggleHelp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    catalog: Catalog,
    visible: Vec<ProductId>,
    selected_row: usize,
    chip_cursor: usize,
    help_visible: bool,
    status_token: u64,
    status_timeout: Duration,
}

impl ViewData {
    fn new(catalog: Catalog, options: UiOptions) -> Self {
        let mut view_data = Self {
            catalog,
            visible: Vec::new(),
            selected_row: 0,
            chip_cursor: 0,
            help_visible: false,
            status_token: 0,
            status_timeout: options.status_timeout,
        };
        view_data.refresh_visible(&Selection::default());
        view_data
    }

    fn refresh_visible(&mut self, selection: &Selection) {
        self.visible = self
            .catalog
            .visible(selection)
            .iter()
            .map(|product| product.id())
            .collect();
        self.selected_row = self
            .selected_row
            .min(self.visible.len().saturating_sub(1));
    }

    fn visible_products(&self) -> Vec<&JoinedProduct> {
        self.visible
            .iter()
            .filter_map(|id| self.catalog.product(*id))
            .collect()
    }

    fn chip_slots(&self) -> usize {
        self.catalog.categories().len() + 1
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    let catalog = runtime.load_catalog().context("load catalog")?;
    let mut view_data = ViewData::new(catalog, options);
    view_data.refresh_visible(&state.selection);

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let (internal_tx, internal_rx) = mpsc::channel();
    tracing::info!(
        products = view_data.catalog.products().len(),
        "terminal ui started"
    );

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(false) => {}
            Ok(true) => match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            },
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    tracing::info!("terminal ui stopped");
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, after: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch_and_refresh(
        state,
        view_data,
        AppCommand::SetStatus(message.into()),
        internal_tx,
    );
}

fn dispatch_and_refresh(
    state: &mut AppState,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::SelectionChanged))
    {
        view_data.refresh_visible(&state.selection);
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(
            internal_tx,
            view_data.status_token,
            view_data.status_timeout,
        );
    }
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, view_data, internal_tx, key);
        return false;
    }

    let Some(command) = browse_command_for_key(key) else {
        return false;
    };
    apply_browse_command(state, view_data, internal_tx, command)
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => AppCommand::ExitSearch,
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::ClearQuery
        }
        (KeyCode::Backspace, _) => {
            let mut query = state.selection.query.clone();
            if query.pop().is_none() {
                return;
            }
            AppCommand::SetQuery(query)
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let mut query = state.selection.query.clone();
            query.push(ch);
            AppCommand::SetQuery(query)
        }
        _ => return,
    };
    dispatch_and_refresh(state, view_data, command, internal_tx);
}

fn browse_command_for_key(key: KeyEvent) -> Option<BrowseCommand> {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            BrowseCommand::App(AppCommand::ClearQuery)
        }
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            BrowseCommand::MoveRow(HALF_PAGE_ROWS)
        }
        (KeyCode::Char('q'), _) => BrowseCommand::Quit,
        (KeyCode::Char('/'), _) => BrowseCommand::App(AppCommand::EnterSearch),
        (KeyCode::Char('x'), _) => BrowseCommand::App(AppCommand::ClearQuery),
        (KeyCode::Char('0'), _) => BrowseCommand::App(AppCommand::SelectUser(None)),
        (KeyCode::Char(digit @ '1'..='9'), _) => {
            BrowseCommand::SelectUserSlot(digit as usize - '1' as usize)
        }
        (KeyCode::Tab, _) => BrowseCommand::MoveChip(1),
        (KeyCode::BackTab, _) => BrowseCommand::MoveChip(-1),
        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => BrowseCommand::ActivateChip,
        (KeyCode::Char('a'), _) => BrowseCommand::App(AppCommand::ClearCategories),
        (KeyCode::Char('s'), _) => BrowseCommand::App(AppCommand::CycleSort(SortColumn::Id)),
        (KeyCode::Char('p'), _) => BrowseCommand::App(AppCommand::CycleSort(SortColumn::Product)),
        (KeyCode::Char('c'), _) => {
            BrowseCommand::App(AppCommand::CycleSort(SortColumn::Category))
        }
        (KeyCode::Char('u'), _) => BrowseCommand::App(AppCommand::CycleSort(SortColumn::User)),
        (KeyCode::Char('R'), _) => BrowseCommand::App(AppCommand::ResetAll),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => BrowseCommand::MoveRow(1),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => BrowseCommand::MoveRow(-1),
        (KeyCode::PageDown, _) => BrowseCommand::MoveRow(HALF_PAGE_ROWS),
        (KeyCode::PageUp, _) => BrowseCommand::MoveRow(-HALF_PAGE_ROWS),
        (KeyCode::Char('g'), _) => BrowseCommand::JumpFirstRow,
        (KeyCode::Char('G'), _) => BrowseCommand::JumpLastRow,
        (KeyCode::Char('?'), _) => BrowseCommand::ToggleHelp,
        _ => return None,
    };
    Some(command)
}

fn apply_browse_command(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: BrowseCommand,
) -> bool {
    match command {
        BrowseCommand::Quit => return true,
        BrowseCommand::App(command) => {
            dispatch_and_refresh(state, view_data, command, internal_tx);
        }
        BrowseCommand::SelectUserSlot(slot) => {
            match view_data.catalog.users().get(slot).map(|user| user.id) {
                Some(user_id) => dispatch_and_refresh(
                    state,
                    view_data,
                    AppCommand::SelectUser(Some(user_id)),
                    internal_tx,
                ),
                None => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("no user in slot {}", slot + 1),
                ),
            }
        }
        BrowseCommand::MoveRow(delta) => move_row(view_data, delta),
        BrowseCommand::JumpFirstRow => view_data.selected_row = 0,
        BrowseCommand::JumpLastRow => {
            view_data.selected_row = view_data.visible.len().saturating_sub(1);
        }
        BrowseCommand::MoveChip(delta) => {
            let slots = view_data.chip_slots() as isize;
            view_data.chip_cursor =
                (view_data.chip_cursor as isize + delta).rem_euclid(slots) as usize;
        }
        BrowseCommand::ActivateChip => {
            let command = match view_data.chip_cursor {
                0 => AppCommand::ClearCategories,
                slot => match view_data.catalog.categories().get(slot - 1) {
                    Some(category) => AppCommand::ToggleCategory(category.id),
                    None => return false,
                },
            };
            dispatch_and_refresh(state, view_data, command, internal_tx);
        }
        BrowseCommand::ToggleHelp => view_data.help_visible = true,
    }
    false
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    if view_data.visible.is_empty() {
        view_data.selected_row = 0;
        return;
    }
    let last = view_data.visible.len() as isize - 1;
    view_data.selected_row = (view_data.selected_row as isize + delta).clamp(0, last) as usize;
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let tabs = Tabs::new(user_tab_titles(&view_data.catalog))
        .block(Block::default().title(APP_TITLE).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        )
        .select(selected_user_tab(&view_data.catalog, &state.selection));
    frame.render_widget(tabs, layout[0]);

    let search_style = if state.mode == AppMode::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let search = Paragraph::new(search_text(state)).block(
        Block::default()
            .title("search")
            .borders(Borders::ALL)
            .border_style(search_style),
    );
    frame.render_widget(search, layout[1]);

    let chips = Paragraph::new(category_chip_line(
        &view_data.catalog,
        &state.selection,
        view_data.chip_cursor,
    ))
    .block(Block::default().title("categories").borders(Borders::ALL));
    frame.render_widget(chips, layout[2]);

    render_products(frame, layout[3], state, view_data);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[4]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_products(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let products = view_data.visible_products();
    if products.is_empty() {
        let empty = Paragraph::new(EMPTY_RESULT_MESSAGE)
            .block(Block::default().title("products").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(SortColumn::ALL.iter().map(|column| {
        Cell::from(header_label(*column, &state.selection)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = products.iter().enumerate().map(|(index, product)| {
        let mut row_style = Style::default();
        if index == view_data.selected_row {
            row_style = row_style.bg(Color::DarkGray);
        }
        Row::new(vec![
            Cell::from(product.id().to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(product.name().to_owned()),
            Cell::from(product.category.label()),
            Cell::from(product.user.name.clone()).style(owner_style(product.user.sex)),
        ])
        .style(row_style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Min(12),
        Constraint::Min(16),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!(
                    "products {}/{}",
                    products.len(),
                    view_data.catalog.products().len()
                ))
                .borders(Borders::ALL),
        );
    let mut table_state = TableState::default().with_selected(Some(view_data.selected_row));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn user_tab_titles(catalog: &Catalog) -> Vec<Line<'static>> {
    std::iter::once(Line::from(ALL_LABEL))
        .chain(catalog.users().iter().enumerate().map(|(index, user)| {
            Line::from(Span::styled(
                format!("{} {}", index + 1, user.name),
                owner_style(user.sex),
            ))
        }))
        .collect()
}

fn selected_user_tab(catalog: &Catalog, selection: &Selection) -> usize {
    selection
        .user
        .and_then(|user_id| {
            catalog
                .users()
                .iter()
                .position(|user| user.id == user_id)
        })
        .map_or(0, |index| index + 1)
}

fn search_text(state: &AppState) -> String {
    let query = &state.selection.query;
    let cursor = if state.mode == AppMode::Search { "_" } else { "" };
    if query.is_empty() {
        if state.mode == AppMode::Search {
            return format!("/ {cursor}");
        }
        return format!("/ {SEARCH_PLACEHOLDER}");
    }
    format!("/ {query}{cursor}  [x clear]")
}

fn category_chip_line(catalog: &Catalog, selection: &Selection, cursor: usize) -> Line<'static> {
    let all_style = if selection.categories.is_empty() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let mut spans = vec![Span::styled(
        format!(" {ALL_LABEL} "),
        chip_cursor_style(all_style, cursor == 0),
    )];
    spans.push(Span::raw("   "));

    for (index, category) in catalog.categories().iter().enumerate() {
        let style = if selection.categories.contains(&category.id) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        spans.push(Span::styled(
            format!(" {} ", category.title),
            chip_cursor_style(style, cursor == index + 1),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn chip_cursor_style(style: Style, focused: bool) -> Style {
    if focused {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

fn header_label(column: SortColumn, selection: &Selection) -> String {
    format!(
        "{} {}",
        column.label(),
        selection.sort.indicator(column).glyph()
    )
}

fn owner_style(sex: Sex) -> Style {
    match sex {
        Sex::Female => Style::default().fg(Color::Red),
        Sex::Male => Style::default().fg(Color::Blue),
    }
}

fn status_text(state: &AppState) -> String {
    let mode = match state.mode {
        AppMode::Browse => "BROWSE",
        AppMode::Search => "SEARCH",
    };
    let default = match state.mode {
        AppMode::Browse => {
            "/ search | 0-9 user | tab/space category a all | s p c u sort | R reset | ? help | q quit"
        }
        AppMode::Search => "type to filter | backspace | ctrl+u clear | enter/esc done",
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
users: 0 all | 1-9 pick user\n\
search: / focus | type to filter | backspace | ctrl+u or x clear | enter/esc leave\n\
categories: tab/shift+tab move | space/enter toggle | a all\n\
sort: s id | p product | c category | u user (base, reversed, off)\n\
rows: j/k up/down | g/G first/last | pgup/pgdn | ctrl+d half page\n\
R reset all filters"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
