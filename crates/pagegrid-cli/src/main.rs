use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use pagegrid_config::{Config, GridSection, PreviewSection};
use pagegrid_engine::{
    BlockId, BlockKind, BlockPatch, Cmd, DropPayload, EditError, Editor, GridConfig, PixelPoint,
    PreviewMode, ResizeHandle, Snapshot, format_preview,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{env, io::stdout, path::PathBuf, process};

/// Rows drawn below the lowest block so there is always room to drop
const SPARE_ROWS: u32 = 4;

/// What the shifted direction keys drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragTarget {
    Move,
    Handle(ResizeHandle),
}

impl DragTarget {
    fn next(self) -> Self {
        let handles = ResizeHandle::ALL;
        match self {
            DragTarget::Move => DragTarget::Handle(handles[0]),
            DragTarget::Handle(handle) => {
                match handles.iter().position(|h| *h == handle) {
                    Some(i) if i + 1 < handles.len() => DragTarget::Handle(handles[i + 1]),
                    _ => DragTarget::Move,
                }
            }
        }
    }

    fn label(self) -> String {
        match self {
            DragTarget::Move => "move".to_string(),
            DragTarget::Handle(handle) => format!("resize {handle}"),
        }
    }
}

struct App {
    editor: Editor,
    cursor_row: u32,
    cursor_column: u32,
    drag: DragTarget,
    preview_mode: PreviewMode,
    new_block_gap: Option<u32>,
    /// Explicit config file, `None` for the default location
    config_path: Option<PathBuf>,
    status: String,
}

impl App {
    fn new(config: &Config, config_path: Option<PathBuf>) -> Self {
        let grid = GridConfig::new(config.grid.columns, config.grid.cell_width_px);
        Self {
            editor: Editor::new(grid),
            cursor_row: 0,
            cursor_column: 0,
            drag: DragTarget::Move,
            preview_mode: PreviewMode::Desktop,
            new_block_gap: config.preview.gap,
            config_path,
            status: String::new(),
        }
    }

    fn move_cursor(&mut self, rows: i64, columns: i64) {
        let max_column = i64::from(self.editor.grid().columns()) - 1;
        self.cursor_column = (i64::from(self.cursor_column) + columns).clamp(0, max_column) as u32;
        self.cursor_row = (i64::from(self.cursor_row) + rows).max(0) as u32;
    }

    /// Drop a palette item on the cursor cell, the way a drag from the palette would
    fn drop_new(&mut self, kind: BlockKind) {
        let payload = DropPayload::new_block(kind).to_json();
        match self.editor.apply(Cmd::Drop {
            payload,
            row: self.cursor_row,
            column: self.cursor_column,
        }) {
            Ok(patch) => {
                self.status = format!("added {kind} block");
                if let (Some(&id), Some(gap)) = (patch.changed.first(), self.new_block_gap) {
                    let result = self.editor.apply(Cmd::UpdateBlock {
                        id,
                        patch: BlockPatch {
                            preview_gap: Some(Some(gap)),
                            ..Default::default()
                        },
                    });
                    self.report(result);
                }
            }
            Err(err) => self.status = format!("drop rejected: {err}"),
        }
    }

    /// Drag the selected block (or one of its handles) by one cell as a full
    /// pointer-down / move / pointer-up sequence
    fn drag_selected(&mut self, rows: f64, columns: f64) {
        let Some(block) = self.editor.selected_block() else {
            self.status = "nothing selected".to_string();
            return;
        };
        let id = block.id;
        let frame = block.pixel_frame(self.editor.grid());
        let start = PixelPoint::new(frame.left + frame.width / 2.0, frame.top + frame.height / 2.0);
        let grid = self.editor.grid();
        let end = PixelPoint::new(
            start.x + columns * f64::from(grid.cell_width_px()),
            start.y + rows * f64::from(grid.cell_height_px()),
        );

        let begin = match self.drag {
            DragTarget::Move => Cmd::BeginMove { id, pointer: start },
            DragTarget::Handle(handle) => Cmd::BeginResize {
                id,
                handle,
                pointer: start,
            },
        };
        if let Err(err) = self.editor.apply(begin) {
            self.status = format!("cannot start {}: {err}", self.drag.label());
            return;
        }
        let sample = self.editor.apply(Cmd::PointerMove { pointer: end });
        let end = self.editor.apply(Cmd::EndGesture);
        self.status = match sample {
            Ok(_) => format!("{} ok", self.drag.label()),
            Err(err) if err.is_geometry_rejection() => {
                format!("{} blocked: {err}", self.drag.label())
            }
            Err(err) => format!("{} failed: {err}", self.drag.label()),
        };
        self.report(end);
    }

    fn select_under_cursor(&mut self) {
        let id = self
            .editor
            .blocks()
            .iter()
            .find(|block| block.covers(self.cursor_row, self.cursor_column))
            .map(|block| block.id);
        let result = self.editor.apply(Cmd::Select { id });
        self.report(result);
    }

    fn cycle_selection(&mut self) {
        let blocks = self.editor.blocks();
        if blocks.is_empty() {
            return;
        }
        let next = match self.editor.selection() {
            Some(current) => blocks
                .iter()
                .position(|block| block.id == current)
                .map_or(0, |i| (i + 1) % blocks.len()),
            None => 0,
        };
        let id = blocks[next].id;
        let result = self.editor.apply(Cmd::Select { id: Some(id) });
        self.report(result);
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.editor.selection() {
            let result = self.editor.apply(Cmd::DeleteBlock { id });
            self.report(result);
        }
    }

    fn adjust_columns(&mut self, delta: i32) {
        let columns = self.editor.set_grid_columns(delta);
        self.move_cursor(0, 0);
        self.status = format!("{columns} columns");
    }

    fn adjust_cell_width(&mut self, delta: i32) {
        let width = self.editor.set_cell_width(delta);
        self.status = format!("cell width {width}px");
    }

    fn toggle_preview(&mut self) {
        let visible = !self.editor.panels().show_preview;
        self.editor.set_preview_visible(visible);
    }

    fn toggle_properties(&mut self) {
        let visible = !self.editor.panels().show_properties;
        self.editor.set_properties_visible(visible);
    }

    fn cycle_preview_mode(&mut self) {
        self.preview_mode = match self.preview_mode {
            PreviewMode::Desktop => PreviewMode::Mobile,
            PreviewMode::Mobile => PreviewMode::Desktop,
        };
    }

    /// Current grid settings as a config file
    fn current_config(&self) -> Config {
        let grid = self.editor.grid();
        Config {
            grid: GridSection {
                columns: grid.columns(),
                cell_width_px: grid.cell_width_px(),
            },
            preview: PreviewSection {
                gap: self.new_block_gap,
            },
        }
    }

    fn save_config(&mut self) {
        let config = self.current_config();
        let result = match &self.config_path {
            Some(path) => config.save_to_path(path),
            None => config.save(),
        };
        self.status = match result {
            Ok(()) => "config saved".to_string(),
            Err(err) => format!("config not saved: {err}"),
        };
    }

    fn clear_selection(&mut self) {
        let result = self.editor.apply(Cmd::Select { id: None });
        self.report(result);
    }

    fn report<T>(&mut self, result: Result<T, EditError>) {
        if let Err(err) = result {
            self.status = err.to_string();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // Config path from CLI args, otherwise the default location
    let args: Vec<String> = env::args().collect();
    let config_path = match args.len() {
        1 => None,
        2 => Some(PathBuf::from(&args[1])),
        _ => {
            eprintln!("Usage: {} [config-file]", args[0]);
            process::exit(1);
        }
    };

    let loaded = match &config_path {
        Some(path) => Config::load_or_default(path),
        None => Config::load().map(Option::unwrap_or_default),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} [config-file]", args[0]);
            process::exit(1);
        }
    };
    info!(
        "starting with {} columns of {}px",
        config.grid.columns, config.grid.cell_width_px
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, config_path);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up if shifted => app.drag_selected(-1.0, 0.0),
                KeyCode::Down if shifted => app.drag_selected(1.0, 0.0),
                KeyCode::Left if shifted => app.drag_selected(0.0, -1.0),
                KeyCode::Right if shifted => app.drag_selected(0.0, 1.0),
                KeyCode::Char('K') => app.drag_selected(-1.0, 0.0),
                KeyCode::Char('J') => app.drag_selected(1.0, 0.0),
                KeyCode::Char('H') => app.drag_selected(0.0, -1.0),
                KeyCode::Char('L') => app.drag_selected(0.0, 1.0),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1, 0),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1, 0),
                KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
                KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
                KeyCode::Char('t') => app.drop_new(BlockKind::Text),
                KeyCode::Char('i') => app.drop_new(BlockKind::Image),
                KeyCode::Enter | KeyCode::Char(' ') => app.select_under_cursor(),
                KeyCode::Tab => app.cycle_selection(),
                KeyCode::Esc => app.clear_selection(),
                KeyCode::Char('r') => app.drag = app.drag.next(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_columns(1),
                KeyCode::Char('-') => app.adjust_columns(-1),
                KeyCode::Char(']') => app.adjust_cell_width(10),
                KeyCode::Char('[') => app.adjust_cell_width(-10),
                KeyCode::Char('p') => app.toggle_preview(),
                KeyCode::Char('e') => app.toggle_properties(),
                KeyCode::Char('v') => app.cycle_preview_mode(),
                KeyCode::Char('s') => app.save_config(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.editor.snapshot();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let side_open = snapshot.panels.show_preview || snapshot.panels.show_properties;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if side_open {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(rows[0]);

    let canvas = Paragraph::new(canvas_lines(app, &snapshot)).block(
        Block::default().borders(Borders::ALL).title(format!(
            "Canvas {} cols x {}px ({}px wide)",
            snapshot.grid.columns(),
            snapshot.grid.cell_width_px(),
            snapshot.canvas_width_px()
        )),
    );
    f.render_widget(canvas, columns[0]);

    if side_open {
        render_side_panels(f, app, &snapshot, columns[1]);
    }

    let help_text = vec![
        Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("hjkl/arrows: Cursor | "),
            Span::raw("t/i: Add text/image | "),
            Span::raw("Enter: Select | Tab: Next | d: Delete"),
        ]),
        Line::from(vec![
            Span::raw(format!("HJKL/shift+arrows: Drag ({}) | ", app.drag.label())),
            Span::raw("r: Handle | +/-: Columns | [/]: Width | "),
            Span::raw("p: Preview | v: Viewport | e: Properties | s: Save config"),
        ]),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Yellow),
        )),
    ];
    f.render_widget(Paragraph::new(help_text), rows[1]);
}

fn canvas_lines(app: &App, snapshot: &Snapshot) -> Vec<Line<'static>> {
    let columns = snapshot.grid.columns();
    let row_count = (snapshot.row_extent() + SPARE_ROWS).max(app.cursor_row + 1);

    (0..row_count)
        .map(|row| {
            let cells: Vec<Span> = (0..columns)
                .map(|column| {
                    let block = snapshot.blocks.iter().find(|block| block.covers(row, column));
                    let on_cursor = row == app.cursor_row && column == app.cursor_column;
                    cell_span(block.map(|b| (b.kind, snapshot.is_selected(b.id))), on_cursor)
                })
                .collect();
            Line::from(cells)
        })
        .collect()
}

fn cell_span(block: Option<(BlockKind, bool)>, on_cursor: bool) -> Span<'static> {
    let (text, mut style) = match block {
        Some((BlockKind::Text, selected)) => (" T ", block_style(Color::Blue, selected)),
        Some((BlockKind::Image, selected)) => (" I ", block_style(Color::Magenta, selected)),
        None => (" . ", Style::default().fg(Color::DarkGray)),
    };
    if on_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn block_style(color: Color, selected: bool) -> Style {
    let style = Style::default().bg(color).fg(Color::White);
    if selected {
        style.bg(Color::Yellow).fg(Color::Black)
    } else {
        style
    }
}

fn render_side_panels(f: &mut Frame, app: &App, snapshot: &Snapshot, area: ratatui::layout::Rect) {
    let panels = snapshot.panels;
    let constraints = match (panels.show_properties, panels.show_preview) {
        (true, true) => [Constraint::Percentage(50), Constraint::Percentage(50)],
        (true, false) => [Constraint::Percentage(100), Constraint::Percentage(0)],
        (false, _) => [Constraint::Percentage(0), Constraint::Percentage(100)],
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    if panels.show_properties {
        let properties = Paragraph::new(properties_lines(snapshot))
            .block(Block::default().borders(Borders::ALL).title("Properties"))
            .wrap(Wrap { trim: true });
        f.render_widget(properties, chunks[0]);
    }

    if panels.show_preview {
        let preview = snapshot.preview(app.preview_mode);
        let lines: Vec<Line> = format_preview(&preview)
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();
        let preview = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Preview"))
            .wrap(Wrap { trim: true });
        f.render_widget(preview, chunks[1]);
    }
}

fn properties_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let Some(block) = snapshot.selected() else {
        return vec![Line::from("Select a block to edit its properties")];
    };
    let frame = block.pixel_frame(&snapshot.grid);
    let style = &block.style;
    let mut lines = vec![
        Line::from(format!("{} block", block.kind)),
        Line::from(short_id(block.id)),
        Line::from(format!("Position: {}", block.geometry)),
        Line::from(format!(
            "Frame: {}x{}px at ({}, {})",
            frame.width, frame.height, frame.left, frame.top
        )),
        Line::from(format!(
            "Text: {} {} {:?}",
            style.font_size, style.font_weight, style.text_align
        )),
        Line::from(format!(
            "Colors: {} on {} (opacity {})",
            style.color, style.background_color, style.opacity
        )),
        Line::from(format!(
            "Border: {:?} {} {}",
            style.border_style, style.border_width, style.border_color
        )),
        Line::from(format!(
            "Preview gap: {}",
            block.preview_gap.map_or("unset".to_string(), |gap| gap.to_string())
        )),
        Line::from(String::new()),
    ];
    lines.extend(block.content.lines().map(|line| Line::from(line.to_string())));
    lines
}

fn short_id(id: BlockId) -> String {
    let id = id.to_string();
    format!("id {}", &id[..8.min(id.len())])
}
