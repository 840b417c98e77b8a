use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::config::Colors;
use crate::engine::Turtle;
use crate::geometry::Coord;

const TICK_RATE: Duration = Duration::from_millis(33);

/// Width of one grid cell in terminal columns.
const CELL_COLS: u16 = 2;

pub struct App {
    turtle: Turtle,
    filename: String,
    colors: Colors,

    // timing
    delay: Duration,
    next_update: Instant,
    paused: bool,

    // last step outcome
    last_action: Option<String>,
    error: Option<String>,

    show_help: bool,
}

impl App {
    pub fn new(turtle: Turtle, filename: String, delay: Duration, colors: Colors) -> Self {
        let now = Instant::now();
        Self {
            turtle,
            filename,
            colors,
            delay,
            next_update: now + delay,
            paused: false,
            last_action: None,
            error: None,
            show_help: false,
        }
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stepping stops once the program is used up or a step fails.
    fn halted(&self) -> bool {
        self.error.is_some() || self.turtle.is_finished()
    }

    fn step_once(&mut self) {
        if self.halted() {
            return;
        }
        match self.turtle.step() {
            Ok(record) => self.last_action = Some(format!("{}: {}", record.instruction, record.effect)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Advance the turtle if the delay has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.paused || now < self.next_update {
            return;
        }
        self.next_update = now + self.delay;
        self.step_once();
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.next_update
            .checked_duration_since(now)
            .unwrap_or(Duration::ZERO)
            .min(TICK_RATE)
    }

    /// Apply a key press. Returns `true` when the viewer should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                self.next_update = Instant::now() + self.delay;
            }
            KeyCode::Char('n') if self.paused => self.step_once(),
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = !self.show_help,
            _ => {}
        }
        false
    }
}

/// Run the viewer until the user quits.
pub fn run(app: App) -> io::Result<()> {
    // terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    break;
                }
            }
        }

        app.tick(Instant::now());
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)].as_ref())
        .split(size);

    draw_grid(f, root[0], app);
    draw_status(f, root[1], app);

    if app.show_help {
        draw_help_overlay(f, size);
    }
}

/// Center a `width` x `height` box inside `area`, clipped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let turtle = &app.turtle;
    let dims = turtle.dimensions();
    let block = Block::default()
        .title(Line::raw(grid_title(app)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.colors.border));

    let rect = centered(area, grid_box_width(dims), grid_box_height(dims));

    // Only build what fits inside the border.
    let visible_rows = rect.height.saturating_sub(2) as usize;
    let visible_cols = (rect.width.saturating_sub(2) / CELL_COLS) as usize;
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(visible_rows);
    for (y, row) in turtle.grid().rows().take(visible_rows).enumerate() {
        let spans: Vec<Span<'static>> = row
            .iter()
            .take(visible_cols)
            .enumerate()
            .map(|(x, &marked)| cell_span(app, Coord::new(x as i32, y as i32), marked))
            .collect();
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn grid_title(app: &App) -> String {
    let dims = app.turtle.dimensions();
    format!("{} ({}x{}, start {})", app.filename, dims.x, dims.y, app.turtle.origin())
}

/// Bordered box size in terminal cells, clamped to what a `Rect` can hold.
fn grid_box_width(dims: Coord) -> u16 {
    u16::try_from(dims.x).unwrap_or(u16::MAX).saturating_mul(CELL_COLS).saturating_add(2)
}

fn grid_box_height(dims: Coord) -> u16 {
    u16::try_from(dims.y).unwrap_or(u16::MAX).saturating_add(2)
}

fn cell_span(app: &App, at: Coord, marked: bool) -> Span<'static> {
    let colors = &app.colors;
    let bg = if marked { colors.cell_marked } else { colors.cell_clear };
    if at == app.turtle.position() {
        let text = format!("{} ", app.turtle.heading().arrow());
        Span::styled(
            text,
            Style::default()
                .fg(colors.turtle)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("  ", Style::default().bg(bg))
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let turtle = &app.turtle;
    let run_state = if app.error.is_some() {
        "Failed"
    } else if turtle.is_finished() {
        "Finished"
    } else if app.paused {
        "Paused"
    } else {
        "Running"
    };
    let next = turtle.peek().map(|i| i.mnemonic()).unwrap_or("-");
    let status = format!(
        " {} | Step: {} | Pos: {} | Heading: {} | Next: {} | ? for Help ",
        run_state,
        turtle.steps_taken(),
        turtle.position(),
        turtle.heading(),
        next,
    );

    let detail = match (&app.error, &app.last_action) {
        (Some(err), _) => Span::styled(format!(" {err}"), Style::default().fg(app.colors.status_error)),
        (None, Some(action)) => Span::styled(format!(" {action}"), Style::default().fg(app.colors.status_text)),
        (None, None) => Span::raw(""),
    };

    let lines = vec![
        Line::from(Span::styled(status, Style::default().fg(app.colors.status_text))),
        Line::from(detail),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let rect = centered(area, 44, 9);
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL);

    let text = vec![
        Line::raw("Space: Pause / resume"),
        Line::raw("n: Single step while paused"),
        Line::raw("?/F1: Toggle this help"),
        Line::raw("q/Esc/Ctrl+C: Quit"),
    ];
    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        rect,
    );
}
