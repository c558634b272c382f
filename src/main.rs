use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    cell::RefCell,
    error::Error,
    fs::File,
    io::{stdout, Stdout},
    rc::Rc,
    time::{Duration, Instant},
};

use jasmine::{
    Coordinate, Direction, EngineConfig, EngineError, EngineEvent, EventRecorder, TetrisEngine,
};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const EMPTY_CHAR: &str = " ·";
const MAX_POLL: Duration = Duration::from_millis(250);
const LOG_FILE: &str = "jasmine.log";

const LANDED_COLOR: Color = Color::Rgb(62, 199, 165);
const FALLING_COLOR: Color = Color::Yellow;

/// Tile text padded to exactly two terminal columns. CJK glyphs are
/// already double width.
fn cell_text(text: &str) -> String {
    if text.is_ascii() {
        format!("{:<2}", text.chars().next().unwrap_or(' '))
    } else {
        text.chars().take(1).collect()
    }
}

// ============================================================================
// HUD State
// ============================================================================

#[derive(Default)]
struct Hud {
    message: String,
}

impl Hud {
    fn absorb(&mut self, events: Vec<EngineEvent>, engine: &TetrisEngine) {
        let mut cleared = 0;
        for event in events {
            match event {
                EngineEvent::TileRemoved(_) => cleared += 1,
                EngineEvent::GameEnded if engine.remaining_time().is_zero() => {
                    self.message = "Time's up!".to_string()
                }
                EngineEvent::GameEnded => self.message = "Board full!".to_string(),
                _ => {}
            }
        }
        if cleared > 0 {
            self.message = format!("Cleared {cleared} tiles!");
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, engine: &TetrisEngine, hud: &Hud) {
    let area = frame.size();

    render_game(frame, engine, hud, area);
    if engine.is_game_over() {
        render_game_over(frame, engine, area);
    }
}

fn render_game(frame: &mut Frame, engine: &TetrisEngine, hud: &Hud, area: Rect) {
    let grid = engine.grid();
    let grid_display_width = (grid.columns() as u16 * CELL_WIDTH) + 2;
    let grid_display_height = grid.rows() as u16 + 2;
    let preview_width = 12;
    let info_width = 16;
    let total_width = grid_display_width + preview_width + info_width + 4;
    let total_height = grid_display_height + 4;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];

    // Layout: [Grid][Upcoming][Info]
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(preview_width),
        Constraint::Length(info_width),
    ])
    .split(game_row);

    render_grid(frame, engine, horizontal[0]);
    render_upcoming(frame, engine, horizontal[1]);
    render_info(frame, engine, horizontal[2]);

    let footer_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 2u16.min(area.height.saturating_sub(game_row.y + game_row.height)),
    };

    if footer_area.height > 0 {
        let footer = Paragraph::new(vec![
            Line::from(Span::styled(hud.message.as_str(), Style::default().fg(Color::Magenta))),
            Line::from(Span::styled(
                "AD/←→: Move | S/↓: Drop | W/Space: Slam | 1-3: Swap | R: Restart | Q: Quit",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(footer, footer_area);
    }
}

fn render_grid(frame: &mut Frame, engine: &TetrisEngine, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Jasmine ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = engine.grid();
    let falling = engine.falling_tile();

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..grid.rows() {
        let mut spans: Vec<Span> = Vec::new();
        for col in 0..grid.columns() {
            let at = Coordinate::new(row, col);
            let span = match (falling.filter(|tile| tile.at == at), grid.get(at)) {
                (Some(tile), _) => Span::styled(
                    cell_text(&tile.text),
                    Style::default().fg(Color::Black).bg(FALLING_COLOR),
                ),
                (None, Some(text)) => {
                    Span::styled(cell_text(text), Style::default().fg(LANDED_COLOR))
                }
                (None, None) => Span::styled(EMPTY_CHAR, Style::default().fg(Color::DarkGray)),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_upcoming(frame: &mut Frame, engine: &TetrisEngine, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, text) in engine.upcoming_tiles().iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled(format!(" {}: ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(cell_text(text), Style::default().fg(LANDED_COLOR)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, engine: &TetrisEngine, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", engine.score())),
        Line::from(""),
        Line::from(Span::styled("Time", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}s", engine.remaining_time().as_secs())),
        Line::from(""),
        Line::from(Span::styled("Phrases", Style::default().fg(Color::Green))),
    ];
    lines.extend(engine.config().phrases.iter().map(|phrase| Line::from(phrase.as_str())));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, engine: &TetrisEngine, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", engine.score())),
        Line::from(""),
        Line::from(Span::styled(
            "R to restart, ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(28, 9, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Input
// ============================================================================

fn handle_key(engine: &mut TetrisEngine, code: KeyCode) -> Result<(), EngineError> {
    match code {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            engine.restart();
            engine.start_game()?;
        }
        _ if engine.is_game_over() => {}
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            engine.move_falling_tile(Direction::Left)?;
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            engine.move_falling_tile(Direction::Right)?;
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            engine.soft_drop()?;
        }
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            engine.hard_drop()?;
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            engine.swap_current_tile_with_upcoming_tile(index)?;
        }
        _ => {}
    }
    Ok(())
}

/// Spawns the next tile once the previous one has landed.
fn ensure_falling_tile(engine: &mut TetrisEngine) {
    if engine.is_game_over() || engine.falling_tile().is_some() {
        return;
    }
    if let Err(err) = engine.drop_next_tile() {
        log::debug!("No tile spawned: {err}");
    }
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), Box<dyn Error>> {
    let config = EngineConfig::from_env()?;
    let fall_interval = config.fall_interval();

    let recorder = Rc::new(RefCell::new(EventRecorder::new()));
    let mut engine = TetrisEngine::new(config)?.with_observer(&recorder);
    let mut hud = Hud::default();

    engine.start_game()?;

    let mut last_fall = Instant::now();
    let mut last_clock = Instant::now();

    loop {
        ensure_falling_tile(&mut engine);
        hud.absorb(recorder.borrow_mut().take_events(), &engine);

        terminal.draw(|frame| render(frame, &engine, &hud))?;

        let timeout = fall_interval
            .checked_sub(last_fall.elapsed())
            .unwrap_or(Duration::ZERO)
            .min(MAX_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
                        break;
                    }
                    if let Err(err) = handle_key(&mut engine, key.code) {
                        log::debug!("Ignored key {:?}: {err}", key.code);
                    }
                }
            }
        }

        let now = Instant::now();
        engine.advance_time(now - last_clock);
        last_clock = now;

        if last_fall.elapsed() >= fall_interval {
            last_fall = Instant::now();
            if engine.falling_tile().is_some() {
                if let Err(err) = engine.soft_drop() {
                    log::debug!("Gravity step failed: {err}");
                }
            }
        }
    }

    Ok(())
}

/// Sends log output to a file when `RUST_LOG` is set. Stderr would draw
/// over the alternate screen.
fn init_logging() -> Result<(), Box<dyn Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("Logging to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    // Always try to restore the terminal.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    result
}
