use std::{
    io::{self, Write},
    time::Duration,
};

use crate::stats::StatusLine;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue, style, terminal,
};
use rand::rngs::StdRng;
use torlife::{Config, Coord, Grid, Pattern, SharedGrid, Ticker, Viewport};
use tracing::{debug, info, warn};

const ALIVE: &str = "██";
const DEAD: &str = " ·";
const HELP: &str =
    "space play/pause  n step  c clear  r random  g glider  p pentadecathlon  +/- delay  q quit";
/// How long to wait for input before redrawing
const FRAME: Duration = Duration::from_millis(50);
const DELAY_STEP: Duration = Duration::from_millis(50);

type StepTask = Box<dyn Fn() + Send + Sync>;

pub enum ConsoleCommand {
    Exit,
    Handled,
}

pub struct ConsoleRender {
    grid: SharedGrid,
    ticker: Ticker<StepTask>,
    viewport: Viewport,
    rng: StdRng,
    density: f64,
    /// rows and columns of the grid currently on screen
    shown: (usize, usize),
}
impl ConsoleRender {
    pub fn new(config: &Config, grid: Grid) -> io::Result<Self> {
        let grid = SharedGrid::new(grid);
        let task_grid = grid.clone();
        let parallel = config.parallel;
        let limit = config.generations;
        let task: StepTask = Box::new(move || {
            let mut grid = task_grid.lock();
            if limit.is_some_and(|limit| grid.tick_count() >= limit) {
                return;
            }
            if parallel {
                grid.step_parallel();
            } else {
                grid.step();
            }
        });

        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(Self {
            grid,
            ticker: Ticker::new(config.delay, task),
            // two terminal columns per cell, status line on top
            viewport: Viewport {
                cell_width: 2,
                cell_height: 1,
                offset_left: 0,
                offset_top: 1,
                scroll: Coord::zero(),
            },
            rng: config.rng(),
            density: config.density,
            shown: (0, 0),
        })
    }

    pub fn render(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last line holds the key help
        let (fit_rows, fit_cols) = self
            .viewport
            .visible_cells(u32::from(cols), u32::from(rows.saturating_sub(1)));

        let (status, lines) = {
            let grid = self.grid.lock();
            self.shown = (fit_rows.min(grid.rows()), fit_cols.min(grid.cols()));
            let status = StatusLine {
                ticks: grid.tick_count(),
                alive: grid.alive_count(),
                delay: self.ticker.delay(),
                running: self.ticker.is_running(),
            };
            let window = grid
                .window(self.viewport.scroll, self.shown.0, self.shown.1)
                .glyphs(ALIVE, DEAD);
            (status, window.lines().collect::<Vec<_>>())
        };

        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            style::Print(status)
        )?;
        let left = self.viewport.offset_left as u16;
        let top = self.viewport.offset_top as u16;
        for (i, line) in lines.iter().enumerate() {
            queue!(stdout, cursor::MoveTo(left, top + i as u16), style::Print(line))?;
        }

        // write footer
        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            style::Print(HELP)
        )?;
        stdout.flush()
    }

    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        // make sure an event is present for us to take
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            // CTRL+C
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => ConsoleCommand::Exit,
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                self.click(column, row);
                ConsoleCommand::Handled
            }
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    fn handle_key(&mut self, code: KeyCode) -> ConsoleCommand {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ConsoleCommand::Exit,
            KeyCode::Char(' ') => {
                let running = self.ticker.toggle();
                info!(running, "playback toggled");
            }
            KeyCode::Char('n') if !self.ticker.is_running() => self.grid.lock().step(),
            KeyCode::Char('c') => {
                self.ticker.stop();
                self.grid.lock().clear();
            }
            KeyCode::Char('r') => self.grid.lock().randomize(self.density, &mut self.rng),
            KeyCode::Char('g') => self.stamp_center(&Pattern::GLIDER),
            KeyCode::Char('p') => self.stamp_center(&Pattern::PENTADECATHLON),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.ticker.set_delay(self.ticker.delay() + DELAY_STEP);
            }
            KeyCode::Char('-') => {
                let delay = self.ticker.delay().saturating_sub(DELAY_STEP);
                self.ticker.set_delay(delay.max(DELAY_STEP));
            }
            // arrows to move grid
            KeyCode::Up => self.scroll(Coord::new(-1, 0)),
            KeyCode::Down => self.scroll(Coord::new(1, 0)),
            KeyCode::Left => self.scroll(Coord::new(0, -1)),
            KeyCode::Right => self.scroll(Coord::new(0, 1)),
            _ => {}
        }
        ConsoleCommand::Handled
    }

    fn stamp_center(&mut self, pattern: &Pattern) {
        let mut grid = self.grid.lock();
        let origin = grid.center();
        if let Err(err) = grid.stamp(pattern.offsets(), origin) {
            warn!(%err, pattern = pattern.name(), "pattern does not fit");
        }
    }

    fn scroll(&mut self, by: Coord) {
        let grid = self.grid.lock();
        self.viewport.scroll = grid.wrap(self.viewport.scroll + by);
    }

    fn click(&mut self, column: u16, row: u16) {
        let cell = self.viewport.cell_at(i32::from(column), i32::from(row));
        let offset = cell - self.viewport.scroll;
        let (rows, cols) = self.shown;
        let on_screen = offset.row >= 0
            && offset.col >= 0
            && (offset.row as usize) < rows
            && (offset.col as usize) < cols;
        if !on_screen {
            debug!(column, row, "click outside the grid");
            return;
        }

        let mut grid = self.grid.lock();
        let target = grid.wrap(cell);
        if let Err(err) = grid.toggle(target.row, target.col) {
            warn!(%err, "click rejected");
        }
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        self.ticker.stop();
        if let Err(err) = execute!(
            io::stdout(),
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        ) {
            tracing::error!(?err, "failed to restore the screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
    }
}

/// Runs the interactive terminal front end until the user quits
pub fn run(config: &Config, grid: Grid) -> Result<()> {
    let mut console = ConsoleRender::new(config, grid).context("failed to set up the terminal")?;
    info!("console started");
    loop {
        console.render().context("failed to draw the grid")?;
        if let Some(ConsoleCommand::Exit) = console.poll_events(FRAME)? {
            break;
        }
    }
    info!("console closed");
    Ok(())
}
