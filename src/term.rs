//! crossterm display and keyboard
//!
//! [`TerminalDisplay`] owns the terminal mode: raw mode, alternate screen and
//! hidden cursor are set up in `new` and restored on drop, so an early `?`
//! return still leaves the shell usable.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::frame::{Banner, Display, Frame, StyleTag};
use crate::input::{InputSource, Intent};

/// Rows above the field: status line, then the top border
const FIELD_TOP: u16 = 2;
/// Column of the left border
const FIELD_LEFT: u16 = 1;

pub struct TerminalDisplay {
    out: Stdout,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    /// Warn if the terminal cannot show the whole field
    pub fn check_size(&self, frame: &Frame) {
        let need_rows = frame.field.height + i32::from(FIELD_TOP) + 1;
        let need_cols = frame.field.width + i32::from(FIELD_LEFT) + 1;
        match terminal::size() {
            Ok((cols, rows)) if i32::from(cols) < need_cols || i32::from(rows) < need_rows => {
                log::warn!(
                    "terminal is {}x{}, field needs {}x{}; edges will be clipped",
                    cols,
                    rows,
                    need_cols,
                    need_rows
                );
            }
            Ok(_) => {}
            Err(e) => log::warn!("cannot read terminal size: {}", e),
        }
    }

    fn draw_border(&mut self, frame: &Frame) -> io::Result<()> {
        let width = to_u16(frame.field.width);
        let height = to_u16(frame.field.height);
        let (top, bottom) = (FIELD_TOP - 1, FIELD_TOP + height);
        let (left, right) = (FIELD_LEFT - 1, FIELD_LEFT + width);

        let horizontal: String = std::iter::once('+')
            .chain(std::iter::repeat_n('-', usize::from(width)))
            .chain(std::iter::once('+'))
            .collect();
        queue!(
            self.out,
            SetForegroundColor(Color::DarkGrey),
            MoveTo(left, top),
            Print(&horizontal),
            MoveTo(left, bottom),
            Print(&horizontal)
        )?;
        for row in FIELD_TOP..bottom {
            queue!(
                self.out,
                MoveTo(left, row),
                Print('|'),
                MoveTo(right, row),
                Print('|')
            )?;
        }
        queue!(self.out, ResetColor)
    }

    fn draw_banner(&mut self, frame: &Frame, banner: &Banner) -> io::Result<()> {
        let lines: Vec<&str> = std::iter::once(banner.title.as_str())
            .chain(banner.lines.iter().map(String::as_str))
            .collect();
        let mid_row = FIELD_TOP + to_u16(frame.field.height) / 2;
        let first_row = mid_row.saturating_sub(to_u16(lines.len() as i32) / 2);
        let mid_col = FIELD_LEFT + to_u16(frame.field.width) / 2;

        queue!(
            self.out,
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold)
        )?;
        for (i, line) in lines.iter().enumerate() {
            let col = mid_col.saturating_sub(to_u16(line.chars().count() as i32) / 2);
            queue!(self.out, MoveTo(col, first_row + i as u16), Print(line))?;
        }
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)
    }
}

impl Display for TerminalDisplay {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;

        queue!(
            self.out,
            MoveTo(0, 0),
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold),
            Print(&frame.status),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;

        self.draw_border(frame)?;

        for cell in &frame.cells {
            let (Ok(row), Ok(col)) = (u16::try_from(cell.pos.row), u16::try_from(cell.pos.col))
            else {
                continue;
            };
            let (color, bold) = style_color(cell.style);
            queue!(self.out, MoveTo(col + FIELD_LEFT, row + FIELD_TOP))?;
            if bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                self.out,
                SetForegroundColor(color),
                Print(cell.glyph),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }

        if let Some(banner) = &frame.banner {
            self.draw_banner(frame, banner)?;
        }

        self.out.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Foreground colour and bold flag per style
pub fn style_color(style: StyleTag) -> (Color, bool) {
    match style {
        StyleTag::SnakeHead => (Color::Yellow, true),
        StyleTag::SnakeBody => (Color::Green, true),
        StyleTag::Food => (Color::Red, false),
        StyleTag::Bonus => (Color::Blue, false),
        StyleTag::Wall | StyleTag::Pellet | StyleTag::Brick => (Color::White, false),
        StyleTag::Player | StyleTag::Paddle => (Color::Yellow, false),
        StyleTag::Pursuer => (Color::Red, false),
        StyleTag::Ball => (Color::Green, false),
    }
}

fn to_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// Keyboard input source.
///
/// Each poll lasts the full timeout even when a key arrives early, so
/// holding a key does not speed the game up.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Intent>> {
        let deadline = Instant::now() + timeout;
        let mut intent = None;

        while intent.is_none() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                intent = map_key(key);
            }
        }

        let rest = deadline.saturating_duration_since(Instant::now());
        if !rest.is_zero() {
            thread::sleep(rest);
        }
        Ok(intent)
    }
}

/// Key binding table
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }
    match key.code {
        KeyCode::Up => Some(Intent::MoveUp),
        KeyCode::Down => Some(Intent::MoveDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRight),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::AltUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::AltDown),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Intent::Restart)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Intent::Quit),
        _ => None,
    }
}
