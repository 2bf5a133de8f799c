//! Terminal interaction: progress lines, the login code prompt and the
//! masked cloud password prompt.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, Write};

/// Where the upload flow talks to the operator.
pub trait Console {
    /// Print one line of progress or guidance.
    fn say(&mut self, line: &str);

    /// Ask for the login code; input is echoed.
    fn ask_code(&mut self) -> io::Result<String>;

    /// Ask for the cloud password; input is masked.
    fn ask_password(&mut self, hint: Option<&str>) -> io::Result<String>;
}

/// A key press, reduced to what the masked prompt cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Interrupt,
}

/// Accumulates `keys` into a string, echoing one `*` per character to `out`.
///
/// Backspace drops the last character and erases one `*`; it does nothing
/// on an empty buffer. Enter ends the input.
pub fn read_masked<I, W>(keys: I, out: &mut W) -> io::Result<String>
where
    I: IntoIterator<Item = io::Result<Key>>,
    W: Write,
{
    let mut secret = String::new();
    for key in keys {
        match key? {
            Key::Char(c) => {
                secret.push(c);
                out.write_all(b"*")?;
            }
            Key::Backspace => {
                if secret.pop().is_some() {
                    out.write_all(b"\x08 \x08")?;
                }
            }
            Key::Enter => {
                out.write_all(b"\r\n")?;
                out.flush()?;
                return Ok(secret);
            }
            Key::Interrupt => {
                out.write_all(b"\r\n")?;
                out.flush()?;
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "password entry interrupted",
                ));
            }
        }
        out.flush()?;
    }
    Err(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "input ended before enter was pressed",
    ))
}

/// Keeps the terminal in raw mode for as long as it is alive.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {e}");
        }
    }
}

fn map_key_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        }
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn next_key() -> io::Result<Key> {
    loop {
        if let Event::Key(event) = event::read()?
            && let Some(key) = map_key_event(event)
        {
            return Ok(key);
        }
    }
}

/// Reads a masked secret straight from the terminal.
pub fn read_password() -> io::Result<String> {
    let _raw = RawModeGuard::acquire()?;
    let mut stdout = io::stdout();
    read_masked(std::iter::repeat_with(next_key), &mut stdout)
}

/// [`Console`] on the process's stdin/stdout.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask_code(&mut self) -> io::Result<String> {
        print!("Please enter the code you received: ");
        io::stdout().flush()?;
        let mut code = String::new();
        io::stdin().lock().read_line(&mut code)?;
        Ok(code.trim().to_string())
    }

    fn ask_password(&mut self, hint: Option<&str>) -> io::Result<String> {
        match hint {
            Some(hint) => print!("Enter your 2FA password (hint: {hint}): "),
            None => print!("Enter your 2FA password: "),
        }
        io::stdout().flush()?;
        read_password()
    }
}
