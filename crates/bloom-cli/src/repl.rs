//! Interactive insert/check prompt
//!
//! The prompt drives any [`MembershipFilter`] and never touches filter
//! internals. Input and output are generic so sessions can be replayed from
//! memory in tests.

use std::io::{self, BufRead, Write};

use bloom_engine::MembershipFilter;
use tracing::debug;

/// Bit arrays larger than this are summarized instead of dumped
pub const MAX_RENDERED_BITS: usize = 4096;

/// What plain items are used for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Insert,
    Check,
}

/// Commands introduced by `!`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Insert,
    Check,
    Print,
    Verbose,
    Quit,
}

impl Command {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'i' => Some(Command::Insert),
            'c' => Some(Command::Check),
            'p' => Some(Command::Print),
            'v' => Some(Command::Verbose),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// One parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing but whitespace
    Empty,
    /// `!` with no letter after it
    MissingCommand,
    /// `!` followed by a letter that is not a command
    UnknownCommand(char),
    /// A command, optionally followed by an item
    Command {
        command: Command,
        item: Option<&'a str>,
    },
    /// A plain item for the current mode
    Item(&'a str),
}

/// Parse a raw input line
///
/// Leading whitespace is ignored. After a command the second token, if any,
/// is the item; otherwise the first token is the item.
pub fn parse_line(line: &str) -> Line<'_> {
    let line = line.trim_start();
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Line::Empty;
    };

    let Some(rest) = first.strip_prefix('!') else {
        return Line::Item(first);
    };

    match rest.chars().next() {
        None => Line::MissingCommand,
        Some(letter) => match Command::from_letter(letter) {
            Some(command) => Line::Command {
                command,
                item: tokens.next(),
            },
            None => Line::UnknownCommand(letter),
        },
    }
}

/// Whether the session continues after a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Prompt session over a filter
pub struct Repl<F: MembershipFilter> {
    filter: F,
    mode: Mode,
}

impl<F: MembershipFilter> Repl<F> {
    /// Start a session in insert mode
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            mode: Mode::Insert,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Print the banner, then process lines until `!q` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        self.banner(out)?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            // Invalid UTF-8 is replaced, the session goes on
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line, out)? == Flow::Quit {
                return Ok(());
            }
        }

        debug!("End of input, leaving prompt");
        Ok(())
    }

    fn banner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "setup bloom filter of size {}", self.filter.size_bits())?;
        writeln!(
            out,
            "'!q' to quit, '!i' to toggle insertion mode, '!c' to toggle check mode"
        )?;
        writeln!(out, "!p to print the current filter array, !v to toggle verbose mode")?;
        writeln!(out, "insertion mode activated")
    }

    /// Process one line of input
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        match parse_line(line) {
            Line::Empty => writeln!(out, "no useful input detected, try again")?,
            Line::MissingCommand => {
                writeln!(out, "letter after '!' expected - no action executed")?
            }
            Line::UnknownCommand(_) => {
                writeln!(out, "unknown symbol after '!' - no action executed")?
            }
            Line::Command { command, item } => {
                if self.execute(command, out)? == Flow::Quit {
                    return Ok(Flow::Quit);
                }
                if let Some(item) = item {
                    self.process_item(item, out)?;
                }
            }
            Line::Item(item) => self.process_item(item, out)?,
        }

        Ok(Flow::Continue)
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        match command {
            Command::Insert => {
                self.mode = Mode::Insert;
                writeln!(out, "insertion mode activated")?;
            }
            Command::Check => {
                self.mode = Mode::Check;
                writeln!(out, "check mode activated")?;
            }
            Command::Print => self.print_bits(out)?,
            Command::Verbose => {
                let trace = !self.filter.is_tracing();
                self.filter.set_trace(trace);
                writeln!(out, "verbose toggled to {trace}")?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_bits<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let size = self.filter.size_bits();
        if size <= MAX_RENDERED_BITS {
            writeln!(out, "{} size: {}", self.filter.render_bits(), size)
        } else {
            writeln!(
                out,
                "{} of {} bits set (array too large to print)",
                self.filter.bits_set(),
                size
            )
        }
    }

    fn process_item<W: Write>(&mut self, item: &str, out: &mut W) -> io::Result<()> {
        match self.mode {
            Mode::Insert => self.filter.insert(item.as_bytes()),
            Mode::Check => {
                if self.filter.check(item.as_bytes()) {
                    writeln!(out, "{item} is probably in the set")?;
                } else {
                    writeln!(out, "{item} is definitely not in the set")?;
                }
            }
        }
        Ok(())
    }
}
