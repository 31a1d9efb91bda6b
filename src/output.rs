use std::io;
use std::io::Write;

/// Sink for the two print instructions, so the core never talks to
/// stdout directly and tests can capture what a program printed.
pub trait Output {
    /// PRN: the decimal value of a register, on its own line
    fn print_num(&mut self, value: u8) -> Result<(), io::Error>;

    /// PRA: the character whose code point is the register value
    fn print_char(&mut self, value: u8) -> Result<(), io::Error>;
}

/// simple implementation of Output, using STDOUT
pub struct StdOutput;

impl StdOutput {
    pub fn new() -> Self {
        StdOutput
    }
}

impl Output for StdOutput {
    fn print_num(&mut self, value: u8) -> Result<(), io::Error> {
        writeln!(io::stdout(), "{}", value)
    }

    fn print_char(&mut self, value: u8) -> Result<(), io::Error> {
        let mut out = io::stdout();
        // no newline: PRA programs spell out text a character at a time
        write!(out, "{}", value as char)?;
        out.flush()
    }
}

/// test double that records everything printed
pub struct Captured {
    buffer: String,
}

impl Captured {
    pub fn new() -> Self {
        Captured {
            buffer: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Output for Captured {
    fn print_num(&mut self, value: u8) -> Result<(), io::Error> {
        self.buffer.push_str(&value.to_string());
        self.buffer.push('\n');
        Ok(())
    }

    fn print_char(&mut self, value: u8) -> Result<(), io::Error> {
        self.buffer.push(value as char);
        Ok(())
    }
}
