//! Output sinks and the per-command execution context.

use std::io::Write;

/// Where a handler's output goes: the real terminal, or a capture buffer
/// (used by the test suites to assert on command output).
pub enum Output {
    Stdout,
    Buffer(Vec<u8>),
}

impl Output {
    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Self::Stdout => {
                std::io::stdout().write_all(data)?;
                std::io::stdout().flush()
            }
            Self::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, s: &str) -> std::io::Result<()> {
        self.write(s.as_bytes())?;
        self.write(b"\n")
    }

    /// Buffered contents as text; empty for the terminal variant.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buf) => String::from_utf8_lossy(buf).into_owned(),
        }
    }
}

pub struct ExecContext {
    pub stdout: Output,
    pub stderr: Output,
}

impl Default for ExecContext {
    fn default() -> Self {
        Self {
            stdout: Output::Stdout,
            stderr: Output::Stdout,
        }
    }
}

impl ExecContext {
    /// Context that captures both streams, for tests.
    #[must_use]
    pub fn captured() -> Self {
        Self {
            stdout: Output::Buffer(Vec::new()),
            stderr: Output::Buffer(Vec::new()),
        }
    }

    /// Write one diagnostic line. The `Stdout` variant of `stderr` means
    /// "the terminal", so the line goes to the real stderr stream there.
    pub fn write_err(&mut self, msg: &str) {
        match &mut self.stderr {
            Output::Stdout => {
                let line = format!("{msg}\n");
                let _ = std::io::stderr().write_all(line.as_bytes());
            }
            Output::Buffer(buf) => {
                buf.extend_from_slice(msg.as_bytes());
                buf.push(b'\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_captures_lines() {
        let mut out = Output::Buffer(Vec::new());
        out.writeln("first").unwrap();
        out.writeln("second").unwrap();
        assert_eq!(out.text(), "first\nsecond\n");
    }

    #[test]
    fn diagnostics_go_to_stderr_buffer() {
        let mut ctx = ExecContext::captured();
        ctx.write_err("Directory not found: /nope");
        assert_eq!(ctx.stdout.text(), "");
        assert_eq!(ctx.stderr.text(), "Directory not found: /nope\n");
    }
}
