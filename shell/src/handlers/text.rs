//! Text builtins: cat, grep, wc, echo.

use std::path::Path;

use crate::error::{TshError, TshResult};
use crate::exec::ExecContext;
use crate::lexer::strip_quotes;
use crate::options::OptionSet;
use crate::session::display_path;
use crate::shell::Shell;

const HIGHLIGHT_START: &str = "\x1b[31m";
const HIGHLIGHT_END: &str = "\x1b[0m";

impl Shell {
    pub(crate) fn cmd_cat(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let mut exit_code = 0;
        for name in args {
            let resolved = self.session.resolve(name);
            match self.store.read_lines(&resolved) {
                Ok(lines) => {
                    for line in lines {
                        ctx.stdout.writeln(&line).map_err(TshError::Io)?;
                    }
                }
                Err(e) if e.is_not_found() => {
                    ctx.write_err(&format!("File not found: {}", display_path(&resolved)));
                    exit_code = 1;
                }
                Err(e) => {
                    ctx.write_err(&format!("Failed to read file: {e}"));
                    exit_code = 1;
                }
            }
        }
        Ok(exit_code)
    }

    pub(crate) fn cmd_grep(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let opts = OptionSet::parse(args);
        let Some(raw_pattern) = opts.operands.first() else {
            ctx.write_err("Usage: grep [-c] <pattern> [<file>]");
            return Ok(1);
        };
        let pattern = strip_quotes(raw_pattern);
        let file_tok = opts.operands.get(1).map_or("", String::as_str);
        let resolved = self.session.resolve(file_tok);

        let Some(lines) = self.read_text_file(&resolved, file_tok, ctx) else {
            return Ok(1);
        };

        if opts.has('c') {
            let total: usize = lines
                .iter()
                .map(|line| count_occurrences(line, pattern))
                .sum();
            ctx.stdout
                .writeln(&total.to_string())
                .map_err(TshError::Io)?;
        } else {
            // Every line is echoed; matching lines get the pattern painted.
            for line in &lines {
                if line.contains(pattern) {
                    let highlighted = line.replace(
                        pattern,
                        &format!("{HIGHLIGHT_START}{pattern}{HIGHLIGHT_END}"),
                    );
                    ctx.stdout.writeln(&highlighted).map_err(TshError::Io)?;
                } else {
                    ctx.stdout.writeln(line).map_err(TshError::Io)?;
                }
            }
        }
        Ok(0)
    }

    pub(crate) fn cmd_wc(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let opts = OptionSet::parse(args);
        let Some(file_tok) = opts.operands.first() else {
            ctx.write_err("Usage: wc [-w|-l|-c] <file>");
            return Ok(1);
        };
        let resolved = self.session.resolve(file_tok);

        let Some(lines) = self.read_text_file(&resolved, file_tok, ctx) else {
            return Ok(1);
        };

        let line_count = lines.len();
        let word_count: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
        let byte_count: usize = lines.iter().map(String::len).sum();

        let report = if opts.has('w') {
            format!("{word_count} {file_tok}")
        } else if opts.has('l') {
            format!("{line_count} {file_tok}")
        } else if opts.has('c') {
            format!("{byte_count} {file_tok}")
        } else {
            format!("{line_count} {word_count} {byte_count} {file_tok}")
        };
        ctx.stdout.writeln(&report).map_err(TshError::Io)?;
        Ok(0)
    }

    pub(crate) fn cmd_echo(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let joined = args.join(" ");
        let substituted = joined.replace("$USER", self.session.user());

        // Multi-word output must have arrived quoted; the check runs after
        // substitution.
        if substituted.contains(' ') && !substituted.starts_with('"') {
            ctx.write_err("Use quotes for messages with multiple words.");
            return Ok(1);
        }
        ctx.stdout
            .writeln(strip_quotes(&substituted))
            .map_err(TshError::Io)?;
        Ok(0)
    }

    /// Shared file gate for grep/wc: the target must exist and be a regular
    /// file, otherwise a `File not found` diagnostic names the typed token.
    fn read_text_file(
        &self,
        resolved: &Path,
        shown: &str,
        ctx: &mut ExecContext,
    ) -> Option<Vec<String>> {
        match self.store.stat(resolved) {
            Ok(info) if info.is_regular() => match self.store.read_lines(resolved) {
                Ok(lines) => Some(lines),
                Err(e) => {
                    ctx.write_err(&format!("Error reading file: {e}"));
                    None
                }
            },
            _ => {
                ctx.write_err(&format!("File not found: {shown}"));
                None
            }
        }
    }
}

/// Occurrences by forward scan, advancing one position after each match, so
/// overlapping occurrences count once per start index ("aa" in "aaa" -> 2).
fn count_occurrences(text: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut start = 0;
    while let Some(idx) = text[start..].find(pattern) {
        count += 1;
        let match_start = start + idx;
        // Step one whole character so the next scan stays on a boundary.
        let step = text[match_start..].chars().next().map_or(1, char::len_utf8);
        start = match_start + step;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_occurrences_count_per_position() {
        assert_eq!(count_occurrences("aaa", "aa"), 2);
        assert_eq!(count_occurrences("aaaa", "aa"), 3);
        assert_eq!(count_occurrences("abcabc", "abc"), 2);
        assert_eq!(count_occurrences("xyz", "q"), 0);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn scan_respects_multibyte_boundaries() {
        assert_eq!(count_occurrences("ééé", "éé"), 2);
    }
}
