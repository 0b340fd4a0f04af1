use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Line completion for the REPL: builtin names for the first word, local
/// filesystem paths everywhere else. The shared cwd snapshot is refreshed by
/// the loop before each prompt.
pub struct TshHelper {
    cwd: Arc<RwLock<PathBuf>>,
}

impl TshHelper {
    pub fn new(cwd: Arc<RwLock<PathBuf>>) -> Self {
        Self { cwd }
    }
}

const BUILTINS: &[&str] = &[
    "cat", "cd", "clear", "cp", "echo", "exit", "grep", "help", "history", "ifconfig", "kill",
    "ls", "mkdir", "mkdirhier", "mv", "ps", "pwd", "rm", "rmdir", "shutdown", "touch", "tree",
    "wc",
];

impl Completer for TshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];

        let (start, word) = find_word_start(line_to_cursor);

        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let is_first_word = !line_to_cursor[..start].contains(|c: char| !c.is_whitespace());

        let mut completions = Vec::new();

        if is_first_word {
            for &builtin in BUILTINS {
                if builtin.starts_with(word) {
                    completions.push(Pair {
                        display: builtin.to_string(),
                        replacement: builtin.to_string(),
                    });
                }
            }
        }

        if word.starts_with('/') || word.starts_with('.') || word.contains('/') || !is_first_word {
            let cwd = self.cwd.read().unwrap().clone();

            let (dir_path, partial_name) = if let Some(last_slash) = word.rfind('/') {
                let dir = &word[..=last_slash];
                let name = &word[last_slash + 1..];
                (resolve_dir(&cwd, dir.trim_end_matches('/')), name)
            } else {
                (cwd, word)
            };

            for name in complete_path(&dir_path, partial_name) {
                let replacement = if let Some(last_slash) = word.rfind('/') {
                    format!("{}{}", &word[..=last_slash], name)
                } else {
                    name.clone()
                };
                completions.push(Pair {
                    display: name,
                    replacement,
                });
            }
        }

        Ok((start, completions))
    }
}

fn complete_path(dir: &Path, partial: &str) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return vec![];
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(partial) {
                return None;
            }
            let is_dir = entry.file_type().is_ok_and(|ft| ft.is_dir());
            Some(if is_dir { format!("{name}/") } else { name })
        })
        .collect();
    names.sort();
    names
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

fn resolve_dir(cwd: &Path, dir: &str) -> PathBuf {
    if dir.is_empty() {
        // The word was "/name", so the directory part is the root.
        PathBuf::from("/")
    } else if dir.starts_with('/') {
        PathBuf::from(dir)
    } else {
        cwd.join(dir)
    }
}

impl Hinter for TshHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for TshHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for TshHelper {}

impl Helper for TshHelper {}
