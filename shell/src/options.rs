//! Flag-cluster parser for commands that take `-x`-style options.
//!
//! A token contributes to the flag set iff it begins with `-`; its trailing
//! characters accumulate, so `-l -a` and `-la` are equivalent. Everything
//! else is a positional operand, order preserved. Flags are not validated
//! against the command: handlers read the flags they know and silently
//! ignore the rest (a deliberate policy for the `ls` family, kept as-is).

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    pub flags: HashSet<char>,
    pub operands: Vec<String>,
}

impl OptionSet {
    #[must_use]
    pub fn parse(args: &[String]) -> Self {
        let mut flags = HashSet::new();
        let mut operands = Vec::new();

        for arg in args {
            match arg.strip_prefix('-') {
                Some(cluster) if !cluster.is_empty() => flags.extend(cluster.chars()),
                // A bare "-" carries no flag characters; treat it as an operand.
                _ => operands.push(arg.clone()),
            }
        }

        Self { flags, operands }
    }

    #[must_use]
    pub fn has(&self, flag: char) -> bool {
        self.flags.contains(&flag)
    }
}
