//! Shell state and the command registry/dispatcher.

use tracing::debug;
use tsh_sdk::{FileStore, NetworkInfo, ProcessControl};

use crate::error::{TshError, TshResult};
use crate::exec::ExecContext;
use crate::lexer;
use crate::session::Session;

type HandlerFn = fn(&mut Shell, &[String], &mut ExecContext) -> TshResult<i32>;

/// One registry entry: the command name, its minimum argument count and the
/// handler to run. Dispatch is table-driven so each command can be tested in
/// isolation through the same path the REPL uses.
pub struct Builtin {
    pub name: &'static str,
    pub min_args: usize,
    run: HandlerFn,
}

/// The full command vocabulary. `exit` is not listed: the dispatcher
/// intercepts it before history recording and surfaces it to the read-eval
/// loop as [`TshError::Exit`].
pub const BUILTINS: &[Builtin] = &[
    Builtin { name: "cat", min_args: 1, run: |sh, a, ctx| sh.cmd_cat(a, ctx) },
    Builtin { name: "cd", min_args: 0, run: |sh, a, ctx| sh.cmd_cd(a, ctx) },
    Builtin { name: "clear", min_args: 0, run: |sh, a, ctx| sh.cmd_clear(a, ctx) },
    Builtin { name: "cp", min_args: 2, run: |sh, a, ctx| sh.cmd_cp(a, ctx) },
    Builtin { name: "echo", min_args: 0, run: |sh, a, ctx| sh.cmd_echo(a, ctx) },
    Builtin { name: "grep", min_args: 1, run: |sh, a, ctx| sh.cmd_grep(a, ctx) },
    Builtin { name: "help", min_args: 0, run: |sh, a, ctx| sh.cmd_help(a, ctx) },
    Builtin { name: "history", min_args: 0, run: |sh, a, ctx| sh.cmd_history(a, ctx) },
    Builtin { name: "ifconfig", min_args: 0, run: |sh, a, ctx| sh.cmd_ifconfig(a, ctx) },
    Builtin { name: "kill", min_args: 1, run: |sh, a, ctx| sh.cmd_kill(a, ctx) },
    Builtin { name: "ls", min_args: 0, run: |sh, a, ctx| sh.cmd_ls(a, ctx) },
    Builtin { name: "mkdir", min_args: 1, run: |sh, a, ctx| sh.cmd_mkdir(a, ctx) },
    Builtin { name: "mkdirhier", min_args: 1, run: |sh, a, ctx| sh.cmd_mkdirhier(a, ctx) },
    Builtin { name: "mv", min_args: 2, run: |sh, a, ctx| sh.cmd_mv(a, ctx) },
    Builtin { name: "ps", min_args: 0, run: |sh, a, ctx| sh.cmd_ps(a, ctx) },
    Builtin { name: "pwd", min_args: 0, run: |sh, a, ctx| sh.cmd_pwd(a, ctx) },
    Builtin { name: "rm", min_args: 1, run: |sh, a, ctx| sh.cmd_rm(a, ctx) },
    Builtin { name: "rmdir", min_args: 1, run: |sh, a, ctx| sh.cmd_rmdir(a, ctx) },
    Builtin { name: "shutdown", min_args: 0, run: |sh, a, ctx| sh.cmd_shutdown(a, ctx) },
    Builtin { name: "touch", min_args: 1, run: |sh, a, ctx| sh.cmd_touch(a, ctx) },
    Builtin { name: "tree", min_args: 0, run: |sh, a, ctx| sh.cmd_tree(a, ctx) },
    Builtin { name: "wc", min_args: 0, run: |sh, a, ctx| sh.cmd_wc(a, ctx) },
];

#[must_use]
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// The interpreter: one session plus the collaborator capabilities every
/// handler composes.
pub struct Shell {
    pub session: Session,
    pub(crate) store: Box<dyn FileStore>,
    pub(crate) procs: Box<dyn ProcessControl>,
    pub(crate) net: Box<dyn NetworkInfo>,
}

impl Shell {
    /// Shell rooted at the process's working directory.
    #[must_use]
    pub fn new(
        store: Box<dyn FileStore>,
        procs: Box<dyn ProcessControl>,
        net: Box<dyn NetworkInfo>,
    ) -> Self {
        Self::with_session(Session::from_env(), store, procs, net)
    }

    #[must_use]
    pub fn with_session(
        session: Session,
        store: Box<dyn FileStore>,
        procs: Box<dyn ProcessControl>,
        net: Box<dyn NetworkInfo>,
    ) -> Self {
        Self {
            session,
            store,
            procs,
            net,
        }
    }

    /// Execute one input line.
    ///
    /// Blank input is a no-op. `exit` surfaces as [`TshError::Exit`] without
    /// touching history. Everything else is recorded, then dispatched;
    /// unknown names and short argument lists come back as errors whose
    /// display strings are the user-facing diagnostics. Handler failures
    /// never land here - handlers print their own diagnostics and return a
    /// non-zero exit code.
    pub fn execute(&mut self, line: &str, ctx: &mut ExecContext) -> TshResult<i32> {
        let Some(cmd) = lexer::tokenize(line) else {
            return Ok(0);
        };

        if cmd.name == "exit" {
            return Err(TshError::Exit(0));
        }

        self.session.record(line.trim());

        let Some(builtin) = lookup(&cmd.name) else {
            return Err(TshError::CommandNotFound(cmd.name));
        };
        if cmd.args.len() < builtin.min_args {
            return Err(TshError::MissingArgument(cmd.name));
        }

        debug!(command = %cmd.name, args = cmd.args.len(), "dispatching");
        (builtin.run)(self, &cmd.args, ctx)
    }
}
