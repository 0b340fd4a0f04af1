use crate::error::SysResult;
use crate::types::{ProcessInfo, ProcessTarget, ShutdownRequest};

/// OS-process capability consumed by the `ps`, `kill`, `clear` and
/// `shutdown` handlers.
///
/// Implementations spawn real processes and block until they exit; output
/// destined for the user is streamed to the terminal by the implementation
/// itself (the handlers add no formatting of their own beyond `ps`).
pub trait ProcessControl {
    /// Snapshot of the running processes, name and id.
    fn list_processes(&self) -> SysResult<Vec<ProcessInfo>>;

    /// Terminate a process by pid or by name.
    fn terminate(&self, target: &ProcessTarget) -> SysResult<()>;

    /// Run an arbitrary OS command, streaming its stdout/stderr to the
    /// terminal, blocking until it exits.
    fn run_command(&self, program: &str, args: &[&str]) -> SysResult<()>;

    /// Clear the terminal screen.
    fn clear_screen(&self) -> SysResult<()>;

    /// Request a system shutdown (immediate, delayed, scheduled or cancel).
    fn shutdown(&self, request: ShutdownRequest) -> SysResult<()>;
}

impl<P: ProcessControl + ?Sized> ProcessControl for Box<P> {
    fn list_processes(&self) -> SysResult<Vec<ProcessInfo>> {
        (**self).list_processes()
    }

    fn terminate(&self, target: &ProcessTarget) -> SysResult<()> {
        (**self).terminate(target)
    }

    fn run_command(&self, program: &str, args: &[&str]) -> SysResult<()> {
        (**self).run_command(program, args)
    }

    fn clear_screen(&self) -> SysResult<()> {
        (**self).clear_screen()
    }

    fn shutdown(&self, request: ShutdownRequest) -> SysResult<()> {
        (**self).shutdown(request)
    }
}
