use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use tracing::debug;
use tsh_sdk::{ProcessControl, ProcessInfo, ProcessTarget, ShutdownRequest, SysError, SysResult};

/// `ProcessControl` backed by the host OS.
///
/// Every operation spawns a real process and blocks until it exits. Output
/// meant for the user (the `run_command` passthrough) is streamed line by
/// line to stdout as it arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProcessControl;

impl OsProcessControl {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn spawn_err(program: &str, err: &std::io::Error) -> SysError {
    SysError::process_failed(format!("{program}: {err}"))
}

/// Run to completion with inherited stdio, failing on a non-zero exit.
fn run_inherited(program: &str, args: &[&str]) -> SysResult<()> {
    debug!(program, ?args, "spawning");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| spawn_err(program, &e))?;
    if status.success() {
        Ok(())
    } else {
        Err(SysError::process_failed(format!(
            "{program} exited with {status}"
        )))
    }
}

impl ProcessControl for OsProcessControl {
    #[cfg(unix)]
    fn list_processes(&self) -> SysResult<Vec<ProcessInfo>> {
        let output = Command::new("ps")
            .args(["-eo", "pid=,comm="])
            .output()
            .map_err(|e| spawn_err("ps", &e))?;
        if !output.status.success() {
            return Err(SysError::process_failed(format!(
                "ps exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let mut processes = Vec::new();
        for line in text.lines() {
            let mut parts = line.split_whitespace();
            let Some(pid) = parts.next().and_then(|p| p.parse::<u32>().ok()) else {
                continue;
            };
            let name = parts.collect::<Vec<_>>().join(" ");
            processes.push(ProcessInfo { pid, name });
        }
        Ok(processes)
    }

    #[cfg(windows)]
    fn list_processes(&self) -> SysResult<Vec<ProcessInfo>> {
        let output = Command::new("tasklist")
            .args(["/fo", "csv", "/nh"])
            .output()
            .map_err(|e| spawn_err("tasklist", &e))?;
        if !output.status.success() {
            return Err(SysError::process_failed(format!(
                "tasklist exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let mut processes = Vec::new();
        for line in text.lines() {
            // "name","pid","session",...
            let mut fields = line.split("\",\"");
            let name = fields.next().unwrap_or("").trim_start_matches('"');
            let Some(pid) = fields.next().and_then(|p| p.parse::<u32>().ok()) else {
                continue;
            };
            processes.push(ProcessInfo {
                pid,
                name: name.to_string(),
            });
        }
        Ok(processes)
    }

    #[cfg(not(any(unix, windows)))]
    fn list_processes(&self) -> SysResult<Vec<ProcessInfo>> {
        Err(SysError::unsupported("process listing"))
    }

    #[cfg(unix)]
    fn terminate(&self, target: &ProcessTarget) -> SysResult<()> {
        match target {
            ProcessTarget::Pid(pid) => run_inherited("kill", &["-9", &pid.to_string()]),
            ProcessTarget::Name(name) => run_inherited("pkill", &["-9", name]),
        }
    }

    #[cfg(windows)]
    fn terminate(&self, target: &ProcessTarget) -> SysResult<()> {
        match target {
            ProcessTarget::Pid(pid) => {
                run_inherited("taskkill", &["/F", "/PID", &pid.to_string()])
            }
            ProcessTarget::Name(name) => run_inherited("taskkill", &["/F", "/IM", name]),
        }
    }

    #[cfg(not(any(unix, windows)))]
    fn terminate(&self, _target: &ProcessTarget) -> SysResult<()> {
        Err(SysError::unsupported("process termination"))
    }

    fn run_command(&self, program: &str, args: &[&str]) -> SysResult<()> {
        debug!(program, ?args, "spawning passthrough");
        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_err(program, &e))?;

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line.map_err(|e| SysError::io(e))?;
                println!("{line}");
            }
        }

        let status = child.wait().map_err(|e| spawn_err(program, &e))?;
        if status.success() {
            Ok(())
        } else {
            Err(SysError::process_failed(format!(
                "{program} exited with {status}"
            )))
        }
    }

    #[cfg(unix)]
    fn clear_screen(&self) -> SysResult<()> {
        run_inherited("clear", &[])
    }

    #[cfg(windows)]
    fn clear_screen(&self) -> SysResult<()> {
        run_inherited("cmd", &["/c", "cls"])
    }

    #[cfg(not(any(unix, windows)))]
    fn clear_screen(&self) -> SysResult<()> {
        Err(SysError::unsupported("clear screen"))
    }

    #[cfg(unix)]
    fn shutdown(&self, request: ShutdownRequest) -> SysResult<()> {
        match request {
            ShutdownRequest::Delayed => run_inherited("shutdown", &["+1"]),
            ShutdownRequest::Now => run_inherited("shutdown", &["-h", "now"]),
            ShutdownRequest::At { hours, minutes } => {
                run_inherited("shutdown", &["-h", &format!("{hours:02}:{minutes:02}")])
            }
            ShutdownRequest::Cancel => run_inherited("shutdown", &["-c"]),
        }
    }

    #[cfg(windows)]
    fn shutdown(&self, request: ShutdownRequest) -> SysResult<()> {
        match request {
            ShutdownRequest::Delayed => run_inherited("shutdown", &["/s", "/t", "60"]),
            ShutdownRequest::Now => run_inherited("shutdown", &["/s", "/f", "/t", "0"]),
            ShutdownRequest::At { hours, minutes } => {
                let secs = u32::from(hours) * 3600 + u32::from(minutes) * 60;
                run_inherited("shutdown", &["/s", "/f", "/t", &secs.to_string()])
            }
            ShutdownRequest::Cancel => run_inherited("shutdown", &["/a"]),
        }
    }

    #[cfg(not(any(unix, windows)))]
    fn shutdown(&self, _request: ShutdownRequest) -> SysResult<()> {
        Err(SysError::unsupported("system shutdown"))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn list_processes_sees_ourselves() {
        let procs = OsProcessControl::new().list_processes().unwrap();
        assert!(!procs.is_empty());
        let own = std::process::id();
        assert!(procs.iter().any(|p| p.pid == own));
    }

    #[test]
    fn run_command_succeeds_for_true() {
        OsProcessControl::new().run_command("true", &[]).unwrap();
    }

    #[test]
    fn run_command_reports_spawn_failure() {
        let err = OsProcessControl::new()
            .run_command("definitely-not-a-binary-tsh", &[])
            .unwrap_err();
        assert!(matches!(err, SysError::ProcessFailed(_)));
    }

    #[test]
    fn run_command_reports_nonzero_exit() {
        let err = OsProcessControl::new().run_command("false", &[]).unwrap_err();
        assert!(matches!(err, SysError::ProcessFailed(_)));
    }
}
