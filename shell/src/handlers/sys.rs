//! Process, network and shell builtins: ps, kill, clear, shutdown,
//! ifconfig, help, history.
//!
//! The process/network commands are passthroughs: argument validation here,
//! everything else delegated to the collaborators.

use std::sync::OnceLock;

use regex::Regex;
use tsh_sdk::{ProcessTarget, ShutdownRequest};

use crate::error::{TshError, TshResult};
use crate::exec::ExecContext;
use crate::help;
use crate::shell::Shell;

fn shutdown_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid literal regex"))
}

impl Shell {
    pub(crate) fn cmd_ps(&mut self, _args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        match self.procs.list_processes() {
            Ok(processes) => {
                ctx.stdout
                    .writeln(&format!("{:>8}  {}", "PID", "NAME"))
                    .map_err(TshError::Io)?;
                for p in processes {
                    ctx.stdout
                        .writeln(&format!("{:>8}  {}", p.pid, p.name))
                        .map_err(TshError::Io)?;
                }
                Ok(0)
            }
            Err(e) => {
                ctx.write_err(&format!("Failed to list processes: {e}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_kill(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let target = ProcessTarget::parse(&args[0]);
        match &target {
            ProcessTarget::Pid(pid) => ctx
                .stdout
                .writeln(&format!("Killing process with PID: {pid}"))
                .map_err(TshError::Io)?,
            ProcessTarget::Name(name) => ctx
                .stdout
                .writeln(&format!("Killing process: {name}"))
                .map_err(TshError::Io)?,
        }
        match self.procs.terminate(&target) {
            Ok(()) => Ok(0),
            Err(e) => {
                ctx.write_err(&format!("Failed to terminate process: {e}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_clear(&mut self, _args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        match self.procs.clear_screen() {
            Ok(()) => Ok(0),
            Err(e) => {
                ctx.write_err(&format!("Error clearing the screen: {e}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_shutdown(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let request = match args.first().map(String::as_str) {
            None => {
                ctx.stdout
                    .writeln("Shutting down the system in 1 minute...")
                    .map_err(TshError::Io)?;
                ShutdownRequest::Delayed
            }
            Some("now") => ShutdownRequest::Now,
            Some("-c") => ShutdownRequest::Cancel,
            Some(spec) if shutdown_time_re().is_match(spec) => {
                let (h, m) = spec.split_once(':').unwrap_or((spec, "0"));
                let hours: u8 = h.parse().unwrap_or(0);
                let minutes: u8 = m.parse().unwrap_or(0);
                if hours > 23 || minutes > 59 {
                    ctx.write_err(&format!("Invalid shutdown option: {spec}"));
                    return Ok(1);
                }
                ctx.stdout
                    .writeln(&format!("Shutdown scheduled at {hours:02}:{minutes:02}."))
                    .map_err(TshError::Io)?;
                ShutdownRequest::At { hours, minutes }
            }
            Some(other) => {
                ctx.write_err(&format!("Invalid shutdown option: {other}"));
                return Ok(1);
            }
        };

        match self.procs.shutdown(request) {
            Ok(()) => {
                if request == ShutdownRequest::Cancel {
                    ctx.stdout
                        .writeln("Scheduled shutdown cancelled.")
                        .map_err(TshError::Io)?;
                }
                Ok(0)
            }
            Err(e) => {
                ctx.write_err(&format!("Failed to request shutdown: {e}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_ifconfig(&mut self, _args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        match self.net.interfaces() {
            Ok(interfaces) => {
                for iface in interfaces {
                    ctx.stdout
                        .writeln(&format!("Interface: {}", iface.name))
                        .map_err(TshError::Io)?;
                    for addr in &iface.addrs {
                        ctx.stdout
                            .writeln(&format!("  IP Address: {}", addr.addr))
                            .map_err(TshError::Io)?;
                        match addr.subnet_mask() {
                            Some(mask) => ctx
                                .stdout
                                .writeln(&format!("  Subnet Mask: {mask}"))
                                .map_err(TshError::Io)?,
                            None => ctx
                                .stdout
                                .writeln(&format!("  Prefix Length: /{}", addr.prefix_len))
                                .map_err(TshError::Io)?,
                        }
                    }
                    ctx.stdout.writeln("").map_err(TshError::Io)?;
                }
                Ok(0)
            }
            Err(e) => {
                ctx.write_err(&format!("Failed to enumerate network interfaces: {e}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_help(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        match args.first() {
            Some(name) => match help::get_help(name) {
                Some(cmd_help) => {
                    ctx.stdout
                        .write(help::format_help(cmd_help).as_bytes())
                        .map_err(TshError::Io)?;
                    Ok(0)
                }
                None => {
                    ctx.write_err(&format!("Command not found: {name}"));
                    Ok(1)
                }
            },
            None => {
                ctx.stdout
                    .write(help::format_help_list().as_bytes())
                    .map_err(TshError::Io)?;
                Ok(0)
            }
        }
    }

    pub(crate) fn cmd_history(&mut self, _args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        for (i, line) in self.session.history().iter().enumerate() {
            ctx.stdout
                .writeln(&format!("{:>4}  {}", i + 1, line))
                .map_err(TshError::Io)?;
        }
        Ok(0)
    }
}
