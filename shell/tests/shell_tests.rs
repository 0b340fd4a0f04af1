//! Integration tests for the tsh interpreter.
//!
//! Each test builds a `Shell` over a temporary directory (real filesystem
//! through `LocalStore`) with recording doubles for process control and
//! network info, then drives it line by line through the same `execute`
//! path the REPL uses, asserting on captured output.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tsh::{ExecContext, Session, Shell, TshError};
use tsh_sdk::{
    InterfaceAddr, InterfaceInfo, NetworkInfo, ProcessControl, ProcessInfo, ProcessTarget,
    ShutdownRequest, SysResult,
};
use tsh_sys::LocalStore;

#[derive(Default)]
struct RecordingProcs {
    calls: Arc<Mutex<Vec<String>>>,
}

impl ProcessControl for RecordingProcs {
    fn list_processes(&self) -> SysResult<Vec<ProcessInfo>> {
        Ok(vec![
            ProcessInfo {
                pid: 1,
                name: "init".to_string(),
            },
            ProcessInfo {
                pid: 4242,
                name: "tshd".to_string(),
            },
        ])
    }

    fn terminate(&self, target: &ProcessTarget) -> SysResult<()> {
        self.calls.lock().unwrap().push(format!("terminate {target:?}"));
        Ok(())
    }

    fn run_command(&self, program: &str, _args: &[&str]) -> SysResult<()> {
        self.calls.lock().unwrap().push(format!("run {program}"));
        Ok(())
    }

    fn clear_screen(&self) -> SysResult<()> {
        self.calls.lock().unwrap().push("clear".to_string());
        Ok(())
    }

    fn shutdown(&self, request: ShutdownRequest) -> SysResult<()> {
        self.calls.lock().unwrap().push(format!("shutdown {request:?}"));
        Ok(())
    }
}

struct FixedNet;

impl NetworkInfo for FixedNet {
    fn interfaces(&self) -> SysResult<Vec<InterfaceInfo>> {
        Ok(vec![InterfaceInfo {
            name: "eth0".to_string(),
            addrs: vec![InterfaceAddr {
                addr: "192.168.1.5".parse::<IpAddr>().unwrap(),
                prefix_len: 24,
            }],
        }])
    }
}

struct Fixture {
    shell: Shell,
    calls: Arc<Mutex<Vec<String>>>,
    home: PathBuf,
}

fn fixture(root: &Path) -> Fixture {
    let home = root.join("home");
    std::fs::create_dir_all(&home).unwrap();
    let work = root.join("work");
    std::fs::create_dir_all(&work).unwrap();

    let procs = RecordingProcs::default();
    let calls = procs.calls.clone();
    let session = Session::new(work, home.clone(), "alice");
    let shell = Shell::with_session(
        session,
        Box::new(LocalStore::new()),
        Box::new(procs),
        Box::new(FixedNet),
    );
    Fixture { shell, calls, home }
}

/// Run one line, capturing output. Dispatcher-level errors are rendered to
/// the stderr string the way the REPL would print them.
fn run(shell: &mut Shell, line: &str) -> (i32, String, String) {
    let mut ctx = ExecContext::captured();
    let code = match shell.execute(line, &mut ctx) {
        Ok(code) => code,
        Err(TshError::Exit(code)) => {
            return (code, ctx.stdout.text(), "<exit>".to_string());
        }
        Err(e) => {
            ctx.write_err(&e.to_string());
            1
        }
    };
    (code, ctx.stdout.text(), ctx.stderr.text())
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[test]
fn cd_then_pwd_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    std::fs::create_dir(work.join("sub")).unwrap();

    let (code, _, _) = run(&mut fx.shell, "cd sub");
    assert_eq!(code, 0);
    let (_, out, _) = run(&mut fx.shell, "pwd");
    assert_eq!(out.trim_end(), work.join("sub").display().to_string());

    run(&mut fx.shell, "cd ..");
    let (_, out, _) = run(&mut fx.shell, "pwd");
    assert_eq!(out.trim_end(), work.display().to_string());
}

#[test]
fn pwd_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (_, first, _) = run(&mut fx.shell, "pwd");
    let (_, second, _) = run(&mut fx.shell, "pwd");
    assert_eq!(first, second);
}

#[test]
fn cd_missing_directory_leaves_session_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let before = fx.shell.session.cwd.clone();

    let (code, _, err) = run(&mut fx.shell, "cd nowhere");
    assert_eq!(code, 1);
    assert_eq!(err.trim_end(), "Directory not found: nowhere");
    assert_eq!(fx.shell.session.cwd, before);
}

#[test]
fn cd_file_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    write_file(&fx.shell.session.cwd.join("plain"), "");

    let (code, _, err) = run(&mut fx.shell, "cd plain");
    assert_eq!(code, 1);
    assert!(err.contains("Directory not found: plain"));
}

#[test]
fn cd_tilde_stores_absolute_home_and_prompt_collapses() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, _, _) = run(&mut fx.shell, "cd ~");
    assert_eq!(code, 0);
    // The stored cwd is the real path, not a "~" sentinel...
    assert_eq!(fx.shell.session.cwd, fx.home);
    // ...and the prompt still renders it as "~".
    assert_eq!(fx.shell.session.prompt("box"), "alice@box:~$ ");
}

#[test]
fn zero_arg_cd_goes_home() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    run(&mut fx.shell, "cd");
    assert_eq!(fx.shell.session.cwd, fx.home);
}

#[test]
fn ls_hides_dot_entries_unless_a() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    write_file(&work.join(".hidden"), "");
    write_file(&work.join("visible"), "");

    let (_, out, _) = run(&mut fx.shell, "ls");
    assert_eq!(out.lines().collect::<Vec<_>>(), ["visible"]);

    let (_, out, _) = run(&mut fx.shell, "ls -a");
    let mut lines: Vec<_> = out.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, [".hidden", "visible"]);
}

#[test]
fn ls_long_format_shows_permissions_size_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    write_file(&work.join("data.bin"), "hello");

    let (_, out, _) = run(&mut fx.shell, "ls -l");
    let line = out.lines().find(|l| l.ends_with("data.bin")).unwrap();
    assert!(line.starts_with('-'), "file entries start with '-': {line}");
    assert!(line.contains("5 B"), "human size in bytes: {line}");

    let (_, out, _) = run(&mut fx.shell, "ls -l /");
    // "/" exists, so the listing must not be a diagnostic.
    assert!(!out.is_empty());
}

#[test]
fn ls_recursive_prints_directory_headers() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    std::fs::create_dir(work.join("inner")).unwrap();
    write_file(&work.join("inner").join("leaf"), "");

    let (_, out, _) = run(&mut fx.shell, "ls -R");
    assert!(out.contains(&format!("{}:", work.display())));
    assert!(out.contains(&format!("{}:", work.join("inner").display())));
    assert!(out.contains("leaf"));
}

#[test]
fn ls_missing_directory_is_reported_but_others_still_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    std::fs::create_dir(work.join("real")).unwrap();
    write_file(&work.join("real").join("present"), "");

    let (code, out, err) = run(&mut fx.shell, "ls ghost real");
    assert_eq!(code, 1);
    assert!(err.contains("Directory not found: ghost"));
    assert!(out.contains("present"));
}

#[test]
fn mkdir_then_rmdir_restores_listing() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (_, before, _) = run(&mut fx.shell, "ls");
    run(&mut fx.shell, "mkdir scratch");
    run(&mut fx.shell, "rmdir scratch");
    let (_, after, _) = run(&mut fx.shell, "ls");
    assert_eq!(before, after);
}

#[test]
fn mkdir_accepts_comma_separated_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();

    let (code, out, _) = run(&mut fx.shell, "mkdir alpha,beta");
    assert_eq!(code, 0);
    assert!(work.join("alpha").is_dir());
    assert!(work.join("beta").is_dir());
    assert_eq!(out.matches("Directory created:").count(), 2);
}

#[test]
fn mkdir_existing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    run(&mut fx.shell, "mkdir once");
    let (code, _, err) = run(&mut fx.shell, "mkdir once");
    assert_eq!(code, 1);
    assert!(err.contains("Directory already exists:"));
}

#[test]
fn mkdirhier_creates_missing_parents() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();

    let (code, _, _) = run(&mut fx.shell, "mkdirhier a/b/c");
    assert_eq!(code, 0);
    assert!(work.join("a/b/c").is_dir());
}

#[test]
fn touch_creates_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();

    let (code, out, _) = run(&mut fx.shell, "touch one two");
    assert_eq!(code, 0);
    assert!(work.join("one").is_file());
    assert!(work.join("two").is_file());
    assert_eq!(out.matches("File created:").count(), 2);
}

#[test]
fn rm_deletes_and_reports_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    write_file(&work.join("doomed"), "x");

    let (code, out, _) = run(&mut fx.shell, "rm doomed");
    assert_eq!(code, 0);
    assert!(out.contains("File deleted:"));
    assert!(!work.join("doomed").exists());

    let (code, _, err) = run(&mut fx.shell, "rm doomed");
    assert_eq!(code, 1);
    assert!(err.contains("File not found:"));
}

#[test]
fn cp_copies_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    write_file(&work.join("src.txt"), "payload");

    let (code, _, _) = run(&mut fx.shell, "cp src.txt dst.txt");
    assert_eq!(code, 0);
    assert_eq!(std::fs::read_to_string(work.join("dst.txt")).unwrap(), "payload");
}

#[test]
fn cp_refuses_directory_source_without_r() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    std::fs::create_dir(fx.shell.session.cwd.join("adir")).unwrap();

    let (code, _, err) = run(&mut fx.shell, "cp adir elsewhere");
    assert_eq!(code, 1);
    assert!(err.contains("is a directory (use -r)"));
}

#[test]
fn cp_r_reproduces_the_whole_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    std::fs::create_dir_all(work.join("treeA/nested/deep")).unwrap();
    write_file(&work.join("treeA/top.txt"), "top");
    write_file(&work.join("treeA/nested/mid.txt"), "mid");
    write_file(&work.join("treeA/nested/deep/leaf.txt"), "leaf");

    let (code, _, err) = run(&mut fx.shell, "cp -r treeA treeB");
    assert_eq!(code, 0, "stderr: {err}");
    assert_eq!(
        std::fs::read_to_string(work.join("treeB/top.txt")).unwrap(),
        "top"
    );
    assert_eq!(
        std::fs::read_to_string(work.join("treeB/nested/mid.txt")).unwrap(),
        "mid"
    );
    assert_eq!(
        std::fs::read_to_string(work.join("treeB/nested/deep/leaf.txt")).unwrap(),
        "leaf"
    );
}

#[test]
fn mv_renames_and_reports_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    write_file(&work.join("old"), "data");

    let (code, out, _) = run(&mut fx.shell, "mv old new");
    assert_eq!(code, 0);
    assert!(out.contains("moved/renamed"));
    assert!(!work.join("old").exists());
    assert_eq!(std::fs::read_to_string(work.join("new")).unwrap(), "data");

    let (code, _, err) = run(&mut fx.shell, "mv ghost anywhere");
    assert_eq!(code, 1);
    assert!(err.contains("Source file or directory not found: ghost"));
}

#[test]
fn cat_prints_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    write_file(
        &fx.shell.session.cwd.join("poem.txt"),
        "first line\nsecond line\n",
    );

    let (code, out, _) = run(&mut fx.shell, "cat poem.txt");
    assert_eq!(code, 0);
    assert_eq!(out, "first line\nsecond line\n");
}

#[test]
fn tree_prints_nested_structure_and_honors_depth() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    let work = fx.shell.session.cwd.clone();
    std::fs::create_dir_all(work.join("outer/inner")).unwrap();
    write_file(&work.join("outer/inner/file.txt"), "");

    let (_, full, _) = run(&mut fx.shell, "tree");
    assert!(full.contains("outer/"));
    assert!(full.contains("  inner/"));
    assert!(full.contains("    file.txt"));

    let (_, limited, _) = run(&mut fx.shell, "tree 1");
    assert!(limited.contains("outer/"));
    assert!(!limited.contains("inner/"));
}

#[test]
fn tree_rejects_non_numeric_depth() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, _, err) = run(&mut fx.shell, "tree deep");
    assert_eq!(code, 1);
    assert!(err.contains("invalid depth"));
}

#[test]
fn grep_echoes_every_line_and_highlights_matches() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    write_file(
        &fx.shell.session.cwd.join("log.txt"),
        "match here\nnothing\nanother match\n",
    );

    let (code, out, _) = run(&mut fx.shell, "grep \"match\" log.txt");
    assert_eq!(code, 0);
    // Non-matching lines are still printed verbatim.
    assert!(out.contains("nothing"));
    assert_eq!(out.matches("\u{1b}[31mmatch\u{1b}[0m").count(), 2);
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn grep_c_counts_overlapping_occurrences() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    write_file(&fx.shell.session.cwd.join("aa.txt"), "aaa\n");

    let (code, out, _) = run(&mut fx.shell, "grep -c aa aa.txt");
    assert_eq!(code, 0);
    assert_eq!(out.trim_end(), "2");
}

#[test]
fn grep_missing_file_names_the_token() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, _, err) = run(&mut fx.shell, "grep pattern absent.txt");
    assert_eq!(code, 1);
    assert!(err.contains("File not found: absent.txt"));
}

#[test]
fn wc_default_and_single_flag_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());
    // 3 lines, 6 words, 25 content bytes (terminators excluded).
    write_file(
        &fx.shell.session.cwd.join("counts.txt"),
        "one two\nthree four\nfive six\n",
    );

    let (_, out, _) = run(&mut fx.shell, "wc counts.txt");
    assert_eq!(out.trim_end(), "3 6 25 counts.txt");

    let (_, out, _) = run(&mut fx.shell, "wc -l counts.txt");
    assert_eq!(out.trim_end(), "3 counts.txt");

    let (_, out, _) = run(&mut fx.shell, "wc -w counts.txt");
    assert_eq!(out.trim_end(), "6 counts.txt");

    let (_, out, _) = run(&mut fx.shell, "wc -c counts.txt");
    assert_eq!(out.trim_end(), "25 counts.txt");
}

#[test]
fn echo_substitutes_user_inside_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, out, _) = run(&mut fx.shell, "echo \"$USER says hi\"");
    assert_eq!(code, 0);
    assert_eq!(out.trim_end(), "alice says hi");
}

#[test]
fn echo_unquoted_multiword_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, out, err) = run(&mut fx.shell, "echo hi there");
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert_eq!(err.trim_end(), "Use quotes for messages with multiple words.");
}

#[test]
fn echo_single_word_and_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, out, _) = run(&mut fx.shell, "echo hello");
    assert_eq!(code, 0);
    assert_eq!(out, "hello\n");

    let (code, out, _) = run(&mut fx.shell, "echo");
    assert_eq!(code, 0);
    assert_eq!(out, "\n");
}

#[test]
fn unknown_command_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (_, _, err) = run(&mut fx.shell, "frobnicate now");
    assert_eq!(err.trim_end(), "Command not found: frobnicate");
}

#[test]
fn missing_argument_contracts() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    for line in [
        "mkdir",
        "mkdirhier",
        "touch",
        "rmdir",
        "rm",
        "cat",
        "grep",
        "kill",
        "cp",
        "cp only-one",
        "mv",
        "mv only-one",
    ] {
        let name = line.split_whitespace().next().unwrap();
        let (_, _, err) = run(&mut fx.shell, line);
        assert_eq!(
            err.trim_end(),
            format!("Missing argument for {name} command."),
            "line: {line}"
        );
    }
}

#[test]
fn history_lists_dispatched_lines_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    run(&mut fx.shell, "pwd");
    run(&mut fx.shell, "   ");
    run(&mut fx.shell, "echo hello");
    run(&mut fx.shell, "exit");

    let (_, out, _) = run(&mut fx.shell, "history");
    let lines: Vec<&str> = out.lines().collect();
    // Blank input and `exit` are never recorded; `history` itself is.
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("1  pwd"));
    assert!(lines[1].contains("2  echo hello"));
    assert!(lines[2].contains("3  history"));
}

#[test]
fn unknown_commands_are_still_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    run(&mut fx.shell, "frobnicate");
    assert_eq!(fx.shell.session.history(), ["frobnicate"]);
}

#[test]
fn exit_surfaces_without_touching_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let mut ctx = ExecContext::captured();
    assert!(matches!(
        fx.shell.execute("exit", &mut ctx),
        Err(TshError::Exit(0))
    ));
    assert!(fx.shell.session.history().is_empty());
}

#[test]
fn ps_prints_the_collaborator_listing() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, out, _) = run(&mut fx.shell, "ps");
    assert_eq!(code, 0);
    assert!(out.contains("PID"));
    assert!(out.contains("init"));
    assert!(out.contains("4242"));
}

#[test]
fn kill_routes_pid_and_name_targets() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, out, _) = run(&mut fx.shell, "kill 1234");
    assert_eq!(code, 0);
    assert!(out.contains("Killing process with PID: 1234"));

    let (code, out, _) = run(&mut fx.shell, "kill firefox");
    assert_eq!(code, 0);
    assert!(out.contains("Killing process: firefox"));

    let calls = fx.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("Pid(1234)"));
    assert!(calls[1].contains("firefox"));
}

#[test]
fn shutdown_variants_reach_the_collaborator() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (_, out, _) = run(&mut fx.shell, "shutdown");
    assert!(out.contains("Shutting down the system in 1 minute..."));
    run(&mut fx.shell, "shutdown now");
    run(&mut fx.shell, "shutdown 22:30");
    run(&mut fx.shell, "shutdown -c");

    let calls = fx.calls.lock().unwrap();
    assert_eq!(calls.len(), 4);
    assert!(calls[0].contains("Delayed"));
    assert!(calls[1].contains("Now"));
    assert!(calls[2].contains("hours: 22"));
    assert!(calls[3].contains("Cancel"));
}

#[test]
fn shutdown_rejects_bad_options() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, _, err) = run(&mut fx.shell, "shutdown tomorrow");
    assert_eq!(code, 1);
    assert_eq!(err.trim_end(), "Invalid shutdown option: tomorrow");

    let (code, _, err) = run(&mut fx.shell, "shutdown 99:99");
    assert_eq!(code, 1);
    assert!(err.contains("Invalid shutdown option"));

    assert!(fx.calls.lock().unwrap().is_empty());
}

#[test]
fn clear_is_a_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, _, _) = run(&mut fx.shell, "clear");
    assert_eq!(code, 0);
    assert_eq!(fx.calls.lock().unwrap().as_slice(), ["clear"]);
}

#[test]
fn ifconfig_renders_addresses_and_masks() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (code, out, _) = run(&mut fx.shell, "ifconfig");
    assert_eq!(code, 0);
    assert!(out.contains("Interface: eth0"));
    assert!(out.contains("IP Address: 192.168.1.5"));
    assert!(out.contains("Subnet Mask: 255.255.255.0"));
}

#[test]
fn help_lists_commands_and_details_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = fixture(dir.path());

    let (_, out, _) = run(&mut fx.shell, "help");
    assert!(out.contains("Available commands:"));
    assert!(out.contains("grep"));

    let (_, out, _) = run(&mut fx.shell, "help wc");
    assert!(out.contains("Usage: wc"));

    let (code, _, err) = run(&mut fx.shell, "help nonsense");
    assert_eq!(code, 1);
    assert!(err.contains("Command not found: nonsense"));
}
