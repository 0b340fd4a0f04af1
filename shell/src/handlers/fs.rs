//! Filesystem builtins: cd, pwd, ls, mkdir, mkdirhier, touch, rmdir, rm,
//! cp, mv, tree.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tsh_sdk::EntryInfo;

use crate::error::{TshError, TshResult};
use crate::exec::ExecContext;
use crate::options::OptionSet;
use crate::session::display_path;
use crate::shell::Shell;

impl Shell {
    pub(crate) fn cmd_pwd(&mut self, _args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        ctx.stdout
            .writeln(&display_path(&self.session.cwd))
            .map_err(TshError::Io)?;
        Ok(0)
    }

    pub(crate) fn cmd_cd(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let target = args.first().map_or("", String::as_str);
        let resolved = self.session.resolve(target);

        match self.store.stat(&resolved) {
            Ok(info) if info.is_dir() => {
                self.session.cwd = resolved;
                Ok(0)
            }
            _ => {
                ctx.write_err(&format!("Directory not found: {target}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_ls(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let opts = OptionSet::parse(args);

        let targets: Vec<(String, PathBuf)> = if opts.operands.is_empty() {
            vec![(display_path(&self.session.cwd), self.session.cwd.clone())]
        } else {
            opts.operands
                .iter()
                .map(|tok| (tok.clone(), self.session.resolve(tok)))
                .collect()
        };

        let mut exit_code = 0;
        for (shown, path) in targets {
            match self.store.stat(&path) {
                Ok(info) if info.is_dir() => {
                    if opts.has('R') {
                        self.ls_recursive(&path, &opts, ctx)?;
                    } else {
                        self.ls_single(&path, &opts, ctx)?;
                    }
                }
                _ => {
                    ctx.write_err(&format!("Directory not found: {shown}"));
                    exit_code = 1;
                }
            }
        }
        Ok(exit_code)
    }

    fn ls_single(&self, path: &Path, opts: &OptionSet, ctx: &mut ExecContext) -> TshResult<()> {
        let entries = match self.store.read_dir(path) {
            Ok(e) => e,
            Err(e) => {
                ctx.write_err(&format!("Failed to list directory: {e}"));
                return Ok(());
            }
        };
        let entries = visible_sorted(entries, opts);
        for entry in &entries {
            self.print_entry(entry, opts, ctx)?;
        }
        Ok(())
    }

    /// Depth-first pre-order: each directory's absolute path as a header,
    /// its entries, then its subdirectories.
    fn ls_recursive(&self, path: &Path, opts: &OptionSet, ctx: &mut ExecContext) -> TshResult<()> {
        let entries = match self.store.read_dir(path) {
            Ok(e) => e,
            Err(e) => {
                ctx.write_err(&format!("Failed to list directory: {e}"));
                return Ok(());
            }
        };
        let entries = visible_sorted(entries, opts);

        ctx.stdout
            .writeln(&format!("{}:", display_path(path)))
            .map_err(TshError::Io)?;
        for entry in &entries {
            self.print_entry(entry, opts, ctx)?;
        }
        for entry in &entries {
            if entry.is_dir() {
                self.ls_recursive(&path.join(&entry.name), opts, ctx)?;
            }
        }
        Ok(())
    }

    fn print_entry(&self, entry: &EntryInfo, opts: &OptionSet, ctx: &mut ExecContext) -> TshResult<()> {
        let line = if opts.has('l') {
            format!(
                "{} {} {} {}",
                permission_string(entry),
                format_size(entry.size),
                format_timestamp(entry.modified),
                entry.name
            )
        } else {
            entry.name.clone()
        };
        ctx.stdout.writeln(&line).map_err(TshError::Io)?;
        Ok(())
    }

    pub(crate) fn cmd_mkdir(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let mut exit_code = 0;
        // The argument may be a comma-separated list: `mkdir a,b` makes both.
        for name in args[0].split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let resolved = self.session.resolve(name);
            if self.store.stat(&resolved).is_ok() {
                ctx.write_err(&format!("Directory already exists: {}", display_path(&resolved)));
                exit_code = 1;
                continue;
            }
            match self.store.create_dir(&resolved) {
                Ok(()) => ctx
                    .stdout
                    .writeln(&format!("Directory created: {}", display_path(&resolved)))
                    .map_err(TshError::Io)?,
                Err(_) => {
                    ctx.write_err(&format!("Failed to create directory: {name}"));
                    exit_code = 1;
                }
            }
        }
        Ok(exit_code)
    }

    pub(crate) fn cmd_mkdirhier(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let resolved = self.session.resolve(&args[0]);
        match self.store.create_dir_all(&resolved) {
            Ok(()) => {
                ctx.stdout
                    .writeln(&format!("Directory created: {}", display_path(&resolved)))
                    .map_err(TshError::Io)?;
                Ok(0)
            }
            Err(_) => {
                ctx.write_err(&format!("Failed to create directory: {}", args[0]));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_touch(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let mut exit_code = 0;
        for name in args {
            let resolved = self.session.resolve(name);
            match self.store.create_file(&resolved) {
                Ok(()) => ctx
                    .stdout
                    .writeln(&format!("File created: {}", display_path(&resolved)))
                    .map_err(TshError::Io)?,
                Err(e) => {
                    ctx.write_err(&format!("Failed to create file: {e}"));
                    exit_code = 1;
                }
            }
        }
        Ok(exit_code)
    }

    pub(crate) fn cmd_rmdir(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let target = &args[0];
        let resolved = self.session.resolve(target);

        match self.store.stat(&resolved) {
            Ok(info) if info.is_dir() => match self.store.remove_dir_all(&resolved) {
                Ok(()) => {
                    ctx.stdout
                        .writeln(&format!("Directory {target} deleted."))
                        .map_err(TshError::Io)?;
                    Ok(0)
                }
                Err(e) => {
                    ctx.write_err(&format!("Failed to delete directory: {e}"));
                    Ok(1)
                }
            },
            _ => {
                ctx.write_err(&format!("Directory not found: {target}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_rm(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let resolved = self.session.resolve(&args[0]);
        let shown = display_path(&resolved);

        if self.store.stat(&resolved).is_err() {
            ctx.write_err(&format!("File not found: {shown}"));
            return Ok(1);
        }
        match self.store.remove_file(&resolved) {
            Ok(()) => {
                ctx.stdout
                    .writeln(&format!("File deleted: {shown}"))
                    .map_err(TshError::Io)?;
                Ok(0)
            }
            Err(_) => {
                ctx.write_err(&format!("Failed to delete file: {shown}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_cp(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let opts = OptionSet::parse(args);
        let (Some(src_tok), Some(dst_tok)) = (opts.operands.first(), opts.operands.get(1)) else {
            ctx.write_err("Usage: cp [-r] <source> <dest>");
            return Ok(1);
        };
        let src = self.session.resolve(src_tok);
        let dst = self.session.resolve(dst_tok);

        let info = match self.store.stat(&src) {
            Ok(info) => info,
            Err(_) => {
                ctx.write_err(&format!("Source file or directory not found: {src_tok}"));
                return Ok(1);
            }
        };

        if opts.has('r') {
            if !info.is_dir() {
                ctx.write_err(&format!("Source is not a directory: {src_tok}"));
                return Ok(1);
            }
            self.copy_tree(&src, &dst, ctx)?;
            Ok(0)
        } else if info.is_dir() {
            ctx.write_err(&format!("cp: '{src_tok}' is a directory (use -r)"));
            Ok(1)
        } else {
            match self.store.copy_file(&src, &dst) {
                Ok(()) => {
                    ctx.stdout
                        .writeln(&format!(
                            "File copied: {} -> {}",
                            display_path(&src),
                            display_path(&dst)
                        ))
                        .map_err(TshError::Io)?;
                    Ok(0)
                }
                Err(e) => {
                    ctx.write_err(&format!("Failed to copy file: {e}"));
                    Ok(1)
                }
            }
        }
    }

    /// Recursive directory copy. Creates the destination as needed and
    /// reports individual file failures without aborting the traversal.
    fn copy_tree(&self, src: &Path, dst: &Path, ctx: &mut ExecContext) -> TshResult<()> {
        if self.store.stat(dst).is_err() {
            if let Err(e) = self.store.create_dir_all(dst) {
                ctx.write_err(&format!("Failed to create directory: {e}"));
                return Ok(());
            }
        }

        let entries = match self.store.read_dir(src) {
            Ok(e) => e,
            Err(e) => {
                ctx.write_err(&format!("Failed to list directory: {e}"));
                return Ok(());
            }
        };

        for entry in entries {
            let child_src = src.join(&entry.name);
            let child_dst = dst.join(&entry.name);
            if entry.is_dir() {
                self.copy_tree(&child_src, &child_dst, ctx)?;
            } else if let Err(e) = self.store.copy_file(&child_src, &child_dst) {
                ctx.write_err(&format!("Failed to copy file: {}: {e}", entry.name));
            }
        }
        Ok(())
    }

    pub(crate) fn cmd_mv(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let src = self.session.resolve(&args[0]);
        let dst = self.session.resolve(&args[1]);

        if self.store.stat(&src).is_err() {
            ctx.write_err(&format!("Source file or directory not found: {}", args[0]));
            return Ok(1);
        }
        match self.store.rename(&src, &dst) {
            Ok(()) => {
                ctx.stdout
                    .writeln(&format!(
                        "File or directory moved/renamed: {} -> {}",
                        display_path(&src),
                        display_path(&dst)
                    ))
                    .map_err(TshError::Io)?;
                Ok(0)
            }
            Err(e) => {
                ctx.write_err(&format!("Failed to move/rename file or directory: {e}"));
                Ok(1)
            }
        }
    }

    pub(crate) fn cmd_tree(&mut self, args: &[String], ctx: &mut ExecContext) -> TshResult<i32> {
        let max_depth = match args.first() {
            None => None,
            Some(tok) => match tok.parse::<usize>() {
                Ok(n) => Some(n),
                Err(_) => {
                    ctx.write_err(&format!("tree: invalid depth '{tok}'"));
                    return Ok(1);
                }
            },
        };

        let root = self.session.cwd.clone();
        let root_name = root
            .file_name()
            .map_or_else(|| display_path(&root), |n| n.to_string_lossy().into_owned());
        ctx.stdout
            .writeln(&format!("{root_name}/"))
            .map_err(TshError::Io)?;
        self.print_tree(&root, 1, max_depth, ctx)?;
        Ok(0)
    }

    /// Pre-order depth-first subtree print, two spaces of indent per level.
    fn print_tree(
        &self,
        path: &Path,
        depth: usize,
        max_depth: Option<usize>,
        ctx: &mut ExecContext,
    ) -> TshResult<()> {
        let mut entries = match self.store.read_dir(path) {
            Ok(e) => e,
            Err(_) => return Ok(()),
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let indent = "  ".repeat(depth);
        for entry in &entries {
            if entry.is_dir() {
                ctx.stdout
                    .writeln(&format!("{indent}{}/", entry.name))
                    .map_err(TshError::Io)?;
                if max_depth.map_or(true, |max| depth < max) {
                    self.print_tree(&path.join(&entry.name), depth + 1, max_depth, ctx)?;
                }
            } else {
                ctx.stdout
                    .writeln(&format!("{indent}{}", entry.name))
                    .map_err(TshError::Io)?;
            }
        }
        Ok(())
    }
}

/// Apply the `a` filter and the `t`/name ordering.
fn visible_sorted(entries: Vec<EntryInfo>, opts: &OptionSet) -> Vec<EntryInfo> {
    let mut entries: Vec<EntryInfo> = entries
        .into_iter()
        .filter(|e| opts.has('a') || !e.name.starts_with('.'))
        .collect();
    if opts.has('t') && !opts.has('R') {
        // Newest first.
        entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    } else {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
    }
    entries
}

/// Permission column: type char and owner bits from the entry, group/other
/// filled with `rwx` for directories and `-` otherwise.
fn permission_string(entry: &EntryInfo) -> String {
    let mut s = String::with_capacity(10);
    s.push(if entry.is_dir() { 'd' } else { '-' });
    s.push(if entry.readable { 'r' } else { '-' });
    s.push(if entry.writable { 'w' } else { '-' });
    s.push(if entry.executable { 'x' } else { '-' });
    for _ in 0..2 {
        s.push_str(if entry.is_dir() { "rwx" } else { "---" });
    }
    s
}

/// Human-readable size: bytes below 1024, otherwise the first unit where the
/// value drops under 1024, two decimal places.
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    for unit in ["KB", "MB", "GB"] {
        if value < 1024.0 || unit == "GB" {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    unreachable!()
}

/// `YYYY-MM-DD HH:MM:SS` from a system time, civil-date math on the unix
/// timestamp.
fn format_timestamp(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    let days_since_epoch = secs / 86400;
    let time_of_day = secs % 86400;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;

    let mut year = 1970u64;
    let mut remaining_days = days_since_epoch;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let month_days = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };
    let mut month = 0usize;
    while month < 11 && remaining_days >= month_days[month] {
        remaining_days -= month_days[month];
        month += 1;
    }
    let day = remaining_days + 1;

    format!(
        "{year:04}-{:02}-{day:02} {hours:02}:{minutes:02}:{seconds:02}",
        month + 1
    )
}

fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tsh_sdk::FileType;

    fn entry(name: &str, dir: bool) -> EntryInfo {
        EntryInfo {
            name: name.to_string(),
            file_type: if dir { FileType::Directory } else { FileType::Regular },
            size: 0,
            modified: UNIX_EPOCH,
            readable: true,
            writable: true,
            executable: dir,
        }
    }

    #[test]
    fn size_formatting_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn permission_column_shape() {
        assert_eq!(permission_string(&entry("d", true)), "drwxrwxrwx");
        let mut f = entry("f", false);
        f.executable = false;
        assert_eq!(permission_string(&f), "-rw-------");
        f.writable = false;
        assert_eq!(permission_string(&f), "-r--------");
    }

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_timestamp(UNIX_EPOCH), "1970-01-01 00:00:00");
        // 2024-02-29 12:34:56 UTC, a leap day.
        let t = UNIX_EPOCH + Duration::from_secs(1_709_210_096);
        assert_eq!(format_timestamp(t), "2024-02-29 12:34:56");
    }

    #[test]
    fn dot_entries_hidden_unless_a() {
        let entries = vec![entry(".hidden", false), entry("visible", false)];
        let plain = visible_sorted(entries.clone(), &OptionSet::default());
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].name, "visible");

        let all_args = vec!["-a".to_string()];
        let all = visible_sorted(entries, &OptionSet::parse(&all_args));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn t_flag_sorts_newest_first() {
        let mut old = entry("old", false);
        old.modified = UNIX_EPOCH;
        let mut new = entry("new", false);
        new.modified = UNIX_EPOCH + Duration::from_secs(1000);

        let args = vec!["-t".to_string()];
        let sorted = visible_sorted(vec![old, new], &OptionSet::parse(&args));
        assert_eq!(sorted[0].name, "new");
        assert_eq!(sorted[1].name, "old");
    }
}
