pub struct CommandHelp {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub options: &'static [(&'static str, &'static str)],
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "cat",
        summary: "Display the content of files",
        usage: "cat FILE...",
        options: &[],
    },
    CommandHelp {
        name: "cd",
        summary: "Change the current directory",
        usage: "cd [DIR]",
        options: &[],
    },
    CommandHelp {
        name: "clear",
        summary: "Clear the terminal screen",
        usage: "clear",
        options: &[],
    },
    CommandHelp {
        name: "cp",
        summary: "Copy a file or directory tree",
        usage: "cp [-r] SOURCE DEST",
        options: &[("-r", "Copy directories recursively")],
    },
    CommandHelp {
        name: "echo",
        summary: "Display a message",
        usage: "echo [MESSAGE]",
        options: &[("$USER", "Replaced with the session user's name")],
    },
    CommandHelp {
        name: "exit",
        summary: "Exit the terminal",
        usage: "exit",
        options: &[],
    },
    CommandHelp {
        name: "grep",
        summary: "Search for a pattern in a file",
        usage: "grep [-c] PATTERN [FILE]",
        options: &[("-c", "Count pattern occurrences instead of printing lines")],
    },
    CommandHelp {
        name: "help",
        summary: "Display help for commands",
        usage: "help [COMMAND]",
        options: &[],
    },
    CommandHelp {
        name: "history",
        summary: "List previously executed commands",
        usage: "history",
        options: &[],
    },
    CommandHelp {
        name: "ifconfig",
        summary: "Display network interface information",
        usage: "ifconfig",
        options: &[],
    },
    CommandHelp {
        name: "kill",
        summary: "Terminate a process by pid or name",
        usage: "kill <PID|NAME>",
        options: &[],
    },
    CommandHelp {
        name: "ls",
        summary: "List directory contents",
        usage: "ls [-altR] [DIR]...",
        options: &[
            ("-a", "Include entries starting with a dot"),
            ("-l", "Long format: permissions, size, mtime"),
            ("-t", "Sort by modification time, newest first"),
            ("-R", "Recurse into subdirectories"),
        ],
    },
    CommandHelp {
        name: "mkdir",
        summary: "Create directories (comma-separated list accepted)",
        usage: "mkdir DIR[,DIR...]",
        options: &[],
    },
    CommandHelp {
        name: "mkdirhier",
        summary: "Create a directory and its missing parents",
        usage: "mkdirhier DIR",
        options: &[],
    },
    CommandHelp {
        name: "mv",
        summary: "Move or rename a file or directory",
        usage: "mv SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "ps",
        summary: "View running processes",
        usage: "ps",
        options: &[],
    },
    CommandHelp {
        name: "pwd",
        summary: "Print the current working directory",
        usage: "pwd",
        options: &[],
    },
    CommandHelp {
        name: "rm",
        summary: "Remove a file",
        usage: "rm FILE",
        options: &[],
    },
    CommandHelp {
        name: "rmdir",
        summary: "Remove a directory and its contents",
        usage: "rmdir DIR",
        options: &[],
    },
    CommandHelp {
        name: "shutdown",
        summary: "Shut down the system",
        usage: "shutdown [now | HH:MM | -c]",
        options: &[
            ("now", "Shut down immediately"),
            ("HH:MM", "Shut down at the given time, 24-hour format"),
            ("-c", "Cancel a previously scheduled shutdown"),
        ],
    },
    CommandHelp {
        name: "touch",
        summary: "Create empty files",
        usage: "touch FILE...",
        options: &[],
    },
    CommandHelp {
        name: "tree",
        summary: "Print the directory tree below the current directory",
        usage: "tree [DEPTH]",
        options: &[("DEPTH", "Limit the printed depth")],
    },
    CommandHelp {
        name: "wc",
        summary: "Count lines, words, and bytes in a file",
        usage: "wc [-w|-l|-c] FILE",
        options: &[
            ("-w", "Print the word count only"),
            ("-l", "Print the line count only"),
            ("-c", "Print the byte count only"),
        ],
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn format_help(cmd: &CommandHelp) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n\n", cmd.name, cmd.summary));
    out.push_str(&format!("Usage: {}\n", cmd.usage));
    if !cmd.options.is_empty() {
        out.push_str("\nOptions:\n");
        for (opt, desc) in cmd.options {
            out.push_str(&format!("  {opt:16} {desc}\n"));
        }
    }
    out
}

pub fn format_help_list() -> String {
    let mut out = String::new();
    out.push_str("tsh - Terminal Commands\n\n");
    out.push_str("Available commands:\n\n");

    for cmd in COMMANDS {
        out.push_str(&format!("  {:12} {}\n", cmd.name, cmd.summary));
    }

    out.push_str("\nUse 'help COMMAND' for more information.\n");
    out
}
