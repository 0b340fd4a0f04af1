use std::sync::{Arc, RwLock};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tsh::{ExecContext, Shell, TshError};
use tsh_config::TshConfig;
use tsh_sys::{LocalStore, OsNetworkInfo, OsProcessControl};

mod completer;

/// tsh - Interactive terminal emulator shell
#[derive(Parser, Debug)]
#[command(name = "tsh", version, about)]
struct Args {
    /// Configuration file to load instead of the default locations
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => tsh_config::load_from_file(path),
        None => tsh_config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Warning: could not load configuration: {e}");
        TshConfig::default()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut shell = Shell::new(
        Box::new(LocalStore::new()),
        Box::new(OsProcessControl::new()),
        Box::new(OsNetworkInfo::new()),
    );

    run_repl(&mut shell, &config)
}

/// Machine name for the prompt.
fn host_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn run_repl(shell: &mut Shell, config: &TshConfig) -> Result<(), Box<dyn std::error::Error>> {
    use completer::TshHelper;
    use rustyline::error::ReadlineError;
    use rustyline::history::DefaultHistory;
    use rustyline::{CompletionType, Config, Editor};

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(config.shell.history.max_entries)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();

    let cwd = Arc::new(RwLock::new(shell.session.cwd.clone()));
    let helper = TshHelper::new(cwd.clone());

    let mut rl: Editor<TshHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    let history_path = tsh_config::expand_path(&config.shell.history.file);
    if config.shell.history.enabled {
        let _ = rl.load_history(&history_path);
    }

    println!("tsh v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit, 'help' for help.");
    println!();

    let host = host_name();

    loop {
        {
            let mut cwd_guard = cwd.write().unwrap();
            cwd_guard.clone_from(&shell.session.cwd);
        }

        let prompt = shell.session.prompt(&host);

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                let mut ctx = ExecContext::default();
                match shell.execute(line, &mut ctx) {
                    Ok(_) => {}
                    Err(TshError::Exit(_)) => {
                        println!("Exiting terminal...");
                        break;
                    }
                    Err(e) => {
                        eprintln!("{e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    if config.shell.history.enabled {
        let _ = rl.save_history(&history_path);
    }

    Ok(())
}
