use std::env;
use std::fs;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use aifm_core::config::Config;
use aifm_core::FileEntry;
use aifm_core::JsonFileListing;
use aifm_core::ListingPersistence;
use aifm_core::MemoryListing;
use aifm_core::RuntimeAction;
use aifm_core::StoreMode;
use aifm_core::UserAction;
use aifm_core::ViewOverlay;
use aifm_core::ViewStateStore;
use aifm_exec::recognizer_from_config;
use aifm_exec::Backend;
use aifm_exec::ChatCompletionService;
use aifm_exec::HttpGateway;
use aifm_exec::IntentService;
use aifm_exec::RemoteExecutor;
use aifm_exec::RemoteGateway;
use aifm_exec::Session;
use tracing_subscriber::EnvFilter;

mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config: Option<PathBuf>,
    remote: bool,
    gateway: Option<String>,
    store: Option<PathBuf>,
    command: Option<String>,
    rest: Vec<String>,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args(env::args().skip(1).collect())?;
    let command = options.command.clone().unwrap_or_else(|| "tui".to_string());

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("aifm {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&options)?;
    init_tracing(command == "tui")?;
    tracing::info!(mode = config.mode.label(), command = %command, "starting");

    match command.as_str() {
        "tui" => {
            let mut session = build_session(&config)?;
            session.start();
            ui::run(session, recognizer_from_config(&config.speech))
        }
        "run" => {
            let utterance = options.rest.join(" ");
            if utterance.trim().is_empty() {
                return Err("run requires an utterance".into());
            }
            let mut session = build_session(&config)?;
            session.start();
            take_alert(&mut session);
            session.submit(&utterance);
            report(&mut session);
            Ok(())
        }
        "repl" => {
            let mut session = build_session(&config)?;
            session.start();
            repl(&mut session)
        }
        "ls" => {
            let mut session = build_session(&config)?;
            session.start();
            if let Some(path) = options.rest.first() {
                session.runtime(RuntimeAction::Navigate(path.clone()));
            }
            report(&mut session);
            Ok(())
        }
        "drives" => {
            let gateway = remote_gateway(&config, "drives")?;
            for drive in gateway.drives()? {
                print_entry(&drive.into_entry());
            }
            Ok(())
        }
        "special-folders" => {
            let gateway = remote_gateway(&config, "special-folders")?;
            let folders = gateway.special_folders()?;
            for (alias, path) in folders.entries() {
                println!("{alias:<10} {path}");
            }
            Ok(())
        }
        "recycle-bin" => {
            let gateway = remote_gateway(&config, "recycle-bin")?;
            let entries = gateway.recycle_bin()?;
            if entries.is_empty() {
                println!("recycle bin is empty");
            }
            for entry in entries {
                print_entry(&entry);
            }
            Ok(())
        }
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        if options.command.is_some() {
            options.rest.push(args[i].clone());
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--config requires a path".into());
                };
                options.config = Some(PathBuf::from(value));
                i += 2;
            }
            "--gateway" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--gateway requires a URL".into());
                };
                options.gateway = Some(value.clone());
                options.remote = true;
                i += 2;
            }
            "--store" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--store requires a path".into());
                };
                options.store = Some(PathBuf::from(value));
                i += 2;
            }
            "--remote" => {
                options.remote = true;
                i += 1;
            }
            other if other.starts_with("--") && !matches!(other, "--help" | "--version") => {
                return Err(format!("unsupported argument: {other}").into());
            }
            other => {
                options.command = Some(other.to_string());
                i += 1;
            }
        }
    }
    Ok(options)
}

fn load_config(options: &Options) -> Result<Config, Box<dyn std::error::Error>> {
    let path = options.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&path)?;
    if options.remote {
        config.mode = StoreMode::Remote;
    }
    if let Some(url) = &options.gateway {
        config.gateway.base_url = url.clone();
    }
    if let Some(store) = &options.store {
        config.storage.path = Some(store.clone());
    }
    Ok(config)
}

/// Line commands log to stderr; the TUI owns the terminal, so it logs to a
/// file next to the persisted collection.
fn init_tracing(to_file: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if to_file {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aifm");
        fs::create_dir_all(&dir)?;
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("aifm.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn build_session(config: &Config) -> Result<Session, Box<dyn std::error::Error>> {
    match config.mode {
        StoreMode::Virtual => {
            let persistence: Box<dyn ListingPersistence> =
                Box::new(JsonFileListing::open(config.storage.resolved_path())?);
            let store = ViewStateStore::open(StoreMode::Virtual, persistence)?;
            let intent = match ChatCompletionService::from_config(&config.intent) {
                Ok(service) => Some(Box::new(service) as Box<dyn IntentService>),
                Err(err) => {
                    tracing::warn!(error = %err, "intent service unavailable");
                    None
                }
            };
            Ok(Session::new(store, Backend::virtual_with(intent)))
        }
        StoreMode::Remote => {
            let store = ViewStateStore::open(StoreMode::Remote, Box::new(MemoryListing::new()))?;
            let gateway = HttpGateway::new(&config.gateway)?;
            tracing::info!(base_url = gateway.base_url(), "remote gateway");
            Ok(Session::new(
                store,
                Backend::Remote(RemoteExecutor::new(Box::new(gateway))),
            ))
        }
    }
}

fn remote_gateway(
    config: &Config,
    command: &str,
) -> Result<HttpGateway, Box<dyn std::error::Error>> {
    if config.mode != StoreMode::Remote {
        return Err(format!("{command} needs a remote gateway (pass --remote)").into());
    }
    Ok(HttpGateway::new(&config.gateway)?)
}

fn repl(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    take_alert(session);
    let stdin = io::stdin();
    loop {
        print!("aifm {}> ", session.state().cwd_label());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "ls" => {}
            "up" | ".." => {
                session.user(UserAction::NavigateUp);
            }
            "paste" => {
                session.user(UserAction::Paste);
            }
            _ => {
                if let Some(target) = line.strip_prefix("cd ") {
                    let target = target.trim();
                    if session.state().entry_named(target).is_some() {
                        session.user(UserAction::Open {
                            name: target.to_string(),
                        });
                    } else {
                        session.runtime(RuntimeAction::Navigate(target.to_string()));
                    }
                } else {
                    session.submit(line);
                }
            }
        }
        report(session);
    }
}

/// Prints the pending alert (if any) and the current listing.
fn report(session: &mut Session) {
    take_alert(session);
    let state = session.state();
    println!("{}", state.cwd_label());
    if state.listing.is_empty() {
        println!("  (empty)");
    }
    for entry in &state.listing {
        print_entry(entry);
    }
}

fn take_alert(session: &mut Session) {
    let message = match &session.state().interaction.overlay {
        ViewOverlay::Alert { message } => message.clone(),
        _ => return,
    };
    eprintln!("! {message}");
    session.user(UserAction::CloseOverlay);
}

fn print_entry(entry: &FileEntry) {
    println!(
        "  {:<7} {:>14}  {}",
        entry.kind.label(),
        entry.size,
        entry.name
    );
}

fn print_help() {
    println!("aifm {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  aifm [--config PATH] [--remote] [--gateway URL] [--store PATH] [COMMAND]");
    println!("Commands:");
    println!("  tui                    interactive file manager (default)");
    println!("  run UTTERANCE...       resolve and apply one command");
    println!("  repl                   line-oriented session");
    println!("  ls [PATH]              list a directory");
    println!("  drives                 list gateway drives");
    println!("  special-folders        list gateway folder aliases");
    println!("  recycle-bin            list the gateway recycle bin");
    println!("  help | version");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::parse_args;
    use super::Options;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_leave_command_unset() {
        assert_eq!(parse_args(Vec::new()).expect("parse"), Options::default());
    }

    #[test]
    fn flags_before_command_and_utterance_after() {
        let options = parse_args(args(&[
            "--store",
            "/tmp/files.json",
            "--gateway",
            "https://gw/api",
            "run",
            "move",
            "a.txt",
            "--to-docs",
        ]))
        .expect("parse");
        assert_eq!(
            options,
            Options {
                config: None,
                remote: true,
                gateway: Some("https://gw/api".to_string()),
                store: Some(PathBuf::from("/tmp/files.json")),
                command: Some("run".to_string()),
                rest: args(&["move", "a.txt", "--to-docs"]),
            }
        );
    }

    #[test]
    fn missing_flag_value_is_an_error() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--bogus", "ls"])).is_err());
    }
}
