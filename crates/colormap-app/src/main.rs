//! Colormap builder command-line entry point.
//!
//! Reads one command per line from stdin, applies it to the colormap session
//! and prints the resulting color bar and status.

mod commands;

use colormap_core::{
    Action, ColormapConfig, ColormapSession, FileStorage, MemoryStorage, PALETTE, Response,
    Storage, resolve,
};
use commands::{Command, HELP};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

fn main() {
    env_logger::init();
    log::info!("Starting colormap builder");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match ColormapConfig::discover(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let storage = match &config.storage_dir {
        Some(dir) => FileStorage::new(dir.clone()),
        None => FileStorage::default_location(),
    };
    match storage {
        Ok(storage) => {
            log::info!("Saving colormaps to {}", storage.base_path().display());
            run(ColormapSession::new(config, Arc::new(storage)));
        }
        Err(e) => {
            log::warn!("{}; saved colormaps will not outlive this process", e);
            run(ColormapSession::new(config, Arc::new(MemoryStorage::new())));
        }
    }
}

fn run<S: Storage>(mut session: ColormapSession<S>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let bar_width = session.config().bar_width;
    print_response(&mut stdout, &session.apply(Action::Refresh), bar_width);
    prompt(&mut stdout);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        match commands::parse(&line) {
            Ok(Command::Action(action)) => {
                let response = session.apply(action);
                print_response(&mut stdout, &response, bar_width);
            }
            Ok(Command::Colors) => print_palette(&mut stdout),
            Ok(Command::Help) => print_help(&mut stdout),
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Err(e) => {
                let _ = writeln!(stdout, "{}", e);
            }
        }
        prompt(&mut stdout);
    }

    log::info!("Exiting");
}

fn prompt(out: &mut impl Write) {
    let _ = write!(out, "> ");
    let _ = out.flush();
}

fn print_response(out: &mut impl Write, response: &Response, bar_width: usize) {
    let _ = writeln!(out, "{}", response.bar.to_ansi(bar_width));
    for line in &response.info {
        let _ = writeln!(out, "  {}", line);
    }
    if !response.saved.is_empty() {
        let _ = writeln!(out, "Saved: {}", response.saved.join(", "));
    }
    if !response.status.is_empty() {
        let marker = if response.ok { "ok" } else { "error" };
        let _ = writeln!(out, "[{}] {}", marker, response.status);
    }
}

fn print_palette(out: &mut impl Write) {
    for entry in PALETTE {
        let rgba = resolve(&entry.color_ref());
        let _ = writeln!(
            out,
            "\x1b[48;2;{};{};{}m   \x1b[0m {:<8} {}",
            rgba.r,
            rgba.g,
            rgba.b,
            entry.label,
            rgba.to_hex()
        );
    }
    let _ = writeln!(out, "Any CSS color name or #hex value is accepted.");
}

fn print_help(out: &mut impl Write) {
    for (usage, description) in HELP {
        let _ = writeln!(out, "  {:<26} {}", usage, description);
    }
}
