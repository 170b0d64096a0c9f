use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use iniq_core::{Information, Parser as SettingsParser, Result};

mod args;
use args::{Cli, Commands, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        handle_completions(shell);
        return ExitCode::SUCCESS;
    }

    let Some(file) = resolve_file(cli.file) else {
        eprintln!(
            "{} no settings file given (use --file or $INIQ_FILE)",
            "[ERROR]".red().bold()
        );
        return ExitCode::FAILURE;
    };

    let result = match cli.command {
        Commands::Get { category, key } => handle_get(&file, &category, &key),
        Commands::List { category } => handle_list(&file, &category),
        Commands::Categories { fragment } => handle_categories(&file, fragment.as_deref()),
        Commands::Set {
            category,
            key,
            value,
        } => handle_set(&file, &category, &key, &value, cli.quiet),
        Commands::Delete { category, key } => handle_delete(&file, &category, &key, cli.quiet),
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn resolve_file(cli_file: Option<PathBuf>) -> Option<PathBuf> {
    if cli_file.is_some() {
        return cli_file;
    }
    std::env::var("INIQ_FILE").ok().map(PathBuf::from)
}

/// The core parser takes a (directory, file name) pair with the
/// separator kept on the directory side.
fn open_parser(file: &Path) -> Result<SettingsParser> {
    let directory = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            format!("{}/", parent.display())
        }
        _ => String::new(),
    };
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    SettingsParser::new(directory, file_name)
}

fn handle_get(file: &Path, category: &str, key: &str) -> Result<()> {
    let parser = open_parser(file)?;
    let info = Information::new(&parser)?;
    println!("{}", info.get_setting(category, key));
    Ok(())
}

fn handle_list(file: &Path, category: &str) -> Result<()> {
    let parser = open_parser(file)?;
    let info = Information::new(&parser)?;
    for value in info.get_settings(category) {
        println!("{value}");
    }
    Ok(())
}

fn handle_categories(file: &Path, fragment: Option<&str>) -> Result<()> {
    let parser = open_parser(file)?;
    let info = Information::new(&parser)?;
    let names = match fragment {
        Some(fragment) => info.get_categories_matching(fragment),
        None => info.get_categories(),
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn handle_set(file: &Path, category: &str, key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut parser = open_parser(file)?;
    let inserted = parser.write_new_setting(category, key, value)?;

    if inserted {
        if !quiet {
            println!("{} {category}: {key}={value}", "[OK]".green().bold());
        }
    } else if !quiet {
        println!(
            "{} {category}: {key} not written (existing key with that prefix, or no such category)",
            "[SKIP]".yellow().bold()
        );
    }
    Ok(())
}

fn handle_delete(file: &Path, category: &str, key: &str, quiet: bool) -> Result<()> {
    let mut parser = open_parser(file)?;
    let removed = parser.delete_setting(category, key)?;

    if removed {
        if !quiet {
            println!("{} {category}: {key} removed", "[OK]".green().bold());
        }
    } else if !quiet {
        println!("{} {category}: {key} not found", "[SKIP]".yellow().bold());
    }
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    clap_complete::generate(shell, &mut cmd, "iniq", &mut io::stdout());
}
