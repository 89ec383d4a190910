use clap::Parser;
use colored::*;
use std::path::PathBuf;
use wplimits::api::{CmdMessage, MemoryLimitsApi, MessageLevel, StatusReport};
use wplimits::conflict::EnvLiveValues;
use wplimits::error::Result;
use wplimits::handler::ConfigHandler;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let api = init_api(&cli)?;

    match cli.command {
        Some(Commands::Status { json }) => handle_status(&api, json),
        Some(Commands::Set {
            memory_limit,
            max_memory_limit,
        }) => handle_set(&api, &memory_limit, &max_memory_limit),
        Some(Commands::Path) => {
            println!("{}", api.handler().config_path().display());
            Ok(())
        }
        Some(Commands::Backups { prune }) => handle_backups(&api, prune),
        None => handle_status(&api, false),
    }
}

fn init_api(cli: &Cli) -> Result<MemoryLimitsApi<EnvLiveValues>> {
    let handler = match &cli.config {
        Some(path) => ConfigHandler::at_path(path.clone()),
        None => {
            let base = cli
                .base
                .clone()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."));
            ConfigHandler::locate(&base)?
        }
    };
    Ok(MemoryLimitsApi::new(handler, EnvLiveValues))
}

fn handle_status(api: &MemoryLimitsApi<EnvLiveValues>, json: bool) -> Result<()> {
    let report = api.status()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_status(&report);
    }
    Ok(())
}

fn handle_set(api: &MemoryLimitsApi<EnvLiveValues>, memory: &str, max: &str) -> Result<()> {
    let result = api.set_limits(memory, max)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backups(api: &MemoryLimitsApi<EnvLiveValues>, prune: bool) -> Result<()> {
    if prune {
        let result = api.prune_backups()?;
        print_messages(&result.messages);
        return Ok(());
    }

    let backups = api.backups()?;
    if backups.is_empty() {
        println!("No backups found.");
        return Ok(());
    }
    for backup in backups {
        println!("{}", backup.display());
    }
    Ok(())
}

fn print_status(report: &StatusReport) {
    println!("{}", "wp-config.php".bold());
    println!("  path:        {}", report.config_path.display());
    println!(
        "  writable:    {}",
        if report.writable {
            "yes".green()
        } else {
            "no".red()
        }
    );
    if let Some(perms) = &report.permissions {
        println!("  permissions: {perms}");
    }

    println!("\n{}", "Memory limits".bold());
    print_value_row("WP_MEMORY_LIMIT", &report.file_values.memory_limit, &report.live_memory_limit);
    print_value_row(
        "WP_MAX_MEMORY_LIMIT",
        &report.file_values.max_memory_limit,
        &report.live_max_memory_limit,
    );

    if !report.conflicts.is_empty() {
        println!("\n{}", "Conflicts".bold());
        for finding in &report.conflicts {
            println!("  {} {}", "!".yellow(), finding.detail);
        }
    }

    if !report.backups.is_empty() {
        println!("\n{} {}", "Backups:".bold(), report.backups.len());
    }
}

fn print_value_row(name: &str, file_value: &Option<String>, live_value: &Option<String>) {
    let file = file_value.as_deref().unwrap_or("(not set)");
    let live = live_value.as_deref().unwrap_or("(unknown)");
    println!("  {name:<22} file: {file:<8} live: {live}");
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}
