use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};

use crate::core::chatlog::watcher::ChatlogWatcher;
use crate::core::config::ConfigManager;
use crate::core::plugin::{PluginOutput, ReminderPlugin};

/// Watch a chat log and remind you when your next slayer task is a Konar milestone.
#[derive(Debug, Parser)]
#[command(name = "konar-reminder", version, about)]
pub struct Cli {
    /// Chat log file to follow
    pub chatlog: PathBuf,
    /// Directory holding settings.json
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
    /// Process lines already in the log instead of only new ones
    #[arg(long)]
    pub from_start: bool,
    /// Read the log once and exit instead of following it
    #[arg(long)]
    pub once: bool,
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 250)]
    pub poll_ms: u64,
}

/// Entry point for the binary. Returns the process exit code.
pub fn run() -> i32 {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(cli.config_dir.clone());
    let settings = match config_manager.load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid settings {}: {}", config_manager.path().display(), e);
            return 2;
        }
    };

    let mut plugin = match ReminderPlugin::new(settings) {
        Ok(plugin) => plugin,
        Err(e) => {
            error!("Invalid settings: {}", e);
            return 2;
        }
    };

    let watcher = if cli.from_start || cli.once {
        ChatlogWatcher::from_start(&cli.chatlog)
    } else {
        ChatlogWatcher::new(&cli.chatlog)
    };
    let mut watcher = match watcher {
        Ok(watcher) => watcher,
        Err(e) => {
            error!("Cannot open chat log {}: {}", cli.chatlog.display(), e);
            return 1;
        }
    };

    info!(
        "Watching {} for task streaks (milestone every {} tasks)",
        watcher.path().display(),
        plugin.settings().multiple
    );

    let poll = Duration::from_millis(cli.poll_ms);
    loop {
        match watcher.read_events() {
            Ok(events) => {
                for event in events {
                    // No NPC roster outside the game client
                    let output = plugin.on_chat_message(&event, &[]);
                    report(&output);
                }
            }
            Err(e) => warn!("Error reading chat log: {}", e),
        }

        if cli.once {
            return 0;
        }
        thread::sleep(poll);
    }
}

fn report(output: &PluginOutput) {
    if let Some(reminder) = &output.reminder {
        println!("{}", reminder);
    }
    if let Some(highlights) = &output.highlights {
        info!("{} NPC(s) highlighted", highlights.len());
    }
}
