use std::process::ExitCode;

use cinescope_lib::settings::{self, SettingsFile};
use cinescope_lib::Overrides;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Show every connection setting and its source.
pub(crate) fn run_config_show(overrides: &Overrides) -> ExitCode {
    let path = settings::settings_path();

    println!(
        "{}",
        "cinescope configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    if path.exists() {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();

    let file = match SettingsFile::load(&path) {
        Ok(f) => f,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for report in settings::describe(overrides, |name| std::env::var(name).ok(), &file) {
        let label = format!("{}:", report.name);
        match report.value {
            Some(sourced) => {
                let source = format!("({})", sourced.source);
                println!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    sourced.value,
                    source.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                println!(
                    "  {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
    }
    ExitCode::SUCCESS
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> ExitCode {
    println!("{}", settings::settings_path().display());
    ExitCode::SUCCESS
}
