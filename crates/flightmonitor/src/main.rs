//! `flimon` - CLI for flightmonitor
//!
//! This binary records flight instrument readings and renders the history.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use flightmonitor::cli::{
    Cli, Command, ConfigCommand, ListCommand, OutputFormat, ShowCommand, SubmitCommand,
};
use flightmonitor::{
    init_logging, project, Candidate, Config, Error, ReadingStore, Recorder, Renderer,
    SqliteStore, View,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Rejected readings get a per-field report instead of an error chain
            if let Some(errors) = err
                .downcast_ref::<Error>()
                .and_then(Error::validation_errors)
            {
                eprintln!("Reading rejected:");
                for e in errors {
                    eprintln!("  {e}");
                }
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Submit(cmd) => handle_submit(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_recorder(config: &Config) -> anyhow::Result<Recorder<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening reading store at {}", path.display()))?;
    Ok(Recorder::new(store).with_retention(config.storage.max_readings))
}

fn handle_submit(config: &Config, cmd: &SubmitCommand) -> anyhow::Result<()> {
    let candidate = match (&cmd.body, cmd.flag_candidate()) {
        (Some(body), _) => {
            serde_json::from_str::<Candidate>(body).context("parsing --body as JSON")?
        }
        (None, Some(candidate)) => candidate,
        (None, None) => anyhow::bail!("no reading given"),
    };
    debug!("Submitting {:?}", candidate);

    let recorder = open_recorder(config)?;
    // Validation errors pass through untouched so main can report them per field
    let reading = recorder.submit(&candidate)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!("Recorded reading #{}", reading.sequence());
        println!("{}", Renderer::from_config(&config.display).text(&reading));
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let recorder = open_recorder(config)?;
    let newest_first = cmd.newest_first_or(config.display.newest_first);
    let mut history = recorder.list_all()?;

    match cmd.format {
        OutputFormat::Json => {
            if newest_first {
                history.reverse();
            }
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        OutputFormat::Table => {
            let renderer = Renderer::from_config(&config.display).newest_first(newest_first);
            println!("{}", renderer.table(&history));
        }
        OutputFormat::Plain => {
            if newest_first {
                history.reverse();
            }
            for r in &history {
                println!(
                    "#{} altitude={} his={} adi={} recorded_at={}",
                    r.sequence(),
                    r.altitude(),
                    r.heading(),
                    r.attitude(),
                    r.recorded_at().to_rfc3339()
                );
            }
        }
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let recorder = open_recorder(config)?;
    let current = match cmd.position {
        Some(position) => {
            let reading = recorder.get(position)?;
            if reading.is_none() {
                warn!("No reading at position {}", position);
                anyhow::bail!("no reading at position {position}");
            }
            reading
        }
        None => recorder.latest()?,
    };

    if cmd.json {
        let value = match &current {
            Some(reading) => serde_json::json!({
                "reading": reading,
                "visual": project(reading),
            }),
            None => serde_json::Value::Null,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let view = cmd.view.unwrap_or(config.display.default_view);
    let history = if view == View::Table {
        recorder.list_all()?
    } else {
        Vec::new()
    };
    let out = Renderer::from_config(&config.display).render(view, &history, current.as_ref());
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let recorder = open_recorder(config)?;
    let stats = recorder.store().stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "max_readings": config.storage.max_readings,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let fmt_time = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map_or_else(|| "-".to_string(), |t| t.to_rfc3339())
        };
        println!("flimon status");
        println!("-------------");
        println!("Database:      {}", config.database_path().display());
        println!("Readings:      {}", stats.total_readings);
        println!(
            "Last position: {}",
            stats
                .last_sequence
                .map_or_else(|| "-".to_string(), |s| s.to_string())
        );
        println!("First:         {}", fmt_time(stats.first_recorded));
        println!("Last:          {}", fmt_time(stats.last_recorded));
        println!("Size:          {} bytes", stats.db_size_bytes);
        match config.max_readings() {
            Some(n) => println!("Retention:     {n} readings"),
            None => println!("Retention:     unlimited"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Max readings:       {}", config.storage.max_readings);
                println!();
                println!("[Display]");
                println!("  Default view:       {:?}", config.display.default_view);
                println!("  Gauge height:       {}", config.display.gauge_height);
                println!("  Newest first:       {}", config.display.newest_first);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration error in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "flimon_{name}_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_config_validate_accepts_good_file() {
        let path = temp_config("good", "[display]\ngauge_height = 5\n");
        let cmd = ConfigCommand::Validate {
            file: Some(path.clone()),
        };

        assert!(handle_config(&Config::default(), cmd).is_ok());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_validate_fails_on_bad_file() {
        let path = temp_config("bad", "[display]\ngauge_height = 0\n");
        let cmd = ConfigCommand::Validate {
            file: Some(path.clone()),
        };

        let err = handle_config(&Config::default(), cmd).unwrap_err();
        assert!(err.to_string().contains("configuration error"));
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ConfigValidation { .. })
        ));
        let _ = std::fs::remove_file(&path);
    }
}
