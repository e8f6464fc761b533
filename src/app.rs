use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{ControllerEvent, FetchController};
use crate::fetcher::{FetchOptions, DEFAULT_API_URL};
use crate::output;
use crate::records::NameDisplay;
use crate::session::Session;

fn print_banner() {
    const BANNER: &str = r#"
                         ____     __       __
  __  __________  ______/ __/__  / /______/ /_
 / / / / ___/ _ \/ ___/ /_  / _ \/ __/ ___/ __ \
/ /_/ (__  )  __/ /  / __/ /  __/ /_/ /__/ / / /
\__,_/____/\___/_/  /_/    \___/\__/\___/_/ /_/

      v0.4.1 - random-user fetching tool
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    count: u32,
    nationalities: Vec<String>,
    name_display: NameDisplay,
    seed: Option<String>,
    timeout: u64,
    debounce_ms: u64,
    api_url: String,
    proxy: Option<String>,
    interactive: bool,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let count = args.count.or(cfg.count).unwrap_or(10);
    if count > crate::utils::MAX_RESULT_COUNT {
        return Err(format!(
            "invalid count {count}, expected 0-{}",
            crate::utils::MAX_RESULT_COUNT
        ));
    }

    let nat_raw = args.nat.or(cfg.nationalities).unwrap_or_default();
    let nationalities = if nat_raw.trim().is_empty() {
        Vec::new()
    } else {
        crate::utils::parse_nat_csv(&nat_raw)
            .map_err(|e| format!("invalid nationalities '{nat_raw}': {e}"))?
    };

    let name_display_raw = args
        .name_display
        .or(cfg.name_display)
        .unwrap_or_else(|| "first".to_string());
    let name_display = NameDisplay::parse(&name_display_raw).ok_or_else(|| {
        format!("invalid name-display '{name_display_raw}', expected first, last, or full")
    })?;

    let seed = args.seed.or(cfg.seed).filter(|s| !s.trim().is_empty());

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let debounce_ms = args.debounce_ms.or(cfg.debounce_ms).unwrap_or(1500);

    let api_url = args
        .api_url
        .or(cfg.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let interactive = args.interactive || cfg.interactive.unwrap_or(false);

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    if let Some(raw) = output_format.as_deref() {
        if output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid output-format '{raw}', expected text, json, csv, or html"
            ));
        }
    }

    Ok(RunConfig {
        count,
        nationalities,
        name_display,
        seed,
        timeout,
        debounce_ms,
        api_url,
        proxy,
        interactive,
        output,
        output_format,
        no_color,
    })
}

fn fetch_options(run: &RunConfig) -> FetchOptions {
    FetchOptions {
        api_url: run.api_url.clone(),
        nationalities: run.nationalities.clone(),
        seed: run.seed.clone(),
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    let nat_summary = if run.nationalities.is_empty() {
        "any".to_string()
    } else {
        run.nationalities.join(",")
    };
    format_kv_line(
        "Fetch",
        &format!(
            "count={} nat={} names={} seed={}",
            run.count,
            nat_summary,
            match run.name_display {
                NameDisplay::First => "first",
                NameDisplay::Last => "last",
                NameDisplay::Full => "full",
            },
            run.seed.as_deref().unwrap_or("none"),
        ),
    );
    format_kv_line(
        "HTTP",
        &format!(
            "timeout={}s proxy={} api={}",
            run.timeout,
            if run.proxy.is_some() { "on" } else { "off" },
            run.api_url,
        ),
    );
    format_kv_line(
        "Session",
        &format!(
            "interactive={} debounce={}ms",
            format_bool(run.interactive),
            run.debounce_ms
        ),
    );
    println!();

    if run.interactive {
        let session = Session::new(
            fetch_options(&run),
            run.name_display,
            Duration::from_millis(run.debounce_ms),
        )?;
        return session.run(Some(run.count)).await;
    }

    let now = Instant::now();
    let (controller, mut events) =
        FetchController::new(fetch_options(&run)).map_err(|e| e.to_string())?;
    controller.request_records(run.count).await;
    drop(controller);

    let mut records = Vec::new();
    let mut cleared = false;
    let mut spinner: Option<indicatif::ProgressBar> = None;
    while let Some(event) = events.recv().await {
        match event {
            ControllerEvent::LoadingStarted => {
                let pb = indicatif::ProgressBar::new_spinner();
                pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                pb.enable_steady_tick(Duration::from_millis(120));
                pb.set_message("fetching records...");
                spinner = Some(pb);
            }
            ControllerEvent::LoadingFinished => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
            ControllerEvent::Loaded(batch) => records = batch,
            ControllerEvent::Cleared => cleared = true,
            ControllerEvent::Failed(err) => return Err(err.to_string()),
        }
    }

    if cleared {
        println!("no records requested (count=0)");
        return Ok(());
    }

    print!("{}", output::render_table(&records, run.name_display));

    if let Some(outfile_path) = run.output.as_ref() {
        let output_format = run
            .output_format
            .as_deref()
            .and_then(output::OutputFormat::parse)
            .or_else(|| output::infer_format_from_path(outfile_path))
            .unwrap_or(output::OutputFormat::Text);

        let rows = output::build_records(&records);
        let rendered = match output_format {
            output::OutputFormat::Text => output::render_text(&rows),
            output::OutputFormat::Json => output::render_json(&rows),
            output::OutputFormat::Csv => output::render_csv(&rows),
            output::OutputFormat::Html => output::render_html(&rows),
        };

        let mut outfile = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(outfile_path)
            .await
            .map_err(|e| format!("failed to open output file: {e}"))?;
        outfile
            .write_all(&rendered)
            .await
            .map_err(|_| "failed to write output file".to_string())?;
    }

    let elapsed_time = now.elapsed();

    println!();
    println!(
        ":: Completed :: fetched {} records in {}ms ::",
        records.len(),
        elapsed_time.as_millis()
    );

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = match args.config.clone() {
        Some(path) => {
            let path = config::expand_tilde(&path);
            config::load_config(&path, false)?
        }
        None => match config::default_config_path() {
            Some(path) => {
                config::ensure_default_config_file(&path)?;
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let args = CliArgs::parse_from(["userfetch"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.count, 10);
        assert_eq!(run.timeout, 10);
        assert_eq!(run.debounce_ms, 1500);
        assert_eq!(run.api_url, DEFAULT_API_URL);
        assert_eq!(run.name_display, NameDisplay::First);
        assert!(!run.interactive);
    }

    #[test]
    fn cli_values_override_config_values() {
        let args = CliArgs::parse_from(["userfetch", "-c", "25", "-T", "5"]);
        let cfg = ConfigFile {
            count: Some(100),
            timeout: Some(30),
            debounce_ms: Some(500),
            ..Default::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.count, 25);
        assert_eq!(run.timeout, 5);
        assert_eq!(run.debounce_ms, 500);
    }

    #[test]
    fn config_nationalities_are_parsed_and_canonicalized() {
        let args = CliArgs::parse_from(["userfetch"]);
        let cfg = ConfigFile {
            nationalities: Some("us, gb".to_string()),
            ..Default::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.nationalities, vec!["US".to_string(), "GB".to_string()]);
    }

    #[test]
    fn bad_config_name_display_is_rejected() {
        let args = CliArgs::parse_from(["userfetch"]);
        let cfg = ConfigFile {
            name_display: Some("middle".to_string()),
            ..Default::default()
        };
        assert!(build_run_config(args, cfg).is_err());
    }

    #[test]
    fn zero_config_timeout_is_rejected() {
        let args = CliArgs::parse_from(["userfetch"]);
        let cfg = ConfigFile {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(build_run_config(args, cfg).is_err());
    }
}
