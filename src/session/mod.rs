use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use crate::controller::{ControllerEvent, FetchController};
use crate::fetcher::FetchOptions;
use crate::output;
use crate::records::{NameDisplay, RecordDraft, UserRecord};
use crate::store::RecordStore;

// explicit two-state toggle for the record dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    View,
    Edit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Count(String),
    Show(usize),
    Edit(usize),
    Delete(usize),
    List,
    Help,
    Quit,
}

pub struct CommandParser {
    indexed: Regex,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            indexed: Regex::new(r"^(?i)(show|view|edit|delete|del)\s+(\d+)$").unwrap(),
        }
    }

    pub fn parse(&self, line: &str) -> Command {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if let Some(caps) = self.indexed.captures(line) {
            let index: usize = match caps[2].parse() {
                Ok(index) => index,
                Err(_) => return Command::Count(line.to_string()),
            };
            return match caps[1].to_lowercase().as_str() {
                "show" | "view" => Command::Show(index),
                "edit" => Command::Edit(index),
                _ => Command::Delete(index),
            };
        }
        match line.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            // anything else is treated as a count input and validated by
            // the controller
            _ => Command::Count(line.to_string()),
        }
    }
}

pub struct Session {
    controller: FetchController,
    events: mpsc::UnboundedReceiver<ControllerEvent>,
    store: RecordStore,
    name_display: NameDisplay,
    debounce: Duration,
    mode: Mode,
    spinner: Option<ProgressBar>,
}

fn kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn render_view_mode(record: &UserRecord) {
    kv_line("Name", &record.full_name());
    kv_line("Gender", &record.gender_label());
    kv_line("Address", &record.postal_address());
    kv_line("Email", &record.email);
    kv_line("Phone", &record.phone);
    if !record.cell.is_empty() {
        kv_line("Cell", &record.cell);
    }
    if !record.picture.large.is_empty() {
        kv_line("Picture", &record.picture.large);
    }
}

fn render_edit_mode(record: &UserRecord) {
    println!(
        "{} {}",
        "editing record ::".bold().white(),
        record.full_name().bold().blue()
    );
    println!("press enter to keep the current value");
}

fn print_help() {
    println!("commands:");
    println!("  <count>      fetch that many records (0-1000, 0 clears, debounced)");
    println!("  list         re-render the table");
    println!("  show <n>     view one record");
    println!("  edit <n>     edit name, email, phone, and address");
    println!("  delete <n>   remove a record from the table");
    println!("  quit         leave the session");
}

impl Session {
    pub fn new(
        options: FetchOptions,
        name_display: NameDisplay,
        debounce: Duration,
    ) -> Result<Self, String> {
        let (controller, events) =
            FetchController::new(options).map_err(|e| e.to_string())?;
        Ok(Self {
            controller,
            events,
            store: RecordStore::new(),
            name_display,
            debounce,
            mode: Mode::View,
            spinner: None,
        })
    }

    pub async fn run(mut self, initial_count: Option<u32>) -> Result<(), String> {
        let parser = CommandParser::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!(
            "{} {}",
            "interactive session ::".bold().white(),
            "type a count, or 'help' for commands".white()
        );
        if let Some(count) = initial_count {
            self.controller.request_records(count).await;
        }
        self.prompt();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line {
                        Ok(Some(line)) => line,
                        Ok(None) => break,
                        Err(e) => return Err(format!("failed to read input: {e}")),
                    };
                    match parser.parse(&line) {
                        Command::Empty => {}
                        Command::Quit => break,
                        Command::Help => print_help(),
                        Command::List => self.render_table(),
                        Command::Show(index) => self.show(index),
                        Command::Edit(index) => self.edit(index, &mut lines).await,
                        Command::Delete(index) => self.delete(index),
                        Command::Count(raw) => {
                            // a new input supersedes whatever was pending
                            self.stop_spinner();
                            self.controller.on_input_changed(&raw, self.debounce);
                        }
                    }
                    self.prompt();
                }
                event = self.events.recv() => {
                    let Some(event) = event else { break };
                    self.apply_event(event);
                }
            }
        }

        self.stop_spinner();
        Ok(())
    }

    fn apply_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::LoadingStarted => self.start_spinner(),
            ControllerEvent::LoadingFinished => self.stop_spinner(),
            ControllerEvent::Loaded(records) => {
                self.store.replace(records);
                self.render_table();
                self.prompt();
            }
            ControllerEvent::Cleared => {
                self.store.clear();
                println!("{}", "table cleared".white());
                self.prompt();
            }
            ControllerEvent::Failed(err) => {
                self.stop_spinner();
                println!(
                    "{}{}{} {}",
                    "[".bold().white(),
                    "ERR".bold().red(),
                    "]".bold().white(),
                    err.to_string().white()
                );
                self.prompt();
            }
        }
    }

    fn render_table(&self) {
        if self.store.is_empty() {
            println!("{}", "no records loaded".white());
            return;
        }
        print!(
            "{}",
            output::render_table(self.store.records(), self.name_display)
        );
    }

    fn show(&mut self, index: usize) {
        match self.store.get(index) {
            Ok(record) => {
                self.mode = Mode::View;
                render_view_mode(record);
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    async fn edit(&mut self, index: usize, lines: &mut Lines<BufReader<Stdin>>) {
        let record = match self.store.get(index) {
            Ok(record) => record.clone(),
            Err(e) => {
                println!("{}", e.to_string().red());
                return;
            }
        };

        self.mode = Mode::Edit;
        render_edit_mode(&record);

        let mut draft = RecordDraft::default();
        let fields: [(&str, String, &mut String); 4] = [
            ("name", record.full_name(), &mut draft.name),
            ("email", record.email.clone(), &mut draft.email),
            ("phone", record.phone.clone(), &mut draft.phone),
            ("address", record.postal_address(), &mut draft.address),
        ];
        for (label, current, slot) in fields {
            print!("  {label} [{current}]: ");
            let _ = std::io::stdout().flush();
            match lines.next_line().await {
                Ok(Some(value)) => *slot = value,
                Ok(None) | Err(_) => break,
            }
        }

        match self.store.apply(index, &draft) {
            Ok(record) => {
                println!(
                    "{} {}",
                    "saved ::".bold().green(),
                    record.full_name().bold().blue()
                );
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
        self.mode = Mode::View;
        self.render_table();
    }

    fn delete(&mut self, index: usize) {
        match self.store.delete(index) {
            Ok(removed) => {
                println!(
                    "{} {}",
                    "deleted ::".bold().green(),
                    removed.full_name().bold().blue()
                );
                self.render_table();
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    fn start_spinner(&mut self) {
        if self.spinner.is_some() {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("fetching records...");
        self.spinner = Some(pb);
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn prompt(&self) {
        if self.mode != Mode::View {
            return;
        }
        print!("userfetch> ");
        let _ = std::io::stdout().flush();
    }
}
