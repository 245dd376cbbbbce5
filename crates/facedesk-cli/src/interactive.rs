//! Line-driven console session on stdin.

use crate::config::Config;
use crate::views::{
    PromptPicker, TerminalFaceList, TerminalModelList, TerminalNavigation, TerminalResult,
    TerminalSelector, TerminalSurface, TerminalToast,
};
use anyhow::Result;
use facedesk_core::{ApiClient, Console, ConsoleViews, Panel, UploadFile, ZoneViews};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  panel <models|faces|verify>  switch panel
  enter | leave                drag files over / away from the drop zone
  drop <FILE>...               drop files on the active panel
  click                        open the active panel's file picker
  pick <FILE>...               choose files in the picker
  name <TEXT>                  set the person name for registration
  select <PERSON>              choose the person to verify against
  help | quit";

#[derive(Debug, PartialEq)]
enum Command {
    Panel(Panel),
    Enter,
    Leave,
    Drop(Vec<PathBuf>),
    Click,
    Pick(Vec<PathBuf>),
    Name(String),
    Select(String),
    Help,
    Quit,
    Nothing,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let paths = || rest.split_whitespace().map(PathBuf::from).collect::<Vec<_>>();

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Nothing),
            "panel" => rest.parse().map(Command::Panel).map_err(|e| format!("{e}")),
            "enter" => Ok(Command::Enter),
            "leave" => Ok(Command::Leave),
            "drop" => Ok(Command::Drop(paths())),
            "click" => Ok(Command::Click),
            "pick" => Ok(Command::Pick(paths())),
            "name" => Ok(Command::Name(rest.to_string())),
            "select" if !rest.is_empty() => Ok(Command::Select(rest.to_string())),
            "select" => Err("usage: select <PERSON>".into()),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

fn zone(panel: Panel) -> ZoneViews {
    ZoneViews {
        surface: Arc::new(TerminalSurface { panel }),
        picker: Box::new(PromptPicker { panel }),
    }
}

pub async fn run(api: Arc<dyn ApiClient>, config: &Config) -> Result<()> {
    let views = ConsoleViews {
        toast: Arc::new(TerminalToast),
        navigation: Arc::new(TerminalNavigation),
        models: Arc::new(TerminalModelList),
        faces: Arc::new(TerminalFaceList),
        selector: Arc::new(TerminalSelector { echo: true }),
        result: Arc::new(TerminalResult),
        model_zone: zone(Panel::Models),
        face_zone: zone(Panel::Faces),
        verify_zone: zone(Panel::Verify),
    };
    let mut console = Console::start(api, views, config.console_settings());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&mut console, command).await,
            Err(message) => println!("{message}"),
        }
    }

    console.settle().await;
    Ok(())
}

async fn execute(console: &mut Console, command: Command) {
    let panel = console.active_panel();
    match command {
        Command::Panel(target) => console.navigate(target),
        Command::Enter => console.zone_mut(panel).drag_enter(),
        Command::Leave => console.zone_mut(panel).drag_leave(),
        Command::Drop(paths) => {
            let files = read_all(&paths).await;
            console.zone_mut(panel).drop_files(files);
        }
        Command::Click => console.zone_mut(panel).click(),
        Command::Pick(paths) => {
            let files = read_all(&paths).await;
            console.zone_mut(panel).picker_changed(files);
        }
        Command::Name(name) => console.name_field().set(name),
        Command::Select(person) => {
            if !console.selector().select(&person) {
                println!("not a registered person: {person}");
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit | Command::Nothing => {}
    }
}

/// Read every path, reporting and skipping unreadable ones.
async fn read_all(paths: &[PathBuf]) -> Vec<UploadFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match UploadFile::read(path).await {
            Ok(file) => files.push(file),
            Err(e) => println!("cannot read {}: {e}", path.display()),
        }
    }
    files
}
