use anyhow::{Context, Result};
use log::{error, info, warn};
use std::io::{self, BufRead, Write};

mod commands;
mod documents;
mod game;
mod output;
mod settings;
mod storage;

use crate::commands::Command;
use crate::documents::viewer::PdfFileLoader;
use crate::documents::Catalog;
use crate::game::quiz::definition::QuestionBank;
use crate::game::Game;
use crate::output::console::ConsoleOutput;
use crate::output::{Message, Output};
use crate::settings::Settings;
use crate::storage::{FileStore, MemoryStore, ProgressStore};

fn open_store(settings: &Settings) -> Result<Box<dyn ProgressStore>> {
    if settings.ephemeral {
        info!("Progress will not be kept after exit");
        return Ok(Box::new(MemoryStore::new()));
    }
    let directory = settings.resolve_data_dir()?;
    info!("Saving progress under {:?}", directory);
    Ok(Box::new(FileStore::new(directory)))
}

fn load_bank(settings: &Settings, output: &ConsoleOutput) -> QuestionBank {
    match QuestionBank::open(&settings.bank_path) {
        Ok(bank) => {
            if bank.is_empty() {
                warn!("Question bank {:?} has no modules", settings.bank_path);
            }
            output.say(&Message::QuestionBankLoaded(bank.len()));
            bank
        }
        Err(e) => {
            error!("Error loading quiz data: {:#}", e);
            output.say(&Message::CommandFailed(
                "Could not load the question bank. Please try again later.".into(),
            ));
            QuestionBank::default()
        }
    }
}

fn load_catalog(settings: &Settings) -> Result<Catalog> {
    match &settings.documents_path {
        Some(path) => Catalog::open(path),
        None => Ok(Catalog::default()),
    }
}

fn run() -> Result<()> {
    let settings = Settings::from_env().context("Invalid configuration")?;
    let output = ConsoleOutput::new();

    let store = open_store(&settings)?;
    let bank = load_bank(&settings, &output);
    let catalog = load_catalog(&settings)?;
    let loader = PdfFileLoader::new(settings.documents_root.clone());

    let mut game = Game::new(bank, settings.quiz.clone(), store, catalog, loader, output);
    game.execute(&Command::Modules);
    game.execute(&Command::Help);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => game.execute(&command),
            Err(e) => game
                .get_output()
                .say(&Message::CommandFailed(format!("{}", e))),
        }
    }

    Ok(())
}

fn main() {
    pretty_env_logger::init();
    info!("Quiz trainer starting");

    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
