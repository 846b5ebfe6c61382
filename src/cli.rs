use std::env;
use std::fs;
use std::path::Path;

use crate::data::hero::{load_hero_catalog, HeroCatalog, DEFAULT_HEROES_PATH};
use crate::data::template::{load_hero_template, HeroTemplate, TrackedHero};
use crate::power::{aggregate_rows, ScoreWeights};
use crate::report::{render, ReportFormat, ReportOptions};
use crate::sheet::{inspect_workbook, read_rows, DEFAULT_SHEET_NAME};

const USAGE: &str = "usage: mappower <score|heroes|inspect>";
const VALUE_FLAGS: &[&str] = &["--heroes", "--template", "--sheet", "--format", "--output"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Score,
    Heroes,
    Inspect,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("score") => Some(Command::Score),
        Some("heroes") => Some(Command::Heroes),
        Some("inspect") => Some(Command::Inspect),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Score) => handle_score(args),
        Some(Command::Heroes) => handle_heroes(args),
        Some(Command::Inspect) => handle_inspect(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// Input locations. Flags win over environment, environment over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub heroes_path: String,
    pub template_path: Option<String>,
    pub sheet: String,
}

impl Settings {
    pub fn from_args(args: &[String]) -> Self {
        let heroes_path = flag_value(args, "--heroes")
            .map(str::to_string)
            .or_else(|| env::var("MAPPOWER_HEROES").ok())
            .unwrap_or_else(|| DEFAULT_HEROES_PATH.to_string());
        let template_path = flag_value(args, "--template")
            .map(str::to_string)
            .or_else(|| env::var("MAPPOWER_TEMPLATE").ok());
        let sheet = flag_value(args, "--sheet")
            .map(str::to_string)
            .or_else(|| env::var("MAPPOWER_SHEET").ok())
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        Self {
            heroes_path,
            template_path,
            sheet,
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

/// Arguments after the command that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(2);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn load_tracked_heroes(settings: &Settings) -> Result<(HeroCatalog, Vec<TrackedHero>), String> {
    let catalog = load_hero_catalog(&settings.heroes_path)
        .map_err(|err| format!("{err} ({})", settings.heroes_path))?;
    let template = match &settings.template_path {
        Some(path) => load_hero_template(path).map_err(|err| format!("{err} ({path})"))?,
        None => HeroTemplate::default_roster(),
    };
    let heroes = template.resolve(&catalog).map_err(|err| err.to_string())?;
    tracing::debug!(
        catalog = catalog.len(),
        tracked = heroes.len(),
        "resolved tracked heroes"
    );
    Ok((catalog, heroes))
}

fn handle_score(args: &[String]) -> i32 {
    let Some(path) = positionals(args).first().copied() else {
        eprintln!(
            "usage: mappower score <sheet.xlsx|sheet.csv> [--heroes P] [--template P] [--sheet NAME] [--format text|json|maps|table|csv] [--output P] [--stamp]"
        );
        return 2;
    };
    let format = match flag_value(args, "--format").map(str::parse::<ReportFormat>) {
        Some(Ok(format)) => format,
        Some(Err(err)) => {
            eprintln!("{err}");
            return 2;
        }
        None => ReportFormat::default(),
    };
    let settings = Settings::from_args(args);

    let (_, heroes) = match load_tracked_heroes(&settings) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("hero catalog error: {err}");
            return 1;
        }
    };

    let rows = match read_rows(path, &settings.sheet) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("read failed: {err}");
            return 1;
        }
    };

    let maps = aggregate_rows(&rows, &heroes, ScoreWeights::default());

    let options = ReportOptions {
        source: Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        last_updated: has_flag(args, "--stamp")
            .then(|| chrono::Utc::now().format("%Y-%m-%d").to_string()),
    };
    let payload = match render(&maps, &heroes, format, &options) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    match flag_value(args, "--output") {
        Some(output) => {
            if let Some(parent) = Path::new(output).parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(err) = fs::create_dir_all(parent) {
                    eprintln!("failed to create {}: {err}", parent.display());
                    return 1;
                }
            }
            if let Err(err) = fs::write(output, payload) {
                eprintln!("failed to write {output}: {err}");
                return 1;
            }
            tracing::info!(output, maps = maps.len(), format = %format, "wrote report");
        }
        None => print!("{payload}"),
    }
    0
}

fn handle_heroes(args: &[String]) -> i32 {
    let settings = Settings::from_args(args);
    let (catalog, heroes) = match load_tracked_heroes(&settings) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("hero catalog error: {err}");
            return 1;
        }
    };

    println!("id\tname\trole");
    for hero in &heroes {
        let role = catalog
            .get(&hero.id)
            .and_then(|record| record.role.as_deref())
            .unwrap_or("");
        println!("{}\t{}\t{}", hero.id, hero.name, role);
    }
    0
}

fn handle_inspect(args: &[String]) -> i32 {
    let positional = positionals(args);
    let Some(path) = positional.first().copied() else {
        eprintln!("usage: mappower inspect <workbook.xlsx> [rows] [--sheet NAME]");
        return 2;
    };
    let limit = parse_usize_arg(positional.get(1).copied(), "rows", 25);
    let settings = Settings::from_args(args);

    let preview = match inspect_workbook(Path::new(path), &settings.sheet, limit) {
        Ok(preview) => preview,
        Err(err) => {
            eprintln!("inspect failed: {err}");
            return 1;
        }
    };

    println!(
        "Sheets ({}): {}",
        preview.sheet_names.len(),
        preview.sheet_names.join(", ")
    );
    println!("\nUsing sheet: {}", preview.sheet);
    println!(
        "Size: {} rows x {} cols\nFirst {} rows:",
        preview.height,
        preview.width,
        preview.rows.len()
    );
    for (i, row) in preview.rows.iter().enumerate() {
        println!("  {}: {}", i, row.join(" | "));
    }
    0
}

fn parse_usize_arg(raw: Option<&str>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                tracing::warn!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
