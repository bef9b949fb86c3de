use std::io::{self, Write};

use campus_directory::{Building, ClassLocation, DirectoryStore, LoadResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            let width = display_width(cell);
            if width > widths[ci] {
                widths[ci] = width;
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&widths, headers.iter().copied()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&sep);
    out
}

fn display_width(cell: &str) -> usize {
    cell.chars().count()
}

fn render_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.enumerate() {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(widths[ci].saturating_sub(display_width(cell))));
        line.push_str(" |");
    }
    line
}

fn print_buildings(buildings: &[Building]) {
    if buildings.is_empty() {
        println!("No buildings found.");
        return;
    }
    let rows: Vec<Vec<String>> = buildings
        .iter()
        .map(|b| {
            vec![
                b.short_name.clone(),
                b.long_name.clone(),
                b.x.to_string(),
                b.y.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        render_text_table(&["short_name", "long_name", "x", "y"], &rows)
    );
}

fn print_classes(classes: &[ClassLocation]) {
    if classes.is_empty() {
        println!("No classes found.");
        return;
    }
    let rows: Vec<Vec<String>> = classes
        .iter()
        .map(|c| {
            vec![
                c.friend.clone(),
                c.time.clone(),
                c.short_name.clone(),
                c.x.to_string(),
                c.y.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        render_text_table(&["friend", "time", "short_name", "x", "y"], &rows)
    );
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  stats                              Show how many records are loaded\n  load buildings <path>              Replace buildings from a data file\n  load schedules <path>              Replace schedules from a data file\n  name [text...]                     Search buildings by name (first 3)\n  near <x> <y>                       3 buildings closest to a point\n  building <short_name>              Look up one building\n  friend [name...]                   Classes of a friend\n  time <text...>                     Classes held at a time\n  friends <x> <y>                    Closest class of the 3 nearest friends\n  quit|exit                          Exit"
    );
}

fn report_load(kind: &str, result: LoadResult<usize>) {
    match result {
        Ok(count) => println!("Loaded {count} {kind}."),
        Err(e) => println!("Error loading {kind}: {e}"),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let store = DirectoryStore::new();
    println!("Campus Directory (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (input, None),
        };
        let mut parts = rest.unwrap_or_default().split_whitespace();

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "stats" => {
                let summary = store.snapshot().summary();
                println!(
                    "Buildings: {}, schedules: {}",
                    summary.buildings, summary.schedules
                );
            }
            "load" => match (parts.next(), parts.next()) {
                (Some("buildings"), Some(path)) => {
                    report_load("buildings", store.load_buildings_from_path(path));
                }
                (Some("schedules"), Some(path)) => {
                    report_load("schedules", store.load_schedules_from_path(path));
                }
                _ => println!("Usage: load <buildings|schedules> <path>"),
            },
            "name" => print_buildings(&store.search_buildings_by_name(rest)),
            "near" => match store.nearest_buildings(parts.next(), parts.next()) {
                Ok(buildings) => print_buildings(&buildings),
                Err(e) => println!("{e}"),
            },
            "building" => match rest {
                Some(short_name) => match store.find_building_by_short_name(short_name) {
                    Some(building) => print_buildings(&[building]),
                    None => println!("Building {short_name} not found."),
                },
                None => println!("Usage: building <short_name>"),
            },
            "friend" => print_classes(&store.classes_for_friend(rest)),
            "time" => match rest {
                Some(time) => print_classes(&store.classes_at_time(Some(time))),
                None => println!("Usage: time <text>"),
            },
            "friends" => match store.nearest_friends(parts.next(), parts.next()) {
                Ok(classes) => print_classes(&classes),
                Err(e) => println!("{e}"),
            },
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }
}
