use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};

use gamelogs::{DateRange, GameLogStore, fields, query, table};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    // The shell owns the store; queries and loads borrow it.
    let mut store = GameLogStore::new();
    let stdin = io::stdin();

    loop {
        print!("game-logs> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let parts: Vec<_> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            command => {
                // Report the failure and keep the shell alive.
                if let Err(err) = dispatch(&mut store, command) {
                    eprintln!("{err:#}");
                }
            }
        }
    }

    Ok(())
}

fn dispatch(store: &mut GameLogStore, command: &[&str]) -> Result<()> {
    match command {
        ["load", path] => {
            let count = store.load_path(path)?;
            println!("Loaded {count} Game Log records.");
        }
        ["games-on", date] => {
            let date = fields::parse_display_date(date)?;
            println!("{}", table::render(&query::games_on(store, date)));
        }
        ["games-between", bounds @ ..] if bounds.len() <= 2 => {
            let range = parse_range(bounds)?;
            println!("{}", table::render(&query::games_between(store, range)));
        }
        ["team-games", team, bounds @ ..] if bounds.len() <= 2 => {
            let range = parse_range(bounds)?;
            println!("{}", table::render(&query::team_games(store, team, range)));
        }
        ["home-team-games", team, bounds @ ..] if bounds.len() <= 2 => {
            let range = parse_range(bounds)?;
            println!("{}", table::render(&query::home_team_games(store, team, range)));
        }
        ["print", path] => print_file(path)?,
        ["help"] => help(),
        _ => eprintln!("unknown command; try `help`"),
    }
    Ok(())
}

// Missing bounds fall back to the 2017 season window.
fn parse_range(bounds: &[&str]) -> Result<DateRange> {
    let season = DateRange::default();
    Ok(DateRange {
        start: match bounds.first() {
            Some(s) => fields::parse_display_date(s)?,
            None => season.start,
        },
        end: match bounds.get(1) {
            Some(s) => fields::parse_display_date(s)?,
            None => season.end,
        },
    })
}

// Raw passthrough echo of a log file, no parsing.
fn print_file(path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
    for line in BufReader::new(file).lines() {
        println!("{}", line?);
    }
    Ok(())
}

fn help() {
    println!("load <game-log>                       Load Game Logs");
    println!("games-on <MM-dd-yyyy>                 Games on a date, for example 07-04-2017");
    println!("games-between [start] [end]           Games between two MM-dd-yyyy dates, 2017 season by default");
    println!("team-games <TEAM> [start] [end]       Games a team played, home or visiting");
    println!("home-team-games <TEAM> [start] [end]  Games a team hosted");
    println!("print <game-log>                      Print Game Log");
    println!("quit                                  Leave the shell");
}
