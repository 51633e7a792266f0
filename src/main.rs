//! Elastistent CLI
//!
//! Usage:
//!   elastistent [OPTIONS] [LOCATOR]
//!
//! The locator is a share link, a bare query string, or is read from stdin.
//! Edits are applied in a fixed order: disable, remove, select, commit,
//! mirror. The result is printed as SVG unless --link, --list or --qr is
//! given.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use url::Url;

use elastistent::catalogue::Tooth;
use elastistent::{
    render_session, Action, Features, MemoryEffects, Palette, Session, SurfaceConfig, SvgConfig,
    TimeScope,
};

#[derive(Parser)]
#[command(name = "elastistent")]
#[command(about = "Plan orthodontic elastics and share them as a link")]
struct Cli {
    /// Share link or query string (reads from stdin if not provided)
    locator: Option<String>,

    /// Feature switches (TOML file with a [features] table)
    #[arg(long, value_name = "FILE")]
    features: Option<PathBuf>,

    /// Elastic type palette (TOML file)
    #[arg(long, value_name = "FILE")]
    palette: Option<PathBuf>,

    /// Toggle a tooth side in the selection; append ":in" for the inner side
    #[arg(long, value_name = "TOOTH[:in]", value_parser = parse_point)]
    select: Vec<(Tooth, bool)>,

    /// Commit the selection as an elastic of the given type (id or name)
    #[arg(long, value_name = "TYPE[:TIME]", value_parser = parse_commit)]
    commit: Option<(String, TimeScope)>,

    /// Remove an elastic by its number in --list
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    remove: Vec<u64>,

    /// Toggle whether a tooth is disabled
    #[arg(long, value_name = "TOOTH", value_parser = parse_tooth)]
    disable: Vec<Tooth>,

    /// Flip the mirror view
    #[arg(long)]
    mirror: bool,

    /// Highlight an elastic by its number in --list
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    highlight: Option<u64>,

    /// Print the canonical share link instead of SVG
    #[arg(long)]
    link: bool,

    /// Print the committed elastics instead of SVG
    #[arg(long)]
    list: bool,

    /// Print the share link as a QR code SVG
    #[arg(long)]
    qr: bool,

    /// Page the share link points to
    #[arg(long, value_name = "URL")]
    base: Option<Url>,

    /// Log more (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let features = match &cli.features {
        Some(path) => match Features::from_file(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error loading features '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Features::default(),
    };

    let palette = match &cli.palette {
        Some(path) => match Palette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Palette::default(),
    };

    // With no argument and an interactive terminal, start from an empty configuration
    let locator = match &cli.locator {
        Some(locator) => locator.clone(),
        None if io::stdin().is_terminal() => String::new(),
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer.trim().to_string(),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut session = Session::start(MemoryEffects::new(locator), features, palette);
    if let Some(base) = cli.base.clone() {
        session = session.with_base(base);
    }

    for action in actions(&cli, session.store().palette()) {
        session.dispatch(action);
    }

    if cli.link {
        println!("{}", session.link());
    } else if cli.list {
        print_list(&session);
    } else if cli.qr {
        match session.qr_svg(&SvgConfig::default()) {
            Ok(svg) => println!("{}", svg),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let highlighted = cli.highlight.map(|n| n as usize - 1);
        let svg = render_session(
            session,
            &SurfaceConfig::default(),
            &SvgConfig::default(),
            highlighted,
        );
        println!("{}", svg);
    }
}

/// Translate the command line edits into store actions
fn actions(cli: &Cli, palette: &Palette) -> Vec<Action> {
    let mut actions: Vec<Action> = cli.disable.iter().copied().map(Action::ToggleDisabled).collect();

    // Highest first so every number refers to the listing before the edit
    let mut removals: Vec<usize> = cli.remove.iter().map(|&n| n as usize - 1).collect();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    actions.extend(removals.into_iter().map(Action::Remove));

    actions.extend(
        cli.select
            .iter()
            .map(|&(tooth, outside)| Action::ToggleSelection { tooth, outside }),
    );

    if let Some((kind, time)) = &cli.commit {
        match resolve_type(palette, kind) {
            Some(kind) => actions.push(Action::Commit { kind, time: *time }),
            None => {
                eprintln!("Error: unknown elastic type '{}'", kind);
                std::process::exit(1);
            }
        }
    }

    if cli.mirror {
        actions.push(Action::ToggleMirror);
    }
    actions
}

fn resolve_type(palette: &Palette, kind: &str) -> Option<u32> {
    match kind.trim().parse::<u32>() {
        Ok(id) => palette.contains(id).then_some(id),
        Err(_) => palette.resolve_name(kind),
    }
}

fn print_list<E: elastistent::Effects>(session: &Session<E>) {
    let snapshot = session.snapshot();
    if snapshot.elastics.is_empty() {
        println!("No elastics");
        return;
    }
    let palette = session.store().palette();
    for (i, elastic) in snapshot.elastics.iter().enumerate() {
        println!(
            "Elastic {}: {} ({})",
            i + 1,
            elastic,
            palette.get_or_first(elastic.kind).name
        );
    }
}

fn parse_tooth(s: &str) -> Result<Tooth, String> {
    let code: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a tooth number", s))?;
    Tooth::new(code).map_err(|e| e.to_string())
}

fn parse_point(s: &str) -> Result<(Tooth, bool), String> {
    let (tooth, side) = match s.split_once(':') {
        Some((tooth, side)) => (tooth, Some(side)),
        None => (s, None),
    };
    let outside = match side.map(|side| side.trim().to_ascii_lowercase()) {
        None => true,
        Some(side) if side == "out" || side == "outside" => true,
        Some(side) if side == "in" || side == "inside" => false,
        Some(side) => return Err(format!("unknown side '{}', expected 'in' or 'out'", side)),
    };
    Ok((parse_tooth(tooth)?, outside))
}

fn parse_commit(s: &str) -> Result<(String, TimeScope), String> {
    match s.split_once(':') {
        Some((kind, time)) => Ok((kind.to_string(), time.parse()?)),
        None => Ok((s.to_string(), TimeScope::default())),
    }
}
