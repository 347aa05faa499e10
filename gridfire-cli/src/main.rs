use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use gridfire::{
    ai::{Difficulty, RngSampler},
    fleet::FleetConfig,
    game::{CannotShootReason, Match, Seat, ShotOutcome},
    grid::{CellKind, Coord, Grid, DEFAULT_SIDE},
};

/// Game mode chosen at startup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mode {
    Solo(Difficulty),
    Pvp,
}

fn main() -> io::Result<()> {
    let matches = App::new("Gridfire")
        .version("1.0")
        .about("Command line battleship with a three-tier targeting AI.")
        .arg(
            Arg::with_name("mode")
                .short("m")
                .long("mode")
                .value_name("MODE")
                .help("game mode: AI difficulty, or two-player hot seat")
                .takes_value(true)
                .possible_values(&["easy", "medium", "hard", "pvp"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed the random generator for a reproducible match")
                .takes_value(true),
        )
        .get_matches();

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let mode = choose_mode(&matches, &mut input)?;
    let mut rng = match matches.value_of("seed") {
        Some(seed) => match seed.parse() {
            Ok(seed) => StdRng::seed_from_u64(seed),
            Err(_) => {
                eprintln!("seed must be an unsigned integer, got {:?}", seed);
                std::process::exit(1);
            }
        },
        None => StdRng::from_entropy(),
    };

    let config = FleetConfig::default();
    match mode {
        Mode::Solo(difficulty) => {
            let game = Match::solo(DEFAULT_SIDE, &config, difficulty, &mut rng);
            run_solo(game, RngSampler(rng), &mut input)
        }
        Mode::Pvp => {
            let game = Match::pvp(DEFAULT_SIDE, &config, &mut rng);
            run_pvp(game, &mut input)
        }
    }
}

/// Choose the game [`Mode`] from either args or cli input.
fn choose_mode<B: BufRead>(matches: &ArgMatches, input: &mut InputReader<B>) -> io::Result<Mode> {
    Ok(if let Some(clichoice) = matches.value_of("mode") {
        match clichoice.to_ascii_lowercase().as_str() {
            "easy" => Mode::Solo(Difficulty::Easy),
            "medium" => Mode::Solo(Difficulty::Medium),
            "hard" => Mode::Solo(Difficulty::Hard),
            "pvp" => Mode::Pvp,
            _ => unreachable!(),
        }
    } else {
        input.read_input_lower(
            "Choose a mode: easy, medium, hard, or pvp.",
            |input| match input {
                "easy" | "e" | "1" => Some(Mode::Solo(Difficulty::Easy)),
                "medium" | "m" | "2" => Some(Mode::Solo(Difficulty::Medium)),
                "hard" | "h" | "3" => Some(Mode::Solo(Difficulty::Hard)),
                "pvp" | "p" | "4" => Some(Mode::Pvp),
                _ => {
                    println!("Invalid selection.");
                    None
                }
            },
        )?
    })
}

/// Matcher for the fire command: an optional keyword and two coordinates.
static FIRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?x)(?:(?:fire|shoot|f)\s+)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$",
    )
    .unwrap()
});

/// Read a fire command for the given grid side, looping until valid.
fn read_target<B: BufRead>(input: &mut InputReader<B>, side: usize) -> io::Result<Coord> {
    input.read_input_lower("> ", |line| {
        let captures = match FIRE.captures(line) {
            Some(captures) => captures,
            None => {
                println!("Type a target like \"5,3\" or \"fire 5 3\".");
                return None;
            }
        };
        let x: usize = captures.name("x").unwrap().as_str().parse().ok()?;
        let y: usize = captures.name("y").unwrap().as_str().parse().ok()?;
        if x >= side || y >= side {
            println!("Coordinates must be in range [0,{}].", side - 1);
            return None;
        }
        Some(Coord::new(x, y))
    })
}

/// Play a solo match to completion: the human in seat one against the AI.
fn run_solo<B: BufRead>(
    mut game: Match,
    mut sampler: RngSampler<StdRng>,
    input: &mut InputReader<B>,
) -> io::Result<()> {
    println!();
    println!("Your fleet is placed. Fire with \"x,y\" (row, column).");
    while game.winner().is_none() {
        println!();
        println!("Enemy waters:");
        show_tracking_board(game.player(Seat::P2).grid());
        println!("Your waters:");
        show_own_board(game.player(Seat::P1).grid());

        let coord = read_target(input, game.player(Seat::P2).grid().side())?;
        match game.shoot(coord) {
            Ok(outcome) => report_shot("You", coord, outcome),
            Err(CannotShootReason::AlreadyShot) => {
                println!("You already fired there.");
                continue;
            }
            Err(reason) => {
                println!("{}", reason);
                continue;
            }
        }
        if game.winner().is_some() {
            break;
        }

        let (coord, outcome) = game
            .ai_turn(&mut sampler)
            .expect("ai turn after an accepted shot");
        report_shot("The enemy", coord, outcome);
    }

    println!();
    match game.winner().unwrap() {
        Seat::P1 => println!("Victory! The enemy fleet is destroyed."),
        Seat::P2 => println!("Defeat. Your fleet is destroyed."),
    }
    show_scores(&game);
    Ok(())
}

/// Play a hot-seat match to completion: both seats on one terminal.
fn run_pvp<B: BufRead>(mut game: Match, input: &mut InputReader<B>) -> io::Result<()> {
    println!();
    println!("Hot seat: players alternate. Fire with \"x,y\" (row, column).");
    while game.winner().is_none() {
        let shooter = game.current();
        let target = shooter.opponent();
        println!();
        println!("{}, enemy waters:", seat_name(shooter));
        show_tracking_board(game.player(target).grid());

        let coord = read_target(input, game.player(target).grid().side())?;
        match game.shoot(coord) {
            Ok(outcome) => report_shot(seat_name(shooter), coord, outcome),
            Err(CannotShootReason::AlreadyShot) => {
                println!("That cell was already fired at.");
                continue;
            }
            Err(reason) => {
                println!("{}", reason);
                continue;
            }
        }
    }

    println!();
    println!("{} wins!", seat_name(game.winner().unwrap()));
    show_scores(&game);
    Ok(())
}

fn seat_name(seat: Seat) -> &'static str {
    match seat {
        Seat::P1 => "Player 1",
        Seat::P2 => "Player 2",
    }
}

fn report_shot(who: &str, coord: Coord, outcome: ShotOutcome) {
    match outcome {
        ShotOutcome::Miss => println!("{} fired at {},{} and missed.", who, coord.x, coord.y),
        ShotOutcome::Hit(_) => println!("{} fired at {},{}: hit!", who, coord.x, coord.y),
        ShotOutcome::Sunk(ship) => println!(
            "{} fired at {},{}: ship {} sunk!",
            who, coord.x, coord.y, ship
        ),
        ShotOutcome::Victory(ship) => println!(
            "{} fired at {},{}: ship {} sunk, fleet destroyed!",
            who, coord.x, coord.y, ship
        ),
    }
}

fn show_scores(game: &Match) {
    println!(
        "Final scores: {} {}, {} {}.",
        seat_name(Seat::P1),
        game.player(Seat::P1).score(),
        seat_name(Seat::P2),
        game.player(Seat::P2).score()
    );
}

/// Print the owner's view of a grid: ships visible.
fn show_own_board(grid: &Grid) {
    enum OwnCell {
        Water,
        Miss,
        Ship(i32),
        Hit,
        Sunk,
    }
    impl fmt::Display for OwnCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                OwnCell::Water => f.pad("~"),
                OwnCell::Miss => f.pad("o"),
                OwnCell::Ship(id) => write!(f, "{:^3}", id),
                OwnCell::Hit => f.pad("x"),
                OwnCell::Sunk => f.pad("X"),
            }
        }
    }
    show_board(grid, |cell| match cell.kind() {
        CellKind::Water => OwnCell::Water,
        CellKind::Miss => OwnCell::Miss,
        CellKind::Intact(id) => OwnCell::Ship(id),
        CellKind::Hit(_) => OwnCell::Hit,
        CellKind::Sunk(_) => OwnCell::Sunk,
    })
}

/// Print the attacker's view of a grid: only shot results visible.
fn show_tracking_board(grid: &Grid) {
    enum TrackingCell {
        Unknown,
        Miss,
        Hit,
        Sunk,
    }
    impl fmt::Display for TrackingCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                TrackingCell::Unknown => f.pad("."),
                TrackingCell::Miss => f.pad("o"),
                TrackingCell::Hit => f.pad("x"),
                TrackingCell::Sunk => f.pad("X"),
            }
        }
    }
    show_board(grid, |cell| match cell.kind() {
        CellKind::Water | CellKind::Intact(_) => TrackingCell::Unknown,
        CellKind::Miss => TrackingCell::Miss,
        CellKind::Hit(_) => TrackingCell::Hit,
        CellKind::Sunk(_) => TrackingCell::Sunk,
    })
}

/// Print a grid with row and column headers, mapping each cell for display.
fn show_board<C: fmt::Display>(grid: &Grid, mut map: impl FnMut(gridfire::grid::Cell) -> C) {
    print!("   ");
    for y in 0..grid.side() {
        print!("{:^3}", y);
    }
    println!();
    for x in 0..grid.side() {
        print!("{:>2} ", x);
        for y in 0..grid.side() {
            print!("{:^3}", map(grid[Coord::new(x, y)]));
        }
        println!();
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns
    /// `Some`. Converts to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            print!("{} ", prompt);
            io::stdout().flush()?;
            self.buf.clear();
            if self.read.read_line(&mut self.buf)? == 0 {
                println!();
                std::process::exit(0);
            }
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }
}
