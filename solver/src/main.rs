use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use itertools::Itertools;
use lightup::{AtMostOne, GridSolver, Outcome, PuzzleFile, SolveOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve Light Up (Akari) puzzles with a SAT solver", long_about = None)]
struct Args {
    /// A puzzle file, or a directory of puzzle files to choose from.
    #[arg(default_value = "grids")]
    path: PathBuf,
    /// Also print the solution with every light's beams drawn.
    #[arg(short, long)]
    beams: bool,
    /// Encode "at most one light per corridor" with a sequential counter instead of pairwise clauses.
    #[arg(long)]
    sequential: bool,
}

/// List the files in `dir` and let the user pick one by number.
fn choose_file(dir: &Path) -> anyhow::Result<PathBuf> {
    let files = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .filter_ok(|path| path.is_file())
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if files.is_empty() {
        bail!("no grid files found in {}", dir.display());
    }

    println!("Available grid files:");
    for (number, file) in files.iter().enumerate() {
        println!("{}. {}", number + 1, file.file_name().unwrap_or_default().to_string_lossy());
    }

    print!("\nSelect a grid file by number: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let chosen = answer.trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| files.get(index))
        .with_context(|| format!("invalid selection {:?}", answer.trim()))?;

    println!("Selected file: {}", chosen.display());
    Ok(chosen.clone())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let path = if args.path.is_dir() { choose_file(&args.path)? } else { args.path };
    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let puzzle = PuzzleFile::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::info!("loaded {}x{} grid from {}", puzzle.grid.rows(), puzzle.grid.cols(), path.display());

    println!("Initial puzzle:");
    print!("{}", puzzle.grid);

    let options = SolveOptions {
        at_most_one: if args.sequential { AtMostOne::Sequential } else { AtMostOne::Pairwise },
    };
    let outcome = GridSolver::from(&puzzle.grid).with_options(options).solve()?;

    match outcome {
        Outcome::Solved(solution) => {
            println!("\nFound solution!");
            print!("{}", solution);
            if args.beams {
                println!("\nWith light beams:");
                print!("{}", solution.with_beams());
            }
        }
        Outcome::Unsatisfiable => println!("\nNo solution exists!"),
    }

    if let Some(link) = puzzle.link {
        println!("\nVisit the following link to review the solution with another solver:");
        println!("{}", link);
    }

    Ok(())
}
