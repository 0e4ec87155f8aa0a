use clap::{value_t_or_exit, values_t_or_exit, ArgMatches};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use slot_sat_lib::caches::{SolutionCache, SqliteSolutionCache};
use slot_sat_lib::solution::write_solution;
use slot_sat_lib::{
    conflicting_pairs, relation_graph, save_as_svg, solve_with, DotFormat, Oracle,
    ResolutionConfig, SatEncoder, SeatingProblem, Solution, SolverOptions, Stage, WalkSatConfig,
};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn solve(matches_solve: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = values_t_or_exit!(matches_solve, "input", PathBuf);
    let options = SolverOptions {
        oracle: value_t_or_exit!(matches_solve, "oracle", Oracle),
        resolution: ResolutionConfig {
            max_clauses: value_t_or_exit!(matches_solve, "max_clauses", usize),
            ..ResolutionConfig::default()
        },
        walksat: WalkSatConfig {
            flip_probability: value_t_or_exit!(matches_solve, "flip_probability", f64),
            max_flips: value_t_or_exit!(matches_solve, "max_flips", usize),
            seed: matches_solve
                .value_of("seed")
                .map(|_| value_t_or_exit!(matches_solve, "seed", u64)),
        },
        dpll_fallback: !matches_solve.is_present("no_fallback"),
    };
    if !(0.0..=1.0).contains(&options.walksat.flip_probability) {
        return Err("The flip probability must be between 0 and 1".into());
    }

    let mut cache = matches_solve
        .value_of("sqlite_cache")
        .map(SqliteSolutionCache::open)
        .transpose()?;

    if let [input] = &inputs[..] {
        let problem = SeatingProblem::read_from_file(input)?;
        if matches_solve.is_present("dot") {
            println!("{}", problem.get_dot());
        }
        if let Some(path) = matches_solve.value_of("output_svg") {
            save_as_svg(path, &problem.get_dot())?;
            eprintln!("{} '{}'", style("Saved the constraint graph to path").green(), path);
        }
        if matches_solve.is_present("print_clauses") {
            let encoder = SatEncoder::new(&problem);
            encoder.write_clauses(&mut io::stderr(), &encoder.encode())?;
        }

        let solution = solve_problem(&problem, &options, cache.as_mut(), true)?;
        match matches_solve.value_of("output") {
            Some(path) => write_solution(&mut File::create(path)?, &solution)?,
            None => write_solution(&mut io::stdout(), &solution)?,
        }
        return Ok(());
    }

    let pb = if matches_solve.is_present("progress") {
        ProgressBar::new(inputs.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}"));

    let now = Instant::now();
    for input in pb.wrap_iter(inputs.iter()) {
        pb.set_message(input.display().to_string());
        let problem = SeatingProblem::read_from_file(input)?;
        let solution = solve_problem(&problem, &options, cache.as_mut(), false)?;
        write_solution(&mut File::create(output_path(input))?, &solution)?;
    }
    pb.finish_and_clear();
    info!(
        "Solved {} problems in {} s",
        inputs.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

/// Solves one problem, looking it up in `cache` first.
pub fn solve_problem(
    problem: &SeatingProblem,
    options: &SolverOptions,
    cache: Option<&mut SqliteSolutionCache>,
    show_stages: bool,
) -> Result<Solution, Box<dyn std::error::Error>> {
    let mut on_stage = |stage: Stage| {
        if !show_stages {
            return;
        }
        eprintln!(
            "{} {}",
            style(format!("[{}/{}]", stage.number(), Stage::COUNT)).bold().dim(),
            stage
        );
        if stage == Stage::CheckingGraph {
            for conflict in conflicting_pairs(&relation_graph(problem)) {
                eprintln!(
                    "    {} {}",
                    style("Contradicts must-share constraints:").yellow(),
                    conflict
                );
            }
        }
    };

    let cache = cache.map(|cache| cache as &mut dyn SolutionCache);
    Ok(solve_with(problem, options, cache, &mut on_stage)?)
}

/// `<input>.out` next to the input.
pub fn output_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(".out");
    PathBuf::from(path)
}
