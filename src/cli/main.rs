mod app;
mod create_cache;
mod generate;
mod solve;
mod verify;

use app::build_cli;
use create_cache::create_cache;
use generate::generate;
use solve::solve;
use std::error::Error;
use verify::verify;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let matches = build_cli().get_matches();

    run_subcommand(matches)?;

    Ok(())
}

fn run_subcommand(matches: clap::ArgMatches) -> Result<(), Box<dyn Error>> {
    Ok(match matches.subcommand() {
        ("solve", Some(sub_m)) => solve(sub_m)?,
        ("verify", Some(sub_m)) => verify(sub_m)?,
        ("gen", Some(sub_m)) => generate(sub_m)?,
        ("create_cache", Some(sub_m)) => create_cache(sub_m)?,
        (_, _) => unreachable!(),
    })
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use slot_sat_lib::caches::{SolutionCache, SqliteSolutionCache};
    use slot_sat_lib::solution::read_solution;
    use slot_sat_lib::{SeatingProblem, Solution};
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("slot_sat_{}_{}", std::process::id(), name))
    }

    fn run(args: &[&str]) -> Result<(), Box<dyn Error>> {
        let matches = build_cli().get_matches_from_safe(args)?;
        run_subcommand(matches)
    }

    #[test]
    fn test_create_cache() -> Result<(), Box<dyn Error>> {
        let path = temp_path("cache_0.db");
        run(&["slot_sat_cli", "create_cache", path.to_str().unwrap_or_default()])?;
        assert!(path.exists());
        fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_solve_and_verify() -> Result<(), Box<dyn Error>> {
        let input = temp_path("problem_0.txt");
        let output = temp_path("problem_0.out");
        fs::write(&input, "3 2\n1 2 F\n2 3 E\n")?;

        run(&[
            "slot_sat_cli",
            "solve",
            input.to_str().unwrap_or_default(),
            "-o",
            output.to_str().unwrap_or_default(),
            "--oracle",
            "both",
            "--seed",
            "3",
        ])?;
        let text = fs::read_to_string(&output)?;
        assert!(text.starts_with("yes\n"));
        assert!(verify::verify_files(
            input.to_str().unwrap_or_default(),
            output.to_str().unwrap_or_default()
        )?
        .is_empty());

        run(&[
            "slot_sat_cli",
            "verify",
            input.to_str().unwrap_or_default(),
            output.to_str().unwrap_or_default(),
        ])?;

        fs::remove_file(&input)?;
        fs::remove_file(&output)?;
        Ok(())
    }

    #[test]
    fn test_verify_rejects_bad_solution() -> Result<(), Box<dyn Error>> {
        let input = temp_path("problem_1.txt");
        let output = temp_path("problem_1.out");
        fs::write(&input, "2 2\n1 2 E\n")?;
        fs::write(&output, "yes\n1 1\n2 1\n")?;

        let result = run(&[
            "slot_sat_cli",
            "verify",
            input.to_str().unwrap_or_default(),
            output.to_str().unwrap_or_default(),
        ]);
        assert!(result.is_err());

        fs::remove_file(&input)?;
        fs::remove_file(&output)?;
        Ok(())
    }

    #[test]
    fn test_verify_rejects_wrong_no() -> Result<(), Box<dyn Error>> {
        let input = temp_path("problem_4.txt");
        let output = temp_path("problem_4.out");
        fs::write(&input, "1 1\n")?;
        fs::write(&output, "no\n")?;

        let result = run(&[
            "slot_sat_cli",
            "verify",
            input.to_str().unwrap_or_default(),
            output.to_str().unwrap_or_default(),
        ]);
        assert!(result.is_err());

        fs::write(&input, "2 1\n1 2 E\n")?;
        run(&[
            "slot_sat_cli",
            "verify",
            input.to_str().unwrap_or_default(),
            output.to_str().unwrap_or_default(),
        ])?;

        fs::remove_file(&input)?;
        fs::remove_file(&output)?;
        Ok(())
    }

    #[test]
    fn test_solve_replaces_wrong_cached_answer() -> Result<(), Box<dyn Error>> {
        let cache_path = temp_path("cache_2.db");
        let _ = fs::remove_file(&cache_path);
        run(&["slot_sat_cli", "create_cache", cache_path.to_str().unwrap_or_default()])?;

        let input = temp_path("problem_5.txt");
        let output = temp_path("problem_5.out");
        fs::write(&input, "2 2\n1 2 E\n")?;
        let problem = SeatingProblem::read_from_file(&input)?;
        SqliteSolutionCache::open(&cache_path)?.write_solution(&problem, &Solution::Unsatisfiable)?;

        run(&[
            "slot_sat_cli",
            "solve",
            input.to_str().unwrap_or_default(),
            "-o",
            output.to_str().unwrap_or_default(),
            "--cache",
            cache_path.to_str().unwrap_or_default(),
            "--print-clauses",
        ])?;
        let solution = read_solution(&fs::read_to_string(&output)?, 2, 2)?;
        assert!(solution.verify(&problem).is_empty());

        let cache = SqliteSolutionCache::open(&cache_path)?;
        assert_eq!(cache.read_solution(&problem)?, Some(solution));

        for path in &[cache_path, input, output] {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    #[test]
    fn test_solve_several_inputs_with_cache() -> Result<(), Box<dyn Error>> {
        let cache_path = temp_path("cache_1.db");
        let _ = fs::remove_file(&cache_path);
        run(&["slot_sat_cli", "create_cache", cache_path.to_str().unwrap_or_default()])?;

        let sat = temp_path("problem_2.txt");
        let unsat = temp_path("problem_3.txt");
        fs::write(&sat, "4 3\n1 2 E\n2 3 E\n3 4 F\n")?;
        fs::write(&unsat, "2 1\n1 2 E\n")?;

        for _ in 0..2 {
            run(&[
                "slot_sat_cli",
                "solve",
                sat.to_str().unwrap_or_default(),
                unsat.to_str().unwrap_or_default(),
                "--cache",
                cache_path.to_str().unwrap_or_default(),
            ])?;
        }

        let sat_out = solve::output_path(&sat);
        let unsat_out = solve::output_path(&unsat);
        let sat_problem = SeatingProblem::read_from_file(&sat)?;
        let solution = read_solution(&fs::read_to_string(&sat_out)?, 4, 3)?;
        assert!(solution.is_satisfiable());
        assert!(solution.verify(&sat_problem).is_empty());
        assert_eq!(fs::read_to_string(&unsat_out)?, "no\n");

        let cache = SqliteSolutionCache::open(&cache_path)?;
        let unsat_problem = SeatingProblem::read_from_file(&unsat)?;
        assert_eq!(
            cache.read_solution(&unsat_problem)?,
            Some(Solution::Unsatisfiable)
        );

        for path in &[cache_path, sat, unsat, sat_out, unsat_out] {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    #[test]
    fn test_generate_problem() {
        let a = generate::generate_problem(6, 3, 8, Some(1));
        let b = generate::generate_problem(6, 3, 8, Some(1));
        assert_eq!(a, b);
        assert_eq!(a.constraints().len(), 8);
        assert!(run(&["slot_sat_cli", "gen", "6", "3", "8", "--seed", "1"]).is_ok());
    }

    #[test]
    fn test_generate_to_file() -> Result<(), Box<dyn Error>> {
        let path = temp_path("generated_0.txt");
        run(&[
            "slot_sat_cli",
            "gen",
            "6",
            "3",
            "8",
            "--seed",
            "1",
            "--output",
            path.to_str().unwrap_or_default(),
        ])?;

        let problem = SeatingProblem::read_from_file(&path)?;
        assert_eq!(problem, generate::generate_problem(6, 3, 8, Some(1)));

        fs::remove_file(&path)?;
        Ok(())
    }
}
