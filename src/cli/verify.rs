use clap::ArgMatches;
use console::style;
use slot_sat_lib::solution::read_solution;
use slot_sat_lib::{SeatingProblem, Violation};
use std::fs;

pub fn verify(matches_verify: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    // Both arguments are required.
    let input = matches_verify.value_of("input").unwrap_or_default();
    let solution = matches_verify.value_of("solution").unwrap_or_default();

    let violations = verify_files(input, solution)?;
    if violations.is_empty() {
        println!("{}", style("The solution is valid.").green());
        return Ok(());
    }

    for violation in &violations {
        println!("{}", violation);
    }
    Err(format!("Found {} violations in the solution", violations.len()).into())
}

pub fn verify_files(input: &str, solution: &str) -> Result<Vec<Violation>, Box<dyn std::error::Error>> {
    let problem = SeatingProblem::read_from_file(input)?;
    let text = fs::read_to_string(solution)?;
    let solution = read_solution(&text, problem.entity_count(), problem.slot_count())?;
    Ok(solution.verify(&problem))
}
