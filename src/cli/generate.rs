use clap::{value_t_or_exit, ArgMatches};
use rand::{rngs::SmallRng, SeedableRng};
use slot_sat_lib::SeatingProblem;

pub fn generate(matches_generate: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let entities = value_t_or_exit!(matches_generate, "entities", usize);
    let slots = value_t_or_exit!(matches_generate, "slots", usize);
    let constraints = value_t_or_exit!(matches_generate, "constraints", usize);
    let seed = matches_generate
        .value_of("seed")
        .map(|_| value_t_or_exit!(matches_generate, "seed", u64));

    let problem = generate_problem(entities, slots, constraints, seed);
    match matches_generate.value_of("output") {
        Some(path) => problem.write_to_file(path)?,
        None => print!("{}", problem),
    }
    Ok(())
}

pub fn generate_problem(
    entities: usize,
    slots: usize,
    constraints: usize,
    seed: Option<u64>,
) -> SeatingProblem {
    let mut rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    SeatingProblem::generate_random(entities, slots, constraints, &mut rng)
}
