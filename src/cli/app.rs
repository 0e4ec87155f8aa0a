use clap::{App, AppSettings::ArgRequiredElseHelp, Arg, SubCommand};
use indoc::indoc;

pub fn build_cli() -> App<'static, 'static> {
    App::new("Slot SAT")
        .version("0.1.0")
        .setting(ArgRequiredElseHelp)
        .subcommands([
            get_subcommand_solve(),
            get_subcommand_verify(),
            get_subcommand_generate(),
            get_subcommand_create_cache(),
        ])
        .about("This tool decides if entities can be seated into slots under pairwise constraints")
        .long_about(indoc! {"
        This tool decides if entities can be seated into slots under pairwise constraints.

        A problem is encoded into CNF and decided with DPLL, resolution or both.
        A satisfiable problem gets a witness from WalkSAT local search.

        Problem format:
            <entities> <slots>
            <entity> <entity> F    (the entities must share a slot)
            <entity> <entity> E    (the entities must not share a slot)
        "})
}

fn get_subcommand_solve() -> App<'static, 'static> {
    let input = Arg::with_name("input")
        .index(1)
        .help("Sets the problem files to solve")
        .multiple(true)
        .required(true);

    let output = Arg::with_name("output")
        .help("Writes the solution to the path instead of stdout")
        .long_help(indoc! {"
            Writes the solution to the path instead of stdout.

            Only used with a single input. With several inputs every solution is written next
            to its input with the extension .out.
            "})
        .short("o")
        .long("output")
        .takes_value(true);

    let oracle = Arg::with_name("oracle")
        .help("Sets the decision procedure")
        .long_help(indoc! {"
            Sets the decision procedure.

            dpll        - complete backtracking search.
            resolution  - resolution closure, may give up on large problems.
            both        - runs both and fails if they disagree.
            "})
        .long("oracle")
        .takes_value(true)
        .possible_values(&["dpll", "resolution", "both"])
        .default_value("dpll");

    let flip_probability = Arg::with_name("flip_probability")
        .help("Sets the probability of a random flip in WalkSAT")
        .long("flip-probability")
        .takes_value(true)
        .default_value("0.5");

    let max_flips = Arg::with_name("max_flips")
        .help("Sets the flip budget of WalkSAT")
        .long("max-flips")
        .takes_value(true)
        .default_value("100000");

    let max_clauses = Arg::with_name("max_clauses")
        .help("Sets the clause budget of the resolution oracle")
        .long("max-clauses")
        .takes_value(true)
        .default_value("20000");

    let seed = Arg::with_name("seed")
        .help("Seeds WalkSAT for reproducible runs")
        .long("seed")
        .takes_value(true);

    let no_fallback = Arg::with_name("no_fallback")
        .help("Fails instead of using DPLL when WalkSAT gives up")
        .long("no-fallback");

    let sqlite_cache = Arg::with_name("sqlite_cache")
        .help("Reads and stores solutions in the SQLite cache at the path")
        .long("cache")
        .takes_value(true);

    let dot = Arg::with_name("dot")
        .help("Prints the constraint graph in dot format")
        .long("dot");

    let output_svg = Arg::with_name("output_svg")
        .help("Saves the constraint graph as svg to the path")
        .long_help(indoc! {"
            Saves the constraint graph as svg to the path.

            Requires the dot executable of Graphviz. Only used with a single input.
            "})
        .long("svg")
        .takes_value(true);

    let print_clauses = Arg::with_name("print_clauses")
        .help("Prints the encoded clauses to stderr")
        .long("print-clauses");

    let progress = Arg::with_name("progress")
        .help("Shows progress")
        .short("p")
        .long("show-progress");

    SubCommand::with_name("solve")
        .about("Solves seating problems")
        .args(&[
            input,
            output,
            oracle,
            flip_probability,
            max_flips,
            max_clauses,
            seed,
            no_fallback,
            sqlite_cache,
            dot,
            output_svg,
            print_clauses,
            progress,
        ])
}

fn get_subcommand_verify() -> App<'static, 'static> {
    let input = Arg::with_name("input")
        .index(1)
        .help("Sets the problem file")
        .required(true);
    let solution = Arg::with_name("solution")
        .index(2)
        .help("Sets the solution file")
        .required(true);

    SubCommand::with_name("verify")
        .about("Checks a solution against a problem")
        .args(&[input, solution])
}

fn get_subcommand_generate() -> App<'static, 'static> {
    let entities = Arg::with_name("entities")
        .index(1)
        .help("Sets the number of entities")
        .required(true);
    let slots = Arg::with_name("slots")
        .index(2)
        .help("Sets the number of slots")
        .required(true);
    let constraints = Arg::with_name("constraints")
        .index(3)
        .help("Sets the number of constraints")
        .required(true);
    let seed = Arg::with_name("seed")
        .help("Seeds the generator")
        .long("seed")
        .takes_value(true);
    let output = Arg::with_name("output")
        .help("Writes the problem to the path instead of stdout")
        .short("o")
        .long("output")
        .takes_value(true);

    SubCommand::with_name("gen")
        .about("Generates a random seating problem")
        .args(&[entities, slots, constraints, seed, output])
}

fn get_subcommand_create_cache() -> App<'static, 'static> {
    let sqlite_cache = Arg::with_name("sqlite_cache")
        .index(1)
        .help("Sets the path of the new database")
        .long_help(indoc! {"
            Sets the path of the new database.

            Defaults to slot_sat/solutions.sqlite in the user's cache directory.
            "});

    SubCommand::with_name("create_cache")
        .about("Creates an empty SQLite database for caching solutions")
        .arg(sqlite_cache)
}
