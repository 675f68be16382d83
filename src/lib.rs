pub mod config;
pub mod input;
mod log;
pub mod output;
pub mod rainfall;
pub mod resolver;
pub mod rollup;
pub mod scenario;
pub mod simulator;
pub mod utils;
use input::Input;
use std::error::Error;
use std::time::Instant;

pub fn run(input_args: &InputArgs) -> Result<(), Box<dyn Error>> {
    log::show_greeting();

    let begin = Instant::now();

    log::input_reading_line(&input_args.path);
    let input = Input::build(&input_args.path)?;
    let config = input.scenario.build_scenario_config()?;

    log::scenario_greeting(&config);

    let outcome = scenario::evaluate(&input.rainfall, &config)?;

    log::simulation_stats(&outcome.ledger, &outcome.annual);

    log::output_generation_line(&input_args.path);
    output::generate_outputs(
        &outcome.ledger,
        &outcome.monthly,
        &outcome.annual,
        &input_args.path,
    )?;

    log::show_farewell(begin.elapsed());

    Ok(())
}

pub struct InputArgs {
    pub path: String,
}

impl InputArgs {
    pub fn build(args: &[String]) -> Result<Self, &'static str> {
        if args.len() < 2 {
            return Err("Not enough arguments [PATH]");
        }

        let path = args[1].clone();

        Ok(Self { path })
    }
}
