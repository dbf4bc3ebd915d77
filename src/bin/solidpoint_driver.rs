use log::LevelFilter;
use solidpoint::prelude::*;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "solidpoint_driver",
    about = "Applies a strain path to all points of a solid model and prints the history of the first point"
)]
struct Options {
    /// JSON file with the model configuration and the strain increments
    input: String,

    /// Shows debug messages
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // logging
    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    // load data
    let input = DriverInput::read_json(&options.input)?;
    log::info!(
        "running {} with {} elements and {} steps",
        input.config.model,
        input.n_element,
        input.increments.len()
    );

    // run the path
    let mut driver = StrainPathDriver::new(&input)?;
    driver.run(&input.delta_strains())?;

    // message
    let n_plastic = driver.stats.iter().filter(|s| s.n_plastic > 0).count();
    let thin_line = format!("{:─^1$}", "", 100);
    println!("\n{}", thin_line);
    print!("{}", driver);
    println!("{}", thin_line);
    println!("{} of {} steps with plastic loading\n", n_plastic, driver.stats.len());
    Ok(())
}
