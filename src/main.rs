use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use minterp::{runner, Config, Interpreter};
use std::fs;
use std::path::Path;
use std::time::Duration;

fn main() {
    let matches = Command::new("minterp")
        .about("Run a script and show the variables it leaves behind")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("max-iterations")
                .long("max-iterations")
                .help("Abort after this many while-loop iterations")
                .value_name("N")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Abort a script that loops for longer than this")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("dump")
                .short('d')
                .long("dump")
                .help("Print every variable and array element after the run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log diagnostics (-v) or evaluation detail (-vv)")
                .action(ArgAction::Count),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = Config::default();
    if let Some(&iterations) = matches.get_one::<u64>("max-iterations") {
        config = config.with_max_loop_iterations(iterations);
    }
    if let Some(&millis) = matches.get_one::<u64>("timeout-ms") {
        config = config.with_timeout(Duration::from_millis(millis));
    }

    if let Some(file_path) = matches.get_one::<String>("file") {
        let interpreter = run_file(file_path, config);
        if matches.get_flag("dump") {
            dump(&interpreter);
        }
    }
}

fn run_file(path: &str, config: Config) -> Interpreter {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let filename = path.display().to_string();
    match runner::run(&source, Some(&filename), config) {
        Some(interpreter) => interpreter,
        None => std::process::exit(1),
    }
}

fn dump(interpreter: &Interpreter) {
    let environment = interpreter.environment();
    for (name, value) in environment.variables() {
        println!("{} = {}", name, value);
    }
    for (name, elements) in environment.arrays() {
        for (index, value) in elements {
            println!("{}[{}] = {}", name, index, value);
        }
    }
}
