use reversible_calc::EngineConfig;
use reversible_calc::cli::format::format_error;
use reversible_calc::cli::session::DEMO_SCRIPT;
use reversible_calc::cli::{CliError, OutputMode, Session, build_cli, repl, run_lines};
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    init_tracing(&config.log_filter);

    let mut session = Session::new(config.build_history());

    let result = match matches.subcommand() {
        Some(("demo", _)) => {
            if output_mode == OutputMode::Human {
                println!("=== Reversible Calculator ===\n");
            }
            run_lines(&mut session, DEMO_SCRIPT.iter().copied(), output_mode)
        }
        Some(("run", sub)) => {
            let path = sub
                .get_one::<String>("file")
                .map(String::as_str)
                .unwrap_or_default();
            run_script(&mut session, Path::new(path), output_mode)
        }
        Some(("exec", sub)) => {
            let lines = sub
                .get_many::<String>("lines")
                .into_iter()
                .flatten()
                .map(String::as_str);
            run_lines(&mut session, lines, output_mode)
        }
        _ if std::io::stdin().is_terminal() => repl::run_repl(&mut session, output_mode),
        _ => process::exit(repl::run_pipe(
            &mut session,
            std::io::stdin().lock(),
            output_mode,
        )),
    };

    if let Err(e) = result {
        eprintln!("{}", format_error(&e, output_mode));
        process::exit(1);
    }
}

fn load_config(matches: &clap::ArgMatches) -> Result<EngineConfig, CliError> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => EngineConfig::load(Path::new(path))?,
        None => EngineConfig::load_or_default()?,
    };

    // Command line flags override the file
    if let Some(initial) = matches.get_one::<i64>("initial") {
        config.initial_value = *initial;
    }
    if let Some(max_history) = matches.get_one::<usize>("max-history") {
        config.max_history = Some(*max_history);
    }
    if let Some(filter) = matches.get_one::<String>("log-level") {
        config.log_filter = filter.clone();
    }
    config.validate()?;

    Ok(config)
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_script(session: &mut Session, path: &Path, mode: OutputMode) -> Result<(), CliError> {
    let contents = std::fs::read_to_string(path)?;
    run_lines(session, contents.lines(), mode)
}
