use clap::{App, Arg};
use dpllsat::formula::dimacs::{parse, parse_file};
use dpllsat::*;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .about("Decides satisfiability of a DIMACS CNF formula with DPLL")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .arg(
            Arg::with_name("print-formula")
                .long("print-formula")
                .help("print the parsed formula before solving"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("only report the result through the exit code"),
        )
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_file(path)
    } else {
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            if matches.is_present("print-formula") {
                println!("c {}", f);
            }

            let mut solver = Solver::new(f);
            let result = solver.solve();
            log::info!("{:?}", solver.stats());

            if !matches.is_present("quiet") {
                match result {
                    SatResult::Satisfiable => println!("s SATISFIABLE"),
                    SatResult::Unsatisfiable => println!("s UNSATISFIABLE"),
                }
            }

            let exit_code = match result {
                SatResult::Satisfiable => 0,
                SatResult::Unsatisfiable => 1,
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    }
}
