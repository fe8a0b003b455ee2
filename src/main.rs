use clap::Parser;
use log::{info, LevelFilter};

mod args;
mod enr;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    info!("args: {:?}", args);

    if let Err(e) = enr::run_report_command(&args) {
        enr::report_error(&e);
        std::process::exit(1);
    }
}
