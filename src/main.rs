use std::process;

use clap::Parser;
use log::error;

use sdl2_testgl::Options;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(err) => {
            let _ = err.print();
            process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(err) = sdl2_testgl::run(&options) {
        error!("{}", err);
        process::exit(2);
    }
}
