use std::env;

mod assemble;
mod cli;
mod config;
mod error;
mod stage;
mod template;

fn main() {
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = env::args().skip(1).collect::<Vec<_>>();

    cli::run(args);
}
