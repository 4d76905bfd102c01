use contact_book::prelude::run_app;
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // Every failure is reported and the process still exits normally
    if let Err(e) = run_app() {
        eprintln!("Error: {e}");
    }
}
