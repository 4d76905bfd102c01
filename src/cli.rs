pub mod command;
pub mod io;
pub mod run;

pub use run::run_app;
