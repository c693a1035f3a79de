mod headless;
mod loop_handler;

pub use headless::{run_headless, HeadlessQuery};
pub use loop_handler::run;
