// Application state and input handling for the station sunburst viewer

pub mod input;
pub mod state;

pub use input::{handle_input, handle_mouse};
pub use state::App;
