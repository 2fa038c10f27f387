pub mod repl;
pub mod state;
pub mod view;

pub use state::AppState;
