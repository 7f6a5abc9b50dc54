//! Application module containing the command line and the frame loop

mod game;

pub use game::run_game;
