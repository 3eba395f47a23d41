pub mod board;

pub use board::{Board, Effect, Event, Outcome, Update};
