// Turn resolution: pure functions over an explicit game state

pub mod bag;
pub mod engine;
pub mod scorer;
pub mod validator;
pub mod words;

pub use bag::{Bag, DrawPolicy};
pub use engine::{TurnEngine, TurnOutcome};
pub use scorer::Scorer;
pub use validator::{Axis, PlacementValidator};
pub use words::WordExtractor;
