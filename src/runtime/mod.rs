pub mod paper;
pub mod runner;
pub mod state_store;

pub use paper::{PaperHost, PlacementRequest};
pub use runner::{RunOutcome, StrategyRunner};
pub use state_store::StateStore;
