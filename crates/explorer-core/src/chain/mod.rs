pub mod state;

pub use state::ChainState;
