//! hopfield-core: binary Hopfield associative memory with Hebbian storage
//!
//! - `network`: state container (states, weights, update bookkeeping)
//! - `hebbian`: additive outer-product storage
//! - `dynamics`: synchronous / asynchronous / stochastic updates and convergence
//!
//! A network is single-threaded state; move it between threads freely but do
//! not share it without external synchronization.

pub mod activation;
pub mod dynamics;
pub mod error;
pub mod hebbian;
pub mod network;

// Re-exports
pub use activation::{logistic, sign};
pub use dynamics::{Recall, RecallBudget, UpdateMode};
pub use error::{HopfieldError, HopfieldResult};
pub use hebbian::hebbian_increment;
pub use network::HopfieldNetwork;
