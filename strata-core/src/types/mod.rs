//! Matrix and order types shared by the resolver and the estimator.

pub mod causal_order;
pub mod precedence;
pub mod prior_knowledge;

pub use causal_order::{validate_nodes, CausalOrder};
pub use precedence::PrecedenceMatrix;
pub use prior_knowledge::PriorKnowledge;
