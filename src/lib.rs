//! Finite Markov Decision Processes: table-driven models and noisy grid worlds,
//! queried by planners through [`mdps::Mdp`].

pub mod common;
pub mod config;
pub mod errors;
pub mod mdps;

pub use common::defs::*;
pub use common::geometry::*;
pub use common::utils::*;
pub use config::*;
pub use errors::*;
pub use mdps::{grid::*, simulator::*, table::*, terminal::*, Mdp};
