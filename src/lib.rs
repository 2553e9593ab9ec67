// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Integer network flow algorithms.
//!
//! The crate provides three independent solvers:
//!
//! - [`maxflow::Dinic`] computes maximum flows and minimum cuts,
//! - [`mcf::SuccessiveShortestPath`] computes minimum cost flows,
//! - [`LinearSumAssignment`] computes minimum cost assignments in
//!   bipartite graphs.
//!
//! The flow solvers work on a [`Network`], which is built once and then
//! borrowed by the solver. All computations use checked integer
//! arithmetic, a problem whose values might not be representable is
//! rejected with an appropriate [`Status`].
//!
//! # Example
//!
//! ```
//! use rs_flow::mcf::SuccessiveShortestPath;
//! use rs_flow::{Network, Solver, Status};
//!
//! // two workers, two tasks
//! let net = Network::<i64>::new_with(|net| {
//!     net.add_arc(0, 1, 1, 0)?;
//!     net.add_arc(0, 2, 1, 0)?;
//!     net.add_arc(1, 3, 1, 8)?;
//!     net.add_arc(1, 4, 1, 6)?;
//!     net.add_arc(2, 3, 1, 5)?;
//!     net.add_arc(2, 4, 1, 9)?;
//!     net.add_arc(3, 5, 1, 0)?;
//!     net.add_arc(4, 5, 1, 0)?;
//!     net.set_supply(0, 2)?;
//!     net.set_supply(5, -2)?;
//!     Ok(())
//! })?;
//!
//! let mut mcf = SuccessiveShortestPath::new(&net);
//! assert_eq!(mcf.solve(), Status::Optimal);
//! assert_eq!(mcf.objective_value(), 11);
//! # Ok::<(), rs_flow::Error>(())
//! ```

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod network;
pub use self::network::Network;

mod residual;

pub mod solver;
pub use self::solver::{Solver, Status};

// # Algorithms

pub mod assignment;
pub use self::assignment::LinearSumAssignment;
pub mod maxflow;
pub use self::maxflow::Dinic;
pub mod mcf;
pub use self::mcf::SuccessiveShortestPath;
pub mod shortestpath;

// # File formats

#[cfg(feature = "dimacs")]
pub mod dimacs;
