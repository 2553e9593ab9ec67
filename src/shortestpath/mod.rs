// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Shortest path algorithms used for computing augmenting paths and
//! node potentials.
//!
//! The routines do not depend on a particular graph type. The graph is
//! given by callbacks returning the adjacent arcs of a node, so the same
//! code runs on the residual graph of a network and on the alternating
//! graph of a bipartite matching.

use thiserror::Error;

pub mod dijkstra;
pub use self::dijkstra::Dijkstra;

pub mod moorebellmanford;

/// A path length exceeded the range of the number type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("path length overflow")]
pub struct Overflow;
