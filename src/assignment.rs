/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Minimum cost assignment in bipartite graphs.
//!
//! Every *left* node must be assigned to a distinct *right* node along
//! one of the given arcs such that the total cost is minimal. Right nodes
//! may remain unassigned.
//!
//! The left nodes are matched one after another by shortest augmenting
//! paths in the alternating graph (Hungarian method). Each left node `i`
//! and right node `j` carries a potential `u(i)` resp. `v(j)` with
//! `cost(i,j) - u(i) - v(j) >= 0` for all arcs and equality for all
//! matched arcs.
//!
//! # Example
//!
//! ```
//! use rs_flow::{LinearSumAssignment, Status};
//!
//! let costs = [[90, 76, 75, 70], [35, 85, 55, 65], [125, 95, 90, 105], [45, 110, 95, 115]];
//!
//! let mut assignment = LinearSumAssignment::<i64>::new();
//! for (i, row) in costs.iter().enumerate() {
//!     for (j, &c) in row.iter().enumerate() {
//!         assignment.add_arc_with_cost(i, j, c).unwrap();
//!     }
//! }
//!
//! assert_eq!(assignment.solve(), Status::Optimal);
//! assert_eq!(assignment.optimal_cost(), 265);
//! assert_eq!(assignment.right_mate(0), Some(3));
//! assert_eq!(assignment.assignment_cost(3), Some(45));
//! ```

use crate::error::{Error, Result};
use crate::network::ID;
use crate::shortestpath::Dijkstra;
use crate::solver::{cost_range_fits, Solver, Status};

use either::Either;
use log::{debug, trace};
use num_traits::{PrimInt, Signed};

use std::ops::Range;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

const NONE: usize = usize::MAX;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct ArcData<F> {
    left: ID,
    right: ID,
    cost: F,
}

/// A linear assignment problem and its solver.
///
/// Left and right nodes are numbered independently starting at 0. As for
/// [`Network`](crate::Network) the node sets grow with the largest id
/// referenced by an arc.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LinearSumAssignment<F = i64> {
    arcs: Vec<ArcData<F>>,
    nleft: usize,
    nright: usize,

    /// The matched arc of each left node.
    left_match: Vec<usize>,
    /// The matched arc of each right node.
    right_match: Vec<usize>,
    left_pot: Vec<F>,
    right_pot: Vec<F>,
    cost: F,
    status: Status,
}

impl<F> Default for LinearSumAssignment<F>
where
    F: PrimInt + Signed,
{
    fn default() -> Self {
        LinearSumAssignment {
            arcs: vec![],
            nleft: 0,
            nright: 0,
            left_match: vec![],
            right_match: vec![],
            left_pot: vec![],
            right_pot: vec![],
            cost: F::zero(),
            status: Status::NotSolved,
        }
    }
}

impl<F> LinearSumAssignment<F>
where
    F: PrimInt + Signed,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` left nodes without arcs and return the range of their ids.
    pub fn add_left_nodes(&mut self, n: usize) -> Result<Range<usize>> {
        let first = self.nleft;
        match first.checked_add(n) {
            Some(k) if k <= ID::MAX as usize => self.nleft = k,
            _ => return Err(Error::invalid("number of left nodes", "at most 2^32 - 1", n)),
        }
        self.status = Status::NotSolved;
        Ok(first..self.nleft)
    }

    pub fn add_right_nodes(&mut self, n: usize) -> Result<Range<usize>> {
        let first = self.nright;
        match first.checked_add(n) {
            Some(k) if k <= ID::MAX as usize => self.nright = k,
            _ => return Err(Error::invalid("number of right nodes", "at most 2^32 - 1", n)),
        }
        self.status = Status::NotSolved;
        Ok(first..self.nright)
    }

    /// Add an arc from left node `left` to right node `right`.
    ///
    /// Returns the index of the new arc. The cost must be non-negative.
    pub fn add_arc_with_cost(&mut self, left: usize, right: usize, cost: F) -> Result<usize> {
        if cost < F::zero() {
            return Err(Error::invalid("assignment cost", "non-negative", cost.to_i128().unwrap_or(-1)));
        }
        if left >= ID::MAX as usize {
            return Err(Error::invalid("left node id", "smaller than 2^32 - 1", left));
        }
        if right >= ID::MAX as usize {
            return Err(Error::invalid("right node id", "smaller than 2^32 - 1", right));
        }

        self.nleft = self.nleft.max(left + 1);
        self.nright = self.nright.max(right + 1);
        self.arcs.push(ArcData {
            left: left as ID,
            right: right as ID,
            cost,
        });
        self.status = Status::NotSolved;
        Ok(self.arcs.len() - 1)
    }

    /// Return the number of left nodes.
    pub fn num_nodes(&self) -> usize {
        self.nleft
    }

    pub fn num_right_nodes(&self) -> usize {
        self.nright
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub fn left_node(&self, a: usize) -> usize {
        self.arcs[a].left as usize
    }

    pub fn right_node(&self, a: usize) -> usize {
        self.arcs[a].right as usize
    }

    pub fn cost(&self, a: usize) -> F {
        self.arcs[a].cost
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Return the cost of the latest computed assignment.
    pub fn optimal_cost(&self) -> F {
        self.cost
    }

    /// Return the right node assigned to left node `left`.
    pub fn right_mate(&self, left: usize) -> Option<usize> {
        self.matched_arc(left).map(|a| self.right_node(a))
    }

    /// Return the left node assigned to right node `right`.
    pub fn left_mate(&self, right: usize) -> Option<usize> {
        match self.right_match.get(right) {
            Some(&a) if self.status == Status::Optimal && a != NONE => Some(self.left_node(a)),
            _ => None,
        }
    }

    /// Return the cost of the arc assigned to left node `left`.
    pub fn assignment_cost(&self, left: usize) -> Option<F> {
        self.matched_arc(left).map(|a| self.cost(a))
    }

    /// Return the dual value of left node `left`.
    pub fn left_potential(&self, left: usize) -> F {
        self.left_pot.get(left).copied().unwrap_or_else(F::zero)
    }

    /// Return the dual value of right node `right`.
    pub fn right_potential(&self, right: usize) -> F {
        self.right_pot.get(right).copied().unwrap_or_else(F::zero)
    }

    fn matched_arc(&self, left: usize) -> Option<usize> {
        match self.left_match.get(left) {
            Some(&a) if self.status == Status::Optimal && a != NONE => Some(a),
            _ => None,
        }
    }

    /// Compute a minimum cost assignment of all left nodes.
    ///
    /// Returns [`Status::Infeasible`] if some left node cannot be assigned
    /// and [`Status::PossibleOverflow`] if the costs are too large for the
    /// potentials or the total cost to be representable.
    pub fn solve(&mut self) -> Status {
        self.status = match self.run() {
            Ok(()) => Status::Optimal,
            Err(status) => status,
        };
        debug!(
            "assignment: {:?}, cost {}",
            self.status,
            self.cost.to_i128().unwrap_or(0)
        );
        self.status
    }

    fn run(&mut self) -> std::result::Result<(), Status> {
        let (nl, nr) = (self.nleft, self.nright);

        self.cost = F::zero();
        self.left_match = vec![NONE; nl];
        self.right_match = vec![NONE; nr];
        self.left_pot = vec![F::zero(); nl];
        self.right_pot = vec![F::zero(); nr];

        if self
            .arcs
            .iter()
            .any(|a| a.left as usize >= nl || a.right as usize >= nr || a.cost < F::zero())
        {
            return Err(Status::BadInput);
        }
        if !cost_range_fits(nl + nr, self.arcs.iter().map(|a| a.cost)) {
            return Err(Status::PossibleOverflow);
        }

        debug!("assignment: {} x {} nodes, {} arcs", nl, nr, self.arcs.len());

        // arcs grouped by left node
        let mut first = vec![0; nl + 1];
        for arc in &self.arcs {
            first[arc.left as usize + 1] += 1;
        }
        for i in 0..nl {
            first[i + 1] += first[i];
        }
        if let Some(i) = (0..nl).find(|&i| first[i] == first[i + 1]) {
            debug!("assignment: left node {} has no arcs", i);
            return Err(Status::Infeasible);
        }
        let mut pos = first.clone();
        let mut adj = vec![0; self.arcs.len()];
        for (a, arc) in self.arcs.iter().enumerate() {
            let i = arc.left as usize;
            adj[pos[i]] = a;
            pos[i] += 1;
        }

        // Column minima are valid initial potentials only if all right
        // nodes get matched. Otherwise unmatched right nodes must keep the
        // common potential 0.
        let mut reached = vec![false; nr];
        for arc in self.arcs.iter().filter(|_| nl == nr) {
            let j = arc.right as usize;
            if !reached[j] || arc.cost < self.right_pot[j] {
                self.right_pot[j] = arc.cost;
                reached[j] = true;
            }
        }

        let mut dijkstra = Dijkstra::new(nl + nr);
        for i in 0..nl {
            self.augment(&mut dijkstra, &first, &adj, i)?;
        }

        let mut cost = F::zero();
        for &a in &self.left_match {
            cost = cost.checked_add(&self.arcs[a].cost).ok_or(Status::PossibleOverflow)?;
        }
        self.cost = cost;

        Ok(())
    }

    /// Match left node `i` by a shortest augmenting path.
    ///
    /// The search graph has the left nodes `0..nl` and the right nodes
    /// `nl..nl + nr`. Residual arc `2a` is the unmatched arc `a` from left to
    /// right, `2a + 1` the matched arc `a` from right to left.
    fn augment(
        &mut self,
        dijkstra: &mut Dijkstra<F>,
        first: &[usize],
        adj: &[usize],
        i: usize,
    ) -> std::result::Result<(), Status> {
        let nl = self.nleft;
        let arcs = &self.arcs;
        let left_match = &self.left_match;
        let right_match = &self.right_match;
        let left_pot = &self.left_pot;
        let right_pot = &self.right_pot;

        let target = dijkstra
            .run(
                Some(i),
                |u| {
                    if u < nl {
                        Either::Left(
                            adj[first[u]..first[u + 1]]
                                .iter()
                                .filter(move |&&a| left_match[u] != a)
                                .map(move |&a| (a << 1, nl + arcs[a].right as usize)),
                        )
                    } else {
                        let a = right_match[u - nl];
                        let matched = if a == NONE {
                            None
                        } else {
                            Some(((a << 1) | 1, arcs[a].left as usize))
                        };
                        Either::Right(matched.into_iter())
                    }
                },
                |_| true,
                |e, _, _| {
                    let arc = &arcs[e >> 1];
                    let rc = arc.cost - left_pot[arc.left as usize] - right_pot[arc.right as usize];
                    if (e & 1) == 0 {
                        rc
                    } else {
                        debug_assert!(rc.is_zero(), "matched arc {} is not tight", e >> 1);
                        -rc
                    }
                },
                |v| v >= nl && right_match[v - nl] == NONE,
            )
            .map_err(|_| Status::PossibleOverflow)?;

        let t = match target {
            Some(t) => t,
            None => {
                debug!("assignment: no augmenting path for left node {}", i);
                return Err(Status::Infeasible);
            }
        };

        let dmax = dijkstra.dist(t).unwrap_or_else(F::zero);
        for (v, delta) in dijkstra.potential_deltas(dmax) {
            if v < nl {
                self.left_pot[v] = self.left_pot[v].checked_add(&delta).ok_or(Status::PossibleOverflow)?;
            } else {
                let j = v - nl;
                self.right_pot[j] = self.right_pot[j].checked_sub(&delta).ok_or(Status::PossibleOverflow)?;
            }
        }

        let mut len = 0;
        for e in dijkstra.path(t) {
            if (e & 1) == 0 {
                let a = e >> 1;
                self.left_match[self.arcs[a].left as usize] = a;
                self.right_match[self.arcs[a].right as usize] = a;
                len += 1;
            }
        }

        trace!(
            "assignment: left node {} -> right node {}, {} new arcs, distance {}",
            i,
            t - nl,
            len,
            dmax.to_i128().unwrap_or(0)
        );

        Ok(())
    }
}

impl<F> Solver for LinearSumAssignment<F>
where
    F: PrimInt + Signed,
{
    type Value = F;

    fn status(&self) -> Status {
        self.status
    }

    fn objective_value(&self) -> F {
        self.cost
    }
}
