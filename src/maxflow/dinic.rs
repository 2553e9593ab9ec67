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

//! This module implements Dinic' max flow algorithm
//!
//! # Example
//!
//! ```
//! use rs_flow::maxflow::Dinic;
//! use rs_flow::{Network, Status};
//!
//! let mut net = Network::<i64>::new();
//! for &(u, v, c) in &[(0, 1, 20), (0, 2, 30), (0, 3, 10), (1, 2, 40), (1, 4, 30),
//!                     (2, 3, 10), (2, 4, 20), (3, 2, 5), (3, 4, 20)] {
//!     net.add_arc_with_capacity(u, v, c).unwrap();
//! }
//!
//! let mut maxflow = Dinic::new(&net);
//! assert_eq!(maxflow.solve(0, 4), Status::Optimal);
//! assert_eq!(maxflow.optimal_flow(), 60);
//! assert!(net.arcs().all(|a| maxflow.flow(a) >= 0 && maxflow.flow(a) <= net.capacity(a)));
//! assert!((1..4).all(|u| {
//!     net.outarcs(u).map(|a| maxflow.flow(a)).sum::<i64>() ==
//!     net.inarcs(u).map(|a| maxflow.flow(a)).sum::<i64>()
//! }));
//!
//! assert_eq!(maxflow.source_side_min_cut(), vec![0]);
//! assert_eq!(maxflow.sink_side_min_cut(), vec![1, 2, 3, 4]);
//! ```

use crate::network::Network;
use crate::residual::ResidualGraph;
use crate::solver::{Solver, Status};

use log::{debug, trace};
use num_traits::{PrimInt, Signed};

use std::collections::VecDeque;

/// The dinic max-flow algorithm.
pub struct Dinic<'a, F> {
    net: &'a Network<F>,
    graph: ResidualGraph<F>,
    /// The BFS level of each node, `n` for unreached nodes.
    dist: Vec<usize>,
    /// The next untried position in the adjacency list of each node.
    current: Vec<usize>,
    queue: VecDeque<usize>,
    /// The residual arcs on the current augmenting path.
    path: Vec<usize>,
    value: F,
    status: Status,
}

impl<'a, F> Dinic<'a, F>
where
    F: PrimInt + Signed,
{
    /// Create a new Dinic algorithm instance for a network.
    pub fn new(net: &'a Network<F>) -> Self {
        let n = net.num_nodes();
        Dinic {
            net,
            graph: ResidualGraph::new(net),
            dist: vec![n; n],
            current: vec![0; n],
            queue: VecDeque::with_capacity(n),
            path: Vec::with_capacity(n),
            value: F::zero(),
            status: Status::NotSolved,
        }
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &'a Network<F> {
        self.net
    }

    /// Return the value of the latest computed maximum flow.
    pub fn value(&self) -> F {
        self.value
    }

    /// Return the value of the latest computed maximum flow.
    ///
    /// This is the same as [`Dinic::value`].
    pub fn optimal_flow(&self) -> F {
        self.value
    }

    /// Return the flow value on arc `a`.
    pub fn flow(&self, a: usize) -> F {
        self.graph.flow(a)
    }

    /// Return the status of the latest solve call.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Solve the maxflow problem.
    ///
    /// The method solves the max flow problem from the source node
    /// `src` to the sink node `snk` using the capacities of the network.
    ///
    /// Returns [`Status::BadInput`] if `src == snk`, if one of them is not a
    /// node of the network or if some capacity is negative. Returns
    /// [`Status::PossibleOverflow`] if neither the total capacity leaving
    /// `src` nor the total capacity entering `snk` is representable.
    pub fn solve(&mut self, src: usize, snk: usize) -> Status {
        let n = self.net.num_nodes();

        self.graph.reset(self.net);
        self.value = F::zero();
        for d in self.dist.iter_mut() {
            *d = n;
        }

        if let Err(status) = self.check_input(src, snk) {
            debug!("dinic: rejected input ({:?})", status);
            self.status = status;
            return status;
        }

        debug!(
            "dinic: {} nodes, {} arcs, source {}, sink {}",
            n,
            self.net.num_arcs(),
            src,
            snk
        );

        let mut nphases = 0;
        while self.search(src, snk) {
            nphases += 1;
            let df = self.augment(src, snk);
            trace!("dinic: phase {} (sink level {})", nphases, self.dist[snk]);
            self.value = self.value + df;
        }

        debug!("dinic: finished after {} phases", nphases);
        self.status = Status::Optimal;
        self.status
    }

    /// Return the nodes on the source side of a minimum cut.
    ///
    /// These are exactly the nodes reachable from the source in the
    /// residual graph of the latest maximum flow, in increasing order.
    /// Returns an empty list if the latest solve was not successful.
    pub fn source_side_min_cut(&self) -> Vec<usize> {
        if self.status != Status::Optimal {
            return vec![];
        }
        let n = self.net.num_nodes();
        (0..n).filter(|&u| self.dist[u] < n).collect()
    }

    /// Return the nodes on the sink side of a minimum cut.
    ///
    /// This is the complement of [`Dinic::source_side_min_cut`].
    pub fn sink_side_min_cut(&self) -> Vec<usize> {
        if self.status != Status::Optimal {
            return vec![];
        }
        let n = self.net.num_nodes();
        (0..n).filter(|&u| self.dist[u] >= n).collect()
    }

    /// Return the minimal cut associated with the last maximum flow.
    ///
    /// This is the same as [`Dinic::source_side_min_cut`].
    pub fn mincut(&self) -> Vec<usize> {
        self.source_side_min_cut()
    }

    fn check_input(&self, src: usize, snk: usize) -> Result<(), Status> {
        let n = self.net.num_nodes();
        if src >= n || snk >= n || src == snk || self.net.is_malformed() {
            return Err(Status::BadInput);
        }

        // The flow value is bounded by both sums, it suffices that one of
        // them is representable.
        let out_cap = self
            .graph
            .neighs(src)
            .iter()
            .filter(|&&(e, _)| (e & 1) == 0)
            .try_fold(F::zero(), |sum, &(e, _)| sum.checked_add(&self.graph.residual(e)));
        let in_cap = self
            .graph
            .neighs(snk)
            .iter()
            .filter(|&&(e, _)| (e & 1) == 1)
            .try_fold(F::zero(), |sum, &(e, _)| sum.checked_add(&self.graph.residual(e ^ 1)));
        if out_cap.is_none() && in_cap.is_none() {
            return Err(Status::PossibleOverflow);
        }

        Ok(())
    }

    /// Compute the BFS levels from `src`.
    ///
    /// Returns `true` if `snk` is reachable. If it is not reachable, the
    /// levels of all nodes reachable from `src` have been computed.
    fn search(&mut self, src: usize, snk: usize) -> bool {
        let n = self.net.num_nodes();

        for d in self.dist.iter_mut() {
            *d = n;
        }
        self.dist[src] = 0;

        self.queue.clear();
        self.queue.push_back(src);

        while let Some(u) = self.queue.pop_front() {
            let d = self.dist[u];
            if d >= self.dist[snk] {
                // all nodes on the sink level have been found
                return true;
            }

            for &(e, v) in self.graph.neighs(u) {
                if self.dist[v] == n && self.graph.residual(e) > F::zero() {
                    self.dist[v] = d + 1;
                    self.queue.push_back(v);
                }
            }
        }

        self.dist[snk] < n
    }

    /// Compute a blocking flow in the current level graph.
    ///
    /// Returns the amount of flow sent from `src` to `snk`.
    fn augment(&mut self, src: usize, snk: usize) -> F {
        for c in self.current.iter_mut() {
            *c = 0;
        }
        self.path.clear();

        let mut df = F::zero();
        let mut u = src;
        loop {
            if u == snk {
                let amount = self
                    .path
                    .iter()
                    .fold(F::max_value(), |amount, &e| amount.min(self.graph.residual(e)));
                for &e in &self.path {
                    self.graph.push(e, amount);
                }
                df = df + amount;

                // continue from the tail of the first saturated arc
                let k = self
                    .path
                    .iter()
                    .position(|&e| self.graph.residual(e).is_zero())
                    .unwrap_or(0);
                u = self.graph.tail(self.path[k]);
                self.path.truncate(k);
                continue;
            }

            let neighs = self.graph.neighs(u);
            let mut next = None;
            while self.current[u] < neighs.len() {
                let (e, v) = neighs[self.current[u]];
                if self.dist[v] == self.dist[u] + 1 && self.graph.residual(e) > F::zero() {
                    next = Some((e, v));
                    break;
                }
                self.current[u] += 1;
            }

            if let Some((e, v)) = next {
                self.path.push(e);
                u = v;
            } else if let Some(e) = self.path.pop() {
                // u is a dead end, retreat one arc
                u = self.graph.tail(e);
                self.current[u] += 1;
            } else {
                break;
            }
        }

        df
    }
}

impl<'a, F> Solver for Dinic<'a, F>
where
    F: PrimInt + Signed,
{
    type Value = F;

    fn status(&self) -> Status {
        self.status
    }

    fn objective_value(&self) -> F {
        self.value
    }
}

/// Solve the maxflow problem using the algorithm of Dinic.
///
/// The function solves the max flow problem from the source node
/// `src` to the sink node `snk` with the capacities of the network.
///
/// The function returns the flow value, the flow on each arc and the
/// nodes on the source side of a minimal cut. If the problem could not be
/// solved, the status is returned as error.
pub fn dinic<F>(net: &Network<F>, src: usize, snk: usize) -> Result<(F, Vec<F>, Vec<usize>), Status>
where
    F: PrimInt + Signed,
{
    let mut maxflow = Dinic::new(net);
    match maxflow.solve(src, snk) {
        Status::Optimal => Ok((
            maxflow.value(),
            net.arcs().map(|a| maxflow.flow(a)).collect(),
            maxflow.mincut(),
        )),
        status => Err(status),
    }
}
