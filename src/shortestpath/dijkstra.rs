/*
 * Copyright (c) 2017, 2018, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Dijkstra's shortest path algorithm on reduced costs.
//!
//! The search starts at a set of source nodes (all at distance 0) and
//! stops as soon as the first *target* node is settled. Arcs are given by
//! three callbacks:
//!
//! - `neighs(u)` returns the arcs `(e, v)` leaving `u`,
//! - `usable(e)` tells whether `e` has positive (residual) capacity,
//! - `weight(e, u, v)` returns the (non-negative) reduced cost of `e`.
//!
//! Among nodes with equal distance the one with the smallest id is
//! settled first, so the search is deterministic.
//!
//! After a successful search with target distance $D$ the node
//! potentials can be updated by [`Dijkstra::potential_deltas`]: each
//! settled node $v$ with $d(v) < D$ gets $\delta(v) = D - d(v)$. Given
//! reduced costs $c(u,v) + \pi(u) - \pi(v) \ge 0$, the new potentials
//! $\pi(v) - \delta(v)$ keep all reduced costs non-negative and make
//! every arc on the shortest path tight.
//!
//! # Example
//!
//! ```
//! use rs_flow::shortestpath::Dijkstra;
//!
//! // arcs (tail, head, weight)
//! let arcs = [(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 1), (2, 3, 5)];
//! let neighs = |u: usize| {
//!     arcs.iter()
//!         .enumerate()
//!         .filter(move |(_, a)| a.0 == u)
//!         .map(|(e, a)| (e, a.1))
//! };
//!
//! let mut dijkstra = Dijkstra::new(4);
//! let t = dijkstra
//!     .run(Some(0), neighs, |_| true, |e, _, _| arcs[e].2, |v| v == 3)
//!     .unwrap();
//!
//! assert_eq!(t, Some(3));
//! assert_eq!(dijkstra.dist(3), Some(4));
//! assert_eq!(dijkstra.path(3).collect::<Vec<_>>(), vec![3, 2, 1]);
//! assert_eq!(dijkstra.source(3), 0);
//! ```

use super::Overflow;

use num_traits::{PrimInt, Signed};

use std::cmp::Reverse;
use std::collections::BinaryHeap;

const NONE: usize = usize::MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Unreached,
    Queued,
    Settled,
}

/// Dijkstra search with reusable data structures.
pub struct Dijkstra<D> {
    dist: Vec<D>,
    /// The incoming arc and its tail on the current shortest path.
    pred: Vec<(usize, usize)>,
    state: Vec<State>,
    /// All nodes reached by the latest search.
    reached: Vec<usize>,
    /// All settled nodes of the latest search in the order of settlement.
    settled: Vec<usize>,
    heap: BinaryHeap<Reverse<(D, usize)>>,
}

impl<D> Dijkstra<D>
where
    D: PrimInt + Signed,
{
    /// Create search data structures for graphs with `n` nodes.
    pub fn new(n: usize) -> Self {
        Dijkstra {
            dist: vec![D::zero(); n],
            pred: vec![(NONE, NONE); n],
            state: vec![State::Unreached; n],
            reached: Vec::with_capacity(n),
            settled: Vec::with_capacity(n),
            heap: BinaryHeap::with_capacity(n),
        }
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.dist.len()
    }

    /// Run the search.
    ///
    /// The search starts at all nodes in `sources` and stops at the first
    /// settled node `t` with `is_target(t) == true`, which is returned. If no
    /// target is reachable, `None` is returned and all reachable nodes have
    /// been settled.
    ///
    /// Returns an error if some distance is not representable.
    pub fn run<S, N, I, U, W, T>(
        &mut self,
        sources: S,
        neighs: N,
        usable: U,
        weight: W,
        is_target: T,
    ) -> Result<Option<usize>, Overflow>
    where
        S: IntoIterator<Item = usize>,
        N: Fn(usize) -> I,
        I: IntoIterator<Item = (usize, usize)>,
        U: Fn(usize) -> bool,
        W: Fn(usize, usize, usize) -> D,
        T: Fn(usize) -> bool,
    {
        self.clear();

        for s in sources {
            if self.state[s] == State::Unreached {
                self.state[s] = State::Queued;
                self.dist[s] = D::zero();
                self.reached.push(s);
                self.heap.push(Reverse((D::zero(), s)));
            }
        }

        while let Some(Reverse((d, u))) = self.heap.pop() {
            if self.state[u] == State::Settled || d > self.dist[u] {
                continue;
            }
            self.state[u] = State::Settled;
            self.settled.push(u);

            if is_target(u) {
                return Ok(Some(u));
            }

            for (e, v) in neighs(u) {
                if self.state[v] == State::Settled || !usable(e) {
                    continue;
                }
                let w = weight(e, u, v);
                debug_assert!(w >= D::zero(), "negative reduced cost on arc {}", e);
                let newdist = d.checked_add(&w).ok_or(Overflow)?;
                if self.state[v] == State::Unreached || newdist < self.dist[v] {
                    if self.state[v] == State::Unreached {
                        self.reached.push(v);
                    }
                    self.state[v] = State::Queued;
                    self.dist[v] = newdist;
                    self.pred[v] = (e, u);
                    self.heap.push(Reverse((newdist, v)));
                }
            }
        }

        Ok(None)
    }

    fn clear(&mut self) {
        for &u in &self.reached {
            self.state[u] = State::Unreached;
            self.pred[u] = (NONE, NONE);
        }
        self.reached.clear();
        self.settled.clear();
        self.heap.clear();
    }

    /// Return the distance label of `u` or `None` if `u` has not been reached.
    ///
    /// The label is exact for settled nodes and an upper bound otherwise.
    pub fn dist(&self, u: usize) -> Option<D> {
        if self.state[u] == State::Unreached {
            None
        } else {
            Some(self.dist[u])
        }
    }

    /// Return `true` if `u` has been settled by the latest search.
    pub fn is_settled(&self, u: usize) -> bool {
        self.state[u] == State::Settled
    }

    /// Return the incoming arc of `u` on its shortest path and its tail.
    ///
    /// Returns `None` for source nodes and nodes that have not been reached.
    pub fn pred(&self, u: usize) -> Option<(usize, usize)> {
        match self.pred[u] {
            (NONE, _) => None,
            p => Some(p),
        }
    }

    /// Return the arcs of the shortest path to `t`, starting at `t`.
    pub fn path(&self, t: usize) -> impl Iterator<Item = usize> + '_ {
        let mut u = t;
        std::iter::from_fn(move || {
            let (e, v) = self.pred(u)?;
            u = v;
            Some(e)
        })
    }

    /// Return the source node at which the shortest path to `t` starts.
    pub fn source(&self, t: usize) -> usize {
        let mut u = t;
        while let Some((_, v)) = self.pred(u) {
            u = v;
        }
        u
    }

    /// Return the nodes settled by the latest search.
    pub fn settled(&self) -> &[usize] {
        &self.settled
    }

    /// Return the potential changes for a search that ended at distance
    /// `dmax`.
    ///
    /// Returns the pairs `(v, dmax - d(v))` for all settled nodes with
    /// `d(v) < dmax`. All other nodes keep their potential.
    pub fn potential_deltas(&self, dmax: D) -> impl Iterator<Item = (usize, D)> + '_ {
        self.settled
            .iter()
            .filter(move |&&v| self.dist[v] < dmax)
            .map(move |&v| (v, dmax - self.dist[v]))
    }
}
