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

//! The residual graph of a network.
//!
//! Each arc `a` of the network gives two residual arcs: the forward arc
//! `2a` and the backward arc `2a + 1`. Hence the reverse of residual arc
//! `e` is always `e ^ 1`. The adjacency structure is fixed once it has
//! been built, only the residual capacities change.

use crate::network::{Network, ID};

use num_traits::{PrimInt, Signed};

pub(crate) struct ResidualGraph<F> {
    /// The residual arcs leaving node `u` are `adj[first[u]..first[u + 1]]`.
    first: Vec<usize>,
    /// Pairs `(residual arc, head node)`.
    adj: Vec<(usize, usize)>,
    /// The end nodes of each network arc.
    ends: Vec<(ID, ID)>,
    /// The residual capacity of each residual arc.
    residual: Vec<F>,
}

impl<F> ResidualGraph<F>
where
    F: PrimInt + Signed,
{
    pub fn new(net: &Network<F>) -> Self {
        let n = net.num_nodes();
        let m = net.num_arcs();

        // solvers reject malformed networks, the graph only needs the arc slots
        if net.is_malformed() {
            return ResidualGraph {
                first: vec![0; n + 1],
                adj: vec![],
                ends: vec![(0, 0); m],
                residual: vec![F::zero(); 2 * m],
            };
        }

        let mut first = vec![0; n + 1];
        for a in net.arcs() {
            first[net.tail(a) + 1] += 1;
            first[net.head(a) + 1] += 1;
        }
        for u in 0..n {
            first[u + 1] += first[u];
        }

        let mut pos = first.clone();
        let mut adj = vec![(0, 0); 2 * m];
        let mut ends = Vec::with_capacity(m);
        for a in net.arcs() {
            let (u, v) = net.enodes(a);
            adj[pos[u]] = (a << 1, v);
            pos[u] += 1;
            adj[pos[v]] = ((a << 1) | 1, u);
            pos[v] += 1;
            ends.push((u as ID, v as ID));
        }

        let mut g = ResidualGraph {
            first,
            adj,
            ends,
            residual: vec![F::zero(); 2 * m],
        };
        g.reset(net);
        g
    }

    /// Reset to the zero flow.
    pub fn reset(&mut self, net: &Network<F>) {
        for a in net.arcs() {
            self.residual[a << 1] = net.capacity(a);
            self.residual[(a << 1) | 1] = F::zero();
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.first.len() - 1
    }

    /// Return the residual arcs leaving `u` together with their head nodes.
    pub fn neighs(&self, u: usize) -> &[(usize, usize)] {
        &self.adj[self.first[u]..self.first[u + 1]]
    }

    pub fn tail(&self, e: usize) -> usize {
        let (u, v) = self.ends[e >> 1];
        if (e & 1) == 0 {
            u as usize
        } else {
            v as usize
        }
    }

    pub fn residual(&self, e: usize) -> F {
        self.residual[e]
    }

    /// Return the flow on network arc `a`.
    pub fn flow(&self, a: usize) -> F {
        self.residual[(a << 1) | 1]
    }

    /// Send `df` units of flow along residual arc `e`.
    pub fn push(&mut self, e: usize, df: F) {
        debug_assert!(df <= self.residual[e], "push exceeds residual capacity");
        self.residual[e] = self.residual[e] - df;
        self.residual[e ^ 1] = self.residual[e ^ 1] + df;
    }
}

/// Return the cost of residual arc `e` given the cost of its network arc.
pub(crate) fn oriented<F: Signed>(e: usize, cost: F) -> F {
    if (e & 1) == 0 {
        cost
    } else {
        -cost
    }
}

#[cfg(test)]
mod tests {
    use super::ResidualGraph;
    use crate::Network;

    #[test]
    fn test_adjacency() {
        let net = Network::<i32>::new_with(|net| {
            net.add_arc_with_capacity(0, 1, 3)?;
            net.add_arc_with_capacity(1, 2, 4)?;
            net.add_arc_with_capacity(0, 2, 5)?;
            Ok(())
        })
        .unwrap();
        let mut g = ResidualGraph::new(&net);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.neighs(0), &[(0, 1), (4, 2)]);
        assert_eq!(g.neighs(1), &[(1, 0), (2, 2)]);
        assert_eq!(g.neighs(2), &[(3, 1), (5, 0)]);
        assert_eq!(g.tail(2), 1);
        assert_eq!(g.tail(3), 2);

        g.push(2, 3);
        assert_eq!(g.residual(2), 1);
        assert_eq!(g.residual(3), 3);
        assert_eq!(g.flow(1), 3);

        g.reset(&net);
        assert_eq!(g.flow(1), 0);
        assert_eq!(g.residual(2), 4);
    }
}
