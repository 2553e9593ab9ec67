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

//! Successive shortest path algorithm for minimum cost flows.
//!
//! The algorithm maintains a flow satisfying the reduced cost optimality
//! conditions and a node potential. In each iteration the remaining excess
//! is sent along a shortest path (w.r.t. reduced costs) from some node
//! with excess to the nearest node with deficit. The potentials are then
//! updated such that all reduced costs stay non-negative.
//!
//! # Example
//!
//! ```
//! use rs_flow::mcf::SuccessiveShortestPath;
//! use rs_flow::{Network, Status};
//!
//! let net = Network::<i64>::new_with(|net| {
//!     net.add_arc(0, 1, 4, 1)?;
//!     net.add_arc(0, 2, 2, 3)?;
//!     net.add_arc(1, 2, 2, 1)?;
//!     net.add_arc(1, 3, 2, 4)?;
//!     net.add_arc(2, 3, 5, 1)?;
//!     net.set_supply(0, 4)?;
//!     net.set_supply(3, -4)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut mcf = SuccessiveShortestPath::new(&net);
//! assert_eq!(mcf.solve(), Status::Optimal);
//! assert_eq!(mcf.optimal_cost(), 14);
//! assert_eq!(mcf.maximum_flow(), 4);
//! assert_eq!(net.arcs().map(|a| mcf.flow(a)).collect::<Vec<_>>(), vec![2, 2, 2, 0, 4]);
//! ```

use crate::maxflow::Dinic;
use crate::network::Network;
use crate::residual::{oriented, ResidualGraph};
use crate::shortestpath::{moorebellmanford, Dijkstra};
use crate::solver::{cost_range_fits, Solver, Status};

use log::{debug, trace};
use num_traits::{PrimInt, Signed};

/// The successive shortest path min-cost flow algorithm.
pub struct SuccessiveShortestPath<'a, F> {
    net: &'a Network<F>,
    graph: ResidualGraph<F>,
    dijkstra: Dijkstra<F>,
    potentials: Vec<F>,
    /// The supplies the latest solve tried to satisfy.
    balances: Vec<F>,
    /// Remaining excess (positive) or deficit (negative) of each node.
    excess: Vec<F>,
    cost: F,
    value: F,
    status: Status,
}

impl<'a, F> SuccessiveShortestPath<'a, F>
where
    F: PrimInt + Signed,
{
    pub fn new(net: &'a Network<F>) -> Self {
        let n = net.num_nodes();
        SuccessiveShortestPath {
            net,
            graph: ResidualGraph::new(net),
            dijkstra: Dijkstra::new(n),
            potentials: vec![F::zero(); n],
            balances: vec![F::zero(); n],
            excess: vec![F::zero(); n],
            cost: F::zero(),
            value: F::zero(),
            status: Status::NotSolved,
        }
    }

    pub fn as_network(&self) -> &'a Network<F> {
        self.net
    }

    /// Return the status of the latest solve call.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Return the cost of the latest computed flow.
    pub fn optimal_cost(&self) -> F {
        self.cost
    }

    /// Return the flow on arc `a`.
    pub fn flow(&self, a: usize) -> F {
        self.graph.flow(a)
    }

    /// Return the total amount of flow sent from supply to demand nodes.
    ///
    /// After [`SuccessiveShortestPath::solve`] this is the total supply,
    /// after [`SuccessiveShortestPath::solve_max_flow_with_min_cost`] the
    /// value of a maximum flow. It is 0 unless the latest solve has been
    /// successful.
    pub fn maximum_flow(&self) -> F {
        self.value
    }

    /// Return the potential of node `u`.
    ///
    /// For an optimal flow all residual arcs `(u,v)` with positive
    /// residual capacity satisfy `cost(u,v) + potential(u) - potential(v) >= 0`.
    pub fn potential(&self, u: usize) -> F {
        self.potentials[u]
    }

    /// Solve the min-cost flow problem.
    ///
    /// Every supply must be sent to the demand nodes. The total supply must
    /// be equal to the total demand, otherwise [`Status::Unbalanced`] is
    /// returned. If not all supply can be routed, the status is
    /// [`Status::Infeasible`].
    pub fn solve(&mut self) -> Status {
        self.status = match self.run(true) {
            Ok(()) => Status::Optimal,
            Err(status) => status,
        };
        debug!("ssp: {:?}, cost {}", self.status, self.cost.to_i128().unwrap_or(0));
        self.status
    }

    /// Send as much supply as possible to the demand nodes at minimal cost.
    ///
    /// The supplies need not be balanced. Among all flows of maximal value
    /// from the supply nodes to the demand nodes (respecting the supplies
    /// and demands as upper bounds) one of minimal cost is computed.
    pub fn solve_max_flow_with_min_cost(&mut self) -> Status {
        self.status = match self.run(false) {
            Ok(()) => Status::Optimal,
            Err(status) => status,
        };
        debug!(
            "ssp: {:?}, flow {}, cost {}",
            self.status,
            self.value.to_i128().unwrap_or(0),
            self.cost.to_i128().unwrap_or(0)
        );
        self.status
    }

    fn run(&mut self, balanced: bool) -> Result<(), Status> {
        let n = self.net.num_nodes();

        self.graph.reset(self.net);
        self.cost = F::zero();
        self.value = F::zero();
        for p in self.potentials.iter_mut() {
            *p = F::zero();
        }

        self.check_input(balanced)?;

        if balanced {
            for u in 0..n {
                self.balances[u] = self.net.supply(u);
            }
        } else {
            self.route_max_flow()?;
        }
        self.excess.copy_from_slice(&self.balances);

        debug!(
            "ssp: {} nodes, {} arcs, balanced: {}",
            n,
            self.net.num_arcs(),
            balanced
        );

        self.init_potentials()?;

        let mut niter = 0;
        while self.excess.iter().any(|&b| b > F::zero()) {
            niter += 1;
            self.augment()?;
        }

        debug_assert!(self.is_balanced());

        let mut cost = F::zero();
        for a in self.net.arcs() {
            cost = self
                .graph
                .flow(a)
                .checked_mul(&self.net.cost(a))
                .and_then(|c| cost.checked_add(&c))
                .ok_or(Status::PossibleOverflow)?;
        }
        self.cost = cost;
        self.value = self
            .balances
            .iter()
            .filter(|&&b| b > F::zero())
            .fold(F::zero(), |sum, &b| sum + b);

        debug!("ssp: finished after {} augmentations", niter);
        Ok(())
    }

    fn check_input(&self, balanced: bool) -> Result<(), Status> {
        if self.net.is_malformed() {
            return Err(Status::BadInput);
        }

        let supply = self.net.total_supply().ok_or(Status::PossibleOverflow)?;
        let demand = self.net.total_demand().ok_or(Status::PossibleOverflow)?;
        if balanced && supply != demand {
            return Err(Status::Unbalanced);
        }

        if !cost_range_fits(self.net.num_nodes(), self.net.arcs().map(|a| self.net.cost(a))) {
            return Err(Status::BadCostRange);
        }

        Ok(())
    }

    /// Compute the largest supplies and demands that can be satisfied.
    ///
    /// This is a maximum flow from an artificial source connected to all
    /// supply nodes to an artificial sink connected to all demand nodes.
    fn route_max_flow(&mut self) -> Result<(), Status> {
        let net = self.net;
        let n = net.num_nodes();

        let mut aux = Network::with_capacities(n + 2, net.num_arcs() + n);
        let (src, snk) = (n, n + 1);
        aux.add_nodes(n + 2).map_err(|_| Status::BadInput)?;
        for a in net.arcs() {
            aux.add_arc_with_capacity(net.tail(a), net.head(a), net.capacity(a))
                .map_err(|_| Status::BadInput)?;
        }
        let mut terminals = Vec::with_capacity(n);
        for u in net.nodes() {
            let b = net.supply(u);
            let a = if b > F::zero() {
                aux.add_arc_with_capacity(src, u, b)
            } else {
                aux.add_arc_with_capacity(u, snk, -b)
            };
            terminals.push(a.map_err(|_| Status::BadInput)?);
        }

        let mut maxflow = Dinic::new(&aux);
        match maxflow.solve(src, snk) {
            Status::Optimal => (),
            status => return Err(status),
        }
        trace!("ssp: maximal flow {}", maxflow.value().to_i128().unwrap_or(0));

        for (u, &a) in terminals.iter().enumerate() {
            self.balances[u] = if aux.tail(a) == src {
                maxflow.flow(a)
            } else {
                -maxflow.flow(a)
            };
        }

        Ok(())
    }

    /// Compute potentials with non-negative reduced costs on all residual
    /// arcs.
    fn init_potentials(&mut self) -> Result<(), Status> {
        let net = self.net;
        if net.arcs().all(|a| net.cost(a) >= F::zero()) {
            return Ok(());
        }

        let arcs = || {
            net.arcs()
                .filter(move |&a| net.capacity(a) > F::zero())
                .map(move |a| (net.tail(a), net.head(a), net.cost(a)))
        };
        match moorebellmanford::potentials(net.num_nodes(), arcs) {
            Ok(Some(dist)) => {
                self.potentials.copy_from_slice(&dist);
                Ok(())
            }
            Ok(None) => {
                debug!("ssp: negative cycle, saturating negative cost arcs");
                for a in net.arcs() {
                    let cap = net.capacity(a);
                    if net.cost(a) < F::zero() && cap > F::zero() {
                        let (u, v) = net.enodes(a);
                        self.graph.push(a << 1, cap);
                        self.excess[u] = self.excess[u].checked_sub(&cap).ok_or(Status::PossibleOverflow)?;
                        self.excess[v] = self.excess[v].checked_add(&cap).ok_or(Status::PossibleOverflow)?;
                    }
                }
                Ok(())
            }
            Err(_) => Err(Status::BadCostRange),
        }
    }

    /// Send flow along one shortest path from an excess to a deficit node.
    fn augment(&mut self) -> Result<(), Status> {
        let net = self.net;
        let graph = &self.graph;
        let pot = &self.potentials;
        let excess = &self.excess;

        let target = self
            .dijkstra
            .run(
                (0..excess.len()).filter(|&u| excess[u] > F::zero()),
                |u| graph.neighs(u).iter().copied(),
                |e| graph.residual(e) > F::zero(),
                |e, u, v| oriented(e, net.cost(e >> 1)) + pot[u] - pot[v],
                |v| excess[v] < F::zero(),
            )
            .map_err(|_| Status::PossibleOverflow)?;

        let t = match target {
            Some(t) => t,
            None => {
                debug!("ssp: no path from the remaining excess to a deficit");
                return Err(Status::Infeasible);
            }
        };

        let dmax = self.dijkstra.dist(t).unwrap_or_else(F::zero);
        for (v, delta) in self.dijkstra.potential_deltas(dmax) {
            self.potentials[v] = self.potentials[v].checked_sub(&delta).ok_or(Status::PossibleOverflow)?;
        }

        let s = self.dijkstra.source(t);
        let mut amount = self.excess[s].min(-self.excess[t]);
        let mut len = 0;
        for e in self.dijkstra.path(t) {
            amount = amount.min(self.graph.residual(e));
            len += 1;
        }
        for e in self.dijkstra.path(t) {
            self.graph.push(e, amount);
        }
        self.excess[s] = self.excess[s] - amount;
        self.excess[t] = self.excess[t] + amount;

        trace!(
            "ssp: {} -> {}, {} arcs, amount {}, distance {}",
            s,
            t,
            len,
            amount.to_i128().unwrap_or(0),
            dmax.to_i128().unwrap_or(0)
        );

        Ok(())
    }

    /// Check flow conservation w.r.t. the balances of the latest solve.
    fn is_balanced(&self) -> bool {
        let mut net_out = vec![F::zero(); self.net.num_nodes()];
        for a in self.net.arcs() {
            let (u, v) = self.net.enodes(a);
            let f = self.graph.flow(a);
            net_out[u] = net_out[u] + f;
            net_out[v] = net_out[v] - f;
        }
        net_out
            .iter()
            .zip(&self.balances)
            .zip(&self.excess)
            .all(|((&d, &b), &x)| d == b - x)
    }
}

impl<'a, F> Solver for SuccessiveShortestPath<'a, F>
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

/// Solve a min-cost flow problem by successive shortest paths.
///
/// Returns the optimal cost and the flow on each arc. If the problem
/// could not be solved, the status is returned as error.
pub fn min_cost_flow<F>(net: &Network<F>) -> Result<(F, Vec<F>), Status>
where
    F: PrimInt + Signed,
{
    let mut mcf = SuccessiveShortestPath::new(net);
    match mcf.solve() {
        Status::Optimal => Ok((mcf.optimal_cost(), net.arcs().map(|a| mcf.flow(a)).collect())),
        status => Err(status),
    }
}
