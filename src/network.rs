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

//! The arc store shared by all flow algorithms.
//!
//! A [`Network`] is a list of directed arcs `(tail, head, capacity, cost)`
//! over nodes `0..n` together with a supply value for each node. Nodes are
//! not created explicitly, the node set grows with the largest node id
//! referenced by an arc or a supply.
//!
//! The network is only modified while it is being built. The algorithms
//! borrow it immutably, so it cannot change while a solver exists.
//!
//! # Example
//!
//! ```
//! use rs_flow::Network;
//!
//! let mut net = Network::<i64>::new_with(|net| {
//!     net.add_arc(0, 1, 5, 2)?;
//!     net.add_arc(1, 3, 4, 1)?;
//!     net.set_supply(3, -4)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(net.num_nodes(), 4);
//! assert_eq!(net.num_arcs(), 2);
//! assert_eq!((net.tail(1), net.head(1)), (1, 3));
//! assert_eq!(net.supply(2), 0);
//! assert!(net.add_arc_with_capacity(0, 2, -1).is_err());
//! ```

use crate::error::{Error, Result};

use num_traits::{PrimInt, Signed};

use std::ops::Range;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Internal node index type.
pub(crate) type ID = u32;

/// Data stored for each arc.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct ArcData<F> {
    tail: ID,
    head: ID,
    capacity: F,
    cost: F,
}

/// A directed network with capacities, costs and node supplies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Network<F = i64> {
    arcs: Vec<ArcData<F>>,
    supplies: Vec<F>,
    nnodes: usize,
}

impl<F> Default for Network<F> {
    fn default() -> Self {
        Network {
            arcs: vec![],
            supplies: vec![],
            nnodes: 0,
        }
    }
}

impl<F> Network<F>
where
    F: PrimInt + Signed,
{
    /// Create a new, empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty network with reserved memory.
    ///
    /// The numbers are only a hint, more nodes and arcs may be added.
    pub fn with_capacities(nnodes: usize, narcs: usize) -> Self {
        Network {
            arcs: Vec::with_capacity(narcs),
            supplies: Vec::with_capacity(nnodes),
            nnodes: 0,
        }
    }

    /// Create a new network by passing it to the callback `f`.
    ///
    /// Any error returned by `f` is passed through.
    pub fn new_with<B>(f: B) -> Result<Self>
    where
        B: FnOnce(&mut Self) -> Result<()>,
    {
        let mut net = Self::new();
        f(&mut net)?;
        Ok(net)
    }

    /// Reserve memory for additional nodes and arcs.
    pub fn reserve(&mut self, nnodes: usize, narcs: usize) {
        self.arcs.reserve(narcs);
        self.supplies.reserve(nnodes);
    }

    /// Return the number of nodes.
    ///
    /// This is one more than the largest node id seen so far.
    pub fn num_nodes(&self) -> usize {
        self.nnodes
    }

    /// Return the number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Add a new isolated node and return its id.
    pub fn add_node(&mut self) -> Result<usize> {
        let u = self.nnodes;
        self.touch(u)?;
        Ok(u)
    }

    /// Add `n` new isolated nodes and return the range of their ids.
    pub fn add_nodes(&mut self, n: usize) -> Result<Range<usize>> {
        let first = self.nnodes;
        if n > 0 {
            self.touch(first + n - 1)?;
        }
        Ok(first..first + n)
    }

    /// Add an arc from `tail` to `head`.
    ///
    /// Returns the index of the new arc. Arc indices are assigned
    /// consecutively starting at 0. The capacity must be non-negative,
    /// the cost may be any value.
    pub fn add_arc(&mut self, tail: usize, head: usize, capacity: F, cost: F) -> Result<usize> {
        if capacity < F::zero() {
            return Err(Error::invalid("capacity", "non-negative", capacity.to_i128().unwrap_or(-1)));
        }
        let t = self.touch(tail)?;
        let h = self.touch(head)?;
        self.arcs.push(ArcData {
            tail: t,
            head: h,
            capacity,
            cost,
        });
        Ok(self.arcs.len() - 1)
    }

    /// Add an arc with zero cost.
    pub fn add_arc_with_capacity(&mut self, tail: usize, head: usize, capacity: F) -> Result<usize> {
        self.add_arc(tail, head, capacity, F::zero())
    }

    /// Add an arc with capacity and unit cost.
    ///
    /// This is the same as [`Network::add_arc`].
    pub fn add_arc_with_capacity_and_unit_cost(
        &mut self,
        tail: usize,
        head: usize,
        capacity: F,
        unit_cost: F,
    ) -> Result<usize> {
        self.add_arc(tail, head, capacity, unit_cost)
    }

    /// Set the supply of node `u`.
    ///
    /// A positive value is a supply, a negative value a demand. The
    /// previous value is overwritten.
    pub fn set_supply(&mut self, u: usize, supply: F) -> Result<()> {
        self.touch(u)?;
        self.supplies[u] = supply;
        Ok(())
    }

    /// Return the tail node of arc `a`.
    pub fn tail(&self, a: usize) -> usize {
        self.arcs[a].tail as usize
    }

    /// Return the head node of arc `a`.
    pub fn head(&self, a: usize) -> usize {
        self.arcs[a].head as usize
    }

    /// Return both end nodes of arc `a`.
    pub fn enodes(&self, a: usize) -> (usize, usize) {
        (self.tail(a), self.head(a))
    }

    /// Return the capacity of arc `a`.
    pub fn capacity(&self, a: usize) -> F {
        self.arcs[a].capacity
    }

    /// Return the cost of arc `a`.
    pub fn cost(&self, a: usize) -> F {
        self.arcs[a].cost
    }

    /// Return the cost of one unit of flow on arc `a`.
    pub fn unit_cost(&self, a: usize) -> F {
        self.cost(a)
    }

    /// Return the supply of node `u`.
    ///
    /// Nodes without an explicit supply (including nodes out of range)
    /// have supply 0.
    pub fn supply(&self, u: usize) -> F {
        self.supplies.get(u).copied().unwrap_or_else(F::zero)
    }

    /// Return an iterator over all arc indices.
    pub fn arcs(&self) -> Range<usize> {
        0..self.arcs.len()
    }

    /// Return an iterator over all node ids.
    pub fn nodes(&self) -> Range<usize> {
        0..self.nnodes
    }

    /// Return an iterator over the arcs leaving `u`.
    pub fn outarcs(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.arcs().filter(move |&a| self.tail(a) == u)
    }

    /// Return an iterator over the arcs entering `u`.
    pub fn inarcs(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.arcs().filter(move |&a| self.head(a) == u)
    }

    /// Return the sum of all positive supplies.
    ///
    /// Returns `None` if the sum is not representable.
    pub fn total_supply(&self) -> Option<F> {
        self.supplies
            .iter()
            .filter(|&&b| b > F::zero())
            .try_fold(F::zero(), |sum, &b| sum.checked_add(&b))
    }

    /// Return the sum of all negative supplies as a positive number.
    ///
    /// Returns `None` if the sum is not representable.
    pub fn total_demand(&self) -> Option<F> {
        self.supplies
            .iter()
            .filter(|&&b| b < F::zero())
            .try_fold(F::zero(), |sum, &b| sum.checked_sub(&b))
    }

    /// Return `true` if some arc has a negative capacity or an end node
    /// out of range, or if the supplies do not match the nodes.
    ///
    /// This cannot happen for networks built with [`Network::add_arc`],
    /// but deserialized networks are not checked.
    pub(crate) fn is_malformed(&self) -> bool {
        let n = self.nnodes;
        n >= ID::MAX as usize
            || self.supplies.len() != n
            || self
                .arcs
                .iter()
                .any(|a| a.capacity < F::zero() || a.tail as usize >= n || a.head as usize >= n)
    }

    /// Make sure node `u` exists.
    fn touch(&mut self, u: usize) -> Result<ID> {
        if u >= ID::MAX as usize {
            return Err(Error::invalid("node id", "smaller than 2^32 - 1", u));
        }
        if u >= self.nnodes {
            self.nnodes = u + 1;
        }
        if self.supplies.len() < self.nnodes {
            self.supplies.resize(self.nnodes, F::zero());
        }
        Ok(u as ID)
    }
}
