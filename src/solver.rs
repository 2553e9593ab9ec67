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

//! The common interface of all flow algorithms.

use num_traits::{PrimInt, Signed};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The outcome of a solve call.
///
/// Not every algorithm produces every state, e.g. a maximum flow is never
/// infeasible (the zero flow is always feasible).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Status {
    /// The problem has not been solved, yet.
    NotSolved,
    /// The problem has been solved to optimality.
    Optimal,
    /// The problem is well-formed but has no feasible solution.
    Infeasible,
    /// The total supply does not equal the total demand.
    Unbalanced,
    /// The input is malformed (invalid nodes, negative capacities, ...).
    BadInput,
    /// The costs are too large for the potentials to be representable.
    BadCostRange,
    /// Some flow or cost value might not be representable.
    PossibleOverflow,
}

impl Status {
    /// Return `true` iff the status is [`Status::Optimal`].
    pub fn is_optimal(self) -> bool {
        self == Status::Optimal
    }
}

/// Capabilities shared by all solvers.
///
/// The solve operation itself is not part of this trait because its
/// arguments differ between the algorithms (e.g. a maximum flow needs
/// the source and sink nodes).
pub trait Solver {
    /// The type of the objective value.
    type Value;

    /// Return the status of the latest solve call.
    fn status(&self) -> Status;

    /// Return the objective value of the latest solve call.
    ///
    /// This is the flow value for maximum flows and the total cost for
    /// min-cost flows and assignments. The value is only meaningful if
    /// [`Solver::status`] is [`Status::Optimal`].
    fn objective_value(&self) -> Self::Value;
}

/// Return `true` if `(2n + 1) * max |c|` over all `costs` is representable.
///
/// Then every node potential and every reduced cost of a shortest path
/// algorithm on `n` nodes stays in range.
pub(crate) fn cost_range_fits<F, I>(n: usize, costs: I) -> bool
where
    F: PrimInt + Signed,
    I: IntoIterator<Item = F>,
{
    let mut maxcost = F::zero();
    for c in costs {
        match F::zero().checked_sub(&c) {
            Some(neg) => maxcost = maxcost.max(c).max(neg),
            None => return false,
        }
    }
    maxcost.is_zero()
        || num_traits::cast::<usize, F>(2 * n + 1)
            .and_then(|k| k.checked_mul(&maxcost))
            .is_some()
}
