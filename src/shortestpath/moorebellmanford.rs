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

use super::Overflow;

use num_traits::{cast, PrimInt, Signed};

/// Feasible node potentials by the algorithm of Moore-Bellman-Ford.
///
/// The arcs are given as `(tail, head, weight)` triples by the callback
/// `arcs`, which is called once per round. The shortest path lengths from
/// an artificial node connected to every node by an arc of weight 0 are
/// computed, i.e. every node starts at distance 0.
///
/// The resulting distances `d` satisfy `w(u,v) + d(u) - d(v) >= 0` for all
/// arcs. The function returns `Ok(None)` if there is a cycle of negative
/// weight (so no such potentials exist). An error is returned only if the
/// distance bound `(n-1) * max|w|` itself is not representable and some
/// distance overflows.
///
/// # Example
///
/// ```
/// use rs_flow::shortestpath::moorebellmanford;
///
/// let arcs = [(0, 1, -8), (1, 4, -3), (2, 0, 2), (2, 1, 1), (2, 5, -3), (3, 1, 0), (3, 2, 5),
///             (4, 3, 8), (5, 3, -1), (6, 3, 4), (6, 4, 6), (6, 5, 3)];
///
/// let pot = moorebellmanford::potentials(7, || arcs.iter().copied()).unwrap().unwrap();
/// assert!(arcs.iter().all(|&(u, v, w)| w + pot[u] - pot[v] >= 0));
///
/// let cycle = [(0, 1, 2), (1, 2, -1), (2, 0, -2)];
/// assert_eq!(moorebellmanford::potentials(3, || cycle.iter().copied()), Ok(None));
/// ```
pub fn potentials<D, A, I>(n: usize, arcs: A) -> Result<Option<Vec<D>>, Overflow>
where
    D: PrimInt + Signed,
    A: Fn() -> I,
    I: IntoIterator<Item = (usize, usize, D)>,
{
    let mut dist = vec![D::zero(); n];

    // without a negative cycle no distance drops below -(n-1) * max|w|
    let lower = arcs()
        .into_iter()
        .try_fold(D::zero(), |m, (_, _, w)| {
            let w = if w < D::zero() { D::zero().checked_sub(&w)? } else { w };
            Some(m.max(w))
        })
        .and_then(|m| cast::<_, D>(n.saturating_sub(1))?.checked_mul(&m))
        .map(|b| D::zero() - b);

    // with the artificial start node every shortest path has at most n arcs
    for _ in 0..=n {
        let mut changed = false;
        for (u, v, w) in arcs() {
            let newdist = match (dist[u].checked_add(&w), lower) {
                (Some(d), Some(lb)) if d < lb => return Ok(None),
                (Some(d), _) => d,
                (None, Some(_)) => return Ok(None),
                (None, None) => return Err(Overflow),
            };
            if newdist < dist[v] {
                dist[v] = newdist;
                changed = true;
            }
        }
        if !changed {
            return Ok(Some(dist));
        }
    }

    Ok(None)
}
