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

//! Assignment problems in DIMACS format.
//!
//! ```text
//! c comment lines and empty lines are ignored
//! p asn <nodes> <arcs>
//! n <left node>
//! a <left node> <right node> <cost>
//! ```
//!
//! The node lines name the nodes on the left side, all other nodes are on
//! the right side. They must precede the exactly `<arcs>` arc lines. Each
//! arc goes from a left to a right node and has a non-negative cost.
//!
//! Both sides are numbered from 0 in increasing order of their DIMACS ids.

use super::{DimacsReader, Error, Result};
use crate::LinearSumAssignment;

use num_traits::{PrimInt, Signed};

use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

pub fn read<R: Read, F>(r: R) -> Result<LinearSumAssignment<F>>
where
    F: PrimInt + Signed + FromStr,
    F::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let p = reader.problem("asn")?;

    let mut is_left = vec![false; p.nnodes];
    let mut arcs = Vec::with_capacity(p.narcs);

    while let Some(mut line) = reader.next_line_of(&["n", "a"])? {
        if line.desc == "n" {
            if !arcs.is_empty() {
                return Err(line.format_error("node lines must precede the arc lines"));
            }
            is_left[line.node(p.nnodes)?] = true;
        } else {
            let (u, v) = line.arc(p.nnodes)?;
            let cost: F = line.number()?;
            if !is_left[u] || is_left[v] {
                let msg = format!("arc ({},{}) does not go from a left to a right node", u + 1, v + 1);
                return Err(line.data_error(msg));
            }
            if arcs.len() == p.narcs {
                return Err(line.data_error(format!("too many arcs (expected {})", p.narcs)));
            }
            arcs.push((u, v, cost, line.lineno));
        }
        line.end()?;
    }

    if arcs.len() != p.narcs {
        return Err(Error::Format {
            line: p.lineno,
            msg: format!("expected {} arcs, got {}", p.narcs, arcs.len()),
        });
    }

    // position of each node on its side
    let mut index = vec![0; p.nnodes];
    let (mut nleft, mut nright) = (0, 0);
    for (u, &left) in is_left.iter().enumerate() {
        let side = if left { &mut nleft } else { &mut nright };
        index[u] = *side;
        *side += 1;
    }

    let mut assignment = LinearSumAssignment::new();
    assignment
        .add_left_nodes(nleft)
        .and_then(|_| assignment.add_right_nodes(nright))
        .map_err(|err| Error::Data {
            line: p.lineno,
            msg: err.to_string(),
        })?;
    for (u, v, cost, lineno) in arcs {
        assignment
            .add_arc_with_cost(index[u], index[v], cost)
            .map_err(|err| Error::Data {
                line: lineno,
                msg: err.to_string(),
            })?;
    }

    Ok(assignment)
}

pub fn read_from_file<F>(filename: &str) -> Result<LinearSumAssignment<F>>
where
    F: PrimInt + Signed + FromStr,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write an assignment instance.
///
/// The left nodes get the DIMACS ids `1..=l`, the right nodes the ids
/// following them.
pub fn write<W, F>(mut w: W, assignment: &LinearSumAssignment<F>) -> std::io::Result<()>
where
    W: Write,
    F: PrimInt + Signed + Display,
{
    let nleft = assignment.num_nodes();
    writeln!(
        w,
        "p asn {} {}",
        nleft + assignment.num_right_nodes(),
        assignment.num_arcs()
    )?;
    for i in 0..nleft {
        writeln!(w, "n {}", i + 1)?;
    }
    for a in 0..assignment.num_arcs() {
        writeln!(
            w,
            "a {} {} {}",
            assignment.left_node(a) + 1,
            nleft + assignment.right_node(a) + 1,
            assignment.cost(a)
        )?;
    }

    Ok(())
}

/// Write an assignment instance to a named file.
pub fn write_to_file<F>(filename: &str, assignment: &LinearSumAssignment<F>) -> std::io::Result<()>
where
    F: PrimInt + Signed + Display,
{
    write(&mut std::fs::File::create(filename)?, assignment)
}
