/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Min-cost flow problems in DIMACS format.
//!
//! ```text
//! c comment lines and empty lines are ignored
//! p min <nodes> <arcs>
//! n <node> <supply>
//! a <tail> <head> <lower> <upper> <cost>
//! ```
//!
//! Node lines are optional, nodes without a line have supply 0 (a negative
//! supply is a demand). There must be exactly `<arcs>` arc lines. Loops are
//! rejected, parallel arcs are accepted.
//!
//! Lower bounds are removed on reading: the arc keeps capacity `upper -
//! lower` and `lower` units of supply move from its tail to its head. The
//! flow of the original problem on arc `a` is `lower[a] + flow(a)`, its cost
//! is the cost of the flow plus [`Instance::cost_offset`].
//!
//! Solutions consist of one line `s <cost>` and lines `f <tail> <head>
//! <flow>` for all arcs with nonzero flow.

use super::{DimacsReader, Error, Result};
use crate::Network;

use num_traits::{PrimInt, Signed};

use std::fmt::Display;
use std::io::{self, Read, Write};
use std::str::FromStr;

/// A min-cost flow instance with lower bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance<F = i64> {
    /// The network without lower bounds.
    pub network: Network<F>,
    /// The lower bound of each arc.
    pub lower: Vec<F>,
}

impl<F> Instance<F>
where
    F: PrimInt + Signed,
{
    /// The cost of sending the lower bounds, `None` on overflow.
    pub fn cost_offset(&self) -> Option<F> {
        let net = &self.network;
        net.arcs().try_fold(F::zero(), |sum, a| {
            self.lower[a].checked_mul(&net.cost(a)).and_then(|c| sum.checked_add(&c))
        })
    }

    /// The flow on arc `a` of the original problem given the flow `f` in
    /// the network.
    pub fn original_flow(&self, a: usize, f: F) -> F {
        self.lower[a] + f
    }
}

impl<F> From<Network<F>> for Instance<F>
where
    F: PrimInt + Signed,
{
    fn from(network: Network<F>) -> Self {
        let lower = vec![F::zero(); network.num_arcs()];
        Instance { network, lower }
    }
}

pub fn read<R: Read, F>(r: R) -> Result<Instance<F>>
where
    F: PrimInt + Signed + FromStr + Display,
    F::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let p = reader.problem("min")?;

    let mut network = Network::with_capacities(p.nnodes, p.narcs);
    network.add_nodes(p.nnodes).map_err(|err| Error::Data {
        line: p.lineno,
        msg: err.to_string(),
    })?;
    let mut supplies = vec![F::zero(); p.nnodes];
    let mut lower = Vec::with_capacity(p.narcs);

    while let Some(mut line) = reader.next_line_of(&["n", "a"])? {
        if line.desc == "n" {
            let u = line.node(p.nnodes)?;
            supplies[u] = line.number()?;
            line.end()?;
            continue;
        }

        let (u, v) = line.arc(p.nnodes)?;
        let lb: F = line.number()?;
        let ub: F = line.number()?;
        let cost: F = line.number()?;
        line.end()?;

        if lower.len() == p.narcs {
            return Err(line.data_error(format!("too many arcs (expected {})", p.narcs)));
        }
        if lb > ub {
            return Err(line.data_error(format!("lower bound {} exceeds upper bound {}", lb, ub)));
        }
        let cap = ub
            .checked_sub(&lb)
            .ok_or_else(|| line.data_error("capacity out of range"))?;
        // the supply shift is applied at the end, overflow is checked there
        network.add_arc(u, v, cap, cost).map_err(|err| line.rejected(err))?;
        lower.push((lb, line.lineno));
    }

    if lower.len() != p.narcs {
        return Err(Error::Format {
            line: p.lineno,
            msg: format!("expected {} arcs, got {}", p.narcs, lower.len()),
        });
    }

    for (a, &(lb, lineno)) in lower.iter().enumerate() {
        let (u, v) = network.enodes(a);
        let shifted = supplies[u]
            .checked_sub(&lb)
            .zip(supplies[v].checked_add(&lb));
        match shifted {
            Some((bu, bv)) => {
                supplies[u] = bu;
                supplies[v] = bv;
            }
            None => {
                return Err(Error::Data {
                    line: lineno,
                    msg: format!("lower bound {} makes a supply overflow", lb),
                })
            }
        }
    }
    for (u, &b) in supplies.iter().enumerate() {
        network.set_supply(u, b).map_err(|err| Error::Data {
            line: p.lineno,
            msg: err.to_string(),
        })?;
    }

    Ok(Instance {
        network,
        lower: lower.into_iter().map(|(lb, _)| lb).collect(),
    })
}

pub fn read_from_file<F>(filename: &str) -> Result<Instance<F>>
where
    F: PrimInt + Signed + FromStr + Display,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a min-cost-flow instance.
///
/// The lower bounds are restored, i.e. reading the file again gives the
/// same instance.
pub fn write<W, F>(mut w: W, instance: &Instance<F>) -> io::Result<()>
where
    W: Write,
    F: PrimInt + Signed + Display,
{
    let net = &instance.network;
    let overflow = || io::Error::new(io::ErrorKind::InvalidData, "lower bounds out of range");

    let mut supplies = net.nodes().map(|u| net.supply(u)).collect::<Vec<_>>();
    let mut upper = Vec::with_capacity(net.num_arcs());
    for a in net.arcs() {
        let lb = instance.lower[a];
        let (u, v) = net.enodes(a);
        supplies[u] = supplies[u].checked_add(&lb).ok_or_else(overflow)?;
        supplies[v] = supplies[v].checked_sub(&lb).ok_or_else(overflow)?;
        upper.push(net.capacity(a).checked_add(&lb).ok_or_else(overflow)?);
    }

    writeln!(w, "p min {} {}", net.num_nodes(), net.num_arcs())?;
    for (u, b) in supplies.into_iter().enumerate() {
        if !b.is_zero() {
            writeln!(w, "n {} {}", u + 1, b)?;
        }
    }
    for a in net.arcs() {
        writeln!(
            w,
            "a {} {} {} {} {}",
            net.tail(a) + 1,
            net.head(a) + 1,
            instance.lower[a],
            upper[a],
            net.cost(a)
        )?;
    }

    Ok(())
}

/// Write a min-cost-flow instance to a named file.
pub fn write_to_file<F>(filename: &str, instance: &Instance<F>) -> io::Result<()>
where
    F: PrimInt + Signed + Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

/// Write a solution of a min-cost-flow problem.
pub fn write_solution<W, F, Fs>(mut w: W, net: &Network<F>, flow: Fs, value: F) -> std::io::Result<()>
where
    W: Write,
    F: PrimInt + Signed + Display,
    Fs: Fn(usize) -> F,
{
    writeln!(w, "s {}", value)?;
    for a in net.arcs() {
        let fl = (flow)(a);
        if !fl.is_zero() {
            writeln!(w, "f {} {} {}", net.tail(a) + 1, net.head(a) + 1, fl)?;
        }
    }

    Ok(())
}

/// Write a solution of a min-cost-flow problem to a named file.
pub fn write_solution_to_file<F, Fs>(filename: &str, net: &Network<F>, flow: Fs, value: F) -> std::io::Result<()>
where
    F: PrimInt + Signed + Display,
    Fs: Fn(usize) -> F,
{
    write_solution(&mut std::fs::File::create(filename)?, net, flow, value)
}

/// Read a solution of a min-cost-flow problem.
///
/// Returns the solution value and the triples `(tail, head, flow)` with
/// 0-based node ids.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize, T)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut flows = vec![];
    let mut value = None;

    while let Some(mut line) = reader.next_line_of(&["s", "f"])? {
        if line.desc == "s" {
            if value.is_some() {
                return Err(line.format_error("duplicate solution value"));
            }
            value = Some(line.number()?);
        } else {
            let (u, v) = line.arc(usize::MAX)?;
            flows.push((u, v, line.number()?));
        }
        line.end()?;
    }

    match value {
        Some(value) => Ok((value, flows)),
        None => Err(Error::Format {
            line: reader.lineno,
            msg: "missing solution value".to_string(),
        }),
    }
}

/// Read a solution of a min-cost-flow problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<(usize, usize, T)>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {
    use crate::dimacs;
    use crate::mcf::min_cost_flow;
    use crate::Network;
    use std::io::{self, Cursor};

    #[test]
    fn parse_file_test() {
        let file = "c transportation example
p min 5 9
n 1 20
n 4 -5
n 5 -15

a 1 2 0 15 4
a 1 3 0 8 4
a 2 3 0 20 2
a 2 4 0 4 2
a 2 5 0 10 6
a 3 4 0 15 1
a 3 5 0 4 3
a 4 5 0 20 2
a 5 3 0 5 3
";
        let instance = dimacs::min::read::<_, i64>(io::Cursor::new(file)).unwrap();
        assert_eq!(instance.cost_offset(), Some(0));
        let net = instance.network;

        assert_eq!((net.num_nodes(), net.num_arcs()), (5, 9));
        assert_eq!(net.nodes().map(|u| net.supply(u)).collect::<Vec<_>>(), vec![20, 0, 0, -5, -15]);
        assert_eq!(net.enodes(8), (4, 2));
        assert_eq!((net.capacity(4), net.cost(4)), (10, 6));

        let (cost, flow) = min_cost_flow(&net).unwrap();
        assert_eq!(cost, 150);
        assert_eq!(flow, vec![12, 8, 8, 4, 0, 12, 4, 11, 0]);
    }

    #[test]
    fn lower_bounds() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let file = "p min 3 2\nn 1 4\nn 3 -4\na 1 2 1 5 2\na 2 3 3 4 1\n";
        let instance = dimacs::min::read::<_, i64>(io::Cursor::new(file))?;
        let net = &instance.network;
        assert_eq!(instance.lower, vec![1, 3]);
        assert_eq!((net.capacity(0), net.capacity(1)), (4, 1));
        assert_eq!(net.nodes().map(|u| net.supply(u)).collect::<Vec<_>>(), vec![3, -2, -1]);

        let (cost, flow) = min_cost_flow(net).unwrap();
        assert_eq!(flow, vec![3, 1]);
        assert_eq!(cost + instance.cost_offset().unwrap(), 12);
        assert_eq!((instance.original_flow(0, flow[0]), instance.original_flow(1, flow[1])), (4, 4));

        // writing restores the lower bounds
        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write(&mut buf, &instance)?;
        assert_eq!(String::from_utf8(buf.into_inner())?, file);
        Ok(())
    }

    #[test]
    fn reject_bad_bounds() {
        let file = "p min 2 1\nn 1 3\nn 2 -3\na 1 2 4 3 1\n";
        match dimacs::min::read::<_, i64>(io::Cursor::new(file)) {
            Err(dimacs::Error::Data { line, .. }) => assert_eq!(line, 4),
            _ => panic!("lower bound above upper bound accepted"),
        }

        let file = "p min 2 1\na 1 2 -100 100 1\n";
        match dimacs::min::read::<_, i8>(io::Cursor::new(file)) {
            Err(dimacs::Error::Data { line, .. }) => assert_eq!(line, 2),
            _ => panic!("capacity overflow accepted"),
        }
    }

    #[test]
    fn write_test_file() {
        let net = Network::<i64>::new_with(|net| {
            net.add_arc(0, 1, 4, 2)?;
            net.add_arc(0, 2, 2, 2)?;
            net.add_arc(1, 2, 2, 1)?;
            net.add_arc(1, 3, 3, 3)?;
            net.add_arc(2, 3, 5, 1)?;
            net.set_supply(0, 4)?;
            net.set_supply(3, -4)?;
            Ok(())
        })
        .unwrap();

        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write(&mut buf, &dimacs::min::Instance::from(net)).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p min 4 5
n 1 4
n 4 -4
a 1 2 0 4 2
a 1 3 0 2 2
a 2 3 0 2 1
a 2 4 0 3 3
a 3 4 0 5 1
"
        );
    }

    #[test]
    fn write_solution_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let net = Network::<i64>::new_with(|net| {
            net.add_arc_with_capacity(0, 1, 4)?;
            net.add_arc_with_capacity(0, 2, 2)?;
            net.add_arc_with_capacity(1, 2, 2)?;
            net.add_arc_with_capacity(1, 3, 3)?;
            net.add_arc_with_capacity(2, 3, 5)?;
            Ok(())
        })?;
        let flow = vec![2, 2, 2, 0, 4];

        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write_solution(&mut buf, &net, |a| flow[a], 14)?;

        let soltxt = String::from_utf8(buf.into_inner())?;
        assert_eq!(
            soltxt,
            "s 14
f 1 2 2
f 1 3 2
f 2 3 2
f 3 4 4
"
        );

        let (value, flows) = dimacs::min::read_solution::<_, i64>(Cursor::new(soltxt))?;
        assert_eq!(value, 14);
        assert_eq!(flows, vec![(0, 1, 2), (0, 2, 2), (1, 2, 2), (2, 3, 4)]);

        Ok(())
    }
}
