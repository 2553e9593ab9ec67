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

//! Maximum flow problems in DIMACS format.
//!
//! ```text
//! c comment lines and empty lines are ignored
//! p max <nodes> <arcs>
//! n <source> s
//! n <sink> t
//! a <tail> <head> <capacity>
//! ```
//!
//! The problem line comes first, followed by the two node lines (in any
//! order) and exactly `<arcs>` arc lines. Capacities must be
//! non-negative. Loops are rejected, parallel arcs are accepted.

use super::{DimacsReader, Error, Result};
use crate::Network;

use num_traits::{PrimInt, Signed};

use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

/// A maximum flow instance.
pub struct Instance<F = i64> {
    /// The network with the arc capacities.
    pub network: Network<F>,
    /// The source node.
    pub src: usize,
    /// The sink node.
    pub snk: usize,
}

pub fn read<R: Read, F>(r: R) -> Result<Instance<F>>
where
    F: PrimInt + Signed + FromStr,
    F::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let p = reader.problem("max")?;

    let mut network = Network::with_capacities(p.nnodes, p.narcs);
    network.add_nodes(p.nnodes).map_err(|err| Error::Data {
        line: p.lineno,
        msg: err.to_string(),
    })?;

    let (mut src, mut snk) = (None, None);
    for _ in 0..2 {
        let mut line = reader.expect_line("n")?;
        let u = line.node(p.nnodes)?;
        let what = line.str()?;
        let terminal = match what {
            "s" => &mut src,
            "t" => &mut snk,
            _ => return Err(line.format_error(format!("invalid node type '{}', must be 's' or 't'", what))),
        };
        if terminal.replace(u).is_some() {
            return Err(line.format_error(format!("duplicate '{}' node", what)));
        }
        line.end()?;
    }
    let (src, snk) = match (src, snk) {
        (Some(s), Some(t)) if s != t => (s, t),
        _ => {
            return Err(Error::Data {
                line: p.lineno,
                msg: "source and sink must be distinct nodes".to_string(),
            })
        }
    };

    for _ in 0..p.narcs {
        let mut line = reader.expect_line("a")?;
        let (u, v) = line.arc(p.nnodes)?;
        let cap: F = line.number()?;
        line.end()?;
        network
            .add_arc_with_capacity(u, v, cap)
            .map_err(|err| line.rejected(err))?;
    }
    reader.end()?;

    Ok(Instance { network, src, snk })
}

pub fn read_from_file<F>(filename: &str) -> Result<Instance<F>>
where
    F: PrimInt + Signed + FromStr,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a maximum flow instance.
pub fn write<W, F>(mut w: W, instance: &Instance<F>) -> std::io::Result<()>
where
    W: Write,
    F: PrimInt + Signed + Display,
{
    let net = &instance.network;
    writeln!(w, "p max {} {}", net.num_nodes(), net.num_arcs())?;
    writeln!(w, "n {} s", instance.src + 1)?;
    writeln!(w, "n {} t", instance.snk + 1)?;
    for a in net.arcs() {
        writeln!(w, "a {} {} {}", net.tail(a) + 1, net.head(a) + 1, net.capacity(a))?;
    }

    Ok(())
}

/// Write a maximum flow instance to a named file.
pub fn write_to_file<F>(filename: &str, instance: &Instance<F>) -> std::io::Result<()>
where
    F: PrimInt + Signed + Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

#[cfg(test)]
mod tests {
    use crate::dimacs;
    use crate::maxflow::Dinic;
    use crate::{Network, Status};
    use std::io::{self, Cursor};

    #[test]
    fn parse_file_test() {
        let file = "c small test network

p max 5 7
n 5 t
n 1 s
a 1 2 6
a 1 3 4
a 2 3 2

c arcs into the sink
a 2 4 5
a 3 4 3
a 3 5 4
a 4 5 6
";
        let instance = dimacs::max::read::<_, i64>(io::Cursor::new(file)).unwrap();
        let net = &instance.network;

        assert_eq!((net.num_nodes(), net.num_arcs()), (5, 7));
        assert_eq!((instance.src, instance.snk), (0, 4));
        assert_eq!(net.enodes(3), (1, 3));
        assert_eq!(
            net.arcs().map(|a| net.capacity(a)).collect::<Vec<_>>(),
            vec![6, 4, 2, 5, 3, 4, 6]
        );

        let mut maxflow = Dinic::new(net);
        assert_eq!(maxflow.solve(instance.src, instance.snk), Status::Optimal);
        assert_eq!(maxflow.value(), 10);
    }

    #[test]
    fn reject_bad_lines() {
        let missing_sink = "p max 2 1\nn 1 s\nn 1 s\na 1 2 3\n";
        match dimacs::max::read::<_, i64>(io::Cursor::new(missing_sink)) {
            Err(dimacs::Error::Format { line, .. }) => assert_eq!(line, 3),
            _ => panic!("duplicate source accepted"),
        }

        let negative = "p max 2 1\nn 1 s\nn 2 t\na 1 2 -3\n";
        match dimacs::max::read::<_, i64>(io::Cursor::new(negative)) {
            Err(dimacs::Error::Data { line, .. }) => assert_eq!(line, 4),
            _ => panic!("negative capacity accepted"),
        }

        let extra = "p max 2 1\nn 1 s\nn 2 t\na 1 2 3\na 2 1 3\n";
        assert!(dimacs::max::read::<_, i64>(io::Cursor::new(extra)).is_err());
    }

    #[test]
    fn write_test_file() {
        let network = Network::<i64>::new_with(|net| {
            net.add_arc_with_capacity(0, 1, 4)?;
            net.add_arc_with_capacity(0, 2, 2)?;
            net.add_arc_with_capacity(1, 2, 2)?;
            net.add_arc_with_capacity(1, 3, 3)?;
            net.add_arc_with_capacity(2, 3, 5)?;
            Ok(())
        })
        .unwrap();

        let mut buf = Cursor::new(Vec::new());
        dimacs::max::write(&mut buf, &dimacs::max::Instance { network, src: 0, snk: 3 }).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p max 4 5
n 1 s
n 4 t
a 1 2 4
a 1 3 2
a 2 3 2
a 2 4 3
a 3 4 5
"
        );
    }
}
