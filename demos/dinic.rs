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

use rs_flow::dimacs;
use rs_flow::maxflow::Dinic;

use rustop::opts;
use time::OffsetDateTime;

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve max-flow problem with Dinic's algorithm.";
        opt num:usize=1, desc:"Number of times the algorithm is repeated.";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::max::read::<_, i64>(zopen::read(&args.file)?)?;
    let net = &instance.network;
    let tend = OffsetDateTime::now_utc();
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Number of nodes     : {}", net.num_nodes());
    println!("Number of arcs      : {}", net.num_arcs());

    let mut maxflow = Dinic::new(net);
    let tstart = OffsetDateTime::now_utc();
    for _ in 0..args.num {
        maxflow.solve(instance.src, instance.snk);
    }
    let tend = OffsetDateTime::now_utc();

    println!("Solution state      : {:?}", maxflow.status());
    println!("Flow                : {}", maxflow.value());
    println!("Min cut (source)    : {} nodes", maxflow.source_side_min_cut().len());
    println!("Time (seconds)      : {}", (tend - tstart).as_seconds_f64());

    Ok(())
}
