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
use rs_flow::mcf::SuccessiveShortestPath;

use rustop::opts;
use time::OffsetDateTime;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve min-cost-flow problem with successive shortest paths.";
        param file:String, desc:"Instance file name";
        opt max_flow:bool, desc:"Route as much of the supply as possible";
        opt write:bool, desc:"Write the solution to <file>.sol";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::min::read::<_, i64>(zopen::read(&args.file)?)?;
    let net = &instance.network;
    let tend = OffsetDateTime::now_utc();
    println!("Instance            : {}", args.file);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Number of nodes     : {}", net.num_nodes());
    println!("Number of arcs      : {}", net.num_arcs());

    let mut mcf = SuccessiveShortestPath::new(net);
    let tstart = OffsetDateTime::now_utc();
    let status = if args.max_flow {
        mcf.solve_max_flow_with_min_cost()
    } else {
        mcf.solve()
    };
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Solution state      : {:?}", status);
    let value = mcf.optimal_cost() + instance.cost_offset().ok_or("cost of lower bounds out of range")?;
    println!("Value               : {}", value);
    println!("Flow                : {}", mcf.maximum_flow());
    println!("Time (seconds)      : {:.2}", soltime);

    if args.write && status.is_optimal() {
        let solfile = PathBuf::from(format!("{}.sol", args.file));
        println!("Write solution to   : {}", solfile.display());
        let f = &mut std::fs::File::create(&solfile)?;
        writeln!(f, "c Solved with successive shortest paths")?;
        writeln!(f, "c solution time       : {:.2} seconds", soltime)?;
        dimacs::min::write_solution(f, net, |a| instance.original_flow(a, mcf.flow(a)), value)?;
    }

    Ok(())
}
