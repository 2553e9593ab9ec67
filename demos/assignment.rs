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

use rustop::opts;
use time::OffsetDateTime;

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a linear assignment problem.";
        param file:String, desc:"Instance file name";
        opt verbose:bool, desc:"Print the assignment";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let mut asn = dimacs::asn::read::<_, i64>(zopen::read(&args.file)?)?;
    let tend = OffsetDateTime::now_utc();
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Left nodes          : {}", asn.num_nodes());
    println!("Right nodes         : {}", asn.num_right_nodes());
    println!("Number of arcs      : {}", asn.num_arcs());

    let tstart = OffsetDateTime::now_utc();
    let status = asn.solve();
    let tend = OffsetDateTime::now_utc();

    println!("Solution state      : {:?}", status);
    println!("Value               : {}", asn.optimal_cost());
    println!("Time (seconds)      : {:.2}", (tend - tstart).as_seconds_f64());

    if args.verbose {
        for i in 0..asn.num_nodes() {
            if let (Some(j), Some(c)) = (asn.right_mate(i), asn.assignment_cost(i)) {
                println!("  {} -> {} ({})", i + 1, asn.num_nodes() + j + 1, c);
            }
        }
    }

    Ok(())
}
