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

use rs_flow::maxflow::Dinic;
use rs_flow::mcf::SuccessiveShortestPath;
use rs_flow::{LinearSumAssignment, Network, Status};

use std::error::Error;

#[test]
fn test_network() -> Result<(), Box<dyn Error>> {
    let net = Network::<i64>::new_with(|net| {
        net.add_arc(0, 1, 5, 2)?;
        net.add_arc(1, 2, 3, -1)?;
        net.set_supply(0, 3)?;
        net.set_supply(2, -3)?;
        Ok(())
    })?;

    let json = serde_json::to_string(&net)?;
    let net2: Network<i64> = serde_json::from_str(&json)?;
    assert_eq!(net2, net);
    assert_eq!(net2.enodes(1), (1, 2));
    assert_eq!(net2.cost(1), -1);
    Ok(())
}

#[test]
fn test_malformed_network() -> Result<(), Box<dyn Error>> {
    // arc head out of range and a missing supply entry
    let json = r#"{"arcs":[{"tail":0,"head":5,"capacity":3,"cost":1}],"supplies":[0],"nnodes":2}"#;
    let net: Network<i64> = serde_json::from_str(json)?;
    assert_eq!(Dinic::new(&net).solve(0, 1), Status::BadInput);
    assert_eq!(SuccessiveShortestPath::new(&net).solve(), Status::BadInput);

    let json = r#"{"arcs":[{"tail":0,"head":1,"capacity":3,"cost":1}],"supplies":[2],"nnodes":2}"#;
    let mut net: Network<i64> = serde_json::from_str(json)?;
    assert_eq!(SuccessiveShortestPath::new(&net).solve(), Status::BadInput);
    net.set_supply(1, -2)?;
    assert_eq!(SuccessiveShortestPath::new(&net).solve(), Status::Optimal);
    Ok(())
}

#[test]
fn test_status() -> Result<(), Box<dyn Error>> {
    for &status in &[Status::NotSolved, Status::Optimal, Status::Infeasible, Status::PossibleOverflow] {
        let json = serde_json::to_string(&status)?;
        assert_eq!(serde_json::from_str::<Status>(&json)?, status);
    }
    Ok(())
}

#[test]
fn test_assignment() -> Result<(), Box<dyn Error>> {
    let mut asn = LinearSumAssignment::<i64>::new();
    asn.add_arc_with_cost(0, 0, 4)?;
    asn.add_arc_with_cost(0, 1, 1)?;
    asn.add_arc_with_cost(1, 0, 2)?;
    asn.add_arc_with_cost(1, 1, 6)?;
    assert_eq!(asn.solve(), Status::Optimal);

    // the solution is part of the serialized state
    let json = serde_json::to_string(&asn)?;
    let mut asn2: LinearSumAssignment<i64> = serde_json::from_str(&json)?;
    assert_eq!(asn2.status(), Status::Optimal);
    assert_eq!(asn2.optimal_cost(), 3);
    assert_eq!(asn2.right_mate(0), Some(1));

    assert_eq!(asn2.solve(), Status::Optimal);
    assert_eq!(asn2.left_mate(0), Some(1));
    Ok(())
}
