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

use rs_flow::mcf::{min_cost_flow, SuccessiveShortestPath};
use rs_flow::{Network, Solver, Status};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::error::Error;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const COSTS: [[i64; 4]; 4] = [[90, 76, 75, 70], [35, 85, 55, 65], [125, 95, 90, 105], [45, 110, 95, 115]];

/// Check conservation and the reduced cost optimality conditions.
fn check_optimal(net: &Network<i64>, mcf: &SuccessiveShortestPath<i64>) {
    let mut balance = vec![0; net.num_nodes()];
    let mut cost = 0;
    for a in net.arcs() {
        let (u, v) = net.enodes(a);
        let f = mcf.flow(a);
        assert!(f >= 0 && f <= net.capacity(a));
        balance[u] += f;
        balance[v] -= f;
        cost += f * net.cost(a);

        let rc = net.cost(a) + mcf.potential(u) - mcf.potential(v);
        if f < net.capacity(a) {
            assert!(rc >= 0, "arc {} with residual capacity has reduced cost {}", a, rc);
        }
        if f > 0 {
            assert!(rc <= 0, "arc {} with flow has reduced cost {}", a, rc);
        }
    }
    for u in net.nodes() {
        assert_eq!(balance[u], net.supply(u));
    }
    assert_eq!(cost, mcf.optimal_cost());
}

#[test]
fn test_example() -> Result<(), Box<dyn Error>> {
    init_logger();
    let tails = [0, 0, 1, 1, 1, 2, 2, 3, 4];
    let heads = [1, 2, 2, 3, 4, 3, 4, 4, 2];
    let caps = [15, 8, 20, 4, 10, 15, 4, 20, 5];
    let costs = [4, 4, 2, 2, 6, 1, 3, 2, 3];
    let supplies = [20, 0, 0, -5, -15];

    let net = Network::new_with(|net| {
        for i in 0..tails.len() {
            net.add_arc_with_capacity_and_unit_cost(tails[i], heads[i], caps[i], costs[i])?;
        }
        for (u, &b) in supplies.iter().enumerate() {
            net.set_supply(u, b)?;
        }
        Ok(())
    })?;

    let mut mcf = SuccessiveShortestPath::new(&net);
    assert_eq!(mcf.solve(), Status::Optimal);
    assert_eq!(mcf.optimal_cost(), 150);
    assert_eq!(mcf.maximum_flow(), 20);
    assert_eq!(
        net.arcs().map(|a| mcf.flow(a)).collect::<Vec<_>>(),
        vec![12, 8, 8, 4, 0, 12, 4, 11, 0]
    );
    check_optimal(&net, &mcf);

    // solving again gives the same flow
    assert_eq!(mcf.solve(), Status::Optimal);
    assert_eq!(mcf.objective_value(), 150);
    assert_eq!(mcf.flow(0), 12);
    Ok(())
}

#[test]
fn test_assignment_reduction() -> Result<(), Box<dyn Error>> {
    init_logger();
    let (source, sink) = (0, 9);
    let net = Network::new_with(|net| {
        for i in 0..4 {
            net.add_arc(source, 1 + i, 1, 0)?;
        }
        for (i, row) in COSTS.iter().enumerate() {
            for (j, &c) in row.iter().enumerate() {
                net.add_arc(1 + i, 5 + j, 1, c)?;
            }
        }
        for j in 0..4 {
            net.add_arc(5 + j, sink, 1, 0)?;
        }
        net.set_supply(source, 4)?;
        net.set_supply(sink, -4)?;
        Ok(())
    })?;

    let mut mcf = SuccessiveShortestPath::new(&net);
    assert_eq!(mcf.solve(), Status::Optimal);
    assert_eq!(mcf.optimal_cost(), 265);
    check_optimal(&net, &mcf);

    let mut pairs = net
        .arcs()
        .filter(|&a| net.tail(a) != source && net.head(a) != sink && mcf.flow(a) > 0)
        .map(|a| (net.tail(a) - 1, net.head(a) - 5))
        .collect::<Vec<_>>();
    pairs.sort();
    assert_eq!(pairs, vec![(0, 3), (1, 2), (2, 1), (3, 0)]);
    Ok(())
}

#[test]
fn test_unbalanced() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = Network::<i64>::new_with(|net| {
        net.add_arc(0, 1, 10, 1)?;
        net.set_supply(0, 3)?;
        net.set_supply(1, -2)?;
        Ok(())
    })?;
    assert_eq!(min_cost_flow(&net), Err(Status::Unbalanced));

    let mut mcf = SuccessiveShortestPath::new(&net);
    assert_eq!(mcf.solve_max_flow_with_min_cost(), Status::Optimal);
    assert_eq!(mcf.maximum_flow(), 2);
    assert_eq!(mcf.optimal_cost(), 2);
    Ok(())
}

#[test]
fn test_infeasible() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = Network::<i64>::new_with(|net| {
        net.add_arc(0, 1, 4, 1)?;
        net.add_arc(2, 1, 4, 1)?;
        net.set_supply(0, 2)?;
        net.set_supply(2, -2)?;
        Ok(())
    })?;
    let mut mcf = SuccessiveShortestPath::new(&net);
    assert_eq!(mcf.solve(), Status::Infeasible);
    assert_eq!(mcf.solve_max_flow_with_min_cost(), Status::Optimal);
    assert_eq!(mcf.maximum_flow(), 0);
    assert_eq!(mcf.optimal_cost(), 0);
    Ok(())
}

#[test]
fn test_possible_overflow() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = Network::<i8>::new_with(|net| {
        net.add_arc(0, 1, 100, 0)?;
        net.add_arc(2, 1, 100, 0)?;
        net.set_supply(0, 100)?;
        net.set_supply(2, 100)?;
        net.set_supply(1, -100)?;
        Ok(())
    })?;
    assert_eq!(SuccessiveShortestPath::new(&net).solve(), Status::PossibleOverflow);

    // the cost of the flow is not representable
    let net = Network::<i8>::new_with(|net| {
        net.add_arc(0, 1, 50, 20)?;
        net.set_supply(0, 50)?;
        net.set_supply(1, -50)?;
        Ok(())
    })?;
    assert_eq!(SuccessiveShortestPath::new(&net).solve(), Status::PossibleOverflow);
    Ok(())
}

#[test]
fn test_random_negative_costs() -> Result<(), Box<dyn Error>> {
    init_logger();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..50 {
        let n = rng.gen_range(2..8);
        let mut net = Network::<i64>::new();
        net.add_nodes(n)?;
        for _ in 0..rng.gen_range(1..15) {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            net.add_arc(u, v, rng.gen_range(0..7), rng.gen_range(-5..10))?;
        }

        // a direct arc keeps the instance feasible
        let s = rng.gen_range(0..n);
        let t = (s + rng.gen_range(1..n)) % n;
        let k = rng.gen_range(0..6);
        net.add_arc(s, t, k, 20)?;
        net.set_supply(s, k)?;
        net.set_supply(t, -k)?;

        let mut mcf = SuccessiveShortestPath::new(&net);
        assert_eq!(mcf.solve(), Status::Optimal);
        check_optimal(&net, &mcf);
    }
    Ok(())
}
