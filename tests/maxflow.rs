/*
 * Copyright (c) 2020, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use rs_flow::maxflow::{dinic, Dinic};
use rs_flow::{Network, Solver, Status};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::error::Error;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn example() -> Result<Network<i64>, rs_flow::Error> {
    let tails = [0, 0, 0, 1, 1, 2, 2, 3, 3];
    let heads = [1, 2, 3, 2, 4, 3, 4, 2, 4];
    let caps = [20, 30, 10, 40, 30, 10, 20, 5, 20];
    Network::new_with(|net| {
        for i in 0..tails.len() {
            net.add_arc_with_capacity(tails[i], heads[i], caps[i])?;
        }
        Ok(())
    })
}

/// Check the optimality conditions of a maximum flow.
fn check_flow(net: &Network<i64>, maxflow: &Dinic<i64>, src: usize, snk: usize) {
    let value = maxflow.value();

    let mut excess = vec![0; net.num_nodes()];
    for a in net.arcs() {
        let f = maxflow.flow(a);
        assert!(f >= 0 && f <= net.capacity(a));
        excess[net.tail(a)] -= f;
        excess[net.head(a)] += f;
    }
    for u in net.nodes() {
        if u == src {
            assert_eq!(excess[u], -value);
        } else if u == snk {
            assert_eq!(excess[u], value);
        } else {
            assert_eq!(excess[u], 0);
        }
    }

    let mut in_cut = vec![false; net.num_nodes()];
    for u in maxflow.source_side_min_cut() {
        in_cut[u] = true;
    }
    assert!(in_cut[src]);
    assert!(!in_cut[snk]);
    assert_eq!(
        maxflow.source_side_min_cut().len() + maxflow.sink_side_min_cut().len(),
        net.num_nodes()
    );

    let mut cut = 0;
    for a in net.arcs() {
        let (u, v) = net.enodes(a);
        if in_cut[u] && !in_cut[v] {
            assert_eq!(maxflow.flow(a), net.capacity(a));
            cut += net.capacity(a);
        } else if !in_cut[u] && in_cut[v] {
            assert_eq!(maxflow.flow(a), 0);
        }
    }
    assert_eq!(cut, value);
}

#[test]
fn test_example() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = example()?;
    let mut maxflow = Dinic::new(&net);
    assert_eq!(maxflow.solve(0, 4), Status::Optimal);
    assert_eq!(maxflow.optimal_flow(), 60);
    assert_eq!(maxflow.objective_value(), 60);
    assert_eq!(maxflow.source_side_min_cut(), vec![0]);
    assert_eq!(maxflow.sink_side_min_cut(), vec![1, 2, 3, 4]);
    check_flow(&net, &maxflow, 0, 4);
    Ok(())
}

#[test]
fn test_unreachable_sink() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = Network::<i64>::new_with(|net| {
        net.add_arc_with_capacity(0, 1, 5)?;
        net.add_arc_with_capacity(2, 3, 5)?;
        net.add_arc_with_capacity(3, 1, 5)?;
        Ok(())
    })?;
    let mut maxflow = Dinic::new(&net);
    assert_eq!(maxflow.solve(0, 3), Status::Optimal);
    assert_eq!(maxflow.value(), 0);
    assert_eq!(maxflow.source_side_min_cut(), vec![0, 1]);
    assert_eq!(maxflow.sink_side_min_cut(), vec![2, 3]);
    check_flow(&net, &maxflow, 0, 3);
    Ok(())
}

#[test]
fn test_repeated_solves() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = example()?;
    let mut maxflow = Dinic::new(&net);
    assert_eq!(maxflow.solve(0, 4), Status::Optimal);
    let flows = net.arcs().map(|a| maxflow.flow(a)).collect::<Vec<_>>();

    assert_eq!(maxflow.solve(1, 3), Status::Optimal);
    assert_eq!(maxflow.value(), 10);
    check_flow(&net, &maxflow, 1, 3);

    assert_eq!(maxflow.solve(0, 4), Status::Optimal);
    assert_eq!(maxflow.value(), 60);
    assert_eq!(net.arcs().map(|a| maxflow.flow(a)).collect::<Vec<_>>(), flows);
    Ok(())
}

#[test]
fn test_bad_input() -> Result<(), Box<dyn Error>> {
    init_logger();
    let net = example()?;
    assert_eq!(dinic(&net, 2, 2).err(), Some(Status::BadInput));
    assert_eq!(dinic(&net, 0, 5).err(), Some(Status::BadInput));
    Ok(())
}

#[test]
fn test_min_cut_by_enumeration() -> Result<(), Box<dyn Error>> {
    init_logger();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..30 {
        let n = 7;
        let mut net = Network::<i64>::new();
        net.add_nodes(n)?;
        for _ in 0..16 {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            net.add_arc_with_capacity(u, v, rng.gen_range(0..10))?;
        }

        // the minimal capacity of all cuts separating node 0 from node n-1
        let mut best = i64::MAX;
        for mask in 0..(1u32 << n) {
            if mask & 1 == 0 || mask & (1 << (n - 1)) != 0 {
                continue;
            }
            let cap = net
                .arcs()
                .filter(|&a| mask & (1 << net.tail(a)) != 0 && mask & (1 << net.head(a)) == 0)
                .map(|a| net.capacity(a))
                .sum::<i64>();
            best = best.min(cap);
        }

        let mut maxflow = Dinic::new(&net);
        assert_eq!(maxflow.solve(0, n - 1), Status::Optimal);
        assert_eq!(maxflow.value(), best);
        check_flow(&net, &maxflow, 0, n - 1);
    }
    Ok(())
}
