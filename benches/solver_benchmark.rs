use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use jumpsat::Solver;

/// Classic pigeonhole encoding: `holes + 1` pigeons into `holes` holes.
/// Unsatisfiable, and exponential for a solver without clause learning.
fn pigeonhole(holes: usize) -> (usize, Vec<Vec<i32>>) {
    let pigeons = holes + 1;
    let var = |pigeon: usize, hole: usize| (pigeon * holes + hole + 1) as i32;

    let mut clauses = Vec::new();
    for pigeon in 0..pigeons {
        clauses.push((0..holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 0..holes {
        for pigeon in 0..pigeons {
            for other in pigeon + 1..pigeons {
                clauses.push(vec![-var(pigeon, hole), -var(other, hole)]);
            }
        }
    }

    (pigeons * holes, clauses)
}

fn bench_pigeonhole(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole");

    for holes in [3usize, 4] {
        let (num_vars, clauses) = pigeonhole(holes);
        group.bench_function(format!("php_{}_{holes}", holes + 1), |b| {
            b.iter(|| {
                let mut solver = Solver::new();
                solver.reserve_vars(num_vars);
                for cls in &clauses {
                    solver.add_clause(cls.iter().copied());
                }
                black_box(solver.solve().is_unsat())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pigeonhole);
criterion_main!(benches);
