//! MedRoute Headless Simulation Harness
//!
//! Validates the allocation logic on the bundled scenarios and on seeded
//! random hospitals. Runs entirely in-process with no console prompts.
//!
//! Usage:
//!   cargo run -p medroute-simtest
//!   cargo run -p medroute-simtest -- --verbose
//!   cargo run -p medroute-simtest -- --seed 7

use medroute_logic::allocation::{equalize, transfer_along_path};
use medroute_logic::department::Department;
use medroute_logic::graph::{Corridor, DistanceGraph};
use medroute_logic::pathfinding::{shortest_distances, Distance};
use medroute_logic::scenario::{validate_scenario, Scenario, SessionSetup};
use medroute_logic::session::Session;
use medroute_logic::spanning::minimum_spanning_tree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Bundled scenarios (same JSON the console loads) ─────────────────────
const SCENARIOS: &[(&str, &str)] = &[
    (
        "three_wards",
        include_str!("../../../data/scenarios/three_wards.json"),
    ),
    (
        "general_hospital",
        include_str!("../../../data/scenarios/general_hospital.json"),
    ),
];

const DEFAULT_SEED: u64 = 42;
const RANDOM_GRAPHS: usize = 200;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    println!("=== MedRoute Simulation Harness (seed {}) ===\n", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut results = Vec::new();

    // 1. Scenario files
    results.extend(validate_scenarios(verbose));

    // 2. Shortest paths against brute force
    results.extend(validate_shortest_paths(&mut rng, verbose));

    // 3. Allocation policies
    results.extend(validate_allocation(&mut rng, verbose));

    // 4. Admission / discharge churn
    results.extend(validate_patient_flow(&mut rng, verbose));

    // 5. Spanning tree
    results.extend(validate_spanning_tree(&mut rng, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Random hospitals ────────────────────────────────────────────────────

fn random_setup(rng: &mut StdRng, max_departments: usize) -> SessionSetup {
    let n = rng.gen_range(1..=max_departments);
    let density: f64 = rng.gen_range(0.0..=0.6);
    let departments = (0..n)
        .map(|_| Department::new(rng.gen_range(0..=20), rng.gen_range(0..=20)))
        .collect();
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if rng.gen_bool(density) {
                edges.push(Corridor {
                    a,
                    b,
                    distance: rng.gen_range(1..=100),
                });
            }
        }
    }
    SessionSetup {
        departments,
        edges,
        central: rng.gen_range(0..n),
        max_patients: None,
    }
}

fn build_graph(setup: &SessionSetup) -> DistanceGraph {
    let mut graph = DistanceGraph::new(setup.departments.len()).expect("graph allocation");
    for c in &setup.edges {
        graph.add_edge(c.a, c.b, c.distance).expect("valid corridor");
    }
    graph
}

/// All-pairs shortest paths by Floyd–Warshall, `None` for no route.
fn floyd_warshall(graph: &DistanceGraph) -> Vec<Vec<Option<u64>>> {
    let n = graph.department_count();
    let mut d = vec![vec![None; n]; n];
    for (i, row) in d.iter_mut().enumerate() {
        row[i] = Some(0);
        for (j, w) in graph.neighbors(i) {
            row[j] = Some(u64::from(w));
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(ik), Some(kj)) = (d[i][k], d[k][j]) {
                    let via = ik + kj;
                    if d[i][j].map_or(true, |cur| via < cur) {
                        d[i][j] = Some(via);
                    }
                }
            }
        }
    }
    d
}

// ── 1. Scenario files ───────────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario Files ---");
    let mut results = Vec::new();

    for (name, json) in SCENARIOS {
        let scenario = match Scenario::from_json(json) {
            Ok(s) => s,
            Err(e) => {
                results.push(TestResult {
                    name: format!("{}_parse", name),
                    passed: false,
                    detail: format!("JSON parse error: {}", e),
                });
                continue;
            }
        };

        let errors = validate_scenario(&scenario);
        results.push(TestResult {
            name: format!("{}_valid", name),
            passed: errors.is_empty(),
            detail: if errors.is_empty() {
                format!("{} departments, {} edges", scenario.departments.len(), scenario.edges.len())
            } else {
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            },
        });

        match Session::from_scenario(&scenario) {
            Ok(session) => {
                let reachable = session
                    .distances()
                    .as_slice()
                    .iter()
                    .filter(|d| d.is_reachable())
                    .count();
                if verbose {
                    println!(
                        "  {}: {}/{} departments reachable from department {}",
                        name,
                        reachable,
                        session.departments().len(),
                        session.central() + 1
                    );
                }
                results.push(TestResult {
                    name: format!("{}_session", name),
                    passed: reachable >= 1,
                    detail: format!("{} reachable departments", reachable),
                });
            }
            Err(e) => results.push(TestResult {
                name: format!("{}_session", name),
                passed: false,
                detail: e.to_string(),
            }),
        }
    }

    results
}

// ── 2. Shortest paths ───────────────────────────────────────────────────

fn validate_shortest_paths(rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Shortest Paths ---");
    let mut results = Vec::new();

    let mut mismatches = 0;
    let mut symmetric = true;
    let mut routes_ok = true;
    for _ in 0..RANDOM_GRAPHS {
        let setup = random_setup(rng, 30);
        let graph = build_graph(&setup);
        let brute = floyd_warshall(&graph);
        let n = graph.department_count();

        for u in 0..n {
            for v in 0..n {
                if graph.weight(u, v) != graph.weight(v, u) {
                    symmetric = false;
                }
            }
        }

        let distances = match shortest_distances(&graph, setup.central) {
            Ok(d) => d,
            Err(_) => {
                mismatches += 1;
                continue;
            }
        };
        for v in 0..n {
            let expected = match brute[setup.central][v] {
                Some(d) => Distance::Finite(d),
                None => Distance::Unreachable,
            };
            if distances.get(v) != expected {
                mismatches += 1;
            }

            // Route lengths must add up to the reported distance.
            if let Some(route) = distances.route_to(v) {
                let length = route
                    .windows(2)
                    .map(|w| graph.weight(w[0], w[1]).map_or(u64::MAX, u64::from))
                    .fold(0u64, u64::saturating_add);
                if Distance::Finite(length) != distances.get(v) || route[0] != setup.central {
                    routes_ok = false;
                }
            }
        }
    }
    if verbose {
        println!("  {} random graphs checked", RANDOM_GRAPHS);
    }

    results.push(TestResult {
        name: "dijkstra_matches_floyd_warshall".into(),
        passed: mismatches == 0,
        detail: format!("{} graphs, {} mismatching distances", RANDOM_GRAPHS, mismatches),
    });
    results.push(TestResult {
        name: "graph_symmetric".into(),
        passed: symmetric,
        detail: "weight(u,v) == weight(v,u) on every graph".into(),
    });
    results.push(TestResult {
        name: "routes_sum_to_distance".into(),
        passed: routes_ok,
        detail: "reconstructed routes start at the centre and match distances".into(),
    });

    // Largest permitted hospital: a 100-department chain.
    let mut chain = DistanceGraph::new(100).expect("graph allocation");
    for i in 0..99 {
        chain.add_edge(i, i + 1, 1).expect("valid corridor");
    }
    let far = shortest_distances(&chain, 0).map(|d| d.get(99));
    results.push(TestResult {
        name: "chain_100_departments".into(),
        passed: matches!(far, Ok(Distance::Finite(99))),
        detail: format!("distance to the far end: {:?}", far),
    });

    results
}

// ── 3. Allocation ───────────────────────────────────────────────────────

fn validate_allocation(rng: &mut StdRng, _verbose: bool) -> Vec<TestResult> {
    println!("--- Allocation Policies ---");
    let mut results = Vec::new();

    let mut idempotent = true;
    let mut conserves = true;
    let mut unreachable_untouched = true;
    let mut reachable_applied = true;

    for _ in 0..RANDOM_GRAPHS {
        let setup = random_setup(rng, 20);
        let graph = build_graph(&setup);
        let distances = match shortest_distances(&graph, setup.central) {
            Ok(d) => d,
            Err(_) => continue,
        };

        // Equalize twice == once, and never creates resources.
        let mut departments = setup.departments.clone();
        let before_beds: u64 = departments.iter().map(|d| u64::from(d.beds)).sum();
        if equalize(&mut departments).is_err() {
            idempotent = false;
            continue;
        }
        let once = departments.clone();
        let _ = equalize(&mut departments);
        if departments != once {
            idempotent = false;
        }
        let after_beds: u64 = departments.iter().map(|d| u64::from(d.beds)).sum();
        if after_beds > before_beds {
            conserves = false;
        }

        // Transfers: applied only when the destination is reachable.
        let n = setup.departments.len();
        let from = rng.gen_range(0..n);
        let to = rng.gen_range(0..n);
        let mut departments = setup.departments.clone();
        let before = departments.clone();
        let result = transfer_along_path(&mut departments, &distances, from, to);
        if distances.is_reachable(to) {
            if result.is_err() {
                reachable_applied = false;
            }
        } else if result.is_ok() || departments != before {
            unreachable_untouched = false;
        }
    }

    results.push(TestResult {
        name: "equalize_idempotent".into(),
        passed: idempotent,
        detail: "second equalize leaves state unchanged".into(),
    });
    results.push(TestResult {
        name: "equalize_never_creates_beds".into(),
        passed: conserves,
        detail: "truncated average only loses remainder".into(),
    });
    results.push(TestResult {
        name: "transfer_unreachable_no_change".into(),
        passed: unreachable_untouched,
        detail: "departments identical after refused transfer".into(),
    });
    results.push(TestResult {
        name: "transfer_reachable_applied".into(),
        passed: reachable_applied,
        detail: "reachable destination always accepts transfer".into(),
    });

    results
}

// ── 4. Patient flow ─────────────────────────────────────────────────────

fn validate_patient_flow(rng: &mut StdRng, verbose: bool) -> Vec<TestResult> {
    println!("--- Patient Flow ---");
    let mut results = Vec::new();

    let mut conserved = true;
    let mut roster_consistent = true;
    let mut nearest_ok = true;
    let mut admitted = 0usize;
    let mut refused = 0usize;

    for round in 0..50 {
        let setup = random_setup(rng, 15);
        let start = setup.departments.clone();
        let mut session = match Session::new(setup) {
            Ok(s) => s,
            Err(_) => {
                conserved = false;
                continue;
            }
        };

        let mut next_id = 0;
        for _ in 0..200 {
            if rng.gen_bool(0.6) || session.patients().is_empty() {
                let name = format!("R{}P{}", round, next_id);
                next_id += 1;
                match session.admit(&name) {
                    Ok(a) => {
                        admitted += 1;
                        // Nothing reachable with capacity may be closer.
                        let closer = session.departments().iter().enumerate().any(|(i, d)| {
                            i != a.department
                                && d.has_capacity()
                                && session.distances().get(i) < a.distance
                        });
                        if closer {
                            nearest_ok = false;
                        }
                    }
                    Err(_) => refused += 1,
                }
            } else {
                let pick = rng.gen_range(0..session.patients().len());
                let name = session.patients()[pick].name.clone();
                if session.discharge(&name).is_err() {
                    roster_consistent = false;
                }
            }

            // beds + patients and equipment + patients are invariant per department.
            for (d, s) in session.departments().iter().zip(&start) {
                if d.beds + d.patients != s.beds || d.equipment + d.patients != s.equipment {
                    conserved = false;
                }
            }
            let in_departments: u64 = session
                .departments()
                .iter()
                .map(|d| u64::from(d.patients))
                .sum();
            if in_departments != session.patients().len() as u64 {
                roster_consistent = false;
            }
        }
    }
    if verbose {
        println!("  {} admissions, {} refusals", admitted, refused);
    }

    results.push(TestResult {
        name: "resources_conserved".into(),
        passed: conserved,
        detail: "beds/equipment + patients constant per department".into(),
    });
    results.push(TestResult {
        name: "roster_matches_departments".into(),
        passed: roster_consistent,
        detail: "roster length equals sum of department patients".into(),
    });
    results.push(TestResult {
        name: "admission_picks_nearest".into(),
        passed: nearest_ok,
        detail: format!("{} admissions checked", admitted),
    });

    results
}

// ── 5. Spanning tree ────────────────────────────────────────────────────

fn validate_spanning_tree(rng: &mut StdRng, _verbose: bool) -> Vec<TestResult> {
    println!("--- Spanning Tree ---");
    let mut results = Vec::new();

    let mut forest_shape = true;
    let mut connectivity_agrees = true;
    for _ in 0..RANDOM_GRAPHS {
        let setup = random_setup(rng, 25);
        let graph = build_graph(&setup);
        let tree = minimum_spanning_tree(&graph, &setup.departments);
        let n = graph.department_count();

        if tree.edges.len() + tree.components != n {
            forest_shape = false;
        }
        let all_reachable = shortest_distances(&graph, setup.central)
            .map(|d| d.as_slice().iter().all(|x| x.is_reachable()))
            .unwrap_or(false);
        if all_reachable != tree.is_connected() {
            connectivity_agrees = false;
        }
    }

    results.push(TestResult {
        name: "spanning_forest_shape".into(),
        passed: forest_shape,
        detail: "edges + components == departments".into(),
    });
    results.push(TestResult {
        name: "spanning_connectivity".into(),
        passed: connectivity_agrees,
        detail: "single tree iff every department reachable".into(),
    });

    results
}
