//! Pure hospital resource allocation logic for MedRoute.
//!
//! This crate contains everything that is independent of the console:
//! the department distance graph, the shortest-path computation from the
//! central department, the two allocation policies, nearest-department
//! selection and the patient roster. Functions take plain data and return
//! structured results, so every operation is unit-testable without
//! capturing printed text.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocation`] | Equal redistribution and path-gated half transfers |
//! | [`constants`] | Hard limits (department count, name length) |
//! | [`department`] | Bed/equipment/patient counters per department |
//! | [`error`] | Closed set of failure kinds surfaced by the session |
//! | [`graph`] | Symmetric adjacency-matrix distance graph |
//! | [`nearest`] | Closest department with free beds and equipment |
//! | [`pathfinding`] | O(N²) Dijkstra from the central department |
//! | [`roster`] | Ordered patient roster with optional ceiling |
//! | [`scenario`] | JSON-loadable initial setup and its validation |
//! | [`session`] | Session context and the menu command API |
//! | [`spanning`] | Kruskal minimum spanning tree of the corridor network |
//!
//! ```
//! use medroute_logic::scenario::Scenario;
//! use medroute_logic::session::Session;
//!
//! let scenario = Scenario::from_json(
//!     r#"{
//!         "departments": [
//!             {"beds": 10, "equipment": 5},
//!             {"beds": 10, "equipment": 5},
//!             {"beds": 10, "equipment": 5}
//!         ],
//!         "edges": [
//!             {"from": 1, "to": 2, "distance": 5},
//!             {"from": 2, "to": 3, "distance": 5}
//!         ],
//!         "central": 1
//!     }"#,
//! )
//! .unwrap();
//! let mut session = Session::from_scenario(&scenario).unwrap();
//! let admission = session.admit("Alice").unwrap();
//! assert_eq!(admission.department, 0);
//! ```

pub mod allocation;
pub mod constants;
pub mod department;
pub mod error;
pub mod graph;
pub mod nearest;
pub mod pathfinding;
pub mod roster;
pub mod scenario;
pub mod session;
pub mod spanning;

pub use error::HospitalError;
