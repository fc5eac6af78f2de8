//! # Setu-Nav: Translocator Route Engine
//!
//! A knowledge store and shortest-path engine for open worlds with
//! incrementally discovered point-to-point teleport links. Links are
//! observed one at a time as the player encounters them; the engine
//! keeps a durable per-world record of everything seen and answers
//! "cheapest route from here to there" by chaining teleports with
//! ordinary walking.
//!
//! ## Quick Start
//!
//! ```rust
//! use setu_nav::{Navigator, Position};
//!
//! let mut nav = Navigator::new();
//!
//! // A link is discovered: entrance at (10,0,0), exit at (90,0,0)
//! nav.record_observation("my-world", Position::new(10, 0, 0),
//!     Some(Position::new(90, 0, 0)));
//!
//! let route = nav.query("my-world", Position::new(0, 0, 0),
//!     Position::new(100, 0, 0));
//! assert!(route.is_found());
//! assert_eq!(route.total_distance(), 20); // walk 10, jump, walk 10
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: `Position` and compass bearings
//! - [`store`]: per-world knowledge store with dirty tracking and the
//!   serialized snapshot document
//! - [`graph`]: per-query route graph construction and Dijkstra solving
//! - [`navigator`]: the query facade with the per-world result cache
//! - [`io`]: snapshot file persistence and the debounced flush policy
//! - [`world`]: the trait boundary to the host game loop
//!
//! ## Model
//!
//! Everything runs on the host's single logic thread: observation
//! recording, queries and persistence are all synchronous and there is
//! no internal locking. Graph size is bounded by the chaining heuristic
//! (see [`graph::RouteConfig`]), so queries stay fast relative to the
//! tick cadence. "No route found" is a normal result value, never an
//! error; storage failures are logged and the session continues in
//! memory only.

pub mod core;
pub mod graph;
pub mod io;
pub mod navigator;
pub mod store;
pub mod world;

// Re-export main types at crate root
pub use crate::core::{Bearing, Position};
pub use graph::{RouteConfig, RouteGraph, RouteResult};
pub use io::{FlushConfig, FlushScheduler, PersistError};
pub use navigator::Navigator;
pub use store::{KnowledgeStore, LinkEntry, QueryPair, Snapshot, SnapshotError};
pub use world::{pump_observations, WorldProbe};
