//! Flight itinerary search server.
//!
//! A web application that answers: "which flights, with at most two
//! connections, get me from this airport to that one on this date?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod web;
