//! Transit route planner.
//!
//! Loads a network of stations and routes, then answers: "what is the best
//! way from this station to that one, by time, fare, distance or a blend?"

pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
