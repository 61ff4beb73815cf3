//! # Price Elasticity Calculator
//!
//! Two-point price elasticity of demand: given an initial and a new
//! (price, quantity) observation it derives the percentage changes, the
//! elasticity coefficient, its classification and an illustrative demand curve.
//!
//! Pure arithmetic; no I/O.

pub mod calculator;
pub mod error;

pub use calculator::{
    Classification, CurvePoint, ElasticityInput, ElasticityResult, demand_curve, linspace,
};
pub use error::ElasticityError;
