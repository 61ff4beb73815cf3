use crate::error::ElasticityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two observations of price and quantity sold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticityInput {
    pub initial_price: f64,
    pub new_price: f64,
    pub initial_quantity: f64,
    pub new_quantity: f64,
}

/// How strongly demand reacts to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// |e| > 1
    Elastic,
    /// |e| < 1
    Inelastic,
    /// |e| = 1
    UnitElastic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityResult {
    pub input: ElasticityInput,
    /// (P1 - P0) / P0
    pub price_change: f64,
    /// (Q1 - Q0) / Q0
    pub quantity_change: f64,
    pub elasticity: f64,
    pub classification: Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: f64,
    pub quantity: f64,
}

impl ElasticityInput {
    /// Builds an input, rejecting any value that is not a finite, strictly positive number.
    pub fn new(
        initial_price: f64,
        new_price: f64,
        initial_quantity: f64,
        new_quantity: f64,
    ) -> Result<Self, ElasticityError> {
        let input = Self {
            initial_price,
            new_price,
            initial_quantity,
            new_quantity,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), ElasticityError> {
        let fields = [
            ("initial price", self.initial_price),
            ("new price", self.new_price),
            ("initial quantity", self.initial_quantity),
            ("new quantity", self.new_quantity),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ElasticityError::InvalidInput(name, value));
            }
        }
        Ok(())
    }

    pub fn price_change(&self) -> f64 {
        (self.new_price - self.initial_price) / self.initial_price
    }

    pub fn quantity_change(&self) -> f64 {
        (self.new_quantity - self.initial_quantity) / self.initial_quantity
    }

    /// Computes the elasticity, classifying |e| = 1 exactly as unit elastic.
    pub fn compute(&self) -> Result<ElasticityResult, ElasticityError> {
        self.compute_with_tolerance(0.0)
    }

    /// Like [`compute`](Self::compute), but treats any |e| within `tolerance`
    /// of 1.0 as unit elastic.
    ///
    /// Fails with `DivisionByZero` when both prices are equal.
    pub fn compute_with_tolerance(&self, tolerance: f64) -> Result<ElasticityResult, ElasticityError> {
        self.validate()?;

        let price_change = self.price_change();
        if price_change == 0.0 {
            return Err(ElasticityError::DivisionByZero("elasticity"));
        }
        let quantity_change = self.quantity_change();
        let elasticity = quantity_change / price_change;
        let classification = Classification::from_coefficient(elasticity, tolerance);

        tracing::debug!(
            price_change,
            quantity_change,
            elasticity,
            ?classification,
            "Elasticity computed"
        );

        Ok(ElasticityResult {
            input: *self,
            price_change,
            quantity_change,
            elasticity,
            classification,
        })
    }
}

impl Classification {
    pub fn from_coefficient(elasticity: f64, tolerance: f64) -> Self {
        let magnitude = elasticity.abs();
        if (magnitude - 1.0).abs() <= tolerance {
            Classification::UnitElastic
        } else if magnitude > 1.0 {
            Classification::Elastic
        } else {
            Classification::Inelastic
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            Classification::Elastic => {
                "The demand is elastic: consumers are sensitive to price changes."
            }
            Classification::Inelastic => {
                "The demand is inelastic: consumers are less sensitive to price changes."
            }
            Classification::UnitElastic => {
                "The demand is unit elastic: proportional change in quantity to price."
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Elastic => "elastic",
            Classification::Inelastic => "inelastic",
            Classification::UnitElastic => "unit elastic",
        };
        f.write_str(label)
    }
}

impl ElasticityResult {
    /// The two observed points, for overlaying on the curve.
    pub fn observations(&self) -> [CurvePoint; 2] {
        [
            CurvePoint {
                price: self.input.initial_price,
                quantity: self.input.initial_quantity,
            },
            CurvePoint {
                price: self.input.new_price,
                quantity: self.input.new_quantity,
            },
        ]
    }

    pub fn demand_curve(&self, samples: usize) -> Vec<CurvePoint> {
        demand_curve(&self.input, self.elasticity, samples)
    }
}

/// `samples` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Linear demand curve through the initial point with the elasticity as slope:
/// `q(p) = Q0 * (1 + e * (p - P0) / P0)` for `samples` prices between P0 and P1.
///
/// This is a linear approximation for display, not a constant-elasticity curve;
/// it passes through both observations.
pub fn demand_curve(input: &ElasticityInput, elasticity: f64, samples: usize) -> Vec<CurvePoint> {
    let p0 = input.initial_price;
    let q0 = input.initial_quantity;
    linspace(p0, input.new_price, samples)
        .into_iter()
        .map(|price| CurvePoint {
            price,
            quantity: q0 * (1.0 + elasticity * ((price - p0) / p0)),
        })
        .collect()
}
