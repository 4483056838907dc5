// Rust guideline compliant 2026-08-30

//! Work-item generator -- produces synthetic [`ExpenseInput`] sequences for
//! load-testing the concurrent processing engine.
//!
//! Entry point: [`Generator::generate`]. Configuration via
//! [`GeneratorConfig::builder`].

use domain::{Category, ExpenseInput, PaymentMethod};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use std::cell::RefCell;

// ---------------------------------------------------------------------------
// GeneratorError
// ---------------------------------------------------------------------------

/// Errors that can occur during work-item generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The supplied configuration is invalid.
    #[error("invalid generator configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// GeneratorConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Generator`].
///
/// Construct via [`GeneratorConfig::builder`].
#[derive(Debug)]
pub struct GeneratorConfig {
    /// Exclusive upper bound for random amounts (range: `[0, amount_max)`).
    pub amount_max: f64,
    /// Prefix for generated descriptions; index is appended per item.
    pub description_prefix: String,
    /// Optional RNG seed for reproducible amounts. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Builder for [`GeneratorConfig`].
///
/// Obtain via [`GeneratorConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct GeneratorConfigBuilder {
    amount_max: f64,
    description_prefix: String,
    seed: Option<u64>,
}

impl GeneratorConfig {
    /// Create a builder with defaults: `amount_max = 1000.0`,
    /// `description_prefix = "Test expense"`, `seed = None`.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder {
            amount_max: 1000.0,
            description_prefix: "Test expense".to_owned(),
            seed: None,
        }
    }
}

impl GeneratorConfigBuilder {
    /// Override the exclusive amount upper bound.
    #[must_use]
    pub fn amount_max(mut self, amount_max: f64) -> Self {
        self.amount_max = amount_max;
        self
    }

    /// Override the description prefix.
    #[must_use]
    pub fn description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    /// Fix the RNG seed for deterministic output (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] when `amount_max` is not a
    /// finite positive number.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<GeneratorConfig, GeneratorError> {
        if !self.amount_max.is_finite() || self.amount_max <= 0.0 {
            return Err(GeneratorError::InvalidConfig {
                reason: "amount_max must be a finite positive number".to_owned(),
            });
        }
        Ok(GeneratorConfig {
            amount_max: self.amount_max,
            description_prefix: self.description_prefix,
            seed: self.seed,
        })
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Produces synthetic expense inputs with random amounts and deterministic
/// cyclic method/category assignment.
///
/// Methods cycle through [`PaymentMethod::ALL`] (period 4) and categories
/// through [`Category::ALL`] (period 6), both starting at index 0, so the
/// field distribution of any generated sequence is fully predictable.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    /// Interior mutability required because `generate` takes `&self`.
    rng: RefCell<StdRng>,
}

impl Generator {
    /// Create a new generator from `config`.
    ///
    /// Seeds the RNG from `config.seed` if set, otherwise from the OS.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng: RefCell::new(rng) }
    }

    /// Generate `count` expense inputs.
    ///
    /// For each index `i`: amount uniform in `[0, amount_max)`, method
    /// `ALL[i % 4]`, category `ALL[i % 6]`, description
    /// `"{prefix} {i}"`. `count == 0` yields an empty vector.
    #[must_use]
    pub fn generate(&self, count: usize) -> Vec<ExpenseInput> {
        let mut rng = self.rng.borrow_mut();
        let inputs: Vec<ExpenseInput> = (0..count)
            .map(|i| ExpenseInput {
                amount: rng.random_range(0.0..self.config.amount_max),
                method: PaymentMethod::ALL[i % PaymentMethod::ALL.len()],
                category: Category::ALL[i % Category::ALL.len()],
                description: format!("{} {i}", self.config.description_prefix),
            })
            .collect();
        log::debug!("generator.generate: count={}", inputs.len());
        inputs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{Generator, GeneratorConfig, GeneratorError};
    use domain::{Category, PaymentMethod};

    fn make_generator(seed: u64) -> Generator {
        Generator::new(GeneratorConfig::builder().seed(seed).build().unwrap())
    }

    #[test]
    fn config_rejects_non_positive_amount_max() {
        let result = GeneratorConfig::builder().amount_max(0.0).build();
        assert!(matches!(result, Err(GeneratorError::InvalidConfig { .. })));
        let result = GeneratorConfig::builder().amount_max(-5.0).build();
        assert!(matches!(result, Err(GeneratorError::InvalidConfig { .. })));
        let result = GeneratorConfig::builder().amount_max(f64::NAN).build();
        assert!(matches!(result, Err(GeneratorError::InvalidConfig { .. })));
    }

    #[test]
    fn generate_returns_exact_count() {
        let generator = make_generator(1);
        assert_eq!(generator.generate(0).len(), 0);
        assert_eq!(generator.generate(1).len(), 1);
        assert_eq!(generator.generate(25).len(), 25);
    }

    #[test]
    fn methods_cycle_with_period_4() {
        let generator = make_generator(2);
        let inputs = generator.generate(12);
        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(
                input.method,
                PaymentMethod::ALL[i % 4],
                "method mismatch at index {i}"
            );
        }
    }

    #[test]
    fn categories_cycle_with_period_6() {
        let generator = make_generator(3);
        let inputs = generator.generate(18);
        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(
                input.category,
                Category::ALL[i % 6],
                "category mismatch at index {i}"
            );
        }
    }

    #[test]
    fn amounts_within_configured_bound() {
        let config = GeneratorConfig::builder().amount_max(1000.0).seed(4).build().unwrap();
        let generator = Generator::new(config);
        for input in generator.generate(200) {
            assert!(
                (0.0..1000.0).contains(&input.amount),
                "amount {} out of [0, 1000)",
                input.amount
            );
        }
    }

    #[test]
    fn descriptions_carry_index() {
        let generator = make_generator(5);
        let inputs = generator.generate(3);
        assert_eq!(inputs[0].description, "Test expense 0");
        assert_eq!(inputs[1].description, "Test expense 1");
        assert_eq!(inputs[2].description, "Test expense 2");
    }

    #[test]
    fn custom_prefix_applied() {
        let config = GeneratorConfig::builder()
            .description_prefix("Load item")
            .seed(6)
            .build()
            .unwrap();
        let generator = Generator::new(config);
        let inputs = generator.generate(1);
        assert_eq!(inputs[0].description, "Load item 0");
    }

    #[test]
    fn seeded_rng_deterministic() {
        let a = make_generator(99).generate(10);
        let b = make_generator(99).generate(10);
        assert_eq!(a, b, "identical seeds must produce identical inputs");
    }
}
