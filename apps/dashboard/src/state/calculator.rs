//! # Calculator State
//!
//! The pricing form currently being edited and the comparison it produced.
//!
//! ## Recompute Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input change ──► lock ──► mutate PricingInput                          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                   compute_comparison(&input)                            │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                   replace last result wholesale ──► unlock              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutation and recomputation happen in one critical section, so a reader
//! never sees an input paired with a result computed from another input.

use std::sync::{Arc, Mutex, PoisonError};

use tumdum_core::{compute_comparison, ComparisonResult, PricingInput};

/// Input snapshot plus the result derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    input: PricingInput,
    result: Option<ComparisonResult>,
}

impl Calculator {
    /// Creates a calculator for the given starting input.
    pub fn new(input: PricingInput) -> Self {
        let result = compute_comparison(&input);
        Calculator { input, result }
    }

    /// Current form values.
    pub fn input(&self) -> &PricingInput {
        &self.input
    }

    /// Comparison for the current input, `None` while it is incomplete.
    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    /// Applies an input change and recomputes.
    pub fn update<F>(&mut self, change: F) -> Option<&ComparisonResult>
    where
        F: FnOnce(&mut PricingInput),
    {
        change(&mut self.input);
        self.result = compute_comparison(&self.input);
        self.result.as_ref()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(PricingInput::default())
    }
}

/// Shared calculator state.
#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    calculator: Arc<Mutex<Calculator>>,
}

impl CalculatorState {
    /// Creates calculator state with the given profit margin pre-selected.
    pub fn with_profit_margin(margin: u8) -> Self {
        let input = PricingInput {
            profit_margin_percent: margin,
            ..PricingInput::default()
        };
        CalculatorState {
            calculator: Arc::new(Mutex::new(Calculator::new(input))),
        }
    }

    /// Executes a function with read access to the calculator.
    pub fn with_calculator<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Calculator) -> R,
    {
        let calculator = self.calculator.lock().unwrap_or_else(PoisonError::into_inner);
        f(&calculator)
    }

    /// Applies an input change, recomputes, and returns the new result.
    pub fn update<F>(&self, change: F) -> Option<ComparisonResult>
    where
        F: FnOnce(&mut PricingInput),
    {
        let mut calculator = self.calculator.lock().unwrap_or_else(PoisonError::into_inner);
        calculator.update(change).cloned()
    }

    /// Replaces the whole form, keeping nothing from the previous input.
    pub fn replace(&self, input: PricingInput) -> Option<ComparisonResult> {
        self.update(|current| *current = input)
    }

    /// Copies out the input and result as one consistent pair.
    pub fn snapshot(&self) -> (PricingInput, Option<ComparisonResult>) {
        self.with_calculator(|c| (c.input.clone(), c.result.clone()))
    }
}
