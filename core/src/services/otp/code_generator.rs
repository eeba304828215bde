//! Code generation

use rand::{rngs::OsRng, Rng};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::domain::entities::{CODE_MAX, CODE_MIN};

/// Source of fresh one-time passwords
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform codes in `CODE_MIN..=CODE_MAX` drawn from the OS CSPRNG.
///
/// The range is closed and never zero-padded, so every code is exactly
/// six digits with a non-zero leading digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}

/// Hands out preset codes in order, then falls back to random ones
#[derive(Debug, Default)]
pub struct SequenceCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceCodeGenerator {
    pub fn new<I, T>(codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| RandomCodeGenerator.generate())
    }
}
