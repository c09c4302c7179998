//! The pluggable stage transform.
//!
//! A [`Transform`] is the single extension point of a stage. It takes one
//! dataset and returns one dataset, and is invoked exactly once between the
//! read and the write. It must not touch global state (stages are stateless
//! across invocations) but is otherwise unconstrained; a real implementation
//! may run arbitrarily heavy computation without changing the surrounding
//! contract.

use crate::dataset::Dataset;
use crate::error::TransformError;

/// A single-responsibility transform over one dataset.
pub trait Transform: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Transforms the dataset. The output need not have the same shape as
    /// the input.
    fn apply(&self, input: Dataset) -> Result<Dataset, TransformError>;
}

/// The identity transform: returns its input unchanged.
///
/// This is the documented default for every built-in stage, standing in for
/// business logic supplied by the library consumer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, input: Dataset) -> Result<Dataset, TransformError> {
        Ok(input)
    }
}

/// Adapter that turns a closure into a [`Transform`].
pub struct FnTransform<F> {
    name: String,
    func: F,
}

impl<F> FnTransform<F>
where
    F: Fn(Dataset) -> Result<Dataset, TransformError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(Dataset) -> Result<Dataset, TransformError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, input: Dataset) -> Result<Dataset, TransformError> {
        (self.func)(input)
    }
}
