//! Gate conditions for fault resolution.

use async_trait::async_trait;

/// An observable predicate a bounce can wait on before restoring a node.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Evaluates the predicate once.
    async fn holds(&self) -> bool;
}

#[async_trait]
impl<F> Probe for F
where
    F: Fn() -> bool + Send + Sync,
{
    async fn holds(&self) -> bool {
        self()
    }
}

/// A named gate condition.
///
/// The name exists for diagnostics: when a gate times out, the resulting
/// error names the condition that never held, which is usually the only
/// clue an operator gets about what the scenario was waiting for.
pub struct BounceCondition {
    name: String,
    probe: Box<dyn Probe>,
}

impl BounceCondition {
    /// Creates a condition from any [`Probe`].
    pub fn new(name: impl Into<String>, probe: impl Probe + 'static) -> Self {
        Self {
            name: name.into(),
            probe: Box::new(probe),
        }
    }

    /// Creates a condition from a synchronous closure.
    pub fn when<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(name, predicate)
    }

    /// The diagnostic name of the condition.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the condition once.
    pub async fn holds(&self) -> bool {
        self.probe.holds().await
    }
}

impl std::fmt::Debug for BounceCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BounceCondition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
