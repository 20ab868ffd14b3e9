//! Operation Module
//!
//! The handle an interceptor receives for one call of a wrapped operation.

use std::future::Future;

use serde_json::Value;

/// Capability tags an operation declares when it is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Marker {
    /// Skip the cache read; always recompute and refresh the entry
    Evictable,
}

// == Operation ==
/// One pending call of a wrapped operation.
pub trait Operation: Send {
    type Output: Send;
    type Error: Send;

    /// Declared parameter names, in declaration order.
    fn parameter_names(&self) -> &[String];

    /// Runtime argument values, positionally matching the names.
    fn arguments(&self) -> &[Value];

    /// Markers declared on the operation.
    fn markers(&self) -> &[Marker];

    /// Performs the real call.
    fn invoke(self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

// == Invocation ==
/// An [`Operation`] backed by a closure returning a future.
///
/// ```
/// use cache_aside::interceptor::{Invocation, Marker};
/// use serde_json::json;
///
/// let invocation = Invocation::new(|| async { Ok::<_, std::io::Error>(42) })
///     .with_parameters(["id"])
///     .with_arguments([json!(7)])
///     .with_marker(Marker::Evictable);
/// ```
pub struct Invocation<F> {
    parameters: Vec<String>,
    arguments: Vec<Value>,
    markers: Vec<Marker>,
    call: F,
}

impl<F> Invocation<F> {
    /// Wraps `call` with no parameters and no markers.
    pub fn new(call: F) -> Self {
        Self {
            parameters: Vec::new(),
            arguments: Vec::new(),
            markers: Vec::new(),
            call,
        }
    }

    pub fn with_parameters<N>(mut self, names: impl IntoIterator<Item = N>) -> Self
    where
        N: Into<String>,
    {
        self.parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_arguments(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.arguments = values.into_iter().collect();
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }
}

impl<F> std::fmt::Debug for Invocation<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("parameters", &self.parameters)
            .field("arguments", &self.arguments)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

impl<F, Fut, T, E> Operation for Invocation<F>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Send,
{
    type Output = T;
    type Error = E;

    fn parameter_names(&self) -> &[String] {
        &self.parameters
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn invoke(self) -> impl Future<Output = Result<T, E>> + Send {
        (self.call)()
    }
}
