//! Pluggable policy interface.

use crate::filter::decision::Decision;
use crate::filter::descriptor::RequestDescriptor;

/// A request policy consulted by the proxy host once per request.
pub trait Policy: Send + Sync {
    /// Evaluate the request and explain the outcome.
    fn evaluate(&self, request: &RequestDescriptor) -> Decision;

    /// Boolean contract: `true` forwards, `false` drops.
    fn decide(&self, request: &RequestDescriptor) -> bool {
        self.evaluate(request).is_allowed()
    }
}

impl<P: Policy + ?Sized> Policy for std::sync::Arc<P> {
    fn evaluate(&self, request: &RequestDescriptor) -> Decision {
        (**self).evaluate(request)
    }
}
