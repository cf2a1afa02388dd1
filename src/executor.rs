/// Executor interface
///
/// A host routes named requests ("/search", "/index", ...) carrying a document
/// batch and a free-form parameter map to the executors registered for them.
/// The ranker answers "/search".

use crate::document::Document;
use crate::errors::RankerError;

/// Request name the ranker is bound to.
pub const SEARCH_ENDPOINT: &str = "/search";

/// Per-call key-value parameters sent along with a batch.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

pub trait Executor {
    /// Whether this executor processes requests sent to `endpoint`.
    fn handles(&self, endpoint: &str) -> bool;

    /// Process one batch in place.
    fn process(
        &self,
        endpoint: &str,
        docs: &mut [Document],
        parameters: &Parameters,
    ) -> Result<(), RankerError>;
}

/// Run `docs` through every executor bound to `endpoint`, in order.
///
/// Returns how many executors processed the batch. The first error aborts the
/// call; executors after it do not run.
pub fn dispatch(
    executors: &[&dyn Executor],
    endpoint: &str,
    docs: &mut [Document],
    parameters: &Parameters,
) -> Result<usize, RankerError> {
    let mut handled = 0;
    for executor in executors.iter().filter(|e| e.handles(endpoint)) {
        executor.process(endpoint, docs, parameters)?;
        handled += 1;
    }

    if handled == 0 {
        tracing::debug!(endpoint = %endpoint, "no executor bound to endpoint");
    }
    Ok(handled)
}
