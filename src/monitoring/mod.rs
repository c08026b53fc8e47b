/*!
 * Monitoring
 * Structured tracing for memory operations
 */

mod tracer;

pub use tracer::{init_tracing, span_operation, OperationSpan};
