//! Pluggable per-node computation.

use serde_json::Value;
use tracing::instrument;

use crate::error::ProcessError;
use crate::types::DataMap;

/// Output key written by [DoublingProcessor].
pub const SUM_KEY: &str = "sum";

/// Maps a node's current input to its output. Called once per dequeued node.
pub trait NodeProcessor: Send + Sync {
  fn process(&self, node_id: &str, data_in: &DataMap) -> Result<DataMap, ProcessError>;
}

impl<F> NodeProcessor for F
where
  F: Fn(&str, &DataMap) -> Result<DataMap, ProcessError> + Send + Sync,
{
  fn process(&self, node_id: &str, data_in: &DataMap) -> Result<DataMap, ProcessError> {
    self(node_id, data_in)
  }
}

/// Placeholder processor: doubles the first numeric input (in key order) into `sum`.
///
/// `sum` is 0 when no input is numeric. Deployments are expected to supply their own processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoublingProcessor;

impl NodeProcessor for DoublingProcessor {
  #[instrument(level = "trace", skip(self, data_in))]
  fn process(&self, node_id: &str, data_in: &DataMap) -> Result<DataMap, ProcessError> {
    let doubled = match data_in.values().find(|v| v.is_number()) {
      None => Value::from(0),
      Some(v) => match (v.as_i64(), v.as_f64()) {
        (Some(i), _) => i.checked_mul(2).map(Value::from).ok_or_else(|| {
          ProcessError::new(format!("{node_id}: value {i} overflows when doubled"))
        })?,
        (None, Some(f)) => Value::from(f * 2.0),
        (None, None) => {
          return Err(ProcessError::new(format!(
            "{node_id}: unsupported number {v}"
          )));
        }
      },
    };
    let mut out = DataMap::new();
    out.insert(SUM_KEY.to_string(), doubled);
    Ok(out)
  }
}
