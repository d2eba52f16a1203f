// One-shot completion signalling between a submitter and the actor
// worker. The cell is single-assignment: pending, then resolved exactly
// once. The writing half (`Completer`) is consumed by `resolve`, so a
// double resolve is unrepresentable in safe callers; the assert is the
// backstop for the cell itself.

use std::any::Any;
use std::sync::{Arc, Condvar, Mutex};
use thiserror::Error;

/// What a task left behind: success, or the failure it raised.
pub type Outcome = Result<(), TaskFailure>;

/// Failure captured at the task-invocation boundary. Carries the panic
/// message when one could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("task failed: {0}")]
pub struct TaskFailure(String);

impl TaskFailure {
   pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
      let msg = if let Some(s) = payload.downcast_ref::<&str>() {
         (*s).to_owned()
      } else if let Some(s) = payload.downcast_ref::<String>() {
         s.clone()
      } else {
         "task panicked".to_owned()
      };
      TaskFailure(msg)
   }

   /// The captured failure message.
   pub fn message(&self) -> &str {
      &self.0
   }
}

#[derive(Debug)]
struct Cell {
   outcome: Mutex<Option<Outcome>>,
   resolved: Condvar,
}

/// Reader half of a one-shot completion signal, returned by
/// [`SerializingActor::submit`](crate::SerializingActor::submit).
///
/// Cloneable so several parties can wait on the same task; every waiter
/// observes the same outcome.
#[derive(Debug, Clone)]
pub struct CompletionHandle {
   cell: Arc<Cell>,
}

impl CompletionHandle {
   /// Block until the task has run, returning its outcome.
   pub fn wait(&self) -> Outcome {
      let mut slot = self.cell.outcome.lock().unwrap();
      loop {
         if let Some(outcome) = slot.as_ref() {
            return outcome.clone();
         }
         slot = self.cell.resolved.wait(slot).unwrap();
      }
   }

   /// Outcome if already resolved, without blocking.
   pub fn try_outcome(&self) -> Option<Outcome> {
      self.cell.outcome.lock().unwrap().clone()
   }
}

/// Writer half. Lives inside the queued task; only the actor worker
/// ever touches it.
#[derive(Debug)]
pub(crate) struct Completer {
   cell: Arc<Cell>,
}

impl Completer {
   pub(crate) fn resolve(self, outcome: Outcome) {
      let mut slot = self.cell.outcome.lock().unwrap();
      assert!(slot.is_none(), "completion resolved twice");
      *slot = Some(outcome);
      drop(slot);
      self.cell.resolved.notify_all();
   }
}

pub(crate) fn completion_pair() -> (CompletionHandle, Completer) {
   let cell = Arc::new(Cell { outcome: Mutex::new(None), resolved: Condvar::new() });
   (CompletionHandle { cell: cell.clone() }, Completer { cell })
}
