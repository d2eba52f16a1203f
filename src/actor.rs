// Single-consumer serialization actor.
//
// The actor is the only owner of its state `S`: `start` moves `S` into
// the worker thread and nothing else can reach it afterwards. All
// mutation travels as messages through a bounded queue, so callers get
// linearized updates without a state-level lock. Independent work
// between two submissions (sleeps, I/O, other actors) runs fully
// concurrently across callers.

use crate::completion::{completion_pair, Completer, CompletionHandle};
use crate::queue::CondvarQueue;
use crate::BoundedQueue;
use crate::TaskFailure;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// One queued unit of work: a state transition plus the one-shot
/// completer that reports its outcome back to the submitter.
pub struct Task<S> {
   run: Box<dyn FnOnce(&mut S) + Send + 'static>,
   done: Completer,
}

impl<S> Task<S> {
   /// Run the transition at the invocation boundary: a panicking task
   /// resolves its own handle with the failure and never unwinds into
   /// the worker loop.
   fn execute(self, state: &mut S) {
      let run = self.run;
      match catch_unwind(AssertUnwindSafe(|| run(state))) {
         Ok(()) => self.done.resolve(Ok(())),
         Err(payload) => {
            let failure = TaskFailure::from_panic(payload);
            debug!(%failure, "task panicked; reporting failure to submitter");
            self.done.resolve(Err(failure));
         }
      }
   }
}

/// Exclusive owner of one state value `S`, mutated only by its single
/// worker thread in queue-delivery order.
///
/// Lifecycle is `new` (or [`with_queue`](SerializingActor::with_queue))
/// → [`start`](SerializingActor::start) →
/// [`submit`](SerializingActor::submit)* →
/// [`stop`](SerializingActor::stop). `stop` consumes the actor, so
/// submit-after-stop and double-stop do not compile; submit-before-start
/// and double-start panic.
pub struct SerializingActor<S, Q = CondvarQueue<Task<S>>> {
   queue: Arc<Q>,
   state: Option<S>,
   worker: Option<JoinHandle<S>>,
}

impl<S: Send + 'static> SerializingActor<S> {
   /// Actor over the default condition-variable queue backing.
   pub fn new(state: S, capacity: usize) -> Self {
      Self::with_queue(state, CondvarQueue::new(capacity))
   }
}

impl<S, Q> SerializingActor<S, Q>
where
   S: Send + 'static,
   Q: BoundedQueue<Task<S>>,
{
   /// Actor over a caller-chosen queue backing. The queue must be
   /// fresh: the actor assumes it is the only consumer.
   pub fn with_queue(state: S, queue: Q) -> Self {
      Self { queue: Arc::new(queue), state: Some(state), worker: None }
   }

   /// Spawn the worker thread. The worker drains the queue in delivery
   /// order and exits once the queue reports closed-and-drained.
   pub fn start(&mut self) {
      let state = self.state.take().expect("actor already started");
      let queue = Arc::clone(&self.queue);
      debug!(capacity = queue.capacity(), "starting serializing actor");
      let worker = thread::Builder::new()
         .name("serializing-actor".into())
         .spawn(move || {
            let mut state = state;
            while let Some(task) = queue.get() {
               task.execute(&mut state);
            }
            debug!("actor worker drained and exiting");
            state
         })
         .expect("failed to spawn actor worker");
      self.worker = Some(worker);
   }

   /// Enqueue a state transition; blocks while the queue is full.
   ///
   /// Returns immediately after enqueueing — callers decide whether to
   /// [`wait`](CompletionHandle::wait) right away or do other work
   /// first. Panics if the actor is not running.
   pub fn submit(&self, run: impl FnOnce(&mut S) + Send + 'static) -> CompletionHandle {
      assert!(self.worker.is_some(), "submit on an actor that is not running");
      let (handle, done) = completion_pair();
      self.queue.add(Task { run: Box::new(run), done });
      handle
   }

   /// Close the queue, wait for the worker to finish every task
   /// submitted so far, and hand the final state back.
   ///
   /// Callers must not race `submit` against `stop`: all producers
   /// stop before the actor does.
   pub fn stop(mut self) -> S {
      let worker = self.worker.take().expect("stop on an actor that was never started");
      self.queue.close();
      let state = worker.join().expect("actor worker panicked");
      debug!("serializing actor stopped");
      state
   }
}
