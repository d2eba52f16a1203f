pub mod actor;
pub mod completion;
pub mod queue;

pub use actor::SerializingActor;
pub use actor::Task;
pub use completion::CompletionHandle;
pub use completion::Outcome;
pub use completion::TaskFailure;
pub use queue::CondvarQueue;
pub use queue::LifoQueue;
pub use queue::SemaphoreQueue;

/// Common interface for all bounded blocking queues.
///
/// Producers call [`add`](BoundedQueue::add), consumers call
/// [`get`](BoundedQueue::get); both block instead of spinning. `close`
/// is the cooperative shutdown signal: it wakes every blocked caller,
/// and `get` keeps returning queued items until the buffer is drained.
///
/// The default delivery order is FIFO. [`LifoQueue`] is the one
/// deliberate exception and says so in its name.
pub trait BoundedQueue<T: Send>: Send + Sync + 'static {
   /// Append `item`, blocking while the queue is full.
   ///
   /// Calling `add` once `close` has happened is a caller bug and
   /// panics; stop producing before you close.
   fn add(&self, item: T);

   /// Remove the next item, blocking while the queue is empty.
   ///
   /// Returns `None` only once the queue is closed *and* drained —
   /// items queued before `close` are still delivered.
   fn get(&self) -> Option<T>;

   /// Close the queue and wake all blocked producers and consumers.
   /// Already-queued items are kept. Idempotent.
   fn close(&self);

   /// Number of items currently buffered.
   fn len(&self) -> usize;

   /// Fixed capacity the queue was built with.
   fn capacity(&self) -> usize;

   /// True once `close` has been called.
   fn is_closed(&self) -> bool;

   fn is_empty(&self) -> bool {
      self.len() == 0
   }
}
