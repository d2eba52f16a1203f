// Bounded MPMC FIFO queue – counting-semaphore discipline over a
// lock-free ring. Two semaphores gate the two wait directions: `slots`
// starts at capacity and bounds occupancy, `items` starts at zero and
// counts delivered-but-unconsumed entries. The ring itself never blocks.

use crate::BoundedQueue;
use crossbeam::queue::ArrayQueue;
use std::sync::{Condvar, Mutex};

struct SemState {
   permits: usize,
   closed: bool,
}

/// Closable counting semaphore. `close` wakes every waiter; the two
/// acquire flavours differ only in whether remaining permits are still
/// honoured after close.
struct Semaphore {
   state: Mutex<SemState>,
   cv: Condvar,
}

impl Semaphore {
   fn new(permits: usize) -> Self {
      Self { state: Mutex::new(SemState { permits, closed: false }), cv: Condvar::new() }
   }

   /// Take a permit, draining leftovers after close. `false` means
   /// closed with nothing left.
   fn acquire(&self) -> bool {
      let mut state = self.state.lock().unwrap();
      loop {
         if state.permits > 0 {
            state.permits -= 1;
            return true;
         }
         if state.closed {
            return false;
         }
         state = self.cv.wait(state).unwrap();
      }
   }

   /// Take a permit, refusing as soon as the semaphore is closed even
   /// if permits remain. Producer-side flavour.
   fn acquire_if_open(&self) -> bool {
      let mut state = self.state.lock().unwrap();
      loop {
         if state.closed {
            return false;
         }
         if state.permits > 0 {
            state.permits -= 1;
            return true;
         }
         state = self.cv.wait(state).unwrap();
      }
   }

   fn release(&self) {
      let mut state = self.state.lock().unwrap();
      state.permits += 1;
      drop(state);
      self.cv.notify_one();
   }

   fn close(&self) {
      let mut state = self.state.lock().unwrap();
      state.closed = true;
      drop(state);
      self.cv.notify_all();
   }

   fn is_closed(&self) -> bool {
      self.state.lock().unwrap().closed
   }
}

/// Semaphore-backed sibling of [`CondvarQueue`](crate::CondvarQueue).
/// Same contract, different synchronization strategy: blocking lives in
/// the semaphores, storage is a `crossbeam` `ArrayQueue`.
pub struct SemaphoreQueue<T> {
   ring: ArrayQueue<T>,
   slots: Semaphore,
   items: Semaphore,
}

impl<T> SemaphoreQueue<T> {
   pub fn new(capacity: usize) -> Self {
      assert!(capacity > 0, "queue capacity must be greater than zero");
      Self {
         ring: ArrayQueue::new(capacity),
         slots: Semaphore::new(capacity),
         items: Semaphore::new(0),
      }
   }
}

impl<T: Send + 'static> BoundedQueue<T> for SemaphoreQueue<T> {
   fn add(&self, item: T) {
      if !self.slots.acquire_if_open() {
         panic!("add on a closed queue");
      }
      // A slot permit guarantees room in the ring.
      if self.ring.push(item).is_err() {
         unreachable!("ring full despite holding a slot permit");
      }
      self.items.release();
   }

   fn get(&self) -> Option<T> {
      if !self.items.acquire() {
         return None;
      }
      // An item permit guarantees a completed push.
      match self.ring.pop() {
         Some(item) => {
            self.slots.release();
            Some(item)
         }
         None => unreachable!("ring empty despite holding an item permit"),
      }
   }

   fn close(&self) {
      self.slots.close();
      self.items.close();
   }

   fn len(&self) -> usize {
      self.ring.len()
   }

   fn capacity(&self) -> usize {
      self.ring.capacity()
   }

   fn is_closed(&self) -> bool {
      self.items.is_closed()
   }
}
