// Bounded MPMC FIFO queue – mutex plus a condition-variable pair

use crate::BoundedQueue;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/*──────────────────────────────────────────────────────────────────────────*/
/*  Shared state under the mutex                                            */
/*──────────────────────────────────────────────────────────────────────────*/

#[derive(Debug)]
struct Inner<T> {
   buf: VecDeque<T>,
   closed: bool,
}

/// Bounded FIFO queue backed by a `Mutex<VecDeque>` and two condition
/// variables, one per wait direction. This is the reference backing:
/// every ordering guarantee the crate documents is easiest to read off
/// this implementation.
#[derive(Debug)]
pub struct CondvarQueue<T> {
   capacity: usize,
   inner: Mutex<Inner<T>>,
   not_empty: Condvar, // consumers wait here
   not_full: Condvar,  // producers wait here
}

impl<T> CondvarQueue<T> {
   /// Build a queue holding at most `capacity` items.
   pub fn new(capacity: usize) -> Self {
      assert!(capacity > 0, "queue capacity must be greater than zero");
      Self {
         capacity,
         inner: Mutex::new(Inner { buf: VecDeque::with_capacity(capacity), closed: false }),
         not_empty: Condvar::new(),
         not_full: Condvar::new(),
      }
   }
}

/*──────────────────────────── queue operations ────────────────────────────*/

impl<T: Send + 'static> BoundedQueue<T> for CondvarQueue<T> {
   fn add(&self, item: T) {
      let mut inner = self.inner.lock().unwrap();
      while inner.buf.len() == self.capacity && !inner.closed {
         inner = self.not_full.wait(inner).unwrap();
      }
      // Contract: producers stop before close. Fail fast, not silently
      // — and release the lock first so the panic only kills the
      // misbehaving producer, not the queue.
      if inner.closed {
         drop(inner);
         panic!("add on a closed queue");
      }
      inner.buf.push_back(item);
      drop(inner);
      self.not_empty.notify_one();
   }

   fn get(&self) -> Option<T> {
      let mut inner = self.inner.lock().unwrap();
      loop {
         if let Some(item) = inner.buf.pop_front() {
            drop(inner);
            self.not_full.notify_one();
            return Some(item);
         }
         if inner.closed {
            return None;
         }
         inner = self.not_empty.wait(inner).unwrap();
      }
   }

   fn close(&self) {
      let mut inner = self.inner.lock().unwrap();
      inner.closed = true;
      drop(inner);
      self.not_empty.notify_all();
      self.not_full.notify_all();
   }

   fn len(&self) -> usize {
      self.inner.lock().unwrap().buf.len()
   }

   fn capacity(&self) -> usize {
      self.capacity
   }

   fn is_closed(&self) -> bool {
      self.inner.lock().unwrap().closed
   }
}
