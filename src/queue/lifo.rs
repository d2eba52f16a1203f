// LIFO variant – fixed buffer pushed and popped at the tail.
//
// One benchmark in the lineage of this crate used a "queue" that
// inserted and removed at the same end of its buffer. For commutative
// tasks (counter bumps) that is invisible; for anything
// ordering-sensitive it is not FIFO and must never be mistaken for it,
// hence the separate type.

use crate::BoundedQueue;
use std::sync::{Condvar, Mutex};

struct Inner<T> {
   buf: Vec<T>,
   closed: bool,
}

/// Bounded blocking *stack*: `get` returns the most recently added
/// item. Everything else (backpressure, close, drain) matches
/// [`CondvarQueue`](crate::CondvarQueue).
pub struct LifoQueue<T> {
   capacity: usize,
   inner: Mutex<Inner<T>>,
   not_empty: Condvar,
   not_full: Condvar,
}

impl<T> LifoQueue<T> {
   pub fn new(capacity: usize) -> Self {
      assert!(capacity > 0, "queue capacity must be greater than zero");
      Self {
         capacity,
         inner: Mutex::new(Inner { buf: Vec::with_capacity(capacity), closed: false }),
         not_empty: Condvar::new(),
         not_full: Condvar::new(),
      }
   }
}

impl<T: Send + 'static> BoundedQueue<T> for LifoQueue<T> {
   fn add(&self, item: T) {
      let mut inner = self.inner.lock().unwrap();
      while inner.buf.len() == self.capacity && !inner.closed {
         inner = self.not_full.wait(inner).unwrap();
      }
      if inner.closed {
         drop(inner);
         panic!("add on a closed queue");
      }
      inner.buf.push(item);
      drop(inner);
      self.not_empty.notify_one();
   }

   fn get(&self) -> Option<T> {
      let mut inner = self.inner.lock().unwrap();
      loop {
         if let Some(item) = inner.buf.pop() {
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
