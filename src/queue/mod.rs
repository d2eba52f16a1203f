mod condvar;
mod lifo;
mod semaphore;

pub use condvar::CondvarQueue;
pub use lifo::LifoQueue;
pub use semaphore::SemaphoreQueue;
