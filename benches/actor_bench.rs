// Benchmark: lock-around-the-state baseline vs. the serializing actor,
// on the cache-counter workload. Each logical unit mutates shared
// state, simulates an independent high-latency operation, then mutates
// again; the interesting axis is how much of that latency overlaps.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use actor_queues::{BoundedQueue, CondvarQueue, SemaphoreQueue, SerializingActor, Task};

const MAX_ITER: usize = 1000;
const NUM_CALC: usize = 10;
const NUM_WORKERS: usize = 8;
const QUEUE_CAP: usize = 100;

type Cache = HashMap<String, String>;

fn get_key(i: usize) -> String {
   format!("hello{}", i)
}

fn calc(cache: &mut Cache) {
   for i in 0..NUM_CALC {
      let key = get_key(i);
      let next = match cache.get(&key) {
         None => 1,
         Some(s) => s.parse::<u64>().unwrap() + 1,
      };
      cache.insert(key, next.to_string());
   }
}

fn fake_io(sleep_time: Duration) {
   thread::sleep(sleep_time);
}

fn check_work(cache: &Cache) {
   let expected = (2 * MAX_ITER).to_string();
   for i in 0..NUM_CALC {
      assert_eq!(cache.get(&get_key(i)), Some(&expected), "result difference");
   }
}

// Baseline: every unit locks the map directly around each calculation.
fn cache_calc_mutex(sleep_time: Duration) -> Cache {
   let cache = Arc::new(Mutex::new(Cache::new()));
   let per_worker = MAX_ITER / NUM_WORKERS;

   crossbeam::thread::scope(|scope| {
      for _ in 0..NUM_WORKERS {
         let cache = cache.clone();
         scope.spawn(move |_| {
            for _ in 0..per_worker {
               calc(&mut cache.lock().unwrap());
               fake_io(sleep_time);
               calc(&mut cache.lock().unwrap());
            }
         });
      }
   })
   .unwrap();

   Arc::try_unwrap(cache).unwrap().into_inner().unwrap()
}

// Actor: same unit shape, but mutation goes through submit/wait and
// the map itself is never locked by the workers.
fn cache_calc_actor<Q>(queue: Q, sleep_time: Duration) -> Cache
where
   Q: BoundedQueue<Task<Cache>>,
{
   let mut actor = SerializingActor::with_queue(Cache::new(), queue);
   actor.start();
   let per_worker = MAX_ITER / NUM_WORKERS;

   crossbeam::thread::scope(|scope| {
      for _ in 0..NUM_WORKERS {
         scope.spawn(|_| {
            for _ in 0..per_worker {
               actor.submit(calc).wait().unwrap();
               fake_io(sleep_time);
               actor.submit(calc).wait().unwrap();
            }
         });
      }
   })
   .unwrap();

   actor.stop()
}

fn bench_cache_calc(c: &mut Criterion) {
   let mut group = c.benchmark_group("cache_calc");

   for sleep_us in [8u64, 64] {
      let sleep_time = Duration::from_micros(sleep_us);

      group.bench_with_input(BenchmarkId::new("mutex", sleep_us), &sleep_time, |b, &d| {
         b.iter(|| {
            let cache = cache_calc_mutex(d);
            check_work(&cache);
         });
      });

      group.bench_with_input(
         BenchmarkId::new("actor_condvar", sleep_us),
         &sleep_time,
         |b, &d| {
            b.iter(|| {
               let cache = cache_calc_actor(CondvarQueue::new(QUEUE_CAP), d);
               check_work(&cache);
            });
         },
      );

      group.bench_with_input(
         BenchmarkId::new("actor_semaphore", sleep_us),
         &sleep_time,
         |b, &d| {
            b.iter(|| {
               let cache = cache_calc_actor(SemaphoreQueue::new(QUEUE_CAP), d);
               check_work(&cache);
            });
         },
      );
   }

   group.finish();
}

fn custom_criterion() -> Criterion {
   Criterion::default()
      .warm_up_time(Duration::from_secs(3))
      .measurement_time(Duration::from_secs(10))
      .sample_size(20)
}

criterion_group! {
   name = benches;
   config = custom_criterion();
   targets = bench_cache_calc
}
criterion_main!(benches);
