use std::sync::atomic::{AtomicBool, Ordering::*};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::Rng;

use turnlock::{Color, LockState, TurnGatedColorLock};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What a run of the ring looked like from the outside.
pub struct Run {
    pub order: Vec<usize>,
    pub samples: Vec<LockState>,
}

pub fn random_work(max_millis: u64) {
    let millis = rand::thread_rng().gen_range(0..=max_millis);
    thread::sleep(Duration::from_millis(millis));
}

/// Spawns one thread per identity, in shuffled order, each doing a single
/// acquire / work / release cycle while a sampler watches the lock state.
pub fn run_ring(lock: &TurnGatedColorLock, ids: &[usize], colors: impl Fn(usize) -> Color + Sync) -> Run {
    let mut spawn_order = ids.to_vec();
    spawn_order.shuffle(&mut rand::thread_rng());

    let order = Mutex::new(Vec::new());
    let samples = Mutex::new(Vec::new());
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let sampler = s.spawn(|| {
            while !done.load(Acquire) {
                samples.lock().push(lock.snapshot());
                thread::sleep(Duration::from_micros(50));
            }
        });

        let workers: Vec<_> = spawn_order.iter().map(|&id| {
            let color = colors(id);
            let (order, samples) = (&order, &samples);
            s.spawn(move || {
                lock.acquire(color, id);
                let held = lock.snapshot();
                assert_eq!(held.current, Some(color), "#{} entered under {:?}", id, held);
                order.lock().push(id);
                samples.lock().push(lock.snapshot());
                random_work(3);
                lock.release(color, id);
            })
        }).collect();

        for worker in workers {
            worker.join().expect("worker panicked");
        }
        done.store(true, Release);
        sampler.join().expect("sampler panicked");
    });

    Run { order: order.into_inner(), samples: samples.into_inner() }
}
