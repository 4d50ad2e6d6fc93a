//! Concurrent generation/search coordination for the secure room.
//!
//! This module runs the generator and the pathfinder as two independently-paced worker threads
//! against one shared grid. The grid is the only shared mutable resource; a single mutex guards
//! it for the full duration of a generation pass or a complete search traversal, so neither
//! worker ever observes a partially-updated room. Shutdown is cooperative: a stop flag checked
//! at the top of every cycle, before the lock is reacquired, so a stop request is honored within
//! one cadence period and no forced interruption can leave the lock held or the grid
//! half-mutated.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use color_eyre::eyre::{eyre, Result};

use crate::{
    generator,
    grid::Grid,
    pathfinding::{self, SearchReport},
};

/// Configuration for one coordinator run.
///
/// This structure carries the knobs the external collaborator decides before the workers start:
/// the target open-cell density, the two worker cadences, and the render-lock mode.
#[derive(Clone, Copy, Debug)]
pub struct RoomConfig {
    /// Target probability that an eligible cell becomes open.
    pub density: f64,
    /// Fixed sleep interval separating consecutive generation passes.
    pub generation_cadence: Duration,
    /// Fixed sleep interval separating consecutive search passes.
    pub search_cadence: Duration,
    /// Render-lock mode.
    ///
    /// When `true` the per-pass callback runs while the grid lock is still held
    /// (hold-during-render): it observes the exact live grid, and a slow callback delays the
    /// other worker. When `false` the grid is cloned under the lock and the callback runs after
    /// release (snapshot-then-render): it never blocks the other worker and never sees a torn
    /// grid, but its snapshot may lag the next pass.
    pub render_while_locked: bool,
}

/// Handle to the two running room workers.
///
/// This structure owns the worker join handles and the shared stop flag. Dropping it does not
/// stop the workers; call [`stop`](Coordinator::stop) and then [`join`](Coordinator::join),
/// after which both workers have reached their stopped state and the grid's storage has been
/// released.
pub struct Coordinator {
    /// Cooperative stop flag shared with both workers.
    stop: Arc<AtomicBool>,
    /// Join handle of the generation worker.
    generation: JoinHandle<()>,
    /// Join handle of the search worker.
    search: JoinHandle<()>,
}

impl Coordinator {
    /// Spawns the generation and search workers against the given room.
    ///
    /// The generation worker performs one unconditional full reset-and-fill before entering its
    /// steady cycle; that first fill is not reported. Each steady cycle locks the grid, runs its
    /// pass, reports it through the corresponding callback per the configured render-lock mode,
    /// and sleeps for its cadence. The workers are peers: neither shuts the other down, and
    /// their interleaving is nondeterministic, constrained only by the mutual exclusion on the
    /// grid.
    pub fn spawn<G, S>(grid: Grid, config: RoomConfig, on_generated: G, on_searched: S) -> Self
    where
        G: FnMut(u64, &Grid) + Send + 'static,
        S: FnMut(&SearchReport, &Grid) + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(grid));
        let stop = Arc::new(AtomicBool::new(false));

        let generation = {
            let shared = Arc::clone(&shared);
            let stop = Arc::clone(&stop);
            thread::spawn(move || generation_worker(&shared, &stop, config, on_generated))
        };
        let search = {
            let shared = Arc::clone(&shared);
            let stop = Arc::clone(&stop);
            thread::spawn(move || search_worker(&shared, &stop, config, on_searched))
        };

        Self {
            stop,
            generation,
            search,
        }
    }

    /// Requests cooperative shutdown of both workers.
    ///
    /// A worker may complete the pass it is currently in before observing the request; both
    /// workers observe it within one cadence period.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Waits for both workers to reach their stopped state.
    ///
    /// # Errors
    ///
    /// Returns an error if either worker panicked, which only happens on an internal invariant
    /// violation.
    pub fn join(self) -> Result<()> {
        self.generation
            .join()
            .map_err(|_| eyre!("generation worker panicked"))?;
        self.search
            .join()
            .map_err(|_| eyre!("search worker panicked"))?;

        Ok(())
    }
}

/// Body of the generation worker thread.
///
/// `Idle → Generating → Rendering → sleep → Generating → …`, with the stop flag checked before
/// every reacquisition of the grid lock.
fn generation_worker(
    shared: &Mutex<Grid>,
    stop: &AtomicBool,
    config: RoomConfig,
    mut on_generated: impl FnMut(u64, &Grid),
) {
    let mut rng = rand::rng();
    let mut pass: u64 = 0;

    // The very first cycle is an unconditional full reset-and-fill; it is not reported.
    {
        let mut room = lock_room(shared);
        generator::generate(&mut room, config.density, &mut rng);
    }

    while !stop.load(Ordering::Acquire) {
        {
            let mut room = lock_room(shared);
            generator::regenerate(&mut room, config.density, &mut rng);
            pass += 1;

            if config.render_while_locked {
                on_generated(pass, &room);
            } else {
                let snapshot = room.clone();
                drop(room);
                on_generated(pass, &snapshot);
            }
        }

        thread::sleep(config.generation_cadence);
    }
}

/// Body of the search worker thread.
///
/// `Idle → Searching → Reporting → sleep → Searching → …`, with the stop flag checked before
/// every reacquisition of the grid lock.
fn search_worker(
    shared: &Mutex<Grid>,
    stop: &AtomicBool,
    config: RoomConfig,
    mut on_searched: impl FnMut(&SearchReport, &Grid),
) {
    while !stop.load(Ordering::Acquire) {
        {
            let mut room = lock_room(shared);
            let report = pathfinding::search(&mut room);

            if config.render_while_locked {
                on_searched(&report, &room);
            } else {
                let snapshot = room.clone();
                drop(room);
                on_searched(&report, &snapshot);
            }
        }

        thread::sleep(config.search_cadence);
    }
}

/// Acquires the room lock, recovering the grid from a poisoned mutex.
///
/// Every pass overwrites the grid wholesale, so an intermediate state left behind by a panicked
/// peer is safe to take over.
fn lock_room(shared: &Mutex<Grid>) -> MutexGuard<'_, Grid> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::grid::Cell;

    /// Counts the cells holding the given value.
    fn count_cells(grid: &Grid, cell: Cell) -> usize {
        let mut count = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if grid.get(row, col) == cell {
                    count += 1;
                }
            }
        }

        count
    }

    /// Builds a configuration with cadences short enough for lifecycle tests.
    fn fast_config() -> RoomConfig {
        RoomConfig {
            density: 0.4,
            generation_cadence: Duration::from_millis(1),
            search_cadence: Duration::from_millis(1),
            render_while_locked: false,
        }
    }

    #[test]
    fn test_workers_report_passes_and_observe_stop() {
        let (generated_sender, generated_receiver) = mpsc::channel();
        let (searched_sender, searched_receiver) = mpsc::channel();

        let coordinator = Coordinator::spawn(
            Grid::new(6, 6),
            fast_config(),
            move |pass, grid| {
                let _ = generated_sender.send((pass, grid.clone()));
            },
            move |report, _grid| {
                let _ = searched_sender.send(*report);
            },
        );

        // Give both workers time for several passes, then ask them to wind down.
        thread::sleep(Duration::from_millis(50));
        coordinator.stop();
        coordinator.join().expect("workers join cleanly");

        let generated: Vec<(u64, Grid)> = generated_receiver.try_iter().collect();
        let searched: Vec<SearchReport> = searched_receiver.try_iter().collect();
        assert!(!generated.is_empty(), "generation worker reported passes");
        assert!(!searched.is_empty(), "search worker reported passes");

        // Pass numbers count from 1 and are contiguous, and every reported snapshot satisfies
        // the marker invariant.
        for (index, (pass, grid)) in generated.iter().enumerate() {
            let expected = u64::try_from(index).expect("index fits") + 1;
            assert_eq!(*pass, expected, "contiguous pass numbers");
            assert_eq!(count_cells(grid, Cell::Entry), 1, "one entry per snapshot");
            assert_eq!(count_cells(grid, Cell::Exit), 1, "one exit per snapshot");
        }
    }

    #[test]
    fn test_hold_during_render_reports_live_grid() {
        let (generated_sender, generated_receiver) = mpsc::channel();

        let config = RoomConfig {
            render_while_locked: true,
            ..fast_config()
        };
        let coordinator = Coordinator::spawn(
            Grid::new(5, 5),
            config,
            move |pass, grid| {
                let _ = generated_sender.send((pass, grid.clone()));
            },
            |_report, _grid| {},
        );

        thread::sleep(Duration::from_millis(25));
        coordinator.stop();
        coordinator.join().expect("workers join cleanly");

        let generated: Vec<(u64, Grid)> = generated_receiver.try_iter().collect();
        assert!(!generated.is_empty(), "generation worker reported passes");
        for (_, grid) in &generated {
            assert_eq!(count_cells(grid, Cell::Entry), 1, "one entry per report");
            assert_eq!(count_cells(grid, Cell::Exit), 1, "one exit per report");
        }
    }

    #[test]
    fn test_concurrent_passes_never_tear_the_room() {
        // Two raw workers hammering the shared grid without any cadence, 1000 passes each; run
        // under a race detector this exercises the full lock discipline.
        let shared = Arc::new(Mutex::new(Grid::new(8, 8)));

        let generation = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(11);
                for _ in 0..1000 {
                    let mut room = lock_room(&shared);
                    generator::regenerate(&mut room, 0.5, &mut rng);
                }
            })
        };
        let search = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let mut room = lock_room(&shared);
                    let _ = pathfinding::search(&mut room);
                }
            })
        };

        generation.join().expect("generation worker finished");
        search.join().expect("search worker finished");

        // Whatever the final interleaving, one more pass restores the full invariant.
        let mut rng = StdRng::seed_from_u64(17);
        let mut room = lock_room(&shared);
        generator::regenerate(&mut room, 0.5, &mut rng);
        assert_eq!(count_cells(&room, Cell::Entry), 1, "one entry marker");
        assert_eq!(count_cells(&room, Cell::Exit), 1, "one exit marker");
    }
}
