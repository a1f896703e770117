//! Mode dispatcher
//!
//! [`Controller`] owns the whole control context and runs one mode at a
//! time. Each [`tick`](Controller::tick) runs the current step of the
//! mode's schedule, sleeps out the period and, when a task asked for it,
//! switches to the next mode with a freshly anchored scheduler.

use crate::config::ControllerConfig;
use crate::display::DisplaySink;
use crate::fault::FaultLatch;
use crate::mode::schedule;
use crate::scheduler::{CycleStats, PeriodicScheduler};
use crate::state::{OperatingMode, SensorState};
use crate::tasks::{TaskContext, TaskOutcome};
use crate::traits::{Delay, TimeSource};
use crate::transport::Transport;
use crate::{log_info, log_warn};

/// Single-threaded supervisory controller
pub struct Controller<T, S, C, D> {
    tasks: TaskContext<T, S, C>,
    delay: D,
    mode: OperatingMode,
    scheduler: PeriodicScheduler,
    stats: [CycleStats; 4],
}

impl<T, S, C, D> Controller<T, S, C, D>
where
    T: Transport,
    S: DisplaySink,
    C: TimeSource,
    D: Delay,
{
    /// Controller in Normal mode, anchored at the current time
    pub fn new(transport: T, display: S, clock: C, delay: D, config: ControllerConfig) -> Self {
        let tasks = TaskContext::new(transport, display, clock, config);
        let scheduler = begin(&tasks, OperatingMode::Normal);
        log_info!("controller start, profile {}", config.features.name());
        Self {
            tasks,
            delay,
            mode: OperatingMode::Normal,
            scheduler,
            stats: [CycleStats::default(); 4],
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn state(&self) -> &SensorState {
        self.tasks.state()
    }

    pub fn latch(&self) -> &FaultLatch {
        self.tasks.latch()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.tasks.config
    }

    pub fn scheduler(&self) -> &PeriodicScheduler {
        &self.scheduler
    }

    /// Tick statistics accumulated while in `mode`
    pub fn stats(&self, mode: OperatingMode) -> &CycleStats {
        &self.stats[mode as usize]
    }

    pub fn transport(&self) -> &T {
        &self.tasks.transport
    }

    pub fn display(&self) -> &S {
        &self.tasks.display
    }

    /// Run one tick and return the mode the next tick will run in.
    ///
    /// Tasks run in schedule order. Emergency reported by any task
    /// abandons the rest of the step; other transitions let the step
    /// finish. Either way the tick's sleep completes before the switch.
    pub fn tick(&mut self) -> OperatingMode {
        let mode = self.mode;
        let features = self.tasks.config.features;
        let steps = schedule(mode, features);
        let step = steps[self.scheduler.step() % steps.len()];
        let latched = !mode.is_terminal();

        let mut next = mode;
        for &task in step {
            match self.tasks.run(task, latched) {
                TaskOutcome::Mode(_) if !latched => {}
                TaskOutcome::Mode(OperatingMode::Emergency) => {
                    next = OperatingMode::Emergency;
                    break;
                }
                TaskOutcome::Mode(target) => next = target,
                TaskOutcome::Done | TaskOutcome::Unexpected => {}
            }
        }

        if next != mode && !features.enables(next) {
            log_warn!("{} not enabled, staying in {}", next.name(), mode.name());
            next = mode;
        }

        let tick = self
            .scheduler
            .complete_tick(&self.tasks.clock, &mut self.delay);
        self.stats[mode as usize].record(&tick);

        if next != mode {
            log_info!("mode {} -> {}", mode.name(), next.name());
            self.mode = next;
            self.scheduler = begin(&self.tasks, next);
        }
        next
    }

    /// Run forever
    pub fn run(mut self) -> ! {
        loop {
            self.tick();
        }
    }
}

/// Fresh scheduler for a mode run starting now
fn begin<T, S, C>(tasks: &TaskContext<T, S, C>, mode: OperatingMode) -> PeriodicScheduler
where
    C: TimeSource,
{
    let config = &tasks.config;
    let period = match mode {
        OperatingMode::Emergency => config.emergency_period,
        _ => config.period,
    };
    let steps = schedule(mode, config.features).len();
    PeriodicScheduler::start(tasks.clock.now(), period, steps)
}
