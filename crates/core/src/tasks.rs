//! Sensor and actuator tasks
//!
//! Every task is one request/response exchange followed by interpretation
//! of the answer, a display update and a [`TaskOutcome`]. Tasks share one
//! owned [`TaskContext`] holding the transport, the display sinks, the clock,
//! the sensor state and the fault latch.
//!
//! # Fault handling
//!
//! - Latched tasks (every mode but Emergency) consult the [`FaultLatch`]
//!   first and return Emergency without I/O once it is set.
//! - The fault sentinel, or a link error, trips the latch and returns
//!   Emergency. This is only armed when Emergency is enabled; otherwise
//!   both count as an unrecognized response.
//! - An unrecognized response skips the display and the state update and
//!   reports [`TaskOutcome::Unexpected`], except where a task defines its
//!   own default.

use crate::config::ControllerConfig;
use crate::display::DisplaySink;
use crate::fault::FaultLatch;
use crate::protocol::{Frame, Movement, Request, Response, Subsystem, Switch};
use crate::state::{OperatingMode, SensorState};
use crate::traits::TimeSource;
use crate::transport::Transport;
use crate::{log_debug, log_error, log_trace, log_warn};

/// Accelerate/brake policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// Boundary at the cruise limit
    Cruise,
    /// Boundary at the approach limit
    Approach,
    /// Gas always released, brake always applied
    Halt,
}

/// One entry of a mode schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Task {
    Speed,
    Slope,
    Gas(Drive),
    Brake(Drive),
    /// Toggle the mixer once the toggle interval has passed
    Mixer,
    LightSensor,
    /// Lamps follow the darkness flag
    Lamps,
    /// Lamps forced on
    LampsOn,
    /// Go/stop signal; triggers Normal or Stop
    Movement,
    /// Distance while cruising; may trigger Braking
    Distance,
    /// Distance while braking; may trigger Stop
    DistanceBraking,
    /// Announce the emergency to the peer
    FaultAck,
}

impl Task {
    pub const fn name(self) -> &'static str {
        match self {
            Task::Speed => "speed",
            Task::Slope => "slope",
            Task::Gas(_) => "gas",
            Task::Brake(_) => "brake",
            Task::Mixer => "mixer",
            Task::LightSensor => "light",
            Task::Lamps | Task::LampsOn => "lamps",
            Task::Movement => "movement",
            Task::Distance | Task::DistanceBraking => "distance",
            Task::FaultAck => "fault-ack",
        }
    }
}

/// Result code reported by a task to the mode loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskOutcome {
    /// Exchange done (or nothing to do), no transition
    Done,
    /// Response not recognized; no transition
    Unexpected,
    /// Next mode requested by the task
    Mode(OperatingMode),
}

/// What came back from one exchange
enum Reply {
    Answer(Response),
    Fault,
    Unrecognized,
}

/// State shared by all tasks, owned by the control loop
pub struct TaskContext<T, S, C> {
    pub(crate) transport: T,
    pub(crate) display: S,
    pub(crate) clock: C,
    pub(crate) config: ControllerConfig,
    pub(crate) state: SensorState,
    pub(crate) latch: FaultLatch,
}

impl<T, S, C> TaskContext<T, S, C>
where
    T: Transport,
    S: DisplaySink,
    C: TimeSource,
{
    /// New context; the mixer interval starts counting now
    pub fn new(transport: T, display: S, clock: C, config: ControllerConfig) -> Self {
        let state = SensorState::new(clock.now());
        Self {
            transport,
            display,
            clock,
            config,
            state,
            latch: FaultLatch::new(),
        }
    }

    pub fn state(&self) -> &SensorState {
        &self.state
    }

    pub fn latch(&self) -> &FaultLatch {
        &self.latch
    }

    /// Run one task.
    ///
    /// `latched` is false only for the degraded Emergency forms, which keep
    /// talking to the peer after the latch has been set.
    pub fn run(&mut self, task: Task, latched: bool) -> TaskOutcome {
        if latched && self.latch.is_set() {
            return TaskOutcome::Mode(OperatingMode::Emergency);
        }

        match task {
            Task::Speed => self.read_speed(),
            Task::Slope => self.read_slope(),
            Task::Gas(drive) => self.drive_gas(drive),
            Task::Brake(drive) => self.drive_brake(drive),
            Task::Mixer => self.toggle_mixer(),
            Task::LightSensor => self.read_light(),
            Task::Lamps => self.switch_lamps(self.state.dark),
            Task::LampsOn => self.switch_lamps(true),
            Task::Movement => self.read_movement(),
            Task::Distance => self.read_distance(),
            Task::DistanceBraking => self.read_distance_braking(),
            Task::FaultAck => self.acknowledge_fault(),
        }
    }

    fn exchange(&mut self, request: Request) -> Reply {
        let frame = request.to_frame();
        let sentinel_armed = self.config.features.emergency;
        let answer = match self.transport.exchange(&frame) {
            Ok(answer) => answer,
            Err(err) if sentinel_armed => {
                log_error!("{} exchange failed: {}", request.subsystem().name(), err);
                self.trip();
                return Reply::Fault;
            }
            Err(err) => {
                log_warn!("{} exchange failed: {}", request.subsystem().name(), err);
                return Reply::Unrecognized;
            }
        };
        log_trace!("{} -> {}", payload_text(&frame), payload_text(&answer));

        if answer.is_fault() && sentinel_armed {
            log_error!("fault sentinel in answer to {}", request.subsystem().name());
            self.trip();
            return Reply::Fault;
        }

        match Response::parse_for(&answer, request.subsystem()) {
            Ok(Response::Fault) => {
                log_warn!("fault sentinel ignored: emergency mode disabled");
                Reply::Unrecognized
            }
            Ok(response) => Reply::Answer(response),
            Err(err) => {
                log_warn!("{} answer {}: {}", request.subsystem().name(), payload_text(&answer), err);
                Reply::Unrecognized
            }
        }
    }

    fn trip(&mut self) {
        if self.latch.trip() {
            log_error!("fault latch set, entering emergency");
        } else {
            log_debug!("fault seen again, {} in total", self.latch.trip_count());
        }
    }

    fn read_speed(&mut self) -> TaskOutcome {
        match self.exchange(Request::Speed) {
            Reply::Answer(Response::Speed(speed)) => {
                self.state.speed = speed;
                self.display.show_speed(speed);
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    fn read_slope(&mut self) -> TaskOutcome {
        match self.exchange(Request::Slope) {
            Reply::Answer(Response::Slope(slope)) => {
                self.state.slope = slope;
                self.display.show_slope(slope);
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    /// Whether the gas should be applied under `drive`
    fn gas_wanted(&self, drive: Drive) -> bool {
        match drive {
            Drive::Cruise => self.state.speed <= self.config.cruise_limit,
            Drive::Approach => self.state.speed <= self.config.approach_limit,
            Drive::Halt => false,
        }
    }

    fn drive_gas(&mut self, drive: Drive) -> TaskOutcome {
        let on = self.gas_wanted(drive);
        if drive == Drive::Halt {
            self.display.show_gas(on);
        }
        match self.exchange(Request::Gas(Switch::from_bool(on))) {
            Reply::Answer(Response::Ack(Subsystem::Gas)) => {
                if drive != Drive::Halt {
                    self.display.show_gas(on);
                }
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    fn drive_brake(&mut self, drive: Drive) -> TaskOutcome {
        // braking is the complement of accelerating
        let on = !self.gas_wanted(drive);
        if drive == Drive::Halt {
            self.display.show_brake(on);
        }
        match self.exchange(Request::Brake(Switch::from_bool(on))) {
            Reply::Answer(Response::Ack(Subsystem::Brake)) => {
                if drive != Drive::Halt {
                    self.display.show_brake(on);
                }
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    fn toggle_mixer(&mut self) -> TaskOutcome {
        let now = self.clock.now();
        if now - self.state.mixer_changed_at <= self.config.mixer_interval {
            return TaskOutcome::Done;
        }
        let on = !self.state.mixer_on;
        match self.exchange(Request::Mixer(Switch::from_bool(on))) {
            Reply::Answer(Response::Ack(Subsystem::Mixer)) => {
                self.state.mixer_on = on;
                self.state.mixer_changed_at = now;
                self.display.show_mixer(on);
                log_debug!("mixer {}", if on { "on" } else { "off" });
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    fn read_light(&mut self) -> TaskOutcome {
        match self.exchange(Request::Light) {
            Reply::Answer(Response::Light(level)) => {
                let dark = level < self.config.dark_threshold;
                self.state.dark = dark;
                self.display.show_light(dark);
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    fn switch_lamps(&mut self, on: bool) -> TaskOutcome {
        match self.exchange(Request::Lamps(Switch::from_bool(on))) {
            Reply::Answer(Response::Ack(Subsystem::Lamps)) => {
                self.display.show_lamps(on);
                TaskOutcome::Done
            }
            reply => other(reply),
        }
    }

    fn read_movement(&mut self) -> TaskOutcome {
        match self.exchange(Request::Movement) {
            Reply::Answer(Response::Movement(Movement::Go)) => {
                self.display.show_stop(false);
                TaskOutcome::Mode(OperatingMode::Normal)
            }
            Reply::Answer(Response::Movement(Movement::Stop)) => {
                self.display.show_stop(true);
                TaskOutcome::Mode(OperatingMode::Stop)
            }
            Reply::Fault => TaskOutcome::Mode(OperatingMode::Emergency),
            // fail-open: anything unrecognized releases the train
            _ => TaskOutcome::Mode(OperatingMode::Normal),
        }
    }

    fn read_distance(&mut self) -> TaskOutcome {
        match self.exchange(Request::Distance) {
            Reply::Answer(Response::Distance(distance)) => {
                self.state.distance = distance;
                self.display.show_distance(distance);
                if distance > 0 && distance < self.config.braking_distance {
                    TaskOutcome::Mode(OperatingMode::Braking)
                } else {
                    TaskOutcome::Mode(OperatingMode::Normal)
                }
            }
            reply => other(reply),
        }
    }

    fn read_distance_braking(&mut self) -> TaskOutcome {
        match self.exchange(Request::Distance) {
            Reply::Answer(Response::Distance(distance)) => {
                self.state.distance = distance;
                self.display.show_distance(distance);
                if distance == 0 && self.state.speed <= self.config.stop_speed {
                    TaskOutcome::Mode(OperatingMode::Stop)
                } else {
                    TaskOutcome::Mode(OperatingMode::Braking)
                }
            }
            reply => other(reply),
        }
    }

    fn acknowledge_fault(&mut self) -> TaskOutcome {
        match self.exchange(Request::FaultAck) {
            Reply::Answer(Response::Ack(Subsystem::Error)) => TaskOutcome::Done,
            reply => other(reply),
        }
    }
}

/// Outcome for any reply a task did not match itself
fn other(reply: Reply) -> TaskOutcome {
    match reply {
        Reply::Fault => TaskOutcome::Mode(OperatingMode::Emergency),
        Reply::Answer(response) => {
            log_warn!(
                "unexpected {} answer",
                response.subsystem().map_or("fault", Subsystem::name)
            );
            TaskOutcome::Unexpected
        }
        Reply::Unrecognized => TaskOutcome::Unexpected,
    }
}

/// Printable payload, or a marker for binary frames such as the sentinel
fn payload_text(frame: &Frame) -> &str {
    match core::str::from_utf8(frame.payload()) {
        Ok(text) if !frame.is_fault() => text,
        _ => "<binary>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::FeatureSet;
    use crate::testing::{answer, RecordingDisplay, ScriptedPeer, Shown};
    use crate::time::Timespec;
    use crate::traits::MockTime;

    type Ctx<'a> = TaskContext<ScriptedPeer<'a>, RecordingDisplay, &'a MockTime>;

    fn context<'a>(time: &'a MockTime, peer: ScriptedPeer<'a>) -> Ctx<'a> {
        TaskContext::new(peer, RecordingDisplay::default(), time, ControllerConfig::default())
    }

    fn with_speed(ctx: &mut Ctx<'_>, speed: f32) {
        ctx.state.speed = speed;
    }

    #[test]
    fn cruise_threshold_boundary() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::healthy(&time));
        for (speed, gas) in [(54.9, true), (55.0, true), (55.1, false)] {
            with_speed(&mut ctx, speed);
            assert_eq!(ctx.run(Task::Gas(Drive::Cruise), true), TaskOutcome::Done);
            assert_eq!(ctx.run(Task::Brake(Drive::Cruise), true), TaskOutcome::Done);
            let sent = ctx.transport.take_requests();
            assert_eq!(
                sent,
                vec![
                    Request::Gas(Switch::from_bool(gas)),
                    Request::Brake(Switch::from_bool(!gas))
                ],
                "speed {}",
                speed
            );
        }
    }

    #[test]
    fn approach_threshold_boundary() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::healthy(&time));
        for (speed, gas) in [(2.4, true), (2.5, true), (2.6, false)] {
            with_speed(&mut ctx, speed);
            ctx.run(Task::Gas(Drive::Approach), true);
            ctx.run(Task::Brake(Drive::Approach), true);
            assert_eq!(
                ctx.transport.take_requests(),
                vec![
                    Request::Gas(Switch::from_bool(gas)),
                    Request::Brake(Switch::from_bool(!gas))
                ],
                "speed {}",
                speed
            );
        }
    }

    #[test]
    fn halt_ignores_speed() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::healthy(&time));
        with_speed(&mut ctx, 0.0);
        ctx.run(Task::Gas(Drive::Halt), false);
        ctx.run(Task::Brake(Drive::Halt), false);
        assert_eq!(
            ctx.transport.take_requests(),
            vec![Request::Gas(Switch::Clear), Request::Brake(Switch::Set)]
        );
        assert_eq!(ctx.display.shown, vec![Shown::Gas(false), Shown::Brake(true)]);
    }

    #[test]
    fn actuator_display_follows_ack() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |request| match request {
            Request::Gas(_) => Frame::from_text("GAS:  NO").unwrap(),
            other => answer(other),
        });
        let mut ctx = context(&time, peer);
        assert_eq!(ctx.run(Task::Gas(Drive::Cruise), true), TaskOutcome::Unexpected);
        assert_eq!(ctx.run(Task::Brake(Drive::Cruise), true), TaskOutcome::Done);
        assert_eq!(ctx.display.shown, vec![Shown::Brake(false)]);
    }

    #[test]
    fn speed_updates_state_and_display() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |request| match request {
            Request::Speed => Frame::from_text("SPD:60.0").unwrap(),
            other => answer(other),
        });
        let mut ctx = context(&time, peer);
        assert_eq!(ctx.run(Task::Speed, true), TaskOutcome::Done);
        assert_eq!(ctx.state.speed, 60.0);
        assert_eq!(ctx.display.shown, vec![Shown::Speed(60.0)]);
    }

    #[test]
    fn negative_speed_replaces_stale_reading() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |request| match request {
            Request::Speed => Frame::from_text("SPD:-1.5").unwrap(),
            other => answer(other),
        });
        let mut ctx = context(&time, peer);
        with_speed(&mut ctx, 60.0);
        assert_eq!(ctx.run(Task::Speed, true), TaskOutcome::Done);
        assert_eq!(ctx.state.speed, -1.5);
        ctx.run(Task::Gas(Drive::Cruise), true);
        assert_eq!(
            ctx.transport.take_requests(),
            vec![Request::Speed, Request::Gas(Switch::Set)]
        );
    }

    #[test]
    fn malformed_speed_keeps_previous_value() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::from_text("SPD:fast").unwrap());
        let mut ctx = context(&time, peer);
        with_speed(&mut ctx, 12.0);
        assert_eq!(ctx.run(Task::Speed, true), TaskOutcome::Unexpected);
        assert_eq!(ctx.state.speed, 12.0);
        assert!(ctx.display.shown.is_empty());
    }

    #[test]
    fn answer_from_wrong_subsystem_is_unexpected() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::from_text("DS:00500").unwrap());
        let mut ctx = context(&time, peer);
        assert_eq!(ctx.run(Task::Speed, true), TaskOutcome::Unexpected);
        assert!(!ctx.latch.is_set());
    }

    #[test]
    fn distance_transition_table() {
        let cases = [
            ("DS:00000", OperatingMode::Normal),
            ("DS:00001", OperatingMode::Braking),
            ("DS:00500", OperatingMode::Braking),
            ("DS:10999", OperatingMode::Braking),
            ("DS:11000", OperatingMode::Normal),
            ("DS:50000", OperatingMode::Normal),
        ];
        for (text, mode) in cases {
            let time = MockTime::new();
            let peer = ScriptedPeer::new(&time, move |_| Frame::from_text(text).unwrap());
            let mut ctx = context(&time, peer);
            assert_eq!(ctx.run(Task::Distance, true), TaskOutcome::Mode(mode), "{}", text);
        }
    }

    #[test]
    fn braking_distance_stops_only_when_slow() {
        let cases = [
            ("DS:00000", 10.0, OperatingMode::Stop),
            ("DS:00000", 0.0, OperatingMode::Stop),
            ("DS:00000", 10.5, OperatingMode::Braking),
            ("DS:00010", 0.0, OperatingMode::Braking),
        ];
        for (text, speed, mode) in cases {
            let time = MockTime::new();
            let peer = ScriptedPeer::new(&time, move |_| Frame::from_text(text).unwrap());
            let mut ctx = context(&time, peer);
            with_speed(&mut ctx, speed);
            assert_eq!(
                ctx.run(Task::DistanceBraking, true),
                TaskOutcome::Mode(mode),
                "{} at {}",
                text,
                speed
            );
        }
    }

    #[test]
    fn malformed_distance_does_not_transition() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::from_text("DS:  ???").unwrap());
        let mut ctx = context(&time, peer);
        assert_eq!(ctx.run(Task::Distance, true), TaskOutcome::Unexpected);
        assert_eq!(ctx.run(Task::DistanceBraking, true), TaskOutcome::Unexpected);
    }

    #[test]
    fn movement_fails_open() {
        let cases = [
            ("STP:  GO", OperatingMode::Normal),
            ("STP:STOP", OperatingMode::Stop),
            ("STP:WAIT", OperatingMode::Normal),
            ("STP:go  ", OperatingMode::Normal),
        ];
        for (text, mode) in cases {
            let time = MockTime::new();
            let peer = ScriptedPeer::new(&time, move |_| Frame::from_text(text).unwrap());
            let mut ctx = context(&time, peer);
            assert_eq!(ctx.run(Task::Movement, true), TaskOutcome::Mode(mode), "{}", text);
        }
    }

    #[test]
    fn mixer_waits_for_interval() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::healthy(&time));

        time.advance(Timespec::from_secs(30));
        assert_eq!(ctx.run(Task::Mixer, true), TaskOutcome::Done);
        assert!(ctx.transport.take_requests().is_empty());

        time.advance(Timespec::new(0, 1));
        assert_eq!(ctx.run(Task::Mixer, true), TaskOutcome::Done);
        assert_eq!(ctx.transport.take_requests(), vec![Request::Mixer(Switch::Set)]);
        assert!(ctx.state.mixer_on);
        assert_eq!(ctx.state.mixer_changed_at, Timespec::new(30, 1));

        time.advance(Timespec::from_secs(31));
        ctx.run(Task::Mixer, true);
        assert_eq!(ctx.transport.take_requests(), vec![Request::Mixer(Switch::Clear)]);
        assert_eq!(ctx.display.shown, vec![Shown::Mixer(true), Shown::Mixer(false)]);
    }

    #[test]
    fn mixer_keeps_state_without_ack() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::from_text("MIX: BAD").unwrap());
        let mut ctx = context(&time, peer);
        time.advance(Timespec::from_secs(40));
        assert_eq!(ctx.run(Task::Mixer, true), TaskOutcome::Unexpected);
        assert!(!ctx.state.mixer_on);
        assert_eq!(ctx.state.mixer_changed_at, Timespec::ZERO);
    }

    #[test]
    fn lamps_follow_darkness() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |request| match request {
            Request::Light => Frame::from_text("LIT:  49").unwrap(),
            other => answer(other),
        });
        let mut ctx = context(&time, peer);
        ctx.run(Task::LightSensor, true);
        assert!(ctx.state.dark);
        ctx.run(Task::Lamps, true);
        assert_eq!(
            ctx.transport.take_requests(),
            vec![Request::Light, Request::Lamps(Switch::Set)]
        );
        assert_eq!(ctx.display.shown, vec![Shown::Light(true), Shown::Lamps(true)]);
    }

    #[test]
    fn sentinel_trips_latch() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::FAULT);
        let mut ctx = context(&time, peer);
        assert_eq!(
            ctx.run(Task::Slope, true),
            TaskOutcome::Mode(OperatingMode::Emergency)
        );
        assert!(ctx.latch.is_set());
        assert_eq!(ctx.latch.trip_count(), 1);
    }

    #[test]
    fn emergency_forms_count_repeated_faults() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::FAULT);
        let mut ctx = context(&time, peer);
        ctx.run(Task::Slope, true);
        assert_eq!(ctx.run(Task::FaultAck, false), TaskOutcome::Mode(OperatingMode::Emergency));
        assert_eq!(ctx.run(Task::LampsOn, false), TaskOutcome::Mode(OperatingMode::Emergency));
        assert!(ctx.latch.is_set());
        assert_eq!(ctx.latch.trip_count(), 3);
        assert_eq!(ctx.transport.exchanges(), 3);
    }

    #[test]
    fn latch_stops_all_latched_io() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::healthy(&time));
        ctx.latch.trip();
        time.advance(Timespec::from_secs(60));
        let tasks = [
            Task::Speed,
            Task::Slope,
            Task::Gas(Drive::Cruise),
            Task::Brake(Drive::Approach),
            Task::Mixer,
            Task::LightSensor,
            Task::Lamps,
            Task::LampsOn,
            Task::Movement,
            Task::Distance,
            Task::DistanceBraking,
            Task::FaultAck,
        ];
        for task in tasks {
            assert_eq!(
                ctx.run(task, true),
                TaskOutcome::Mode(OperatingMode::Emergency),
                "{}",
                task.name()
            );
        }
        assert_eq!(ctx.transport.exchanges(), 0);
        assert!(ctx.display.shown.is_empty());
    }

    #[test]
    fn unlatched_tasks_keep_talking() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::healthy(&time));
        ctx.latch.trip();
        assert_eq!(ctx.run(Task::FaultAck, false), TaskOutcome::Done);
        assert_eq!(ctx.run(Task::LampsOn, false), TaskOutcome::Done);
        assert_eq!(
            ctx.transport.take_requests(),
            vec![Request::FaultAck, Request::Lamps(Switch::Set)]
        );
    }

    #[test]
    fn link_error_counts_as_fault() {
        let time = MockTime::new();
        let mut ctx = context(&time, ScriptedPeer::broken(&time));
        assert_eq!(
            ctx.run(Task::Speed, true),
            TaskOutcome::Mode(OperatingMode::Emergency)
        );
        assert!(ctx.latch.is_set());
    }

    #[test]
    fn sentinel_is_unrecognized_without_emergency() {
        let time = MockTime::new();
        let peer = ScriptedPeer::new(&time, |_| Frame::FAULT);
        let config = ControllerConfig::for_features(FeatureSet::APPROACH);
        let mut ctx = TaskContext::new(peer, RecordingDisplay::default(), &time, config);
        assert_eq!(ctx.run(Task::Speed, true), TaskOutcome::Unexpected);
        assert_eq!(
            ctx.run(Task::Movement, true),
            TaskOutcome::Mode(OperatingMode::Normal)
        );
        assert!(!ctx.latch.is_set());
    }
}
