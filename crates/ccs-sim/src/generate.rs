//! Workload construction: arrival streams and agent in/out schedules.
//!
//! These are input constructors feeding the kernel; they own no simulation
//! logic.  Arrival generation is Poisson-style thinning per interval:
//! exponential inter-arrival gaps at each interval's target rate, repeated
//! for a number of attempts, keeping the attempt whose total count lands
//! closest to the requested volume.

use ccs_core::SimTime;
use ccs_queue::{Event, EventTime, TimedQueue};

use crate::{Log, SimError, SimResult, Simulation};

/// Resolver for queues that only ever hold fixed-instant events.
fn fixed_time(event: &Event) -> SimTime {
    match event.time {
        EventTime::At(t) => t,
        EventTime::LineEnd => SimTime::INFINITY,
    }
}

// ── Coverage quick-sim parameters ─────────────────────────────────────────────

/// Parameters for [`Simulation::coverage_test`].
///
/// Models a shift of `agents` agents over `intervals` intervals: everyone in
/// at the start, everyone out at the end, and in each interior interval a
/// churn of `ceil(fixed_rel_amp·agents)` agents out and back in —
/// `cycle_rel_amp` adds extra churn on every `cycle_length`-th interval.
#[derive(Debug, Clone, Copy)]
pub struct CoverageTest {
    pub agents:          u32,
    pub intervals:       u32,
    pub interval_length: f64,
    /// Agents leave this long before the end of their last interval.
    pub wrapup:          f64,
    pub fixed_rel_amp:   f64,
    pub cycle_rel_amp:   f64,
    /// Cycle period in intervals; must be ≥ 1.
    pub cycle_length:    u32,
}

impl CoverageTest {
    pub fn new(agents: u32, intervals: u32) -> Self {
        Self {
            agents,
            intervals,
            interval_length: 60.0,
            wrapup: 0.0,
            fixed_rel_amp: 0.1,
            cycle_rel_amp: 0.0,
            cycle_length: 1,
        }
    }
}

impl Simulation {
    // ── Arrivals ──────────────────────────────────────────────────────────

    /// Generate arrivals for one contact type.
    ///
    /// `volumes[idx]` is the target count for interval `idx` of length
    /// `interval`.  Each of `attempts` trials draws exponential gaps at rate
    /// `volumes[idx] / interval` within `[interval·idx, interval·(idx+1))`;
    /// the trial whose total count is closest to `Σ volumes` wins (first on
    /// ties) and is admitted through [`Simulation::push_arrival`].  Returns
    /// the number of contacts admitted.
    pub fn add_arrivals(
        &mut self,
        volumes:      &[u32],
        contact_type: &str,
        interval:     f64,
        attempts:     u32,
    ) -> SimResult<usize> {
        if !self.contact_types.contains_key(contact_type) {
            return Err(SimError::UnknownContactType(contact_type.to_owned()));
        }

        let target: i64 = volumes.iter().map(|&v| v as i64).sum();
        let mut best: Option<Vec<f64>> = None;
        for _ in 0..attempts {
            let mut arrivals = Vec::new();
            for (idx, &volume) in volumes.iter().enumerate() {
                if volume == 0 {
                    continue;
                }
                let end = interval * (idx as f64 + 1.0);
                let mean_gap = interval / volume as f64;
                let mut t = interval * idx as f64;
                loop {
                    t += self.rng.sample_exp(mean_gap);
                    if t < end {
                        arrivals.push(t);
                    } else {
                        break;
                    }
                }
            }
            let better = match &best {
                Some(b) => {
                    (arrivals.len() as i64 - target).abs() < (b.len() as i64 - target).abs()
                }
                None => true,
            };
            if better {
                best = Some(arrivals);
            }
        }

        let mut times = best.unwrap_or_default();
        times.sort_by(f64::total_cmp);
        let admitted = times.len();
        for t in times {
            self.push_arrival(SimTime(t), contact_type)?;
        }
        self.arrival_queue.sort_by_time(fixed_time);
        Ok(admitted)
    }

    // ── Agent-IO schedules ────────────────────────────────────────────────

    /// Build an agent-IO schedule from explicit per-interval `(in, out)`
    /// counts.  Interval `idx` schedules its outs at
    /// `interval·idx − wrapup` and its ins at `interval·idx`.
    /// With `set`, the schedule also becomes this simulation's agent-IO
    /// queue; the built queue is returned either way.
    pub fn generate_basic_io(
        &mut self,
        ios:      &[(u32, u32)],
        interval: f64,
        wrapup:   f64,
        set:      bool,
    ) -> TimedQueue {
        let mut queue = TimedQueue::new();
        for (idx, &(ins, outs)) in ios.iter().enumerate() {
            let t_out = SimTime(interval * idx as f64 - wrapup);
            let t_in = SimTime(interval * idx as f64);
            for _ in 0..outs {
                queue.push(Event::agent_out(None, t_out));
            }
            for _ in 0..ins {
                queue.push(Event::agent_in(None, t_in));
            }
        }
        if set {
            self.agent_io_queue = queue.clone();
        }
        queue
    }

    /// Build an agent-IO schedule from a coverage curve: the difference
    /// between consecutive coverage values becomes that many ins (positive)
    /// or outs (negative, scheduled `wrapup` early).  Coverage starts from
    /// zero agents in service.
    pub fn generate_io_from_coverage(
        &mut self,
        coverage: &[u32],
        interval: f64,
        wrapup:   f64,
        set:      bool,
    ) -> TimedQueue {
        let mut queue = TimedQueue::new();
        let mut prev: i64 = 0;
        for (idx, &cov) in coverage.iter().enumerate() {
            let diff = cov as i64 - prev;
            let t_out = SimTime(interval * idx as f64 - wrapup);
            let t_in = SimTime(interval * idx as f64);
            for _ in 0..(-diff).max(0) {
                queue.push(Event::agent_out(None, t_out));
            }
            for _ in 0..diff.max(0) {
                queue.push(Event::agent_in(None, t_in));
            }
            prev = cov as i64;
        }
        if set {
            self.agent_io_queue = queue.clone();
        }
        queue
    }

    // ── Quick sim ─────────────────────────────────────────────────────────

    /// Reset queued work, build a churning shift schedule, add per-type
    /// arrivals, and run the simulation.  `volumes` gives each contact
    /// type's target count per interval.  The workforce must already be
    /// hired ([`Simulation::add_agents`]).
    pub fn coverage_test(
        &mut self,
        params:  &CoverageTest,
        volumes: &[(&str, u32)],
    ) -> SimResult<Log> {
        let agents = params.agents as f64;
        let cycle = params.cycle_length.max(1);
        let outs: Vec<u32> = (0..params.intervals.saturating_sub(2))
            .map(|i| {
                let cyclic = if i % cycle == 0 { 1.0 } else { 0.0 };
                (params.fixed_rel_amp * agents + params.cycle_rel_amp * agents * cyclic).ceil()
                    as u32
            })
            .collect();

        let mut ios = vec![(params.agents, 0)];
        ios.extend(outs.iter().map(|&o| (o, o)));
        ios.push((0, params.agents));

        self.reset_simulation();
        self.generate_basic_io(&ios, params.interval_length, params.wrapup, true);
        for &(contact_type, volume) in volumes {
            let per_interval = vec![volume; params.intervals as usize];
            self.add_arrivals(&per_interval, contact_type, params.interval_length, 4)?;
        }
        self.simulate()
    }
}
