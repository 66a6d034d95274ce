//! ---
//! pt_section: "11-simulation"
//! pt_subsection: "03-line"
//! pt_type: "source"
//! pt_scope: "code"
//! pt_description: "Producer, consumer, and downstream workers of the assembly line."
//! pt_version: "v0.1.0"
//! pt_owner: "tbd"
//! ---
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use powertrain_common::config::SimulationConfig;
use powertrain_common::time::{duration_to_micros, monotonic_now, scale_delay};
use powertrain_logging::{log_system_event, pt_debug, pt_warn, LogContext, SystemEventOutcome};
use powertrain_report::{
    ChassisConsumerType, EventReporter, HistorySnapshot, PerConsumer, PerPowertrain,
    PowertrainAddedEvent, PowertrainRemovedEvent, PowertrainType, CONSUMER_TYPE_COUNT,
    POWERED_CHASSIS_CONSUMER_NAME, POWERTRAIN_TYPE_COUNT,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::queues::{ChassisQueue, PowertrainQueue};

/// Totals gathered once every worker has stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub produced: PerPowertrain<u64>,
    /// Indexed `[consumer][type]`.
    pub consumed: PerConsumer<PerPowertrain<u64>>,
    pub chassis_consumed: u64,
    pub elapsed: Duration,
}

impl SimulationSummary {
    pub fn history(&self) -> HistorySnapshot {
        HistorySnapshot {
            produced: self.produced,
            consumed: self.consumed,
        }
    }
}

/// One producer thread per powertrain type, one consumer per chassis
/// consumer type, and the downstream powered chassis consumer.
pub struct AssemblyLine {
    config: SimulationConfig,
    reporter: Arc<dyn EventReporter>,
}

/// Sleeps for the configured delay, optionally jittered by 50%..150%.
struct Pacer {
    base: Duration,
    rng: Option<StdRng>,
}

impl Pacer {
    fn new(base: Duration, jitter: bool, seed: u64) -> Self {
        Self {
            base,
            rng: jitter.then(|| StdRng::seed_from_u64(seed)),
        }
    }

    fn pause(&mut self) {
        let delay = match &mut self.rng {
            Some(rng) => scale_delay(self.base, rng.gen_range(0.5..1.5)),
            None => self.base,
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

impl AssemblyLine {
    pub fn new(config: SimulationConfig, reporter: Arc<dyn EventReporter>) -> Self {
        Self { config, reporter }
    }

    /// Run the line to completion and write the history report.
    pub fn run(&self) -> Result<SimulationSummary> {
        self.config.validate()?;
        let started = monotonic_now();
        let powertrains =
            PowertrainQueue::new(self.config.powertrain_queue_capacity, POWERTRAIN_TYPE_COUNT);
        let chassis = ChassisQueue::new(self.config.chassis_queue_capacity, CONSUMER_TYPE_COUNT);
        let chassis_limit = self.config.chassis_to_consume.unwrap_or(
            self.config
                .units_per_producer
                .saturating_mul(POWERTRAIN_TYPE_COUNT as u64),
        );
        let line_ctx = LogContext::new().with_station("line");
        log_system_event(
            Some(&line_ctx),
            "line.start",
            &format!(
                "starting line: {} units per producer, chassis limit {}",
                self.config.units_per_producer, chassis_limit
            ),
            SystemEventOutcome::Success,
        );

        let workers = thread::scope(|scope| -> Result<_> {
            // Workers already spawned must not stay blocked if a later spawn fails.
            let halt = |err: std::io::Error| {
                powertrains.abort();
                chassis.close();
                err
            };
            let mut producers = Vec::new();
            for kind in PowertrainType::all() {
                let powertrains = &powertrains;
                let chassis = &chassis;
                let handle = thread::Builder::new()
                    .name(format!("producer-{}", kind.short_name()))
                    .spawn_scoped(scope, move || {
                        let outcome = self.produce(kind, powertrains);
                        powertrains.producer_finished();
                        if outcome.is_err() {
                            powertrains.abort();
                            chassis.close();
                        }
                        outcome
                    })
                    .map_err(halt)
                    .context("failed to spawn producer thread")?;
                producers.push(handle);
            }

            let mut consumers = Vec::new();
            for consumer in ChassisConsumerType::all() {
                let powertrains = &powertrains;
                let chassis = &chassis;
                let handle = thread::Builder::new()
                    .name(format!("consumer-{}", consumer.display_name()))
                    .spawn_scoped(scope, move || {
                        let outcome = self.consume(consumer, powertrains, chassis);
                        chassis.producer_finished();
                        if outcome.is_err() {
                            powertrains.abort();
                            chassis.close();
                        }
                        outcome
                    })
                    .map_err(halt)
                    .context("failed to spawn consumer thread")?;
                consumers.push((consumer, handle));
            }

            let downstream = {
                let powertrains = &powertrains;
                let chassis = &chassis;
                thread::Builder::new()
                    .name(POWERED_CHASSIS_CONSUMER_NAME.to_owned())
                    .spawn_scoped(scope, move || {
                        let outcome = self.drain_chassis(chassis, chassis_limit);
                        chassis.close();
                        if outcome.is_err() {
                            powertrains.abort();
                        }
                        outcome
                    })
                    .map_err(halt)
                    .context("failed to spawn downstream thread")?
            };

            let mut first_error = None;
            for handle in producers {
                if let Err(err) = join(handle) {
                    first_error.get_or_insert(err);
                }
            }
            let mut consumed = PerConsumer::<PerPowertrain<u64>>::default();
            for (consumer, handle) in consumers {
                match join(handle) {
                    Ok(totals) => consumed[consumer] = totals,
                    Err(err) => {
                        first_error.get_or_insert(err);
                    }
                }
            }
            let chassis_consumed = match join(downstream) {
                Ok(count) => count,
                Err(err) => {
                    first_error.get_or_insert(err);
                    0
                }
            };
            match first_error {
                Some(err) => Err(err),
                None => Ok((consumed, chassis_consumed)),
            }
        });

        let outcome = workers.and_then(|(consumed, chassis_consumed)| {
            let summary = SimulationSummary {
                produced: powertrains.snapshot().produced,
                consumed,
                chassis_consumed,
                elapsed: started.elapsed(),
            };
            self.reporter
                .report_history(&summary.history())
                .context("failed to write history report")?;
            Ok(summary)
        });
        match &outcome {
            Ok(summary) => log_system_event(
                Some(&line_ctx),
                "line.stop",
                &format!(
                    "line finished after {} us",
                    duration_to_micros(summary.elapsed)
                ),
                SystemEventOutcome::Success,
            ),
            Err(err) => log_system_event(
                Some(&line_ctx),
                "line.stop",
                &format!("line aborted: {err:#}"),
                SystemEventOutcome::Fault,
            ),
        }
        outcome
    }

    fn produce(&self, kind: PowertrainType, queue: &PowertrainQueue) -> Result<()> {
        let mut pacer = Pacer::new(
            self.config.production_delay,
            self.config.jitter,
            self.config.random_seed ^ kind as u64,
        );
        for seq in 1..=self.config.units_per_producer {
            pacer.pause();
            let pushed = queue.push(kind, |snapshot| {
                self.reporter.report_powertrain_added(&PowertrainAddedEvent {
                    produced_type: kind,
                    produced_totals: snapshot.produced,
                    queue_snapshot: snapshot.waiting,
                })?;
                Ok(())
            })?;
            if !pushed {
                pt_warn!(
                    context = LogContext::new()
                        .with_station("producer")
                        .with_worker(kind.short_name())
                        .with_sequence(seq),
                    "line aborted, producer stopping"
                );
                break;
            }
        }
        pt_debug!(
            context = LogContext::new()
                .with_station("producer")
                .with_worker(kind.short_name()),
            "producer finished"
        );
        Ok(())
    }

    fn consume(
        &self,
        consumer: ChassisConsumerType,
        powertrains: &PowertrainQueue,
        chassis: &ChassisQueue,
    ) -> Result<PerPowertrain<u64>> {
        let mut pacer = Pacer::new(
            self.config.consumption_delay,
            self.config.jitter,
            self.config.random_seed.rotate_left(17) ^ consumer as u64,
        );
        let mut totals = PerPowertrain::<u64>::default();
        let mut mounted = 0u64;
        loop {
            let taken = powertrains.pop(|kind, snapshot| {
                let mut next = totals;
                next[kind] += 1;
                self.reporter
                    .report_powertrain_removed(&PowertrainRemovedEvent {
                        consumer,
                        consumed_type: kind,
                        consumed_totals: next,
                        queue_snapshot: snapshot.waiting,
                    })?;
                Ok(())
            })?;
            let Some(kind) = taken else {
                break;
            };
            totals[kind] += 1;
            pacer.pause();

            mounted += 1;
            let label = format!("{}-{}-{}", consumer.display_name(), kind.short_name(), mounted);
            let accepted = chassis.push(label, |label, size| {
                self.reporter.report_powered_chassis_added(label, size)?;
                Ok(())
            })?;
            if !accepted {
                pt_debug!(
                    context = LogContext::new()
                        .with_station("consumer")
                        .with_worker(consumer.display_name())
                        .with_sequence(mounted),
                    "downstream closed, chassis discarded"
                );
            }
        }
        Ok(totals)
    }

    fn drain_chassis(&self, chassis: &ChassisQueue, limit: u64) -> Result<u64> {
        let mut consumed = 0;
        while consumed < limit {
            let taken = chassis.pop(|label, size, total| {
                self.reporter
                    .report_powered_chassis_removed(label, size, total)?;
                Ok(())
            })?;
            if taken.is_none() {
                break;
            }
            consumed += 1;
        }
        Ok(consumed)
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    let name = handle.thread().name().unwrap_or("worker").to_owned();
    handle
        .join()
        .map_err(|_| anyhow!("{} thread panicked", name))?
}
