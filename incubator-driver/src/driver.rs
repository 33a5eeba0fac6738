//! Tick task and its handle

use std::path::PathBuf;

use incubator_core::{
    Channel, ExportOutcome, ReadingGenerator, SimulationConfig, SimulationSession,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::command::ControlCommand;
use crate::{DriverError, DriverResult, FrameSink};

/// Capacity of the command queue
pub const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Owns a session and runs it on the configured interval
pub struct TickDriver<R, S> {
    session: SimulationSession<R>,
    commands: mpsc::Receiver<ControlCommand>,
    sink: S,
}

impl<R, S> TickDriver<R, S>
where
    R: Rng + Send,
    S: FrameSink,
{
    /// Driver over `session`, fed by `commands`
    pub fn new(session: SimulationSession<R>, commands: mpsc::Receiver<ControlCommand>, sink: S) -> Self {
        Self {
            session,
            commands,
            sink,
        }
    }

    /// Serve commands and ticks until every command sender is dropped,
    /// then hand the session back
    pub async fn run(mut self) -> SimulationSession<R> {
        let mut next_tick = Instant::now();

        loop {
            let running = self.session.is_running();

            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    let was_running = self.session.is_running();
                    self.handle(command);
                    if !was_running && self.session.is_running() {
                        next_tick = Instant::now();
                    }
                }

                _ = sleep_until(next_tick), if running => {
                    if let Some(frame) = self.session.tick() {
                        self.sink.publish(frame);
                    }
                    next_tick = Instant::now() + self.session.config().interval();
                }
            }
        }

        info!("Driver exiting after {} readings", self.session.history().len());
        self.session
    }

    fn handle(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Start => self.session.start(),
            ControlCommand::Stop => self.session.stop(),
            ControlCommand::ToggleAlarmPause => self.session.toggle_alarm_pause(),
            ControlCommand::ClearLog => self.session.clear_log(),
            ControlCommand::SetThreshold { channel, min, max, reply } => {
                let result = self.session.set_threshold(channel, min, max);
                if reply.send(result).is_err() {
                    debug!("Threshold requester went away");
                }
            }
            ControlCommand::UpdateConfig { config, reply } => {
                let result = self.session.update_config(config);
                if reply.send(result).is_err() {
                    debug!("Configuration requester went away");
                }
            }
            ControlCommand::Export { dir, reply } => {
                let result = self.session.export_to_dir(&dir);
                if reply.send(result).is_err() {
                    debug!("Export requester went away");
                }
            }
        }
    }
}

/// Spawn a tick task on the current tokio runtime
pub fn spawn<R, S>(session: SimulationSession<R>, sink: S) -> DriverHandle<R>
where
    R: Rng + Send + 'static,
    S: FrameSink + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    let task = tokio::spawn(TickDriver::new(session, rx, sink).run());
    DriverHandle { commands: tx, task }
}

/// Spawn a tick task over a fresh session with a seeded generator
pub fn spawn_seeded<S>(config: SimulationConfig, seed: u64, sink: S) -> DriverResult<DriverHandle<StdRng>>
where
    S: FrameSink + 'static,
{
    let session = SimulationSession::with_generator(config, ReadingGenerator::seeded(seed))?;
    Ok(spawn(session, sink))
}

/// Control handle for a running tick task
///
/// Dropping the handle, or calling [`shutdown`](Self::shutdown), ends the
/// task.
pub struct DriverHandle<R = StdRng> {
    commands: mpsc::Sender<ControlCommand>,
    task: JoinHandle<SimulationSession<R>>,
}

impl<R> DriverHandle<R> {
    /// Enter `Running`
    pub async fn start(&self) -> DriverResult<()> {
        self.send(ControlCommand::Start).await
    }

    /// Enter `Stopped`
    pub async fn stop(&self) -> DriverResult<()> {
        self.send(ControlCommand::Stop).await
    }

    /// Flip the alarm pause flag
    pub async fn toggle_alarm_pause(&self) -> DriverResult<()> {
        self.send(ControlCommand::ToggleAlarmPause).await
    }

    /// Empty the export log
    pub async fn clear_log(&self) -> DriverResult<()> {
        self.send(ControlCommand::ClearLog).await
    }

    /// Replace one threshold, failing if the pair is invalid
    pub async fn set_threshold(&self, channel: Channel, min: f64, max: f64) -> DriverResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(ControlCommand::SetThreshold { channel, min, max, reply })
            .await?;
        rx.await.map_err(|_| DriverError::Closed)??;
        Ok(())
    }

    /// Replace the whole configuration, failing if it is invalid
    pub async fn update_config(&self, config: SimulationConfig) -> DriverResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(ControlCommand::UpdateConfig { config, reply }).await?;
        rx.await.map_err(|_| DriverError::Closed)??;
        Ok(())
    }

    /// Export the log into `dir`
    pub async fn export(&self, dir: impl Into<PathBuf>) -> DriverResult<ExportOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(ControlCommand::Export { dir: dir.into(), reply })
            .await?;
        Ok(rx.await.map_err(|_| DriverError::Closed)??)
    }

    /// Send a raw command
    pub async fn send(&self, command: ControlCommand) -> DriverResult<()> {
        self.commands.send(command).await.map_err(|_| DriverError::Closed)
    }

    /// Close the command queue and wait for the session
    pub async fn shutdown(self) -> DriverResult<SimulationSession<R>> {
        let Self { commands, task } = self;
        drop(commands);
        Ok(task.await?)
    }
}
