//! Native simulation actor.
//!
//! The world moves onto its own thread. Commands arrive FIFO over one `mpsc`
//! channel and events leave over another; between commands the thread
//! sleeps in `recv_timeout` until the scheduler's next deadline.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::simulation::{now_ms, WorldCore};

use super::protocol::{self, SimCommand, SimEvent};

/// Presentation side of a running actor. Dropping it shuts the actor down.
pub struct SimulationHandle {
    commands: Sender<SimCommand>,
    events: Receiver<SimEvent>,
    thread: Option<JoinHandle<()>>,
}

/// Start the actor thread. The scheduler state of `world` is kept, so a world
/// that is already running starts ticking right away.
pub fn spawn(world: WorldCore) -> io::Result<SimulationHandle> {
    let (command_tx, command_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("simulation".to_string())
        .spawn(move || run(world, command_rx, event_tx))?;
    Ok(SimulationHandle {
        commands: command_tx,
        events: event_rx,
        thread: Some(thread),
    })
}

impl SimulationHandle {
    /// Queue a command. `false` once the actor has stopped.
    pub fn send(&self, command: SimCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn events(&self) -> &Receiver<SimEvent> {
        &self.events
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<SimEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<SimEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the actor and wait for its thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.commands.send(SimCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("simulation thread panicked");
            }
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(mut world: WorldCore, commands: Receiver<SimCommand>, events: Sender<SimEvent>) {
    debug!("simulation actor started");
    loop {
        let command = match world.next_deadline() {
            None => match commands.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            },
            Some(deadline) => match wait_for(deadline - now_ms()) {
                Some(wait) => match commands.recv_timeout(wait) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                },
                // unrepresentable wait: block until the next command
                None => match commands.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                },
            },
        };

        if let Some(command) = command {
            let shutdown = command == SimCommand::Shutdown;
            if !send_all(&events, protocol::handle(&mut world, command, now_ms())) || shutdown {
                break;
            }
        }

        if !send_all(&events, protocol::pump(&mut world, now_ms())) {
            break;
        }
    }
    debug!("simulation actor stopped after {} ticks", world.frame());
}

/// Time left until a deadline `remaining_ms` away. `None` when the wait does
/// not fit in a `Duration`.
fn wait_for(remaining_ms: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(remaining_ms.max(0.0) / 1000.0).ok()
}

/// `false` when the presentation side hung up.
fn send_all(events: &Sender<SimEvent>, batch: Vec<SimEvent>) -> bool {
    batch.into_iter().all(|event| events.send(event).is_ok())
}
