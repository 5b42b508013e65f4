#![cfg(not(target_arch = "wasm32"))]

use std::time::{Duration, Instant};

use sandworks_engine::channel::actor;
use sandworks_engine::{SimCommand, SimConfig, SimEvent, WorldCore};

fn next_event(handle: &actor::SimulationHandle) -> SimEvent {
    handle
        .recv_timeout(Duration::from_secs(5))
        .expect("actor should answer within 5s")
}

#[test]
fn init_paint_tick_shutdown() {
    let config = SimConfig {
        initial_rows: 8,
        initial_cols: 8,
        explosion_chance: 0.0,
        ..SimConfig::default()
    };
    let handle = actor::spawn(WorldCore::new(config).unwrap()).unwrap();

    assert!(handle.send(SimCommand::SetTickRate { rate: 200.0 }));
    assert_eq!(next_event(&handle), SimEvent::Ack { command: "setTickRate" });

    assert!(handle.send(SimCommand::Initialize { rows: 10, cols: 4 }));
    assert_eq!(next_event(&handle), SimEvent::Ack { command: "initialize" });

    assert!(handle.send(SimCommand::Paint { x: 1, y: 0, kind: "sand".into() }));

    // The paint is acked before any tick that could carry it.
    let mut acked = false;
    let mut ticks_with_sand = 0;
    let deadline = Instant::now() + Duration::from_secs(5);
    while ticks_with_sand < 3 && Instant::now() < deadline {
        match next_event(&handle) {
            SimEvent::Ack { command: "paint" } => acked = true,
            SimEvent::Tick { snapshot, stats } => {
                assert_eq!((snapshot.rows, snapshot.cols), (10, 4));
                assert!(stats.frame > 0);
                if snapshot.non_empty_count() == 1 {
                    assert!(acked);
                    ticks_with_sand += 1;
                }
            }
            SimEvent::RateUpdate { .. } => {}
            other => panic!("unexpected event {:?}", other),
        }
    }
    assert_eq!(ticks_with_sand, 3);

    assert!(handle.send(SimCommand::Paint { x: 0, y: 0, kind: "lava".into() }));
    loop {
        match next_event(&handle) {
            SimEvent::Rejected { code, .. } => {
                assert_eq!(code, "unknown_material");
                break;
            }
            SimEvent::Tick { .. } | SimEvent::RateUpdate { .. } => {}
            other => panic!("unexpected event {:?}", other),
        }
    }

    handle.shutdown();
}

#[test]
fn idle_actor_answers_snapshots() {
    let config = SimConfig {
        initial_rows: 3,
        initial_cols: 5,
        ..SimConfig::default()
    };
    let handle = actor::spawn(WorldCore::new(config).unwrap()).unwrap();
    assert!(handle.send(SimCommand::RequestSnapshot));
    match next_event(&handle) {
        SimEvent::GridSnapshot(snapshot) => {
            assert_eq!((snapshot.rows, snapshot.cols), (3, 5));
            assert_eq!(snapshot.non_empty_count(), 0);
        }
        other => panic!("expected a snapshot, got {:?}", other),
    }
    // Not initialized, so nothing ticks.
    assert_eq!(handle.recv_timeout(Duration::from_millis(100)), None);
    drop(handle);
}

#[test]
fn absurd_tick_rates_leave_the_actor_alive() {
    let config = SimConfig {
        initial_rows: 4,
        initial_cols: 4,
        explosion_chance: 0.0,
        ..SimConfig::default()
    };
    let handle = actor::spawn(WorldCore::new(config).unwrap()).unwrap();
    assert!(handle.send(SimCommand::Initialize { rows: 4, cols: 4 }));
    assert_eq!(next_event(&handle), SimEvent::Ack { command: "initialize" });

    // Rejected before it can arm a deadline no clock can reach.
    assert!(handle.send(SimCommand::SetTickRate { rate: 1e-20 }));
    loop {
        match next_event(&handle) {
            SimEvent::Rejected { code, .. } => {
                assert_eq!(code, "invalid_rate");
                break;
            }
            SimEvent::Tick { .. } | SimEvent::RateUpdate { .. } => {}
            other => panic!("unexpected event {:?}", other),
        }
    }

    // The slowest accepted rate parks the actor for a minute between ticks.
    assert!(handle.send(SimCommand::SetTickRate { rate: 1.0 / 60.0 }));
    loop {
        match next_event(&handle) {
            SimEvent::Ack { command: "setTickRate" } => break,
            SimEvent::Tick { .. } | SimEvent::RateUpdate { .. } => {}
            other => panic!("unexpected event {:?}", other),
        }
    }

    assert!(handle.send(SimCommand::RequestSnapshot));
    loop {
        match next_event(&handle) {
            SimEvent::GridSnapshot(snapshot) => {
                assert_eq!((snapshot.rows, snapshot.cols), (4, 4));
                break;
            }
            SimEvent::Tick { .. } | SimEvent::RateUpdate { .. } => {}
            other => panic!("unexpected event {:?}", other),
        }
    }
    handle.shutdown();
}

#[test]
fn shutdown_command_stops_the_thread() {
    let handle = actor::spawn(WorldCore::new(SimConfig::default()).unwrap()).unwrap();
    assert!(handle.send(SimCommand::Shutdown));
    assert_eq!(next_event(&handle), SimEvent::Ack { command: "shutdown" });
    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.send(SimCommand::RequestSnapshot) {
        assert!(Instant::now() < deadline, "actor still accepting commands");
        std::thread::sleep(Duration::from_millis(10));
    }
}
