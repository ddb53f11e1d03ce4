// Test de integracion de trafficlight
//
// Ejecutar con: cargo test -p trafficlight -- --nocapture

use trafficlight::*;
use lightsync::IdGenerator;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn fast() -> LightConfig {
    LightConfig { min_cycle_ms: 30, max_cycle_ms: 50, ..Default::default() }
}

/// Crea un deadline para timeouts logicos
fn deadline(ms: u64) -> Instant {
    Instant::now() + Duration::from_millis(ms)
}

#[test]
fn test_default_light_turns_green_within_max_cycle() {
    let a = TrafficLight::new(LightConfig::default()).unwrap();
    let b = TrafficLight::new(LightConfig::default()).unwrap();
    assert_eq!(a.current_phase(), TrafficLightPhase::Red);
    assert!(b.id() > a.id(), "ids deben crecer: {} -> {}", a.id(), b.id());

    a.simulate().unwrap();
    let dl = deadline(6_010);
    let mut saw_green = false;
    while Instant::now() < dl {
        if a.current_phase() == TrafficLightPhase::Green {
            saw_green = true;
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
    assert!(saw_green, "el semaforo no paso a verde en 6.01s");
    // b nunca arranco
    assert_eq!(b.current_phase(), TrafficLightPhase::Red);

    let start = Instant::now();
    drop(a);
    assert!(start.elapsed() < Duration::from_secs(1), "drop tardo {:?}", start.elapsed());
    println!("✓ verde observado y semaforo unido al destruirse");
}

#[test]
fn test_injected_ids_start_where_requested() {
    let ids = IdGenerator::starting_at(0);
    let a = TrafficLight::with_ids(fast(), &ids).unwrap();
    let b = TrafficLight::with_ids(fast(), &ids).unwrap();
    assert_eq!((a.id(), b.id()), (0, 1));
}

#[test]
fn test_published_phases_alternate() {
    let light = TrafficLight::new(fast()).unwrap();
    let watcher = light.subscribe();
    light.simulate().unwrap();

    let mut phases = Vec::new();
    for _ in 0..6 {
        let p = watcher
            .next_phase_timeout(Duration::from_secs(5))
            .expect("el hilo de fases dejo de publicar");
        phases.push(p);
    }
    light.shutdown().unwrap();

    assert_eq!(phases[0], TrafficLightPhase::Green);
    for pair in phases.windows(2) {
        assert_ne!(pair[0], pair[1], "dos fases iguales seguidas: {:?}", phases);
    }
}

#[test]
fn test_wait_for_green_returns_on_green() {
    let light = TrafficLight::new(fast()).unwrap();
    light.simulate().unwrap();

    for _ in 0..3 {
        let start = Instant::now();
        light.wait_for_green();
        // un ciclo dura al menos 30ms, la fase sigue en verde al volver
        assert_eq!(light.current_phase(), TrafficLightPhase::Green);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
    light.shutdown().unwrap();
}

#[test]
fn test_wait_for_green_timeout_without_broadcaster() {
    let light = TrafficLight::new(fast()).unwrap();
    let start = Instant::now();
    let err = light.wait_for_green_timeout(Duration::from_millis(50)).unwrap_err();
    assert!(matches!(err, LightError::Sync(_)));
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn test_every_watcher_sees_every_transition() {
    let light = TrafficLight::new(fast()).unwrap();
    let watchers: Vec<_> = (0..3).map(|_| light.subscribe()).collect();
    light.simulate().unwrap();

    let handles: Vec<_> = watchers
        .into_iter()
        .map(|w| {
            thread::spawn(move || {
                (0..4)
                    .map(|_| w.next_phase_timeout(Duration::from_secs(5)))
                    .collect::<Option<Vec<_>>>()
            })
        })
        .collect();

    let seen: Vec<Vec<TrafficLightPhase>> = handles
        .into_iter()
        .map(|h| h.join().unwrap().expect("watcher sin cambios"))
        .collect();
    light.shutdown().unwrap();

    let expected = vec![
        TrafficLightPhase::Green,
        TrafficLightPhase::Red,
        TrafficLightPhase::Green,
        TrafficLightPhase::Red,
    ];
    for s in &seen {
        assert_eq!(s, &expected);
    }
}

#[test]
fn test_competing_waiters_on_shared_queue_both_finish() {
    let light = Arc::new(TrafficLight::new(fast()).unwrap());
    light.simulate().unwrap();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let light = light.clone();
            thread::spawn(move || light.wait_for_green_timeout(Duration::from_secs(5)))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }
    light.shutdown().unwrap();
}

#[test]
fn test_multiple_simulate_calls_all_joined() {
    let light = TrafficLight::new(fast()).unwrap();
    for _ in 0..3 {
        light.simulate().unwrap();
    }
    assert_eq!(light.object().worker_count(), 3);
    assert!(light.is_cycling());

    thread::sleep(Duration::from_millis(100));
    light.shutdown_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(light.object().worker_count(), 0);
    assert_eq!(light.object().running_workers(), 0);
    assert!(!light.is_cycling());
}

#[test]
fn test_several_broadcasters_publish_in_toggle_order() {
    let config = LightConfig { min_cycle_ms: 5, max_cycle_ms: 10, poll_interval_ms: 1, ..Default::default() };
    let light = TrafficLight::new(config).unwrap();
    let watcher = light.subscribe();
    for _ in 0..3 {
        light.simulate().unwrap();
    }

    let mut phases = Vec::new();
    for _ in 0..30 {
        phases.push(watcher.next_phase_timeout(Duration::from_secs(5)).unwrap());
    }
    light.shutdown().unwrap();

    // los tres hilos cambian la misma fase; lo publicado debe seguir alternando
    assert_eq!(phases[0], TrafficLightPhase::Green);
    for pair in phases.windows(2) {
        assert_ne!(pair[0], pair[1], "fases fuera de orden: {:?}", phases);
    }
}

#[test]
fn test_redraw_each_cycle_still_alternates() {
    let config = LightConfig { redraw_each_cycle: true, ..fast() };
    let light = TrafficLight::new(config).unwrap();
    let watcher = light.subscribe();
    light.simulate().unwrap();

    let mut prev = TrafficLightPhase::Red;
    for _ in 0..4 {
        let p = watcher.next_phase_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(p, prev.toggled());
        prev = p;
    }
    light.shutdown().unwrap();
}

#[test]
fn test_position_bookkeeping() {
    let light = TrafficLight::new(fast()).unwrap();
    light.object().set_position(3.5, 7.25);
    assert_eq!(light.object().position(), Position::new(3.5, 7.25));
    assert_eq!(light.object().object_type(), ObjectType::TrafficLight);
}
