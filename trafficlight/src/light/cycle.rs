// loop de fondo que alterna la fase y la publica

use super::state::PhaseState;
use crate::config::LightConfig;
use crate::model::TrafficLightPhase;
use lightsync::{MessageQueue, PhaseBroadcast, StopToken};
use rand::Rng;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Todo lo que el hilo de fases comparte con su semaforo.
pub(crate) struct CycleContext {
    pub light_id: u32,
    pub state: Arc<PhaseState>,
    pub queue: Arc<MessageQueue<TrafficLightPhase>>,
    pub broadcast: Arc<PhaseBroadcast<TrafficLightPhase>>,
    // serializa cambio, envio y publicacion entre hilos del mismo semaforo
    pub writer: Arc<Mutex<()>>,
    pub config: LightConfig,
}

/// Duracion de ciclo uniforme en [min_cycle_ms, max_cycle_ms].
pub(crate) fn draw_cycle<R: Rng>(rng: &mut R, config: &LightConfig) -> Duration {
    Duration::from_millis(rng.random_range(config.min_cycle_ms..=config.max_cycle_ms))
}

/// Corre hasta que se cancele `stop`.
///
/// Duerme `poll_interval_ms` por vuelta y cuando pasa la duracion del ciclo
/// cambia la fase, la manda a la cola y la publica a los suscriptores, en
/// ese orden y bajo el lock `writer`, asi que aunque haya varios hilos de
/// fases cada cambio se publica antes de que ocurra el siguiente.
pub(crate) fn cycle_through_phases(ctx: CycleContext, stop: StopToken) {
    info!(
        light_id = ctx.light_id,
        thread = ?thread::current().id(),
        "TrafficLight #{}::cycle_through_phases arrancando",
        ctx.light_id
    );

    let mut rng = rand::rng();
    let mut cycle = draw_cycle(&mut rng, &ctx.config);
    debug!(light_id = ctx.light_id, cycle_ms = cycle.as_millis() as u64, "duracion de ciclo");

    let poll = ctx.config.poll_interval();
    let mut last_update = Instant::now();
    let mut toggles: u64 = 0;

    while !stop.is_cancelled() {
        thread::sleep(poll);

        if last_update.elapsed() >= cycle {
            let (phase, subscribers) = {
                let _writer = ctx.writer.lock().unwrap_or_else(PoisonError::into_inner);
                let phase = ctx.state.toggle();
                ctx.queue.send(phase);
                (phase, ctx.broadcast.publish(phase))
            };
            toggles += 1;
            debug!(light_id = ctx.light_id, %phase, subscribers, "cambio de fase");

            last_update = Instant::now();
            if ctx.config.redraw_each_cycle {
                cycle = draw_cycle(&mut rng, &ctx.config);
            }
        }
    }

    info!(light_id = ctx.light_id, toggles, "hilo de fases detenido");
}
