// ============================================================================
// main.rs - simulacion de semaforos con hilos que esperan el verde
// ============================================================================

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use trafficlight::config::SimConfig;
use trafficlight::{log, sim};

#[derive(Parser)]
#[command(name = "trafficlight")]
#[command(version)]
#[command(about = "Semaforos con hilo de fases y espera bloqueante")]
struct Cli {
    /// Archivo JSON con la configuracion; las banderas lo sobrescriben
    #[arg(long, env = "TRAFFICLIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Cantidad de semaforos
    #[arg(long)]
    lights: Option<u32>,

    /// Hilos que esperan el verde por semaforo
    #[arg(long)]
    waiters: Option<u32>,

    /// Duracion de la corrida en segundos
    #[arg(long)]
    run_secs: Option<u64>,

    #[arg(long)]
    min_cycle_ms: Option<u64>,

    #[arg(long)]
    max_cycle_ms: Option<u64>,

    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Sortear la duracion del ciclo despues de cada cambio
    #[arg(long)]
    redraw_each_cycle: bool,

    /// Logs de depuracion
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(v) = self.lights { config.lights = v; }
        if let Some(v) = self.waiters { config.waiters_per_light = v; }
        if let Some(v) = self.run_secs { config.run_secs = v; }
        if let Some(v) = self.min_cycle_ms { config.light.min_cycle_ms = v; }
        if let Some(v) = self.max_cycle_ms { config.light.max_cycle_ms = v; }
        if let Some(v) = self.poll_interval_ms { config.light.poll_interval_ms = v; }
        if self.redraw_each_cycle { config.light.redraw_each_cycle = true; }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init(cli.verbose);

    let config = cli.into_config()?;
    let report = sim::run(&config)?;

    info!(
        lights = report.lights,
        greens = report.greens_observed,
        "resumen de la corrida"
    );
    for (id, phase) in &report.final_phases {
        info!(light_id = id, %phase, "fase final");
    }
    Ok(())
}
