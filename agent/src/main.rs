//! Amanq Agent - Main Entry Point

mod constants;
mod logic;

use logic::agent::Agent;
use logic::config::AgentConfig;
use logic::link::ControllerClient;
use logic::monitor::LoadSampler;
use logic::poller::{NoStress, ShellStress, StressWorkload};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);

    let config = AgentConfig::from_env();
    log::info!(
        "Node {} -> {} (critical dir {}, window {}s)",
        config.node_id,
        config.controller_url,
        config.critical_dir.display(),
        config.attack_window.as_secs()
    );

    if let Err(e) = std::fs::create_dir_all(&config.critical_dir) {
        log::error!("Cannot create {}: {}", config.critical_dir.display(), e);
        std::process::exit(1);
    }

    let link = match ControllerClient::new(&config.controller_url) {
        Ok(link) => link,
        Err(e) => {
            log::error!("Failed to build controller client: {}", e);
            std::process::exit(1);
        }
    };

    let stress: Box<dyn StressWorkload + Send + Sync> = match &config.stress_command {
        Some(cmd) => Box::new(ShellStress::new(cmd.clone())),
        None => Box::new(NoStress),
    };

    if config.detector_authoritative {
        log::warn!("Anomaly detector is authoritative: it may open attack windows on its own");
    }

    let mut agent = Agent::new(config, link, stress);
    let mut sampler = LoadSampler::new(constants::CPU_SAMPLE_INTERVAL);

    log::info!("Agent online, polling controller");
    agent
        .run(&mut sampler, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    log::info!("Agent stopped");
}
