//! Runtime configuration.
//!
//! Every flag can also be set through the environment (a `.env` file is
//! loaded first), so the service runs the same way from a shell or a container.

use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Container host under which the server restarts itself after seeding.
pub const RESTART_CONTAINER_HOST: &str = "mongodb";

/// How long a `build` run serves before exiting.
pub const BUILD_CHECK_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RuntimeEnv {
    #[default]
    Development,
    Test,
    /// Starts the server, serves briefly, then exits cleanly.
    Build,
    Production,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "igbo_api", about = "Igbo-English dictionary lookup service")]
pub struct Config {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Production hides the editing, test and seeding routes.
    #[arg(long = "env", env = "NODE_ENV", value_enum, default_value_t = RuntimeEnv::Development)]
    pub runtime_env: RuntimeEnv,

    #[arg(long, env = "DATABASE_URI", default_value = "memory://igbo_api")]
    pub database_uri: String,

    /// Set to `mongodb` to shut the server down after a seed so the container
    /// restarts it. The restarted process seeds itself again on startup.
    #[arg(long, env = "CONTAINER_HOST")]
    pub container_host: Option<String>,

    /// Seed the database from the embedded dictionary before serving.
    #[arg(long, env = "SEED_ON_STARTUP")]
    pub seed_on_startup: bool,

    /// How long a seed waits for the indexes to report ready.
    #[arg(long, env = "INDEX_READY_TIMEOUT_SECS", default_value_t = 15)]
    pub index_ready_timeout_secs: u64,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env == RuntimeEnv::Production
    }

    pub fn index_ready_timeout(&self) -> Duration {
        Duration::from_secs(self.index_ready_timeout_secs)
    }

    pub fn restart_after_seed(&self) -> bool {
        self.container_host.as_deref() == Some(RESTART_CONTAINER_HOST)
    }

    /// Whether `main` seeds before serving. The store lives in memory, so a
    /// process restarted after a seed has to seed again. Never in production.
    pub fn seed_at_startup(&self) -> bool {
        !self.is_production() && (self.seed_on_startup || self.restart_after_seed())
    }

    /// For a `build` run, how long to serve before shutting down.
    pub fn build_check(&self) -> Option<Duration> {
        (self.runtime_env == RuntimeEnv::Build).then_some(BUILD_CHECK_DURATION)
    }
}
