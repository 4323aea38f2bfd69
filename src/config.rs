use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub webhook_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    pub deploy: Option<DeployConfig>,
}

/// Where and how the git-push webhook updates the running deployment.
/// Absent when SALOND_DEPLOY_DIR is not set; the webhook then still
/// verifies signatures but reports deployment as unconfigured.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub repo_dir: PathBuf,
    pub branch: String,
    pub compose_file: PathBuf,
    pub service: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;
        let webhook_secret = env_required("SALOND_WEBHOOK_SECRET")?;

        let host: IpAddr = env_or("SALOND_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SALOND_HOST: {e}"))?;

        let port: u16 = env_or("SALOND_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SALOND_PORT: {e}"))?;

        let max_body_size: usize = env_or("SALOND_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid SALOND_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("SALOND_LOG_LEVEL", "info");

        let deploy = match std::env::var("SALOND_DEPLOY_DIR").ok() {
            Some(dir) if !dir.trim().is_empty() => {
                let repo_dir = PathBuf::from(dir);
                let compose_file = std::env::var("SALOND_DEPLOY_COMPOSE_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| repo_dir.join("docker-compose.yml"));
                Some(DeployConfig {
                    repo_dir,
                    branch: env_or("SALOND_DEPLOY_BRANCH", "main"),
                    compose_file,
                    service: env_or("SALOND_DEPLOY_SERVICE", "web"),
                })
            }
            _ => None,
        };

        Ok(Config {
            database_url,
            jwt_secret,
            webhook_secret,
            host,
            port,
            max_body_size,
            log_level,
            deploy,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
