use tracing::warn;

/// Development fallback only. Startup warns loudly when this is in use.
const DEV_SECRET: &str = "your-secret-key";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime. `None` means issued tokens never expire.
    pub ttl_minutes: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = match std::env::var("JWT_SECRET_KEY") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("JWT_SECRET_KEY not set; using the insecure dev default");
                DEV_SECRET.to_string()
            }
        };
        let jwt = JwtConfig {
            secret,
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok()),
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(4000);
        Ok(Self { host, port, jwt })
    }
}
