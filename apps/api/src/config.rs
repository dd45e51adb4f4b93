use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; the service boots with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Supersampling factor for the captured raster. 2.0 keeps text crisp
    /// once the image is scaled onto the A4 page.
    pub render_scale: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let render_scale = std::env::var("RENDER_SCALE")
            .unwrap_or_else(|_| "2.0".to_string())
            .parse::<f32>()
            .context("RENDER_SCALE must be a number")?;
        ensure!(
            render_scale > 0.0 && render_scale <= 4.0,
            "RENDER_SCALE must be in (0, 4]"
        );

        Ok(Config {
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            render_scale,
        })
    }
}
