use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechConfig,
    pub cors: CorsConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// External speech-platform settings. The key has no default; the region and
/// endpoint fall back to the documented defaults.
#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    pub key: String,
    pub region: String,
    pub endpoint: String,
    /// Which translation source to run ("scripted" ships with the binary;
    /// platform bindings plug in through the feed source)
    pub provider: String,
}

#[derive(Debug, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// How long a stopping session may spend tearing down its source
    pub stop_grace_secs: u64,
}

impl Config {
    /// Load configuration from an optional file plus `SPEECH_*` environment
    /// overrides (e.g. `SPEECH_SPEECH__KEY`, `SPEECH_SERVICE__HTTP__PORT`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("service.name", "speech-translator")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8000_i64)?
            .set_default("speech.key", "")?
            .set_default("speech.region", "australiaeast")?
            .set_default(
                "speech.endpoint",
                "https://australiaeast.api.cognitive.microsoft.com/",
            )?
            .set_default("speech.provider", "scripted")?
            .set_default(
                "cors.allowed_origins",
                vec!["http://127.0.0.1:5500".to_string()],
            )?
            .set_default("session.stop_grace_secs", 5_i64)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SPEECH").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
