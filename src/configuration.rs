use config::{Config, ConfigError, File};
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::convert::{TryFrom, TryInto};
use std::env::var;
use std::fmt;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub firebase: FirebaseSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Region the function is deployed to, only reported in logs
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirebaseSettings {
    pub project_id: String,
    pub database_id: String,
    pub credentials: CredentialKind,
    pub access_token: Option<Secret<String>>,
    pub auth_base_url: String,
    pub firestore_base_url: String,
    pub metadata_url: String,
}

/// Where bearer tokens for the Firebase APIs come from
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// Local emulator suite, which accepts the fixed `owner` token
    Emulator,
    /// GCE metadata server of the hosting platform
    MetadataServer,
    /// A pre-issued OAuth2 access token supplied through `access_token`
    AccessToken,
}

#[derive(Debug)]
pub enum Environment {
    Local,
    CI,
    Production,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("failed to determine current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            File::from(configuration_directory.join(format!("{}.yaml", environment.as_str())))
                .required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

impl FirebaseSettings {
    /// Resource name of the configured Firestore database
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/databases/{}",
            self.project_id, self.database_id
        )
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::CI => "ci",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::CI),
            "production" => Ok(Self::Production),
            other => Err(format!("{} is not a supported environment", other)),
        }
    }
}
