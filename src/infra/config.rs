use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use env_helpers::get_env_default;

/// Which Entry Store implementation backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            "postgres" => Ok(Self::Postgres),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// What to do when the configured store fails at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnStoreFailure {
    /// Surface the failure as a 500.
    Fail,
    /// Absorb it into a process-local volatile store, trading durability
    /// for availability.
    FallbackVolatile,
}

impl FromStr for OnStoreFailure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(Self::Fail),
            "fallback_volatile" => Ok(Self::FallbackVolatile),
            other => Err(format!("unknown store-failure policy: {other}")),
        }
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage_backend: StorageBackend,
    /// Path of the flat-file backend's JSON document.
    pub waitlist_file: PathBuf,
    pub redis_url: String,
    /// Required only when `storage_backend` is `postgres`.
    pub database_url: Option<String>,
    pub on_store_failure: OnStoreFailure,
    /// Upper bound on a single request, including the store round trip.
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());
        let storage_backend: StorageBackend =
            get_env_default("STORAGE_BACKEND", StorageBackend::Memory);
        let waitlist_file: PathBuf =
            get_env_default("WAITLIST_FILE", PathBuf::from("waitlist.json"));
        let redis_url: String =
            get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let database_url: Option<String> = std::env::var("DATABASE_URL").ok();
        let on_store_failure: OnStoreFailure =
            get_env_default("ON_STORE_FAILURE", OnStoreFailure::Fail);
        let request_timeout_secs: u64 = get_env_default("REQUEST_TIMEOUT_SECS", 10);

        Self {
            bind_addr,
            storage_backend,
            waitlist_file,
            redis_url,
            database_url,
            on_store_failure,
            request_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parses_known_values() {
        assert_eq!("memory".parse(), Ok(StorageBackend::Memory));
        assert_eq!("file".parse(), Ok(StorageBackend::File));
        assert_eq!("redis".parse(), Ok(StorageBackend::Redis));
        assert_eq!("postgres".parse(), Ok(StorageBackend::Postgres));
        assert!("mongo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn store_failure_policy_parses_known_values() {
        assert_eq!("fail".parse(), Ok(OnStoreFailure::Fail));
        assert_eq!(
            "fallback_volatile".parse(),
            Ok(OnStoreFailure::FallbackVolatile)
        );
        assert!("retry".parse::<OnStoreFailure>().is_err());
    }
}
