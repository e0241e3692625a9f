//! Device identity
//!
//! The service ties sessions to a device fingerprint. The fingerprint is kept
//! in a small JSON file (`device.json` by default) so the same identity is
//! presented across process runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storage::{JsonFile, PersistenceConfig, PersistenceError};

/// Default file name for the persisted identity
pub const DEFAULT_DEVICE_FILE: &str = "device.json";

const DEFAULT_DEVICE_ID: &str =
    "01B592EF5658F82E1339B39AA893FF661D7E8B8F1D16227E396EF4B1BF60F33D25566A35AB1514DAB5";
const DEFAULT_DEVICE_ID_SIG: &str = "AaauX/ZA2gM3ozqk1U5j6ek89SMu";
const DEFAULT_USER_AGENT: &str =
    "Dalvik/2.1.0 (Linux; U; Android 7.1; LG-UK495 Build/MRA58K; com.narvii.amino.master/3.3.33180)";

/// Device fingerprint presented on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Hex device id, sent as `NDCDEVICEID` and in auth payloads
    pub device_id: String,
    /// Signature over the device id
    pub device_id_sig: String,
    /// User agent string of the emulated app
    pub user_agent: String,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID.to_string(),
            device_id_sig: DEFAULT_DEVICE_ID_SIG.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DeviceIdentity {
    /// Create an identity from explicit values
    pub fn new(
        device_id: impl Into<String>,
        device_id_sig: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            device_id_sig: device_id_sig.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// Loads and saves a [`DeviceIdentity`] file
#[derive(Debug, Clone)]
pub struct DeviceStore {
    file: JsonFile<DeviceIdentity>,
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_FILE)
    }
}

impl DeviceStore {
    /// Create a store for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::with_config(PersistenceConfig::new(path)),
        }
    }

    /// Path of the identity file
    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Load the identity, writing the default one first if the file is
    /// missing or unreadable
    pub async fn load_or_create(&self) -> Result<DeviceIdentity, PersistenceError> {
        let identity = self.file.load_or_init(DeviceIdentity::default).await?;
        tracing::debug!(
            path = %self.file.path().display(),
            device_id = %identity.device_id,
            "Loaded device identity"
        );
        Ok(identity)
    }

    /// Load the identity without creating it
    pub async fn load(&self) -> Result<DeviceIdentity, PersistenceError> {
        self.file.load().await
    }

    /// Overwrite the identity file
    pub async fn save(&self, identity: &DeviceIdentity) -> Result<(), PersistenceError> {
        self.file.save(identity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_identity() {
        let identity = DeviceIdentity::default();
        assert_eq!(identity.device_id.len(), 82);
        assert!(identity.user_agent.contains("com.narvii.amino.master"));
    }

    #[tokio::test]
    async fn test_round_trip_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let store = DeviceStore::new(dir.path().join("device.json"));
        let identity = DeviceIdentity::new(
            "22AB19C7E0F6F1C3B0A1D5E4F33C0B7A66E01F5A9D1BB2C3D4E5F60718293A4B5C6D7E8F90A1B2C3D4",
            "Bz+/sig==",
            "Dalvik/2.1.0 (Linux; U; Android 10; Pixel 3 Build/QQ3A)",
        );

        store.save(&identity).await.unwrap();
        let reloaded = DeviceStore::new(store.path()).load().await.unwrap();

        assert_eq!(reloaded.device_id.as_bytes(), identity.device_id.as_bytes());
        assert_eq!(reloaded.device_id_sig.as_bytes(), identity.device_id_sig.as_bytes());
        assert_eq!(reloaded.user_agent.as_bytes(), identity.user_agent.as_bytes());
    }

    #[tokio::test]
    async fn test_load_or_create_writes_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("device.json");
        let store = DeviceStore::new(&path);

        let identity = store.load_or_create().await.unwrap();
        assert_eq!(identity, DeviceIdentity::default());
        assert!(path.exists());

        // File uses the documented field names
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("device_id").is_some());
        assert!(raw.get("device_id_sig").is_some());
        assert!(raw.get("user_agent").is_some());
    }

    #[tokio::test]
    async fn test_load_or_create_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let store = DeviceStore::new(dir.path().join("device.json"));
        let custom = DeviceIdentity::new("AB", "sig", "agent");
        store.save(&custom).await.unwrap();

        assert_eq!(store.load_or_create().await.unwrap(), custom);
    }

    #[tokio::test]
    async fn test_load_or_create_replaces_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(&path, r#"{"device_id": "only-half"#).unwrap();

        let identity = DeviceStore::new(&path).load_or_create().await.unwrap();
        assert_eq!(identity, DeviceIdentity::default());
    }

    #[tokio::test]
    async fn test_load_or_create_replaces_incomplete_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(&path, r#"{"device_id": "AB"}"#).unwrap();

        let identity = DeviceStore::new(&path).load_or_create().await.unwrap();
        assert_eq!(identity, DeviceIdentity::default());
    }
}
