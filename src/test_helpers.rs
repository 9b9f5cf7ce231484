use crate::configuration::{CredentialKind, FirebaseSettings};

/// Settings pointing every Firebase API at `base_url`, as the emulator suite
/// or a mock server would be addressed
pub fn firebase_settings(base_url: &str, credentials: CredentialKind) -> FirebaseSettings {
    FirebaseSettings {
        project_id: "demo-cashier".into(),
        database_id: "(default)".into(),
        credentials,
        access_token: None,
        auth_base_url: base_url.into(),
        firestore_base_url: base_url.into(),
        metadata_url: base_url.into(),
    }
}
