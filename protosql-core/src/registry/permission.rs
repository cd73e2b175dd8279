//! Load-permission gate.
//!
//! Loading a bundle changes process-wide state, so every load asks the host
//! first. The SQLite host answers from the connection's
//! `SQLITE_DBCONFIG_ENABLE_LOAD_EXTENSION` flag.

use crate::error::RegistryError;

/// Decides whether the caller may load schema bundles.
pub trait LoadPermission {
    /// `Ok(())` to allow, [`RegistryError::LoadDenied`] to refuse, or
    /// [`RegistryError::PermissionUnavailable`] when the setting cannot be read.
    fn check(&self) -> Result<(), RegistryError>;
}

/// Always allows loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowLoad;

impl LoadPermission for AllowLoad {
    fn check(&self) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Always refuses loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyLoad;

impl LoadPermission for DenyLoad {
    fn check(&self) -> Result<(), RegistryError> {
        Err(RegistryError::LoadDenied)
    }
}

impl<P: LoadPermission + ?Sized> LoadPermission for &P {
    fn check(&self) -> Result<(), RegistryError> {
        (**self).check()
    }
}
