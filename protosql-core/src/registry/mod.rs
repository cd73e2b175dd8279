//! Descriptor registry.
//!
//! Maps fully-qualified type names to the message and enum descriptors
//! loaded from schema bundles. Names are unique across all bundles: a bundle
//! that redefines a loaded type differently is rejected as a whole, while an
//! identical redefinition is accepted without effect.
//!
//! Lookups share a read lock; loads take the write lock for the whole
//! check-then-insert so a conflicting bundle never leaves partial state.

mod bundle;
mod permission;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RegistryError;
use crate::schema::{EnumType, MessageType, TypeDescriptor};

pub use bundle::decode_bundle;
pub use permission::{AllowLoad, DenyLoad, LoadPermission};

/// Outcome of a successful bundle load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Names newly added, in bundle order
    pub added: Vec<String>,

    /// Types that were already loaded with an identical definition
    pub already_present: usize,
}

/// Registry of loaded descriptors.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    types: RwLock<HashMap<String, TypeDescriptor>>,
    config: Config,
}

static GLOBAL: OnceLock<Arc<DescriptorRegistry>> = OnceLock::new();

impl DescriptorRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Process-wide registry, configured from the environment on first use.
    ///
    /// Used by the loadable-extension entry point, where every connection in
    /// the process shares one set of loaded schemas.
    pub fn global() -> Arc<DescriptorRegistry> {
        GLOBAL
            .get_or_init(|| Arc::new(Self::with_config(Config::from_env())))
            .clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a bundle file.
    ///
    /// Relative paths are resolved against the configured bundle search path.
    pub fn load_file<G>(&self, path: impl AsRef<Path>, gate: &G) -> Result<LoadReport, RegistryError>
    where
        G: LoadPermission + ?Sized,
    {
        gate.check()?;

        let requested = path.as_ref();
        let resolved = self.config.resolve_bundle(requested);
        debug!(path = %resolved.display(), "Reading schema bundle");

        let bytes = std::fs::read(&resolved).map_err(|source| RegistryError::BundleUnreadable {
            path: requested.display().to_string(),
            source,
        })?;

        self.insert_bundle(&bytes)
    }

    /// Load bundle bytes already in memory.
    pub fn load_bundle<G>(&self, bytes: &[u8], gate: &G) -> Result<LoadReport, RegistryError>
    where
        G: LoadPermission + ?Sized,
    {
        gate.check()?;
        self.insert_bundle(bytes)
    }

    fn insert_bundle(&self, bytes: &[u8]) -> Result<LoadReport, RegistryError> {
        let incoming = decode_bundle(bytes)?;
        let mut types = self.types.write();

        for descriptor in &incoming {
            if let Some(existing) = types.get(descriptor.name()) {
                if !existing.same_definition(descriptor) {
                    warn!(type_name = descriptor.name(), "Schema conflict, bundle rejected");
                    return Err(RegistryError::SchemaConflict {
                        name: descriptor.name().to_string(),
                    });
                }
            }
        }

        let mut report = LoadReport::default();
        for descriptor in incoming {
            if types.contains_key(descriptor.name()) {
                report.already_present += 1;
                continue;
            }
            debug!(type_name = descriptor.name(), kind = %descriptor.type_kind(), "Registered type");
            report.added.push(descriptor.name().to_string());
            types.insert(descriptor.name().to_string(), descriptor);
        }

        info!(
            added = report.added.len(),
            already_present = report.already_present,
            total = types.len(),
            "Loaded schema bundle"
        );

        Ok(report)
    }

    /// Look up any type by exact name.
    pub fn get(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.read().get(name).cloned()
    }

    /// Look up a message type by exact name.
    pub fn resolve_message(&self, name: &str) -> Result<Arc<MessageType>, RegistryError> {
        match self.types.read().get(name) {
            Some(TypeDescriptor::Message(m)) => Ok(Arc::clone(m)),
            _ => Err(RegistryError::unknown_message(name)),
        }
    }

    /// Look up an enum type by exact name.
    pub fn resolve_enum(&self, name: &str) -> Result<Arc<EnumType>, RegistryError> {
        match self.types.read().get(name) {
            Some(TypeDescriptor::Enum(e)) => Ok(Arc::clone(e)),
            _ => Err(RegistryError::unknown_enum(name)),
        }
    }

    /// Sorted names of all loaded message types.
    pub fn message_names(&self) -> Vec<String> {
        self.sorted_names(|t| matches!(t, TypeDescriptor::Message(_)))
    }

    /// Sorted names of all loaded enum types.
    pub fn enum_names(&self) -> Vec<String> {
        self.sorted_names(|t| matches!(t, TypeDescriptor::Enum(_)))
    }

    fn sorted_names(&self, keep: impl Fn(&TypeDescriptor) -> bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .types
            .read()
            .values()
            .filter(|t| keep(t))
            .map(|t| t.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Number of loaded types.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}
