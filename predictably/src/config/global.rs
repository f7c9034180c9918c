//! Process-wide configuration with per-thread working copies.
//!
//! A shared configuration starts as the registry defaults. Each thread works
//! on its own copy, cloned from the shared one the first time that thread
//! reads or writes configuration. Updates always change the calling
//! thread's copy; unless made thread-local they are also written to the
//! shared configuration, becoming the starting point for threads that have
//! not cloned it yet.
//!
//! Shared writes are serialized by a lock, but an update touching several
//! keys is not atomic with respect to readers on other threads.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::{OnceLock, PoisonError, RwLock};

use log::{debug, error};

use crate::config::registry;
use crate::config::schema::{ConfigMap, ConfigUpdate};
use crate::error::Result;

const SET_CONFIG_WARNING: &str = "Attempting to set an invalid value for a global \
     configuration.\nUsing current configuration value of parameter as a result.\n";

fn shared() -> &'static RwLock<ConfigMap> {
    static SHARED: OnceLock<RwLock<ConfigMap>> = OnceLock::new();
    SHARED.get_or_init(|| RwLock::new(registry::defaults()))
}

fn read_shared() -> ConfigMap {
    shared()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

thread_local! {
    static LOCAL: RefCell<Option<ConfigMap>> = const { RefCell::new(None) };
}

fn with_local<R>(f: impl FnOnce(&mut ConfigMap) -> R) -> R {
    LOCAL.with(|local| {
        let mut local = local.borrow_mut();
        f(local.get_or_insert_with(read_shared))
    })
}

/// The registry defaults.
///
/// # Examples
///
/// ```
/// use predictably::config::get_default_config;
/// use predictably::Value;
///
/// assert_eq!(get_default_config()["dataframe_backend"], Value::from("polars"));
/// ```
#[must_use]
pub fn get_default_config() -> ConfigMap {
    registry::defaults()
}

/// The calling thread's current configuration.
#[must_use]
pub fn get_config() -> ConfigMap {
    with_local(|local| local.clone())
}

/// Applies `update` to the current configuration.
///
/// Unset entries are skipped. Each value is validated against its setting;
/// an invalid one is replaced by the thread's current value with a warning.
/// With `make_thread_local` false the applied values are also written to
/// the shared configuration. Only the keys in `update` are written there:
/// earlier thread-local changes to other keys stay with this thread rather
/// than the whole thread configuration being published.
///
/// # Errors
///
/// Returns `UnrecognizedParameter` if any key is not registered. Nothing is
/// changed in that case.
///
/// # Examples
///
/// ```
/// use predictably::config::{get_config, set_config, ConfigUpdate, DataframeBackend};
/// use predictably::Value;
///
/// set_config(&ConfigUpdate::new().dataframe_backend(DataframeBackend::Pandas), true).unwrap();
/// assert_eq!(get_config()["dataframe_backend"], Value::from("pandas"));
///
/// assert!(set_config(&ConfigUpdate::new().with("colour", "red"), true).is_err());
/// ```
pub fn set_config(update: &ConfigUpdate, make_thread_local: bool) -> Result<()> {
    for (name, _) in update.iter() {
        registry::require(name)?;
    }

    let applied = with_local(|local| {
        let mut applied = ConfigMap::new();
        for (name, value) in update.set_entries() {
            let Some(setting) = registry::lookup(name) else {
                continue;
            };
            let current = local.get(name).cloned().unwrap_or_default();
            let value = setting.coerce_or_default(value.clone(), current, SET_CONFIG_WARNING);
            local.insert(name.clone(), value.clone());
            applied.insert(name.clone(), value);
        }
        applied
    });

    if !make_thread_local && !applied.is_empty() {
        shared()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(applied);
    }
    Ok(())
}

/// Restores the registry defaults, for this thread and the shared
/// configuration.
pub fn reset_config() {
    let defaults = ConfigUpdate::from(registry::defaults());
    if let Err(err) = set_config(&defaults, false) {
        error!("Failed to reset configuration: {err}");
    }
}

/// Restores a saved configuration when dropped.
///
/// Returned by [`config_context`]. The guard is bound to the thread that
/// created it.
#[must_use = "the configuration is restored as soon as the guard is dropped"]
pub struct ConfigGuard {
    saved: ConfigUpdate,
    make_thread_local: bool,
    _not_send: PhantomData<*const ()>,
}

impl ConfigGuard {
    /// The configuration that will be restored.
    #[must_use]
    pub fn saved(&self) -> &ConfigUpdate {
        &self.saved
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        if let Err(err) = set_config(&self.saved, self.make_thread_local) {
            error!("Failed to restore configuration: {err}");
        }
    }
}

/// Applies `update` until the returned guard is dropped.
///
/// The configuration current at entry is restored on drop, including during
/// unwinding. Guards nest; each one restores the state at its own entry.
///
/// # Errors
///
/// Returns `UnrecognizedParameter` for unknown keys, without changing
/// anything.
///
/// # Examples
///
/// ```
/// use predictably::config::{config_context, get_config, ConfigUpdate};
/// use predictably::Value;
///
/// {
///     let _guard = config_context(&ConfigUpdate::new().print_changed_only(false), true).unwrap();
///     assert_eq!(get_config()["print_changed_only"], Value::from(false));
/// }
/// assert_eq!(get_config()["print_changed_only"], Value::from(true));
/// ```
pub fn config_context(update: &ConfigUpdate, make_thread_local: bool) -> Result<ConfigGuard> {
    let saved = ConfigUpdate::from(get_config());
    set_config(update, make_thread_local)?;
    debug!("Entered configuration context with {} update(s)", update.len());
    Ok(ConfigGuard {
        saved,
        make_thread_local,
        _not_send: PhantomData,
    })
}

/// Runs `body` with `update` applied, restoring the configuration afterwards.
///
/// # Errors
///
/// Returns `UnrecognizedParameter` for unknown keys; `body` does not run in
/// that case.
pub fn with_config<R>(
    update: &ConfigUpdate,
    make_thread_local: bool,
    body: impl FnOnce() -> R,
) -> Result<R> {
    let _guard = config_context(update, make_thread_local)?;
    Ok(body())
}
