//! Runs configuration tests inside a `figment::Jail`.
//!
//! The jail serialises access to the process environment and restores it when
//! the closure returns, so tests can set `GWT_*` variables freely.

use anyhow::{Result, anyhow};

/// Sets each `(name, value)` pair inside a [`figment::Jail`] and runs `f`,
/// returning its output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or `f` fails.
///
/// # Examples
///
/// ```
/// use test_helpers::with_env;
///
/// let value = with_env(&[("GWT_EXAMPLE", "on")], |_jail| {
///     Ok(std::env::var("GWT_EXAMPLE").ok())
/// })?;
/// assert_eq!(value.as_deref(), Some("on"));
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_env<F, T>(vars: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        for (name, value) in vars {
            jail.set_env(name, value);
        }
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}
