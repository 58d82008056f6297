//! Typed contract binding models from Solidity ABIs
//!
//! Binds a whole set of deployments at once. A contract that fails to bind is
//! reported under its own name and never blocks the rest of the batch.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

pub use solbind_common::{Error, Result};
pub use solbind_core::config::{BindConfig, Customs, Language};
pub use solbind_core::platform::Platform;
pub use solbind_ethereum::{
    ContractBinder, ContractModel, Deployment, DeploymentInfo, Deployments,
};

/// Per-contract binding outcome, keyed by contract name
pub type BindResults = BTreeMap<String, Result<ContractModel>>;

fn record(results: &mut BindResults, name: String, result: Result<ContractModel>) {
    if let Err(err) = &result {
        warn!(contract = %name, error = %err, "Failed to bind contract");
    }
    results.insert(name, result);
}

/// Bind every deployment in name order.
///
/// Fails only when the configuration itself is invalid.
pub fn bind_deployments(deployments: &Deployments, config: &BindConfig) -> Result<BindResults> {
    let binder = ContractBinder::new(config.clone())?;
    let mut results = BindResults::new();

    for (name, deployment) in deployments {
        record(&mut results, name.clone(), binder.bind(name, deployment));
    }

    info!(
        contracts = results.len(),
        failed = results.values().filter(|r| r.is_err()).count(),
        "Bound deployments"
    );
    Ok(results)
}

/// Bind every deployment on the blocking pool, one task per contract
pub async fn bind_deployments_concurrent(
    deployments: Deployments,
    config: BindConfig,
) -> Result<BindResults> {
    let binder = Arc::new(ContractBinder::new(config)?);
    let mut tasks = JoinSet::new();

    for (name, deployment) in deployments {
        let binder = Arc::clone(&binder);
        tasks.spawn_blocking(move || {
            let result = binder.bind(&name, &deployment);
            (name, result)
        });
    }

    let mut results = BindResults::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, result)) => record(&mut results, name, result),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => warn!(error = %err, "Binding task cancelled"),
        }
    }

    info!(
        contracts = results.len(),
        failed = results.values().filter(|r| r.is_err()).count(),
        "Bound deployments concurrently"
    );
    Ok(results)
}
