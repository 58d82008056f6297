//! Binding model generation for Ethereum contracts
//!
//! Turns a contract ABI into a [`ContractModel`]: calls and transacts,
//! events, synthesized structs and the names a renderer needs to emit typed
//! client bindings for a target language.

pub mod assembler;
pub mod classifier;
pub mod deployment;
pub mod format;
pub mod mapper;
pub mod parser;
pub mod registry;


pub use assembler::{Assembler, ContractModel};
pub use classifier::Classifier;
pub use deployment::{Deployment, DeploymentInfo, Deployments};
pub use mapper::{target_for, Target};
pub use parser::AbiParser;
pub use registry::StructRegistry;

use solbind_core::config::BindConfig;
use solbind_core::Result;
use tracing::info;

/// Binds contracts for one configured target.
///
/// Every call to [`ContractBinder::bind`] starts from an empty struct registry,
/// so one binder can serve many contracts, including from several threads.
pub struct ContractBinder {
    config: BindConfig,
    target: Box<dyn Target>,
}

impl ContractBinder {
    /// Create a binder, validating the configuration
    pub fn new(config: BindConfig) -> Result<Self> {
        config.validate()?;
        let target = target_for(config.language, config.platform);
        Ok(Self { config, target })
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Build the model for one deployed contract
    pub fn bind(&self, name: &str, deployment: &Deployment) -> Result<ContractModel> {
        info!(
            contract = %name,
            language = %self.config.language,
            platform = %self.config.platform,
            "Binding contract"
        );

        let abi = deployment.parse_abi()?;
        let raw_abi = deployment.raw_abi()?;

        let customs = self.config.customs_for(name);

        let mut structs = StructRegistry::with_overrides(customs.structs.clone());
        let classification =
            Classifier::new(self.target.as_ref(), &customs).classify(&abi, &mut structs)?;

        let mut model = Assembler::new(self.config.language, self.config.platform).assemble(
            name,
            &raw_abi,
            classification,
            structs,
            &customs,
        )?;
        model.deployment = deployment.info();

        info!(
            contract = %name,
            calls = model.calls.len(),
            transacts = model.transacts.len(),
            events = model.events.len(),
            structs = model.structs.len(),
            "Bound contract"
        );
        Ok(model)
    }

    /// Build the model for a contract given only its ABI JSON
    pub fn bind_abi_str(&self, name: &str, abi: &str) -> Result<ContractModel> {
        self.bind(name, &Deployment::from_abi_str(abi)?)
    }
}
