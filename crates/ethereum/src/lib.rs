/// Ethereum contract binding generation
pub mod codegen;

pub use codegen::{
    assembler::ContractModel,
    deployment::{Deployment, DeploymentInfo, Deployments},
    ContractBinder,
};
