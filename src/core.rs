mod evaluator;
mod graph;
mod layer;
mod path;
mod plan;
mod selector;
mod transfer;
mod workload;

pub use self::{
    evaluator::ProviderCosts,
    graph::{Edge, Node, StorageGraph},
    layer::{Layer, LayerCost},
    path::StoragePath,
    plan::{Plan, plan},
    selector::{Candidate, Override, Resolution},
    transfer::{Route, RouteCost},
    workload::Workload,
};
