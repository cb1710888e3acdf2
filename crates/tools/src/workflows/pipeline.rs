use anyhow::{ensure, Result};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    account::Identity,
    calls::{ContractCallRequest, ContractCallResult, ContractCaller},
};

/// One call of a workflow.
#[derive(Clone, Debug)]
pub struct Step {
    pub name: &'static str,
    pub signer: Identity,
    pub request: ContractCallRequest,
}

/// Named, ordered list of steps. Each step runs only after its predecessor
/// succeeded.
#[derive(Clone, Debug)]
pub struct Workflow {
    name: &'static str,
    steps: Vec<Step>,
}

impl Workflow {
    pub fn new(name: &'static str) -> Self {
        Workflow {
            name,
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(
        mut self,
        name: &'static str,
        signer: &Identity,
        request: ContractCallRequest,
    ) -> Result<Self> {
        ensure!(
            self.steps.iter().all(|step| step.name != name),
            "workflow {} already has a step named {}",
            self.name,
            name
        );
        self.steps.push(Step {
            name,
            signer: signer.clone(),
            request,
        });
        Ok(self)
    }

    /// Run every step in order, stopping at the first error.
    pub async fn run<C: ContractCaller + ?Sized>(self, caller: &C) -> Result<WorkflowResult> {
        let Workflow { name, steps } = self;
        let total = steps.len();
        let mut result = WorkflowResult::default();
        for (index, step) in steps.into_iter().enumerate() {
            tracing::info!(
                "[{}] step {}/{}: {}",
                name,
                index + 1,
                total,
                step.name
            );
            let outcome = caller.call(&step.signer, &step.request).await?;
            result.steps.push((step.name, outcome));
        }
        Ok(result)
    }
}

/// Step results in execution order, serialized as a map keyed by step name.
#[derive(Clone, Debug, Default)]
pub struct WorkflowResult {
    steps: Vec<(&'static str, ContractCallResult)>,
}

impl WorkflowResult {
    pub fn get(&self, step: &str) -> Option<&ContractCallResult> {
        self.steps
            .iter()
            .find(|(name, _)| *name == step)
            .map(|(_, result)| result)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(name, _)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Serialize for WorkflowResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len()))?;
        for (name, result) in &self.steps {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}
