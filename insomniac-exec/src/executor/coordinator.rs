use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use insomniac_core::{request_dependency_ids, Environment, Request, RequestGroup};
use insomniac_store::{find_environments_by_name, Catalog, ResponseStore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::executor::error::{FatalError, RunError, SetupError};
use crate::executor::events::{Event, EventBus, Subscription};
use crate::executor::leg::{Leg, LegContext};
use crate::executor::record::{CompletionMap, CompletionRecord};
use crate::executor::sender::Sender;
use crate::executor::types::CoordinatorConfig;

pub struct Coordinator {
    config: CoordinatorConfig,
    catalog: Arc<dyn Catalog>,
    sender: Arc<dyn Sender>,
    store: Arc<dyn ResponseStore>,
}

impl Coordinator {
    pub fn new(
        config: CoordinatorConfig,
        catalog: Arc<dyn Catalog>,
        sender: Arc<dyn Sender>,
        store: Arc<dyn ResponseStore>,
    ) -> Self {
        Self {
            config,
            catalog,
            sender,
            store,
        }
    }

    /// Resolve the environment and group, extract every request's
    /// dependencies and build one leg per request.
    ///
    /// The environment name must match exactly one environment anywhere in
    /// the workspace tree.
    pub async fn setup(
        &self,
        group_name: &str,
        environment_name: &str,
        delay: Duration,
    ) -> Result<Batch, SetupError> {
        let environment = self.resolve_environment(environment_name).await?;

        let group = self
            .catalog
            .request_group_by_name(group_name)
            .await?
            .ok_or_else(|| SetupError::GroupNotFound(group_name.to_string()))?;
        let requests = self.catalog.requests_by_parent(&group.id).await?;

        let bus = Arc::new(EventBus::new());
        let ctx = Arc::new(LegContext {
            bus: bus.clone(),
            sender: self.sender.clone(),
            store: self.store.clone(),
            environment_id: environment.id.clone(),
            cascade_failures: self.config.cascade_failures,
        });

        let mut legs = BTreeMap::new();
        let mut annotated = Vec::with_capacity(requests.len());
        for mut request in requests {
            request.dependency_ids = request_dependency_ids(&request);
            debug!(
                request = %request.name,
                dependencies = ?request.dependency_ids,
                "found dependencies"
            );

            let request = Arc::new(request);
            legs.insert(
                request.id.clone(),
                Leg::new(request.clone(), delay, ctx.clone()),
            );
            annotated.push(request);
        }

        warn_unreachable_dependencies(&annotated);

        Ok(Batch {
            group,
            environment,
            requests: annotated,
            legs,
            bus,
        })
    }

    async fn resolve_environment(&self, name: &str) -> Result<Environment, SetupError> {
        let workspace = self.catalog.workspace().await?;
        let mut environments =
            find_environments_by_name(self.catalog.as_ref(), &workspace.id, name).await?;
        debug!(
            name,
            found = ?environments.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            "found environments matching name"
        );

        if environments.len() != 1 {
            return Err(SetupError::EnvironmentNotFound {
                name: name.to_string(),
                matches: environments.len(),
            });
        }
        Ok(environments.remove(0))
    }
}

/// Dependencies that can never finish keep the run from settling.
fn warn_unreachable_dependencies(requests: &[Arc<Request>]) {
    let ids: HashSet<&str> = requests.iter().map(|r| r.id.as_str()).collect();
    for request in requests {
        for dep in &request.dependency_ids {
            if dep == &request.id {
                warn!(request = %request.name, "request depends on itself; the run will not complete");
            } else if !ids.contains(dep.as_str()) {
                warn!(
                    request = %request.name,
                    dependency = %dep,
                    "dependency is not part of this group; the run will not complete"
                );
            }
        }
    }
}

/// A prepared run: one leg per request, all listening on a fresh bus.
pub struct Batch {
    group: RequestGroup,
    environment: Environment,
    requests: Vec<Arc<Request>>,
    legs: BTreeMap<String, Leg>,
    bus: Arc<EventBus>,
}

impl Batch {
    pub fn group(&self) -> &RequestGroup {
        &self.group
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Requests of the group with their dependency ids filled in.
    pub fn requests(&self) -> &[Arc<Request>] {
        &self.requests
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    pub fn max_dependency_count(&self) -> usize {
        self.requests
            .iter()
            .map(|r| r.dependency_ids.len())
            .max()
            .unwrap_or(0)
    }

    /// Observe the run's events. Must be called before [`Batch::run`].
    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// Start every leg and wait until each request has reported once.
    ///
    /// Records come back in no particular order. A fatal error aborts the
    /// run and discards the records collected so far; legs already sending
    /// are not cancelled. If some dependency never finishes this future
    /// never resolves.
    pub async fn run(self) -> Result<Vec<CompletionRecord>, RunError> {
        let Batch { legs, bus, .. } = self;

        let mut completions = CompletionMap::new(legs.len());
        let mut events = bus.subscribe();
        let mut tasks = JoinSet::new();
        for (request_id, leg) in legs {
            tasks.spawn(async move { (request_id, leg.run().await) });
        }

        bus.publish(Event::Start);

        let outcome = loop {
            if completions.is_done() {
                break Ok(());
            }

            tokio::select! {
                event = events.recv() => match event {
                    Some(Event::RequestFinish(record)) => {
                        if !completions.record(record) {
                            debug!("ignoring repeated completion");
                        }
                    }
                    Some(Event::Error(err)) => break Err(RunError::Fatal(err)),
                    Some(Event::Start) => {}
                    None => break Err(RunError::BusClosed),
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => match joined {
                    Ok((request_id, state)) if !state.is_terminal() => {
                        debug!(request_id = %request_id, ?state, "leg stopped before finishing");
                    }
                    Ok(_) => {}
                    Err(err) => {
                        break Err(RunError::Fatal(Arc::new(FatalError::LegPanicked(
                            err.to_string(),
                        ))));
                    }
                },
            }
        };

        bus.close();
        tasks.detach_all();
        outcome.map(|()| completions.into_records())
    }
}
