use tracing::{debug, warn};

use buildops_core::TenantId;

use crate::job::Job;
use crate::result::{AnalyticsError, AnalyticsResult, Insight};

/// Tenant scope for execution.
///
/// - `Any`: run jobs for any tenant (useful for shared workers).
/// - `Tenant`: only accept jobs for the specified tenant (page loader for one tenant).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TenantScope {
    Any,
    Tenant(TenantId),
}

impl TenantScope {
    pub fn allows(&self, tenant_id: TenantId) -> bool {
        match self {
            TenantScope::Any => true,
            TenantScope::Tenant(t) => *t == tenant_id,
        }
    }
}

/// Executor for analytics jobs.
///
/// Calculators are pure, so a scheduler only enforces tenant scope and logs.
pub trait Scheduler: Send + Sync + 'static {
    fn scope(&self) -> TenantScope;

    fn run<J: Job>(&self, job: &J) -> AnalyticsResult<Insight> {
        let tenant_id = job.tenant_id();
        if !self.scope().allows(tenant_id) {
            warn!(tenant = %tenant_id, kind = job.kind(), "analytics job rejected by tenant scope");
            return Err(AnalyticsError::TenantScope(format!(
                "job tenant {tenant_id} not allowed by scheduler"
            )));
        }

        debug!(tenant = %tenant_id, kind = job.kind(), "running analytics job");
        match job.run() {
            Ok(insight) => {
                debug!(
                    tenant = %tenant_id,
                    kind = job.kind(),
                    score = insight.score,
                    risk = insight.risk.map(|r| r.as_str()).unwrap_or("n/a"),
                    "analytics job completed"
                );
                Ok(insight)
            }
            Err(e) => {
                warn!(tenant = %tenant_id, kind = job.kind(), error = %e, "analytics job failed");
                Err(e)
            }
        }
    }

    /// Run a batch, keeping per-job outcomes in input order.
    fn run_all<J: Job>(&self, jobs: &[J]) -> Vec<AnalyticsResult<Insight>> {
        jobs.iter().map(|job| self.run(job)).collect()
    }
}

/// Synchronous scheduler that runs jobs immediately in-process.
#[derive(Debug, Copy, Clone)]
pub struct LocalScheduler {
    scope: TenantScope,
}

impl LocalScheduler {
    pub fn new(scope: TenantScope) -> Self {
        Self { scope }
    }

    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self::new(TenantScope::Tenant(tenant_id))
    }
}

impl Scheduler for LocalScheduler {
    fn scope(&self) -> TenantScope {
        self.scope
    }
}
