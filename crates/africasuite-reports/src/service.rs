use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use futures::FutureExt;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use africasuite_core::models::job::{GenerationJob, JobPriority};
use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::report::{Artifact, GeneratedReport, ReportMetadata};
use africasuite_core::models::template::{OutputFormat, ReportTemplate};
use africasuite_export::styles::DocumentStyles;
use africasuite_templates::TemplateRegistry;

use crate::cache::{cache_key, CacheStats, ReportCache};
use crate::clock::{Clock, SystemClock};
use crate::config::ReportsConfig;
use crate::error::ReportError;
use crate::persist::save_artifact;
use crate::queue::JobQueue;
use crate::synth::{summarize_period, DataSource, MockDataSource};

/// A rendered report and whether it came out of the cache.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub report: GeneratedReport,
    pub artifact: Arc<Artifact>,
    pub cached: bool,
}

/// One entry of a batch. `format` falls back to the template's default.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub template_id: String,
    #[serde(default)]
    pub parameters: ParameterValues,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Entry point of the report pipeline.
///
/// Synchronous generation goes straight through synthesis, rendering and the
/// cache. Queued generation goes through the [`JobQueue`] and is picked up by
/// the workers started with [`ReportService::start_workers`].
pub struct ReportService<D: DataSource = MockDataSource> {
    registry: Arc<TemplateRegistry>,
    data_source: Arc<D>,
    cache: ReportCache,
    queue: JobQueue,
    styles: DocumentStyles,
    config: ReportsConfig,
    clock: Arc<dyn Clock>,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<D: DataSource> ReportService<D> {
    pub fn new(registry: Arc<TemplateRegistry>, data_source: D, config: ReportsConfig) -> Self {
        Self::with_clock(registry, data_source, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        registry: Arc<TemplateRegistry>,
        data_source: D,
        config: ReportsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            registry,
            data_source: Arc::new(data_source),
            cache: ReportCache::new(
                Arc::clone(&clock),
                config.cache_ttl(),
                config.cache_max_entries,
            ),
            queue: JobQueue::new(Arc::clone(&clock)),
            styles: DocumentStyles::default(),
            config,
            clock,
            shutdown,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn list_templates(&self) -> &[ReportTemplate] {
        self.registry.list_templates()
    }

    pub fn get_template(&self, id: &str) -> Result<&ReportTemplate, ReportError> {
        Ok(self.registry.get_template(id)?)
    }

    /// Synthesize and render a report now.
    ///
    /// `format` defaults to the template's. Declared defaults are filled in
    /// before the cache key is computed, so omitting a defaulted parameter and
    /// passing its default hit the same entry.
    pub async fn generate_report(
        &self,
        template_id: &str,
        parameters: ParameterValues,
        format: Option<OutputFormat>,
        use_cache: bool,
    ) -> Result<ReportOutput, ReportError> {
        let template = self.registry.get_template(template_id)?.clone();
        let format = format.unwrap_or(template.default_format);
        let parameters = template.resolve_parameters(parameters);
        template.require_parameters(&parameters)?;

        let use_cache = use_cache && self.config.cache_enabled;
        let key = cache_key(&template.id, format, &parameters);
        if use_cache && let Some(entry) = self.cache.get(&key).await {
            info!(template_id, format = %format, key = %key, "report served from cache");
            return Ok(ReportOutput {
                report: entry.report.clone(),
                artifact: Arc::clone(&entry.artifact),
                cached: true,
            });
        }

        info!(template_id, format = %format, "generating report");
        let data = self.data_source.synthesize(&template, &parameters).await?;
        let report = GeneratedReport {
            id: Uuid::new_v4(),
            template_id: template.id.clone(),
            title: template.name.clone(),
            format,
            metadata: ReportMetadata {
                generated_at: self.clock.now(),
                generated_by: self.config.generated_by.clone(),
                date_range: summarize_period(&parameters),
                currency: self.config.currency.clone(),
                organization: self.config.organization.clone(),
            },
            parameters,
            data,
        };

        let styles = self.styles.clone();
        let (report, artifact) = tokio::task::spawn_blocking(move || {
            let artifact = africasuite_export::render(&template, &report, format, &styles)?;
            Ok::<_, ReportError>((report, artifact))
        })
        .await
        .map_err(|e| ReportError::TaskFailed(e.to_string()))??;
        let artifact = Arc::new(artifact);

        info!(
            template_id,
            report_id = %report.id,
            file_name = %artifact.file_name,
            bytes = artifact.len(),
            "report generated"
        );

        if use_cache {
            self.cache
                .put(key, report.clone(), Arc::clone(&artifact))
                .await;
        }

        Ok(ReportOutput {
            report,
            artifact,
            cached: false,
        })
    }

    /// Queue a report for a background worker. Unknown templates are rejected
    /// here rather than when the job runs.
    pub async fn queue_report_generation(
        &self,
        template_id: &str,
        parameters: ParameterValues,
        format: Option<OutputFormat>,
        priority: JobPriority,
    ) -> Result<Uuid, ReportError> {
        let template = self.registry.get_template(template_id)?;
        let format = format.unwrap_or(template.default_format);
        Ok(self
            .queue
            .enqueue(template_id, parameters, format, priority)
            .await)
    }

    pub async fn get_job_status(&self, id: Uuid) -> Result<GenerationJob, ReportError> {
        self.queue.status(id).await
    }

    /// The artifact of a completed job; `None` while it is pending, running or failed.
    pub async fn get_job_result(&self, id: Uuid) -> Result<Option<Arc<Artifact>>, ReportError> {
        self.queue.result(id).await
    }

    pub async fn list_jobs(&self) -> Vec<GenerationJob> {
        self.queue.jobs().await
    }

    /// Generate every request concurrently. One failure never affects the
    /// others; results come back in request order.
    pub async fn generate_batch_reports(
        &self,
        requests: Vec<BatchRequest>,
    ) -> Vec<Result<ReportOutput, ReportError>> {
        info!(count = requests.len(), "generating report batch");
        let runs = requests.into_iter().map(|request| async move {
            let outcome = self
                .generate_report(
                    &request.template_id,
                    request.parameters,
                    request.format,
                    true,
                )
                .await;
            if let Err(e) = &outcome {
                warn!(template_id = %request.template_id, error = %e, "batch entry failed");
            }
            outcome
        });
        join_all(runs).await
    }

    /// Write an artifact to `dir`, or the configured output directory.
    pub async fn save_report(
        &self,
        report: &GeneratedReport,
        artifact: &Artifact,
        dir: Option<&Path>,
    ) -> Result<PathBuf, ReportError> {
        let dir = dir.unwrap_or(self.config.output_dir.as_path());
        let today = self.clock.now().to_zoned(TimeZone::UTC).date();
        save_artifact(dir, report, artifact, today).await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Drop expired cache entries and finished jobs past retention.
    /// Returns (cache entries removed, jobs removed).
    pub async fn sweep(&self) -> (usize, usize) {
        let evicted = self.cache.sweep().await;
        let retention =
            SignedDuration::try_from(self.config.job_retention()).unwrap_or(SignedDuration::MAX);
        let cutoff = self
            .clock
            .now()
            .checked_sub(retention)
            .unwrap_or(Timestamp::MIN);
        let pruned = self.queue.prune_finished(cutoff).await;
        debug!(evicted, pruned, "sweep finished");
        (evicted, pruned)
    }

    /// Run one claimed job and record its outcome. A panic anywhere in the
    /// pipeline fails the job instead of unwinding the worker.
    async fn process(&self, job: GenerationJob) {
        let run = self.generate_report(
            &job.template_id,
            job.parameters.clone(),
            Some(job.format),
            true,
        );
        let outcome = match AssertUnwindSafe(run).catch_unwind().await {
            Ok(result) => result
                .map(|output| (output.report, output.artifact))
                .map_err(|e| e.to_string()),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(job_id = %job.id, panic = %message, "report generation panicked");
                Err(format!("generation panicked: {message}"))
            }
        };
        self.queue.complete(job.id, outcome).await;
    }

    fn track(&self, handle: JoinHandle<()>) {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(handle);
    }

    /// Start `count` workers draining the job queue.
    pub fn start_workers(self: &Arc<Self>, count: usize) {
        for worker in 0..count {
            let service = Arc::clone(self);
            let mut shutdown = self.shutdown.subscribe();
            self.track(tokio::spawn(async move {
                info!(worker, "report worker started");
                loop {
                    let stopping = *shutdown.borrow();
                    if stopping {
                        break;
                    }
                    let job = tokio::select! {
                        _ = shutdown.changed() => break,
                        job = service.queue.next_job() => job,
                    };
                    service.process(job).await;
                }
                info!(worker, "report worker stopped");
            }));
        }
    }

    /// Run [`ReportService::sweep`] every `sweep_interval_secs`.
    pub fn spawn_sweeper(self: &Arc<Self>) {
        let service = Arc::clone(self);
        let mut shutdown = self.shutdown.subscribe();
        let period = self.config.sweep_interval();
        self.track(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = ticker.tick() => {
                        service.sweep().await;
                    }
                }
            }
            debug!("cache sweeper stopped");
        }));
    }

    /// Workers per config plus the sweeper.
    pub fn start(self: &Arc<Self>) {
        self.start_workers(self.config.workers);
        self.spawn_sweeper();
    }

    /// Signal background tasks and wait for them. A worker finishes its
    /// current job first.
    pub async fn shutdown(&self) {
        self.shutdown.send_replace(true);
        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(|e| e.into_inner()));
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "background task ended abnormally");
            }
        }
        info!("report service stopped");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
