use chrono::{DateTime, TimeDelta};
use omap::factory;
use omap::mapper::{AsyncMapper, Mapper, MapperExt};
use omap::models::{
    AccountRecord, AccountRecordMapper, AccountSource, AccountView, AccountViewMapper,
    StaticLabels,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::convention::ConventionMapper;
use crate::error::{HarnessError, HarnessErrorExt};

pub const EXPLICIT_MAPPER: &str = "explicit_mapper";
pub const CONVENTION_MAPPER: &str = "convention_mapper";
pub const FACTORY_CREATE: &str = "factory_create_instance";
pub const CONSTRUCTOR_CREATE: &str = "constructor_create";
pub const DIRECT_DEFAULT: &str = "direct_default";
pub const ASYNC_MAPPER: &str = "async_mapper";

const SAMPLE_CREATED_SECS: i64 = 1_704_067_200;
const SAMPLE_TEXT: &str = "hello";
const SAMPLE_LABEL: &str = "Hello Account";

/// Timing of one measured case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    pub iterations: u64,
    pub total_ns: u64,
    pub ns_per_op: f64,
    /// Cost relative to [`EXPLICIT_MAPPER`] (`1.0` for the baseline itself).
    pub relative: f64,
}

/// Result of a [`Harness::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub iterations: u64,
    pub warmup: u64,
    pub concurrency: usize,
    pub cases: Vec<CaseReport>,
}

impl Report {
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|case| case.name == name)
    }

    /// # Errors
    /// Returns [`HarnessError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Emits one `info` event per case.
    pub fn log(&self) {
        for case in &self.cases {
            info!(
                case = %case.name,
                ns_per_op = format_args!("{:.1}", case.ns_per_op),
                relative = format_args!("{:.2}x", case.relative),
                "Case measured"
            );
        }
    }

    fn relate_to_baseline(&mut self) {
        let baseline = self.case(EXPLICIT_MAPPER).map_or(0.0, |case| case.ns_per_op);
        let baseline = baseline.max(f64::EPSILON);
        for case in &mut self.cases {
            case.relative = case.ns_per_op / baseline;
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<26} {:>12} {:>12} {:>10}", "case", "iterations", "ns/op", "relative")?;
        for case in &self.cases {
            writeln!(
                f,
                "{:<26} {:>12} {:>12.1} {:>9.2}x",
                case.name, case.iterations, case.ns_per_op, case.relative
            )?;
        }
        Ok(())
    }
}

/// Measures the explicit mappers against the convention mapper and the factory paths.
#[derive(Debug)]
pub struct Harness;

impl Harness {
    /// Verifies both mappers agree on the sample, then measures every case.
    ///
    /// Builds its own multi-threaded runtime for the async case, so it must not be called
    /// from inside another tokio runtime.
    ///
    /// # Errors
    /// * [`HarnessError::Config`] if `config` is invalid.
    /// * [`HarnessError::Mismatch`] if the mappers disagree on the sample.
    /// * [`HarnessError::Runtime`] if the async runtime cannot start.
    /// * Any mapping error raised during measurement.
    pub fn run(config: &HarnessConfig) -> Result<Report, HarnessError> {
        config.validate()?;

        let source = sample_source();
        let explicit = AccountRecordMapper;
        let convention = record_convention()?;
        verify(&explicit, &convention, &source)?;

        let mut record = AccountRecord::default();
        let constructor = factory::constructor::<AccountRecord>();

        let mut cases = vec![
            measure(EXPLICIT_MAPPER, config, || explicit.map(black_box(&source), &mut record))?,
            measure(CONVENTION_MAPPER, config, || {
                convention.map(black_box(&source), &mut record)
            })?,
            measure(FACTORY_CREATE, config, || {
                black_box(factory::create_instance::<AccountRecord>());
                Ok::<_, HarnessError>(())
            })?,
            measure(CONSTRUCTOR_CREATE, config, || {
                black_box(constructor.create());
                Ok::<_, HarnessError>(())
            })?,
            measure(DIRECT_DEFAULT, config, || {
                black_box(AccountRecord::default());
                Ok::<_, HarnessError>(())
            })?,
        ];

        let runtime = runtime(config.concurrency)?;
        cases.push(measure_async(&runtime, config)?);

        let mut report = Report {
            iterations: config.iterations,
            warmup: config.warmup,
            concurrency: config.concurrency,
            cases,
        };
        report.relate_to_baseline();
        Ok(report)
    }
}

/// Sample input shared by verification, measurement and benches.
#[must_use]
pub fn sample_source() -> AccountSource {
    AccountSource {
        flag: true,
        created: (DateTime::UNIX_EPOCH + TimeDelta::seconds(SAMPLE_CREATED_SECS)).fixed_offset(),
        count32: 42,
        text: SAMPLE_TEXT.to_owned(),
    }
}

/// Convention counterpart of [`AccountRecordMapper`].
///
/// # Errors
/// Returns [`HarnessError::Convention`] if the record shapes cannot be planned.
pub fn record_convention() -> Result<ConventionMapper<AccountSource, AccountRecord>, HarnessError> {
    ConventionMapper::builder().member("count64", "count32").ignore("revision").build()
}

/// Label table used by the async case.
#[must_use]
pub fn sample_labels() -> StaticLabels {
    StaticLabels::new().with_label(SAMPLE_TEXT, SAMPLE_LABEL)
}

/// Checks that `explicit` and `convention` produce identical destinations for `source`.
///
/// # Errors
/// Returns [`HarnessError::Mismatch`] if they differ, or the mapping error of either mapper.
pub fn verify<E, C>(explicit: &E, convention: &C, source: &AccountSource) -> Result<(), HarnessError>
where
    E: Mapper<AccountSource, AccountRecord>,
    C: Mapper<AccountSource, AccountRecord>,
    HarnessError: From<E::Error> + From<C::Error>,
{
    let expected: AccountRecord = explicit.map_new(source)?;
    let actual: AccountRecord = convention.map_new(source)?;

    if expected != actual {
        return Err(HarnessError::Mismatch {
            message: format!("explicit {expected:?} != convention {actual:?}").into(),
            context: None,
        });
    }
    debug!("Explicit and convention mappers agree on the sample");
    Ok(())
}

fn measure<E>(
    name: &str,
    config: &HarnessConfig,
    mut op: impl FnMut() -> Result<(), E>,
) -> Result<CaseReport, HarnessError>
where
    HarnessError: From<E>,
{
    debug!(case = name, warmup = config.warmup, "Warming up");
    for _ in 0..config.warmup {
        op()?;
    }

    let started = Instant::now();
    for _ in 0..config.iterations {
        op()?;
    }
    Ok(case_report(name, config.iterations, started.elapsed()))
}

fn measure_async(runtime: &Runtime, config: &HarnessConfig) -> Result<CaseReport, HarnessError> {
    let mapper = Arc::new(AccountViewMapper::new(sample_labels()));
    let tasks = config.concurrency as u64;
    let (per_task, scheduled) = split_rounds(config.iterations, tasks);
    let (warmup_per_task, _) = split_rounds(config.warmup, tasks);

    runtime.block_on(async {
        debug!(case = ASYNC_MAPPER, tasks, per_task, "Warming up");
        drive(&mapper, config.concurrency, warmup_per_task).await?;

        let started = Instant::now();
        drive(&mapper, config.concurrency, per_task).await?;
        Ok(case_report(ASYNC_MAPPER, scheduled, started.elapsed()))
    })
}

/// Runs `tasks` concurrent tasks, each mapping its own pair `rounds` times.
async fn drive(
    mapper: &Arc<AccountViewMapper<StaticLabels>>,
    tasks: usize,
    rounds: u64,
) -> Result<(), HarnessError> {
    let mut set = JoinSet::new();

    for task in 0..tasks {
        let mapper = Arc::clone(mapper);
        let mut source = sample_source();
        source.count32 = i32::try_from(task).unwrap_or(i32::MAX);

        set.spawn(async move {
            let mut view = AccountView::default();
            for _ in 0..rounds {
                mapper.map_async(&source, &mut view).await?;
            }
            Ok::<_, HarnessError>((source.count32, view))
        });
    }

    while let Some(joined) = set.join_next().await {
        let (count32, view) = joined.map_err(|e| HarnessError::from(e.to_string()))??;
        if rounds > 0 && view.count64 != i64::from(count32) {
            return Err(HarnessError::Mismatch {
                message: format!("task for {count32} observed {}", view.count64).into(),
                context: Some("async pairs interfered".into()),
            });
        }
    }
    Ok(())
}

/// Spreads `total` rounds over `tasks`, rounding up; returns rounds per task and rounds overall.
fn split_rounds(total: u64, tasks: u64) -> (u64, u64) {
    let per_task = total.div_ceil(tasks.max(1));
    (per_task, per_task.saturating_mul(tasks))
}

/// Worker threads for `concurrency` tasks, capped at the available parallelism.
fn worker_threads(concurrency: usize) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    concurrency.clamp(1, cores)
}

fn runtime(concurrency: usize) -> Result<Runtime, HarnessError> {
    let workers = worker_threads(concurrency);
    debug!(concurrency, workers, "Starting async runtime");

    Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_time()
        .build()
        .context("Failed to start async runtime")
}

fn case_report(name: &str, iterations: u64, elapsed: Duration) -> CaseReport {
    let total_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
    CaseReport {
        name: name.to_owned(),
        iterations,
        total_ns,
        ns_per_op: total_ns as f64 / iterations.max(1) as f64,
        relative: 0.0,
    }
}
