//! # Convention Mapper
//!
//! Reference mapper that pairs fields by name instead of by hand-written assignments.
//!
//! The plan is computed once from the JSON shape of `S::default()` and `D::default()`. Each call
//! then round-trips both values through [`serde_json::Value`], which makes it the slow baseline
//! the explicit mappers are measured against.

use fxhash::{FxHashMap, FxHashSet};
use omap::mapper::Mapper;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{HarnessError, HarnessErrorExt};

/// One planned member copy.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Member {
    destination: String,
    source: String,
}

/// Name-matching mapper configured through [`ConventionMapper::builder`].
///
/// ```rust
/// use omap::mapper::Mapper;
/// use omap_harness::ConventionMapper;
///
/// #[derive(Default, serde::Serialize, serde::Deserialize)]
/// struct Source { name: String, count32: i32 }
/// #[derive(Default, serde::Serialize, serde::Deserialize)]
/// struct Target { name: String, count64: i64, audit: u64 }
///
/// let mapper = ConventionMapper::<Source, Target>::builder()
///     .member("count64", "count32")
///     .build()
///     .unwrap();
/// assert_eq!(mapper.unmatched(), ["audit"]);
///
/// let mut target = Target { audit: 9, ..Target::default() };
/// mapper.map(&Source { name: "a".into(), count32: 5 }, &mut target).unwrap();
/// assert_eq!((target.name.as_str(), target.count64, target.audit), ("a", 5, 9));
/// ```
pub struct ConventionMapper<S, D> {
    plan: Vec<Member>,
    unmatched: Vec<String>,
    _marker: PhantomData<fn(&S, &mut D)>,
}

impl<S, D> fmt::Debug for ConventionMapper<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionMapper")
            .field("plan", &self.plan)
            .field("unmatched", &self.unmatched)
            .finish()
    }
}

impl<S, D> ConventionMapper<S, D>
where
    S: Serialize + Default,
    D: Serialize + DeserializeOwned + Default,
{
    #[must_use = "builders do nothing unless you call .build()"]
    pub fn builder() -> ConventionMapperBuilder<S, D> {
        ConventionMapperBuilder {
            members: FxHashMap::default(),
            ignored: FxHashSet::default(),
            _marker: PhantomData,
        }
    }

    /// Destination members that received no source member, sorted by name.
    #[must_use]
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Number of member copies performed per call.
    #[must_use]
    pub const fn planned(&self) -> usize {
        self.plan.len()
    }
}

impl<S, D> Mapper<S, D> for ConventionMapper<S, D>
where
    S: Serialize,
    D: Serialize + DeserializeOwned,
{
    type Error = HarnessError;

    fn map(&self, source: &S, destination: &mut D) -> Result<(), HarnessError> {
        let source = object(serde_json::to_value(source)?, "source")?;
        let mut target = object(serde_json::to_value(&*destination)?, "destination")?;

        for member in &self.plan {
            if let Some(value) = source.get(&member.source) {
                target.insert(member.destination.clone(), value.clone());
            }
        }

        *destination = serde_json::from_value(Value::Object(target))
            .context("Failed to rebuild destination")?;
        Ok(())
    }
}

/// Configures member overrides and ignores for a [`ConventionMapper`].
pub struct ConventionMapperBuilder<S, D> {
    members: FxHashMap<String, String>,
    ignored: FxHashSet<String>,
    _marker: PhantomData<fn(&S, &mut D)>,
}

impl<S, D> fmt::Debug for ConventionMapperBuilder<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionMapperBuilder")
            .field("members", &self.members)
            .field("ignored", &self.ignored)
            .finish()
    }
}

impl<S, D> ConventionMapperBuilder<S, D>
where
    S: Serialize + Default,
    D: Serialize + DeserializeOwned + Default,
{
    /// Fills `destination` from `source` instead of the same-named source member.
    #[must_use]
    pub fn member(mut self, destination: impl Into<String>, source: impl Into<String>) -> Self {
        self.members.insert(destination.into(), source.into());
        self
    }

    /// Leaves `destination` out of the plan without reporting it as unmatched.
    #[must_use]
    pub fn ignore(mut self, destination: impl Into<String>) -> Self {
        self.ignored.insert(destination.into());
        self
    }

    /// Computes the member plan.
    ///
    /// # Errors
    /// Returns [`HarnessError::Convention`] if either shape is not a JSON object, an override
    /// names a member that does not exist, or an override pairs members of different kinds.
    pub fn build(self) -> Result<ConventionMapper<S, D>, HarnessError> {
        let source = object(serde_json::to_value(S::default())?, "source")?;
        let destination = object(serde_json::to_value(D::default())?, "destination")?;

        for (dest, src) in &self.members {
            if !destination.contains_key(dest) {
                return Err(convention(format!("unknown destination member `{dest}`")));
            }
            if !source.contains_key(src) {
                return Err(convention(format!("unknown source member `{src}`")));
            }
        }
        if let Some(name) = self.ignored.iter().find(|name| !destination.contains_key(*name)) {
            return Err(convention(format!("cannot ignore unknown member `{name}`")));
        }

        let mut plan = Vec::new();
        let mut unmatched = Vec::new();

        for (name, value) in &destination {
            if self.ignored.contains(name) {
                continue;
            }
            let overridden = self.members.get(name);
            let source_name = overridden.unwrap_or(name);

            match source.get(source_name) {
                Some(candidate) if same_kind(candidate, value) => {
                    plan.push(Member { destination: name.clone(), source: source_name.clone() });
                },
                Some(candidate) if overridden.is_some() => {
                    return Err(convention(format!(
                        "`{source_name}` ({}) cannot fill `{name}` ({})",
                        kind(candidate),
                        kind(value)
                    )));
                },
                _ => unmatched.push(name.clone()),
            }
        }

        debug!(planned = plan.len(), unmatched = ?unmatched, "Convention mapper planned");
        Ok(ConventionMapper { plan, unmatched, _marker: PhantomData })
    }
}

fn object(value: Value, role: &str) -> Result<Map<String, Value>, HarnessError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(convention(format!("{role} serializes to {}, expected an object", kind(&other)))),
    }
}

/// `null` (e.g. an unset `Option`) pairs with any kind.
fn same_kind(a: &Value, b: &Value) -> bool {
    a.is_null() || b.is_null() || kind(a) == kind(b)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn convention(message: String) -> HarnessError {
    HarnessError::Convention { message: message.into(), context: None }
}
