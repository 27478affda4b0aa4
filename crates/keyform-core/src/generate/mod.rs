//! Module: generate
//! Responsibility: auto-generated attribute values (ids, timestamps).
//! Does not own: when generation runs; callers apply it explicitly before
//! handing an instance to the transforms, which only copy values.


use crate::{model::EntityModel, record::Record, value::Value};
use serde::Serialize;
use thiserror::Error as ThisError;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use ulid::Ulid;

///
/// GenerateError
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("cannot format timestamp for attribute '{attribute}': {source}")]
    Format {
        attribute: String,
        #[source]
        source: time::error::Format,
    },
}

///
/// GenerateStrategy
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum GenerateStrategy {
    /// Unix time in milliseconds.
    EpochMillis,
    /// Unix time in seconds.
    EpochSeconds,
    /// RFC 3339 timestamp text.
    IsoDate,
    /// Lexicographically sortable id text.
    Ulid,
}

///
/// AutoGenerate
///
/// `auto_update` regenerates the value on every update, not only on create
/// (e.g. an `updatedAt` timestamp).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AutoGenerate {
    pub strategy: GenerateStrategy,
    pub auto_update: bool,
}

impl AutoGenerate {
    #[must_use]
    pub const fn on_create(strategy: GenerateStrategy) -> Self {
        Self {
            strategy,
            auto_update: false,
        }
    }

    #[must_use]
    pub const fn on_update(strategy: GenerateStrategy) -> Self {
        Self {
            strategy,
            auto_update: true,
        }
    }
}

///
/// GenerateContext
///
/// Inputs for generation. Supplied by the caller so generation stays pure:
/// the same context always produces the same values.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenerateContext {
    pub now: OffsetDateTime,
    /// Random bits for id strategies; only the low 80 bits are used.
    pub entropy: u128,
}

impl GenerateContext {
    #[must_use]
    pub const fn new(now: OffsetDateTime, entropy: u128) -> Self {
        Self { now, entropy }
    }

    // Pre-epoch instants clamp to zero.
    fn unix_millis(&self) -> u64 {
        let millis = self.now.unix_timestamp_nanos() / 1_000_000;

        u64::try_from(millis).unwrap_or(0)
    }
}

/// Produce one value for `strategy`.
pub fn generate(
    attribute: &str,
    strategy: GenerateStrategy,
    ctx: &GenerateContext,
) -> Result<Value, GenerateError> {
    let value = match strategy {
        GenerateStrategy::EpochMillis => Value::Uint(ctx.unix_millis()),
        GenerateStrategy::EpochSeconds => Value::Int(ctx.now.unix_timestamp()),
        GenerateStrategy::IsoDate => {
            let text = ctx
                .now
                .format(&Rfc3339)
                .map_err(|source| GenerateError::Format {
                    attribute: attribute.to_string(),
                    source,
                })?;

            Value::Text(text)
        }
        GenerateStrategy::Ulid => {
            Value::Text(Ulid::from_parts(ctx.unix_millis(), ctx.entropy).to_string())
        }
    };

    Ok(value)
}

/// Fill every auto-generated attribute that is not already defined.
/// Returns the number of attributes written.
pub fn apply_on_create(
    model: &EntityModel,
    attributes: &mut Record,
    ctx: &GenerateContext,
) -> Result<usize, GenerateError> {
    let mut written = 0;

    for attr in &model.attributes {
        let Some(auto) = attr.auto_generate else {
            continue;
        };
        if attributes.get_defined(&attr.name).is_some() {
            continue;
        }

        let value = generate(&attr.name, auto.strategy, ctx)?;
        attributes.set(attr.name.clone(), value);
        written += 1;
    }

    Ok(written)
}

/// Overwrite every attribute flagged `auto_update`.
/// Returns the number of attributes written.
pub fn apply_on_update(
    model: &EntityModel,
    diff: &mut Record,
    ctx: &GenerateContext,
) -> Result<usize, GenerateError> {
    let mut written = 0;

    for attr in &model.attributes {
        let Some(auto) = attr.auto_generate.filter(|auto| auto.auto_update) else {
            continue;
        };

        let value = generate(&attr.name, auto.strategy, ctx)?;
        diff.set(attr.name.clone(), value);
        written += 1;
    }

    Ok(written)
}
