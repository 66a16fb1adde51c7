//! Identifier and creation-date normalisation.
//!
//! Glozz ids have the form `<author>_<date>` and every annotation records
//! its creation date in its metadata. Renumbering those dates consistently
//! lets two documents that differ only in when they were annotated compare
//! equal.
//!
//! Normalisation is two-pass: every date is collected (in declared order:
//! units, relations, schemas) and the mapping computed before anything is
//! rewritten, so each rewrite reads an original value.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use crate::document::{CREATION_DATE, Document, Metadata, Relation, Schema, Unit};
use crate::document::{join_anno_id, split_anno_id};
use crate::error::{GlozzError, Result};

/// How dates are renumbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NormalizeMode {
    /// Distinct dates become `start`, `start + 1`, ... in first-seen order.
    #[default]
    Count,
    /// Every date becomes `0`.
    Zero,
    /// Non-negative dates are kept; negative ones become `-start`,
    /// `-(start + 1)`, ... in first-seen order.
    NegOnly,
}

impl NormalizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeMode::Count => "count",
            NormalizeMode::Zero => "zero",
            NormalizeMode::NegOnly => "negonly",
        }
    }
}

impl fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "count" => Ok(NormalizeMode::Count),
            "zero" => Ok(NormalizeMode::Zero),
            "negonly" => Ok(NormalizeMode::NegOnly),
            other => Err(format!(
                "unknown normalisation mode {:?} (expected count, zero or negonly)",
                other
            )),
        }
    }
}

/// Original date (canonical decimal form) to replacement date, in the order
/// the original dates were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateMapping {
    map: IndexMap<String, String>,
}

impl DateMapping {
    pub fn get(&self, date: &str) -> Option<&str> {
        self.map.get(date).map(String::as_str)
    }

    /// Look up a parsed date. `007` and `7` resolve to the same entry.
    pub fn lookup_date(&self, date: i64) -> Option<&str> {
        self.get(&date.to_string())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Compute the replacement for every distinct date in `dates`.
///
/// In `negonly` mode a renumbered negative date may land on a non-negative
/// date that is kept as itself (only when `start <= 0`); that is reported as
/// [`GlozzError::DateCollision`].
pub fn compute_date_mapping(dates: &[i64], mode: NormalizeMode, start: i64) -> Result<DateMapping> {
    let mut map = IndexMap::new();
    let mut negatives: i64 = 0;
    let overflow =
        || GlozzError::Overflow(format!("renumbering dates from {} in {} mode", start, mode));

    for &date in dates {
        let key = date.to_string();
        if map.contains_key(&key) {
            continue;
        }
        let value = match mode {
            NormalizeMode::Zero => "0".to_string(),
            NormalizeMode::Count => i64::try_from(map.len())
                .ok()
                .and_then(|seen| start.checked_add(seen))
                .ok_or_else(overflow)?
                .to_string(),
            NormalizeMode::NegOnly if date >= 0 => key.clone(),
            NormalizeMode::NegOnly => {
                let renumbered = start
                    .checked_add(negatives)
                    .and_then(i64::checked_neg)
                    .ok_or_else(overflow)?;
                negatives += 1;
                renumbered.to_string()
            }
        };
        map.insert(key, value);
    }

    if mode == NormalizeMode::NegOnly {
        check_collisions(&map)?;
    }

    Ok(DateMapping { map })
}

fn check_collisions(map: &IndexMap<String, String>) -> Result<()> {
    let mut claimed: HashMap<&str, &str> = HashMap::new();
    for (original, replacement) in map {
        if let Some(first) = claimed.insert(replacement.as_str(), original.as_str()) {
            // keys are canonical integers
            let parse = |s: &str| s.parse::<i64>().unwrap_or_default();
            return Err(GlozzError::DateCollision {
                date: replacement.clone(),
                first: parse(first),
                second: parse(original),
            });
        }
    }
    Ok(())
}

/// Renumber the creation dates of `document` and the dates embedded in its
/// ids, relation terms and schema members.
pub fn normalize(document: &Document, mode: NormalizeMode, start: i64) -> Result<Document> {
    // Pass 1: collect dates, validate ids
    let mut dates = Vec::new();
    for item in document.annotations() {
        split_anno_id(item.id())?;
        for reference in item.references() {
            split_anno_id(reference)?;
        }
        if let Some(value) = item.metadata().creation_date() {
            dates.push(parse_date(item.id(), value)?);
        }
    }
    let mapping = compute_date_mapping(&dates, mode, start)?;
    debug!(%mode, start, dates = mapping.len(), "computed date mapping");

    // Pass 2: rewrite
    let units = document
        .units
        .iter()
        .map(|unit| {
            Ok(Unit {
                id: rewrite_id(&unit.id, &mapping)?,
                metadata: rewrite_metadata(&unit.id, &unit.metadata, &mapping)?,
                ..unit.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let relations = document
        .relations
        .iter()
        .map(|relation| {
            Ok(Relation {
                id: rewrite_id(&relation.id, &mapping)?,
                metadata: rewrite_metadata(&relation.id, &relation.metadata, &mapping)?,
                source: rewrite_id(&relation.source, &mapping)?,
                target: rewrite_id(&relation.target, &mapping)?,
                ..relation.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let schemas = document
        .schemas
        .iter()
        .map(|schema| {
            let rewrite_all = |ids: &[String]| {
                ids.iter()
                    .map(|id| rewrite_id(id, &mapping))
                    .collect::<Result<Vec<_>>>()
            };
            Ok(Schema {
                id: rewrite_id(&schema.id, &mapping)?,
                metadata: rewrite_metadata(&schema.id, &schema.metadata, &mapping)?,
                units: rewrite_all(&schema.units)?,
                relations: rewrite_all(&schema.relations)?,
                schemas: rewrite_all(&schema.schemas)?,
                ..schema.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Document {
        units,
        relations,
        schemas,
        ..document.clone()
    })
}

fn parse_date(id: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| GlozzError::MalformedDate {
            id: id.to_string(),
            value: value.to_string(),
        })
}

fn rewrite_id(id: &str, mapping: &DateMapping) -> Result<String> {
    let (prefix, date) = split_anno_id(id)?;
    let mapped = mapping
        .lookup_date(date)
        .ok_or_else(|| GlozzError::UnmappedDate {
            id: id.to_string(),
            date: date.to_string(),
        })?;
    Ok(join_anno_id(prefix, mapped))
}

fn rewrite_metadata(id: &str, metadata: &Metadata, mapping: &DateMapping) -> Result<Metadata> {
    let mut metadata = metadata.clone();
    if let Some(value) = metadata.creation_date() {
        let date = parse_date(id, value)?;
        let mapped = mapping
            .lookup_date(date)
            .ok_or_else(|| GlozzError::UnmappedDate {
                id: id.to_string(),
                date: date.to_string(),
            })?
            .to_string();
        metadata.set(CREATION_DATE, mapped);
    }
    Ok(metadata)
}
