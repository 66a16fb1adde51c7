//! Renaming a single annotation and repointing everything that refers to it.

use tracing::debug;

use crate::document::{AUTHOR, CREATION_DATE, Document, Metadata};
use crate::document::{join_anno_id, split_anno_id};
use crate::error::{GlozzError, Result};

/// Give the annotation `source` a new id.
///
/// Without an explicit `target` the new id keeps the source's author and
/// takes a date one past the latest date used by any id in the document.
/// The renamed annotation's author and creation date follow the new id;
/// relation terms and schema members naming `source` are repointed.
pub fn rename(document: &Document, source: &str, target: Option<&str>) -> Result<Document> {
    if !document.contains_id(source) {
        return Err(GlozzError::UnknownId(source.to_string()));
    }

    let target = match target {
        Some(target) => {
            split_anno_id(target)?;
            if document.contains_id(target) {
                return Err(GlozzError::IdCollision(target.to_string()));
            }
            target.to_string()
        }
        None => fresh_id(document, source)?,
    };
    let (author, date) = split_anno_id(&target)?;

    let retag = |metadata: &Metadata| {
        metadata
            .clone()
            .with(AUTHOR, author)
            .with(CREATION_DATE, date.to_string())
    };
    let repoint = |id: &String| {
        if id == source {
            target.clone()
        } else {
            id.clone()
        }
    };

    let mut out = document.clone();
    for unit in out.units.iter_mut().filter(|u| u.id == source) {
        unit.metadata = retag(&unit.metadata);
        unit.id = target.clone();
    }
    for relation in &mut out.relations {
        if relation.id == source {
            relation.metadata = retag(&relation.metadata);
            relation.id = target.clone();
        }
        relation.source = repoint(&relation.source);
        relation.target = repoint(&relation.target);
    }
    for schema in &mut out.schemas {
        if schema.id == source {
            schema.metadata = retag(&schema.metadata);
            schema.id = target.clone();
        }
        schema.units = schema.units.iter().map(repoint).collect();
        schema.relations = schema.relations.iter().map(repoint).collect();
        schema.schemas = schema.schemas.iter().map(repoint).collect();
    }

    debug!(source, target = %target, "renamed annotation");
    Ok(out)
}

fn fresh_id(document: &Document, source: &str) -> Result<String> {
    let (author, _) = split_anno_id(source)?;
    let latest = document
        .annotations()
        .map(|item| split_anno_id(item.id()).map(|(_, date)| date))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .max()
        .unwrap_or_default();
    let next = latest
        .checked_add(1)
        .ok_or_else(|| GlozzError::Overflow(format!("picking a date after {}", latest)))?;
    Ok(join_anno_id(author, &next.to_string()))
}
