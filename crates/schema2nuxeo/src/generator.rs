//! Generation pipeline: resolve, select, order, then write the bundle.
//!
//! Output is written to a staging directory next to the target and moved
//! into place only once every file has been written, so a failed run leaves
//! the previous output untouched.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::emitter::contrib::{CoreTypesEmitter, DocTypesEmitter, UiTypesEmitter};
use crate::emitter::xsd::{ListTypesEmitter, SchemaEmitter};
use crate::emitter::{render, XmlEmitter};
use crate::extraction::terms::SchemaTerms;
use crate::extraction::type_tree::{self, CycleError};
use crate::extraction::vocabulary_loader::LoadError;
use crate::model::context::GenerationContext;
use crate::model::nuxeo::{core_types, doc_types, layout, ui_types};
use crate::model::vocabulary::{ResolvedType, Vocabulary};

/// Default root type.
pub const DEFAULT_ROOT_TYPE: &str = "CreativeWork";

const STAGING_PREFIX: &str = ".schema2nuxeo-";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> GenerateError + '_ {
    move |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Generated type ids in generation order.
    pub types: Vec<String>,
    /// Ids registered in the UI contribution.
    pub ui_types: Vec<String>,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Select the subtree under `root` and order it so that every type comes
/// after its selected ancestors.
pub fn select<'t>(
    types: &'t [ResolvedType],
    root: &str,
) -> Result<Vec<&'t ResolvedType>, CycleError> {
    let selected = type_tree::descendants(types, root);
    if selected.is_empty() {
        tracing::warn!("root type {root} matched no types");
    }
    let ordered = type_tree::order_types(&selected)?;
    tracing::info!("selected {} types under {root}", ordered.len());
    Ok(ordered)
}

// ---------------------------------------------------------------------------
// Bundle writing
// ---------------------------------------------------------------------------

fn write_document<E: XmlEmitter>(path: &Path, emitter: &E) -> Result<(), GenerateError> {
    let bytes = render(emitter).map_err(io_err(path))?;
    std::fs::write(path, bytes).map_err(io_err(path))?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

/// Write schemas and contributions for `ordered` under `root_dir`.
pub fn write_bundle(
    root_dir: &Path,
    ordered: &[&ResolvedType],
    context: &GenerationContext,
) -> Result<Summary, GenerateError> {
    let schema_dir = root_dir.join(layout::SCHEMA_DIR);
    let types_dir = root_dir.join(layout::TYPES_DIR);
    for dir in [&schema_dir, &types_dir] {
        std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    }

    let list_types = ListTypesEmitter;
    write_document(&schema_dir.join(list_types.file_name()), &list_types)?;
    for ty in ordered {
        let schema = SchemaEmitter::new(ty, context);
        write_document(&schema_dir.join(schema.file_name()), &schema)?;
    }

    write_document(
        &types_dir.join(core_types::FILE),
        &CoreTypesEmitter::new(ordered),
    )?;
    write_document(
        &types_dir.join(doc_types::FILE),
        &DocTypesEmitter::new(ordered),
    )?;
    let ui = UiTypesEmitter::new(ordered, context);
    write_document(&types_dir.join(ui_types::FILE), &ui)?;

    Ok(Summary {
        types: ordered.iter().map(|ty| ty.id.clone()).collect(),
        ui_types: ui.type_ids().into_iter().map(str::to_string).collect(),
    })
}

/// Run the whole pipeline over a loaded vocabulary and replace `target`
/// with the result.
pub fn generate(
    vocabulary: &Vocabulary,
    context: &GenerationContext,
    root: &str,
    target: &Path,
) -> Result<Summary, GenerateError> {
    let types = SchemaTerms::new(vocabulary).resolve_all()?;
    let ordered = select(&types, root)?;

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(io_err(&parent))?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(&parent)
        .map_err(io_err(&parent))?;

    let summary = write_bundle(staging.path(), &ordered, context)?;

    if target.exists() {
        std::fs::remove_dir_all(target).map_err(io_err(target))?;
    }
    // From here on the staged tree is owned by the rename.
    let staged = staging.keep();
    if let Err(source) = std::fs::rename(&staged, target) {
        if let Err(cleanup) = std::fs::remove_dir_all(&staged) {
            tracing::warn!("failed to remove staging dir {}: {cleanup}", staged.display());
        }
        return Err(io_err(target)(source));
    }
    tracing::info!(
        "generated {} schemas into {}",
        summary.types.len(),
        target.display()
    );
    Ok(summary)
}
