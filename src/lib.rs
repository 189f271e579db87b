pub mod docstring;
pub mod error;
pub mod extract;
pub mod parser;
pub mod record;
pub mod render;

pub use error::Error;
pub use extract::{ImportSink, UNDOCUMENTED, extract};
pub use record::{Category, DocRecord};
pub use render::{MarkdownStream, render};

use log::{debug, info};

/// Extract documentation records from `source` and return the markdown chunk
/// stream, using `module_name` for the module heading. Import names go to
/// `import_sink` as they are discovered, when one is supplied.
pub fn document_source(
    source: &str,
    module_name: &str,
    import_sink: Option<&mut dyn ImportSink>,
) -> Result<MarkdownStream, Error> {
    info!("Documenting module '{}'", module_name);
    let records = extract::extract(source, import_sink)?;
    debug!("Extracted {} documentation records", records.len());
    Ok(render::render(records, module_name))
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
