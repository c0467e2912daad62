mod error;
mod fonts;
mod model;
mod pdf;
pub mod reference;
pub mod validate;

pub use error::Error;
pub use fonts::{FontConfig, FontStyle};
pub use model::{
    Category, CategoryDetails, Declarant, DeclarationRecord, EntitySubtype, Jurisdiction,
    Representative, RequestForm, Rgb,
};
pub use pdf::assembler::{
    DOCUMENT_TITLE, FOOTER_REFERENCE, GENERAL_DECLARATION, GENERAL_DECLARATION_TITLE, INSTITUTION,
    PLACE, SIGNATURE_CAPTION, SectionPlan, format_long_date, page_label, specific_declarations,
};
pub use pdf::layout::{
    DrawOp, LineOp, MARGIN, MM, PAGE_HEIGHT, PAGE_WIDTH, Page, RectOp, SIDE_BAR_WIDTH, TextRun,
};
pub use pdf::theme::{ColorTheme, VisualStyle};
pub use pdf::{GeneratedDocument, RenderOptions, file_name};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render one request. Each call owns its own fonts, cursor and pages.
pub fn render_request(
    record: &DeclarationRecord,
    options: &RenderOptions,
) -> Result<GeneratedDocument, Error> {
    pdf::render(record, options)
}

/// Validate a raw form payload, convert it and render it.
pub fn render_form(
    form: &RequestForm,
    options: &RenderOptions,
) -> Result<GeneratedDocument, Error> {
    validate::validate_form(form).map_err(Error::Validation)?;
    let record = DeclarationRecord::try_from(form)?;
    render_request(&record, options)
}

/// Render `record` and write it into `dir` under its generated file name.
/// Nothing is written unless the render completes.
pub fn write_request_pdf(
    record: &DeclarationRecord,
    options: &RenderOptions,
    dir: &Path,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let doc = render_request(record, options)?;
    let t_render = t0.elapsed();

    let path = dir.join(&doc.file_name);
    std::fs::write(&path, &doc.pdf)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes, {} pages)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.pdf.len(),
        doc.page_count(),
    );

    Ok(path)
}
