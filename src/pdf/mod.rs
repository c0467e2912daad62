pub(crate) mod assembler;
mod blocks;
pub(crate) mod layout;
pub(crate) mod theme;
mod writer;

use std::path::PathBuf;

use crate::error::Error;
use crate::fonts::{FontConfig, FontSet};
use crate::model::{Category, DeclarationRecord};

use layout::{Page, PageFlow};
use theme::{ColorTheme, VisualStyle};

const ENV_STYLE: &str = "IMUNIDADE_STYLE";
const ENV_FONT_REGULAR: &str = "IMUNIDADE_FONT_REGULAR";
const ENV_FONT_BOLD: &str = "IMUNIDADE_FONT_BOLD";
const ENV_FONT_ITALIC: &str = "IMUNIDADE_FONT_ITALIC";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub style: VisualStyle,
    pub fonts: FontConfig,
}

impl RenderOptions {
    /// Defaults overridden by `IMUNIDADE_STYLE` and `IMUNIDADE_FONT_*`.
    /// An unrecognized style value is ignored with a warning.
    pub fn from_env() -> RenderOptions {
        let mut options = RenderOptions::default();
        if let Ok(value) = std::env::var(ENV_STYLE) {
            match value.parse() {
                Ok(style) => options.style = style,
                Err(e) => log::warn!("{ENV_STYLE}: {e}"),
            }
        }
        let path = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        if let Some(regular) = path(ENV_FONT_REGULAR) {
            options.fonts = FontConfig::TrueType {
                regular,
                bold: path(ENV_FONT_BOLD),
                italic: path(ENV_FONT_ITALIC),
            };
        }
        options
    }
}

/// A finished request: the page display list, the serialized PDF and the
/// name to save it under.
#[derive(Clone, Debug)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub category: Category,
    pub pages: Vec<Page>,
    pub pdf: Vec<u8>,
}

impl GeneratedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run of every page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(Page::texts)
            .map(|run| run.text.as_str())
    }
}

/// `Requerimento_Imunidade_{Tipo}_{name}_{stamp}.pdf`, where `name` is the
/// first 20 characters of the legal name with anything outside `[A-Za-z0-9]`
/// replaced by `_`.
pub fn file_name(category: Category, legal_name: &str, stamp_millis: i64) -> String {
    let tag = category.tag();
    let mut kind = String::with_capacity(tag.len());
    let mut chars = tag.chars();
    if let Some(first) = chars.next() {
        kind.extend(first.to_uppercase());
        kind.push_str(chars.as_str());
    }
    let name: String = legal_name
        .chars()
        .take(20)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("Requerimento_Imunidade_{kind}_{name}_{stamp_millis}.pdf")
}

pub fn render(
    record: &DeclarationRecord,
    options: &RenderOptions,
) -> Result<GeneratedDocument, Error> {
    let t0 = std::time::Instant::now();
    let category = record.category();
    let fonts = FontSet::load(&options.fonts);
    let t_fonts = t0.elapsed();

    // Phase 1: content slots, paginated as they go
    let mut flow = PageFlow::new(&fonts, ColorTheme::for_category(category), options.style);
    assembler::assemble(&mut flow, record);
    log::debug!("layout finished on page {}", flow.page_count());
    let mut pages = flow.into_pages();
    let t_layout = t0.elapsed();

    // Phase 2: footers, now that the page count is final
    assembler::stamp_footers(&mut pages, &fonts, options.style);
    let t_footers = t0.elapsed();

    // Phase 3: serialize
    let pdf = writer::write_pdf(&pages, &fonts);
    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases ({category}, {} style, {} pages): \
         fonts={:.1}ms, layout={:.1}ms, footers={:.1}ms, assembly={:.1}ms",
        options.style.name(),
        pages.len(),
        t_fonts.as_secs_f64() * 1000.0,
        (t_layout - t_fonts).as_secs_f64() * 1000.0,
        (t_footers - t_layout).as_secs_f64() * 1000.0,
        (t_assembly - t_footers).as_secs_f64() * 1000.0,
    );

    let stamp = chrono::Utc::now().timestamp_millis();
    Ok(GeneratedDocument {
        file_name: file_name(category, &record.declarant.legal_name, stamp),
        category,
        pages,
        pdf,
    })
}
