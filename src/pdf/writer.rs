use std::collections::{HashMap, HashSet};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::fonts::{FontSet, FontStyle, encode_as_gids, to_winansi_bytes};
use crate::model::Rgb;

use super::assembler::DOCUMENT_TITLE;
use super::layout::{DrawOp, LineOp, PAGE_HEIGHT, PAGE_WIDTH, Page, RectOp, TextRun};

// Bezier control distance for a quarter circle, as a fraction of the radius.
const KAPPA: f32 = 0.5523;

struct RegisteredFont {
    font_ref: Ref,
    char_to_gid: Option<HashMap<char, u16>>,
}

impl RegisteredFont {
    fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => {
                let bytes = to_winansi_bytes(text);
                if bytes.len() < text.chars().count() {
                    log::warn!("Dropping characters outside WinAnsi from {text:?}");
                }
                bytes
            }
        }
    }
}

/// Serialize laid-out pages. Output depends only on `pages` and the fonts.
pub(crate) fn write_pdf(pages: &[Page], fonts: &FontSet) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    // Only faces that some run actually uses get a font object.
    let mut used: HashMap<FontStyle, HashSet<char>> = HashMap::new();
    for run in pages.iter().flat_map(Page::texts) {
        used.entry(run.font).or_default().extend(run.text.chars());
    }
    let mut registered: HashMap<FontStyle, RegisteredFont> = HashMap::new();
    for style in FontStyle::ALL {
        let Some(chars) = used.get(&style) else {
            continue;
        };
        let font_ref = alloc();
        let char_to_gid = fonts.get(style).register(&mut pdf, font_ref, &mut alloc, chars);
        registered.insert(
            style,
            RegisteredFont {
                font_ref,
                char_to_gid,
            },
        );
    }

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in pages.iter().enumerate() {
        let raw = page_content(page, &registered).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .title(TextStr(DOCUMENT_TITLE))
        .creator(TextStr(concat!("imunidade-pdf ", env!("CARGO_PKG_VERSION"))));

    let font_pairs: Vec<(&str, Ref)> = FontStyle::ALL
        .iter()
        .filter_map(|style| {
            registered
                .get(style)
                .map(|f| (style.pdf_name(), f.font_ref))
        })
        .collect();

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in &font_pairs {
            font_dict.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    pdf.finish()
}

fn page_content(page: &Page, fonts: &HashMap<FontStyle, RegisteredFont>) -> Content {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Rect(rect) => draw_rect(&mut content, rect),
            DrawOp::Line(line) => draw_line(&mut content, line),
            DrawOp::Text(run) => {
                if let Some(font) = fonts.get(&run.font) {
                    draw_text(&mut content, run, font);
                }
            }
        }
    }
    content
}

fn rgb(color: Rgb) -> (f32, f32, f32) {
    let [r, g, b] = color;
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

fn draw_text(content: &mut Content, run: &TextRun, font: &RegisteredFont) {
    let (r, g, b) = rgb(run.color);
    content
        .set_fill_rgb(r, g, b)
        .begin_text()
        .set_font(Name(run.font.pdf_name().as_bytes()), run.size)
        .next_line(run.x, PAGE_HEIGHT - run.y)
        .show(Str(&font.encode(&run.text)))
        .end_text();
}

fn draw_line(content: &mut Content, line: &LineOp) {
    let (r, g, b) = rgb(line.color);
    content.save_state();
    content.set_line_width(line.width);
    content.set_stroke_rgb(r, g, b);
    content.move_to(line.from.0, PAGE_HEIGHT - line.from.1);
    content.line_to(line.to.0, PAGE_HEIGHT - line.to.1);
    content.stroke();
    content.restore_state();
}

fn draw_rect(content: &mut Content, rect: &RectOp) {
    if rect.fill.is_none() && rect.stroke.is_none() {
        return;
    }
    content.save_state();
    if let Some(fill) = rect.fill {
        let (r, g, b) = rgb(fill);
        content.set_fill_rgb(r, g, b);
    }
    if let Some((stroke, width)) = rect.stroke {
        let (r, g, b) = rgb(stroke);
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(width);
    }

    let x0 = rect.x;
    let y0 = PAGE_HEIGHT - rect.y - rect.height;
    let radius = rect.radius.min(rect.width / 2.0).min(rect.height / 2.0);
    if radius > 0.0 {
        rounded_rect_path(content, x0, y0, rect.width, rect.height, radius);
    } else {
        content.rect(x0, y0, rect.width, rect.height);
    }

    match (rect.fill, rect.stroke) {
        (Some(_), Some(_)) => content.fill_nonzero_and_stroke(),
        (Some(_), None) => content.fill_nonzero(),
        _ => content.stroke(),
    };
    content.restore_state();
}

/// Closed path of a rectangle with quarter-circle corners, bottom-left at
/// (`x0`, `y0`) in PDF space.
fn rounded_rect_path(content: &mut Content, x0: f32, y0: f32, w: f32, h: f32, r: f32) {
    let (x1, y1) = (x0 + w, y0 + h);
    let k = KAPPA * r;
    content.move_to(x0 + r, y0);
    content.line_to(x1 - r, y0);
    content.cubic_to(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
    content.line_to(x1, y1 - r);
    content.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    content.line_to(x0 + r, y1);
    content.cubic_to(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
    content.line_to(x0, y0 + r);
    content.cubic_to(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
    content.close_path();
}
