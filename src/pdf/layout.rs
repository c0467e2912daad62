use crate::fonts::{FontSet, FontStyle};
use crate::model::Rgb;

use super::theme::{ColorTheme, VisualStyle};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

pub const PAGE_WIDTH: f32 = 210.0 * MM;
pub const PAGE_HEIGHT: f32 = 297.0 * MM;
pub const MARGIN: f32 = 20.0 * MM;
/// Space kept free above the bottom margin for the footer stamp.
pub const FOOTER_RESERVE: f32 = 15.0 * MM;
pub const SIDE_BAR_WIDTH: f32 = 5.0 * MM;

pub(crate) const PRINTABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Lowest y (from the top edge) content may reach.
pub(crate) const PRINTABLE_BOTTOM: f32 = PAGE_HEIGHT - MARGIN - FOOTER_RESERVE;
pub(crate) const PRINTABLE_HEIGHT: f32 = PRINTABLE_BOTTOM - MARGIN;

// Float slack so a block reserved up front never re-breaks line by line.
const BREAK_TOLERANCE: f32 = 0.01;

/// Line pitch for wrapped body text at `font_size`.
pub(crate) fn line_height(font_size: f32) -> f32 {
    font_size * 0.5 * MM
}

/// A text run placed on a page. `y` is the baseline, measured down from the
/// top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub font: FontStyle,
    pub size: f32,
    pub color: Rgb,
    pub text: String,
}

/// Rectangle with its top-left corner at (`x`, `y`), y measured down from the
/// top edge. `radius` > 0 rounds the corners.
#[derive(Clone, Debug, PartialEq)]
pub struct RectOp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub fill: Option<Rgb>,
    pub stroke: Option<(Rgb, f32)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineOp {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub color: Rgb,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Rect(RectOp),
    Line(LineOp),
}

/// One fixed-size page of positioned drawing operations, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
    side_bar: bool,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line(line) => Some(line),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

/// Position a run so that `anchor` is its left edge, center or right edge.
pub(crate) fn place_text(
    fonts: &FontSet,
    text: &str,
    anchor: (f32, f32),
    align: Align,
    font: FontStyle,
    size: f32,
    color: Rgb,
) -> TextRun {
    let width = fonts.text_width(text, font, size);
    let (x, y) = anchor;
    let x = match align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };
    TextRun {
        x,
        y,
        font,
        size,
        color,
        text: text.to_string(),
    }
}

/// Greedy word wrap. Paragraphs split on '\n' and each yields at least one
/// line; a word wider than `max_width` gets a line of its own.
pub(crate) fn wrap_text(
    fonts: &FontSet,
    text: &str,
    font: FontStyle,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let entry = fonts.get(font);
    let space_w = entry.space_width(font_size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_w = 0.0f32;
        for word in paragraph.split_whitespace() {
            let ww = entry.word_width(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_w = ww;
            } else if current_w + space_w + ww > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_w = ww;
            } else {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + ww;
            }
        }
        lines.push(current);
    }
    lines
}

/// Render-time layout cursor: the page list plus the write position on the
/// last page. One per render; never shared.
pub(crate) struct PageFlow<'a> {
    pub(super) fonts: &'a FontSet,
    pub(super) theme: ColorTheme,
    pub(super) style: VisualStyle,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> PageFlow<'a> {
    pub(crate) fn new(fonts: &'a FontSet, theme: ColorTheme, style: VisualStyle) -> Self {
        let mut flow = PageFlow {
            fonts,
            theme,
            style,
            pages: vec![Page::default()],
            y: MARGIN,
        };
        flow.draw_side_accent_bar();
        flow
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    pub(crate) fn advance(&mut self, dy: f32) {
        debug_assert!(dy >= 0.0, "cursor only moves down");
        self.y += dy.max(0.0);
    }

    /// Move the cursor down to `y`; never moves it up.
    pub(crate) fn advance_to(&mut self, y: f32) {
        self.y = self.y.max(y);
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Start a new page when `required` more points would cross the printable
    /// bottom. Returns true when a break happened.
    pub(crate) fn ensure_space(&mut self, required: f32) -> bool {
        debug_assert!(required.is_finite() && required >= 0.0);
        if self.y + required <= PRINTABLE_BOTTOM + BREAK_TOLERANCE {
            return false;
        }
        self.pages.push(Page::default());
        self.y = MARGIN;
        self.draw_side_accent_bar();
        log::debug!(
            "page break: {} pages after reserving {:.1}pt",
            self.pages.len(),
            required
        );
        true
    }

    /// Reserve a whole block when it fits on one page, otherwise only its
    /// first `unit` so the rest can flow across pages.
    pub(crate) fn reserve(&mut self, block: f32, unit: f32) -> bool {
        if block <= PRINTABLE_HEIGHT {
            self.ensure_space(block)
        } else {
            self.ensure_space(unit)
        }
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Fill the left-edge strip in the theme's primary color, once per page.
    pub(crate) fn draw_side_accent_bar(&mut self) {
        let primary = self.theme.primary;
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        if page.side_bar {
            return;
        }
        page.side_bar = true;
        page.ops.push(DrawOp::Rect(RectOp {
            x: 0.0,
            y: 0.0,
            width: SIDE_BAR_WIDTH,
            height: PAGE_HEIGHT,
            radius: 0.0,
            fill: Some(primary),
            stroke: None,
        }));
    }

    pub(crate) fn text_at(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        align: Align,
        font: FontStyle,
        size: f32,
        color: Rgb,
    ) {
        let run = place_text(self.fonts, text, (x, y), align, font, size, color);
        self.push(DrawOp::Text(run));
    }

    /// Centered on the page at baseline `y`.
    pub(crate) fn text_centered(
        &mut self,
        text: &str,
        y: f32,
        font: FontStyle,
        size: f32,
        color: Rgb,
    ) {
        self.text_at(text, PAGE_WIDTH / 2.0, y, Align::Center, font, size, color);
    }

    pub(crate) fn wrap(
        &self,
        text: &str,
        font: FontStyle,
        size: f32,
        max_width: f32,
    ) -> Vec<String> {
        wrap_text(self.fonts, text, font, size, max_width)
    }

    /// Write `lines` top-down from the cursor at `pitch`, breaking pages
    /// between lines as needed. Returns the number of page breaks taken.
    pub(crate) fn flow_lines(
        &mut self,
        lines: &[String],
        x: f32,
        font: FontStyle,
        size: f32,
        color: Rgb,
        pitch: f32,
    ) -> usize {
        let mut breaks = 0;
        for line in lines {
            if self.ensure_space(pitch) {
                breaks += 1;
            }
            if !line.is_empty() {
                self.text_at(line, x, self.y, Align::Left, font, size, color);
            }
            self.y += pitch;
        }
        breaks
    }

    pub(crate) fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}
