//! Section primitives. Each one reserves its own height before drawing, so
//! the assembler only has to call them in order.

use crate::fonts::FontStyle;
use crate::model::Rgb;

use super::layout::{
    Align, DrawOp, LineOp, PageFlow, RectOp, MARGIN, MM, PRINTABLE_WIDTH, line_height,
};
use super::theme::{BLACK, MUTED_GRAY, NEUTRAL_FILL, NEUTRAL_STROKE, VisualStyle};

const TITLE_SIZE: f32 = 14.0;
const TITLE_RESERVE: f32 = 15.0 * MM;
const TITLE_ADVANCE: f32 = 10.0 * MM;
const TITLE_BOX_HEIGHT: f32 = 12.0 * MM;

const FIELD_SIZE: f32 = 10.0;
const FIELD_RESERVE: f32 = 10.0 * MM;
const FIELD_LABEL_ADVANCE: f32 = 5.0 * MM;
const FIELD_VALUE_INDENT: f32 = 5.0 * MM;
const FIELD_LINE_PITCH: f32 = 4.0 * MM;
const FIELD_TRAILING: f32 = 3.0 * MM;

/// Boxes overhang the printable area by this much on each side and sit this
/// far above the cursor.
pub(crate) const BOX_BLEED: f32 = 5.0 * MM;
const BOX_RADIUS: f32 = 2.0 * MM;

impl PageFlow<'_> {
    /// Wrapped body text at the left margin. Returns the lines written.
    pub(crate) fn write_wrapped_text(
        &mut self,
        text: &str,
        size: f32,
        bold: bool,
        color: Rgb,
    ) -> usize {
        let font = if bold { FontStyle::Bold } else { FontStyle::Regular };
        let lines = self.wrap(text, font, size, PRINTABLE_WIDTH - 10.0 * MM);
        let pitch = line_height(size);
        self.reserve(lines.len() as f32 * pitch + 5.0 * MM, pitch);
        self.flow_lines(&lines, MARGIN, font, size, color, pitch);
        lines.len()
    }

    pub(crate) fn write_section_title(&mut self, label: &str, highlighted: bool) {
        self.ensure_space(TITLE_RESERVE);
        if highlighted {
            self.draw_highlight_box(TITLE_BOX_HEIGHT, true);
        }
        let dark = self.theme.dark;
        self.text_at(
            label,
            MARGIN,
            self.y() + 5.0 * MM,
            Align::Left,
            FontStyle::Bold,
            TITLE_SIZE,
            dark,
        );
        self.advance(TITLE_ADVANCE);
    }

    /// Label line plus indented value. Absent or blank values emit nothing.
    pub(crate) fn write_labeled_field(&mut self, label: &str, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        self.write_field(label, value);
    }

    /// Like `write_labeled_field` but keeps the label when the value is blank.
    pub(crate) fn write_required_field(&mut self, label: &str, value: &str) {
        self.write_field(label, value.trim());
    }

    fn write_field(&mut self, label: &str, value: &str) {
        let lines = self.wrap(
            value,
            FontStyle::Regular,
            FIELD_SIZE,
            PRINTABLE_WIDTH - FIELD_VALUE_INDENT,
        );
        let block = FIELD_LABEL_ADVANCE + lines.len() as f32 * FIELD_LINE_PITCH + FIELD_TRAILING;
        self.reserve(block.max(FIELD_RESERVE), FIELD_RESERVE);

        self.text_at(
            &format!("{label}:"),
            MARGIN,
            self.y(),
            Align::Left,
            FontStyle::Bold,
            FIELD_SIZE,
            MUTED_GRAY,
        );
        self.advance(FIELD_LABEL_ADVANCE);
        self.flow_lines(
            &lines,
            MARGIN + FIELD_VALUE_INDENT,
            FontStyle::Regular,
            FIELD_SIZE,
            BLACK,
            FIELD_LINE_PITCH,
        );
        self.advance(FIELD_TRAILING);
    }

    /// Rounded box spanning the printable width, its top edge `BOX_BLEED`
    /// above the cursor. Does not move the cursor.
    pub(crate) fn draw_highlight_box(&mut self, height: f32, highlighted: bool) {
        let (fill, stroke) = match (self.style, highlighted) {
            (VisualStyle::Decorated, true) => {
                (Some(self.theme.light), Some((self.theme.primary, 0.5 * MM)))
            }
            (VisualStyle::Decorated, false) => (Some(NEUTRAL_FILL), None),
            (VisualStyle::Plain, true) => (None, Some((self.theme.primary, 0.5 * MM))),
            (VisualStyle::Plain, false) => (None, Some((NEUTRAL_STROKE, 0.3 * MM))),
        };
        self.draw_box(self.y() - BOX_BLEED, height, BOX_RADIUS, fill, stroke);
    }

    /// Rounded box spanning the printable width plus bleed, top edge at `top`.
    pub(crate) fn draw_box(
        &mut self,
        top: f32,
        height: f32,
        radius: f32,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f32)>,
    ) {
        self.push(DrawOp::Rect(RectOp {
            x: MARGIN - BOX_BLEED,
            y: top,
            width: PRINTABLE_WIDTH + 2.0 * BOX_BLEED,
            height,
            radius,
            fill,
            stroke,
        }));
    }

    pub(crate) fn draw_rule(&mut self, y: f32, from_x: f32, to_x: f32, color: Rgb, width: f32) {
        self.push(DrawOp::Line(LineOp {
            from: (from_x, y),
            to: (to_x, y),
            color,
            width,
        }));
    }

    /// Lines centered on the page from the cursor down, `pitch` apart.
    pub(crate) fn write_centered_lines(
        &mut self,
        lines: &[String],
        font: FontStyle,
        size: f32,
        color: Rgb,
        pitch: f32,
    ) {
        for line in lines {
            self.ensure_space(pitch);
            self.text_centered(line, self.y(), font, size, color);
            self.advance(pitch);
        }
    }
}
