use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    fn index(self) -> usize {
        match self {
            FontStyle::Regular => 0,
            FontStyle::Bold => 1,
            FontStyle::Italic => 2,
        }
    }

    fn builtin_name(self) -> &'static [u8] {
        match self {
            FontStyle::Regular => b"Helvetica",
            FontStyle::Bold => b"Helvetica-Bold",
            FontStyle::Italic => b"Helvetica-Oblique",
        }
    }

    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }
}

/// Which faces the document is set in.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FontConfig {
    /// Standard Type1 Helvetica family, nothing embedded.
    #[default]
    Builtin,
    /// TrueType files embedded as subset CIDFonts. Missing bold/italic
    /// files fall back to the regular one.
    TrueType {
        regular: PathBuf,
        bold: Option<PathBuf>,
        italic: Option<PathBuf>,
    },
}

enum FontSource {
    Builtin,
    TrueType {
        data: Mmap,
        face_index: u32,
        family: String,
    },
}

pub(crate) struct FontEntry {
    pub(crate) style: FontStyle,
    source: FontSource,
    pub(crate) widths_1000: Vec<f32>,
}

impl FontEntry {
    fn builtin(style: FontStyle) -> Self {
        FontEntry {
            style,
            source: FontSource::Builtin,
            widths_1000: helvetica_widths(style),
        }
    }

    /// Width of a single character in 1000-units. WinAnsi characters use
    /// the cached table; anything else is measured from the embedded face,
    /// or is 0 on the built-in path where it cannot be shown.
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            return self.widths_1000[(byte - 32) as usize];
        }
        match &self.source {
            FontSource::TrueType {
                data, face_index, ..
            } => Face::parse(data, *face_index)
                .ok()
                .and_then(|face| {
                    let units = face.units_per_em() as f32;
                    face.glyph_index(ch)
                        .and_then(|gid| face.glyph_hor_advance(gid))
                        .map(|adv| adv as f32 / units * 1000.0)
                })
                .unwrap_or(0.0),
            FontSource::Builtin => 0.0,
        }
    }

    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }

    /// Write this face into `pdf` under `font_ref`. Returns the char → glyph
    /// map for embedded faces; `None` means WinAnsi text strings.
    pub(crate) fn register(
        &self,
        pdf: &mut Pdf,
        font_ref: Ref,
        alloc: &mut impl FnMut() -> Ref,
        used_chars: &HashSet<char>,
    ) -> Option<HashMap<char, u16>> {
        let t0 = std::time::Instant::now();
        let embedded = match &self.source {
            FontSource::TrueType {
                data,
                face_index,
                family,
            } => {
                let map =
                    embed_truetype(pdf, font_ref, family, data, *face_index, used_chars, alloc);
                if map.is_none() {
                    log::warn!("Embedding {family} failed, using Helvetica for {:?}", self.style);
                }
                map
            }
            FontSource::Builtin => None,
        };

        if embedded.is_none() {
            pdf.type1_font(font_ref)
                .base_font(Name(self.style.builtin_name()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        log::debug!(
            "register_font: {:?} ({} glyphs) → {:.1}ms",
            self.style,
            used_chars.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        embedded
    }
}

/// The three faces used by a render. Built once per render call.
pub(crate) struct FontSet {
    entries: [FontEntry; 3],
}

impl FontSet {
    pub(crate) fn load(config: &FontConfig) -> FontSet {
        match config {
            FontConfig::Builtin => FontSet {
                entries: FontStyle::ALL.map(FontEntry::builtin),
            },
            FontConfig::TrueType {
                regular,
                bold,
                italic,
            } => {
                let path_for = |style: FontStyle| -> &Path {
                    match style {
                        FontStyle::Regular => regular.as_path(),
                        FontStyle::Bold => bold.as_deref().unwrap_or(regular.as_path()),
                        FontStyle::Italic => italic.as_deref().unwrap_or(regular.as_path()),
                    }
                };
                FontSet {
                    entries: FontStyle::ALL.map(|style| {
                        load_truetype(path_for(style), style).unwrap_or_else(|| {
                            log::warn!(
                                "Font not usable: {} ({style:?}), using Helvetica",
                                path_for(style).display()
                            );
                            FontEntry::builtin(style)
                        })
                    }),
                }
            }
        }
    }

    pub(crate) fn get(&self, style: FontStyle) -> &FontEntry {
        &self.entries[style.index()]
    }

    pub(crate) fn text_width(&self, text: &str, style: FontStyle, font_size: f32) -> f32 {
        self.get(style).word_width(text, font_size)
    }
}

fn load_truetype(path: &Path, style: FontStyle) -> Option<FontEntry> {
    let file = std::fs::File::open(path).ok()?;
    let data = unsafe { Mmap::map(&file) }.ok()?;
    let face_index = 0;
    let face = Face::parse(&data, face_index).ok()?;
    let units = face.units_per_em() as f32;

    let widths_1000: Vec<f32> = (32u8..=255u8)
        .map(|byte| {
            face.glyph_index(winansi_to_char(byte))
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(0.0)
        })
        .collect();
    let family = font_family_name(&face).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Embedded".to_string())
    });

    Some(FontEntry {
        style,
        source: FontSource::TrueType {
            data,
            face_index,
            family,
        },
        widths_1000,
    })
}

fn font_family_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .and_then(|name| name.to_string())
}

/// Windows-1252 (WinAnsi) byte to Unicode char mapping.
/// Bytes 0x80-0x9F are remapped; all others map directly to their Unicode codepoint.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}', // bullet
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F | 0x00A0..=0x00FF => c as u8,
        _ => (0x80u8..=0x9F)
            .find(|&b| winansi_to_char(b) == c)
            .unwrap_or(0),
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable chars are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
/// Bold runs wider; oblique shares the regular metrics.
fn helvetica_widths(style: FontStyle) -> Vec<f32> {
    let bold = style == FontStyle::Bold;
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 | 0xC0..=0xDE => if bold { 722.0 } else { 667.0 }, // uppercase incl. accented
            91..=96 => 333.0,                     // brackets etc.
            // narrow lowercase: f i j l t
            102 | 105 | 106 | 108 | 116 => if bold { 333.0 } else { 278.0 },
            0xEC..=0xEF => 278.0,                 // ì í î ï
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 | 0xDF..=0xFF => if bold { 611.0 } else { 556.0 }, // lowercase incl. accented
            0x95 => 350.0,                        // bullet
            _ => 556.0,
        })
        .collect()
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H encoding.
/// The font data is subsetted to only include glyphs used in the document.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    font_name: &str,
    font_data: &[u8],
    face_index: u32,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<HashMap<char, u16>> {
    let face = Face::parse(font_data, face_index).ok()?;
    let descriptor_ref = alloc();
    let data_ref = alloc();

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut chars: Vec<char> = used_chars.iter().copied().collect();
    chars.sort_unstable();
    for ch in chars {
        if let Some(gid) = face.glyph_index(ch) {
            char_to_gid.insert(ch, remapper.remap(gid.0));
        }
    }

    let subset_data = subsetter::subset(font_data, face_index, &remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {font_name}: {e}, embedding full font");
        font_data.to_vec()
    });

    let data_len = i32::try_from(subset_data.len()).ok()?;
    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = font_name.replace(' ', "");

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let system_info = || pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };

    let cid_font_ref = alloc();
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(system_info());
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut gid_widths: Vec<(u16, f32)> = char_to_gid
            .iter()
            .filter_map(|(&ch, &new_gid)| {
                face.glyph_index(ch)
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| (new_gid, adv as f32 / units * 1000.0))
            })
            .collect();
        gid_widths.sort_by_key(|&(gid, _)| gid);
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{}-UTF16", ps_name);
    let mut cmap =
        pdf_writer::types::UnicodeCmap::new(Name(cmap_name.as_bytes()), system_info());
    let mut pairs: Vec<(u16, char)> =
        char_to_gid.iter().map(|(&ch, &gid)| (gid, ch)).collect();
    pairs.sort_unstable();
    for (new_gid, ch) in pairs {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Some(char_to_gid)
}
