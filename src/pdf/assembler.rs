//! Section sequence of the request document, and the footer pass that runs
//! once the page count is final.

use chrono::{Datelike, NaiveDate};

use crate::fonts::{FontSet, FontStyle};
use crate::model::{Category, DeclarationRecord};

use super::blocks::BOX_BLEED;
use super::layout::{
    Align, DrawOp, LineOp, MARGIN, MM, PAGE_HEIGHT, PAGE_WIDTH, PRINTABLE_WIDTH, Page, PageFlow,
    RectOp, line_height, place_text,
};
use super::theme::{
    ALERT, BLACK, HEADER_BANDS, INSTITUTION_NAVY, MUTED_GRAY, VisualStyle, WHITE,
};

pub const INSTITUTION: &str = "PREFEITURA MUNICIPAL DE PORTO VELHO";
const DEPARTMENT: &str = "Secretaria Municipal de Economia (SEMEC)";
const REVENUE_OFFICE: &str = "Secretaria Executiva da Receita Municipal (SRM)";
pub const DOCUMENT_TITLE: &str = "REQUERIMENTO DE IMUNIDADE TRIBUTÁRIA";
pub const PLACE: &str = "Porto Velho/RO";
pub const SIGNATURE_CAPTION: &str = "Assinatura do Declarante ou Representante Legal";

pub const GENERAL_DECLARATION_TITLE: &str = "DECLARAÇÃO DE RESPONSABILIDADE GERAL";
pub const GENERAL_DECLARATION: &str = "Declaro, sob as penas da lei, que as informações prestadas nesta autodeclaração são verdadeiras e que a entidade preenche todos os requisitos legais e constitucionais para o gozo da imunidade tributária pleiteada, estando ciente de que a falsidade das informações implicará na suspensão ou cancelamento da imunidade e na cobrança dos impostos devidos, com os acréscimos legais.";

pub const FOOTER_REFERENCE: &str = "Instrução Normativa SEMEC/SRM Nº 001/2025";
const FOOTER_INSTITUTION: &str =
    "Secretaria Municipal de Economia - Secretaria Executiva da Receita Municipal";
const FOOTER_HEIGHT: f32 = 20.0 * MM;

const HEADER_END: f32 = 55.0 * MM;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Fixed attestation sentences printed under "Declarações Específicas".
pub fn specific_declarations(category: Category) -> &'static [&'static str] {
    match category {
        Category::ReciprocalEntity => &[
            "Declaro que o patrimônio, renda ou serviços estão vinculados às finalidades essenciais do ente federativo ou às delas decorrentes.",
        ],
        Category::Temple => &[
            "Declaro que o patrimônio, renda ou serviços estão relacionados às finalidades essenciais do templo, conforme o art. 150, § 4º, da Constituição Federal de 1988.",
        ],
        Category::PartyUnionEducationWelfare => &[
            "Declaro que a entidade NÃO distribui qualquer parcela de seu patrimônio ou de suas rendas, a qualquer título.",
            "Declaro que a entidade aplica integralmente, no País, os seus recursos na manutenção dos seus objetivos institucionais.",
            "Declaro que a entidade mantém escrituração de suas receitas e despesas em livros revestidos de formalidades capazes de assegurar sua exatidão.",
            "Declaro que o patrimônio, renda ou serviços estão vinculados às suas finalidades essenciais ou às delas decorrentes.",
        ],
        Category::PressPrint => &[
            "Declaro que o patrimônio, renda ou serviços estão vinculados à produção ou circulação de livros, jornais ou periódicos, ou ao papel destinado à sua impressão.",
        ],
        Category::PhonogramVideogram => &[
            "Declaro que os fonogramas/videofonogramas são produzidos no Brasil, contendo obras musicais ou literomusicais de autores brasileiros e/ou interpretadas por artistas brasileiros.",
            "Declaro que o patrimônio, renda ou serviços estão vinculados à produção ou circulação dos fonogramas e videofonogramas musicais, e que não se refere à etapa de replicação industrial de mídias ópticas de leitura a laser.",
        ],
    }
}

/// Section numbers of one document. Identification is always 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionPlan {
    pub representative: Option<u32>,
    pub request_data: u32,
    pub observations: Option<u32>,
    pub declarations: u32,
}

impl SectionPlan {
    pub fn new(has_representative: bool, has_observations: bool) -> SectionPlan {
        let mut counter = 1;
        let representative = has_representative.then(|| {
            counter += 1;
            counter
        });
        counter += 1;
        let request_data = counter;
        let observations = has_observations.then(|| {
            counter += 1;
            counter
        });
        counter += 1;
        SectionPlan {
            representative,
            request_data,
            observations,
            declarations: counter,
        }
    }

    pub fn for_record(record: &DeclarationRecord) -> SectionPlan {
        SectionPlan::new(
            record.representative().is_some(),
            record.observations().is_some(),
        )
    }
}

/// Long Brazilian date, e.g. `10 de janeiro de 2025`. Accepts ISO and
/// `dd/mm/yyyy`; anything else is printed as given.
pub fn format_long_date(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"));
    match parsed {
        Ok(date) => format!(
            "{:02} de {} de {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        Err(_) => {
            log::warn!("Unrecognized declaration date {raw:?}, printing it verbatim");
            raw.to_string()
        }
    }
}

/// Lay out every content slot of `record`. Footers are stamped separately.
pub(crate) fn assemble(flow: &mut PageFlow<'_>, record: &DeclarationRecord) {
    let plan = SectionPlan::for_record(record);
    let category = record.category();

    write_header(flow);
    write_title_banner(flow);
    write_category_banner(flow, category);

    flow.ensure_space(60.0 * MM);
    flow.write_section_title("1. IDENTIFICAÇÃO DO DECLARANTE", false);
    flow.advance(2.0 * MM);
    let declarant = &record.declarant;
    flow.write_required_field("Nome/Razão Social", &declarant.legal_name);
    flow.write_required_field("CNPJ", &declarant.tax_id);
    flow.write_required_field("Endereço", &declarant.address);
    flow.write_required_field("Telefone", &declarant.phone);
    flow.write_required_field("E-mail", &declarant.email);
    flow.advance(5.0 * MM);

    if let (Some(number), Some(rep)) = (plan.representative, record.representative()) {
        flow.ensure_space(40.0 * MM);
        flow.write_section_title(&format!("{number}. REPRESENTANTE LEGAL"), false);
        flow.advance(2.0 * MM);
        flow.write_required_field("Nome", &rep.name);
        flow.write_labeled_field("CPF", rep.tax_id.as_deref());
        flow.write_labeled_field("Cargo/Função", rep.role.as_deref());
        flow.advance(5.0 * MM);
    }

    flow.ensure_space(50.0 * MM);
    flow.write_section_title(
        &format!("{}. DADOS ESPECÍFICOS DO PEDIDO", plan.request_data),
        false,
    );
    flow.advance(2.0 * MM);
    for (label, value) in record.details.request_fields() {
        flow.write_labeled_field(label, value);
    }
    flow.advance(5.0 * MM);

    if let (Some(number), Some(observations)) = (plan.observations, record.observations()) {
        flow.ensure_space(35.0 * MM);
        flow.write_section_title(&format!("{number}. OBSERVAÇÕES ADICIONAIS"), false);
        flow.advance(2.0 * MM);
        flow.write_wrapped_text(observations, 10.0, false, BLACK);
        flow.advance(5.0 * MM);
    }

    flow.ensure_space(70.0 * MM);
    flow.write_section_title(
        &format!("{}. DECLARAÇÕES ESPECÍFICAS", plan.declarations),
        true,
    );
    flow.advance(5.0 * MM);
    let sentences = specific_declarations(category);
    for (i, sentence) in sentences.iter().enumerate() {
        flow.write_wrapped_text(&format!("• {sentence}"), 10.0, false, BLACK);
        let gap = if i + 1 == sentences.len() { 5.0 } else { 3.0 };
        flow.advance(gap * MM);
    }

    write_general_declaration(flow);
    write_date_line(flow, &record.declaration_date);
    write_signature(flow);
}

fn write_header(flow: &mut PageFlow<'_>) {
    if flow.style == VisualStyle::Decorated {
        for (height, color) in HEADER_BANDS {
            flow.push(DrawOp::Rect(RectOp {
                x: 0.0,
                y: 0.0,
                width: PAGE_WIDTH,
                height: height * MM,
                radius: 0.0,
                fill: Some(color),
                stroke: None,
            }));
        }
    }
    let mut y = 12.0 * MM;
    flow.text_centered(INSTITUTION, y, FontStyle::Bold, 18.0, INSTITUTION_NAVY);
    y += 7.0 * MM;
    flow.text_centered(DEPARTMENT, y, FontStyle::Bold, 12.0, INSTITUTION_NAVY);
    y += 6.0 * MM;
    flow.text_centered(REVENUE_OFFICE, y, FontStyle::Bold, 11.0, INSTITUTION_NAVY);
    flow.advance_to(HEADER_END);
}

fn write_title_banner(flow: &mut PageFlow<'_>) {
    flow.ensure_space(20.0 * MM);
    let y = flow.y();
    match flow.style {
        VisualStyle::Decorated => {
            let primary = flow.theme.primary;
            flow.draw_box(y - 8.0 * MM, 18.0 * MM, 3.0 * MM, Some(primary), None);
            flow.text_centered(DOCUMENT_TITLE, y, FontStyle::Bold, 16.0, WHITE);
        }
        VisualStyle::Plain => {
            let (dark, primary) = (flow.theme.dark, flow.theme.primary);
            flow.text_centered(DOCUMENT_TITLE, y, FontStyle::Bold, 16.0, dark);
            flow.draw_rule(
                y + 4.0 * MM,
                MARGIN,
                PAGE_WIDTH - MARGIN,
                primary,
                0.5 * MM,
            );
        }
    }
    flow.advance(15.0 * MM);
}

fn write_category_banner(flow: &mut PageFlow<'_>, category: Category) {
    flow.ensure_space(25.0 * MM);
    flow.draw_highlight_box(20.0 * MM, true);
    flow.advance(2.0 * MM);
    let dark = flow.theme.dark;
    flow.text_centered(category.title(), flow.y() + 5.0 * MM, FontStyle::Bold, 13.0, dark);
    flow.advance(8.0 * MM);
    flow.text_centered(
        category.citation(),
        flow.y() + 3.0 * MM,
        FontStyle::Italic,
        10.0,
        MUTED_GRAY,
    );
    flow.advance(12.0 * MM);
}

/// Alert-toned box sized to its text, kept on one page.
fn write_general_declaration(flow: &mut PageFlow<'_>) {
    let text_width = PRINTABLE_WIDTH - 30.0 * MM;
    let title_lines = flow.wrap(GENERAL_DECLARATION_TITLE, FontStyle::Bold, 10.0, text_width);
    let body_lines = flow.wrap(GENERAL_DECLARATION, FontStyle::Regular, 9.0, text_width);
    let title_pitch = line_height(10.0);
    let body_pitch = line_height(9.0);

    let title_block = (title_lines.len() as f32 * title_pitch).max(8.0 * MM);
    let height = BOX_BLEED
        + 2.0 * MM
        + title_block
        + body_lines.len() as f32 * body_pitch
        + 3.0 * MM;
    flow.ensure_space(height.max(70.0 * MM));

    let top = flow.y() - BOX_BLEED;
    let (fill, stroke_width) = match flow.style {
        VisualStyle::Decorated => (Some(ALERT.fill), MM),
        VisualStyle::Plain => (None, 0.5 * MM),
    };
    flow.draw_box(top, height, 2.0 * MM, fill, Some((ALERT.stroke, stroke_width)));

    flow.advance(2.0 * MM);
    let title_top = flow.y();
    flow.write_centered_lines(&title_lines, FontStyle::Bold, 10.0, ALERT.title, title_pitch);
    flow.advance_to(title_top + title_block);
    flow.flow_lines(
        &body_lines,
        MARGIN + 10.0 * MM,
        FontStyle::Regular,
        9.0,
        BLACK,
        body_pitch,
    );
    flow.advance_to(top + height + 10.0 * MM);
}

fn write_date_line(flow: &mut PageFlow<'_>, raw_date: &str) {
    flow.ensure_space(40.0 * MM);
    let line = format!("{PLACE}, {}", format_long_date(raw_date));
    flow.text_centered(&line, flow.y(), FontStyle::Italic, 11.0, MUTED_GRAY);
    flow.advance(20.0 * MM);
}

fn write_signature(flow: &mut PageFlow<'_>) {
    flow.ensure_space(35.0 * MM);
    let y = flow.y();
    flow.draw_rule(
        y,
        MARGIN + 35.0 * MM,
        PAGE_WIDTH - MARGIN - 35.0 * MM,
        MUTED_GRAY,
        0.5 * MM,
    );
    flow.advance(5.0 * MM);
    flow.text_centered(SIGNATURE_CAPTION, flow.y(), FontStyle::Bold, 10.0, MUTED_GRAY);
    flow.advance(15.0 * MM);
}

/// "Página i de N" label for a 1-based page index.
pub fn page_label(index: usize, total: usize) -> String {
    format!("Página {index} de {total}")
}

/// Second pass: stamp the footer on every finished page, now that the page
/// count is known.
pub(crate) fn stamp_footers(pages: &mut [Page], fonts: &FontSet, style: VisualStyle) {
    let total = pages.len();
    let text_color = match style {
        VisualStyle::Decorated => WHITE,
        VisualStyle::Plain => MUTED_GRAY,
    };
    let center = PAGE_WIDTH / 2.0;

    for (i, page) in pages.iter_mut().enumerate() {
        match style {
            VisualStyle::Decorated => page.ops.push(DrawOp::Rect(RectOp {
                x: 0.0,
                y: PAGE_HEIGHT - FOOTER_HEIGHT,
                width: PAGE_WIDTH,
                height: FOOTER_HEIGHT,
                radius: 0.0,
                fill: Some(INSTITUTION_NAVY),
                stroke: None,
            })),
            VisualStyle::Plain => page.ops.push(DrawOp::Line(LineOp {
                from: (MARGIN, PAGE_HEIGHT - FOOTER_HEIGHT),
                to: (PAGE_WIDTH - MARGIN, PAGE_HEIGHT - FOOTER_HEIGHT),
                color: MUTED_GRAY,
                width: 0.3 * MM,
            })),
        }

        let runs = [
            place_text(
                fonts,
                FOOTER_REFERENCE,
                (center, PAGE_HEIGHT - 13.0 * MM),
                Align::Center,
                FontStyle::Regular,
                8.0,
                text_color,
            ),
            place_text(
                fonts,
                FOOTER_INSTITUTION,
                (center, PAGE_HEIGHT - 8.0 * MM),
                Align::Center,
                FontStyle::Regular,
                7.0,
                text_color,
            ),
            place_text(
                fonts,
                &page_label(i + 1, total),
                (PAGE_WIDTH - MARGIN, PAGE_HEIGHT - 10.0 * MM),
                Align::Right,
                FontStyle::Regular,
                8.0,
                text_color,
            ),
        ];
        page.ops.extend(runs.into_iter().map(DrawOp::Text));
    }
}
