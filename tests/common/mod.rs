#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use imunidade_pdf::{
    Category, CategoryDetails, Declarant, DeclarationRecord, EntitySubtype, GeneratedDocument,
    Jurisdiction, MM, PAGE_HEIGHT, RenderOptions, Representative, TextRun, render_request,
};

pub fn declarant() -> Declarant {
    Declarant {
        legal_name: "Igreja Exemplo".to_string(),
        tax_id: "12.345.678/0001-90".to_string(),
        address: "Rua A, 100".to_string(),
        phone: "(69) 99999-0000".to_string(),
        email: "a@b.com".to_string(),
    }
}

/// Temple request with no representative and no observations.
pub fn temple_record() -> DeclarationRecord {
    DeclarationRecord {
        declarant: declarant(),
        representative: None,
        observations: None,
        declaration_date: "2025-01-10".to_string(),
        details: CategoryDetails::Temple {
            temple_name: Some("Igreja Exemplo".to_string()),
            property_address: Some("Rua A, 100".to_string()),
            property_registration: None,
        },
    }
}

/// Every category-specific field filled in.
pub fn full_details(category: Category) -> CategoryDetails {
    let s = |v: &str| Some(v.to_string());
    match category {
        Category::ReciprocalEntity => CategoryDetails::ReciprocalEntity {
            jurisdiction: Some(Jurisdiction::Municipality),
            asset_description: s("Sede administrativa municipal"),
            property_address: s("Av. Sete de Setembro, 237"),
            property_registration: s("12.345"),
        },
        Category::Temple => CategoryDetails::Temple {
            temple_name: s("Templo Central"),
            property_address: s("Rua das Flores, 45"),
            property_registration: s("67.890"),
        },
        Category::PartyUnionEducationWelfare => CategoryDetails::PartyUnionEducationWelfare {
            entity_name: s("Sindicato dos Servidores"),
            entity_subtype: Some(EntitySubtype::LaborUnion),
            asset_description: s("Sede do sindicato"),
            property_address: s("Rua Dom Pedro II, 10"),
            property_registration: s("11.111"),
            holds_welfare_certificate: true,
        },
        Category::PressPrint => CategoryDetails::PressPrint {
            entity_name: s("Editora Madeira"),
            activity_description: s("Edição e impressão de livros didáticos"),
        },
        Category::PhonogramVideogram => CategoryDetails::PhonogramVideogram {
            entity_name: s("Estúdio Beradeiro"),
            activity_description: s("Produção de fonogramas de artistas locais"),
        },
    }
}

pub fn record_for(category: Category) -> DeclarationRecord {
    DeclarationRecord {
        details: full_details(category),
        ..temple_record()
    }
}

pub fn representative() -> Representative {
    Representative {
        name: "Maria da Silva".to_string(),
        tax_id: Some("123.456.789-00".to_string()),
        role: Some("Presidente".to_string()),
    }
}

pub fn with_representative(mut record: DeclarationRecord) -> DeclarationRecord {
    record.representative = Some(representative());
    record
}

pub fn with_observations(mut record: DeclarationRecord, text: &str) -> DeclarationRecord {
    record.observations = Some(text.to_string());
    record
}

/// Roughly `words` words of filler prose.
pub fn long_text(words: usize) -> String {
    const FILLER: [&str; 8] = [
        "imóvel", "utilizado", "exclusivamente", "para", "atividades", "religiosas", "da",
        "comunidade",
    ];
    (0..words)
        .map(|i| FILLER[i % FILLER.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn render(record: &DeclarationRecord) -> GeneratedDocument {
    init_logging();
    render_request(record, &RenderOptions::default()).expect("render")
}

pub fn texts(doc: &GeneratedDocument) -> Vec<String> {
    doc.texts().map(str::to_string).collect()
}

pub fn count_exact(doc: &GeneratedDocument, needle: &str) -> usize {
    doc.texts().filter(|t| *t == needle).count()
}

pub fn count_prefix(doc: &GeneratedDocument, prefix: &str) -> usize {
    doc.texts().filter(|t| t.starts_with(prefix)).count()
}

/// Number printed in front of the section title ending in `title`.
pub fn section_number(doc: &GeneratedDocument, title: &str) -> Option<u32> {
    let suffix = format!(". {title}");
    doc.texts()
        .find_map(|t| t.strip_suffix(suffix.as_str()))
        .and_then(|n| n.parse().ok())
}

/// Footer runs sit in the bottom 20 mm band.
pub fn is_footer(run: &TextRun) -> bool {
    run.y > PAGE_HEIGHT - 20.0 * MM
}

pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    fs::create_dir_all(&dir).expect("create output dir");
    dir
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn contains(haystack: &[u8], needle: &str) -> bool {
    find(haystack, needle.as_bytes()).is_some()
}

/// Inflate every FlateDecode-able stream in a serialized PDF.
pub fn inflated_streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream\n") {
        let body = &rest[start + b"stream\n".len()..];
        let Some(end) = find(body, b"\nendstream") else {
            break;
        };
        if let Ok(data) = miniz_oxide::inflate::decompress_to_vec_zlib(&body[..end]) {
            out.push(data);
        }
        rest = &body[end + b"\nendstream".len()..];
    }
    out
}
