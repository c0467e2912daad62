mod common;

use imunidade_pdf::{Category, SectionPlan};

const DATA: &str = "DADOS ESPECÍFICOS DO PEDIDO";
const OBSERVATIONS: &str = "OBSERVAÇÕES ADICIONAIS";
const DECLARATIONS: &str = "DECLARAÇÕES ESPECÍFICAS";
const REPRESENTATIVE: &str = "REPRESENTANTE LEGAL";

#[test]
fn plan_follows_optional_sections() {
    let cases = [
        (false, false, None, 2, None, 3),
        (true, false, Some(2), 3, None, 4),
        (false, true, None, 2, Some(3), 4),
        (true, true, Some(2), 3, Some(4), 5),
    ];
    for (rep, obs, rep_n, data_n, obs_n, decl_n) in cases {
        let plan = SectionPlan::new(rep, obs);
        assert_eq!(plan.representative, rep_n, "rep={rep} obs={obs}");
        assert_eq!(plan.request_data, data_n, "rep={rep} obs={obs}");
        assert_eq!(plan.observations, obs_n, "rep={rep} obs={obs}");
        assert_eq!(plan.declarations, decl_n, "rep={rep} obs={obs}");
    }
}

#[test]
fn no_representative_no_observations() {
    let doc = common::render(&common::temple_record());
    assert_eq!(common::section_number(&doc, "IDENTIFICAÇÃO DO DECLARANTE"), Some(1));
    assert_eq!(common::section_number(&doc, REPRESENTATIVE), None);
    assert_eq!(common::section_number(&doc, DATA), Some(2));
    assert_eq!(common::section_number(&doc, OBSERVATIONS), None);
    assert_eq!(common::section_number(&doc, DECLARATIONS), Some(3));
}

#[test]
fn representative_only() {
    let doc = common::render(&common::with_representative(common::temple_record()));
    assert_eq!(common::section_number(&doc, REPRESENTATIVE), Some(2));
    assert_eq!(common::section_number(&doc, DATA), Some(3));
    assert_eq!(common::section_number(&doc, OBSERVATIONS), None);
    assert_eq!(common::section_number(&doc, DECLARATIONS), Some(4));
}

#[test]
fn observations_only() {
    let record = common::with_observations(common::temple_record(), "Imóvel alugado.");
    let doc = common::render(&record);
    assert_eq!(common::section_number(&doc, REPRESENTATIVE), None);
    assert_eq!(common::section_number(&doc, DATA), Some(2));
    assert_eq!(common::section_number(&doc, OBSERVATIONS), Some(3));
    assert_eq!(common::section_number(&doc, DECLARATIONS), Some(4));
}

#[test]
fn representative_and_observations() {
    let record = common::with_observations(
        common::with_representative(common::temple_record()),
        "Imóvel alugado.",
    );
    let doc = common::render(&record);
    assert_eq!(common::section_number(&doc, REPRESENTATIVE), Some(2));
    assert_eq!(common::section_number(&doc, DATA), Some(3));
    assert_eq!(common::section_number(&doc, OBSERVATIONS), Some(4));
    assert_eq!(common::section_number(&doc, DECLARATIONS), Some(5));
}

#[test]
fn blank_optional_sections_do_not_shift_numbers() {
    let mut record = common::with_observations(common::temple_record(), "   \n  ");
    record.representative = Some(imunidade_pdf::Representative {
        name: "  ".to_string(),
        tax_id: Some("123.456.789-00".to_string()),
        role: None,
    });
    let doc = common::render(&record);
    assert_eq!(common::section_number(&doc, REPRESENTATIVE), None);
    assert_eq!(common::section_number(&doc, OBSERVATIONS), None);
    assert_eq!(common::section_number(&doc, DATA), Some(2));
    assert_eq!(common::section_number(&doc, DECLARATIONS), Some(3));
    assert_eq!(common::count_exact(&doc, "CPF:"), 0);
}

#[test]
fn sections_appear_in_slot_order() {
    let record = common::with_observations(
        common::with_representative(common::record_for(Category::PressPrint)),
        "Sem observações relevantes.",
    );
    let doc = common::render(&record);
    let titles: Vec<String> = common::texts(&doc)
        .into_iter()
        .filter(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()) && t.contains(". "))
        .collect();
    assert_eq!(
        titles,
        vec![
            "1. IDENTIFICAÇÃO DO DECLARANTE",
            "2. REPRESENTANTE LEGAL",
            "3. DADOS ESPECÍFICOS DO PEDIDO",
            "4. OBSERVAÇÕES ADICIONAIS",
            "5. DECLARAÇÕES ESPECÍFICAS",
        ]
    );
}
