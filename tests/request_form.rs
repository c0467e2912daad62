mod common;

use serde_json::{Value, json};

use imunidade_pdf::{
    Category, CategoryDetails, DeclarationRecord, Error, Jurisdiction, RenderOptions, RequestForm,
    VisualStyle, reference, render_form, validate::validate_form,
};

fn temple_json() -> Value {
    json!({
        "tipo": "templos",
        "razaoSocial": "Igreja Exemplo",
        "cnpj": "12.345.678/0001-90",
        "endereco": "Rua A, 100",
        "telefone": "(69) 99999-0000",
        "email": "a@b.com",
        "nomeTemplo": "Igreja Exemplo",
        "enderecoImovel": "Rua A, 100",
        "matriculaImovel": "   ",
        "nomeRepresentante": "",
        "dataDeclaracao": "2025-01-10",
        "declaracaoFinalidade": true,
        "aceitoTermos": true
    })
}

fn form(value: Value) -> RequestForm {
    RequestForm::from_json(&value.to_string()).expect("form json")
}

#[test]
fn valid_form_renders() {
    let form = form(temple_json());
    assert!(validate_form(&form).is_ok());

    let doc = render_form(&form, &RenderOptions::default()).expect("render");
    assert_eq!(doc.category, Category::Temple);
    assert!(doc.file_name.starts_with("Requerimento_Imunidade_Templos_Igreja_Exemplo_"));
    assert_eq!(common::count_exact(&doc, "2. DADOS ESPECÍFICOS DO PEDIDO"), 1);
    assert_eq!(common::count_exact(&doc, "Matrícula(s) do Imóvel:"), 0);
}

#[test]
fn conversion_normalizes_blank_optionals() {
    let record = DeclarationRecord::try_from(&form(temple_json())).expect("record");
    assert_eq!(record, common::temple_record());
    assert!(record.representative().is_none());
}

#[test]
fn reports_every_violation() {
    let mut value = temple_json();
    value["cnpj"] = json!("12345678000190");
    value["email"] = json!("sem-arroba");
    value["cpfRepresentante"] = json!("123");
    value["declaracaoFinalidade"] = json!(false);
    value["aceitoTermos"] = json!(false);

    let errors = validate_form(&form(value.clone())).expect_err("invalid");
    for field in ["cnpj", "email", "cpfRepresentante", "declaracaoFinalidade", "aceitoTermos"] {
        assert!(errors.has_field(field), "missing {field}: {errors}");
    }
    assert_eq!(errors.len(), 5);

    match render_form(&form(value), &RenderOptions::default()) {
        Err(Error::Validation(e)) => assert_eq!(e.len(), 5),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn category_groups_are_validated() {
    let value = json!({
        "tipo": "partidos",
        "razaoSocial": "Sindicato dos Servidores",
        "cnpj": "12.345.678/0001-90",
        "endereco": "Rua Dom Pedro II, 10",
        "telefone": "(69) 3222-0000",
        "email": "contato@sindicato.org.br",
        "dataDeclaracao": "2025-02-01",
        "aceitoTermos": true,
        "nomeEntidade": "Sindicato",
        "tipoEntidade": "Cooperativa",
        "descricaoBem": "Sede",
        "naoDistribuiPatrimonio": true,
        "aplicaRecursosNoPais": true
    });
    let errors = validate_form(&form(value)).expect_err("invalid");
    assert!(errors.has_field("tipoEntidade"));
    assert!(errors.has_field("descricaoBem"));
    assert!(errors.has_field("mantemEscrituacao"));
    assert!(errors.has_field("declaracaoVinculo"));
    assert!(!errors.has_field("naoDistribuiPatrimonio"));
    assert!(!errors.has_field("nomeEntidade"));
}

#[test]
fn phonogram_requires_nationality_attestation() {
    let value = json!({
        "tipo": "fonogramas",
        "razaoSocial": "Estúdio Beradeiro",
        "cnpj": "12.345.678/0001-90",
        "endereco": "Rua Joaquim Nabuco, 99",
        "telefone": "(69) 3222-1111",
        "email": "estudio@example.com",
        "dataDeclaracao": "2025-02-01",
        "aceitoTermos": true,
        "nomeEntidade": "Estúdio Beradeiro",
        "descricaoAtividade": "Produção de fonogramas",
        "declaracaoVinculo": true
    });
    let errors = validate_form(&form(value)).expect_err("invalid");
    assert_eq!(errors.len(), 1);
    assert!(errors.has_field("declaracaoNacionalidade"));
}

#[test]
fn unknown_category_tag() {
    let mut value = temple_json();
    value["tipo"] = json!("igrejas");
    let form = form(value);

    let errors = validate_form(&form).expect_err("invalid");
    assert!(errors.has_field("tipo"));
    assert!(matches!(
        DeclarationRecord::try_from(&form),
        Err(Error::InvalidCategory(tag)) if tag == "igrejas"
    ));
}

#[test]
fn jurisdiction_tags_map_to_labels() {
    let value = json!({
        "tipo": "reciproca",
        "razaoSocial": "Município de Porto Velho",
        "naturezaJuridica": "DistritoFederal",
        "descricaoBem": "Prédio público"
    });
    let record = DeclarationRecord::try_from(&form(value)).expect("record");
    match &record.details {
        CategoryDetails::ReciprocalEntity { jurisdiction, .. } => {
            assert_eq!(jurisdiction, &Some(Jurisdiction::FederalDistrict));
            assert_eq!(Jurisdiction::FederalDistrict.label(), "Distrito Federal");
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        RequestForm::from_json("{\"tipo\": "),
        Err(Error::Json(_))
    ));
}

#[test]
fn style_names_parse() {
    assert_eq!("plain".parse::<VisualStyle>(), Ok(VisualStyle::Plain));
    assert_eq!(" Decorated ".parse::<VisualStyle>(), Ok(VisualStyle::Decorated));
    assert!("glossy".parse::<VisualStyle>().is_err());
}

#[test]
fn reference_tables_cover_every_category() {
    for category in Category::ALL {
        assert!(!reference::required_documents(category).is_empty());
        assert!(!reference::important_notes(category).is_empty());
    }
    assert_eq!(reference::CERTIFICATE_VALIDITY, "5 (cinco) anos");
}
