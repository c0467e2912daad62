mod common;

use imunidade_pdf::{
    Category, ColorTheme, DeclarationRecord, Error, GENERAL_DECLARATION_TITLE, GeneratedDocument,
    RequestForm, SIDE_BAR_WIDTH, SIGNATURE_CAPTION, specific_declarations,
};

#[test]
fn banner_matches_category() {
    for category in Category::ALL {
        let doc = common::render(&common::record_for(category));
        assert_eq!(common::count_exact(&doc, category.title()), 1, "{category}");
        assert_eq!(common::count_exact(&doc, category.citation()), 1, "{category}");
        for other in Category::ALL.into_iter().filter(|c| *c != category) {
            assert_eq!(common::count_exact(&doc, other.title()), 0, "{category} vs {other}");
        }
    }
}

#[test]
fn side_bar_uses_category_primary() {
    for category in Category::ALL {
        let doc = common::render(&common::record_for(category));
        let primary = ColorTheme::for_category(category).primary;
        for page in &doc.pages {
            let bar = page
                .rects()
                .find(|r| r.x == 0.0 && r.y == 0.0 && r.width == SIDE_BAR_WIDTH)
                .expect("side bar");
            assert_eq!(bar.fill, Some(primary), "{category}");
        }
    }
}

#[test]
fn themes_are_distinct() {
    let primaries: std::collections::HashSet<_> = Category::ALL
        .into_iter()
        .map(|c| ColorTheme::for_category(c).primary)
        .collect();
    assert_eq!(primaries.len(), Category::ALL.len());
}

#[test]
fn declaration_bullets_per_category() {
    let expected = [
        (Category::ReciprocalEntity, 1),
        (Category::Temple, 1),
        (Category::PartyUnionEducationWelfare, 4),
        (Category::PressPrint, 1),
        (Category::PhonogramVideogram, 2),
    ];
    for (category, n) in expected {
        assert_eq!(specific_declarations(category).len(), n);
        let doc = common::render(&common::record_for(category));
        assert_eq!(common::count_prefix(&doc, "• Declaro"), n, "{category}");
    }
}

/// Text from the general declaration to the signature caption, footers
/// excluded.
fn closing_texts(doc: &GeneratedDocument) -> Vec<String> {
    let runs: Vec<String> = doc
        .pages
        .iter()
        .flat_map(|p| p.texts())
        .filter(|r| !common::is_footer(r))
        .map(|r| r.text.clone())
        .collect();
    let start = runs
        .iter()
        .position(|t| t == GENERAL_DECLARATION_TITLE)
        .expect("general declaration");
    let end = runs
        .iter()
        .position(|t| t == SIGNATURE_CAPTION)
        .expect("signature");
    runs[start..=end].to_vec()
}

/// Text before the category banner plus the identification section.
fn opening_texts(doc: &GeneratedDocument, category: Category) -> Vec<String> {
    let runs = common::texts(doc);
    let end = runs
        .iter()
        .position(|t| t.ends_with(". DADOS ESPECÍFICOS DO PEDIDO"))
        .expect("data section");
    runs[..end]
        .iter()
        .filter(|t| *t != category.title() && *t != category.citation())
        .cloned()
        .collect()
}

#[test]
fn only_category_parts_change_with_category() {
    let base = common::render(&common::record_for(Category::ReciprocalEntity));
    for category in Category::ALL.into_iter().skip(1) {
        let doc = common::render(&common::record_for(category));
        assert_eq!(
            opening_texts(&doc, category),
            opening_texts(&base, Category::ReciprocalEntity),
            "{category}"
        );
        assert_eq!(closing_texts(&doc), closing_texts(&base), "{category}");
    }
}

#[test]
fn unknown_tag_fails_instead_of_defaulting() {
    assert!(matches!(
        Category::from_tag("imoveis"),
        Err(Error::InvalidCategory(tag)) if tag == "imoveis"
    ));
    let form = RequestForm {
        category: "igrejas".to_string(),
        legal_name: "Igreja Exemplo".to_string(),
        ..RequestForm::default()
    };
    assert!(matches!(
        DeclarationRecord::try_from(&form),
        Err(Error::InvalidCategory(_))
    ));
}

#[test]
fn tags_round_trip() {
    for category in Category::ALL {
        assert_eq!(category.tag().parse::<Category>().ok(), Some(category));
        assert_eq!(category.to_string(), category.tag());
    }
    assert_eq!(" templos ".parse::<Category>().ok(), Some(Category::Temple));
}
