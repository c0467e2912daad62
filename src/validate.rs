//! Form validation applied before a request reaches the renderer.
//!
//! Every rule runs; the caller gets the full list of violations at once so the
//! form can be corrected in one pass.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Category, RequestForm};

static CNPJ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}$").expect("valid CNPJ pattern"));
static CPF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("valid CPF pattern"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Form key of the offending field, e.g. `razaoSocial`.
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn too_short(field: &str, label: &str, min: usize) -> Self {
        Self::new(
            field,
            format!("{label} deve ter no mínimo {min} caracteres"),
        )
    }

    fn attestation_required(field: &str) -> Self {
        Self::new(field, "Declaração obrigatória")
            .with_suggestion("Marque a declaração para prosseguir")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// True when some error refers to the given form key.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn validate_min_len(
    value: Option<&str>,
    field: &str,
    label: &str,
    min: usize,
    errors: &mut ValidationErrors,
) {
    let len = value.map(|v| v.trim().chars().count()).unwrap_or(0);
    if len < min {
        errors.add(ValidationError::too_short(field, label, min));
    }
}

fn validate_pattern(
    value: &str,
    re: &Regex,
    field: &str,
    message: &str,
    example: &str,
    errors: &mut ValidationErrors,
) {
    if !re.is_match(value.trim()) {
        errors.add(
            ValidationError::new(field, message).with_suggestion(format!("Formato: {example}")),
        );
    }
}

fn validate_selected(
    value: Option<&str>,
    allowed: &[&str],
    field: &str,
    message: &str,
    errors: &mut ValidationErrors,
) {
    let selected = value.map(str::trim).unwrap_or("");
    if !allowed.contains(&selected) {
        errors.add(ValidationError::new(field, message));
    }
}

fn validate_attestation(value: Option<bool>, field: &str, errors: &mut ValidationErrors) {
    if value != Some(true) {
        errors.add(ValidationError::attestation_required(field));
    }
}

/// Validate the common block and the group for the form's category.
///
/// An unknown category tag is reported as a `tipo` error here; converting the
/// form into a record fails with `Error::InvalidCategory` for the same input.
pub fn validate_form(form: &RequestForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    validate_min_len(Some(&form.legal_name), "razaoSocial", "Razão social", 3, &mut errors);
    validate_pattern(
        &form.tax_id,
        &CNPJ_RE,
        "cnpj",
        "CNPJ inválido",
        "00.000.000/0000-00",
        &mut errors,
    );
    validate_min_len(Some(&form.address), "endereco", "Endereço", 10, &mut errors);
    validate_min_len(Some(&form.phone), "telefone", "Telefone", 10, &mut errors);
    if !EMAIL_RE.is_match(form.email.trim()) {
        errors.add(ValidationError::new("email", "Email inválido"));
    }
    if form.declaration_date.trim().is_empty() {
        errors.add(ValidationError::new("dataDeclaracao", "Data da declaração é obrigatória"));
    }
    if let Some(cpf) = form.representative_tax_id.as_deref().filter(|v| !v.trim().is_empty()) {
        validate_pattern(
            cpf,
            &CPF_RE,
            "cpfRepresentante",
            "CPF inválido",
            "000.000.000-00",
            &mut errors,
        );
    }
    if !form.accepted_terms {
        errors.add(
            ValidationError::new("aceitoTermos", "Você deve aceitar os termos da declaração"),
        );
    }

    let Ok(category) = form.category.parse::<Category>() else {
        errors.add(
            ValidationError::new(
                "tipo",
                format!("Tipo de imunidade inválido: {:?}", form.category),
            )
            .with_suggestion("Use reciproca, templos, partidos, livros ou fonogramas"),
        );
        return errors.into_result();
    };

    match category {
        Category::ReciprocalEntity => {
            validate_selected(
                form.jurisdiction.as_deref(),
                &["Uniao", "Estado", "Municipio", "DistritoFederal"],
                "naturezaJuridica",
                "Selecione a natureza jurídica",
                &mut errors,
            );
            validate_min_len(
                form.asset_description.as_deref(),
                "descricaoBem",
                "Descrição do bem/serviço",
                10,
                &mut errors,
            );
            validate_attestation(form.attests_essential_purpose, "declaracaoVinculo", &mut errors);
        }
        Category::Temple => {
            validate_min_len(
                form.temple_name.as_deref(),
                "nomeTemplo",
                "Nome do templo",
                3,
                &mut errors,
            );
            validate_min_len(
                form.property_address.as_deref(),
                "enderecoImovel",
                "Endereço do imóvel",
                10,
                &mut errors,
            );
            validate_attestation(form.attests_temple_purpose, "declaracaoFinalidade", &mut errors);
        }
        Category::PartyUnionEducationWelfare => {
            validate_min_len(
                form.entity_name.as_deref(),
                "nomeEntidade",
                "Nome da entidade",
                3,
                &mut errors,
            );
            validate_selected(
                form.entity_subtype.as_deref(),
                &[
                    "PartidoPolitico",
                    "EntidadeSindical",
                    "InstituicaoEducacao",
                    "InstituicaoAssistencia",
                ],
                "tipoEntidade",
                "Selecione o tipo de entidade",
                &mut errors,
            );
            validate_min_len(
                form.asset_description.as_deref(),
                "descricaoBem",
                "Descrição do bem/serviço",
                10,
                &mut errors,
            );
            validate_attestation(
                form.attests_no_distribution,
                "naoDistribuiPatrimonio",
                &mut errors,
            );
            validate_attestation(
                form.attests_domestic_application,
                "aplicaRecursosNoPais",
                &mut errors,
            );
            validate_attestation(form.attests_bookkeeping, "mantemEscrituacao", &mut errors);
            validate_attestation(form.attests_essential_purpose, "declaracaoVinculo", &mut errors);
        }
        Category::PressPrint | Category::PhonogramVideogram => {
            validate_min_len(
                form.entity_name.as_deref(),
                "nomeEntidade",
                "Nome da entidade",
                3,
                &mut errors,
            );
            validate_min_len(
                form.activity_description.as_deref(),
                "descricaoAtividade",
                "Descrição da atividade",
                10,
                &mut errors,
            );
            if category == Category::PhonogramVideogram {
                validate_attestation(
                    form.attests_brazilian_authorship,
                    "declaracaoNacionalidade",
                    &mut errors,
                );
            }
            validate_attestation(form.attests_essential_purpose, "declaracaoVinculo", &mut errors);
        }
    }

    errors.into_result()
}
