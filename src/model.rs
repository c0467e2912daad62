use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

pub type Rgb = [u8; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    ReciprocalEntity,
    Temple,
    PartyUnionEducationWelfare,
    PressPrint,
    PhonogramVideogram,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::ReciprocalEntity,
        Category::Temple,
        Category::PartyUnionEducationWelfare,
        Category::PressPrint,
        Category::PhonogramVideogram,
    ];

    /// Tag used by the request form and in generated file names.
    pub fn tag(self) -> &'static str {
        match self {
            Category::ReciprocalEntity => "reciproca",
            Category::Temple => "templos",
            Category::PartyUnionEducationWelfare => "partidos",
            Category::PressPrint => "livros",
            Category::PhonogramVideogram => "fonogramas",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, Error> {
        Category::ALL
            .into_iter()
            .find(|c| c.tag() == tag)
            .ok_or_else(|| Error::InvalidCategory(tag.to_string()))
    }

    /// Banner title printed under the document title.
    pub fn title(self) -> &'static str {
        match self {
            Category::ReciprocalEntity => "Imunidade Recíproca (Entes Federativos)",
            Category::Temple => "Imunidade - Templos de Qualquer Culto",
            Category::PartyUnionEducationWelfare => {
                "Imunidade - Partidos, Sindicatos, Educação e Assistência Social"
            }
            Category::PressPrint => "Imunidade - Livros, Jornais e Periódicos",
            Category::PhonogramVideogram => "Imunidade - Fonogramas e Videofonogramas Musicais",
        }
    }

    /// Constitutional citation for the category.
    pub fn citation(self) -> &'static str {
        match self {
            Category::ReciprocalEntity => "Art. 150, VI, \"a\", CF/88",
            Category::Temple => "Art. 150, VI, \"b\", CF/88",
            Category::PartyUnionEducationWelfare => "Art. 150, VI, \"c\", CF/88",
            Category::PressPrint => "Art. 150, VI, \"d\", CF/88",
            Category::PhonogramVideogram => "Art. 150, VI, \"e\", CF/88",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_tag(s.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Jurisdiction {
    Union,
    State,
    Municipality,
    FederalDistrict,
    /// Tag outside the known set, printed as submitted.
    Other(String),
}

impl Jurisdiction {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Uniao" => Jurisdiction::Union,
            "Estado" => Jurisdiction::State,
            "Municipio" => Jurisdiction::Municipality,
            "DistritoFederal" => Jurisdiction::FederalDistrict,
            other => Jurisdiction::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Jurisdiction::Union => "União",
            Jurisdiction::State => "Estado",
            Jurisdiction::Municipality => "Município",
            Jurisdiction::FederalDistrict => "Distrito Federal",
            Jurisdiction::Other(raw) => raw,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntitySubtype {
    PoliticalParty,
    LaborUnion,
    EducationInstitution,
    WelfareInstitution,
    Other(String),
}

impl EntitySubtype {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PartidoPolitico" => EntitySubtype::PoliticalParty,
            "EntidadeSindical" => EntitySubtype::LaborUnion,
            "InstituicaoEducacao" => EntitySubtype::EducationInstitution,
            "InstituicaoAssistencia" => EntitySubtype::WelfareInstitution,
            other => EntitySubtype::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EntitySubtype::PoliticalParty => "Partido Político",
            EntitySubtype::LaborUnion => "Entidade Sindical",
            EntitySubtype::EducationInstitution => "Instituição de Educação",
            EntitySubtype::WelfareInstitution => "Instituição de Assistência Social",
            EntitySubtype::Other(raw) => raw,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Declarant {
    pub legal_name: String,
    /// CNPJ, `00.000.000/0000-00`.
    pub tax_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Representative {
    pub name: String,
    /// CPF, `000.000.000-00`.
    pub tax_id: Option<String>,
    pub role: Option<String>,
}

/// Category-specific field group. Only the group matching the category exists.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryDetails {
    ReciprocalEntity {
        jurisdiction: Option<Jurisdiction>,
        asset_description: Option<String>,
        property_address: Option<String>,
        property_registration: Option<String>,
    },
    Temple {
        temple_name: Option<String>,
        property_address: Option<String>,
        property_registration: Option<String>,
    },
    PartyUnionEducationWelfare {
        entity_name: Option<String>,
        entity_subtype: Option<EntitySubtype>,
        asset_description: Option<String>,
        property_address: Option<String>,
        property_registration: Option<String>,
        holds_welfare_certificate: bool,
    },
    PressPrint {
        entity_name: Option<String>,
        activity_description: Option<String>,
    },
    PhonogramVideogram {
        entity_name: Option<String>,
        activity_description: Option<String>,
    },
}

impl CategoryDetails {
    pub fn category(&self) -> Category {
        match self {
            CategoryDetails::ReciprocalEntity { .. } => Category::ReciprocalEntity,
            CategoryDetails::Temple { .. } => Category::Temple,
            CategoryDetails::PartyUnionEducationWelfare { .. } => {
                Category::PartyUnionEducationWelfare
            }
            CategoryDetails::PressPrint { .. } => Category::PressPrint,
            CategoryDetails::PhonogramVideogram { .. } => Category::PhonogramVideogram,
        }
    }

    /// Ordered (label, value) pairs for the "specific request data" section.
    /// Absent values stay in the list as `None` and are skipped at render time.
    pub fn request_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        match self {
            CategoryDetails::ReciprocalEntity {
                jurisdiction,
                asset_description,
                property_address,
                property_registration,
            } => vec![
                (
                    "Natureza Jurídica",
                    jurisdiction.as_ref().map(Jurisdiction::label),
                ),
                ("Descrição do Bem/Serviço", text(asset_description)),
                ("Endereço do Imóvel", text(property_address)),
                ("Matrícula(s) do Imóvel", text(property_registration)),
            ],
            CategoryDetails::Temple {
                temple_name,
                property_address,
                property_registration,
            } => vec![
                ("Nome do Templo", text(temple_name)),
                ("Endereço do Imóvel", text(property_address)),
                ("Matrícula(s) do Imóvel", text(property_registration)),
            ],
            CategoryDetails::PartyUnionEducationWelfare {
                entity_name,
                entity_subtype,
                asset_description,
                property_address,
                property_registration,
                holds_welfare_certificate,
            } => vec![
                ("Nome da Entidade", text(entity_name)),
                (
                    "Tipo de Entidade",
                    entity_subtype.as_ref().map(EntitySubtype::label),
                ),
                ("Descrição do Bem/Serviço", text(asset_description)),
                ("Endereço do Imóvel", text(property_address)),
                ("Matrícula(s) do Imóvel", text(property_registration)),
                (
                    "Possui CEBAS",
                    holds_welfare_certificate.then_some("Sim"),
                ),
            ],
            CategoryDetails::PressPrint {
                entity_name,
                activity_description,
            }
            | CategoryDetails::PhonogramVideogram {
                entity_name,
                activity_description,
            } => vec![
                ("Nome da Entidade", text(entity_name)),
                ("Descrição da Atividade", text(activity_description)),
            ],
        }
    }
}

/// The single input to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclarationRecord {
    pub declarant: Declarant,
    pub representative: Option<Representative>,
    pub observations: Option<String>,
    /// ISO date (`2025-01-10`) as submitted by the form.
    pub declaration_date: String,
    pub details: CategoryDetails,
}

impl DeclarationRecord {
    pub fn category(&self) -> Category {
        self.details.category()
    }

    /// Representative block, present only when the name is not blank.
    pub fn representative(&self) -> Option<&Representative> {
        self.representative
            .as_ref()
            .filter(|r| !r.name.trim().is_empty())
    }

    /// Observations text, present only when not blank after trimming.
    pub fn observations(&self) -> Option<&str> {
        self.observations
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

/// Flat request payload as submitted by the data-entry form.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestForm {
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(rename = "razaoSocial")]
    pub legal_name: String,
    #[serde(rename = "cnpj")]
    pub tax_id: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "nomeRepresentante")]
    pub representative_name: Option<String>,
    #[serde(rename = "cpfRepresentante")]
    pub representative_tax_id: Option<String>,
    #[serde(rename = "cargoRepresentante")]
    pub representative_role: Option<String>,
    #[serde(rename = "observacoes")]
    pub observations: Option<String>,
    #[serde(rename = "dataDeclaracao")]
    pub declaration_date: String,
    #[serde(rename = "aceitoTermos")]
    pub accepted_terms: bool,

    #[serde(rename = "naturezaJuridica")]
    pub jurisdiction: Option<String>,
    #[serde(rename = "descricaoBem")]
    pub asset_description: Option<String>,
    #[serde(rename = "enderecoImovel")]
    pub property_address: Option<String>,
    #[serde(rename = "matriculaImovel")]
    pub property_registration: Option<String>,
    #[serde(rename = "nomeTemplo")]
    pub temple_name: Option<String>,
    #[serde(rename = "nomeEntidade")]
    pub entity_name: Option<String>,
    #[serde(rename = "tipoEntidade")]
    pub entity_subtype: Option<String>,
    #[serde(rename = "descricaoAtividade")]
    pub activity_description: Option<String>,
    #[serde(rename = "possuiCEBAS")]
    pub holds_welfare_certificate: Option<bool>,

    #[serde(rename = "declaracaoVinculo")]
    pub attests_essential_purpose: Option<bool>,
    #[serde(rename = "declaracaoFinalidade")]
    pub attests_temple_purpose: Option<bool>,
    #[serde(rename = "naoDistribuiPatrimonio")]
    pub attests_no_distribution: Option<bool>,
    #[serde(rename = "aplicaRecursosNoPais")]
    pub attests_domestic_application: Option<bool>,
    #[serde(rename = "mantemEscrituacao")]
    pub attests_bookkeeping: Option<bool>,
    #[serde(rename = "declaracaoNacionalidade")]
    pub attests_brazilian_authorship: Option<bool>,
}

impl RequestForm {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl TryFrom<&RequestForm> for DeclarationRecord {
    type Error = Error;

    fn try_from(form: &RequestForm) -> Result<Self, Error> {
        let category = Category::from_tag(form.category.trim())?;

        let details = match category {
            Category::ReciprocalEntity => CategoryDetails::ReciprocalEntity {
                jurisdiction: non_blank(&form.jurisdiction).map(|t| Jurisdiction::from_tag(&t)),
                asset_description: non_blank(&form.asset_description),
                property_address: non_blank(&form.property_address),
                property_registration: non_blank(&form.property_registration),
            },
            Category::Temple => CategoryDetails::Temple {
                temple_name: non_blank(&form.temple_name),
                property_address: non_blank(&form.property_address),
                property_registration: non_blank(&form.property_registration),
            },
            Category::PartyUnionEducationWelfare => CategoryDetails::PartyUnionEducationWelfare {
                entity_name: non_blank(&form.entity_name),
                entity_subtype: non_blank(&form.entity_subtype)
                    .map(|t| EntitySubtype::from_tag(&t)),
                asset_description: non_blank(&form.asset_description),
                property_address: non_blank(&form.property_address),
                property_registration: non_blank(&form.property_registration),
                holds_welfare_certificate: form.holds_welfare_certificate.unwrap_or(false),
            },
            Category::PressPrint => CategoryDetails::PressPrint {
                entity_name: non_blank(&form.entity_name),
                activity_description: non_blank(&form.activity_description),
            },
            Category::PhonogramVideogram => CategoryDetails::PhonogramVideogram {
                entity_name: non_blank(&form.entity_name),
                activity_description: non_blank(&form.activity_description),
            },
        };

        let representative = non_blank(&form.representative_name).map(|name| Representative {
            name,
            tax_id: non_blank(&form.representative_tax_id),
            role: non_blank(&form.representative_role),
        });

        Ok(DeclarationRecord {
            declarant: Declarant {
                legal_name: form.legal_name.trim().to_string(),
                tax_id: form.tax_id.trim().to_string(),
                address: form.address.trim().to_string(),
                phone: form.phone.trim().to_string(),
                email: form.email.trim().to_string(),
            },
            representative,
            observations: non_blank(&form.observations),
            declaration_date: form.declaration_date.trim().to_string(),
            details,
        })
    }
}
