//! Dengue notification record and its field catalog.
//!
//! The record is flat: every field is an optional string on the wire, and the server assigns
//! the numeric `id`. The catalog ([`FIELDS`]) is generated from the same declaration as the
//! struct, so the by-name accessors, the field metadata, and the serialised shape can never
//! drift apart.
//!
//! Sections exist for presentation only. Nothing in the submit workflow depends on them.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Presentational grouping of record fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Identification,
    Patient,
    Residence,
    SignsSymptoms,
    Comorbidities,
    LabResults,
    Hospitalisation,
    Closure,
}

impl Section {
    /// All sections in display order.
    pub const ALL: [Section; 8] = [
        Section::Identification,
        Section::Patient,
        Section::Residence,
        Section::SignsSymptoms,
        Section::Comorbidities,
        Section::LabResults,
        Section::Hospitalisation,
        Section::Closure,
    ];

    /// Heading shown above the section.
    pub fn title(self) -> &'static str {
        match self {
            Section::Identification => "Identificação da Notificação",
            Section::Patient => "Dados do Paciente",
            Section::Residence => "Dados de Residência e Procedência",
            Section::SignsSymptoms => "Sinais e Sintomas Clínicos",
            Section::Comorbidities => "Doenças Pré-existentes",
            Section::LabResults => "Exames Laboratoriais",
            Section::Hospitalisation => "Hospitalização e Local da Infecção",
            Section::Closure => "Encerramento do Caso",
        }
    }
}

/// How a field's value is entered and normalised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text or a coded choice.
    Text,
    /// Member of the canonical date-field set; date values are sent as `YYYY-MM-DD`.
    Date,
}

/// Static metadata for one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub kind: FieldKind,
    pub required: bool,
}

macro_rules! required_flag {
    () => {
        false
    };
    ($marker:ident) => {
        true
    };
}

macro_rules! notification_record {
    (
        $(
            $section:ident {
                $( $field:ident : $kind:ident $(+ $required:ident)? => $label:literal ),* $(,)?
            }
        )*
    ) => {
        /// A dengue notification as exchanged with the API.
        ///
        /// Absent fields are omitted from the serialised JSON.
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
        pub struct NotificationRecord {
            /// Identifier assigned by the server.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub id: Option<i64>,
            $($(
                #[doc = $label]
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )*)*
        }

        /// Every record field in display order.
        pub const FIELDS: &[FieldSpec] = &[
            $($(
                FieldSpec {
                    name: stringify!($field),
                    label: $label,
                    section: Section::$section,
                    kind: FieldKind::$kind,
                    required: required_flag!($($required)?),
                },
            )*)*
        ];

        impl NotificationRecord {
            /// Read a field by its wire name.
            ///
            /// Returns `None` both for unknown names and for absent values.
            pub fn get(&self, name: &str) -> Option<&str> {
                match name {
                    $($( stringify!($field) => self.$field.as_deref(), )*)*
                    _ => None,
                }
            }

            /// Mutable access to a field by its wire name.
            pub fn get_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
                match name {
                    $($( stringify!($field) => Some(&mut self.$field), )*)*
                    _ => None,
                }
            }

            /// Overwrite a field by its wire name.
            ///
            /// # Errors
            ///
            /// Returns [`CoreError::UnknownField`] if `name` is not part of the catalog.
            pub fn set(&mut self, name: &str, value: Option<String>) -> CoreResult<()> {
                let slot = self
                    .get_mut(name)
                    .ok_or_else(|| CoreError::UnknownField(name.to_string()))?;
                *slot = value;
                Ok(())
            }
        }
    };
}

notification_record! {
    Identification {
        tp_not: Text + required => "Tipo de notificação",
        id_agravo: Text => "Agravo/doença",
        dt_notific: Date + required => "Data da notificação",
        sem_not: Text => "Semana epidemiológica da notificação",
        nu_ano: Text => "Ano da notificação",
        sg_uf_not: Text + required => "UF de notificação",
        id_municip: Text => "Município de notificação",
        id_regiona: Text => "Regional de saúde",
        id_unidade: Text => "Unidade de saúde",
    }
    Patient {
        dt_sin_pri: Date => "Data dos primeiros sintomas",
        sem_pri: Text => "Semana epidemiológica dos primeiros sintomas",
        ano_nasc: Text => "Ano de nascimento",
        nu_idade_n: Text => "Idade",
        cs_sexo: Text + required => "Sexo",
        cs_gestant: Text => "Gestante",
        cs_raca: Text => "Raça/cor",
        cs_escol_n: Text => "Escolaridade",
    }
    Residence {
        sg_uf: Text => "UF de residência",
        id_mn_resi: Text => "Município de residência",
        id_rg_resi: Text => "Regional de residência",
        id_pais: Text => "País",
        dt_invest: Date => "Data da investigação",
        id_ocupa_n: Text => "Ocupação",
    }
    SignsSymptoms {
        febre: Text => "Febre",
        mialgia: Text => "Mialgia",
        cefaleia: Text => "Cefaleia",
        exantema: Text => "Exantema",
        vomito: Text => "Vômito",
        nausea: Text => "Náusea",
        dor_costas: Text => "Dor nas costas",
        conjuntvit: Text => "Conjuntivite",
        artrite: Text => "Artrite",
        artralgia: Text => "Artralgia intensa",
        petequia_n: Text => "Petéquias",
        leucopenia: Text => "Leucopenia",
        laco: Text => "Prova do laço positiva",
        dor_retro: Text => "Dor retroorbital",
    }
    Comorbidities {
        diabetes: Text => "Diabetes",
        hematolog: Text => "Doenças hematológicas",
        hepatopat: Text => "Hepatopatias",
        renal: Text => "Doença renal crônica",
        hipertensa: Text => "Hipertensão arterial",
        acido_pept: Text => "Doença ácido-péptica",
        auto_imune: Text => "Doenças autoimunes",
    }
    LabResults {
        dt_coleta: Date => "Data da coleta da sorologia",
        resul_soro: Text => "Resultado da sorologia",
        dt_ns1: Date => "Data da coleta do NS1",
        resul_ns1: Text => "Resultado do NS1",
        dt_viral: Text => "Data da coleta do isolamento viral",
        resul_vi_n: Text => "Resultado do isolamento viral",
        dt_pcr: Date => "Data da coleta do RT-PCR",
        resul_pcr: Text => "Resultado do RT-PCR",
        sorotipo: Text => "Sorotipo",
        histopa_n: Text => "Histopatologia",
        imunoh_n: Text => "Imuno-histoquímica",
    }
    Hospitalisation {
        hospitaliz: Text => "Ocorreu hospitalização",
        dt_interna: Date => "Data da internação",
        coufinf: Text => "UF provável de infecção",
        municipio: Text => "Município provável de infecção",
        tpautocto: Text => "Caso autóctone",
    }
    Closure {
        classi_fin: Text => "Classificação final",
        criterio: Text => "Critério de confirmação/descarte",
        dt_encerra: Date => "Data do encerramento",
        evolucao: Text => "Evolução do caso",
        dt_obito: Date => "Data do óbito",
    }
}

/// Look up a field's metadata by wire name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// Fields that must be non-empty before a record may be submitted.
pub fn required_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|spec| spec.required)
}

/// Fields in the canonical date-field set.
pub fn date_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|spec| spec.kind == FieldKind::Date)
}
