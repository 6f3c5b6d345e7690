//! Option lists offered for coded fields.
//!
//! These are advisory: the form renders them, but a value outside the list is still accepted
//! and sent to the server unchanged.

/// One selectable value and its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

pub const NOTIFICATION_TYPE: &[ChoiceOption] = &[
    opt("1", "Negativa"),
    opt("2", "Individual"),
    opt("3", "Surto"),
    opt("4", "Agregado"),
];

pub const SEX: &[ChoiceOption] = &[
    opt("M", "Masculino"),
    opt("F", "Feminino"),
    opt("I", "Ignorado"),
];

pub const PREGNANCY: &[ChoiceOption] = &[
    opt("1", "1º Trimestre"),
    opt("2", "2º Trimestre"),
    opt("3", "3º Trimestre"),
    opt("4", "Gestação ignorada"),
    opt("5", "Não"),
    opt("6", "Não se aplica"),
    opt("9", "Ignorado"),
];

pub const RACE: &[ChoiceOption] = &[
    opt("1", "Branca"),
    opt("2", "Preta"),
    opt("3", "Amarela"),
    opt("4", "Parda"),
    opt("5", "Indígena"),
    opt("9", "Ignorado"),
];

pub const SCHOOLING: &[ChoiceOption] = &[
    opt("0", "Analfabeto"),
    opt("1", "1ª-4ª incompleto"),
    opt("2", "4ª completo"),
    opt("3", "5ª-8ª incompleto"),
    opt("4", "Fundamental completo"),
    opt("5", "Médio incompleto"),
    opt("6", "Médio completo"),
    opt("7", "Superior incompleto"),
    opt("8", "Superior completo"),
    opt("9", "Ignorado"),
    opt("10", "Não se aplica"),
];

pub const YES_NO: &[ChoiceOption] = &[opt("1", "Sim"), opt("2", "Não")];

pub const EXAM_RESULT: &[ChoiceOption] = &[
    opt("1", "Reagente"),
    opt("2", "Não reagente"),
    opt("3", "Inconclusivo"),
    opt("4", "Não realizado"),
];

/// The option list bound to a field, if it has one.
pub fn choices_for(field: &str) -> Option<&'static [ChoiceOption]> {
    let choices = match field {
        "tp_not" => NOTIFICATION_TYPE,
        "cs_sexo" => SEX,
        "cs_gestant" => PREGNANCY,
        "cs_raca" => RACE,
        "cs_escol_n" => SCHOOLING,
        "febre" | "mialgia" | "cefaleia" | "exantema" | "vomito" | "nausea" | "dor_costas"
        | "conjuntvit" | "artrite" | "artralgia" | "petequia_n" | "leucopenia" | "laco"
        | "dor_retro" | "diabetes" | "hematolog" | "hepatopat" | "renal" | "hipertensa"
        | "acido_pept" | "auto_imune" | "hospitaliz" => YES_NO,
        "resul_soro" | "resul_ns1" | "resul_vi_n" | "resul_pcr" => EXAM_RESULT,
        _ => return None,
    };
    Some(choices)
}

/// Display label for a coded value, if the field has a list and the value is on it.
pub fn label_for(field: &str, value: &str) -> Option<&'static str> {
    choices_for(field)?
        .iter()
        .find(|choice| choice.value == value)
        .map(|choice| choice.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{field, Section, FIELDS};

    #[test]
    fn every_bound_field_exists_in_the_catalog() {
        let bound = FIELDS
            .iter()
            .filter(|spec| choices_for(spec.name).is_some())
            .count();
        assert_eq!(bound, 31);
        assert!(field("hospitaliz").is_some());
    }

    #[test]
    fn symptoms_and_comorbidities_are_yes_no() {
        for spec in FIELDS.iter().filter(|spec| {
            matches!(spec.section, Section::SignsSymptoms | Section::Comorbidities)
        }) {
            assert_eq!(choices_for(spec.name), Some(YES_NO), "{}", spec.name);
        }
    }

    #[test]
    fn labels_resolve_for_known_values_only() {
        assert_eq!(label_for("tp_not", "2"), Some("Individual"));
        assert_eq!(label_for("cs_escol_n", "10"), Some("Não se aplica"));
        assert_eq!(label_for("cs_sexo", "X"), None);
        assert_eq!(label_for("sg_uf_not", "SP"), None);
    }
}
