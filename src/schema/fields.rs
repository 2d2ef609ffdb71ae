//! Static field table for emission-factor records
//!
//! The table is written once, in the `emission_fields!` DSL below. Each entry
//! becomes a struct field of `EmissionFields`, a row of `FIELDS`, and an arm
//! in the by-name accessors, so a misspelt name or a wrong type fails to
//! compile instead of silently mapping nothing.
//!
//! Column order in `FIELDS` is the table column order.

use serde::Serialize;

use super::errors::FieldError;
use super::types::{ColumnType, FieldDef, FieldValue};

macro_rules! emission_fields {
    ( $( $name:ident : $ty:ty => $label:literal ),* $(,)? ) => {
        /// All attributes of one emission-factor record; every one optional.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct EmissionFields {
            $( pub $name: Option<$ty>, )*
        }

        /// Field table: name, kind, and spreadsheet label, in column order.
        pub static FIELDS: &[FieldDef] = &[
            $(
                FieldDef {
                    name: stringify!($name),
                    kind: <$ty as ColumnType>::KIND,
                    label: $label,
                },
            )*
        ];

        impl EmissionFields {
            /// Read a field by name
            pub fn get(&self, name: &str) -> Result<Option<FieldValue>, FieldError> {
                match name {
                    $( stringify!($name) => Ok(self.$name.clone().map(ColumnType::into_value)), )*
                    _ => Err(FieldError::UnknownField(name.to_string())),
                }
            }

            /// Assign a field by name. `None` clears it.
            pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError> {
                match name {
                    $(
                        stringify!($name) => {
                            self.$name = match value {
                                None => None,
                                Some(v) => Some(<$ty as ColumnType>::from_value(v).ok_or_else(|| {
                                    FieldError::TypeMismatch {
                                        field: name.to_string(),
                                        expected: <$ty as ColumnType>::KIND.type_name(),
                                    }
                                })?),
                            };
                            Ok(())
                        }
                    )*
                    _ => Err(FieldError::UnknownField(name.to_string())),
                }
            }

            /// Values in column order, aligned with `FIELDS`
            pub fn values(&self) -> Vec<Option<FieldValue>> {
                vec![ $( self.$name.clone().map(ColumnType::into_value), )* ]
            }
        }
    };
}

emission_fields! {
    type_ligne: String => "Type Ligne",
    identifiant_element: f64 => "Identifiant de l'élément",
    structure: String => "Structure",
    statut_element: String => "Statut de l'élément",
    nom_base_francais: String => "Nom base français",
    nom_attribut_francais: String => "Nom attribut français",
    nom_frontiere_francais: String => "Nom frontière français",
    code_categorie: String => "Code de la catégorie",
    tags_francais: String => "Tags français",
    unite_francais: String => "Unité français",
    contributeur: String => "Contributeur",
    programme: String => "Programme",
    url_programme: String => "Url du programme",
    source: String => "Source",
    localisation_geo: String => "Localisation géographique",
    sous_localisation_geo_francais: String => "Sous-localisation géographique français",
    date_creation: String => "Date de création",
    date_modification: String => "Date de modification",
    periode_validite: String => "Période de validité",
    incertitude: String => "Incertitude",
    reglementations: String => "Réglementations",
    transparence: String => "Transparence",
    qualite: String => "Qualité",
    qualite_ter: String => "Qualité TeR",
    qualite_gr: String => "Qualité GR",
    qualite_tir: String => "Qualité TiR",
    qualite_c: String => "Qualité C",
    qualite_p: String => "Qualité P",
    qualite_m: String => "Qualité M",
    commentaire_francais: String => "Commentaire français",
    type_poste: String => "Type poste",
    nom_poste_francais: String => "Nom poste français",
    total_poste_non_decompose: f64 => "Total poste non décomposé",
    co2f: f64 => "CO2f",
    ch4f: f64 => "CH4f",
    ch4b: f64 => "CH4b",
    n2o: f64 => "N2O",
    code_gaz_supplementaire_1: String => "Code gaz supplémentaire 1",
    valeur_gaz_supplementaire_1: f64 => "Valeur gaz supplémentaire 1",
    code_gaz_supplementaire_2: String => "Code gaz supplémentaire 2",
    valeur_gaz_supplementaire_2: f64 => "Valeur gaz supplémentaire 2",
    code_gaz_supplementaire_3: String => "Code gaz supplémentaire 3",
    valeur_gaz_supplementaire_3: f64 => "Valeur gaz supplémentaire 3",
    code_gaz_supplementaire_4: String => "Code gaz supplémentaire 4",
    valeur_gaz_supplementaire_4: f64 => "Valeur gaz supplémentaire 4",
    code_gaz_supplementaire_5: String => "Code gaz supplémentaire 5",
    valeur_gaz_supplementaire_5: f64 => "Valeur gaz supplémentaire 5",
    autres_ges: f64 => "Autres GES",
    co2b: f64 => "CO2b",
}

/// Look up a field definition by name
pub fn field(name: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|def| def.name == name)
}
