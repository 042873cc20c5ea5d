//! Name rules for status records.
//!
//! Creation only accepts names from the fixed vocabulary. Renames accept any
//! non-empty name made of letters (ASCII or the accented Spanish ones) and whitespace.

use crate::model::ALLOWED_NAMES;

const ACCENTED: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú', 'ñ', 'Ñ'];

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ACCENTED.contains(&c) || c.is_whitespace()
}

pub fn is_valid_new_name(name: &str) -> bool {
    !is_blank(name) && ALLOWED_NAMES.contains(&name)
}

pub fn is_valid_rename(name: &str) -> bool {
    // Digits fail `is_name_char` too.
    !is_blank(name) && name.chars().all(is_name_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::creado("Creado", true)]
    #[case::with_space("En evaluacion", true)]
    #[case::finalizado("Finalizado", true)]
    #[case::lowercase("creado", false)]
    #[case::not_in_vocabulary("Xyz123", false)]
    #[case::empty("", false)]
    #[case::blank("   ", false)]
    #[case::padded(" Creado ", false)]
    fn new_name_rules(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_new_name(name), expected);
    }

    #[rstest]
    #[case::plain("Pausado", true)]
    #[case::accented("Revisión técnica", true)]
    #[case::enie("Año cerrado", true)]
    #[case::digit("Plan 1", false)]
    #[case::symbol("Listo!", false)]
    #[case::hyphen("Pre-aprobado", false)]
    #[case::umlaut("Geprüft", false)]
    #[case::empty("", false)]
    #[case::blank(" \t ", false)]
    fn rename_rules(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_rename(name), expected);
    }
}
