//! Localized text for the presenter.
//!
//! Pure lookup tables keyed by (key, locale). Outcome templates use `*?*` as
//! the placeholder for the offending token or query.

use crate::query::OutcomeKind;

pub const PLACEHOLDER: &str = "*?*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Cz,
    En,
}

impl Locale {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cz" | "cs" | "czech" => Some(Self::Cz),
            "en" | "english" => Some(Self::En),
            _ => None,
        }
    }
}

/// Non-outcome text shown by the command loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ui {
    Prompt,
    Help,
    WrongCommand,
    NotAvailable,
    NoRows,
    Error,
}

pub fn ui(key: Ui, locale: Locale) -> &'static str {
    match (key, locale) {
        (Ui::Prompt, Locale::En) => "    Choose one option: ",
        (Ui::Prompt, Locale::Cz) => "    Vyber jednu z možností: ",
        (Ui::Help, Locale::En) => HELP_EN,
        (Ui::Help, Locale::Cz) => HELP_CZ,
        (Ui::WrongCommand, Locale::En) => "      Command *?* does not exist!",
        (Ui::WrongCommand, Locale::Cz) => "      Příkaz *?* neexistuje!",
        (Ui::NotAvailable, Locale::En) => "      Command *?* is not available yet.",
        (Ui::NotAvailable, Locale::Cz) => "      Příkaz *?* zatím není k dispozici.",
        (Ui::NoRows, Locale::En) => "      Nothing found.",
        (Ui::NoRows, Locale::Cz) => "      Nic nenalezeno.",
        (Ui::Error, Locale::En) => "      Error: *?*",
        (Ui::Error, Locale::Cz) => "      Chyba: *?*",
    }
}

/// Heading or message for an outcome
pub fn outcome_text(kind: OutcomeKind, locale: Locale) -> &'static str {
    use OutcomeKind as K;

    match locale {
        Locale::En => match kind {
            K::AllContact => "All contacts",
            K::AllGroup => "All groups",
            K::AllPrefix => "All prefixes",
            K::AllPhoneNumber => "All phone numbers",
            K::GroupContact => "Contacts in group *?*",
            K::NumberContact => "Contacts with matching number",
            K::DateContact => "Contacts born on *?*",
            K::NameContact => "Contacts with matching name",
            K::NameSimilarContact => "Contacts with similar name",
            K::AmbiguousGroup => "Group *?* not found, did you mean:",
            K::AmbiguousPrefix => "Prefix *?* not found, did you mean:",
            K::NoGroup => "Group *?* does not exist",
            K::NoNumberMatch => "No number matches *?*",
            K::UnknownFlag => "Unknown option *?*",
            K::UnknownTable => "Table *?* does not exist",
            K::NotANumber => "*?* is not a number",
            K::MalformedDate => "Date *?* must have the form YYYY/MM/DD",
            K::EmptyDate => "Date *?* is empty",
            K::NonNumericDate => "Date *?* may contain digits only",
            K::MissingArgument => "Option *?* needs an argument",
        },
        Locale::Cz => match kind {
            K::AllContact => "Všechny kontakty",
            K::AllGroup => "Všechny skupiny",
            K::AllPrefix => "Všechny předvolby",
            K::AllPhoneNumber => "Všechna telefonní čísla",
            K::GroupContact => "Kontakty ve skupině *?*",
            K::NumberContact => "Kontakty s odpovídajícím číslem",
            K::DateContact => "Kontakty narozené *?*",
            K::NameContact => "Kontakty se shodným jménem",
            K::NameSimilarContact => "Kontakty s podobným jménem",
            K::AmbiguousGroup => "Skupina *?* nenalezena, myslel jsi:",
            K::AmbiguousPrefix => "Předvolba *?* nenalezena, myslel jsi:",
            K::NoGroup => "Skupina *?* neexistuje",
            K::NoNumberMatch => "Žádné číslo neodpovídá *?*",
            K::UnknownFlag => "Neznámý přepínač *?*",
            K::UnknownTable => "Tabulka *?* neexistuje",
            K::NotANumber => "*?* není číslo",
            K::MalformedDate => "Datum *?* musí mít tvar RRRR/MM/DD",
            K::EmptyDate => "Datum *?* je prázdné",
            K::NonNumericDate => "Datum *?* smí obsahovat jen číslice",
            K::MissingArgument => "Přepínač *?* potřebuje argument",
        },
    }
}

pub fn column_label(column: &str, locale: Locale) -> &str {
    match (column, locale) {
        ("id", _) => "id",
        ("first_name", Locale::En) => "first name",
        ("first_name", Locale::Cz) => "jméno",
        ("last_name", Locale::En) => "last name",
        ("last_name", Locale::Cz) => "příjmení",
        ("date_of_birth", Locale::En) => "born",
        ("date_of_birth", Locale::Cz) => "narozen",
        ("group_id", Locale::En) => "group",
        ("group_id", Locale::Cz) => "skupina",
        ("street", Locale::En) => "street",
        ("street", Locale::Cz) => "ulice",
        ("house_number", Locale::En) => "no.",
        ("house_number", Locale::Cz) => "č. p.",
        ("city", Locale::En) => "city",
        ("city", Locale::Cz) => "město",
        ("name", Locale::En) => "name",
        ("name", Locale::Cz) => "název",
        ("prefix" | "prefix_id", Locale::En) => "prefix",
        ("prefix" | "prefix_id", Locale::Cz) => "předvolba",
        ("state", Locale::En) => "state",
        ("state", Locale::Cz) => "stát",
        ("number", Locale::En) => "number",
        ("number", Locale::Cz) => "číslo",
        ("contact_id", Locale::En) => "contact",
        ("contact_id", Locale::Cz) => "kontakt",
        (other, _) => other,
    }
}

/// Replace the placeholder in `template` with `value`
pub fn fill(template: &str, value: &str) -> String {
    template.replace(PLACEHOLDER, &format!("'{}'", value))
}

const HELP_EN: &str = "\
--------------------------------------------------------------------------------
 H ................... show this table
 L ................... list all contacts
 L (name) ............ contacts with the given name or similar ones
 L -n (number) ....... contacts with the given number or similar, +code allowed
 L -g (group) ........ contacts within a group
 L -t (table) ........ all rows of a table (contact, group, prefix, number)
 L -d (date) ......... contacts born on a date, format YYYY/MM/DD
                         day only: //DD, month only: /MM/, year only: YYYY//
 I, U, D ............. insert, update, delete (not available yet)
 Q ................... quit the application
--------------------------------------------------------------------------------";

const HELP_CZ: &str = "\
--------------------------------------------------------------------------------
 H ................... ukáže tuto tabulku
 L ................... ukáže všechny kontakty
 L (jméno) ........... ukáže kontakt podle jména nebo podobné kontakty
 L -n (číslo) ........ ukáže kontakty podle čísla, lze uvést i +předvolbu
 L -g (skupina) ...... ukáže kontakty ve skupině
 L -t (tabulka) ...... ukáže všechny řádky tabulky (contact, group, prefix, number)
 L -d (datum) ........ ukáže kontakty podle data narození, formát RRRR/MM/DD
                         jen den: //DD, jen měsíc: /MM/, jen rok: RRRR//
 I, U, D ............. vložení, úprava, smazání (zatím není k dispozici)
 Q ................... ukončí aplikaci
--------------------------------------------------------------------------------";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("cz"), Some(Locale::Cz));
        assert_eq!(Locale::parse("de"), None);
    }

    #[test]
    fn test_fill() {
        let text = fill(outcome_text(OutcomeKind::NoGroup, Locale::En), "fam");
        assert_eq!(text, "Group 'fam' does not exist");
    }

    #[test]
    fn test_every_message_is_translated() {
        use OutcomeKind as K;
        let kinds = [
            K::AllContact,
            K::GroupContact,
            K::NameSimilarContact,
            K::AmbiguousPrefix,
            K::MissingArgument,
        ];
        for kind in kinds {
            assert_ne!(outcome_text(kind, Locale::En), outcome_text(kind, Locale::Cz));
        }
    }

    #[test]
    fn test_column_labels() {
        assert_eq!(column_label("group_id", Locale::En), "group");
        assert_eq!(column_label("first_name", Locale::Cz), "jméno");
        assert_eq!(column_label("unknown", Locale::En), "unknown");
    }
}
