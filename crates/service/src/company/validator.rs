use crate::errors::FieldViolation;

use super::domain::CompanyDraft;

pub const ISIN_LEN: usize = 12;

/// Check a candidate's field constraints. An empty result means the draft is valid.
pub fn validate(draft: &CompanyDraft) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for (field, value) in [
        ("name", &draft.name),
        ("exchange", &draft.exchange),
        ("ticker", &draft.ticker),
        ("isin", &draft.isin),
    ] {
        if value.is_empty() {
            violations.push(FieldViolation::new(field, "must not be empty"));
        }
    }
    let isin_len = draft.isin.chars().count();
    if isin_len != 0 && isin_len != ISIN_LEN {
        violations.push(FieldViolation::new(
            "isin",
            format!("must be exactly {} characters (got {})", ISIN_LEN, isin_len),
        ));
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CompanyDraft {
        CompanyDraft {
            id: None,
            name: "Intel Corporation".into(),
            exchange: "NASDAQ".into(),
            ticker: "INTC".into(),
            isin: "US4581401001".into(),
            website: None,
        }
    }

    #[test]
    fn valid_draft_has_no_violations() {
        assert!(validate(&draft()).is_empty());
    }

    #[test]
    fn website_is_optional_and_unchecked() {
        let d = CompanyDraft { website: Some(String::new()), ..draft() };
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn each_required_field_is_reported() {
        let d = CompanyDraft {
            name: String::new(),
            exchange: String::new(),
            ticker: String::new(),
            isin: String::new(),
            ..draft()
        };
        let fields: Vec<_> = validate(&d).into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "exchange", "ticker", "isin"]);
    }

    #[test]
    fn isin_must_be_twelve_characters() {
        for isin in ["US458140100", "US45814010012"] {
            let v = validate(&CompanyDraft { isin: isin.into(), ..draft() });
            assert_eq!(v.len(), 1, "{isin}");
            assert_eq!(v[0].field, "isin");
        }
    }

    #[test]
    fn isin_length_counts_characters_not_bytes() {
        // 12 characters, 13 bytes.
        let v = validate(&CompanyDraft { isin: "DE000PAH003Ö".into(), ..draft() });
        assert!(v.is_empty());
    }
}
