//! Types and helpers shared by the API server and its clients.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn company_dto_omits_missing_id_and_website() {
        let dto = types::CompanyDto {
            id: None,
            name: "Heineken NV".into(),
            exchange: "Euronext Amsterdam".into(),
            ticker: "HEIA".into(),
            isin: "NL0000009165".into(),
            website: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("website").is_none());
        assert_eq!(json["isin"], "NL0000009165");
    }

    #[test]
    fn company_dto_rejects_missing_required_field() {
        let res = serde_json::from_str::<types::CompanyDto>(
            r#"{"name":"Apple Inc.","exchange":"NASDAQ","isin":"US0378331005"}"#,
        );
        assert!(res.is_err());
    }
}
