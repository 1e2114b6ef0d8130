use serde::{Deserialize, Serialize};

/// One entry of the `/countries` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    #[serde(rename = "countryCode")]
    pub code: String,
    pub name: String,
    /// Some responses omit the flag, send `null`, or send an empty string.
    /// All three normalize to `None`.
    #[serde(default, deserialize_with = "de_blank_as_none")]
    pub flag_url: Option<String>,
}

/// A neighbouring country as listed on a detail record.
///
/// Same shape as [`CountrySummary`], but it only points at another record; the
/// full detail is fetched when the user follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderReference {
    #[serde(rename = "countryCode")]
    pub code: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_blank_as_none")]
    pub flag_url: Option<String>,
}

/// One (year, value) observation. `value` may be null or zero when the source
/// has no data for that year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub year: i32,
    #[serde(default)]
    pub value: Option<f64>,
}

impl PopulationSample {
    /// Defined, finite, and strictly positive.
    pub fn is_valid(&self) -> bool {
        matches!(self.value, Some(v) if v.is_finite() && v > 0.0)
    }
}

/// Full record returned by `/countries/{code}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetail {
    #[serde(rename = "countryCode")]
    pub code: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_blank_as_none")]
    pub flag_url: Option<String>,
    #[serde(default)]
    pub borders: Vec<BorderReference>,
    #[serde(default)]
    pub population: Vec<PopulationSample>,
}

impl CountryDetail {
    pub fn summary(&self) -> CountrySummary {
        CountrySummary {
            code: self.code.clone(),
            name: self.name.clone(),
            flag_url: self.flag_url.clone(),
        }
    }
}

/// Serde helper: treat `null`, a missing field, and a blank string alike.
fn de_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_flag_is_none() {
        let c: CountrySummary =
            serde_json::from_str(r#"{"countryCode":"AQ","name":"Antarctica","flagUrl":"  "}"#)
                .unwrap();
        assert_eq!(c.flag_url, None);
        let c: CountrySummary =
            serde_json::from_str(r#"{"countryCode":"AQ","name":"Antarctica"}"#).unwrap();
        assert_eq!(c.flag_url, None);
    }

    #[test]
    fn sample_validity() {
        assert!(PopulationSample { year: 2000, value: Some(1.0) }.is_valid());
        assert!(!PopulationSample { year: 2000, value: Some(0.0) }.is_valid());
        assert!(!PopulationSample { year: 2000, value: Some(-3.0) }.is_valid());
        assert!(!PopulationSample { year: 2000, value: Some(f64::NAN) }.is_valid());
        assert!(!PopulationSample { year: 2000, value: None }.is_valid());
    }
}
