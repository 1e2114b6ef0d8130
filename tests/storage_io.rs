use country_explorer::{BorderReference, CountryDetail, PopulationSample, storage};
use std::fs;
use tempfile::tempdir;

fn sample(name: &str) -> CountryDetail {
    CountryDetail {
        code: "DE".into(),
        name: name.into(),
        flag_url: Some("https://flags.example/de.svg".into()),
        borders: vec![BorderReference {
            code: "FR".into(),
            name: "France".into(),
            flag_url: None,
        }],
        population: vec![
            PopulationSample {
                year: 2019,
                value: Some(83_092_962.0),
            },
            PopulationSample {
                year: 2020,
                value: None,
            },
        ],
    }
}

#[test]
fn save_csv_and_json() {
    let detail = sample("Germany");
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("de.csv");
    storage::save_csv(&detail, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("country_code,country_name,year,value"));
    assert_eq!(csv_txt.lines().count(), 1 + detail.population.len());
    assert!(csv_txt.contains("DE,Germany,2020,\n") || csv_txt.contains("DE,Germany,2020,\r\n"));

    let json_path = dir.path().join("de.json");
    storage::save_json(&detail, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v["countryCode"], "DE");
    assert_eq!(v["borders"][0]["countryCode"], "FR");
    assert_eq!(v["population"].as_array().unwrap().len(), 2);

    // The export parses back into the same record.
    let back: CountryDetail = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(back, detail);
}

// Spreadsheet apps run cells starting with = + - @ as formulas; exported text
// cells get a leading quote instead.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let detail = sample("=HYPERLINK(\"http://evil\")");
    let dir = tempdir().unwrap();
    let path = dir.path().join("evil.csv");
    storage::save_csv(&detail, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    let idx = headers.iter().position(|h| h == "country_name").unwrap();
    let name = row.get(idx).unwrap();
    assert!(name.starts_with('\''), "country_name not prefixed: {name}");
    assert!(name.contains("=HYPERLINK"), "country_name content changed: {name}");
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no_such_dir").join("out.csv");
    let err = storage::save_csv(&sample("Germany"), &missing).unwrap_err();
    assert!(err.to_string().contains("create"));
}
