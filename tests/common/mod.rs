//! Shared fixtures: a loopback HTTP stub and a scriptable in-memory source.
#![allow(dead_code)]

use country_explorer::{
    ApiError, BorderReference, CountryDetail, CountrySource, CountrySummary, PopulationSample,
};
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// HTTP stub
// ---------------------------------------------------------------------------

pub struct StubServer {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Serve fixed `(path, status, body)` responses on 127.0.0.1. Unknown paths get
/// a 404 with an empty body. The thread lives until the test process exits.
pub fn serve(routes: Vec<(&str, u16, &str)>) -> StubServer {
    let routes: HashMap<String, (u16, String)> = routes
        .into_iter()
        .map(|(p, s, b)| (p.to_string(), (s, b.to_string())))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain headers.
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) if line == "\r\n" || line == "\n" => break,
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
            let path = request_line
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .to_string();
            seen.lock().unwrap().push(path.clone());

            let (status, body) = routes
                .get(&path)
                .cloned()
                .unwrap_or((404, String::new()));
            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    StubServer { base, requests }
}

/// An address nothing is listening on.
pub fn closed_port_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub const COUNTRIES_JSON: &str = r#"[
  {"countryCode":"DE","name":"Germany","flagUrl":"https://flags.example/de.svg"},
  {"countryCode":"FR","name":"France","flagUrl":"https://flags.example/fr.svg"},
  {"countryCode":"IS","name":"Iceland","flagUrl":""}
]"#;

pub const GERMANY_JSON: &str = r#"{
  "countryCode":"DE",
  "name":"Germany",
  "flagUrl":"https://flags.example/de.svg",
  "borders":[
    {"countryCode":"FR","name":"France","flagUrl":"https://flags.example/fr.svg"},
    {"countryCode":"AT","name":"Austria","flagUrl":null}
  ],
  "population":[
    {"year":2021,"value":83196078},
    {"year":2019,"value":83092962},
    {"year":2020,"value":0},
    {"year":2018,"value":null}
  ]
}"#;

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

pub fn summary(code: &str, name: &str) -> CountrySummary {
    CountrySummary {
        code: code.into(),
        name: name.into(),
        flag_url: Some(format!("https://flags.example/{}.svg", code.to_lowercase())),
    }
}

pub fn border(code: &str, name: &str) -> BorderReference {
    BorderReference {
        code: code.into(),
        name: name.into(),
        flag_url: None,
    }
}

pub fn detail(code: &str, name: &str, borders: Vec<BorderReference>) -> CountryDetail {
    CountryDetail {
        code: code.into(),
        name: name.into(),
        flag_url: None,
        borders,
        population: vec![
            PopulationSample {
                year: 2000,
                value: Some(1_000_000.0),
            },
            PopulationSample {
                year: 2010,
                value: Some(1_200_000.0),
            },
        ],
    }
}

pub fn network_error(endpoint: &str) -> ApiError {
    ApiError {
        status: Some(503),
        message: "unavailable".into(),
        endpoint: endpoint.into(),
    }
}

type DetailOutcome = Result<Option<CountryDetail>, ApiError>;
type ListOutcome = Result<Vec<CountrySummary>, ApiError>;

/// Scripted responses, consumed in order per key. A key may be gated so its
/// fetch blocks until the test releases it.
#[derive(Default)]
pub struct FakeSource {
    lists: Mutex<VecDeque<ListOutcome>>,
    details: Mutex<HashMap<String, VecDeque<DetailOutcome>>>,
    gates: Mutex<HashMap<String, Receiver<()>>>,
    finished: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_list(&self, outcome: ListOutcome) {
        self.lists.lock().unwrap().push_back(outcome);
    }

    pub fn push_detail(&self, code: &str, outcome: DetailOutcome) {
        self.details
            .lock()
            .unwrap()
            .entry(code.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// The next fetch of `code` blocks until the returned sender fires.
    pub fn gate(&self, code: &str) -> Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(code.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until a fetch for `key` has returned.
    pub fn wait_finished(&self, key: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.finished.lock().unwrap().iter().any(|k| k == key) {
                // Let the worker hand its result to the channel.
                thread::sleep(Duration::from_millis(50));
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }
}

impl CountrySource for FakeSource {
    fn list_countries(&self) -> Result<Vec<CountrySummary>, ApiError> {
        self.calls.lock().unwrap().push("<list>".into());
        let outcome = self
            .lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]));
        self.finished.lock().unwrap().push("<list>".into());
        outcome
    }

    fn get_country_detail(&self, code: &str) -> Result<Option<CountryDetail>, ApiError> {
        self.calls.lock().unwrap().push(code.to_string());
        let gate = self.gates.lock().unwrap().remove(code);
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        let outcome = self
            .details
            .lock()
            .unwrap()
            .get_mut(code)
            .and_then(|q| q.pop_front())
            .unwrap_or(Ok(None));
        self.finished.lock().unwrap().push(code.to_string());
        outcome
    }
}
