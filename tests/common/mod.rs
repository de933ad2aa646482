#![allow(dead_code)]

//! In-process stand-in for the assessment API, served with warp on an
//! ephemeral port.

use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use warp::http::StatusCode;
use warp::Filter;

use vitalrisk::{HttpAssessmentClient, RetryPolicy};

pub const API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
pub struct Attempt {
    pub page: u32,
    pub status: u16,
    pub at: Instant,
}

pub struct MockState {
    pages: Vec<Value>,
    failures: Mutex<VecDeque<u16>>,
    submit_status: u16,
    pub attempts: Mutex<Vec<Attempt>>,
    pub submissions: Mutex<Vec<Value>>,
}

impl MockState {
    pub fn new(pages: Vec<Value>) -> Self {
        MockState {
            pages,
            failures: Mutex::new(VecDeque::new()),
            submit_status: 200,
            attempts: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Statuses returned, in order, to the next page requests.
    pub fn with_failures(self, statuses: &[u16]) -> Self {
        *self.failures.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn with_submit_status(mut self, status: u16) -> Self {
        self.submit_status = status;
        self
    }

    pub fn attempts(&self) -> Vec<Attempt> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.attempts().iter().map(|a| a.page).collect()
    }

    pub fn submissions(&self) -> Vec<Value> {
        self.submissions.lock().unwrap().clone()
    }

    fn serve_page(
        &self,
        api_key: Option<String>,
        query: HashMap<String, String>,
    ) -> warp::reply::WithStatus<warp::reply::Json> {
        let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);

        let (status, body) = if api_key.as_deref() != Some(API_KEY) {
            (401, json!({"error": "Invalid API key"}))
        } else if let Some(status) = self.failures.lock().unwrap().pop_front() {
            (status, json!({"error": "try again"}))
        } else {
            let body = self
                .pages
                .get((page as usize).wrapping_sub(1))
                .cloned()
                .unwrap_or_else(|| json!({"patients": []}));
            (200, body)
        };

        self.attempts.lock().unwrap().push(Attempt {
            page,
            status,
            at: Instant::now(),
        });
        reply(status, &body)
    }

    fn accept_submission(
        &self,
        api_key: Option<String>,
        body: Value,
    ) -> warp::reply::WithStatus<warp::reply::Json> {
        if api_key.as_deref() != Some(API_KEY) {
            return reply(401, &json!({"error": "Invalid API key"}));
        }
        self.submissions.lock().unwrap().push(body);
        if self.submit_status == 200 {
            reply(200, &json!({"success": true, "message": "Assessment submitted"}))
        } else {
            reply(self.submit_status, &json!({"error": "Invalid submission"}))
        }
    }
}

fn reply(status: u16, body: &Value) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = StatusCode::from_u16(status).unwrap();
    warp::reply::with_status(warp::reply::json(body), status)
}

fn with_state(
    state: Arc<MockState>,
) -> impl Filter<Extract = (Arc<MockState>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&state))
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockServer {
    pub async fn start(state: MockState) -> Self {
        let state = Arc::new(state);

        let patients = warp::path!("api" / "patients")
            .and(warp::get())
            .and(warp::header::optional::<String>("x-api-key"))
            .and(warp::query::<HashMap<String, String>>())
            .and(with_state(Arc::clone(&state)))
            .map(|key: Option<String>, query: HashMap<String, String>, state: Arc<MockState>| {
                state.serve_page(key, query)
            });

        let submit = warp::path!("api" / "submit-assessment")
            .and(warp::post())
            .and(warp::header::optional::<String>("x-api-key"))
            .and(warp::body::json())
            .and(with_state(Arc::clone(&state)))
            .map(|key: Option<String>, body: Value, state: Arc<MockState>| {
                state.accept_submission(key, body)
            });

        let (addr, server) =
            warp::serve(patients.or(submit)).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        MockServer { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self, retry: RetryPolicy) -> HttpAssessmentClient {
        HttpAssessmentClient::new(&self.base_url(), API_KEY, retry)
    }
}

/// Default status table with millisecond delays.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(5)
        .with_delay(429, Duration::from_millis(40))
        .with_delay(500, Duration::from_millis(20))
        .with_delay(503, Duration::from_millis(20))
}

pub fn sample_pages() -> Vec<Value> {
    vec![
        json!({
            "patients": [
                {"id": "DEMO001", "blood_pressure": {"systolic": 150, "diastolic": 95}, "temperature": 102.3, "age": 70},
                {"id": "DEMO002", "temperature": 98.0, "age": 30}
            ],
            "pagination": {"page": 1, "limit": 2, "total": 3, "totalPages": 2, "hasNext": true}
        }),
        json!({
            "patients": [
                {"id": "DEMO003", "blood_pressure": {"systolic": "125", "diastolic": "78"}, "temperature": "99.9", "age": "52"}
            ],
            "pagination": {"page": 2, "limit": 2, "total": 3, "totalPages": 2, "hasNext": false}
        }),
    ]
}
